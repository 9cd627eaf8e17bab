//! The declarator micro-grammar embedded in registry member and
//! parameter bodies.
//!
//! After the XML pass splits a member into the text before its `<type>`
//! tag and the text after it, this module classifies both. The prefix is
//! a closed set; the suffix is either a bitfield width, a pointer shape,
//! or a run of array dimensions whose sizes may be literal or named by an
//! `<enum>` marker.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, value},
    multi::many1,
    sequence::{delimited, preceded},
    IResult,
};

/// Text allowed before the `<type>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    None,
    Const,
    Struct,
    ConstStruct,
}

/// Pointer declarator shapes used by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerShape {
    /// `T *`
    Single,
    /// `T **`
    Double,
    /// `T * const*`
    DoubleInnerConst,
}

/// One `[...]` array dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLen {
    Literal(u32),
    /// `[<enum>NAME</enum>]`; resolved against the enum value table.
    Named(String),
}

/// Classified text after the `<type>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declarator {
    Plain,
    Bitfield(u32),
    Pointer(PointerShape),
    Arrays(Vec<ArrayLen>),
}

pub fn parse_prefix(text: &str) -> Option<Prefix> {
    match text {
        "" => Some(Prefix::None),
        "const" => Some(Prefix::Const),
        "struct" => Some(Prefix::Struct),
        "const struct" => Some(Prefix::ConstStruct),
        _ => None,
    }
}

/// Parses the declarator suffix; `None` on anything outside the
/// micro-grammar.
pub fn parse_suffix(text: &str) -> Option<Declarator> {
    if text.is_empty() {
        return Some(Declarator::Plain);
    }
    all_consuming(declarator)(text).ok().map(|(_, d)| d)
}

fn declarator(input: &str) -> IResult<&str, Declarator> {
    alt((bitfield, pointers, arrays))(input)
}

fn bitfield(input: &str) -> IResult<&str, Declarator> {
    map_res(preceded(char(':'), digit1), |digits: &str| {
        digits.parse::<u32>().map(Declarator::Bitfield)
    })(input)
}

fn pointers(input: &str) -> IResult<&str, Declarator> {
    alt((
        value(
            Declarator::Pointer(PointerShape::DoubleInnerConst),
            tag("* const*"),
        ),
        value(
            Declarator::Pointer(PointerShape::DoubleInnerConst),
            tag("* const *"),
        ),
        value(Declarator::Pointer(PointerShape::Double), tag("**")),
        value(Declarator::Pointer(PointerShape::Single), tag("*")),
    ))(input)
}

fn arrays(input: &str) -> IResult<&str, Declarator> {
    map(many1(array_dim), Declarator::Arrays)(input)
}

fn array_dim(input: &str) -> IResult<&str, ArrayLen> {
    delimited(
        preceded(multispace0, char('[')),
        alt((
            map_res(digit1, |digits: &str| {
                digits.parse::<u32>().map(ArrayLen::Literal)
            }),
            map(
                delimited(tag("<enum>"), is_not("<"), tag("</enum>")),
                |name: &str| ArrayLen::Named(name.to_string()),
            ),
        )),
        char(']'),
    )(input)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefixes() {
        assert_eq!(parse_prefix(""), Some(Prefix::None));
        assert_eq!(parse_prefix("const"), Some(Prefix::Const));
        assert_eq!(parse_prefix("struct"), Some(Prefix::Struct));
        assert_eq!(parse_prefix("const struct"), Some(Prefix::ConstStruct));
        assert_eq!(parse_prefix("volatile"), None);
    }

    #[test]
    fn pointer_suffixes() {
        assert_eq!(
            parse_suffix("*"),
            Some(Declarator::Pointer(PointerShape::Single))
        );
        assert_eq!(
            parse_suffix("**"),
            Some(Declarator::Pointer(PointerShape::Double))
        );
        assert_eq!(
            parse_suffix("* const*"),
            Some(Declarator::Pointer(PointerShape::DoubleInnerConst))
        );
        assert_eq!(
            parse_suffix("* const *"),
            Some(Declarator::Pointer(PointerShape::DoubleInnerConst))
        );
        assert_eq!(parse_suffix("***"), None);
        assert_eq!(parse_suffix("* junk"), None);
    }

    #[test]
    fn bitfield_suffixes() {
        assert_eq!(parse_suffix(":8"), Some(Declarator::Bitfield(8)));
        assert_eq!(parse_suffix(":24"), Some(Declarator::Bitfield(24)));
        assert_eq!(parse_suffix(":x"), None);
    }

    #[test]
    fn array_suffixes() {
        assert_eq!(
            parse_suffix("[4]"),
            Some(Declarator::Arrays(vec![ArrayLen::Literal(4)]))
        );
        assert_eq!(
            parse_suffix("[3][4]"),
            Some(Declarator::Arrays(vec![
                ArrayLen::Literal(3),
                ArrayLen::Literal(4)
            ]))
        );
        assert_eq!(
            parse_suffix("[<enum>VK_UUID_SIZE</enum>]"),
            Some(Declarator::Arrays(vec![ArrayLen::Named(String::from(
                "VK_UUID_SIZE"
            ))]))
        );
        assert_eq!(parse_suffix("[4"), None);
        assert_eq!(parse_suffix("[]"), None);
    }

    #[test]
    fn empty_is_plain() {
        assert_eq!(parse_suffix(""), Some(Declarator::Plain));
    }
}
