//! Event-driven parsing of the registry XML into [`Registry`] records.
//!
//! Only the elements the loader interprets are extracted; everything
//! else is tolerated and skipped. Member and parameter bodies are split
//! around their `<type>` tag, and the categories the loader matches
//! textually keep a reconstructed copy of their inner XML: entities are
//! decoded by the XML layer, `<name>`/`<type>`/`<enum>` markers are
//! reinserted.

use std::io::Read;

use xml::attribute::OwnedAttribute;
use xml::reader::XmlEvent;

use crate::types::*;

type XmlEvents<R> = xml::reader::Events<R>;

pub(crate) struct ParseCtx<R: Read> {
    events: XmlEvents<R>,
    xpath: String,
}

impl<R: Read> ParseCtx<R> {
    fn push_element(&mut self, name: &str) {
        self.xpath.push('/');
        self.xpath.push_str(name);
    }

    fn pop_element(&mut self) {
        if let Some(pos) = self.xpath.rfind('/') {
            self.xpath.truncate(pos);
        }
    }

    fn next(&mut self) -> Result<Option<XmlEvent>, LoadError> {
        match self.events.next() {
            None => Ok(None),
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(error)) => Err(LoadError::Xml(error)),
        }
    }

    fn malformed(&self, detail: impl Into<String>) -> LoadError {
        LoadError::MalformedXml {
            xpath: self.xpath.clone(),
            detail: detail.into(),
        }
    }
}

fn attr<'a>(attributes: &'a [OwnedAttribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name.local_name == name)
        .map(|a| a.value.as_str())
}

fn attr_string(attributes: &[OwnedAttribute], name: &str) -> Option<String> {
    attr(attributes, name).map(str::to_string)
}

fn attr_i64<R: Read>(
    ctx: &ParseCtx<R>,
    attributes: &[OwnedAttribute],
    name: &str,
) -> Result<i64, LoadError> {
    match attr(attributes, name) {
        None => Ok(0),
        Some(text) => text
            .parse::<i64>()
            .map_err(|_| ctx.malformed(format!("attribute {name} is not an integer: {text}"))),
    }
}

pub(crate) fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Skips the rest of the current element, including nested children.
fn consume_element<R: Read>(ctx: &mut ParseCtx<R>) -> Result<(), LoadError> {
    let mut depth = 1usize;
    while let Some(event) = ctx.next()? {
        match event {
            XmlEvent::StartElement { .. } => depth += 1,
            XmlEvent::EndElement { .. } => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
    Err(ctx.malformed("unexpected end of document"))
}

/// Collects the text content of the current element.
fn read_text_element<R: Read>(ctx: &mut ParseCtx<R>) -> Result<String, LoadError> {
    let mut text = String::new();
    let mut depth = 1usize;
    while let Some(event) = ctx.next()? {
        match event {
            XmlEvent::Characters(t) | XmlEvent::Whitespace(t) | XmlEvent::CData(t) => {
                text.push_str(&t)
            }
            XmlEvent::StartElement { .. } => depth += 1,
            XmlEvent::EndElement { .. } => {
                depth -= 1;
                if depth == 0 {
                    return Ok(text);
                }
            }
            _ => {}
        }
    }
    Err(ctx.malformed("unexpected end of document"))
}

// Dispatches the children of the current element by name. Each handler
// must consume its element through the matching end tag; unlisted
// children are skipped whole.
macro_rules! match_children {
    ($ctx:expr, $attrs:ident, { $($name:literal => $body:expr),+ $(,)? }) => {
        loop {
            match $ctx.next()? {
                None => return Err($ctx.malformed("unexpected end of document")),
                Some(XmlEvent::StartElement { name, attributes, .. }) => {
                    let local = name.local_name;
                    $ctx.push_element(&local);
                    #[allow(unused_variables)]
                    let $attrs = attributes;
                    match local.as_str() {
                        $($name => $body,)+
                        _ => consume_element($ctx)?,
                    }
                    $ctx.pop_element();
                }
                Some(XmlEvent::EndElement { .. }) => break,
                Some(_) => {}
            }
        }
    };
}

/// Parses a registry document from a stream.
pub fn parse_stream<R: Read>(stream: R) -> Result<Registry, LoadError> {
    let reader = xml::reader::ParserConfig::new().create_reader(stream);
    let mut ctx = ParseCtx {
        events: reader.into_iter(),
        xpath: String::new(),
    };
    let mut registry = None;
    while let Some(event) = ctx.next()? {
        if let XmlEvent::StartElement { name, .. } = event {
            let local = name.local_name;
            ctx.push_element(&local);
            if local == "registry" && registry.is_none() {
                registry = Some(parse_registry(&mut ctx)?);
            } else {
                consume_element(&mut ctx)?;
            }
            ctx.pop_element();
        }
    }
    registry.ok_or(LoadError::MalformedXml {
        xpath: String::new(),
        detail: String::from("missing registry element"),
    })
}

fn parse_registry<R: Read>(ctx: &mut ParseCtx<R>) -> Result<Registry, LoadError> {
    let mut registry = Registry::default();
    match_children!(ctx, attrs, {
        "platforms" => match_children!(ctx, attrs, {
            "platform" => {
                registry.platforms.push(Platform {
                    name: attr_string(&attrs, "name")
                        .ok_or_else(|| ctx.malformed("platform without name"))?,
                    protect: attr_string(&attrs, "protect").unwrap_or_default(),
                    comment: attr_string(&attrs, "comment"),
                });
                consume_element(ctx)?;
            },
        }),
        "tags" => match_children!(ctx, attrs, {
            "tag" => {
                registry.tags.push(Tag {
                    name: attr_string(&attrs, "name")
                        .ok_or_else(|| ctx.malformed("tag without name"))?,
                    author: attr_string(&attrs, "author").unwrap_or_default(),
                    contact: attr_string(&attrs, "contact").unwrap_or_default(),
                });
                consume_element(ctx)?;
            },
        }),
        "types" => match_children!(ctx, attrs, {
            "type" => {
                let record = parse_type_record(ctx, &attrs)?;
                registry.types.push(record);
            },
        }),
        "enums" => {
            let block = parse_enums_block(ctx, &attrs)?;
            registry.enums.push(block);
        },
        "commands" => match_children!(ctx, attrs, {
            "command" => {
                let command = parse_command(ctx, &attrs)?;
                registry.commands.push(command);
            },
        }),
        "feature" => match_children!(ctx, attrs, {
            "require" => {
                let block = parse_require(ctx)?;
                registry.features.push(block);
            },
        }),
        "extensions" => match_children!(ctx, attrs, {
            "extension" => {
                let extension = parse_extension(ctx, &attrs)?;
                registry.extensions.push(extension);
            },
        }),
    });
    Ok(registry)
}

fn parse_type_record<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: &[OwnedAttribute],
) -> Result<TypeRecord, LoadError> {
    let mut record = TypeRecord {
        name: attr_string(attributes, "name").unwrap_or_default(),
        category: attr_string(attributes, "category").unwrap_or_default(),
        requires: attr_string(attributes, "requires"),
        alias: attr_string(attributes, "alias"),
        api: attr_string(attributes, "api"),
        struct_extends: attr_string(attributes, "structextends"),
        members: Vec::new(),
        raw: String::new(),
    };
    let structural =
        record.alias.is_none() && (record.category == "struct" || record.category == "union");
    loop {
        match ctx.next()? {
            None => return Err(ctx.malformed("unexpected end of document")),
            Some(XmlEvent::Characters(t))
            | Some(XmlEvent::Whitespace(t))
            | Some(XmlEvent::CData(t)) => record.raw.push_str(&t),
            Some(XmlEvent::StartElement {
                name, attributes, ..
            }) => {
                let local = name.local_name;
                ctx.push_element(&local);
                match local.as_str() {
                    "member" if structural => {
                        let member = parse_member(ctx, &attributes)?;
                        record.raw.push_str("<member>");
                        record.raw.push_str(&member.raw);
                        record.raw.push_str("</member>");
                        record.members.push(member);
                    }
                    "comment" => {
                        consume_element(ctx)?;
                    }
                    _ => {
                        let text = read_text_element(ctx)?;
                        if local == "name" && record.name.is_empty() {
                            record.name = text.trim().to_string();
                        }
                        record.raw.push('<');
                        record.raw.push_str(&local);
                        record.raw.push('>');
                        record.raw.push_str(&text);
                        record.raw.push_str("</");
                        record.raw.push_str(&local);
                        record.raw.push('>');
                    }
                }
                ctx.pop_element();
            }
            Some(XmlEvent::EndElement { .. }) => break,
            Some(_) => {}
        }
    }
    if record.name.is_empty() {
        return Err(ctx.malformed("type without a name"));
    }
    Ok(record)
}

fn parse_member<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: &[OwnedAttribute],
) -> Result<MemberRecord, LoadError> {
    let mut member = MemberRecord {
        name: attr_string(attributes, "name").unwrap_or_default(),
        type_name: attr_string(attributes, "type").unwrap_or_default(),
        prefix: String::new(),
        suffix: String::new(),
        values: attr_string(attributes, "values"),
        len: attr_string(attributes, "len"),
        altlen: attr_string(attributes, "altlen"),
        // "true,false" style values apply to the outer pointer
        optional: attr(attributes, "optional")
            .map(|v| v.split(',').next() == Some("true"))
            .unwrap_or(false),
        validstructs: attr_string(attributes, "validstructs"),
        api: attr_string(attributes, "api"),
        raw: String::new(),
    };
    let mut before = String::new();
    let mut after = String::new();
    let mut seen_type = false;
    loop {
        match ctx.next()? {
            None => return Err(ctx.malformed("unexpected end of document")),
            Some(XmlEvent::Characters(t))
            | Some(XmlEvent::Whitespace(t))
            | Some(XmlEvent::CData(t)) => {
                member.raw.push_str(&t);
                if seen_type {
                    after.push_str(&t);
                } else {
                    before.push_str(&t);
                }
            }
            Some(XmlEvent::StartElement { name, .. }) => {
                let local = name.local_name;
                ctx.push_element(&local);
                match local.as_str() {
                    "type" => {
                        let text = read_text_element(ctx)?;
                        member.raw.push_str("<type>");
                        member.raw.push_str(&text);
                        member.raw.push_str("</type>");
                        if member.type_name.is_empty() {
                            member.type_name = text.trim().to_string();
                        }
                        seen_type = true;
                    }
                    "name" => {
                        let text = read_text_element(ctx)?;
                        member.raw.push_str("<name>");
                        member.raw.push_str(&text);
                        member.raw.push_str("</name>");
                        if member.name.is_empty() {
                            member.name = text.trim().to_string();
                        }
                    }
                    "enum" => {
                        let text = read_text_element(ctx)?;
                        let marker = format!("<enum>{text}</enum>");
                        member.raw.push_str(&marker);
                        if seen_type {
                            after.push_str(&marker);
                        } else {
                            before.push_str(&marker);
                        }
                    }
                    "comment" => {
                        consume_element(ctx)?;
                    }
                    _ => consume_element(ctx)?,
                }
                ctx.pop_element();
            }
            Some(XmlEvent::EndElement { .. }) => break,
            Some(_) => {}
        }
    }
    member.prefix = collapse_ws(&before);
    member.suffix = collapse_ws(&after);
    member.raw = member.raw.trim().to_string();
    if member.type_name.is_empty() {
        return Err(ctx.malformed("member without a type"));
    }
    if member.name.is_empty() {
        return Err(ctx.malformed("member without a name"));
    }
    Ok(member)
}

fn parse_enums_block<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: &[OwnedAttribute],
) -> Result<EnumsBlock, LoadError> {
    let mut block = EnumsBlock {
        name: attr_string(attributes, "name").unwrap_or_default(),
        fields: Vec::new(),
    };
    match_children!(ctx, attrs, {
        "enum" => {
            let field = parse_enum_record(ctx, &attrs)?;
            block.fields.push(field);
        },
    });
    Ok(block)
}

fn parse_enum_record<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: &[OwnedAttribute],
) -> Result<EnumRecord, LoadError> {
    let record = EnumRecord {
        name: attr_string(attributes, "name").ok_or_else(|| ctx.malformed("enum without name"))?,
        alias: attr_string(attributes, "alias"),
        value: attr_string(attributes, "value"),
        bitpos: attr_string(attributes, "bitpos"),
        dir: attr_string(attributes, "dir"),
        extends: attr_string(attributes, "extends"),
        extnumber: attr_i64(ctx, attributes, "extnumber")?,
        offset: attr_i64(ctx, attributes, "offset")?,
        api: attr_string(attributes, "api"),
    };
    consume_element(ctx)?;
    Ok(record)
}

fn parse_command<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: &[OwnedAttribute],
) -> Result<CommandRecord, LoadError> {
    let mut command = CommandRecord {
        name: attr_string(attributes, "name").unwrap_or_default(),
        alias: attr_string(attributes, "alias"),
        api: attr_string(attributes, "api"),
        proto_type: String::new(),
        params: Vec::new(),
    };
    match_children!(ctx, attrs, {
        "proto" => {
            let (proto_type, proto_name) = parse_proto(ctx)?;
            command.proto_type = proto_type;
            if command.name.is_empty() {
                command.name = proto_name;
            }
        },
        "param" => {
            let param = parse_member(ctx, &attrs)?;
            command.params.push(param);
        },
    });
    if command.name.is_empty() {
        return Err(ctx.malformed("command without a name"));
    }
    if command.alias.is_none() && command.proto_type.is_empty() {
        return Err(ctx.malformed(format!(
            "command \"{}\" without a prototype",
            command.name
        )));
    }
    Ok(command)
}

// The prototype must be exactly a result type and a name.
fn parse_proto<R: Read>(ctx: &mut ParseCtx<R>) -> Result<(String, String), LoadError> {
    let mut proto_type = None;
    let mut proto_name = None;
    let mut raw = String::new();
    let mut junk = false;
    loop {
        match ctx.next()? {
            None => return Err(ctx.malformed("unexpected end of document")),
            Some(XmlEvent::Characters(t))
            | Some(XmlEvent::Whitespace(t))
            | Some(XmlEvent::CData(t)) => {
                if !t.trim().is_empty() {
                    junk = true;
                }
                raw.push_str(&t);
            }
            Some(XmlEvent::StartElement { name, .. }) => {
                let local = name.local_name;
                ctx.push_element(&local);
                let text = read_text_element(ctx)?;
                match local.as_str() {
                    "type" if proto_type.is_none() => {
                        raw.push_str(&format!("<type>{text}</type>"));
                        proto_type = Some(text.trim().to_string());
                    }
                    "name" if proto_name.is_none() => {
                        raw.push_str(&format!("<name>{text}</name>"));
                        proto_name = Some(text.trim().to_string());
                    }
                    _ => junk = true,
                }
                ctx.pop_element();
            }
            Some(XmlEvent::EndElement { .. }) => break,
            Some(_) => {}
        }
    }
    match (proto_type, proto_name, junk) {
        (Some(proto_type), Some(proto_name), false) => Ok((proto_type, proto_name)),
        (_, proto_name, _) => Err(LoadError::UnexpectedMemberSyntax {
            owner: proto_name.unwrap_or_else(|| String::from("command prototype")),
            raw: collapse_ws(&raw),
        }),
    }
}

fn parse_require<R: Read>(ctx: &mut ParseCtx<R>) -> Result<RequireBlock, LoadError> {
    let mut block = RequireBlock { enums: Vec::new() };
    match_children!(ctx, attrs, {
        "enum" => {
            let field = parse_enum_record(ctx, &attrs)?;
            block.enums.push(field);
        },
    });
    Ok(block)
}

fn parse_extension<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: &[OwnedAttribute],
) -> Result<ExtensionRecord, LoadError> {
    let mut extension = ExtensionRecord {
        name: attr_string(attributes, "name")
            .ok_or_else(|| ctx.malformed("extension without name"))?,
        number: attr_i64(ctx, attributes, "number")?,
        requires: Vec::new(),
    };
    match_children!(ctx, attrs, {
        "require" => {
            let block = parse_require(ctx)?;
            extension.requires.push(block);
        },
    });
    Ok(extension)
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(xml: &str) -> Registry {
        parse_stream(xml.as_bytes()).expect("registry should parse")
    }

    #[test]
    fn names_come_from_tags_when_attributes_are_missing() {
        let registry = parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <registry>
                <types>
                    <type>This type is <name>int</name></type>
                    <type category="basetype">Here is <name>type_name</name></type>
                </types>
            </registry>"#,
        );
        assert_eq!(registry.types[0].name, "int");
        assert_eq!(registry.types[1].name, "type_name");
    }

    #[test]
    fn member_text_is_split_around_the_type_tag() {
        let registry = parse(
            r#"<registry>
                <types>
                    <type category="struct" name="S">
                        <member>const struct <type>VkBaseInStructure</type>* <name>pNext</name></member>
                        <member><type>uint32_t</type> <name>mask</name>:8</member>
                        <member><type>char</type> <name>name</name>[<enum>VK_MAX_EXTENSION_NAME_SIZE</enum>]<comment>ignored</comment></member>
                    </type>
                </types>
            </registry>"#,
        );
        let members = &registry.types[0].members;
        assert_eq!(members[0].prefix, "const struct");
        assert_eq!(members[0].suffix, "*");
        assert_eq!(members[0].type_name, "VkBaseInStructure");
        assert_eq!(members[0].name, "pNext");
        assert_eq!(members[1].suffix, ":8");
        assert_eq!(
            members[2].suffix,
            "[<enum>VK_MAX_EXTENSION_NAME_SIZE</enum>]"
        );
    }

    #[test]
    fn raw_bodies_keep_tag_markers_and_decode_entities() {
        let registry = parse(
            r#"<registry>
                <types>
                    <type category="define">#define <name>VK_API_VERSION_MAJOR</name>(version) (((uint32_t)(version) &gt;&gt; 22U) &amp; 0x7FU)</type>
                    <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkInstance</name>)</type>
                </types>
            </registry>"#,
        );
        assert_eq!(
            registry.types[0].raw,
            "#define <name>VK_API_VERSION_MAJOR</name>(version) (((uint32_t)(version) >> 22U) & 0x7FU)"
        );
        assert_eq!(
            registry.types[1].raw,
            "<type>VK_DEFINE_HANDLE</type>(<name>VkInstance</name>)"
        );
    }

    #[test]
    fn proto_with_extra_text_is_rejected() {
        let result = parse_stream(
            r#"<registry>
                <commands>
                    <command>
                        <proto>static <type>void</type> <name>vkBad</name></proto>
                    </command>
                </commands>
            </registry>"#
                .as_bytes(),
        );
        assert!(matches!(
            result,
            Err(LoadError::UnexpectedMemberSyntax { .. })
        ));
    }

    #[test]
    fn extension_numbers_and_require_blocks() {
        let registry = parse(
            r#"<registry>
                <extensions>
                    <extension name="VK_KHR_swapchain" number="2" supported="vulkan">
                        <require>
                            <enum value="70" name="VK_KHR_SWAPCHAIN_SPEC_VERSION"/>
                            <enum offset="1" extends="VkStructureType" name="VK_STRUCTURE_TYPE_PRESENT_INFO_KHR"/>
                        </require>
                    </extension>
                </extensions>
            </registry>"#,
        );
        let extension = &registry.extensions[0];
        assert_eq!(extension.name, "VK_KHR_swapchain");
        assert_eq!(extension.number, 2);
        assert_eq!(extension.requires[0].enums.len(), 2);
        assert_eq!(extension.requires[0].enums[1].offset, 1);
    }
}
