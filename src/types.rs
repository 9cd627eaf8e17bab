//! Raw registry records produced by the XML pass, and the loader error
//! type.
//!
//! These records stay close to the markup: member and parameter bodies
//! keep their surrounding text so the declarator micro-parser can
//! interpret it, and categories that the loader matches textually
//! (defines, basetypes, handles, function pointers) keep a reconstructed
//! copy of their inner XML with `<name>`/`<type>` markers preserved and
//! entities decoded.

use thiserror::Error;

/// Everything the loader needs from one registry document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Registry {
    pub platforms: Vec<Platform>,
    pub tags: Vec<Tag>,
    pub types: Vec<TypeRecord>,
    pub enums: Vec<EnumsBlock>,
    pub commands: Vec<CommandRecord>,
    /// `require` blocks of every `<feature>` element.
    pub features: Vec<RequireBlock>,
    pub extensions: Vec<ExtensionRecord>,
}

/// A windowing system Vulkan can target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Platform {
    pub name: String,
    pub protect: String,
    pub comment: Option<String>,
}

/// An author tag such as `KHR` or `EXT`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub name: String,
    pub author: String,
    pub contact: String,
}

/// One `<type>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRecord {
    pub name: String,
    /// Empty when the registry declares the type without a category; the
    /// loader then checks it against the platform table.
    pub category: String,
    pub requires: Option<String>,
    pub alias: Option<String>,
    pub api: Option<String>,
    pub struct_extends: Option<String>,
    /// Present for struct and union categories only.
    pub members: Vec<MemberRecord>,
    /// Reconstructed inner XML for the textual categories.
    pub raw: String,
}

/// One `<member>` or `<param>` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberRecord {
    pub name: String,
    pub type_name: String,
    /// Trimmed text before the `<type>` tag: "", "const", "struct" or
    /// "const struct".
    pub prefix: String,
    /// Whitespace-collapsed text after the `<type>` tag with the name and
    /// comment spliced out; `<enum>` markers are kept for array sizes.
    pub suffix: String,
    pub values: Option<String>,
    pub len: Option<String>,
    pub altlen: Option<String>,
    pub optional: bool,
    pub validstructs: Option<String>,
    pub api: Option<String>,
    pub raw: String,
}

/// One `<enums>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumsBlock {
    pub name: String,
    pub fields: Vec<EnumRecord>,
}

/// One `<enum>` element, wherever it appears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumRecord {
    pub name: String,
    pub alias: Option<String>,
    pub value: Option<String>,
    pub bitpos: Option<String>,
    pub dir: Option<String>,
    pub extends: Option<String>,
    /// Zero when absent; inherited from the enclosing extension.
    pub extnumber: i64,
    pub offset: i64,
    pub api: Option<String>,
}

/// One `<command>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandRecord {
    pub name: String,
    pub alias: Option<String>,
    pub api: Option<String>,
    /// Result type from the prototype; empty for alias commands.
    pub proto_type: String,
    pub params: Vec<MemberRecord>,
}

/// The `<enum>` children of one `<require>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RequireBlock {
    pub enums: Vec<EnumRecord>,
}

/// One `<extension>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtensionRecord {
    pub name: String,
    pub number: i64,
    pub requires: Vec<RequireBlock>,
}

/// Why a registry failed to load. The loader never partially populates a
/// catalog: any of these aborts the whole load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed XML at {xpath}: {detail}")]
    MalformedXml { xpath: String, detail: String },

    #[error("malformed XML: {0}")]
    Xml(#[from] xml::reader::Error),

    #[error("unknown type \"{name}\" referenced by {by}")]
    UnknownType { name: String, by: String },

    #[error("cannot make progress: \"{name}\" refers to an undefined type: {raw}")]
    NoProgress { name: String, raw: String },

    #[error("unexpected declaration text in \"{owner}\": {raw}")]
    UnexpectedMemberSyntax { owner: String, raw: String },

    #[error("unknown category \"{category}\" of type \"{name}\"")]
    UnknownCategory { name: String, category: String },

    #[error("duplicated definition of \"{0}\"")]
    DuplicateDefinition(String),

    #[error("define \"{name}\" does not match any known body: {raw}")]
    DefineMismatch { name: String, raw: String },

    #[error("struct extension \"{0}\" must start with sType and pNext")]
    InvalidExtensionStruct(String),

    #[error("bad enum value for \"{name}\": {value}")]
    BadEnumValue { name: String, value: String },
}
