//! This crate models the C/C++ type universe of the Vulkan XML registry
//! across six CPU architectures (ARM32, ARM64, RISC-V32, RISC-V64, x86,
//! x86-64) so that a code generator can emit a Vulkan proxy between
//! guest binaries of one architecture and a host driver of another.
//!
//! The entry point is [`load_registry`], which parses a registry stream
//! and resolves it into a read-only [`Catalog`] of named types and
//! commands. Sizes, alignments, struct layouts and rendered declarations
//! come from the [`TypeStore`] query surface, and
//! [`TypeStore::is_compatible`] answers whether a value of a type can
//! flow between two architectures unchanged.

mod c;
mod catalog;
mod convert;
mod cpp;
mod parse;
mod platform;
mod types;

pub use catalog::{Catalog, StructExtInfo};
pub use convert::build_catalog;
pub use cpp::{
    Arch, EnumMember, Field, FieldExt, FieldInfo, Kind, LenPath, TypeId, TypeStore,
};
pub use parse::parse_stream;
pub use platform::{is_vulkan_handle, is_vulkan_nondispatchable_handle, platform_types};
pub use types::*;

use std::io::Read;

/// Parses and resolves a registry in one step.
pub fn load_registry<R: Read>(stream: R) -> Result<Catalog, LoadError> {
    let registry = parse_stream(stream)?;
    build_catalog(&registry)
}
