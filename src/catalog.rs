//! The read-only result of loading a registry.

use std::collections::BTreeMap;

use crate::cpp::{TypeId, TypeStore};

/// pNext chain metadata for one struct.
#[derive(Debug, Clone, Default)]
pub struct StructExtInfo {
    /// Whether this struct carries `structextends`, i.e. may be linked
    /// into another struct's pNext chain.
    pub extends: bool,
    /// The `values` attribute of the struct's `sType` member.
    pub stype_value: Option<String>,
    /// Structs that may extend this one.
    pub extended_with: Vec<TypeId>,
}

/// Everything a code generator needs: the resolved types and commands,
/// extension spec versions, and deterministic iteration orders. Built
/// once by the loader; immutable afterwards.
#[derive(Debug)]
pub struct Catalog {
    store: TypeStore,
    types: BTreeMap<String, TypeId>,
    commands: BTreeMap<String, TypeId>,
    extensions: BTreeMap<String, i64>,
    struct_info: BTreeMap<String, StructExtInfo>,
}

impl Catalog {
    pub(crate) fn assemble(
        store: TypeStore,
        types: BTreeMap<String, TypeId>,
        commands: BTreeMap<String, TypeId>,
        extensions: BTreeMap<String, i64>,
        struct_info: BTreeMap<String, StructExtInfo>,
    ) -> Catalog {
        Catalog {
            store,
            types,
            commands,
            extensions,
            struct_info,
        }
    }

    /// The arena holding every type node of this catalog.
    pub fn store(&self) -> &TypeStore {
        &self.store
    }

    pub fn type_named(&self, name: &str) -> Option<TypeId> {
        self.types.get(name).copied()
    }

    pub fn command_named(&self, name: &str) -> Option<TypeId> {
        self.commands.get(name).copied()
    }

    pub fn types(&self) -> &BTreeMap<String, TypeId> {
        &self.types
    }

    pub fn commands(&self) -> &BTreeMap<String, TypeId> {
        &self.commands
    }

    /// Type names in lexicographic order.
    pub fn sorted_type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Command names in lexicographic order.
    pub fn sorted_command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Extension name to `*_SPEC_VERSION` value; -1 when the extension
    /// does not declare one.
    pub fn extensions(&self) -> &BTreeMap<String, i64> {
        &self.extensions
    }

    pub fn struct_info(&self, name: &str) -> Option<&StructExtInfo> {
        self.struct_info.get(name)
    }
}
