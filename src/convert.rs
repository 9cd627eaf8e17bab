//! Converts parsed registry records into the resolved type catalog.
//!
//! Types may legally reference later declarations, so Pass A resolves a
//! work list to a fixed point: records that directly (non-pointer) use an
//! unknown type are retried on the next iteration, while pointers to
//! unknown structural types become opaque placeholders. A stalled work
//! list means the registry contains a direct-use cycle and the load
//! fails. Pass B then patches every `Pointer(Opaque(X))` field whose `X`
//! was resolved in the meantime, which is what makes self-referential
//! structs like `VkBaseInStructure` work. Commands are built last, when
//! every type is known.

use std::collections::{BTreeMap, HashMap};

use log::{debug, trace};

use crate::c::{self, ArrayLen, Declarator, PointerShape, Prefix};
use crate::catalog::{Catalog, StructExtInfo};
use crate::cpp::{Arch, EnumMember, Field, Kind, LenPath, TypeId, TypeStore};
use crate::parse::collapse_ws;
use crate::platform;
use crate::types::*;

enum Outcome<T> {
    Built(T),
    /// A directly-used type is not known yet; holds the missing name.
    Retry(String),
}

/// Builds the read-only catalog from a parsed registry.
pub fn build_catalog(registry: &Registry) -> Result<Catalog, LoadError> {
    let mut store = TypeStore::new();
    let mut types = platform::platform_types(&mut store);

    // Enum values are kept raw until needed: the registry abuses <enum>
    // for non-integer constants like "1000.0f" and "(~0U-2)" which must
    // not fail the load just by existing.
    let (enum_values, enum_types) = collect_enum_values(registry)?;

    // Pass A: fixed-point resolution of the type work list.
    let mut pending = Vec::with_capacity(registry.types.len());
    for record in &registry.types {
        pending.push((record, normalized_category(record)?));
    }
    let mut previous_len = usize::MAX;
    while !pending.is_empty() {
        if pending.len() == previous_len {
            let (stuck, _) = pending[0];
            return Err(LoadError::NoProgress {
                name: stuck.name.clone(),
                raw: stuck.raw.clone(),
            });
        }
        previous_len = pending.len();
        let mut retry = Vec::new();
        for (record, category) in pending {
            if types.contains_key(&record.name) {
                if category == "vk_platform" || record.api.as_deref() == Some("vulkansc") {
                    continue;
                }
                return Err(LoadError::DuplicateDefinition(record.name.clone()));
            }
            if let Some(alias) = &record.alias {
                match types.get(alias) {
                    Some(&target) => {
                        let id = store.alias(&record.name, target);
                        types.insert(record.name.clone(), id);
                    }
                    None => retry.push((record, category)),
                }
                continue;
            }
            let outcome = match category {
                "basetype" => Outcome::Built(basetype_from_record(record, &mut store)?),
                "bitmask" => bitmask_from_record(record, &types, &mut store)?,
                "define" => {
                    check_define(record)?;
                    continue;
                }
                "enum" => Outcome::Built(enum_from_record(
                    record,
                    &enum_values,
                    &enum_types,
                    &mut store,
                )?),
                "funcpointer" => funcpointer_from_record(record, &types, &mut store)?,
                "handle" => Outcome::Built(handle_from_record(record, &mut store)?),
                "include" => continue,
                "struct" => structural_from_record(record, &types, &enum_values, &mut store, true)?,
                "union" => structural_from_record(record, &types, &enum_values, &mut store, false)?,
                "vk_platform" => {
                    return Err(LoadError::UnknownType {
                        name: record.name.clone(),
                        by: String::from("the platform type table"),
                    })
                }
                other => {
                    return Err(LoadError::UnknownCategory {
                        name: record.name.clone(),
                        category: other.to_string(),
                    })
                }
            };
            match outcome {
                Outcome::Built(id) => {
                    trace!("resolved type {}", record.name);
                    types.insert(record.name.clone(), id);
                }
                Outcome::Retry(_) => retry.push((record, category)),
            }
        }
        pending = retry;
        debug!("type resolution pass done, {} records deferred", pending.len());
    }

    // Structs which are defined later in the file may extend earlier
    // ones, so pNext chain metadata needs its own pass.
    let mut struct_info: BTreeMap<String, StructExtInfo> = BTreeMap::new();
    for record in &registry.types {
        if record.category != "struct" {
            continue;
        }
        let Some(extends) = &record.struct_extends else {
            continue;
        };
        let Some(&extension_id) = types.get(&record.name) else {
            continue;
        };
        {
            let info = struct_info.entry(record.name.clone()).or_default();
            info.extends = true;
            info.stype_value = record.members.first().and_then(|m| m.values.clone());
        }
        for target in extends.split(',') {
            let mut target_id = *types.get(target).ok_or_else(|| LoadError::UnknownType {
                name: target.to_string(),
                by: record.name.clone(),
            })?;
            // structextends may name an alias of the real struct
            if store.kind(target_id, Arch::Arm) == Kind::Alias {
                target_id = store.elem(target_id, Arch::Arm);
            }
            let target_name = store.base_name(target_id, Arch::Arm);
            struct_info
                .entry(target_name)
                .or_default()
                .extended_with
                .push(extension_id);
        }
    }

    // Pass B: resolve potentially circular references. No Vulkan type is
    // structural on one architecture and non-structural on another, so
    // inspecting the first architecture is enough.
    let mut patched = 0usize;
    for id in types.values().copied().collect::<Vec<_>>() {
        let mut id = id;
        if store.kind(id, Arch::Arm) == Kind::Ptr {
            id = store.elem(id, Arch::Arm);
        }
        match store.kind(id, Arch::Arm) {
            Kind::Func | Kind::Struct | Kind::Union => {}
            _ => continue,
        }
        for i in 0..store.num_fields(id, Arch::Arm) {
            let field_ty = store.field(id, i, Arch::Arm).ty();
            if store.kind(field_ty, Arch::Arm) != Kind::Ptr {
                continue;
            }
            let pointee = store.elem(field_ty, Arch::Arm);
            if store.kind(pointee, Arch::Arm) == Kind::Opaque {
                let pointee_name = store.name(pointee, Arch::Arm);
                if let Some(&target) = types.get(&pointee_name) {
                    if store.kind(target, Arch::Arm) != Kind::Opaque {
                        store.replace_pointee(field_ty, target);
                        patched += 1;
                    }
                }
            } else if store.kind(pointee, Arch::Arm) == Kind::Const
                && store.kind(store.elem(pointee, Arch::Arm), Arch::Arm) == Kind::Opaque
            {
                let inner = store.elem(pointee, Arch::Arm);
                let pointee_name = store.name(inner, Arch::Arm);
                if let Some(&target) = types.get(&pointee_name) {
                    if store.kind(target, Arch::Arm) != Kind::Opaque {
                        let target = store.const_of(target);
                        store.replace_pointee(field_ty, target);
                        patched += 1;
                    }
                }
            }
        }
    }
    debug!("patched {patched} forward-referenced pointees");

    // Commands, with aliases linked after every real command exists.
    let mut commands: BTreeMap<String, TypeId> = BTreeMap::new();
    for command in &registry.commands {
        if command.alias.is_some() {
            continue;
        }
        let result = *types
            .get(&command.proto_type)
            .ok_or_else(|| LoadError::UnknownType {
                name: command.proto_type.clone(),
                by: command.name.clone(),
            })?;
        let fields = match member_fields(
            &command.name,
            &command.params,
            &types,
            &enum_values,
            &mut store,
        )? {
            Outcome::Built(fields) => fields,
            Outcome::Retry(missing) => {
                return Err(LoadError::UnknownType {
                    name: missing,
                    by: command.name.clone(),
                })
            }
        };
        // The outer array dimension of a parameter decays to a pointer.
        let mut params = Vec::with_capacity(fields.len());
        for mut field in fields {
            if store.kind(field.ty, Arch::Arm) == Kind::Array {
                let elem = store.elem(field.ty, Arch::Arm);
                field.ty = store.pointer(elem);
            }
            params.push(field);
        }
        commands.insert(command.name.clone(), store.function(result, params));
    }
    for command in &registry.commands {
        if let Some(alias) = &command.alias {
            let target = *commands.get(alias).ok_or_else(|| LoadError::UnknownType {
                name: alias.clone(),
                by: command.name.clone(),
            })?;
            commands.insert(command.name.clone(), target);
        }
    }

    // SPEC_VERSION constants; -1 when an extension does not declare one.
    let mut extensions: BTreeMap<String, i64> = BTreeMap::new();
    for extension in &registry.extensions {
        let mut spec_version = -1i64;
        for require in &extension.requires {
            for field in &require.enums {
                if field.alias.is_none() && field.name.ends_with("_SPEC_VERSION") {
                    if let Some(value) = field.value.as_deref().and_then(|v| v.parse::<i64>().ok())
                    {
                        spec_version = value;
                    }
                }
            }
        }
        extensions.insert(extension.name.clone(), spec_version);
    }

    store.seal();
    Ok(Catalog::assemble(
        store,
        types,
        commands,
        extensions,
        struct_info,
    ))
}

// A type without a category must be a known platform type declared with
// the expected requires header.
fn normalized_category(record: &TypeRecord) -> Result<&str, LoadError> {
    if !record.category.is_empty() {
        return Ok(&record.category);
    }
    match platform::required_header(&record.name) {
        Some(header) if record.requires.as_deref().unwrap_or("") == header => Ok("vk_platform"),
        _ => Err(LoadError::UnknownType {
            name: record.name.clone(),
            by: String::from("the platform type table"),
        }),
    }
}

// ---- enum values ----------------------------------------------------------

fn collect_enum_values(
    registry: &Registry,
) -> Result<
    (
        HashMap<String, EnumRecord>,
        HashMap<String, Vec<EnumRecord>>,
    ),
    LoadError,
> {
    let mut values: HashMap<String, EnumRecord> = HashMap::new();
    let mut by_type: HashMap<String, Vec<EnumRecord>> = HashMap::new();
    for block in &registry.enums {
        for field in &block.fields {
            if values.contains_key(&field.name) {
                return Err(LoadError::DuplicateDefinition(field.name.clone()));
            }
            values.insert(field.name.clone(), field.clone());
            by_type
                .entry(block.name.clone())
                .or_default()
                .push(field.clone());
        }
    }
    for require in &registry.features {
        for field in &require.enums {
            let Some(extends) = &field.extends else {
                continue;
            };
            if values.contains_key(&field.name) {
                return Err(LoadError::DuplicateDefinition(field.name.clone()));
            }
            values.insert(field.name.clone(), field.clone());
            by_type
                .entry(extends.clone())
                .or_default()
                .push(field.clone());
        }
    }
    for extension in &registry.extensions {
        for require in &extension.requires {
            for field in &require.enums {
                let mut field = field.clone();
                if field.extnumber == 0 {
                    field.extnumber = extension.number;
                }
                let Some(extends) = field.extends.clone() else {
                    continue;
                };
                if let Some(existing) = values.get(&field.name) {
                    // Some values appear both as a feature and as an
                    // extension; accepted when they agree.
                    if field.alias.is_some() && field.alias == existing.alias {
                        continue;
                    }
                    let new_value = enum_field_value(&field, &values);
                    let old_value = enum_field_value(existing, &values);
                    if let (Ok(new_value), Ok(old_value)) = (new_value, old_value) {
                        if new_value == old_value {
                            continue;
                        }
                    }
                    return Err(LoadError::DuplicateDefinition(field.name.clone()));
                }
                values.insert(field.name.clone(), field.clone());
                by_type.entry(extends).or_default().push(field);
            }
        }
    }
    Ok((values, by_type))
}

/// Computes the integer value of one enumerator: a literal, a bit
/// position, an alias, or the extension offset formula.
fn enum_field_value(
    field: &EnumRecord,
    all: &HashMap<String, EnumRecord>,
) -> Result<i64, LoadError> {
    let bad = |value: &str| LoadError::BadEnumValue {
        name: field.name.clone(),
        value: value.to_string(),
    };
    if let Some(value) = &field.value {
        let parsed = match value.strip_prefix("0x") {
            Some(hex) => i64::from_str_radix(hex, 16),
            None => value.parse::<i64>(),
        };
        return parsed.map_err(|_| bad(value));
    }
    if let Some(bitpos) = &field.bitpos {
        let position: u32 = bitpos.parse().map_err(|_| bad(bitpos))?;
        if position > 63 {
            return Err(bad(bitpos));
        }
        return Ok(1i64 << position);
    }
    if let Some(alias) = &field.alias {
        let target = all.get(alias).ok_or_else(|| bad(alias))?;
        return enum_field_value(target, all);
    }
    let value = 1_000_000_000 + (field.extnumber - 1) * 1_000 + field.offset;
    if field.dir.is_some() {
        Ok(-value)
    } else {
        Ok(value)
    }
}

fn enum_from_record(
    record: &TypeRecord,
    enum_values: &HashMap<String, EnumRecord>,
    enum_types: &HashMap<String, Vec<EnumRecord>>,
    store: &mut TypeStore,
) -> Result<TypeId, LoadError> {
    let empty = Vec::new();
    let fields = enum_types.get(&record.name).unwrap_or(&empty);
    // Same storage choice as Khronos's generator: int32_t when
    // everything fits, then uint32_t, then int64_t.
    let mut fits_int32 = true;
    let mut fits_uint32 = true;
    let mut resolved = Vec::with_capacity(fields.len());
    for field in fields {
        let value = enum_field_value(field, enum_values)?;
        if i64::from(value as i32) != value {
            fits_int32 = false;
        }
        if i64::from(value as u32) != value {
            fits_uint32 = false;
        }
        resolved.push(value);
    }
    let underlying = if fits_int32 {
        store.primitive(Kind::Int32)
    } else if fits_uint32 {
        store.primitive(Kind::UInt32)
    } else {
        store.primitive(Kind::Int64)
    };
    let members = fields
        .iter()
        .zip(resolved)
        .map(|(field, value)| EnumMember {
            name: field.name.clone(),
            alias: field.alias.clone(),
            value,
        })
        .collect();
    Ok(store.enumeration(&record.name, underlying, members))
}

// ---- simple categories ----------------------------------------------------

fn basetype_from_record(record: &TypeRecord, store: &mut TypeStore) -> Result<TypeId, LoadError> {
    let raw = collapse_ws(&record.raw);
    let mismatch = || LoadError::UnexpectedMemberSyntax {
        owner: record.name.clone(),
        raw: record.raw.clone(),
    };
    // A handful of Apple types have irregular bodies with fixed shapes.
    let expect = |body: &str, id: TypeId| {
        if raw == body {
            Ok(id)
        } else {
            Err(mismatch())
        }
    };
    let void = store.primitive(Kind::Void);
    match record.name.as_str() {
        "CAMetalLayer" => {
            let id = store.opaque("CAMetalLayer");
            return expect(
                "#ifdef __OBJC__ @class CAMetalLayer; #else typedef void <name>CAMetalLayer</name>; #endif",
                id,
            );
        }
        "MTLDevice_id" => {
            let id = store.pointer(void);
            return expect(
                "#ifdef __OBJC__ @protocol MTLDevice; typedef __unsafe_unretained id<MTLDevice> MTLDevice_id; #else typedef void* <name>MTLDevice_id</name>; #endif",
                id,
            );
        }
        "MTLCommandQueue_id" => {
            let id = store.pointer(void);
            return expect(
                "#ifdef __OBJC__ @protocol MTLCommandQueue; typedef __unsafe_unretained id<MTLCommandQueue> MTLCommandQueue_id; #else typedef void* <name>MTLCommandQueue_id</name>; #endif",
                id,
            );
        }
        "MTLBuffer_id" => {
            let id = store.pointer(void);
            return expect(
                "#ifdef __OBJC__ @protocol MTLBuffer; typedef __unsafe_unretained id<MTLBuffer> MTLBuffer_id; #else typedef void* <name>MTLBuffer_id</name>; #endif",
                id,
            );
        }
        "MTLTexture_id" => {
            let id = store.pointer(void);
            return expect(
                "#ifdef __OBJC__ @protocol MTLTexture; typedef __unsafe_unretained id<MTLTexture> MTLTexture_id; #else typedef void* <name>MTLTexture_id</name>; #endif",
                id,
            );
        }
        "MTLSharedEvent_id" => {
            let id = store.pointer(void);
            return expect(
                "#ifdef __OBJC__ @protocol MTLSharedEvent; typedef __unsafe_unretained id<MTLSharedEvent> MTLSharedEvent_id; #else typedef void* <name>MTLSharedEvent_id</name>; #endif",
                id,
            );
        }
        "IOSurfaceRef" => {
            let id = {
                let opaque = store.opaque("__IOSurface");
                store.pointer(opaque)
            };
            return expect("typedef struct __IOSurface* <name>IOSurfaceRef</name>;", id);
        }
        _ => {}
    }
    if raw == format!("struct <name>{}</name>;", record.name) {
        return Ok(store.opaque(&record.name));
    }
    if raw == format!("typedef <type>uint32_t</type> <name>{}</name>;", record.name) {
        let base = store.primitive(Kind::UInt32);
        return Ok(store.alias(&record.name, base));
    }
    if raw == format!("typedef <type>uint64_t</type> <name>{}</name>;", record.name) {
        let base = store.primitive(Kind::UInt64);
        return Ok(store.alias(&record.name, base));
    }
    if raw == format!("typedef <type>void</type>* <name>{}</name>;", record.name) {
        let pointer = store.pointer(void);
        return Ok(store.alias(&record.name, pointer));
    }
    Err(mismatch())
}

fn bitmask_from_record(
    record: &TypeRecord,
    types: &BTreeMap<String, TypeId>,
    store: &mut TypeStore,
) -> Result<Outcome<TypeId>, LoadError> {
    let raw = collapse_ws(&record.raw);
    for flags in ["VkFlags", "VkFlags64"] {
        if raw == format!("typedef <type>{flags}</type> <name>{}</name>;", record.name) {
            return Ok(match types.get(flags) {
                Some(&base) => Outcome::Built(store.alias(&record.name, base)),
                None => Outcome::Retry(flags.to_string()),
            });
        }
    }
    Err(LoadError::UnexpectedMemberSyntax {
        owner: record.name.clone(),
        raw: record.raw.clone(),
    })
}

fn handle_from_record(record: &TypeRecord, store: &mut TypeStore) -> Result<TypeId, LoadError> {
    let raw = record.raw.trim();
    if raw == format!("<type>VK_DEFINE_HANDLE</type>(<name>{}</name>)", record.name) {
        let opaque = store.opaque(&format!("struct {}_T", record.name));
        let pointer = store.pointer(opaque);
        return Ok(store.alias(&record.name, pointer));
    }
    if raw
        == format!(
            "<type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>{}</name>)",
            record.name
        )
    {
        let uint64_t = store.primitive(Kind::UInt64);
        let narrow = store.alias(&record.name, uint64_t);
        let wide = {
            let opaque = store.opaque(&format!("struct {}_T", record.name));
            let pointer = store.pointer(opaque);
            store.alias(&record.name, pointer)
        };
        return Ok(store.arch_dependent([narrow, wide, narrow, wide, narrow, wide]));
    }
    Err(LoadError::UnexpectedMemberSyntax {
        owner: record.name.clone(),
        raw: record.raw.clone(),
    })
}

// ---- function pointers ----------------------------------------------------

fn funcpointer_from_record(
    record: &TypeRecord,
    types: &BTreeMap<String, TypeId>,
    store: &mut TypeStore,
) -> Result<Outcome<TypeId>, LoadError> {
    let definition = record.raw.trim();
    let mismatch = || LoadError::UnexpectedMemberSyntax {
        owner: record.name.clone(),
        raw: definition.to_string(),
    };
    if !definition.starts_with("typedef ")
        || !definition.ends_with(");")
        || definition.matches(" (VKAPI_PTR *<name>").count() != 1
        || definition.matches("</name>)(").count() != 1
    {
        return Err(mismatch());
    }
    let inner = &definition[8..definition.len() - 2];
    let (result_text, rest) = inner.split_once(" (VKAPI_PTR *<name>").ok_or_else(mismatch)?;
    let result = match result_text.strip_suffix('*') {
        Some(base) => {
            let base = *types.get(base).ok_or_else(|| LoadError::UnknownType {
                name: base.to_string(),
                by: record.name.clone(),
            })?;
            store.pointer(base)
        }
        None => *types
            .get(result_text)
            .ok_or_else(|| LoadError::UnknownType {
                name: result_text.to_string(),
                by: record.name.clone(),
            })?,
    };
    let params_text = rest.split_once("</name>)(").ok_or_else(mismatch)?.1;
    let mut params = Vec::new();
    if params_text != "void" {
        for param in params_text.split(',') {
            let param = param.trim();
            let (type_text, name) = param.rsplit_once(' ').ok_or_else(mismatch)?;
            let type_text = type_text.trim();
            let name = name.trim();
            let ty = if let Some(plain) = type_text
                .strip_prefix("<type>")
                .and_then(|t| t.strip_suffix("</type>"))
            {
                match types.get(plain) {
                    Some(&id) => id,
                    None => return Ok(Outcome::Retry(plain.to_string())),
                }
            } else if let Some(pointee) = type_text
                .strip_prefix("const <type>")
                .and_then(|t| t.strip_suffix("</type>*"))
            {
                // Unknown pointees stay opaque and are patched later if
                // the type turns up.
                match types.get(pointee) {
                    Some(&id) => {
                        let constant = store.const_of(id);
                        store.pointer(constant)
                    }
                    None => {
                        let opaque = store.opaque(pointee);
                        let constant = store.const_of(opaque);
                        store.pointer(constant)
                    }
                }
            } else if let Some(pointee) = type_text
                .strip_prefix("<type>")
                .and_then(|t| t.strip_suffix("</type>*"))
            {
                match types.get(pointee) {
                    Some(&id) => store.pointer(id),
                    None => {
                        let opaque = store.opaque(pointee);
                        store.pointer(opaque)
                    }
                }
            } else {
                return Err(mismatch());
            };
            params.push(Field::new(name, ty));
        }
    }
    let function = store.function(result, params);
    Ok(Outcome::Built(store.pointer(function)))
}

// ---- structs and unions ---------------------------------------------------

fn structural_from_record(
    record: &TypeRecord,
    types: &BTreeMap<String, TypeId>,
    enum_values: &HashMap<String, EnumRecord>,
    store: &mut TypeStore,
    is_struct: bool,
) -> Result<Outcome<TypeId>, LoadError> {
    let fields = match member_fields(&record.name, &record.members, types, enum_values, store)? {
        Outcome::Built(fields) => fields,
        Outcome::Retry(missing) => return Ok(Outcome::Retry(missing)),
    };
    if is_struct && record.struct_extends.is_some() {
        let first_is_stype = record
            .members
            .first()
            .map(|m| m.type_name == "VkStructureType")
            .unwrap_or(false);
        if !first_is_stype
            || fields.len() < 2
            || fields[0].name != "sType"
            || fields[1].name != "pNext"
        {
            return Err(LoadError::InvalidExtensionStruct(record.name.clone()));
        }
    }
    let id = if is_struct {
        store.structure(&record.name, fields)
    } else {
        store.union(&record.name, fields)
    };
    Ok(Outcome::Built(id))
}

/// Interprets member bodies into typed fields, then wires up `len`,
/// `altlen` and `optional` attributes.
fn member_fields(
    owner: &str,
    members: &[MemberRecord],
    types: &BTreeMap<String, TypeId>,
    enum_values: &HashMap<String, EnumRecord>,
    store: &mut TypeStore,
) -> Result<Outcome<Vec<Field>>, LoadError> {
    let syntax = |member: &MemberRecord| LoadError::UnexpectedMemberSyntax {
        owner: owner.to_string(),
        raw: member.raw.clone(),
    };
    let mut fields: Vec<Field> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();
    for member in members {
        let prefix = c::parse_prefix(&member.prefix).ok_or_else(|| syntax(member))?;
        let declarator = c::parse_suffix(&member.suffix).ok_or_else(|| syntax(member))?;
        let known = types.get(&member.type_name).copied();
        // pNext chain heads declare the accepted concrete types in
        // validstructs; the concrete type replaces the generic one.
        let override_ty = if member.type_name == "VkBaseInStructure"
            || member.type_name == "VkBaseOutStructure"
        {
            match &member.validstructs {
                None => None,
                Some(valid) => match types.get(valid) {
                    Some(&id) => Some(id),
                    None => return Ok(Outcome::Retry(valid.clone())),
                },
            }
        } else {
            None
        };
        let ty = match declarator {
            Declarator::Pointer(shape) => {
                let pointee = match known {
                    Some(id) => {
                        let id = override_ty.unwrap_or(id);
                        match prefix {
                            Prefix::Const | Prefix::ConstStruct => store.const_of(id),
                            Prefix::None | Prefix::Struct => id,
                        }
                    }
                    None => {
                        // A type that is opaque in C must be written with a
                        // struct prefix here. A bare name means the type is
                        // declared further down, so defer this record.
                        match prefix {
                            Prefix::None | Prefix::Const => {
                                return Ok(Outcome::Retry(member.type_name.clone()))
                            }
                            Prefix::Struct => store.opaque(&member.type_name),
                            Prefix::ConstStruct => {
                                let opaque = store.opaque(&member.type_name);
                                store.const_of(opaque)
                            }
                        }
                    }
                };
                match shape {
                    PointerShape::Single => store.pointer(pointee),
                    PointerShape::Double => {
                        let inner = store.pointer(pointee);
                        store.pointer(inner)
                    }
                    PointerShape::DoubleInnerConst => {
                        let inner = store.pointer(pointee);
                        let constant = store.const_of(inner);
                        store.pointer(constant)
                    }
                }
            }
            _ => {
                let id = match known {
                    Some(id) => override_ty.unwrap_or(id),
                    None => return Ok(Outcome::Retry(member.type_name.clone())),
                };
                let id = match prefix {
                    Prefix::None => id,
                    Prefix::Const => store.const_of(id),
                    Prefix::Struct | Prefix::ConstStruct => return Err(syntax(member)),
                };
                match declarator {
                    Declarator::Plain => id,
                    // Bitfields are not supposed to appear in vk.xml but
                    // exist for backward compatibility. ":8" becomes
                    // uint8_t and ":24" uint8_t[3], which reproduces the
                    // normative layout.
                    Declarator::Bitfield(8) => {
                        if member.type_name != "uint32_t"
                            && member.type_name != "VkGeometryInstanceFlagsKHR"
                        {
                            return Err(syntax(member));
                        }
                        store.primitive(Kind::UInt8)
                    }
                    Declarator::Bitfield(24) => {
                        if member.type_name != "uint32_t" {
                            return Err(syntax(member));
                        }
                        let byte = store.primitive(Kind::UInt8);
                        store.array(byte, 3)
                    }
                    Declarator::Bitfield(_) => return Err(syntax(member)),
                    Declarator::Arrays(dims) => {
                        let mut ty = id;
                        for dim in &dims {
                            let count = match dim {
                                ArrayLen::Literal(count) => *count,
                                ArrayLen::Named(name) => {
                                    let field = enum_values.get(name).ok_or_else(|| {
                                        LoadError::BadEnumValue {
                                            name: name.clone(),
                                            value: String::from("(undefined)"),
                                        }
                                    })?;
                                    let text = field.value.as_deref().unwrap_or("");
                                    text.parse::<u32>().map_err(|_| LoadError::BadEnumValue {
                                        name: name.clone(),
                                        value: text.to_string(),
                                    })?
                                }
                            };
                            ty = store.array(ty, count);
                        }
                        ty
                    }
                    Declarator::Pointer(_) => unreachable!(),
                }
            }
        };
        if member.api.as_deref() != Some("vulkansc") {
            let mut field = Field::new(&member.name, ty);
            field.ext.optional = member.optional;
            index_of.insert(member.name.as_str(), fields.len());
            fields.push(field);
        }
    }
    for member in members {
        if member.api.as_deref() == Some("vulkansc") {
            continue;
        }
        let bad_len = || LoadError::UnexpectedMemberSyntax {
            owner: format!("{owner}.{}", member.name),
            raw: member
                .len
                .clone()
                .or_else(|| member.altlen.clone())
                .unwrap_or_default(),
        };
        let this = index_of[member.name.as_str()];
        let len = member.len.as_deref().unwrap_or("");
        if let Some(base) = len.strip_suffix(",1") {
            // "geometryCount,1" marks a pair of fields where only one may
            // be non-null; the count part is what matters here.
            let count = *index_of.get(base).ok_or_else(bad_len)?;
            fields[this].ext.length = Some(LenPath::Field(count));
        } else if len.contains("->") {
            // The count lives inside a pointed-to struct, e.g.
            // "pAllocateInfo->descriptorSetCount". One level only.
            let mut parts = len.splitn(3, "->");
            let outer = parts.next().unwrap_or_default();
            let inner = parts.next().ok_or_else(bad_len)?;
            if parts.next().is_some() {
                return Err(bad_len());
            }
            let count = *index_of.get(outer).ok_or_else(bad_len)?;
            let mut pointee = fields[count].ty;
            if store.kind(pointee, Arch::Arm) != Kind::Ptr {
                return Err(bad_len());
            }
            pointee = store.elem(pointee, Arch::Arm);
            if store.kind(pointee, Arch::Arm) == Kind::Const {
                pointee = store.elem(pointee, Arch::Arm);
            }
            match store.kind(pointee, Arch::Arm) {
                Kind::Struct | Kind::Union => {}
                _ => return Err(bad_len()),
            }
            let mut inner_index = None;
            for i in 0..store.num_fields(pointee, Arch::Arm) {
                if store.field(pointee, i, Arch::Arm).name() == inner {
                    inner_index = Some(i);
                }
            }
            let inner_index = inner_index.ok_or_else(bad_len)?;
            fields[this].ext.length = Some(LenPath::Nested {
                field: count,
                inner: inner_index,
            });
        } else if member.altlen.is_some() {
            // Lengths given as latexmath expressions only annotate byte
            // arrays which never need translation; verify and ignore.
            let ty = fields[this].ty;
            if store.kind(ty, Arch::Arm) != Kind::Ptr {
                return Err(bad_len());
            }
            let mut elem = store.elem(ty, Arch::Arm);
            if store.kind(elem, Arch::Arm) == Kind::Const {
                elem = store.elem(elem, Arch::Arm);
            }
            if store.kind(elem, Arch::Arm) == Kind::Alias {
                elem = store.elem(elem, Arch::Arm);
            }
            match store.kind(elem, Arch::Arm) {
                Kind::UInt8 | Kind::UInt16 | Kind::UInt32 => {}
                _ => return Err(bad_len()),
            }
        } else if len == "1" {
            // Constant single-element length, nothing to record.
        } else if !len.is_empty()
            && len != "null-terminated"
            && !len.ends_with(",null-terminated")
        {
            let count = *index_of.get(len).ok_or_else(bad_len)?;
            fields[this].ext.length = Some(LenPath::Field(count));
        }
    }
    Ok(Outcome::Built(fields))
}

// ---- defines --------------------------------------------------------------

// The registry is not preprocessed; the few defines it carries are
// matched against known bodies instead, with entities decoded the same
// way the XML pass decodes the incoming text.

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, body)| *body)
}

fn check_define(record: &TypeRecord) -> Result<(), LoadError> {
    let mismatch = || LoadError::DefineMismatch {
        name: record.name.clone(),
        raw: record.raw.clone(),
    };
    let raw = record.raw.as_str();
    match record.api.as_deref() {
        Some("vulkan") => {
            if let Some(body) = lookup(VULKAN_API_DEFINES, &record.name) {
                return if body == raw { Ok(()) } else { Err(mismatch()) };
            }
        }
        Some("vulkansc") => {
            if let Some(body) = lookup(VULKANSC_API_DEFINES, &record.name) {
                return if body == raw { Ok(()) } else { Err(mismatch()) };
            }
        }
        _ => {
            if let Some(body) = lookup(VULKAN_API_DEFINES, &record.name) {
                if body == raw {
                    return Ok(());
                }
            }
            if let Some(body) = lookup(VULKANSC_API_DEFINES, &record.name) {
                return if body == raw { Ok(()) } else { Err(mismatch()) };
            }
        }
    }
    let Some(body) = lookup(SHARED_DEFINES, &record.name) else {
        return Err(mismatch());
    };
    // The header version changes with every registry update, so only its
    // prefix is stable.
    if record.name == "VK_HEADER_VERSION" || record.name == "VK_HEADER_VERSION_COMPLETE" {
        return if raw.starts_with(body) {
            Ok(())
        } else {
            Err(mismatch())
        };
    }
    if body == raw {
        return Ok(());
    }
    match lookup(OBSOLETED_DEFINES, &record.name) {
        Some(obsolete) if obsolete == raw => Ok(()),
        _ => Err(mismatch()),
    }
}

const VULKAN_API_DEFINES: &[(&str, &'static str)] = &[
    (
        "VK_DEFINE_HANDLE",
        "\n#define <name>VK_DEFINE_HANDLE</name>(object) typedef struct object##_T* object;",
    ),
    (
        "VK_DEFINE_NON_DISPATCHABLE_HANDLE",
        "\n#ifndef VK_DEFINE_NON_DISPATCHABLE_HANDLE\n    #if (VK_USE_64_BIT_PTR_DEFINES==1)\n        #define VK_DEFINE_NON_DISPATCHABLE_HANDLE(object) typedef struct object##_T *object;\n    #else\n        #define VK_DEFINE_NON_DISPATCHABLE_HANDLE(object) typedef uint64_t object;\n    #endif\n#endif",
    ),
];

const VULKANSC_API_DEFINES: &[(&str, &'static str)] = &[
    (
        "VK_DEFINE_HANDLE",
        "\n#define <name>VK_DEFINE_HANDLE</name>(object) typedef struct object##_T* (object);",
    ),
    (
        "VK_DEFINE_NON_DISPATCHABLE_HANDLE",
        "\n#ifndef VK_DEFINE_NON_DISPATCHABLE_HANDLE\n    #if (VK_USE_64_BIT_PTR_DEFINES==1)\n        #define VK_DEFINE_NON_DISPATCHABLE_HANDLE(object) typedef struct object##_T *(object);\n    #else\n        #define VK_DEFINE_NON_DISPATCHABLE_HANDLE(object) typedef uint64_t (object);\n    #endif\n#endif",
    ),
];

const SHARED_DEFINES: &[(&str, &'static str)] = &[
    (
        "VK_MAKE_VERSION",
        "// DEPRECATED: This define is deprecated. VK_MAKE_API_VERSION should be used instead.\n#define <name>VK_MAKE_VERSION</name>(major, minor, patch) \\\n    ((((uint32_t)(major)) << 22U) | (((uint32_t)(minor)) << 12U) | ((uint32_t)(patch)))",
    ),
    (
        "VK_VERSION_MAJOR",
        "// DEPRECATED: This define is deprecated. VK_API_VERSION_MAJOR should be used instead.\n#define <name>VK_VERSION_MAJOR</name>(version) ((uint32_t)(version) >> 22U)",
    ),
    (
        "VK_VERSION_MINOR",
        "// DEPRECATED: This define is deprecated. VK_API_VERSION_MINOR should be used instead.\n#define <name>VK_VERSION_MINOR</name>(version) (((uint32_t)(version) >> 12U) & 0x3FFU)",
    ),
    (
        "VK_VERSION_PATCH",
        "// DEPRECATED: This define is deprecated. VK_API_VERSION_PATCH should be used instead.\n#define <name>VK_VERSION_PATCH</name>(version) ((uint32_t)(version) & 0xFFFU)",
    ),
    (
        "VK_MAKE_API_VERSION",
        "#define <name>VK_MAKE_API_VERSION</name>(variant, major, minor, patch) \\\n    ((((uint32_t)(variant)) << 29U) | (((uint32_t)(major)) << 22U) | (((uint32_t)(minor)) << 12U) | ((uint32_t)(patch)))",
    ),
    (
        "VK_API_VERSION_VARIANT",
        "#define <name>VK_API_VERSION_VARIANT</name>(version) ((uint32_t)(version) >> 29U)",
    ),
    (
        "VK_API_VERSION_MAJOR",
        "#define <name>VK_API_VERSION_MAJOR</name>(version) (((uint32_t)(version) >> 22U) & 0x7FU)",
    ),
    (
        "VK_API_VERSION_MINOR",
        "#define <name>VK_API_VERSION_MINOR</name>(version) (((uint32_t)(version) >> 12U) & 0x3FFU)",
    ),
    (
        "VK_API_VERSION_PATCH",
        "#define <name>VK_API_VERSION_PATCH</name>(version) ((uint32_t)(version) & 0xFFFU)",
    ),
    (
        "VKSC_API_VARIANT",
        "// Vulkan SC variant number\n#define <name>VKSC_API_VARIANT</name> 1",
    ),
    (
        "VK_API_VERSION",
        "// DEPRECATED: This define has been removed. Specific version defines (e.g. VK_API_VERSION_1_0), or the VK_MAKE_VERSION macro, should be used instead.\n//#define <name>VK_API_VERSION</name> <type>VK_MAKE_API_VERSION</type>(0, 1, 0, 0) // Patch version should always be set to 0",
    ),
    (
        "VK_API_VERSION_1_0",
        "// Vulkan 1.0 version number\n#define <name>VK_API_VERSION_1_0</name> <type>VK_MAKE_API_VERSION</type>(0, 1, 0, 0)// Patch version should always be set to 0",
    ),
    (
        "VK_API_VERSION_1_1",
        "// Vulkan 1.1 version number\n#define <name>VK_API_VERSION_1_1</name> <type>VK_MAKE_API_VERSION</type>(0, 1, 1, 0)// Patch version should always be set to 0",
    ),
    (
        "VK_API_VERSION_1_2",
        "// Vulkan 1.2 version number\n#define <name>VK_API_VERSION_1_2</name> <type>VK_MAKE_API_VERSION</type>(0, 1, 2, 0)// Patch version should always be set to 0",
    ),
    (
        "VK_API_VERSION_1_3",
        "// Vulkan 1.3 version number\n#define <name>VK_API_VERSION_1_3</name> <type>VK_MAKE_API_VERSION</type>(0, 1, 3, 0)// Patch version should always be set to 0",
    ),
    (
        "VK_API_VERSION_1_4",
        "// Vulkan 1.4 version number\n#define <name>VK_API_VERSION_1_4</name> <type>VK_MAKE_API_VERSION</type>(0, 1, 4, 0)// Patch version should always be set to 0",
    ),
    (
        "VKSC_API_VERSION_1_0",
        "// Vulkan SC 1.0 version number\n#define <name>VKSC_API_VERSION_1_0</name> <type>VK_MAKE_API_VERSION</type>(VKSC_API_VARIANT, 1, 0, 0)// Patch version should always be set to 0",
    ),
    (
        "VK_HEADER_VERSION",
        "// Version of this file\n#define <name>VK_HEADER_VERSION</name> ",
    ),
    (
        "VK_HEADER_VERSION_COMPLETE",
        "// Complete version of this file\n#define <name>VK_HEADER_VERSION_COMPLETE</name> <type>VK_MAKE_API_VERSION</type>",
    ),
    (
        "VK_DEFINE_HANDLE",
        "\n#define <name>VK_DEFINE_HANDLE</name>(object) typedef struct object##_T* object;",
    ),
    (
        "VK_USE_64_BIT_PTR_DEFINES",
        "\n#ifndef VK_USE_64_BIT_PTR_DEFINES\n    #if defined(__LP64__) || defined(_WIN64) || (defined(__x86_64__) && !defined(__ILP32__) ) || defined(_M_X64) || defined(__ia64) || defined (_M_IA64) || defined(__aarch64__) || defined(__powerpc64__) || (defined(__riscv) && __riscv_xlen == 64)\n        #define VK_USE_64_BIT_PTR_DEFINES 1\n    #else\n        #define VK_USE_64_BIT_PTR_DEFINES 0\n    #endif\n#endif",
    ),
    (
        "VK_NULL_HANDLE",
        "\n#ifndef VK_DEFINE_NON_DISPATCHABLE_HANDLE\n    #if (VK_USE_64_BIT_PTR_DEFINES==1)\n        #if (defined(__cplusplus) && (__cplusplus >= 201103L)) || (defined(_MSVC_LANG) && (_MSVC_LANG >= 201103L))\n            #define VK_NULL_HANDLE nullptr\n        #else\n            #define VK_NULL_HANDLE ((void*)0)\n        #endif\n    #else\n        #define VK_NULL_HANDLE 0ULL\n    #endif\n#endif\n#ifndef VK_NULL_HANDLE\n    #define VK_NULL_HANDLE 0\n#endif",
    ),
];

// Older registries spell several version macros without the U suffixes
// and derive handles from the LP64 test directly.
const OBSOLETED_DEFINES: &[(&str, &'static str)] = &[
    (
        "VK_MAKE_VERSION",
        "// DEPRECATED: This define is deprecated. VK_MAKE_API_VERSION should be used instead.\n#define <name>VK_MAKE_VERSION</name>(major, minor, patch) \\\n    ((((uint32_t)(major)) << 22) | (((uint32_t)(minor)) << 12) | ((uint32_t)(patch)))",
    ),
    (
        "VK_VERSION_MAJOR",
        "// DEPRECATED: This define is deprecated. VK_API_VERSION_MAJOR should be used instead.\n#define <name>VK_VERSION_MAJOR</name>(version) ((uint32_t)(version) >> 22)",
    ),
    (
        "VK_VERSION_MINOR",
        "// DEPRECATED: This define is deprecated. VK_API_VERSION_MINOR should be used instead.\n#define <name>VK_VERSION_MINOR</name>(version) (((uint32_t)(version) >> 12) & 0x3FFU)",
    ),
    (
        "VK_VERSION_PATCH",
        "// DEPRECATED: This define is deprecated. VK_API_VERSION_PATCH should be used instead.\n#define <name>VK_VERSION_PATCH</name>(version) ((uint32_t)(version) & 0xFFFU)",
    ),
    (
        "VK_MAKE_API_VERSION",
        "#define <name>VK_MAKE_API_VERSION</name>(variant, major, minor, patch) \\\n    ((((uint32_t)(variant)) << 29) | (((uint32_t)(major)) << 22) | (((uint32_t)(minor)) << 12) | ((uint32_t)(patch)))",
    ),
    (
        "VKSC_API_VARIANT",
        "// Vulkan SC variant number \n#define <name>VKSC_API_VARIANT</name> 1 // DEPRECATED: This define has been removed. Specific version defines (e.g. VK_API_VERSION_1_0), or the VK_MAKE_VERSION macro, should be used instead.",
    ),
    (
        "VK_API_VERSION_VARIANT",
        "#define <name>VK_API_VERSION_VARIANT</name>(version) ((uint32_t)(version) >> 29)",
    ),
    (
        "VK_API_VERSION_MAJOR",
        "#define <name>VK_API_VERSION_MAJOR</name>(version) (((uint32_t)(version) >> 22) & 0x7FU)",
    ),
    (
        "VK_API_VERSION_MINOR",
        "#define <name>VK_API_VERSION_MINOR</name>(version) (((uint32_t)(version) >> 12) & 0x3FFU)",
    ),
    (
        "VK_API_VERSION_PATCH",
        "#define <name>VK_API_VERSION_PATCH</name>(version) ((uint32_t)(version) & 0xFFFU)",
    ),
    (
        "VK_API_VERSION",
        "// DEPRECATED: This define has been removed. Specific version defines (e.g. VK_API_VERSION_1_0), or the VK_MAKE_VERSION macro, should be used instead.\n//#define <name>VK_API_VERSION</name> <type>VK_MAKE_VERSION</type>(1, 0, 0) // Patch version should always be set to 0",
    ),
    (
        "VK_API_VERSION_1_0",
        "// Vulkan 1.0 version number\n#define <name>VK_API_VERSION_1_0</name> <type>VK_MAKE_VERSION</type>(1, 0, 0)// Patch version should always be set to 0",
    ),
    (
        "VK_API_VERSION_1_1",
        "// Vulkan 1.1 version number\n#define <name>VK_API_VERSION_1_1</name> <type>VK_MAKE_VERSION</type>(1, 1, 0)// Patch version should always be set to 0",
    ),
    (
        "VK_API_VERSION_1_2",
        "// Vulkan 1.2 version number\n#define <name>VK_API_VERSION_1_2</name> <type>VK_MAKE_VERSION</type>(1, 2, 0)// Patch version should always be set to 0",
    ),
    (
        "VKSC_API_VERSION_1_0",
        "VK_MAKE_API_VERSION</type>(VKSC_API_VARIANT, 1, 0, 0)// Patch version should always be set to 0",
    ),
    (
        "VK_HEADER_VERSION",
        "// Version of this file\n#define <name>VK_HEADER_VERSION</name> ",
    ),
    (
        "VK_HEADER_VERSION_COMPLETE",
        "// Complete version of this file\n#define <name>VK_HEADER_VERSION_COMPLETE</name> <type>VK_MAKE_VERSION</type>(1, 2, VK_HEADER_VERSION)",
    ),
    (
        "VK_USE_64_BIT_PTR_DEFINES",
        "\n#ifndef VK_USE_64_BIT_PTR_DEFINES\n    #if defined(__LP64__) || defined(_WIN64) || (defined(__x86_64__) && !defined(__ILP32__) ) || defined(_M_X64) || defined(__ia64) || defined (_M_IA64) || defined(__aarch64__) || defined(__powerpc64__)\n        #define VK_USE_64_BIT_PTR_DEFINES 1\n    #else\n        #define VK_USE_64_BIT_PTR_DEFINES 0\n    #endif\n#endif",
    ),
    (
        "VK_DEFINE_NON_DISPATCHABLE_HANDLE",
        "\n#if !defined(VK_DEFINE_NON_DISPATCHABLE_HANDLE)\n#if defined(__LP64__) || defined(_WIN64) || (defined(__x86_64__) && !defined(__ILP32__) ) || defined(_M_X64) || defined(__ia64) || defined (_M_IA64) || defined(__aarch64__) || defined(__powerpc64__)\n        #define VK_DEFINE_NON_DISPATCHABLE_HANDLE(object) typedef struct object##_T *object;\n#else\n        #define VK_DEFINE_NON_DISPATCHABLE_HANDLE(object) typedef uint64_t object;\n#endif\n#endif",
    ),
    (
        "VK_NULL_HANDLE",
        "\n#define <name>VK_NULL_HANDLE</name> 0",
    ),
    (
        "VK_DEFINE_HANDLE",
        "\n#define <name>VK_DEFINE_HANDLE</name>(object) typedef struct object##_T* (object);",
    ),
];

#[cfg(test)]
mod test {
    use super::*;

    fn record(name: &str, value: Option<&str>, bitpos: Option<&str>) -> EnumRecord {
        EnumRecord {
            name: name.to_string(),
            value: value.map(str::to_string),
            bitpos: bitpos.map(str::to_string),
            ..EnumRecord::default()
        }
    }

    #[test]
    fn enum_value_formats() {
        let all = HashMap::new();
        assert_eq!(
            enum_field_value(&record("A", Some("42"), None), &all).unwrap(),
            42
        );
        assert_eq!(
            enum_field_value(&record("A", Some("-11"), None), &all).unwrap(),
            -11
        );
        assert_eq!(
            enum_field_value(&record("A", Some("0x100000000"), None), &all).unwrap(),
            0x1_0000_0000
        );
        assert_eq!(
            enum_field_value(&record("A", None, Some("31")), &all).unwrap(),
            1 << 31
        );
        assert!(enum_field_value(&record("A", Some("1000.0f"), None), &all).is_err());
    }

    #[test]
    fn enum_extension_offset_formula() {
        let all = HashMap::new();
        let mut field = record("A", None, None);
        field.extnumber = 158;
        field.offset = 1;
        assert_eq!(enum_field_value(&field, &all).unwrap(), 1_000_157_001);
        field.dir = Some(String::from("-"));
        assert_eq!(enum_field_value(&field, &all).unwrap(), -1_000_157_001);
    }

    #[test]
    fn enum_alias_resolution() {
        let mut all = HashMap::new();
        all.insert(
            String::from("VK_TARGET"),
            record("VK_TARGET", Some("7"), None),
        );
        let mut field = record("VK_ALIAS", None, None);
        field.alias = Some(String::from("VK_TARGET"));
        assert_eq!(enum_field_value(&field, &all).unwrap(), 7);
    }

    #[test]
    fn define_allowlist() {
        let ok = TypeRecord {
            name: String::from("VK_API_VERSION_MAJOR"),
            category: String::from("define"),
            raw: String::from(
                "#define <name>VK_API_VERSION_MAJOR</name>(version) (((uint32_t)(version) >> 22U) & 0x7FU)",
            ),
            ..TypeRecord::default()
        };
        assert!(check_define(&ok).is_ok());

        let header = TypeRecord {
            name: String::from("VK_HEADER_VERSION"),
            category: String::from("define"),
            raw: String::from("// Version of this file\n#define <name>VK_HEADER_VERSION</name> 290"),
            ..TypeRecord::default()
        };
        assert!(check_define(&header).is_ok());

        let tampered = TypeRecord {
            name: String::from("VK_API_VERSION_MAJOR"),
            category: String::from("define"),
            raw: String::from("#define <name>VK_API_VERSION_MAJOR</name>(version) 0"),
            ..TypeRecord::default()
        };
        assert!(matches!(
            check_define(&tampered),
            Err(LoadError::DefineMismatch { .. })
        ));

        let unknown = TypeRecord {
            name: String::from("VK_SOMETHING_ELSE"),
            category: String::from("define"),
            raw: String::from("#define <name>VK_SOMETHING_ELSE</name> 1"),
            ..TypeRecord::default()
        };
        assert!(matches!(
            check_define(&unknown),
            Err(LoadError::DefineMismatch { .. })
        ));
    }
}
