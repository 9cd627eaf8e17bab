//! Architecture-aware model of the C/C++ types declared by the Vulkan
//! registry.
//!
//! Types live in a [`TypeStore`] arena and are referred to by [`TypeId`].
//! Every query is parameterized by an [`Arch`] because sizes, alignments
//! and even signedness differ between the supported targets. The store is
//! immutable once built, with a single exception: a pointer's pointee may
//! be replaced exactly once while the store is unsealed, which is how the
//! loader resolves pointer cycles.

use std::collections::HashSet;
use std::rc::Rc;

/// One of the supported host/guest CPU targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    Arm,
    Arm64,
    Riscv32,
    Riscv64,
    X86,
    X86_64,
}

impl Arch {
    pub const ALL: [Arch; 6] = [
        Arch::Arm,
        Arch::Arm64,
        Arch::Riscv32,
        Arch::Riscv64,
        Arch::X86,
        Arch::X86_64,
    ];

    /// Pointer width in bits.
    pub fn ptr_bits(self) -> u32 {
        match self {
            Arch::Arm | Arch::Riscv32 | Arch::X86 => 32,
            Arch::Arm64 | Arch::Riscv64 | Arch::X86_64 => 64,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Tag discriminating type nodes. The zero value is `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    #[default]
    Invalid,
    Opaque,
    Alias,
    Void,
    Bool,
    Char16,
    Char32,
    Char,
    SChar,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    SSizeT,
    SizeT,
    IntPtrT,
    UIntPtrT,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Array,
    Struct,
    Union,
    Ptr,
    Enum,
    Func,
    Const,
}

/// Index of a type node inside its [`TypeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

/// Reference from a field to the field holding its element count.
///
/// `Nested` covers `len="outer->inner"` attributes where the count lives
/// inside the struct the sibling `outer` field points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum LenPath {
    Field(usize),
    Nested { field: usize, inner: usize },
}

/// Loader-attached attributes of a struct member or function parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldExt {
    pub length: Option<LenPath>,
    pub optional: bool,
}

/// A named member of a struct, union or function signature, together
/// with the extension payload the builder attached to it.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    pub ext: FieldExt,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Field {
        Field {
            name: name.into(),
            ty,
            ext: FieldExt::default(),
        }
    }
}

/// A named enumerator with its resolved value.
#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    pub alias: Option<String>,
    pub value: i64,
}

#[derive(Debug, Clone)]
struct StructField {
    field: Rc<Field>,
    offset: u32,
}

#[derive(Debug)]
enum TypeNode {
    Fixed {
        bits: u32,
        align: u32,
        kind: Kind,
        name: &'static str,
        signed: Option<bool>,
    },
    // Also covers `void`, which carries Kind::Void.
    Opaque {
        kind: Kind,
        name: String,
    },
    Alias {
        name: String,
        base: TypeId,
    },
    Const {
        base: TypeId,
    },
    Ptr {
        pointee: TypeId,
    },
    Array {
        elem: TypeId,
        count: u32,
    },
    Struct {
        name: String,
        fields: Vec<StructField>,
        align: u32,
        bits: u32,
    },
    Union {
        name: String,
        fields: Vec<Rc<Field>>,
        align: u32,
        bits: u32,
    },
    Enum {
        name: String,
        underlying: TypeId,
        members: Vec<EnumMember>,
    },
    Func {
        result: TypeId,
        params: Vec<Rc<Field>>,
    },
    ArchDependent {
        variants: [TypeId; 6],
    },
}

/// Uniform read-side view of one field of a struct, union, enum or
/// function type.
#[derive(Debug, Clone, Copy)]
pub enum FieldInfo<'a> {
    Plain(&'a Field),
    Struct { field: &'a Field, offset: u32 },
    Enum { member: &'a EnumMember, underlying: TypeId },
}

impl<'a> FieldInfo<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            FieldInfo::Plain(f) => &f.name,
            FieldInfo::Struct { field, .. } => &field.name,
            FieldInfo::Enum { member, .. } => &member.name,
        }
    }

    pub fn ty(&self) -> TypeId {
        match self {
            FieldInfo::Plain(f) => f.ty,
            FieldInfo::Struct { field, .. } => field.ty,
            FieldInfo::Enum { underlying, .. } => *underlying,
        }
    }

    /// Bit offset inside the enclosing struct.
    pub fn offset(&self) -> u32 {
        match self {
            FieldInfo::Struct { offset, .. } => *offset,
            _ => panic!("vk-abi: offset() on a field of a non-struct type"),
        }
    }

    /// The builder-provided extension payload.
    pub fn ext(&self) -> &'a FieldExt {
        match self {
            FieldInfo::Plain(f) => &f.ext,
            FieldInfo::Struct { field, .. } => &field.ext,
            FieldInfo::Enum { .. } => {
                panic!("vk-abi: ext() on an enum member")
            }
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            FieldInfo::Enum { member, .. } => member.value,
            _ => panic!("vk-abi: value() on a non-enum field"),
        }
    }

    pub fn alias(&self) -> Option<&'a str> {
        match self {
            FieldInfo::Enum { member, .. } => member.alias.as_deref(),
            _ => panic!("vk-abi: alias() on a non-enum field"),
        }
    }
}

/// Ids of the well-known primitive types seeded into every store.
#[derive(Debug, Clone, Copy)]
struct PrimTable {
    void: TypeId,
    bool_: TypeId,
    char_: TypeId,
    char16_t: TypeId,
    char32_t: TypeId,
    schar: TypeId,
    uchar: TypeId,
    short_: TypeId,
    ushort: TypeId,
    int_: TypeId,
    uint: TypeId,
    long_: TypeId,
    ulong: TypeId,
    long_long: TypeId,
    ulong_long: TypeId,
    ssize_t: TypeId,
    size_t: TypeId,
    intptr_t: TypeId,
    uintptr_t: TypeId,
    int8_t: TypeId,
    uint8_t: TypeId,
    int16_t: TypeId,
    uint16_t: TypeId,
    int32_t: TypeId,
    uint32_t: TypeId,
    int64_t: TypeId,
    uint64_t: TypeId,
    float32: TypeId,
    float64: TypeId,
}

/// Arena owning every type node of one catalog.
#[derive(Debug)]
pub struct TypeStore {
    nodes: Vec<TypeNode>,
    prims: PrimTable,
    sealed: bool,
}

impl Default for TypeStore {
    fn default() -> TypeStore {
        TypeStore::new()
    }
}

fn seed(nodes: &mut Vec<TypeNode>, node: TypeNode) -> TypeId {
    let id = TypeId(nodes.len() as u32);
    nodes.push(node);
    id
}

fn fixed(
    nodes: &mut Vec<TypeNode>,
    bits: u32,
    align: u32,
    kind: Kind,
    name: &'static str,
    signed: Option<bool>,
) -> TypeId {
    seed(
        nodes,
        TypeNode::Fixed {
            bits,
            align,
            kind,
            name,
            signed,
        },
    )
}

// ILP32 on the 32-bit targets, LP64 on the 64-bit ones.
fn ptr_sized(nodes: &mut Vec<TypeNode>, kind: Kind, name: &'static str, signed: bool) -> TypeId {
    let narrow = fixed(nodes, 32, 32, kind, name, Some(signed));
    let wide = fixed(nodes, 64, 64, kind, name, Some(signed));
    seed(
        nodes,
        TypeNode::ArchDependent {
            variants: [narrow, wide, narrow, wide, narrow, wide],
        },
    )
}

// 64 bits everywhere but only 32-bit aligned on x86.
fn wide_fixed(nodes: &mut Vec<TypeNode>, kind: Kind, name: &'static str, signed: bool) -> TypeId {
    let full = fixed(nodes, 64, 64, kind, name, Some(signed));
    let x86 = fixed(nodes, 64, 32, kind, name, Some(signed));
    seed(
        nodes,
        TypeNode::ArchDependent {
            variants: [full, full, full, full, x86, full],
        },
    )
}

impl TypeStore {
    pub fn new() -> TypeStore {
        let mut nodes = Vec::new();
        let n = &mut nodes;

        let void = seed(
            n,
            TypeNode::Opaque {
                kind: Kind::Void,
                name: String::from("void"),
            },
        );
        let bool_ = fixed(n, 8, 8, Kind::Bool, "bool", None);

        // char is unsigned on the ARM and RISC-V targets, signed on both
        // x86 targets.
        let char_u = fixed(n, 8, 8, Kind::Char, "char", Some(false));
        let char_s = fixed(n, 8, 8, Kind::Char, "char", Some(true));
        let char_ = seed(
            n,
            TypeNode::ArchDependent {
                variants: [char_u, char_u, char_u, char_u, char_s, char_s],
            },
        );

        let char16_t = fixed(n, 16, 16, Kind::Char16, "char16_t", Some(false));
        let char32_t = fixed(n, 32, 32, Kind::Char32, "char32_t", Some(false));
        let schar = fixed(n, 8, 8, Kind::SChar, "signed char", Some(true));
        let uchar = fixed(n, 8, 8, Kind::UChar, "unsigned char", Some(false));
        let short_ = fixed(n, 16, 16, Kind::Short, "short", Some(true));
        let ushort = fixed(n, 16, 16, Kind::UShort, "unsigned short", Some(false));
        let int_ = fixed(n, 32, 32, Kind::Int, "int", Some(true));
        let uint = fixed(n, 32, 32, Kind::UInt, "unsigned int", Some(false));

        let long_ = ptr_sized(n, Kind::Long, "long", true);
        let ulong = ptr_sized(n, Kind::ULong, "unsigned long", false);
        // ssize_t is POSIX, not ISO C++, hence no std:: prefix.
        let ssize_t = ptr_sized(n, Kind::SSizeT, "ssize_t", true);
        let size_t = ptr_sized(n, Kind::SizeT, "std::size_t", false);
        let intptr_t = ptr_sized(n, Kind::IntPtrT, "std::intptr_t", true);
        let uintptr_t = ptr_sized(n, Kind::UIntPtrT, "std::uintptr_t", false);

        let long_long = wide_fixed(n, Kind::LongLong, "long long", true);
        let ulong_long = wide_fixed(n, Kind::ULongLong, "unsigned long long", false);
        let int64_t = wide_fixed(n, Kind::Int64, "std::int64_t", true);
        let uint64_t = wide_fixed(n, Kind::UInt64, "std::uint64_t", false);
        let float64 = wide_fixed(n, Kind::Float64, "double", true);

        let int8_t = fixed(n, 8, 8, Kind::Int8, "std::int8_t", Some(true));
        let uint8_t = fixed(n, 8, 8, Kind::UInt8, "std::uint8_t", Some(false));
        let int16_t = fixed(n, 16, 16, Kind::Int16, "std::int16_t", Some(true));
        let uint16_t = fixed(n, 16, 16, Kind::UInt16, "std::uint16_t", Some(false));
        let int32_t = fixed(n, 32, 32, Kind::Int32, "std::int32_t", Some(true));
        let uint32_t = fixed(n, 32, 32, Kind::UInt32, "std::uint32_t", Some(false));
        let float32 = fixed(n, 32, 32, Kind::Float32, "float", Some(true));

        TypeStore {
            nodes,
            prims: PrimTable {
                void,
                bool_,
                char_,
                char16_t,
                char32_t,
                schar,
                uchar,
                short_,
                ushort,
                int_,
                uint,
                long_,
                ulong,
                long_long,
                ulong_long,
                ssize_t,
                size_t,
                intptr_t,
                uintptr_t,
                int8_t,
                uint8_t,
                int16_t,
                uint16_t,
                int32_t,
                uint32_t,
                int64_t,
                uint64_t,
                float32,
                float64,
            },
            sealed: false,
        }
    }

    /// The seeded node for a primitive kind (including `Void`).
    pub fn primitive(&self, kind: Kind) -> TypeId {
        let p = &self.prims;
        match kind {
            Kind::Void => p.void,
            Kind::Bool => p.bool_,
            Kind::Char => p.char_,
            Kind::Char16 => p.char16_t,
            Kind::Char32 => p.char32_t,
            Kind::SChar => p.schar,
            Kind::UChar => p.uchar,
            Kind::Short => p.short_,
            Kind::UShort => p.ushort,
            Kind::Int => p.int_,
            Kind::UInt => p.uint,
            Kind::Long => p.long_,
            Kind::ULong => p.ulong,
            Kind::LongLong => p.long_long,
            Kind::ULongLong => p.ulong_long,
            Kind::SSizeT => p.ssize_t,
            Kind::SizeT => p.size_t,
            Kind::IntPtrT => p.intptr_t,
            Kind::UIntPtrT => p.uintptr_t,
            Kind::Int8 => p.int8_t,
            Kind::UInt8 => p.uint8_t,
            Kind::Int16 => p.int16_t,
            Kind::UInt16 => p.uint16_t,
            Kind::Int32 => p.int32_t,
            Kind::UInt32 => p.uint32_t,
            Kind::Int64 => p.int64_t,
            Kind::UInt64 => p.uint64_t,
            Kind::Float32 => p.float32,
            Kind::Float64 => p.float64,
            other => panic!("vk-abi: {other:?} is not a primitive kind"),
        }
    }

    fn push(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.0 as usize]
    }

    /// Follows `ArchDependent` wrappers down to the node for `arch`.
    fn select(&self, id: TypeId, arch: Arch) -> TypeId {
        let mut id = id;
        while let TypeNode::ArchDependent { variants } = self.node(id) {
            id = variants[arch.index()];
        }
        id
    }

    // ---- construction ----------------------------------------------------

    pub fn opaque(&mut self, name: &str) -> TypeId {
        self.push(TypeNode::Opaque {
            kind: Kind::Opaque,
            name: name.to_string(),
        })
    }

    pub fn alias(&mut self, name: &str, base: TypeId) -> TypeId {
        self.push(TypeNode::Alias {
            name: name.to_string(),
            base,
        })
    }

    pub fn const_of(&mut self, base: TypeId) -> TypeId {
        self.push(TypeNode::Const { base })
    }

    pub fn pointer(&mut self, pointee: TypeId) -> TypeId {
        self.push(TypeNode::Ptr { pointee })
    }

    pub fn array(&mut self, elem: TypeId, count: u32) -> TypeId {
        self.push(TypeNode::Array { elem, count })
    }

    pub fn function(&mut self, result: TypeId, params: Vec<Field>) -> TypeId {
        let params = params.into_iter().map(Rc::new).collect();
        self.push(TypeNode::Func { result, params })
    }

    pub fn enumeration(
        &mut self,
        name: &str,
        underlying: TypeId,
        members: Vec<EnumMember>,
    ) -> TypeId {
        self.push(TypeNode::Enum {
            name: name.to_string(),
            underlying,
            members,
        })
    }

    pub fn arch_dependent(&mut self, variants: [TypeId; 6]) -> TypeId {
        debug_assert!(
            Arch::ALL
                .iter()
                .all(|&a| self.kind(variants[a.index()], a) == self.kind(variants[0], Arch::Arm)),
            "vk-abi: arch-dependent variants must share one kind"
        );
        self.push(TypeNode::ArchDependent { variants })
    }

    /// Builds a struct, computing the layout for every architecture. When
    /// the layouts agree a single node is returned, otherwise six
    /// per-architecture nodes under an `ArchDependent` wrapper.
    pub fn structure(&mut self, name: &str, fields: Vec<Field>) -> TypeId {
        let fields: Vec<Rc<Field>> = fields.into_iter().map(Rc::new).collect();
        let mut align = [0u32; 6];
        let mut offset = [0u32; 6];
        let mut offsets: [Vec<u32>; 6] = Default::default();
        for field in &fields {
            for arch in Arch::ALL {
                let i = arch.index();
                let field_align = self.align(field.ty, arch);
                align[i] = align[i].max(field_align);
                let rem = offset[i] % field_align;
                if rem != 0 {
                    offset[i] += field_align - rem;
                }
                offsets[i].push(offset[i]);
                offset[i] += self.bits(field.ty, arch);
            }
        }
        for i in 0..6 {
            if align[i] != 0 {
                let rem = offset[i] % align[i];
                if rem != 0 {
                    offset[i] += align[i] - rem;
                }
            }
        }
        let uniform = (1..6)
            .all(|i| align[i] == align[0] && offset[i] == offset[0] && offsets[i] == offsets[0]);
        let make = |store: &mut TypeStore, i: usize, offsets: &[Vec<u32>; 6]| {
            let fields = fields
                .iter()
                .zip(&offsets[i])
                .map(|(field, &offset)| StructField {
                    field: Rc::clone(field),
                    offset,
                })
                .collect();
            store.push(TypeNode::Struct {
                name: name.to_string(),
                fields,
                align: align[i],
                bits: offset[i],
            })
        };
        if uniform {
            make(self, 0, &offsets)
        } else {
            let mut variants = [TypeId(0); 6];
            for (i, variant) in variants.iter_mut().enumerate() {
                *variant = make(self, i, &offsets);
            }
            self.push(TypeNode::ArchDependent { variants })
        }
    }

    /// Builds a union; size is the largest member, no trailing padding
    /// beyond that.
    pub fn union(&mut self, name: &str, fields: Vec<Field>) -> TypeId {
        let fields: Vec<Rc<Field>> = fields.into_iter().map(Rc::new).collect();
        let mut align = [0u32; 6];
        let mut bits = [0u32; 6];
        for field in &fields {
            for arch in Arch::ALL {
                let i = arch.index();
                bits[i] = bits[i].max(self.bits(field.ty, arch));
                align[i] = align[i].max(self.align(field.ty, arch));
            }
        }
        let uniform = (1..6).all(|i| align[i] == align[0] && bits[i] == bits[0]);
        if uniform {
            self.push(TypeNode::Union {
                name: name.to_string(),
                fields,
                align: align[0],
                bits: bits[0],
            })
        } else {
            let mut variants = [TypeId(0); 6];
            for (i, variant) in variants.iter_mut().enumerate() {
                *variant = self.push(TypeNode::Union {
                    name: name.to_string(),
                    fields: fields.clone(),
                    align: align[i],
                    bits: bits[i],
                });
            }
            self.push(TypeNode::ArchDependent { variants })
        }
    }

    /// Replaces the pointee of `ptr`. The current pointee must be opaque
    /// (or const opaque) on every architecture and the replacement must be
    /// a struct or union of matching const-ness. This is the only
    /// mutation permitted after construction; it is used while resolving
    /// pointer cycles and is forbidden once the store is sealed.
    pub fn replace_pointee(&mut self, ptr: TypeId, new_pointee: TypeId) {
        assert!(!self.sealed, "vk-abi: replace_pointee on a sealed store");
        let current = match self.node(ptr) {
            TypeNode::Ptr { pointee } => *pointee,
            _ => panic!("vk-abi: replace_pointee on a non-pointer type"),
        };
        for arch in Arch::ALL {
            let mut replacement_kind = self.kind(new_pointee, arch);
            if self.kind(current, arch) == Kind::Const
                && self.kind(self.elem(current, arch), arch) == Kind::Opaque
            {
                if replacement_kind != Kind::Const {
                    panic!(
                        "vk-abi: replacing const opaque pointee of {} with a non-const type",
                        self.describe(ptr)
                    );
                }
                replacement_kind = self.kind(self.elem(new_pointee, arch), arch);
            } else if self.kind(current, arch) != Kind::Opaque {
                panic!(
                    "vk-abi: replacing non-opaque pointee of {}",
                    self.describe(ptr)
                );
            }
            if replacement_kind != Kind::Struct && replacement_kind != Kind::Union {
                panic!(
                    "vk-abi: pointee of {} replaced with a non-structural type",
                    self.describe(ptr)
                );
            }
        }
        match &mut self.nodes[ptr.0 as usize] {
            TypeNode::Ptr { pointee } => *pointee = new_pointee,
            _ => unreachable!(),
        }
    }

    /// Forbids any further [`TypeStore::replace_pointee`] call.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    // ---- queries ---------------------------------------------------------

    pub fn kind(&self, id: TypeId, arch: Arch) -> Kind {
        match self.node(self.select(id, arch)) {
            TypeNode::Fixed { kind, .. } => *kind,
            TypeNode::Opaque { kind, .. } => *kind,
            TypeNode::Alias { .. } => Kind::Alias,
            TypeNode::Const { .. } => Kind::Const,
            TypeNode::Ptr { .. } => Kind::Ptr,
            TypeNode::Array { .. } => Kind::Array,
            TypeNode::Struct { .. } => Kind::Struct,
            TypeNode::Union { .. } => Kind::Union,
            TypeNode::Enum { .. } => Kind::Enum,
            TypeNode::Func { .. } => Kind::Func,
            TypeNode::ArchDependent { .. } => unreachable!(),
        }
    }

    /// Size in bits.
    pub fn bits(&self, id: TypeId, arch: Arch) -> u32 {
        match self.node(self.select(id, arch)) {
            TypeNode::Fixed { bits, .. } => *bits,
            TypeNode::Opaque { name, .. } => {
                panic!("vk-abi: size of opaque type {name} is unknown")
            }
            TypeNode::Alias { base, .. } => self.bits(*base, arch),
            TypeNode::Const { base } => self.bits(*base, arch),
            TypeNode::Ptr { .. } => arch.ptr_bits(),
            TypeNode::Array { elem, count } => self.bits(*elem, arch) * count,
            TypeNode::Struct { bits, .. } => *bits,
            TypeNode::Union { bits, .. } => *bits,
            TypeNode::Enum { underlying, .. } => self.bits(*underlying, arch),
            TypeNode::Func { .. } => panic!("vk-abi: function types have no size"),
            TypeNode::ArchDependent { .. } => unreachable!(),
        }
    }

    /// Alignment in bits.
    pub fn align(&self, id: TypeId, arch: Arch) -> u32 {
        match self.node(self.select(id, arch)) {
            TypeNode::Fixed { align, .. } => *align,
            TypeNode::Opaque { name, .. } => {
                panic!("vk-abi: alignment of opaque type {name} is unknown")
            }
            TypeNode::Alias { base, .. } => self.align(*base, arch),
            TypeNode::Const { base } => self.align(*base, arch),
            TypeNode::Ptr { .. } => arch.ptr_bits(),
            TypeNode::Array { elem, .. } => self.align(*elem, arch),
            TypeNode::Struct { align, .. } => *align,
            TypeNode::Union { align, .. } => *align,
            TypeNode::Enum { underlying, .. } => self.align(*underlying, arch),
            TypeNode::Func { .. } => panic!("vk-abi: function types have no alignment"),
            TypeNode::ArchDependent { .. } => unreachable!(),
        }
    }

    /// Rendered type name, e.g. `const int *` or `struct VkExtent2D`.
    pub fn name(&self, id: TypeId, arch: Arch) -> String {
        let id = self.select(id, arch);
        match self.node(id) {
            TypeNode::Fixed { name, .. } => (*name).to_string(),
            TypeNode::Opaque { name, .. } => name.clone(),
            TypeNode::Alias { name, .. } => name.clone(),
            TypeNode::Const { base } => {
                if self.kind(*base, arch) == Kind::Ptr {
                    self.declare_var(*base, "const", arch)
                } else {
                    format!("const {}", self.name(*base, arch))
                }
            }
            TypeNode::Ptr { pointee } => match self.kind(*pointee, arch) {
                Kind::Array | Kind::Func => self.declare_var(*pointee, "(*)", arch),
                _ => format!("{} *", self.name(*pointee, arch)),
            },
            TypeNode::Array { elem, count } => format!("{}[{count}]", self.name(*elem, arch)),
            TypeNode::Struct { name, .. } => format!("struct {name}"),
            TypeNode::Union { name, .. } => format!("union {name}"),
            TypeNode::Enum { name, .. } => name.clone(),
            TypeNode::Func { .. } => self.declare_var(id, "", arch),
            TypeNode::ArchDependent { .. } => unreachable!(),
        }
    }

    /// Name without qualifiers or punctuation. Not defined for function
    /// types.
    pub fn base_name(&self, id: TypeId, arch: Arch) -> String {
        match self.node(self.select(id, arch)) {
            TypeNode::Fixed { name, .. } => (*name).to_string(),
            TypeNode::Opaque { name, .. } => name.clone(),
            TypeNode::Alias { name, .. } => name.clone(),
            TypeNode::Const { base } => self.base_name(*base, arch),
            TypeNode::Ptr { pointee } => self.base_name(*pointee, arch),
            TypeNode::Array { elem, .. } => self.name(*elem, arch),
            TypeNode::Struct { name, .. } => name.clone(),
            TypeNode::Union { name, .. } => name.clone(),
            TypeNode::Enum { name, .. } => name.clone(),
            TypeNode::Func { .. } => panic!("vk-abi: base_name() of a function type"),
            TypeNode::ArchDependent { .. } => unreachable!(),
        }
    }

    /// Renders a C declaration of a variable named `var_name`.
    pub fn declare_var(&self, id: TypeId, var_name: &str, arch: Arch) -> String {
        let id = self.select(id, arch);
        match self.node(id) {
            TypeNode::Fixed { name, .. } => format!("{name} {var_name}"),
            TypeNode::Opaque { name, .. } => {
                panic!("vk-abi: cannot declare a variable of opaque type {name}")
            }
            TypeNode::Alias { name, .. } => format!("{name} {var_name}"),
            TypeNode::Enum { name, .. } => format!("{name} {var_name}"),
            TypeNode::Struct { name, .. } => format!("struct {name} {var_name}"),
            TypeNode::Union { name, .. } => format!("union {name} {var_name}"),
            TypeNode::Array { elem, count } => {
                self.declare_var(*elem, &format!("{var_name}[{count}]"), arch)
            }
            TypeNode::Ptr { pointee } => match self.kind(*pointee, arch) {
                Kind::Array | Kind::Func => {
                    self.declare_var(*pointee, &format!("(*{var_name})"), arch)
                }
                _ => format!("{} *{}", self.name(*pointee, arch), var_name),
            },
            TypeNode::Func { result, params } => {
                let params: Vec<String> = params
                    .iter()
                    .map(|p| self.declare_var(p.ty, &p.name, arch))
                    .collect();
                let params = params.join(", ");
                // Declaring a variable of type void is forbidden, so a void
                // result is rendered directly.
                if self.kind(*result, arch) == Kind::Void {
                    format!("void {var_name}({params})")
                } else {
                    self.declare_var(*result, &format!("{var_name}({params})"), arch)
                }
            }
            TypeNode::Const { base } => {
                if self.kind(*base, arch) == Kind::Ptr {
                    if var_name.starts_with('(') || var_name.starts_with('[') {
                        self.declare_var(*base, &format!("const{var_name}"), arch)
                    } else {
                        self.declare_var(*base, &format!("const {var_name}"), arch)
                    }
                } else {
                    format!("const {}", self.declare_var(*base, var_name, arch))
                }
            }
            TypeNode::ArchDependent { .. } => unreachable!(),
        }
    }

    /// Signedness, for integer (and floating point) kinds only.
    pub fn signed(&self, id: TypeId, arch: Arch) -> bool {
        match self.node(self.select(id, arch)) {
            TypeNode::Fixed {
                signed: Some(signed),
                ..
            } => *signed,
            _ => panic!(
                "vk-abi: signed() on non-numeric type {}",
                self.describe(id)
            ),
        }
    }

    /// Pointee, array element, aliased type, const base, enum underlying
    /// integer, or function result.
    pub fn elem(&self, id: TypeId, arch: Arch) -> TypeId {
        match self.node(self.select(id, arch)) {
            TypeNode::Alias { base, .. } => *base,
            TypeNode::Const { base } => *base,
            TypeNode::Ptr { pointee } => *pointee,
            TypeNode::Array { elem, .. } => *elem,
            TypeNode::Enum { underlying, .. } => *underlying,
            TypeNode::Func { result, .. } => *result,
            _ => panic!(
                "vk-abi: elem() on type {} which has no element",
                self.describe(id)
            ),
        }
    }

    /// Field count for struct/union/enum/function types, element count
    /// for arrays.
    pub fn num_fields(&self, id: TypeId, arch: Arch) -> usize {
        match self.node(self.select(id, arch)) {
            TypeNode::Struct { fields, .. } => fields.len(),
            TypeNode::Union { fields, .. } => fields.len(),
            TypeNode::Enum { members, .. } => members.len(),
            TypeNode::Func { params, .. } => params.len(),
            TypeNode::Array { count, .. } => *count as usize,
            _ => panic!(
                "vk-abi: num_fields() on non-structural type {}",
                self.describe(id)
            ),
        }
    }

    pub fn field(&self, id: TypeId, i: usize, arch: Arch) -> FieldInfo<'_> {
        match self.node(self.select(id, arch)) {
            TypeNode::Struct { fields, .. } => FieldInfo::Struct {
                field: &*fields[i].field,
                offset: fields[i].offset,
            },
            TypeNode::Union { fields, .. } => FieldInfo::Plain(&*fields[i]),
            TypeNode::Func { params, .. } => FieldInfo::Plain(&*params[i]),
            TypeNode::Enum {
                members, underlying, ..
            } => FieldInfo::Enum {
                member: &members[i],
                underlying: *underlying,
            },
            _ => panic!(
                "vk-abi: field() on non-structural type {}",
                self.describe(id)
            ),
        }
    }

    /// Checks that `id` is the chain of kinds given, walking `elem()`
    /// between links. Panics on architecture-dependent types.
    pub fn is_kind(&self, id: TypeId, kinds: &[Kind]) -> bool {
        let mut id = id;
        for (i, &kind) in kinds.iter().enumerate() {
            let first = self.kind(id, Arch::Arm);
            for arch in Arch::ALL {
                if self.kind(id, arch) != first {
                    panic!(
                        "vk-abi: is_kind() on arch-dependent type {}",
                        self.describe(id)
                    );
                }
            }
            if first != kind {
                return false;
            }
            if i + 1 != kinds.len() {
                id = self.elem(id, Arch::Arm);
            }
        }
        true
    }

    // Best-effort rendering for panic messages; never panics itself.
    fn describe(&self, id: TypeId) -> String {
        match self.node(id) {
            TypeNode::Fixed { name, .. } => (*name).to_string(),
            TypeNode::Opaque { name, .. }
            | TypeNode::Alias { name, .. }
            | TypeNode::Struct { name, .. }
            | TypeNode::Union { name, .. }
            | TypeNode::Enum { name, .. } => name.clone(),
            TypeNode::Const { base } => format!("const {}", self.describe(*base)),
            TypeNode::Ptr { pointee } => format!("{} *", self.describe(*pointee)),
            TypeNode::Array { elem, count } => format!("{}[{count}]", self.describe(*elem)),
            TypeNode::Func { .. } => String::from("function type"),
            TypeNode::ArchDependent { variants } => self.describe(variants[0]),
        }
    }

    // ---- compatibility ---------------------------------------------------

    /// Whether a value of this type can flow between the two
    /// architectures in both directions without reinterpretation.
    pub fn is_compatible(&self, id: TypeId, a: Arch, b: Arch) -> bool {
        self.is_input_compatible(id, a, b) && self.is_input_compatible(id, b, a)
    }

    /// Whether a value of this type produced on `guest` may be consumed
    /// by code running on `host`.
    pub fn is_input_compatible(&self, id: TypeId, host: Arch, guest: Arch) -> bool {
        self.input_compatible(id, host, id, guest, &mut HashSet::new())
    }

    fn input_compatible(
        &self,
        host_ty: TypeId,
        host: Arch,
        guest_ty: TypeId,
        guest: Arch,
        seen: &mut HashSet<String>,
    ) -> bool {
        let host_kind = self.kind(host_ty, host);
        if host_kind == Kind::Alias {
            return self.input_compatible(self.elem(host_ty, host), host, guest_ty, guest, seen);
        }
        let guest_kind = self.kind(guest_ty, guest);
        if guest_kind == Kind::Alias {
            return self.input_compatible(host_ty, host, self.elem(guest_ty, guest), guest, seen);
        }
        if host_kind != guest_kind {
            return false;
        }
        // Functions are never automatically compatible.
        if host_kind == Kind::Func {
            return false;
        }
        if host_kind == Kind::Const {
            return self.input_compatible(
                self.elem(host_ty, host),
                host,
                self.elem(guest_ty, guest),
                guest,
                seen,
            );
        }
        // Opaque types and void are compatible even though their sizes
        // are unknown.
        if host_kind == Kind::Void {
            return true;
        }
        if host_kind == Kind::Opaque {
            return self.name(host_ty, host) == self.name(guest_ty, guest);
        }
        if self.bits(host_ty, host) != self.bits(guest_ty, guest) {
            return false;
        }
        // Guest objects passed to host functions must be at least as
        // aligned as the host expects; for host-created objects the guest
        // is assumed not to check.
        if self.align(guest_ty, guest) < self.align(host_ty, host) {
            return false;
        }
        match host_kind {
            Kind::Array => {
                self.num_fields(host_ty, host) == self.num_fields(guest_ty, guest)
                    && self.input_compatible(
                        self.elem(host_ty, host),
                        host,
                        self.elem(guest_ty, guest),
                        guest,
                        seen,
                    )
            }
            Kind::Enum => {
                if !self.input_compatible(
                    self.elem(host_ty, host),
                    host,
                    self.elem(guest_ty, guest),
                    guest,
                    seen,
                ) {
                    return false;
                }
                (0..self.num_fields(host_ty, host)).all(|i| {
                    self.field(host_ty, i, host).value() == self.field(guest_ty, i, guest).value()
                })
            }
            Kind::Ptr => self.input_compatible(
                self.elem(host_ty, host),
                host,
                self.elem(guest_ty, guest),
                guest,
                seen,
            ),
            Kind::Struct | Kind::Union => {
                let name = self.name(host_ty, host);
                if name != self.name(guest_ty, guest) {
                    return false;
                }
                if !seen.insert(name) {
                    return true;
                }
                if self.num_fields(host_ty, host) != self.num_fields(guest_ty, guest) {
                    return false;
                }
                for i in 0..self.num_fields(host_ty, host) {
                    let host_field = self.field(host_ty, i, host);
                    let guest_field = self.field(guest_ty, i, guest);
                    if host_kind == Kind::Struct && host_field.offset() != guest_field.offset() {
                        return false;
                    }
                    if !self.input_compatible(
                        host_field.ty(),
                        host,
                        guest_field.ty(),
                        guest,
                        seen,
                    ) {
                        return false;
                    }
                }
                true
            }
            _ => true,
        }
    }
}
