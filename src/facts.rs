//! Foreign type facts handed over by the symbol front end.
//!
//! The front end walks the managed type universe and exposes each type
//! through [`ForeignTypes`]: a closed [`ForeignShape`] (a special built-in,
//! a pointer, or a named type with its namespace chain, category, base
//! type and instance fields). Facts are addressed by [`ForeignTypeId`] so
//! that self-referential graphs can be represented and detected.
//!
//! [`TypeUniverse`] is an in-memory store implementing the trait, used by
//! front ends that materialize their facts up front and by tests.

use std::fmt;

use oxidize_core::{Result, TypeMapError};
use rustc_hash::FxHashMap;

/// Index of a fact in a [`ForeignTypes`] store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForeignTypeId(u32);

impl ForeignTypeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Id of the fact stored at `index`, `None` past the 32-bit id space.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ForeignTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Well-known managed types with a fixed native mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialType {
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Boolean,
    IntPtr,
    UIntPtr,
    Void,
    NullPointer,
}

impl SpecialType {
    pub const ALL: [SpecialType; 15] = [
        SpecialType::SByte,
        SpecialType::Byte,
        SpecialType::Int16,
        SpecialType::UInt16,
        SpecialType::Int32,
        SpecialType::UInt32,
        SpecialType::Int64,
        SpecialType::UInt64,
        SpecialType::Single,
        SpecialType::Double,
        SpecialType::Boolean,
        SpecialType::IntPtr,
        SpecialType::UIntPtr,
        SpecialType::Void,
        SpecialType::NullPointer,
    ];

    /// Scalars whose layout is identical on both sides of the boundary.
    pub const fn is_blittable(self) -> bool {
        !matches!(self, SpecialType::Void | SpecialType::NullPointer)
    }

    /// Managed spelling, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            SpecialType::SByte => "sbyte",
            SpecialType::Byte => "byte",
            SpecialType::Int16 => "short",
            SpecialType::UInt16 => "ushort",
            SpecialType::Int32 => "int",
            SpecialType::UInt32 => "uint",
            SpecialType::Int64 => "long",
            SpecialType::UInt64 => "ulong",
            SpecialType::Single => "float",
            SpecialType::Double => "double",
            SpecialType::Boolean => "bool",
            SpecialType::IntPtr => "nint",
            SpecialType::UIntPtr => "nuint",
            SpecialType::Void => "void",
            SpecialType::NullPointer => "null",
        }
    }
}

impl fmt::Display for SpecialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value or reference semantics of a managed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Value,
    Reference,
}

/// A field declared by a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFact {
    pub name: String,
    pub ty: ForeignTypeId,
    /// Static fields take no part in the instance layout.
    pub is_static: bool,
}

impl FieldFact {
    pub fn instance(name: impl Into<String>, ty: ForeignTypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
        }
    }

    pub fn shared(name: impl Into<String>, ty: ForeignTypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: true,
        }
    }
}

/// Facts about a user-declared (named) managed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTypeFact {
    pub name: String,
    /// Containing namespaces, outermost first. Empty segments stand for the
    /// global namespace and are ignored.
    pub namespace: Vec<String>,
    pub category: TypeCategory,
    pub base_type: Option<ForeignTypeId>,
    pub fields: Vec<FieldFact>,
    /// Generic arguments as seen by the front end. Not consulted yet.
    pub generic_arguments: Vec<ForeignTypeId>,
}

impl NamedTypeFact {
    pub fn new(namespace: &[&str], name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.iter().map(|s| s.to_string()).collect(),
            category,
            base_type: None,
            fields: Vec::new(),
            generic_arguments: Vec::new(),
        }
    }

    pub fn with_base_type(mut self, base: ForeignTypeId) -> Self {
        self.base_type = Some(base);
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldFact>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_generic_arguments(mut self, arguments: Vec<ForeignTypeId>) -> Self {
        self.generic_arguments = arguments;
        self
    }

    /// Iterate the containing namespaces from innermost to outermost.
    pub fn containing_namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespace.iter().rev().map(String::as_str)
    }

    /// Fields that contribute to the instance layout.
    pub fn instance_fields(&self) -> impl Iterator<Item = &FieldFact> {
        self.fields.iter().filter(|field| !field.is_static)
    }
}

const MAX_DISPLAY_POINTER_DEPTH: usize = 8;

/// The closed set of foreign type shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignShape<'a> {
    Special(SpecialType),
    Pointer(ForeignTypeId),
    Named(&'a NamedTypeFact),
}

/// Read-only access to the managed type universe.
pub trait ForeignTypes {
    /// Look up the shape of a fact, `None` if the id is unknown.
    fn shape(&self, id: ForeignTypeId) -> Option<ForeignShape<'_>>;

    /// The platform's enumeration base type; a named type whose base type is
    /// this id is an enumeration.
    fn enum_base_type(&self) -> Option<ForeignTypeId>;

    /// Like [`ForeignTypes::shape`], failing on unknown ids.
    fn expect_shape(&self, id: ForeignTypeId) -> Result<ForeignShape<'_>> {
        self.shape(id)
            .ok_or(TypeMapError::UnknownTypeId { id: id.raw() })
    }

    /// Human readable name for diagnostics.
    fn display_name(&self, id: ForeignTypeId) -> String {
        let mut depth = 0;
        let mut current = id;
        while let Some(ForeignShape::Pointer(pointee)) = self.shape(current) {
            if depth == MAX_DISPLAY_POINTER_DEPTH {
                break;
            }
            depth += 1;
            current = pointee;
        }

        let base = match self.shape(current) {
            Some(ForeignShape::Special(special)) => special.name().to_string(),
            Some(ForeignShape::Named(named)) => {
                let mut segments: Vec<&str> = named
                    .namespace
                    .iter()
                    .map(String::as_str)
                    .filter(|segment| !segment.is_empty())
                    .collect();
                segments.push(&named.name);
                segments.join(".")
            }
            Some(ForeignShape::Pointer(_)) => "...".to_string(),
            None => current.to_string(),
        };
        format!("{base}{}", "*".repeat(depth))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ForeignFact {
    Special(SpecialType),
    Pointer(ForeignTypeId),
    Named(NamedTypeFact),
}

/// In-memory [`ForeignTypes`] store.
///
/// Special types and pointer types are interned; named types are appended.
/// A fresh universe already contains the enumeration base type `System.Enum`.
///
/// # Panics
///
/// Registering a fact panics once every 32-bit [`ForeignTypeId`] is taken.
///
/// # Example
///
/// ```
/// use oxidize::{ForeignTypes, SpecialType, TypeUniverse};
///
/// let mut universe = TypeUniverse::new();
/// let int = universe.special(SpecialType::Int32);
/// let point = universe.add_struct(&["Geometry"], "Point", &[("x", int), ("y", int)]);
/// assert_eq!(universe.display_name(point), "Geometry.Point");
/// ```
#[derive(Debug, Clone)]
pub struct TypeUniverse {
    facts: Vec<ForeignFact>,
    specials: FxHashMap<SpecialType, ForeignTypeId>,
    pointers: FxHashMap<ForeignTypeId, ForeignTypeId>,
    enum_base: ForeignTypeId,
}

impl TypeUniverse {
    pub fn new() -> Self {
        let mut universe = Self {
            facts: Vec::new(),
            specials: FxHashMap::default(),
            pointers: FxHashMap::default(),
            enum_base: ForeignTypeId::new(0),
        };
        let enum_base = NamedTypeFact::new(&["System"], "Enum", TypeCategory::Reference);
        universe.enum_base = universe.add_named(enum_base);
        universe
    }

    fn push(&mut self, fact: ForeignFact) -> ForeignTypeId {
        let Some(id) = ForeignTypeId::from_index(self.facts.len()) else {
            panic!("type universe has run out of 32-bit ids");
        };
        self.facts.push(fact);
        id
    }

    /// Id of a special type, registering it on first use.
    pub fn special(&mut self, special: SpecialType) -> ForeignTypeId {
        if let Some(&id) = self.specials.get(&special) {
            return id;
        }
        let id = self.push(ForeignFact::Special(special));
        self.specials.insert(special, id);
        id
    }

    /// Id of the pointer type to `pointee`, registering it on first use.
    pub fn pointer_to(&mut self, pointee: ForeignTypeId) -> ForeignTypeId {
        if let Some(&id) = self.pointers.get(&pointee) {
            return id;
        }
        let id = self.push(ForeignFact::Pointer(pointee));
        self.pointers.insert(pointee, id);
        id
    }

    pub fn add_named(&mut self, fact: NamedTypeFact) -> ForeignTypeId {
        self.push(ForeignFact::Named(fact))
    }

    /// Add a reference type.
    pub fn add_class(&mut self, namespace: &[&str], name: &str) -> ForeignTypeId {
        self.add_named(NamedTypeFact::new(namespace, name, TypeCategory::Reference))
    }

    /// Add an enumeration deriving from the enumeration base type.
    pub fn add_enum(&mut self, namespace: &[&str], name: &str) -> ForeignTypeId {
        let fact = NamedTypeFact::new(namespace, name, TypeCategory::Value);
        self.add_named(fact.with_base_type(self.enum_base))
    }

    /// Add a value type with the given instance fields.
    pub fn add_struct(
        &mut self,
        namespace: &[&str],
        name: &str,
        fields: &[(&str, ForeignTypeId)],
    ) -> ForeignTypeId {
        let fields = fields
            .iter()
            .map(|&(field, ty)| FieldFact::instance(field, ty))
            .collect();
        let fact = NamedTypeFact::new(namespace, name, TypeCategory::Value);
        self.add_named(fact.with_fields(fields))
    }

    /// Replace the fields of a named type. Used to close recursive graphs
    /// after all participating types have ids.
    ///
    /// Fails with [`TypeMapError::NotANamedType`] for specials and pointers.
    pub fn set_fields(&mut self, id: ForeignTypeId, fields: Vec<FieldFact>) -> Result<()> {
        match self.facts.get_mut(id.index()) {
            Some(ForeignFact::Named(named)) => {
                named.fields = fields;
                Ok(())
            }
            Some(_) => Err(TypeMapError::NotANamedType { id: id.raw() }),
            None => Err(TypeMapError::UnknownTypeId { id: id.raw() }),
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl Default for TypeUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl ForeignTypes for TypeUniverse {
    fn shape(&self, id: ForeignTypeId) -> Option<ForeignShape<'_>> {
        self.facts.get(id.index()).map(|fact| match fact {
            ForeignFact::Special(special) => ForeignShape::Special(*special),
            ForeignFact::Pointer(pointee) => ForeignShape::Pointer(*pointee),
            ForeignFact::Named(named) => ForeignShape::Named(named),
        })
    }

    fn enum_base_type(&self) -> Option<ForeignTypeId> {
        Some(self.enum_base)
    }
}
