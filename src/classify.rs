//! Type classifier.
//!
//! Maps a foreign type fact onto a [`CppType`]. Special built-ins resolve to
//! the canonical descriptors in [`primitives`], pointer types follow their
//! pointee chain down to a non-pointer type and add the pointer qualifier,
//! and every other named type gets a namespace path and one of the
//! representation kinds:
//!
//! 1. `Enum` if its base type is the enumeration base type
//! 2. `ClassWrapper` if it is a reference type
//! 3. `BlittableStruct` if it is a blittable value type
//! 4. `NonBlittableStructWrapper` otherwise
//!
//! Generic arguments are not carried onto the descriptor yet.

use oxidize_core::{CppNamespace, CppType, CppTypeKind, Result, TypeMapError, primitives};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::config::MappingConfig;
use crate::facts::{
    ForeignShape, ForeignTypeId, ForeignTypes, NamedTypeFact, SpecialType, TypeCategory,
};

/// Maps foreign types from one fact store using one configuration.
///
/// Holds no state between calls: each classification builds a fresh
/// descriptor.
pub struct TypeMapper<'a, F: ForeignTypes + ?Sized> {
    pub(crate) facts: &'a F,
    pub(crate) config: &'a MappingConfig,
}

impl<'a, F: ForeignTypes + ?Sized> TypeMapper<'a, F> {
    pub fn new(facts: &'a F, config: &'a MappingConfig) -> Self {
        Self { facts, config }
    }

    pub fn facts(&self) -> &'a F {
        self.facts
    }

    pub fn config(&self) -> &'a MappingConfig {
        self.config
    }

    /// Classify a foreign type into a native descriptor.
    ///
    /// Fails only on malformed facts: unknown ids, empty names, pointer
    /// cycles, value types that contain themselves, and value types nested
    /// deeper than [`MappingConfig::max_field_depth`].
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn classify(&self, id: ForeignTypeId) -> Result<CppType> {
        let mut pointers = FxHashSet::default();
        let mut current = id;
        let pointee = loop {
            match self.facts.expect_shape(current)? {
                ForeignShape::Special(special) => break special_type(special),
                ForeignShape::Named(named) => break self.classify_named(current, named)?,
                ForeignShape::Pointer(next) => {
                    if !pointers.insert(current) {
                        return Err(TypeMapError::CyclicPointer {
                            type_name: self.facts.display_name(current),
                        });
                    }
                    current = next;
                }
            }
        };

        if pointers.is_empty() {
            return Ok(pointee);
        }
        // Every level of indirection shares the one pointer qualifier.
        trace!(levels = pointers.len(), "followed pointer chain");
        Ok(pointee.as_pointer())
    }

    fn classify_named(&self, id: ForeignTypeId, named: &NamedTypeFact) -> Result<CppType> {
        let kind = if self.is_enum(named) {
            CppTypeKind::Enum
        } else if named.category == TypeCategory::Reference {
            CppTypeKind::ClassWrapper
        } else if self.is_blittable(id)? {
            CppTypeKind::BlittableStruct
        } else {
            CppTypeKind::NonBlittableStructWrapper
        };

        let namespace = self.namespace_of(named);
        debug!(name = %named.name, %kind, %namespace, "classified named type");
        CppType::new(kind, namespace, named.name.clone())
    }

    fn is_enum(&self, named: &NamedTypeFact) -> bool {
        named.base_type.is_some() && named.base_type == self.facts.enum_base_type()
    }

    /// Native namespace for a named type.
    ///
    /// The containing namespaces are collected innermost first, the base
    /// namespace is appended, and the list is reversed. If the two leading
    /// segments are then identical, the first is dropped so the base
    /// namespace does not double up (`Oxidize::Oxidize`). Only one segment
    /// is ever dropped.
    pub fn namespace_of(&self, named: &NamedTypeFact) -> CppNamespace {
        let mut segments: Vec<String> = named
            .containing_namespaces()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        if !self.config.base_namespace().is_empty() {
            segments.push(self.config.base_namespace().to_string());
        }

        segments.reverse();

        if segments.len() >= 2 && segments[0] == segments[1] {
            segments.remove(0);
        }

        CppNamespace::named(segments)
    }
}

/// Canonical descriptor of a special built-in type.
pub fn special_type(special: SpecialType) -> CppType {
    match special {
        SpecialType::SByte => primitives::INT8,
        SpecialType::Int16 => primitives::INT16,
        SpecialType::Int32 => primitives::INT32,
        SpecialType::Int64 => primitives::INT64,
        SpecialType::Byte => primitives::UINT8,
        SpecialType::UInt16 => primitives::UINT16,
        SpecialType::UInt32 => primitives::UINT32,
        SpecialType::UInt64 => primitives::UINT64,
        SpecialType::Single => primitives::FLOAT,
        SpecialType::Double => primitives::DOUBLE,
        SpecialType::Boolean => primitives::BOOL,
        SpecialType::IntPtr | SpecialType::UIntPtr => primitives::VOID_POINTER,
        SpecialType::Void => primitives::VOID,
        SpecialType::NullPointer => primitives::NULL_POINTER,
    }
}
