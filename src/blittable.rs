//! Blittability analysis.
//!
//! A type is blittable when its binary layout is identical on both sides of
//! the boundary. Allow-listed scalars and pointers are blittable, reference
//! types never are, and a value type is blittable iff all of its instance
//! fields are.
//!
//! The field walk keeps the value types on the current field path on an
//! explicit stack. A value type found again on that path is reported as
//! [`TypeMapError::CyclicType`], and a path nested deeper below the checked
//! type than [`MappingConfig::max_field_depth`] is reported as
//! [`TypeMapError::FieldDepthExceeded`].
//!
//! [`MappingConfig::max_field_depth`]: crate::MappingConfig::max_field_depth

use oxidize_core::{Result, TypeMapError};
use rustc_hash::FxHashSet;
use tracing::{trace, warn};

use crate::classify::TypeMapper;
use crate::facts::{ForeignShape, ForeignTypeId, ForeignTypes, NamedTypeFact, TypeCategory};

/// What a single type contributes to the walk.
enum Step<'f> {
    /// Decided without looking at fields.
    Leaf(bool),
    /// A value type whose instance fields decide.
    Struct(&'f NamedTypeFact),
}

/// A value type on the current field path and its unchecked fields.
struct Frame<'f, I> {
    id: ForeignTypeId,
    named: &'f NamedTypeFact,
    fields: I,
}

impl<F: ForeignTypes + ?Sized> TypeMapper<'_, F> {
    /// Check whether a foreign type has identical layout on both sides.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn is_blittable(&self, id: ForeignTypeId) -> Result<bool> {
        let root = match self.step(id)? {
            Step::Leaf(blittable) => return Ok(blittable),
            Step::Struct(named) => named,
        };

        let limit = self.config.max_field_depth();
        let mut visiting = FxHashSet::default();
        visiting.insert(id);
        trace!(name = %root.name, "checking value type fields");

        let mut stack = Vec::new();
        stack.push(Frame {
            id,
            named: root,
            fields: root.instance_fields(),
        });

        while let Some(frame) = stack.last_mut() {
            let Some(field) = frame.fields.next() else {
                trace!(name = %frame.named.name, "all instance fields are blittable");
                visiting.remove(&frame.id);
                stack.pop();
                continue;
            };
            let owner = frame.named;

            let named = match self.step(field.ty)? {
                Step::Leaf(true) => continue,
                Step::Leaf(false) => {
                    trace!(name = %owner.name, field = %field.name, "field is not blittable");
                    trace!(name = %root.name, blittable = false, "value type checked");
                    return Ok(false);
                }
                Step::Struct(named) => named,
            };

            if !visiting.insert(field.ty) {
                return Err(self.cyclic(&stack, field.ty));
            }

            let depth = stack.len();
            if depth > limit {
                return Err(TypeMapError::FieldDepthExceeded {
                    type_name: self.facts.display_name(id),
                    limit,
                });
            }

            trace!(name = %named.name, depth, "checking nested value type");
            stack.push(Frame {
                id: field.ty,
                named,
                fields: named.instance_fields(),
            });
        }

        trace!(name = %root.name, blittable = true, "value type checked");
        Ok(true)
    }

    fn step(&self, id: ForeignTypeId) -> Result<Step<'_>> {
        let named = match self.facts.expect_shape(id)? {
            ForeignShape::Special(special) => return Ok(Step::Leaf(special.is_blittable())),
            ForeignShape::Pointer(_) => return Ok(Step::Leaf(true)),
            ForeignShape::Named(named) => named,
        };

        if named.category == TypeCategory::Reference {
            trace!(name = %named.name, "reference type is not blittable");
            return Ok(Step::Leaf(false));
        }
        Ok(Step::Struct(named))
    }

    fn cyclic<I>(&self, stack: &[Frame<'_, I>], repeated: ForeignTypeId) -> TypeMapError {
        let mut path: Vec<String> = stack
            .iter()
            .map(|frame| self.facts.display_name(frame.id))
            .collect();
        let type_name = self.facts.display_name(repeated);
        path.push(type_name.clone());
        warn!(%type_name, "value type contains itself");
        TypeMapError::CyclicType { type_name, path }
    }
}
