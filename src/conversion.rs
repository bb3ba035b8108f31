//! Boundary conversion expressions.
//!
//! Each descriptor crosses the runtime boundary in the form given by
//! [`CppType::as_interop_type`]. These functions build the native-side
//! expressions converting a value to and from that form:
//!
//! | kind                  | to interop                     | from interop                      |
//! |-----------------------|--------------------------------|-----------------------------------|
//! | ClassWrapper          | `v.GetHandle().GetRaw()`       | `Type(ObjectHandle(v))`           |
//! | Enum                  | `::std::uint32_t(v)`           | `Type(v)`                         |
//! | everything else       | `v`                            | `v`                               |
//!
//! For class wrappers and enums the two directions invert each other: the
//! wrapper rebuilt from a raw handle refers to the same managed object, and
//! the enum cast back from `uint32_t` yields the same enumerator.

use oxidize_core::{ConversionExpr, CppType, CppTypeKind, primitives};

use crate::classify::TypeMapper;
use crate::facts::ForeignTypes;

/// Method returning a class wrapper's object handle.
pub const GET_HANDLE: &str = "GetHandle";
/// Method returning an object handle's raw pointer-sized value.
pub const GET_RAW: &str = "GetRaw";

/// Expression converting `value` from its ordinary form to the interop form.
pub fn to_interop(ty: &CppType, value: impl Into<String>) -> ConversionExpr {
    let value = ConversionExpr::value(value);
    match ty.kind() {
        CppTypeKind::ClassWrapper => value.method_call(GET_HANDLE).method_call(GET_RAW),
        CppTypeKind::Enum => {
            ConversionExpr::construct(primitives::UINT32.qualified_type_name(true), value)
        }
        CppTypeKind::Primitive
        | CppTypeKind::BlittableStruct
        | CppTypeKind::NonBlittableStructWrapper
        | CppTypeKind::Unknown => value,
    }
}

/// Expression converting `value` from the interop form back to the ordinary
/// form. `object_handle` is the native handle type wrapping raw pointers.
///
/// Qualifiers on `ty` are not part of the constructed type.
pub fn from_interop(ty: &CppType, object_handle: &str, value: impl Into<String>) -> ConversionExpr {
    let value = ConversionExpr::value(value);
    match ty.kind() {
        CppTypeKind::ClassWrapper => ConversionExpr::construct(
            ty.qualified_type_name(true),
            ConversionExpr::construct(object_handle, value),
        ),
        CppTypeKind::Enum => ConversionExpr::construct(ty.qualified_type_name(true), value),
        CppTypeKind::Primitive
        | CppTypeKind::BlittableStruct
        | CppTypeKind::NonBlittableStructWrapper
        | CppTypeKind::Unknown => value,
    }
}

impl<F: ForeignTypes + ?Sized> TypeMapper<'_, F> {
    /// [`to_interop`] for a descriptor produced by this mapper.
    pub fn to_interop(&self, ty: &CppType, value: impl Into<String>) -> ConversionExpr {
        to_interop(ty, value)
    }

    /// [`from_interop`] using the configured object handle type.
    pub fn from_interop(&self, ty: &CppType, value: impl Into<String>) -> ConversionExpr {
        from_interop(ty, self.config.object_handle(), value)
    }
}
