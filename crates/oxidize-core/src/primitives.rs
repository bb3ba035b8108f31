//! Canonical descriptors for built-in native types.
//!
//! Fixed-width integers live in `std` and come from `<cstdint>`; `bool`,
//! `float`, `double` and `void` need no header. `std::nullptr_t` comes from
//! `<cstddef>`.

use crate::cpp_type::{CppType, CppTypeFlags};
use crate::namespace::CppNamespace;

/// Header declaring the fixed-width integer types.
pub const INCLUDE_CSTDINT: &str = "<cstdint>";
/// Header declaring `std::nullptr_t`.
pub const INCLUDE_CSTDDEF: &str = "<cstddef>";

const fn standard(name: &'static str, header: &'static str) -> CppType {
    CppType::primitive(
        CppNamespace::Standard,
        name,
        CppTypeFlags::empty(),
        Some(header),
    )
}

const fn builtin(name: &'static str, flags: CppTypeFlags) -> CppType {
    CppType::primitive(CppNamespace::None, name, flags, None)
}

pub const INT8: CppType = standard("int8_t", INCLUDE_CSTDINT);
pub const INT16: CppType = standard("int16_t", INCLUDE_CSTDINT);
pub const INT32: CppType = standard("int32_t", INCLUDE_CSTDINT);
pub const INT64: CppType = standard("int64_t", INCLUDE_CSTDINT);
pub const UINT8: CppType = standard("uint8_t", INCLUDE_CSTDINT);
pub const UINT16: CppType = standard("uint16_t", INCLUDE_CSTDINT);
pub const UINT32: CppType = standard("uint32_t", INCLUDE_CSTDINT);
pub const UINT64: CppType = standard("uint64_t", INCLUDE_CSTDINT);
pub const BOOL: CppType = builtin("bool", CppTypeFlags::empty());
pub const FLOAT: CppType = builtin("float", CppTypeFlags::empty());
pub const DOUBLE: CppType = builtin("double", CppTypeFlags::empty());
/// Opaque pointer-sized handle, `void*`.
pub const VOID_POINTER: CppType = builtin("void", CppTypeFlags::POINTER);
pub const VOID: CppType = builtin("void", CppTypeFlags::empty());
pub const NULL_POINTER: CppType = standard("nullptr_t", INCLUDE_CSTDDEF);
