//! Core descriptor model for the Oxidize binding generator.
//!
//! This crate defines [`CppType`], the immutable description of a native
//! type produced when a managed type is mapped across the language
//! boundary, together with its qualifier and usage-context transforms, the
//! canonical built-in descriptors in [`primitives`], and the owned
//! [`ConversionExpr`] tree used for boundary conversions.

mod conversion_expr;
mod cpp_type;
mod error;
mod namespace;
pub mod primitives;

pub use conversion_expr::ConversionExpr;
pub use cpp_type::{CppType, CppTypeFlags, CppTypeKind};
pub use error::{Result, TypeMapError};
pub use namespace::CppNamespace;
