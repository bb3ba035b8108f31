//! Error types for type mapping.
//!
//! Classification of well-formed foreign types, qualifier transforms,
//! conversion generation and include planning never fail. The variants here
//! cover malformed input handed over by the symbol front end.

use thiserror::Error;

/// Errors raised while mapping a foreign type to a native descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeMapError {
    /// A value type contains itself through its instance fields.
    #[error("cyclic value type '{type_name}' (field path: {})", .path.join(" -> "))]
    CyclicType {
        /// The type that was reached a second time.
        type_name: String,
        /// Type names from the outermost struct down to the repeated one.
        path: Vec<String>,
    },

    /// A pointer type whose pointee chain loops back on itself.
    #[error("pointer type '{type_name}' points back at itself")]
    CyclicPointer { type_name: String },

    /// Instance fields nest deeper than the configured bound.
    #[error("field nesting below '{type_name}' exceeds the depth limit of {limit}")]
    FieldDepthExceeded { type_name: String, limit: usize },

    /// The fact store has no entry for the given id.
    #[error("unknown foreign type id #{id}")]
    UnknownTypeId { id: u32 },

    /// Fields were supplied for a fact that is not a named type.
    #[error("foreign type id #{id} is not a named type")]
    NotANamedType { id: u32 },

    /// A descriptor was requested with an empty name.
    #[error("type name must not be empty")]
    EmptyTypeName,
}

/// Result alias for type mapping operations.
pub type Result<T> = std::result::Result<T, TypeMapError>;
