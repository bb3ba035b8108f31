//! Owned expression tree for boundary conversions.
//!
//! Conversions between a native value and its interop representation are
//! built from three shapes: a named value, a nullary method call on an
//! expression, and a functional-style construction or cast `Type(expr)`.
//! Keeping them structured lets callers inspect a conversion (for example
//! to skip identity conversions) before rendering it with `Display`.
//!
//! # Example
//!
//! ```
//! use oxidize_core::ConversionExpr;
//!
//! let raw = ConversionExpr::value("player")
//!     .method_call("GetHandle")
//!     .method_call("GetRaw");
//! assert_eq!(raw.to_string(), "player.GetHandle().GetRaw()");
//!
//! let cast = ConversionExpr::construct("::std::uint32_t", ConversionExpr::value("color"));
//! assert_eq!(cast.to_string(), "::std::uint32_t(color)");
//! ```

use std::fmt;

/// A native-side conversion expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConversionExpr {
    /// A variable or other opaque expression, emitted verbatim.
    Value(String),

    /// Nullary method call: `receiver.method()`
    MethodCall {
        /// The expression the method is called on
        receiver: Box<ConversionExpr>,
        /// The method name
        method: String,
    },

    /// Construction or functional cast: `type_name(arg)`
    Construct {
        /// Fully-qualified name of the constructed type
        type_name: String,
        /// The single constructor argument
        arg: Box<ConversionExpr>,
    },
}

impl ConversionExpr {
    /// Create a verbatim value expression.
    pub fn value(name: impl Into<String>) -> Self {
        ConversionExpr::Value(name.into())
    }

    /// Create a construction of `type_name` from `arg`.
    pub fn construct(type_name: impl Into<String>, arg: ConversionExpr) -> Self {
        ConversionExpr::Construct {
            type_name: type_name.into(),
            arg: Box::new(arg),
        }
    }

    /// Call a nullary method on this expression.
    pub fn method_call(self, method: impl Into<String>) -> Self {
        ConversionExpr::MethodCall {
            receiver: Box::new(self),
            method: method.into(),
        }
    }

    /// Check if this expression passes its value through untouched.
    pub fn is_identity(&self) -> bool {
        matches!(self, ConversionExpr::Value(_))
    }
}

impl fmt::Display for ConversionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionExpr::Value(name) => write!(f, "{name}"),
            ConversionExpr::MethodCall { receiver, method } => write!(f, "{receiver}.{method}()"),
            ConversionExpr::Construct { type_name, arg } => write!(f, "{type_name}({arg})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_identity() {
        let expr = ConversionExpr::value("x");
        assert!(expr.is_identity());
        assert_eq!(expr.to_string(), "x");
    }

    #[test]
    fn nested_construct_renders_inside_out() {
        let expr = ConversionExpr::construct(
            "::Game::Player",
            ConversionExpr::construct("::Reinterop::ObjectHandle", ConversionExpr::value("raw")),
        );
        assert!(!expr.is_identity());
        assert_eq!(
            expr.to_string(),
            "::Game::Player(::Reinterop::ObjectHandle(raw))"
        );
    }

    #[test]
    fn method_chain_renders_left_to_right() {
        let expr = ConversionExpr::value("obj")
            .method_call("A")
            .method_call("B");
        assert!(!expr.is_identity());
        assert_eq!(expr.to_string(), "obj.A().B()");
    }
}
