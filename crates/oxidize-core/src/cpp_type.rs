//! CppType - an immutable descriptor of a native type.
//!
//! A `CppType` records how a managed type is represented on the native side:
//! its representation kind, namespace, name, qualifiers and an optional
//! header that must be included verbatim. Every transform returns a new
//! descriptor; nothing is mutated after construction.
//!
//! # Example
//!
//! ```
//! use oxidize_core::{CppNamespace, CppType, CppTypeKind};
//!
//! let player = CppType::new(
//!     CppTypeKind::ClassWrapper,
//!     CppNamespace::named(["Game"]),
//!     "Player",
//! )
//! .unwrap();
//!
//! assert_eq!(player.fully_qualified_name(true), "::Game::Player");
//! assert_eq!(player.as_parameter_type().fully_qualified_name(true), "const ::Game::Player&");
//! assert_eq!(player.as_pointer().fully_qualified_name(false), "Game::Player*");
//! ```

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;

use crate::error::{Result, TypeMapError};
use crate::namespace::CppNamespace;
use crate::primitives;

bitflags! {
    /// Qualifiers applied to a native type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CppTypeFlags: u8 {
        /// `T*`
        const POINTER = 1;
        /// `T&`
        const REFERENCE = 2;
        /// `const T`
        const CONST = 4;
    }
}

/// Representation strategy chosen for a managed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CppTypeKind {
    /// A built-in scalar with a fixed native spelling.
    Primitive,
    /// A managed enumeration, emitted as an `enum class`.
    Enum,
    /// A managed reference type, wrapped around an object handle.
    ClassWrapper,
    /// A value type with identical layout on both sides.
    BlittableStruct,
    /// A value type that needs a wrapper to cross the boundary.
    NonBlittableStructWrapper,
    /// Anything the classifier could not place.
    Unknown,
}

impl CppTypeKind {
    /// Keyword used when forward declaring a type of this kind.
    pub const fn declaration_keyword(self) -> &'static str {
        match self {
            CppTypeKind::BlittableStruct | CppTypeKind::NonBlittableStructWrapper => "struct",
            CppTypeKind::Enum => "enum class",
            CppTypeKind::Primitive | CppTypeKind::ClassWrapper | CppTypeKind::Unknown => "class",
        }
    }

    /// Whether parameters of this kind are passed by const reference.
    pub const fn passes_by_const_reference(self) -> bool {
        matches!(
            self,
            CppTypeKind::ClassWrapper
                | CppTypeKind::BlittableStruct
                | CppTypeKind::NonBlittableStructWrapper
        )
    }
}

impl fmt::Display for CppTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CppTypeKind::Primitive => "primitive",
            CppTypeKind::Enum => "enum",
            CppTypeKind::ClassWrapper => "class wrapper",
            CppTypeKind::BlittableStruct => "blittable struct",
            CppTypeKind::NonBlittableStructWrapper => "non-blittable struct wrapper",
            CppTypeKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Immutable descriptor of a native type.
///
/// Two classifications of the same managed type produce equal descriptors;
/// there is no interning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CppType {
    kind: CppTypeKind,
    namespace: CppNamespace,
    name: Cow<'static, str>,
    generic_arguments: Option<Vec<CppType>>,
    flags: CppTypeFlags,
    header_override: Option<Cow<'static, str>>,
}

impl CppType {
    /// Create an unqualified descriptor.
    ///
    /// Fails with [`TypeMapError::EmptyTypeName`] if `name` is empty.
    pub fn new(
        kind: CppTypeKind,
        namespace: CppNamespace,
        name: impl Into<Cow<'static, str>>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeMapError::EmptyTypeName);
        }
        Ok(Self {
            kind,
            namespace,
            name,
            generic_arguments: None,
            flags: CppTypeFlags::empty(),
            header_override: None,
        })
    }

    /// Descriptor for a canonical built-in type. `header` must already be
    /// bracketed or quoted.
    pub(crate) const fn primitive(
        namespace: CppNamespace,
        name: &'static str,
        flags: CppTypeFlags,
        header: Option<&'static str>,
    ) -> Self {
        let header_override = match header {
            Some(header) => Some(Cow::Borrowed(header)),
            None => None,
        };
        Self {
            kind: CppTypeKind::Primitive,
            namespace,
            name: Cow::Borrowed(name),
            generic_arguments: None,
            flags,
            header_override,
        }
    }

    /// Return a copy carrying the given generic arguments.
    ///
    /// The arguments are stored only; naming and include planning ignore them.
    pub fn with_generic_arguments(&self, arguments: Vec<CppType>) -> Self {
        Self {
            generic_arguments: Some(arguments),
            ..self.clone()
        }
    }

    /// Return a copy that must be declared by including `header`.
    ///
    /// A header not already wrapped in `<...>` or `"..."` is wrapped in quotes.
    pub fn with_header_override(&self, header: impl Into<Cow<'static, str>>) -> Self {
        let header = header.into();
        let header = if header.starts_with('<') || header.starts_with('"') {
            header
        } else {
            Cow::Owned(format!("\"{header}\""))
        };
        Self {
            header_override: Some(header),
            ..self.clone()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn kind(&self) -> CppTypeKind {
        self.kind
    }

    pub fn namespace(&self) -> &CppNamespace {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generic_arguments(&self) -> Option<&[CppType]> {
        self.generic_arguments.as_deref()
    }

    pub fn flags(&self) -> CppTypeFlags {
        self.flags
    }

    /// The normalized header override, including its brackets or quotes.
    pub fn header_override(&self) -> Option<&str> {
        self.header_override.as_deref()
    }

    pub fn is_pointer(&self) -> bool {
        self.flags.contains(CppTypeFlags::POINTER)
    }

    pub fn is_reference(&self) -> bool {
        self.flags.contains(CppTypeFlags::REFERENCE)
    }

    pub fn is_const(&self) -> bool {
        self.flags.contains(CppTypeFlags::CONST)
    }

    /// Whether a forward declaration can stand in for the full definition.
    ///
    /// Types with a header override must always be included.
    pub fn can_be_forward_declared(&self) -> bool {
        self.header_override.is_none()
    }

    // =========================================================================
    // Naming
    // =========================================================================

    /// The namespace joined with `::`, optionally prefixed with the global
    /// scope marker. Empty for the global namespace.
    pub fn fully_qualified_namespace(&self, start_with_global: bool) -> String {
        let ns = self.namespace.to_string();
        if start_with_global && !ns.is_empty() {
            format!("::{ns}")
        } else {
            ns
        }
    }

    /// The namespace-qualified name without any qualifiers.
    pub fn qualified_type_name(&self, start_with_global: bool) -> String {
        let ns = self.fully_qualified_namespace(start_with_global);
        if ns.is_empty() {
            self.name.to_string()
        } else {
            format!("{ns}::{}", self.name)
        }
    }

    /// The full spelling, e.g. `const ::Game::Player&`.
    ///
    /// A pointer qualifier takes precedence over a reference qualifier.
    pub fn fully_qualified_name(&self, start_with_global: bool) -> String {
        let modifier = if self.is_const() { "const " } else { "" };
        let suffix = if self.is_pointer() {
            "*"
        } else if self.is_reference() {
            "&"
        } else {
            ""
        };
        format!(
            "{modifier}{}{suffix}",
            self.qualified_type_name(start_with_global)
        )
    }

    // =========================================================================
    // Qualifier transforms
    // =========================================================================

    fn with_flags(&self, flags: CppTypeFlags) -> Self {
        Self {
            flags,
            ..self.clone()
        }
    }

    /// Pointer variant. Reference and const qualifiers are left as they are.
    pub fn as_pointer(&self) -> Self {
        self.with_flags(self.flags | CppTypeFlags::POINTER)
    }

    /// Const reference variant. Clears the pointer qualifier.
    pub fn as_const_reference(&self) -> Self {
        self.with_flags(
            (self.flags | CppTypeFlags::CONST | CppTypeFlags::REFERENCE)
                .difference(CppTypeFlags::POINTER),
        )
    }

    // =========================================================================
    // Usage contexts
    // =========================================================================

    /// Form used as the return type of a wrapped operation.
    ///
    /// Every kind is returned by value.
    pub fn as_return_type(&self) -> Self {
        self.clone()
    }

    /// Form used as a wrapped operation's parameter. Classes and structs are
    /// taken by const reference, everything else by value.
    pub fn as_parameter_type(&self) -> Self {
        if self.kind.passes_by_const_reference() {
            self.as_const_reference()
        } else {
            self.clone()
        }
    }

    /// Form used when the value crosses the runtime boundary through a raw
    /// call thunk.
    ///
    /// | kind                                          | interop form    |
    /// |-----------------------------------------------|-----------------|
    /// | Primitive, BlittableStruct                    | itself          |
    /// | Enum                                          | `std::uint32_t` |
    /// | ClassWrapper, NonBlittableStructWrapper, Unknown | `void*`      |
    pub fn as_interop_type(&self) -> Self {
        match self.kind {
            CppTypeKind::Primitive | CppTypeKind::BlittableStruct => self.clone(),
            CppTypeKind::Enum => primitives::UINT32,
            CppTypeKind::ClassWrapper
            | CppTypeKind::NonBlittableStructWrapper
            | CppTypeKind::Unknown => primitives::VOID_POINTER,
        }
    }
}

impl fmt::Display for CppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name(true))
    }
}
