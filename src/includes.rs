//! Include and forward-declaration planning.
//!
//! Generated headers should pull in as little as possible, so a type used
//! in a header is forward declared whenever it can be. Generated sources
//! need full definitions and always include the type's header.
//!
//! - A type with a header override is always included verbatim and never
//!   forward declared.
//! - Primitives need no declaration; a primitive in the standard namespace
//!   pulls in `<cstdint>`.
//! - Every other type is declared as `namespace Ns { class Name; }` and
//!   lives in `<Ns/Name.h>`.
//!
//! Generic arguments are not walked.

use std::collections::BTreeSet;

use oxidize_core::{CppType, CppTypeKind, primitives};

/// The kind of file a type is being emitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmissionContext {
    Header,
    Source,
}

/// Forward declaration text, or `None` if the type is a primitive or must
/// be included.
pub fn forward_declaration(ty: &CppType) -> Option<String> {
    if ty.kind() == CppTypeKind::Primitive || !ty.can_be_forward_declared() {
        return None;
    }

    let keyword = ty.kind().declaration_keyword();
    let ns = ty.fully_qualified_namespace(false);
    if ns.is_empty() {
        Some(format!("{keyword} {};", ty.name()))
    } else {
        Some(format!("namespace {ns} {{ {keyword} {}; }}", ty.name()))
    }
}

/// Include that provides the full definition of `ty`, if any.
///
/// This is the header override when present; otherwise `<cstdint>` for
/// standard primitives, nothing for other primitives, and the path derived
/// from the namespace and name for everything else.
pub fn include_path(ty: &CppType) -> Option<String> {
    if let Some(header) = ty.header_override() {
        return Some(header.to_string());
    }

    if ty.kind() == CppTypeKind::Primitive {
        return ty
            .namespace()
            .is_standard()
            .then(|| primitives::INCLUDE_CSTDINT.to_string());
    }

    let path = ty.namespace().join("/");
    if path.is_empty() {
        Some(format!("<{}.h>", ty.name()))
    } else {
        Some(format!("<{path}/{}.h>", ty.name()))
    }
}

/// Add the forward declaration of `ty`, if it has one.
pub fn add_forward_declarations_to(ty: &CppType, declarations: &mut BTreeSet<String>) {
    if let Some(declaration) = forward_declaration(ty) {
        declarations.insert(declaration);
    }
}

/// Add the includes `ty` needs when emitted into `context`.
///
/// In a header, forward-declarable types contribute no include.
pub fn add_includes_to(ty: &CppType, context: EmissionContext, includes: &mut BTreeSet<String>) {
    let forward_declared = context == EmissionContext::Header
        && ty.kind() != CppTypeKind::Primitive
        && ty.can_be_forward_declared();
    if forward_declared {
        return;
    }
    if let Some(include) = include_path(ty) {
        includes.insert(include);
    }
}

/// Add the includes `ty` needs in a generated header.
pub fn add_header_includes_to(ty: &CppType, includes: &mut BTreeSet<String>) {
    add_includes_to(ty, EmissionContext::Header, includes);
}

/// Add the includes `ty` needs in a generated source file.
pub fn add_source_includes_to(ty: &CppType, includes: &mut BTreeSet<String>) {
    add_includes_to(ty, EmissionContext::Source, includes);
}

/// Declarations and includes collected for one emitted file.
///
/// Both sets are ordered so emitted text is deterministic.
///
/// # Example
///
/// ```
/// use oxidize::{CppNamespace, CppType, CppTypeKind, EmissionContext, EmissionRequirements};
///
/// let player = CppType::new(CppTypeKind::ClassWrapper, CppNamespace::named(["Game"]), "Player")
///     .unwrap();
///
/// let header = EmissionRequirements::plan(&player, EmissionContext::Header);
/// assert!(header.forward_declarations.contains("namespace Game { class Player; }"));
/// assert!(header.includes.is_empty());
///
/// let source = EmissionRequirements::plan(&player, EmissionContext::Source);
/// assert!(source.includes.contains("<Game/Player.h>"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionRequirements {
    pub forward_declarations: BTreeSet<String>,
    pub includes: BTreeSet<String>,
}

impl EmissionRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requirements of a single type.
    pub fn plan(ty: &CppType, context: EmissionContext) -> Self {
        let mut requirements = Self::new();
        requirements.require(ty, context);
        requirements
    }

    /// Requirements of every type in `types`, e.g. a whole signature.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn for_types<'a, I>(types: I, context: EmissionContext) -> Self
    where
        I: IntoIterator<Item = &'a CppType>,
    {
        let mut requirements = Self::new();
        for ty in types {
            requirements.require(ty, context);
        }
        requirements
    }

    /// Record what `ty` needs when emitted into `context`.
    pub fn require(&mut self, ty: &CppType, context: EmissionContext) {
        if context == EmissionContext::Header {
            add_forward_declarations_to(ty, &mut self.forward_declarations);
        }
        add_includes_to(ty, context, &mut self.includes);
    }

    pub fn merge(&mut self, other: EmissionRequirements) {
        self.forward_declarations.extend(other.forward_declarations);
        self.includes.extend(other.includes);
    }

    pub fn is_empty(&self) -> bool {
        self.forward_declarations.is_empty() && self.includes.is_empty()
    }
}
