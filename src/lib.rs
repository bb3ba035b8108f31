//! Oxidize type mapping.
//!
//! Maps managed types onto native C++ descriptors for the binding
//! generator. Given facts about a managed type (see [`ForeignTypes`]), the
//! [`TypeMapper`] classifies it into a [`CppType`]; the descriptor then
//! yields qualifier variants for each usage context, boundary conversion
//! expressions, and the forward declarations and includes an emitter needs.
//!
//! # Example
//!
//! ```
//! use oxidize::{
//!     EmissionContext, EmissionRequirements, MappingConfig, SpecialType, TypeMapper, TypeUniverse,
//! };
//!
//! let mut universe = TypeUniverse::new();
//! let int = universe.special(SpecialType::Int32);
//! let player = universe.add_class(&["Game"], "Player");
//! let score = universe.add_struct(&["Game"], "Score", &[("points", int)]);
//!
//! let config = MappingConfig::new().with_base_namespace("DotNet");
//! let mapper = TypeMapper::new(&universe, &config);
//!
//! let player = mapper.classify(player)?;
//! let score = mapper.classify(score)?;
//! assert_eq!(player.as_parameter_type().to_string(), "const ::DotNet::Game::Player&");
//! assert_eq!(mapper.to_interop(&player, "p").to_string(), "p.GetHandle().GetRaw()");
//! assert_eq!(score.as_interop_type(), score);
//!
//! let header = EmissionRequirements::for_types([&player, &score], EmissionContext::Header);
//! assert!(header.includes.is_empty());
//! assert_eq!(header.forward_declarations.len(), 2);
//! # Ok::<(), oxidize::TypeMapError>(())
//! ```

mod blittable;
mod classify;
mod config;
mod conversion;
mod facts;
mod includes;

pub use oxidize_core::{
    ConversionExpr, CppNamespace, CppType, CppTypeFlags, CppTypeKind, Result, TypeMapError,
    primitives,
};

pub use classify::{TypeMapper, special_type};
pub use config::MappingConfig;
pub use conversion::{GET_HANDLE, GET_RAW, from_interop, to_interop};
pub use facts::{
    FieldFact, ForeignShape, ForeignTypeId, ForeignTypes, NamedTypeFact, SpecialType, TypeCategory,
    TypeUniverse,
};
pub use includes::{
    EmissionContext, EmissionRequirements, add_forward_declarations_to, add_header_includes_to,
    add_includes_to, add_source_includes_to, forward_declaration, include_path,
};
