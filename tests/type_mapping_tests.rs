//! End-to-end tests for type mapping.
//!
//! These tests classify managed types from a fact store and check the
//! descriptors, conversions and emission requirements an emitter receives.

use std::collections::HashMap;

use oxidize::{
    ConversionExpr, CppNamespace, CppType, CppTypeKind, EmissionContext, EmissionRequirements,
    FieldFact, ForeignTypeId, MappingConfig, SpecialType, TypeMapError, TypeMapper, TypeUniverse,
    forward_declaration, include_path, primitives,
};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A small game-like universe used by most tests.
struct Fixture {
    universe: TypeUniverse,
    player: ForeignTypeId,
    color: ForeignTypeId,
    pair: ForeignTypeId,
    holder: ForeignTypeId,
}

fn fixture() -> Fixture {
    let mut universe = TypeUniverse::new();
    let int = universe.special(SpecialType::Int32);
    let float = universe.special(SpecialType::Single);
    let object = universe.add_class(&["System"], "Object");
    let player = universe.add_class(&["Game"], "Player");
    let color = universe.add_enum(&["Game"], "Color");
    let pair = universe.add_struct(&["Game"], "Pair", &[("count", int), ("weight", float)]);
    let holder = universe.add_struct(&["Game"], "Holder", &[("target", object)]);
    Fixture {
        universe,
        player,
        color,
        pair,
        holder,
    }
}

// =============================================================================
// Boundary round trips
// =============================================================================

/// A value in a simulated native runtime.
#[derive(Debug, Clone, PartialEq)]
enum SimValue {
    Object { type_name: String, instance: u64 },
    Handle(u64),
    Raw(u64),
    Enumerator { type_name: String, value: u32 },
    UInt32(u32),
}

/// Evaluates conversion expressions the way the generated native code would.
struct SimRuntime<'a> {
    object_handle: &'a str,
    locals: HashMap<String, SimValue>,
}

impl SimRuntime<'_> {
    fn eval(&self, expr: &ConversionExpr) -> SimValue {
        match expr {
            ConversionExpr::Value(name) => self.locals[name].clone(),
            ConversionExpr::MethodCall { receiver, method } => {
                match (self.eval(receiver), method.as_str()) {
                    (SimValue::Object { instance, .. }, "GetHandle") => SimValue::Handle(instance),
                    (SimValue::Handle(handle), "GetRaw") => SimValue::Raw(handle),
                    (value, method) => panic!("cannot call {method}() on {value:?}"),
                }
            }
            ConversionExpr::Construct { type_name, arg } => match self.eval(arg) {
                SimValue::Raw(raw) if type_name == self.object_handle => SimValue::Handle(raw),
                SimValue::Handle(instance) => SimValue::Object {
                    type_name: type_name.clone(),
                    instance,
                },
                SimValue::Enumerator { value, .. } if type_name == "::std::uint32_t" => {
                    SimValue::UInt32(value)
                }
                SimValue::UInt32(value) => SimValue::Enumerator {
                    type_name: type_name.clone(),
                    value,
                },
                value => panic!("cannot construct {type_name} from {value:?}"),
            },
        }
    }
}

fn round_trip(mapper: &TypeMapper<'_, TypeUniverse>, ty: &CppType, value: SimValue) -> SimValue {
    let mut runtime = SimRuntime {
        object_handle: mapper.config().object_handle(),
        locals: HashMap::from([("value".to_string(), value)]),
    };
    let interop = runtime.eval(&mapper.to_interop(ty, "value"));
    runtime.locals.insert("raw".to_string(), interop);
    runtime.eval(&mapper.from_interop(ty, "raw"))
}

#[test]
fn class_wrapper_round_trip_keeps_instance() {
    init_tracing();
    let fx = fixture();
    let config = MappingConfig::new().with_base_namespace("DotNet");
    let mapper = TypeMapper::new(&fx.universe, &config);
    let player = mapper.classify(fx.player).unwrap();

    for instance in [1, 42, u64::MAX] {
        let value = SimValue::Object {
            type_name: player.qualified_type_name(true),
            instance,
        };
        assert_eq!(round_trip(&mapper, &player, value.clone()), value);
    }
}

#[test]
fn enum_round_trip_keeps_enumerator() {
    let fx = fixture();
    let config = MappingConfig::default();
    let mapper = TypeMapper::new(&fx.universe, &config);
    let color = mapper.classify(fx.color).unwrap();

    for value in [0, 1, 7, u32::MAX] {
        let enumerator = SimValue::Enumerator {
            type_name: "::Game::Color".to_string(),
            value,
        };
        assert_eq!(round_trip(&mapper, &color, enumerator.clone()), enumerator);
    }
}

#[test]
fn round_trip_holds_for_parameter_form() {
    let fx = fixture();
    let config = MappingConfig::default();
    let mapper = TypeMapper::new(&fx.universe, &config);
    let param = mapper.classify(fx.player).unwrap().as_parameter_type();

    let value = SimValue::Object {
        type_name: "::Game::Player".to_string(),
        instance: 9,
    };
    assert_eq!(round_trip(&mapper, &param, value.clone()), value);
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn blittability_decides_struct_kind() {
    let fx = fixture();
    let config = MappingConfig::default();
    let mapper = TypeMapper::new(&fx.universe, &config);

    let pair = mapper.classify(fx.pair).unwrap();
    let holder = mapper.classify(fx.holder).unwrap();
    assert_eq!(pair.kind(), CppTypeKind::BlittableStruct);
    assert_eq!(holder.kind(), CppTypeKind::NonBlittableStructWrapper);
}

#[test]
fn doubled_namespace_drops_one_segment() {
    let mut universe = TypeUniverse::new();
    let id = universe.add_class(&["Foo", "Foo", "Bar"], "Baz");
    let config = MappingConfig::default();
    let ty = TypeMapper::new(&universe, &config).classify(id).unwrap();
    assert_eq!(ty.namespace(), &CppNamespace::named(["Foo", "Bar"]));
}

#[test]
fn cyclic_struct_is_an_error_not_a_crash() {
    init_tracing();
    let mut universe = TypeUniverse::new();
    let node = universe.add_struct(&["Graph"], "Node", &[]);
    let edge = universe.add_struct(&["Graph"], "Edge", &[("to", node)]);
    universe
        .set_fields(node, vec![FieldFact::instance("first", edge)])
        .unwrap();

    let config = MappingConfig::default();
    let mapper = TypeMapper::new(&universe, &config);
    let err = mapper.classify(edge).unwrap_err();
    assert_eq!(
        err,
        TypeMapError::CyclicType {
            type_name: "Graph.Edge".to_string(),
            path: vec![
                "Graph.Edge".to_string(),
                "Graph.Node".to_string(),
                "Graph.Edge".to_string(),
            ],
        }
    );
}

#[test]
fn deep_facts_classify_without_exhausting_the_stack() {
    init_tracing();
    let mut universe = TypeUniverse::new();
    let int = universe.special(SpecialType::Int32);
    let mut link = universe.add_struct(&["Chain"], "Link", &[("v", int)]);
    for _ in 0..50_000 {
        link = universe.add_struct(&["Chain"], "Link", &[("next", link)]);
    }
    let mut pointer = link;
    for _ in 0..50_000 {
        pointer = universe.pointer_to(pointer);
    }

    let unbounded = MappingConfig::new().with_max_field_depth(usize::MAX);
    let mapper = TypeMapper::new(&universe, &unbounded);
    let ty = mapper.classify(pointer).unwrap();
    assert_eq!(ty.kind(), CppTypeKind::BlittableStruct);
    assert_eq!(ty.fully_qualified_name(true), "::Chain::Link*");

    let config = MappingConfig::default();
    let result = TypeMapper::new(&universe, &config).classify(pointer);
    assert_eq!(
        result,
        Err(TypeMapError::FieldDepthExceeded {
            type_name: "Chain.Link".to_string(),
            limit: MappingConfig::DEFAULT_MAX_FIELD_DEPTH,
        })
    );
}

// =============================================================================
// Usage contexts
// =============================================================================

#[test]
fn interop_representatives() {
    let fx = fixture();
    let config = MappingConfig::default();
    let mapper = TypeMapper::new(&fx.universe, &config);

    let color = mapper.classify(fx.color).unwrap();
    let pair = mapper.classify(fx.pair).unwrap();
    let player = mapper.classify(fx.player).unwrap();

    assert_eq!(color.as_interop_type(), primitives::UINT32);
    assert_eq!(pair.as_interop_type(), pair);
    assert_eq!(player.as_interop_type(), primitives::VOID_POINTER);
    assert_eq!(player.as_interop_type().fully_qualified_name(true), "void*");
}

#[test]
fn wrapped_method_signature() {
    let fx = fixture();
    let config = MappingConfig::new().with_base_namespace("DotNet");
    let mapper = TypeMapper::new(&fx.universe, &config);

    let player = mapper.classify(fx.player).unwrap();
    let color = mapper.classify(fx.color).unwrap();
    let pair = mapper.classify(fx.pair).unwrap();

    assert_eq!(
        player.as_return_type().to_string(),
        "::DotNet::Game::Player"
    );
    assert_eq!(
        color.as_parameter_type().to_string(),
        "::DotNet::Game::Color"
    );
    assert_eq!(
        pair.as_parameter_type().to_string(),
        "const ::DotNet::Game::Pair&"
    );
    assert_eq!(
        primitives::INT32.as_parameter_type().to_string(),
        "::std::int32_t"
    );
}

// =============================================================================
// Emission requirements
// =============================================================================

#[test]
fn header_override_in_both_contexts() {
    let ns = CppNamespace::named(["Ns"]);
    let ty = CppType::new(CppTypeKind::ClassWrapper, ns, "Thing")
        .unwrap()
        .with_header_override("Thing.h");

    assert!(!ty.can_be_forward_declared());
    assert_eq!(forward_declaration(&ty), None);
    for context in [EmissionContext::Header, EmissionContext::Source] {
        let plan = EmissionRequirements::plan(&ty, context);
        let includes: Vec<_> = plan.includes.iter().collect();
        assert_eq!(includes, vec!["\"Thing.h\""]);
        assert!(plan.forward_declarations.is_empty());
    }
}

#[test]
fn class_wrapper_forward_declared_in_header_included_in_source() {
    let ns = CppNamespace::named(["Ns"]);
    let ty = CppType::new(CppTypeKind::ClassWrapper, ns, "Name").unwrap();

    let header = EmissionRequirements::plan(&ty, EmissionContext::Header);
    assert_eq!(
        header.forward_declarations.iter().collect::<Vec<_>>(),
        vec!["namespace Ns { class Name; }"]
    );
    assert!(header.includes.is_empty());

    let source = EmissionRequirements::plan(&ty, EmissionContext::Source);
    let includes: Vec<_> = source.includes.iter().collect();
    assert_eq!(includes, vec!["<Ns/Name.h>"]);
    assert_eq!(include_path(&ty).as_deref(), Some("<Ns/Name.h>"));
}

#[test]
fn whole_signature_plan_from_classified_types() {
    let mut fx = fixture();
    let int64 = fx.universe.special(SpecialType::Int64);
    let config = MappingConfig::new().with_base_namespace("DotNet");
    let mapper = TypeMapper::new(&fx.universe, &config);

    let signature: Vec<CppType> = [fx.player, fx.color, fx.pair, int64]
        .into_iter()
        .map(|id| mapper.classify(id).map(|ty| ty.as_parameter_type()))
        .collect::<Result<_, _>>()
        .unwrap();

    let header = EmissionRequirements::for_types(&signature, EmissionContext::Header);
    assert_eq!(
        header.forward_declarations.into_iter().collect::<Vec<_>>(),
        vec![
            "namespace DotNet::Game { class Player; }".to_string(),
            "namespace DotNet::Game { enum class Color; }".to_string(),
            "namespace DotNet::Game { struct Pair; }".to_string(),
        ]
    );
    let includes: Vec<_> = header.includes.into_iter().collect();
    assert_eq!(includes, vec!["<cstdint>".to_string()]);

    let source = EmissionRequirements::for_types(&signature, EmissionContext::Source);
    assert_eq!(
        source.includes.into_iter().collect::<Vec<_>>(),
        vec![
            "<DotNet/Game/Color.h>".to_string(),
            "<DotNet/Game/Pair.h>".to_string(),
            "<DotNet/Game/Player.h>".to_string(),
            "<cstdint>".to_string(),
        ]
    );
}
