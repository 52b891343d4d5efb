// End-to-end binding scenarios against the graphics fixture

use pretty_assertions::assert_eq;

use structbind::binding::bind_units;
use structbind::catalog::decl::{
    Declaration, Field, FunctionDecl, Param, StructDecl, TranslationUnit, TypeRef,
};
use structbind::config::BinderConfig;

fn ty(name: &str) -> TypeRef {
    TypeRef::new(name)
}

fn ptr(name: &str) -> TypeRef {
    TypeRef::new(name).with_pointer()
}

fn const_ptr(name: &str) -> TypeRef {
    TypeRef::new(name).with_const().with_pointer()
}

fn struct_decl(name: &str, fields: &[(&str, TypeRef)]) -> Declaration {
    Declaration::Struct(StructDecl {
        name: name.to_string(),
        fields: fields
            .iter()
            .map(|(field_name, field_ty)| Field::new(*field_name, field_ty.clone()))
            .collect(),
    })
}

fn func(name: &str, return_type: TypeRef, params: &[(&str, TypeRef)]) -> Declaration {
    Declaration::Function(FunctionDecl {
        name: name.to_string(),
        return_type,
        params: params
            .iter()
            .map(|(param_name, param_ty)| Param::new(*param_name, param_ty.clone()))
            .collect(),
    })
}

/// The graphics fixture: two structs, seven methods, four utility functions
fn graphics_unit() -> TranslationUnit {
    TranslationUnit::with_declarations(
        "graphics.c",
        vec![
            struct_decl("Point", &[("x", ty("int")), ("y", ty("int"))]),
            struct_decl(
                "Rectangle",
                &[("top_left", ty("Point")), ("bottom_right", ty("Point"))],
            ),
            func(
                "point_move",
                ty("void"),
                &[("p", ptr("Point")), ("dx", ty("int")), ("dy", ty("int"))],
            ),
            func("point_print", ty("void"), &[("p", const_ptr("Point"))]),
            func(
                "point_distance_squared",
                ty("int"),
                &[("a", const_ptr("Point")), ("b", const_ptr("Point"))],
            ),
            func(
                "point_create",
                ty("Point"),
                &[("x", ty("int")), ("y", ty("int"))],
            ),
            func(
                "rect_init",
                ty("void"),
                &[
                    ("r", ptr("Rectangle")),
                    ("x1", ty("int")),
                    ("y1", ty("int")),
                    ("x2", ty("int")),
                    ("y2", ty("int")),
                ],
            ),
            func("rect_area", ty("int"), &[("r", const_ptr("Rectangle"))]),
            func("rect_print", ty("void"), &[("r", const_ptr("Rectangle"))]),
            func("max", ty("int"), &[("a", ty("int")), ("b", ty("int"))]),
            func("min", ty("int"), &[("a", ty("int")), ("b", ty("int"))]),
            func("init_graphics", ty("void"), &[]),
            func("cleanup_resources", ty("void"), &[]),
        ],
    )
}

#[test]
fn test_graphics_fixture_binds_as_expected() {
    let outcome = bind_units(vec![graphics_unit()], &BinderConfig::default()).unwrap();

    assert_eq!(
        outcome.map.methods_of("Point").unwrap(),
        [
            "point_move",
            "point_print",
            "point_distance_squared",
            "point_create"
        ]
    );
    assert_eq!(
        outcome.map.methods_of("Rectangle").unwrap(),
        ["rect_init", "rect_area", "rect_print"]
    );
    assert_eq!(
        outcome.map.utility(),
        ["max", "min", "init_graphics", "cleanup_resources"]
    );
    assert!(outcome.map.ambiguous().is_empty());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_factory_binds_without_receiver_parameter() {
    // point_create takes only ints; name prefix + factory return carry it
    let outcome = bind_units(vec![graphics_unit()], &BinderConfig::default()).unwrap();

    let methods = outcome.map.methods_of("Point").unwrap();
    assert!(methods.contains(&"point_create".to_string()));
    assert!(!outcome.map.utility().contains(&"point_create".to_string()));
}

#[test]
fn test_signature_alone_binds_abbreviated_names() {
    // rect_* functions get no naming signal against "Rectangle" (no
    // abbreviation inference), so the receiver parameter must be enough
    let outcome = bind_units(vec![graphics_unit()], &BinderConfig::default()).unwrap();

    assert_eq!(
        outcome.map.methods_of("Rectangle").unwrap(),
        ["rect_init", "rect_area", "rect_print"]
    );
}

#[test]
fn test_every_function_lands_in_exactly_one_list() {
    let outcome = bind_units(vec![graphics_unit()], &BinderConfig::default()).unwrap();

    let mut all: Vec<&String> = Vec::new();
    for binding in outcome.map.structs() {
        all.extend(binding.methods.iter());
    }
    all.extend(outcome.map.utility().iter());
    all.extend(outcome.map.ambiguous().iter());

    assert_eq!(all.len(), 11);
    let mut names: Vec<&String> = all.clone();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 11, "a function appeared in two lists");
}

#[test]
fn test_method_order_follows_source_order() {
    // Declare the methods in a scrambled-looking order and expect it back
    let unit = TranslationUnit::with_declarations(
        "shapes.c",
        vec![
            struct_decl("Shape", &[("id", ty("int"))]),
            func("shape_print", ty("void"), &[("s", const_ptr("Shape"))]),
            func("shape_init", ty("void"), &[("s", ptr("Shape"))]),
            func("shape_area", ty("int"), &[("s", const_ptr("Shape"))]),
        ],
    );
    let outcome = bind_units(vec![unit], &BinderConfig::default()).unwrap();

    assert_eq!(
        outcome.map.methods_of("Shape").unwrap(),
        ["shape_print", "shape_init", "shape_area"]
    );
}

#[test]
fn test_identical_inputs_produce_identical_output() {
    let config = BinderConfig::default();
    let first = bind_units(vec![graphics_unit()], &config).unwrap();
    let second = bind_units(vec![graphics_unit()], &config).unwrap();

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_equal_signals_are_ambiguous_not_guessed() {
    // `rect_list_clear` name-matches both Rect and RectList at 0.3 each;
    // with no receiver parameter the engine must refuse to pick
    let unit = TranslationUnit::with_declarations(
        "rects.c",
        vec![
            struct_decl("Rect", &[("w", ty("int"))]),
            struct_decl("RectList", &[("len", ty("int"))]),
            func("rect_list_clear", ty("void"), &[("n", ty("int"))]),
        ],
    );
    let outcome = bind_units(vec![unit], &BinderConfig::default()).unwrap();

    assert_eq!(outcome.map.ambiguous(), ["rect_list_clear"]);
    assert!(outcome.map.methods_of("Rect").unwrap().is_empty());
    assert!(outcome.map.methods_of("RectList").unwrap().is_empty());
}

#[test]
fn test_receiver_breaks_naming_tie() {
    // Same overlap, but a RectList* receiver settles it
    let unit = TranslationUnit::with_declarations(
        "rects.c",
        vec![
            struct_decl("Rect", &[("w", ty("int"))]),
            struct_decl("RectList", &[("len", ty("int"))]),
            func("rect_list_push", ty("void"), &[("list", ptr("RectList")), ("r", ty("Rect"))]),
        ],
    );
    let outcome = bind_units(vec![unit], &BinderConfig::default()).unwrap();

    assert_eq!(outcome.map.methods_of("RectList").unwrap(), ["rect_list_push"]);
    assert!(outcome.map.ambiguous().is_empty());
}

#[test]
fn test_report_counts_fixture() {
    let outcome = bind_units(vec![graphics_unit()], &BinderConfig::default()).unwrap();

    assert_eq!(outcome.report.total_functions, 11);
    assert_eq!(outcome.report.bound_functions, 7);
    assert_eq!(outcome.report.utility_functions, 4);
    assert_eq!(outcome.report.ambiguous_functions, 0);
    assert_eq!(outcome.report.structs_with_methods, 2);
    assert!((outcome.report.bound_ratio() - 7.0 / 11.0).abs() < 1e-9);
}

#[test]
fn test_declaration_dump_loads_and_binds() {
    // A parser collaborator hands over declarations as JSON
    let dump = r#"{
        "id": "point.c",
        "declarations": [
            {"Struct": {"name": "Point", "fields": [
                {"name": "x", "ty": {"name": "int"}},
                {"name": "y", "ty": {"name": "int"}}
            ]}},
            {"Function": {"name": "point_move",
                "return_type": {"name": "void"},
                "params": [
                    {"name": "p", "ty": {"name": "Point", "pointer_depth": 1}},
                    {"name": "dx", "ty": {"name": "int"}},
                    {"name": "dy", "ty": {"name": "int"}}
                ]}}
        ]
    }"#;
    let unit: TranslationUnit = serde_json::from_str(dump).unwrap();
    let outcome = bind_units(vec![unit], &BinderConfig::default()).unwrap();

    assert_eq!(outcome.map.methods_of("Point").unwrap(), ["point_move"]);
}

#[test]
fn test_outcome_serializes_for_generator() {
    let outcome = bind_units(vec![graphics_unit()], &BinderConfig::default()).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["map"]["structs"][0]["name"], "Point");
    assert_eq!(json["map"]["structs"][0]["methods"][0], "point_move");
    assert_eq!(json["map"]["utility"][0], "max");
    assert_eq!(json["report"]["total_functions"], 11);
    // The name index is an internal lookup aid, not part of the contract
    assert!(json["map"].get("index").is_none());
}
