//! Tests for oneOf/anyOf merging, discriminator selection, and allOf
//! composition.

use serde_json::{json, Value};
use stickler::{
    Direction, OpenApiVersion, SchemaNode, SchemaProxy, SchemaStore, StrictOptions,
    StrictValidator, ValidationReport,
};

fn validate(schema: Value, data: Value) -> ValidationReport {
    validate_with_store(SchemaStore::new(), schema, data)
}

fn validate_with_store(store: SchemaStore, schema: Value, data: Value) -> ValidationReport {
    let validator = StrictValidator::new(store, StrictOptions::new(), OpenApiVersion::V31);
    validator.validate_body(
        &SchemaProxy::inline(SchemaNode::new(schema)),
        &data,
        Direction::Request,
        "$.body",
    )
}

fn paths(report: &ValidationReport) -> Vec<String> {
    report
        .undeclared
        .iter()
        .map(|r| r.path.to_string())
        .collect()
}

#[test]
fn test_one_of_merges_parent_and_variant_declarations() {
    // Parents commonly declare shared fields outside their variants.
    let report = validate(
        json!({
            "type": "object",
            "properties": {"id": {"type": "string"}},
            "oneOf": [
                {"type": "object", "properties": {"name": {"type": "string"}}},
                {"type": "object", "properties": {"title": {"type": "string"}}}
            ]
        }),
        json!({"id": "1", "name": "J"}),
    );
    assert!(report.valid);
}

#[test]
fn test_one_of_reports_names_outside_the_union() {
    let report = validate(
        json!({
            "type": "object",
            "properties": {"id": {"type": "string"}},
            "oneOf": [
                {"type": "object", "properties": {"name": {"type": "string"}}}
            ]
        }),
        json!({"id": "1", "name": "J", "extra": true}),
    );
    assert_eq!(paths(&report), vec!["$.body.extra"]);
}

#[test]
fn test_discriminator_selects_mapped_variant() {
    let store = SchemaStore::new();
    store
        .register(
            "Dog",
            SchemaNode::new(json!({
                "type": "object",
                "properties": {
                    "petType": {"type": "string"},
                    "bark": {"type": "string"}
                }
            })),
        )
        .unwrap();
    store
        .register(
            "Cat",
            SchemaNode::new(json!({
                "type": "object",
                "properties": {
                    "petType": {"type": "string"},
                    "meow": {"type": "string"}
                }
            })),
        )
        .unwrap();

    let pet = json!({
        "type": "object",
        "discriminator": {
            "propertyName": "petType",
            "mapping": {"dog": "#/components/schemas/Dog"}
        },
        "oneOf": [
            {"$ref": "#/components/schemas/Dog"},
            {"$ref": "#/components/schemas/Cat"}
        ]
    });

    // Mapped value selects Dog; bark is declared there.
    let report = validate_with_store(
        store.clone(),
        pet.clone(),
        json!({"petType": "dog", "bark": "woof"}),
    );
    assert!(report.valid);

    // Unmapped values fall back to component-name matching.
    let report = validate_with_store(
        store.clone(),
        pet.clone(),
        json!({"petType": "Cat", "meow": "m"}),
    );
    assert!(report.valid);

    // A member from the other variant is undeclared for this one.
    let report = validate_with_store(store, pet, json!({"petType": "dog", "meow": "m"}));
    assert_eq!(paths(&report), vec!["$.body.meow"]);
}

#[test]
fn test_discriminator_choice_is_honored_over_matching() {
    // The discriminator names Dog even though the data would also satisfy
    // the Cat schema; selection stays deterministic.
    let store = SchemaStore::new();
    store
        .register(
            "Dog",
            SchemaNode::new(json!({
                "type": "object",
                "properties": {"petType": {"type": "string"}, "bark": {"type": "string"}}
            })),
        )
        .unwrap();
    store
        .register(
            "Cat",
            SchemaNode::new(json!({
                "type": "object",
                "properties": {"petType": {"type": "string"}, "bark": {"type": "string"}}
            })),
        )
        .unwrap();

    let report = validate_with_store(
        store,
        json!({
            "type": "object",
            "discriminator": {"propertyName": "petType"},
            "oneOf": [
                {"$ref": "#/components/schemas/Cat"},
                {"$ref": "#/components/schemas/Dog"}
            ]
        }),
        json!({"petType": "Dog", "bark": "woof"}),
    );
    assert!(report.valid);
}

#[test]
fn test_closed_parent_and_variant_still_recurse_into_children() {
    // Both participants close, so nothing is reported at this level, but
    // declared children are still walked.
    let store = SchemaStore::new();
    store
        .register(
            "Dog",
            SchemaNode::new(json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "petType": {"type": "string"},
                    "details": {
                        "type": "object",
                        "properties": {"sound": {"type": "string"}}
                    }
                }
            })),
        )
        .unwrap();

    let report = validate_with_store(
        store,
        json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {"petType": {"type": "string"}},
            "discriminator": {"propertyName": "petType"},
            "oneOf": [{"$ref": "#/components/schemas/Dog"}]
        }),
        json!({
            "petType": "Dog",
            "details": {"sound": "woof", "extra": "x"},
            "rogue": true
        }),
    );

    // "rogue" is left to the base validator's closure handling; the
    // nested extra inside an open child is still this walker's job.
    assert_eq!(paths(&report), vec!["$.body.details.extra"]);
}

#[test]
fn test_any_of_picks_first_matching_variant() {
    let report = validate(
        json!({
            "type": "object",
            "anyOf": [
                {
                    "type": "object",
                    "properties": {"kind": {"const": "a"}, "alpha": {"type": "integer"}},
                    "required": ["kind"]
                },
                {
                    "type": "object",
                    "properties": {"kind": {"const": "b"}, "beta": {"type": "integer"}},
                    "required": ["kind"]
                }
            ]
        }),
        json!({"kind": "b", "beta": 2}),
    );
    assert!(report.valid);

    let report = validate(
        json!({
            "type": "object",
            "anyOf": [
                {
                    "type": "object",
                    "properties": {"kind": {"const": "a"}, "alpha": {"type": "integer"}},
                    "required": ["kind"]
                },
                {
                    "type": "object",
                    "properties": {"kind": {"const": "b"}, "beta": {"type": "integer"}},
                    "required": ["kind"]
                }
            ]
        }),
        json!({"kind": "b", "alpha": 1}),
    );
    assert_eq!(paths(&report), vec!["$.body.alpha"]);
}

#[test]
fn test_all_of_unions_members_and_parent() {
    let schema = json!({
        "type": "object",
        "properties": {"c": {"type": "integer"}},
        "allOf": [
            {"type": "object", "properties": {"a": {"type": "integer"}}},
            {"type": "object", "properties": {"b": {"type": "integer"}}}
        ]
    });

    let report = validate(schema.clone(), json!({"a": 1, "b": 2, "c": 3}));
    assert!(report.valid);

    let report = validate(schema, json!({"a": 1, "b": 2, "c": 3, "extra": 4}));
    assert_eq!(paths(&report), vec!["$.body.extra"]);
}

#[test]
fn test_nested_all_of_is_flattened() {
    let report = validate(
        json!({
            "type": "object",
            "allOf": [
                {
                    "type": "object",
                    "properties": {"a": {"type": "integer"}},
                    "allOf": [
                        {"type": "object", "properties": {"b": {"type": "integer"}}}
                    ]
                }
            ]
        }),
        json!({"a": 1, "b": 2}),
    );
    assert!(report.valid);
}

#[test]
fn test_all_of_with_closing_member_delegates_reporting() {
    let report = validate(
        json!({
            "type": "object",
            "allOf": [
                {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {"a": {"type": "integer"}}
                }
            ]
        }),
        json!({"a": 1, "extra": 2}),
    );
    assert!(report.valid);
}

#[test]
fn test_ref_variants_resolve_through_store() {
    let store = SchemaStore::new();
    store
        .register(
            "Named",
            SchemaNode::new(json!({
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "required": ["name"]
            })),
        )
        .unwrap();

    let report = validate_with_store(
        store,
        json!({
            "type": "object",
            "oneOf": [{"$ref": "#/components/schemas/Named"}]
        }),
        json!({"name": "J", "extra": 1}),
    );
    assert_eq!(paths(&report), vec!["$.body.extra"]);
}
