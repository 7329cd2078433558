//! Tests for concurrent validation over shared schema trees and a shared
//! compiled-schema cache.

use std::sync::Arc;
use std::thread;

use serde_json::json;
use stickler::{
    Direction, OpenApiVersion, SchemaCache, SchemaNode, SchemaProxy, SchemaStore, StrictOptions,
    StrictValidator,
};

fn pet_store() -> SchemaStore {
    let store = SchemaStore::new();
    store
        .register(
            "Dog",
            SchemaNode::new(json!({
                "type": "object",
                "properties": {
                    "petType": {"const": "dog"},
                    "bark": {"type": "string"}
                },
                "required": ["petType"]
            })),
        )
        .unwrap();
    store
        .register(
            "Cat",
            SchemaNode::new(json!({
                "type": "object",
                "properties": {
                    "petType": {"const": "cat"},
                    "meow": {"type": "string"}
                },
                "required": ["petType"]
            })),
        )
        .unwrap();
    store
        .register(
            "Pet",
            SchemaNode::new(json!({
                "type": "object",
                "oneOf": [
                    {"$ref": "#/components/schemas/Dog"},
                    {"$ref": "#/components/schemas/Cat"}
                ]
            })),
        )
        .unwrap();
    store
}

#[test]
fn test_concurrent_validation_shares_one_cache() {
    let cache = SchemaCache::new();
    let validator = Arc::new(StrictValidator::new(
        pet_store(),
        StrictOptions::new().with_schema_cache(cache.clone()),
        OpenApiVersion::V31,
    ));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let data = if i % 2 == 0 {
                    json!({"petType": "dog", "bark": "woof"})
                } else {
                    json!({"petType": "cat", "meow": "m", "extra": i})
                };
                let report = validator.validate_body(
                    &SchemaProxy::reference("Pet"),
                    &data,
                    Direction::Request,
                    "$.body",
                );
                if i % 2 == 0 {
                    assert!(report.valid);
                } else {
                    assert_eq!(report.undeclared.len(), 1);
                    assert_eq!(report.undeclared[0].path.to_string(), "$.body.extra");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Variant matching compiled through the shared cache.
    assert!(!cache.is_empty());
}

#[test]
fn test_cache_returns_the_same_compiled_schema() {
    let cache = SchemaCache::new();
    let store = pet_store();
    let options = StrictOptions::new().with_schema_cache(cache.clone());
    let validator = StrictValidator::new(store.clone(), options, OpenApiVersion::V31);

    let data = json!({"petType": "dog", "bark": "woof"});
    validator.validate_body(&SchemaProxy::reference("Pet"), &data, Direction::Request, "$.body");

    let dog = store.get("Dog").unwrap();
    let first = cache.load(dog.hash()).unwrap();

    validator.validate_body(&SchemaProxy::reference("Pet"), &data, Direction::Request, "$.body");
    let second = cache.load(dog.hash()).unwrap();

    assert!(Arc::ptr_eq(&first.compiled, &second.compiled));
}

#[test]
fn test_concurrent_registration_and_validation() {
    let store = SchemaStore::new();
    store
        .register(
            "Base",
            SchemaNode::new(json!({
                "type": "object",
                "properties": {"id": {"type": "integer"}}
            })),
        )
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                if i % 2 == 0 {
                    store
                        .register(format!("Extra{i}"), SchemaNode::new(json!({})))
                        .unwrap();
                } else {
                    let validator = StrictValidator::new(
                        store,
                        StrictOptions::new(),
                        OpenApiVersion::V31,
                    );
                    let report = validator.validate_body(
                        &SchemaProxy::reference("Base"),
                        &json!({"id": 1}),
                        Direction::Request,
                        "$.body",
                    );
                    assert!(report.valid);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 5);
}
