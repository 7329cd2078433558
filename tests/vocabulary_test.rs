//! Tests for the OpenAPI vocabulary: version gating, discriminator
//! structure and presence checks, metadata keywords, and coercion.

use serde_json::json;
use stickler::{OpenApiVersion, OpenApiVocabulary};

fn vocabulary(version: OpenApiVersion) -> OpenApiVocabulary {
    OpenApiVocabulary::new(version)
}

#[test]
fn test_nullable_compiles_under_30() {
    let validator = vocabulary(OpenApiVersion::V30)
        .options()
        .build(&json!({"type": "string", "nullable": true}))
        .unwrap();

    assert!(validator.is_valid(&json!("hello")));
    // The nullable transformation happens upstream in the loader; the
    // keyword itself leaves the type rule in charge.
    assert!(!validator.is_valid(&json!(null)));
}

#[test]
fn test_nullable_must_be_boolean_under_30() {
    let err = vocabulary(OpenApiVersion::V30)
        .options()
        .build(&json!({"type": "string", "nullable": "yes"}))
        .unwrap_err();
    assert!(err.to_string().contains("nullable must be a boolean"));
}

#[test]
fn test_nullable_rejected_under_31() {
    let err = vocabulary(OpenApiVersion::V31)
        .options()
        .build(&json!({"type": "string", "nullable": true}))
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("nullable"));
    assert!(message.contains("not allowed in OpenAPI 3.1+"));
}

#[test]
fn test_discriminator_requires_property_name() {
    let vocab = vocabulary(OpenApiVersion::V31);

    let err = vocab
        .options()
        .build(&json!({"discriminator": "petType"}))
        .unwrap_err();
    assert!(err.to_string().contains("must be an object"));

    let err = vocab
        .options()
        .build(&json!({"discriminator": {"mapping": {}}}))
        .unwrap_err();
    assert!(err.to_string().contains("requires a propertyName"));

    let err = vocab
        .options()
        .build(&json!({"discriminator": {"propertyName": 3}}))
        .unwrap_err();
    assert!(err.to_string().contains("propertyName must be a string"));

    let err = vocab
        .options()
        .build(&json!({
            "discriminator": {"propertyName": "petType", "mapping": {"dog": 1}}
        }))
        .unwrap_err();
    assert!(err.to_string().contains("must be a string"));
}

#[test]
fn test_discriminator_property_must_be_present() {
    let validator = vocabulary(OpenApiVersion::V31)
        .options()
        .build(&json!({
            "type": "object",
            "discriminator": {"propertyName": "petType"}
        }))
        .unwrap();

    assert!(validator.is_valid(&json!({"petType": "dog"})));
    // Non-objects are not the discriminator's concern.
    assert!(validator.is_valid(&json!("just a string")));

    let errors: Vec<String> = validator
        .iter_errors(&json!({"name": "rex"}))
        .map(|e| e.to_string())
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("discriminator property 'petType' is missing"));
}

#[test]
fn test_example_is_metadata_only() {
    let validator = vocabulary(OpenApiVersion::V31)
        .options()
        .build(&json!({"type": "integer", "example": "not an integer"}))
        .unwrap();

    assert!(validator.is_valid(&json!(7)));
    assert!(!validator.is_valid(&json!("seven")));
}

#[test]
fn test_deprecated_must_be_boolean() {
    let vocab = vocabulary(OpenApiVersion::V31);

    assert!(vocab
        .options()
        .build(&json!({"type": "string", "deprecated": true}))
        .is_ok());

    let err = vocab
        .options()
        .build(&json!({"type": "string", "deprecated": "soon"}))
        .unwrap_err();
    assert!(err.to_string().contains("deprecated must be a boolean"));
}

#[test]
fn test_coercion_accepts_lexical_scalar_forms() {
    let vocab = vocabulary(OpenApiVersion::V31).with_scalar_coercion(true);
    let validator = vocab
        .options()
        .build(&json!({"type": ["boolean", "string"]}))
        .unwrap();

    assert!(validator.is_valid(&json!("true")));
    assert!(validator.is_valid(&json!("false")));
    assert!(validator.is_valid(&json!(true)));

    let errors: Vec<String> = validator
        .iter_errors(&json!("yes"))
        .map(|e| e.to_string())
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("cannot coerce"));
    assert!(errors[0].contains("boolean"));
}

#[test]
fn test_coercion_integer_lexical_rules() {
    let vocab = vocabulary(OpenApiVersion::V31).with_scalar_coercion(true);
    let validator = vocab
        .options()
        .build(&json!({"type": "integer"}))
        .unwrap();

    assert!(validator.is_valid(&json!("42")));
    assert!(validator.is_valid(&json!("-7")));
    assert!(validator.is_valid(&json!("0")));
    assert!(validator.is_valid(&json!(42)));

    for bad in ["007", "+1", "1.5", "1e3", "forty-two"] {
        assert!(!validator.is_valid(&json!(bad)), "{bad} should be rejected");
    }
}

#[test]
fn test_coercion_number_lexical_rules() {
    let vocab = vocabulary(OpenApiVersion::V31).with_scalar_coercion(true);
    let validator = vocab.options().build(&json!({"type": "number"})).unwrap();

    for ok in ["3.25", "-0.5", "1e10", "6.02E23"] {
        assert!(validator.is_valid(&json!(ok)), "{ok} should be accepted");
    }
    for bad in ["Infinity", "NaN", "+1", ".5"] {
        assert!(!validator.is_valid(&json!(bad)), "{bad} should be rejected");
    }
}

#[test]
fn test_coercion_off_keeps_standard_type_checking() {
    let validator = vocabulary(OpenApiVersion::V31)
        .options()
        .build(&json!({"type": "integer"}))
        .unwrap();

    assert!(!validator.is_valid(&json!("42")));
    assert!(validator.is_valid(&json!(42)));
}

#[test]
fn test_coercion_leaves_non_strings_to_normal_type_rules() {
    let vocab = vocabulary(OpenApiVersion::V31).with_scalar_coercion(true);
    let validator = vocab.options().build(&json!({"type": "integer"})).unwrap();

    assert!(validator.is_valid(&json!(5)));
    assert!(!validator.is_valid(&json!(5.5)));
    assert!(!validator.is_valid(&json!({"n": 5})));
}
