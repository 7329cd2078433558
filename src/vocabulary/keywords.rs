//! Keyword factories for `nullable`, `discriminator`, `example`, and
//! `deprecated`.
//!
//! Factories run once per subschema during compilation; returning an error
//! aborts the build, which is the right disposition for a structurally
//! invalid contract. The installed hooks run against every instance the
//! subschema applies to.

use jsonschema::paths::{LazyLocation, Location};
use jsonschema::{Keyword, ValidationError};
use serde_json::{Map, Value};

use super::KeywordError;

/// A metadata keyword hook: annotates, never rejects.
struct Annotation;

impl Keyword for Annotation {
    fn validate<'i>(
        &self,
        _instance: &'i Value,
        _location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        Ok(())
    }

    fn is_valid(&self, _instance: &Value) -> bool {
        true
    }
}

fn compile_error<'a>(
    path: Location,
    value: &'a Value,
    error: KeywordError,
) -> ValidationError<'a> {
    ValidationError::custom(Location::new(), path, value, error.to_string())
}

/// `nullable` under OpenAPI 3.0: must be boolean, no validate-time effect.
///
/// The document loader widens nullable types before schemas reach the
/// validator, so the hook itself has nothing left to check.
pub(super) fn nullable_30<'a>(
    _parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    if !value.is_boolean() {
        return Err(compile_error(
            path,
            value,
            KeywordError::invalid("nullable", "nullable must be a boolean"),
        ));
    }
    Ok(Box::new(Annotation))
}

/// `nullable` under OpenAPI 3.1: removed from the dialect entirely.
pub(super) fn nullable_31<'a>(
    _parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    Err(compile_error(
        path,
        value,
        KeywordError::invalid("nullable", "nullable is not allowed in OpenAPI 3.1+"),
    ))
}

/// The `discriminator` validate-time hook: the selecting property must be
/// present on any object instance.
struct DiscriminatorKeyword {
    property_name: String,
    schema_path: Location,
}

impl Keyword for DiscriminatorKeyword {
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        if self.is_valid(instance) {
            return Ok(());
        }
        Err(ValidationError::custom(
            self.schema_path.clone(),
            location.into(),
            instance,
            KeywordError::DiscriminatorPropertyMissing(self.property_name.clone()).to_string(),
        ))
    }

    fn is_valid(&self, instance: &Value) -> bool {
        match instance.as_object() {
            Some(object) => object.contains_key(&self.property_name),
            None => true,
        }
    }
}

/// Compiles a `discriminator` object, rejecting structural misuse.
pub(super) fn discriminator<'a>(
    _parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    let object = value.as_object().ok_or_else(|| {
        compile_error(
            path.clone(),
            value,
            KeywordError::invalid("discriminator", "discriminator must be an object"),
        )
    })?;

    let property_name = match object.get("propertyName") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(compile_error(
                path,
                value,
                KeywordError::invalid("discriminator", "propertyName must be a string"),
            ));
        }
        None => {
            return Err(compile_error(
                path,
                value,
                KeywordError::invalid("discriminator", "discriminator requires a propertyName"),
            ));
        }
    };

    if let Some(mapping) = object.get("mapping") {
        let entries = mapping.as_object().ok_or_else(|| {
            compile_error(
                path.clone(),
                value,
                KeywordError::invalid("discriminator", "mapping must be an object"),
            )
        })?;
        for (key, target) in entries {
            if !target.is_string() {
                return Err(compile_error(
                    path,
                    value,
                    KeywordError::invalid(
                        "discriminator",
                        format!("mapping value for '{key}' must be a string"),
                    ),
                ));
            }
        }
    }

    Ok(Box::new(DiscriminatorKeyword {
        property_name,
        schema_path: path,
    }))
}

/// `example` carries any value; metadata only.
pub(super) fn example<'a>(
    _parent: &'a Map<String, Value>,
    _value: &'a Value,
    _path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    Ok(Box::new(Annotation))
}

/// `deprecated` must be boolean; metadata only.
pub(super) fn deprecated<'a>(
    _parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    if !value.is_boolean() {
        return Err(compile_error(
            path,
            value,
            KeywordError::invalid("deprecated", "deprecated must be a boolean"),
        ));
    }
    Ok(Box::new(Annotation))
}
