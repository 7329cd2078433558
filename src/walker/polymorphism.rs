//! Polymorphism resolution.
//!
//! Decides whether a node's closure state leaves undeclared reporting to
//! the base validator, and which oneOf/anyOf variant a value selects.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::schema::{short_ref_name, SchemaNode};

use super::Walker;

/// Whether the walker should report undeclared members at this node.
///
/// A schema that closes with `additionalProperties: false` or
/// `unevaluatedProperties: false` already rejects extra members through the
/// base validator; reporting them again here would double up. The walker
/// still recurses into declared children of a closed node.
pub(crate) fn should_report_undeclared(node: &SchemaNode) -> bool {
    !(node.closes_additional_properties() || node.closes_unevaluated_properties())
}

/// The allOf variant of [`should_report_undeclared`]: any closing member
/// delegates the whole composition to the base validator.
pub(crate) fn should_report_undeclared_for_all_of(walker: &Walker<'_>, node: &SchemaNode) -> bool {
    if !should_report_undeclared(node) {
        return false;
    }
    for proxy in node.all_of() {
        if let Some(member) = proxy.resolve(walker.store) {
            if member.closes_additional_properties() {
                return false;
            }
        }
    }
    true
}

/// Selects the variant the discriminator names, when it names one.
///
/// The discriminator value maps to a component name either through the
/// explicit mapping or directly; the variant whose reference resolves to
/// that component wins. The choice is honored even when the variant does
/// not validate the data; the mismatch then surfaces through the base
/// validator's own oneOf error.
pub(crate) fn discriminator_selected(
    walker: &Walker<'_>,
    node: &SchemaNode,
    value: &Value,
) -> Option<Arc<SchemaNode>> {
    let discriminator = node.discriminator()?;
    if discriminator.property_name.is_empty() {
        return None;
    }
    let tag = value.get(&discriminator.property_name)?.as_str()?;
    let target = discriminator
        .mapping
        .get(tag)
        .map(|mapped| short_ref_name(mapped))
        .unwrap_or(tag);

    let mut variants = node.one_of();
    variants.extend(node.any_of());
    for proxy in &variants {
        if proxy.ref_name() == Some(target) {
            if let Some(selected) = proxy.resolve(walker.store) {
                return Some(selected);
            }
        }
    }
    None
}

/// Selects the variant a value belongs to.
///
/// Discriminator selection first; otherwise the first variant, in
/// declaration order, that validates the data through the matcher. Missing
/// proxies and compile errors are skipped.
pub(crate) fn select_variant(
    walker: &Walker<'_>,
    node: &SchemaNode,
    value: &Value,
) -> Option<Arc<SchemaNode>> {
    if let Some(selected) = discriminator_selected(walker, node, value) {
        return Some(selected);
    }

    let mut variants = node.one_of();
    variants.extend(node.any_of());
    for proxy in &variants {
        let Some(candidate) = proxy.resolve(walker.store) else {
            continue;
        };
        match walker.matcher.data_matches_schema(&candidate, value) {
            Ok(true) => return Some(candidate),
            Ok(false) => {}
            Err(err) => {
                debug!(error = %err, "variant schema failed to compile during selection");
            }
        }
    }
    None
}
