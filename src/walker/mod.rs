//! The schema walker.
//!
//! Walks a data value and its schema tree in parallel, collecting the
//! declared members at every object node and reporting the members the
//! contract does not name. The walker never fails: a subtree it cannot
//! analyse (cycle, depth, missing schema, uncompilable regex) simply
//! produces no findings, preserving partial results.

mod arrays;
mod polymorphism;
mod properties;

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use crate::ignore::IgnorePaths;
use crate::matcher::Matcher;
use crate::options::StrictOptions;
use crate::path::JsonPath;
use crate::report::{Direction, UndeclaredKind, UndeclaredValue};
use crate::schema::{AdditionalProperties, SchemaNode, SchemaStore};
use crate::version::OpenApiVersion;

use properties::DeclaredSet;

/// Per-recursion traversal state: the current path and depth.
///
/// Contexts are derived, never mutated; each recursion gets its own.
pub(crate) struct WalkContext {
    pub(crate) path: JsonPath,
    pub(crate) depth: usize,
}

impl WalkContext {
    fn with_path(&self, path: JsonPath) -> Self {
        Self {
            path,
            depth: self.depth + 1,
        }
    }
}

/// One top-level validation pass.
///
/// Holds the services every recursion shares: the schema store, options,
/// direction, the cache-backed matcher, and the visited set that keeps
/// cyclic schemas finite. A walker lives for exactly one `validate` call
/// and is never shared across threads.
pub(crate) struct Walker<'v> {
    pub(crate) store: &'v SchemaStore,
    pub(crate) direction: Direction,
    pub(crate) ignore: IgnorePaths,
    pub(crate) matcher: Matcher,
    max_depth: usize,
    /// (path, schema hash) pairs already visited. The same schema reached
    /// via two different paths is walked twice; cycling back to the same
    /// schema at the same path is walked once.
    visited: RefCell<HashSet<(String, u64)>>,
}

impl<'v> Walker<'v> {
    pub(crate) fn new(
        store: &'v SchemaStore,
        options: &StrictOptions,
        direction: Direction,
        version: OpenApiVersion,
    ) -> Self {
        Self {
            store,
            direction,
            ignore: IgnorePaths::compile(options.ignore_paths()),
            matcher: Matcher::new(
                store.clone(),
                options.schema_cache().clone(),
                version.draft(),
            ),
            max_depth: options.max_depth(),
            visited: RefCell::new(HashSet::new()),
        }
    }

    /// Walks one (schema, value) pair at a path.
    pub(crate) fn validate_value(
        &self,
        ctx: &WalkContext,
        node: &SchemaNode,
        value: &Value,
    ) -> Vec<UndeclaredValue> {
        let path = ctx.path.to_string();
        if self.ignore.should_ignore(&path) {
            return Vec::new();
        }
        if ctx.depth > self.max_depth {
            return Vec::new();
        }
        if !self.visited.borrow_mut().insert((path, node.hash())) {
            return Vec::new();
        }

        match value {
            Value::Object(_) => self.validate_object(ctx, node, value),
            Value::Array(_) => self.validate_array(ctx, node, value),
            // Primitives carry no sub-members.
            _ => Vec::new(),
        }
    }

    fn validate_object(
        &self,
        ctx: &WalkContext,
        node: &SchemaNode,
        value: &Value,
    ) -> Vec<UndeclaredValue> {
        if !node.one_of().is_empty() || !node.any_of().is_empty() {
            return self.validate_variants(ctx, node, value);
        }
        if !node.all_of().is_empty() {
            let declared = DeclaredSet::collect(self, node, value);
            let report = polymorphism::should_report_undeclared_for_all_of(self, node);
            return self.check_members(ctx, node, value, &declared, report, None);
        }

        let declared = DeclaredSet::collect(self, node, value);
        let report = polymorphism::should_report_undeclared(node);
        self.check_members(ctx, node, value, &declared, report, None)
    }

    /// oneOf/anyOf: merge the parent with the selected variant.
    fn validate_variants(
        &self,
        ctx: &WalkContext,
        node: &SchemaNode,
        value: &Value,
    ) -> Vec<UndeclaredValue> {
        let Some(variant) = polymorphism::select_variant(self, node, value) else {
            // No variant claims the value; the parent's own declarations
            // are all that can be checked against.
            let declared = DeclaredSet::collect(self, node, value);
            let report = polymorphism::should_report_undeclared(node);
            return self.check_members(ctx, node, value, &declared, report, None);
        };

        let parent_reports = polymorphism::should_report_undeclared(node);
        let variant_reports = polymorphism::should_report_undeclared(&variant);

        if !parent_reports && !variant_reports {
            return self.recurse_merged(ctx, node, &variant, value);
        }

        let mut declared = DeclaredSet::collect(self, node, value);
        declared.merge_overriding(DeclaredSet::collect(self, &variant, value));
        // A single closed participant delegates closure to the base
        // validator; only a fully open pair reports here.
        let report = parent_reports && variant_reports;
        self.check_members(ctx, node, value, &declared, report, Some(&variant))
    }

    /// Both parent and variant close: recurse into declared children
    /// without emitting anything at this level.
    fn recurse_merged(
        &self,
        ctx: &WalkContext,
        node: &SchemaNode,
        variant: &Arc<SchemaNode>,
        value: &Value,
    ) -> Vec<UndeclaredValue> {
        let Some(object) = value.as_object() else {
            return Vec::new();
        };

        let mut declared = DeclaredSet::collect(self, node, value);
        declared.merge_overriding(DeclaredSet::collect(self, variant, value));

        let mut findings = Vec::new();
        for (key, member) in object {
            let child_path = ctx.path.push_field(key);
            if self.ignore.should_ignore(&child_path.to_string()) {
                continue;
            }

            let proxy = match declared.properties.get(key.as_str()) {
                Some(property) if property.skip => continue,
                Some(property) => Some(property.proxy.clone()),
                None => variant.property(key).or_else(|| node.property(key)),
            };
            if let Some(child) = proxy.and_then(|p| p.resolve(self.store)) {
                findings.extend(self.validate_value(&ctx.with_path(child_path), &child, member));
            }
        }
        findings
    }

    /// Classifies every actual member as declared, ignored, skipped, or
    /// undeclared, recursing where a schema is known.
    fn check_members(
        &self,
        ctx: &WalkContext,
        node: &SchemaNode,
        value: &Value,
        declared: &DeclaredSet,
        report_undeclared: bool,
        variant: Option<&Arc<SchemaNode>>,
    ) -> Vec<UndeclaredValue> {
        let Some(object) = value.as_object() else {
            return Vec::new();
        };

        let siblings = declared.sibling_names();
        let additional = match node.additional_properties() {
            AdditionalProperties::Schema(proxy) => Some(proxy),
            _ => variant.and_then(|v| match v.additional_properties() {
                AdditionalProperties::Schema(proxy) => Some(proxy),
                _ => None,
            }),
        };

        let mut findings = Vec::new();
        for (key, member) in object {
            let child_path = ctx.path.push_field(key);
            if self.ignore.should_ignore(&child_path.to_string()) {
                continue;
            }

            if let Some(property) = declared.properties.get(key.as_str()) {
                if property.skip {
                    continue;
                }
                if let Some(child) = property.proxy.resolve(self.store) {
                    findings.extend(self.validate_value(
                        &ctx.with_path(child_path),
                        &child,
                        member,
                    ));
                }
                continue;
            }

            if let Some(proxy) = declared.matching_pattern(key) {
                if let Some(child) = proxy.resolve(self.store) {
                    findings.extend(self.validate_value(
                        &ctx.with_path(child_path),
                        &child,
                        member,
                    ));
                }
                continue;
            }

            if report_undeclared {
                findings.push(
                    UndeclaredValue::new(
                        child_path.clone(),
                        key,
                        self.direction,
                        UndeclaredKind::Property,
                    )
                    .with_value(member)
                    .with_siblings(siblings.clone())
                    .with_location(
                        node.location()
                            .or_else(|| variant.and_then(|v| v.location())),
                    ),
                );
            }

            // A typed additionalProperties schema still gets to describe
            // the member's shape; nested undeclareds inside it are real.
            if let Some(proxy) = &additional {
                if let Some(child) = proxy.resolve(self.store) {
                    findings.extend(self.validate_value(
                        &ctx.with_path(child_path),
                        &child,
                        member,
                    ));
                }
            }
        }
        findings
    }
}
