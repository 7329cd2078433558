//! Declared-property collection.
//!
//! For each object node the walker needs the full set of member names the
//! contract declares, accounting for OpenAPI composition. Collection order
//! follows the schema: own properties first, then flattened `allOf`
//! members, the discriminator- or match-selected variant, the active
//! `if/then/else` branch, and any `dependentSchemas` triggered by the data.
//! The first schema to declare a name owns it.

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::report::Direction;
use crate::schema::{SchemaNode, SchemaProxy};

use super::polymorphism;
use super::Walker;

/// Which participating schema declared a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropertyOrigin {
    Parent,
    Variant,
    AllOf,
    Conditional,
    DependentSchema,
}

/// One declared property with the schema that owns it.
pub(crate) struct DeclaredProperty {
    pub proxy: SchemaProxy,
    pub origin: PropertyOrigin,
    /// Direction-filtered: present in the contract but invisible for this
    /// payload direction, so the walker treats the member as absent.
    pub skip: bool,
}

/// The declared members of one object node.
pub(crate) struct DeclaredSet {
    pub properties: IndexMap<String, DeclaredProperty>,
    pub patterns: Vec<(Regex, SchemaProxy)>,
}

impl DeclaredSet {
    /// Collects the declared set for a (schema, direction, data) triple.
    pub(crate) fn collect(walker: &Walker<'_>, node: &SchemaNode, value: &Value) -> Self {
        let mut set = Self {
            properties: IndexMap::new(),
            patterns: Vec::new(),
        };
        let mut seen = HashSet::new();
        seen.insert(node.hash());

        set.add_own(walker, node, PropertyOrigin::Parent);
        set.flatten_all_of(walker, node, &mut seen);
        set.add_selected_variant(walker, node, value);
        set.add_conditionals(walker, node, value, &mut seen);
        set.add_dependents(walker, node, value, &mut seen);
        set.add_patterns(node);
        set
    }

    /// Merges another set in, letting the other set's entries win.
    ///
    /// Used for oneOf/anyOf merging, where the variant's schema for a
    /// shared name is usually the more specific one.
    pub(crate) fn merge_overriding(&mut self, other: DeclaredSet) {
        for (name, mut property) in other.properties {
            if matches!(property.origin, PropertyOrigin::Parent) {
                property.origin = PropertyOrigin::Variant;
            }
            self.properties.insert(name, property);
        }
        self.patterns.extend(other.patterns);
    }

    /// The first pattern-property schema whose regex matches the key.
    pub(crate) fn matching_pattern(&self, key: &str) -> Option<&SchemaProxy> {
        self.patterns
            .iter()
            .find(|(regex, _)| regex.is_match(key))
            .map(|(_, proxy)| proxy)
    }

    /// The declared names, for sibling hints in undeclared records.
    pub(crate) fn sibling_names(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    fn insert(
        &mut self,
        walker: &Walker<'_>,
        name: String,
        proxy: SchemaProxy,
        origin: PropertyOrigin,
    ) {
        if self.properties.contains_key(&name) {
            return;
        }
        let skip = should_skip_property(walker, &proxy);
        self.properties.insert(
            name,
            DeclaredProperty {
                proxy,
                origin,
                skip,
            },
        );
    }

    fn add_own(&mut self, walker: &Walker<'_>, node: &SchemaNode, origin: PropertyOrigin) {
        for (name, proxy) in node.properties() {
            self.insert(walker, name, proxy, origin);
        }
    }

    /// Adds a participating schema's own properties plus its flattened allOf.
    fn add_schema(
        &mut self,
        walker: &Walker<'_>,
        node: &SchemaNode,
        origin: PropertyOrigin,
        seen: &mut HashSet<u64>,
    ) {
        if !seen.insert(node.hash()) {
            return;
        }
        self.add_own(walker, node, origin);
        for proxy in node.all_of() {
            if let Some(member) = proxy.resolve(walker.store) {
                self.add_schema(walker, &member, origin, seen);
            }
        }
    }

    fn flatten_all_of(&mut self, walker: &Walker<'_>, node: &SchemaNode, seen: &mut HashSet<u64>) {
        for proxy in node.all_of() {
            if let Some(member) = proxy.resolve(walker.store) {
                self.add_schema(walker, &member, PropertyOrigin::AllOf, seen);
            }
        }
    }

    /// Adds the selected oneOf/anyOf variant's own properties.
    ///
    /// The discriminator identifies the variant when it can; otherwise the
    /// variant is included only when exactly one validates the data.
    fn add_selected_variant(&mut self, walker: &Walker<'_>, node: &SchemaNode, value: &Value) {
        let mut variants = node.one_of();
        variants.extend(node.any_of());
        if variants.is_empty() {
            return;
        }

        if let Some(variant) = polymorphism::discriminator_selected(walker, node, value) {
            self.add_own(walker, &variant, PropertyOrigin::Variant);
            return;
        }

        let mut matched = None;
        let mut matches = 0;
        for proxy in &variants {
            let Some(candidate) = proxy.resolve(walker.store) else {
                continue;
            };
            match walker.matcher.data_matches_schema(&candidate, value) {
                Ok(true) => {
                    matches += 1;
                    if matches > 1 {
                        return;
                    }
                    matched = Some(candidate);
                }
                Ok(false) => {}
                Err(err) => {
                    debug!(error = %err, "variant schema failed to compile during collection");
                }
            }
        }
        if let Some(variant) = matched {
            self.add_own(walker, &variant, PropertyOrigin::Variant);
        }
    }

    /// Adds the `then` or `else` branch selected by matching `if` against
    /// the data. A matcher error counts as "no match".
    fn add_conditionals(
        &mut self,
        walker: &Walker<'_>,
        node: &SchemaNode,
        value: &Value,
        seen: &mut HashSet<u64>,
    ) {
        let Some(if_node) = node.if_schema().and_then(|p| p.resolve(walker.store)) else {
            return;
        };

        let matched = matches!(
            walker.matcher.data_matches_schema(&if_node, value),
            Ok(true)
        );
        let branch = if matched {
            node.then_schema()
        } else {
            node.else_schema()
        };
        if let Some(branch_node) = branch.and_then(|p| p.resolve(walker.store)) {
            self.add_schema(walker, &branch_node, PropertyOrigin::Conditional, seen);
        }
    }

    fn add_dependents(
        &mut self,
        walker: &Walker<'_>,
        node: &SchemaNode,
        value: &Value,
        seen: &mut HashSet<u64>,
    ) {
        for (trigger, proxy) in node.dependent_schemas() {
            if value.get(&trigger).is_none() {
                continue;
            }
            if let Some(dependent) = proxy.resolve(walker.store) {
                self.add_schema(walker, &dependent, PropertyOrigin::DependentSchema, seen);
            }
        }
    }

    fn add_patterns(&mut self, node: &SchemaNode) {
        for (source, proxy) in node.pattern_properties() {
            match Regex::new(&source) {
                Ok(regex) => self.patterns.push((regex, proxy)),
                Err(err) => {
                    debug!(pattern = %source, error = %err, "dropping uncompilable patternProperties regex");
                }
            }
        }
    }
}

/// Whether a declared property is invisible for the current direction.
pub(crate) fn should_skip_property(walker: &Walker<'_>, proxy: &SchemaProxy) -> bool {
    let Some(node) = proxy.resolve(walker.store) else {
        return false;
    };
    match walker.direction {
        Direction::Request => node.read_only(),
        Direction::Response => node.write_only(),
    }
}
