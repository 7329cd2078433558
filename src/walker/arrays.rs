//! Array traversal.
//!
//! Tuple positions are covered by `prefixItems`; positions past the prefix
//! are validated against `items` when it is a schema, reported as
//! undeclared when `items` is `false`, and otherwise handed to
//! `unevaluatedItems` when that is a schema.

use serde_json::Value;

use crate::report::{UndeclaredKind, UndeclaredValue};
use crate::schema::{Items, SchemaNode};

use super::{WalkContext, Walker};

impl Walker<'_> {
    pub(super) fn validate_array(
        &self,
        ctx: &WalkContext,
        node: &SchemaNode,
        value: &Value,
    ) -> Vec<UndeclaredValue> {
        let Some(elements) = value.as_array() else {
            return Vec::new();
        };

        let prefix = node.prefix_items();
        let items = node.items();
        let unevaluated = node.unevaluated_items();
        let mut findings = Vec::new();

        for (index, element) in elements.iter().enumerate() {
            let child_path = ctx.path.push_index(index);
            if self.ignore.should_ignore(&child_path.to_string()) {
                continue;
            }

            if let Some(proxy) = prefix.get(index) {
                if let Some(child) = proxy.resolve(self.store) {
                    findings.extend(self.validate_value(
                        &ctx.with_path(child_path),
                        &child,
                        element,
                    ));
                }
                continue;
            }

            match &items {
                Items::Schema(proxy) => {
                    if let Some(child) = proxy.resolve(self.store) {
                        findings.extend(self.validate_value(
                            &ctx.with_path(child_path),
                            &child,
                            element,
                        ));
                    }
                }
                Items::Disallowed => {
                    findings.push(
                        UndeclaredValue::new(
                            child_path,
                            index.to_string(),
                            self.direction,
                            UndeclaredKind::Property,
                        )
                        .with_value(element)
                        .with_location(node.location()),
                    );
                }
                Items::Unset => {
                    if let Some(proxy) = &unevaluated {
                        if let Some(child) = proxy.resolve(self.store) {
                            findings.extend(self.validate_value(
                                &ctx.with_path(child_path),
                                &child,
                                element,
                            ));
                        }
                    }
                }
            }
        }

        findings
    }
}
