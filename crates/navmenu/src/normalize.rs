//! Menu tree normalization.
//!
//! A single depth-first pass over the raw tree that:
//! - drops invisible items together with their subtrees
//! - defaults and escapes labels
//! - prunes items whose declared sub-items all disappeared
//! - resolves `active` bottom-up, reporting active descendants to the caller
//!
//! The raw tree is only borrowed; a new tree is built on the way back up.

use tracing::{debug, warn};

use crate::context::RouteContext;
use crate::error::{MenuError, MenuResult};
use crate::html::Escaper;
use crate::item::{MenuItem, NormalizedMenuItem};
use crate::matcher;
use crate::options::MenuOptions;

/// Result of normalizing a sibling list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Surviving items in their original order.
    pub items: Vec<NormalizedMenuItem>,
    /// Whether any surviving item, at this level or below, is active.
    pub active_found: bool,
}

/// Normalizes raw menu trees for one route context.
pub struct Normalizer<'a> {
    options: &'a MenuOptions,
    context: &'a RouteContext,
    escaper: &'a dyn Escaper,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer. `context` should already carry any option overrides.
    pub fn new(
        options: &'a MenuOptions,
        context: &'a RouteContext,
        escaper: &'a dyn Escaper,
    ) -> Self {
        Self {
            options,
            context,
            escaper,
        }
    }

    /// Normalize a top-level item list.
    pub fn normalize(&self, items: &[MenuItem]) -> MenuResult<Normalized> {
        let normalized = self.normalize_level(items, 1)?;
        debug!(
            items = normalized.items.len(),
            active = normalized.active_found,
            route = %self.context.route,
            "normalized menu"
        );
        Ok(normalized)
    }

    fn normalize_level(&self, items: &[MenuItem], depth: usize) -> MenuResult<Normalized> {
        if depth > self.options.max_depth {
            warn!(max_depth = self.options.max_depth, "menu tree too deep");
            return Err(MenuError::TooDeep {
                max_depth: self.options.max_depth,
            });
        }

        let mut out = Vec::with_capacity(items.len());
        let mut active_found = false;

        for item in items {
            if item.is_hidden() {
                continue;
            }

            let mut children = None;
            let mut child_active = false;

            // Only items that declared sub-items are subject to emptiness pruning.
            if let Some(raw_children) = &item.items {
                // A declared but empty list has nothing to descend into.
                let nested = if raw_children.is_empty() {
                    Normalized::default()
                } else {
                    self.normalize_level(raw_children, depth + 1)?
                };
                child_active = nested.active_found;

                if nested.items.is_empty() {
                    if self.options.hide_empty_items && item.url.is_none() {
                        continue;
                    }
                } else {
                    children = Some(nested.items);
                }
            }

            let active = match item.active {
                Some(explicit) => explicit,
                None => {
                    (self.options.activate_parents && child_active)
                        || (self.options.activate_items && matcher::is_active(item, self.context))
                }
            };
            active_found |= active;

            out.push(NormalizedMenuItem {
                label: self.label(item),
                url: item.url.clone(),
                items: children,
                active,
                template: item.template.clone(),
                submenu_template: item.submenu_template.clone(),
                options: item.options.clone(),
            });
        }

        Ok(Normalized {
            items: out,
            active_found,
        })
    }

    fn label(&self, item: &MenuItem) -> String {
        let label = item.label.as_deref().unwrap_or_default();
        if item.encode.unwrap_or(self.options.encode_labels) {
            self.escaper.escape(label)
        } else {
            label.to_string()
        }
    }
}

/// Normalize `items` with the default HTML escaper.
pub fn normalize(
    items: &[MenuItem],
    options: &MenuOptions,
    context: &RouteContext,
) -> MenuResult<Normalized> {
    let context = context.resolve(options);
    Normalizer::new(options, &context, &crate::html::HtmlEscaper).normalize(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::html::HtmlEscaper;

    fn run(items: &[MenuItem], options: &MenuOptions, ctx: &RouteContext) -> Normalized {
        Normalizer::new(options, ctx, &HtmlEscaper)
            .normalize(items)
            .unwrap()
    }

    fn labels(items: &[NormalizedMenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn hidden_items_dropped_with_subtree() {
        let items = vec![
            MenuItem::new("A")
                .hidden()
                .child(MenuItem::new("A1").route("a/one")),
            MenuItem::new("B"),
            MenuItem::new("C"),
        ];
        let result = run(&items, &MenuOptions::default(), &RouteContext::new("a/one"));
        assert_eq!(labels(&result.items), vec!["B", "C"]);
        assert!(!result.active_found);
    }

    #[test]
    fn missing_label_defaults_to_empty() {
        let items = vec![MenuItem::default().route("site/index")];
        let result = run(&items, &MenuOptions::default(), &RouteContext::default());
        assert_eq!(result.items[0].label, "");
    }

    #[test]
    fn labels_escaped_unless_disabled() {
        let items = vec![
            MenuItem::new("<b>Bold</b>"),
            MenuItem::new("<i>Raw</i>").encode(false),
        ];
        let result = run(&items, &MenuOptions::default(), &RouteContext::default());
        assert_eq!(result.items[0].label, "&lt;b&gt;Bold&lt;/b&gt;");
        assert_eq!(result.items[1].label, "<i>Raw</i>");

        let options = MenuOptions {
            encode_labels: false,
            ..MenuOptions::default()
        };
        let items = vec![MenuItem::new("a & b"), MenuItem::new("a & b").encode(true)];
        let result = run(&items, &options, &RouteContext::default());
        assert_eq!(result.items[0].label, "a & b");
        assert_eq!(result.items[1].label, "a &amp; b");
    }

    #[test]
    fn empty_branch_without_link_dropped() {
        let items = vec![
            MenuItem::new("Empty").child(MenuItem::new("Gone").hidden()),
            MenuItem::new("Kept"),
        ];
        let result = run(&items, &MenuOptions::default(), &RouteContext::default());
        assert_eq!(labels(&result.items), vec!["Kept"]);
    }

    #[test]
    fn empty_branch_with_link_keeps_item_without_children() {
        let items = vec![
            MenuItem::new("Linked")
                .route("site/index")
                .child(MenuItem::new("Gone").hidden()),
        ];
        let result = run(&items, &MenuOptions::default(), &RouteContext::default());
        assert_eq!(labels(&result.items), vec!["Linked"]);
        assert!(result.items[0].items.is_none());
    }

    #[test]
    fn empty_branch_kept_when_hiding_disabled() {
        let options = MenuOptions {
            hide_empty_items: false,
            ..MenuOptions::default()
        };
        let items = vec![MenuItem::new("Empty").children(vec![])];
        let result = run(&items, &options, &RouteContext::default());
        assert_eq!(labels(&result.items), vec!["Empty"]);
        assert!(result.items[0].items.is_none());
    }

    #[test]
    fn item_without_declared_children_is_never_pruned_as_empty() {
        // Emptiness pruning applies only to items that declared sub-items.
        let items = vec![MenuItem::new("Heading"), MenuItem::new("Section").children(vec![])];
        let result = run(&items, &MenuOptions::default(), &RouteContext::default());
        assert_eq!(labels(&result.items), vec!["Heading"]);
    }

    #[test]
    fn route_match_activates_item() {
        let items = vec![
            MenuItem::new("Home").route("site/index"),
            MenuItem::new("Products").route("product/index"),
        ];
        let result = run(
            &items,
            &MenuOptions::default(),
            &RouteContext::new("product/index"),
        );
        assert!(!result.items[0].active);
        assert!(result.items[1].active);
        assert!(result.active_found);
    }

    #[test]
    fn activate_items_disabled() {
        let options = MenuOptions {
            activate_items: false,
            ..MenuOptions::default()
        };
        let items = vec![MenuItem::new("Home").route("site/index")];
        let result = run(&items, &options, &RouteContext::new("site/index"));
        assert!(!result.items[0].active);
        assert!(!result.active_found);
    }

    #[test]
    fn parents_activated_only_when_enabled() {
        let items = vec![
            MenuItem::new("Root").child(
                MenuItem::new("Mid").child(MenuItem::new("Leaf").route("leaf/index")),
            ),
        ];
        let ctx = RouteContext::new("leaf/index");

        let result = run(&items, &MenuOptions::default(), &ctx);
        assert!(!result.items[0].active);
        assert!(result.active_found);

        let options = MenuOptions {
            activate_parents: true,
            ..MenuOptions::default()
        };
        let result = run(&items, &options, &ctx);
        let root = &result.items[0];
        let mid = &root.children()[0];
        let leaf = &mid.children()[0];
        assert!(root.active && mid.active && leaf.active);
    }

    #[test]
    fn explicit_active_is_never_overridden() {
        let options = MenuOptions {
            activate_parents: true,
            ..MenuOptions::default()
        };
        let items = vec![
            MenuItem::new("Parent")
                .active(false)
                .child(MenuItem::new("Child").route("x/y")),
            MenuItem::new("Forced").route("other/route").active(true),
        ];
        let result = run(&items, &options, &RouteContext::new("x/y"));
        assert!(!result.items[0].active);
        assert!(result.items[0].children()[0].active);
        assert!(result.items[1].active);
    }

    #[test]
    fn explicit_active_child_propagates() {
        let options = MenuOptions {
            activate_parents: true,
            ..MenuOptions::default()
        };
        let items = vec![MenuItem::new("Parent").child(MenuItem::new("Child").active(true))];
        let result = run(&items, &options, &RouteContext::default());
        assert!(result.items[0].active);
    }

    #[test]
    fn hidden_active_child_does_not_propagate() {
        let options = MenuOptions {
            activate_parents: true,
            ..MenuOptions::default()
        };
        let items = vec![
            MenuItem::new("Parent")
                .route("p/index")
                .child(MenuItem::new("Child").route("c/index").hidden()),
        ];
        let result = run(&items, &options, &RouteContext::new("c/index"));
        assert!(!result.items[0].active);
        assert!(!result.active_found);
    }

    #[test]
    fn too_deep_tree_rejected() {
        let mut item = MenuItem::new("leaf");
        for i in 0..5 {
            item = MenuItem::new(&format!("level {i}")).child(item);
        }
        let options = MenuOptions {
            max_depth: 3,
            ..MenuOptions::default()
        };
        let err = Normalizer::new(&options, &RouteContext::default(), &HtmlEscaper)
            .normalize(&[item])
            .unwrap_err();
        assert!(matches!(err, MenuError::TooDeep { max_depth: 3 }));
    }

    #[test]
    fn declared_empty_children_at_depth_limit() {
        let options = MenuOptions {
            max_depth: 1,
            ..MenuOptions::default()
        };
        let items = vec![
            MenuItem::new("A").route("a/index").children(vec![]),
            MenuItem::new("B").children(vec![]),
        ];
        let result = run(&items, &options, &RouteContext::default());
        assert_eq!(labels(&result.items), vec!["A"]);
        assert!(result.items[0].items.is_none());

        let nested = vec![MenuItem::new("A").child(MenuItem::new("A1"))];
        let err = Normalizer::new(&options, &RouteContext::default(), &HtmlEscaper)
            .normalize(&nested)
            .unwrap_err();
        assert!(matches!(err, MenuError::TooDeep { max_depth: 1 }));
    }

    #[test]
    fn free_function_applies_option_overrides() {
        let options = MenuOptions {
            route: Some("site/about".into()),
            ..MenuOptions::default()
        };
        let items = vec![MenuItem::new("About").route("site/about")];
        let result = normalize(&items, &options, &RouteContext::new("site/index")).unwrap();
        assert!(result.items[0].active);
    }
}
