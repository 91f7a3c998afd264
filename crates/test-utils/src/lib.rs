//! navmenu test utilities.
//!
//! Helpers for integration testing: menu fixtures, item builders, and
//! assertion utilities for rendered markup.

use navmenu::{MenuItem, MenuOptions, NormalizedMenuItem, RouteContext};

/// Create a test item linking to `route`.
pub fn test_item(label: &str, route: &str) -> TestItem {
    TestItem {
        item: MenuItem::new(label).route(route),
    }
}

/// Create a test item without a link.
pub fn test_heading(label: &str) -> TestItem {
    TestItem {
        item: MenuItem::new(label),
    }
}

/// A menu item builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestItem {
    pub item: MenuItem,
}

impl TestItem {
    /// Add a query parameter to the item's route.
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.item = self.item.param(key, value);
        self
    }

    /// Add a sub-item.
    pub fn with_child(mut self, child: TestItem) -> Self {
        self.item = self.item.child(child.item);
        self
    }

    /// Declare an empty sub-item list.
    pub fn with_empty_children(mut self) -> Self {
        self.item = self.item.children(Vec::new());
        self
    }

    /// Set as invisible.
    pub fn hidden(mut self) -> Self {
        self.item = self.item.hidden();
        self
    }

    /// Force the active state.
    pub fn with_active(mut self, active: bool) -> Self {
        self.item = self.item.active(active);
        self
    }

    /// Set a list-item attribute.
    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.item = self.item.option(key, value);
        self
    }

    pub fn build(self) -> MenuItem {
        self.item
    }
}

/// Build a list of items from fixtures.
pub fn items(fixtures: Vec<TestItem>) -> Vec<MenuItem> {
    fixtures.into_iter().map(TestItem::build).collect()
}

/// Options with parent activation enabled.
pub fn activating_options() -> MenuOptions {
    MenuOptions {
        activate_parents: true,
        ..MenuOptions::default()
    }
}

/// Options with first/last positional classes.
pub fn positional_options() -> MenuOptions {
    MenuOptions {
        first_item_css_class: Some("first".to_string()),
        last_item_css_class: Some("last".to_string()),
        ..MenuOptions::default()
    }
}

/// Find a normalized item by label anywhere in the tree.
pub fn find<'a>(items: &'a [NormalizedMenuItem], label: &str) -> Option<&'a NormalizedMenuItem> {
    items.iter().find_map(|item| {
        if item.label == label {
            Some(item)
        } else {
            find(item.children(), label)
        }
    })
}

/// Labels of a sibling list, in order.
pub fn labels(items: &[NormalizedMenuItem]) -> Vec<String> {
    items.iter().map(|i| i.label.clone()).collect()
}

/// Canned menu fixtures.
pub mod fixtures {
    use super::*;

    /// The shop menu: Home, and Products with a "New" sub-item.
    pub fn shop_menu() -> Vec<MenuItem> {
        items(vec![
            test_item("Home", "site/index"),
            test_item("Products", "product/index")
                .with_child(test_item("New", "product/index").with_param("tag", "new")),
        ])
    }

    /// The request context for browsing new products.
    pub fn new_products_context() -> RouteContext {
        RouteContext::new("product/index").with_param("tag", "new")
    }

    /// Menu as a JSON document.
    pub fn shop_menu_json() -> serde_json::Value {
        serde_json::json!([
            {"label": "Home", "url": {"route": "site/index"}},
            {
                "label": "Products",
                "url": {"route": "product/index"},
                "items": [
                    {"label": "New", "url": {"route": "product/index", "params": {"tag": "new"}}}
                ]
            }
        ])
    }
}

/// Assertion helpers for rendered markup.
pub mod assert_html {
    /// Assert the markup contains `needle`.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected markup to contain '{needle}', got:\n{haystack}"
        );
    }

    /// Assert the markup does not contain `needle`.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected markup to not contain '{needle}', got:\n{haystack}"
        );
    }

    /// Assert `first` appears before `second`.
    pub fn in_order(haystack: &str, first: &str, second: &str) {
        let a = haystack.find(first);
        let b = haystack.find(second);
        assert!(
            matches!((a, b), (Some(a), Some(b)) if a < b),
            "Expected '{first}' before '{second}', got:\n{haystack}"
        );
    }
}
