//! Menu item data model.
//!
//! Raw items arrive as JSON/YAML documents or are assembled in code with
//! the builder methods on [`MenuItem`]. Normalization turns them into
//! [`NormalizedMenuItem`] trees, which are what the renderer consumes.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Parameter key reserved for the URL fragment.
pub const FRAGMENT_PARAM: &str = "#";

/// Link target of a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkSpec {
    /// Opaque URL, rendered verbatim and never considered for activation.
    Url(String),
    /// Structured route descriptor.
    Route(RouteLink),
}

impl LinkSpec {
    /// Create a route link with no parameters.
    pub fn route(route: &str) -> Self {
        LinkSpec::Route(RouteLink::new(route))
    }

    /// Create an opaque URL link.
    pub fn url(url: &str) -> Self {
        LinkSpec::Url(url.into())
    }

    /// Get the route descriptor, if this is a route link.
    pub fn as_route(&self) -> Option<&RouteLink> {
        match self {
            LinkSpec::Route(r) => Some(r),
            LinkSpec::Url(_) => None,
        }
    }
}

/// A route plus its query parameters and optional fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLink {
    /// Route path (e.g., "product/index").
    pub route: String,
    /// Query parameters. Scalar values are coerced to strings, nulls dropped.
    #[serde(
        default,
        deserialize_with = "deserialize_params",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub params: BTreeMap<String, String>,
    /// URL fragment, without the leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl RouteLink {
    pub fn new(route: &str) -> Self {
        Self {
            route: route.into(),
            params: BTreeMap::new(),
            fragment: None,
        }
    }

    /// Fragment from the dedicated field, else from the reserved `#` param.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment
            .as_deref()
            .or_else(|| self.params.get(FRAGMENT_PARAM).map(String::as_str))
    }

    /// Query parameters excluding the reserved fragment key.
    pub fn query_params(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter().filter(|(k, _)| *k != FRAGMENT_PARAM)
    }
}

/// Coerce a parameter value to its query-string form. Nulls are dropped.
fn param_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(String::from(if b { "1" } else { "0" })),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn coerce_params(value: Value) -> Option<BTreeMap<String, String>> {
    match value {
        Value::Object(map) => Some(
            map.into_iter()
                .filter_map(|(k, v)| param_value(v).map(|v| (k, v)))
                .collect(),
        ),
        _ => None,
    }
}

/// Coerce scalar parameter values to strings, the way query strings compare.
///
/// Anything other than a mapping yields no parameters.
pub(crate) fn deserialize_params<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_params(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Like [`deserialize_params`], keeping "not given" apart from "empty".
pub(crate) fn deserialize_optional_params<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_params(Value::deserialize(deserializer)?))
}

// Optional item fields fall back to their defaults when the source has the
// wrong shape, so one bad field never rejects the whole tree.

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_link<'de, D>(deserializer: D) -> Result<Option<LinkSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LinkSpec::deserialize(Value::deserialize(deserializer)?).ok())
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Vec<MenuItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .map(MenuItem::deserialize)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// A raw menu item as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display text (defaults to empty).
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    /// Link target. Items without one render with the label template.
    #[serde(
        default,
        alias = "link_target",
        deserialize_with = "lenient_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<LinkSpec>,
    /// Visibility (defaults to visible).
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub visible: Option<bool>,
    /// Sub-items. `None` and `Some(vec![])` are distinct.
    #[serde(
        default,
        alias = "children",
        deserialize_with = "lenient_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub items: Option<Vec<MenuItem>>,
    /// Explicit active state; computed when absent.
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub active: Option<bool>,
    /// Per-item content template.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub template: Option<String>,
    /// Per-item sub-list template.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub submenu_template: Option<String>,
    /// Extra list-item attributes. A `tag` key selects the container tag.
    #[serde(
        default,
        alias = "item_attributes",
        deserialize_with = "deserialize_params",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub options: BTreeMap<String, String>,
    /// Per-item override of label encoding.
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub encode: Option<bool>,
}

impl MenuItem {
    /// Create an item with a label.
    pub fn new(label: &str) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn link(mut self, link: LinkSpec) -> Self {
        self.url = Some(link);
        self
    }

    /// Link to a route with no parameters.
    pub fn route(self, route: &str) -> Self {
        self.link(LinkSpec::route(route))
    }

    /// Add a parameter to the item's route link.
    ///
    /// Does nothing if the item links to an opaque URL. An item without a
    /// link gets an empty route.
    pub fn param(mut self, key: &str, value: &str) -> Self {
        let link = self.url.get_or_insert_with(|| LinkSpec::route(""));
        if let LinkSpec::Route(r) = link {
            r.params.insert(key.into(), value.into());
        }
        self
    }

    /// Link to an opaque URL.
    pub fn href(self, url: &str) -> Self {
        self.link(LinkSpec::url(url))
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Mark as invisible.
    pub fn hidden(self) -> Self {
        self.visible(false)
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Append a sub-item, declaring `items` if it was absent.
    pub fn child(mut self, item: MenuItem) -> Self {
        self.items.get_or_insert_with(Vec::new).push(item);
        self
    }

    /// Replace the sub-items. An empty vector still counts as declared.
    pub fn children(mut self, items: Vec<MenuItem>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn template(mut self, template: &str) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn submenu_template(mut self, template: &str) -> Self {
        self.submenu_template = Some(template.into());
        self
    }

    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = Some(encode);
        self
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.visible == Some(false)
    }
}

/// A menu item after visibility filtering and active-state resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMenuItem {
    /// Label, already escaped when encoding was enabled.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<LinkSpec>,
    /// Surviving sub-items; never `Some` of an empty vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NormalizedMenuItem>>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submenu_template: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl NormalizedMenuItem {
    /// Surviving sub-items, empty when there are none.
    pub fn children(&self) -> &[NormalizedMenuItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// Parse an item tree from a JSON string.
pub fn parse_items_json(content: &str) -> Result<Vec<MenuItem>> {
    serde_json::from_str(content).context("failed to parse menu items JSON")
}

/// Parse an item tree from a YAML string.
pub fn parse_items_yaml(content: &str) -> Result<Vec<MenuItem>> {
    serde_yml::from_str(content).context("failed to parse menu items YAML")
}

/// Load an item tree from a `.json`, `.yml` or `.yaml` file.
pub fn load_items(path: &Path) -> Result<Vec<MenuItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read menu items file: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yml" | "yaml") => parse_items_yaml(&content),
        _ => parse_items_json(&content),
    }
    .with_context(|| format!("invalid menu items in {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_route_link_with_params() {
        let items = parse_items_json(
            r#"[{"label": "New", "url": {"route": "product/index", "params": {"tag": "new", "page": 2, "x": null}}}]"#,
        )
        .unwrap();

        let route = items[0].url.as_ref().unwrap().as_route().unwrap();
        assert_eq!(route.route, "product/index");
        assert_eq!(route.params.get("tag"), Some(&"new".to_string()));
        assert_eq!(route.params.get("page"), Some(&"2".to_string()));
        assert!(!route.params.contains_key("x"));
    }

    #[test]
    fn parse_opaque_url() {
        let items = parse_items_json(r#"[{"label": "Docs", "url": "https://example.com"}]"#).unwrap();
        assert_eq!(items[0].url, Some(LinkSpec::url("https://example.com")));
    }

    #[test]
    fn absent_and_empty_items_are_distinct() {
        let items =
            parse_items_json(r#"[{"label": "A"}, {"label": "B", "items": []}, {"children": []}]"#)
                .unwrap();
        assert!(items[0].items.is_none());
        assert_eq!(items[1].items, Some(vec![]));
        assert_eq!(items[2].items, Some(vec![]));
    }

    #[test]
    fn malformed_fields_fall_back_to_defaults() {
        let items = parse_items_json(
            r#"[
                {"label": 5, "url": 42, "visible": "yes", "active": 1, "encode": "no",
                 "template": [], "options": "x", "items": "none"},
                {"label": "B", "options": {"class": "nav", "data-id": 7}}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        let bad = &items[0];
        assert_eq!(bad.label, None);
        assert_eq!(bad.url, None);
        assert_eq!(bad.visible, None);
        assert_eq!(bad.active, None);
        assert_eq!(bad.encode, None);
        assert_eq!(bad.template, None);
        assert!(bad.options.is_empty());
        assert!(bad.items.is_none());
        assert!(!bad.is_hidden());

        assert_eq!(items[1].options.get("data-id"), Some(&"7".to_string()));
    }

    #[test]
    fn malformed_fields_in_nested_items() {
        let items = parse_items_json(
            r#"[{"label": "P", "items": [{"label": "C", "visible": "no", "url": {"params": {}}}]}]"#,
        )
        .unwrap();

        let child = &items[0].items.as_ref().unwrap()[0];
        assert_eq!(child.label.as_deref(), Some("C"));
        assert_eq!(child.visible, None);
        assert_eq!(child.url, None);
    }

    #[test]
    fn parse_yaml_items() {
        let yaml = r#"
- label: Home
  url:
    route: site/index
- label: Hidden
  visible: false
"#;
        let items = parse_items_yaml(yaml).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_hidden());
    }

    #[test]
    fn builder_param_creates_route() {
        let item = MenuItem::new("New").route("product/index").param("tag", "new");
        let route = item.url.unwrap();
        let route = route.as_route().unwrap();
        assert_eq!(route.params.get("tag"), Some(&"new".to_string()));
    }

    #[test]
    fn builder_param_ignored_for_opaque_url() {
        let item = MenuItem::new("Ext").href("https://example.com").param("a", "b");
        assert_eq!(item.url, Some(LinkSpec::url("https://example.com")));
    }

    #[test]
    fn fragment_falls_back_to_reserved_param() {
        let mut link = RouteLink::new("site/page");
        link.params.insert(FRAGMENT_PARAM.into(), "top".into());
        link.params.insert("id".into(), "1".into());
        assert_eq!(link.fragment(), Some("top"));
        assert_eq!(link.query_params().count(), 1);
    }
}
