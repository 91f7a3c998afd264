//! Normalized menu tree to markup.

use std::collections::BTreeMap;

use crate::html::{Escaper, TagSerializer, UrlResolver};
use crate::item::NormalizedMenuItem;
use crate::options::MenuOptions;
use crate::template::substitute;

/// Attribute key that selects the container element instead of being rendered.
pub const TAG_ATTRIBUTE: &str = "tag";

/// Renders normalized items. Holds no state between calls.
pub struct Renderer<'a> {
    options: &'a MenuOptions,
    escaper: &'a dyn Escaper,
    urls: &'a dyn UrlResolver,
    tags: &'a dyn TagSerializer,
}

impl<'a> Renderer<'a> {
    pub fn new(
        options: &'a MenuOptions,
        escaper: &'a dyn Escaper,
        urls: &'a dyn UrlResolver,
        tags: &'a dyn TagSerializer,
    ) -> Self {
        Self {
            options,
            escaper,
            urls,
            tags,
        }
    }

    /// Render a full menu: the sibling list wrapped in the outer container.
    ///
    /// An empty list renders as an empty string.
    pub fn render(&self, items: &[NormalizedMenuItem]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let (tag, attrs) = split_tag(&self.options.options, "ul");
        self.tags.tag(&tag, &self.render_items(items), &attrs)
    }

    /// Render one sibling list as newline-joined list items.
    pub fn render_items(&self, items: &[NormalizedMenuItem]) -> String {
        let n = items.len();

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut merged = self.options.item_options.clone();
                merged.extend(item.options.iter().map(|(k, v)| (k.clone(), v.clone())));
                let (tag, mut attrs) = split_tag(&merged, "li");

                let mut classes: Vec<&str> = Vec::new();
                if item.active {
                    classes.push(self.options.active_css_class.as_str());
                }
                if i == 0
                    && let Some(first) = &self.options.first_item_css_class
                {
                    classes.push(first);
                }
                if i == n - 1
                    && let Some(last) = &self.options.last_item_css_class
                {
                    classes.push(last);
                }
                add_css_classes(&mut attrs, &classes);

                let mut content = self.render_item(item);
                let children = item.children();
                if !children.is_empty() {
                    let template = item
                        .submenu_template
                        .as_deref()
                        .unwrap_or(&self.options.submenu_template);
                    let rendered = self.render_items(children);
                    content.push_str(&substitute(template, &[("{items}", rendered.as_str())]));
                }

                self.tags.tag(&tag, &content, &attrs)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render an item's own content from its template.
    pub fn render_item(&self, item: &NormalizedMenuItem) -> String {
        match &item.url {
            Some(link) => {
                let template = item
                    .template
                    .as_deref()
                    .unwrap_or(&self.options.link_template);
                let url = self.escaper.escape(&self.urls.resolve(link));
                substitute(
                    template,
                    &[("{url}", url.as_str()), ("{label}", item.label.as_str())],
                )
            }
            None => {
                let template = item
                    .template
                    .as_deref()
                    .unwrap_or(&self.options.label_template);
                substitute(template, &[("{label}", item.label.as_str())])
            }
        }
    }
}

/// Separate the container tag from the rendered attributes.
fn split_tag(
    attrs: &BTreeMap<String, String>,
    default: &str,
) -> (String, BTreeMap<String, String>) {
    let mut attrs = attrs.clone();
    let tag = attrs
        .remove(TAG_ATTRIBUTE)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    (tag, attrs)
}

/// Append classes after any existing `class` value, skipping duplicates.
///
/// The existing value is re-split on whitespace, so a class it already
/// carries is not repeated and runs of spaces collapse to one.
pub fn add_css_classes(attrs: &mut BTreeMap<String, String>, classes: &[&str]) {
    if classes.is_empty() {
        return;
    }

    let mut list: Vec<String> = attrs
        .get("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    for class in classes {
        for name in class.split_whitespace() {
            if !list.iter().any(|c| c == name) {
                list.push(name.to_string());
            }
        }
    }

    if !list.is_empty() {
        attrs.insert("class".to_string(), list.join(" "));
    }
}
