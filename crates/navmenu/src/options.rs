//! Menu options, loadable from TOML, YAML or JSON.
//!
//! Every field is optional in the source document; missing fields take the
//! defaults below.
//!
//! ```toml
//! activate_parents = true
//! first_item_css_class = "first"
//!
//! [options]
//! class = "nav"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{MenuError, MenuResult};

/// Default nesting limit for menu trees.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Rendering and activation options for a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    /// Content template for items with a link. Tokens: `{url}`, `{label}`.
    pub link_template: String,
    /// Content template for items without a link. Token: `{label}`.
    pub label_template: String,
    /// Wrapper for a rendered child list. Token: `{items}`.
    pub submenu_template: String,
    /// Escape labels during normalization.
    pub encode_labels: bool,
    /// Class added to active items.
    pub active_css_class: String,
    /// Activate items whose route link matches the current route.
    pub activate_items: bool,
    /// Activate items that have an active descendant.
    pub activate_parents: bool,
    /// Drop items whose sub-items were all filtered out and that have no link.
    pub hide_empty_items: bool,
    /// Class added to the first item of every sibling list.
    pub first_item_css_class: Option<String>,
    /// Class added to the last item of every sibling list.
    pub last_item_css_class: Option<String>,
    /// Route to match against instead of the request context.
    pub route: Option<String>,
    /// Parameters to match against instead of the request context.
    #[serde(deserialize_with = "crate::item::deserialize_optional_params")]
    pub params: Option<BTreeMap<String, String>>,
    /// Attributes applied to every list item (per-item options win).
    pub item_options: BTreeMap<String, String>,
    /// Attributes of the outer container. A `tag` key selects the element.
    pub options: BTreeMap<String, String>,
    /// Maximum nesting depth before the tree is rejected as malformed.
    pub max_depth: usize,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            link_template: "<a href=\"{url}\">{label}</a>".to_string(),
            label_template: "{label}".to_string(),
            submenu_template: "\n<ul>\n{items}\n</ul>\n".to_string(),
            encode_labels: true,
            active_css_class: "active".to_string(),
            activate_items: true,
            activate_parents: false,
            hide_empty_items: true,
            first_item_css_class: None,
            last_item_css_class: None,
            route: None,
            params: None,
            item_options: BTreeMap::new(),
            options: BTreeMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MenuOptions {
    /// Load options from a file, choosing the format by extension.
    ///
    /// `.toml`, `.yml`/`.yaml` and `.json` are supported.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read menu options file: {}", path.display()))?;

        Self::parse_str(&content, path)
    }

    /// Parse options from a string; `path` selects the format and labels errors.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let options: MenuOptions = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(content).with_context(|| {
                format!("failed to parse menu options TOML at {}", path.display())
            })?,
            Some("yml" | "yaml") => serde_yml::from_str(content).with_context(|| {
                format!("failed to parse menu options YAML at {}", path.display())
            })?,
            Some("json") => serde_json::from_str(content).with_context(|| {
                format!("failed to parse menu options JSON at {}", path.display())
            })?,
            _ => anyhow::bail!(
                "unsupported menu options format: {} (expected .toml, .yml, .yaml or .json)",
                path.display()
            ),
        };

        options
            .validate()
            .with_context(|| format!("invalid menu options in {}", path.display()))?;
        Ok(options)
    }

    /// Reject option combinations that cannot render a menu.
    pub fn validate(&self) -> MenuResult<()> {
        if self.max_depth == 0 {
            return Err(MenuError::InvalidOptions(
                "max_depth must be at least 1".to_string(),
            ));
        }

        if self.active_css_class.trim().is_empty() {
            return Err(MenuError::InvalidOptions(
                "active_css_class must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
