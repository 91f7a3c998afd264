//! Route context used for active-item matching.
//!
//! The context is passed explicitly into every render call. Menu options
//! may pin `route` and/or `params`, which then take precedence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::options::MenuOptions;

/// The current route and query parameters of the request being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteContext {
    /// Current route, without leading/trailing `/` (e.g., "product/index").
    pub route: String,
    /// Current query parameters.
    #[serde(default, deserialize_with = "crate::item::deserialize_params")]
    pub params: BTreeMap<String, String>,
}

impl RouteContext {
    /// Create a context for a route. Surrounding `/` are trimmed.
    pub fn new(route: &str) -> Self {
        Self {
            route: route.trim_matches('/').to_string(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Apply the `route`/`params` overrides configured in `options`.
    pub fn resolve(&self, options: &MenuOptions) -> RouteContext {
        RouteContext {
            route: options
                .route
                .as_deref()
                .map(|r| r.trim_matches('/').to_string())
                .unwrap_or_else(|| self.route.clone()),
            params: options
                .params
                .clone()
                .unwrap_or_else(|| self.params.clone()),
        }
    }
}
