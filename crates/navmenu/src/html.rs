//! Markup collaborators used by the normalizer and renderer.
//!
//! Each concern sits behind a small trait so callers can plug in their own
//! escaping, URL generation or tag serialization:
//! - [`Escaper`]: escapes label text (and resolved URLs)
//! - [`UrlResolver`]: turns a [`LinkSpec`] into an href
//! - [`TagSerializer`]: builds one element from a tag, content and attributes

use std::collections::BTreeMap;

use crate::item::LinkSpec;

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Escape `& < > " '` for safe inclusion in HTML text and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Text escaping collaborator.
pub trait Escaper: Send + Sync {
    fn escape(&self, text: &str) -> String;
}

/// URL resolution collaborator.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, link: &LinkSpec) -> String;
}

/// Element serialization collaborator.
pub trait TagSerializer: Send + Sync {
    fn tag(&self, name: &str, content: &str, attributes: &BTreeMap<String, String>) -> String;
}

/// Escaper producing HTML entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Escaper for HtmlEscaper {
    fn escape(&self, text: &str) -> String {
        html_escape(text)
    }
}

/// Resolver that maps routes to `/{route}?{query}#{fragment}` paths.
///
/// Opaque URLs are returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct RouteUrlResolver {
    base_path: String,
}

impl RouteUrlResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every route URL with `base_path` (e.g., "/app").
    pub fn with_base_path(base_path: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }
}

impl UrlResolver for RouteUrlResolver {
    fn resolve(&self, link: &LinkSpec) -> String {
        let route = match link {
            LinkSpec::Url(url) => return url.clone(),
            LinkSpec::Route(route) => route,
        };

        let mut url = format!("{}/{}", self.base_path, route.route.trim_matches('/'));

        let query: Vec<String> = route
            .query_params()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }

        if let Some(fragment) = route.fragment() {
            url.push('#');
            url.push_str(&urlencoding::encode(fragment));
        }

        url
    }
}

/// Serializer producing HTML elements with escaped attribute values.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTagSerializer;

impl TagSerializer for HtmlTagSerializer {
    fn tag(&self, name: &str, content: &str, attributes: &BTreeMap<String, String>) -> String {
        let attrs: String = attributes
            .iter()
            .map(|(k, v)| format!(" {k}=\"{}\"", html_escape(v)))
            .collect();

        if VOID_ELEMENTS.contains(&name) {
            return format!("<{name}{attrs} />");
        }

        format!("<{name}{attrs}>{content}</{name}>")
    }
}
