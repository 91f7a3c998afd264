//! Active-item matching against the current route.

use crate::context::RouteContext;
use crate::item::MenuItem;

/// Whether `item` links to the route and parameters in `context`.
///
/// Only route links are matchable; opaque URLs and link-less items are
/// never active. Every query parameter of the link must be present in the
/// context with a loosely equal value. The reserved fragment key is ignored.
pub fn is_active(item: &MenuItem, context: &RouteContext) -> bool {
    let Some(link) = item.url.as_ref().and_then(|u| u.as_route()) else {
        return false;
    };

    if link.route.trim_matches('/') != context.route.trim_matches('/') {
        return false;
    }

    link.query_params().all(|(name, value)| {
        context
            .params
            .get(name)
            .is_some_and(|current| loose_eq(current, value))
    })
}

/// Query-string style equality: identical strings, or equal numbers.
///
/// `"2"`, `"2.0"` and `"02"` all compare equal; `"new"` only equals `"new"`.
pub fn loose_eq(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
