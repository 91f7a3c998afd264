//! Menu widget: normalization plus rendering behind one entry point.

use tracing::debug;

use crate::context::RouteContext;
use crate::error::MenuResult;
use crate::html::{
    Escaper, HtmlEscaper, HtmlTagSerializer, RouteUrlResolver, TagSerializer, UrlResolver,
};
use crate::item::MenuItem;
use crate::normalize::{Normalized, Normalizer};
use crate::options::MenuOptions;
use crate::render::Renderer;

/// A configured menu. Reusable across requests and threads.
pub struct Menu {
    options: MenuOptions,
    escaper: Box<dyn Escaper>,
    urls: Box<dyn UrlResolver>,
    tags: Box<dyn TagSerializer>,
}

impl Menu {
    /// Create a menu with the HTML collaborators.
    pub fn new(options: MenuOptions) -> Self {
        Self {
            options,
            escaper: Box::new(HtmlEscaper),
            urls: Box::new(RouteUrlResolver::new()),
            tags: Box::new(HtmlTagSerializer),
        }
    }

    pub fn with_escaper<E: Escaper + 'static>(mut self, escaper: E) -> Self {
        self.escaper = Box::new(escaper);
        self
    }

    pub fn with_url_resolver<U: UrlResolver + 'static>(mut self, urls: U) -> Self {
        self.urls = Box::new(urls);
        self
    }

    pub fn with_tag_serializer<T: TagSerializer + 'static>(mut self, tags: T) -> Self {
        self.tags = Box::new(tags);
        self
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// Normalize `items` for the given request context.
    pub fn normalize(&self, items: &[MenuItem], context: &RouteContext) -> MenuResult<Normalized> {
        self.options.validate()?;

        let context = context.resolve(&self.options);
        Normalizer::new(&self.options, &context, self.escaper.as_ref()).normalize(items)
    }

    /// Normalize and render `items` for the given request context.
    ///
    /// Returns an empty string when no item survives normalization.
    pub fn render(&self, items: &[MenuItem], context: &RouteContext) -> MenuResult<String> {
        let normalized = self.normalize(items, context)?;
        let html = Renderer::new(
            &self.options,
            self.escaper.as_ref(),
            self.urls.as_ref(),
            self.tags.as_ref(),
        )
        .render(&normalized.items);

        debug!(bytes = html.len(), "rendered menu");
        Ok(html)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new(MenuOptions::default())
    }
}
