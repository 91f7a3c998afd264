//! Hierarchical navigation menus.
//!
//! Raw [`MenuItem`] trees are normalized (visibility filtering, empty-branch
//! pruning, active-state resolution against a [`RouteContext`]) and then
//! rendered to nested list markup.
//!
//! ```
//! use navmenu::{Menu, MenuItem, MenuOptions, RouteContext};
//!
//! let items = vec![
//!     MenuItem::new("Home").route("site/index"),
//!     MenuItem::new("Products")
//!         .route("product/index")
//!         .child(MenuItem::new("New").route("product/index").param("tag", "new")),
//! ];
//! let options = MenuOptions { activate_parents: true, ..MenuOptions::default() };
//! let context = RouteContext::new("product/index").with_param("tag", "new");
//!
//! let html = Menu::new(options).render(&items, &context).unwrap();
//! assert!(html.contains("<li class=\"active\"><a href=\"/product/index?tag=new\">New</a></li>"));
//! ```

pub mod context;
pub mod error;
pub mod html;
pub mod item;
pub mod matcher;
pub mod menu;
pub mod normalize;
pub mod options;
pub mod render;
pub mod template;

pub use context::RouteContext;
pub use error::{MenuError, MenuResult};
pub use item::{LinkSpec, MenuItem, NormalizedMenuItem, RouteLink, load_items};
pub use menu::Menu;
pub use normalize::{Normalized, Normalizer, normalize};
pub use options::MenuOptions;
pub use render::Renderer;
