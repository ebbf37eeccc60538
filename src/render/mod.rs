//! Template cache and rendering pipeline.
//!
//! Every page the site serves goes through this module. Templates live as
//! plain files under a configured root: `*.page.html` files are addressable
//! pages, `*.layout.html` files are shared fragments (header, footer,
//! navigation) that any page may extend. The [`TemplateStore`] compiles the
//! whole root into a [`TemplateCache`]; the [`Renderer`] resolves a page by
//! name, injects per-request data, and writes the output.
//!
//! # Cache modes
//!
//! - **Cached** (production): the cache is built once at startup and shared
//!   read-only across requests. Template edits require a restart.
//! - **Live** (development): every render call rebuilds the cache from disk
//!   and discards it afterwards, so edits show up on the next reload.
//!
//! # Example
//!
//! ```rust,ignore
//! let store = TemplateStore::new("./templates", HelperRegistry::standard());
//! let renderer = Renderer::cached(store.clone(), store.build_cache()?);
//!
//! let html = renderer
//!     .render(&session, &csrf, "home.page.html", TemplateData::default())
//!     .await?;
//! ```

mod helpers;
mod renderer;
mod store;

pub use helpers::HelperRegistry;
pub use renderer::Renderer;
pub use store::{TemplateCache, TemplateStore};
