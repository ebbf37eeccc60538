//! Server-rendered bed & breakfast booking site.
//!
//! The heart of the crate is the [`render`] module: a template store that
//! discovers page and layout sources on disk and compiles them into a cache,
//! and a renderer that resolves pages by name, injects per-request
//! cross-cutting data (one-shot status messages, anti-forgery token), and
//! writes the result to the response.
//!
//! Everything else is thin glue around that pipeline:
//!
//! - [`config`]: Figment-based configuration (service, templates, session)
//! - [`session`]: cookie sessions, one-shot messages, CSRF token provisioning
//! - [`handlers`] / [`routes`]: the booking pages and their routing
//! - [`state`]: shared per-process state handed to handlers
//! - [`observability`]: tracing initialization

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
