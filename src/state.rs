//! Application state shared across handlers

use std::sync::Arc;

use crate::{config::Config, render::Renderer};

/// Shared per-process state handed to every handler.
///
/// Cheap to clone; both members sit behind `Arc`. Built once at startup
/// and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(config: Config, renderer: Renderer) -> Self {
        Self {
            config: Arc::new(config),
            renderer: Arc::new(renderer),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}
