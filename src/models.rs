//! Page models and the per-request render context.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-request render context handed to the template engine.
///
/// Handlers fill in the page-specific maps; the renderer fills in the
/// cross-cutting fields (`flash`, `error`, `warning`, `csrf_token`)
/// immediately before execution. A `Default` instance is a valid input for
/// pages that need no data of their own.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    /// Simple string values keyed by name.
    pub string_map: HashMap<String, String>,

    /// Structured page data keyed by name.
    pub data: HashMap<String, serde_json::Value>,

    /// One-shot status message, consumed from the session per render.
    pub flash: Option<String>,

    /// One-shot error message, consumed from the session per render.
    pub error: Option<String>,

    /// One-shot warning message, consumed from the session per render.
    pub warning: Option<String>,

    /// Anti-forgery token for forms rendered on this page.
    pub csrf_token: String,
}

impl TemplateData {
    /// Create an empty render context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string value.
    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.string_map.insert(key.into(), value.into());
        self
    }

    /// Add a structured value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}

/// A room reservation as carried through the booking form and summary page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reservation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
