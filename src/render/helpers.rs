//! Shared template helper functions.
//!
//! Helpers are collected in a registry that is built once at startup and
//! handed to the template store, which installs them into every compiled
//! environment. Templates see them as filters and functions.

use chrono::NaiveDate;
use minijinja::Environment;

/// Named, versioned collection of functions available to every template.
#[derive(Debug, Clone, Copy)]
pub struct HelperRegistry {
    name: &'static str,
    version: &'static str,
}

impl HelperRegistry {
    /// The standard helper set used by the site.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            name: "standard",
            version: "1",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Install every helper into a template environment.
    pub fn install(&self, env: &mut Environment<'static>) {
        env.add_filter("humandate", humandate);
        env.add_filter("truncate", truncate);
        env.add_function("pluralize", pluralize);
    }
}

/// Format an ISO date (`2026-08-01`) for display (`01.08.2026`).
///
/// Values that do not parse as dates pass through unchanged.
fn humandate(value: String) -> String {
    match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => value,
    }
}

/// Truncate text with ellipsis.
fn truncate(s: String, max_len: usize) -> String {
    if s.len() <= max_len {
        s
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Pluralize a word based on count.
fn pluralize(count: i64, singular: String, plural: String) -> String {
    if count == 1 {
        singular
    } else {
        plural
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humandate() {
        assert_eq!(humandate("2026-08-01".to_string()), "01.08.2026");
        assert_eq!(humandate("not a date".to_string()), "not a date");
        assert_eq!(humandate(String::new()), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello, World!".to_string(), 5), "He...");
        assert_eq!(truncate("Hi".to_string(), 10), "Hi");
        assert_eq!(truncate(String::new(), 5), "");
        assert_eq!(truncate("Test".to_string(), 4), "Test");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(
            pluralize(1, "night".to_string(), "nights".to_string()),
            "night"
        );
        assert_eq!(
            pluralize(2, "night".to_string(), "nights".to_string()),
            "nights"
        );
        assert_eq!(
            pluralize(0, "night".to_string(), "nights".to_string()),
            "nights"
        );
    }

    #[test]
    fn test_registry_installs_helpers() {
        let mut env = Environment::new();
        HelperRegistry::standard().install(&mut env);
        env.add_template_owned(
            "t".to_string(),
            "{{ \"2026-08-01\" | humandate }} {{ pluralize(2, \"night\", \"nights\") }}".to_string(),
        )
        .unwrap();
        let rendered = env
            .get_template("t")
            .unwrap()
            .render(minijinja::context! {})
            .unwrap();
        assert_eq!(rendered, "01.08.2026 nights");
    }

    #[test]
    fn test_registry_identity() {
        let registry = HelperRegistry::standard();
        assert_eq!(registry.name(), "standard");
        assert_eq!(registry.version(), "1");
    }
}
