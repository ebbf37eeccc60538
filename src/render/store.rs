//! Template discovery and compilation.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::Environment;

use super::HelperRegistry;
use crate::error::{Error, Result};

const PAGE_SUFFIX: &str = ".page.html";
const LAYOUT_SUFFIX: &str = ".layout.html";

/// Builds a [`TemplateCache`] from the template root on disk.
///
/// Discovery is flat: only files directly under the root are considered.
/// Files ending in `.page.html` become addressable pages; files ending in
/// `.layout.html` are compiled alongside them so any page can extend any
/// fragment.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
    helpers: HelperRegistry,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>, helpers: HelperRegistry) -> Self {
        Self {
            root: root.into(),
            helpers,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compile every page under the root against the shared layout fragments.
    ///
    /// Either a fully valid cache is returned, or the first failure aborts
    /// the whole build; a partial cache is never handed out. An empty root
    /// is valid and yields an empty cache.
    pub fn build_cache(&self) -> Result<TemplateCache> {
        let layouts = self.sources_with_suffix(LAYOUT_SUFFIX)?;
        let pages = self.sources_with_suffix(PAGE_SUFFIX)?;

        let mut env = Environment::new();
        self.helpers.install(&mut env);

        // Layouts go in first so every page can resolve its parent blocks.
        for path in &layouts {
            self.compile_into(&mut env, path)?;
        }

        let mut names = Vec::with_capacity(pages.len());
        for path in &pages {
            let name = self.compile_into(&mut env, path)?;
            if names.contains(&name) {
                // Flat discovery cannot produce duplicates, but if it ever
                // does, the later file wins.
                tracing::warn!(name = %name, "duplicate page name, later file overrides earlier one");
            } else {
                names.push(name);
            }
        }

        Ok(TemplateCache { env, pages: names })
    }

    /// Read and compile one source file, returning its template name.
    fn compile_into(&self, env: &mut Environment<'static>, path: &Path) -> Result<String> {
        let name = base_name(path);
        let body = fs::read_to_string(path).map_err(|source| Error::Discovery {
            root: self.root.clone(),
            source,
        })?;
        env.add_template_owned(name.clone(), body)
            .map_err(|source| Error::Compile {
                name: name.clone(),
                source: Box::new(source),
            })?;
        Ok(name)
    }

    /// Enumerate files under the root whose name ends with `suffix`, in
    /// sorted order so builds are deterministic.
    fn sources_with_suffix(&self, suffix: &str) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root).map_err(|source| Error::Discovery {
            root: self.root.clone(),
            source,
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Discovery {
                root: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            let is_match = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix));
            if is_match && path.is_file() {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }
}

/// Template name: the file's base name, extension included.
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ready-to-execute templates keyed by page name.
///
/// Layout fragments live inside the compiled environment but are not
/// addressable: only names registered as pages resolve through [`get`].
///
/// [`get`]: TemplateCache::get
#[derive(Debug)]
pub struct TemplateCache {
    env: Environment<'static>,
    pages: Vec<String>,
}

impl TemplateCache {
    /// Look up a compiled page by name.
    #[must_use]
    pub fn get(&self, page: &str) -> Option<minijinja::Template<'_, '_>> {
        if !self.pages.iter().any(|p| p == page) {
            return None;
        }
        self.env.get_template(page).ok()
    }

    /// Names of every registered page, in discovery order.
    #[must_use]
    pub fn page_names(&self) -> &[String] {
        &self.pages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
