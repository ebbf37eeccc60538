//! Per-request template resolution, enrichment, and execution.

use std::io::Write;
use std::sync::Arc;

use axum::response::Html;
use tower_sessions::Session;

use super::store::{TemplateCache, TemplateStore};
use crate::error::{Error, Result};
use crate::models::TemplateData;
use crate::session::{CsrfToken, Flash, FlashKind};

/// Renders named pages with per-request data.
///
/// A renderer is constructed once at startup in one of two modes and shared
/// across requests:
///
/// - [`Renderer::cached`]: serve every request from the cache built at
///   startup. The cache is read-only after construction, so concurrent
///   renders need no locking.
/// - [`Renderer::live`]: rebuild the cache from disk on every render call
///   and discard it afterwards, so template edits are reflected immediately.
#[derive(Debug, Clone)]
pub struct Renderer {
    store: TemplateStore,
    cache: Option<Arc<TemplateCache>>,
}

impl Renderer {
    /// Production mode: serve from the cache built at startup.
    #[must_use]
    pub fn cached(store: TemplateStore, cache: TemplateCache) -> Self {
        Self {
            store,
            cache: Some(Arc::new(cache)),
        }
    }

    /// Development mode: recompile templates on every render call.
    #[must_use]
    pub fn live(store: TemplateStore) -> Self {
        Self { store, cache: None }
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Resolve `page`, enrich `data` with the one-shot session messages and
    /// the request's anti-forgery token, execute into a buffer, and flush
    /// the buffer to `sink`.
    ///
    /// Template *execution* failures are logged and whatever partial output
    /// was produced is still flushed. Build failures (live mode) and unknown
    /// page names are returned as errors before anything touches the sink;
    /// a rejected sink write is returned as [`Error::Write`].
    pub async fn render_to<W>(
        &self,
        session: &Session,
        csrf: &CsrfToken,
        page: &str,
        mut data: TemplateData,
        sink: &mut W,
    ) -> Result<()>
    where
        W: Write + ?Sized,
    {
        // Live mode builds a private cache per call and discards it; a build
        // failure propagates rather than falling back to stale templates.
        let built;
        let cache = match &self.cache {
            Some(shared) => shared.as_ref(),
            None => {
                built = self.store.build_cache()?;
                &built
            }
        };

        let template = cache.get(page).ok_or_else(|| Error::TemplateNotFound {
            page: page.to_string(),
        })?;

        // One-shot messages are consumed here and nowhere else, after the
        // page has resolved, so a failed lookup leaves them pending.
        data.flash = Flash::pop(session, FlashKind::Flash).await?;
        data.error = Flash::pop(session, FlashKind::Error).await?;
        data.warning = Flash::pop(session, FlashKind::Warning).await?;
        data.csrf_token = csrf.token().to_string();

        let mut buf = Vec::new();
        if let Err(err) = template.render_to_write(&data, &mut buf) {
            tracing::error!(page, error = %err, "template execution failed, flushing partial output");
        }

        sink.write_all(&buf).map_err(Error::Write)?;
        Ok(())
    }

    /// Render `page` into an HTML response body for a handler.
    pub async fn render(
        &self,
        session: &Session,
        csrf: &CsrfToken,
        page: &str,
        data: TemplateData,
    ) -> Result<Html<String>> {
        let mut buf = Vec::new();
        self.render_to(session, csrf, page, data, &mut buf).await?;
        Ok(Html(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HelperRegistry;
    use std::fs;
    use tempfile::TempDir;
    use tower_sessions::Session;
    use tower_sessions_memory_store::MemoryStore;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn test_csrf() -> CsrfToken {
        CsrfToken::new("test-token-123".to_string())
    }

    fn write(dir: &TempDir, name: &str, body: &str) {
        fs::write(dir.path().join(name), body).unwrap();
    }

    fn store_for(dir: &TempDir) -> TemplateStore {
        TemplateStore::new(dir.path(), HelperRegistry::standard())
    }

    async fn render_string(renderer: &Renderer, session: &Session, page: &str) -> String {
        renderer
            .render(session, &test_csrf(), page, TemplateData::default())
            .await
            .unwrap()
            .0
    }

    #[tokio::test]
    async fn test_renders_registered_page() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "home.page.html", "<p>welcome</p>");
        let store = store_for(&dir);
        let renderer = Renderer::cached(store.clone(), store.build_cache().unwrap());

        let html = render_string(&renderer, &test_session(), "home.page.html").await;
        assert_eq!(html, "<p>welcome</p>");
    }

    #[tokio::test]
    async fn test_unknown_page_writes_nothing_to_sink() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "home.page.html", "<p>welcome</p>");
        let store = store_for(&dir);
        let renderer = Renderer::cached(store.clone(), store.build_cache().unwrap());

        let mut sink = Vec::new();
        let err = renderer
            .render_to(
                &test_session(),
                &test_csrf(),
                "nonexistent-page",
                TemplateData::default(),
                &mut sink,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::TemplateNotFound { ref page } if page == "nonexistent-page"));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_flash_is_consumed_on_first_render() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "home.page.html", "[{{ flash }}]");
        let store = store_for(&dir);
        let renderer = Renderer::cached(store.clone(), store.build_cache().unwrap());
        let session = test_session();

        Flash::push(&session, FlashKind::Flash, "reservation saved")
            .await
            .unwrap();

        let first = render_string(&renderer, &session, "home.page.html").await;
        assert_eq!(first, "[reservation saved]");

        let second = render_string(&renderer, &session, "home.page.html").await;
        assert_eq!(second, "[]");
    }

    #[tokio::test]
    async fn test_failed_lookup_leaves_flash_pending() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "home.page.html", "[{{ flash }}]");
        let store = store_for(&dir);
        let renderer = Renderer::cached(store.clone(), store.build_cache().unwrap());
        let session = test_session();

        Flash::push(&session, FlashKind::Flash, "still here")
            .await
            .unwrap();

        let mut sink = Vec::new();
        let _ = renderer
            .render_to(
                &session,
                &test_csrf(),
                "missing.page.html",
                TemplateData::default(),
                &mut sink,
            )
            .await;

        let html = render_string(&renderer, &session, "home.page.html").await;
        assert_eq!(html, "[still here]");
    }

    #[tokio::test]
    async fn test_csrf_token_reaches_the_page() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "form.page.html", "token={{ csrf_token }}");
        let store = store_for(&dir);
        let renderer = Renderer::cached(store.clone(), store.build_cache().unwrap());

        let html = render_string(&renderer, &test_session(), "form.page.html").await;
        assert_eq!(html, "token=test-token-123");
    }

    #[tokio::test]
    async fn test_live_mode_reflects_disk_edits() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "home.page.html", "version one");
        let renderer = Renderer::live(store_for(&dir));
        let session = test_session();

        let before = render_string(&renderer, &session, "home.page.html").await;
        assert_eq!(before, "version one");

        write(&dir, "home.page.html", "version two");
        let after = render_string(&renderer, &session, "home.page.html").await;
        assert_eq!(after, "version two");
    }

    #[tokio::test]
    async fn test_cached_mode_ignores_disk_edits() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "home.page.html", "version one");
        let store = store_for(&dir);
        let renderer = Renderer::cached(store.clone(), store.build_cache().unwrap());
        let session = test_session();

        write(&dir, "home.page.html", "version two");
        let html = render_string(&renderer, &session, "home.page.html").await;
        assert_eq!(html, "version one");
    }

    #[tokio::test]
    async fn test_live_mode_propagates_build_failure() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "home.page.html", "fine");
        let renderer = Renderer::live(store_for(&dir));
        let session = test_session();

        // First render succeeds, then the page breaks on disk.
        let _ = render_string(&renderer, &session, "home.page.html").await;
        write(&dir, "home.page.html", "{{ broken");

        let mut sink = Vec::new();
        let err = renderer
            .render_to(
                &session,
                &test_csrf(),
                "home.page.html",
                TemplateData::default(),
                &mut sink,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Compile { .. }));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_execution_failure_still_flushes_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        // The include resolves at execution time, after the prefix has
        // already been written out.
        write(
            &dir,
            "home.page.html",
            "BEFORE{% include \"missing.html\" %}AFTER",
        );
        let store = store_for(&dir);
        let renderer = Renderer::cached(store.clone(), store.build_cache().unwrap());

        let mut sink = Vec::new();
        renderer
            .render_to(
                &test_session(),
                &test_csrf(),
                "home.page.html",
                TemplateData::default(),
                &mut sink,
            )
            .await
            .unwrap();

        let flushed = String::from_utf8(sink).unwrap();
        assert!(flushed.contains("BEFORE"));
        assert!(!flushed.contains("AFTER"));
    }
}
