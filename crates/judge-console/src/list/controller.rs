//! Generic remote list controller.
//!
//! A [`ListController`] owns one canonical [`ListRequest`] and the
//! [`ListState`] rendered from it. Mutators derive the next request
//! synchronously; whenever the stored request changes by value, exactly one
//! fetch is spawned on the tokio runtime the controller was created on.
//!
//! Every fetch is tagged with a generation number. A response is applied
//! only if its generation is still the latest issued, so a slow response can
//! never overwrite the result of a newer request.
//!
//! # Example
//!
//! ```ignore
//! use judge_console::prelude::*;
//! use judge_console::resources::{Problems, ProblemFilters, Difficulty};
//!
//! let problems = Problems::controller(client.clone(), ListOptions::default())?;
//! problems.state_changed().connect(|state| render_table(state));
//!
//! problems.set_filters(ProblemFilters {
//!     difficulty: Some(Difficulty::Hard),
//!     ..Default::default()
//! })?;
//! problems.set_keyword("  shortest path ");
//! ```

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use judge_console_core::logging::{span_names, targets};
use judge_console_core::{DEFAULT_DEBOUNCE, Debouncer, Property, Signal};
use judge_console_net::PageMeta;
use parking_lot::{Mutex, ReentrantMutex};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::Instrument;

use super::request::{ListFilters, ListRequest, SortOrder};
use super::source::{ListSource, SourceRequest};
use super::state::ListState;
use crate::error::ControllerError;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Construction options for a [`ListController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Initial page size.
    /// Default: 10
    pub limit: u32,
    /// Quiet period before a typed keyword is applied.
    /// Default: 500ms
    pub debounce: Duration,
    /// Whether the first page is requested on construction.
    /// Default: true
    pub fetch_on_create: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            fetch_on_create: true,
        }
    }
}

impl ListOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the keyword debounce window.
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Enable or disable the initial fetch.
    pub fn fetch_on_create(mut self, fetch: bool) -> Self {
        self.fetch_on_create = fetch;
        self
    }
}

/// Drives one remote list: request derivation, fetch lifecycle and
/// debounced keyword search.
///
/// Cloning a controller yields another handle to the same list.
pub struct ListController<S: ListSource> {
    inner: Arc<ControllerInner<S>>,
}

struct ControllerInner<S: ListSource> {
    source: S,
    runtime: Handle,
    defaults: SourceRequest<S>,
    request: Property<SourceRequest<S>>,
    keyword: Property<String>,
    state: watch::Sender<ListState<S::Item>>,
    /// Held while a request is stored and its generation taken, so requests
    /// win in the order they were stored.
    issue_lock: Mutex<()>,
    generation: AtomicU64,
    /// Bumped on every state write, under the channel lock.
    revision: AtomicU64,
    /// Last revision handed to `state_changed`. Reentrant so a slot may
    /// mutate the controller.
    published: ReentrantMutex<Cell<u64>>,
    debouncer: Debouncer,
    request_changed: Signal<SourceRequest<S>>,
    state_changed: Signal<ListState<S::Item>>,
    keyword_changed: Signal<String>,
}

impl<S: ListSource> ListController<S> {
    /// Create a controller on the current tokio runtime.
    ///
    /// Fails with [`ControllerError::NoRuntime`] outside a runtime context.
    pub fn new(source: S, options: ListOptions) -> Result<Self, ControllerError> {
        let runtime = Handle::try_current().map_err(|_| ControllerError::NoRuntime)?;
        Ok(Self::with_handle(source, options, runtime))
    }

    /// Create a controller that spawns its fetches on `runtime`.
    pub fn with_handle(source: S, options: ListOptions, runtime: Handle) -> Self {
        let (sort_field, sort_order) = source.default_sort();
        let defaults = ListRequest::new(options.limit, sort_field, sort_order);
        let (state, _) = watch::channel(ListState::default());

        let inner = Arc::new(ControllerInner {
            debouncer: Debouncer::with_handle(options.debounce, runtime.clone()),
            request: Property::new(defaults.clone()),
            keyword: Property::new(String::new()),
            issue_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
            revision: AtomicU64::new(0),
            published: ReentrantMutex::new(Cell::new(0)),
            request_changed: Signal::new(),
            state_changed: Signal::new(),
            keyword_changed: Signal::new(),
            source,
            runtime,
            defaults,
            state,
        });

        tracing::debug!(
            target: targets::LIST,
            resource = inner.source.name(),
            limit = inner.defaults.limit,
            "list controller created"
        );

        if options.fetch_on_create {
            let fetch = inner.issue_current();
            inner.launch(fetch);
        }
        Self { inner }
    }

    /// The backing source.
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Snapshot of the current list state.
    pub fn state(&self) -> ListState<S::Item> {
        self.inner.state.borrow().clone()
    }

    /// The request currently in effect.
    pub fn request(&self) -> SourceRequest<S> {
        self.inner.request.get()
    }

    /// The request a fresh or reset controller uses.
    pub fn default_request(&self) -> &SourceRequest<S> {
        &self.inner.defaults
    }

    /// The raw keyword as typed, before debouncing and trimming.
    pub fn keyword(&self) -> String {
        self.inner.keyword.get()
    }

    pub fn items(&self) -> Vec<S::Item> {
        self.inner.state.borrow().items.clone()
    }

    pub fn meta(&self) -> Option<PageMeta> {
        self.inner.state.borrow().meta
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    /// Whether a typed keyword is still waiting for its debounce window.
    pub fn is_keyword_pending(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// A receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ListState<S::Item>> {
        self.inner.state.subscribe()
    }

    /// Wait until the most recently issued fetch has settled.
    ///
    /// Returns immediately when nothing is loading. A keyword still inside
    /// its debounce window is not waited for.
    pub async fn wait_until_idle(&self) {
        let mut updates = self.inner.state.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = updates.wait_for(|state| !state.is_loading).await;
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Emitted with the new request whenever it changes by value.
    pub fn request_changed(&self) -> &Signal<SourceRequest<S>> {
        &self.inner.request_changed
    }

    /// Emitted after every fetch start and every applied fetch result.
    pub fn state_changed(&self) -> &Signal<ListState<S::Item>> {
        &self.inner.state_changed
    }

    /// Emitted with the raw keyword on every edit.
    pub fn keyword_changed(&self) -> &Signal<String> {
        &self.inner.keyword_changed
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Replace the filters and return to the first page.
    ///
    /// Invalid filter sets are rejected and leave the request untouched.
    pub fn set_filters(&self, filters: S::Filters) -> Result<(), ControllerError> {
        if let Err(err) = filters.validate() {
            tracing::debug!(
                target: targets::LIST,
                resource = self.inner.source.name(),
                error = %err,
                "rejected filters"
            );
            return Err(err.into());
        }
        self.inner.apply(|request| request.with_filters(filters));
        Ok(())
    }

    /// Record a keystroke in the search box.
    ///
    /// The raw text is stored immediately. After the debounce window passes
    /// without another call, the trimmed text becomes the request's search
    /// term (an empty term clears the search) and the page returns to 1.
    pub fn set_keyword(&self, text: impl Into<String>) {
        let text = text.into();
        if self.inner.keyword.set(text.clone()) {
            self.inner.keyword_changed.emit(text.clone());
        }

        let inner = Arc::downgrade(&self.inner);
        self.inner.debouncer.schedule(move || {
            if let Some(inner) = inner.upgrade() {
                inner.apply_keyword(&text);
            }
        });
    }

    pub fn set_sort_field(&self, field: S::SortField) {
        self.inner.apply(|request| request.with_sort_field(field));
    }

    pub fn set_sort_order(&self, order: SortOrder) {
        self.inner.apply(|request| request.with_sort_order(order));
    }

    /// Go to `page`, keeping filters, sort and keyword. Pages below 1 are
    /// clamped to 1.
    pub fn set_page(&self, page: u32) {
        self.inner.apply(|request| request.with_page(page));
    }

    /// Change the page size and return to the first page. Zero is ignored.
    pub fn set_limit(&self, limit: u32) {
        if limit == 0 {
            tracing::warn!(
                target: targets::LIST,
                resource = self.inner.source.name(),
                "ignoring page size of zero"
            );
            return;
        }
        self.inner.apply(|request| request.with_limit(limit));
    }

    /// Restore default filters, sort, keyword and page, then fetch once.
    ///
    /// A keyword waiting for its debounce window is dropped. The fetch
    /// happens even if the request was already the default.
    pub fn reset(&self) {
        let inner = &self.inner;
        inner.debouncer.cancel();

        if inner.keyword.set(String::new()) {
            inner.keyword_changed.emit(String::new());
        }

        let (changed, fetch) = {
            let _issue = inner.issue_lock.lock();
            let changed = inner.request.set(inner.defaults.clone());
            (changed, inner.issue(inner.defaults.clone()))
        };

        tracing::debug!(target: targets::LIST, resource = inner.source.name(), "list reset");
        let request = fetch.request.clone();
        inner.launch(fetch);
        if changed {
            inner.request_changed.emit(request);
        }
    }

    /// Fetch the current request again without changing it.
    pub fn refresh(&self) {
        let fetch = self.inner.issue_current();
        self.inner.launch(fetch);
    }
}

/// A fetch that has its generation and has been marked as loading, but has
/// not been spawned yet.
struct IssuedFetch<S: ListSource> {
    generation: u64,
    request: SourceRequest<S>,
    revision: u64,
    loading: ListState<S::Item>,
}

impl<S: ListSource> ControllerInner<S> {
    fn apply<F>(self: &Arc<Self>, derive: F)
    where
        F: FnOnce(&SourceRequest<S>) -> SourceRequest<S>,
    {
        let issued = {
            let _issue = self.issue_lock.lock();
            self.request.update(derive).map(|next| self.issue(next))
        };
        let Some(fetch) = issued else {
            return;
        };

        tracing::debug!(
            target: targets::LIST,
            resource = self.source.name(),
            page = fetch.request.page,
            limit = fetch.request.limit,
            search = fetch.request.search_text.as_deref(),
            "request changed"
        );
        let request = fetch.request.clone();
        self.launch(fetch);
        self.request_changed.emit(request);
    }

    fn apply_keyword(self: &Arc<Self>, text: &str) {
        let search = normalize_keyword(text);
        self.apply(|request| {
            if request.search_text == search {
                request.clone()
            } else {
                request.with_search(search)
            }
        });
    }

    /// Issue a fetch for the stored request as it is now.
    fn issue_current(&self) -> IssuedFetch<S> {
        let _issue = self.issue_lock.lock();
        self.issue(self.request.get())
    }

    /// Take the next generation and mark the state as loading.
    ///
    /// Callers hold `issue_lock`.
    fn issue(&self, request: SourceRequest<S>) -> IssuedFetch<S> {
        let mut generation = 0;
        let mut revision = 0;
        let mut loading = ListState::default();
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
            state.begin_fetch();
            loading = state.clone();
        });
        IssuedFetch {
            generation,
            request,
            revision,
            loading,
        }
    }

    fn launch(self: &Arc<Self>, fetch: IssuedFetch<S>) {
        let IssuedFetch {
            generation,
            request,
            revision,
            loading,
        } = fetch;
        self.publish(revision, loading);

        let span = tracing::debug_span!(
            target: targets::LIST,
            span_names::LIST_FETCH,
            resource = self.source.name(),
            generation,
            page = request.page,
        );
        let inner = Arc::clone(self);
        self.runtime
            .spawn(async move { inner.run_fetch(generation, request).await }.instrument(span));
    }

    async fn run_fetch(&self, generation: u64, request: SourceRequest<S>) {
        let result = self.source.fetch(&request).await;

        let mut settled = None;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok(response) => {
                    tracing::debug!(
                        target: targets::LIST,
                        items = response.items.len(),
                        total = response.meta.total,
                        "fetch succeeded"
                    );
                    state.finish_success(response);
                }
                Err(err) => {
                    tracing::warn!(target: targets::LIST, error = %err, "fetch failed");
                    state.finish_failure(self.source.error_message());
                }
            }
            let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
            settled = Some((revision, state.clone()));
            true
        });

        match settled {
            Some((revision, snapshot)) => self.publish(revision, snapshot),
            None => tracing::debug!(target: targets::LIST, generation, "discarding superseded response"),
        }
    }

    /// Emit `state_changed` unless a later snapshot was already emitted.
    ///
    /// Emission happens under `published`, so slots on different threads
    /// see snapshots in revision order.
    fn publish(&self, revision: u64, snapshot: ListState<S::Item>) {
        let published = self.published.lock();
        if revision <= published.get() {
            return;
        }
        published.set(revision);
        self.state_changed.emit(snapshot);
    }
}

fn normalize_keyword(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl<S: ListSource> Clone for ListController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ListSource> fmt::Debug for ListController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("resource", &self.inner.source.name())
            .field("request", &self.inner.request.get())
            .field("keyword", &self.inner.keyword.get())
            .field("is_loading", &self.is_loading())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword("  abc  "), Some("abc".to_string()));
        assert_eq!(normalize_keyword("   "), None);
        assert_eq!(normalize_keyword(""), None);
        assert_eq!(normalize_keyword("a b"), Some("a b".to_string()));
    }

    #[test]
    fn test_options_builder() {
        let options = ListOptions::new()
            .limit(25)
            .debounce(Duration::from_millis(200))
            .fetch_on_create(false);
        assert_eq!(options.limit, 25);
        assert_eq!(options.debounce, Duration::from_millis(200));
        assert!(!options.fetch_on_create);
        assert_eq!(ListOptions::default().limit, DEFAULT_PAGE_SIZE);
    }
}
