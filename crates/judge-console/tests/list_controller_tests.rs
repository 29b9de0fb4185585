//! Behavior of the generic list controller against an in-memory source.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use judge_console::list::{
    ListController, ListFilters, ListOptions, ListRequest, ListResponse, ListSource, SortField,
    SortOrder,
};
use judge_console::net::PageMeta;
use judge_console::pagination::Paginator;
use chrono::NaiveDate;
use judge_console::{ControllerError, FilterError};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::time::sleep;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    added_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    added_to: Option<NaiveDate>,
}

impl ListFilters for ItemFilters {
    fn validate(&self) -> Result<(), FilterError> {
        match (self.added_from, self.added_to) {
            (None, None) => Ok(()),
            (Some(from), Some(to)) if from > to => {
                Err(FilterError::InvertedDateRange { from, to })
            }
            (Some(_), Some(_)) => Ok(()),
            _ => Err(FilterError::MissingDateBound),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemSort {
    Name,
    CreatedAt,
}

impl SortField for ItemSort {
    fn as_str(&self) -> &'static str {
        match self {
            ItemSort::Name => "name",
            ItemSort::CreatedAt => "createdAt",
        }
    }
}

type Request = ListRequest<ItemFilters, ItemSort>;

#[derive(Debug)]
struct Unavailable;

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("backend unavailable")
    }
}

impl std::error::Error for Unavailable {}

const TOTAL_ITEMS: u64 = 50;

#[derive(Default)]
struct MockSource {
    calls: Mutex<Vec<Request>>,
    delays: Mutex<VecDeque<Duration>>,
    failing: AtomicBool,
}

impl MockSource {
    fn with_delays(delays: impl IntoIterator<Item = u64>) -> Self {
        Self {
            delays: Mutex::new(delays.into_iter().map(Duration::from_millis).collect()),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Request> {
        self.calls.lock().clone()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

fn page_for(request: &Request) -> ListResponse<String> {
    let total_pages = TOTAL_ITEMS.div_ceil(u64::from(request.limit)) as u32;
    ListResponse {
        items: (0..3).map(|i| format!("p{}-{i}", request.page)).collect(),
        meta: PageMeta {
            page: request.page,
            limit: request.limit,
            total: TOTAL_ITEMS,
            total_pages,
            has_next_page: request.page < total_pages,
            has_previous_page: request.page > 1,
        },
    }
}

impl ListSource for MockSource {
    type Item = String;
    type Filters = ItemFilters;
    type SortField = ItemSort;
    type Error = Unavailable;

    fn name(&self) -> &'static str {
        "items"
    }

    fn default_sort(&self) -> (ItemSort, SortOrder) {
        (ItemSort::Name, SortOrder::Asc)
    }

    fn error_message(&self) -> &'static str {
        "Failed to load items"
    }

    async fn fetch(&self, request: &Request) -> Result<ListResponse<String>, Unavailable> {
        self.calls.lock().push(request.clone());
        let delay = self.delays.lock().pop_front().unwrap_or_default();
        let failing = self.failing.load(Ordering::SeqCst);

        if !delay.is_zero() {
            sleep(delay).await;
        }
        if failing {
            return Err(Unavailable);
        }
        Ok(page_for(request))
    }
}

async fn loaded(source: MockSource) -> ListController<MockSource> {
    let controller = ListController::new(source, ListOptions::default()).unwrap();
    controller.wait_until_idle().await;
    controller
}

#[tokio::test(start_paused = true)]
async fn test_initial_fetch_uses_defaults() {
    let controller = loaded(MockSource::default()).await;

    let calls = controller.source().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], Request::new(10, ItemSort::Name, SortOrder::Asc));

    let state = controller.state();
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert_eq!(state.items, vec!["p1-0", "p1-1", "p1-2"]);
    assert_eq!(state.meta.map(|m| m.total_pages), Some(5));
}

#[tokio::test(start_paused = true)]
async fn test_fetch_on_create_disabled() {
    let options = ListOptions::default().fetch_on_create(false);
    let controller = ListController::new(MockSource::default(), options).unwrap();
    controller.wait_until_idle().await;
    assert_eq!(controller.source().call_count(), 0);
    assert!(!controller.state().has_data());

    controller.refresh();
    controller.wait_until_idle().await;
    assert_eq!(controller.source().call_count(), 1);
}

#[test]
fn test_new_outside_runtime_fails() {
    let result = ListController::new(MockSource::default(), ListOptions::default());
    assert!(matches!(result, Err(ControllerError::NoRuntime)));
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_request_does_not_fetch() {
    let controller = loaded(MockSource::default()).await;

    controller.set_page(1);
    controller.set_sort_order(SortOrder::Asc);
    controller.set_sort_field(ItemSort::Name);
    controller.set_filters(ItemFilters::default()).unwrap();
    controller.wait_until_idle().await;
    assert_eq!(controller.source().call_count(), 1);

    controller.set_page(2);
    controller.set_page(2);
    controller.wait_until_idle().await;
    assert_eq!(controller.source().call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_changes_reset_page() {
    let controller = loaded(MockSource::default()).await;

    controller.set_page(4);
    controller
        .set_filters(ItemFilters {
            category: Some("graphs".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(controller.request().page, 1);

    controller.set_page(3);
    controller.set_sort_field(ItemSort::CreatedAt);
    assert_eq!(controller.request().page, 1);

    controller.set_page(3);
    controller.set_sort_order(SortOrder::Desc);
    assert_eq!(controller.request().page, 1);

    controller.set_page(5);
    controller.set_limit(50);
    let request = controller.request();
    assert_eq!((request.page, request.limit), (1, 50));
}

#[tokio::test(start_paused = true)]
async fn test_set_page_keeps_everything_else() {
    let controller = loaded(MockSource::default()).await;

    controller
        .set_filters(ItemFilters {
            category: Some("dp".into()),
            ..Default::default()
        })
        .unwrap();
    controller.set_sort_field(ItemSort::CreatedAt);
    controller.set_keyword("knapsack");
    sleep(Duration::from_millis(600)).await;
    controller.wait_until_idle().await;

    let before = controller.request();
    controller.set_page(3);
    let after = controller.request();

    assert_eq!(after.page, 3);
    assert_eq!(after, Request { page: 3, ..before });

    controller.wait_until_idle().await;
    assert_eq!(controller.source().calls().last(), Some(&after));
}

#[tokio::test(start_paused = true)]
async fn test_set_page_clamps_to_one() {
    let controller = loaded(MockSource::default()).await;
    controller.set_page(2);
    controller.set_page(0);
    assert_eq!(controller.request().page, 1);
}

#[tokio::test(start_paused = true)]
async fn test_keyword_is_debounced_and_trimmed() {
    let controller = loaded(MockSource::default()).await;
    controller.set_page(3);
    controller.wait_until_idle().await;

    controller.set_keyword("a");
    sleep(Duration::from_millis(100)).await;
    controller.set_keyword("ab");
    sleep(Duration::from_millis(100)).await;
    controller.set_keyword("  abc  ");

    assert_eq!(controller.keyword(), "  abc  ");
    assert!(controller.is_keyword_pending());

    sleep(Duration::from_millis(400)).await;
    assert_eq!(controller.request().search_text, None);
    assert_eq!(controller.request().page, 3);

    sleep(Duration::from_millis(200)).await;
    let request = controller.request();
    assert_eq!(request.search_text.as_deref(), Some("abc"));
    assert_eq!(request.page, 1);

    controller.wait_until_idle().await;
    let calls = controller.source().calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].search_text.as_deref(), Some("abc"));
}

#[tokio::test(start_paused = true)]
async fn test_blank_keyword_clears_search() {
    let controller = loaded(MockSource::default()).await;

    controller.set_keyword("abc");
    sleep(Duration::from_millis(600)).await;
    controller.wait_until_idle().await;
    assert_eq!(controller.source().call_count(), 2);

    // Same term after trimming: nothing to do.
    controller.set_keyword(" abc ");
    sleep(Duration::from_millis(600)).await;
    controller.wait_until_idle().await;
    assert_eq!(controller.source().call_count(), 2);

    controller.set_keyword("   ");
    sleep(Duration::from_millis(600)).await;
    controller.wait_until_idle().await;
    assert_eq!(controller.request().search_text, None);
    assert_eq!(controller.source().call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_keyword_changed_signal() {
    let controller = loaded(MockSource::default()).await;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    controller
        .keyword_changed()
        .connect(move |text| sink.lock().push(text.clone()));

    controller.set_keyword("t");
    controller.set_keyword("tr");
    controller.set_keyword("tr");

    assert_eq!(*seen.lock(), vec!["t", "tr"]);
}

#[tokio::test(start_paused = true)]
async fn test_reset_restores_defaults_and_fetches_once() {
    let controller = loaded(MockSource::default()).await;

    controller
        .set_filters(ItemFilters {
            category: Some("math".into()),
            ..Default::default()
        })
        .unwrap();
    controller.set_sort_field(ItemSort::CreatedAt);
    controller.set_page(4);
    controller.wait_until_idle().await;
    assert_eq!(controller.source().call_count(), 4);

    controller.set_keyword("pending");
    controller.reset();

    assert_eq!(controller.keyword(), "");
    assert!(!controller.is_keyword_pending());
    assert_eq!(&controller.request(), controller.default_request());

    controller.wait_until_idle().await;
    sleep(Duration::from_secs(1)).await;
    controller.wait_until_idle().await;

    let calls = controller.source().calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(&calls[4], controller.default_request());
}

#[tokio::test(start_paused = true)]
async fn test_reset_on_defaults_still_fetches() {
    let controller = loaded(MockSource::default()).await;

    controller.reset();
    controller.wait_until_idle().await;

    let calls = controller.source().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_twice_fetches_twice() {
    let controller = loaded(MockSource::default()).await;

    controller.refresh();
    controller.refresh();
    controller.wait_until_idle().await;

    let calls = controller.source().calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1], calls[2]);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test(start_paused = true)]
async fn test_failure_keeps_previous_items() {
    let controller = loaded(MockSource::default()).await;
    let before = controller.state();

    controller.source().set_failing(true);
    controller.refresh();
    controller.wait_until_idle().await;

    let state = controller.state();
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Failed to load items"));
    assert_eq!(state.items, before.items);
    assert_eq!(state.meta, before.meta);

    controller.source().set_failing(false);
    controller.refresh();
    controller.wait_until_idle().await;
    assert_eq!(controller.error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    let controller = loaded(MockSource::with_delays([0, 300, 10])).await;

    controller.set_page(2);
    controller.set_page(3);
    controller.wait_until_idle().await;
    assert_eq!(controller.meta().map(|m| m.page), Some(3));

    // Let the slow page-2 response arrive.
    sleep(Duration::from_millis(400)).await;

    let state = controller.state();
    assert!(!state.is_loading);
    assert_eq!(state.meta.map(|m| m.page), Some(3));
    assert_eq!(state.items[0], "p3-0");
}

#[tokio::test(start_paused = true)]
async fn test_stale_failure_is_discarded() {
    let source = MockSource::with_delays([0, 300, 0]);
    let controller = loaded(source).await;

    controller.source().set_failing(true);
    controller.set_page(2);
    // Let the page-2 fetch start and read the flag before clearing it.
    tokio::task::yield_now().await;
    controller.source().set_failing(false);
    controller.set_page(3);
    controller.wait_until_idle().await;

    sleep(Duration::from_millis(400)).await;
    assert_eq!(controller.error(), None);
    assert_eq!(controller.meta().map(|m| m.page), Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_request_changed_slot_may_change_page() {
    let controller = loaded(MockSource::default()).await;

    let handle = controller.clone();
    controller.request_changed().connect(move |request| {
        if request.page == 2 {
            handle.set_page(3);
        }
    });

    controller.set_page(2);
    controller.wait_until_idle().await;

    assert_eq!(controller.request().page, 3);
    let state = controller.state();
    assert_eq!(state.meta.map(|m| m.page), Some(3));
    assert_eq!(state.items[0], "p3-0");

    // The page-2 fetch was issued first and must stay superseded.
    sleep(Duration::from_millis(50)).await;
    assert_eq!(controller.meta().map(|m| m.page), Some(3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_mutation_from_other_thread_keeps_last_request() {
    let controller = loaded(MockSource::default()).await;

    controller.request_changed().connect(|request| {
        if request.page == 2 {
            std::thread::sleep(Duration::from_millis(100));
        }
    });
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    controller
        .state_changed()
        .connect(move |state| sink.lock().push(state.clone()));

    let other = controller.clone();
    let slow = tokio::task::spawn_blocking(move || other.set_page(2));
    sleep(Duration::from_millis(20)).await;
    controller.set_page(3);
    slow.await.unwrap();
    controller.wait_until_idle().await;
    sleep(Duration::from_millis(20)).await;

    let state = controller.state();
    assert_eq!(controller.request().page, 3);
    assert_eq!(state.meta.map(|m| m.page), Some(3));
    assert_eq!(state.items[0], "p3-0");
    assert_eq!(seen.lock().last(), Some(&state));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_filters_are_rejected() {
    let controller = loaded(MockSource::default()).await;
    let before = controller.request();

    let result = controller.set_filters(ItemFilters {
        added_from: NaiveDate::from_ymd_opt(2024, 3, 1),
        ..Default::default()
    });
    assert_eq!(
        result,
        Err(ControllerError::InvalidFilters(FilterError::MissingDateBound))
    );

    let from = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let to = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let result = controller.set_filters(ItemFilters {
        added_from: Some(from),
        added_to: Some(to),
        ..Default::default()
    });
    assert_eq!(
        result,
        Err(ControllerError::InvalidFilters(FilterError::InvertedDateRange { from, to }))
    );
    assert_eq!(controller.request(), before);
    controller.wait_until_idle().await;
    assert_eq!(controller.source().call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_limit_is_ignored() {
    let controller = loaded(MockSource::default()).await;
    controller.set_limit(0);
    assert_eq!(controller.request().limit, 10);
}

#[tokio::test(start_paused = true)]
async fn test_state_and_request_signals() {
    let controller = loaded(MockSource::default()).await;

    let loading = Arc::new(Mutex::new(Vec::new()));
    let sink = loading.clone();
    controller
        .state_changed()
        .connect(move |state| sink.lock().push(state.is_loading));

    let pages = Arc::new(Mutex::new(Vec::new()));
    let sink = pages.clone();
    controller
        .request_changed()
        .connect(move |request| sink.lock().push(request.page));

    controller.set_page(2);
    controller.set_page(2);
    controller.wait_until_idle().await;

    assert_eq!(*loading.lock(), vec![true, false]);
    assert_eq!(*pages.lock(), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn test_subscribe_observes_result() {
    let controller = loaded(MockSource::with_delays([0, 50])).await;
    let mut updates = controller.subscribe();

    controller.set_page(4);
    assert!(updates.borrow_and_update().is_loading);

    updates.changed().await.unwrap();
    let state = updates.borrow_and_update().clone();
    assert!(!state.is_loading);
    assert_eq!(state.meta.map(|m| m.page), Some(4));
}

#[tokio::test(start_paused = true)]
async fn test_paginator_drives_controller() {
    let controller = loaded(MockSource::default()).await;
    let paginator = Arc::new(Paginator::default());
    paginator.bind(&controller);

    assert_eq!(paginator.view().total_pages(), 5);
    assert_eq!(paginator.view().to_string(), "‹ [1] 2 3 4 5 ›");

    assert!(paginator.go_to(3));
    assert_eq!(controller.request().page, 3);

    controller.wait_until_idle().await;
    assert_eq!(paginator.view().page(), 3);
    assert!(paginator.next());
    controller.wait_until_idle().await;
    assert_eq!(paginator.view().page(), 4);
}
