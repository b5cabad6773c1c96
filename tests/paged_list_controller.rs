use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tokio::sync::oneshot;

use dishlist::{
    core::controller::PagedListController,
    domain::{
        catalog::MockCatalog,
        dish::{Dish, ListItem},
        fallback::fallback_dishes,
        page::PageResult,
        source::{DataSource, TransportError},
    },
    infrastructure::mock_source::MockDataSource,
    model::{paged_list::Phase, performance::PerformanceRecorder},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Item(u64);

impl ListItem for Item {
    fn id(&self) -> u64 {
        self.0
    }
}

type Outcome = Result<PageResult<Item>, TransportError>;

fn items(start: u64, count: u64) -> Vec<Item> {
    (start..start + count).map(Item).collect()
}

fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(ListItem::id).collect()
}

fn unreachable() -> TransportError {
    TransportError::Request(String::from("connection refused"))
}

/// Answers fetches from a fixed script, in call order
#[derive(Default)]
struct ScriptedSource {
    responses: Mutex<VecDeque<Outcome>>,
    calls: Mutex<Vec<(u32, u32)>>,
}

impl ScriptedSource {
    fn new(responses: impl IntoIterator<Item = Outcome>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::default(),
        })
    }

    fn calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    type Item = Item;

    async fn fetch_page(&self, page: u32, page_size: u32) -> Outcome {
        self.calls.lock().push((page, page_size));
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(PageResult::end()))
    }
}

/// Holds every fetch until the test releases it through a oneshot sender
#[derive(Default)]
struct GatedSource {
    gates: Mutex<HashMap<u32, VecDeque<oneshot::Receiver<Outcome>>>>,
    calls: Mutex<Vec<u32>>,
}

impl GatedSource {
    /// Register the gate for the next fetch of `page`
    fn gate(&self, page: u32) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().entry(page).or_default().push_back(rx);
        tx
    }

    fn calls(&self) -> Vec<u32> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl DataSource for GatedSource {
    type Item = Item;

    async fn fetch_page(&self, page: u32, _page_size: u32) -> Outcome {
        self.calls.lock().push(page);
        let gate = self
            .gates
            .lock()
            .get_mut(&page)
            .and_then(VecDeque::pop_front);
        match gate {
            Some(gate) => gate.await.unwrap_or_else(|_| Err(unreachable())),
            None => Err(unreachable()),
        }
    }
}

#[tokio::test]
async fn test_requests_while_loading_never_overlap() {
    let source = Arc::new(GatedSource::default());
    let page1 = source.gate(1);
    let mut controller = PagedListController::new(Arc::clone(&source), 10, vec![]);

    assert!(controller.initialize());
    for _ in 0..5 {
        assert!(!controller.request_more());
        assert!(!controller.initialize());
    }
    assert_eq!(controller.pending(), 1);

    page1.send(Ok(PageResult::new(items(1, 10), false))).unwrap();
    assert_eq!(controller.settle().await, Some(true));
    assert_eq!(source.calls(), vec![1]);
    assert_eq!(controller.snapshot().len(), 10);
    assert!(!controller.snapshot().is_loading);
}

#[tokio::test]
async fn test_no_fetch_after_end_until_reset() {
    let source = ScriptedSource::new([
        Ok(PageResult::new(items(1, 10), true)),
        Ok(PageResult::new(items(1, 10), false)),
    ]);
    let mut controller = PagedListController::new(Arc::clone(&source), 10, vec![]);

    controller.initialize();
    assert_eq!(controller.settle().await, Some(true));
    assert!(controller.snapshot().is_end);

    assert!(!controller.request_more());
    assert!(!controller.request_more());
    assert_eq!(controller.pending(), 0);
    assert_eq!(controller.settle().await, None);
    assert_eq!(source.calls(), vec![(1, 10)]);

    assert!(controller.reset());
    assert_eq!(controller.settle().await, Some(true));
    assert_eq!(source.calls(), vec![(1, 10), (1, 10)]);
    assert!(!controller.snapshot().is_end);
}

#[rstest]
#[case(1, true)]
#[case(7, true)]
#[case(9, true)]
#[case(10, false)]
#[tokio::test]
async fn test_short_page_ends_the_list(#[case] count: u64, #[case] is_end: bool) {
    let source = ScriptedSource::new([Ok(PageResult::new(items(1, count), false))]);
    let mut controller = PagedListController::new(source, 10, vec![]);

    controller.initialize();
    controller.settle().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.len() as u64, count);
    assert_eq!(snapshot.is_end, is_end);
}

#[tokio::test]
async fn test_pages_are_requested_in_order() {
    let source = ScriptedSource::new([
        Ok(PageResult::new(items(1, 10), false)),
        Ok(PageResult::new(items(11, 10), false)),
        Ok(PageResult::new(items(21, 10), false)),
    ]);
    let mut controller = PagedListController::new(Arc::clone(&source), 10, vec![]);

    controller.initialize();
    controller.settle().await;
    controller.request_more();
    controller.settle().await;
    controller.request_more();
    controller.settle().await;

    assert_eq!(source.calls(), vec![(1, 10), (2, 10), (3, 10)]);
    assert_eq!(ids(controller.snapshot().items), (1..=30).collect::<Vec<_>>());
    assert_eq!(controller.state().next_page(), 4);
}

#[tokio::test]
async fn test_stale_response_after_reset_is_discarded() {
    let source = Arc::new(GatedSource::default());
    let first = source.gate(1);
    let second = source.gate(2);
    let after_reset = source.gate(1);
    let mut controller = PagedListController::new(Arc::clone(&source), 10, vec![]);

    controller.initialize();
    first.send(Ok(PageResult::new(items(1, 10), false))).unwrap();
    assert_eq!(controller.settle().await, Some(true));

    // page 2 in flight when the list is reset
    assert!(controller.request_more());
    assert!(controller.reset());
    assert!(controller.snapshot().is_empty());
    assert_eq!(controller.snapshot().phase, Phase::LoadingFirst);

    second.send(Ok(PageResult::new(items(11, 10), false))).unwrap();
    assert_eq!(controller.settle().await, Some(false));
    assert!(controller.snapshot().is_empty());
    assert!(controller.snapshot().is_loading);

    after_reset
        .send(Ok(PageResult::new(items(101, 10), false)))
        .unwrap();
    assert_eq!(controller.settle().await, Some(true));
    assert_eq!(ids(controller.snapshot().items), (101..=110).collect::<Vec<_>>());
    assert_eq!(controller.state().next_page(), 2);
    assert_eq!(source.calls(), vec![1, 2, 1]);
}

#[tokio::test]
async fn test_stale_failure_after_reset_installs_nothing() {
    let source = Arc::new(GatedSource::default());
    let first = source.gate(1);
    let after_reset = source.gate(1);
    let mut controller = PagedListController::new(Arc::clone(&source), 10, items(900, 2));

    controller.initialize();
    controller.reset();

    first.send(Err(unreachable())).unwrap();
    assert_eq!(controller.settle().await, Some(false));
    assert!(controller.snapshot().is_empty());
    assert!(!controller.snapshot().is_end);

    after_reset
        .send(Ok(PageResult::new(items(1, 10), false)))
        .unwrap();
    assert_eq!(controller.settle().await, Some(true));
    assert_eq!(controller.snapshot().len(), 10);
}

#[tokio::test]
async fn test_first_failure_installs_fallback() {
    let source = ScriptedSource::new([Err(TransportError::Status(500))]);
    let mut controller = PagedListController::new(source, 10, items(900, 3));

    controller.initialize();
    assert_eq!(controller.settle().await, Some(true));

    let snapshot = controller.snapshot();
    assert_eq!(ids(snapshot.items), vec![900, 901, 902]);
    assert!(snapshot.is_end);
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.phase, Phase::FailedFallback);
    assert!(!controller.request_more());
}

#[tokio::test]
async fn test_later_failure_keeps_items() {
    let source = ScriptedSource::new([
        Ok(PageResult::new(items(1, 10), false)),
        Err(TransportError::Decode(String::from("expected value"))),
    ]);
    let mut controller = PagedListController::new(source, 10, items(900, 3));

    controller.initialize();
    controller.settle().await;
    controller.request_more();
    controller.settle().await;

    let snapshot = controller.snapshot();
    assert_eq!(ids(snapshot.items), (1..=10).collect::<Vec<_>>());
    assert!(snapshot.is_end);
    assert_eq!(snapshot.phase, Phase::ReadyEnd);
    assert!(!controller.request_more());
}

#[tokio::test]
async fn test_empty_page_without_end_marker_makes_no_progress() {
    let source = ScriptedSource::new([
        Ok(PageResult::new(items(1, 10), false)),
        Ok(PageResult::new(vec![], false)),
        Ok(PageResult::new(items(11, 10), false)),
    ]);
    let mut controller = PagedListController::new(Arc::clone(&source), 10, vec![]);

    controller.initialize();
    controller.settle().await;
    controller.request_more();
    controller.settle().await;

    assert_eq!(controller.snapshot().len(), 10);
    assert!(!controller.snapshot().is_end);
    assert_eq!(controller.state().next_page(), 2);

    assert!(controller.request_more());
    controller.settle().await;
    assert_eq!(controller.snapshot().len(), 20);
    assert_eq!(source.calls(), vec![(1, 10), (2, 10), (2, 10)]);
}

#[tokio::test]
async fn test_scenario_five_pages_from_mock_catalog() {
    let source = Arc::new(MockDataSource::new(MockCatalog::new(5)));
    let mut controller = PagedListController::new(source, 10, fallback_dishes());

    for _ in 0..5 {
        assert!(controller.request_more());
        assert_eq!(controller.settle().await, Some(true));
    }

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.len(), 50);
    assert!(snapshot.is_end);
    assert_eq!(
        snapshot.items.iter().map(ListItem::id).collect::<Vec<_>>(),
        (1..=50).collect::<Vec<_>>()
    );

    assert!(!controller.request_more());
    assert_eq!(controller.pending(), 0);
}

/// A dish source whose server is down
struct DownSource;

#[async_trait]
impl DataSource for DownSource {
    type Item = Dish;

    async fn fetch_page(&self, _page: u32, _page_size: u32) -> Result<PageResult<Dish>, TransportError> {
        Err(unreachable())
    }
}

#[tokio::test]
async fn test_scenario_first_failure_shows_default_dishes() {
    let mut controller = PagedListController::new(Arc::new(DownSource), 10, fallback_dishes());

    controller.initialize();
    assert_eq!(controller.settle().await, Some(true));

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.items, fallback_dishes().as_slice());
    assert_eq!(
        snapshot.items.iter().map(ListItem::id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert!(snapshot.is_end);
    assert!(!snapshot.is_loading);
}

#[tokio::test]
async fn test_catalog_without_pages_ends_empty() {
    let source = Arc::new(MockDataSource::new(MockCatalog::new(0)));
    let mut controller = PagedListController::new(source, 10, fallback_dishes());

    controller.initialize();
    controller.settle().await;

    let snapshot = controller.snapshot();
    assert!(snapshot.is_empty());
    assert!(snapshot.is_end);
    assert_eq!(snapshot.phase, Phase::ReadyEnd);
}

#[tokio::test]
async fn test_recorder_marks_first_data_once() {
    let source = ScriptedSource::new([
        Ok(PageResult::new(items(1, 10), false)),
        Ok(PageResult::new(items(11, 10), false)),
    ]);
    let recorder = PerformanceRecorder::new();
    let mut controller =
        PagedListController::new(source, 10, vec![]).with_recorder(recorder.clone());

    assert!(!recorder.is_started());
    controller.initialize();
    assert!(recorder.is_started());
    controller.settle().await;
    controller.request_more();
    controller.settle().await;

    let metrics = recorder.metrics();
    assert_eq!(metrics.list_item_count, 10);
    assert!(metrics.data_load_ms.is_some());
}

#[tokio::test]
async fn test_fallback_is_not_first_data() {
    let source = ScriptedSource::new([Err(unreachable())]);
    let recorder = PerformanceRecorder::new();
    let mut controller =
        PagedListController::new(source, 10, items(900, 2)).with_recorder(recorder.clone());

    controller.initialize();
    controller.settle().await;

    assert_eq!(recorder.metrics().data_load_ms, None);
    assert_eq!(recorder.metrics().list_item_count, 0);
}

#[tokio::test]
async fn test_outcome_after_drop_is_ignored() {
    let source = Arc::new(GatedSource::default());
    let page1 = source.gate(1);
    let mut controller = PagedListController::new(Arc::clone(&source), 10, vec![]);
    controller.initialize();
    drop(controller);

    // the fetch task completes into a closed channel without panicking
    let _ = page1.send(Ok(PageResult::new(items(1, 10), false)));
    tokio::task::yield_now().await;
}
