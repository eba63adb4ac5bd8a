use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axocom_api::{BatchFunction, LoadError, Loader};
use futures::future;

#[derive(Debug, PartialEq, Eq, Clone)]
struct DummyData(String);

#[derive(Debug)]
struct StoreDown;

/// A small in-memory table that records every dispatch it receives. It returns rows in reverse
/// key order to make sure the loader never relies on store ordering.
#[derive(Default)]
struct DummyContext {
    map: HashMap<i64, String>,
    dispatches: Arc<Mutex<Vec<Vec<i64>>>>,
    failing: AtomicBool,
}

impl DummyContext {
    fn with_rows(rows: &[(i64, &str)]) -> Self {
        Self {
            map: rows.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            ..Default::default()
        }
    }

    fn dispatches(&self) -> Arc<Mutex<Vec<Vec<i64>>>> {
        Arc::clone(&self.dispatches)
    }
}

struct DummyDataLoader;

#[async_trait]
impl BatchFunction<i64, DummyData> for DummyDataLoader {
    type Context = DummyContext;
    type Error = StoreDown;

    async fn load(keys: &[i64], context: &DummyContext) -> Result<Vec<(i64, DummyData)>, StoreDown> {
        context.dispatches.lock().unwrap().push(keys.to_vec());
        if context.failing.load(Ordering::SeqCst) {
            return Err(StoreDown);
        }
        Ok(keys
            .iter()
            .rev()
            .filter_map(|k| context.map.get(k).cloned().map(|v| (*k, DummyData(v))))
            .collect::<Vec<_>>())
    }
}

fn data(s: &str) -> Option<DummyData> {
    Some(DummyData(s.to_owned()))
}

fn fish() -> DummyContext {
    DummyContext::with_rows(&[(42, "one fish"), (12, "two fish"), (5, "red fish"), (8, "blue fish")])
}

#[tokio::test]
async fn basic_load() {
    let context = DummyContext::with_rows(&[(42, "Foo")]);

    let loader = Loader::new(DummyDataLoader {}, context);
    assert_eq!(loader.load(42).await.unwrap(), data("Foo"));
}

#[tokio::test]
async fn repeated_load_is_served_from_cache() {
    let context = DummyContext::with_rows(&[(42, "Foo")]);
    let dispatches = context.dispatches();

    let loader = Loader::new(DummyDataLoader {}, context);
    assert_eq!(loader.load(42).await.unwrap(), data("Foo"));
    assert_eq!(loader.load(42).await.unwrap(), data("Foo"));
    assert_eq!(*dispatches.lock().unwrap(), vec![vec![42]]);
}

#[tokio::test]
async fn load_async() {
    let loader = Loader::new(DummyDataLoader {}, fish());

    let tuple = future::join4(loader.load(5), loader.load(42), loader.load(99), loader.load(12));

    let (a, b, c, d) = tuple.await;
    assert_eq!(
        (a.unwrap(), b.unwrap(), c.unwrap(), d.unwrap()),
        (data("red fish"), data("one fish"), None, data("two fish"))
    );
}

#[tokio::test]
async fn results_follow_call_order() {
    let loader = Loader::new(DummyDataLoader {}, fish());

    let keys = [8, 42, 5, 12];
    let results = future::join_all(keys.iter().map(|k| loader.load(*k))).await;

    let values = results.into_iter().map(Result::unwrap).collect::<Vec<_>>();
    assert_eq!(values, vec![data("blue fish"), data("one fish"), data("red fish"), data("two fish")]);
}

#[tokio::test]
async fn one_dispatch_per_window() {
    let context = fish();
    let dispatches = context.dispatches();
    let loader = Loader::new(DummyDataLoader {}, context);

    let results = future::join_all([1, 2, 3, 4, 5].map(|k| loader.load(k))).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(*dispatches.lock().unwrap(), vec![vec![1, 2, 3, 4, 5]]);
}

#[tokio::test]
async fn duplicate_keys_are_dispatched_once() {
    let context = DummyContext::with_rows(&[(1, "row 1"), (2, "row 2"), (3, "row 3")]);
    let dispatches = context.dispatches();
    let loader = Loader::new(DummyDataLoader {}, context);

    let (first, second, third) = future::join3(loader.load(2), loader.load(1), loader.load(2)).await;

    assert_eq!(*dispatches.lock().unwrap(), vec![vec![2, 1]]);
    assert_eq!(first.unwrap(), data("row 2"));
    assert_eq!(second.unwrap(), data("row 1"));
    assert_eq!(third.unwrap(), data("row 2"));
}

#[tokio::test]
async fn missing_key_resolves_to_none() {
    let context = DummyContext::with_rows(&[(1, "row 1"), (2, "row 2"), (3, "row 3")]);
    let dispatches = context.dispatches();
    let loader = Loader::new(DummyDataLoader {}, context);

    assert_eq!(loader.load(999).await.unwrap(), None);
    assert_eq!(*dispatches.lock().unwrap(), vec![vec![999]]);

    // Absence is memoized like any other settled result.
    assert_eq!(loader.load(999).await.unwrap(), None);
    assert_eq!(dispatches.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn sequential_loads_use_separate_windows() {
    let context = fish();
    let dispatches = context.dispatches();
    let loader = Loader::new(DummyDataLoader {}, context);

    assert_eq!(loader.load(5).await.unwrap(), data("red fish"));
    assert_eq!(loader.load(8).await.unwrap(), data("blue fish"));

    let (cached, fresh) = future::join(loader.load(5), loader.load(42)).await;
    assert_eq!(cached.unwrap(), data("red fish"));
    assert_eq!(fresh.unwrap(), data("one fish"));

    assert_eq!(*dispatches.lock().unwrap(), vec![vec![5], vec![8], vec![42]]);
}

#[tokio::test]
async fn loaders_never_share_results() {
    let a_context = DummyContext::with_rows(&[(7, "seven")]);
    let b_context = DummyContext::with_rows(&[(7, "seven")]);
    let a_dispatches = a_context.dispatches();
    let b_dispatches = b_context.dispatches();

    let a = Loader::new(DummyDataLoader {}, a_context);
    let b = Loader::new(DummyDataLoader {}, b_context);

    assert_eq!(a.load(7).await.unwrap(), data("seven"));
    assert_eq!(b.load(7).await.unwrap(), data("seven"));

    assert_eq!(*a_dispatches.lock().unwrap(), vec![vec![7]]);
    assert_eq!(*b_dispatches.lock().unwrap(), vec![vec![7]]);
}

#[tokio::test]
async fn failed_dispatch_fails_every_request_in_window() {
    let context = fish();
    context.failing.store(true, Ordering::SeqCst);
    let dispatches = context.dispatches();
    let loader = Loader::new(DummyDataLoader {}, context);

    let (a, b, c) = future::join3(loader.load(5), loader.load(99), loader.load(5)).await;
    let (a, b, c) = (a.unwrap_err(), b.unwrap_err(), c.unwrap_err());

    let shared = a.batch_failure().expect("batch failure");
    assert!(Arc::ptr_eq(shared, b.batch_failure().expect("batch failure")));
    assert!(Arc::ptr_eq(shared, c.batch_failure().expect("batch failure")));
    assert_eq!(*dispatches.lock().unwrap(), vec![vec![5, 99]]);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let context = Arc::new(fish());
    context.failing.store(true, Ordering::SeqCst);
    let loader = Loader::new(SharedLoader {}, Arc::clone(&context));

    assert!(matches!(loader.load(12).await, Err(LoadError::Batch(_))));

    context.failing.store(false, Ordering::SeqCst);
    assert_eq!(loader.load(12).await.unwrap(), data("two fish"));
    assert_eq!(*context.dispatches.lock().unwrap(), vec![vec![12], vec![12]]);
}

/// Same table, but the context stays reachable from the test so it can flip the failure switch.
struct SharedLoader;

#[async_trait]
impl BatchFunction<i64, DummyData> for SharedLoader {
    type Context = Arc<DummyContext>;
    type Error = StoreDown;

    async fn load(keys: &[i64], context: &Arc<DummyContext>) -> Result<Vec<(i64, DummyData)>, StoreDown> {
        DummyDataLoader::load(keys, context).await
    }
}
