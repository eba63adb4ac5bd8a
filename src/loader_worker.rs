use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use futures::future::FutureExt;
use tokio::sync::mpsc;

use crate::{
    batch_function::BatchFunction, cache::Cache, loader::LoadError, loader_op::LoadRequest,
};
#[cfg(feature = "stats")]
use crate::worker_stats::WorkerStats;

/// A `LoaderWorker` is the "single-thread" worker task that actually does the loading work.
///
/// Once started, it runs in a loop until the parent Loader drops the request queue tx channel.
///
/// The worker can be in one of three states during its lifetime:
///
/// 1. Waiting for requests
/// 2. Collecting the batch window.
/// 3. Executing its load batch function.
///
/// One cycle through this loop is one batch window.
///
/// In state (1), the worker awaits any messages on the request queue channel, idling until work
/// arrives.
///
/// In state (2), the worker yields to the runtime and waits out its batch delay, so that
/// resolvers of the same GraphQL level running on other threads can enqueue their requests. It
/// then synchronously pulls requests from the queue until none are pending. Requests whose key
/// has already been settled are answered from the cache immediately; all others join the window.
///
/// In state (3), the worker deduplicates the window's keys in first-requested order and invokes
/// its `BatchFunction` once. Every request of the window is then resolved by key, `None` for keys
/// without a value. If the `BatchFunction` fails, every request of the window receives the same
/// error and nothing is cached.
pub struct LoaderWorker<K, V, E, F, CacheT, ContextT>
where
    K: 'static + Eq + Hash + Debug + Copy + Send + Sync,
    V: 'static + Send + Debug + Clone,
    E: 'static + Send + Sync + Debug,
    F: 'static + BatchFunction<K, V, Context = ContextT, Error = E> + Send,
    CacheT: Cache,
    ContextT: Send + Sync + 'static,
{
    cache: CacheT,
    request_rx: mpsc::UnboundedReceiver<LoadRequest<K, V, E>>,
    window: Vec<LoadRequest<K, V, E>>,
    context: ContextT,
    batch_delay: Duration,
    phantom_batch_function: PhantomData<F>,
    #[cfg(feature = "stats")]
    stats: WorkerStats,
}

impl<K, V, E, F, CacheT, ContextT> LoaderWorker<K, V, E, F, CacheT, ContextT>
where
    K: 'static + Eq + Hash + Debug + Copy + Send + Sync,
    V: 'static + Send + Debug + Clone,
    E: 'static + Send + Sync + Debug,
    F: 'static + BatchFunction<K, V, Context = ContextT, Error = E> + Send,
    CacheT: Cache<K = K, V = V> + Send,
    ContextT: Send + Sync + 'static,
{
    pub fn new(
        cache: CacheT,
        request_rx: mpsc::UnboundedReceiver<LoadRequest<K, V, E>>,
        context: ContextT,
        batch_delay: Duration,
    ) -> Self {
        Self {
            cache,
            request_rx,
            window: Vec::new(),
            context,
            batch_delay,
            phantom_batch_function: PhantomData,
            #[cfg(feature = "stats")]
            stats: WorkerStats::new(std::any::type_name::<(K, V)>()),
        }
    }

    pub async fn start(mut self) {
        loop {
            // Async await until we receive the first request.
            match self.request_rx.recv().await {
                None => {
                    tracing::debug!("Tx channel closed. Terminating LoaderWorker.");
                    return;
                }
                Some(request) => self.mux_request(request),
            }
            // Give the rest of this resolution pass a chance to enqueue.
            tokio::task::yield_now().await;
            if !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
            // Flush remainder of the queue before executing load.
            while let Some(Some(request)) = self.request_rx.recv().now_or_never() {
                self.mux_request(request);
            }
            if !self.window.is_empty() {
                self.execute_load().await;
            }
        }
    }

    fn mux_request(&mut self, request: LoadRequest<K, V, E>) {
        #[cfg(feature = "stats")]
        self.stats.record_load_request();

        match self.cache.lookup(&request.key()) {
            Some(settled) => {
                #[cfg(feature = "stats")]
                self.stats.record_cache_hit();
                let value = settled.clone();
                request.send_response(Ok(value));
            }
            None => self.window.push(request),
        }
    }

    /// Unique keys of the current window, in the order they were first requested.
    fn keys_to_load(&self) -> Vec<K> {
        let mut seen = HashSet::with_capacity(self.window.len());
        self.window.iter().map(LoadRequest::key).filter(|key| seen.insert(*key)).collect()
    }

    #[tracing::instrument(skip(self), fields(window = self.window.len()))]
    async fn execute_load(&mut self) {
        let keys_to_load = self.keys_to_load();
        tracing::debug!(?keys_to_load, "dispatching batch");

        match F::load(&keys_to_load, &self.context).await {
            Ok(loaded_keyvals) => {
                #[cfg(feature = "stats")]
                self.stats.record_window(self.window.len(), keys_to_load.len(), loaded_keyvals.len());
                tracing::debug!(loaded = loaded_keyvals.len(), "batch settled");

                let mut loaded = loaded_keyvals.into_iter().collect::<HashMap<_, _>>();
                for key in keys_to_load {
                    let value = loaded.remove(&key);
                    self.cache.settle(key, value);
                }
                for request in self.window.drain(..) {
                    let value = self.cache.lookup(&request.key()).cloned().flatten();
                    request.send_response(Ok(value));
                }
            }
            Err(error) => {
                #[cfg(feature = "stats")]
                self.stats.record_failed_window();
                tracing::warn!(?error, "batch load failed");

                let error = Arc::new(error);
                for request in self.window.drain(..) {
                    request.send_response(Err(LoadError::Batch(Arc::clone(&error))));
                }
            }
        }
    }
}
