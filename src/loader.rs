use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing_futures::Instrument;

use crate::{batch_function::BatchFunction, loader_op::LoadRequest, loader_worker::LoaderWorker};

/// How long a worker waits after the first request of a window before dispatching, so that
/// resolvers running on other runtime threads get a chance to join the same window.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(1);

/// Failure of a single `load` call.
///
/// Not-found is never an error; it is `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError<E> {
    /// The batch dispatch for this request's window failed. Every request of that window holds a
    /// clone of the same underlying error.
    #[error("batch load failed: {0}")]
    Batch(Arc<E>),
    /// The loader worker is no longer running.
    #[error("loader worker is gone")]
    Closed,
}

impl<E> LoadError<E> {
    /// The shared dispatch failure, if this error came from one.
    pub fn batch_failure(&self) -> Option<&Arc<E>> {
        match self {
            LoadError::Batch(err) => Some(err),
            LoadError::Closed => None,
        }
    }
}

impl<E> Clone for LoadError<E> {
    fn clone(&self) -> Self {
        match self {
            LoadError::Batch(err) => LoadError::Batch(Arc::clone(err)),
            LoadError::Closed => LoadError::Closed,
        }
    }
}

/// Batch loads entities from the row store, primarily intended for mitigating GraphQL's N+1
/// problem.
///
/// Callers invoke [`Loader::load`] from any number of concurrently running resolvers. Every
/// request issued before the batch boundary lands in the same window and is answered by one
/// call to the loader's [`BatchFunction`].
///
/// The `Loader` struct acts as an intermediary between the async domain in which `load` calls are
/// invoked and the pseudo-single-threaded domain of the `LoaderWorker`. The loader enqueues
/// requests on the worker's queue and the worker answers them through oneshot channels.
///
/// A `Loader` is meant to live for one request only. Dropping it closes the queue; the worker
/// finishes any window it already dispatched and then exits.
pub struct Loader<K, V, E>
where
    K: 'static + Eq + Debug + Copy + Send,
    V: 'static + Send + Debug + Clone,
    E: 'static + Send + Sync + Debug,
{
    request_tx: mpsc::UnboundedSender<LoadRequest<K, V, E>>,
}

impl<K, V, E> Loader<K, V, E>
where
    K: 'static + Eq + Debug + Copy + Hash + Send + Sync,
    V: 'static + Send + Debug + Clone,
    E: 'static + Send + Sync + Debug,
{
    /// Creates a new Loader for the provided BatchFunction and Context type, using
    /// [`DEFAULT_BATCH_DELAY`].
    ///
    /// Note: the batch function is passed in as a marker for type inference.
    pub fn new<F, ContextT>(f: F, context: ContextT) -> Self
    where
        ContextT: Send + Sync + 'static,
        F: 'static + BatchFunction<K, V, Context = ContextT, Error = E> + Send,
    {
        Self::with_delay(f, context, DEFAULT_BATCH_DELAY)
    }

    /// Creates a new Loader whose worker waits `delay` after the first request of each window
    /// before dispatching. A zero delay only yields once to the runtime.
    pub fn with_delay<F, ContextT>(_: F, context: ContextT, delay: Duration) -> Self
    where
        ContextT: Send + Sync + 'static,
        F: 'static + BatchFunction<K, V, Context = ContextT, Error = E> + Send,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = LoaderWorker::<K, V, E, F, HashMap<K, Option<V>>, ContextT>::new(
            HashMap::new(),
            rx,
            context,
            delay,
        );
        let span = tracing::trace_span!("LoaderWorker", kv = std::any::type_name::<(K, V)>());
        tokio::task::spawn(worker.start().instrument(span));
        Self { request_tx: tx }
    }

    /// Loads a value from the underlying resource.
    ///
    /// Returns `Ok(None)` if the BatchFunction returned no value for the key. Fails only if the
    /// batch dispatch for this key's window failed.
    ///
    /// If the value is already in the loader cache, it is returned as soon as it is processed.
    /// Otherwise, the requested key is enqueued for batch loading in the next window.
    pub async fn load(&self, key: K) -> Result<Option<V>, LoadError<E>> {
        let (response_tx, response_rx) = oneshot::channel();
        self.request_tx
            .send(LoadRequest::new(key, response_tx))
            .map_err(|_| LoadError::Closed)?;
        response_rx.await.map_err(|_| LoadError::Closed)?
    }
}
