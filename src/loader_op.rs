use tokio::sync::oneshot;

use crate::loader::LoadError;

pub type LoadResult<V, E> = Result<Option<V>, LoadError<E>>;

/// A single pending `load` call: the requested key and the slot its result is delivered to.
///
/// Duplicate keys within a window each carry their own slot.
#[derive(Debug)]
pub struct LoadRequest<K, V, E> {
    key: K,
    response_tx: oneshot::Sender<LoadResult<V, E>>,
}

impl<K, V, E> LoadRequest<K, V, E>
where
    K: Copy,
{
    pub fn new(key: K, response_tx: oneshot::Sender<LoadResult<V, E>>) -> Self {
        Self { key, response_tx }
    }

    pub fn key(&self) -> K {
        self.key
    }

    /// Delivers the result to the caller. A caller that went away (its request finished or
    /// failed for an unrelated reason) simply has its result discarded.
    pub fn send_response(self, response: LoadResult<V, E>) {
        if self.response_tx.send(response).is_err() {
            tracing::debug!("receiver dropped, discarding load result");
        }
    }
}
