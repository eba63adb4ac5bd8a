use async_trait::async_trait;

/// A `BatchFunction` defines the method through which some `Loader` fetches batched data from
/// the row store. The `BatchFunction` receives the unique keys requested during the `Loader`'s
/// most recent batch window, in first-requested order, and some user defined context struct
/// (typically a handle to the connection pool).
///
/// The function may return the loaded key value pairs in any order. Requesters of keys whose
/// values are not returned receive `None`; pairs for keys that were never requested are ignored.
///
/// A returned error fails every request of the window it was dispatched for. The loader never
/// retries.
///
/// Multiple `BatchFunctions` (and therefore loaders) can share the same context (likely through an
/// `Arc`, or a pool handle that is cheap to clone).
#[async_trait]
pub trait BatchFunction<K, V> {
    type Context;
    type Error;

    async fn load(keys: &[K], context: &Self::Context) -> Result<Vec<(K, V)>, Self::Error>;
}
