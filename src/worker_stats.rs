#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Human readable name used to identify this worker stats when it is reported.
    tag: &'static str,
    /// Number of `load` requests received by the worker.
    load_requests: u32,
    /// Number of requests answered from the loader cache without a dispatch.
    cache_hits: u32,
    /// Number of windows whose dispatch succeeded.
    windows: u32,
    /// Number of windows whose dispatch failed.
    failed_windows: u32,
    /// The average number of requests (not unique) answered by one dispatch.
    average_window_size: f32,
    /// The max number of requests (not unique) answered by one dispatch.
    max_window_size: u32,
    /// The max number of unique keys sent in one dispatch.
    max_unique_keys: u32,
    /// The total number of rows actually loaded.
    items_loaded: u32,
}

impl WorkerStats {
    pub fn new(tag: &'static str) -> Self {
        Self { tag, ..Default::default() }
    }

    pub fn record_load_request(&mut self) {
        self.load_requests += 1;
    }

    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_window(&mut self, window_size: usize, unique_keys: usize, loaded: usize) {
        let window_size = window_size as u32;
        let total = self.windows + 1;
        self.average_window_size = (((self.average_window_size as f64 * self.windows as f64)
            + window_size as f64)
            / total as f64) as f32;
        self.windows = total;
        self.max_window_size = self.max_window_size.max(window_size);
        self.max_unique_keys = self.max_unique_keys.max(unique_keys as u32);
        self.items_loaded += loaded as u32;
    }

    pub fn record_failed_window(&mut self) {
        self.failed_windows += 1;
    }
}

impl Drop for WorkerStats {
    fn drop(&mut self) {
        tracing::debug!(worker_stats = ?self);
    }
}
