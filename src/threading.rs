use once_cell::sync::Lazy;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Pool for blocking network calls, so the UI thread never waits on the backend.
#[allow(clippy::expect_used)]
pub static POOL: Lazy<ThreadPool> = Lazy::new(|| {
    ThreadPoolBuilder::new()
        .num_threads(2)
        .thread_name(|i| format!("perfume-form-net-{i}"))
        .build()
        .expect("failed to build network thread pool")
});
