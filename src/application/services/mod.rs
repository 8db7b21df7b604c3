//! Cache components of the application layer.

pub mod fetch_cache;
pub mod instrumentation;
pub mod instrumented_cache;

pub use fetch_cache::{DEFAULT_PAGE_TTL_SECONDS, FetchCache};
pub use instrumentation::{CallCounter, CallHistory, CallInterceptor, Instrumented, Invocation};
pub use instrumented_cache::InstrumentedCache;
