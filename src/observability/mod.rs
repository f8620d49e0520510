pub mod metrics;
pub mod tracing;

pub use self::metrics::Metrics;
pub use self::tracing::init_tracing;
