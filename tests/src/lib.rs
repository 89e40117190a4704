pub use fixtures::*;

mod recording_mapper;
pub use recording_mapper::{CallLog, FailingMapper, RecordingMapper};

/// Installs a test subscriber honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
