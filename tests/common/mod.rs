// Common test utilities and fixtures


// Re-export commonly used items
// Note: These may appear unused in unit tests but are used in integration tests
#[allow(unused_imports)]
pub use fixtures::{docx_bytes, TestCorpus, MUSEUM_TEXT, SAMPLE_CATALOG};
#[allow(unused_imports)]
pub use helpers::{create_test_services, deterministic_bot, test_config};
