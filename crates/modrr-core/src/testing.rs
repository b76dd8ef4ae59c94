//! Testing helpers and mock utilities.
//!
//! Provides convenient constructors for mocked completion and storage providers.

use crate::llm::MockCompletionProvider;
use crate::storage::MockRegulationsStore;

/// Create a mock completion provider that must never be called.
#[must_use]
pub fn mock_llm_unreachable() -> MockCompletionProvider {
    let mut mock = MockCompletionProvider::new();
    mock.expect_generate_content().never();
    mock
}

/// Create a mock store that always returns `regulations` and accepts writes.
#[must_use]
pub fn mock_store_with(regulations: Option<&'static str>) -> MockRegulationsStore {
    let mut mock = MockRegulationsStore::new();

    mock.expect_get_regulations()
        .returning(move || Ok(regulations.map(ToString::to_string)));

    mock.expect_save_regulations().returning(|_| Ok(()));

    mock
}
