//! Partitioning of candidate titles into search batches.

use crate::Title;

/// Maximum number of titles sent in one artwork search request.
pub const BATCH_SIZE: usize = 15;

/// Split `titles` into consecutive batches of at most [`BATCH_SIZE`].
///
/// Order is preserved and only the last batch may be short. An empty input
/// yields no batches.
pub fn chunk_titles(titles: &[Title]) -> Vec<&[Title]> {
    titles.chunks(BATCH_SIZE).collect()
}

#[cfg(test)]
#[path = "tests/batch_tests.rs"]
mod tests;
