use thiserror::Error;

/// Errors raised when indexing into the structure hierarchy.
///
/// An empty collection is reported separately from an out-of-range index so callers
/// can tell "nothing was parsed" apart from "asked for the wrong slot".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("No {collection} found in {owner}")]
    EmptyCollection {
        collection: &'static str,
        owner: String,
    },
    #[error("{collection} index {index} out of range in {owner} (size {len})")]
    IndexOutOfRange {
        collection: &'static str,
        owner: String,
        index: usize,
        len: usize,
    },
}

/// Looks up `index` in `items`, distinguishing empty collections from bad indices.
pub(crate) fn checked_get<'a, T>(
    items: &'a [T],
    index: usize,
    collection: &'static str,
    owner: impl FnOnce() -> String,
) -> Result<&'a T, AccessError> {
    if items.is_empty() {
        return Err(AccessError::EmptyCollection {
            collection,
            owner: owner(),
        });
    }
    items.get(index).ok_or_else(|| AccessError::IndexOutOfRange {
        collection,
        owner: owner(),
        index,
        len: items.len(),
    })
}
