#![forbid(unsafe_code)]

//! Grid bookkeeping errors.
//!
//! Every variant is a contract violation between the grid and its caller
//! (a stale handle, a domain item reported dead twice, a rebinding). The
//! operation that detects one leaves the grid untouched and returns it; the
//! caller should surface it as a developer diagnostic.

use crate::handle::HandleId;
use thiserror::Error;

/// Standard result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The handle is not live in this grid (never created, or already released).
    #[error("handle {0} is not live in this grid")]
    HandleNotFound(HandleId),

    /// No live handle is bound to the domain item.
    #[error("no icon is bound to item {item}")]
    ItemNotFound { item: String },

    /// A selection gesture referenced a handle outside the current sequence.
    #[error("handle {0} is not in the current sequence")]
    InvalidSelection(HandleId),

    /// A handle was bound a second time without being reset.
    #[error("handle {0} is already bound")]
    AlreadyBound(HandleId),

    /// The sequence already holds the handle.
    #[error("handle {0} is already in the sequence")]
    DuplicateHandle(HandleId),

    /// The collection lists the same domain item twice.
    #[error("item {item} appears more than once in the collection")]
    DuplicateItem { item: String },

    /// The pool cannot allocate another slot.
    #[error("icon pool is full ({max_slots} slots)")]
    PoolExhausted { max_slots: u32 },

    /// A reorder was not a permutation of the current sequence.
    #[error("reorder lists {actual} handles but the sequence holds {expected}")]
    ReorderMismatch { expected: usize, actual: usize },
}

impl GridError {
    pub(crate) fn item_not_found(item: &impl std::fmt::Debug) -> Self {
        Self::ItemNotFound {
            item: format!("{item:?}"),
        }
    }

    pub(crate) fn duplicate_item(item: &impl std::fmt::Debug) -> Self {
        Self::DuplicateItem {
            item: format!("{item:?}"),
        }
    }
}
