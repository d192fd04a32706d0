use serde::{Deserialize, Serialize};

/// Upstream-assigned character identifier. Unique within one fetched
/// batch; no cross-batch deduplication happens anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub i64);

/// Column a table sort can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Status,
    Species,
}

/// Status filter applied to the batch. Status values are opaque text as
/// far as this system is concerned; `Only` matches exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}
