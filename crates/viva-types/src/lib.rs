//! Shared Viva types.
//!
//! `models` holds the persisted entities and their enums, `api` the request and
//! response shapes of the RPC surface, `placeholders` the canned data served by
//! features that have no backing implementation yet.

#[macro_use]
mod macros;

pub mod api;
pub mod models;
pub mod placeholders;

/// A stored or submitted string did not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
