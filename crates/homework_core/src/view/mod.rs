//! Client view-model: display order, urgency classes and local state.
//!
//! # Responsibility
//! - Derive everything a client renders from the fetched collection.
//! - Hold client-side state in an explicit reducer-style container.
//!
//! # Invariants
//! - Nothing here touches storage or the network.
//! - Derived values are recomputed from state, never persisted.

pub mod format;
pub mod order;
pub mod store;
pub mod urgency;
