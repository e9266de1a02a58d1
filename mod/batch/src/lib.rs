//! Batch lifecycle derivation.
//!
//! A batch is a virtual entity: no table backs it. Its identity is the
//! `batch_code` appearing across the subculturing/incubation/sampling
//! tables, and its current stage is whatever the latest-dated record
//! says. This crate derives that view, serves it through a polling feed,
//! and guards stage transitions with a revision check.

pub mod derive;
pub mod feed;
pub mod stage;
pub mod transition;

pub use derive::{derive_batches, BatchSnapshot, Collection};
pub use feed::{
    start_poller, BatchEndpoint, BatchFeed, BatchOption, DerivedSource, FeedSnapshot,
    PollerHandle, POLL_INTERVAL,
};
pub use stage::Stage;
pub use transition::StageTransition;
