//! Stage transitions guarded by a versioned read.
//!
//! A transition is performed by creating a new subculturing record whose
//! next stage becomes the batch's latest known stage. Two clients doing
//! that concurrently used to be silent last-write-wins; the transition
//! now pins the feed revision it was planned against and refuses to
//! proceed once the feed has moved.

use plantlab_core::Error;

use crate::feed::BatchFeed;
use crate::stage::Stage;

/// A planned stage transition for one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct StageTransition {
    batch_code: String,
    /// Stage the batch was at when the transition was planned.
    pub from: Option<Stage>,
    /// Selected target stage.
    pub to: Stage,
    revision: u64,
}

impl StageTransition {
    /// Plan a transition against the feed's current snapshot.
    pub fn begin(feed: &BatchFeed, batch_code: &str, to: Stage) -> Self {
        StageTransition {
            batch_code: batch_code.to_string(),
            from: feed.stage_of(batch_code),
            to,
            revision: feed.revision(),
        }
    }

    pub fn batch_code(&self) -> &str {
        &self.batch_code
    }

    /// All stages remain legal targets; nothing ever enforced ordering
    /// and the screens offer the full list. Exposed for selects.
    pub fn targets() -> [Stage; 8] {
        Stage::all()
    }

    /// Confirm the plan is still based on current state. Call right
    /// before dispatching the save.
    pub fn validate(&self, feed: &BatchFeed) -> Result<(), Error> {
        feed.check_revision(self.revision)
    }
}
