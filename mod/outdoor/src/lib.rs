//! Outdoor (hardening yard) entity definitions.
//!
//! Every outdoor screen keys its records to a batch: the batch name is
//! a select backed by the live batch feed, and picking one fills the
//! read-only crop name alongside it. All screens filter on
//! crop name then batch code.

pub mod fertilization;
pub mod holding_area;
pub mod mortality;
pub mod primary_hardening;
pub mod sampling;
pub mod secondary_hardening;
pub mod shifting;

use plantlab_core::EntityDef;

/// All outdoor entities, in tab order.
pub fn entities() -> Vec<EntityDef> {
    vec![
        primary_hardening::def(),
        secondary_hardening::def(),
        shifting::def(),
        mortality::def(),
        fertilization::def(),
        holding_area::def(),
        sampling::def(),
    ]
}
