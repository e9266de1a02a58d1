//! Indoor (laboratory) entity definitions.
//!
//! One module per screen, each exporting an [`EntityDef`] with the
//! screen's field descriptors, table layout, filter pair, and named
//! record→form / form→payload mappings.

pub mod cleaning;
pub mod incubation;
pub mod media;
pub mod sampling;
pub mod subculturing;

use plantlab_core::EntityDef;

/// All indoor entities, in tab order.
pub fn entities() -> Vec<EntityDef> {
    vec![
        media::autoclave_cycles(),
        media::media_batches(),
        subculturing::def(),
        incubation::incubation(),
        incubation::mortality_record(),
        sampling::def(),
        cleaning::cleaning_record(),
        cleaning::deep_cleaning_record(),
    ]
}
