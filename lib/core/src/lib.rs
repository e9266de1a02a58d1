pub mod controller;
pub mod error;
pub mod field;
pub mod filter;
pub mod record;

pub use controller::{Modal, RecordStore, Saved, TableController};
pub use error::Error;
pub use field::{
    coerce_count, form_from_record, form_str, missing_required, EntityDef, FieldDef, FieldKind,
    FilterFields, FormValues, SelectSource,
};
pub use filter::{cascaded_options, date_part, field_options, SelectOption};
pub use record::Record;
