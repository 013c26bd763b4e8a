pub mod category;
pub mod record;
pub mod schema;

pub use category::{CategoryProfile, Rgb, WineCategory};
pub use record::{DocId, FieldValue, WineRecord, MISSING_VALUE};
pub use schema::{ContainerSpec, FormStep, SelectionMode, TextField};
