/// Measurement domain layer: selection, query index, record loading.
pub mod errors;
pub mod query;
pub mod record;
pub mod selection;

pub use errors::ViewerError;
pub use query::QueryIndex;
pub use record::{DataLayout, LoadedSample, SampleRecord};
pub use selection::{Language, Model, Selection, Target};
