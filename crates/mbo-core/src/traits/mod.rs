pub mod extractor;
pub mod weight_source;

pub use extractor::{ExtractionContext, ISignalExtractor};
pub use weight_source::IWeightSource;
