//! The four signal extractors plus the passthrough stand-in.

pub mod adjacency;
pub mod cyclical;
pub mod frequency;
pub mod passthrough;
pub mod personal;

pub use adjacency::AdjacencyExtractor;
pub use cyclical::CyclicalExtractor;
pub use frequency::FrequencyExtractor;
pub use passthrough::PassthroughExtractor;
pub use personal::PersonalExtractor;
