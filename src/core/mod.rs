pub mod error;
pub mod extractor;
pub mod output;
pub mod sampling;
