mod captioning_service;
mod extraction_service;

pub use captioning_service::{CaptioningError, CaptioningService};
pub use extraction_service::{ExtractionError, ExtractionService};
