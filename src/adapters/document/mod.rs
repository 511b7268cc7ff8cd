//! Document parsing adapters.

mod text_extractor;

pub use text_extractor::DocumentTextExtractor;
