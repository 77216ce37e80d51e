// Category-aware pattern extraction: the pattern library and the text
// attribute extractor that applies it to crawled page text.

pub mod extractor;
pub mod patterns;

pub use extractor::{extract, ExtractedAttributes};
