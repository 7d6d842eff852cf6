//! Live preview: turns a document into the ordered list of visible sections.

pub mod assembler;
pub mod handlers;
pub mod segmenter;
