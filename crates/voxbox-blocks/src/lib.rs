//! Block kinds and the per-kind rule table.
#![forbid(unsafe_code)]

pub mod types;

pub use types::{BlockProps, BlockType, Selection};
