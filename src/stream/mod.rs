//! Stream adapters for packet links

mod preprocess;

pub use preprocess::{Preprocess, PreprocessExt};
