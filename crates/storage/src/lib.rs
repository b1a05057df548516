#![forbid(unsafe_code)]

pub mod gviz;
pub mod source;

pub use gviz::GvizTableSource;
pub use source::{InMemoryTableSource, SourceError, TableRef, TableSource};
