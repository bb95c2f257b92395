//! Placing generated files on disk: path layout, safety checks, writing and packing

mod archive;
pub mod path_resolver;
mod safety;
mod writer;

pub use archive::pack_project;
pub use path_resolver::resolve;
pub use safety::*;
pub use writer::*;
