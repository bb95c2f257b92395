//! SQL schema parser module using sqlparser-rs

mod metadata;
mod schema_parser;
mod selector;
mod statement;

pub use metadata::*;
pub use schema_parser::*;
pub use selector::*;
pub use statement::split_statements;
