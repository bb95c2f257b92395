//! Dialect -> parser lookup

use tracing::debug;

use super::schema_parser::{DdlParser, MySqlParser, PostgresParser};
use crate::error::{CodegenError, Result};

/// Dialect used when the caller does not name one
pub const DEFAULT_DIALECT: &str = "mysql";

/// Every registered parser, checked in order
static PARSERS: &[&dyn DdlParser] = &[&MySqlParser, &PostgresParser];

/// Select the parser for a dialect name (case-insensitive, trimmed).
///
/// `None` or a blank name selects [`DEFAULT_DIALECT`].
pub fn select_parser(dialect: Option<&str>) -> Result<&'static dyn DdlParser> {
    let requested = dialect
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DIALECT)
        .to_lowercase();

    let parser = PARSERS
        .iter()
        .copied()
        .find(|p| p.supports(&requested))
        .ok_or_else(|| CodegenError::UnsupportedDialect {
            dialect: requested.clone(),
            supported: supported_dialects(),
        })?;

    debug!("Using {} parser", parser.dialect_name());
    Ok(parser)
}

/// Names of all dialects a parser is registered for
pub fn supported_dialects() -> Vec<&'static str> {
    PARSERS.iter().map(|p| p.dialect_name()).collect()
}
