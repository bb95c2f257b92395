//! Metadata structures for parsed SQL schema
//!
//! Both records are assembled once by the parser and never mutated afterwards:
//! fields are private and only exposed through accessors.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::codegen::{map_type, naming, JavaType};
use crate::error::{CodegenError, Result};

/// Java type used for the primary key when a table declares none
pub const DEFAULT_PRIMARY_KEY_TYPE: &str = "Long";

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    column_name: String,
    property_name: String,
    raw_db_type: String,
    mapped_type: String,
    length: Option<String>,
    max_length: Option<u32>,
    nullable: bool,
    is_primary_key: bool,
    default_value: Option<String>,
    comment: String,
}

/// Builder for [`ColumnMetadata`]
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    name: String,
    base_type: String,
    length: Option<String>,
    nullable: bool,
    primary_key: bool,
    default_value: Option<String>,
    comment: String,
}

impl ColumnBuilder {
    /// Length / precision arguments as written, e.g. `255` or `10,2`
    pub fn length(mut self, length: impl Into<String>) -> Self {
        let length: String = length.into().chars().filter(|c| !c.is_whitespace()).collect();
        self.length = (!length.is_empty()).then_some(length);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    /// Default value; surrounding quotes are removed
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into().replace(['\'', '"'], ""));
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into().replace('\'', "");
        self
    }

    /// Finish the column. Fails when the name normalizes to an empty identifier.
    pub fn build(self) -> Result<ColumnMetadata> {
        let column_name = naming::strip_quotes(&self.name);
        let property_name = naming::to_property_name(&column_name);
        if property_name.is_empty() {
            return Err(CodegenError::ParseError(format!(
                "column name '{}' does not produce a valid identifier",
                self.name
            )));
        }

        let base_type = self.base_type.trim().to_lowercase();
        let raw_db_type = match &self.length {
            Some(len) => format!("{}({})", base_type, len),
            None => base_type.clone(),
        };
        let mapped_type = map_type(&base_type);
        let max_length = self.length.as_deref().and_then(parse_max_length);

        Ok(ColumnMetadata {
            column_name,
            property_name,
            raw_db_type,
            mapped_type: mapped_type.as_str().to_string(),
            length: self.length,
            max_length,
            nullable: self.nullable,
            is_primary_key: self.primary_key,
            default_value: self.default_value,
            comment: self.comment,
        })
    }
}

/// Parse a single numeric bound (`255` -> 255); pairs like `10,2` yield `None`
fn parse_max_length(length: &str) -> Option<u32> {
    if length.contains(',') {
        return None;
    }
    length.trim().parse().ok()
}

impl ColumnMetadata {
    /// Start building a column from its raw name and base type (`varchar`, `decimal`, ...)
    pub fn builder(name: impl Into<String>, base_type: impl Into<String>) -> ColumnBuilder {
        ColumnBuilder {
            name: name.into(),
            base_type: base_type.into(),
            length: None,
            nullable: true,
            primary_key: false,
            default_value: None,
            comment: String::new(),
        }
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn raw_db_type(&self) -> &str {
        &self.raw_db_type
    }

    pub fn mapped_type(&self) -> &str {
        &self.mapped_type
    }

    pub fn length(&self) -> Option<&str> {
        self.length.as_deref()
    }

    pub fn max_length(&self) -> Option<u32> {
        self.max_length
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Import required by this column's Java type
    pub fn required_import(&self) -> Option<&'static str> {
        JavaType::from_name(&self.mapped_type).and_then(|t| t.import_path())
    }

    /// Whether a not-null constraint annotation applies
    pub fn needs_not_null(&self) -> bool {
        !self.nullable
    }

    /// Whether a size constraint annotation applies: bounded string columns only
    pub fn needs_size(&self) -> bool {
        self.max_length.is_some() && self.mapped_type == JavaType::String.as_str()
    }

    /// Whether validation annotations apply to this column
    pub fn needs_validation(&self) -> bool {
        self.needs_not_null() || self.needs_size()
    }
}

/// Metadata for a database table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    table_name: String,
    class_name: String,
    table_comment: String,
    primary_key_type: String,
    primary_key_column: Option<String>,
    columns: Vec<ColumnMetadata>,
    imports: BTreeSet<String>,
}

impl TableMetadata {
    /// Assemble a table from its raw name, comment and columns in declared order.
    ///
    /// The first column flagged as primary key decides `primary_key_column` and
    /// `primary_key_type`.
    pub fn new(
        table_name: &str,
        comment: Option<&str>,
        columns: Vec<ColumnMetadata>,
    ) -> Result<Self> {
        let table_name = naming::strip_quotes(table_name);
        let class_name = naming::to_type_name(&table_name);
        if class_name.is_empty() {
            return Err(CodegenError::ParseError(format!(
                "table name '{}' does not produce a valid class name",
                table_name
            )));
        }

        let mut primary_keys = columns.iter().filter(|c| c.is_primary_key);
        let primary_key = primary_keys.next();
        if let (Some(first), Some(extra)) = (primary_key, primary_keys.next()) {
            warn!(
                "Table {} declares several PRIMARY KEY columns; using {} and ignoring {}",
                table_name, first.column_name, extra.column_name
            );
        }

        let primary_key_type = primary_key
            .map(|c| c.mapped_type.clone())
            .unwrap_or_else(|| DEFAULT_PRIMARY_KEY_TYPE.to_string());
        let primary_key_column = primary_key.map(|c| c.column_name.clone());

        let imports = columns
            .iter()
            .filter_map(|c| c.required_import())
            .map(str::to_string)
            .collect();

        Ok(Self {
            table_comment: comment.unwrap_or_default().replace('\'', ""),
            table_name,
            class_name,
            primary_key_type,
            primary_key_column,
            columns,
            imports,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn table_comment(&self) -> &str {
        &self.table_comment
    }

    pub fn primary_key_type(&self) -> &str {
        &self.primary_key_type
    }

    pub fn primary_key_column(&self) -> Option<&str> {
        self.primary_key_column.as_deref()
    }

    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    /// The column recorded as primary key, if any
    pub fn primary_key(&self) -> Option<&ColumnMetadata> {
        self.primary_key_column
            .as_deref()
            .and_then(|name| self.get_column(name))
    }
}
