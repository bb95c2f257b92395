//! Database column type to Java type mapping

use serde::Serialize;

/// Represents a Java type used in generated sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JavaType {
    String,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    BigDecimal,
    LocalDate,
    LocalDateTime,
    LocalTime,
    ByteArray,
    /// Fallback for column types the table does not know
    Object,
}

/// Lower-cased database type token -> Java type.
///
/// Multi-word tokens (`double precision`) are matched before the first-word fallback.
const TYPE_TABLE: &[(&str, JavaType)] = &[
    // character
    ("varchar", JavaType::String),
    ("char", JavaType::String),
    ("character", JavaType::String),
    ("character varying", JavaType::String),
    ("nvarchar", JavaType::String),
    ("nchar", JavaType::String),
    ("text", JavaType::String),
    ("tinytext", JavaType::String),
    ("mediumtext", JavaType::String),
    ("longtext", JavaType::String),
    ("enum", JavaType::String),
    ("set", JavaType::String),
    ("json", JavaType::String),
    ("jsonb", JavaType::String),
    ("uuid", JavaType::String),
    // integer
    ("tinyint", JavaType::Integer),
    ("smallint", JavaType::Integer),
    ("mediumint", JavaType::Integer),
    ("int", JavaType::Integer),
    ("integer", JavaType::Integer),
    ("int4", JavaType::Integer),
    ("bigint", JavaType::Long),
    ("int8", JavaType::Long),
    ("serial", JavaType::Integer),
    ("bigserial", JavaType::Long),
    ("smallserial", JavaType::Short),
    // floating point / exact
    ("float", JavaType::Float),
    ("real", JavaType::Float),
    ("double", JavaType::Double),
    ("double precision", JavaType::Double),
    ("decimal", JavaType::BigDecimal),
    ("numeric", JavaType::BigDecimal),
    // temporal
    ("date", JavaType::LocalDate),
    ("datetime", JavaType::LocalDateTime),
    ("timestamp", JavaType::LocalDateTime),
    ("timestamptz", JavaType::LocalDateTime),
    ("time", JavaType::LocalTime),
    // boolean
    ("boolean", JavaType::Boolean),
    ("bool", JavaType::Boolean),
    ("bit", JavaType::Boolean),
    // binary
    ("bytea", JavaType::ByteArray),
    ("binary", JavaType::ByteArray),
    ("varbinary", JavaType::ByteArray),
    ("blob", JavaType::ByteArray),
    ("tinyblob", JavaType::ByteArray),
    ("mediumblob", JavaType::ByteArray),
    ("longblob", JavaType::ByteArray),
];

impl JavaType {
    /// Get the type name as written in Java source
    pub fn as_str(&self) -> &'static str {
        match self {
            JavaType::String => "String",
            JavaType::Short => "Short",
            JavaType::Integer => "Integer",
            JavaType::Long => "Long",
            JavaType::Float => "Float",
            JavaType::Double => "Double",
            JavaType::Boolean => "Boolean",
            JavaType::BigDecimal => "BigDecimal",
            JavaType::LocalDate => "LocalDate",
            JavaType::LocalDateTime => "LocalDateTime",
            JavaType::LocalTime => "LocalTime",
            JavaType::ByteArray => "byte[]",
            JavaType::Object => "Object",
        }
    }

    /// Fully-qualified import needed to use this type, if any
    pub fn import_path(&self) -> Option<&'static str> {
        match self {
            JavaType::BigDecimal => Some("java.math.BigDecimal"),
            JavaType::LocalDate => Some("java.time.LocalDate"),
            JavaType::LocalDateTime => Some("java.time.LocalDateTime"),
            JavaType::LocalTime => Some("java.time.LocalTime"),
            _ => None,
        }
    }

    /// Look up a type by its Java name
    pub fn from_name(name: &str) -> Option<JavaType> {
        [
            JavaType::String,
            JavaType::Short,
            JavaType::Integer,
            JavaType::Long,
            JavaType::Float,
            JavaType::Double,
            JavaType::Boolean,
            JavaType::BigDecimal,
            JavaType::LocalDate,
            JavaType::LocalDateTime,
            JavaType::LocalTime,
            JavaType::ByteArray,
            JavaType::Object,
        ]
        .into_iter()
        .find(|t| t.as_str() == name)
    }
}

/// Map a raw database type (`varchar(255)`, `BIGINT UNSIGNED`, `timestamp with time zone`)
/// to a Java type. Unknown types fall back to [`JavaType::Object`].
pub fn map_type(raw_db_type: &str) -> JavaType {
    let base = base_type_name(raw_db_type);
    if let Some(java) = lookup(&base) {
        return java;
    }
    base.split_whitespace()
        .next()
        .and_then(lookup)
        .unwrap_or(JavaType::Object)
}

/// Import path required by a Java type name, `None` for `java.lang` types and primitives
pub fn required_import(java_type: &str) -> Option<&'static str> {
    JavaType::from_name(java_type).and_then(|t| t.import_path())
}

/// Lower-cased type name with any `(...)` arguments and trailing modifiers removed
pub fn base_type_name(raw_db_type: &str) -> String {
    let lower = raw_db_type.trim().to_lowercase();
    let base = match lower.find('(') {
        Some(idx) => &lower[..idx],
        None => lower.as_str(),
    };
    base.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn lookup(token: &str) -> Option<JavaType> {
    TYPE_TABLE
        .iter()
        .find(|(db, _)| *db == token)
        .map(|(_, java)| *java)
}
