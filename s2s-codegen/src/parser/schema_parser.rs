//! SQL DDL parsers using sqlparser-rs, one per dialect

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use sqlparser::ast::{ColumnDef, ColumnOption, CommentObject, CreateTable, ObjectName, Statement};
use sqlparser::dialect::{Dialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;
use tracing::{debug, warn};

use super::metadata::{ColumnMetadata, TableMetadata};
use super::statement::{split_statements, table_options_tail};
use crate::error::{CodegenError, Result};

/// A parser turning DDL of exactly one SQL dialect into table metadata
pub trait DdlParser: Send + Sync {
    /// Dialect name this parser handles (lower case)
    fn dialect_name(&self) -> &'static str;

    /// Whether this parser handles the given (already trimmed, lower-cased) dialect
    fn supports(&self, dialect: &str) -> bool {
        self.dialect_name() == dialect
    }

    /// Parse a SQL script into tables, in declaration order
    fn parse(&self, sql: &str) -> Result<Vec<TableMetadata>>;
}

/// Parser for MySQL / MariaDB DDL
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlParser;

/// Parser for PostgreSQL DDL, including `COMMENT ON` statements
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresParser;

impl DdlParser for MySqlParser {
    fn dialect_name(&self) -> &'static str {
        "mysql"
    }

    fn parse(&self, sql: &str) -> Result<Vec<TableMetadata>> {
        parse_schema_with(&MySqlDialect {}, sql)
    }
}

impl DdlParser for PostgresParser {
    fn dialect_name(&self) -> &'static str {
        "postgresql"
    }

    fn parse(&self, sql: &str) -> Result<Vec<TableMetadata>> {
        parse_schema_with(&PostgreSqlDialect {}, sql)
    }
}

/// Parse a MySQL schema string into table metadata
pub fn parse_schema(sql: &str) -> Result<Vec<TableMetadata>> {
    MySqlParser.parse(sql)
}

/// `COMMENT ON` text collected for later application, keyed by lower-cased names
#[derive(Default)]
struct CommentOverrides {
    tables: HashMap<String, String>,
    columns: HashMap<(String, String), String>,
}

/// Parse every statement on its own, keep the `CREATE TABLE`s, skip everything else
fn parse_schema_with(dialect: &dyn Dialect, sql: &str) -> Result<Vec<TableMetadata>> {
    if sql.trim().is_empty() {
        return Err(CodegenError::ParseError("SQL cannot be empty".into()));
    }

    let mut creates: Vec<(CreateTable, &str)> = Vec::new();
    let mut comments = CommentOverrides::default();
    let mut parsed_any = false;
    let mut first_error = None;

    for text in split_statements(sql) {
        let statements = match Parser::parse_sql(dialect, text) {
            Ok(statements) => statements,
            Err(e) => {
                warn!("Skipping statement the parser rejected: {}", e);
                debug!("Rejected statement: {}", text);
                first_error.get_or_insert(e);
                continue;
            }
        };
        parsed_any = parsed_any || !statements.is_empty();

        for stmt in statements {
            match stmt {
                Statement::CreateTable(create) => creates.push((create, text)),
                Statement::Comment {
                    object_type,
                    object_name,
                    comment: Some(comment),
                    ..
                } => collect_comment(&mut comments, object_type, &object_name, comment),
                other => debug!("Skipping non CREATE TABLE statement: {:.60}", other.to_string()),
            }
        }
    }

    if !parsed_any {
        return Err(match first_error {
            Some(e) => CodegenError::from(e),
            None => CodegenError::ParseError("no parsable SQL statement found".into()),
        });
    }
    if creates.is_empty() {
        return Err(CodegenError::NoTablesFound);
    }

    creates
        .iter()
        .map(|(create, text)| extract_table_metadata(create, text, &comments))
        .collect()
}

fn collect_comment(
    comments: &mut CommentOverrides,
    object_type: CommentObject,
    object_name: &ObjectName,
    comment: String,
) {
    let parts = name_parts(object_name);
    match object_type {
        CommentObject::Table => {
            if let Some(table) = parts.last() {
                comments.tables.insert(table.to_lowercase(), comment);
            }
        }
        CommentObject::Column => {
            if let [.., table, column] = parts.as_slice() {
                comments
                    .columns
                    .insert((table.to_lowercase(), column.to_lowercase()), comment);
            }
        }
        _ => {}
    }
}

/// Extract table metadata from a CREATE TABLE statement
fn extract_table_metadata(
    create: &CreateTable,
    source: &str,
    comments: &CommentOverrides,
) -> Result<TableMetadata> {
    let name = extract_table_name(&create.name);
    let key = name.to_lowercase();

    let comment = comments
        .tables
        .get(&key)
        .cloned()
        .or_else(|| table_options_tail(source).and_then(extract_table_comment));

    let columns = create
        .columns
        .iter()
        .map(|col_def| {
            let override_comment = comments
                .columns
                .get(&(key.clone(), col_def.name.value.to_lowercase()))
                .map(String::as_str);
            extract_column_metadata(col_def, override_comment)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed table {} with {} columns", name, columns.len());
    TableMetadata::new(&name, comment.as_deref(), columns)
}

/// Extract column metadata from a column definition
fn extract_column_metadata(
    col_def: &ColumnDef,
    override_comment: Option<&str>,
) -> Result<ColumnMetadata> {
    let data_type = col_def.data_type.to_string();
    let (base_type, length) = split_data_type(&data_type);

    let mut column = ColumnMetadata::builder(col_def.name.value.clone(), base_type);
    if let Some(length) = length {
        column = column.length(length);
    }

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => column = column.nullable(false),
            ColumnOption::Null => column = column.nullable(true),
            ColumnOption::Default(expr) => column = column.default_value(expr.to_string()),
            ColumnOption::PrimaryKey(_) => column = column.primary_key(true),
            ColumnOption::Comment(c) => column = column.comment(c.clone()),
            _ => {}
        }
    }
    if let Some(comment) = override_comment {
        column = column.comment(comment);
    }

    column.build()
}

/// Split a rendered data type into its base name and argument list
///
/// `VARCHAR(255)` -> (`VARCHAR`, Some(`255`)), `INT(11) UNSIGNED` -> (`INT`, Some(`11`)),
/// `TIMESTAMP WITH TIME ZONE` -> (whole string, None)
fn split_data_type(data_type: &str) -> (String, Option<String>) {
    match (data_type.find('('), data_type.rfind(')')) {
        (Some(open), Some(close)) if close > open => (
            data_type[..open].trim().to_string(),
            Some(data_type[open + 1..close].trim().to_string()),
        ),
        _ => (data_type.trim().to_string(), None),
    }
}

/// Find `COMMENT 'x'` / `COMMENT = 'x'` among table options
fn extract_table_comment(options: &str) -> Option<String> {
    static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
    let re = COMMENT_RE.get_or_init(|| {
        Regex::new(r#"(?i)\bCOMMENT\s*=?\s*(?:'((?:[^']|'')*)'|"((?:[^"]|"")*)")"#)
            .expect("table comment pattern is valid")
    });
    let caps = re.captures(options)?;
    caps.get(1)
        .map(|m| m.as_str().replace("''", "'"))
        .or_else(|| caps.get(2).map(|m| m.as_str().replace("\"\"", "\"")))
}

fn name_parts(name: &ObjectName) -> Vec<String> {
    name.0
        .iter()
        .filter_map(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .collect()
}

/// Extract the unqualified table name from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name_parts(name).pop().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let sql = r#"
            CREATE TABLE users (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                username VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL
            );
        "#;

        let tables = parse_schema(sql).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].table_name(), "users");
        assert_eq!(tables[0].class_name(), "Users");
        assert_eq!(tables[0].columns().len(), 3);
        assert_eq!(tables[0].primary_key_column(), Some("id"));
        assert_eq!(tables[0].primary_key_type(), "Long");
    }

    #[test]
    fn test_columns_keep_declaration_order() {
        let sql = "CREATE TABLE t (z INT, a INT, m INT, b INT)";
        let tables = parse_schema(sql).unwrap();
        let names: Vec<_> = tables[0].columns().iter().map(|c| c.column_name()).collect();
        assert_eq!(names, vec!["z", "a", "m", "b"]);
    }

    #[test]
    fn test_parse_mysql_comments_and_defaults() {
        let sql = r#"
            CREATE TABLE `sys_user` (
                `id` bigint(20) NOT NULL AUTO_INCREMENT PRIMARY KEY COMMENT 'Primary key',
                `user_name` varchar(64) NOT NULL DEFAULT '' COMMENT 'Login name',
                `balance` decimal(10,2) DEFAULT '0.00',
                `created_at` datetime DEFAULT CURRENT_TIMESTAMP
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT='System users';
        "#;

        let table = &parse_schema(sql).unwrap()[0];
        assert_eq!(table.table_name(), "sys_user");
        assert_eq!(table.class_name(), "SysUser");
        assert_eq!(table.table_comment(), "System users");

        let user_name = table.get_column("user_name").unwrap();
        assert_eq!(user_name.property_name(), "userName");
        assert_eq!(user_name.raw_db_type(), "varchar(64)");
        assert_eq!(user_name.max_length(), Some(64));
        assert!(!user_name.nullable());
        assert_eq!(user_name.default_value(), Some(""));
        assert_eq!(user_name.comment(), "Login name");

        let balance = table.get_column("balance").unwrap();
        assert_eq!(balance.mapped_type(), "BigDecimal");
        assert_eq!(balance.max_length(), None);
        assert_eq!(balance.default_value(), Some("0.00"));
        assert!(balance.nullable());

        assert!(table.imports().contains("java.math.BigDecimal"));
        assert!(table.imports().contains("java.time.LocalDateTime"));
    }

    #[test]
    fn test_varchar_nullable_by_default() {
        let table = &parse_schema("CREATE TABLE t (name varchar(255))").unwrap()[0];
        let col = &table.columns()[0];
        assert!(col.nullable());
        assert_eq!(col.max_length(), Some(255));
    }

    #[test]
    fn test_non_create_statements_are_skipped() {
        let sql = r#"
            INSERT INTO users (id) VALUES (1);
            CREATE TABLE users (id BIGINT PRIMARY KEY);
            ALTER TABLE users ADD COLUMN name VARCHAR(10);
            CREATE TABLE orders (id BIGINT PRIMARY KEY);
        "#;
        let tables = parse_schema(sql).unwrap();
        let names: Vec<_> = tables.iter().map(|t| t.table_name()).collect();
        assert_eq!(names, vec!["users", "orders"]);
    }

    #[test]
    fn test_only_inserts_is_parse_error() {
        let sql = "INSERT INTO users (id) VALUES (1); INSERT INTO users (id) VALUES (2);";
        let err = parse_schema(sql).unwrap_err();
        assert!(matches!(err, CodegenError::NoTablesFound));
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(matches!(parse_schema("   "), Err(CodegenError::ParseError(_))));
        assert!(matches!(
            parse_schema("this is not sql at all"),
            Err(CodegenError::ParseError(_))
        ));
    }

    #[test]
    fn test_unparsable_statement_is_skipped() {
        let sql = "THIS IS NOT SQL; CREATE TABLE ok (id INT PRIMARY KEY);";
        let tables = parse_schema(sql).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].table_name(), "ok");
    }

    #[test]
    fn test_duplicate_primary_key_first_wins() {
        let sql = "CREATE TABLE t (code VARCHAR(16) PRIMARY KEY, id BIGINT PRIMARY KEY)";
        let table = &parse_schema(sql).unwrap()[0];
        assert_eq!(table.primary_key_column(), Some("code"));
        assert_eq!(table.primary_key_type(), "String");
    }

    #[test]
    fn test_unknown_column_type_degrades() {
        let table = &parse_schema("CREATE TABLE t (shape GEOMETRY)").unwrap()[0];
        assert_eq!(table.columns()[0].mapped_type(), "Object");
    }

    #[test]
    fn test_postgres_comment_on() {
        let sql = r#"
            CREATE TABLE public.orders (
                id BIGSERIAL PRIMARY KEY,
                total NUMERIC(12, 2) NOT NULL,
                placed_at TIMESTAMP WITH TIME ZONE,
                payload JSONB
            );
            COMMENT ON TABLE public.orders IS 'Customer orders';
            COMMENT ON COLUMN public.orders.total IS 'Order total';
        "#;
        let tables = PostgresParser.parse(sql).unwrap();
        let table = &tables[0];
        assert_eq!(table.table_name(), "orders");
        assert_eq!(table.table_comment(), "Customer orders");
        assert_eq!(table.primary_key_type(), "Long");

        let total = table.get_column("total").unwrap();
        assert_eq!(total.comment(), "Order total");
        assert_eq!(total.length(), Some("12,2"));
        assert_eq!(total.max_length(), None);

        assert_eq!(table.get_column("placed_at").unwrap().mapped_type(), "LocalDateTime");
        assert_eq!(table.get_column("payload").unwrap().mapped_type(), "String");
    }

    #[test]
    fn test_split_data_type() {
        assert_eq!(
            split_data_type("VARCHAR(255)"),
            ("VARCHAR".to_string(), Some("255".to_string()))
        );
        assert_eq!(
            split_data_type("INT(11) UNSIGNED"),
            ("INT".to_string(), Some("11".to_string()))
        );
        assert_eq!(split_data_type("TEXT"), ("TEXT".to_string(), None));
    }

    #[test]
    fn test_extract_table_comment() {
        assert_eq!(
            extract_table_comment(" ENGINE=InnoDB COMMENT='it''s here'"),
            Some("it's here".to_string())
        );
        assert_eq!(extract_table_comment(" COMMENT 'x'"), Some("x".to_string()));
        assert_eq!(extract_table_comment(" ENGINE=InnoDB"), None);
    }
}
