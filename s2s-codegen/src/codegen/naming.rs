//! Naming utilities for code generation

use heck::ToLowerCamelCase;

/// Quote characters used by the supported dialects
const QUOTE_CHARS: [char; 3] = ['`', '"', '\''];

/// Remove every quote character from an identifier
pub fn strip_quotes(raw: &str) -> String {
    raw.chars()
        .filter(|c| !QUOTE_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Convert a raw database identifier to a class name (UpperCamelCase)
///
/// `sys_user` -> `SysUser`, `` `ORDER_ITEM` `` -> `OrderItem`. Each underscore-separated
/// segment is title-cased (first letter upper, rest lower). Characters that cannot appear
/// in an identifier act as separators too. Returns an empty string for empty or
/// all-underscore input; callers must treat that as a failure.
pub fn to_type_name(raw: &str) -> String {
    let clean = strip_quotes(raw);
    let mut name: String = clean
        .split(|c: char| c == '_' || !c.is_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(title_case)
        .collect();

    // quotes must never survive into an identifier
    name.retain(|c| !QUOTE_CHARS.contains(&c));

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "Col");
    }
    name
}

/// Convert a raw database identifier to a property name (lowerCamelCase)
///
/// `user_name` -> `userName`. Java keywords get a `Value` suffix so the
/// result always compiles (`class` -> `classValue`).
pub fn to_property_name(raw: &str) -> String {
    let type_name = to_type_name(raw);
    let mut chars = type_name.chars();
    let property = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if is_java_keyword(&property) {
        format!("{}Value", property)
    } else {
        property
    }
}

/// lowerCamel alias of an already-normalized class name (`SysUser` -> `sysUser`)
pub fn to_instance_name(class_name: &str) -> String {
    let alias = class_name.to_lower_camel_case();
    if is_java_keyword(&alias) {
        format!("{}Value", alias)
    } else {
        alias
    }
}

/// Base name of the application entry point derived from the project name
///
/// Hyphens are mapped to underscores first so `ming-mall-system` becomes `MingMallSystem`.
pub fn application_class_name(project_name: &str) -> String {
    to_type_name(&project_name.replace('-', "_"))
}

/// Convert a dotted package name into a relative directory path (`com.ming.demo` -> `com/ming/demo`)
pub fn package_path(package_name: &str) -> String {
    package_name.trim().replace('.', "/")
}

fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Check if a name is a reserved Java keyword or literal
pub fn is_java_keyword(name: &str) -> bool {
    matches!(
        name,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "try"
            | "void"
            | "volatile"
            | "while"
            | "true"
            | "false"
            | "null"
            | "var"
            | "record"
            | "yield"
    )
}
