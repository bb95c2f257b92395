//! Splitting a SQL script into independent statements

/// Split a script on top-level `;`, ignoring semicolons inside quotes,
/// `--`/`#` line comments, `/* */` block comments and `$$` bodies.
///
/// Returned slices are trimmed; blank pieces are dropped.
pub fn split_statements(sql: &str) -> Vec<&str> {
    let bytes = sql.as_bytes();
    let mut statements = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_quoted(bytes, i);
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = skip_line(bytes, i);
            }
            b'#' => {
                i = skip_line(bytes, i);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i);
            }
            b'$' if bytes.get(i + 1) == Some(&b'$') => {
                i = skip_dollar_quoted(bytes, i);
            }
            b';' => {
                push_statement(&mut statements, &sql[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    push_statement(&mut statements, &sql[start..]);
    statements
}

/// Return the part of a `CREATE TABLE` statement after its column list
/// (`ENGINE=InnoDB COMMENT='...'`), or `None` when there is no column list.
pub fn table_options_tail(statement: &str) -> Option<&str> {
    let bytes = statement.as_bytes();
    let open = statement.find('(')?;
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_quoted(bytes, i);
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&statement[i + 1..]);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn push_statement<'a>(statements: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        statements.push(piece);
    }
}

/// Skip a quoted run starting at `start`; doubled quotes and backslash escapes stay inside.
fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'\\' && quote != b'`' {
            i += 2;
            continue;
        }
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

fn skip_line(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|offset| start + offset + 1)
        .unwrap_or(bytes.len())
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|offset| start + 2 + offset + 2)
        .unwrap_or(bytes.len())
}

fn skip_dollar_quoted(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"$$")
        .map(|offset| start + 2 + offset + 2)
        .unwrap_or(bytes.len())
}
