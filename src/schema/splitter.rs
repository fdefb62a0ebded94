//! Splitting raw script text into statements.

/// Split a script into statements on a literal separator.
///
/// Each piece is trimmed and blank pieces are dropped; order is preserved. Comments are
/// left inside whichever statement they fall in. An empty separator does no splitting.
pub fn split_statements<'a>(script: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        let statement = script.trim();
        return if statement.is_empty() { Vec::new() } else { vec![statement] };
    }

    script.split(separator).map(str::trim).filter(|statement| !statement.is_empty()).collect()
}
