//! Helpers for name searches.

/// Build an `ILIKE` pattern that matches `needle` as a literal substring.
///
/// `%`, `_` and `\` in the needle are escaped with Postgres' default
/// `LIKE` escape character, so user input never acts as a wildcard. An
/// empty needle matches every row.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
