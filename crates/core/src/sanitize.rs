/// Strips NUL padding and surrounding whitespace. Some documents pad
/// fixed-length metadata fields with NUL bytes.
pub fn clean_value(value: &str) -> String {
    value
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

pub fn is_ascii(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii())
}

pub fn transliterate(value: &str) -> String {
    deunicode::deunicode(value)
}

/// Keeps only alphanumerics, `-`, `.` and spaces.
pub fn strip_illegal(value: &str) -> String {
    value.chars().filter(|&ch| is_safe_char(ch)).collect()
}

/// Replaces characters that would let a rendered name leave its directory
/// or break the filesystem call.
pub fn neutralize_separators(value: &str) -> String {
    value
        .chars()
        .map(|ch| if is_separator_or_control(ch) { '_' } else { ch })
        .collect()
}

fn is_safe_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '.' | ' ')
}

fn is_separator_or_control(ch: char) -> bool {
    matches!(ch, '/' | '\\') || ch == '\0' || ch.is_control()
}
