pub mod panels;
pub mod plot;
pub mod table;

/// Group digits by thousands with a thin space: `1234567` → `1 234 567`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{202F}');
        }
        out.push(ch);
    }
    out
}

/// Display an optional integer, `-` when absent.
pub fn format_optional(value: Option<i64>) -> String {
    value.map(format_thousands).unwrap_or_else(|| "-".to_string())
}
