//! Collapsing rendered declarations to a single line.

/// Appended when the first line ends by opening a block whose body was cut.
pub const PLACEHOLDER: &str = "...}";

/// Cut `rendered` at its first line break.
///
/// If the cut falls right after an opening brace the placeholder is appended, whether
/// the elided body was empty or not. The result always ends with exactly one `\n`.
pub fn truncate(rendered: &str) -> String {
    let bytes = rendered.as_bytes();
    let mut line = String::with_capacity(rendered.len().min(256) + PLACEHOLDER.len() + 1);

    match bytes.iter().position(|&b| b == b'\n') {
        Some(i) => {
            line.push_str(&rendered[..i]);
            if i > 0 && bytes[i - 1] == b'{' {
                line.push_str(PLACEHOLDER);
            }
        }
        None => line.push_str(rendered),
    }
    line.push('\n');
    line
}
