pub use foundation::text::escape_html as escape;

/// Formats a coordinate the way a browser prints a number: `200`, `10.5`, never `-0`.
pub fn number(v: f64) -> String {
    if v == 0.0 { "0".to_string() } else { v.to_string() }
}
