//! Display formatting for evaluation results

/// Formats a finite result for display
///
/// Integral values (ceiling equals floor) print without a fractional part;
/// everything else uses the shortest round-trip `f64` rendering. The decimal
/// point is replaced by `dot_glyph`.
#[must_use]
pub fn format_value(value: f64, dot_glyph: &str) -> String {
    let text = if value.ceil() == value.floor() {
        if value == 0.0 {
            // normalizes -0
            "0".to_string()
        } else {
            format!("{value:.0}")
        }
    } else {
        value.to_string()
    };

    if dot_glyph == "." {
        text
    } else {
        text.replace('.', dot_glyph)
    }
}
