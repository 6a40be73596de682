use crate::options::{IndexType, Options};
use crate::value::{present, Record};
use eframe::egui::Color32;

/// Label color on light fills.
pub const DARK_TEXT: &str = "#333";
/// Label color on dark fills.
pub const LIGHT_TEXT: &str = "#fff";

/// Fill for a box: the color scale applied to the index attribute, or the
/// default color when the record is missing, the attribute is absent or
/// blank, or the scale has no color for the value.
pub fn fill_for(data: Option<&Record>, options: &Options) -> String {
    let Some(value) = present(data, &options.index) else {
        return options.default_color.clone();
    };
    let value = match options.index_type {
        IndexType::Numeric => value.scrub_numeric(),
        IndexType::String => value.clone(),
    };
    options
        .colors
        .color(&value)
        .unwrap_or_else(|| options.default_color.clone())
}

/// Expand `#abc` to `#aabbcc`; longer strings pass through.
fn expand_shorthand(color: &str) -> String {
    match color.strip_prefix('#') {
        Some(hex) if hex.len() == 3 => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in hex.chars() {
                out.push(c);
                out.push(c);
            }
            out
        }
        _ => color.to_string(),
    }
}

/// Label color for a fill. Reads the fill as one 24-bit number and picks
/// dark text above the midpoint. Fills that are not hex get light text.
pub fn overlay_color(fill: &str) -> &'static str {
    let expanded = expand_shorthand(fill.trim());
    let value = expanded
        .strip_prefix('#')
        .and_then(|hex| u32::from_str_radix(hex, 16).ok());
    match value {
        Some(v) if v as f64 > 0xffffff as f64 / 2.0 => DARK_TEXT,
        _ => LIGHT_TEXT,
    }
}

/// Parse `#rgb` / `#rrggbb` into a paintable color.
pub fn parse_hex(color: &str) -> Option<Color32> {
    let expanded = expand_shorthand(color.trim());
    let hex = expanded.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let v = u32::from_str_radix(hex, 16).ok()?;
    Some(Color32::from_rgb((v >> 16) as u8, (v >> 8) as u8, v as u8))
}
