//! Provider icon handling
//!
//! OpenWeatherMap icon ids are two digits selecting the condition plus a
//! trailing `d`/`n` for day or night art. The image itself lives on the
//! provider's image host; the terminal shows a glyph stand-in next to the
//! derived URL.

const ICON_HOST: &str = "https://openweathermap.org/img/wn";

/// Image URL for an icon id, e.g. "01d" → ".../01d@2x.png"
pub fn icon_url(icon_id: &str) -> String {
    format!("{ICON_HOST}/{icon_id}@2x.png")
}

/// Terminal glyph stand-in for the provider's icon bitmap
pub fn icon_glyph(icon_id: &str) -> &'static str {
    let night = icon_id.ends_with('n');
    match icon_id.get(..2) {
        Some("01") => {
            if night {
                "\u{1f319}" // crescent moon
            } else {
                "\u{2600}\u{fe0f}" // sun
            }
        }
        Some("02") => "\u{26c5}",           // sun behind cloud
        Some("03") | Some("04") => "\u{2601}\u{fe0f}", // cloud
        Some("09") => "\u{1f327}\u{fe0f}",  // rain
        Some("10") => "\u{1f326}\u{fe0f}",  // sun behind rain
        Some("11") => "\u{26c8}\u{fe0f}",   // thunderstorm
        Some("13") => "\u{2744}\u{fe0f}",   // snowflake
        Some("50") => "\u{1f32b}\u{fe0f}",  // fog
        _ => "\u{2753}",                    // unknown id
    }
}
