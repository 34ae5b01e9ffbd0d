//! Text measurement and truncation for cells and headers.

use eframe::egui;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "..";

/// Horizontal padding reserved inside a cell (4.0 on each side).
pub const CELL_PADDING: f32 = 8.0;

/// Truncates text so it fits within `max_width` according to `measure`,
/// appending ".." when anything was cut.
///
/// # Arguments
/// * `text` - The text to potentially truncate
/// * `max_width` - Width available for the text, padding already removed
/// * `measure` - Width of a string in the target font
///
/// # Returns
/// * The text unchanged if it fits, a truncated prefix plus "..", or an
///   empty string if not even the ellipsis fits
pub fn truncate_to_width(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> String {
    if max_width <= 0.0 {
        return String::new();
    }
    if measure(text) <= max_width {
        return text.to_string();
    }

    let available = max_width - measure(ELLIPSIS);
    if available <= 0.0 {
        return String::new();
    }

    // Binary search on the character count
    let mut low = 0usize;
    let mut high = text.chars().count();
    while low < high {
        let mid = (low + high).div_ceil(2);
        let prefix: String = text.chars().take(mid).collect();
        if measure(&prefix) <= available {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    let mut result: String = text.chars().take(low).collect();
    result.push_str(ELLIPSIS);
    result
}

/// Truncates text to fit a cell of `available_width` in the given font.
pub fn truncate_text_to_fit(
    text: &str,
    available_width: f32,
    font_id: &egui::FontId,
    painter: &egui::Painter,
) -> String {
    truncate_to_width(text, available_width - CELL_PADDING, |s| {
        painter
            .layout_no_wrap(s.to_string(), font_id.clone(), egui::Color32::WHITE)
            .size()
            .x
    })
}
