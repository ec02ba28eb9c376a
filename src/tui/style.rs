//! Color constants for the TUI.

use ratatui::style::Color;

use crate::vehicle::VehicleType;

/// Occupancy line color.
pub const OCCUPANCY_COLOR: Color = Color::Cyan;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Free spot glyph color.
pub const FREE_FG: Color = Color::DarkGray;
/// Rejection counter color when non-zero.
pub const REJECTED_FG: Color = Color::Red;

/// Glyph and color for an occupied spot of each type.
pub fn spot_style(vehicle_type: VehicleType) -> (char, Color) {
    match vehicle_type {
        VehicleType::Motorcycle => ('M', Color::Yellow),
        VehicleType::Car => ('C', Color::Green),
        VehicleType::Truck => ('T', Color::Magenta),
    }
}

/// Gauge color for a lot occupancy ratio.
pub fn occupancy_color(ratio: f64) -> Color {
    if ratio >= 0.9 {
        Color::Red
    } else if ratio >= 0.6 {
        Color::Yellow
    } else {
        Color::Green
    }
}
