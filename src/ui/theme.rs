//! Theme colors for the history graph

use crate::ui::Color;

// Label fills, one per ref namespace
pub const LABEL_TAG: Color = Color::from_rgb8(0x00, 0x64, 0x00);    // #006400 - dark green
pub const LABEL_HEAD: Color = Color::from_rgb8(0x8b, 0x00, 0x00);   // #8b0000 - dark red
pub const LABEL_REMOTE: Color = Color::from_rgb8(0x00, 0x00, 0x8b); // #00008b - dark blue
pub const LABEL_OTHER: Color = Color::from_rgb8(0x64, 0x95, 0xed);  // #6495ed - cornflower blue

/// Optional outline around label blocks
pub const LABEL_OUTLINE: Color = Color::from_rgb8(0x00, 0x00, 0xff);

/// Text drawn on labels and captions
pub const TEXT: Color = Color::rgb(1.0, 1.0, 1.0);

// Commit markers
pub const COMMIT_DOT: Color = Color::rgb(0.0, 0.0, 0.0);
pub const BOUNDARY_DOT: Color = Color::rgb(1.0, 0.0, 0.0);

/// Single lane color used unless a palette is enabled
pub const LANE: Color = Color::rgb(0.0, 0.0, 0.0);

/// Canvas fill for raster output
pub const BACKGROUND: Color = Color::from_rgb8(0x2d, 0x2d, 0x2d);

/// Lane colors for visual distinction in the commit graph
pub const LANE_COLORS: &[Color] = &[
    Color::rgba(0.231, 0.510, 0.965, 1.0), // Blue - primary branch
    Color::rgba(0.133, 0.773, 0.369, 1.0), // Green - feature branches
    Color::rgba(0.961, 0.620, 0.043, 1.0), // Amber - release branches
    Color::rgba(0.659, 0.333, 0.969, 1.0), // Purple - hotfix branches
    Color::rgba(0.392, 0.455, 0.545, 1.0), // Slate - remote tracking
    Color::rgba(0.4, 0.9, 0.9, 1.0),       // Cyan
    Color::rgba(1.0, 0.5, 0.5, 1.0),       // Red
    Color::rgba(0.7, 0.7, 0.9, 1.0),       // Lavender
];
