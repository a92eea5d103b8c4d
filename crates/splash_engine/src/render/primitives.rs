//! Backend-neutral drawing primitives

use serde::{Serialize, Deserialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    /// Pure cyan, the default transparency key
    pub const CYAN: Self = Self::rgb(0x00, 0xFF, 0xFF);

    /// Opaque color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Color from RGBA components
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// True when the RGB components match, ignoring alpha
    pub const fn same_rgb(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

/// Axis-aligned rectangle in pixel space
///
/// Position is signed so images can be drawn partially off screen; extent is
/// unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// True when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
