//! Card accent colours.

use serde::{Deserialize, Serialize};

/// 24-bit RGB colour.
///
/// # Examples
///
/// ```
/// use herald_core::Colour;
///
/// let colour = Colour::from_rgb(214, 174, 50);
/// assert_eq!(colour.rgb(), (214, 174, 50));
/// assert_eq!(colour.value(), 0xD6AE32);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[display("#{:06X}", _0)]
#[serde(transparent)]
pub struct Colour(u32);

impl Colour {
    /// Build a colour from its red, green and blue channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Packed `0xRRGGBB` value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Red, green and blue channels.
    pub const fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}
