//! RGB colours for generated entities.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pure yellow.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Creates a colour from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns this colour with each channel shifted by the given signed
    /// offsets, saturating at the channel bounds.
    #[must_use]
    pub fn shifted(self, dr: i16, dg: i16, db: i16) -> Self {
        let shift = |channel: u8, delta: i16| (i16::from(channel) + delta).clamp(0, 255) as u8;
        Self {
            r: shift(self.r, dr),
            g: shift(self.g, dg),
            b: shift(self.b, db),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_saturates() {
        let c = Color::rgb(250, 5, 100);
        assert_eq!(c.shifted(20, -20, 0), Color::rgb(255, 0, 100));
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Color::rgb(212, 123, 74).to_string(), "#D47B4A");
    }
}
