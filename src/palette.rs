//! The fixed color scheme used by the proof scenes.

use crate::core::Rgba8;

pub const WHITE: Rgba8 = Rgba8::opaque(0xec, 0xec, 0xec);
pub const BLACK: Rgba8 = Rgba8::opaque(0x00, 0x00, 0x00);
pub const GRAY: Rgba8 = Rgba8::opaque(0x88, 0x88, 0x88);
pub const BLUE: Rgba8 = Rgba8::opaque(0x58, 0xc4, 0xdd);
pub const YELLOW: Rgba8 = Rgba8::opaque(0xff, 0xff, 0x00);
pub const RED: Rgba8 = Rgba8::opaque(0xfc, 0x62, 0x55);
pub const GREEN: Rgba8 = Rgba8::opaque(0x83, 0xc1, 0x67);
pub const TEAL: Rgba8 = Rgba8::opaque(0x5c, 0xd0, 0xb3);
pub const PURPLE: Rgba8 = Rgba8::opaque(0x9a, 0x72, 0xac);
pub const LIGHT_PINK: Rgba8 = Rgba8::opaque(0xdc, 0x75, 0xcd);

/// The near-black backdrop every scene clears to.
pub const BACKGROUND: Rgba8 = Rgba8::opaque(0x12, 0x14, 0x1c);

/// Straight-alpha fill derived from a stroke color, `opacity` in [0,1].
pub fn fill(color: Rgba8, opacity: f64) -> Rgba8 {
    let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    color.with_alpha(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_scales_alpha_only() {
        let c = fill(BLUE, 0.5);
        assert_eq!((c.r, c.g, c.b), (BLUE.r, BLUE.g, BLUE.b));
        assert_eq!(c.a, 128);
    }

    #[test]
    fn fill_clamps_opacity() {
        assert_eq!(fill(RED, 2.0).a, 255);
        assert_eq!(fill(RED, -1.0).a, 0);
    }
}
