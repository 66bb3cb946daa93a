use serde::{Deserialize, Serialize};

/// An 8-bit RGBA sample
///
/// Layout matches an `Rgba8Unorm` texel so a pixel buffer can be handed to a
/// texture upload as raw bytes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const RED: Self = Self::new(255, 0, 0, 255);
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from RGB channels
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// RGB channels only
    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Identifier of an object the host can hit with a ray or pointer
///
/// Used both for UI regions (canvas projection) and scene colliders (mesh
/// projection). The host assigns them; the painting crate only compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Rgba8>(), 4);
        let pixels = [Rgba8::new(1, 2, 3, 4), Rgba8::new(5, 6, 7, 8)];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_array_conversion() {
        let color = Rgba8::from([10, 20, 30, 40]);
        assert_eq!(color, Rgba8::new(10, 20, 30, 40));
        assert_eq!(<[u8; 4]>::from(color), [10, 20, 30, 40]);
        assert_eq!(color.rgb(), [10, 20, 30]);
    }
}
