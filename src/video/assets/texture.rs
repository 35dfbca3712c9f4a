//! Immutable 2D texture. Pixels are always RGBA8, sampled with repeat wrapping
//! and linear filtering.
use crate::math::prelude::Vector2;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// The parameters of a texture object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureParams {
    /// Should we generates a complete set of mipmaps for a texture object.
    pub mipmap: bool,
    /// Sets the dimensions of texture.
    pub dimensions: Vector2<u32>,
}

impl Default for TextureParams {
    fn default() -> Self {
        TextureParams {
            mipmap: true,
            dimensions: Vector2::new(0, 0),
        }
    }
}

impl TextureParams {
    /// Length in bytes of the base level with tightly packed rows.
    pub fn len(&self) -> usize {
        BYTES_PER_PIXEL * self.dimensions.x as usize * self.dimensions.y as usize
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn len() {
        let params = TextureParams {
            dimensions: Vector2::new(3, 2),
            ..TextureParams::default()
        };

        assert_eq!(params.len(), 24);
        assert!(params.mipmap);
    }
}
