use crate::errors::*;
use crate::math::prelude::Vector2;

use super::assets::prelude::*;
use super::VideoSystem;

/// A RGBA8 texture with linear filtering and a full mipmap chain.
#[derive(Debug, Clone, Copy)]
pub struct TextureResource {
    handle: TextureHandle,
    params: TextureParams,
}

impl TextureResource {
    /// Decodes `source`, flips its rows so the first uploaded row is the bottom of
    /// the image, and uploads it.
    pub fn load(video: &mut VideoSystem, source: &dyn ImageSource) -> Result<Self> {
        let mut pixels = source.decode()?;
        pixels.invert_rows()?;

        let params = TextureParams {
            dimensions: Vector2::new(pixels.width(), pixels.height()),
            ..TextureParams::default()
        };

        let bytes = pixels.into_packed();
        let handle = video.create_texture(params, &bytes)?;

        info!(
            "[TextureResource] uploaded {} ({}x{}).",
            handle, params.dimensions.x, params.dimensions.y
        );

        Ok(TextureResource { handle, params })
    }

    #[inline]
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    #[inline]
    pub fn params(&self) -> &TextureParams {
        &self.params
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.params.dimensions.x
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.params.dimensions.y
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::backends::headless::{Op, Trace};

    #[test]
    fn rows_are_flipped_before_upload() {
        let trace = Trace::new();
        let mut video = VideoSystem::headless(trace.clone());

        let top = [255u8, 0, 0, 255];
        let bottom = [0u8, 0, 255, 255];
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&top);
        bytes.extend_from_slice(&bottom);

        let pixels = PixelBuffer::new(1, 2, bytes).unwrap();
        let texture = TextureResource::load(&mut video, &pixels).unwrap();
        assert_eq!((texture.width(), texture.height()), (1, 2));

        let uploaded = trace
            .ops()
            .into_iter()
            .filter_map(|v| match v {
                Op::UploadTexture { bytes, params, .. } => Some((bytes, params)),
                _ => None,
            })
            .next()
            .unwrap();

        assert_eq!(&uploaded.0[..4], &bottom);
        assert_eq!(&uploaded.0[4..], &top);
        assert!(uploaded.1.mipmap);
    }
}
