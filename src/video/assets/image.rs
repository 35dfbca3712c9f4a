//! Decoded pixels and the decoder seam.
//!
//! Decoders hand rows out top-to-bottom, while OpenGL reads the first row of an
//! upload as the bottom of the texture. `invert_rows` reorders them in place.

use std::path::{Path, PathBuf};


use crate::errors::*;

/// Tightly sized RGBA8 pixels. Row `i` occupies `bytes[i * pitch..(i + 1) * pitch]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pitch: usize,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps RGBA8 pixels with rows of exactly `4 * width` bytes.
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        PixelBuffer::with_pitch(width, height, 4 * width as usize, bytes)
    }

    /// Wraps RGBA8 pixels whose rows are `pitch` bytes apart.
    pub fn with_pitch(width: u32, height: u32, pitch: usize, bytes: Vec<u8>) -> Result<Self> {
        validate(bytes.len(), pitch, height as usize)?;
        if pitch < 4 * width as usize {
            return Err(Error::PixelBufferSize {
                len: bytes.len(),
                pitch,
                height: height as usize,
            }
            .into());
        }

        Ok(PixelBuffer {
            width,
            height,
            pitch,
            bytes,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the bytes of row `i`, counting from the first stored row.
    pub fn row(&self, i: usize) -> &[u8] {
        &self.bytes[i * self.pitch..(i + 1) * self.pitch]
    }

    /// Reverses the order of rows in place.
    pub fn invert_rows(&mut self) -> Result<()> {
        invert_rows(self.pitch, self.height as usize, &mut self.bytes)
    }

    /// Copies the pixels into a tightly packed buffer, dropping any row padding.
    pub fn into_packed(self) -> Vec<u8> {
        let row = 4 * self.width as usize;
        if row == self.pitch {
            return self.bytes;
        }

        let mut packed = Vec::with_capacity(row * self.height as usize);
        for chunk in self.bytes.chunks(self.pitch) {
            packed.extend_from_slice(&chunk[..row]);
        }

        packed
    }
}

/// Swaps row `i` with row `height - 1 - i` for the top half of the buffer,
/// through a single scratch row of `pitch` bytes. An odd middle row stays put.
///
/// Fails with `Error::PixelBufferSize` if `bytes` does not hold exactly `height`
/// rows, and with `Error::RowScratchAllocation` if the scratch row can not be
/// allocated. The buffer is untouched on failure.
pub fn invert_rows(pitch: usize, height: usize, bytes: &mut [u8]) -> Result<()> {
    validate(bytes.len(), pitch, height)?;

    let mut scratch = Vec::new();
    scratch
        .try_reserve_exact(pitch)
        .map_err(|_| Error::RowScratchAllocation(pitch))?;
    scratch.resize(pitch, 0);

    for i in 0..height / 2 {
        let j = height - 1 - i;
        let (head, tail) = bytes.split_at_mut(j * pitch);
        let upper = &mut head[i * pitch..(i + 1) * pitch];
        let lower = &mut tail[..pitch];

        scratch.copy_from_slice(upper);
        upper.copy_from_slice(lower);
        lower.copy_from_slice(&scratch);
    }

    Ok(())
}

fn validate(len: usize, pitch: usize, height: usize) -> Result<()> {
    match pitch.checked_mul(height) {
        Some(v) if v == len => Ok(()),
        _ => Err(Error::PixelBufferSize { len, pitch, height }.into()),
    }
}

/// Anything that could be decoded into RGBA8 pixels.
pub trait ImageSource {
    fn decode(&self) -> Result<PixelBuffer>;
}

impl ImageSource for PixelBuffer {
    fn decode(&self) -> Result<PixelBuffer> {
        Ok(self.clone())
    }
}

/// An image file on disk, decoded with the `image` crate.
#[derive(Debug, Clone)]
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    pub fn new<T: AsRef<Path>>(path: T) -> Self {
        ImageFile {
            path: path.as_ref().to_owned(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for ImageFile {
    fn decode(&self) -> Result<PixelBuffer> {
        let img = ::image::open(&self.path).map_err(|err| Error::ImageDecode {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })?;

        let img = img.to_rgba();
        let (width, height) = img.dimensions();
        info!(
            "[ImageFile] decoded {} ({}x{}).",
            self.path.display(),
            width,
            height
        );

        PixelBuffer::new(width, height, img.into_raw())
    }
}
