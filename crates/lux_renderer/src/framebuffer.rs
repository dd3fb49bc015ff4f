//! Pixel accumulation and image output.
//!
//! The frame buffer stores linear radiance per pixel. Output applies a
//! power-law gamma, clamps each channel to [0, 255] after scaling by 255 and
//! truncates toward zero, so 0.5 becomes 127 and anything above 1.0 becomes
//! 255.

use crate::Color;
use image::{ImageFormat, Rgb, RgbImage};
use lux_math::Interval;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0} (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Standard display gamma exponent.
pub const DEFAULT_GAMMA: f32 = 1.0 / 2.2;

/// Quantize a linear channel value to 8 bits.
#[inline]
pub fn quantize(channel: f32) -> u8 {
    (Interval::UNIT.clamp(channel) * 255.0) as u8
}

/// Width x height grid of accumulated colors, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Create a frame buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, i: u32, j: u32) -> usize {
        debug_assert!(i < self.width && j < self.height);
        j as usize * self.width as usize + i as usize
    }

    /// Get the pixel at column `i`, row `j`.
    pub fn get(&self, i: u32, j: u32) -> Color {
        self.pixels[self.index(i, j)]
    }

    /// Set the pixel at column `i`, row `j`.
    pub fn set(&mut self, i: u32, j: u32, color: Color) {
        let idx = self.index(i, j);
        self.pixels[idx] = color;
    }

    /// Add `delta` to the pixel at column `i`, row `j`.
    pub fn accumulate(&mut self, i: u32, j: u32, delta: Color) {
        let idx = self.index(i, j);
        self.pixels[idx] += delta;
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable pixels, row-major. Rows are `width` elements long.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Multiply every pixel by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for pixel in &mut self.pixels {
            *pixel *= factor;
        }
    }

    /// Apply `c^exponent` per channel. Negative channels become 0.
    ///
    /// An exponent of 1.0 leaves the buffer unchanged.
    pub fn gamma_correct(&mut self, exponent: f32) {
        if exponent == 1.0 {
            return;
        }
        for pixel in &mut self.pixels {
            *pixel = pixel.max(Color::ZERO).powf(exponent);
        }
    }

    /// Serialize as a plain-text P3 PPM.
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + self.pixels.len() * 12);
        self.write_ppm(&mut bytes).expect("writing to Vec<u8> cannot fail");
        bytes
    }

    /// Write a plain-text P3 PPM: header, then one `r g b` line per pixel,
    /// top row first.
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for color in &self.pixels {
            writeln!(
                writer,
                "{} {} {}",
                quantize(color.x),
                quantize(color.y),
                quantize(color.z)
            )?;
        }

        Ok(())
    }

    /// Convert to an 8-bit RGB image with the same quantization as PPM.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.get(x, y);
            Rgb([quantize(color.x), quantize(color.y), quantize(color.z)])
        })
    }

    /// Save to `path`, choosing the format from its extension.
    pub fn save(&self, path: &Path) -> OutputResult<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "ppm" => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_ppm(&mut writer)?;
                writer.flush()?;
            }
            "png" => {
                self.to_rgb_image().save_with_format(path, ImageFormat::Png)?;
            }
            _ => return Err(OutputError::UnsupportedFormat(path.display().to_string())),
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
