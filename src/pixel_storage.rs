//! Requested pixel-transfer configuration.
//!
//! A [`PixelStorage`] value is what callers *ask for*; the cached counterpart
//! living inside the context decides which driver calls, if any, the request
//! turns into.

/// Transfer direction a pixel-storage configuration applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
  /// Client memory to driver (texture uploads).
  Unpack,
  /// Driver to client memory (readbacks).
  Pack,
}

/// Pixel-transfer base configuration.
///
/// The default value matches the driver's initial state: alignment 4,
/// everything else 0 ("tightly packed, no offset").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PixelStorage {
  alignment: i32,
  row_length: i32,
  image_height: i32,
  skip: [i32; 3],
}

impl PixelStorage {
  /// Row alignment in bytes, one of 1, 2, 4 or 8.
  pub fn set_alignment(mut self, alignment: i32) -> Self {
    self.alignment = alignment;
    self
  }

  /// Row length in pixels; 0 means rows are tightly packed.
  pub fn set_row_length(mut self, row_length: i32) -> Self {
    self.row_length = row_length;
    self
  }

  /// Image height in rows for 3D transfers; 0 means tightly packed.
  pub fn set_image_height(mut self, image_height: i32) -> Self {
    self.image_height = image_height;
    self
  }

  /// Pixels, rows and images to skip at the start of the transfer.
  pub fn set_skip(mut self, skip: [i32; 3]) -> Self {
    self.skip = skip;
    self
  }

  pub fn alignment(&self) -> i32 {
    self.alignment
  }

  pub fn row_length(&self) -> i32 {
    self.row_length
  }

  pub fn image_height(&self) -> i32 {
    self.image_height
  }

  pub fn skip(&self) -> [i32; 3] {
    self.skip
  }
}

impl Default for PixelStorage {
  fn default() -> Self {
    PixelStorage {
      alignment: 4,
      row_length: 0,
      image_height: 0,
      skip: [0; 3],
    }
  }
}

/// Pixel-transfer configuration for compressed data.
///
/// Carries the same base fields as [`PixelStorage`]; the compressed block
/// geometry is supplied per transfer, since it comes from the texture format
/// rather than from client memory layout.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CompressedPixelStorage {
  base: PixelStorage,
}

impl CompressedPixelStorage {
  pub fn base(&self) -> &PixelStorage {
    &self.base
  }
}

impl From<PixelStorage> for CompressedPixelStorage {
  fn from(base: PixelStorage) -> Self {
    CompressedPixelStorage { base }
  }
}
