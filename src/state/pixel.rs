//! Cached pixel-transfer state, one block per transfer direction.
//!
//! Fields the context cannot vary are *pinned*: they stay engaged at their
//! fixed value, never produce a driver call, and reject any non-default
//! request up front. Which fields are pinned is computed once from the
//! capability registry, so the apply path itself never consults it.

use crate::capabilities::{Api, Capabilities, Extension, Version};
use crate::driver::GlDriver;
use crate::pixel_storage::{CompressedPixelStorage, Direction, PixelStorage};
use crate::state::{Cached, PixelStorageField, StateError};
use gl::types::GLenum;

#[derive(Clone, Copy, Debug)]
struct FieldPins {
  row_length: bool,
  image_height: bool,
  skip_xy: bool,
  skip_z: bool,
  compressed: bool,
}

impl FieldPins {
  fn for_context(direction: Direction, caps: &Capabilities) -> Self {
    let es = caps.api() == Api::Gles;
    let es2 = es && !caps.is_version_supported(Version::new(3, 0));

    // On ES2 row length and 2D skips exist only through the subimage
    // extensions, a different one per direction.
    let subimage = match direction {
      Direction::Unpack => caps.is_extension_supported(Extension::ExtUnpackSubimage),
      Direction::Pack => caps.is_extension_supported(Extension::NvPackSubimage),
    };

    FieldPins {
      row_length: es2 && !subimage,
      // ES has no pack image height or pack image skip in any version.
      image_height: es2 || (es && direction == Direction::Pack),
      skip_xy: es2 && !subimage,
      skip_z: es2 || (es && direction == Direction::Pack),
      compressed: es || !caps.is_extension_supported(Extension::ArbCompressedTexturePixelStorage),
    }
  }
}

#[derive(Clone, Copy, Debug)]
struct Pnames {
  alignment: GLenum,
  row_length: GLenum,
  image_height: GLenum,
  skip: [GLenum; 3],
  compressed_block: [GLenum; 3],
  compressed_block_data_size: GLenum,
}

const UNPACK_PNAMES: Pnames = Pnames {
  alignment: gl::UNPACK_ALIGNMENT,
  row_length: gl::UNPACK_ROW_LENGTH,
  image_height: gl::UNPACK_IMAGE_HEIGHT,
  skip: [
    gl::UNPACK_SKIP_PIXELS,
    gl::UNPACK_SKIP_ROWS,
    gl::UNPACK_SKIP_IMAGES,
  ],
  compressed_block: [
    gl::UNPACK_COMPRESSED_BLOCK_WIDTH,
    gl::UNPACK_COMPRESSED_BLOCK_HEIGHT,
    gl::UNPACK_COMPRESSED_BLOCK_DEPTH,
  ],
  compressed_block_data_size: gl::UNPACK_COMPRESSED_BLOCK_SIZE,
};

const PACK_PNAMES: Pnames = Pnames {
  alignment: gl::PACK_ALIGNMENT,
  row_length: gl::PACK_ROW_LENGTH,
  image_height: gl::PACK_IMAGE_HEIGHT,
  skip: [
    gl::PACK_SKIP_PIXELS,
    gl::PACK_SKIP_ROWS,
    gl::PACK_SKIP_IMAGES,
  ],
  compressed_block: [
    gl::PACK_COMPRESSED_BLOCK_WIDTH,
    gl::PACK_COMPRESSED_BLOCK_HEIGHT,
    gl::PACK_COMPRESSED_BLOCK_DEPTH,
  ],
  compressed_block_data_size: gl::PACK_COMPRESSED_BLOCK_SIZE,
};

/// Cached pixel-transfer state of one direction.
#[derive(Debug)]
pub(crate) struct PixelStorageState {
  direction: Direction,
  es: bool,
  pins: FieldPins,
  alignment: Cached<i32>,
  row_length: Cached<i32>,
  image_height: Cached<i32>,
  skip: [Cached<i32>; 3],
  compressed_block: [Cached<i32>; 3],
  compressed_block_data_size: Cached<i32>,
}

impl PixelStorageState {
  pub(crate) fn new(direction: Direction, caps: &Capabilities) -> Self {
    let pins = FieldPins::for_context(direction, caps);

    let mut state = PixelStorageState {
      direction,
      es: caps.api() == Api::Gles,
      pins,
      alignment: Cached::empty(),
      row_length: Cached::empty(),
      image_height: Cached::empty(),
      skip: [Cached::empty(), Cached::empty(), Cached::empty()],
      compressed_block: [Cached::empty(), Cached::empty(), Cached::empty()],
      compressed_block_data_size: Cached::empty(),
    };

    state.engage_pins();
    state
  }

  fn pnames(&self) -> &'static Pnames {
    match self.direction {
      Direction::Unpack => &UNPACK_PNAMES,
      Direction::Pack => &PACK_PNAMES,
    }
  }

  fn engage_pins(&mut self) {
    if self.pins.row_length {
      self.row_length = Cached::engaged(0);
    }

    if self.pins.image_height {
      self.image_height = Cached::engaged(0);
    }

    if self.pins.skip_xy {
      self.skip[0] = Cached::engaged(0);
      self.skip[1] = Cached::engaged(0);
    }

    if self.pins.skip_z {
      self.skip[2] = Cached::engaged(0);
    }

    if self.pins.compressed {
      self.compressed_block = [Cached::engaged(0), Cached::engaged(0), Cached::engaged(0)];
      self.compressed_block_data_size = Cached::engaged(0);
    }
  }

  fn violation(&self, field: PixelStorageField, value: i32) -> StateError {
    log::error!(
      "{:?} pixel storage {} cannot be set to {} on this context",
      self.direction,
      field,
      value
    );

    StateError::UnsupportedPixelStorage {
      direction: self.direction,
      field,
      value,
    }
  }

  fn check_pins(&self, storage: &PixelStorage) -> Result<(), StateError> {
    if self.pins.row_length && storage.row_length() != 0 {
      return Err(self.violation(PixelStorageField::RowLength, storage.row_length()));
    }

    if self.pins.image_height && storage.image_height() != 0 {
      return Err(self.violation(PixelStorageField::ImageHeight, storage.image_height()));
    }

    let skip = storage.skip();

    if self.pins.skip_xy && skip[0] != 0 {
      return Err(self.violation(PixelStorageField::SkipX, skip[0]));
    }

    if self.pins.skip_xy && skip[1] != 0 {
      return Err(self.violation(PixelStorageField::SkipY, skip[1]));
    }

    if self.pins.skip_z && skip[2] != 0 {
      return Err(self.violation(PixelStorageField::SkipZ, skip[2]));
    }

    Ok(())
  }

  /// Diff `storage` against the cache and issue one call per divergence.
  ///
  /// On error no call has been issued and nothing has been cached.
  pub(crate) fn apply<D>(&mut self, driver: &mut D, storage: &PixelStorage) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    self.check_pins(storage)?;

    let pnames = *self.pnames();

    if self.alignment.is_invalid(&storage.alignment()) {
      driver.pixel_store_i(pnames.alignment, storage.alignment());
      self.alignment.set(storage.alignment());
    }

    if self.row_length.is_invalid(&storage.row_length()) {
      driver.pixel_store_i(pnames.row_length, storage.row_length());
      self.row_length.set(storage.row_length());
    }

    if self.image_height.is_invalid(&storage.image_height()) {
      driver.pixel_store_i(pnames.image_height, storage.image_height());
      self.image_height.set(storage.image_height());
    }

    let skip = storage.skip();

    for i in 0..3 {
      if self.skip[i].is_invalid(&skip[i]) {
        driver.pixel_store_i(pnames.skip[i], skip[i]);
        self.skip[i].set(skip[i]);
      }
    }

    Ok(())
  }

  /// Like [`Self::apply`], additionally forwarding compressed block geometry
  /// where the context supports it.
  ///
  /// The block setup is skipped entirely when the request carries default
  /// base storage *and* every cached block field is known to hold zero; a
  /// previously forwarded block geometry therefore keeps the path live until
  /// the fields are reset, regardless of what `block_size` says.
  pub(crate) fn apply_compressed<D>(
    &mut self,
    driver: &mut D,
    storage: &CompressedPixelStorage,
    block_size: [i32; 3],
    block_data_size: i32,
  ) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    let base = storage.base();

    if self.es {
      // ES has no compressed pixel storage at all. Defaults pass through
      // (some drivers leave stale base state otherwise), anything else is
      // out of reach.
      if *base != PixelStorage::default() {
        log::error!(
          "non-default compressed {:?} pixel storage is not supported on this context",
          self.direction
        );

        return Err(StateError::UnsupportedCompressedPixelStorage {
          direction: self.direction,
        });
      }

      return self.apply(driver, base);
    }

    assert!(
      block_size != [0; 3] && block_data_size != 0,
      "compressed transfer with zero block properties"
    );

    let defaults =
      base.row_length() == 0 && base.image_height() == 0 && base.skip() == [0; 3];
    let cached_zero = self.compressed_block.iter().all(|c| c.holds(&0))
      && self.compressed_block_data_size.holds(&0);
    let skip_block_setup = defaults && cached_zero;

    if self.pins.compressed && !skip_block_setup {
      log::error!(
        "non-default compressed {:?} pixel storage is not supported on this context",
        self.direction
      );

      return Err(StateError::UnsupportedCompressedPixelStorage {
        direction: self.direction,
      });
    }

    self.apply(driver, base)?;

    if !skip_block_setup {
      let pnames = *self.pnames();

      for i in 0..3 {
        if self.compressed_block[i].is_invalid(&block_size[i]) {
          driver.pixel_store_i(pnames.compressed_block[i], block_size[i]);
          self.compressed_block[i].set(block_size[i]);
        }
      }

      if self.compressed_block_data_size.is_invalid(&block_data_size) {
        driver.pixel_store_i(pnames.compressed_block_data_size, block_data_size);
        self.compressed_block_data_size.set(block_data_size);
      }
    }

    Ok(())
  }

  /// Disengage everything; pinned fields re-engage at their fixed value.
  pub(crate) fn invalidate(&mut self) {
    self.alignment.invalidate();
    self.row_length.invalidate();
    self.image_height.invalidate();

    for cell in &mut self.skip {
      cell.invalidate();
    }

    for cell in &mut self.compressed_block {
      cell.invalidate();
    }

    self.compressed_block_data_size.invalidate();

    self.engage_pins();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::driver::mock::{Call, RecordingDriver};

  fn desktop_caps() -> Capabilities {
    Capabilities::builder(Api::Gl, Version::new(4, 3))
      .extension(Extension::ArbCompressedTexturePixelStorage)
      .build()
  }

  fn block(direction: Direction, caps: &Capabilities) -> PixelStorageState {
    PixelStorageState::new(direction, caps)
  }

  #[test]
  fn fresh_apply_issues_one_call_per_field_then_none() {
    let caps = desktop_caps();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    state.apply(&mut driver, &PixelStorage::default()).unwrap();

    assert_eq!(
      driver.calls,
      vec![
        Call::PixelStoreI(gl::UNPACK_ALIGNMENT, 4),
        Call::PixelStoreI(gl::UNPACK_ROW_LENGTH, 0),
        Call::PixelStoreI(gl::UNPACK_IMAGE_HEIGHT, 0),
        Call::PixelStoreI(gl::UNPACK_SKIP_PIXELS, 0),
        Call::PixelStoreI(gl::UNPACK_SKIP_ROWS, 0),
        Call::PixelStoreI(gl::UNPACK_SKIP_IMAGES, 0),
      ]
    );

    driver.calls.clear();
    state.apply(&mut driver, &PixelStorage::default()).unwrap();
    assert!(driver.calls.is_empty());
  }

  #[test]
  fn changed_field_issues_exactly_one_call() {
    let caps = desktop_caps();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    state.apply(&mut driver, &PixelStorage::default()).unwrap();
    driver.calls.clear();

    let storage = PixelStorage::default().set_row_length(64);
    state.apply(&mut driver, &storage).unwrap();

    assert_eq!(driver.calls, vec![Call::PixelStoreI(gl::UNPACK_ROW_LENGTH, 64)]);
  }

  #[test]
  fn pack_direction_uses_pack_parameters() {
    let caps = desktop_caps();
    let mut state = block(Direction::Pack, &caps);
    let mut driver = RecordingDriver::new();

    let storage = PixelStorage::default().set_alignment(1);
    state.apply(&mut driver, &storage).unwrap();

    assert_eq!(driver.calls[0], Call::PixelStoreI(gl::PACK_ALIGNMENT, 1));
    assert!(driver
      .calls
      .contains(&Call::PixelStoreI(gl::PACK_ROW_LENGTH, 0)));
  }

  #[test]
  fn es_pack_pins_image_height_and_image_skip() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0)).build();
    let mut state = block(Direction::Pack, &caps);
    let mut driver = RecordingDriver::new();

    // ES has no pack image height or pack image skip in any version; the
    // remaining four fields go out as usual.
    state.apply(&mut driver, &PixelStorage::default()).unwrap();
    assert_eq!(
      driver.calls,
      vec![
        Call::PixelStoreI(gl::PACK_ALIGNMENT, 4),
        Call::PixelStoreI(gl::PACK_ROW_LENGTH, 0),
        Call::PixelStoreI(gl::PACK_SKIP_PIXELS, 0),
        Call::PixelStoreI(gl::PACK_SKIP_ROWS, 0),
      ]
    );

    driver.calls.clear();
    let err = state
      .apply(&mut driver, &PixelStorage::default().set_image_height(2))
      .unwrap_err();
    assert!(matches!(
      err,
      StateError::UnsupportedPixelStorage {
        field: PixelStorageField::ImageHeight,
        value: 2,
        ..
      }
    ));
    assert!(driver.calls.is_empty());

    let err = state
      .apply(&mut driver, &PixelStorage::default().set_skip([0, 0, 1]))
      .unwrap_err();
    assert!(matches!(
      err,
      StateError::UnsupportedPixelStorage {
        field: PixelStorageField::SkipZ,
        value: 1,
        ..
      }
    ));
    assert!(driver.calls.is_empty());
  }

  #[test]
  fn es2_pins_reject_non_default_requests_without_calls() {
    let caps = Capabilities::builder(Api::Gles, Version::new(2, 0)).build();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    // Pinned fields already hold their fixed value; only alignment goes out.
    state.apply(&mut driver, &PixelStorage::default()).unwrap();
    assert_eq!(driver.calls, vec![Call::PixelStoreI(gl::UNPACK_ALIGNMENT, 4)]);

    driver.calls.clear();
    let storage = PixelStorage::default().set_row_length(64);
    let err = state.apply(&mut driver, &storage).unwrap_err();

    assert!(matches!(
      err,
      StateError::UnsupportedPixelStorage {
        field: PixelStorageField::RowLength,
        value: 64,
        ..
      }
    ));
    assert!(driver.calls.is_empty());
  }

  #[test]
  fn es2_subimage_extension_unpins_row_length_and_2d_skips() {
    let caps = Capabilities::builder(Api::Gles, Version::new(2, 0))
      .extension(Extension::ExtUnpackSubimage)
      .build();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    let storage = PixelStorage::default().set_row_length(64).set_skip([8, 2, 0]);
    state.apply(&mut driver, &storage).unwrap();

    assert!(driver
      .calls
      .contains(&Call::PixelStoreI(gl::UNPACK_ROW_LENGTH, 64)));
    assert!(driver
      .calls
      .contains(&Call::PixelStoreI(gl::UNPACK_SKIP_PIXELS, 8)));
  }

  #[test]
  fn compressed_block_setup_skipped_while_cache_is_all_zero() {
    let caps = desktop_caps();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    // Cache starts disengaged, not zero, so the first default request still
    // forwards the block geometry.
    state
      .apply_compressed(&mut driver, &CompressedPixelStorage::default(), [4, 4, 1], 16)
      .unwrap();
    assert!(driver
      .calls
      .contains(&Call::PixelStoreI(gl::UNPACK_COMPRESSED_BLOCK_WIDTH, 4)));

    // Block geometry is cached like any other field afterwards.
    driver.calls.clear();
    state
      .apply_compressed(
        &mut driver,
        &CompressedPixelStorage::from(PixelStorage::default().set_row_length(8)),
        [4, 4, 1],
        16,
      )
      .unwrap();
    assert_eq!(driver.calls, vec![Call::PixelStoreI(gl::UNPACK_ROW_LENGTH, 8)]);

    // Once the cache holds a non-zero geometry, a default request no longer
    // short-circuits; it re-diffs the block fields instead.
    driver.calls.clear();
    state
      .apply_compressed(&mut driver, &CompressedPixelStorage::default(), [4, 4, 1], 16)
      .unwrap();
    assert_eq!(driver.calls, vec![Call::PixelStoreI(gl::UNPACK_ROW_LENGTH, 0)]);
  }

  #[test]
  fn compressed_short_circuit_ignores_requested_block_size() {
    let caps = Capabilities::builder(Api::Gl, Version::new(4, 3)).build();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    // Without compressed pixel-storage support the block fields are pinned
    // at zero, so a default-base request short-circuits no matter which
    // block geometry the format carries.
    state
      .apply_compressed(&mut driver, &CompressedPixelStorage::default(), [8, 8, 1], 32)
      .unwrap();

    assert!(!driver
      .calls
      .iter()
      .any(|c| matches!(c, Call::PixelStoreI(p, _) if *p == gl::UNPACK_COMPRESSED_BLOCK_WIDTH)));

    // A non-default base on the same context is a capability violation.
    driver.calls.clear();
    let err = state
      .apply_compressed(
        &mut driver,
        &CompressedPixelStorage::from(PixelStorage::default().set_row_length(8)),
        [8, 8, 1],
        32,
      )
      .unwrap_err();

    assert!(matches!(
      err,
      StateError::UnsupportedCompressedPixelStorage { .. }
    ));
    assert!(driver.calls.is_empty());
  }

  #[test]
  #[should_panic(expected = "zero block properties")]
  fn desktop_zero_block_geometry_is_a_programming_error() {
    let caps = desktop_caps();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    let _ = state.apply_compressed(&mut driver, &CompressedPixelStorage::default(), [0; 3], 16);
  }

  #[test]
  fn es_compressed_default_reapplies_base_storage() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0)).build();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    state
      .apply_compressed(&mut driver, &CompressedPixelStorage::default(), [0; 3], 0)
      .unwrap();
    // Base fields go out, block geometry never does.
    assert!(driver
      .calls
      .contains(&Call::PixelStoreI(gl::UNPACK_ALIGNMENT, 4)));
    assert!(!driver
      .calls
      .iter()
      .any(|c| matches!(c, Call::PixelStoreI(p, _) if *p == gl::UNPACK_COMPRESSED_BLOCK_WIDTH)));

    let err = state
      .apply_compressed(
        &mut driver,
        &CompressedPixelStorage::from(PixelStorage::default().set_row_length(8)),
        [0; 3],
        0,
      )
      .unwrap_err();
    assert!(matches!(
      err,
      StateError::UnsupportedCompressedPixelStorage { .. }
    ));
  }

  #[test]
  fn invalidate_disengages_everything_but_keeps_pins() {
    let caps = Capabilities::builder(Api::Gles, Version::new(2, 0)).build();
    let mut state = block(Direction::Unpack, &caps);
    let mut driver = RecordingDriver::new();

    state.apply(&mut driver, &PixelStorage::default()).unwrap();
    driver.calls.clear();

    state.invalidate();
    state.apply(&mut driver, &PixelStorage::default()).unwrap();

    // Alignment is re-issued; pinned fields stay silent at their value.
    assert_eq!(driver.calls, vec![Call::PixelStoreI(gl::UNPACK_ALIGNMENT, 4)]);
  }
}
