//! Cached driver state.
//!
//! [`ContextState`] owns everything this crate knows about one context: the
//! capability registry, the resolved entry points and one cached block per
//! state domain. All state-setting goes through it; raw driver calls made
//! behind its back desynchronize the cache until the corresponding
//! `invalidate_*` method is called.

pub mod binding;
pub mod pixel;
pub mod renderer;

use crate::blending::{BlendingEquations, BlendingFactors, ColorMask, Equation, Factor};
use crate::capabilities::{Api, Capabilities, Extension};
use crate::driver::GlDriver;
use crate::pixel_storage::{CompressedPixelStorage, Direction, PixelStorage};
use crate::resolver::{ExtensionUsage, ResolvedOps};
use binding::{Bind, BindingState};
use gl::types::{GLenum, GLuint};
use pixel::PixelStorageState;
use renderer::{PolygonMode, RendererState};
use std::error;
use std::fmt;
use std::marker::PhantomData;

/// The last value a piece of state is known to hold, if any.
///
/// `None` means disengaged: nothing is known since construction or the last
/// invalidation, so the next request must reach the driver no matter what it
/// asks for.
#[derive(Debug)]
pub(crate) struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  pub(crate) fn empty() -> Self {
    Cached(None)
  }

  pub(crate) fn engaged(value: T) -> Self {
    Cached(Some(value))
  }

  pub(crate) fn invalidate(&mut self) {
    self.0 = None;
  }

  pub(crate) fn set(&mut self, value: T) {
    self.0 = Some(value);
  }

  /// Whether a driver call is needed to make the state hold `new_value`.
  pub(crate) fn is_invalid(&self, new_value: &T) -> bool {
    match &self.0 {
      Some(t) => t != new_value,
      None => true,
    }
  }

  /// Whether the state is engaged and holds exactly `value`.
  pub(crate) fn holds(&self, value: &T) -> bool {
    self.0.as_ref() == Some(value)
  }

  pub(crate) fn get(&self) -> Option<&T> {
    self.0.as_ref()
  }
}

/// A pixel-storage field, for error reporting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelStorageField {
  Alignment,
  RowLength,
  ImageHeight,
  SkipX,
  SkipY,
  SkipZ,
}

impl fmt::Display for PixelStorageField {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match self {
      PixelStorageField::Alignment => "alignment",
      PixelStorageField::RowLength => "row length",
      PixelStorageField::ImageHeight => "image height",
      PixelStorageField::SkipX => "pixel skip",
      PixelStorageField::SkipY => "row skip",
      PixelStorageField::SkipZ => "image skip",
    };

    f.write_str(name)
  }
}

/// An error that might happen when cached state is applied.
///
/// A returned error guarantees that no driver call was issued and no cached
/// value was changed by the failing request.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateError {
  /// A pixel-storage field the context cannot vary was requested at a
  /// non-default value.
  UnsupportedPixelStorage {
    direction: Direction,
    field: PixelStorageField,
    value: i32,
  },
  /// Non-default compressed pixel storage requested on a context without
  /// compressed pixel-storage support.
  UnsupportedCompressedPixelStorage { direction: Direction },
  /// A per-draw-buffer operation on a non-zero index, on a context that only
  /// has the global form.
  IndexedUnavailable { operation: &'static str, index: u32 },
  /// The operation has no backing entry point on this context.
  Unsupported { operation: &'static str },
}

impl fmt::Display for StateError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      StateError::UnsupportedPixelStorage {
        direction,
        field,
        value,
      } => write!(
        f,
        "{:?} pixel storage {} cannot be set to {} on this context",
        direction, field, value
      ),

      StateError::UnsupportedCompressedPixelStorage { direction } => write!(
        f,
        "non-default compressed {:?} pixel storage is not supported on this context",
        direction
      ),

      StateError::IndexedUnavailable { operation, index } => write!(
        f,
        "{} on draw buffer {} requires per-draw-buffer support this context lacks",
        operation, index
      ),

      StateError::Unsupported { operation } => {
        write!(f, "{} has no backing entry point on this context", operation)
      }
    }
  }
}

impl error::Error for StateError {}

// Compatibility-profile only, hence absent from the core bindings.
const POINT_SPRITE: GLenum = 0x8861;

/// The graphics state of one context.
///
/// Strictly single-threaded, like the context it mirrors.
pub struct ContextState<D>
where
  D: GlDriver,
{
  _a: PhantomData<*const ()>,
  driver: D,
  caps: Capabilities,
  ops: ResolvedOps,
  usage: ExtensionUsage,
  unpack: PixelStorageState,
  pack: PixelStorageState,
  renderer: RendererState,
  binding: BindingState,
}

impl<D> ContextState<D>
where
  D: GlDriver,
{
  /// Take ownership of a context's driver and capability registry.
  ///
  /// Resolves every entry point up front and logs the extensions the context
  /// ends up relying on. The corresponding context must be current and stay
  /// current for the lifetime of the returned value.
  pub fn new(mut driver: D, caps: Capabilities) -> Self {
    let mut usage = ExtensionUsage::new();
    let ops = ResolvedOps::resolve(&caps, &mut usage);

    log::debug!(
      "entry points resolved; extensions in use: {:?}",
      usage.names()
    );

    // Compatibility profiles need point sprites enabled explicitly for
    // point rendering to honor gl_PointCoord; core profiles always do this
    // and error out on the enable. Unknown profile is treated as core.
    if caps.api() == Api::Gl && caps.core_profile() == Some(false) {
      driver.enable(POINT_SPRITE);
    }

    let unpack = PixelStorageState::new(Direction::Unpack, &caps);
    let pack = PixelStorageState::new(Direction::Pack, &caps);

    ContextState {
      _a: PhantomData,
      driver,
      caps,
      ops,
      usage,
      unpack,
      pack,
      renderer: RendererState::new(),
      binding: BindingState::new(),
    }
  }

  pub fn capabilities(&self) -> &Capabilities {
    &self.caps
  }

  /// The extensions the resolver selected for this context.
  pub fn used_extensions(&self) -> &ExtensionUsage {
    &self.usage
  }

  /// Whether compressed block geometry can be forwarded to the driver at all.
  pub fn supports_compressed_pixel_storage(&self) -> bool {
    self.caps.api() == Api::Gl
      && self
        .caps
        .is_extension_supported(Extension::ArbCompressedTexturePixelStorage)
  }

  // Pixel transfer

  /// Make the driver's pixel-transfer state match `storage`.
  pub fn apply_pixel_storage(
    &mut self,
    direction: Direction,
    storage: &PixelStorage,
  ) -> Result<(), StateError> {
    let driver = &mut self.driver;
    match direction {
      Direction::Unpack => self.unpack.apply(driver, storage),
      Direction::Pack => self.pack.apply(driver, storage),
    }
  }

  /// Make the driver's pixel-transfer state match `storage` for a compressed
  /// transfer with the given block geometry.
  ///
  /// `block_size` is the compressed block extent in pixels and
  /// `block_data_size` its size in bytes; both come from the texture format
  /// and must be non-zero on desktop contexts.
  pub fn apply_compressed_pixel_storage(
    &mut self,
    direction: Direction,
    storage: &CompressedPixelStorage,
    block_size: [i32; 3],
    block_data_size: i32,
  ) -> Result<(), StateError> {
    let driver = &mut self.driver;
    match direction {
      Direction::Unpack => self
        .unpack
        .apply_compressed(driver, storage, block_size, block_data_size),
      Direction::Pack => self
        .pack
        .apply_compressed(driver, storage, block_size, block_data_size),
    }
  }

  /// Forget everything known about pixel-transfer state, both directions.
  pub fn invalidate_pixel_storage(&mut self) {
    self.unpack.invalidate();
    self.pack.invalidate();
  }

  // Renderer

  /// Enable or disable blending on one draw buffer.
  pub fn set_blend_enabled(&mut self, index: u32, enabled: bool) -> Result<(), StateError> {
    self
      .renderer
      .set_blend_enabled(&mut self.driver, &self.ops, index, enabled)
  }

  /// Set the color write mask of one draw buffer.
  pub fn set_color_mask(&mut self, index: u32, mask: ColorMask) -> Result<(), StateError> {
    self
      .renderer
      .set_color_mask(&mut self.driver, &self.ops, index, mask)
  }

  /// Set uniform blending factors on one draw buffer.
  pub fn set_blend_func(&mut self, index: u32, src: Factor, dst: Factor) -> Result<(), StateError> {
    self.set_blend_func_separate(index, BlendingFactors::uniform(src, dst))
  }

  /// Set per-channel blending factors on one draw buffer.
  pub fn set_blend_func_separate(
    &mut self,
    index: u32,
    factors: BlendingFactors,
  ) -> Result<(), StateError> {
    self
      .renderer
      .set_blend_func(&mut self.driver, &self.ops, index, factors)
  }

  /// Set a uniform blending equation on one draw buffer.
  pub fn set_blend_equation(&mut self, index: u32, equation: Equation) -> Result<(), StateError> {
    self.set_blend_equation_separate(index, BlendingEquations::uniform(equation))
  }

  /// Set per-channel blending equations on one draw buffer.
  pub fn set_blend_equation_separate(
    &mut self,
    index: u32,
    equations: BlendingEquations,
  ) -> Result<(), StateError> {
    self
      .renderer
      .set_blend_equation(&mut self.driver, &self.ops, index, equations)
  }

  /// Set the rasterized line width, in pixels.
  pub fn set_line_width(&mut self, width: f32) {
    self.renderer.set_line_width(&mut self.driver, width)
  }

  /// The supported line width range, corrected for known driver lies.
  pub fn line_width_range(&mut self) -> [f32; 2] {
    self.ops.line_width_range.query(&mut self.driver)
  }

  /// Set how polygons are rasterized.
  pub fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<(), StateError> {
    self
      .renderer
      .set_polygon_mode(&mut self.driver, &self.ops, mode)
  }

  /// Set the number of vertices per tessellation patch.
  pub fn set_patch_vertex_count(&mut self, count: i32) -> Result<(), StateError> {
    self
      .renderer
      .set_patch_vertex_count(&mut self.driver, &self.ops, count)
  }

  /// Set the minimum fraction of samples shaded per fragment.
  pub fn set_min_sample_shading(&mut self, value: f32) -> Result<(), StateError> {
    self
      .renderer
      .set_min_sample_shading(&mut self.driver, &self.ops, value)
  }

  /// Set the depth clear value with full double precision.
  ///
  /// Only available on desktop contexts; use [`Self::clear_depth_f`]
  /// elsewhere.
  pub fn clear_depth(&mut self, depth: f64) -> Result<(), StateError> {
    if self.ops.clear_depth.call(&mut self.driver, depth) {
      Ok(())
    } else {
      Err(unsupported("double-precision depth clear value"))
    }
  }

  /// Set the depth clear value.
  pub fn clear_depth_f(&mut self, depth: f32) {
    self.ops.clear_depth_f.call(&mut self.driver, depth)
  }

  /// Set the depth range with full double precision.
  ///
  /// Only available on desktop contexts; use [`Self::depth_range_f`]
  /// elsewhere.
  pub fn depth_range(&mut self, near: f64, far: f64) -> Result<(), StateError> {
    if self.ops.depth_range.call(&mut self.driver, near, far) {
      Ok(())
    } else {
      Err(unsupported("double-precision depth range"))
    }
  }

  /// Set the depth range.
  pub fn depth_range_f(&mut self, near: f32, far: f32) {
    self.ops.depth_range_f.call(&mut self.driver, near, far)
  }

  /// Query the robustness reset status.
  ///
  /// Contexts without robustness support always report `GL_NO_ERROR`,
  /// without a driver round trip.
  pub fn graphics_reset_status(&mut self) -> GLenum {
    self.ops.reset_status.call(&mut self.driver)
  }

  /// Forget everything known about renderer state.
  pub fn invalidate_renderer(&mut self) {
    self.renderer.invalidate();
  }

  // Object bindings

  /// Bind a framebuffer for drawing.
  pub fn bind_draw_framebuffer(&mut self, handle: GLuint) {
    self.binding.bind_draw_framebuffer(&mut self.driver, handle)
  }

  /// Bind a framebuffer for reading.
  pub fn bind_read_framebuffer(&mut self, handle: GLuint) {
    self.binding.bind_read_framebuffer(&mut self.driver, handle)
  }

  /// Bind a vertex buffer.
  pub fn bind_array_buffer(&mut self, handle: GLuint, bind_mode: Bind) {
    self
      .binding
      .bind_array_buffer(&mut self.driver, handle, bind_mode)
  }

  /// Bind an index buffer.
  pub fn bind_element_array_buffer(&mut self, handle: GLuint, bind_mode: Bind) {
    self
      .binding
      .bind_element_array_buffer(&mut self.driver, handle, bind_mode)
  }

  /// Bind a uniform buffer to an indexed binding point.
  pub fn bind_uniform_buffer_at(&mut self, handle: GLuint, binding_point: u32) {
    self
      .binding
      .bind_uniform_buffer_at(&mut self.driver, handle, binding_point)
  }

  /// Bind a vertex array object.
  pub fn bind_vertex_array(&mut self, handle: GLuint) {
    self.binding.bind_vertex_array(&mut self.driver, handle)
  }

  /// Make a shader program current.
  pub fn use_program(&mut self, handle: GLuint) {
    self.binding.use_program(&mut self.driver, handle)
  }

  /// Select the active texture unit.
  pub fn set_texture_unit(&mut self, unit: u32) {
    self.binding.set_texture_unit(&mut self.driver, unit)
  }

  /// Bind a texture on the active texture unit.
  pub fn bind_texture(&mut self, target: GLenum, handle: GLuint) {
    self.binding.bind_texture(&mut self.driver, target, handle)
  }

  /// Scrub a buffer handle out of every binding cache before it is deleted.
  pub fn unbind_buffer(&mut self, handle: GLuint) {
    self.binding.unbind_buffer(&mut self.driver, handle)
  }

  /// Forget everything known about object bindings.
  pub fn invalidate_bindings(&mut self) {
    self.binding.invalidate();
  }

  /// Forget the cached framebuffer bindings only.
  pub fn invalidate_framebuffer_bindings(&mut self) {
    self.binding.invalidate_framebuffers();
  }

  /// Forget the cached buffer bindings only.
  pub fn invalidate_buffer_bindings(&mut self) {
    self.binding.invalidate_buffers();
  }

  /// Forget the cached vertex array binding only.
  pub fn invalidate_vertex_array_binding(&mut self) {
    self.binding.invalidate_vertex_array();
  }

  /// Forget the cached program binding only.
  pub fn invalidate_program_binding(&mut self) {
    self.binding.invalidate_program();
  }

  /// Forget the cached texture unit and per-unit texture bindings only.
  pub fn invalidate_texture_bindings(&mut self) {
    self.binding.invalidate_textures();
  }

  /// Forget everything known about the context.
  pub fn invalidate_all(&mut self) {
    self.invalidate_pixel_storage();
    self.invalidate_renderer();
    self.invalidate_bindings();
  }
}

pub(crate) fn unsupported(operation: &'static str) -> StateError {
  log::error!("{} has no backing entry point on this context", operation);
  StateError::Unsupported { operation }
}
