//! Downstream driver entry points.
//!
//! The state cache never calls the GL API directly; it goes through
//! [`GlDriver`], a trait with one method per named low-level entry point.
//! The entry-point resolver binds each logical operation to one of these
//! methods at construction time and the cache invokes it unconditionally once
//! a divergence is detected. Return values are not inspected, except for the
//! few query entry points.
//!
//! Extension-suffixed entry points (`_ext`, `_nv`, `_arb`, `_oes`, `_angle`)
//! have default implementations delegating to their core-named equivalent, so
//! a driver for a context where the resolver never selects them does not have
//! to provide them. [`GlFns`], the implementation shipped with this crate,
//! loads a desktop core profile through the `gl` bindings and relies on
//! exactly that.

use gl::types::{GLenum, GLfloat, GLint, GLuint};

/// A set of low-level state-setting entry points.
///
/// All methods require the corresponding context to be current on the calling
/// thread; making it so is the caller's responsibility.
#[allow(clippy::too_many_arguments)]
pub trait GlDriver {
  // Pixel transfer
  fn pixel_store_i(&mut self, pname: GLenum, value: GLint);

  // Capabilities
  fn enable(&mut self, cap: GLenum);
  fn disable(&mut self, cap: GLenum);
  fn enable_i(&mut self, cap: GLenum, index: GLuint);
  fn disable_i(&mut self, cap: GLenum, index: GLuint);

  fn enable_i_ext(&mut self, cap: GLenum, index: GLuint) {
    self.enable_i(cap, index)
  }

  fn disable_i_ext(&mut self, cap: GLenum, index: GLuint) {
    self.disable_i(cap, index)
  }

  // Color mask
  fn color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool);
  fn color_mask_i(&mut self, buf: GLuint, red: bool, green: bool, blue: bool, alpha: bool);

  fn color_mask_i_ext(&mut self, buf: GLuint, red: bool, green: bool, blue: bool, alpha: bool) {
    self.color_mask_i(buf, red, green, blue, alpha)
  }

  // Blending
  fn blend_func(&mut self, src: GLenum, dst: GLenum);
  fn blend_func_i(&mut self, buf: GLuint, src: GLenum, dst: GLenum);

  fn blend_func_i_arb(&mut self, buf: GLuint, src: GLenum, dst: GLenum) {
    self.blend_func_i(buf, src, dst)
  }

  fn blend_func_i_ext(&mut self, buf: GLuint, src: GLenum, dst: GLenum) {
    self.blend_func_i(buf, src, dst)
  }

  fn blend_func_separate(
    &mut self,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  );
  fn blend_func_separate_i(
    &mut self,
    buf: GLuint,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  );

  fn blend_func_separate_i_arb(
    &mut self,
    buf: GLuint,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    self.blend_func_separate_i(buf, src_rgb, dst_rgb, src_alpha, dst_alpha)
  }

  fn blend_func_separate_i_ext(
    &mut self,
    buf: GLuint,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    self.blend_func_separate_i(buf, src_rgb, dst_rgb, src_alpha, dst_alpha)
  }

  fn blend_equation(&mut self, mode: GLenum);
  fn blend_equation_i(&mut self, buf: GLuint, mode: GLenum);

  fn blend_equation_i_arb(&mut self, buf: GLuint, mode: GLenum) {
    self.blend_equation_i(buf, mode)
  }

  fn blend_equation_i_ext(&mut self, buf: GLuint, mode: GLenum) {
    self.blend_equation_i(buf, mode)
  }

  fn blend_equation_separate(&mut self, rgb: GLenum, alpha: GLenum);
  fn blend_equation_separate_i(&mut self, buf: GLuint, rgb: GLenum, alpha: GLenum);

  fn blend_equation_separate_i_arb(&mut self, buf: GLuint, rgb: GLenum, alpha: GLenum) {
    self.blend_equation_separate_i(buf, rgb, alpha)
  }

  fn blend_equation_separate_i_ext(&mut self, buf: GLuint, rgb: GLenum, alpha: GLenum) {
    self.blend_equation_separate_i(buf, rgb, alpha)
  }

  // Depth
  fn clear_depth(&mut self, depth: f64);

  fn clear_depth_nv(&mut self, depth: f64) {
    self.clear_depth(depth)
  }

  fn clear_depth_f(&mut self, depth: f32);
  fn depth_range(&mut self, near: f64, far: f64);

  fn depth_range_nv(&mut self, near: f64, far: f64) {
    self.depth_range(near, far)
  }

  fn depth_range_f(&mut self, near: f32, far: f32);

  // Rasterization
  fn polygon_mode(&mut self, face: GLenum, mode: GLenum);

  fn polygon_mode_nv(&mut self, face: GLenum, mode: GLenum) {
    self.polygon_mode(face, mode)
  }

  fn polygon_mode_angle(&mut self, face: GLenum, mode: GLenum) {
    self.polygon_mode(face, mode)
  }

  fn line_width(&mut self, width: GLfloat);
  fn get_float_2(&mut self, pname: GLenum) -> [GLfloat; 2];

  // Tessellation and multisampling
  fn patch_parameter_i(&mut self, pname: GLenum, value: GLint);

  fn patch_parameter_i_ext(&mut self, pname: GLenum, value: GLint) {
    self.patch_parameter_i(pname, value)
  }

  fn min_sample_shading(&mut self, value: GLfloat);

  fn min_sample_shading_arb(&mut self, value: GLfloat) {
    self.min_sample_shading(value)
  }

  fn min_sample_shading_oes(&mut self, value: GLfloat) {
    self.min_sample_shading(value)
  }

  // Robustness
  fn graphics_reset_status(&mut self) -> GLenum;

  fn graphics_reset_status_arb(&mut self) -> GLenum {
    self.graphics_reset_status()
  }

  fn graphics_reset_status_ext(&mut self) -> GLenum {
    self.graphics_reset_status()
  }

  // Object bindings
  fn bind_buffer(&mut self, target: GLenum, handle: GLuint);
  fn bind_buffer_base(&mut self, target: GLenum, index: GLuint, handle: GLuint);
  fn bind_framebuffer(&mut self, target: GLenum, handle: GLuint);
  fn bind_vertex_array(&mut self, handle: GLuint);
  fn bind_texture(&mut self, target: GLenum, handle: GLuint);
  fn active_texture(&mut self, unit: GLenum);
  fn use_program(&mut self, handle: GLuint);
}

fn boolean(value: bool) -> u8 {
  if value {
    gl::TRUE
  } else {
    gl::FALSE
  }
}

/// Driver backed by the global `gl` bindings.
///
/// The bindings have to be loaded (`gl::load_with`) with a desktop core
/// profile context current before any method is called. Extension-suffixed
/// entry points keep their default core delegation; the resolver never
/// selects them for the contexts this driver targets.
#[derive(Debug)]
pub struct GlFns;

impl GlFns {
  pub fn new() -> Self {
    GlFns
  }
}

impl Default for GlFns {
  fn default() -> Self {
    Self::new()
  }
}

impl GlDriver for GlFns {
  fn pixel_store_i(&mut self, pname: GLenum, value: GLint) {
    unsafe { gl::PixelStorei(pname, value) }
  }

  fn enable(&mut self, cap: GLenum) {
    unsafe { gl::Enable(cap) }
  }

  fn disable(&mut self, cap: GLenum) {
    unsafe { gl::Disable(cap) }
  }

  fn enable_i(&mut self, cap: GLenum, index: GLuint) {
    unsafe { gl::Enablei(cap, index) }
  }

  fn disable_i(&mut self, cap: GLenum, index: GLuint) {
    unsafe { gl::Disablei(cap, index) }
  }

  fn color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool) {
    unsafe { gl::ColorMask(boolean(red), boolean(green), boolean(blue), boolean(alpha)) }
  }

  fn color_mask_i(&mut self, buf: GLuint, red: bool, green: bool, blue: bool, alpha: bool) {
    unsafe { gl::ColorMaski(buf, boolean(red), boolean(green), boolean(blue), boolean(alpha)) }
  }

  fn blend_func(&mut self, src: GLenum, dst: GLenum) {
    unsafe { gl::BlendFunc(src, dst) }
  }

  fn blend_func_i(&mut self, buf: GLuint, src: GLenum, dst: GLenum) {
    unsafe { gl::BlendFunci(buf, src, dst) }
  }

  fn blend_func_separate(
    &mut self,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    unsafe { gl::BlendFuncSeparate(src_rgb, dst_rgb, src_alpha, dst_alpha) }
  }

  fn blend_func_separate_i(
    &mut self,
    buf: GLuint,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    unsafe { gl::BlendFuncSeparatei(buf, src_rgb, dst_rgb, src_alpha, dst_alpha) }
  }

  fn blend_equation(&mut self, mode: GLenum) {
    unsafe { gl::BlendEquation(mode) }
  }

  fn blend_equation_i(&mut self, buf: GLuint, mode: GLenum) {
    unsafe { gl::BlendEquationi(buf, mode) }
  }

  fn blend_equation_separate(&mut self, rgb: GLenum, alpha: GLenum) {
    unsafe { gl::BlendEquationSeparate(rgb, alpha) }
  }

  fn blend_equation_separate_i(&mut self, buf: GLuint, rgb: GLenum, alpha: GLenum) {
    unsafe { gl::BlendEquationSeparatei(buf, rgb, alpha) }
  }

  fn clear_depth(&mut self, depth: f64) {
    unsafe { gl::ClearDepth(depth) }
  }

  fn clear_depth_f(&mut self, depth: f32) {
    unsafe { gl::ClearDepthf(depth) }
  }

  fn depth_range(&mut self, near: f64, far: f64) {
    unsafe { gl::DepthRange(near, far) }
  }

  fn depth_range_f(&mut self, near: f32, far: f32) {
    unsafe { gl::DepthRangef(near, far) }
  }

  fn polygon_mode(&mut self, face: GLenum, mode: GLenum) {
    unsafe { gl::PolygonMode(face, mode) }
  }

  fn line_width(&mut self, width: GLfloat) {
    unsafe { gl::LineWidth(width) }
  }

  fn get_float_2(&mut self, pname: GLenum) -> [GLfloat; 2] {
    let mut data = [0.; 2];
    unsafe { gl::GetFloatv(pname, data.as_mut_ptr()) };
    data
  }

  fn patch_parameter_i(&mut self, pname: GLenum, value: GLint) {
    unsafe { gl::PatchParameteri(pname, value) }
  }

  fn min_sample_shading(&mut self, value: GLfloat) {
    unsafe { gl::MinSampleShading(value) }
  }

  fn graphics_reset_status(&mut self) -> GLenum {
    unsafe { gl::GetGraphicsResetStatus() }
  }

  fn bind_buffer(&mut self, target: GLenum, handle: GLuint) {
    unsafe { gl::BindBuffer(target, handle) }
  }

  fn bind_buffer_base(&mut self, target: GLenum, index: GLuint, handle: GLuint) {
    unsafe { gl::BindBufferBase(target, index, handle) }
  }

  fn bind_framebuffer(&mut self, target: GLenum, handle: GLuint) {
    unsafe { gl::BindFramebuffer(target, handle) }
  }

  fn bind_vertex_array(&mut self, handle: GLuint) {
    unsafe { gl::BindVertexArray(handle) }
  }

  fn bind_texture(&mut self, target: GLenum, handle: GLuint) {
    unsafe { gl::BindTexture(target, handle) }
  }

  fn active_texture(&mut self, unit: GLenum) {
    unsafe { gl::ActiveTexture(unit) }
  }

  fn use_program(&mut self, handle: GLuint) {
    unsafe { gl::UseProgram(handle) }
  }
}
