//! Construction-time entry-point resolution.
//!
//! Every logical operation whose backing entry point differs across versions
//! and extensions gets a small strategy enum here. [`ResolvedOps::resolve`]
//! walks the candidates once per context, in priority order, and records the
//! winner; applying state later is a plain match with no capability queries
//! on the hot path.
//!
//! Candidate order follows two rules. A vendor extension that changes
//! *semantics* (NV depth in floating point) wins over the core entry point
//! even when the version would allow core. An extension that is merely an
//! older spelling of a core feature loses to a sufficient version, so
//! contexts that do not need the extension never report it as used.

use crate::capabilities::{Api, Capabilities, ContextFlags, DriverKind, Extension, Version};
use crate::driver::GlDriver;
use gl::types::{GLenum, GLuint};

/// Report of the extensions the resolver actually selected.
///
/// An extension being *supported* does not mean it is *used*; a context whose
/// version already covers an operation never relies on the equivalent
/// extension.
#[derive(Debug)]
pub struct ExtensionUsage {
  used: [bool; Extension::COUNT],
}

impl ExtensionUsage {
  pub(crate) fn new() -> Self {
    ExtensionUsage {
      used: [false; Extension::COUNT],
    }
  }

  pub(crate) fn mark(&mut self, extension: Extension) {
    self.used[extension.index()] = true;
  }

  /// Whether the resolver picked an entry point backed by this extension.
  pub fn is_used(&self, extension: Extension) -> bool {
    self.used[extension.index()]
  }

  /// Names of all used extensions, in a stable order.
  pub fn names(&self) -> Vec<&'static str> {
    Extension::ALL
      .iter()
      .filter(|e| self.used[e.index()])
      .map(|e| e.name())
      .collect()
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClearDepthFn {
  Nv,
  Core,
  Unavailable,
}

impl ClearDepthFn {
  pub(crate) fn call<D: GlDriver>(self, driver: &mut D, depth: f64) -> bool {
    match self {
      ClearDepthFn::Nv => driver.clear_depth_nv(depth),
      ClearDepthFn::Core => driver.clear_depth(depth),
      ClearDepthFn::Unavailable => return false,
    }

    true
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClearDepthfFn {
  NvViaDouble,
  Native,
  ViaDouble,
}

impl ClearDepthfFn {
  pub(crate) fn call<D: GlDriver>(self, driver: &mut D, depth: f32) {
    match self {
      ClearDepthfFn::NvViaDouble => driver.clear_depth_nv(depth as f64),
      ClearDepthfFn::Native => driver.clear_depth_f(depth),
      ClearDepthfFn::ViaDouble => driver.clear_depth(depth as f64),
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DepthRangeFn {
  Nv,
  Core,
  Unavailable,
}

impl DepthRangeFn {
  pub(crate) fn call<D: GlDriver>(self, driver: &mut D, near: f64, far: f64) -> bool {
    match self {
      DepthRangeFn::Nv => driver.depth_range_nv(near, far),
      DepthRangeFn::Core => driver.depth_range(near, far),
      DepthRangeFn::Unavailable => return false,
    }

    true
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DepthRangefFn {
  NvViaDouble,
  Native,
  ViaDouble,
}

impl DepthRangefFn {
  pub(crate) fn call<D: GlDriver>(self, driver: &mut D, near: f32, far: f32) {
    match self {
      DepthRangefFn::NvViaDouble => driver.depth_range_nv(near as f64, far as f64),
      DepthRangefFn::Native => driver.depth_range_f(near, far),
      DepthRangefFn::ViaDouble => driver.depth_range(near as f64, far as f64),
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ResetStatusFn {
  Arb,
  Ext,
  /// Robustness unavailable; report "no error" without touching the driver.
  Default,
}

impl ResetStatusFn {
  pub(crate) fn call<D: GlDriver>(self, driver: &mut D) -> GLenum {
    match self {
      ResetStatusFn::Arb => driver.graphics_reset_status_arb(),
      ResetStatusFn::Ext => driver.graphics_reset_status_ext(),
      ResetStatusFn::Default => gl::NO_ERROR,
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LineWidthRangeFn {
  Default,
  /// Mesa advertises the full range on forward-compatible contexts but
  /// errors out on any width above 1.
  MesaForwardCompatible,
}

impl LineWidthRangeFn {
  pub(crate) fn query<D: GlDriver>(self, driver: &mut D) -> [f32; 2] {
    let mut range = driver.get_float_2(gl::ALIASED_LINE_WIDTH_RANGE);

    if self == LineWidthRangeFn::MesaForwardCompatible && range[1] > 1.0 {
      range[1] = 1.0;
    }

    range
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MinSampleShadingFn {
  Core,
  Arb,
  Oes,
  Unavailable,
}

impl MinSampleShadingFn {
  pub(crate) fn call<D: GlDriver>(self, driver: &mut D, value: f32) -> bool {
    match self {
      MinSampleShadingFn::Core => driver.min_sample_shading(value),
      MinSampleShadingFn::Arb => driver.min_sample_shading_arb(value),
      MinSampleShadingFn::Oes => driver.min_sample_shading_oes(value),
      MinSampleShadingFn::Unavailable => return false,
    }

    true
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PatchParameterFn {
  Core,
  Ext,
  Unavailable,
}

impl PatchParameterFn {
  pub(crate) fn call<D: GlDriver>(self, driver: &mut D, vertex_count: i32) -> bool {
    match self {
      PatchParameterFn::Core => driver.patch_parameter_i(gl::PATCH_VERTICES, vertex_count),
      PatchParameterFn::Ext => driver.patch_parameter_i_ext(gl::PATCH_VERTICES, vertex_count),
      PatchParameterFn::Unavailable => return false,
    }

    true
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum IndexedToggleFn {
  Core,
  Ext,
  /// No per-draw-buffer control; index 0 falls back to the global toggle.
  Global,
}

impl IndexedToggleFn {
  pub(crate) fn is_global(self) -> bool {
    self == IndexedToggleFn::Global
  }

  pub(crate) fn call<D: GlDriver>(self, driver: &mut D, cap: GLenum, index: GLuint, enabled: bool) {
    match (self, enabled) {
      (IndexedToggleFn::Core, true) => driver.enable_i(cap, index),
      (IndexedToggleFn::Core, false) => driver.disable_i(cap, index),
      (IndexedToggleFn::Ext, true) => driver.enable_i_ext(cap, index),
      (IndexedToggleFn::Ext, false) => driver.disable_i_ext(cap, index),
      (IndexedToggleFn::Global, true) => driver.enable(cap),
      (IndexedToggleFn::Global, false) => driver.disable(cap),
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum IndexedColorMaskFn {
  Core,
  Ext,
  Global,
}

impl IndexedColorMaskFn {
  pub(crate) fn is_global(self) -> bool {
    self == IndexedColorMaskFn::Global
  }

  pub(crate) fn call<D: GlDriver>(
    self,
    driver: &mut D,
    buf: GLuint,
    red: bool,
    green: bool,
    blue: bool,
    alpha: bool,
  ) {
    match self {
      IndexedColorMaskFn::Core => driver.color_mask_i(buf, red, green, blue, alpha),
      IndexedColorMaskFn::Ext => driver.color_mask_i_ext(buf, red, green, blue, alpha),
      IndexedColorMaskFn::Global => driver.color_mask(red, green, blue, alpha),
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum IndexedBlendFuncFn {
  Core,
  Arb,
  Ext,
  Global,
}

impl IndexedBlendFuncFn {
  pub(crate) fn is_global(self) -> bool {
    self == IndexedBlendFuncFn::Global
  }

  pub(crate) fn func<D: GlDriver>(self, driver: &mut D, buf: GLuint, src: GLenum, dst: GLenum) {
    match self {
      IndexedBlendFuncFn::Core => driver.blend_func_i(buf, src, dst),
      IndexedBlendFuncFn::Arb => driver.blend_func_i_arb(buf, src, dst),
      IndexedBlendFuncFn::Ext => driver.blend_func_i_ext(buf, src, dst),
      IndexedBlendFuncFn::Global => driver.blend_func(src, dst),
    }
  }

  pub(crate) fn func_separate<D: GlDriver>(
    self,
    driver: &mut D,
    buf: GLuint,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    match self {
      IndexedBlendFuncFn::Core => {
        driver.blend_func_separate_i(buf, src_rgb, dst_rgb, src_alpha, dst_alpha)
      }
      IndexedBlendFuncFn::Arb => {
        driver.blend_func_separate_i_arb(buf, src_rgb, dst_rgb, src_alpha, dst_alpha)
      }
      IndexedBlendFuncFn::Ext => {
        driver.blend_func_separate_i_ext(buf, src_rgb, dst_rgb, src_alpha, dst_alpha)
      }
      IndexedBlendFuncFn::Global => {
        driver.blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha)
      }
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum IndexedBlendEquationFn {
  Core,
  Arb,
  Ext,
  Global,
}

impl IndexedBlendEquationFn {
  pub(crate) fn is_global(self) -> bool {
    self == IndexedBlendEquationFn::Global
  }

  pub(crate) fn equation<D: GlDriver>(self, driver: &mut D, buf: GLuint, mode: GLenum) {
    match self {
      IndexedBlendEquationFn::Core => driver.blend_equation_i(buf, mode),
      IndexedBlendEquationFn::Arb => driver.blend_equation_i_arb(buf, mode),
      IndexedBlendEquationFn::Ext => driver.blend_equation_i_ext(buf, mode),
      IndexedBlendEquationFn::Global => driver.blend_equation(mode),
    }
  }

  pub(crate) fn equation_separate<D: GlDriver>(
    self,
    driver: &mut D,
    buf: GLuint,
    rgb: GLenum,
    alpha: GLenum,
  ) {
    match self {
      IndexedBlendEquationFn::Core => driver.blend_equation_separate_i(buf, rgb, alpha),
      IndexedBlendEquationFn::Arb => driver.blend_equation_separate_i_arb(buf, rgb, alpha),
      IndexedBlendEquationFn::Ext => driver.blend_equation_separate_i_ext(buf, rgb, alpha),
      IndexedBlendEquationFn::Global => driver.blend_equation_separate(rgb, alpha),
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PolygonModeFn {
  Core,
  Nv,
  Angle,
  Unavailable,
}

impl PolygonModeFn {
  pub(crate) fn call<D: GlDriver>(self, driver: &mut D, mode: GLenum) -> bool {
    match self {
      PolygonModeFn::Core => driver.polygon_mode(gl::FRONT_AND_BACK, mode),
      PolygonModeFn::Nv => driver.polygon_mode_nv(gl::FRONT_AND_BACK, mode),
      PolygonModeFn::Angle => driver.polygon_mode_angle(gl::FRONT_AND_BACK, mode),
      PolygonModeFn::Unavailable => return false,
    }

    true
  }
}

/// The entry points selected for one context.
#[derive(Debug)]
pub(crate) struct ResolvedOps {
  pub(crate) clear_depth: ClearDepthFn,
  pub(crate) clear_depth_f: ClearDepthfFn,
  pub(crate) depth_range: DepthRangeFn,
  pub(crate) depth_range_f: DepthRangefFn,
  pub(crate) reset_status: ResetStatusFn,
  pub(crate) line_width_range: LineWidthRangeFn,
  pub(crate) min_sample_shading: MinSampleShadingFn,
  pub(crate) patch_parameter: PatchParameterFn,
  pub(crate) indexed_toggle: IndexedToggleFn,
  pub(crate) indexed_color_mask: IndexedColorMaskFn,
  pub(crate) indexed_blend_func: IndexedBlendFuncFn,
  pub(crate) indexed_blend_equation: IndexedBlendEquationFn,
  pub(crate) polygon_mode: PolygonModeFn,
}

impl ResolvedOps {
  pub(crate) fn resolve(caps: &Capabilities, usage: &mut ExtensionUsage) -> Self {
    let es = caps.api() == Api::Gles;

    // NV_depth_buffer_float changes depth semantics, so it wins over core
    // even though the core entry points always exist on desktop.
    let nv_depth = !es && caps.is_extension_supported(Extension::NvDepthBufferFloat);
    if nv_depth {
      usage.mark(Extension::NvDepthBufferFloat);
    }

    let clear_depth = if es {
      ClearDepthFn::Unavailable
    } else if nv_depth {
      ClearDepthFn::Nv
    } else {
      ClearDepthFn::Core
    };

    let clear_depth_f = if es {
      ClearDepthfFn::Native
    } else if nv_depth {
      ClearDepthfFn::NvViaDouble
    } else if caps.is_extension_supported(Extension::ArbEs2Compatibility) {
      usage.mark(Extension::ArbEs2Compatibility);
      ClearDepthfFn::Native
    } else {
      ClearDepthfFn::ViaDouble
    };

    let depth_range = if es {
      DepthRangeFn::Unavailable
    } else if nv_depth {
      DepthRangeFn::Nv
    } else {
      DepthRangeFn::Core
    };

    let depth_range_f = if es {
      DepthRangefFn::Native
    } else if nv_depth {
      DepthRangefFn::NvViaDouble
    } else if caps.is_extension_supported(Extension::ArbEs2Compatibility) {
      usage.mark(Extension::ArbEs2Compatibility);
      DepthRangefFn::Native
    } else {
      DepthRangefFn::ViaDouble
    };

    let reset_status = if !es && caps.is_extension_supported(Extension::ArbRobustness) {
      usage.mark(Extension::ArbRobustness);
      ResetStatusFn::Arb
    } else if es && caps.is_extension_supported(Extension::ExtRobustness) {
      usage.mark(Extension::ExtRobustness);
      ResetStatusFn::Ext
    } else {
      ResetStatusFn::Default
    };

    let line_width_range = if !es
      && caps.detected_driver().contains(DriverKind::MESA)
      && caps.flags().contains(ContextFlags::FORWARD_COMPATIBLE)
      && !caps.is_workaround_disabled("mesa-forward-compatible-line-width-range")
    {
      LineWidthRangeFn::MesaForwardCompatible
    } else {
      LineWidthRangeFn::Default
    };

    let min_sample_shading = if !es && caps.is_version_supported(Version::new(4, 0)) {
      MinSampleShadingFn::Core
    } else if !es && caps.is_extension_supported(Extension::ArbSampleShading) {
      usage.mark(Extension::ArbSampleShading);
      MinSampleShadingFn::Arb
    } else if es && caps.is_version_supported(Version::new(3, 2)) {
      MinSampleShadingFn::Core
    } else if es && caps.is_extension_supported(Extension::OesSampleShading) {
      usage.mark(Extension::OesSampleShading);
      MinSampleShadingFn::Oes
    } else {
      MinSampleShadingFn::Unavailable
    };

    let patch_parameter = if !es && caps.is_version_supported(Version::new(4, 0)) {
      PatchParameterFn::Core
    } else if es && caps.is_version_supported(Version::new(3, 2)) {
      PatchParameterFn::Core
    } else if es && caps.is_extension_supported(Extension::ExtTessellationShader) {
      usage.mark(Extension::ExtTessellationShader);
      PatchParameterFn::Ext
    } else {
      PatchParameterFn::Unavailable
    };

    let indexed_core =
      (!es && caps.is_version_supported(Version::new(3, 0))) || (es && caps.is_version_supported(Version::new(3, 2)));

    let indexed_toggle = if indexed_core {
      IndexedToggleFn::Core
    } else if caps.is_extension_supported(Extension::ExtDrawBuffersIndexed) {
      usage.mark(Extension::ExtDrawBuffersIndexed);
      IndexedToggleFn::Ext
    } else {
      IndexedToggleFn::Global
    };

    let indexed_color_mask = if indexed_core {
      IndexedColorMaskFn::Core
    } else if caps.is_extension_supported(Extension::ExtDrawBuffersIndexed) {
      usage.mark(Extension::ExtDrawBuffersIndexed);
      IndexedColorMaskFn::Ext
    } else {
      IndexedColorMaskFn::Global
    };

    let blend_core =
      (!es && caps.is_version_supported(Version::new(4, 0))) || (es && caps.is_version_supported(Version::new(3, 2)));

    let indexed_blend_func = if blend_core {
      IndexedBlendFuncFn::Core
    } else if !es && caps.is_extension_supported(Extension::ArbDrawBuffersBlend) {
      usage.mark(Extension::ArbDrawBuffersBlend);
      IndexedBlendFuncFn::Arb
    } else if es && caps.is_extension_supported(Extension::ExtDrawBuffersIndexed) {
      usage.mark(Extension::ExtDrawBuffersIndexed);
      IndexedBlendFuncFn::Ext
    } else {
      IndexedBlendFuncFn::Global
    };

    let indexed_blend_equation = if blend_core {
      IndexedBlendEquationFn::Core
    } else if !es && caps.is_extension_supported(Extension::ArbDrawBuffersBlend) {
      usage.mark(Extension::ArbDrawBuffersBlend);
      IndexedBlendEquationFn::Arb
    } else if es && caps.is_extension_supported(Extension::ExtDrawBuffersIndexed) {
      usage.mark(Extension::ExtDrawBuffersIndexed);
      IndexedBlendEquationFn::Ext
    } else {
      IndexedBlendEquationFn::Global
    };

    let polygon_mode = if !es {
      PolygonModeFn::Core
    } else if caps.is_extension_supported(Extension::NvPolygonMode) {
      usage.mark(Extension::NvPolygonMode);
      PolygonModeFn::Nv
    } else if caps.is_extension_supported(Extension::AnglePolygonMode) {
      usage.mark(Extension::AnglePolygonMode);
      PolygonModeFn::Angle
    } else {
      PolygonModeFn::Unavailable
    };

    ResolvedOps {
      clear_depth,
      clear_depth_f,
      depth_range,
      depth_range_f,
      reset_status,
      line_width_range,
      min_sample_shading,
      patch_parameter,
      indexed_toggle,
      indexed_color_mask,
      indexed_blend_func,
      indexed_blend_equation,
      polygon_mode,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::capabilities::{Api, Capabilities, ContextFlags, DriverKind, Extension, Version};
  use crate::driver::mock::{Call, RecordingDriver};

  fn resolve(caps: &Capabilities) -> (ResolvedOps, ExtensionUsage) {
    let mut usage = ExtensionUsage::new();
    let ops = ResolvedOps::resolve(caps, &mut usage);
    (ops, usage)
  }

  #[test]
  fn version_beats_equivalent_extension() {
    // The OES extension is advertised but ES 3.2 already has the core entry
    // point; the extension must not show up in the usage report.
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 2))
      .extension(Extension::OesSampleShading)
      .build();
    let (ops, usage) = resolve(&caps);

    assert_eq!(ops.min_sample_shading, MinSampleShadingFn::Core);
    assert!(!usage.is_used(Extension::OesSampleShading));
  }

  #[test]
  fn semantic_vendor_extension_beats_core() {
    let caps = Capabilities::builder(Api::Gl, Version::new(4, 3))
      .extension(Extension::NvDepthBufferFloat)
      .build();
    let (ops, usage) = resolve(&caps);

    assert_eq!(ops.clear_depth, ClearDepthFn::Nv);
    assert_eq!(ops.depth_range, DepthRangeFn::Nv);
    assert_eq!(ops.clear_depth_f, ClearDepthfFn::NvViaDouble);
    assert!(usage.is_used(Extension::NvDepthBufferFloat));
  }

  #[test]
  fn indexed_falls_back_to_extension_then_global() {
    let ext = Capabilities::builder(Api::Gles, Version::new(3, 0))
      .extension(Extension::ExtDrawBuffersIndexed)
      .build();
    let (ops, usage) = resolve(&ext);
    assert_eq!(ops.indexed_toggle, IndexedToggleFn::Ext);
    assert_eq!(ops.indexed_blend_func, IndexedBlendFuncFn::Ext);
    assert!(usage.is_used(Extension::ExtDrawBuffersIndexed));

    let bare = Capabilities::builder(Api::Gles, Version::new(3, 0)).build();
    let (ops, usage) = resolve(&bare);
    assert!(ops.indexed_toggle.is_global());
    assert!(ops.indexed_blend_func.is_global());
    assert!(usage.names().is_empty());
  }

  #[test]
  fn desktop_blend_indexed_via_arb() {
    let caps = Capabilities::builder(Api::Gl, Version::new(3, 3))
      .extension(Extension::ArbDrawBuffersBlend)
      .build();
    let (ops, usage) = resolve(&caps);

    // 3.3 covers indexed toggles but not indexed blending.
    assert_eq!(ops.indexed_toggle, IndexedToggleFn::Core);
    assert_eq!(ops.indexed_blend_func, IndexedBlendFuncFn::Arb);
    assert!(usage.is_used(Extension::ArbDrawBuffersBlend));
  }

  #[test]
  fn es_polygon_mode_prefers_nv_over_angle() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0))
      .extensions([Extension::NvPolygonMode, Extension::AnglePolygonMode])
      .build();
    let (ops, usage) = resolve(&caps);

    assert_eq!(ops.polygon_mode, PolygonModeFn::Nv);
    assert!(usage.is_used(Extension::NvPolygonMode));
    assert!(!usage.is_used(Extension::AnglePolygonMode));
  }

  #[test]
  fn robustness_default_reports_no_error_without_calling() {
    let caps = Capabilities::builder(Api::Gl, Version::new(3, 3)).build();
    let (ops, _) = resolve(&caps);
    let mut driver = RecordingDriver::new();

    assert_eq!(ops.reset_status.call(&mut driver), gl::NO_ERROR);
    assert!(driver.calls.is_empty());
  }

  #[test]
  fn mesa_forward_compatible_clamps_line_width_range() {
    let caps = Capabilities::builder(Api::Gl, Version::new(3, 2))
      .driver(DriverKind::MESA)
      .flags(ContextFlags::FORWARD_COMPATIBLE)
      .build();
    let (ops, _) = resolve(&caps);
    assert_eq!(ops.line_width_range, LineWidthRangeFn::MesaForwardCompatible);

    let mut driver = RecordingDriver::new();
    // The mock reports [1, 64]; the workaround caps the upper bound.
    assert_eq!(ops.line_width_range.query(&mut driver), [1., 1.]);
    assert_eq!(driver.calls, vec![Call::GetFloat2(gl::ALIASED_LINE_WIDTH_RANGE)]);

    let disabled = Capabilities::builder(Api::Gl, Version::new(3, 2))
      .driver(DriverKind::MESA)
      .flags(ContextFlags::FORWARD_COMPATIBLE)
      .disable_workaround("mesa-forward-compatible-line-width-range")
      .build();
    let (ops, _) = resolve(&disabled);
    assert_eq!(ops.line_width_range, LineWidthRangeFn::Default);
  }

  #[test]
  fn es_depth_entry_points() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0)).build();
    let (ops, _) = resolve(&caps);

    assert_eq!(ops.clear_depth, ClearDepthFn::Unavailable);
    assert_eq!(ops.depth_range, DepthRangeFn::Unavailable);
    assert_eq!(ops.clear_depth_f, ClearDepthfFn::Native);
    assert_eq!(ops.depth_range_f, DepthRangefFn::Native);
  }

  #[test]
  fn desktop_clear_depth_f_without_es2_compatibility_goes_via_double() {
    let caps = Capabilities::builder(Api::Gl, Version::new(3, 3)).build();
    let (ops, _) = resolve(&caps);
    let mut driver = RecordingDriver::new();

    ops.clear_depth_f.call(&mut driver, 0.5);
    assert_eq!(driver.calls, vec![Call::ClearDepth(0.5)]);
  }
}
