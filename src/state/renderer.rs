//! Cached renderer state: per-draw-buffer blending and write masks, plus the
//! scalar rasterization and tessellation knobs.
//!
//! Per-draw-buffer caches grow on demand; on contexts with only the global
//! entry points, draw buffer 0 degrades to those and any other index is an
//! error.

use crate::blending::{
  from_blending_equation, from_blending_factor, BlendingEquations, BlendingFactors, ColorMask,
};
use crate::driver::GlDriver;
use crate::resolver::ResolvedOps;
use crate::state::{unsupported, Cached, StateError};
use gl::types::GLenum;

/// How polygons are rasterized.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PolygonMode {
  /// Vertices only.
  Point,
  /// Edges only.
  Line,
  /// Filled interior, the default.
  Fill,
}

fn from_polygon_mode(mode: PolygonMode) -> GLenum {
  match mode {
    PolygonMode::Point => gl::POINT,
    PolygonMode::Line => gl::LINE,
    PolygonMode::Fill => gl::FILL,
  }
}

fn indexed_unavailable(operation: &'static str, index: u32) -> StateError {
  log::error!(
    "{} on draw buffer {} requires per-draw-buffer support this context lacks",
    operation,
    index
  );

  StateError::IndexedUnavailable { operation, index }
}

fn slot<T>(cells: &mut Vec<Cached<T>>, index: u32) -> &mut Cached<T>
where
  T: PartialEq,
{
  let index = index as usize;

  if cells.len() <= index {
    cells.resize_with(index + 1, Cached::empty);
  }

  &mut cells[index]
}

#[derive(Debug)]
pub(crate) struct RendererState {
  blend_enabled: Vec<Cached<bool>>,
  color_masks: Vec<Cached<ColorMask>>,
  blend_funcs: Vec<Cached<BlendingFactors>>,
  blend_equations: Vec<Cached<BlendingEquations>>,
  line_width: Cached<f32>,
  polygon_mode: Cached<PolygonMode>,
  patch_vertex_count: Cached<i32>,
  min_sample_shading: Cached<f32>,
}

impl RendererState {
  pub(crate) fn new() -> Self {
    RendererState {
      blend_enabled: Vec::new(),
      color_masks: Vec::new(),
      blend_funcs: Vec::new(),
      blend_equations: Vec::new(),
      line_width: Cached::empty(),
      polygon_mode: Cached::empty(),
      patch_vertex_count: Cached::empty(),
      min_sample_shading: Cached::empty(),
    }
  }

  pub(crate) fn set_blend_enabled<D>(
    &mut self,
    driver: &mut D,
    ops: &ResolvedOps,
    index: u32,
    enabled: bool,
  ) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    if ops.indexed_toggle.is_global() && index != 0 {
      return Err(indexed_unavailable("blending toggle", index));
    }

    let cell = slot(&mut self.blend_enabled, index);

    if cell.is_invalid(&enabled) {
      ops.indexed_toggle.call(driver, gl::BLEND, index, enabled);
      cell.set(enabled);
    }

    Ok(())
  }

  pub(crate) fn set_color_mask<D>(
    &mut self,
    driver: &mut D,
    ops: &ResolvedOps,
    index: u32,
    mask: ColorMask,
  ) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    if ops.indexed_color_mask.is_global() && index != 0 {
      return Err(indexed_unavailable("color write mask", index));
    }

    let cell = slot(&mut self.color_masks, index);

    if cell.is_invalid(&mask) {
      ops
        .indexed_color_mask
        .call(driver, index, mask.red, mask.green, mask.blue, mask.alpha);
      cell.set(mask);
    }

    Ok(())
  }

  pub(crate) fn set_blend_func<D>(
    &mut self,
    driver: &mut D,
    ops: &ResolvedOps,
    index: u32,
    factors: BlendingFactors,
  ) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    if ops.indexed_blend_func.is_global() && index != 0 {
      return Err(indexed_unavailable("blending function", index));
    }

    let cell = slot(&mut self.blend_funcs, index);

    if cell.is_invalid(&factors) {
      if factors.is_uniform() {
        ops.indexed_blend_func.func(
          driver,
          index,
          from_blending_factor(factors.src_rgb),
          from_blending_factor(factors.dst_rgb),
        );
      } else {
        ops.indexed_blend_func.func_separate(
          driver,
          index,
          from_blending_factor(factors.src_rgb),
          from_blending_factor(factors.dst_rgb),
          from_blending_factor(factors.src_alpha),
          from_blending_factor(factors.dst_alpha),
        );
      }

      cell.set(factors);
    }

    Ok(())
  }

  pub(crate) fn set_blend_equation<D>(
    &mut self,
    driver: &mut D,
    ops: &ResolvedOps,
    index: u32,
    equations: BlendingEquations,
  ) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    if ops.indexed_blend_equation.is_global() && index != 0 {
      return Err(indexed_unavailable("blending equation", index));
    }

    let cell = slot(&mut self.blend_equations, index);

    if cell.is_invalid(&equations) {
      if equations.is_uniform() {
        ops
          .indexed_blend_equation
          .equation(driver, index, from_blending_equation(equations.rgb));
      } else {
        ops.indexed_blend_equation.equation_separate(
          driver,
          index,
          from_blending_equation(equations.rgb),
          from_blending_equation(equations.alpha),
        );
      }

      cell.set(equations);
    }

    Ok(())
  }

  pub(crate) fn set_line_width<D>(&mut self, driver: &mut D, width: f32)
  where
    D: GlDriver,
  {
    if self.line_width.is_invalid(&width) {
      driver.line_width(width);
      self.line_width.set(width);
    }
  }

  pub(crate) fn set_polygon_mode<D>(
    &mut self,
    driver: &mut D,
    ops: &ResolvedOps,
    mode: PolygonMode,
  ) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    if !self.polygon_mode.is_invalid(&mode) {
      return Ok(());
    }

    if !ops.polygon_mode.call(driver, from_polygon_mode(mode)) {
      // Filled rasterization is all such contexts ever do anyway.
      if mode == PolygonMode::Fill {
        self.polygon_mode.set(mode);
        return Ok(());
      }

      return Err(unsupported("polygon mode"));
    }

    self.polygon_mode.set(mode);
    Ok(())
  }

  pub(crate) fn set_patch_vertex_count<D>(
    &mut self,
    driver: &mut D,
    ops: &ResolvedOps,
    count: i32,
  ) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    if self.patch_vertex_count.is_invalid(&count) {
      if !ops.patch_parameter.call(driver, count) {
        return Err(unsupported("tessellation patch vertex count"));
      }

      self.patch_vertex_count.set(count);
    }

    Ok(())
  }

  pub(crate) fn set_min_sample_shading<D>(
    &mut self,
    driver: &mut D,
    ops: &ResolvedOps,
    value: f32,
  ) -> Result<(), StateError>
  where
    D: GlDriver,
  {
    if self.min_sample_shading.is_invalid(&value) {
      if !ops.min_sample_shading.call(driver, value) {
        return Err(unsupported("minimum sample shading"));
      }

      self.min_sample_shading.set(value);
    }

    Ok(())
  }

  pub(crate) fn invalidate(&mut self) {
    for cell in &mut self.blend_enabled {
      cell.invalidate();
    }

    for cell in &mut self.color_masks {
      cell.invalidate();
    }

    for cell in &mut self.blend_funcs {
      cell.invalidate();
    }

    for cell in &mut self.blend_equations {
      cell.invalidate();
    }

    self.line_width.invalidate();
    self.polygon_mode.invalidate();
    self.patch_vertex_count.invalidate();
    self.min_sample_shading.invalidate();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::blending::{Equation, Factor};
  use crate::capabilities::{Api, Capabilities, Extension, Version};
  use crate::driver::mock::{Call, RecordingDriver};
  use crate::resolver::ExtensionUsage;

  fn ops_for(caps: &Capabilities) -> ResolvedOps {
    ResolvedOps::resolve(caps, &mut ExtensionUsage::new())
  }

  #[test]
  fn indexed_toggle_uses_core_entry_point_and_caches() {
    let caps = Capabilities::builder(Api::Gl, Version::new(4, 3)).build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state.set_blend_enabled(&mut driver, &ops, 1, true).unwrap();
    state.set_blend_enabled(&mut driver, &ops, 1, true).unwrap();
    state.set_blend_enabled(&mut driver, &ops, 1, false).unwrap();

    assert_eq!(
      driver.calls,
      vec![Call::EnableI(gl::BLEND, 1), Call::DisableI(gl::BLEND, 1)]
    );
  }

  #[test]
  fn indexed_toggle_via_extension() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0))
      .extension(Extension::ExtDrawBuffersIndexed)
      .build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state.set_blend_enabled(&mut driver, &ops, 2, true).unwrap();
    assert_eq!(driver.calls, vec![Call::EnableIExt(gl::BLEND, 2)]);
  }

  #[test]
  fn global_fallback_serves_index_zero_only() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0)).build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state.set_blend_enabled(&mut driver, &ops, 0, true).unwrap();
    assert_eq!(driver.calls, vec![Call::Enable(gl::BLEND)]);

    driver.calls.clear();
    let err = state
      .set_blend_enabled(&mut driver, &ops, 1, true)
      .unwrap_err();
    assert!(matches!(
      err,
      StateError::IndexedUnavailable { index: 1, .. }
    ));
    assert!(driver.calls.is_empty());
  }

  #[test]
  fn uniform_blend_func_takes_the_two_factor_entry_point() {
    let caps = Capabilities::builder(Api::Gl, Version::new(4, 3)).build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state
      .set_blend_func(
        &mut driver,
        &ops,
        0,
        BlendingFactors::uniform(Factor::SrcAlpha, Factor::SrcAlphaComplement),
      )
      .unwrap();
    state
      .set_blend_func(
        &mut driver,
        &ops,
        0,
        BlendingFactors {
          src_rgb: Factor::SrcAlpha,
          dst_rgb: Factor::SrcAlphaComplement,
          src_alpha: Factor::One,
          dst_alpha: Factor::Zero,
        },
      )
      .unwrap();

    assert_eq!(
      driver.calls,
      vec![
        Call::BlendFuncI(0, gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA),
        Call::BlendFuncSeparateI(0, gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA, gl::ONE, gl::ZERO),
      ]
    );
  }

  #[test]
  fn blend_equation_caches_per_draw_buffer() {
    let caps = Capabilities::builder(Api::Gl, Version::new(4, 3)).build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state
      .set_blend_equation(&mut driver, &ops, 0, BlendingEquations::uniform(Equation::Min))
      .unwrap();
    state
      .set_blend_equation(&mut driver, &ops, 1, BlendingEquations::uniform(Equation::Min))
      .unwrap();
    state
      .set_blend_equation(&mut driver, &ops, 0, BlendingEquations::uniform(Equation::Min))
      .unwrap();

    assert_eq!(
      driver.calls,
      vec![
        Call::BlendEquationI(0, gl::MIN),
        Call::BlendEquationI(1, gl::MIN),
      ]
    );
  }

  #[test]
  fn color_mask_global_path() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0)).build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state
      .set_color_mask(&mut driver, &ops, 0, ColorMask::none())
      .unwrap();
    assert_eq!(driver.calls, vec![Call::ColorMask(false, false, false, false)]);
  }

  #[test]
  fn polygon_mode_on_es_accepts_fill_only() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0)).build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state
      .set_polygon_mode(&mut driver, &ops, PolygonMode::Fill)
      .unwrap();
    assert!(driver.calls.is_empty());

    let err = state
      .set_polygon_mode(&mut driver, &ops, PolygonMode::Line)
      .unwrap_err();
    assert!(matches!(err, StateError::Unsupported { .. }));
    assert!(driver.calls.is_empty());
  }

  #[test]
  fn polygon_mode_on_desktop_issues_front_and_back() {
    let caps = Capabilities::builder(Api::Gl, Version::new(3, 3)).build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state
      .set_polygon_mode(&mut driver, &ops, PolygonMode::Line)
      .unwrap();
    assert_eq!(driver.calls, vec![Call::PolygonMode(gl::FRONT_AND_BACK, gl::LINE)]);
  }

  #[test]
  fn patch_vertex_count_requires_tessellation() {
    let with = Capabilities::builder(Api::Gl, Version::new(4, 3)).build();
    let ops = ops_for(&with);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state.set_patch_vertex_count(&mut driver, &ops, 3).unwrap();
    assert_eq!(driver.calls, vec![Call::PatchParameterI(gl::PATCH_VERTICES, 3)]);

    let without = Capabilities::builder(Api::Gl, Version::new(3, 3)).build();
    let ops = ops_for(&without);
    let err = state
      .set_patch_vertex_count(&mut driver, &ops, 4)
      .unwrap_err();
    assert!(matches!(err, StateError::Unsupported { .. }));
  }

  #[test]
  fn min_sample_shading_via_oes() {
    let caps = Capabilities::builder(Api::Gles, Version::new(3, 0))
      .extension(Extension::OesSampleShading)
      .build();
    let ops = ops_for(&caps);
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state
      .set_min_sample_shading(&mut driver, &ops, 0.5)
      .unwrap();
    assert_eq!(driver.calls, vec![Call::MinSampleShadingOes(0.5)]);
  }

  #[test]
  fn invalidate_forces_reissue() {
    let mut state = RendererState::new();
    let mut driver = RecordingDriver::new();

    state.set_line_width(&mut driver, 2.0);
    state.set_line_width(&mut driver, 2.0);
    state.invalidate();
    state.set_line_width(&mut driver, 2.0);

    assert_eq!(driver.calls, vec![Call::LineWidth(2.0), Call::LineWidth(2.0)]);
  }
}
