//! Blending-related types.
//!
//! Given two pixels *src* and *dst*, source and destination, we associate each
//! pixel a blending factor, respectively *srcK* and *dstK*. *src* is the pixel
//! being computed and *dst* is the pixel already stored in the draw buffer.
//! [`Equation`] states how the weighted pixels combine and [`Factor`] encodes
//! the weights.

use gl::types::GLenum;

/// Blending equation. Used to state how blending factors and pixel data should be blended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Equation {
  /// `Additive` represents the following blending equation:
  ///
  /// > `blended = src * srcK + dst * dstK`
  Additive,
  /// `Subtract` represents the following blending equation:
  ///
  /// > `blended = src * srcK - dst * dstK`
  Subtract,
  /// Because subtracting is not commutative, `ReverseSubtract` represents the following additional
  /// blending equation:
  ///
  /// > `blended = dst * dstK - src * srcK`
  ReverseSubtract,
  /// `Min` represents the following blending equation:
  ///
  /// > `blended = min(src, dst)`
  Min,
  /// `Max` represents the following blending equation:
  ///
  /// > `blended = max(src, dst)`
  Max,
}

/// Blending factors. Pixel data are multiplied by these factors to achieve several effects driven
/// by *blending equations*.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Factor {
  /// `1 * color = factor`
  One,
  /// `0 * color = 0`
  Zero,
  /// `src * color`
  SrcColor,
  /// `(1 - src) * color`
  SrcColorComplement,
  /// `dst * color`
  DestColor,
  /// `(1 - dst) * color`
  DestColorComplement,
  /// `srcA * color`
  SrcAlpha,
  /// `(1 - src) * color`
  SrcAlphaComplement,
  /// `dstA * color`
  DstAlpha,
  /// `(1 - dstA) * color`
  DstAlphaComplement,
  /// `min(srcA, 1 - dstA) * color`
  SrcAlphaSaturate,
}

/// The four blending factors of one draw buffer, RGB and alpha channels
/// treated separately.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlendingFactors {
  pub src_rgb: Factor,
  pub dst_rgb: Factor,
  pub src_alpha: Factor,
  pub dst_alpha: Factor,
}

impl BlendingFactors {
  /// Factors using the same source and destination weights for RGB and alpha.
  pub fn uniform(src: Factor, dst: Factor) -> Self {
    BlendingFactors {
      src_rgb: src,
      dst_rgb: dst,
      src_alpha: src,
      dst_alpha: dst,
    }
  }

  pub(crate) fn is_uniform(&self) -> bool {
    self.src_rgb == self.src_alpha && self.dst_rgb == self.dst_alpha
  }
}

/// The blending equations of one draw buffer, RGB and alpha channels treated
/// separately.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlendingEquations {
  pub rgb: Equation,
  pub alpha: Equation,
}

impl BlendingEquations {
  /// The same equation for the RGB and alpha channels.
  pub fn uniform(equation: Equation) -> Self {
    BlendingEquations {
      rgb: equation,
      alpha: equation,
    }
  }

  pub(crate) fn is_uniform(&self) -> bool {
    self.rgb == self.alpha
  }
}

/// Per-channel color write mask of one draw buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColorMask {
  pub red: bool,
  pub green: bool,
  pub blue: bool,
  pub alpha: bool,
}

impl ColorMask {
  /// All channels written.
  pub fn all() -> Self {
    ColorMask {
      red: true,
      green: true,
      blue: true,
      alpha: true,
    }
  }

  /// No channel written.
  pub fn none() -> Self {
    ColorMask {
      red: false,
      green: false,
      blue: false,
      alpha: false,
    }
  }
}

impl Default for ColorMask {
  fn default() -> Self {
    Self::all()
  }
}

#[inline]
pub(crate) fn from_blending_equation(equation: Equation) -> GLenum {
  match equation {
    Equation::Additive => gl::FUNC_ADD,
    Equation::Subtract => gl::FUNC_SUBTRACT,
    Equation::ReverseSubtract => gl::FUNC_REVERSE_SUBTRACT,
    Equation::Min => gl::MIN,
    Equation::Max => gl::MAX,
  }
}

#[inline]
pub(crate) fn from_blending_factor(factor: Factor) -> GLenum {
  match factor {
    Factor::One => gl::ONE,
    Factor::Zero => gl::ZERO,
    Factor::SrcColor => gl::SRC_COLOR,
    Factor::SrcColorComplement => gl::ONE_MINUS_SRC_COLOR,
    Factor::DestColor => gl::DST_COLOR,
    Factor::DestColorComplement => gl::ONE_MINUS_DST_COLOR,
    Factor::SrcAlpha => gl::SRC_ALPHA,
    Factor::SrcAlphaComplement => gl::ONE_MINUS_SRC_ALPHA,
    Factor::DstAlpha => gl::DST_ALPHA,
    Factor::DstAlphaComplement => gl::ONE_MINUS_DST_ALPHA,
    Factor::SrcAlphaSaturate => gl::SRC_ALPHA_SATURATE,
  }
}
