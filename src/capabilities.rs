//! Per-context capability registry.
//!
//! A [`Capabilities`] value records, once per logical context, which API and
//! version the context was created against, which optional extensions it
//! exposes, which driver it runs on and which driver workarounds are
//! disabled. The registry is populated exhaustively at construction time via
//! [`CapabilitiesBuilder`] and is immutable afterwards; every query is pure
//! and returns the same answer for the lifetime of the context.

use bitflags::bitflags;
use std::env;

/// The API the context was created against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Api {
  /// Desktop OpenGL.
  Gl,
  /// OpenGL ES.
  Gles,
}

/// An API version.
///
/// Versions are totally ordered within one [`Api`]; comparing versions across
/// APIs is meaningless and never done by this crate.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Version {
  pub major: u8,
  pub minor: u8,
}

impl Version {
  pub const fn new(major: u8, minor: u8) -> Self {
    Version { major, minor }
  }
}

/// Optional driver extensions the entry-point resolver can rely on.
///
/// This is the exhaustive list of extensions this crate knows how to use;
/// anything else a context advertises is simply ignored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Extension {
  AnglePolygonMode,
  ArbCompressedTexturePixelStorage,
  ArbDrawBuffersBlend,
  ArbEs2Compatibility,
  ArbRobustness,
  ArbSampleShading,
  ExtDrawBuffersIndexed,
  ExtRobustness,
  ExtTessellationShader,
  ExtUnpackSubimage,
  NvDepthBufferFloat,
  NvPackSubimage,
  NvPolygonMode,
  OesSampleShading,
}

impl Extension {
  pub(crate) const COUNT: usize = 14;

  pub(crate) const ALL: [Extension; Self::COUNT] = [
    Extension::AnglePolygonMode,
    Extension::ArbCompressedTexturePixelStorage,
    Extension::ArbDrawBuffersBlend,
    Extension::ArbEs2Compatibility,
    Extension::ArbRobustness,
    Extension::ArbSampleShading,
    Extension::ExtDrawBuffersIndexed,
    Extension::ExtRobustness,
    Extension::ExtTessellationShader,
    Extension::ExtUnpackSubimage,
    Extension::NvDepthBufferFloat,
    Extension::NvPackSubimage,
    Extension::NvPolygonMode,
    Extension::OesSampleShading,
  ];

  /// The identifier of the extension as advertised by the driver.
  pub fn name(self) -> &'static str {
    match self {
      Extension::AnglePolygonMode => "GL_ANGLE_polygon_mode",
      Extension::ArbCompressedTexturePixelStorage => "GL_ARB_compressed_texture_pixel_storage",
      Extension::ArbDrawBuffersBlend => "GL_ARB_draw_buffers_blend",
      Extension::ArbEs2Compatibility => "GL_ARB_ES2_compatibility",
      Extension::ArbRobustness => "GL_ARB_robustness",
      Extension::ArbSampleShading => "GL_ARB_sample_shading",
      Extension::ExtDrawBuffersIndexed => "GL_EXT_draw_buffers_indexed",
      Extension::ExtRobustness => "GL_EXT_robustness",
      Extension::ExtTessellationShader => "GL_EXT_tessellation_shader",
      Extension::ExtUnpackSubimage => "GL_EXT_unpack_subimage",
      Extension::NvDepthBufferFloat => "GL_NV_depth_buffer_float",
      Extension::NvPackSubimage => "GL_NV_pack_subimage",
      Extension::NvPolygonMode => "GL_NV_polygon_mode",
      Extension::OesSampleShading => "GL_OES_sample_shading",
    }
  }

  pub(crate) fn index(self) -> usize {
    Self::ALL.iter().position(|e| *e == self).unwrap_or(0)
  }
}

bitflags! {
  /// Drivers this crate knows how to recognize.
  ///
  /// More than one flag can be set when a driver is layered on top of another
  /// one (ANGLE on top of a native driver, for instance).
  pub struct DriverKind: u32 {
    const AMD = 1 << 0;
    const ANGLE = 1 << 1;
    const INTEL = 1 << 2;
    const MESA = 1 << 3;
    const NVIDIA = 1 << 4;
    const SWIFTSHADER = 1 << 5;
  }
}

bitflags! {
  /// Context creation flags relevant to entry-point resolution.
  pub struct ContextFlags: u32 {
    const DEBUG = 1 << 0;
    const FORWARD_COMPATIBLE = 1 << 1;
  }
}

/// Driver workarounds known to this crate.
///
/// Workaround names queried through [`Capabilities::is_workaround_disabled`]
/// must come from this list; querying an unknown name is a programming error.
pub const KNOWN_WORKAROUNDS: &[&str] = &["mesa-forward-compatible-line-width-range"];

/// Environment variable listing comma-separated workaround names to disable.
pub const DISABLE_WORKAROUNDS_ENV: &str = "GLISTER_DISABLE_WORKAROUNDS";

/// The capability registry of one logical context.
#[derive(Debug)]
pub struct Capabilities {
  api: Api,
  version: Version,
  extensions: [bool; Extension::COUNT],
  driver: DriverKind,
  flags: ContextFlags,
  core_profile: Option<bool>,
  disabled_workarounds: Vec<String>,
}

impl Capabilities {
  /// Start building a registry for a context of the given API and version.
  pub fn builder(api: Api, version: Version) -> CapabilitiesBuilder {
    CapabilitiesBuilder {
      caps: Capabilities {
        api,
        version,
        extensions: [false; Extension::COUNT],
        driver: DriverKind::empty(),
        flags: ContextFlags::empty(),
        core_profile: None,
        disabled_workarounds: Vec::new(),
      },
    }
  }

  pub fn api(&self) -> Api {
    self.api
  }

  pub fn version(&self) -> Version {
    self.version
  }

  /// Whether the context advertises the given extension.
  pub fn is_extension_supported(&self, extension: Extension) -> bool {
    self.extensions[extension.index()]
  }

  /// Whether the context version is at least `version`.
  ///
  /// The comparison is within the context's own API; passing a version of the
  /// other API yields a meaningless answer.
  pub fn is_version_supported(&self, version: Version) -> bool {
    self.version >= version
  }

  /// Whether the given driver workaround has been explicitly disabled.
  ///
  /// The name has to be on the [`KNOWN_WORKAROUNDS`] list.
  pub fn is_workaround_disabled(&self, name: &str) -> bool {
    assert!(
      KNOWN_WORKAROUNDS.contains(&name),
      "unknown driver workaround {:?}",
      name
    );

    self.disabled_workarounds.iter().any(|w| w == name)
  }

  /// The detected driver(s) of the context.
  pub fn detected_driver(&self) -> DriverKind {
    self.driver
  }

  pub fn flags(&self) -> ContextFlags {
    self.flags
  }

  /// Whether the context uses the core profile.
  ///
  /// [`None`] means profile detection is unavailable on this context; callers
  /// degrade to core-profile behavior in that case.
  pub fn core_profile(&self) -> Option<bool> {
    self.core_profile
  }
}

/// Builder for [`Capabilities`].
#[derive(Debug)]
pub struct CapabilitiesBuilder {
  caps: Capabilities,
}

impl CapabilitiesBuilder {
  /// Record one supported extension.
  pub fn extension(mut self, extension: Extension) -> Self {
    self.caps.extensions[extension.index()] = true;
    self
  }

  /// Record several supported extensions at once.
  pub fn extensions<E>(mut self, extensions: E) -> Self
  where
    E: IntoIterator<Item = Extension>,
  {
    for extension in extensions {
      self.caps.extensions[extension.index()] = true;
    }

    self
  }

  pub fn driver(mut self, driver: DriverKind) -> Self {
    self.caps.driver = driver;
    self
  }

  pub fn flags(mut self, flags: ContextFlags) -> Self {
    self.caps.flags = flags;
    self
  }

  pub fn core_profile(mut self, core: bool) -> Self {
    self.caps.core_profile = Some(core);
    self
  }

  /// Disable a driver workaround by name.
  ///
  /// The name has to be on the [`KNOWN_WORKAROUNDS`] list.
  pub fn disable_workaround(mut self, name: &str) -> Self {
    assert!(
      KNOWN_WORKAROUNDS.contains(&name),
      "unknown driver workaround {:?}",
      name
    );

    self.caps.disabled_workarounds.push(name.to_owned());
    self
  }

  /// Disable the workarounds listed in [`DISABLE_WORKAROUNDS_ENV`].
  ///
  /// Unknown names coming from the environment are warned about and skipped
  /// instead of aborting, since they are user input rather than code.
  pub fn disable_workarounds_from_env(mut self) -> Self {
    if let Ok(list) = env::var(DISABLE_WORKAROUNDS_ENV) {
      for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if KNOWN_WORKAROUNDS.contains(&name) {
          log::debug!("disabling driver workaround {:?} from the environment", name);
          self.caps.disabled_workarounds.push(name.to_owned());
        } else {
          log::warn!("ignoring unknown driver workaround {:?} from the environment", name);
        }
      }
    }

    self
  }

  pub fn build(self) -> Capabilities {
    self.caps
  }
}
