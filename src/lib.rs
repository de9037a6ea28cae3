//! Capability-aware OpenGL state cache.
//!
//! This crate sits between high-level object wrappers and an immediate-mode
//! GL driver. It memoizes the last-known value of every piece of mutable
//! pipeline state per context and only issues a driver call when the
//! requested value actually differs, while resolving, once per context, which
//! concrete entry point backs each logical operation across extension and
//! version differences.
//!
//! The entry point is [`ContextState`]: feed it a [`driver::GlDriver`]
//! implementation and a [`capabilities::Capabilities`] registry describing
//! the live context, then route every state change through it. Fields the
//! context cannot vary are pinned at their fixed value and reject non-default
//! requests with a [`StateError`] instead of issuing doomed calls.
//!
//! Everything is strictly single-threaded per context, like the API it
//! mirrors. Raw driver calls made behind the cache's back desynchronize it;
//! the `invalidate_*` methods exist for exactly that situation.

pub mod blending;
pub mod capabilities;
pub mod driver;
pub mod pixel_storage;
mod resolver;
pub mod state;

pub use crate::capabilities::{Api, Capabilities, CapabilitiesBuilder, Extension, Version};
pub use crate::driver::{GlDriver, GlFns};
pub use crate::pixel_storage::{CompressedPixelStorage, Direction, PixelStorage};
pub use crate::resolver::ExtensionUsage;
pub use crate::state::binding::Bind;
pub use crate::state::renderer::PolygonMode;
pub use crate::state::{ContextState, PixelStorageField, StateError};
