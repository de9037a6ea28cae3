//! Cached object bindings: framebuffers, buffers, vertex arrays, the active
//! program and per-unit textures.

use crate::driver::GlDriver;
use crate::state::Cached;
use gl::types::{GLenum, GLuint};

/// Whether a binding can be elided when the cache already matches.
///
/// `Forced` is for callers that just created or are about to delete an object
/// and need the driver binding to be real regardless of what the cache says.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bind {
  Forced,
  Cached,
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
pub(crate) struct BindingState {
  draw_framebuffer: Cached<GLuint>,
  read_framebuffer: Cached<GLuint>,
  array_buffer: Cached<GLuint>,
  element_array_buffer: Cached<GLuint>,
  uniform_buffers: Vec<Cached<GLuint>>,
  vertex_array: Cached<GLuint>,
  program: Cached<GLuint>,
  texture_unit: Cached<u32>,
  textures: Vec<Cached<(GLenum, GLuint)>>,
}

impl BindingState {
  pub(crate) fn new() -> Self {
    BindingState {
      draw_framebuffer: Cached::empty(),
      read_framebuffer: Cached::empty(),
      array_buffer: Cached::empty(),
      element_array_buffer: Cached::empty(),
      uniform_buffers: Vec::new(),
      vertex_array: Cached::empty(),
      program: Cached::empty(),
      texture_unit: Cached::empty(),
      textures: Vec::new(),
    }
  }

  pub(crate) fn bind_draw_framebuffer<D>(&mut self, driver: &mut D, handle: GLuint)
  where
    D: GlDriver,
  {
    if self.draw_framebuffer.is_invalid(&handle) {
      driver.bind_framebuffer(gl::DRAW_FRAMEBUFFER, handle);
      self.draw_framebuffer.set(handle);
    }
  }

  pub(crate) fn bind_read_framebuffer<D>(&mut self, driver: &mut D, handle: GLuint)
  where
    D: GlDriver,
  {
    if self.read_framebuffer.is_invalid(&handle) {
      driver.bind_framebuffer(gl::READ_FRAMEBUFFER, handle);
      self.read_framebuffer.set(handle);
    }
  }

  pub(crate) fn bind_array_buffer<D>(&mut self, driver: &mut D, handle: GLuint, bind_mode: Bind)
  where
    D: GlDriver,
  {
    if bind_mode == Bind::Forced || self.array_buffer.is_invalid(&handle) {
      driver.bind_buffer(gl::ARRAY_BUFFER, handle);
      self.array_buffer.set(handle);
    }
  }

  pub(crate) fn bind_element_array_buffer<D>(
    &mut self,
    driver: &mut D,
    handle: GLuint,
    bind_mode: Bind,
  ) where
    D: GlDriver,
  {
    if bind_mode == Bind::Forced || self.element_array_buffer.is_invalid(&handle) {
      driver.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, handle);
      self.element_array_buffer.set(handle);
    }
  }

  pub(crate) fn bind_uniform_buffer_at<D>(
    &mut self,
    driver: &mut D,
    handle: GLuint,
    binding_point: u32,
  ) where
    D: GlDriver,
  {
    let cell = slot(&mut self.uniform_buffers, binding_point);

    if cell.is_invalid(&handle) {
      driver.bind_buffer_base(gl::UNIFORM_BUFFER, binding_point, handle);
      cell.set(handle);
    }
  }

  pub(crate) fn bind_vertex_array<D>(&mut self, driver: &mut D, handle: GLuint)
  where
    D: GlDriver,
  {
    if self.vertex_array.is_invalid(&handle) {
      driver.bind_vertex_array(handle);
      self.vertex_array.set(handle);
    }
  }

  pub(crate) fn use_program<D>(&mut self, driver: &mut D, handle: GLuint)
  where
    D: GlDriver,
  {
    if self.program.is_invalid(&handle) {
      driver.use_program(handle);
      self.program.set(handle);
    }
  }

  pub(crate) fn set_texture_unit<D>(&mut self, driver: &mut D, unit: u32)
  where
    D: GlDriver,
  {
    if self.texture_unit.is_invalid(&unit) {
      driver.active_texture(gl::TEXTURE0 + unit);
      self.texture_unit.set(unit);
    }
  }

  pub(crate) fn bind_texture<D>(&mut self, driver: &mut D, target: GLenum, handle: GLuint)
  where
    D: GlDriver,
  {
    // Unknown active unit: pick unit 0 so the bind lands somewhere defined.
    let unit = match self.texture_unit.get() {
      Some(&unit) => unit,
      None => {
        self.set_texture_unit(driver, 0);
        0
      }
    };

    let cell = slot(&mut self.textures, unit);

    if cell.is_invalid(&(target, handle)) {
      driver.bind_texture(target, handle);
      cell.set((target, handle));
    }
  }

  /// Scrub a buffer handle out of every cache before the buffer is deleted.
  ///
  /// Deleting a bound buffer makes the driver silently unbind it, which the
  /// cache would otherwise never learn about.
  pub(crate) fn unbind_buffer<D>(&mut self, driver: &mut D, handle: GLuint)
  where
    D: GlDriver,
  {
    if self.array_buffer.holds(&handle) {
      driver.bind_buffer(gl::ARRAY_BUFFER, 0);
      self.array_buffer.set(0);
    }

    if self.element_array_buffer.holds(&handle) {
      driver.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, 0);
      self.element_array_buffer.set(0);
    }

    for (binding_point, cell) in self.uniform_buffers.iter_mut().enumerate() {
      if cell.holds(&handle) {
        driver.bind_buffer_base(gl::UNIFORM_BUFFER, binding_point as GLuint, 0);
        cell.set(0);
      }
    }
  }

  pub(crate) fn invalidate_framebuffers(&mut self) {
    self.draw_framebuffer.invalidate();
    self.read_framebuffer.invalidate();
  }

  pub(crate) fn invalidate_buffers(&mut self) {
    self.array_buffer.invalidate();
    self.element_array_buffer.invalidate();

    for cell in &mut self.uniform_buffers {
      cell.invalidate();
    }
  }

  pub(crate) fn invalidate_vertex_array(&mut self) {
    self.vertex_array.invalidate();
  }

  pub(crate) fn invalidate_program(&mut self) {
    self.program.invalidate();
  }

  pub(crate) fn invalidate_textures(&mut self) {
    self.texture_unit.invalidate();

    for cell in &mut self.textures {
      cell.invalidate();
    }
  }

  pub(crate) fn invalidate(&mut self) {
    self.invalidate_framebuffers();
    self.invalidate_buffers();
    self.invalidate_vertex_array();
    self.invalidate_program();
    self.invalidate_textures();
  }
}
