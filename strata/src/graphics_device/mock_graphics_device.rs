/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Hands out sequential fake handles, records every native call so tests can
/// inspect descriptors, barriers and debug names, and can be told to fail the
/// next creation of a given kind.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Config;
use crate::deletion_queue::DeletionQueue;
use crate::error::{Error, Result};
use crate::render_pass::RenderPassDesc;
use crate::graphics_device::{
    GraphicsDevice, DebugObject,
    ImageHandle, ImageViewHandle, AllocationHandle, RenderPassHandle,
    FramebufferHandle, CommandBufferHandle,
    TextureFormat, ImageDesc, ImageViewDesc, ImageBarrier, FramebufferDesc,
};

// ============================================================================
// Failure injection
// ============================================================================

/// Kind of native creation call that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Image,
    ImageView,
    RenderPass,
    Framebuffer,
}

// ============================================================================
// Mock Graphics Device
// ============================================================================

pub struct MockGraphicsDevice {
    pub depth_stencil_format: TextureFormat,
    pub swapchain_format: TextureFormat,
    debug_names_enabled: bool,
    next_handle: AtomicU64,
    deletion_queue: DeletionQueue,
    fail_next: Mutex<Option<(MockFailure, usize)>>,

    pub images: Mutex<Vec<(ImageDesc, ImageHandle, AllocationHandle)>>,
    pub image_views: Mutex<Vec<(ImageViewDesc, ImageViewHandle)>>,
    pub render_passes: Mutex<Vec<(RenderPassDesc, RenderPassHandle)>>,
    pub framebuffers: Mutex<Vec<(FramebufferDesc, FramebufferHandle)>>,
    pub barriers: Mutex<Vec<(CommandBufferHandle, ImageBarrier)>>,
    pub debug_names: Mutex<Vec<(DebugObject, String)>>,
}

impl MockGraphicsDevice {
    /// Mock device with debug names enabled and two frames in flight
    pub fn new() -> Self {
        Self::with_config(Config::default().with_debug_names(true))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            depth_stencil_format: TextureFormat::D24_UNORM_S8_UINT,
            swapchain_format: TextureFormat::B8G8R8A8_SRGB,
            debug_names_enabled: config.enable_debug_names,
            next_handle: AtomicU64::new(1),
            deletion_queue: DeletionQueue::new(config.frames_in_flight),
            fail_next: Mutex::new(None),
            images: Mutex::new(Vec::new()),
            image_views: Mutex::new(Vec::new()),
            render_passes: Mutex::new(Vec::new()),
            framebuffers: Mutex::new(Vec::new()),
            barriers: Mutex::new(Vec::new()),
            debug_names: Mutex::new(Vec::new()),
        }
    }

    /// Make the next creation call of `kind` return an error
    pub fn fail_next(&self, kind: MockFailure) {
        self.fail_nth(kind, 0);
    }

    /// Let `skip` creation calls of `kind` succeed, then fail the following one
    pub fn fail_nth(&self, kind: MockFailure, skip: usize) {
        *self.fail_next.lock().unwrap() = Some((kind, skip));
    }

    fn check_failure(&self, kind: MockFailure) -> Result<()> {
        let mut fail_next = self.fail_next.lock().unwrap();
        match *fail_next {
            Some((failing, 0)) if failing == kind => {
                *fail_next = None;
                Err(Error::BackendError(format!("Mock {:?} creation failed", kind)))
            }
            Some((failing, skip)) if failing == kind => {
                *fail_next = Some((failing, skip - 1));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn next_raw(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::Relaxed)
    }

    pub fn image_count(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    pub fn image_view_count(&self) -> usize {
        self.image_views.lock().unwrap().len()
    }

    pub fn render_pass_count(&self) -> usize {
        self.render_passes.lock().unwrap().len()
    }

    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.lock().unwrap().len()
    }

    /// Descriptor a view was created with
    pub fn image_view_desc(&self, view: ImageViewHandle) -> Option<ImageViewDesc> {
        self.image_views.lock().unwrap().iter()
            .find(|(_, h)| *h == view)
            .map(|(desc, _)| *desc)
    }

    /// Descriptor a render pass was created with
    pub fn render_pass_desc(&self, render_pass: RenderPassHandle) -> Option<RenderPassDesc> {
        self.render_passes.lock().unwrap().iter()
            .find(|(_, h)| *h == render_pass)
            .map(|(desc, _)| desc.clone())
    }

    /// Descriptor a framebuffer was created with
    pub fn framebuffer_desc(&self, framebuffer: FramebufferHandle) -> Option<FramebufferDesc> {
        self.framebuffers.lock().unwrap().iter()
            .find(|(_, h)| *h == framebuffer)
            .map(|(desc, _)| desc.clone())
    }

    /// Every name assigned to `object`, oldest first
    pub fn names_of(&self, object: DebugObject) -> Vec<String> {
        self.debug_names.lock().unwrap().iter()
            .filter(|(o, _)| *o == object)
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Most recent name assigned to `object`
    pub fn last_name_of(&self, object: DebugObject) -> Option<String> {
        self.names_of(object).pop()
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn preferred_depth_stencil_format(&self) -> TextureFormat {
        self.depth_stencil_format
    }

    fn swapchain_format(&self) -> TextureFormat {
        self.swapchain_format
    }

    fn debug_names_enabled(&self) -> bool {
        self.debug_names_enabled
    }

    fn set_debug_name(&self, object: DebugObject, name: &str) {
        if self.debug_names_enabled {
            self.debug_names.lock().unwrap().push((object, name.to_string()));
        }
    }

    fn deletion_queue(&self) -> &DeletionQueue {
        &self.deletion_queue
    }

    fn create_image(&self, desc: &ImageDesc) -> Result<(ImageHandle, AllocationHandle)> {
        self.check_failure(MockFailure::Image)?;
        let image = ImageHandle::from_raw(self.next_raw());
        let allocation = AllocationHandle::from_raw(self.next_raw());
        self.images.lock().unwrap().push((desc.clone(), image, allocation));
        Ok((image, allocation))
    }

    fn create_image_view(&self, desc: &ImageViewDesc) -> Result<ImageViewHandle> {
        self.check_failure(MockFailure::ImageView)?;
        let view = ImageViewHandle::from_raw(self.next_raw());
        self.image_views.lock().unwrap().push((*desc, view));
        Ok(view)
    }

    fn create_render_pass(&self, desc: &RenderPassDesc) -> Result<RenderPassHandle> {
        self.check_failure(MockFailure::RenderPass)?;
        let render_pass = RenderPassHandle::from_raw(self.next_raw());
        self.render_passes.lock().unwrap().push((desc.clone(), render_pass));
        Ok(render_pass)
    }

    fn create_framebuffer(&self, desc: &FramebufferDesc) -> Result<FramebufferHandle> {
        self.check_failure(MockFailure::Framebuffer)?;
        let framebuffer = FramebufferHandle::from_raw(self.next_raw());
        self.framebuffers.lock().unwrap().push((desc.clone(), framebuffer));
        Ok(framebuffer)
    }

    fn cmd_image_barrier(&self, cmd: CommandBufferHandle, barrier: &ImageBarrier) {
        self.barriers.lock().unwrap().push((cmd, *barrier));
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
