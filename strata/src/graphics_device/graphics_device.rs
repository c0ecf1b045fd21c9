/// GraphicsDevice trait - the native device/context seam
///
/// Everything the render-target layer needs from the underlying graphics API
/// goes through this trait: format queries, object creation, barrier recording,
/// debug naming and the deferred deletion queue. The Vulkan backend implements
/// it with ash; tests use the mock device.

use crate::error::Result;
use crate::deletion_queue::DeletionQueue;
use crate::render_pass::RenderPassDesc;
use crate::graphics_device::{
    ImageHandle, ImageViewHandle, AllocationHandle, RenderPassHandle,
    FramebufferHandle, CommandBufferHandle,
    TextureFormat, ImageDesc, ImageViewDesc, ImageBarrier, FramebufferDesc,
};

/// A GPU object that can receive a debug name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugObject {
    Image(ImageHandle),
    ImageView(ImageViewHandle),
    RenderPass(RenderPassHandle),
    Framebuffer(FramebufferHandle),
}

impl DebugObject {
    /// Returns true if the wrapped handle is null
    pub fn is_null(&self) -> bool {
        match self {
            DebugObject::Image(h) => h.is_null(),
            DebugObject::ImageView(h) => h.is_null(),
            DebugObject::RenderPass(h) => h.is_null(),
            DebugObject::Framebuffer(h) => h.is_null(),
        }
    }
}

/// Native device operations used by render targets, render passes and framebuffers
pub trait GraphicsDevice: Send + Sync {
    /// Depth/stencil format selected for this device at initialization
    fn preferred_depth_stencil_format(&self) -> TextureFormat;

    /// Format of the swapchain images (used by backbuffer render passes)
    fn swapchain_format(&self) -> TextureFormat;

    /// Whether debug names are currently being assigned
    fn debug_names_enabled(&self) -> bool;

    /// Assign a debug name to a GPU object
    ///
    /// Implementations ignore the call when naming is disabled.
    fn set_debug_name(&self, object: DebugObject, name: &str);

    /// Deferred deletion queue shared by every owner of GPU handles
    fn deletion_queue(&self) -> &DeletionQueue;

    /// Create a GPU-only image and bind freshly allocated memory to it
    fn create_image(&self, desc: &ImageDesc) -> Result<(ImageHandle, AllocationHandle)>;

    /// Create a view onto an existing image
    fn create_image_view(&self, desc: &ImageViewDesc) -> Result<ImageViewHandle>;

    /// Create a native render pass from a backend-neutral description
    fn create_render_pass(&self, desc: &RenderPassDesc) -> Result<RenderPassHandle>;

    /// Create a framebuffer object
    fn create_framebuffer(&self, desc: &FramebufferDesc) -> Result<FramebufferHandle>;

    /// Record an image memory barrier into a command buffer in the recording state
    fn cmd_image_barrier(&self, cmd: CommandBufferHandle, barrier: &ImageBarrier);

    /// Name an object if naming is active and the handle is valid
    fn name_object(&self, object: DebugObject, name: &str) {
        if self.debug_names_enabled() && !object.is_null() {
            self.set_debug_name(object, name);
        }
    }
}
