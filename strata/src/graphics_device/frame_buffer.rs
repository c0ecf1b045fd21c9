/// Framebuffer object descriptor
///
/// A framebuffer object binds concrete image views to the attachment slots
/// of a render pass. Any pass compatible with the attachments can be used to
/// build it (same formats, sample counts and view mask; load/store ops may differ).

use crate::graphics_device::{ImageViewHandle, RenderPassHandle};

/// Descriptor for creating a framebuffer object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramebufferDesc {
    /// Any render pass compatible with the attachments
    pub render_pass: RenderPassHandle,
    /// Attachment views, in render pass attachment order
    pub attachments: Vec<ImageViewHandle>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Framebuffer layers (1 with multiview: views come from the pass view mask)
    pub layers: u32,
}
