/// Backend-neutral render pass description
///
/// `RenderPassDesc::build` is the pure half of render pass creation: given a
/// key, a variant and the device formats it decides attachments, the single
/// subpass, its dependencies and the multiview setup. Backends only translate.

use crate::graphics_device::{TextureFormat, ImageLayout, PipelineStages, AccessFlags};
use crate::render_pass::{RenderPassKey, RenderPassType, LoadOp, StoreOp};

/// Attachment slot of the color surface
pub const COLOR_ATTACHMENT: u32 = 0;
/// Attachment slot of the depth/stencil surface
pub const DEPTH_ATTACHMENT: u32 = 1;

/// View mask used by multiview passes (two views)
pub const MULTIVIEW_MASK: u32 = 0b11;

/// Descriptor for a single attachment in a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentDesc {
    /// Pixel format
    pub format: TextureFormat,
    /// Number of samples (1 = no MSAA)
    pub samples: u32,
    /// Load operation (what to do with existing content)
    pub load_op: LoadOp,
    /// Store operation (what to do with rendered content)
    pub store_op: StoreOp,
    pub stencil_load_op: LoadOp,
    pub stencil_store_op: StoreOp,
    /// Initial layout (how the attachment starts)
    pub initial_layout: ImageLayout,
    /// Final layout (how the attachment ends)
    pub final_layout: ImageLayout,
}

/// Reference from a subpass to an attachment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentRef {
    pub attachment: u32,
    pub layout: ImageLayout,
}

/// The graphics subpass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubpassDesc {
    pub color_attachments: Vec<AttachmentRef>,
    pub input_attachments: Vec<AttachmentRef>,
    pub depth_stencil_attachment: Option<AttachmentRef>,
}

/// Endpoint of a subpass dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubpassIndex {
    /// Commands outside the render pass
    External,
    Index(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubpassDependency {
    pub src_subpass: SubpassIndex,
    pub dst_subpass: SubpassIndex,
    pub src_stages: PipelineStages,
    pub dst_stages: PipelineStages,
    pub src_access: AccessFlags,
    pub dst_access: AccessFlags,
    pub by_region: bool,
}

/// Multiview configuration (one entry per subpass / dependency)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiviewDesc {
    pub view_masks: Vec<u32>,
    pub correlation_masks: Vec<u32>,
    pub view_offsets: Vec<i32>,
}

/// Complete description of a render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPassDesc {
    /// Attachments: color first, then depth/stencil if any
    pub attachments: Vec<AttachmentDesc>,
    pub subpass: SubpassDesc,
    pub dependencies: Vec<SubpassDependency>,
    pub multiview: Option<MultiviewDesc>,
}

impl RenderPassDesc {
    /// Describe the render pass for variant `ty` with load/store behavior `key`
    pub fn build(
        key: &RenderPassKey,
        ty: RenderPassType,
        swapchain_format: TextureFormat,
        depth_stencil_format: TextureFormat,
    ) -> Self {
        let (color_format, color_initial, color_final) = if ty.is_backbuffer() {
            (swapchain_format, ImageLayout::Undefined, ImageLayout::PresentSrc)
        } else {
            (TextureFormat::R8G8B8A8_UNORM, ImageLayout::ColorAttachment, ImageLayout::ColorAttachment)
        };

        let mut attachments = vec![AttachmentDesc {
            format: color_format,
            samples: 1,
            load_op: key.color_load_op,
            store_op: key.color_store_op,
            stencil_load_op: LoadOp::DontCare,
            stencil_store_op: StoreOp::DontCare,
            initial_layout: color_initial,
            final_layout: color_final,
        }];

        if ty.has_depth() {
            attachments.push(AttachmentDesc {
                format: depth_stencil_format,
                samples: 1,
                load_op: key.depth_load_op,
                store_op: key.depth_store_op,
                stencil_load_op: key.stencil_load_op,
                stencil_store_op: key.stencil_store_op,
                initial_layout: ImageLayout::DepthStencilAttachment,
                final_layout: ImageLayout::DepthStencilAttachment,
            });
        }

        // Writing and reading the same attachment in one subpass requires GENERAL
        let color_ref = AttachmentRef {
            attachment: COLOR_ATTACHMENT,
            layout: if ty.has_self_input() { ImageLayout::General } else { ImageLayout::ColorAttachment },
        };

        let subpass = SubpassDesc {
            color_attachments: vec![color_ref],
            input_attachments: if ty.has_self_input() { vec![color_ref] } else { Vec::new() },
            depth_stencil_attachment: ty.has_depth().then_some(AttachmentRef {
                attachment: DEPTH_ATTACHMENT,
                layout: ImageLayout::DepthStencilAttachment,
            }),
        };

        let mut dependencies = Vec::new();
        if ty.is_backbuffer() {
            dependencies.push(SubpassDependency {
                src_subpass: SubpassIndex::External,
                dst_subpass: SubpassIndex::Index(0),
                src_stages: PipelineStages::COLOR_ATTACHMENT_OUTPUT,
                dst_stages: PipelineStages::COLOR_ATTACHMENT_OUTPUT,
                src_access: AccessFlags::empty(),
                dst_access: AccessFlags::COLOR_ATTACHMENT_READ | AccessFlags::COLOR_ATTACHMENT_WRITE,
                by_region: false,
            });
        }
        if ty.has_self_input() {
            dependencies.push(SubpassDependency {
                src_subpass: SubpassIndex::Index(0),
                dst_subpass: SubpassIndex::Index(0),
                src_stages: PipelineStages::COLOR_ATTACHMENT_OUTPUT,
                dst_stages: PipelineStages::FRAGMENT_SHADER,
                src_access: AccessFlags::COLOR_ATTACHMENT_WRITE,
                dst_access: AccessFlags::INPUT_ATTACHMENT_READ,
                by_region: true,
            });
        }

        let multiview = ty.is_multiview().then(|| MultiviewDesc {
            view_masks: vec![MULTIVIEW_MASK],
            correlation_masks: vec![MULTIVIEW_MASK],
            view_offsets: vec![0],
        });

        Self {
            attachments,
            subpass,
            dependencies,
            multiview,
        }
    }

    pub fn has_depth(&self) -> bool {
        self.subpass.depth_stencil_attachment.is_some()
    }
}

#[cfg(test)]
#[path = "render_pass_desc_tests.rs"]
mod tests;
