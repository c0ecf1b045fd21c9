/// Framebuffer - one logical render target
///
/// Owns a color image and an optional depth/stencil image, and lazily builds
/// one framebuffer object per render pass variant it is rendered with.
/// Framebuffer objects are built against whatever compatible render pass is
/// handed to `get` and are reused for the rest of the framebuffer's lifetime.

use std::sync::Arc;

use crate::error::Result;
use crate::{strata_debug, strata_warn};
use crate::graphics_device::{
    GraphicsDevice, DebugObject, CommandBufferHandle, FramebufferHandle, ImageViewHandle,
    TextureFormat, ImageLayout, FramebufferDesc,
};
use crate::render_pass::{RenderPassCache, RenderPassType};
use crate::framebuffer::{RenderTargetImage, MAX_LAYERS};

/// Format of every framebuffer color surface
pub const COLOR_FORMAT: TextureFormat = TextureFormat::R8G8B8A8_UNORM;

pub struct Framebuffer {
    device: Arc<dyn GraphicsDevice>,
    width: u32,
    height: u32,
    num_layers: u32,
    color: RenderTargetImage,
    depth: Option<RenderTargetImage>,
    framebufs: [Option<FramebufferHandle>; RenderPassType::COUNT],
    tag: String,
}

impl Framebuffer {
    /// Create the color (and optionally depth/stencil) image
    ///
    /// Initial layout transitions are recorded into `cmd`. Framebuffer objects
    /// are not built here; `get` builds them on demand, so the pass hint is
    /// only there to tie the target to a render pass family.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: Arc<dyn GraphicsDevice>,
        cmd: CommandBufferHandle,
        _compatible_pass_hint: &RenderPassCache,
        width: u32,
        height: u32,
        num_layers: u32,
        want_depth_stencil: bool,
        tag: &str,
    ) -> Result<Self> {
        let color = RenderTargetImage::create(
            device.as_ref(),
            cmd,
            width,
            height,
            num_layers,
            COLOR_FORMAT,
            ImageLayout::ColorAttachment,
            true,
            tag,
        )?;

        let depth = if want_depth_stencil {
            let created = RenderTargetImage::create(
                device.as_ref(),
                cmd,
                width,
                height,
                num_layers,
                device.preferred_depth_stencil_format(),
                ImageLayout::DepthStencilAttachment,
                false,
                tag,
            );
            match created {
                Ok(depth) => Some(depth),
                Err(err) => {
                    let mut color = color;
                    color.queue_delete(device.deletion_queue());
                    return Err(err);
                }
            }
        } else {
            None
        };

        let mut framebuffer = Self {
            device,
            width,
            height,
            num_layers,
            color,
            depth,
            framebufs: [None; RenderPassType::COUNT],
            tag: tag.to_string(),
        };
        framebuffer.apply_names();

        strata_debug!(
            "strata::Framebuffer",
            "Created framebuffer '{}' {}x{} ({} layers, depth: {})",
            framebuffer.tag, width, height, num_layers, want_depth_stencil
        );

        Ok(framebuffer)
    }

    /// Framebuffer object for render pass variant `ty`, built on first request
    ///
    /// `compatible_pass` only has to be compatible with this target; its
    /// load/store behavior does not matter.
    pub fn get(&mut self, compatible_pass: &mut RenderPassCache, ty: RenderPassType) -> Result<FramebufferHandle> {
        let index = ty.index();
        if let Some(framebuf) = self.framebufs[index] {
            return Ok(framebuf);
        }

        let mut attachments = vec![self.color.rt_view()];
        if ty.has_depth() {
            match &self.depth {
                Some(depth) => attachments.push(depth.rt_view()),
                None => {
                    strata_warn!(
                        "strata::Framebuffer",
                        "Render pass {} needs a depth attachment but framebuffer '{}' has none",
                        ty, self.tag
                    );
                    attachments.push(ImageViewHandle::null());
                }
            }
        }

        let render_pass = compatible_pass.get(ty)?;
        let framebuf = self.device.create_framebuffer(&FramebufferDesc {
            render_pass,
            attachments,
            width: self.width,
            height: self.height,
            // Multiview takes its views from the pass view mask
            layers: 1,
        })?;

        if !self.tag.is_empty() && self.device.debug_names_enabled() {
            self.device.name_object(DebugObject::Framebuffer(framebuf), &format!("fb_{}", self.tag));
        }

        self.framebufs[index] = Some(framebuf);
        Ok(framebuf)
    }

    /// Change the debug tag and rename every owned GPU object accordingly
    pub fn update_tag(&mut self, new_tag: &str) {
        self.tag = new_tag.to_string();
        self.color.set_tag(new_tag);
        if let Some(depth) = &mut self.depth {
            depth.set_tag(new_tag);
        }
        self.apply_names();
    }

    fn apply_names(&self) {
        if !self.device.debug_names_enabled() {
            return;
        }

        let color_name = format!("fb_color_{}", self.tag);
        self.device.name_object(DebugObject::Image(self.color.image()), &color_name);
        self.device.name_object(DebugObject::ImageView(self.color.rt_view()), &color_name);

        if let Some(depth) = &self.depth {
            let depth_name = format!("fb_depth_{}", self.tag);
            self.device.name_object(DebugObject::Image(depth.image()), &depth_name);
            self.device.name_object(DebugObject::ImageView(depth.rt_view()), &depth_name);
        }

        let framebuf_name = format!("fb_{}", self.tag);
        for framebuf in self.framebufs.iter().flatten() {
            self.device.name_object(DebugObject::Framebuffer(*framebuf), &framebuf_name);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_layers(&self) -> u32 {
        self.num_layers
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn color(&self) -> &RenderTargetImage {
        &self.color
    }

    pub fn color_mut(&mut self) -> &mut RenderTargetImage {
        &mut self.color
    }

    pub fn depth(&self) -> Option<&RenderTargetImage> {
        self.depth.as_ref()
    }

    pub fn depth_mut(&mut self) -> Option<&mut RenderTargetImage> {
        self.depth.as_mut()
    }

    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    /// Already built framebuffer object for `ty`, without building one
    pub fn cached(&self, ty: RenderPassType) -> Option<FramebufferHandle> {
        self.framebufs[ty.index()]
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        let queue = self.device.deletion_queue();

        self.color.queue_delete_rt_view(queue);
        if let Some(depth) = &mut self.depth {
            depth.queue_delete_rt_view(queue);
        }
        self.color.queue_delete_all_layers_view(queue);
        if let Some(depth) = &mut self.depth {
            depth.queue_delete_all_layers_view(queue);
        }
        for layer in 0..MAX_LAYERS as usize {
            self.color.queue_delete_layer_view(layer, queue);
            if let Some(depth) = &mut self.depth {
                depth.queue_delete_layer_view(layer, queue);
            }
        }

        self.color.queue_delete_image(queue);
        if let Some(depth) = &mut self.depth {
            depth.queue_delete_image(queue);
        }

        for framebuf in self.framebufs.iter_mut().filter_map(Option::take) {
            queue.queue_delete_framebuffer(framebuf);
        }

        strata_debug!("strata::Framebuffer", "Queued framebuffer '{}' for deletion", self.tag);
    }
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
