/// Render target image - one GPU image with its attachment and sampling views
///
/// Each image carries:
/// - a primary view used as the render pass attachment (2D for one layer,
///   2D array for two; color or depth+stencil aspects)
/// - an all-layers view for sampling (always a 2D array; depth aspect only)
/// - one single-layer view per layer for sampling one eye at a time
///
/// Images are created by their owning `Framebuffer`, which also drives their
/// deferred deletion.

use crate::error::Result;
use crate::{strata_bail, strata_error};
use crate::deletion_queue::DeletionQueue;
use crate::graphics_device::{
    GraphicsDevice, DebugObject,
    ImageHandle, ImageViewHandle, AllocationHandle, CommandBufferHandle,
    TextureFormat, ImageLayout, ImageUsage, ImageAspects, ImageViewType,
    ImageDesc, ImageViewDesc, ImageBarrier, PipelineStages, AccessFlags,
};

/// Maximum number of layers (stereo)
pub const MAX_LAYERS: u32 = 2;

pub struct RenderTargetImage {
    image: ImageHandle,
    alloc: AllocationHandle,
    rt_view: ImageViewHandle,
    tex_all_layers_view: ImageViewHandle,
    tex_layer_views: [ImageViewHandle; MAX_LAYERS as usize],
    format: TextureFormat,
    layout: ImageLayout,
    num_layers: u32,
    tag: String,
}

// ===== CREATION =====

impl RenderTargetImage {
    /// Create the image, its views, and record the transition to `initial_layout` into `cmd`
    ///
    /// `initial_layout` must be color-attachment, depth-stencil-attachment or
    /// transfer-dst optimal; anything else is a programming error and panics.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        device: &dyn GraphicsDevice,
        cmd: CommandBufferHandle,
        width: u32,
        height: u32,
        num_layers: u32,
        format: TextureFormat,
        initial_layout: ImageLayout,
        is_color: bool,
        tag: &str,
    ) -> Result<Self> {
        if num_layers == 0 || num_layers > MAX_LAYERS {
            strata_bail!(
                "strata::RenderTargetImage",
                "Render target '{}' has {} layers, expected 1 or {}",
                tag, num_layers, MAX_LAYERS
            );
        }

        let usage = ImageUsage::SAMPLED
            | ImageUsage::TRANSFER_SRC
            | ImageUsage::TRANSFER_DST
            | if is_color {
                ImageUsage::COLOR_ATTACHMENT | ImageUsage::INPUT_ATTACHMENT
            } else {
                ImageUsage::DEPTH_STENCIL_ATTACHMENT
            };

        let (image, alloc) = device.create_image(&ImageDesc {
            width,
            height,
            array_layers: num_layers,
            mip_levels: 1,
            samples: 1,
            format,
            usage,
            name: if is_color { format!("fb_color_{}", tag) } else { format!("fb_depth_{}", tag) },
        })?;

        let mut target = Self {
            image,
            alloc,
            rt_view: ImageViewHandle::null(),
            tex_all_layers_view: ImageViewHandle::null(),
            tex_layer_views: [ImageViewHandle::null(); MAX_LAYERS as usize],
            format,
            layout: initial_layout,
            num_layers,
            tag: tag.to_string(),
        };

        if let Err(err) = target.create_views(device, is_color) {
            target.queue_delete(device.deletion_queue());
            return Err(err);
        }

        target.name_views(device);
        target.record_initial_transition(device, cmd, initial_layout);

        Ok(target)
    }

    fn attachment_aspects(&self, is_color: bool) -> ImageAspects {
        if is_color {
            ImageAspects::COLOR
        } else if self.format.has_stencil() {
            ImageAspects::DEPTH | ImageAspects::STENCIL
        } else {
            ImageAspects::DEPTH
        }
    }

    fn create_views(&mut self, device: &dyn GraphicsDevice, is_color: bool) -> Result<()> {
        let attachment_aspects = self.attachment_aspects(is_color);
        // Samplers read depth only
        let sampling_aspects = if is_color { ImageAspects::COLOR } else { ImageAspects::DEPTH };

        self.rt_view = device.create_image_view(&ImageViewDesc {
            image: self.image,
            view_type: if self.num_layers == 1 { ImageViewType::Tex2D } else { ImageViewType::Array2D },
            format: self.format,
            aspects: attachment_aspects,
            base_array_layer: 0,
            layer_count: self.num_layers,
        })?;

        self.tex_all_layers_view = device.create_image_view(&ImageViewDesc {
            image: self.image,
            view_type: ImageViewType::Array2D,
            format: self.format,
            aspects: sampling_aspects,
            base_array_layer: 0,
            layer_count: self.num_layers,
        })?;

        for layer in 0..self.num_layers {
            self.tex_layer_views[layer as usize] = device.create_image_view(&ImageViewDesc {
                image: self.image,
                view_type: ImageViewType::Tex2D,
                format: self.format,
                aspects: sampling_aspects,
                base_array_layer: layer,
                layer_count: 1,
            })?;
        }

        Ok(())
    }

    fn name_views(&self, device: &dyn GraphicsDevice) {
        if !device.debug_names_enabled() {
            return;
        }
        device.name_object(DebugObject::ImageView(self.rt_view), &self.tag);
        device.name_object(DebugObject::ImageView(self.tex_all_layers_view), &self.tag);
        for (layer, view) in self.layer_views().iter().enumerate() {
            device.name_object(DebugObject::ImageView(*view), &format!("{}_layer{}", self.tag, layer));
        }
    }

    fn record_initial_transition(&self, device: &dyn GraphicsDevice, cmd: CommandBufferHandle, layout: ImageLayout) {
        let (dst_stages, dst_access, is_color) = match layout {
            ImageLayout::ColorAttachment => (
                PipelineStages::COLOR_ATTACHMENT_OUTPUT,
                AccessFlags::COLOR_ATTACHMENT_WRITE,
                true,
            ),
            ImageLayout::TransferDst => (
                PipelineStages::TRANSFER,
                AccessFlags::TRANSFER_WRITE,
                !self.format.is_depth(),
            ),
            ImageLayout::DepthStencilAttachment => (
                PipelineStages::EARLY_FRAGMENT_TESTS | PipelineStages::LATE_FRAGMENT_TESTS,
                AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE,
                false,
            ),
            other => {
                strata_error!(
                    "strata::RenderTargetImage",
                    "Unsupported initial layout {:?} for render target '{}'",
                    other, self.tag
                );
                panic!("Unsupported initial layout {:?} for render target '{}'", other, self.tag);
            }
        };

        device.cmd_image_barrier(cmd, &ImageBarrier {
            image: self.image,
            aspects: self.attachment_aspects(is_color),
            base_array_layer: 0,
            layer_count: self.num_layers,
            old_layout: ImageLayout::Undefined,
            new_layout: layout,
            src_stages: PipelineStages::TOP_OF_PIPE,
            dst_stages,
            src_access: AccessFlags::empty(),
            dst_access,
        });
    }
}

// ===== ACCESSORS =====

impl RenderTargetImage {
    pub fn image(&self) -> ImageHandle {
        self.image
    }

    pub fn allocation(&self) -> AllocationHandle {
        self.alloc
    }

    /// Attachment view used when building framebuffer objects
    pub fn rt_view(&self) -> ImageViewHandle {
        self.rt_view
    }

    /// 2D array view over every layer, for sampling
    pub fn tex_all_layers_view(&self) -> ImageViewHandle {
        self.tex_all_layers_view
    }

    /// Single-layer sampling view; null for layers past `num_layers`
    pub fn tex_layer_view(&self, layer: u32) -> ImageViewHandle {
        self.tex_layer_views.get(layer as usize).copied().unwrap_or_default()
    }

    /// Populated single-layer views, one per layer
    pub fn layer_views(&self) -> &[ImageViewHandle] {
        &self.tex_layer_views[..self.num_layers as usize]
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Last layout recorded by the execution layer
    pub fn layout(&self) -> ImageLayout {
        self.layout
    }

    /// Record the layout the image was left in by submitted commands
    pub fn set_layout(&mut self, layout: ImageLayout) {
        self.layout = layout;
    }

    pub fn num_layers(&self) -> u32 {
        self.num_layers
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn set_tag(&mut self, tag: &str) {
        self.tag = tag.to_string();
    }
}

// ===== DEFERRED DELETION =====

fn take_view(slot: &mut ImageViewHandle) -> Option<ImageViewHandle> {
    let view = std::mem::take(slot);
    (!view.is_null()).then_some(view)
}

impl RenderTargetImage {
    pub(crate) fn queue_delete_rt_view(&mut self, queue: &DeletionQueue) {
        if let Some(view) = take_view(&mut self.rt_view) {
            queue.queue_delete_image_view(view);
        }
    }

    pub(crate) fn queue_delete_all_layers_view(&mut self, queue: &DeletionQueue) {
        if let Some(view) = take_view(&mut self.tex_all_layers_view) {
            queue.queue_delete_image_view(view);
        }
    }

    pub(crate) fn queue_delete_layer_view(&mut self, layer: usize, queue: &DeletionQueue) {
        if let Some(view) = self.tex_layer_views.get_mut(layer).and_then(take_view) {
            queue.queue_delete_image_view(view);
        }
    }

    pub(crate) fn queue_delete_image(&mut self, queue: &DeletionQueue) {
        let image = std::mem::take(&mut self.image);
        let alloc = std::mem::take(&mut self.alloc);
        if !image.is_null() {
            queue.queue_delete_image_allocation(image, alloc);
        }
    }

    /// Enqueue every remaining handle of this image, views first
    pub(crate) fn queue_delete(&mut self, queue: &DeletionQueue) {
        self.queue_delete_rt_view(queue);
        self.queue_delete_all_layers_view(queue);
        for layer in 0..MAX_LAYERS as usize {
            self.queue_delete_layer_view(layer, queue);
        }
        self.queue_delete_image(queue);
    }
}

#[cfg(test)]
#[path = "render_target_image_tests.rs"]
mod tests;
