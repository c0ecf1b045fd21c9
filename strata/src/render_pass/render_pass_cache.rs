/// Per-key cache of render pass variants
///
/// A `RenderPassCache` is bound to one `RenderPassKey` and lazily creates the
/// native render pass for each `RenderPassType` the first time it is asked
/// for, then returns the same handle for the rest of its lifetime.

use std::sync::Arc;

use crate::error::Result;
use crate::strata_debug;
use crate::graphics_device::{GraphicsDevice, DebugObject, RenderPassHandle};
use crate::render_pass::{RenderPassDesc, RenderPassKey, RenderPassType};

pub struct RenderPassCache {
    device: Arc<dyn GraphicsDevice>,
    key: RenderPassKey,
    passes: [Option<RenderPassHandle>; RenderPassType::COUNT],
}

impl RenderPassCache {
    /// Create an empty cache; no native objects are created until `get`
    pub fn new(device: Arc<dyn GraphicsDevice>, key: RenderPassKey) -> Self {
        Self {
            device,
            key,
            passes: [None; RenderPassType::COUNT],
        }
    }

    pub fn key(&self) -> &RenderPassKey {
        &self.key
    }

    /// Render pass for variant `ty`, created on first request
    pub fn get(&mut self, ty: RenderPassType) -> Result<RenderPassHandle> {
        let index = ty.index();
        if let Some(pass) = self.passes[index] {
            return Ok(pass);
        }

        let desc = RenderPassDesc::build(
            &self.key,
            ty,
            self.device.swapchain_format(),
            self.device.preferred_depth_stencil_format(),
        );
        let pass = self.device.create_render_pass(&desc)?;

        if self.device.debug_names_enabled() {
            self.device.name_object(DebugObject::RenderPass(pass), &format!("rp_{}", ty.debug_name()));
        }
        strata_debug!("strata::RenderPassCache", "Created render pass {} ({} attachments)", ty, desc.attachments.len());

        self.passes[index] = Some(pass);
        Ok(pass)
    }

    /// Already created pass for `ty`, without creating one
    pub fn cached(&self, ty: RenderPassType) -> Option<RenderPassHandle> {
        self.passes[ty.index()]
    }

    /// Number of variants created so far
    pub fn len(&self) -> usize {
        self.passes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn device(&self) -> &Arc<dyn GraphicsDevice> {
        &self.device
    }
}

impl Drop for RenderPassCache {
    fn drop(&mut self) {
        let queue = self.device.deletion_queue();
        for pass in self.passes.iter_mut().filter_map(Option::take) {
            queue.queue_delete_render_pass(pass);
        }
    }
}

#[cfg(test)]
#[path = "render_pass_cache_tests.rs"]
mod tests;
