/*!
# Strata

Render targets, render pass variants and framebuffer objects for an explicit
graphics API backend.

This crate is backend-agnostic: every native operation goes through the
[`GraphicsDevice`](graphics_device::GraphicsDevice) trait, implemented by
`strata_vulkan` for Vulkan.

## Architecture

- **RenderTargetImage**: one GPU image with its attachment view, an all-layers
  sampling view and per-layer sampling views (1 or 2 layers)
- **Framebuffer**: color + optional depth/stencil target, with one lazily built
  framebuffer object per render pass variant
- **RenderPassType**: closed set of 9 render pass variants
- **RenderPassCache**: lazily created render passes for one load/store key
- **DeletionQueue**: epoch-tagged deferred destruction of GPU objects
*/

mod error;
pub mod log;
pub mod config;
pub mod graphics_device;
pub mod deletion_queue;
pub mod render_pass;
pub mod framebuffer;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use config::Config;
pub use deletion_queue::{DeletionQueue, PendingDeletion};
pub use graphics_device::{GraphicsDevice, DebugObject};
pub use render_pass::{RenderPassType, RenderPassFacets, RenderPassKey, RenderPassCache, RenderPassDesc};
pub use framebuffer::{Framebuffer, RenderTargetImage};
