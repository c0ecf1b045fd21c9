/*!
# Strata - Vulkan Backend

Vulkan implementation of the Strata `GraphicsDevice` trait.

This crate uses the Ash library for Vulkan bindings and gpu-allocator for
memory management. Instance/device bring-up stays with the application: the
backend wraps an existing logical device and allocator.

```no_run
# fn wrap(instance: &ash::Instance, physical_device: ash::vk::PhysicalDevice, device: ash::Device,
#         allocator: std::sync::Arc<std::sync::Mutex<gpu_allocator::vulkan::Allocator>>) -> strata::Result<()> {
use std::sync::Arc;
use strata::Config;
use strata::graphics_device::TextureFormat;
use strata_vulkan::VulkanGraphicsDevice;

let device = Arc::new(VulkanGraphicsDevice::new(
    instance, physical_device, device, allocator,
    TextureFormat::B8G8R8A8_SRGB, &Config::default(),
)?);
# Ok(())
# }
```
*/

mod vulkan_conversions;
mod vulkan_render_pass;
mod vulkan_graphics_device;

pub use vulkan_graphics_device::{VulkanGraphicsDevice, DEPTH_STENCIL_CANDIDATES};
