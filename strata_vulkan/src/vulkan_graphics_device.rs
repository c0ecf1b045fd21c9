/// VulkanGraphicsDevice - GraphicsDevice implementation on top of ash
///
/// Wraps a logical device created by the application together with its
/// gpu-allocator instance. Images are GPU-only allocations tracked in an
/// allocation table; every object handed out is destroyed only when its
/// deletion queue entry is drained by `collect_garbage` (or at drop).

use std::ffi::CString;
use std::sync::{Arc, Mutex, MutexGuard};
use std::sync::atomic::{AtomicU64, Ordering};

use ash::vk;
use ash::vk::Handle;
use gpu_allocator::MemoryLocation;
use gpu_allocator::vulkan::{Allocation, AllocationCreateDesc, AllocationScheme, Allocator};
use rustc_hash::FxHashMap;

use strata::{Config, Error, Result, strata_err, strata_error, strata_info, strata_warn, strata_debug};
use strata::deletion_queue::{DeletionQueue, PendingDeletion};
use strata::render_pass::RenderPassDesc;
use strata::graphics_device::{
    GraphicsDevice, DebugObject,
    ImageHandle, ImageViewHandle, AllocationHandle, RenderPassHandle,
    FramebufferHandle, CommandBufferHandle,
    TextureFormat, ImageDesc, ImageViewDesc, ImageBarrier, FramebufferDesc,
};

use crate::vulkan_conversions::{
    format_to_vk, image_layout_to_vk, image_usage_to_vk, image_aspects_to_vk,
    image_view_type_to_vk, sample_count_to_vk, pipeline_stages_to_vk, access_flags_to_vk,
};

/// Depth/stencil formats in order of preference
pub const DEPTH_STENCIL_CANDIDATES: [TextureFormat; 3] = [
    TextureFormat::D24_UNORM_S8_UINT,
    TextureFormat::D32_FLOAT_S8_UINT,
    TextureFormat::D16_UNORM_S8_UINT,
];

pub struct VulkanGraphicsDevice {
    /// Vulkan logical device (owned by the application)
    device: ash::Device,
    /// GPU memory allocator shared with the application
    allocator: Arc<Mutex<Allocator>>,
    /// Object naming loader, present when debug names are enabled
    debug_utils: Option<ash::ext::debug_utils::Device>,
    swapchain_format: TextureFormat,
    depth_stencil_format: TextureFormat,
    allocations: Mutex<FxHashMap<AllocationHandle, Allocation>>,
    next_allocation: AtomicU64,
    deletion_queue: DeletionQueue,
}

impl VulkanGraphicsDevice {
    /// Wrap an existing device
    ///
    /// # Arguments
    ///
    /// * `instance` - Instance the device was created from
    /// * `physical_device` - Physical device, queried for depth format support
    /// * `device` - Logical device
    /// * `allocator` - Allocator created for `device`
    /// * `swapchain_format` - Format of the swapchain images
    /// * `config` - Frames in flight and debug naming
    pub fn new(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        device: ash::Device,
        allocator: Arc<Mutex<Allocator>>,
        swapchain_format: TextureFormat,
        config: &Config,
    ) -> Result<Self> {
        let depth_stencil_format = Self::select_depth_stencil_format(instance, physical_device)?;

        let debug_utils = config.enable_debug_names
            .then(|| ash::ext::debug_utils::Device::new(instance, &device));

        strata_info!(
            "strata::vulkan",
            "Vulkan graphics device ready (depth/stencil: {:?}, swapchain: {:?}, frames in flight: {})",
            depth_stencil_format, swapchain_format, config.frames_in_flight
        );

        Ok(Self {
            device,
            allocator,
            debug_utils,
            swapchain_format,
            depth_stencil_format,
            allocations: Mutex::new(FxHashMap::default()),
            next_allocation: AtomicU64::new(1),
            deletion_queue: DeletionQueue::new(config.frames_in_flight),
        })
    }

    fn select_depth_stencil_format(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
    ) -> Result<TextureFormat> {
        for format in DEPTH_STENCIL_CANDIDATES {
            let properties = unsafe {
                instance.get_physical_device_format_properties(physical_device, format_to_vk(format))
            };
            if properties.optimal_tiling_features.contains(vk::FormatFeatureFlags::DEPTH_STENCIL_ATTACHMENT) {
                return Ok(format);
            }
        }

        strata_error!("strata::vulkan", "No supported depth/stencil attachment format");
        Err(Error::InitializationFailed("No supported depth/stencil attachment format".to_string()))
    }

    pub fn device(&self) -> &ash::Device {
        &self.device
    }

    /// Start tagging deferred deletions with `epoch`
    pub fn begin_frame(&self, epoch: u64) {
        self.deletion_queue.begin_epoch(epoch);
    }

    /// Destroy every queued object the GPU is done with
    ///
    /// `completed_epoch` is the most recent epoch whose GPU work is known to
    /// have finished.
    pub fn collect_garbage(&self, completed_epoch: u64) {
        let entries = self.deletion_queue.drain_completed(completed_epoch);
        if !entries.is_empty() {
            strata_debug!("strata::vulkan", "Destroying {} deferred objects (epoch {})", entries.len(), completed_epoch);
        }
        self.destroy_entries(entries);
    }

    fn allocations(&self) -> MutexGuard<'_, FxHashMap<AllocationHandle, Allocation>> {
        self.allocations.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn destroy_entries(&self, entries: Vec<PendingDeletion>) {
        for entry in entries {
            unsafe {
                match entry {
                    PendingDeletion::ImageView(view) => {
                        self.device.destroy_image_view(vk::ImageView::from_raw(view.as_raw()), None);
                    }
                    PendingDeletion::ImageAllocation(image, allocation) => {
                        self.device.destroy_image(vk::Image::from_raw(image.as_raw()), None);
                        self.free_allocation(allocation);
                    }
                    PendingDeletion::Framebuffer(framebuffer) => {
                        self.device.destroy_framebuffer(vk::Framebuffer::from_raw(framebuffer.as_raw()), None);
                    }
                    PendingDeletion::RenderPass(render_pass) => {
                        self.device.destroy_render_pass(vk::RenderPass::from_raw(render_pass.as_raw()), None);
                    }
                }
            }
        }
    }

    fn free_allocation(&self, handle: AllocationHandle) {
        let Some(allocation) = self.allocations().remove(&handle) else {
            strata_warn!("strata::vulkan", "Unknown allocation {:?} in deletion queue", handle);
            return;
        };
        let mut allocator = self.allocator.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = allocator.free(allocation) {
            strata_error!("strata::vulkan", "Failed to free image allocation: {:?}", e);
        }
    }

    fn register_allocation(&self, allocation: Allocation) -> AllocationHandle {
        let handle = AllocationHandle::from_raw(self.next_allocation.fetch_add(1, Ordering::Relaxed));
        self.allocations().insert(handle, allocation);
        handle
    }

    fn set_object_name<H: Handle>(&self, debug_utils: &ash::ext::debug_utils::Device, handle: H, name: &str) {
        let Ok(name) = CString::new(name) else {
            strata_warn!("strata::vulkan", "Debug name {:?} contains a NUL byte", name);
            return;
        };
        let name_info = vk::DebugUtilsObjectNameInfoEXT::default()
            .object_handle(handle)
            .object_name(&name);
        unsafe {
            if let Err(e) = debug_utils.set_debug_utils_object_name(&name_info) {
                strata_warn!("strata::vulkan", "Failed to set debug name {:?}: {:?}", name, e);
            }
        }
    }
}

impl GraphicsDevice for VulkanGraphicsDevice {
    fn preferred_depth_stencil_format(&self) -> TextureFormat {
        self.depth_stencil_format
    }

    fn swapchain_format(&self) -> TextureFormat {
        self.swapchain_format
    }

    fn debug_names_enabled(&self) -> bool {
        self.debug_utils.is_some()
    }

    fn set_debug_name(&self, object: DebugObject, name: &str) {
        let Some(debug_utils) = &self.debug_utils else {
            return;
        };
        match object {
            DebugObject::Image(h) => self.set_object_name(debug_utils, vk::Image::from_raw(h.as_raw()), name),
            DebugObject::ImageView(h) => self.set_object_name(debug_utils, vk::ImageView::from_raw(h.as_raw()), name),
            DebugObject::RenderPass(h) => self.set_object_name(debug_utils, vk::RenderPass::from_raw(h.as_raw()), name),
            DebugObject::Framebuffer(h) => self.set_object_name(debug_utils, vk::Framebuffer::from_raw(h.as_raw()), name),
        }
    }

    fn deletion_queue(&self) -> &DeletionQueue {
        &self.deletion_queue
    }

    fn create_image(&self, desc: &ImageDesc) -> Result<(ImageHandle, AllocationHandle)> {
        unsafe {
            let image_create_info = vk::ImageCreateInfo::default()
                .image_type(vk::ImageType::TYPE_2D)
                .format(format_to_vk(desc.format))
                .extent(vk::Extent3D {
                    width: desc.width,
                    height: desc.height,
                    depth: 1,
                })
                .mip_levels(desc.mip_levels)
                .array_layers(desc.array_layers)
                .samples(sample_count_to_vk(desc.samples))
                .tiling(vk::ImageTiling::OPTIMAL)
                .usage(image_usage_to_vk(desc.usage))
                .sharing_mode(vk::SharingMode::EXCLUSIVE)
                .initial_layout(vk::ImageLayout::UNDEFINED);

            let image = self.device.create_image(&image_create_info, None)
                .map_err(|e| strata_err!("strata::vulkan", "Failed to create image '{}': {:?}", desc.name, e))?;

            let requirements = self.device.get_image_memory_requirements(image);

            let allocated = self.allocator.lock()
                .map_err(|_| strata_err!("strata::vulkan", "Allocator lock poisoned"))
                .and_then(|mut allocator| {
                    allocator.allocate(&AllocationCreateDesc {
                        name: &desc.name,
                        requirements,
                        location: MemoryLocation::GpuOnly,
                        linear: false,
                        allocation_scheme: AllocationScheme::GpuAllocatorManaged,
                    })
                    .map_err(|_e| {
                        let size_mb = requirements.size as f64 / (1024.0 * 1024.0);
                        strata_error!(
                            "strata::vulkan",
                            "Out of GPU memory for image '{}' ({}x{}, layers: {}, {:.2} MB)",
                            desc.name, desc.width, desc.height, desc.array_layers, size_mb
                        );
                        Error::OutOfMemory
                    })
                });
            let allocation = match allocated {
                Ok(allocation) => allocation,
                Err(err) => {
                    self.device.destroy_image(image, None);
                    return Err(err);
                }
            };

            if let Err(e) = self.device.bind_image_memory(image, allocation.memory(), allocation.offset()) {
                self.device.destroy_image(image, None);
                let mut allocator = self.allocator.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                allocator.free(allocation).ok();
                return Err(strata_err!("strata::vulkan", "Failed to bind image memory for '{}': {:?}", desc.name, e));
            }

            let allocation = self.register_allocation(allocation);
            Ok((ImageHandle::from_raw(image.as_raw()), allocation))
        }
    }

    fn create_image_view(&self, desc: &ImageViewDesc) -> Result<ImageViewHandle> {
        let view_create_info = vk::ImageViewCreateInfo::default()
            .image(vk::Image::from_raw(desc.image.as_raw()))
            .view_type(image_view_type_to_vk(desc.view_type))
            .format(format_to_vk(desc.format))
            .components(vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            })
            .subresource_range(vk::ImageSubresourceRange {
                aspect_mask: image_aspects_to_vk(desc.aspects),
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: desc.base_array_layer,
                layer_count: desc.layer_count,
            });

        let view = unsafe { self.device.create_image_view(&view_create_info, None) }
            .map_err(|e| strata_err!("strata::vulkan", "Failed to create image view: {:?}", e))?;

        Ok(ImageViewHandle::from_raw(view.as_raw()))
    }

    fn create_render_pass(&self, desc: &RenderPassDesc) -> Result<RenderPassHandle> {
        let render_pass = unsafe { crate::vulkan_render_pass::create_render_pass(&self.device, desc)? };
        Ok(RenderPassHandle::from_raw(render_pass.as_raw()))
    }

    fn create_framebuffer(&self, desc: &FramebufferDesc) -> Result<FramebufferHandle> {
        let attachments: Vec<vk::ImageView> = desc.attachments.iter()
            .map(|view| vk::ImageView::from_raw(view.as_raw()))
            .collect();

        let framebuffer_info = vk::FramebufferCreateInfo::default()
            .render_pass(vk::RenderPass::from_raw(desc.render_pass.as_raw()))
            .attachments(&attachments)
            .width(desc.width)
            .height(desc.height)
            .layers(desc.layers);

        let framebuffer = unsafe { self.device.create_framebuffer(&framebuffer_info, None) }
            .map_err(|e| strata_err!("strata::vulkan", "Failed to create framebuffer: {:?}", e))?;

        Ok(FramebufferHandle::from_raw(framebuffer.as_raw()))
    }

    fn cmd_image_barrier(&self, cmd: CommandBufferHandle, barrier: &ImageBarrier) {
        let image_barrier = vk::ImageMemoryBarrier::default()
            .old_layout(image_layout_to_vk(barrier.old_layout))
            .new_layout(image_layout_to_vk(barrier.new_layout))
            .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .image(vk::Image::from_raw(barrier.image.as_raw()))
            .subresource_range(vk::ImageSubresourceRange {
                aspect_mask: image_aspects_to_vk(barrier.aspects),
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: barrier.base_array_layer,
                layer_count: barrier.layer_count,
            })
            .src_access_mask(access_flags_to_vk(barrier.src_access))
            .dst_access_mask(access_flags_to_vk(barrier.dst_access));

        unsafe {
            self.device.cmd_pipeline_barrier(
                vk::CommandBuffer::from_raw(cmd.as_raw()),
                pipeline_stages_to_vk(barrier.src_stages),
                pipeline_stages_to_vk(barrier.dst_stages),
                vk::DependencyFlags::empty(),
                &[],
                &[],
                &[image_barrier],
            );
        }
    }
}

impl Drop for VulkanGraphicsDevice {
    fn drop(&mut self) {
        unsafe {
            self.device.device_wait_idle().ok();
        }

        let entries = self.deletion_queue.drain_all();
        self.destroy_entries(entries);

        let leaked = self.allocations().len();
        if leaked > 0 {
            strata_warn!("strata::vulkan", "{} image allocations still live at shutdown", leaked);
        }
    }
}
