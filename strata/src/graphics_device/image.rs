/// Image formats, layouts, usage/aspect flags and image creation descriptors

use bitflags::bitflags;
use crate::graphics_device::{ImageHandle, PipelineStages, AccessFlags};

/// Pixel format of a render target image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    // Color formats
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,

    // Depth / depth-stencil formats
    D16_UNORM,
    D32_FLOAT,
    D16_UNORM_S8_UINT,
    D24_UNORM_S8_UINT,
    D32_FLOAT_S8_UINT,
}

impl TextureFormat {
    /// Returns true for formats with a depth component
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM
                | TextureFormat::D32_FLOAT
                | TextureFormat::D16_UNORM_S8_UINT
                | TextureFormat::D24_UNORM_S8_UINT
                | TextureFormat::D32_FLOAT_S8_UINT
        )
    }

    /// Returns true for formats with a stencil component
    pub fn has_stencil(self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM_S8_UINT
                | TextureFormat::D24_UNORM_S8_UINT
                | TextureFormat::D32_FLOAT_S8_UINT
        )
    }
}

/// Image layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageLayout {
    /// Undefined layout (initial state, contents discarded)
    Undefined,
    /// Any access; required when an attachment is written and read as input in one subpass
    General,
    /// Layout for color attachment
    ColorAttachment,
    /// Layout for depth/stencil attachment
    DepthStencilAttachment,
    /// Layout for shader read-only access
    ShaderReadOnly,
    /// Layout for transfer source
    TransferSrc,
    /// Layout for transfer destination
    TransferDst,
    /// Layout for presenting to swapchain
    PresentSrc,
}

/// View dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageViewType {
    Tex2D,
    Array2D,
}

bitflags! {
    /// What an image may be used for
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageUsage: u32 {
        const SAMPLED = 1 << 0;
        const TRANSFER_SRC = 1 << 1;
        const TRANSFER_DST = 1 << 2;
        const COLOR_ATTACHMENT = 1 << 3;
        const INPUT_ATTACHMENT = 1 << 4;
        const DEPTH_STENCIL_ATTACHMENT = 1 << 5;
    }
}

bitflags! {
    /// Which aspects of an image a view or barrier covers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageAspects: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Descriptor for creating a GPU-only 2D (array) image with its memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDesc {
    pub width: u32,
    pub height: u32,
    pub array_layers: u32,
    pub mip_levels: u32,
    /// Sample count (1 = no multisampling)
    pub samples: u32,
    pub format: TextureFormat,
    pub usage: ImageUsage,
    /// Allocation name (shows up in allocator reports)
    pub name: String,
}

/// Descriptor for creating an image view (mip 0, one level)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageViewDesc {
    pub image: ImageHandle,
    pub view_type: ImageViewType,
    pub format: TextureFormat,
    pub aspects: ImageAspects,
    pub base_array_layer: u32,
    pub layer_count: u32,
}

/// A single image memory barrier with its stage masks (mip 0, one level)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBarrier {
    pub image: ImageHandle,
    pub aspects: ImageAspects,
    pub base_array_layer: u32,
    pub layer_count: u32,
    pub old_layout: ImageLayout,
    pub new_layout: ImageLayout,
    pub src_stages: PipelineStages,
    pub dst_stages: PipelineStages,
    pub src_access: AccessFlags,
    pub dst_access: AccessFlags,
}
