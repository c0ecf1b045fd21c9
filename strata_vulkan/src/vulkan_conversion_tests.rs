//! Unit tests for Vulkan conversion functions
//!
//! Pure mappings from Strata types to Vulkan types, no GPU required.

use super::*;

// ============================================================================
// FORMATS
// ============================================================================

#[test]
fn test_color_formats_to_vk() {
    assert_eq!(format_to_vk(TextureFormat::R8G8B8A8_UNORM), vk::Format::R8G8B8A8_UNORM);
    assert_eq!(format_to_vk(TextureFormat::R8G8B8A8_SRGB), vk::Format::R8G8B8A8_SRGB);
    assert_eq!(format_to_vk(TextureFormat::B8G8R8A8_UNORM), vk::Format::B8G8R8A8_UNORM);
    assert_eq!(format_to_vk(TextureFormat::B8G8R8A8_SRGB), vk::Format::B8G8R8A8_SRGB);
}

#[test]
fn test_depth_formats_to_vk() {
    assert_eq!(format_to_vk(TextureFormat::D16_UNORM), vk::Format::D16_UNORM);
    assert_eq!(format_to_vk(TextureFormat::D32_FLOAT), vk::Format::D32_SFLOAT);
    assert_eq!(format_to_vk(TextureFormat::D16_UNORM_S8_UINT), vk::Format::D16_UNORM_S8_UINT);
    assert_eq!(format_to_vk(TextureFormat::D24_UNORM_S8_UINT), vk::Format::D24_UNORM_S8_UINT);
    assert_eq!(format_to_vk(TextureFormat::D32_FLOAT_S8_UINT), vk::Format::D32_SFLOAT_S8_UINT);
}

// ============================================================================
// LAYOUTS AND OPS
// ============================================================================

#[test]
fn test_image_layouts_to_vk() {
    assert_eq!(image_layout_to_vk(ImageLayout::Undefined), vk::ImageLayout::UNDEFINED);
    assert_eq!(image_layout_to_vk(ImageLayout::General), vk::ImageLayout::GENERAL);
    assert_eq!(image_layout_to_vk(ImageLayout::ColorAttachment), vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL);
    assert_eq!(
        image_layout_to_vk(ImageLayout::DepthStencilAttachment),
        vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL
    );
    assert_eq!(image_layout_to_vk(ImageLayout::PresentSrc), vk::ImageLayout::PRESENT_SRC_KHR);
}

#[test]
fn test_load_store_ops_to_vk() {
    assert_eq!(load_op_to_vk(LoadOp::Load), vk::AttachmentLoadOp::LOAD);
    assert_eq!(load_op_to_vk(LoadOp::Clear), vk::AttachmentLoadOp::CLEAR);
    assert_eq!(load_op_to_vk(LoadOp::DontCare), vk::AttachmentLoadOp::DONT_CARE);
    assert_eq!(store_op_to_vk(StoreOp::Store), vk::AttachmentStoreOp::STORE);
    assert_eq!(store_op_to_vk(StoreOp::DontCare), vk::AttachmentStoreOp::DONT_CARE);
}

#[test]
fn test_sample_count_to_vk() {
    assert_eq!(sample_count_to_vk(1), vk::SampleCountFlags::TYPE_1);
    assert_eq!(sample_count_to_vk(4), vk::SampleCountFlags::TYPE_4);
    assert_eq!(sample_count_to_vk(3), vk::SampleCountFlags::TYPE_1);
}

// ============================================================================
// FLAGS
// ============================================================================

#[test]
fn test_render_target_usage_to_vk() {
    let usage = ImageUsage::SAMPLED | ImageUsage::TRANSFER_SRC | ImageUsage::TRANSFER_DST
        | ImageUsage::COLOR_ATTACHMENT | ImageUsage::INPUT_ATTACHMENT;
    assert_eq!(
        image_usage_to_vk(usage),
        vk::ImageUsageFlags::SAMPLED | vk::ImageUsageFlags::TRANSFER_SRC | vk::ImageUsageFlags::TRANSFER_DST
            | vk::ImageUsageFlags::COLOR_ATTACHMENT | vk::ImageUsageFlags::INPUT_ATTACHMENT
    );
    assert_eq!(
        image_usage_to_vk(ImageUsage::DEPTH_STENCIL_ATTACHMENT),
        vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT
    );
}

#[test]
fn test_aspects_to_vk() {
    assert_eq!(image_aspects_to_vk(ImageAspects::COLOR), vk::ImageAspectFlags::COLOR);
    assert_eq!(
        image_aspects_to_vk(ImageAspects::DEPTH | ImageAspects::STENCIL),
        vk::ImageAspectFlags::DEPTH | vk::ImageAspectFlags::STENCIL
    );
}

#[test]
fn test_view_types_to_vk() {
    assert_eq!(image_view_type_to_vk(ImageViewType::Tex2D), vk::ImageViewType::TYPE_2D);
    assert_eq!(image_view_type_to_vk(ImageViewType::Array2D), vk::ImageViewType::TYPE_2D_ARRAY);
}

#[test]
fn test_stages_and_access_to_vk() {
    assert_eq!(pipeline_stages_to_vk(PipelineStages::empty()), vk::PipelineStageFlags::empty());
    assert_eq!(
        pipeline_stages_to_vk(PipelineStages::EARLY_FRAGMENT_TESTS | PipelineStages::LATE_FRAGMENT_TESTS),
        vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS | vk::PipelineStageFlags::LATE_FRAGMENT_TESTS
    );
    assert_eq!(
        access_flags_to_vk(AccessFlags::COLOR_ATTACHMENT_READ | AccessFlags::COLOR_ATTACHMENT_WRITE),
        vk::AccessFlags::COLOR_ATTACHMENT_READ | vk::AccessFlags::COLOR_ATTACHMENT_WRITE
    );
    assert_eq!(access_flags_to_vk(AccessFlags::INPUT_ATTACHMENT_READ), vk::AccessFlags::INPUT_ATTACHMENT_READ);
}

#[test]
fn test_subpass_index_to_vk() {
    assert_eq!(subpass_index_to_vk(SubpassIndex::External), vk::SUBPASS_EXTERNAL);
    assert_eq!(subpass_index_to_vk(SubpassIndex::Index(0)), 0);
}
