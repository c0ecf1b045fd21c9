//! Native render pass creation from a `RenderPassDesc`

use ash::vk;
use strata::{Result, strata_err};
use strata::render_pass::{RenderPassDesc, AttachmentRef};

use crate::vulkan_conversions::{
    format_to_vk, image_layout_to_vk, load_op_to_vk, store_op_to_vk, sample_count_to_vk,
    pipeline_stages_to_vk, access_flags_to_vk, subpass_index_to_vk,
};

fn attachment_ref_to_vk(reference: &AttachmentRef) -> vk::AttachmentReference {
    vk::AttachmentReference::default()
        .attachment(reference.attachment)
        .layout(image_layout_to_vk(reference.layout))
}

/// Create a `vk::RenderPass` (single graphics subpass, optional multiview chain)
///
/// # Safety
///
/// `device` must be a valid logical device; multiview descriptions require
/// the multiview feature to be enabled on it.
pub(crate) unsafe fn create_render_pass(device: &ash::Device, desc: &RenderPassDesc) -> Result<vk::RenderPass> {
    let attachments: Vec<vk::AttachmentDescription> = desc.attachments.iter()
        .map(|attachment| {
            vk::AttachmentDescription::default()
                .format(format_to_vk(attachment.format))
                .samples(sample_count_to_vk(attachment.samples))
                .load_op(load_op_to_vk(attachment.load_op))
                .store_op(store_op_to_vk(attachment.store_op))
                .stencil_load_op(load_op_to_vk(attachment.stencil_load_op))
                .stencil_store_op(store_op_to_vk(attachment.stencil_store_op))
                .initial_layout(image_layout_to_vk(attachment.initial_layout))
                .final_layout(image_layout_to_vk(attachment.final_layout))
        })
        .collect();

    let color_refs: Vec<vk::AttachmentReference> =
        desc.subpass.color_attachments.iter().map(attachment_ref_to_vk).collect();
    let input_refs: Vec<vk::AttachmentReference> =
        desc.subpass.input_attachments.iter().map(attachment_ref_to_vk).collect();
    let depth_ref = desc.subpass.depth_stencil_attachment.as_ref().map(attachment_ref_to_vk);

    let mut subpass = vk::SubpassDescription::default()
        .pipeline_bind_point(vk::PipelineBindPoint::GRAPHICS)
        .color_attachments(&color_refs)
        .input_attachments(&input_refs);
    if let Some(ref depth_ref) = depth_ref {
        subpass = subpass.depth_stencil_attachment(depth_ref);
    }

    let dependencies: Vec<vk::SubpassDependency> = desc.dependencies.iter()
        .map(|dependency| {
            vk::SubpassDependency::default()
                .src_subpass(subpass_index_to_vk(dependency.src_subpass))
                .dst_subpass(subpass_index_to_vk(dependency.dst_subpass))
                .src_stage_mask(pipeline_stages_to_vk(dependency.src_stages))
                .dst_stage_mask(pipeline_stages_to_vk(dependency.dst_stages))
                .src_access_mask(access_flags_to_vk(dependency.src_access))
                .dst_access_mask(access_flags_to_vk(dependency.dst_access))
                .dependency_flags(if dependency.by_region {
                    vk::DependencyFlags::BY_REGION
                } else {
                    vk::DependencyFlags::empty()
                })
        })
        .collect();

    let mut multiview = desc.multiview.as_ref().map(|multiview| {
        let info = vk::RenderPassMultiviewCreateInfo::default()
            .view_masks(&multiview.view_masks)
            .correlation_masks(&multiview.correlation_masks);
        // View offsets must be absent or match the dependency count
        if multiview.view_offsets.len() == dependencies.len() {
            info.view_offsets(&multiview.view_offsets)
        } else {
            info
        }
    });

    let mut render_pass_info = vk::RenderPassCreateInfo::default()
        .attachments(&attachments)
        .subpasses(std::slice::from_ref(&subpass))
        .dependencies(&dependencies);
    if let Some(multiview) = multiview.as_mut() {
        render_pass_info = render_pass_info.push_next(multiview);
    }

    device.create_render_pass(&render_pass_info, None)
        .map_err(|e| strata_err!("strata::vulkan", "Failed to create render pass: {:?}", e))
}
