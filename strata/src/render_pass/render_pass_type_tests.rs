/// Unit tests for render_pass_type.rs

use super::*;

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_index_matches_facet_bits() {
    assert_eq!(RenderPassType::DEFAULT.index(), 0);
    assert_eq!(RenderPassType::from(RenderPassFacets::HAS_DEPTH).index(), 1);
    assert_eq!(RenderPassType::from(RenderPassFacets::COLOR_INPUT).index(), 2);
    assert_eq!(RenderPassType::from(RenderPassFacets::MULTIVIEW).index(), 4);
    assert_eq!(RenderPassType::from(RenderPassFacets::all()).index(), 7);
    assert_eq!(RenderPassType::Backbuffer.index(), 8);
}

#[test]
fn test_all_yields_nine_distinct_variants_in_order() {
    let all: Vec<RenderPassType> = RenderPassType::all().collect();
    assert_eq!(all.len(), RenderPassType::COUNT);
    for (i, ty) in all.iter().enumerate() {
        assert_eq!(ty.index(), i);
    }
    assert_eq!(all[8], RenderPassType::Backbuffer);
}

#[test]
fn test_from_bits_rejects_backbuffer_with_facets() {
    for bits in 9..16 {
        assert_eq!(RenderPassType::from_bits(bits), None, "bits {}", bits);
    }
    assert_eq!(RenderPassType::from_bits(8), Some(RenderPassType::Backbuffer));
}

#[test]
fn test_from_bits_rejects_out_of_range() {
    assert_eq!(RenderPassType::from_bits(16), None);
    assert_eq!(RenderPassType::from_bits(u32::MAX), None);
    assert_eq!(RenderPassType::from_index(9), None);
    assert_eq!(RenderPassType::from_index(usize::MAX), None);
}

#[test]
fn test_from_index_roundtrips_every_variant() {
    for ty in RenderPassType::all() {
        assert_eq!(RenderPassType::from_index(ty.index()), Some(ty));
    }
}

// ============================================================================
// Predicates
// ============================================================================

#[test]
fn test_backbuffer_has_depth_but_no_input_or_multiview() {
    let ty = RenderPassType::Backbuffer;
    assert!(ty.has_depth());
    assert!(!ty.has_self_input());
    assert!(!ty.is_multiview());
    assert!(ty.is_backbuffer());
}

#[test]
fn test_default_has_no_facets() {
    let ty = RenderPassType::DEFAULT;
    assert!(!ty.has_depth());
    assert!(!ty.has_self_input());
    assert!(!ty.is_multiview());
    assert!(!ty.is_backbuffer());
}

#[test]
fn test_predicates_follow_facets() {
    let ty = RenderPassType::offscreen(RenderPassFacets::COLOR_INPUT | RenderPassFacets::MULTIVIEW);
    assert!(!ty.has_depth());
    assert!(ty.has_self_input());
    assert!(ty.is_multiview());

    let ty = RenderPassType::offscreen(RenderPassFacets::HAS_DEPTH);
    assert!(ty.has_depth());
    assert!(!ty.has_self_input());
    assert!(!ty.is_multiview());
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_offscreen_unions_facets() {
    let a = RenderPassType::offscreen(RenderPassFacets::HAS_DEPTH);
    let b = RenderPassType::offscreen(RenderPassFacets::MULTIVIEW);
    assert_eq!(
        a.merge(b),
        Some(RenderPassType::offscreen(RenderPassFacets::HAS_DEPTH | RenderPassFacets::MULTIVIEW))
    );
}

#[test]
fn test_merge_backbuffer() {
    assert_eq!(RenderPassType::Backbuffer.merge(RenderPassType::Backbuffer), Some(RenderPassType::Backbuffer));
    assert_eq!(RenderPassType::Backbuffer.merge(RenderPassType::DEFAULT), None);
    assert_eq!(RenderPassType::DEFAULT.merge(RenderPassType::Backbuffer), None);
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_debug_names() {
    assert_eq!(RenderPassType::DEFAULT.debug_name(), "DEFAULT");
    assert_eq!(
        RenderPassType::offscreen(RenderPassFacets::HAS_DEPTH | RenderPassFacets::COLOR_INPUT).debug_name(),
        "HAS_DEPTH|COLOR_INPUT"
    );
    assert_eq!(RenderPassType::Backbuffer.to_string(), "BACKBUFFER");
}
