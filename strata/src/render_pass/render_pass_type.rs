/// Render pass variant tags
///
/// A render target is written under different situations (with or without
/// depth, reading its own color as an input attachment, rendering both eyes
/// with multiview, or presenting to the swapchain). Each situation needs its
/// own render pass object, so the variants form a small closed set that
/// indexes the per-target caches.

use std::fmt;
use bitflags::bitflags;

bitflags! {
    /// Independent properties of an offscreen render pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderPassFacets: u32 {
        /// Depth/stencil attachment present
        const HAS_DEPTH = 1 << 0;
        /// Color attachment is also read as an input attachment in the same subpass
        const COLOR_INPUT = 1 << 1;
        /// Two views rendered at once (view mask 0b11)
        const MULTIVIEW = 1 << 2;
    }
}

/// Render pass variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPassType {
    /// Offscreen pass with any combination of facets
    Offscreen(RenderPassFacets),
    /// Swapchain-backed pass: implicitly has depth, never self-input or multiview
    Backbuffer,
}

const BACKBUFFER_BITS: u32 = 8;

const DEBUG_NAMES: [&str; RenderPassType::COUNT] = [
    "DEFAULT",
    "HAS_DEPTH",
    "COLOR_INPUT",
    "HAS_DEPTH|COLOR_INPUT",
    "MULTIVIEW",
    "HAS_DEPTH|MULTIVIEW",
    "COLOR_INPUT|MULTIVIEW",
    "HAS_DEPTH|COLOR_INPUT|MULTIVIEW",
    "BACKBUFFER",
];

impl RenderPassType {
    /// Plain color-only offscreen pass
    pub const DEFAULT: Self = RenderPassType::Offscreen(RenderPassFacets::empty());

    /// Number of distinct variants (8 facet combinations + backbuffer)
    pub const COUNT: usize = 9;

    pub const fn offscreen(facets: RenderPassFacets) -> Self {
        RenderPassType::Offscreen(facets)
    }

    /// Raw bit encoding: facet bits for offscreen passes, 8 for the backbuffer
    pub fn bits(self) -> u32 {
        match self {
            RenderPassType::Offscreen(facets) => facets.intersection(RenderPassFacets::all()).bits(),
            RenderPassType::Backbuffer => BACKBUFFER_BITS,
        }
    }

    /// Dense cache index in `0..COUNT`
    pub fn index(self) -> usize {
        self.bits() as usize
    }

    /// Validating conversion from a raw bit encoding
    ///
    /// Rejects the backbuffer bit combined with any facet and any value past
    /// the enumeration.
    pub fn from_bits(bits: u32) -> Option<Self> {
        if bits == BACKBUFFER_BITS {
            return Some(RenderPassType::Backbuffer);
        }
        RenderPassFacets::from_bits(bits).map(RenderPassType::Offscreen)
    }

    /// Validating conversion from a cache index
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().and_then(Self::from_bits)
    }

    /// Every variant, in index order
    pub fn all() -> impl Iterator<Item = RenderPassType> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }

    /// A depth/stencil attachment is part of the pass (backbuffer passes always have one)
    pub fn has_depth(self) -> bool {
        match self {
            RenderPassType::Offscreen(facets) => facets.contains(RenderPassFacets::HAS_DEPTH),
            RenderPassType::Backbuffer => true,
        }
    }

    pub fn has_self_input(self) -> bool {
        matches!(self, RenderPassType::Offscreen(facets) if facets.contains(RenderPassFacets::COLOR_INPUT))
    }

    pub fn is_multiview(self) -> bool {
        matches!(self, RenderPassType::Offscreen(facets) if facets.contains(RenderPassFacets::MULTIVIEW))
    }

    pub fn is_backbuffer(self) -> bool {
        matches!(self, RenderPassType::Backbuffer)
    }

    /// Union of two variants
    ///
    /// Offscreen facets combine freely. The backbuffer only merges with itself.
    pub fn merge(self, other: RenderPassType) -> Option<RenderPassType> {
        match (self, other) {
            (RenderPassType::Offscreen(a), RenderPassType::Offscreen(b)) => {
                Some(RenderPassType::Offscreen(a | b))
            }
            (RenderPassType::Backbuffer, RenderPassType::Backbuffer) => Some(RenderPassType::Backbuffer),
            _ => None,
        }
    }

    /// Stable name used in logs and GPU debug names
    pub fn debug_name(self) -> &'static str {
        DEBUG_NAMES[self.index()]
    }
}

impl Default for RenderPassType {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<RenderPassFacets> for RenderPassType {
    fn from(facets: RenderPassFacets) -> Self {
        RenderPassType::Offscreen(facets)
    }
}

impl fmt::Display for RenderPassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.debug_name())
    }
}

#[cfg(test)]
#[path = "render_pass_type_tests.rs"]
mod tests;
