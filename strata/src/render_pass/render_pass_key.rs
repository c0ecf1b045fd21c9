/// Load/store behavior of a family of render passes
///
/// The key is not part of render-pass compatibility: framebuffer objects built
/// against a pass with one key can be used with a pass with another.

/// Load operation for an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadOp {
    /// Load existing content
    Load,
    /// Clear the content
    Clear,
    /// Don't care about existing content
    DontCare,
}

/// Store operation for an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// Store the rendered content
    Store,
    /// Don't care about storing the content
    DontCare,
}

/// Load/store operations for the color, depth and stencil aspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderPassKey {
    pub color_load_op: LoadOp,
    pub color_store_op: StoreOp,
    pub depth_load_op: LoadOp,
    pub depth_store_op: StoreOp,
    pub stencil_load_op: LoadOp,
    pub stencil_store_op: StoreOp,
}

impl RenderPassKey {
    /// Same load/store for every aspect
    pub fn uniform(load_op: LoadOp, store_op: StoreOp) -> Self {
        Self {
            color_load_op: load_op,
            color_store_op: store_op,
            depth_load_op: load_op,
            depth_store_op: store_op,
            stencil_load_op: load_op,
            stencil_store_op: store_op,
        }
    }
}
