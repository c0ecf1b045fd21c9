/// Opaque GPU object handles
///
/// Backends map these to their native handles (for Vulkan, the raw `u64`
/// behind `vk::Image`, `vk::ImageView`, ...). Zero is the null handle.

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(u64);

        impl $name {
            /// The null handle
            pub const fn null() -> Self {
                Self(0)
            }

            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn as_raw(self) -> u64 {
                self.0
            }

            pub const fn is_null(self) -> bool {
                self.0 == 0
            }
        }
    };
}

define_handle!(
    /// GPU image
    ImageHandle
);
define_handle!(
    /// View onto a GPU image
    ImageViewHandle
);
define_handle!(
    /// Device memory backing an image (owned by the backend allocator)
    AllocationHandle
);
define_handle!(
    /// Render pass object
    RenderPassHandle
);
define_handle!(
    /// Framebuffer object
    FramebufferHandle
);
define_handle!(
    /// Command buffer in the recording state, supplied by the execution layer
    CommandBufferHandle
);
