/// Graphics device module - handles, image types, descriptors and the device trait

pub mod graphics_device;
pub mod handles;
pub mod image;
pub mod sync;
pub mod frame_buffer;

pub use graphics_device::*;
pub use handles::*;
pub use image::*;
pub use sync::*;
pub use frame_buffer::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
