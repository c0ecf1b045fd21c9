/// Framebuffer module - render target images and lazily built framebuffer objects

pub mod render_target_image;
pub mod framebuffer;

pub use render_target_image::*;
pub use framebuffer::*;
