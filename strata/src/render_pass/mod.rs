/// Render pass module - variant tags, load/store keys, descriptions and the per-key cache

pub mod render_pass_type;
pub mod render_pass_key;
pub mod render_pass_desc;
pub mod render_pass_cache;

pub use render_pass_type::*;
pub use render_pass_key::*;
pub use render_pass_desc::*;
pub use render_pass_cache::*;
