/// Configuration shared by the device backends
///
/// Controls how long deferred deletions are held back and whether GPU
/// objects receive debug names.

/// Strata configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of frames the GPU may lag behind the CPU.
    /// A handle queued for deletion at epoch `e` is destroyed once epoch
    /// `e + frames_in_flight` has completed.
    pub frames_in_flight: u64,
    /// Assign debug names to images, views, passes and framebuffers
    pub enable_debug_names: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frames_in_flight: 2,
            enable_debug_names: cfg!(debug_assertions),
        }
    }
}

impl Config {
    pub fn with_frames_in_flight(mut self, frames_in_flight: u64) -> Self {
        self.frames_in_flight = frames_in_flight;
        self
    }

    pub fn with_debug_names(mut self, enable: bool) -> Self {
        self.enable_debug_names = enable;
        self
    }
}
