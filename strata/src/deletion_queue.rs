/// Deferred deletion of GPU objects
///
/// Owners of GPU handles never destroy them directly: the GPU may still be
/// reading them from frames in flight. Instead they enqueue the handles here,
/// tagged with the current epoch (frame counter). The backend drains entries
/// once the GPU has finished `frames_in_flight` epochs past the one they were
/// queued in, and destroys them natively.

use std::sync::{Mutex, MutexGuard};
use crate::graphics_device::{
    ImageHandle, ImageViewHandle, AllocationHandle, FramebufferHandle, RenderPassHandle,
};

/// A GPU object waiting for destruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingDeletion {
    ImageView(ImageViewHandle),
    /// An image together with the memory bound to it
    ImageAllocation(ImageHandle, AllocationHandle),
    Framebuffer(FramebufferHandle),
    RenderPass(RenderPassHandle),
}

struct DeletionState {
    epoch: u64,
    pending: Vec<(u64, PendingDeletion)>,
}

/// Epoch-tagged queue of pending GPU object deletions
pub struct DeletionQueue {
    frames_in_flight: u64,
    state: Mutex<DeletionState>,
}

impl DeletionQueue {
    pub fn new(frames_in_flight: u64) -> Self {
        Self {
            frames_in_flight,
            state: Mutex::new(DeletionState {
                epoch: 0,
                pending: Vec::new(),
            }),
        }
    }

    // Entries are plain handles, a poisoned lock leaves them consistent
    fn state(&self) -> MutexGuard<'_, DeletionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn frames_in_flight(&self) -> u64 {
        self.frames_in_flight
    }

    /// Epoch new entries are tagged with
    pub fn current_epoch(&self) -> u64 {
        self.state().epoch
    }

    /// Advance the epoch tag for subsequently queued entries
    ///
    /// Epochs never go backwards; an older value is ignored.
    pub fn begin_epoch(&self, epoch: u64) {
        let mut state = self.state();
        state.epoch = state.epoch.max(epoch);
    }

    fn push(&self, entry: PendingDeletion) {
        let mut state = self.state();
        let epoch = state.epoch;
        state.pending.push((epoch, entry));
    }

    pub fn queue_delete_image_view(&self, view: ImageViewHandle) {
        debug_assert!(!view.is_null());
        self.push(PendingDeletion::ImageView(view));
    }

    pub fn queue_delete_image_allocation(&self, image: ImageHandle, allocation: AllocationHandle) {
        debug_assert!(!image.is_null());
        self.push(PendingDeletion::ImageAllocation(image, allocation));
    }

    pub fn queue_delete_framebuffer(&self, framebuffer: FramebufferHandle) {
        debug_assert!(!framebuffer.is_null());
        self.push(PendingDeletion::Framebuffer(framebuffer));
    }

    pub fn queue_delete_render_pass(&self, render_pass: RenderPassHandle) {
        debug_assert!(!render_pass.is_null());
        self.push(PendingDeletion::RenderPass(render_pass));
    }

    /// Remove and return, in enqueue order, every entry the GPU is done with
    ///
    /// An entry queued at epoch `e` is returned once `e + frames_in_flight <= completed_epoch`.
    pub fn drain_completed(&self, completed_epoch: u64) -> Vec<PendingDeletion> {
        let frames_in_flight = self.frames_in_flight;
        let mut state = self.state();
        let mut drained = Vec::new();
        state.pending.retain(|(epoch, entry)| {
            if *epoch + frames_in_flight <= completed_epoch {
                drained.push(*entry);
                false
            } else {
                true
            }
        });
        drained
    }

    /// Remove and return every entry regardless of epoch (device idle / shutdown)
    pub fn drain_all(&self) -> Vec<PendingDeletion> {
        let mut state = self.state();
        state.pending.drain(..).map(|(_, entry)| entry).collect()
    }

    /// Snapshot of the pending entries, in enqueue order
    pub fn pending(&self) -> Vec<PendingDeletion> {
        self.state().pending.iter().map(|(_, entry)| *entry).collect()
    }

    pub fn len(&self) -> usize {
        self.state().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().pending.is_empty()
    }
}

#[cfg(test)]
#[path = "deletion_queue_tests.rs"]
mod tests;
