use tracing::debug;

use crate::camera::CameraState;

/// Collapses bursts of camera-settle signals into a single rebuild.
///
/// Settles only mark the overlay stale. The rebuild happens when the
/// owner calls [`RedrawScheduler::take`] at its next scheduling point, and
/// it uses whatever the camera shows at that moment.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: Option<CameraState>,
    coalesced: usize,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, state: CameraState) {
        if self.pending.replace(state).is_some() {
            self.coalesced += 1;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Latest requested state, if any, clearing the request.
    pub fn take(&mut self) -> Option<CameraState> {
        let state = self.pending.take()?;
        if self.coalesced > 0 {
            debug!("Coalesced {} camera settles into one redraw", self.coalesced);
            self.coalesced = 0;
        }
        Some(state)
    }
}
