//! Pending camera moves
//!
//! Programmatic recentering is queued as commands and drained exactly once
//! by [`crate::map::binding::MapBinding::sync`]. Between commands the user
//! is free to pan; nothing re-asserts the marker position on later frames.

use crate::core::geo::LatLng;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Move the visible center to a coordinate, keeping the zoom
    CenterOn(LatLng),
}

#[derive(Debug, Clone, Default)]
pub struct CameraQueue {
    pending: VecDeque<CameraCommand>,
}

impl CameraQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: CameraCommand) {
        log::debug!("queued camera command {:?}", command);
        self.pending.push_back(command);
    }

    /// Removes and returns every pending command in submission order
    pub fn drain(&mut self) -> Vec<CameraCommand> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
