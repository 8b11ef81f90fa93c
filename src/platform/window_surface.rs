//=========================================================================
// Window Surface
//=========================================================================
//
// The OS window as seen by the input manager: a bounding rectangle plus
// the set of physical kinds the platform should forward.
//
// Winit delivers every event anyway; the forwarding set only decides what
// reaches the manager.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::BTreeSet;

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::input::{PhysicalKind, Surface, SurfaceRect};

//=== WindowSurface =======================================================

#[derive(Debug, Default)]
pub struct WindowSurface {
    width: f32,
    height: f32,
    forwarding: BTreeSet<PhysicalKind>,
}

impl WindowSurface {
    /// Surface of the given inner size in physical pixels.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            forwarding: BTreeSet::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        trace!(target: "platform", "Surface resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    pub fn is_forwarding(&self, kind: PhysicalKind) -> bool {
        self.forwarding.contains(&kind)
    }
}

impl Surface for WindowSurface {
    fn bounds(&self) -> SurfaceRect {
        SurfaceRect::sized(self.width, self.height)
    }

    fn install(&mut self, kind: PhysicalKind) {
        self.forwarding.insert(kind);
    }

    fn uninstall(&mut self, kind: PhysicalKind) {
        self.forwarding.remove(&kind);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
