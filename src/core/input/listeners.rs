//=========================================================================
// Surface Listeners
//=========================================================================
//
// The bound surface and the set of physical listeners installed on it.
//
// Each physical kind is installed at most once no matter how many actions
// need it; teardown uninstalls exactly what was installed.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::BTreeSet;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::event::PhysicalKind;
use super::pointer_state::SurfaceRect;

//=== Surface =============================================================

/// A display surface that delivers physical events.
///
/// `install` / `uninstall` tell the host which kinds to forward; the host
/// is free to ignore them if it forwards everything anyway.
pub trait Surface {
    /// Current bounding rectangle in client pixels.
    fn bounds(&self) -> SurfaceRect;

    fn install(&mut self, kind: PhysicalKind);

    fn uninstall(&mut self, kind: PhysicalKind);
}

//=== ListenerSet =========================================================

/// De-duplicated set of installed physical kinds.
#[derive(Debug, Default)]
pub struct ListenerSet {
    installed: BTreeSet<PhysicalKind>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `kind` unless already present. Returns `true` if installed now.
    pub fn ensure(&mut self, kind: PhysicalKind, surface: &mut dyn Surface) -> bool {
        if !self.installed.insert(kind) {
            return false;
        }
        surface.install(kind);
        debug!(target: "input::listeners", "Installed `{}` listener", kind);
        true
    }

    pub fn is_installed(&self, kind: PhysicalKind) -> bool {
        self.installed.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PhysicalKind> + '_ {
        self.installed.iter().copied()
    }

    /// Uninstalls every listener. Returns how many were removed.
    pub fn teardown(&mut self, surface: &mut dyn Surface) -> usize {
        let count = self.installed.len();
        for kind in std::mem::take(&mut self.installed) {
            surface.uninstall(kind);
        }
        if count > 0 {
            debug!(target: "input::listeners", "Removed {} listeners", count);
        }
        count
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
