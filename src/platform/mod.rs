//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Hosts an InputManager inside a Winit window.
//
// Architecture:
// ```text
//  Main Thread
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ↓ WindowEvent                              │
//  │  WinitTranslator                             │
//  │   ├─ tracks modifiers, cursor, primary touch │
//  │   └─ WindowEvent → PhysicalEvent             │
//  │   ↓ (only kinds the surface forwards)        │
//  │  InputManager<WindowSurface>                 │
//  │   └─ gestures → actions → EventBus           │
//  └──────────────────────────────────────────────┘
// ```
//
// Notes:
// - Winit mandates the main thread on macOS/iOS; the input pipeline is
//   single-threaded and lives there too.
// - Resizes update the surface rectangle used for normalization.
// - Close requests destroy the manager before the loop exits.
//
//=========================================================================

//=== Submodules ==========================================================

mod translator;
mod window_surface;

pub use translator::WinitTranslator;
pub use window_surface::WindowSurface;

//=== External Dependencies ===============================================

use log::{debug, error, info, trace};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputManager, PhysicalEvent};

//=== PlatformError =======================================================

/// Fatal event loop errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),
}

//=== Platform ============================================================

/// Window host forwarding translated events into an [`InputManager`].
///
/// # Lifecycle
///
/// 1. `Platform::new(manager)`: no window yet
/// 2. `run()`: creates the event loop; the window appears in `resumed()`
/// 3. Close request: `manager.destroy()`, loop exits, `run()` returns
pub struct Platform {
    window: Option<Window>,
    manager: InputManager<WindowSurface>,
    translator: WinitTranslator,
    title: String,
    size: LogicalSize<f64>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(manager: InputManager<WindowSurface>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            manager,
            translator: WinitTranslator::new(),
            title: "Card Gestures".to_owned(),
            size: LogicalSize::new(800.0, 600.0),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial inner size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero");
        self.size = LogicalSize::new(width as f64, height as f64);
        self
    }

    pub fn manager(&self) -> &InputManager<WindowSurface> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut InputManager<WindowSurface> {
        &mut self.manager
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn resize(&mut self, width: f32, height: f32) {
        self.manager.surface_mut().resize(width, height);
        self.translator.resize(width, height);
    }

    /// Hands one physical event to the manager if the surface forwards its
    /// kind. Cancels travel with the release kind of their sequence.
    /// Returns the number of actions emitted.
    fn forward(&mut self, event: PhysicalEvent) -> usize {
        let surface = self.manager.surface();
        let forwarded = surface.is_forwarding(event.kind)
            || event
                .kind
                .cancelled_release()
                .is_some_and(|release| surface.is_forwarding(release));
        if !forwarded {
            return 0;
        }
        self.manager.handle(&event)
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.as_str())
            .with_inner_size(self.size);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.resize(size.width as f32, size.height as f32);
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.manager.destroy();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.manager.destroy();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.resize(size.width as f32, size.height as f32);
            }

            _ => {
                if let Some(physical) = self.translator.translate(&event) {
                    let emitted = self.forward(physical);
                    if emitted > 0 {
                        trace!(target: "platform::input", "{} emitted {} actions", physical.kind, emitted);
                    }
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
