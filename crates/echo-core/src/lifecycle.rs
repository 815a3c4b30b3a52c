//! Mount/unmount lifecycle shared by every host.
//!
//! A host supplies the clock, the viewport, frame scheduling and resize
//! notifications; an [`Animator`] drives one [`Scene`] on top of it and
//! guarantees that unmounting releases both registrations exactly once.

use crate::config::{AnimationConfig, ConfigError};
use crate::render::DisplayList;
use crate::scene::Scene;
use crate::surface::Viewport;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u32);

#[derive(Debug, Error)]
pub enum HostError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("frame request failed: {0}")]
    FrameRequest(String),
    #[error("resize listener registration failed: {0}")]
    Listener(String),
}

/// Environment an animation runs in.
pub trait Host {
    /// Monotonic clock reading. Its origin is arbitrary; the animator only
    /// uses differences from the reading taken at `start`.
    fn now(&self) -> Duration;
    fn viewport(&self) -> Viewport;
    /// Schedule the next frame callback.
    fn request_frame(&mut self) -> Result<FrameHandle, HostError>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn add_resize_listener(&mut self) -> Result<ListenerHandle, HostError>;
    fn remove_resize_listener(&mut self, handle: ListenerHandle);
}

/// Sink that executes a frame's draw commands.
pub trait Canvas {
    fn resize(&mut self, viewport: Viewport);
    fn draw(&mut self, list: &DisplayList);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountState {
    /// Built but not yet registered with the host.
    Idle,
    Running,
    /// No drawing surface could be acquired; nothing is scheduled.
    Inert,
    Unmounted,
}

pub struct Animator<H: Host, C: Canvas> {
    host: H,
    canvas: Option<C>,
    scene: Scene,
    state: MountState,
    pending_frame: Option<FrameHandle>,
    resize_listener: Option<ListenerHandle>,
    // Host clock reading at mount; scene time is measured from here
    started_at: Duration,
}

impl<H: Host, C: Canvas> Animator<H, C> {
    /// Build the scene without touching the host's scheduling. Hosts whose
    /// callbacks need a handle to the animator call [`Animator::start`] once
    /// those callbacks exist.
    pub fn new(host: H, canvas: Option<C>, config: AnimationConfig) -> Result<Self, ConfigError> {
        let scene = Scene::new(config, host.viewport())?;
        Ok(Self {
            host,
            canvas,
            scene,
            state: MountState::Idle,
            pending_frame: None,
            resize_listener: None,
            started_at: Duration::ZERO,
        })
    }

    /// `new` followed by `start`.
    pub fn mount(host: H, canvas: Option<C>, config: AnimationConfig) -> Result<Self, ConfigError> {
        let mut animator = Self::new(host, canvas, config)?;
        animator.start();
        Ok(animator)
    }

    /// Register the resize listener and request the first frame. Without a
    /// canvas the animator goes inert and registers nothing.
    pub fn start(&mut self) {
        if self.state != MountState::Idle {
            return;
        }
        let Some(canvas) = self.canvas.as_mut() else {
            log::warn!("[mount] {} has no drawing surface; animation disabled", self.scene.variant());
            self.state = MountState::Inert;
            return;
        };
        canvas.resize(self.scene.viewport());
        self.started_at = self.host.now();
        match self.host.add_resize_listener() {
            Ok(handle) => self.resize_listener = Some(handle),
            Err(e) => log::warn!("[mount] {e}; surface will not follow the viewport"),
        }
        match self.host.request_frame() {
            Ok(handle) => self.pending_frame = Some(handle),
            Err(e) => log::warn!("[mount] {e}; animation will not run"),
        }
        self.state = MountState::Running;
        log::info!("[mount] {} started", self.scene.variant());
    }

    /// Resize callback: re-read the viewport and resize the canvas if it changed.
    pub fn on_resize(&mut self) {
        if self.state != MountState::Running {
            return;
        }
        let viewport = self.host.viewport();
        if self.scene.resize(viewport) {
            if let Some(canvas) = self.canvas.as_mut() {
                canvas.resize(viewport);
            }
        }
    }

    /// Frame callback. Runs one frame and schedules the next; returns `false`
    /// and does nothing once unmounted.
    pub fn on_frame(&mut self) -> bool {
        if self.state != MountState::Running {
            return false;
        }
        self.pending_frame = None;
        let now = self.host.now().saturating_sub(self.started_at);
        let list = self.scene.frame(now);
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.draw(list);
        }
        match self.host.request_frame() {
            Ok(handle) => self.pending_frame = Some(handle),
            Err(e) => log::error!("[frame] {e}"),
        }
        true
    }

    /// Release the resize listener and the pending frame. Idempotent.
    pub fn unmount(&mut self) {
        if matches!(self.state, MountState::Unmounted) {
            return;
        }
        if let Some(handle) = self.resize_listener.take() {
            self.host.remove_resize_listener(handle);
        }
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
        let stats = self.scene.stats();
        log::info!(
            "[mount] {} unmounted after {} frames ({} spawned, {} culled)",
            self.scene.variant(),
            stats.frames,
            stats.spawned,
            stats.culled
        );
        self.state = MountState::Unmounted;
    }

    #[inline]
    pub fn state(&self) -> MountState {
        self.state
    }
    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }
    #[inline]
    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }
}

impl<H: Host, C: Canvas> Drop for Animator<H, C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
