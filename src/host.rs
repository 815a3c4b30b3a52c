use crate::dom;
use echo_core::{FrameHandle, Host, HostError, ListenerHandle, Viewport};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser window as an animation host: `requestAnimationFrame` for frames,
/// the window `resize` event for viewport changes.
///
/// The callbacks live in shared slots so they can be created after the
/// animator that owns this host (they hold a weak handle back to it).
pub struct WebHost {
    window: web::Window,
    started: Instant,
    frame_cb: CallbackSlot,
    resize_cb: CallbackSlot,
    listeners: u32,
}

impl WebHost {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            started: Instant::now(),
            frame_cb: Rc::new(RefCell::new(None)),
            resize_cb: Rc::new(RefCell::new(None)),
            listeners: 0,
        }
    }

    pub fn frame_slot(&self) -> CallbackSlot {
        self.frame_cb.clone()
    }

    pub fn resize_slot(&self) -> CallbackSlot {
        self.resize_cb.clone()
    }

    #[inline]
    pub fn window(&self) -> &web::Window {
        &self.window
    }
}

impl Host for WebHost {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn viewport(&self) -> Viewport {
        dom::viewport(&self.window)
    }

    fn request_frame(&mut self) -> Result<FrameHandle, HostError> {
        let slot = self.frame_cb.borrow();
        let cb = slot
            .as_ref()
            .ok_or_else(|| HostError::FrameRequest("frame callback not wired".into()))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| HostError::FrameRequest(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0);
    }

    fn add_resize_listener(&mut self) -> Result<ListenerHandle, HostError> {
        {
            let slot = self.resize_cb.borrow();
            let cb = slot
                .as_ref()
                .ok_or_else(|| HostError::Listener("resize callback not wired".into()))?;
            self.window
                .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
                .map_err(|e| HostError::Listener(format!("{:?}", e)))?;
        }
        self.listeners += 1;
        Ok(ListenerHandle(self.listeners))
    }

    fn remove_resize_listener(&mut self, _handle: ListenerHandle) {
        if let Some(cb) = self.resize_cb.borrow().as_ref() {
            _ = self
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }
    }
}
