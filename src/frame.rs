use crate::canvas::CanvasTarget;
use crate::dom;
use crate::host::WebHost;
use anyhow::anyhow;
use echo_core::{
    backdrop, vignette_css, AnimationConfig, Animator, Canvas, DisplayList, Host, ListenerHandle,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use web_sys as web;

pub type WebAnimator = Animator<WebHost, CanvasTarget>;

/// A running animation plus the vignette overlay stacked above its canvas.
/// Dropping it unmounts the animation and removes the overlay.
pub struct AnimationMount {
    animator: Rc<RefCell<WebAnimator>>,
    overlay: Option<web::Element>,
}

impl Drop for AnimationMount {
    fn drop(&mut self) {
        match self.animator.try_borrow_mut() {
            Ok(mut animator) => animator.unmount(),
            Err(_) => log::warn!("[mount] animator busy during unmount"),
        }
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
    }
}

/// Mount an animation on `canvas` and start its requestAnimationFrame loop.
///
/// A canvas without a 2D context still mounts, but inert: nothing is drawn
/// and no frames are scheduled.
pub fn mount_animation(
    canvas: web::HtmlCanvasElement,
    config: AnimationConfig,
    class_name: Option<&str>,
) -> anyhow::Result<AnimationMount> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let style = config.style.resolve(config.variant);
    let vignette = config.variant.has_vignette();
    let target = CanvasTarget::acquire(canvas.clone());
    let host = WebHost::new(window);
    let frame_slot = host.frame_slot();
    let resize_slot = host.resize_slot();
    let animator = Rc::new(RefCell::new(Animator::new(host, target, config)?));

    // The page is only touched once the config is known to be valid
    if let Some(style) = style {
        dom::apply_surface_style(&canvas, style);
    }
    if let Some(class_name) = class_name {
        dom::add_class(&canvas, class_name);
    }
    let overlay = if vignette {
        dom::attach_overlay(&canvas, &vignette_css())
    } else {
        None
    };

    let animator_tick = Rc::downgrade(&animator);
    *frame_slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Some(a) = animator_tick.upgrade() {
            a.borrow_mut().on_frame();
        }
    }) as Box<dyn FnMut()>));

    let animator_resize = Rc::downgrade(&animator);
    *resize_slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Some(a) = animator_resize.upgrade() {
            a.borrow_mut().on_resize();
        }
    }) as Box<dyn FnMut()>));

    animator.borrow_mut().start();
    Ok(AnimationMount { animator, overlay })
}

/// Static page backdrop, repainted whenever the window is resized.
pub struct BackdropMount {
    host: WebHost,
    listener: Option<ListenerHandle>,
}

impl Drop for BackdropMount {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.take() {
            self.host.remove_resize_listener(handle);
        }
    }
}

pub fn mount_backdrop(canvas: web::HtmlCanvasElement, seed: u64) -> anyhow::Result<BackdropMount> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let target = CanvasTarget::acquire(canvas).ok_or_else(|| anyhow!("backdrop canvas has no 2D context"))?;
    let target = Rc::new(RefCell::new(target));
    let mut host = WebHost::new(window);

    let list = Rc::new(RefCell::new(DisplayList::new()));
    paint_backdrop(host.window(), &target, &list, seed);

    let window_resize = host.window().clone();
    *host.resize_slot().borrow_mut() = Some(Closure::wrap(Box::new(move || {
        paint_backdrop(&window_resize, &target, &list, seed);
    }) as Box<dyn FnMut()>));

    let listener = match host.add_resize_listener() {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("[backdrop] {e}");
            None
        }
    };
    Ok(BackdropMount { host, listener })
}

fn paint_backdrop(
    window: &web::Window,
    target: &Rc<RefCell<CanvasTarget>>,
    list: &Rc<RefCell<DisplayList>>,
    seed: u64,
) {
    let viewport = dom::viewport(window);
    let mut list = list.borrow_mut();
    backdrop(viewport, seed, &mut list);
    let mut target = target.borrow_mut();
    target.resize(viewport);
    target.draw(&list);
}
