#![cfg(target_arch = "wasm32")]
use crate::frame::{AnimationMount, BackdropMount};
use echo_core::{AnimationConfig, StyleOverride, Variant};
use fnv::FnvHashMap;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

mod canvas;
mod constants;
mod dom;
mod frame;
mod host;

enum Mounted {
    Animation(AnimationMount),
    Backdrop(BackdropMount),
}

thread_local! {
    // Live mounts keyed by canvas element id
    static MOUNTS: RefCell<FnvHashMap<String, Mounted>> = RefCell::new(FnvHashMap::default());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("echo-web starting");

    if let Err(e) = auto_mount() {
        log::error!("auto-mount error: {:?}", e);
    }
    Ok(())
}

/// Mount every well-known canvas present in the document.
fn auto_mount() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    if document
        .get_element_by_id(constants::BACKDROP_CANVAS_ID)
        .is_some()
    {
        mount_backdrop_by_id(constants::BACKDROP_CANVAS_ID)?;
    }
    for (id, variant) in constants::AUTO_MOUNTS {
        if document.get_element_by_id(id).is_some() {
            mount_by_id(id, AnimationConfig::for_variant(variant), None)?;
        }
    }
    Ok(())
}

fn mount_by_id(
    canvas_id: &str,
    config: AnimationConfig,
    class_name: Option<&str>,
) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing canvas #{canvas_id}"))?;
    // Remounting replaces (and unmounts) whatever ran on this canvas before
    unmount(canvas_id);
    let mounted = frame::mount_animation(canvas, config, class_name)?;
    MOUNTS.with(|m| {
        m.borrow_mut()
            .insert(canvas_id.to_string(), Mounted::Animation(mounted))
    });
    Ok(())
}

fn mount_backdrop_by_id(canvas_id: &str) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing canvas #{canvas_id}"))?;
    unmount(canvas_id);
    let backdrop = frame::mount_backdrop(canvas, constants::BACKDROP_SEED)?;
    MOUNTS.with(|m| {
        m.borrow_mut()
            .insert(canvas_id.to_string(), Mounted::Backdrop(backdrop))
    });
    Ok(())
}

/// Mount an animation on the canvas with id `canvas_id`.
///
/// `variant` is one of `aura`, `wave` or `field`; `seed` fixes the random
/// parameters for reproducible output.
///
/// Style options: `blur_px` and `opacity` replace the variant's own canvas
/// CSS, `keep_host_style` leaves the canvas CSS untouched entirely, and
/// `class_name` is appended to the canvas classes.
#[wasm_bindgen]
pub fn mount(
    canvas_id: &str,
    variant: &str,
    seed: Option<u32>,
    blur_px: Option<f32>,
    opacity: Option<f32>,
    keep_host_style: Option<bool>,
    class_name: Option<String>,
) -> Result<(), JsValue> {
    let variant: Variant = variant
        .parse()
        .map_err(|e: echo_core::ConfigError| JsValue::from_str(&e.to_string()))?;
    let style = StyleOverride::from_options(blur_px, opacity, keep_host_style.unwrap_or(false));
    let mut config = AnimationConfig::for_variant(variant).with_style(style);
    if let Some(seed) = seed {
        config = config.with_seed(seed as u64);
    }
    mount_by_id(canvas_id, config, class_name.as_deref())
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// Paint the static page backdrop on the canvas with id `canvas_id`.
#[wasm_bindgen]
pub fn mount_backdrop(canvas_id: &str) -> Result<(), JsValue> {
    mount_backdrop_by_id(canvas_id).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// Tear down whatever is mounted on `canvas_id`. Returns `false` if nothing was.
#[wasm_bindgen]
pub fn unmount(canvas_id: &str) -> bool {
    let removed = MOUNTS.with(|m| m.borrow_mut().remove(canvas_id));
    // Both mount kinds release their registrations on drop
    removed.is_some()
}
