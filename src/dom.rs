use echo_core::{SurfaceStyle, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current window inner size; unreadable dimensions count as zero.
pub fn viewport(window: &web::Window) -> Viewport {
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .map(|f| f.max(0.0) as u32)
            .unwrap_or(0)
    };
    Viewport::new(px(window.inner_width()), px(window.inner_height()))
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}

/// Apply `style` to the canvas; unset fields keep the page's own CSS.
pub fn apply_surface_style(canvas: &web::HtmlCanvasElement, style: SurfaceStyle) {
    let css = canvas.style();
    if let Some(px) = style.blur_px {
        _ = css.set_property("filter", &format!("blur({px}px)"));
    }
    if let Some(opacity) = style.opacity {
        _ = css.set_property("opacity", &opacity.to_string());
    }
}

/// Append `class_name` to the canvas's class list.
pub fn add_class(canvas: &web::HtmlCanvasElement, class_name: &str) {
    let current = canvas.class_name();
    canvas.set_class_name(format!("{current} {class_name}").trim());
}

/// Insert a pointer-transparent sibling right after `canvas`, covering the
/// same positioned container, with `background` as its CSS background.
pub fn attach_overlay(canvas: &web::HtmlCanvasElement, background: &str) -> Option<web::Element> {
    let document = canvas.owner_document()?;
    let parent = canvas.parent_node()?;
    let overlay = document.create_element("div").ok()?;
    _ = overlay.set_attribute(
        "style",
        &format!("position:absolute;inset:0;pointer-events:none;background:{background}"),
    );
    parent
        .insert_before(&overlay, canvas.next_sibling().as_ref())
        .ok()?;
    Some(overlay)
}
