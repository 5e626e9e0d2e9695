use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element_by_id(id: &str) -> Option<web::HtmlElement> {
    window_document()?
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlElement>()
        .ok()
}

pub fn create_element(
    document: &web::Document,
    tag: &str,
    class: &str,
) -> anyhow::Result<web::HtmlElement> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create_element({tag}): {:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("{tag} is not an HtmlElement"))?;
    el.set_class_name(class);
    Ok(el)
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

/// CSS size of an element in pixels, at least 1x1.
pub fn css_size(el: &web::Element) -> (f32, f32) {
    let rect = el.get_bounding_client_rect();
    ((rect.width() as f32).max(1.0), (rect.height() as f32).max(1.0))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Detach an element from its parent, if it has one.
#[inline]
pub fn detach(el: &web::Element) {
    el.remove();
}
