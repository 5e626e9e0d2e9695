use glam::Vec2;
use web_sys as web;

/// Pointer position in CSS pixels relative to the element's top-left.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
