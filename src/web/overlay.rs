use crate::camera::PanoramaCamera;
use crate::marker::MarkerConfig;
use crate::navigation::Disclosure;
use super::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const MARKER_ID_ATTR: &str = "data-marker-id";

pub struct PlacedMarker {
    pub config: MarkerConfig,
    element: web::HtmlElement,
}

/// DOM layer stacked over the canvas holding one element per marker.
pub struct MarkerLayer {
    document: web::Document,
    root: web::HtmlElement,
    markers: Vec<PlacedMarker>,
}

impl MarkerLayer {
    pub fn new(document: &web::Document, container: &web::HtmlElement) -> anyhow::Result<Self> {
        let root = dom::create_element(document, "div", "tv-marker-layer")?;
        // the layer itself never takes clicks; only its markers do
        _ = root.set_attribute(
            "style",
            "position:absolute;inset:0;overflow:hidden;pointer-events:none;",
        );
        container
            .append_child(&root)
            .map_err(|e| anyhow::anyhow!("append marker layer: {:?}", e))?;
        Ok(Self {
            document: document.clone(),
            root,
            markers: Vec::new(),
        })
    }

    pub fn root(&self) -> &web::HtmlElement {
        &self.root
    }

    pub fn add(&mut self, config: MarkerConfig) {
        let element = match dom::create_element(&self.document, "div", "tv-marker-anchor") {
            Ok(el) => el,
            Err(e) => {
                log::warn!("[overlay] marker {}: {:#}", config.id, e);
                return;
            }
        };
        _ = element.set_attribute(MARKER_ID_ATTR, &config.id);
        _ = element.set_attribute(
            "style",
            &format!(
                "position:absolute;left:0;top:0;display:none;pointer-events:auto;transform:{};",
                config.anchor.css_transform()
            ),
        );
        element.set_inner_html(&config.html);
        if let Err(e) = self.root.append_child(&element) {
            log::warn!("[overlay] append marker {}: {:?}", config.id, e);
            return;
        }
        self.markers.push(PlacedMarker { config, element });
    }

    pub fn remove(&mut self, id: &str) {
        self.markers.retain(|m| {
            let keep = m.config.id != id;
            if !keep {
                dom::detach(&m.element);
            }
            keep
        });
    }

    pub fn clear(&mut self) {
        for m in self.markers.drain(..) {
            dom::detach(&m.element);
        }
    }

    /// Move every marker to its projected pixel; hide those off screen.
    pub fn layout(&self, camera: &PanoramaCamera, width: f32, height: f32) {
        for m in &self.markers {
            match camera.project(m.config.position, width, height) {
                Some(p) if p.x >= 0.0 && p.x <= width && p.y >= 0.0 && p.y <= height => {
                    dom::set_style(&m.element, "left", &format!("{:.1}px", p.x));
                    dom::set_style(&m.element, "top", &format!("{:.1}px", p.y));
                    dom::set_style(&m.element, "display", "block");
                }
                _ => dom::set_style(&m.element, "display", "none"),
            }
        }
    }

    pub fn dispose(&mut self) {
        self.clear();
        dom::detach(&self.root);
    }
}

/// Non-blocking panel revealing info hotspot content.
pub struct DisclosurePanel {
    root: web::HtmlElement,
    title: web::HtmlElement,
    body: web::HtmlElement,
    close_button: web::HtmlElement,
    on_close: Closure<dyn FnMut()>,
}

impl DisclosurePanel {
    pub fn new(container: &web::HtmlElement) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let root = dom::create_element(&document, "div", "tv-disclosure hidden")?;
        _ = root.set_attribute(
            "style",
            "display:none;position:absolute;right:12px;bottom:12px;max-width:360px;max-height:60%;overflow:auto;color:#e2e8f0;font:14px system-ui;background:rgba(15,23,42,0.92);padding:12px 16px;border-radius:8px;border:1px solid rgba(148,163,184,0.35);",
        );
        let close_button = dom::create_element(&document, "button", "tv-disclosure-close")?;
        close_button.set_text_content(Some("\u{00d7}"));
        _ = close_button.set_attribute(
            "style",
            "float:right;background:none;border:none;color:inherit;font-size:18px;cursor:pointer;",
        );
        let title = dom::create_element(&document, "div", "tv-disclosure-title")?;
        _ = title.set_attribute("style", "font-weight:600;margin-bottom:6px;");
        let body = dom::create_element(&document, "div", "tv-disclosure-body")?;
        for child in [&close_button, &title, &body] {
            root.append_child(child)
                .map_err(|e| anyhow::anyhow!("build disclosure panel: {:?}", e))?;
        }
        container
            .append_child(&root)
            .map_err(|e| anyhow::anyhow!("append disclosure panel: {:?}", e))?;

        let root_for_close = root.clone();
        let on_close =
            Closure::wrap(Box::new(move || hide_element(&root_for_close)) as Box<dyn FnMut()>);
        _ = close_button
            .add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref());

        Ok(Self {
            root,
            title,
            body,
            close_button,
            on_close,
        })
    }

    pub fn show(&self, disclosure: &Disclosure) {
        self.title.set_text_content(disclosure.title.as_deref());
        // content is operator-authored text or HTML
        self.body.set_inner_html(&disclosure.content);
        let cl = self.root.class_list();
        _ = cl.remove_1("hidden");
        dom::set_style(&self.root, "display", "block");
    }

    pub fn hide(&self) {
        hide_element(&self.root);
    }
}

impl Drop for DisclosurePanel {
    fn drop(&mut self) {
        _ = self
            .close_button
            .remove_event_listener_with_callback("click", self.on_close.as_ref().unchecked_ref());
        dom::detach(&self.root);
    }
}

fn hide_element(el: &web::HtmlElement) {
    let cl = el.class_list();
    _ = cl.add_1("hidden");
    dom::set_style(el, "display", "none");
}
