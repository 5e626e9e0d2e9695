//! Panorama image fetching.
//!
//! Images are decoded by the browser and rasterized through a 2D canvas into
//! RGBA bytes for texture upload.

use crate::constants::MAX_TEXTURE_EDGE_PX;
use crate::error::ViewerError;
use std::future::Future;
use std::pin::Pin;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub type LoadFuture = Pin<Box<dyn Future<Output = Result<PanoramaImage, ViewerError>>>>;

/// Decoded equirectangular image, RGBA8, row-major.
pub struct PanoramaImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PanoramaImage {
    /// 1x1 black stage shown for spheres without an image.
    pub fn blank() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![0, 0, 0, 255],
        }
    }
}

pub fn load(source: &str) -> LoadFuture {
    let source = source.to_string();
    Box::pin(async move {
        if source.is_empty() {
            return Ok(PanoramaImage::blank());
        }
        fetch_and_decode(&source)
            .await
            .map_err(|e| ViewerError::load(&source, format!("{:#}", e)))
    })
}

async fn fetch_and_decode(source: &str) -> anyhow::Result<PanoramaImage> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(source);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow::anyhow!("decode: {:?}", e))?;

    let (width, height) = fit_texture(img.natural_width(), img.natural_height());
    if width == 0 || height == 0 {
        anyhow::bail!("image has no pixels");
    }

    let document = super::dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("canvas element"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("2d context type"))?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        &img,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )
    .map_err(|e| anyhow::anyhow!("draw_image: {:?}", e))?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| anyhow::anyhow!("get_image_data: {:?}", e))?;

    log::info!("[loader] decoded {} ({}x{})", source, width, height);
    Ok(PanoramaImage {
        width,
        height,
        rgba: data.data().0,
    })
}

/// Scale down so neither edge exceeds the texture limit, keeping the aspect.
fn fit_texture(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= MAX_TEXTURE_EDGE_PX {
        return (width, height);
    }
    let scale = MAX_TEXTURE_EDGE_PX as f64 / longest as f64;
    (
        ((width as f64 * scale) as u32).max(1),
        ((height as f64 * scale) as u32).max(1),
    )
}
