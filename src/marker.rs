use crate::constants::{
    INFO_COLOR, INFO_GLYPH, MARKER_RING_WIDTH_PX, MARKER_SIZE_PX, NAVIGATION_COLOR,
    NAVIGATION_GLYPH, TOOLTIP_GAP_PX,
};
use crate::coords::SphericalPosition;
use crate::model::{Hotspot, HotspotKind};

/// Which point of the marker visual sits on its spherical coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Pin-like: the bottom-center of the visual touches the point.
    #[default]
    BottomCenter,
    Center,
}

impl Anchor {
    pub fn css_transform(self) -> &'static str {
        match self {
            Anchor::BottomCenter => "translate(-50%, -100%)",
            Anchor::Center => "translate(-50%, -50%)",
        }
    }
}

/// Engine-native marker, rebuilt from a hotspot on every sync.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerConfig {
    pub id: String,
    pub position: SphericalPosition,
    pub anchor: Anchor,
    pub kind: HotspotKind,
    pub html: String,
}

impl MarkerConfig {
    pub fn for_hotspot(hotspot: &Hotspot) -> Self {
        Self::with_id(hotspot.id.to_string(), hotspot)
    }

    pub fn with_id(id: String, hotspot: &Hotspot) -> Self {
        let visual = MarkerVisual::for_hotspot(hotspot);
        Self {
            id,
            position: SphericalPosition::from_degrees(hotspot.yaw, hotspot.pitch),
            anchor: Anchor::BottomCenter,
            kind: hotspot.kind,
            html: visual.to_html(),
        }
    }
}

/// The overlay drawn for one hotspot.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerVisual {
    pub color: &'static str,
    pub glyph: &'static str,
    pub tooltip: Option<String>,
}

impl MarkerVisual {
    pub fn for_hotspot(hotspot: &Hotspot) -> Self {
        let (color, glyph) = match hotspot.kind {
            HotspotKind::Navigation => (NAVIGATION_COLOR, NAVIGATION_GLYPH),
            HotspotKind::Info => (INFO_COLOR, INFO_GLYPH),
        };
        let tooltip = hotspot
            .tooltip
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self {
            color,
            glyph,
            tooltip,
        }
    }

    pub fn to_html(&self) -> String {
        let size = MARKER_SIZE_PX;
        let ring = format!(
            "<div class='tv-marker-ring' style='width:{size}px;height:{size}px;border-radius:50%;border:{bw}px solid {c};background:rgba(0,0,0,0.35);color:{c};display:flex;align-items:center;justify-content:center;font:bold 16px system-ui;cursor:pointer;box-sizing:border-box;'>{g}</div>",
            bw = MARKER_RING_WIDTH_PX,
            c = self.color,
            g = self.glyph,
        );
        let label = match &self.tooltip {
            Some(text) => format!(
                "<div class='tv-marker-tooltip' style='position:absolute;bottom:{h}px;left:50%;transform:translateX(-50%);white-space:nowrap;pointer-events:none;color:#f8fafc;font:12px system-ui;background:rgba(15,23,42,0.85);padding:4px 8px;border-radius:4px;'>{t}</div>",
                h = size + TOOLTIP_GAP_PX,
                t = escape_html(text),
            ),
            None => String::new(),
        };
        format!("<div class='tv-marker' style='position:relative;'>{label}{ring}</div>")
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
