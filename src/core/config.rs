//! Configuration for the view transform engine
//!
//! Everything the engine treats as tunable lives here: the scale-correction
//! threshold and factor, the point zoom factor, which feature kinds get
//! counter-scaled, what the active renderer can do, and the zoom → scale
//! table. Configurations deserialize from JSON with every field optional.

use crate::core::constants::{
    CORRECTION_SCALE, CORRECTION_THRESHOLD, DEFAULT_MAX_ZOOM, EQUATOR_LENGTH, POINT_ZOOM_FACTOR,
    TILE_SIZE,
};
use crate::{EngineError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_ZOOM_SCALES: Lazy<ZoomScales> = Lazy::new(|| {
    let scales = (0..=DEFAULT_MAX_ZOOM)
        .map(|zoom| TILE_SIZE as f64 * 2_f64.powi(zoom as i32) / EQUATOR_LENGTH)
        .collect();
    ZoomScales::new(scales)
});

/// Absolute scale (pixels per projection unit) for each zoom level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoomScales(Vec<f64>);

impl ZoomScales {
    pub fn new(scales: Vec<f64>) -> Self {
        Self(scales)
    }

    /// Web Mercator tile pyramid scales for zoom levels 0 through 20
    pub fn web_mercator() -> Self {
        DEFAULT_ZOOM_SCALES.clone()
    }

    pub fn get(&self, zoom: u32) -> Option<f64> {
        self.0.get(zoom as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ZoomScales {
    fn default() -> Self {
        Self::web_mercator()
    }
}

/// Which feature kinds are counter-scaled when the group scale changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizePolicy {
    pub points: bool,
    pub lines: bool,
    pub areas: bool,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            points: true,
            lines: true,
            areas: true,
        }
    }
}

/// Backend used by the scene surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Renderer {
    #[default]
    Svg,
    Vml,
    Canvas,
    Silverlight,
}

/// Browser engine hosting the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserEngine {
    Webkit,
    Opera,
    Gecko,
    Trident,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererProfile {
    pub renderer: Renderer,
    pub browser: BrowserEngine,
}

impl RendererProfile {
    pub fn new(renderer: Renderer, browser: BrowserEngine) -> Self {
        Self { renderer, browser }
    }

    /// Whether stroke widths can be rescaled without rendering glitches.
    ///
    /// VML never can; SVG misrenders rescaled strokes on WebKit and Opera.
    pub fn supports_stroke_rescale(&self) -> bool {
        match self.renderer {
            Renderer::Vml => false,
            Renderer::Svg => !matches!(self.browser, BrowserEngine::Webkit | BrowserEngine::Opera),
            Renderer::Canvas | Renderer::Silverlight => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extent sides below this many projection units turn on scale correction
    pub correction_threshold: f64,
    /// Factor divided out of the group scale while correction is active
    pub correction_scale: f64,
    /// Share of the smaller map side used as the extent around a zoomed-to point
    pub point_zoom_factor: f64,
    pub resize: ResizePolicy,
    pub renderer: RendererProfile,
    pub zoom_scales: ZoomScales,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            correction_threshold: CORRECTION_THRESHOLD,
            correction_scale: CORRECTION_SCALE,
            point_zoom_factor: POINT_ZOOM_FACTOR,
            resize: ResizePolicy::default(),
            renderer: RendererProfile::default(),
            zoom_scales: ZoomScales::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.correction_threshold.is_finite() && self.correction_threshold >= 0.0) {
            return Err(EngineError::Config(format!(
                "correction_threshold must be a non-negative number, got {}",
                self.correction_threshold
            )));
        }
        if !(self.correction_scale.is_finite() && self.correction_scale > 0.0) {
            return Err(EngineError::Config(format!(
                "correction_scale must be positive, got {}",
                self.correction_scale
            )));
        }
        if !(self.point_zoom_factor.is_finite() && self.point_zoom_factor > 0.0) {
            return Err(EngineError::Config(format!(
                "point_zoom_factor must be positive, got {}",
                self.point_zoom_factor
            )));
        }
        if let Some(zoom) = self
            .zoom_scales
            .0
            .iter()
            .position(|s| !(s.is_finite() && *s > 0.0))
        {
            return Err(EngineError::Config(format!(
                "zoom scale for level {} must be positive",
                zoom
            )));
        }
        Ok(())
    }

    pub fn with_resize(mut self, resize: ResizePolicy) -> Self {
        self.resize = resize;
        self
    }

    pub fn with_renderer(mut self, renderer: RendererProfile) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_zoom_scales(mut self, zoom_scales: ZoomScales) -> Self {
        self.zoom_scales = zoom_scales;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zoom_table_doubles() {
        let scales = ZoomScales::web_mercator();
        assert_eq!(scales.len(), 21);
        let ratio = scales.get(5).unwrap() / scales.get(4).unwrap();
        assert!((ratio - 2.0).abs() < 1e-12);
        assert!(scales.get(21).is_none());
    }

    #[test]
    fn test_stroke_rescale_exceptions() {
        use BrowserEngine::*;
        assert!(!RendererProfile::new(Renderer::Vml, Trident).supports_stroke_rescale());
        assert!(!RendererProfile::new(Renderer::Svg, Webkit).supports_stroke_rescale());
        assert!(!RendererProfile::new(Renderer::Svg, Opera).supports_stroke_rescale());
        assert!(RendererProfile::new(Renderer::Svg, Gecko).supports_stroke_rescale());
        assert!(RendererProfile::new(Renderer::Canvas, Webkit).supports_stroke_rescale());
    }

    #[test]
    fn test_partial_json_config() {
        let config = EngineConfig::from_json(
            r#"{ "correction_threshold": 50, "resize": { "lines": false }, "zoom_scales": [1, 2, 4] }"#,
        )
        .unwrap();

        assert_eq!(config.correction_threshold, 50.0);
        assert_eq!(config.correction_scale, CORRECTION_SCALE);
        assert!(config.resize.points);
        assert!(!config.resize.lines);
        assert_eq!(config.zoom_scales.get(2), Some(4.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "correction_scale": 0 }"#),
            Err(EngineError::Config(_))
        ));
        assert!(EngineConfig::from_json(r#"{ "zoom_scales": [1, -2] }"#).is_err());
        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(EngineError::Serialization(_))
        ));
    }
}
