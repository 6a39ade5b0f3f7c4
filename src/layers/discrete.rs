use crate::core::{config::ZoomScales, extent::Extent, geo::Point};
use crate::layers::base::{LayerTrait, LayerType};

/// Layer that can only show the zoom levels of a scale table, like a tile
/// pyramid. It tracks its zoom and center; fetching tiles is up to the host.
#[derive(Debug, Clone)]
pub struct DiscreteScaleLayer {
    id: String,
    scales: ZoomScales,
    /// Viewport size in pixels the layer fits extents into
    size: Point,
    zoom: u32,
    center: Point,
}

impl DiscreteScaleLayer {
    pub fn new(id: &str, scales: ZoomScales, size: Point) -> Self {
        Self {
            id: id.to_string(),
            scales,
            size,
            zoom: 0,
            center: Point::default(),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    fn max_zoom(&self) -> u32 {
        self.scales.len().saturating_sub(1) as u32
    }
}

impl LayerTrait for DiscreteScaleLayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn layer_type(&self) -> LayerType {
        LayerType::Tile
    }

    /// Picks the deepest zoom at which the whole extent still fits
    fn zoom_to(&mut self, extent: &Extent) {
        let mut best_zoom = 0;
        for zoom in 0..=self.max_zoom() {
            let Some(scale) = self.scales.get(zoom) else {
                break;
            };
            if extent.width() * scale <= self.size.x && extent.height() * scale <= self.size.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }
        self.zoom = best_zoom;
        self.center = extent.center();
        log::debug!("layer {} snapped to zoom {}", self.id, self.zoom);
    }

    fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom.min(self.max_zoom());
    }

    fn set_center_and_zoom(&mut self, center: Point, zoom: u32) {
        self.set_center(center);
        self.set_zoom(zoom);
    }

    fn discrete_scales(&self) -> bool {
        true
    }

    fn scale(&self) -> f64 {
        self.scales.get(self.zoom).unwrap_or(1.0)
    }

    fn zoom(&self) -> u32 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> DiscreteScaleLayer {
        DiscreteScaleLayer::new(
            "tiles",
            ZoomScales::new(vec![1.0, 2.0, 4.0, 8.0]),
            Point::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_snaps_to_deepest_fitting_zoom() {
        let mut layer = layer();
        layer.zoom_to(&Extent::new(0.0, 0.0, 100.0, 100.0).unwrap());
        // 100 * 4 fits 600, 100 * 8 does not
        assert_eq!(layer.zoom(), 2);
        assert_eq!(layer.scale(), 4.0);
        assert_eq!(layer.center(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_set_zoom_clamps_to_table() {
        let mut layer = layer();
        layer.set_center_and_zoom(Point::new(1.0, 2.0), 9);
        assert_eq!(layer.zoom(), 3);
        assert_eq!(layer.center(), Point::new(1.0, 2.0));
    }
}
