use crate::core::{extent::Extent, geo::Point, matrix::Matrix2D};
use serde::{Deserialize, Serialize};

/// Snapshot of everything needed to map between container pixels and map
/// coordinates: the top group transform, the map extent the projected
/// offsets are measured from, and the active scale correction.
///
/// Projected offsets are `(x - min_x, max_y - y)` multiplied by the
/// correction factor, so the group scale is the true scale divided by it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Top group transform, `None` until the first zoom
    pub transform: Option<Matrix2D>,
    pub extent: Extent,
    /// Correction factor when scale correction is active
    pub correction: Option<f64>,
}

impl ViewState {
    pub fn new(extent: Extent) -> Self {
        Self {
            transform: None,
            extent,
            correction: None,
        }
    }

    pub fn transform_or_identity(&self) -> Matrix2D {
        self.transform.unwrap_or_default()
    }

    pub fn correction_factor(&self) -> f64 {
        self.correction.unwrap_or(1.0)
    }

    /// Scale stored in the group transform (corrected when correction is on)
    pub fn group_scale(&self) -> f64 {
        self.transform.map_or(1.0, |t| t.xx)
    }

    /// Pixels per projection unit
    pub fn true_scale(&self) -> f64 {
        self.group_scale() * self.correction_factor()
    }

    /// Horizontal projected offset of a map x coordinate
    pub fn project_x(&self, x: f64) -> f64 {
        (x - self.extent.min_x) * self.correction_factor()
    }

    /// Vertical projected offset of a map y coordinate; grows downwards
    pub fn project_y(&self, y: f64) -> f64 {
        (self.extent.max_y - y) * self.correction_factor()
    }

    /// Map coordinates of a top-left origin, in projection units relative to the extent
    fn origin(&self) -> (Point, f64) {
        let t = self.transform_or_identity();
        let mut scale = t.xx;
        let mut origin = Point::new(-t.dx / scale, -t.dy / scale);
        if let Some(correction) = self.correction {
            origin = origin.multiply(1.0 / correction);
            scale *= correction;
        }
        (origin, scale)
    }

    /// Converts a pixel position inside the map container into map coordinates
    pub fn container_pixel_to_coords(&self, px: f64, py: f64) -> Point {
        let (origin, scale) = self.origin();
        Point::new(
            self.extent.min_x + origin.x + px / scale,
            self.extent.max_y - origin.y - py / scale,
        )
    }

    /// Converts map coordinates into a pixel position inside the map container
    pub fn coords_to_container_pixel(&self, coords: Point) -> Point {
        let (origin, scale) = self.origin();
        Point::new(
            (coords.x - self.extent.min_x - origin.x) * scale,
            (self.extent.max_y - coords.y - origin.y) * scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent() -> Extent {
        Extent::new(0.0, 0.0, 100.0, 100.0).unwrap()
    }

    #[test]
    fn test_identity_view() {
        let view = ViewState::new(extent());
        assert_eq!(view.group_scale(), 1.0);
        // pixel y grows downwards, map y upwards
        assert_eq!(view.container_pixel_to_coords(10.0, 10.0), Point::new(10.0, 90.0));
    }

    #[test]
    fn test_forward_matches_group_transform() {
        let mut view = ViewState::new(extent());
        view.transform = Some(Matrix2D::compose(&[
            Matrix2D::translate(100.0, 0.0),
            Matrix2D::scale(6.0),
        ]));
        let coords = Point::new(25.0, 75.0);
        let projected = Point::new(view.project_x(coords.x), view.project_y(coords.y));
        let expected = view.transform_or_identity().apply(projected);
        let pixel = view.coords_to_container_pixel(coords);

        assert!(pixel.distance_to(&expected) < 1e-9);
        assert!(view.container_pixel_to_coords(pixel.x, pixel.y).distance_to(&coords) < 1e-9);
    }

    #[test]
    fn test_round_trip_with_correction() {
        let mut view = ViewState::new(Extent::new(0.0, 0.0, 10.0, 8.0).unwrap());
        view.correction = Some(10_000.0);
        view.transform = Some(Matrix2D::compose(&[
            Matrix2D::translate(13.0, 4.0),
            Matrix2D::scale(60.0 / 10_000.0),
            Matrix2D::translate(-2_000.0, -500.0),
        ]));
        assert!((view.true_scale() - 60.0).abs() < 1e-9);

        let coords = Point::new(3.25, 6.5);
        let pixel = view.coords_to_container_pixel(coords);
        let projected = Point::new(view.project_x(coords.x), view.project_y(coords.y));
        assert!(pixel.distance_to(&view.transform_or_identity().apply(projected)) < 1e-9);

        let back = view.container_pixel_to_coords(pixel.x, pixel.y);
        assert!(back.distance_to(&coords) < 1e-9);
    }
}
