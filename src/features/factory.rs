use crate::core::{geo::Point, matrix::Matrix2D, view::ViewState};
use crate::features::placemark::Placemark;
use crate::traits::PlacemarkFactory;

/// Placemark factory for maps whose features are stored in projection units.
///
/// Offsets are measured from the top-left corner of the map extent and
/// carry the scale correction, matching the engine's group transform.
#[derive(Debug, Clone)]
pub struct ProjectedPlacemarkFactory {
    view: Option<ViewState>,
    /// Projection units covered by one pixel at the current scale
    length_denominator: f64,
    /// Pixel offset of text labels from their anchor
    label_offset: Point,
}

impl Default for ProjectedPlacemarkFactory {
    fn default() -> Self {
        Self {
            view: None,
            length_denominator: 1.0,
            label_offset: Point::default(),
        }
    }
}

impl ProjectedPlacemarkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_offset(mut self, offset: Point) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn length_denominator(&self) -> f64 {
        self.length_denominator
    }

    /// Converts a length in pixels to projection units
    pub fn pixels_to_length(&self, pixels: f64) -> f64 {
        pixels * self.length_denominator
    }
}

impl PlacemarkFactory for ProjectedPlacemarkFactory {
    fn init(&mut self, view: &ViewState) {
        self.view = Some(*view);
    }

    fn prepare(&mut self, view: &ViewState) {
        self.view = Some(*view);
        self.length_denominator = 1.0 / view.true_scale();
    }

    fn get_x(&self, x: f64) -> f64 {
        self.view.map_or(x, |v| v.project_x(x))
    }

    fn get_y(&self, y: f64) -> f64 {
        self.view.map_or(-y, |v| v.project_y(y))
    }

    fn calculate_length_denominator(&mut self, view: &ViewState) {
        self.view = Some(*view);
        self.length_denominator = 1.0 / view.true_scale();
        log::trace!("length denominator now {}", self.length_denominator);
    }

    fn calculate_text_position(&self, placemark: &Placemark, view: &ViewState) -> Matrix2D {
        let Some(anchor) = placemark.geometry.anchor() else {
            return Matrix2D::identity();
        };
        // labels keep their pixel size whatever the group scale is
        let inverse_scale = 1.0 / view.group_scale();
        Matrix2D::compose(&[
            Matrix2D::translate(view.project_x(anchor.x), view.project_y(anchor.y)),
            Matrix2D::scale(inverse_scale),
            Matrix2D::translate(self.label_offset.x, self.label_offset.y),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extent::Extent;
    use crate::features::placemark::Geometry;

    fn view() -> ViewState {
        let mut view = ViewState::new(Extent::new(100.0, 0.0, 200.0, 50.0).unwrap());
        view.transform = Some(Matrix2D::scale(4.0));
        view
    }

    #[test]
    fn test_offsets_from_top_left() {
        let mut factory = ProjectedPlacemarkFactory::new();
        factory.init(&view());
        assert_eq!(factory.get_x(150.0), 50.0);
        assert_eq!(factory.get_y(40.0), 10.0);
    }

    #[test]
    fn test_length_denominator() {
        let mut factory = ProjectedPlacemarkFactory::new();
        factory.calculate_length_denominator(&view());
        assert_eq!(factory.length_denominator(), 0.25);
        assert_eq!(factory.pixels_to_length(8.0), 2.0);
    }

    #[test]
    fn test_text_keeps_screen_size() {
        let factory = ProjectedPlacemarkFactory::new().with_label_offset(Point::new(4.0, 0.0));
        let view = view();
        let placemark = Placemark::new("p", Geometry::Point(Point::new(110.0, 30.0)));
        let text = factory.calculate_text_position(&placemark, &view);

        let on_screen = view.transform_or_identity().multiply(&text);
        assert_eq!(on_screen.xx, 1.0);
        // anchor at (10, 20) projected, times 4, plus the 4px offset
        assert_eq!(on_screen.apply(Point::new(0.0, 0.0)), Point::new(44.0, 80.0));
    }
}
