//! Counter-scaling of cartographic symbols.
//!
//! The surface scales all content through one group transform. Without this
//! pass markers and stroke widths would grow and shrink with the zoom.

use crate::core::{config::{RendererProfile, ResizePolicy}, matrix::Matrix2D, view::ViewState};
use crate::features::{
    group::{FeatureNode, Group},
    placemark::Placemark,
};
use crate::traits::PlacemarkFactory;

pub struct FeatureResizer<'a, F: PlacemarkFactory + ?Sized> {
    pub policy: ResizePolicy,
    pub renderer: RendererProfile,
    pub factory: &'a F,
    pub view: &'a ViewState,
}

impl<'a, F: PlacemarkFactory + ?Sized> FeatureResizer<'a, F> {
    pub fn new(
        policy: ResizePolicy,
        renderer: RendererProfile,
        factory: &'a F,
        view: &'a ViewState,
    ) -> Self {
        Self {
            policy,
            renderer,
            factory,
            view,
        }
    }

    /// Resizes every placemark below `group` by `scale_factor`.
    ///
    /// Returns the number of placemarks visited, invalid ones included.
    pub fn resize_group(&self, group: &mut Group, scale_factor: f64) -> usize {
        group
            .children
            .iter_mut()
            .map(|child| match child {
                FeatureNode::Placemark(p) => {
                    self.resize_placemark(p, scale_factor);
                    1
                }
                FeatureNode::Group(g) => self.resize_group(g, scale_factor),
            })
            .sum()
    }

    pub fn resize_placemark(&self, placemark: &mut Placemark, scale_factor: f64) {
        if placemark.invalid {
            return;
        }

        if self.policy.points && placemark.is_point() {
            let scale = Matrix2D::scale(scale_factor);
            for shape in &mut placemark.base_shapes {
                shape.apply_right_transform(&scale);
            }
        } else if self.renderer.supports_stroke_rescale()
            && ((self.policy.lines && placemark.is_line())
                || (self.policy.areas && placemark.is_area()))
        {
            for shape in &mut placemark.base_shapes {
                if let Some(stroke) = shape.stroke() {
                    let mut stroke = stroke.clone();
                    stroke.width *= scale_factor;
                    shape.set_stroke(Some(stroke));
                }
            }
        }

        if placemark.has_text() {
            let transform = self.factory.calculate_text_position(placemark, self.view);
            for text in &mut placemark.text_shapes {
                text.set_transform(transform);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::{BrowserEngine, Renderer}, extent::Extent, geo::Point};
    use crate::features::{
        factory::ProjectedPlacemarkFactory,
        placemark::Geometry,
        shape::{Shape, Stroke},
    };

    fn line(id: &str) -> Placemark {
        Placemark::new(
            id,
            Geometry::Line(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]),
        )
        .with_shape(Shape::new().with_stroke(Stroke::new("#000", 2.0)))
    }

    fn stroke_width(group: &Group, id: &str) -> f64 {
        group.find_placemark(id).unwrap().base_shapes[0]
            .stroke()
            .unwrap()
            .width
    }

    #[test]
    fn test_strokes_follow_renderer_capability() {
        let view = ViewState::new(Extent::new(0.0, 0.0, 10.0, 10.0).unwrap());
        let factory = ProjectedPlacemarkFactory::new();

        let mut group = Group::new();
        group.add_placemark(line("l"));
        let resizer = FeatureResizer::new(
            ResizePolicy::default(),
            RendererProfile::new(Renderer::Svg, BrowserEngine::Gecko),
            &factory,
            &view,
        );
        resizer.resize_group(&mut group, 0.5);
        assert_eq!(stroke_width(&group, "l"), 1.0);

        let resizer = FeatureResizer::new(
            ResizePolicy::default(),
            RendererProfile::new(Renderer::Vml, BrowserEngine::Trident),
            &factory,
            &view,
        );
        resizer.resize_group(&mut group, 0.5);
        assert_eq!(stroke_width(&group, "l"), 1.0);
    }

    #[test]
    fn test_disabled_policy_and_invalid_skip() {
        let view = ViewState::new(Extent::new(0.0, 0.0, 10.0, 10.0).unwrap());
        let factory = ProjectedPlacemarkFactory::new();
        let policy = ResizePolicy {
            points: false,
            ..ResizePolicy::default()
        };

        let mut group = Group::new();
        group.add_placemark(
            Placemark::new("p", Geometry::Point(Point::new(1.0, 1.0))).with_shape(Shape::new()),
        );
        let mut invalid = line("gone");
        invalid.invalid = true;
        group.add_placemark(invalid);

        let resizer = FeatureResizer::new(policy, RendererProfile::default(), &factory, &view);
        assert_eq!(resizer.resize_group(&mut group, 3.0), 2);

        assert!(group.find_placemark("p").unwrap().base_shapes[0]
            .transform()
            .is_none());
        assert_eq!(stroke_width(&group, "gone"), 2.0);
    }

    #[test]
    fn test_text_repositioned_without_resize_flags() {
        let mut view = ViewState::new(Extent::new(0.0, 0.0, 10.0, 10.0).unwrap());
        view.transform = Some(Matrix2D::scale(2.0));
        let factory = ProjectedPlacemarkFactory::new();
        let policy = ResizePolicy {
            points: false,
            lines: false,
            areas: false,
        };

        let mut group = Group::new();
        group.add_placemark(line("l").with_text(Shape::new()));
        FeatureResizer::new(policy, RendererProfile::default(), &factory, &view)
            .resize_group(&mut group, 0.5);

        let text = group.find_placemark("l").unwrap().text_shapes[0]
            .transform()
            .unwrap();
        assert_eq!(text.xx, 0.5);
        assert_eq!(stroke_width(&group, "l"), 2.0);
    }
}
