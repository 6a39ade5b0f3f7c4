use crate::core::{extent::Extent, geo::Point};
use crate::features::shape::Shape;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Broad geometry class of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Point,
    Line,
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Point),
    Line(Vec<Point>),
    /// Outer ring first, then holes
    Area(Vec<Vec<Point>>),
}

impl Geometry {
    pub fn feature_type(&self) -> FeatureType {
        match self {
            Geometry::Point(_) => FeatureType::Point,
            Geometry::Line(_) => FeatureType::Line,
            Geometry::Area(_) => FeatureType::Area,
        }
    }

    fn points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        match self {
            Geometry::Point(p) => Box::new(std::iter::once(p)),
            Geometry::Line(line) => Box::new(line.iter()),
            Geometry::Area(rings) => Box::new(rings.iter().flatten()),
        }
    }

    /// Bounding extent of all vertices, `None` for empty geometries
    pub fn extent(&self) -> Option<Result<Extent>> {
        let mut points = self.points();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Extent::new(min.x, min.y, max.x, max.y))
    }

    /// Point a text label is attached to
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Geometry::Point(p) => Some(*p),
            Geometry::Line(line) => line.get(line.len() / 2).copied(),
            Geometry::Area(rings) => {
                let outer = rings.first()?;
                let first = *outer.first()?;
                let (min, max) = outer.iter().fold((first, first), |(min, max), p| {
                    (
                        Point::new(min.x.min(p.x), min.y.min(p.y)),
                        Point::new(max.x.max(p.x), max.y.max(p.y)),
                    )
                });
                Some(Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0))
            }
        }
    }
}

/// Renderable map entity: base shapes plus optional text labels
#[derive(Debug)]
pub struct Placemark {
    pub id: String,
    pub geometry: Geometry,
    pub base_shapes: Vec<Shape>,
    pub text_shapes: Vec<Shape>,
    /// Removed from display but not yet detached from its group
    pub invalid: bool,
}

impl Placemark {
    pub fn new(id: &str, geometry: Geometry) -> Self {
        Self {
            id: id.to_string(),
            geometry,
            base_shapes: Vec::new(),
            text_shapes: Vec::new(),
            invalid: false,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.base_shapes.push(shape);
        self
    }

    pub fn with_text(mut self, shape: Shape) -> Self {
        self.text_shapes.push(shape);
        self
    }

    pub fn feature_type(&self) -> FeatureType {
        self.geometry.feature_type()
    }

    pub fn is_point(&self) -> bool {
        self.feature_type() == FeatureType::Point
    }

    pub fn is_line(&self) -> bool {
        self.feature_type() == FeatureType::Line
    }

    pub fn is_area(&self) -> bool {
        self.feature_type() == FeatureType::Area
    }

    pub fn has_text(&self) -> bool {
        !self.text_shapes.is_empty()
    }
}
