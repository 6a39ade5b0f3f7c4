use crate::core::geo::Point;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned box `[min_x, min_y, max_x, max_y]` in map projection units.
///
/// Zero width and/or height is allowed and describes a point or a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Shape of an extent once its zero-sized sides are taken into account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentShape {
    Point,
    VerticalLine,
    HorizontalLine,
    Area,
}

impl Extent {
    /// Creates a validated extent
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let extent = Self {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        extent.validate()?;
        Ok(extent)
    }

    /// Degenerate extent holding a single point
    pub fn from_point(point: Point) -> Result<Self> {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// Checks finiteness and ordering of the corners
    pub fn validate(&self) -> Result<()> {
        let coords = [self.min_x, self.min_y, self.max_x, self.max_y];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(EngineError::InvalidExtent(format!(
                "non-finite coordinate in {:?}",
                coords
            )));
        }
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(EngineError::InvalidExtent(format!(
                "min corner exceeds max corner in {:?}",
                coords
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn shape(&self) -> ExtentShape {
        match (self.width() == 0.0, self.height() == 0.0) {
            (true, true) => ExtentShape::Point,
            (true, false) => ExtentShape::VerticalLine,
            (false, true) => ExtentShape::HorizontalLine,
            (false, false) => ExtentShape::Area,
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

impl TryFrom<[f64; 4]> for Extent {
    type Error = EngineError;

    fn try_from(value: [f64; 4]) -> Result<Self> {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl From<Extent> for [f64; 4] {
    fn from(value: Extent) -> Self {
        value.to_array()
    }
}
