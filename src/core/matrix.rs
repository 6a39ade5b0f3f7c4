//! 2D affine matrices in the scene-graph convention:
//! `x' = xx·x + xy·y + dx`, `y' = yx·x + yy·y + dy`.
//!
//! A transform list `[A, B, C]` means `A · B · C`, so `C` is applied to a
//! point first and `A` last.

use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2D {
    pub xx: f64,
    pub xy: f64,
    pub yx: f64,
    pub yy: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix2D {
    pub fn identity() -> Self {
        Self {
            xx: 1.0,
            xy: 0.0,
            yx: 0.0,
            yy: 1.0,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::identity()
        }
    }

    /// Uniform scale about the origin
    pub fn scale(factor: f64) -> Self {
        Self {
            xx: factor,
            yy: factor,
            ..Self::identity()
        }
    }

    /// Uniform scale that keeps `center` in place
    pub fn scale_at(factor: f64, center: Point) -> Self {
        Self {
            xx: factor,
            yy: factor,
            dx: center.x * (1.0 - factor),
            dy: center.y * (1.0 - factor),
            ..Self::identity()
        }
    }

    /// Returns `self · other`
    pub fn multiply(&self, other: &Matrix2D) -> Matrix2D {
        Matrix2D {
            xx: self.xx * other.xx + self.xy * other.yx,
            xy: self.xx * other.xy + self.xy * other.yy,
            yx: self.yx * other.xx + self.yy * other.yx,
            yy: self.yx * other.xy + self.yy * other.yy,
            dx: self.xx * other.dx + self.xy * other.dy + self.dx,
            dy: self.yx * other.dx + self.yy * other.dy + self.dy,
        }
    }

    /// Folds a transform list into a single matrix
    pub fn compose(list: &[Matrix2D]) -> Matrix2D {
        list.iter()
            .fold(Matrix2D::identity(), |acc, m| acc.multiply(m))
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.xx * point.x + self.xy * point.y + self.dx,
            self.yx * point.x + self.yy * point.y + self.dy,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    pub fn invert(&self) -> Option<Matrix2D> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Matrix2D {
            xx: self.yy / det,
            xy: -self.xy / det,
            yx: -self.yx / det,
            yy: self.xx / det,
            dx: (self.xy * self.dy - self.yy * self.dx) / det,
            dy: (self.yx * self.dx - self.xx * self.dy) / det,
        })
    }

    pub fn is_finite(&self) -> bool {
        [self.xx, self.xy, self.yx, self.yy, self.dx, self.dy]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn approx_eq(&self, other: &Matrix2D, tolerance: f64) -> bool {
        (self.xx - other.xx).abs() <= tolerance
            && (self.xy - other.xy).abs() <= tolerance
            && (self.yx - other.yx).abs() <= tolerance
            && (self.yy - other.yy).abs() <= tolerance
            && (self.dx - other.dx).abs() <= tolerance
            && (self.dy - other.dy).abs() <= tolerance
    }
}
