//! Collaborator contracts of the view transform engine.
//!
//! The engine does not own the map, the placemark factory or the host page;
//! it talks to them through these traits.

use crate::{
    core::{extent::Extent, geo::Point, matrix::Matrix2D, view::ViewState},
    features::placemark::Placemark,
    ui::dom::DomNode,
    Result,
};

/// The map an engine renders
pub trait MapHost {
    /// Node the engine mounts its own container into
    fn container(&self) -> &DomNode;

    /// Surface width in pixels
    fn width(&self) -> f64;

    /// Surface height in pixels
    fn height(&self) -> f64;

    /// Full extent of the map's data in projection units
    fn bbox(&self) -> Result<Extent>;

    /// Current map extent if the host tracks one separately from [`MapHost::bbox`]
    fn extent(&self) -> Option<Extent> {
        None
    }

    fn min_zoom(&self) -> u32;

    fn max_zoom(&self) -> u32;

    /// Normalizes a user-supplied center into map projection units
    fn get_coords(&self, center: Point) -> Point {
        center
    }

    /// Per-map override of point resizing
    fn resize_points(&self) -> Option<bool> {
        None
    }

    /// Per-map override of line resizing
    fn resize_lines(&self) -> Option<bool> {
        None
    }

    /// Per-map override of area resizing
    fn resize_areas(&self) -> Option<bool> {
        None
    }
}

/// Produces screen-side placement for placemarks
pub trait PlacemarkFactory {
    /// Called once the engine knows its extent and correction
    fn init(&mut self, view: &ViewState) {
        let _ = view;
    }

    /// Called right after [`PlacemarkFactory::init`]
    fn prepare(&mut self, view: &ViewState) {
        let _ = view;
    }

    /// Projected horizontal offset of a map x coordinate
    fn get_x(&self, x: f64) -> f64;

    /// Projected vertical offset of a map y coordinate
    fn get_y(&self, y: f64) -> f64;

    /// Refreshes length-dependent state after the scale changed
    fn calculate_length_denominator(&mut self, view: &ViewState);

    /// Transform to apply to every text shape of `placemark`
    fn calculate_text_position(&self, placemark: &Placemark, view: &ViewState) -> Matrix2D;
}

/// Anything that can host extra DOM nodes over the map surface
pub trait DivHost {
    fn append_div(&self, node: &DomNode) -> Result<()>;
}
