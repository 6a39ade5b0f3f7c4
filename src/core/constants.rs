//! Core constants for the view transform engine.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels, used to derive the default zoom table.
pub const TILE_SIZE: u32 = 256;

/// Length of the Web Mercator equator in projection units (meters).
pub const EQUATOR_LENGTH: f64 = 40_075_016.685_578_49;

/// Highest zoom level present in the default zoom table.
pub const DEFAULT_MAX_ZOOM: u32 = 20;

/// Extents narrower or lower than this (in projection units) turn on scale correction.
pub const CORRECTION_THRESHOLD: f64 = 1000.0;

/// Factor folded out of the group scale while scale correction is active.
pub const CORRECTION_SCALE: f64 = 10_000.0;

/// Share of the smaller map extent side used when zooming to a single point.
pub const POINT_ZOOM_FACTOR: f64 = 0.01;

/// Stacking order applied to widgets mounted over the map surface.
pub const WIDGET_Z_INDEX: i32 = 1000;

/// CSS class added to toolbars mounted over the map.
pub const TOOLBAR_CLASS: &str = "scenemapToolbar";
