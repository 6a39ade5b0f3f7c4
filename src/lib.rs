//! # scenemap
//!
//! View transform engine for vector maps drawn on a retained-mode surface.
//!
//! The engine keeps a single affine transform on the surface's top group
//! and derives everything else from it: fitting extents, jumping to a
//! camera, panning and stepping zoom levels, converting between container
//! pixels and map coordinates, and counter-scaling placemarks so symbols
//! and strokes keep their on-screen size while the map zooms.

pub mod core;
pub mod features;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{EngineConfig, RendererProfile, ResizePolicy, ZoomScales},
    engine::{Camera, ViewTransformEngine},
    extent::Extent,
    geo::Point,
    map::{MapDescriptor, MapOptions},
    matrix::Matrix2D,
    view::ViewState,
};

pub use features::{
    factory::ProjectedPlacemarkFactory,
    group::Group,
    placemark::{FeatureType, Geometry, Placemark},
    shape::{Shape, Stroke},
};

pub use input::{
    events::{EngineEvent, FeatureEvent, MapPointerEvent, NativeEvent},
    handler::Subscription,
};

pub use layers::{base::LayerTrait, discrete::DiscreteScaleLayer};

pub use traits::{DivHost, MapHost, PlacemarkFactory};

pub use ui::{dom::DomNode, toolbar::Toolbar};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, EngineError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("No scale configured for zoom level {0}")]
    UnknownZoom(u32),

    #[error("Engine is not initialized")]
    NotInitialized,

    #[error("Engine is already initialized")]
    AlreadyInitialized,

    #[error("Engine is not prepared")]
    NotPrepared,

    #[error("Engine has been destroyed")]
    Destroyed,

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = EngineError;

/// Installs `env_logger` as the `log` backend; safe to call more than once
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init();
}
