pub mod config;
pub mod constants;
pub mod engine;
pub mod extent;
pub mod geo;
pub mod map;
pub mod matrix;
pub mod view;

pub use config::{EngineConfig, RendererProfile, ResizePolicy, ZoomScales};
pub use engine::{Camera, ViewTransformEngine};
pub use extent::{Extent, ExtentShape};
pub use geo::{LatLng, Point, Projection};
pub use map::{MapDescriptor, MapOptions};
pub use matrix::Matrix2D;
pub use view::ViewState;
