pub mod factory;
pub mod group;
pub mod placemark;
pub mod resize;
pub mod shape;

pub use factory::ProjectedPlacemarkFactory;
pub use group::{FeatureNode, Group};
pub use placemark::{FeatureType, Geometry, Placemark};
pub use resize::FeatureResizer;
pub use shape::{Shape, Stroke};
