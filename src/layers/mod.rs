pub mod base;
pub mod discrete;
pub mod manager;

pub use base::{LayerTrait, LayerType};
pub use discrete::DiscreteScaleLayer;
pub use manager::LayerManager;
