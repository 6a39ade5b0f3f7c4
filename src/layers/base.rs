use crate::core::{extent::Extent, geo::Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Image,
    Custom,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Image => write!(f, "image"),
            LayerType::Custom => write!(f, "custom"),
        }
    }
}

/// A layer drawn underneath the engine's surface, usually tile-backed.
///
/// The engine keeps layers in step with its own view: every zoom or pan is
/// propagated to each layer, in order, before the group transform changes.
pub trait LayerTrait {
    fn id(&self) -> &str;

    fn layer_type(&self) -> LayerType {
        LayerType::Custom
    }

    /// Fit the layer to `extent`
    fn zoom_to(&mut self, extent: &Extent);

    fn set_center(&mut self, center: Point);

    fn set_zoom(&mut self, zoom: u32);

    fn set_center_and_zoom(&mut self, center: Point, zoom: u32);

    /// Whether the layer can only render at its own discrete scales
    fn discrete_scales(&self) -> bool {
        false
    }

    /// Current scale of the layer in pixels per projection unit
    fn scale(&self) -> f64;

    /// Current zoom level of the layer
    fn zoom(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::Image.to_string(), "image");
        assert_eq!(LayerType::Custom.to_string(), "custom");
    }
}
