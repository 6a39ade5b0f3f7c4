use crate::{layers::base::LayerTrait, EngineError, Result};

/// Ordered layer list; the first layer is the base layer
pub struct LayerManager {
    layers: Vec<Box<dyn LayerTrait>>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a layer; ids must be unique
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        if self.layers.iter().any(|l| l.id() == layer.id()) {
            return Err(EngineError::Layer(format!(
                "layer '{}' is already registered",
                layer.id()
            )));
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        let index = self.layers.iter().position(|l| l.id() == layer_id)?;
        Some(self.layers.remove(index))
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers
            .iter()
            .find(|l| l.id() == layer_id)
            .map(|l| l.as_ref())
    }

    /// The layer that may impose discrete scales
    pub fn base_layer(&self) -> Option<&dyn LayerTrait> {
        self.layers.first().map(|l| l.as_ref())
    }

    /// Lists all layer IDs in order
    pub fn list_layers(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.id().to_string()).collect()
    }

    /// Applies a function to each layer mutably in order
    pub fn for_each_layer_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn LayerTrait),
    {
        for layer in &mut self.layers {
            f(layer.as_mut());
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{extent::Extent, geo::Point};

    struct Fixed(&'static str);

    impl LayerTrait for Fixed {
        fn id(&self) -> &str {
            self.0
        }
        fn zoom_to(&mut self, _extent: &Extent) {}
        fn set_center(&mut self, _center: Point) {}
        fn set_zoom(&mut self, _zoom: u32) {}
        fn set_center_and_zoom(&mut self, _center: Point, _zoom: u32) {}
        fn scale(&self) -> f64 {
            1.0
        }
        fn zoom(&self) -> u32 {
            0
        }
    }

    #[test]
    fn test_order_and_base_layer() {
        let mut manager = LayerManager::new();
        manager.add_layer(Box::new(Fixed("base"))).unwrap();
        manager.add_layer(Box::new(Fixed("overlay"))).unwrap();

        assert_eq!(manager.list_layers(), vec!["base", "overlay"]);
        assert_eq!(manager.base_layer().unwrap().id(), "base");

        manager.remove_layer("base");
        assert_eq!(manager.base_layer().unwrap().id(), "overlay");
        assert!(manager.get_layer("base").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut manager = LayerManager::new();
        manager.add_layer(Box::new(Fixed("a"))).unwrap();
        assert!(matches!(
            manager.add_layer(Box::new(Fixed("a"))),
            Err(EngineError::Layer(_))
        ));
        assert_eq!(manager.len(), 1);
    }
}
