use crate::core::{extent::Extent, geo::Point};
use serde::{Deserialize, Serialize};

/// Native pointer event kinds a map container can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeEventKind {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseOver,
    MouseOut,
    Wheel,
}

impl NativeEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeEventKind::Click => "click",
            NativeEventKind::DblClick => "dblclick",
            NativeEventKind::MouseDown => "mousedown",
            NativeEventKind::MouseUp => "mouseup",
            NativeEventKind::MouseMove => "mousemove",
            NativeEventKind::MouseOver => "mouseover",
            NativeEventKind::MouseOut => "mouseout",
            NativeEventKind::Wheel => "wheel",
        }
    }
}

impl std::fmt::Display for NativeEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Event delivered by the host environment, positioned in page coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeEvent {
    pub kind: NativeEventKind,
    pub page: Point,
    pub button: Option<MouseButton>,
}

impl NativeEvent {
    pub fn new(kind: NativeEventKind, page_x: f64, page_y: f64) -> Self {
        Self {
            kind,
            page: Point::new(page_x, page_y),
            button: None,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }
}

/// Native event enriched with the map coordinates under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct MapPointerEvent {
    pub map_coords: Point,
    pub native: NativeEvent,
}

/// The only events a feature's shapes forward to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureEventKind {
    MouseOver,
    MouseOut,
    Click,
}

impl FeatureEventKind {
    /// Name of the shape-level event the kind is wired to
    pub fn shape_event(&self) -> &'static str {
        match self {
            FeatureEventKind::MouseOver => "onmouseover",
            FeatureEventKind::MouseOut => "onmouseout",
            FeatureEventKind::Click => "onclick",
        }
    }
}

impl From<FeatureEventKind> for NativeEventKind {
    fn from(kind: FeatureEventKind) -> Self {
        match kind {
            FeatureEventKind::MouseOver => NativeEventKind::MouseOver,
            FeatureEventKind::MouseOut => NativeEventKind::MouseOut,
            FeatureEventKind::Click => NativeEventKind::Click,
        }
    }
}

/// Event fired on one of a feature's shapes
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEvent {
    pub kind: FeatureEventKind,
    pub feature_id: String,
    pub native: NativeEvent,
}

/// Property-change notifications emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// The view scale changed; `zoom` is the base layer's zoom, if any
    ZoomChanged { zoom: Option<u32>, scale: f64 },
    /// The visible extent changed
    ExtentChanged { extent: Extent },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEventKind {
    ZoomChanged,
    ExtentChanged,
}

impl EngineEvent {
    pub fn kind(&self) -> EngineEventKind {
        match self {
            EngineEvent::ZoomChanged { .. } => EngineEventKind::ZoomChanged,
            EngineEvent::ExtentChanged { .. } => EngineEventKind::ExtentChanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_event_mapping() {
        assert_eq!(FeatureEventKind::Click.shape_event(), "onclick");
        assert_eq!(
            NativeEventKind::from(FeatureEventKind::MouseOut),
            NativeEventKind::MouseOut
        );
    }

    #[test]
    fn test_native_event_kind_names() {
        assert_eq!(NativeEventKind::MouseMove.to_string(), "mousemove");
        let kind: NativeEventKind = serde_json::from_str("\"dblclick\"").unwrap();
        assert_eq!(kind, NativeEventKind::DblClick);
    }

    #[test]
    fn test_engine_event_kind() {
        let event = EngineEvent::ZoomChanged {
            zoom: Some(3),
            scale: 2.0,
        };
        assert_eq!(event.kind(), EngineEventKind::ZoomChanged);
    }
}
