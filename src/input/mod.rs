pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{
    EngineEvent, EngineEventKind, FeatureEvent, FeatureEventKind, MapPointerEvent, MouseButton,
    NativeEvent, NativeEventKind,
};
pub use handler::{EventCallback, EventHub, Subscription};
