//! Prelude module for common scenemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use scenemap::prelude::*;`

pub use crate::core::{
    config::{BrowserEngine, EngineConfig, Renderer, RendererProfile, ResizePolicy, ZoomScales},
    engine::{Camera, ViewTransformEngine},
    extent::{Extent, ExtentShape},
    geo::{LatLng, Point, Projection},
    map::{MapDescriptor, MapOptions},
    matrix::Matrix2D,
    view::ViewState,
};

pub use crate::features::{
    factory::ProjectedPlacemarkFactory,
    group::{FeatureNode, Group},
    placemark::{FeatureType, Geometry, Placemark},
    shape::{Shape, Stroke},
};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    discrete::DiscreteScaleLayer,
    manager::LayerManager,
};

pub use crate::input::{
    events::{
        EngineEvent, EngineEventKind, FeatureEvent, FeatureEventKind, MapPointerEvent,
        MouseButton, NativeEvent, NativeEventKind,
    },
    handler::{EventCallback, EventHub, Subscription},
};

pub use crate::rendering::surface::Surface;

pub use crate::traits::{DivHost, MapHost, PlacemarkFactory};

pub use crate::ui::{dom::DomNode, toolbar::Toolbar};

pub use crate::{EngineError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
