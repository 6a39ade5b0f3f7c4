//! View transform engine.
//!
//! Owns the affine transform between the map's projection space and the
//! surface's pixel space. Every view change goes through the same steps:
//! layers are updated first, then the top group transform is replaced or
//! composed, then placemarks are counter-scaled and listeners notified.

use crate::{
    core::{
        config::{EngineConfig, ResizePolicy},
        extent::{Extent, ExtentShape},
        geo::Point,
        matrix::Matrix2D,
        view::ViewState,
    },
    features::{
        factory::ProjectedPlacemarkFactory,
        group::Group,
        placemark::{FeatureType, Placemark},
        resize::FeatureResizer,
    },
    input::{
        EngineEvent, EngineEventKind, EventCallback, EventHub, FeatureEvent, FeatureEventKind,
        MapPointerEvent, NativeEventKind, Subscription,
    },
    layers::{base::LayerTrait, manager::LayerManager},
    rendering::surface::Surface,
    traits::{DivHost, MapHost, PlacemarkFactory},
    ui::dom::DomNode,
    EngineError, Result,
};
use std::cell::Cell;
use std::rc::Rc;

/// Absolute view request: a center in user coordinates and a zoom level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Point,
    pub zoom: u32,
}

impl Camera {
    pub fn new(center: Point, zoom: u32) -> Self {
        Self { center, zoom }
    }
}

pub struct ViewTransformEngine<H: MapHost, F: PlacemarkFactory = ProjectedPlacemarkFactory> {
    host: H,
    factory: F,
    config: EngineConfig,
    resize: ResizePolicy,
    layers: LayerManager,
    view: Rc<Cell<ViewState>>,
    container: Option<DomNode>,
    surface: Option<Surface>,
    initialized: bool,
    prepared: bool,
    events: EventHub<EngineEventKind, EngineEvent>,
}

impl<H: MapHost> ViewTransformEngine<H> {
    /// Engine using the projected placemark factory
    pub fn with_host(host: H, config: EngineConfig) -> Result<Self> {
        Self::new(host, ProjectedPlacemarkFactory::new(), config)
    }
}

impl<H: MapHost, F: PlacemarkFactory> ViewTransformEngine<H, F> {
    pub fn new(host: H, factory: F, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let placeholder = Extent::new(0.0, 0.0, 0.0, 0.0)?;
        Ok(Self {
            host,
            factory,
            resize: config.resize,
            config,
            layers: LayerManager::new(),
            view: Rc::new(Cell::new(ViewState::new(placeholder))),
            container: None,
            surface: None,
            initialized: false,
            prepared: false,
            events: EventHub::new(),
        })
    }

    /// Mounts the engine container and surface into the map container.
    ///
    /// `ready` runs synchronously once everything is in place. The engine
    /// can be initialized only once.
    pub fn initialize<R: FnOnce()>(&mut self, ready: R) -> Result<()> {
        if self.initialized {
            return Err(EngineError::AlreadyInitialized);
        }

        let map_container = self.host.container();
        map_container.set_style("overflow", "hidden");
        let container = DomNode::create(
            "div",
            &[
                ("width", "100%"),
                ("height", "100%"),
                ("position", "relative"),
            ],
            map_container,
        );
        let surface = Surface::create(
            &container,
            self.host.width(),
            self.host.height(),
            self.config.renderer,
        );

        self.resize = ResizePolicy {
            points: self.host.resize_points().unwrap_or(self.config.resize.points),
            lines: self.host.resize_lines().unwrap_or(self.config.resize.lines),
            areas: self.host.resize_areas().unwrap_or(self.config.resize.areas),
        };
        self.container = Some(container);
        self.surface = Some(surface);
        self.initialized = true;
        log::debug!(
            "engine initialized: {}x{} surface, resize {:?}",
            self.host.width(),
            self.host.height(),
            self.resize
        );

        ready();
        Ok(())
    }

    /// Reads the map extent, decides on scale correction and prepares the factory
    pub fn prepare(&mut self) -> Result<()> {
        self.ensure_live()?;
        let extent = self.host.bbox()?;
        extent.validate()?;

        let corrected = extent.width() < self.config.correction_threshold
            || extent.height() < self.config.correction_threshold;

        let mut view = self.view.get();
        view.extent = extent;
        view.correction = corrected.then_some(self.config.correction_scale);
        self.view.set(view);

        if corrected {
            log::debug!(
                "scale correction on for {}x{} extent (factor {})",
                extent.width(),
                extent.height(),
                self.config.correction_scale
            );
        }

        self.factory.init(&view);
        self.factory.prepare(&view);
        self.prepared = true;
        Ok(())
    }

    /// Fits `extent` into the surface, centered, keeping the aspect ratio.
    ///
    /// Layers are moved before the transform is built. If the base layer then
    /// reports an unusable discrete scale the call fails with
    /// [`EngineError::InvalidScale`], the transform is kept and the layers are
    /// left where they moved.
    pub fn zoom_to(&mut self, extent: &Extent) -> Result<()> {
        self.ensure_ready()?;
        extent.validate()?;

        let (width, height) = self.surface_size()?;
        let view = self.view.get();
        let old_scale = view.group_scale();

        let mut extent_width = extent.width();
        let mut extent_height = extent.height();
        let f = &self.factory;

        let (mut scale, x1, y2) = match extent.shape() {
            ExtentShape::Point => {
                let map_extent = match self.host.extent() {
                    Some(e) => e,
                    None => self.host.bbox()?,
                };
                let size =
                    self.config.point_zoom_factor * map_extent.width().min(map_extent.height());
                if width > height {
                    extent_height = size;
                    extent_width = width / height * size;
                } else {
                    extent_width = size;
                    extent_height = height / width * size;
                }
                (
                    width / extent_width,
                    f.get_x(extent.min_x - extent_width / 2.0),
                    f.get_y(extent.max_y + extent_height / 2.0),
                )
            }
            ExtentShape::VerticalLine => {
                extent_width = extent_height * width / height;
                (
                    height / extent_height,
                    f.get_x(extent.min_x - extent_width / 2.0),
                    f.get_y(extent.max_y),
                )
            }
            ExtentShape::HorizontalLine => {
                extent_height = extent_width * height / width;
                (
                    width / extent_width,
                    f.get_x(extent.min_x),
                    f.get_y(extent.max_y + extent_height / 2.0),
                )
            }
            ExtentShape::Area => (
                (width / extent_width).min(height / extent_height),
                f.get_x(extent.min_x),
                f.get_y(extent.max_y),
            ),
        };
        check_scale(scale)?;

        if !self.layers.is_empty() {
            self.layers.for_each_layer_mut(|layer| layer.zoom_to(extent));
            if let Some(base) = self.layers.base_layer() {
                if base.discrete_scales() {
                    scale = base.scale();
                    check_scale(scale)?;
                }
            }
        }

        // centering works in true pixels, the group scale carries the correction
        let render_scale = scale / view.correction_factor();
        let transform = Matrix2D::compose(&[
            Matrix2D::translate(
                (width - scale * extent_width) / 2.0,
                (height - scale * extent_height) / 2.0,
            ),
            Matrix2D::scale(render_scale),
            Matrix2D::translate(-x1, -y2),
        ]);
        self.apply_transform(transform)?;
        log::debug!("zoom_to {:?}: scale {}", extent.to_array(), scale);

        if old_scale != render_scale {
            self.after_scale_change(old_scale / render_scale)?;
        }

        self.notify_zoom();
        self.notify_extent()
    }

    /// Resizes every placemark on the surface by `scale_factor`.
    ///
    /// Returns the number of placemarks visited.
    pub fn resize_features(&mut self, scale_factor: f64) -> Result<usize> {
        let view = self.view.get();
        let surface = self.surface.as_mut().ok_or(EngineError::NotInitialized)?;
        let resizer = FeatureResizer::new(self.resize, self.config.renderer, &self.factory, &view);
        let visited = resizer.resize_group(surface.group_mut(), scale_factor);
        log::trace!("resized {} placemarks by {}", visited, scale_factor);
        Ok(visited)
    }

    /// Resizes the placemarks of a group that is not mounted on the surface
    pub fn resize_group(&self, group: &mut Group, scale_factor: f64) -> usize {
        let view = self.view.get();
        FeatureResizer::new(self.resize, self.config.renderer, &self.factory, &view)
            .resize_group(group, scale_factor)
    }

    /// Jumps to an absolute center and zoom level
    pub fn set_camera(&mut self, camera: Camera) -> Result<()> {
        self.ensure_ready()?;
        let (width, height) = self.surface_size()?;
        let scale = self.zoom_scale(camera.zoom)?;
        let center = self.normalized_center(camera.center)?;

        let x = self.factory.get_x(center.x - width / scale / 2.0);
        let y = self.factory.get_y(center.y + height / scale / 2.0);

        self.layers
            .for_each_layer_mut(|layer| layer.set_center_and_zoom(center, camera.zoom));

        let render_scale = scale / self.view.get().correction_factor();
        self.apply_transform(Matrix2D::compose(&[
            Matrix2D::scale(render_scale),
            Matrix2D::translate(-x, -y),
        ]))?;
        log::debug!(
            "camera at ({}, {}) zoom {}",
            center.x,
            center.y,
            camera.zoom
        );

        // absolute: placemarks are assumed to be drawn at unit scale
        self.after_scale_change(1.0 / render_scale)?;
        self.notify_zoom();
        self.notify_extent()
    }

    /// Pans so that `center` ends up in the middle of the surface
    pub fn set_center(&mut self, center: Point) -> Result<()> {
        self.ensure_ready()?;
        let (width, height) = self.surface_size()?;
        let center = self.normalized_center(center)?;

        let view = self.view.get();
        let scale = view.group_scale();
        let true_scale = view.true_scale();

        self.layers.for_each_layer_mut(|layer| layer.set_center(center));

        let x = self.factory.get_x(center.x - width / true_scale / 2.0);
        let y = self.factory.get_y(center.y + height / true_scale / 2.0);
        self.apply_transform(Matrix2D::compose(&[
            Matrix2D::scale(scale),
            Matrix2D::translate(-x, -y),
        ]))?;

        self.notify_extent()
    }

    /// Map coordinates under the middle of the surface
    pub fn center(&self) -> Point {
        let width = self.host.width();
        let height = self.host.height();
        self.container_pixel_to_coords(width / 2.0, height / 2.0)
    }

    /// Zooms about the surface center; levels outside the map's limits are ignored
    pub fn set_zoom(&mut self, zoom: u32) -> Result<()> {
        self.ensure_ready()?;
        if zoom < self.host.min_zoom() || zoom > self.host.max_zoom() {
            log::debug!(
                "zoom {} outside [{}, {}], ignored",
                zoom,
                self.host.min_zoom(),
                self.host.max_zoom()
            );
            return Ok(());
        }
        let (width, height) = self.surface_size()?;

        let view = self.view.get();
        let old_scale = view.group_scale();
        let new_scale = self.zoom_scale(zoom)? / view.correction_factor();
        let scale_factor = new_scale / old_scale;
        check_scale(scale_factor)?;

        self.layers.for_each_layer_mut(|layer| layer.set_zoom(zoom));

        let about_center = Matrix2D::scale_at(scale_factor, Point::new(width / 2.0, height / 2.0));
        self.apply_transform(about_center.multiply(&view.transform_or_identity()))?;

        self.after_scale_change(1.0 / scale_factor)?;
        self.notify_zoom();
        Ok(())
    }

    /// Zoom of the base layer, `None` without layers
    pub fn zoom(&self) -> Option<u32> {
        self.layers.base_layer().map(|layer| layer.zoom())
    }

    /// Currently visible extent
    pub fn extent(&self) -> Result<Extent> {
        let bottom_left = self.container_pixel_to_coords(0.0, self.host.height());
        let top_right = self.container_pixel_to_coords(self.host.width(), 0.0);
        Extent::new(bottom_left.x, bottom_left.y, top_right.x, top_right.y)
    }

    pub fn container_pixel_to_coords(&self, px: f64, py: f64) -> Point {
        self.view.get().container_pixel_to_coords(px, py)
    }

    pub fn coords_to_container_pixel(&self, coords: Point) -> Point {
        self.view.get().coords_to_container_pixel(coords)
    }

    /// Listens for a native event on the map container and reports it in map coordinates
    pub fn on_for_map<C>(&self, kind: NativeEventKind, handler: C) -> Result<Subscription>
    where
        C: Fn(&MapPointerEvent) + 'static,
    {
        let container = self.container.clone().ok_or(EngineError::NotInitialized)?;
        let view = Rc::clone(&self.view);
        Ok(self.host.container().on(kind, move |event| {
            let origin = container.page_position();
            let map_coords = view
                .get()
                .container_pixel_to_coords(event.page.x - origin.x, event.page.y - origin.y);
            handler(&MapPointerEvent {
                map_coords,
                native: event.clone(),
            });
        }))
    }

    /// Subscribes `handler` to every base shape of `placemark`
    pub fn on_for_feature<C>(
        &self,
        placemark: &Placemark,
        kind: FeatureEventKind,
        handler: C,
    ) -> Vec<Subscription>
    where
        C: Fn(&FeatureEvent) + 'static,
    {
        let callback: EventCallback<FeatureEvent> = Rc::new(handler);
        placemark
            .base_shapes
            .iter()
            .map(|shape| shape.connect(kind, Rc::clone(&callback)))
            .collect()
    }

    pub fn disconnect(&self, subscriptions: Vec<Subscription>) {
        for subscription in subscriptions {
            subscription.unsubscribe();
        }
    }

    pub fn on_zoom_changed<C>(&self, handler: C) -> Subscription
    where
        C: Fn(&EngineEvent) + 'static,
    {
        self.events.subscribe(EngineEventKind::ZoomChanged, handler)
    }

    pub fn on_extent_changed<C>(&self, handler: C) -> Subscription
    where
        C: Fn(&EngineEvent) + 'static,
    {
        self.events.subscribe(EngineEventKind::ExtentChanged, handler)
    }

    /// Releases the surface and removes the engine container from the page
    pub fn destroy(&mut self) {
        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
        if let Some(container) = self.container.take() {
            container.remove();
        }
        self.events.clear();
        log::debug!("engine destroyed");
    }

    /// Creates a group for features of `feature_type` under the top container
    pub fn create_container(&mut self, feature_type: Option<FeatureType>) -> Result<&mut Group> {
        Ok(self.top_container_mut()?.create_group(feature_type))
    }

    pub fn top_container(&self) -> Result<&Group> {
        self.surface
            .as_ref()
            .map(Surface::group)
            .ok_or(EngineError::NotInitialized)
    }

    pub fn top_container_mut(&mut self) -> Result<&mut Group> {
        self.surface
            .as_mut()
            .map(Surface::group_mut)
            .ok_or(EngineError::NotInitialized)
    }

    /// Mounts `node` in the engine container as a sibling of the surface node,
    /// so it stacks above the drawing
    pub fn append_div(&self, node: &DomNode) -> Result<()> {
        let container = self.container.as_ref().ok_or(EngineError::NotInitialized)?;
        container.append_child(node);
        Ok(())
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.layers.add_layer(layer)
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.layers.remove_layer(layer_id)
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn view(&self) -> ViewState {
        self.view.get()
    }

    /// Current top group transform, `None` before the first view change
    pub fn transform(&self) -> Option<Matrix2D> {
        self.view.get().transform
    }

    pub fn is_scale_corrected(&self) -> bool {
        self.view.get().correction.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    fn ensure_live(&self) -> Result<()> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        if self.surface.is_none() {
            return Err(EngineError::Destroyed);
        }
        Ok(())
    }

    fn ensure_ready(&self) -> Result<()> {
        self.ensure_live()?;
        if !self.prepared {
            return Err(EngineError::NotPrepared);
        }
        Ok(())
    }

    fn surface_size(&self) -> Result<(f64, f64)> {
        let width = self.host.width();
        let height = self.host.height();
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(EngineError::InvalidScale(format!(
                "surface size {}x{} has no area",
                width, height
            )));
        }
        Ok((width, height))
    }

    fn zoom_scale(&self, zoom: u32) -> Result<f64> {
        self.config
            .zoom_scales
            .get(zoom)
            .ok_or(EngineError::UnknownZoom(zoom))
    }

    fn normalized_center(&self, center: Point) -> Result<Point> {
        let center = self.host.get_coords(center);
        if !center.is_finite() {
            return Err(EngineError::InvalidCoordinates(format!(
                "center ({}, {}) is not finite",
                center.x, center.y
            )));
        }
        Ok(center)
    }

    fn apply_transform(&mut self, transform: Matrix2D) -> Result<()> {
        if !transform.is_finite() {
            return Err(EngineError::InvalidScale(format!(
                "refusing non-finite transform {:?}",
                transform
            )));
        }
        let mut view = self.view.get();
        view.transform = Some(transform);
        self.view.set(view);
        Ok(())
    }

    fn after_scale_change(&mut self, scale_factor: f64) -> Result<()> {
        let view = self.view.get();
        self.factory.calculate_length_denominator(&view);
        self.resize_features(scale_factor)?;
        Ok(())
    }

    fn notify_zoom(&self) {
        let event = EngineEvent::ZoomChanged {
            zoom: self.zoom(),
            scale: self.view.get().true_scale(),
        };
        self.events.emit(&event.kind(), &event);
    }

    fn notify_extent(&self) -> Result<()> {
        if self.events.listener_count(&EngineEventKind::ExtentChanged) == 0 {
            return Ok(());
        }
        let event = EngineEvent::ExtentChanged {
            extent: self.extent()?,
        };
        self.events.emit(&event.kind(), &event);
        Ok(())
    }
}

impl<H: MapHost, F: PlacemarkFactory> DivHost for ViewTransformEngine<H, F> {
    fn append_div(&self, node: &DomNode) -> Result<()> {
        ViewTransformEngine::append_div(self, node)
    }
}

fn check_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidScale(format!(
            "scale {} is not a positive finite number",
            scale
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::MapDescriptor;

    fn engine(bbox: [f64; 4]) -> ViewTransformEngine<MapDescriptor> {
        let bbox = Extent::try_from(bbox).unwrap();
        let map = MapDescriptor::detached(800.0, 600.0, bbox);
        let mut engine = ViewTransformEngine::with_host(map, EngineConfig::default()).unwrap();
        engine.initialize(|| {}).unwrap();
        engine.prepare().unwrap();
        engine
    }

    #[test]
    fn test_initialize_once() {
        let map = MapDescriptor::detached(10.0, 10.0, Extent::new(0.0, 0.0, 1.0, 1.0).unwrap());
        let mut engine = ViewTransformEngine::with_host(map, EngineConfig::default()).unwrap();
        let calls = Cell::new(0);

        engine.initialize(|| calls.set(calls.get() + 1)).unwrap();
        assert!(matches!(
            engine.initialize(|| calls.set(calls.get() + 1)),
            Err(EngineError::AlreadyInitialized)
        ));
        assert_eq!(calls.get(), 1);
        assert_eq!(
            engine.host().container().style("overflow").as_deref(),
            Some("hidden")
        );
    }

    #[test]
    fn test_operations_need_prepare() {
        let map = MapDescriptor::detached(10.0, 10.0, Extent::new(0.0, 0.0, 1.0, 1.0).unwrap());
        let mut engine = ViewTransformEngine::with_host(map, EngineConfig::default()).unwrap();
        assert!(matches!(engine.prepare(), Err(EngineError::NotInitialized)));

        engine.initialize(|| {}).unwrap();
        let extent = Extent::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(matches!(engine.zoom_to(&extent), Err(EngineError::NotPrepared)));
    }

    #[test]
    fn test_zoom_to_fits_and_centers() {
        let mut engine = engine([0.0, 0.0, 1000.0, 1000.0]);
        engine
            .zoom_to(&Extent::new(0.0, 0.0, 100.0, 100.0).unwrap())
            .unwrap();

        assert_eq!(engine.transform().unwrap().xx, 6.0);
        let center = engine.container_pixel_to_coords(400.0, 300.0);
        assert!((center.x - 50.0).abs() < 1e-9);
        assert!((center.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_extent_leaves_transform_alone() {
        let mut engine = engine([0.0, 0.0, 1000.0, 1000.0]);
        let bad = Extent {
            min_x: 0.0,
            min_y: 0.0,
            max_x: f64::NAN,
            max_y: 1.0,
        };
        assert!(matches!(engine.zoom_to(&bad), Err(EngineError::InvalidExtent(_))));
        assert!(engine.transform().is_none());
    }

    #[test]
    fn test_destroy_detaches() {
        let mut engine = engine([0.0, 0.0, 1000.0, 1000.0]);
        assert_eq!(engine.host().container().children().len(), 1);
        engine.destroy();
        assert!(engine.host().container().children().is_empty());
        assert!(matches!(
            engine.set_zoom(3),
            Err(EngineError::Destroyed)
        ));
    }
}
