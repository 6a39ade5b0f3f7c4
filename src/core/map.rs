use crate::{
    core::{
        config::ResizePolicy,
        constants::DEFAULT_MAX_ZOOM,
        extent::Extent,
        geo::{Point, Projection},
    },
    traits::MapHost,
    ui::dom::DomNode,
    Result,
};

#[derive(Debug, Clone)]
pub struct MapOptions {
    pub min_zoom: u32,
    pub max_zoom: u32,
    /// Projection of the coordinates callers hand to the engine
    pub projection: Projection,
    /// Overrides of the engine's resize configuration
    pub resize_points: Option<bool>,
    pub resize_lines: Option<bool>,
    pub resize_areas: Option<bool>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            min_zoom: 0,
            max_zoom: DEFAULT_MAX_ZOOM,
            projection: Projection::Identity,
            resize_points: None,
            resize_lines: None,
            resize_areas: None,
        }
    }
}

impl MapOptions {
    pub fn with_resize(mut self, policy: ResizePolicy) -> Self {
        self.resize_points = Some(policy.points);
        self.resize_lines = Some(policy.lines);
        self.resize_areas = Some(policy.areas);
        self
    }
}

/// Plain map description: a container node, a pixel size and a data extent
#[derive(Debug, Clone)]
pub struct MapDescriptor {
    container: DomNode,
    size: Point,
    bbox: Extent,
    extent: Option<Extent>,
    options: MapOptions,
}

impl MapDescriptor {
    pub fn new(container: DomNode, size: Point, bbox: Extent) -> Self {
        Self {
            container,
            size,
            bbox,
            extent: None,
            options: MapOptions::default(),
        }
    }

    /// Map with a fresh container node, for headless use
    pub fn detached(width: f64, height: f64, bbox: Extent) -> Self {
        Self::new(DomNode::new("div"), Point::new(width, height), bbox)
    }

    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: u32, max_zoom: u32) -> Self {
        self.options.min_zoom = min_zoom;
        self.options.max_zoom = max_zoom;
        self
    }

    pub fn set_extent(&mut self, extent: Option<Extent>) {
        self.extent = extent;
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }
}

impl MapHost for MapDescriptor {
    fn container(&self) -> &DomNode {
        &self.container
    }

    fn width(&self) -> f64 {
        self.size.x
    }

    fn height(&self) -> f64 {
        self.size.y
    }

    fn bbox(&self) -> Result<Extent> {
        Ok(self.bbox)
    }

    fn extent(&self) -> Option<Extent> {
        self.extent
    }

    fn min_zoom(&self) -> u32 {
        self.options.min_zoom
    }

    fn max_zoom(&self) -> u32 {
        self.options.max_zoom
    }

    fn get_coords(&self, center: Point) -> Point {
        self.options.projection.project(center)
    }

    fn resize_points(&self) -> Option<bool> {
        self.options.resize_points
    }

    fn resize_lines(&self) -> Option<bool> {
        self.options.resize_lines
    }

    fn resize_areas(&self) -> Option<bool> {
        self.options.resize_areas
    }
}
