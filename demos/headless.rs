//! Drives the engine without a page: fits a few extents, steps the zoom
//! and prints what a pointer at the middle of the surface would hit.
//!
//! Run with `RUST_LOG=debug cargo run --example headless`.

use anyhow::Result;
use scenemap::prelude::*;

fn main() -> Result<()> {
    scenemap::init_logging();

    let bbox = Extent::new(-20_037_508.34, -20_037_508.34, 20_037_508.34, 20_037_508.34)?;
    let map = MapDescriptor::detached(1024.0, 768.0, bbox).with_options(MapOptions {
        projection: Projection::WebMercator,
        ..MapOptions::default()
    });

    let mut engine = ViewTransformEngine::with_host(map, EngineConfig::default())?;
    engine.initialize(|| println!("surface ready"))?;
    engine.prepare()?;

    let _zoom = engine.on_zoom_changed(|event| println!("  -> {:?}", event));

    {
        let cities = engine.create_container(Some(FeatureType::Point))?;
        for (id, lng, lat) in [("paris", 2.35, 48.85), ("tokyo", 139.69, 35.69)] {
            let position = LatLng::new(lat, lng).to_mercator();
            cities.add_placemark(
                Placemark::new(id, Geometry::Point(position)).with_shape(Shape::new()),
            );
        }
    }

    let europe = Extent::new(-1_100_000.0, 4_300_000.0, 3_300_000.0, 7_500_000.0)?;
    println!("zoom_to europe");
    engine.zoom_to(&europe)?;
    println!("  center {:?}", engine.center());

    println!("set_camera on Tokyo at zoom 6");
    engine.set_camera(Camera::new(Point::new(139.69, 35.69), 6))?;
    println!("  extent {:?}", engine.extent()?.to_array());

    println!("set_zoom 8");
    engine.set_zoom(8)?;
    let pixel = engine.coords_to_container_pixel(engine.center());
    println!("  center pixel {:?}", pixel);

    engine.destroy();
    Ok(())
}
