//! mapcore debug dump: prints kernel values in their textual formats.
//!
//! Usage:
//! ```text
//! cargo run --example debug                # every section
//! cargo run --example debug -- geodetic    # one section
//! RUST_LOG=mapcore=debug cargo run --example debug -- transforms
//! ```

use mapcore::geodetic::{Geodetic2d, GeodeticPolygon2d};
use mapcore::transform::Space;
use mapcore::{
    Area, Feature, Matrix4d, Quaterniond, Result, TransformTree, Transformd, Vector2d, Vector3d,
};
use tracing::info;

const SECTIONS: [&str; 4] = ["vectors", "matrices", "transforms", "geodetic"];

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for mapcore.
    // Override with RUST_LOG env var (e.g. RUST_LOG=mapcore=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("debug=info".parse().unwrap_or_default())
        .add_directive("mapcore=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let selected = std::env::args().nth(1);
    for section in SECTIONS {
        if selected.as_deref().is_some_and(|s| s != section) {
            continue;
        }
        info!(section, "dumping");
        match section {
            "vectors" => vectors()?,
            "matrices" => matrices(),
            "transforms" => transforms()?,
            _ => geodetic()?,
        }
    }
    Ok(())
}

fn vectors() -> Result<()> {
    let v = Vector2d::new(72.002_311_593_573_15, -0.1);
    println!("vector      {v}");
    println!("high/low    {} + {}", v.high(), v.low());
    println!("overflow    {}", Vector2d::MAX * 2.0);
    println!("div by zero {}", Vector2d::new(1.0, 0.0) / 0.0);
    let time = Vector2d::ONE.time_between(Vector2d::ZERO, Vector2d::new(2.0, 2.0))?;
    println!("time        {time}");
    println!("cross       {}", Vector3d::RIGHT.cross(Vector3d::UP));
    Ok(())
}

fn matrices() {
    let m = Matrix4d::new(
        8.0, 2.0, 3.0, 4.0, 5.0, 6.0, -7.0, 8.0, 9.0, -10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
    );
    println!("matrix\n{m}");
    println!("determinant {}", m.determinant());
    println!("inverse\n{}", m.inverse());
    println!("singular inverse\n{}", Matrix4d::ZERO.inverse());
}

fn transforms() -> Result<()> {
    let mut tree = TransformTree::new();
    let root = tree.insert(Transformd::new(
        Vector3d::new(10.0, 0.0, 0.0),
        Quaterniond::axis_angle(Vector3d::UP, 90.0),
        Vector3d::splat(2.0),
    ));
    let child = tree.insert_child(root, Transformd::from_translation(Vector3d::FORWARD))?;
    tree.translate(child, Vector3d::UP, Space::World)?;
    println!("local  {}", tree.local(child)?);
    println!("world  {}", tree.world(child)?);
    println!("matrix\n{}", tree.matrix(child)?);
    Ok(())
}

fn geodetic() -> Result<()> {
    let london = Geodetic2d::new(51.5074, -0.1278);
    let paris = Geodetic2d::new(48.8566, 2.3522);
    println!("distance {:.1} m", london.distance(paris));
    println!("course   {:.3}°", london.course(paris));
    println!("midpoint {}", london.midpoint(paris));

    let polygon = GeodeticPolygon2d::new(vec![london, paris, Geodetic2d::new(50.0, 5.0)])?;
    let area = Area::with_random_id("triangle", polygon);
    println!("{area}");
    println!("clockwise {}", area.polygon().clockwise());
    println!("bounds    {}", area.polygon().bounds());
    println!("relative  {:?}", area.relative(london).name());
    Ok(())
}
