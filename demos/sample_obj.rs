//! Samples a Wavefront mesh (or a built-in sphere) and prints a summary.
//!
//! Usage:
//! ```text
//! cargo run --example sample_obj                        # built-in sphere
//! cargo run --example sample_obj -- bunny.obj 0.02      # file, cell size
//! RUST_LOG=meshgrain=debug cargo run --example sample_obj
//! ```

use meshgrain::math::{Point3, Vector3};
use meshgrain::mesh::ObjLoader;
use meshgrain::operations::creation::MakeSphere;
use meshgrain::{MeshgrainError, ParticleKind, RigidBody, RigidBodyConfig};

fn main() -> Result<(), MeshgrainError> {
    // Default: WARN for everything, INFO for meshgrain.
    // Override with RUST_LOG env var (e.g. RUST_LOG=meshgrain=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("meshgrain=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let path = args.next();
    let cell_size = args.next().and_then(|s| s.parse::<f64>().ok());

    let config = RigidBodyConfig::default()
        .with_phase(1)
        .with_init_velocity(Vector3::new(0.0, -1.0, 0.0));
    let mut body = RigidBody::from_config(config);

    match &path {
        Some(path) => body.init_obj(&ObjLoader::new(), path)?,
        None => body.set_mesh(MakeSphere::new(Point3::origin(), 1.0).execute()?),
    }

    let particles = match cell_size {
        Some(h) => body.init_particles_by_cell_size(h)?,
        None => body.init_particles_by_resolution(16)?,
    };
    let surface = particles
        .iter()
        .filter(|p| p.kind == ParticleKind::Surface)
        .count();
    let count = particles.len();

    println!(
        "{}: {count} particles ({surface} surface), grid {:?}, cell size {:.4}, mass {:.4}",
        path.as_deref().unwrap_or("sphere"),
        body.resolution().unwrap_or_default(),
        body.grid_length().unwrap_or_default(),
        body.total_mass(),
    );
    Ok(())
}
