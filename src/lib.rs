//! # Stardust
//!
//! Two small visual demos on `wgpu`: an interactive spiral galaxy of
//! additive point sprites, and a marker wandering over a plane.
//!
//! The generation and update logic is plain Rust with no GPU in sight, so it
//! can be driven and tested headless. Windowing, rendering and the egui
//! control panel sit on top.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stardust::prelude::*;
//!
//! fn main() -> Result<(), DemoError> {
//!     env_logger::init();
//!     GalaxyDemo::new()
//!         .with_params(GalaxyParams::new(100_000, 4, 1.0))
//!         .run()
//! }
//! ```
//!
//! ## Headless
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use stardust::prelude::*;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut galaxy = generate(&GalaxyParams::default(), &mut rng).unwrap();
//! galaxy.spin(1.0 / 60.0);
//!
//! let mut ant = Wander::default();
//! ant.tick(&mut rng).unwrap();
//! ```
//!
//! ## Controls (galaxy)
//!
//! | Input | Action |
//! |-------|--------|
//! | Left drag | Orbit |
//! | Wheel | Zoom |
//! | Panel | Edit `count`, `branches`, `spin`; regenerates on release |

mod app;
pub mod camera;
pub mod clock;
pub mod error;
pub mod galaxy;
pub mod gpu;
pub mod panel;
pub mod params;
pub mod sampling;
pub mod scene;
pub mod shader;
pub mod textures;
pub mod visuals;
pub mod wander;

pub use app::{AntDemo, GalaxyDemo};
pub use error::{DemoError, GalaxyError, GpuError, TextureError, WanderError};
pub use galaxy::{generate, ParticleBuffer};
pub use glam::{Vec2, Vec3};
pub use params::{GalaxyParams, ParamStore};
pub use wander::{Wander, WanderConfig};

/// Convenient imports for demos and tests.
pub mod prelude {
    pub use crate::app::{AntDemo, GalaxyDemo};
    pub use crate::camera::{OrbitCamera, OrthoCamera};
    pub use crate::clock::{FrameClock, FrameTime};
    pub use crate::error::{DemoError, GalaxyError, WanderError};
    pub use crate::galaxy::{branch_angle, generate, ParticleBuffer};
    pub use crate::params::{GalaxyParams, ParamStore, MAX_PARTICLES};
    pub use crate::sampling::{gaussian, gaussian_random};
    pub use crate::scene::{AntScene, GalaxyScene};
    pub use crate::textures::AlphaMask;
    pub use crate::visuals::{BlendMode, PointStyle};
    pub use crate::wander::{Wander, WanderConfig};
    pub use crate::{Vec2, Vec3};
}
