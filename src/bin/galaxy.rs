//! Interactive spiral galaxy.
//!
//! Run with: `cargo run --bin galaxy`
//! Set `RUST_LOG=debug` to see parameter commits and resizes.

use stardust::prelude::*;

fn main() -> Result<(), DemoError> {
    env_logger::init();

    GalaxyDemo::new()
        .with_params(GalaxyParams::default())
        .with_alpha_mask("assets/particle.png")
        .run()
}
