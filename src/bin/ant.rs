//! A marker wandering over a green plane.
//!
//! Run with: `cargo run --bin ant`

use stardust::prelude::*;

fn main() -> Result<(), DemoError> {
    env_logger::init();

    AntDemo::new().with_wander_strength(0.1).run()
}
