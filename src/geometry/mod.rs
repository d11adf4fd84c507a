pub mod bezier;
pub mod hole;
pub mod rng;

pub use bezier::*;
pub use hole::*;
pub use rng::*;
