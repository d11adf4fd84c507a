pub mod round;
pub mod score;
pub mod setup;

pub use round::*;
pub use score::*;
pub use setup::*;
