pub mod activation;
pub mod motion;
pub mod particles;
pub mod powerups;
pub mod round;

pub use activation::*;
pub use motion::*;
pub use particles::*;
pub use powerups::*;
pub use round::*;
