pub mod handles;
pub mod math;
pub mod rng;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use handles::*;
pub use rng::*;
pub use time::*;
