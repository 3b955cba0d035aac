pub mod axis;
pub mod precision;
pub mod rotation;
pub mod scale;
pub mod vec;

pub use axis::*;
pub use precision::*;
pub use rotation::*;
pub use scale::*;
pub use vec::*;
