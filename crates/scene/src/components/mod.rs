pub mod class;
pub mod highlight;
pub mod material;
pub mod shape;
pub mod transform;
pub mod tween;

pub use class::*;
pub use highlight::*;
pub use material::*;
pub use shape::*;
pub use transform::*;
pub use tween::*;
