pub mod error;
pub mod rows;
pub mod x3d;

pub use error::*;
pub use rows::*;
pub use x3d::*;
