pub mod components;
pub mod entity;
pub mod picking;
pub mod viewpoint;
pub mod world;

pub use world::*;
