//! Interactive 3D scatterplot: rows of `{x, y, z}` bound to scene nodes.
//!
//! [`PlotState`] owns everything a host needs; hosts feed it time, pointer
//! positions and button presses and paint [`draw::draw_list`].

pub mod animation;
pub mod binder;
pub mod builder;
pub mod config;
pub mod draw;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod join;
pub mod row;
pub mod scales;
pub mod state;

pub use config::PlotConfig;
pub use error::PlotError;
pub use row::{Row, RowId, Rows};
pub use state::PlotState;
