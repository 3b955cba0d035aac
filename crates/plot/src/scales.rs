use foundation::math::{Axis, LinearScale, Vec3};

use crate::config::PlotConfig;
use crate::row::Row;

/// One linear scale per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisScales {
    scales: [LinearScale; 3],
}

impl AxisScales {
    pub fn new(x: LinearScale, y: LinearScale, z: LinearScale) -> Self {
        Self { scales: [x, y, z] }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        let scale = |axis| Self::scale_for(config, axis);
        Self::new(scale(Axis::X), scale(Axis::Y), scale(Axis::Z))
    }

    /// Scale for `axis` as configured: its domain onto the shared axis range.
    pub fn scale_for(config: &PlotConfig, axis: Axis) -> LinearScale {
        LinearScale::new(config.domain(axis), config.axis_range)
    }

    pub fn get(&self, axis: Axis) -> LinearScale {
        self.scales[axis.index()]
    }

    pub fn set(&mut self, axis: Axis, scale: LinearScale) {
        self.scales[axis.index()] = scale;
    }

    /// Scene position of a row.
    pub fn map_row(&self, row: &Row) -> Vec3 {
        Vec3::new(
            self.get(Axis::X).map(row.x),
            self.get(Axis::Y).map(row.y),
            self.get(Axis::Z).map(row.z),
        )
    }
}
