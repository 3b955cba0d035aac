use std::f64::consts::PI;

use foundation::math::{Axis, Rotation, Vec3};
use scene::components::Color;
use scene::viewpoint::OrthoViewpoint;
use serde::{Deserialize, Serialize};

use crate::error::PlotError;

/// Every tunable of the plot. `Default` reproduces the stock demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Visual range shared by all three axes, in scene units.
    pub axis_range: [f64; 2],
    pub domains: AxisDomains,
    pub ticks: TickConfig,
    pub labels: LabelConfig,
    /// Transition used for the first bind after a (re)build.
    pub initial_duration_ms: f64,
    /// Transition used by every later bind.
    pub default_duration_ms: f64,
    /// Period of the animation timer.
    pub interval_ms: f64,
    pub grid: GridConfig,
    pub animation: AnimationConfig,
    pub colors: ColorConfig,
    /// When `true`, "clear highlighting" also resets each point's clicked state.
    pub clear_resets_state: bool,
    pub viewpoint: ViewpointConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            axis_range: [0.0, 10.0],
            domains: AxisDomains::default(),
            ticks: TickConfig::default(),
            labels: LabelConfig::default(),
            initial_duration_ms: 0.0,
            default_duration_ms: 900.0,
            interval_ms: 900.0,
            grid: GridConfig::default(),
            animation: AnimationConfig::default(),
            colors: ColorConfig::default(),
            clear_resets_state: false,
            viewpoint: ViewpointConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisDomains {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub z: [f64; 2],
}

impl Default for AxisDomains {
    fn default() -> Self {
        Self {
            x: [0.0, 1.0],
            y: [0.0, 10.0],
            z: [0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    pub count: usize,
    pub size: f64,
    pub font_size: f64,
    pub font_family: String,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            count: 3,
            size: 0.1,
            font_size: 0.5,
            font_family: "verdana".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub font_size: f64,
    pub font_family: String,
    /// Axis labels sit at this multiple of the axis range along their axis.
    pub offset_factor: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_size: 0.6,
            font_family: "SANS".to_string(),
            offset_factor: 1.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows are generated on a `size × size` lattice.
    pub size: usize,
    /// Upper bound of the random initial elevation.
    pub max_elevation: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 11,
            max_elevation: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Upper bound of the random amplitude applied on each animated step.
    pub amplitude: f64,
    /// Phase increment per timer firing, in radians.
    pub phase_step: f64,
    /// Spatial frequency applied to `x` and `z` inside the wave.
    pub frequency: f64,
    /// Point spheres are scaled to `|y| / point_size_divisor` on creation.
    pub point_size_divisor: f64,
    /// Height of a freshly created point sphere.
    pub point_thickness: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            amplitude: 20.0,
            phase_step: PI / 8.0,
            frequency: 0.5,
            point_size_divisor: 15.0,
            point_thickness: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub point: String,
    pub highlight: String,
    pub stem: String,
    pub axis: String,
    pub grid: String,
    pub label: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            point: "dodgerblue".to_string(),
            highlight: "yellow".to_string(),
            stem: "gray".to_string(),
            axis: "lightgray".to_string(),
            grid: "black".to_string(),
            label: "black".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewpointConfig {
    pub position: [f64; 3],
    /// Axis-angle: `[ax, ay, az, radians]`.
    pub orientation: [f64; 4],
    pub center_of_rotation: [f64; 3],
    pub field_of_view: [f64; 4],
}

impl Default for ViewpointConfig {
    fn default() -> Self {
        Self {
            position: [8.0, 4.0, 15.0],
            orientation: [-0.5, 1.0, 0.2, 1.12 * PI / 4.0],
            center_of_rotation: [5.0, 5.0, 5.0],
            field_of_view: [-5.0, -5.0, 15.0, 15.0],
        }
    }
}

impl ViewpointConfig {
    pub fn to_viewpoint(&self) -> OrthoViewpoint {
        let [ax, ay, az, angle] = self.orientation;
        OrthoViewpoint {
            position: Vec3::from(self.position),
            orientation: Rotation::new(Vec3::new(ax, ay, az), angle),
            center_of_rotation: Vec3::from(self.center_of_rotation),
            field_of_view: self.field_of_view,
        }
    }
}

/// Parsed colours.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub point: Color,
    pub highlight: Color,
    pub stem: Color,
    pub axis: Color,
    pub grid: Color,
    pub label: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            point: Color::DODGER_BLUE,
            highlight: Color::YELLOW,
            stem: Color::GRAY,
            axis: Color::LIGHT_GRAY,
            grid: Color::BLACK,
            label: Color::BLACK,
        }
    }
}

impl PlotConfig {
    pub fn from_json(json: &str) -> Result<Self, PlotError> {
        let config: PlotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, PlotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn domain(&self, axis: Axis) -> [f64; 2] {
        match axis {
            Axis::X => self.domains.x,
            Axis::Y => self.domains.y,
            Axis::Z => self.domains.z,
        }
    }

    pub fn initial_duration_s(&self) -> f64 {
        self.initial_duration_ms / 1000.0
    }

    pub fn default_duration_s(&self) -> f64 {
        self.default_duration_ms / 1000.0
    }

    pub fn interval_s(&self) -> f64 {
        self.interval_ms / 1000.0
    }

    pub fn palette(&self) -> Result<Palette, PlotError> {
        let c = &self.colors;
        Ok(Palette {
            point: parse_color("colors.point", &c.point)?,
            highlight: parse_color("colors.highlight", &c.highlight)?,
            stem: parse_color("colors.stem", &c.stem)?,
            axis: parse_color("colors.axis", &c.axis)?,
            grid: parse_color("colors.grid", &c.grid)?,
            label: parse_color("colors.label", &c.label)?,
        })
    }

    pub fn validate(&self) -> Result<(), PlotError> {
        let invalid = |field: &'static str, reason: &str| PlotError::InvalidConfig {
            field,
            reason: reason.to_string(),
        };

        if !self.axis_range.iter().all(|v| v.is_finite()) {
            return Err(invalid("axis_range", "must be finite"));
        }
        for axis in Axis::ALL {
            if !self.domain(axis).iter().all(|v| v.is_finite()) {
                return Err(invalid("domains", "must be finite"));
            }
        }
        if self.ticks.count == 0 {
            return Err(invalid("ticks.count", "must be at least 1"));
        }
        if !(self.ticks.size > 0.0) {
            return Err(invalid("ticks.size", "must be positive"));
        }
        if !(self.initial_duration_ms >= 0.0) {
            return Err(invalid("initial_duration_ms", "must not be negative"));
        }
        if !(self.default_duration_ms >= 0.0) {
            return Err(invalid("default_duration_ms", "must not be negative"));
        }
        if !(self.interval_ms > 0.0) {
            return Err(invalid("interval_ms", "must be positive"));
        }
        if self.grid.size == 0 {
            return Err(invalid("grid.size", "must be at least 1"));
        }
        if !(self.animation.point_size_divisor > 0.0) {
            return Err(invalid("animation.point_size_divisor", "must be positive"));
        }
        let [min_x, min_y, max_x, max_y] = self.viewpoint.field_of_view;
        if !(max_x > min_x && max_y > min_y) {
            return Err(invalid("viewpoint.field_of_view", "must be [min_x, min_y, max_x, max_y]"));
        }
        self.palette().map(|_| ())
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Color, PlotError> {
    Color::parse(value).ok_or_else(|| PlotError::InvalidConfig {
        field,
        reason: format!("unknown colour {value:?}"),
    })
}
