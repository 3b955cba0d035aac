use foundation::math::Axis;

/// Role of a node in the plot, used for selection and markup `class` names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeClass {
    AxisLine(Axis),
    AxisLabel(Axis),
    Tick(Axis),
    TickLabel(Axis),
    GridLine(Axis),
    DataPoint,
    Stem,
}

impl NodeClass {
    /// Markup class name (`xAxis`, `yTick`, `datapoint`, ...). Tick labels have none.
    pub fn css_name(self) -> Option<String> {
        let named = |axis: Axis, suffix: &str| Some(format!("{}{suffix}", axis.key()));
        match self {
            NodeClass::AxisLine(a) => named(a, "Axis"),
            NodeClass::AxisLabel(a) => named(a, "AxisLabel"),
            NodeClass::Tick(a) => named(a, "Tick"),
            NodeClass::GridLine(a) => named(a, "GridLine"),
            NodeClass::TickLabel(_) => None,
            NodeClass::DataPoint => Some("datapoint".to_string()),
            NodeClass::Stem => Some("stem".to_string()),
        }
    }
}
