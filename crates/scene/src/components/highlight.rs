/// Committed highlight state of a data point.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Highlight {
    #[default]
    Unclicked,
    Clicked,
}

impl Highlight {
    pub fn toggled(self) -> Self {
        match self {
            Highlight::Unclicked => Highlight::Clicked,
            Highlight::Clicked => Highlight::Unclicked,
        }
    }

    pub fn is_clicked(self) -> bool {
        self == Highlight::Clicked
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Highlight::Unclicked => "unclicked",
            Highlight::Clicked => "clicked",
        }
    }
}
