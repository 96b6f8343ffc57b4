pub mod antichain;
pub mod frontier;
pub mod plot;

use std::fmt;

pub use antichain::{load_antichain, parse_minimals, ParetoPoint, ResultKind};
pub use frontier::{dominated_region, filter_by_time, pareto_2d_min};
pub use plot::{
    label_indices, render_tradespace, shade_frontier, PlotOptions, ShadeMode, DEFAULT_LABEL_MAX,
    DEFAULT_OUTPUT_IMAGE,
};

/// Everything that can go fatally wrong between the solver output document
/// and the rendered image. All variants terminate the run; there is no retry.
#[derive(Debug)]
pub enum TradespaceError {
    Read(std::io::Error),
    Parse(serde_yaml::Error),
    MissingBranch(&'static str),
    Minimals(String),
    EmptyAntichain,
    EmptyAfterFilter { time_max: f64 },
    SliceWithoutTimeMax,
}

impl fmt::Display for TradespaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read output document: {err}"),
            Self::Parse(err) => write!(f, "failed to parse output document: {err}"),
            Self::MissingBranch(which) => write!(f, "output document has no '{which}' branch"),
            Self::Minimals(detail) => write!(f, "failed to parse minimals payload: {detail}"),
            Self::EmptyAntichain => write!(f, "no Pareto points found (empty antichain)"),
            Self::EmptyAfterFilter { time_max } => write!(
                f,
                "no points remain after filtering with response_time <= {time_max} min"
            ),
            Self::SliceWithoutTimeMax => {
                write!(f, "shade mode 'slice' requires --time-max (defines the slice)")
            }
        }
    }
}

impl std::error::Error for TradespaceError {}
