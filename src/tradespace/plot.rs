//! Renders the tradespace scatter: points colored by response time, utopia
//! marker at the origin, value labels, and the optional dominated-region fill.

use std::error::Error;
use std::path::PathBuf;

use plotters::prelude::*;

use super::antichain::ParetoPoint;
use super::frontier::{dominated_region, pareto_2d_min};
use super::TradespaceError;

pub const DEFAULT_OUTPUT_IMAGE: &str = "wildfire_tradespace.png";
pub const DEFAULT_LABEL_MAX: usize = 25;

const GOLD: RGBColor = RGBColor(255, 215, 0);
// Endpoints of the time color ramp: fast responses plot blue, slow plot red.
const FAST_COLOR: (f64, f64, f64) = (31.0, 119.0, 180.0);
const SLOW_COLOR: (f64, f64, f64) = (214.0, 39.0, 40.0);

/// Shading policy for the 2D dominated region. In 3D a dominated region is
/// not well-defined on a 2D plot without either projecting away the time
/// axis or slicing at a time ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeMode {
    None,
    Projection,
    Slice,
}

impl ShadeMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "none" => Some(ShadeMode::None),
            "projection" => Some(ShadeMode::Projection),
            "slice" => Some(ShadeMode::Slice),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub output: PathBuf,
    pub shade: ShadeMode,
    pub time_max: Option<f64>,
    pub label_max: usize,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_IMAGE),
            shade: ShadeMode::None,
            time_max: None,
            label_max: DEFAULT_LABEL_MAX,
        }
    }
}

/// Frontier coordinates for the requested shading mode, or `None` when no
/// shading was asked for. `points` must already be time-filtered when a
/// ceiling is in effect; `Slice` demands that a ceiling was supplied.
pub fn shade_frontier(
    points: &[ParetoPoint],
    shade: ShadeMode,
    time_max: Option<f64>,
) -> Result<Option<Vec<(f64, f64)>>, TradespaceError> {
    match shade {
        ShadeMode::None => Ok(None),
        ShadeMode::Slice if time_max.is_none() => Err(TradespaceError::SliceWithoutTimeMax),
        ShadeMode::Projection | ShadeMode::Slice => {
            let frontier = pareto_2d_min(points)
                .into_iter()
                .map(|idx| (points[idx].load, points[idx].cost))
                .collect();
            Ok(Some(frontier))
        }
    }
}

/// Indices of the points to annotate: all of them up to the cap, otherwise
/// an evenly strided subsample.
pub fn label_indices(count: usize, label_max: usize) -> Vec<usize> {
    if label_max == 0 {
        return Vec::new();
    }
    if count <= label_max {
        (0..count).collect()
    } else {
        let step = (count / label_max).max(1);
        (0..count).step_by(step).collect()
    }
}

/// Render the scatter and save it to `options.output`.
pub fn render_tradespace(points: &[ParetoPoint], options: &PlotOptions) -> Result<(), Box<dyn Error>> {
    let shaded = shade_frontier(points, options.shade, options.time_max)?;

    let max_load = points.iter().map(|p| p.load).fold(0.0f64, f64::max);
    let max_cost = points.iter().map(|p| p.cost).fold(0.0f64, f64::max);
    let (x_left, x_right) = axis_limits(max_load);
    let (y_bottom, y_top) = axis_limits(max_cost);

    let t_min = points.iter().map(|p| p.time).fold(f64::INFINITY, f64::min);
    let t_max = points
        .iter()
        .map(|p| p.time)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut caption = String::from("Wildfire tradespace (cost vs load, colored by response time)");
    if let Some(time_max) = options.time_max {
        caption.push_str(&format!("  |  response_time <= {time_max} min"));
    }

    let root = BitMapBackend::new(&options.output, (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(90)
        .build_cartesian_2d(x_left..x_right, y_bottom..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Logistics load [kg]")
        .y_desc("Total cost [USD]")
        .light_line_style(BLACK.mix(0.08))
        .bold_line_style(BLACK.mix(0.2))
        .draw()?;

    // Shading goes under the scatter.
    if let Some(frontier) = shaded {
        let polygon = dominated_region(&frontier, x_right, y_top);
        let label = shade_label(options.shade, options.time_max);
        chart
            .draw_series(std::iter::once(Polygon::new(polygon, BLUE.mix(0.18))))?
            .label(label)
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.mix(0.18).filled())
            });
    }

    let legend_color = time_color((t_min + t_max) / 2.0, t_min, t_max);
    chart
        .draw_series(points.iter().map(|point| {
            Circle::new(
                (point.load, point.cost),
                5,
                time_color(point.time, t_min, t_max).filled(),
            )
        }))?
        .label("Pareto points (3D nondominated)")
        .legend(move |(x, y)| Circle::new((x + 5, y), 4, legend_color.filled()));

    chart
        .draw_series(std::iter::once(Circle::new((0.0, 0.0), 9, GOLD.filled())))?
        .label("Utopia (0,0)")
        .legend(|(x, y)| Circle::new((x + 5, y), 5, GOLD.filled()));
    chart.draw_series(std::iter::once(Circle::new((0.0, 0.0), 9, &BLACK)))?;

    let label_style = ("sans-serif", 14).into_font().color(&BLACK);
    for idx in label_indices(points.len(), options.label_max) {
        let point = points[idx];
        let text = format!(
            "${}, {:.0}kg, {:.0}min",
            group_thousands(point.cost),
            point.load,
            point.time
        );
        chart.draw_series(std::iter::once(
            EmptyElement::at((point.load, point.cost)) + Text::new(text, (6, -14), label_style.clone()),
        ))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.7))
        .border_style(BLACK.mix(0.3))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Plot limits per axis: 5% padding below zero and above the data maximum.
fn axis_limits(max_value: f64) -> (f64, f64) {
    (-0.05 * max_value, 1.05 * max_value)
}

fn shade_label(shade: ShadeMode, time_max: Option<f64>) -> String {
    match (shade, time_max) {
        (ShadeMode::Slice, Some(time_max)) => {
            format!("Dominated region (2D; response_time <= {time_max} min)")
        }
        _ => "Dominated region (2D projection; ignores time)".to_string(),
    }
}

/// Color for a response time within the retained span: blue (fast) through
/// red (slow). Degenerate spans map to the midpoint.
fn time_color(time: f64, t_min: f64, t_max: f64) -> RGBColor {
    let span = t_max - t_min;
    let h = if span > 0.0 {
        ((time - t_min) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    RGBColor(
        (FAST_COLOR.0 + (SLOW_COLOR.0 - FAST_COLOR.0) * h) as u8,
        (FAST_COLOR.1 + (SLOW_COLOR.1 - FAST_COLOR.1) * h) as u8,
        (FAST_COLOR.2 + (SLOW_COLOR.2 - FAST_COLOR.2) * h) as u8,
    )
}

fn group_thousands(value: f64) -> String {
    let raw = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, digit) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
