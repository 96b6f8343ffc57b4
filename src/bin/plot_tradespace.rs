//! Plot the wildfire tradespace from the solver's output document.
//!
//! The Pareto set is 3D (total_cost USD, logistics_load kg, response_time
//! min); this draws the 2D projection with X logistics load, Y total cost,
//! color response time. Shading modes: none; projection (dominated region of
//! the 2D frontier in (load, cost), ignoring time); slice (same, after
//! filtering points by response_time <= --time-max).
//!
//! Run: cargo run --bin plot_tradespace -- [--path out-query/output.yaml]
//!      [--which optimistic|pessimistic] [--time-max MIN]
//!      [--shade none|projection|slice] [--output FILE.png] [--label-max N]

use std::path::PathBuf;
use std::process;

use firebreak::tradespace::{
    filter_by_time, load_antichain, render_tradespace, PlotOptions, ResultKind, ShadeMode,
    DEFAULT_LABEL_MAX, DEFAULT_OUTPUT_IMAGE,
};

const DEFAULT_INPUT: &str = "out-query/output.yaml";

#[derive(Debug)]
struct Args {
    path: PathBuf,
    which: ResultKind,
    time_max: Option<f64>,
    shade: ShadeMode,
    output: PathBuf,
    label_max: usize,
}

fn usage() -> ! {
    eprintln!(
        "usage: plot_tradespace [--path {DEFAULT_INPUT}] [--which optimistic|pessimistic] \
         [--time-max MIN] [--shade none|projection|slice] [--output {DEFAULT_OUTPUT_IMAGE}] \
         [--label-max {DEFAULT_LABEL_MAX}]"
    );
    process::exit(2);
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args {
        path: PathBuf::from(DEFAULT_INPUT),
        which: ResultKind::Optimistic,
        time_max: None,
        shade: ShadeMode::None,
        output: PathBuf::from(DEFAULT_OUTPUT_IMAGE),
        label_max: DEFAULT_LABEL_MAX,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let Some(value) = args.get(i + 1) else { usage() };
        match flag {
            "--path" => parsed.path = PathBuf::from(value),
            "--which" => match ResultKind::parse(value) {
                Some(which) => parsed.which = which,
                None => usage(),
            },
            "--time-max" => match value.parse::<f64>() {
                Ok(time_max) => parsed.time_max = Some(time_max),
                Err(_) => usage(),
            },
            "--shade" => match ShadeMode::parse(value) {
                Some(shade) => parsed.shade = shade,
                None => usage(),
            },
            "--output" => parsed.output = PathBuf::from(value),
            "--label-max" => match value.parse::<usize>() {
                Ok(label_max) => parsed.label_max = label_max,
                Err(_) => usage(),
            },
            _ => usage(),
        }
        i += 2;
    }
    parsed
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut points = load_antichain(&args.path, args.which)?;
    if let Some(time_max) = args.time_max {
        points = filter_by_time(&points, time_max)?;
    }

    let options = PlotOptions {
        output: args.output.clone(),
        shade: args.shade,
        time_max: args.time_max,
        label_max: args.label_max,
    };
    render_tradespace(&points, &options)?;
    println!("Saved {}", options.output.display());
    Ok(())
}

fn main() {
    let raw: Vec<String> = std::env::args().collect();
    let args = parse_args(&raw);
    if let Err(err) = run(&args) {
        eprintln!("plot_tradespace error: {err}");
        process::exit(1);
    }
}
