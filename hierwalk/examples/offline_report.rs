// Copyright 2023 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Writes the hierarchy or timescale report for a design described in a text file, e.g.:
//
//   top     DEF_top 1ns 1ps
//     u_a   DEF_a   -6  -9
//       u_c DEF_c
//     u_b   DEF_b   1s  100ms
//
// Nesting is given by indentation. Units are either exponents or names like `10ns`.
// Instances without a timescale use the Verilog default of `1s / 1s`.

use clap::{Parser, ValueEnum};
use hierwalk::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "offline_report")]
#[command(author = "Kevin Laeufer <laeufer@berkeley.edu>")]
#[command(version)]
#[command(about = "Writes a hierwalk report without running a simulator.", long_about = None)]
struct Args {
    #[arg(value_name = "DESIGN", index = 1)]
    filename: PathBuf,
    #[arg(long, value_enum, default_value_t = Report::Hier)]
    report: Report,
    #[arg(long, short, help = "defaults to the file name used by the simulator plugin")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Report {
    Hier,
    Timescale,
}

impl From<Report> for ReportKind {
    fn from(value: Report) -> Self {
        match value {
            Report::Hier => ReportKind::Hierarchy,
            Report::Timescale => ReportKind::Timescale,
        }
    }
}

const DEFAULT_TIMESCALE: Timescale = Timescale::new(0, 0);

fn parse_exponent(value: &str) -> Option<i32> {
    if let Ok(exponent) = value.parse::<i32>() {
        return Some(exponent);
    }
    TimeUnit::ALL
        .iter()
        .find(|u| {
            let label = u.label().replace(' ', "");
            label == value || format!("1{label}") == value
        })
        .map(|u| u.exponent() as i32)
}

fn parse_design(text: &str) -> std::result::Result<Hierarchy, String> {
    let mut b = HierarchyBuilder::new();
    let mut indents: Vec<usize> = Vec::new();
    for (ii, line) in text.lines().enumerate() {
        let content = line.trim_start();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        let indent = line.len() - content.len();
        while indents.last().is_some_and(|&open| open >= indent) {
            indents.pop();
            b.pop_instance();
        }
        let fields: Vec<&str> = content.split_whitespace().collect();
        let (name, def_name, timescale) = match fields.as_slice() {
            [name, def_name] => (*name, *def_name, DEFAULT_TIMESCALE),
            [name, def_name, unit, precision] => {
                let unit = parse_exponent(unit)
                    .ok_or_else(|| format!("line {}: unknown time unit {unit}", ii + 1))?;
                let precision = parse_exponent(precision)
                    .ok_or_else(|| format!("line {}: unknown time unit {precision}", ii + 1))?;
                (*name, *def_name, Timescale::new(unit, precision))
            }
            _ => {
                return Err(format!(
                    "line {}: expected `<instance> <module> [<unit> <precision>]`",
                    ii + 1
                ))
            }
        };
        b.add_instance(name, def_name, timescale);
        indents.push(indent);
    }
    Ok(b.finish())
}

/// Prints to stdout, there is no simulator console.
struct Stdout;

impl SimControl for Stdout {
    fn print(&self, msg: &str) {
        print!("{msg}");
    }

    fn call_has_arguments(&self) -> Option<bool> {
        Some(false)
    }

    fn finish(&self) {}
}

fn main() {
    let args = Args::parse();
    let text = std::fs::read_to_string(&args.filename).expect("failed to read design");
    let hierarchy = match parse_design(&text) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}: {e}", args.filename.display());
            std::process::exit(1);
        }
    };

    let kind = ReportKind::from(args.report);
    let task = match kind {
        ReportKind::Hierarchy => SystemTask::HIERARCHY,
        ReportKind::Timescale => SystemTask::TIMESCALE,
    };
    let options = match args.output {
        Some(output) => ReportOptions { output },
        None => task.default_options(),
    };
    let status = task.call(&hierarchy, &Stdout, &options);
    std::process::exit(status.into());
}
