// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// CSV layouts of the two reports. Fields are written as they come from the host, without any
// quoting. Instance and module names are Verilog identifiers and thus never contain a comma or
// a newline.

use crate::{time_unit_label, walk, HierarchyHost, Result};
use std::io::Write;

/// Selects which columns are written for every instance.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportKind {
    /// `Module_name,Instance_name`
    Hierarchy,
    /// `Module, Time unit, Time Precision`
    Timescale,
}

impl ReportKind {
    /// File that the simulator plugins write to, relative to the working directory.
    pub fn default_output(self) -> &'static str {
        match self {
            ReportKind::Hierarchy => "output_hier_info.csv",
            ReportKind::Timescale => "output_tscale_info.csv",
        }
    }

    /// What the report contains, used in operator messages.
    pub fn description(self) -> &'static str {
        match self {
            ReportKind::Hierarchy => {
                "prints each Module name and its instance information to a CSV file"
            }
            ReportKind::Timescale => {
                "prints each Module name and its timescale information to a CSV file"
            }
        }
    }

    /// Comment lines in front of the column names. They are not CSV records.
    pub fn write_preamble(self, out: &mut impl Write) -> std::io::Result<()> {
        match self {
            ReportKind::Hierarchy => {
                writeln!(
                    out,
                    "// AsFigo Verification utility - an app to print Instance hierarchy from VPI"
                )?;
                writeln!(out, "// Module_name, Instance_name")
            }
            ReportKind::Timescale => Ok(()),
        }
    }

    /// Column names.
    pub fn write_header<W: Write>(self, out: &mut csv::Writer<W>) -> csv::Result<()> {
        match self {
            ReportKind::Hierarchy => out.write_record(["Module_name", "Instance_name"]),
            ReportKind::Timescale => {
                out.write_record(["Module", " Time unit", " Time Precision"])
            }
        }
    }

    /// Writes the record for a single instance.
    pub fn write_row<H: HierarchyHost, W: Write>(
        self,
        host: &H,
        node: H::Node,
        out: &mut csv::Writer<W>,
    ) -> csv::Result<()> {
        let def_name = host.def_name(node);
        match self {
            ReportKind::Hierarchy => {
                let full_name = host.full_name(node);
                out.write_record([&*def_name, &*full_name])
            }
            ReportKind::Timescale => {
                let unit = format!(" {}", time_unit_label(host.time_unit(node)));
                let precision = format!(" {}", time_unit_label(host.time_precision(node)));
                out.write_record([&*def_name, unit.as_str(), precision.as_str()])
            }
        }
    }

    /// Writes the header followed by one row per instance reachable from the top-level
    /// instances. Returns the number of rows.
    ///
    /// The header is written before the host is asked for the top-level instances, so a
    /// failed walk leaves a file that contains only the header.
    pub fn write<H: HierarchyHost>(self, host: &H, out: &mut impl Write) -> Result<usize> {
        self.write_preamble(out)?;
        let mut records = csv_writer(&mut *out);
        self.write_header(&mut records).map_err(std::io::Error::from)?;
        let written = walk(host, |node| {
            self.write_row(host, node, &mut records)
                .map_err(std::io::Error::from)
        });
        // whatever was written before a failure still reaches `out`
        let flushed = records.flush();
        let rows = written?;
        flushed?;
        Ok(rows)
    }
}

/// Plain comma separated records: no quoting, `\n` line endings.
pub fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out)
}
