// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Host independent logic behind the `$afPrHier` and `$afPrTs` system tasks.

use crate::{HierarchyHost, ReportKind, ReportOptions, Result, Status, UsageError, WalkError};
use std::fs::File;
use std::io::{BufWriter, Write};

/// Operator console and run control of the simulator.
pub trait SimControl {
    /// Prints a message to the simulator console. Messages include their own newlines.
    fn print(&self, msg: &str);

    /// Checks whether the system task call that is currently being compiled has arguments.
    /// Returns `None` if the simulator cannot provide the call.
    fn call_has_arguments(&self) -> Option<bool>;

    /// Asks the simulator to end the run.
    fn finish(&self);
}

/// A zero argument system task that writes one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemTask {
    pub name: &'static str,
    pub kind: ReportKind,
}

impl SystemTask {
    pub const HIERARCHY: SystemTask = SystemTask::new("$afPrHier", ReportKind::Hierarchy);
    pub const TIMESCALE: SystemTask = SystemTask::new("$afPrTs", ReportKind::Timescale);

    pub const fn new(name: &'static str, kind: ReportKind) -> Self {
        SystemTask { name, kind }
    }

    pub fn default_options(&self) -> ReportOptions {
        ReportOptions::new(self.kind)
    }

    /// Compile time check: the task must be called without arguments.
    /// Any violation is reported and ends the simulation.
    pub fn check_usage(&self, ctl: &impl SimControl) -> Status {
        match self.validate(ctl) {
            Ok(()) => Status::Success,
            Err(e) => {
                ctl.print(&format!("ERROR: {e}\n"));
                ctl.finish();
                e.status()
            }
        }
    }

    fn validate(&self, ctl: &impl SimControl) -> std::result::Result<(), UsageError> {
        match ctl.call_has_arguments() {
            None => Err(UsageError::NoTaskCall(self.name)),
            Some(true) => Err(UsageError::UnexpectedArguments(self.name)),
            Some(false) => Ok(()),
        }
    }

    /// Banner printed when the simulation starts.
    pub fn start_of_simulation(&self, ctl: &impl SimControl) -> Status {
        ctl.print(&format!(
            "\nAsFigo Verification Utility: {} VPI app. ",
            self.name
        ));
        ctl.print(&format!("It is a tree walker that {}\n", self.kind.description()));
        Status::Success
    }

    /// Runs the task: writes the report and tells the operator how it went.
    pub fn call<H: HierarchyHost>(
        &self,
        host: &H,
        ctl: &impl SimControl,
        options: &ReportOptions,
    ) -> Status {
        match self.write_report(host, options) {
            Ok(rows) => {
                log::debug!(
                    "{}: wrote {rows} rows to {}",
                    self.name,
                    options.output.display()
                );
                ctl.print(&format!(
                    "\n{} - a tree walker that {}\n",
                    self.name,
                    self.kind.description()
                ));
                ctl.print(&format!(
                    "\nOutput file successfully created in: {} ({rows} module instances)\n",
                    options.output.display()
                ));
                Status::Success
            }
            Err(e @ WalkError::TopLevelIterator) => {
                ctl.print(&format!("ERROR: {} {e}\n", self.name));
                e.status()
            }
            Err(e) => {
                ctl.print(&format!("ERROR: {e}\n"));
                e.status()
            }
        }
    }

    /// Creates (or truncates) the output file and writes the report into it.
    /// The file is closed before this function returns, also on error.
    pub fn write_report<H: HierarchyHost>(
        &self,
        host: &H,
        options: &ReportOptions,
    ) -> Result<usize> {
        let path = &options.output;
        let file = File::create(path).map_err(|source| WalkError::OpenOutput {
            path: path.clone(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        let to_write_error = |e: WalkError| match e {
            WalkError::Io(source) => WalkError::Write {
                path: path.clone(),
                source,
            },
            other => other,
        };
        // an incomplete file is still flushed to disk
        let rows = match self.kind.write(host, &mut out) {
            Ok(rows) => rows,
            Err(e) => {
                let _ = out.flush();
                return Err(to_write_error(e));
            }
        };
        out.flush().map_err(|e| to_write_error(e.into()))?;
        Ok(rows)
    }
}
