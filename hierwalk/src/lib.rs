// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

mod hierarchy;
mod report;
mod task;
mod timescale;
mod walk;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// File the report is written to. Existing files are overwritten.
    pub output: PathBuf,
}

impl ReportOptions {
    /// Writes to the default file name of the report in the current working directory.
    pub fn new(kind: ReportKind) -> Self {
        Self {
            output: PathBuf::from(kind.default_output()),
        }
    }
}

/// Value returned to the simulator from every callback.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum Status {
    Success = 0,
    FileOpen = 1,
    ModIteration = 2,
    SystfCall = 3,
    SystfUsage = 4,
}

#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("Failed to open CSV file: {} for writing", .path.display())]
    OpenOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to obtain top module iterator")]
    TopLevelIterator,
    #[error("Failed to write CSV file: {}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WalkError {
    pub fn status(&self) -> Status {
        match self {
            WalkError::TopLevelIterator => Status::ModIteration,
            WalkError::OpenOutput { .. } | WalkError::Write { .. } | WalkError::Io(_) => {
                Status::FileOpen
            }
        }
    }
}

/// Misuse of a system task, detected while the simulator compiles the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("{0} could not obtain a handle to the Task call")]
    NoTaskCall(&'static str),
    #[error("{0} does not require any arguments")]
    UnexpectedArguments(&'static str),
}

impl UsageError {
    pub fn status(&self) -> Status {
        match self {
            UsageError::NoTaskCall(_) => Status::SystfCall,
            UsageError::UnexpectedArguments(_) => Status::SystfUsage,
        }
    }
}

pub type Result<T> = std::result::Result<T, WalkError>;

pub use hierarchy::{
    Hierarchy, HierarchyBuilder, HierarchyHost, HierarchyStringId, Instance, InstanceIter,
    InstanceRef,
};
pub use report::{csv_writer, ReportKind};
pub use task::{SimControl, SystemTask};
pub use timescale::{time_unit_label, TimeUnit, Timescale, UNKNOWN_TIME_UNIT};
pub use walk::{walk, Preorder};
