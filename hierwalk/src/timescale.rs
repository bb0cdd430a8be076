// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Decodes the time unit and precision exponents that simulators report per module.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt::{Display, Formatter};

/// Printed for any exponent outside of `-15..=2`.
pub const UNKNOWN_TIME_UNIT: &str = "Unknown Time Unit";

/// Time unit and precision of a module, each as a power of ten seconds.
/// Values are kept raw since a host may report exponents we cannot name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Timescale {
    pub unit: i32,
    pub precision: i32,
}

impl Timescale {
    pub const fn new(unit: i32, precision: i32) -> Self {
        Timescale { unit, precision }
    }

    pub fn unit_label(&self) -> &'static str {
        time_unit_label(self.unit)
    }

    pub fn precision_label(&self) -> &'static str {
        time_unit_label(self.precision)
    }
}

/// One of the 18 time units that can be expressed in Verilog: `1`, `10` or `100` times
/// one of `fs`, `ps`, `ns`, `us`, `ms` and `s`.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    Fs = -15,
    TenFs = -14,
    HundredFs = -13,
    Ps = -12,
    TenPs = -11,
    HundredPs = -10,
    Ns = -9,
    TenNs = -8,
    HundredNs = -7,
    Us = -6,
    TenUs = -5,
    HundredUs = -4,
    Ms = -3,
    TenMs = -2,
    HundredMs = -1,
    S = 0,
    TenS = 1,
    HundredS = 2,
}

// report text, indexed by `exponent + 15`, including the leading space of the csv format
const REPORT_LABELS: [&str; 18] = [
    " fs", " 10 fs", " 100 fs", " ps", " 10 ps", " 100 ps", " ns", " 10 ns", " 100 ns", " us",
    " 10 us", " 100 us", " ms", " 10 ms", " 100 ms", " s", " 10 s", " 100 s",
];

impl TimeUnit {
    pub const ALL: [TimeUnit; 18] = [
        TimeUnit::Fs,
        TimeUnit::TenFs,
        TimeUnit::HundredFs,
        TimeUnit::Ps,
        TimeUnit::TenPs,
        TimeUnit::HundredPs,
        TimeUnit::Ns,
        TimeUnit::TenNs,
        TimeUnit::HundredNs,
        TimeUnit::Us,
        TimeUnit::TenUs,
        TimeUnit::HundredUs,
        TimeUnit::Ms,
        TimeUnit::TenMs,
        TimeUnit::HundredMs,
        TimeUnit::S,
        TimeUnit::TenS,
        TimeUnit::HundredS,
    ];

    pub fn from_exponent(exponent: i32) -> Option<Self> {
        let exponent = i8::try_from(exponent).ok()?;
        TimeUnit::try_from(exponent).ok()
    }

    pub fn exponent(self) -> i8 {
        self.into()
    }

    /// Human-readable name, e.g., `ns` or `100 ps`.
    pub fn label(self) -> &'static str {
        &self.report_label()[1..]
    }

    fn report_label(self) -> &'static str {
        REPORT_LABELS[(self.exponent() + 15) as usize]
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Text used in the timescale report: the label with a leading space, or
/// [`UNKNOWN_TIME_UNIT`] for exponents that do not name a unit. Never fails.
pub fn time_unit_label(exponent: i32) -> &'static str {
    match TimeUnit::from_exponent(exponent) {
        Some(unit) => unit.report_label(),
        None => UNKNOWN_TIME_UNIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_table() {
        let expected = [
            (-15, " fs"),
            (-14, " 10 fs"),
            (-13, " 100 fs"),
            (-12, " ps"),
            (-11, " 10 ps"),
            (-10, " 100 ps"),
            (-9, " ns"),
            (-8, " 10 ns"),
            (-7, " 100 ns"),
            (-6, " us"),
            (-5, " 10 us"),
            (-4, " 100 us"),
            (-3, " ms"),
            (-2, " 10 ms"),
            (-1, " 100 ms"),
            (0, " s"),
            (1, " 10 s"),
            (2, " 100 s"),
        ];
        for (exponent, label) in expected {
            assert_eq!(time_unit_label(exponent), label, "10^{exponent} s");
        }
    }

    #[test]
    fn test_out_of_range_is_unknown() {
        for exponent in [-16, 3, 100, -100, i32::MIN, i32::MAX, 127, -128, 255] {
            assert_eq!(time_unit_label(exponent), UNKNOWN_TIME_UNIT);
            assert!(TimeUnit::from_exponent(exponent).is_none());
        }
    }

    #[test]
    fn test_enum_matches_exponents() {
        for (ii, unit) in TimeUnit::ALL.iter().enumerate() {
            assert_eq!(unit.exponent() as i32, ii as i32 - 15);
            assert_eq!(TimeUnit::from_exponent(ii as i32 - 15), Some(*unit));
        }
        assert_eq!(TimeUnit::Ns.to_string(), "ns");
        assert_eq!(TimeUnit::HundredPs.label(), "100 ps");
    }

    #[test]
    fn test_timescale_labels() {
        let ts = Timescale::new(-9, -12);
        assert_eq!(ts.unit_label(), " ns");
        assert_eq!(ts.precision_label(), " ps");
        assert_eq!(Timescale::new(5, 0).unit_label(), UNKNOWN_TIME_UNIT);
    }
}
