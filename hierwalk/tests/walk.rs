// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

mod utils;

use hierwalk::*;
use proptest::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use utils::*;

#[test]
fn test_example_rows_in_preorder() {
    let h = example_hierarchy();
    let (rows, csv) = write_to_string(ReportKind::Hierarchy, &h);
    assert_eq!(rows, 4);
    assert_eq!(
        hierarchy_rows(&csv),
        [
            ("DEF_top".to_string(), "top".to_string()),
            ("DEF_a".to_string(), "top.u_a".to_string()),
            ("DEF_c".to_string(), "top.u_a.u_c".to_string()),
            ("DEF_b".to_string(), "top.u_b".to_string()),
        ]
    );
}

#[test]
fn test_no_instances_is_not_an_error() {
    let h = HierarchyBuilder::new().finish();
    let (rows, csv) = write_to_string(ReportKind::Hierarchy, &h);
    assert_eq!(rows, 0);
    assert_eq!(csv.lines().count(), 3, "only the header is expected");
}

#[test]
fn test_missing_top_level_iterator() {
    let h = example_hierarchy();
    let mut visited = 0;
    let res = walk(&NoTopLevel(&h), |_| {
        visited += 1;
        Ok(())
    });
    assert!(matches!(res, Err(WalkError::TopLevelIterator)));
    assert_eq!(visited, 0);
    assert!(Preorder::new(&NoTopLevel(&h)).is_none());
}

#[test]
fn test_wide_hierarchy() {
    let mut b = HierarchyBuilder::new();
    b.add_instance("tb", "tb", NS_PS);
    for ii in 0..10_000 {
        b.add_leaf(&format!("cell_{ii}"), "sky130_fd_sc_hd__inv_1", NS_PS);
    }
    b.pop_instance();
    let h = b.finish();
    assert_eq!(walk(&h, |_| Ok(())).unwrap(), 10_001);
    let last = Preorder::new(&h).unwrap().last().unwrap();
    assert_eq!(h[last].full_name(&h), "tb.cell_9999");
}

fn check_walk(forest: Vec<Tree>) {
    let h = build(&forest);
    let (rows, csv) = write_to_string(ReportKind::Hierarchy, &h);
    let actual = hierarchy_rows(&csv);

    // one row per instance
    assert_eq!(rows, count_instances(&forest));
    assert_eq!(actual.len(), rows);

    // every instance exactly once
    let paths: FxHashSet<&str> = actual.iter().map(|(_, p)| p.as_str()).collect();
    assert_eq!(paths.len(), actual.len(), "duplicate instance in {csv}");

    // exactly the reachable instances, in the same order as the recursive definition
    assert_eq!(actual, expected_rows(&forest));

    // parents always come before their children
    let position: FxHashMap<&str, usize> = actual
        .iter()
        .enumerate()
        .map(|(ii, (_, p))| (p.as_str(), ii))
        .collect();
    for (ii, (_, path)) in actual.iter().enumerate() {
        if let Some((parent, _)) = path.rsplit_once('.') {
            assert!(position[parent] < ii, "{parent} must be written before {path}");
        }
    }

    // repeated runs are byte identical
    let (_, again) = write_to_string(ReportKind::Hierarchy, &h);
    assert_eq!(csv, again);
}

proptest! {
    #[test]
    fn walk_visits_every_instance_once_in_preorder(forest in arb_forest()) {
        check_walk(forest);
    }

    #[test]
    fn timescale_report_has_one_row_per_instance(forest in arb_forest()) {
        let h = build(&forest);
        let (rows, csv) = write_to_string(ReportKind::Timescale, &h);
        prop_assert_eq!(rows, count_instances(&forest));
        prop_assert_eq!(csv.lines().count(), rows + 1);
        for line in csv.lines().skip(1) {
            prop_assert!(line.ends_with(",  ns,  ps"), "{}", line);
        }
    }
}
