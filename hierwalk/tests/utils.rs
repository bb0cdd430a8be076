// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

#![allow(dead_code)]

use hierwalk::*;
use itertools::Itertools;
use proptest::prelude::*;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

pub const NS_PS: Timescale = Timescale::new(-9, -12);

/// Records everything a system task tells the simulator.
#[derive(Default)]
pub struct Console {
    pub messages: RefCell<Vec<String>>,
    pub arguments: Option<bool>,
    pub finished: Cell<bool>,
}

impl Console {
    pub fn with_arguments(has_arguments: bool) -> Self {
        Console {
            arguments: Some(has_arguments),
            ..Default::default()
        }
    }

    pub fn text(&self) -> String {
        self.messages.borrow().concat()
    }
}

impl SimControl for Console {
    fn print(&self, msg: &str) {
        self.messages.borrow_mut().push(msg.to_string());
    }

    fn call_has_arguments(&self) -> Option<bool> {
        self.arguments
    }

    fn finish(&self) {
        self.finished.set(true);
    }
}

/// Wraps a hierarchy but fails to provide the top-level iterator, like a simulator without
/// an elaborated design.
pub struct NoTopLevel<'a>(pub &'a Hierarchy);

impl HierarchyHost for NoTopLevel<'_> {
    type Node = InstanceRef;
    type Children<'b> = InstanceIter<'b>
    where
        Self: 'b;

    fn top_level(&self) -> Option<Self::Children<'_>> {
        None
    }

    fn children(&self, node: InstanceRef) -> Self::Children<'_> {
        self.0.children(node)
    }

    fn def_name(&self, node: InstanceRef) -> Cow<'_, str> {
        self.0.def_name(node)
    }

    fn full_name(&self, node: InstanceRef) -> Cow<'_, str> {
        self.0.full_name(node)
    }

    fn time_unit(&self, node: InstanceRef) -> i32 {
        self.0.time_unit(node)
    }

    fn time_precision(&self, node: InstanceRef) -> i32 {
        self.0.time_precision(node)
    }
}

/// `top` with children `u_a` (which contains `u_c`) and `u_b`.
pub fn example_hierarchy() -> Hierarchy {
    let mut b = HierarchyBuilder::new();
    b.add_instance("top", "DEF_top", Timescale::new(-9, -12));
    b.add_instance("u_a", "DEF_a", Timescale::new(-6, -9));
    b.add_leaf("u_c", "DEF_c", Timescale::new(-12, -15));
    b.pop_instance();
    b.add_leaf("u_b", "DEF_b", Timescale::new(0, 3));
    b.pop_instance();
    b.finish()
}

/// Shape of a synthetic design, every node is one instance.
#[derive(Debug, Clone)]
pub struct Tree(pub Vec<Tree>);

pub fn arb_forest() -> impl Strategy<Value = Vec<Tree>> {
    let leaf = Just(Tree(vec![]));
    let tree = leaf.prop_recursive(5, 96, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Tree)
    });
    prop::collection::vec(tree, 0..4)
}

pub fn build(forest: &[Tree]) -> Hierarchy {
    let mut b = HierarchyBuilder::new();
    for (ii, tree) in forest.iter().enumerate() {
        add_tree(&mut b, &format!("top{ii}"), tree);
    }
    b.finish()
}

fn add_tree(b: &mut HierarchyBuilder, name: &str, tree: &Tree) {
    b.add_instance(name, &format!("DEF_{name}"), NS_PS);
    for (ii, child) in tree.0.iter().enumerate() {
        add_tree(b, &format!("u{ii}"), child);
    }
    b.pop_instance();
}

/// Straight forward recursive reference of the rows we expect, in pre-order.
pub fn expected_rows(forest: &[Tree]) -> Vec<(String, String)> {
    fn visit(prefix: &str, name: String, tree: &Tree, out: &mut Vec<(String, String)>) {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        out.push((format!("DEF_{name}"), path.clone()));
        for (ii, child) in tree.0.iter().enumerate() {
            visit(&path, format!("u{ii}"), child, out);
        }
    }
    let mut out = vec![];
    for (ii, tree) in forest.iter().enumerate() {
        visit("", format!("top{ii}"), tree, &mut out);
    }
    out
}

pub fn count_instances(forest: &[Tree]) -> usize {
    forest.iter().map(|t| 1 + count_instances(&t.0)).sum()
}

/// Splits the body of a hierarchy report into `(definition, path)` pairs.
pub fn hierarchy_rows(csv: &str) -> Vec<(String, String)> {
    csv.lines()
        .skip(3)
        .map(|line| {
            let (def_name, path) = line
                .split(',')
                .collect_tuple::<(&str, &str)>()
                .unwrap_or_else(|| panic!("malformed row: {line:?}"));
            (def_name.to_string(), path.to_string())
        })
        .collect()
}

pub fn write_to_string(kind: ReportKind, host: &impl HierarchyHost) -> (usize, String) {
    let mut out = Vec::new();
    let rows = kind.write(host, &mut out).expect("failed to write report");
    (rows, String::from_utf8(out).unwrap())
}

/// Unique scratch file for a test. Any previous file of the same name is removed.
pub fn scratch_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hierwalk-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}
