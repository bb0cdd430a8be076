// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use crate::{HierarchyHost, Result, WalkError};

/// Pre-order depth-first traversal of every instance reachable from the top-level instances.
///
/// Parents are yielded before their children and siblings in the order the host produces
/// them. Instead of recursing, we keep a stack of live child iterators, one per open level,
/// so the depth of the design is only limited by memory.
pub struct Preorder<'h, H: HierarchyHost + 'h> {
    host: &'h H,
    stack: Vec<H::Children<'h>>,
}

impl<'h, H: HierarchyHost + 'h> Preorder<'h, H> {
    /// Returns `None` if the host cannot iterate over its top-level instances.
    pub fn new(host: &'h H) -> Option<Self> {
        let top = host.top_level()?;
        Some(Self {
            host,
            stack: vec![top],
        })
    }

    /// Number of ancestors of the instance that was returned last.
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(2)
    }
}

impl<'h, H: HierarchyHost + 'h> Iterator for Preorder<'h, H> {
    type Item = H::Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(node) => {
                    self.stack.push(self.host.children(node));
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Calls `visit` once for every instance in pre-order and returns the number of instances.
/// Stops at the first error returned by `visit`.
pub fn walk<H: HierarchyHost>(
    host: &H,
    mut visit: impl FnMut(H::Node) -> std::io::Result<()>,
) -> Result<usize> {
    let mut nodes = Preorder::new(host).ok_or(WalkError::TopLevelIterator)?;
    let mut count = 0;
    while let Some(node) = nodes.next() {
        log::trace!("instance #{count} at depth {}", nodes.depth());
        visit(node)?;
        count += 1;
    }
    Ok(count)
}
