// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use crate::Timescale;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::num::NonZeroU32;
use std::ops::Index;

/// Read-only view of a design hierarchy that is owned by somebody else, usually a simulator.
///
/// Nodes are non-owning handles. They are only meaningful while the host is borrowed and
/// must not be kept around after a walk returns.
pub trait HierarchyHost {
    type Node: Copy;
    type Children<'a>: Iterator<Item = Self::Node>
    where
        Self: 'a;

    /// All instances without a parent, in host order.
    /// Returns `None` if the host is unable to supply an iterator at all, which is different
    /// from a design without any instances.
    fn top_level(&self) -> Option<Self::Children<'_>>;

    /// Direct child instances in host order. Leaves yield an empty iterator.
    fn children(&self, node: Self::Node) -> Self::Children<'_>;

    /// Name of the module definition, e.g., `DEF_top`.
    fn def_name(&self, node: Self::Node) -> Cow<'_, str>;

    /// Full hierarchical instance path, e.g., `top.u_a.u_c`.
    fn full_name(&self, node: Self::Node) -> Cow<'_, str>;

    /// Time unit as a power of ten seconds.
    fn time_unit(&self, node: Self::Node) -> i32;

    /// Time precision as a power of ten seconds.
    fn time_precision(&self, node: Self::Node) -> i32;
}

/// Uniquely identifies an instance in an in-memory [`Hierarchy`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceRef(NonZeroU32);

impl InstanceRef {
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        NonZeroU32::new(index as u32 + 1).map(Self)
    }

    #[inline]
    pub fn index(&self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyStringId(NonZeroU32);

impl HierarchyStringId {
    #[inline]
    fn from_index(index: usize) -> Self {
        let value = (index + 1) as u32;
        HierarchyStringId(NonZeroU32::new(value).unwrap())
    }

    #[inline]
    fn index(&self) -> usize {
        (self.0.get() - 1) as usize
    }
}

const SCOPE_SEPARATOR: char = '.';

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    name: HierarchyStringId,
    def_name: HierarchyStringId,
    timescale: Timescale,
    child: Option<InstanceRef>,
    parent: Option<InstanceRef>,
    next: Option<InstanceRef>,
}

impl Instance {
    /// Local name of the instance.
    #[inline]
    pub fn name<'a>(&self, hierarchy: &'a Hierarchy) -> &'a str {
        &hierarchy[self.name]
    }

    /// Name of the module that was instantiated.
    #[inline]
    pub fn def_name<'a>(&self, hierarchy: &'a Hierarchy) -> &'a str {
        &hierarchy[self.def_name]
    }

    /// Full hierarchical name of the instance.
    pub fn full_name(&self, hierarchy: &Hierarchy) -> String {
        let mut parents = Vec::new();
        let mut parent = self.parent;
        while let Some(id) = parent {
            parents.push(id);
            parent = hierarchy[id].parent;
        }
        let mut out: String = String::with_capacity((parents.len() + 1) * 5);
        for parent_id in parents.iter().rev() {
            out.push_str(hierarchy[*parent_id].name(hierarchy));
            out.push(SCOPE_SEPARATOR)
        }
        out.push_str(self.name(hierarchy));
        out
    }

    pub fn timescale(&self) -> Timescale {
        self.timescale
    }

    pub fn parent(&self) -> Option<InstanceRef> {
        self.parent
    }

    pub fn children<'a>(&self, hierarchy: &'a Hierarchy) -> InstanceIter<'a> {
        InstanceIter::new(hierarchy, self.child)
    }
}

/// Follows the sibling links starting at the first child of a parent.
#[derive(Debug, Clone)]
pub struct InstanceIter<'a> {
    hierarchy: &'a Hierarchy,
    item: Option<InstanceRef>,
}

impl<'a> InstanceIter<'a> {
    fn new(hierarchy: &'a Hierarchy, item: Option<InstanceRef>) -> Self {
        Self { hierarchy, item }
    }
}

impl Iterator for InstanceIter<'_> {
    type Item = InstanceRef;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.item?;
        self.item = self.hierarchy[item].next;
        Some(item)
    }
}

/// Arena backed instance tree. Used to describe designs outside of a running simulator.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Hierarchy {
    instances: Vec<Instance>,
    first_item: Option<InstanceRef>,
    strings: Vec<String>,
}

// public implementation
impl Hierarchy {
    /// Returns an iterator over references to all top-level instances.
    pub fn instances(&self) -> InstanceIter<'_> {
        InstanceIter::new(self, self.first_item)
    }

    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn lookup_instance<N: AsRef<str>>(&self, names: &[N]) -> Option<InstanceRef> {
        let prefix = names.first()?.as_ref();
        let mut instance = self.instances().find(|i| self[*i].name(self) == prefix)?;
        for name in names.iter().skip(1) {
            instance = self[instance]
                .children(self)
                .find(|i| self[*i].name(self) == name.as_ref())?;
        }
        Some(instance)
    }
}

impl Index<InstanceRef> for Hierarchy {
    type Output = Instance;

    fn index(&self, index: InstanceRef) -> &Self::Output {
        &self.instances[index.index()]
    }
}

impl Index<HierarchyStringId> for Hierarchy {
    type Output = str;

    fn index(&self, index: HierarchyStringId) -> &Self::Output {
        &self.strings[index.index()]
    }
}

impl HierarchyHost for Hierarchy {
    type Node = InstanceRef;
    type Children<'a> = InstanceIter<'a>;

    fn top_level(&self) -> Option<Self::Children<'_>> {
        Some(self.instances())
    }

    fn children(&self, node: InstanceRef) -> Self::Children<'_> {
        self[node].children(self)
    }

    fn def_name(&self, node: InstanceRef) -> Cow<'_, str> {
        Cow::Borrowed(self[node].def_name(self))
    }

    fn full_name(&self, node: InstanceRef) -> Cow<'_, str> {
        Cow::Owned(self[node].full_name(self))
    }

    fn time_unit(&self, node: InstanceRef) -> i32 {
        self[node].timescale.unit
    }

    fn time_precision(&self, node: InstanceRef) -> i32 {
        self[node].timescale.precision
    }
}

struct InstanceStackEntry {
    id: usize,
    last_child: Option<InstanceRef>,
}

/// Builds a [`Hierarchy`] in depth-first order: every `add_instance` opens a new instance
/// below the currently open one, `pop_instance` closes it again.
pub struct HierarchyBuilder {
    instances: Vec<Instance>,
    first_item: Option<InstanceRef>,
    stack: Vec<InstanceStackEntry>,
    strings: Vec<String>,
    string_lookup: FxHashMap<String, HierarchyStringId>,
}

const TOP: usize = usize::MAX;

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        // we start with a fake entry in the stack to keep track of multiple top-level instances
        let stack = vec![InstanceStackEntry {
            id: TOP,
            last_child: None,
        }];
        HierarchyBuilder {
            instances: Vec::default(),
            first_item: None,
            stack,
            strings: Vec::default(),
            string_lookup: FxHashMap::default(),
        }
    }

    pub fn finish(mut self) -> Hierarchy {
        self.instances.shrink_to_fit();
        self.strings.shrink_to_fit();
        Hierarchy {
            instances: self.instances,
            first_item: self.first_item,
            strings: self.strings,
        }
    }

    /// Interns a string. Definition names repeat for every instance of a module.
    pub fn add_string(&mut self, value: &str) -> HierarchyStringId {
        if let Some(id) = self.string_lookup.get(value) {
            return *id;
        }
        let sym = HierarchyStringId::from_index(self.strings.len());
        self.strings.push(value.to_string());
        self.string_lookup.insert(value.to_string(), sym);
        debug_assert_eq!(self.strings.len(), sym.index() + 1);
        sym
    }

    /// Number of currently open instances.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Adds an instance below the currently open one and opens it.
    pub fn add_instance(
        &mut self,
        name: &str,
        def_name: &str,
        timescale: Timescale,
    ) -> InstanceRef {
        let name = self.add_string(name);
        let def_name = self.add_string(def_name);
        let node_id = InstanceRef::from_index(self.instances.len()).unwrap();
        if self.first_item.is_none() {
            self.first_item = Some(node_id);
        }

        let entry = self.stack.last_mut().unwrap();
        let parent = if entry.id == TOP {
            None
        } else {
            InstanceRef::from_index(entry.id)
        };
        match entry.last_child {
            Some(sibling) => {
                debug_assert!(self.instances[sibling.index()].next.is_none());
                self.instances[sibling.index()].next = Some(node_id);
            }
            None => {
                if let Some(parent) = parent {
                    debug_assert!(self.instances[parent.index()].child.is_none());
                    self.instances[parent.index()].child = Some(node_id);
                }
            }
        }
        entry.last_child = Some(node_id);

        self.instances.push(Instance {
            name,
            def_name,
            timescale,
            child: None,
            parent,
            next: None,
        });
        self.stack.push(InstanceStackEntry {
            id: node_id.index(),
            last_child: None,
        });
        node_id
    }

    /// Adds an instance without children.
    pub fn add_leaf(&mut self, name: &str, def_name: &str, timescale: Timescale) -> InstanceRef {
        let id = self.add_instance(name, def_name, timescale);
        self.pop_instance();
        id
    }

    pub fn pop_instance(&mut self) {
        assert!(self.stack.len() > 1, "no open instance to pop");
        self.stack.pop();
    }

    #[inline]
    pub fn pop_instances(&mut self, num: usize) {
        for _ in 0..num {
            self.pop_instance();
        }
    }
}
