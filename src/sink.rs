// src/sink.rs

use crate::model::Handle;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One line of the ancestor tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorRow {
    pub depth: usize,
    /// "<depth>. <name>"
    pub label: String,
    /// Formatted birth date, shown in the birth column
    pub birth_date: String,
    /// "<abbreviation> <date>", empty without a birth event
    pub birth_text: String,
    /// Zero-padded sort value, empty when the birth is undated
    pub birth_sort: String,
    pub death_text: String,
    pub tooltip: String,
    pub handle: Handle,
}

/// Tree-structured destination for ancestor rows
pub trait RowSink {
    type RowId: Copy;

    fn insert(&mut self, row: AncestorRow, parent: Option<Self::RowId>) -> Self::RowId;
    fn clear(&mut self);
}

/// Where rows without a birth sort key go when sorting
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndatedPolicy {
    First,
    #[default]
    Last,
}

impl UndatedPolicy {
    /// Orders two birth sort keys, placing empty keys according to the policy
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => match self {
                UndatedPolicy::First => Ordering::Less,
                UndatedPolicy::Last => Ordering::Greater,
            },
            (false, true) => match self {
                UndatedPolicy::First => Ordering::Greater,
                UndatedPolicy::Last => Ordering::Less,
            },
            (false, false) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        }
    }
}

pub type RowId = usize;

#[derive(Debug, Clone)]
struct Node {
    row: AncestorRow,
    parent: Option<RowId>,
    children: Vec<RowId>,
}

/// Arena-backed row tree
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    nodes: Vec<Node>,
    roots: Vec<RowId>,
}

impl RowSink for TreeModel {
    type RowId = RowId;

    fn insert(&mut self, row: AncestorRow, parent: Option<RowId>) -> RowId {
        let id = self.nodes.len();
        let parent = parent.filter(|p| *p < id);
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        self.nodes.push(Node {
            row,
            parent,
            children: Vec::new(),
        });
        id
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[RowId] {
        &self.roots
    }

    pub fn row(&self, id: RowId) -> Option<&AncestorRow> {
        self.nodes.get(id).map(|n| &n.row)
    }

    pub fn parent(&self, id: RowId) -> Option<RowId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: RowId) -> &[RowId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Rows in fully expanded display order
    pub fn walk(&self) -> Vec<RowId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<RowId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.row.depth).max().unwrap_or(0)
    }

    /// Stably reorders every sibling list by birth sort key
    pub fn sort_by_birth(&mut self, policy: UndatedPolicy) {
        let keys: Vec<String> = self.nodes.iter().map(|n| n.row.birth_sort.clone()).collect();
        let by_key = |a: &RowId, b: &RowId| policy.compare(&keys[*a], &keys[*b]);
        self.roots.sort_by(by_key);
        for node in &mut self.nodes {
            node.children.sort_by(by_key);
        }
    }
}
