// src/ancestry.rs

use crate::events::{EventInfo, EventResolver};
use crate::model::Handle;
use crate::name::NameFormatter;
use crate::sink::{AncestorRow, RowSink, TreeModel};
use crate::store::{FamilyGroup, Individual, RecordStore};

/// Fixed-width key so that string order follows chronological order
pub fn sort_key(sort_value: u64) -> String {
    format!("{:012}", sort_value)
}

/// Statistics from one traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildSummary {
    pub rows: usize,
    pub depth_reached: usize,
    /// References that did not resolve and ended a branch
    pub dangling: usize,
    pub has_data: bool,
}

/// A finished ancestor tree together with its data flag
#[derive(Debug, Clone, Default)]
pub struct AncestorTree {
    pub model: TreeModel,
    pub summary: BuildSummary,
}

impl AncestorTree {
    pub fn has_data(&self) -> bool {
        self.summary.has_data
    }
}

/// Builds the ancestor rows of an individual, up to `max_depth` generations.
///
/// The root is generation 1. Every request rebuilds the whole tree; nothing is
/// carried over between calls except the depth limit.
pub struct AncestorTreeBuilder<'a, S, N, E> {
    store: &'a S,
    names: &'a N,
    events: &'a E,
    max_depth: usize,
}

impl<S, N, E> Clone for AncestorTreeBuilder<'_, S, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, N, E> Copy for AncestorTreeBuilder<'_, S, N, E> {}

impl<'a, S, N, E> AncestorTreeBuilder<'a, S, N, E>
where
    S: RecordStore,
    N: NameFormatter<S::Individual>,
    E: EventResolver<S::Individual>,
{
    pub fn new(store: &'a S, names: &'a N, events: &'a E, max_depth: usize) -> Self {
        AncestorTreeBuilder {
            store,
            names,
            events,
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// True if the root resolves and has at least one resolvable parent.
    pub fn has_data(&self, root: Option<&Handle>) -> bool {
        let Some(person) = root.and_then(|h| self.store.individual(h)) else {
            return false;
        };
        let Some(family) = person.parent_family().and_then(|h| self.store.family(h)) else {
            return false;
        };
        [family.father(), family.mother()]
            .into_iter()
            .flatten()
            .any(|h| self.store.individual(h).is_some())
    }

    /// Clears `sink` and fills it with the ancestor rows of `root`.
    pub fn build<K: RowSink>(&self, root: Option<&Handle>, sink: &mut K) -> BuildSummary {
        sink.clear();
        let mut summary = BuildSummary::default();
        let Some(root) = root else {
            log::debug!("No active person, ancestor tree left empty");
            return summary;
        };

        self.add_to_tree(1, None, root, sink, &mut summary);
        summary.has_data = self.has_data(Some(root));
        log::debug!(
            "Built ancestor tree for {}: {} rows, {} generations, {} dangling references",
            root,
            summary.rows,
            summary.depth_reached,
            summary.dangling
        );
        summary
    }

    pub fn build_tree(&self, root: Option<&Handle>) -> AncestorTree {
        let mut model = TreeModel::new();
        let summary = self.build(root, &mut model);
        AncestorTree { model, summary }
    }

    fn add_to_tree<K: RowSink>(
        &self,
        depth: usize,
        parent: Option<K::RowId>,
        handle: &Handle,
        sink: &mut K,
        summary: &mut BuildSummary,
    ) -> Option<K::RowId> {
        if depth > self.max_depth {
            return None;
        }

        let Some(person) = self.store.individual(handle) else {
            log::debug!("Person {} does not resolve, branch ends", handle);
            summary.dangling += 1;
            return None;
        };

        let row_id = sink.insert(self.make_row(depth, person), parent);
        summary.rows += 1;
        summary.depth_reached = summary.depth_reached.max(depth);

        if depth + 1 > self.max_depth {
            return Some(row_id);
        }

        if let Some(family_handle) = person.parent_family() {
            match self.store.family(family_handle) {
                Some(family) => {
                    if let Some(father) = family.father() {
                        self.add_to_tree(depth + 1, Some(row_id), father, sink, summary);
                    }
                    if let Some(mother) = family.mother() {
                        self.add_to_tree(depth + 1, Some(row_id), mother, sink, summary);
                    }
                }
                None => {
                    log::debug!("Family {} of {} does not resolve", family_handle, handle);
                    summary.dangling += 1;
                }
            }
        }

        Some(row_id)
    }

    pub fn make_row(&self, depth: usize, person: &S::Individual) -> AncestorRow {
        let name = self.names.display(person);

        let (birth_date, birth_text, birth_sort) = match self.events.birth_or_fallback(person) {
            Some(birth) => {
                let date = birth.display_date();
                let text = format!("{} {}", birth.abbreviation(), date);
                let key = birth.sort_value().map(sort_key).unwrap_or_default();
                (date, text, key)
            }
            None => Default::default(),
        };

        let death_text = self
            .events
            .death_or_fallback(person)
            .map(|death| format!("{} {}", death.abbreviation(), death.display_date()))
            .unwrap_or_default();

        AncestorRow {
            depth,
            label: format!("{}. {}", depth, name),
            tooltip: format!("{}\n{}\n{}", name, birth_text, death_text),
            birth_date,
            birth_text,
            birth_sort,
            death_text,
            handle: person.handle().clone(),
        }
    }
}
