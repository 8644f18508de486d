// src/view.rs

use crate::ancestry::{AncestorTreeBuilder, BuildSummary};
use crate::error::{AncestryError, Result};
use crate::events::EventResolver;
use crate::model::Handle;
use crate::name::NameFormatter;
use crate::sink::{RowId, TreeModel, UndatedPolicy};
use crate::store::RecordStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// An editor for this record is already open
    #[error("an editor is already open for {0}")]
    WindowActive(Handle),
    #[error("{0}")]
    Failed(String),
}

/// Opens an editor for a person when a row is activated
pub trait EditorLauncher {
    fn edit_person(&mut self, handle: &Handle) -> std::result::Result<(), EditorError>;
}

/// Ancestor panel state driven by host events
#[derive(Debug, Default)]
pub struct AncestorView {
    model: TreeModel,
    active: Option<Handle>,
    summary: BuildSummary,
    sort: Option<UndatedPolicy>,
}

impl AncestorView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort siblings by birth after each rebuild instead of keeping father/mother order
    pub fn with_birth_sort(mut self, policy: UndatedPolicy) -> Self {
        self.sort = Some(policy);
        self
    }

    pub fn model(&self) -> &TreeModel {
        &self.model
    }

    pub fn active(&self) -> Option<&Handle> {
        self.active.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.summary.has_data
    }

    /// Statistics of the most recent rebuild
    pub fn summary(&self) -> BuildSummary {
        self.summary
    }

    /// Clears the model and rebuilds it for the active person
    pub fn update<S, N, E>(&mut self, builder: &AncestorTreeBuilder<'_, S, N, E>)
    where
        S: RecordStore,
        N: NameFormatter<S::Individual>,
        E: EventResolver<S::Individual>,
    {
        self.summary = builder.build(self.active.as_ref(), &mut self.model);
        if let Some(policy) = self.sort {
            self.model.sort_by_birth(policy);
        }
    }

    /// Refreshes only the data flag, without rebuilding rows
    pub fn update_has_data<S, N, E>(&mut self, builder: &AncestorTreeBuilder<'_, S, N, E>)
    where
        S: RecordStore,
        N: NameFormatter<S::Individual>,
        E: EventResolver<S::Individual>,
    {
        self.summary.has_data = builder.has_data(self.active.as_ref());
    }

    pub fn on_active_changed<S, N, E>(
        &mut self,
        handle: Option<Handle>,
        builder: &AncestorTreeBuilder<'_, S, N, E>,
    ) where
        S: RecordStore,
        N: NameFormatter<S::Individual>,
        E: EventResolver<S::Individual>,
    {
        log::debug!("Active person changed to {:?}", handle);
        self.active = handle;
        self.update(builder);
    }

    pub fn on_db_changed<S, N, E>(&mut self, builder: &AncestorTreeBuilder<'_, S, N, E>)
    where
        S: RecordStore,
        N: NameFormatter<S::Individual>,
        E: EventResolver<S::Individual>,
    {
        log::debug!("Record store changed, rebuilding ancestors");
        self.update(builder);
    }

    pub fn on_depth_changed<S, N, E>(
        &mut self,
        max_depth: usize,
        builder: &mut AncestorTreeBuilder<'_, S, N, E>,
    ) where
        S: RecordStore,
        N: NameFormatter<S::Individual>,
        E: EventResolver<S::Individual>,
    {
        builder.set_max_depth(max_depth);
        self.update(builder);
    }

    /// Opens an editor for the person behind `row`.
    ///
    /// An editor that is already open for that person is not an error.
    pub fn activate<L: EditorLauncher>(&self, row: RowId, launcher: &mut L) -> Result<()> {
        let row = self.model.row(row).ok_or(AncestryError::UnknownRow(row))?;
        match launcher.edit_person(&row.handle) {
            Ok(()) => Ok(()),
            Err(EditorError::WindowActive(handle)) => {
                log::debug!("Editor for {} already open", handle);
                Ok(())
            }
            Err(EditorError::Failed(msg)) => Err(AncestryError::Editor(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::tests::{TestEvent, TestStore};

    #[derive(Default)]
    struct RecordingLauncher {
        opened: Vec<Handle>,
    }

    impl EditorLauncher for RecordingLauncher {
        fn edit_person(&mut self, handle: &Handle) -> std::result::Result<(), EditorError> {
            if self.opened.contains(handle) {
                return Err(EditorError::WindowActive(handle.clone()));
            }
            if handle.as_str() == "locked" {
                return Err(EditorError::Failed("record is locked".into()));
            }
            self.opened.push(handle.clone());
            Ok(())
        }
    }

    fn store() -> TestStore {
        let mut store = TestStore::default();
        store.person("a", "A");
        store.person("f", "F");
        store.person("m", "M").birth = Some(TestEvent {
            abbr: "b.",
            date: "1870",
            sort: Some(2_404_064),
        });
        store.person("gf", "GF");
        store.parents("a", Some("f"), Some("m"));
        store.parents("f", Some("gf"), None);
        store
    }

    #[test]
    fn active_change_rebuilds() {
        let store = store();
        let builder = store.builder(3);
        let mut view = AncestorView::new();

        view.on_active_changed(Some(Handle::new("a")), &builder);
        assert_eq!(view.model().len(), 4);
        assert!(view.has_data());
        assert_eq!(view.summary().depth_reached, 3);

        view.on_active_changed(Some(Handle::new("m")), &builder);
        assert_eq!(view.model().len(), 1);
        assert!(!view.has_data());

        view.on_active_changed(None, &builder);
        assert!(view.model().is_empty());
        assert!(!view.has_data());
    }

    #[test]
    fn depth_change_rebuilds_with_new_limit() {
        let store = store();
        let mut builder = store.builder(3);
        let mut view = AncestorView::new();
        view.on_active_changed(Some(Handle::new("a")), &builder);

        view.on_depth_changed(2, &mut builder);
        assert_eq!(builder.max_depth(), 2);
        assert_eq!(view.model().len(), 3);
        assert_eq!(view.model().max_depth(), 2);
    }

    #[test]
    fn db_change_picks_up_new_records() {
        let mut store = store();
        let mut view = AncestorView::new();
        view.on_active_changed(Some(Handle::new("m")), &store.builder(3));
        assert!(!view.has_data());

        store.person("mm", "MM");
        store.parents("m", None, Some("mm"));
        view.update_has_data(&store.builder(3));
        assert!(view.has_data());
        assert_eq!(view.model().len(), 1);

        view.on_db_changed(&store.builder(3));
        assert_eq!(view.model().len(), 2);
    }

    #[test]
    fn birth_sort_puts_undated_father_last() {
        let store = store();
        let mut view = AncestorView::new().with_birth_sort(UndatedPolicy::Last);
        view.on_active_changed(Some(Handle::new("a")), &store.builder(2));
        let model = view.model();
        let first_child = model.children(model.roots()[0])[0];
        assert_eq!(model.row(first_child).unwrap().label, "2. M");
    }

    #[test]
    fn activation_swallows_open_editor_conflicts() {
        let store = store();
        let mut view = AncestorView::new();
        view.on_active_changed(Some(Handle::new("a")), &store.builder(3));

        let mut launcher = RecordingLauncher::default();
        view.activate(0, &mut launcher).unwrap();
        view.activate(0, &mut launcher).unwrap();
        assert_eq!(launcher.opened, [Handle::new("a")]);

        assert!(matches!(
            view.activate(99, &mut launcher),
            Err(AncestryError::UnknownRow(99))
        ));
    }

    #[test]
    fn activation_reports_editor_failures() {
        let mut store = TestStore::default();
        store.person("locked", "L");
        let mut view = AncestorView::new();
        view.on_active_changed(Some(Handle::new("locked")), &store.builder(1));

        let mut launcher = RecordingLauncher::default();
        assert!(matches!(
            view.activate(0, &mut launcher),
            Err(AncestryError::Editor(_))
        ));
    }
}
