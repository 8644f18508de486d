// src/lib.rs

//! Bounded ancestor trees over a genealogical record store.

pub mod ancestry;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod name;
pub mod render;
pub mod sink;
pub mod store;
pub mod view;

pub use ancestry::{sort_key, AncestorTree, AncestorTreeBuilder, BuildSummary};
pub use error::{AncestryError, Result};
pub use model::Handle;
pub use sink::{AncestorRow, RowSink, TreeModel, UndatedPolicy};
pub use store::{Database, RecordStore};
