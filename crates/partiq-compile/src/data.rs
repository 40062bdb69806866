//! `PassData`: the data bag shared by every pass in a run.
//!
//! Passes communicate through [`PassData`] rather than through fields on
//! the passes themselves, which keeps passes stateless and reusable across
//! runs. It carries three things:
//!
//! - the injected [`DiagnosticSink`] that diagnostic passes write to
//! - typed entries keyed by Rust type (one value per type)
//! - free-form JSON values keyed by string, for data that crosses a
//!   serialization boundary (e.g. the CLI summary)
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use partiq_compile::{MemorySink, PassData};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct BlockStats {
//!     largest: usize,
//! }
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut data = PassData::with_sink(sink.clone());
//!
//! data.insert(BlockStats { largest: 7 });
//! assert_eq!(data.get::<BlockStats>().unwrap().largest, 7);
//!
//! data.sink().info("example", "hello".to_string());
//! assert_eq!(sink.messages(), vec!["hello"]);
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::sink::{DiagnosticSink, TracingSink};

/// Data shared between passes during one pipeline run.
pub struct PassData {
    /// Destination for diagnostic output.
    sink: Arc<dyn DiagnosticSink>,

    /// Typed entries (type-erased).
    entries: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,

    /// Free-form JSON values.
    values: Map<String, Value>,
}

impl PassData {
    /// Create an empty data bag that logs through [`TracingSink`].
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create an empty data bag writing diagnostics to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            entries: FxHashMap::default(),
            values: Map::new(),
        }
    }

    /// The diagnostic sink for this run.
    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    /// Replace the diagnostic sink.
    pub fn set_sink(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    /// Insert a typed entry, replacing any previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a typed entry.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable typed entry.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Get a mutable typed entry, inserting the default first if absent.
    pub fn get_or_default<T: Any + Send + Sync + Default>(&mut self) -> &mut T {
        let entry = self
            .entries
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()));
        // The box under TypeId::of::<T>() always holds a T.
        match entry.downcast_mut::<T>() {
            Some(value) => value,
            None => unreachable!("entry keyed by TypeId holds a different type"),
        }
    }

    /// Remove a typed entry.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.entries
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }

    /// Check whether a typed entry is present.
    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Set a free-form value.
    pub fn set_value(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Get a free-form value.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// All free-form values.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl Default for PassData {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PassData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassData")
            .field("entries", &self.entries.len())
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}
