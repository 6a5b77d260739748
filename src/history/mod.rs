//! Bounded, linear undo/redo history over full graph snapshots.
//!
//! The engine keeps an ordered list of deep-copied snapshots and a cursor
//! into it. New edits taken while the cursor sits behind the tail abandon the
//! redo branch, standard linear-undo semantics. The engine assumes one
//! logical editing session calling it strictly sequentially; it is not
//! thread-safe and callers with concurrent editors must serialize access.

use crate::graph::{PipelineEdge, PipelineGraph, PipelineNode, Viewport};
use serde::{Deserialize, Serialize};

/// How many snapshots the engine retains before evicting the oldest.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// An immutable deep copy of the editable state at a point in time. Shares
/// its serialized shape with the persisted workflow file, minus the ontology
/// payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<PipelineNode>,
    pub edges: Vec<PipelineEdge>,
    #[serde(default)]
    pub viewport: Viewport,
}

impl Snapshot {
    /// Captures the given graph and viewport.
    pub fn capture(graph: &PipelineGraph, viewport: Viewport) -> Self {
        Snapshot {
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
            viewport,
        }
    }

    /// Rebuilds a graph from this snapshot; the caller restores the viewport.
    pub fn to_graph(&self) -> PipelineGraph {
        PipelineGraph {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

/// The undo/redo engine: a bounded list of snapshots plus a cursor.
#[derive(Debug)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: Option<usize>,
    max_entries: usize,
}

impl History {
    /// Creates an engine with the default bound, optionally seeded with the
    /// session's opening state.
    pub fn new(initial: Option<Snapshot>) -> Self {
        Self::with_capacity(initial, DEFAULT_MAX_HISTORY)
    }

    /// Creates an engine bounded to `max_entries` snapshots (at least one).
    pub fn with_capacity(initial: Option<Snapshot>, max_entries: usize) -> Self {
        let mut history = History {
            entries: Vec::new(),
            cursor: None,
            max_entries: max_entries.max(1),
        };
        if let Some(snapshot) = initial {
            history.entries.push(snapshot);
            history.cursor = Some(0);
        }
        history
    }

    /// Records a new state after a mutation. Discards any redo branch, deep
    /// copies the state, and evicts the oldest snapshot once the bound is
    /// exceeded, preserving the cursor's relative position.
    pub fn push(&mut self, state: &Snapshot) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(state.clone());
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Steps the cursor back and returns a deep copy of the snapshot there.
    /// `None` means there is nothing to undo; the engine is unchanged.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1).cloned()
    }

    /// Steps the cursor forward and returns a deep copy of the snapshot
    /// there. `None` means there is nothing to redo.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.entries.get(cursor + 1).cloned()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    /// Deep copy of the snapshot at the cursor, if any state was recorded.
    pub fn current(&self) -> Option<Snapshot> {
        self.cursor.and_then(|cursor| self.entries.get(cursor).cloned())
    }

    /// Empties the log and resets the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
