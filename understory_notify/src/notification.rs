// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notification payloads and the path they travel.

use smallvec::SmallVec;

/// A named notification fired by a widget.
///
/// `name` identifies the notification for listeners (for example `"opened"`);
/// `detail` is the payload. New notifications bubble and are composed, which is what
/// widgets want by default: parents and the host application can both observe them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification<D> {
    /// Listener-facing name.
    pub name: &'static str,
    /// Payload delivered to every listener.
    pub detail: D,
    /// Whether ancestors of the target observe the notification.
    pub bubbles: bool,
    /// Whether the notification crosses the emitting widget's scope boundary.
    pub composed: bool,
}

impl<D> Notification<D> {
    /// Create a bubbling, composed notification.
    pub fn new(name: &'static str, detail: D) -> Self {
        Self {
            name,
            detail,
            bubbles: true,
            composed: true,
        }
    }

    /// Set whether the notification bubbles.
    #[must_use]
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Set whether the notification is composed.
    #[must_use]
    pub fn with_composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }

    /// Map the detail payload, keeping name and flags.
    pub fn map_detail<E>(self, f: impl FnOnce(D) -> E) -> Notification<E> {
        Notification {
            name: self.name,
            detail: f(self.detail),
            bubbles: self.bubbles,
            composed: self.composed,
        }
    }
}

/// Target-first path of nodes a notification can reach.
///
/// `nodes[0]` is the emitting node; later entries are its ancestors up to the root.
/// `scope_end`, when set, is the index of the last node that still belongs to the
/// emitter's encapsulated scope (typically the widget host element). Nodes after it are
/// only reached by composed notifications.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventPath<K> {
    /// Nodes from target to root.
    pub nodes: SmallVec<[K; 8]>,
    /// Index of the last node inside the emitter's scope, if the path crosses one.
    pub scope_end: Option<usize>,
}

impl<K> EventPath<K> {
    /// Build a path from target-first nodes with no scope boundary.
    pub fn new(nodes: impl IntoIterator<Item = K>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            scope_end: None,
        }
    }

    /// Mark the last node that belongs to the emitter's scope.
    #[must_use]
    pub fn with_scope_end(mut self, index: usize) -> Self {
        self.scope_end = Some(index);
        self
    }

    /// The emitting node, if the path is non-empty.
    pub fn target(&self) -> Option<&K> {
        self.nodes.first()
    }

    /// Whether `node` appears anywhere on the path.
    pub fn contains(&self, node: &K) -> bool
    where
        K: PartialEq,
    {
        self.nodes.contains(node)
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Nodes that observe `notification` when fired at the head of `path`, in visiting order.
///
/// - Non-bubbling notifications reach only the target.
/// - Non-composed notifications stop at `scope_end` (inclusive).
/// - An out-of-range `scope_end` is treated as the end of the path.
pub fn propagation<K: Clone, D>(
    path: &EventPath<K>,
    notification: &Notification<D>,
) -> SmallVec<[K; 8]> {
    if path.nodes.is_empty() {
        return SmallVec::new();
    }
    let last = if !notification.bubbles {
        0
    } else if notification.composed {
        path.nodes.len() - 1
    } else {
        path.scope_end
            .map_or(path.nodes.len() - 1, |end| end.min(path.nodes.len() - 1))
    };
    path.nodes[..=last].iter().cloned().collect()
}
