// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside dismissal: deciding which open disclosures an interaction closes.
//!
//! An interaction is *outside* a disclosure when its composed event path contains neither
//! the trigger nor the panel. [`is_within`] is that membership test.
//!
//! [`DismissDispatcher`] is the shared form: one document-level capture listener for the
//! whole host, holding an entry per open disclosure. Each
//! [`OutsideListener`](crate::OutsideListener) call from a disclosure maps to
//! [`DismissDispatcher::listen`] / [`DismissDispatcher::unlisten`], and the host calls
//! [`DismissDispatcher::route`] once per interaction to learn which widgets to close.
//!
//! ```
//! use understory_disclosure::{DismissDispatcher, InteractionId};
//!
//! // Widget "a" owns trigger 10 and panel 11; it opened on interaction 1.
//! let mut dismiss = DismissDispatcher::new();
//! dismiss.listen("a", 10_u32, 11, InteractionId(1));
//!
//! // The opening click itself finishes propagating: ignored.
//! assert!(dismiss.route(&[10, 0], InteractionId(1)).is_empty());
//! // A later click inside the panel: ignored.
//! assert!(dismiss.route(&[12, 11, 0], InteractionId(2)).is_empty());
//! // A later click elsewhere: "a" closes.
//! assert_eq!(dismiss.route(&[0], InteractionId(3)).as_slice(), &["a"]);
//! ```

use smallvec::SmallVec;

use crate::types::InteractionId;

/// Whether an interaction with composed `path` originated within any of `nodes`.
pub fn is_within<K: PartialEq>(path: &[K], nodes: &[K]) -> bool {
    path.iter().any(|n| nodes.contains(n))
}

#[derive(Clone, Debug)]
struct Entry<W, K> {
    widget: W,
    trigger: K,
    panel: K,
    after: InteractionId,
}

/// One document-level dismissal listener shared by every open disclosure.
#[derive(Clone, Debug)]
pub struct DismissDispatcher<W, K> {
    entries: SmallVec<[Entry<W, K>; 4]>,
}

impl<W, K> Default for DismissDispatcher<W, K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<W: Copy + Eq, K: Copy + Eq> DismissDispatcher<W, K> {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dismissal tracking for `widget`, replacing any previous entry for it.
    pub fn listen(&mut self, widget: W, trigger: K, panel: K, after: InteractionId) {
        let entry = Entry {
            widget,
            trigger,
            panel,
            after,
        };
        match self.entries.iter_mut().find(|e| e.widget == widget) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Stop dismissal tracking for `widget`. Returns `false` if it was not tracked.
    pub fn unlisten(&mut self, widget: W) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.widget != widget);
        before != self.entries.len()
    }

    /// Widgets that `interaction`, with composed `path`, dismisses.
    ///
    /// Skips widgets whose trigger or panel is on the path and widgets that started
    /// listening at or after this interaction. Does not remove entries: the widgets
    /// unlisten themselves as they close.
    pub fn route(&self, path: &[K], interaction: InteractionId) -> SmallVec<[W; 2]> {
        self.entries
            .iter()
            .filter(|e| interaction > e.after && !is_within(path, &[e.trigger, e.panel]))
            .map(|e| e.widget)
            .collect()
    }

    /// Whether `widget` is currently tracked.
    pub fn is_listening(&self, widget: W) -> bool {
        self.entries.iter().any(|e| e.widget == widget)
    }

    /// Number of tracked widgets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no widget is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
