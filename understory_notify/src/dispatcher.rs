// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a notification's propagation and honor stop outcomes.
//!
//! The dispatcher is deliberately minimal:
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - The return value from [`dispatch`] reports where propagation stopped (if at all).
//! - Anything richer, such as "handled" bookkeeping, lives in state captured by the handler.
//!
//! ## Semantics
//!
//! - Nodes are visited target first, then ancestors, as computed by
//!   [`propagation`](crate::propagation).
//! - [`Outcome::Stop`] aborts propagation immediately; ancestors further out are skipped.
//! - Returns the node at which propagation stopped, or `None` if every node was visited.

use alloc::vec::Vec;

use crate::notification::{EventPath, Notification, propagation};

/// Propagation control returned by a notification handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep visiting the remaining nodes.
    Continue,
    /// Stop propagation at the current node.
    Stop,
}

/// Walk `notification` over `path`, calling `handler` for every observing node.
///
/// ```
/// use understory_notify::{EventPath, Notification, Outcome, dispatch};
///
/// let path = EventPath::new([2_u32, 1, 0]);
/// let note = Notification::new("closed", "Dropdown closed!");
///
/// // The widget's parent (1) consumes the notification; the root never sees it.
/// let mut seen = Vec::new();
/// let stopped = dispatch(&path, &note, |node, _| {
///     seen.push(*node);
///     if *node == 1 { Outcome::Stop } else { Outcome::Continue }
/// });
/// assert_eq!(stopped, Some(1));
/// assert_eq!(seen, vec![2, 1]);
/// ```
pub fn dispatch<K: Clone, D>(
    path: &EventPath<K>,
    notification: &Notification<D>,
    mut handler: impl FnMut(&K, &Notification<D>) -> Outcome,
) -> Option<K> {
    for node in propagation(path, notification) {
        match handler(&node, notification) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(node),
        }
    }
    None
}

/// Sink that widget state machines fire notifications through.
///
/// Hosts typically implement this by resolving the widget's [`EventPath`] and calling
/// [`dispatch`] with their listener table.
pub trait Emitter<D> {
    /// Fire `notification` from the widget that owns this emitter.
    fn emit(&mut self, notification: Notification<D>);
}

impl<D, E: Emitter<D> + ?Sized> Emitter<D> for &mut E {
    fn emit(&mut self, notification: Notification<D>) {
        (**self).emit(notification);
    }
}

/// An [`Emitter`] that records every notification in firing order.
#[derive(Clone, Debug)]
pub struct Recorder<D> {
    fired: Vec<Notification<D>>,
}

impl<D> Default for Recorder<D> {
    fn default() -> Self {
        Self { fired: Vec::new() }
    }
}

impl<D> Recorder<D> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications fired so far.
    pub fn fired(&self) -> &[Notification<D>] {
        &self.fired
    }

    /// Number of fired notifications named `name`.
    pub fn count(&self, name: &str) -> usize {
        self.fired.iter().filter(|n| n.name == name).count()
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<&Notification<D>> {
        self.fired.last()
    }

    /// Take every recorded notification, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<Notification<D>> {
        core::mem::take(&mut self.fired)
    }
}

impl<D> Emitter<D> for Recorder<D> {
    fn emit(&mut self, notification: Notification<D>) {
        self.fired.push(notification);
    }
}
