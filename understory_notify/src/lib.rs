// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_notify --heading-base-level=0

//! Understory Notify: named widget notifications and their propagation.
//!
//! ## Overview
//!
//! Widgets announce state changes ("opened", "closed", "tab selected") by firing a named
//! [`Notification`] carrying a typed `detail` payload. Like a DOM `CustomEvent`, a notification
//! can bubble from the emitting widget towards the root and can be *composed*, meaning it
//! escapes the widget's own encapsulated scope (for example a shadow tree) and reaches the
//! host document.
//!
//! This crate does not own a tree. Callers hand it an [`EventPath`], a target-first list of
//! nodes, and it computes which of those nodes observe the notification
//! ([`propagation`]) and walks them with a handler ([`dispatch`]) that may stop propagation.
//!
//! ## Emitting
//!
//! Widget state machines do not dispatch themselves. They fire through an [`Emitter`], which the
//! host implements by building the path for the widget and calling [`dispatch`]. [`Recorder`] is
//! an [`Emitter`] that only records what was fired; it is handy in tests and demos.
//!
//! ```
//! use understory_notify::{EventPath, Notification, Outcome, dispatch};
//!
//! // Target first: option 3 lives in a panel (2) inside a widget (1) inside the document (0).
//! let path = EventPath::new([3_u32, 2, 1, 0]).with_scope_end(2);
//!
//! let note = Notification::new("opened", "Dropdown opened!");
//! let mut seen = Vec::new();
//! let stopped = dispatch(&path, &note, |node, n| {
//!     seen.push((*node, n.name));
//!     Outcome::Continue
//! });
//! assert!(stopped.is_none());
//! assert_eq!(seen.len(), 4);
//!
//! // A non-composed notification stays inside the widget's scope.
//! let scoped = note.clone().with_composed(false);
//! let mut nodes = Vec::new();
//! dispatch(&path, &scoped, |node, _| {
//!     nodes.push(*node);
//!     Outcome::Continue
//! });
//! assert_eq!(nodes, vec![3, 2, 1]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;
mod notification;

pub use dispatcher::{Emitter, Outcome, Recorder, dispatch};
pub use notification::{EventPath, Notification, propagation};
