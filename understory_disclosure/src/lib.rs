// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_disclosure --heading-base-level=0

//! Understory Disclosure: a headless controller for dropdowns, menu buttons, and popovers.
//!
//! ## Overview
//!
//! A disclosure widget is a trigger plus a floating panel whose visibility the trigger
//! toggles. [`Disclosure`] owns the parts of that which are easy to get subtly wrong:
//!
//! - **Open/closed state** with a `disabled` guard on activation.
//! - **Placement lifecycle**: one placement request on open, a continuous layout
//!   subscription while open, released on close and on teardown.
//! - **Outside dismissal**: closing when the user interacts anywhere except the trigger or
//!   panel, without the opening click immediately closing it again.
//! - **Roving focus**: arrow keys walk a live list of options, clamped at both ends;
//!   `Escape` closes.
//!
//! It renders nothing and owns no document. Every effect goes through a host trait:
//! [`PlacementAdapter`], [`OptionSource`], [`OutsideListener`], and
//! [`understory_notify::Emitter`] for the `opened`/`closed` notifications. Anything
//! implementing all four is a [`DisclosureHost`].
//!
//! ## Lifecycle
//!
//! 1) Create with [`Disclosure::new`] when the widget is attached to the document.
//! 2) After the first render, resolve element references with [`Disclosure::attach`].
//! 3) Route input: trigger activation to [`Disclosure::activate`], key presses to
//!    [`Disclosure::on_key`], document-level pointer interactions (while the outside
//!    listener is installed) to [`Disclosure::on_document_interaction`], and layout
//!    subscription callbacks to [`Disclosure::on_layout_change`].
//! 4) Hand placement results back with [`Disclosure::apply_position`].
//! 5) Call [`Disclosure::detach`] when the widget leaves the document.
//!
//! ## Minimal example
//!
//! ```
//! use understory_disclosure::{
//!     Disclosure, InteractionId, KeyOutcome, NavKey, OptionSource, OutsideListener,
//!     PlacementAdapter, PlacementTicket,
//! };
//! use understory_floating::PlacementOptions;
//! use understory_notify::{Emitter, Notification};
//!
//! #[derive(Default)]
//! struct Host {
//!     subscriptions: u32,
//!     focused: Option<u32>,
//!     fired: Vec<&'static str>,
//! }
//!
//! impl PlacementAdapter<u32> for Host {
//!     type Subscription = ();
//!     fn request_position(&mut self, _: u32, _: u32, _: &PlacementOptions, _: PlacementTicket) {}
//!     fn observe_layout(&mut self, _: u32, _: u32) { self.subscriptions += 1; }
//!     fn cancel_layout(&mut self, _: ()) { self.subscriptions -= 1; }
//! }
//! impl OptionSource<u32> for Host {
//!     fn options(&self, _panel: u32) -> Vec<u32> { vec![10, 11, 12] }
//!     fn focus(&mut self, option: u32) { self.focused = Some(option); }
//! }
//! impl OutsideListener<u32> for Host {
//!     fn listen(&mut self, _: u32, _: u32, _: InteractionId) {}
//!     fn unlisten(&mut self) {}
//! }
//! impl Emitter<&'static str> for Host {
//!     fn emit(&mut self, n: Notification<&'static str>) { self.fired.push(n.name); }
//! }
//!
//! let mut host = Host::default();
//! let mut menu: Disclosure<u32, ()> = Disclosure::default();
//! menu.attach(1, 2);
//!
//! menu.activate(&mut host, InteractionId(1));
//! assert!(menu.is_open());
//! assert_eq!(host.subscriptions, 1);
//!
//! assert_eq!(menu.on_key(&mut host, NavKey::ArrowDown), KeyOutcome::Moved { index: 0 });
//! assert_eq!(host.focused, Some(10));
//!
//! // A click somewhere else in the document closes the menu.
//! menu.on_document_interaction(&mut host, &[0], InteractionId(2));
//! assert!(!menu.is_open());
//! assert_eq!(host.subscriptions, 0);
//! assert_eq!(host.fired, ["opened", "closed"]);
//! ```
//!
//! ## Many widgets, one listener
//!
//! Hosts with many disclosures can back every [`OutsideListener`] with a single
//! [`DismissDispatcher`] and route each document interaction through it once.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `understory_floating`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod dismiss;
mod host;
mod options;
mod types;

pub use controller::Disclosure;
pub use dismiss::{DismissDispatcher, is_within};
pub use host::{DisclosureHost, OptionSource, OutsideListener, PlacementAdapter, PlacementTicket};
pub use options::{focus_target, step_index};
pub use types::{
    DisclosureConfig, InteractionId, KeyOutcome, NavKey, NavStep, NotificationSpec, RenderState,
};
