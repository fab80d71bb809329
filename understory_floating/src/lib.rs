// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_floating --heading-base-level=0

//! Understory Floating: placement for floating panels (menus, popovers, tooltips).
//!
//! ## Overview
//!
//! Given the rectangle of a *reference* element (the control a panel hangs off) and the
//! size of the *floating* panel, [`compute_position`] returns where the panel goes. The
//! preferred [`Placement`] is adjusted by a small pipeline of [`Middleware`]:
//!
//! - [`Middleware::Flip`] moves the panel to a fallback side when the preferred side would
//!   spill out of the boundary (by default, the opposite side).
//! - [`Middleware::Offset`] leaves a gap between reference and panel.
//! - [`Middleware::Size`] keeps the panel at least as wide as its reference and reports the
//!   space left on the chosen side.
//!
//! Coordinates are plain [`kurbo`] geometry in whatever space the caller measures in
//! (typically viewport space, matching a `position: fixed` panel).
//!
//! ## Continuous repositioning
//!
//! A placement goes stale as soon as anything scrolls or resizes. [`LayoutObserver`] tracks
//! reference/floating pairs that must be recomputed while visible; the host reports
//! [`LayoutChange`]s and receives the affected [`Subscription`]s. Subscriptions must be
//! cancelled explicitly.
//!
//! ## Not a layout engine
//!
//! This crate measures nothing. Hosts supply rectangles from their own layout system and
//! apply the returned origin however their renderer positions things.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_floating::{Placement, PlacementOptions, compute_position};
//!
//! // A trigger near the bottom of the viewport: the menu flips above it.
//! let trigger = Rect::new(40.0, 560.0, 140.0, 590.0);
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let options = PlacementOptions::default();
//! let pos = compute_position(trigger, Size::new(160.0, 120.0), viewport, &options).unwrap();
//! assert_eq!(pos.placement, Placement::TOP_START);
//! assert!(pos.rect().y1 <= trigger.y0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compute;
mod middleware;
mod observer;
mod placement;

pub use compute::{MAX_RESETS, PlacementError, PlacementOptions, Positioned, compute_position};
pub use middleware::{FlipOptions, Middleware, OffsetOptions, SizeOptions};
pub use observer::{LayoutChange, LayoutObserver, ObserveFlags, Subscription};
pub use placement::{Alignment, Overflow, Placement, Side};
