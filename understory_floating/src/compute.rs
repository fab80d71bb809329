// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement pipeline entry point.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::middleware::{Middleware, State, Step};
use crate::placement::Placement;

/// Upper bound on pipeline restarts for a single computation.
///
/// Flip and size both restart the pipeline; the cap keeps a pathological middleware list
/// from spinning forever. When reached, the current coordinates are returned as-is.
pub const MAX_RESETS: usize = 50;

/// Configuration for [`compute_position`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Preferred placement.
    pub placement: Placement,
    /// Middleware, run in order.
    pub middleware: Vec<Middleware>,
}

impl Default for PlacementOptions {
    /// Below and start-aligned, flipping when there is no room, 8 units away from the
    /// reference, and never narrower than it.
    fn default() -> Self {
        Self {
            placement: Placement::BOTTOM_START,
            middleware: vec![
                Middleware::flip(),
                Middleware::offset(8.0),
                Middleware::match_reference_width(),
            ],
        }
    }
}

/// Result of a placement computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Positioned {
    /// Top-left corner of the floating box, in the coordinate space of the inputs.
    pub origin: Point,
    /// Placement actually used after flipping.
    pub placement: Placement,
    /// Floating box size after size constraints.
    pub size: Size,
    /// Minimum width imposed by [`Middleware::Size`], if any.
    pub min_width: Option<f64>,
    /// Room left inside the boundary on the chosen side, if [`Middleware::Size`] ran.
    pub available: Option<Size>,
}

impl Positioned {
    /// The floating box's final rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Why a placement could not be computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// An input rectangle or size held a NaN or infinite value.
    #[error("placement geometry is not finite")]
    NonFiniteGeometry,
    /// The host could not measure the reference or floating element (for example because it
    /// is not currently laid out).
    #[error("reference or floating element has not been measured")]
    Unmeasured,
}

/// Compute where a floating box of size `floating` goes relative to `reference`, kept
/// inside `boundary` where the middleware allow.
///
/// All inputs share one coordinate space (typically the viewport) and the result is
/// expressed in it too.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_floating::{Placement, PlacementOptions, compute_position};
///
/// let trigger = Rect::new(10.0, 10.0, 110.0, 40.0);
/// let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
///
/// let options = PlacementOptions::default();
/// let pos = compute_position(trigger, Size::new(60.0, 100.0), viewport, &options).unwrap();
/// // Below the trigger with an 8 unit gap, widened to the trigger's width.
/// assert_eq!(pos.placement, Placement::BOTTOM_START);
/// assert_eq!(pos.origin, Point::new(10.0, 48.0));
/// assert_eq!(pos.size.width, 100.0);
/// ```
pub fn compute_position(
    reference: Rect,
    floating: Size,
    boundary: Rect,
    options: &PlacementOptions,
) -> Result<Positioned, PlacementError> {
    if !rect_is_finite(reference) || !rect_is_finite(boundary) || !floating.is_finite() {
        return Err(PlacementError::NonFiniteGeometry);
    }

    let mut state = State::new(reference, floating, boundary, options.placement);
    let mut resets = 0;
    let mut i = 0;
    while let Some(mw) = options.middleware.get(i) {
        match mw.apply(&mut state) {
            Step::Reset(placement) if resets < MAX_RESETS => {
                resets += 1;
                state.replace(placement);
                i = 0;
            }
            Step::Reset(_) => {
                tracing::trace!(resets, "placement reset limit reached");
                i += 1;
            }
            Step::Continue => i += 1,
        }
    }

    Ok(Positioned {
        origin: state.origin,
        placement: state.placement,
        size: state.floating,
        min_width: state.min_width,
        available: state.available,
    })
}

fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}
