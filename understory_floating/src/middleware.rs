// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Middleware that adjusts a floating box after its initial placement.
//!
//! Middleware run in the order given in
//! [`PlacementOptions::middleware`](crate::PlacementOptions::middleware).
//! Each one sees the running coordinates and may either adjust them and continue, or ask the
//! pipeline to start over (with a new placement or a remeasured floating size).

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::placement::{Alignment, Overflow, Placement, Side};

/// One step of the placement pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Middleware {
    /// Move to a fallback placement when the preferred side overflows the boundary.
    Flip(FlipOptions),
    /// Push the floating box away from the reference.
    Offset(OffsetOptions),
    /// Constrain the floating box's size and report available space.
    Size(SizeOptions),
}

impl Middleware {
    /// Flip to the opposite side when the preferred side does not fit.
    pub fn flip() -> Self {
        Self::Flip(FlipOptions::default())
    }

    /// Leave a `gap` between reference and floating box along the main axis.
    pub fn offset(gap: f64) -> Self {
        Self::Offset(OffsetOptions {
            main_axis: gap,
            cross_axis: 0.0,
        })
    }

    /// Keep the floating box at least as wide as the reference.
    pub fn match_reference_width() -> Self {
        Self::Size(SizeOptions {
            match_reference_width: true,
        })
    }
}

/// Options for [`Middleware::Flip`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlipOptions {
    /// Placements to try, in order, after the initial one.
    ///
    /// Empty means "the opposite side with the same alignment".
    pub fallbacks: SmallVec<[Placement; 4]>,
}

/// Options for [`Middleware::Offset`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OffsetOptions {
    /// Distance away from the reference along the main axis.
    pub main_axis: f64,
    /// Shift along the cross axis, towards the alignment edge's interior.
    pub cross_axis: f64,
}

/// Options for [`Middleware::Size`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SizeOptions {
    /// Grow the floating box to at least the reference's width.
    pub match_reference_width: bool,
}

/// What a middleware asks the pipeline to do next.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Step {
    Continue,
    /// Restart from the first middleware. `Some` switches placement; `None` re-places with
    /// the current (possibly resized) floating box.
    Reset(Option<Placement>),
}

/// Flip bookkeeping carried across resets.
#[derive(Clone, Debug, Default)]
pub(crate) struct FlipData {
    /// Index into `[initial, fallbacks..]` of the placement being tried.
    pub(crate) index: usize,
    /// Main-side overflow measured for every tried placement.
    pub(crate) overflows: SmallVec<[(Placement, f64); 4]>,
    /// Set once a best-fit placement was chosen after every candidate overflowed.
    pub(crate) settled: bool,
}

/// Running pipeline state.
#[derive(Clone, Debug)]
pub(crate) struct State {
    pub(crate) reference: Rect,
    pub(crate) boundary: Rect,
    pub(crate) initial: Placement,
    pub(crate) placement: Placement,
    pub(crate) floating: Size,
    pub(crate) origin: Point,
    pub(crate) flip: FlipData,
    pub(crate) min_width: Option<f64>,
    pub(crate) available: Option<Size>,
}

impl State {
    pub(crate) fn new(reference: Rect, floating: Size, boundary: Rect, initial: Placement) -> Self {
        Self {
            reference,
            boundary,
            initial,
            placement: initial,
            floating,
            origin: initial.origin(reference, floating),
            flip: FlipData::default(),
            min_width: None,
            available: None,
        }
    }

    pub(crate) fn replace(&mut self, placement: Option<Placement>) {
        if let Some(p) = placement {
            self.placement = p;
        }
        self.origin = self.placement.origin(self.reference, self.floating);
    }
}

impl Middleware {
    pub(crate) fn apply(&self, state: &mut State) -> Step {
        match self {
            Self::Flip(opts) => flip(opts, state),
            Self::Offset(opts) => {
                offset(opts, state);
                Step::Continue
            }
            Self::Size(opts) => size(opts, state),
        }
    }
}

fn flip(opts: &FlipOptions, state: &mut State) -> Step {
    if state.flip.settled {
        return Step::Continue;
    }
    let side = state.placement.side;
    let overflow = Overflow::measure(state.origin, state.floating, state.boundary).on(side);
    if overflow <= 0.0 {
        return Step::Continue;
    }
    state.flip.overflows.push((state.placement, overflow));

    let next = state.flip.index + 1;
    let candidate = if opts.fallbacks.is_empty() {
        (next == 1).then(|| state.initial.opposite())
    } else {
        opts.fallbacks.get(next - 1).copied()
    };
    if let Some(p) = candidate {
        state.flip.index = next;
        return Step::Reset(Some(p));
    }

    // Nothing fits; settle on whichever candidate spilled the least.
    state.flip.settled = true;
    let best = state
        .flip
        .overflows
        .iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|&(p, _)| p)
        .unwrap_or(state.placement);
    if best == state.placement {
        Step::Continue
    } else {
        Step::Reset(Some(best))
    }
}

fn offset(opts: &OffsetOptions, state: &mut State) {
    let main = match state.placement.side {
        Side::Bottom | Side::Right => opts.main_axis,
        Side::Top | Side::Left => -opts.main_axis,
    };
    let cross = match state.placement.alignment {
        Some(Alignment::End) => -opts.cross_axis,
        Some(Alignment::Start) | None => opts.cross_axis,
    };
    if state.placement.side.is_vertical() {
        state.origin.x += cross;
        state.origin.y += main;
    } else {
        state.origin.x += main;
        state.origin.y += cross;
    }
}

fn size(opts: &SizeOptions, state: &mut State) -> Step {
    let b = state.boundary;
    let o = state.origin;
    let f = state.floating;
    let available = match state.placement.side {
        Side::Bottom => Size::new(b.width(), b.y1 - o.y),
        Side::Top => Size::new(b.width(), o.y + f.height - b.y0),
        Side::Right => Size::new(b.x1 - o.x, b.height()),
        Side::Left => Size::new(o.x + f.width - b.x0, b.height()),
    };
    state.available = Some(Size::new(available.width.max(0.0), available.height.max(0.0)));

    if opts.match_reference_width {
        let min_width = state.reference.width();
        state.min_width = Some(min_width);
        if state.floating.width < min_width {
            state.floating.width = min_width;
            return Step::Reset(None);
        }
    }
    Step::Continue
}
