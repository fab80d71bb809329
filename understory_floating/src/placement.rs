// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement vocabulary: which side of the reference a floating box sits on, and how it aligns.

use kurbo::{Point, Rect, Size};

/// Side of the reference element the floating box is placed against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the reference.
    Top,
    /// Right of the reference.
    Right,
    /// Below the reference.
    Bottom,
    /// Left of the reference.
    Left,
}

impl Side {
    /// The side across the reference from this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the main axis of this side is vertical (`Top`/`Bottom`).
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment along the cross axis.
///
/// `Start` lines up the leading edges (left for vertical sides, top for horizontal ones),
/// `End` the trailing edges. No alignment means centered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Leading edges aligned.
    Start,
    /// Trailing edges aligned.
    End,
}

/// A side plus an optional cross-axis alignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Side of the reference.
    pub side: Side,
    /// Cross-axis alignment; `None` centers the floating box.
    pub alignment: Option<Alignment>,
}

impl Placement {
    /// Above, centered.
    pub const TOP: Self = Self::new(Side::Top, None);
    /// Above, start-aligned.
    pub const TOP_START: Self = Self::new(Side::Top, Some(Alignment::Start));
    /// Above, end-aligned.
    pub const TOP_END: Self = Self::new(Side::Top, Some(Alignment::End));
    /// Right, centered.
    pub const RIGHT: Self = Self::new(Side::Right, None);
    /// Right, start-aligned.
    pub const RIGHT_START: Self = Self::new(Side::Right, Some(Alignment::Start));
    /// Right, end-aligned.
    pub const RIGHT_END: Self = Self::new(Side::Right, Some(Alignment::End));
    /// Below, centered.
    pub const BOTTOM: Self = Self::new(Side::Bottom, None);
    /// Below, start-aligned.
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Some(Alignment::Start));
    /// Below, end-aligned.
    pub const BOTTOM_END: Self = Self::new(Side::Bottom, Some(Alignment::End));
    /// Left, centered.
    pub const LEFT: Self = Self::new(Side::Left, None);
    /// Left, start-aligned.
    pub const LEFT_START: Self = Self::new(Side::Left, Some(Alignment::Start));
    /// Left, end-aligned.
    pub const LEFT_END: Self = Self::new(Side::Left, Some(Alignment::End));

    /// Create a placement.
    pub const fn new(side: Side, alignment: Option<Alignment>) -> Self {
        Self { side, alignment }
    }

    /// Same alignment on the opposite side.
    pub const fn opposite(self) -> Self {
        Self::new(self.side.opposite(), self.alignment)
    }

    /// Origin of a floating box of size `floating` placed against `reference`, before any
    /// middleware runs.
    pub fn origin(self, reference: Rect, floating: Size) -> Point {
        let cross_x = match self.alignment {
            Some(Alignment::Start) => reference.x0,
            Some(Alignment::End) => reference.x1 - floating.width,
            None => reference.x0 + (reference.width() - floating.width) / 2.0,
        };
        let cross_y = match self.alignment {
            Some(Alignment::Start) => reference.y0,
            Some(Alignment::End) => reference.y1 - floating.height,
            None => reference.y0 + (reference.height() - floating.height) / 2.0,
        };
        match self.side {
            Side::Bottom => Point::new(cross_x, reference.y1),
            Side::Top => Point::new(cross_x, reference.y0 - floating.height),
            Side::Right => Point::new(reference.x1, cross_y),
            Side::Left => Point::new(reference.x0 - floating.width, cross_y),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::BOTTOM_START
    }
}

/// How far a box at `origin` with `size` spills past each edge of `boundary`.
///
/// Positive values are overflow, negative values are remaining room.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overflow {
    /// Past the top edge.
    pub top: f64,
    /// Past the right edge.
    pub right: f64,
    /// Past the bottom edge.
    pub bottom: f64,
    /// Past the left edge.
    pub left: f64,
}

impl Overflow {
    /// Measure overflow of `size` at `origin` against `boundary`.
    pub fn measure(origin: Point, size: Size, boundary: Rect) -> Self {
        Self {
            top: boundary.y0 - origin.y,
            right: origin.x + size.width - boundary.x1,
            bottom: origin.y + size.height - boundary.y1,
            left: boundary.x0 - origin.x,
        }
    }

    /// Overflow on `side`.
    pub fn on(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }
}
