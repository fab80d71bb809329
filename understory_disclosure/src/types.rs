// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary, configuration, and the state the renderer reads.

use kurbo::Point;
use understory_floating::{PlacementOptions, Positioned};

/// Monotonic identifier of a user interaction (a click, tap, or key press) as the host
/// dispatches it.
///
/// Hosts number interactions in dispatch order. The disclosure uses the id of the
/// interaction that opened it to make sure outside dismissal only reacts to interactions
/// that start strictly later.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InteractionId(pub u64);

impl InteractionId {
    /// The id following this one. Saturates at `u64::MAX` so ids never run backwards.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Keys the disclosure understands. Everything else is [`NavKey::Other`] and passes through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowRight`.
    ArrowRight,
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `Escape`.
    Escape,
    /// Any other key.
    Other,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    ///
    /// ```
    /// use understory_disclosure::NavKey;
    ///
    /// assert_eq!(NavKey::from_key("ArrowDown"), NavKey::ArrowDown);
    /// assert_eq!(NavKey::from_key("Esc"), NavKey::Escape);
    /// assert_eq!(NavKey::from_key("Tab"), NavKey::Other);
    /// ```
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowDown" => Self::ArrowDown,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowLeft" => Self::ArrowLeft,
            // "Esc" is what older engines report.
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }

    /// Roving-focus direction of this key, if it is a navigation key.
    pub const fn step(self) -> Option<NavStep> {
        match self {
            Self::ArrowDown | Self::ArrowRight => Some(NavStep::Next),
            Self::ArrowUp | Self::ArrowLeft => Some(NavStep::Prev),
            Self::Escape | Self::Other => None,
        }
    }
}

/// Direction of a roving-focus step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavStep {
    /// Towards the end of the option list.
    Next,
    /// Towards the start of the option list.
    Prev,
}

/// What a key press did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyOutcome {
    /// Not a key the disclosure handles (or the disclosure is closed); let the default run.
    Ignored,
    /// `Escape` closed the disclosure.
    Dismissed,
    /// Focus moved to the option at `index`.
    Moved {
        /// Index into the live option list.
        index: usize,
    },
    /// A navigation key arrived but there are no options to focus.
    NoTarget,
}

impl KeyOutcome {
    /// Whether the host should suppress the key's default behavior.
    ///
    /// Navigation keys are always consumed while open. `Escape` is not, so enclosing
    /// dialogs and assistive technology still see it.
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Moved { .. } | Self::NoTarget)
    }
}

/// Name and detail of one notification the disclosure fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NotificationSpec {
    /// Listener-facing name.
    pub name: &'static str,
    /// Informational detail payload.
    pub detail: &'static str,
}

/// Configuration for a [`Disclosure`](crate::Disclosure).
#[derive(Clone, Debug, PartialEq)]
pub struct DisclosureConfig {
    /// Placement preference and middleware handed to the placement adapter.
    pub placement: PlacementOptions,
    /// Fired after opening.
    pub opened: NotificationSpec,
    /// Fired after closing.
    pub closed: NotificationSpec,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            placement: PlacementOptions::default(),
            opened: NotificationSpec {
                name: "opened",
                detail: "Dropdown opened!",
            },
            closed: NotificationSpec {
                name: "closed",
                detail: "Dropdown closed!",
            },
        }
    }
}

/// Everything a renderer needs to draw the trigger and panel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderState {
    /// Panel visible; trigger shown as active.
    pub open: bool,
    /// Trigger disabled.
    pub disabled: bool,
    /// Last applied placement, if any. Kept while closed so a reopening panel starts in
    /// its previous spot.
    pub positioning: Option<Positioned>,
    /// ARIA role of the panel.
    pub role: &'static str,
    /// Value for the panel's `aria-expanded`.
    pub aria_expanded: bool,
}

impl RenderState {
    /// Panel origin to write into the panel's position (for example `--left`/`--top`).
    pub fn panel_origin(&self) -> Option<Point> {
        self.positioning.map(|p| p.origin)
    }

    /// Minimum panel width imposed by placement.
    pub fn panel_min_width(&self) -> Option<f64> {
        self.positioning.and_then(|p| p.min_width)
    }
}
