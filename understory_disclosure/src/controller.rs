// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The disclosure state machine.

use understory_floating::{PlacementError, Positioned};
use understory_notify::Notification;

use crate::dismiss::is_within;
use crate::host::{DisclosureHost, PlacementTicket};
use crate::options::focus_target;
use crate::types::{
    DisclosureConfig, InteractionId, KeyOutcome, NavKey, NotificationSpec, RenderState,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Refs<K> {
    trigger: K,
    panel: K,
}

/// Controller for one disclosure widget (dropdown, menu button, popover).
///
/// `K` identifies elements (trigger, panel, options, event path nodes); `S` is the host's
/// layout-subscription handle.
///
/// ## Invariants
///
/// - A layout subscription is held exactly while the disclosure is open.
/// - The outside-dismissal listener is installed exactly while the disclosure is open.
/// - The focused option index, when set, was in range for the option list it was computed
///   against.
///
/// All of the above are restored by [`close`](Self::close) and by [`detach`](Self::detach),
/// both of which are safe to call repeatedly.
#[derive(Debug)]
pub struct Disclosure<K, S> {
    config: DisclosureConfig,
    refs: Option<Refs<K>>,
    open: bool,
    disabled: bool,
    focused: Option<usize>,
    subscription: Option<S>,
    listening_after: Option<InteractionId>,
    positioning: Option<Positioned>,
    last_ticket: u64,
    // Tickets at or below this belong to an earlier open/close cycle.
    cycle_floor: u64,
    applied: Option<PlacementTicket>,
}

impl<K, S> Default for Disclosure<K, S> {
    fn default() -> Self {
        Self::new(DisclosureConfig::default())
    }
}

impl<K, S> Disclosure<K, S> {
    /// Create a closed, enabled, unattached disclosure.
    pub fn new(config: DisclosureConfig) -> Self {
        Self {
            config,
            refs: None,
            open: false,
            disabled: false,
            focused: None,
            subscription: None,
            listening_after: None,
            positioning: None,
            last_ticket: 0,
            cycle_floor: 0,
            applied: None,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether activation is suppressed.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether trigger and panel references are resolved.
    pub fn is_attached(&self) -> bool {
        self.refs.is_some()
    }

    /// Index of the focused option in the live option list, or `None` if no option is focused.
    ///
    /// Only guaranteed in range right after a navigation step. Closing without `Escape` keeps
    /// the index, so options removed since then can leave it past the end until the next
    /// arrow key clamps it.
    pub fn focused_option_index(&self) -> Option<usize> {
        self.focused
    }

    /// Whether a continuous repositioning subscription is held.
    pub fn is_repositioning(&self) -> bool {
        self.subscription.is_some()
    }

    /// Whether the outside-dismissal listener is installed.
    pub fn is_listening_outside(&self) -> bool {
        self.listening_after.is_some()
    }

    /// Last applied placement.
    pub fn positioning(&self) -> Option<&Positioned> {
        self.positioning.as_ref()
    }

    /// State read by the renderer.
    pub fn render_state(&self) -> RenderState {
        RenderState {
            open: self.open,
            disabled: self.disabled,
            positioning: self.positioning,
            role: "menu",
            aria_expanded: self.open,
        }
    }

    /// Set the disabled flag.
    ///
    /// Disabling does not close an open panel; the next activation still closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Accept a placement result for `ticket`.
    ///
    /// Returns `true` if it became the current positioning. Results are dropped when the
    /// disclosure is closed, when the ticket is older than one already applied or predates
    /// the current opening, and when the computation failed; in every case the previous
    /// positioning stays in place.
    pub fn apply_position(
        &mut self,
        ticket: PlacementTicket,
        result: Result<Positioned, PlacementError>,
    ) -> bool {
        if !self.open || ticket.0 <= self.cycle_floor || ticket.0 > self.last_ticket {
            tracing::trace!(ticket = ticket.0, open = self.open, "dropping placement result");
            return false;
        }
        if self.applied.is_some_and(|applied| ticket <= applied) {
            tracing::trace!(ticket = ticket.0, "dropping stale placement result");
            return false;
        }
        match result {
            Ok(positioned) => {
                self.positioning = Some(positioned);
                self.applied = Some(ticket);
                true
            }
            Err(err) => {
                tracing::warn!(
                    ticket = ticket.0,
                    error = %err,
                    "placement failed; keeping last position"
                );
                false
            }
        }
    }

    fn notification(note: NotificationSpec) -> Notification<&'static str> {
        Notification::new(note.name, note.detail)
    }
}

impl<K: Copy + Eq, S> Disclosure<K, S> {
    /// Trigger element, once attached.
    pub fn trigger(&self) -> Option<K> {
        self.refs.map(|r| r.trigger)
    }

    /// Panel element, once attached.
    pub fn panel(&self) -> Option<K> {
        self.refs.map(|r| r.panel)
    }

    /// Resolve the trigger and panel after the widget first renders.
    ///
    /// Ignored while open, since the active subscription and listener watch the current
    /// elements. Returns whether the references were stored.
    pub fn attach(&mut self, trigger: K, panel: K) -> bool {
        if self.open {
            tracing::trace!("attach ignored while open");
            return false;
        }
        self.refs = Some(Refs { trigger, panel });
        true
    }

    /// Tear down on removal from the document.
    ///
    /// Releases the layout subscription and the outside listener whether or not the panel
    /// was open, clears focus and references, and fires nothing.
    pub fn detach<H>(&mut self, host: &mut H)
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        self.release(host);
        if self.open {
            tracing::debug!("disclosure detached while open");
        }
        self.open = false;
        self.focused = None;
        self.refs = None;
    }

    /// Handle an activation (click, tap, Enter) on the trigger.
    ///
    /// Opens when closed and enabled, closes when open. Returns whether the state changed.
    pub fn activate<H>(&mut self, host: &mut H, interaction: InteractionId) -> bool
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        if self.open {
            self.close(host)
        } else {
            self.open(host, interaction)
        }
    }

    /// Open the panel.
    ///
    /// `interaction` is the interaction being handled (or the latest one dispatched, for
    /// programmatic opens); outside dismissal only reacts to later ones.
    ///
    /// A no-op returning `false` when already open, disabled, or not attached. Otherwise
    /// requests a placement, starts continuous repositioning, installs the outside
    /// listener, and fires the opened notification.
    pub fn open<H>(&mut self, host: &mut H, interaction: InteractionId) -> bool
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        if self.open {
            return false;
        }
        if self.disabled {
            tracing::trace!("open ignored while disabled");
            return false;
        }
        let Some(Refs { trigger, panel }) = self.refs else {
            tracing::trace!("open ignored before attach");
            return false;
        };

        self.open = true;
        self.cycle_floor = self.last_ticket;
        self.applied = None;
        self.request_position(host);

        debug_assert!(
            self.subscription.is_none(),
            "closed disclosure still holds a layout subscription"
        );
        self.subscription = Some(host.observe_layout(trigger, panel));

        host.listen(trigger, panel, interaction);
        self.listening_after = Some(interaction);

        tracing::debug!(interaction = interaction.0, "disclosure opened");
        host.emit(Self::notification(self.config.opened));
        true
    }

    /// Close the panel.
    ///
    /// A no-op returning `false` when already closed. Otherwise cancels repositioning,
    /// removes the outside listener, and fires the closed notification.
    pub fn close<H>(&mut self, host: &mut H) -> bool
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        if !self.open {
            return false;
        }
        self.open = false;
        self.release(host);
        tracing::debug!("disclosure closed");
        host.emit(Self::notification(self.config.closed));
        true
    }

    /// Handle a key press inside the widget.
    ///
    /// While open, arrow keys move focus through the live option list (clamped at both
    /// ends) and `Escape` closes and clears focus. Everything else, and every key while
    /// closed, is [`KeyOutcome::Ignored`].
    pub fn on_key<H>(&mut self, host: &mut H, key: NavKey) -> KeyOutcome
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        if !self.open {
            return KeyOutcome::Ignored;
        }
        if key == NavKey::Escape {
            self.focused = None;
            self.close(host);
            return KeyOutcome::Dismissed;
        }
        let (Some(step), Some(Refs { panel, .. })) = (key.step(), self.refs) else {
            return KeyOutcome::Ignored;
        };

        let options = host.options(panel);
        match focus_target(&options, self.focused, step) {
            Some((index, option)) => {
                self.focused = Some(index);
                host.focus(option);
                tracing::trace!(index, count = options.len(), "option focused");
                KeyOutcome::Moved { index }
            }
            None => {
                self.focused = None;
                KeyOutcome::NoTarget
            }
        }
    }

    /// Handle an interaction observed by the document-level listener.
    ///
    /// `path` is the interaction's composed event path. Closes the disclosure when the
    /// listener is installed, the interaction is newer than the one that opened it, and
    /// neither trigger nor panel is on the path. Returns whether it closed.
    pub fn on_document_interaction<H>(
        &mut self,
        host: &mut H,
        path: &[K],
        interaction: InteractionId,
    ) -> bool
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        let (Some(after), Some(Refs { trigger, panel })) = (self.listening_after, self.refs) else {
            return false;
        };
        if interaction <= after {
            tracing::trace!(interaction = interaction.0, "ignoring the opening interaction");
            return false;
        }
        if is_within(path, &[trigger, panel]) {
            return false;
        }
        self.close(host)
    }

    /// Handle a layout change reported through the layout subscription.
    ///
    /// Requests a fresh placement while open. Returns whether one was requested.
    pub fn on_layout_change<H>(&mut self, host: &mut H) -> bool
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        if !self.open {
            return false;
        }
        self.request_position(host)
    }

    fn request_position<H>(&mut self, host: &mut H) -> bool
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        let Some(Refs { trigger, panel }) = self.refs else {
            return false;
        };
        self.last_ticket += 1;
        let ticket = PlacementTicket(self.last_ticket);
        host.request_position(trigger, panel, &self.config.placement, ticket);
        true
    }

    fn release<H>(&mut self, host: &mut H)
    where
        H: DisclosureHost<K, Subscription = S> + ?Sized,
    {
        if let Some(subscription) = self.subscription.take() {
            host.cancel_layout(subscription);
        }
        if self.listening_after.take().is_some() {
            host.unlisten();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{OptionSource, OutsideListener, PlacementAdapter};
    use crate::types::NavStep;
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::{Point, Size};
    use understory_floating::{Placement, PlacementOptions};
    use understory_notify::{Emitter, Recorder};

    const ROOT: u32 = 0;
    const TRIGGER: u32 = 1;
    const PANEL: u32 = 2;

    #[derive(Default)]
    struct FakeHost {
        requests: Vec<PlacementTicket>,
        active: Vec<u32>,
        next_sub: u32,
        listening: Option<InteractionId>,
        options: Vec<u32>,
        focused: Vec<u32>,
        fired: Recorder<&'static str>,
    }

    impl FakeHost {
        fn with_options(options: &[u32]) -> Self {
            Self {
                options: options.to_vec(),
                ..Self::default()
            }
        }

        fn names(&self) -> Vec<&'static str> {
            self.fired.fired().iter().map(|n| n.name).collect()
        }
    }

    impl PlacementAdapter<u32> for FakeHost {
        type Subscription = u32;

        fn request_position(
            &mut self,
            reference: u32,
            floating: u32,
            _options: &PlacementOptions,
            ticket: PlacementTicket,
        ) {
            assert_eq!((reference, floating), (TRIGGER, PANEL));
            self.requests.push(ticket);
        }

        fn observe_layout(&mut self, _reference: u32, _floating: u32) -> u32 {
            self.next_sub += 1;
            self.active.push(self.next_sub);
            self.next_sub
        }

        fn cancel_layout(&mut self, subscription: u32) {
            self.active.retain(|s| *s != subscription);
        }
    }

    impl OptionSource<u32> for FakeHost {
        fn options(&self, panel: u32) -> Vec<u32> {
            assert_eq!(panel, PANEL);
            self.options.clone()
        }

        fn focus(&mut self, option: u32) {
            self.focused.push(option);
        }
    }

    impl OutsideListener<u32> for FakeHost {
        fn listen(&mut self, _trigger: u32, _panel: u32, after: InteractionId) {
            assert!(self.listening.is_none(), "listener installed twice");
            self.listening = Some(after);
        }

        fn unlisten(&mut self) {
            self.listening = None;
        }
    }

    impl Emitter<&'static str> for FakeHost {
        fn emit(&mut self, notification: Notification<&'static str>) {
            self.fired.emit(notification);
        }
    }

    fn attached() -> Disclosure<u32, u32> {
        let mut d = Disclosure::default();
        assert!(d.attach(TRIGGER, PANEL));
        d
    }

    fn opened(host: &mut FakeHost) -> Disclosure<u32, u32> {
        let mut d = attached();
        assert!(d.activate(host, InteractionId(1)));
        d
    }

    fn positioned(y: f64) -> Positioned {
        Positioned {
            origin: Point::new(10.0, y),
            placement: Placement::BOTTOM_START,
            size: Size::new(100.0, 50.0),
            min_width: Some(100.0),
            available: None,
        }
    }

    #[test]
    fn activation_opens_with_one_subscription() {
        let mut host = FakeHost::default();
        let d = opened(&mut host);
        assert!(d.is_open());
        assert_eq!(host.names(), vec!["opened"]);
        assert_eq!(host.fired.last().map(|n| n.detail), Some("Dropdown opened!"));
        assert_eq!(host.active.len(), 1);
        assert!(d.is_repositioning());
        assert!(d.is_listening_outside());
        assert_eq!(host.requests.len(), 1);
    }

    #[test]
    fn arrow_down_walks_and_clamps() {
        let mut host = FakeHost::with_options(&[10, 11, 12]);
        let mut d = opened(&mut host);
        assert_eq!(d.focused_option_index(), None);
        let mut seen = Vec::new();
        for _ in 0..3 {
            let outcome = d.on_key(&mut host, NavKey::ArrowDown);
            assert!(outcome.prevents_default());
            seen.push(d.focused_option_index().unwrap());
        }
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(host.focused, vec![10, 11, 12]);
        assert_eq!(d.on_key(&mut host, NavKey::ArrowDown), KeyOutcome::Moved { index: 2 });
    }

    #[test]
    fn arrow_up_and_left_go_back() {
        let mut host = FakeHost::with_options(&[10, 11, 12]);
        let mut d = opened(&mut host);
        d.on_key(&mut host, NavKey::ArrowRight);
        d.on_key(&mut host, NavKey::ArrowRight);
        assert_eq!(d.on_key(&mut host, NavKey::ArrowLeft), KeyOutcome::Moved { index: 0 });
        assert_eq!(d.on_key(&mut host, NavKey::ArrowUp), KeyOutcome::Moved { index: 0 });
    }

    #[test]
    fn escape_closes_and_clears_focus() {
        let mut host = FakeHost::with_options(&[10, 11, 12]);
        let mut d = opened(&mut host);
        d.on_key(&mut host, NavKey::ArrowDown);
        assert_eq!(d.on_key(&mut host, NavKey::Escape), KeyOutcome::Dismissed);
        assert!(!d.is_open());
        assert_eq!(d.focused_option_index(), None);
        assert!(host.active.is_empty());
        assert!(host.listening.is_none());
        assert_eq!(host.fired.count("closed"), 1);
    }

    #[test]
    fn outside_click_closes() {
        let mut host = FakeHost::default();
        let mut d = opened(&mut host);
        assert!(d.on_document_interaction(&mut host, &[ROOT], InteractionId(2)));
        assert!(!d.is_open());
        assert!(host.active.is_empty());
        assert_eq!(host.names(), vec!["opened", "closed"]);
    }

    #[test]
    fn disabled_activation_is_inert() {
        let mut host = FakeHost::default();
        let mut d = attached();
        d.set_disabled(true);
        assert!(!d.activate(&mut host, InteractionId(1)));
        assert!(!d.is_open());
        assert!(host.fired.fired().is_empty());
        assert!(host.active.is_empty());
        assert!(host.requests.is_empty());
    }

    #[test]
    fn activation_while_open_closes_even_if_disabled() {
        let mut host = FakeHost::default();
        let mut d = opened(&mut host);
        d.set_disabled(true);
        assert!(d.activate(&mut host, InteractionId(2)));
        assert!(!d.is_open());
        assert!(!d.activate(&mut host, InteractionId(3)));
    }

    #[test]
    fn close_is_idempotent() {
        let mut host = FakeHost::default();
        let mut d = attached();
        for _ in 0..3 {
            assert!(!d.close(&mut host));
        }
        assert!(host.fired.fired().is_empty());

        d.open(&mut host, InteractionId(1));
        assert!(d.close(&mut host));
        assert!(!d.close(&mut host));
        assert!(!d.close(&mut host));
        assert_eq!(host.fired.count("closed"), 1);
    }

    #[test]
    fn open_is_idempotent() {
        let mut host = FakeHost::default();
        let mut d = attached();
        assert!(d.open(&mut host, InteractionId(1)));
        assert!(!d.open(&mut host, InteractionId(2)));
        assert!(!d.open(&mut host, InteractionId(3)));
        assert_eq!(host.active.len(), 1);
        assert_eq!(host.fired.count("opened"), 1);
    }

    #[test]
    fn subscriptions_track_open_state_over_any_sequence() {
        let mut host = FakeHost::default();
        let mut d = attached();
        // Deterministic mix of opens, closes, and toggles.
        let script = [0_u8, 0, 1, 1, 2, 0, 2, 2, 1, 0, 0, 2, 1, 2];
        for (i, op) in script.iter().enumerate() {
            let id = InteractionId(i as u64 + 1);
            match op {
                0 => {
                    d.open(&mut host, id);
                }
                1 => {
                    d.close(&mut host);
                }
                _ => {
                    d.activate(&mut host, id);
                }
            }
            assert!(host.active.len() <= 1);
            assert_eq!(host.active.len(), usize::from(d.is_open()));
            assert_eq!(host.listening.is_some(), d.is_open());
        }
    }

    #[test]
    fn index_stays_in_range_for_mixed_presses() {
        let mut host = FakeHost::with_options(&[1, 2, 3, 4]);
        let mut d = opened(&mut host);
        let keys = [
            NavKey::ArrowUp,
            NavKey::ArrowDown,
            NavKey::ArrowDown,
            NavKey::ArrowDown,
            NavKey::ArrowDown,
            NavKey::ArrowDown,
            NavKey::ArrowUp,
            NavKey::ArrowLeft,
            NavKey::ArrowLeft,
            NavKey::ArrowLeft,
            NavKey::ArrowLeft,
            NavKey::ArrowRight,
        ];
        for key in keys {
            d.on_key(&mut host, key);
            let idx = d.focused_option_index().unwrap();
            assert!(idx < 4);
        }
    }

    #[test]
    fn option_changes_are_seen_on_the_next_step() {
        let mut host = FakeHost::with_options(&[1, 2, 3, 4, 5]);
        let mut d = opened(&mut host);
        for _ in 0..5 {
            d.on_key(&mut host, NavKey::ArrowDown);
        }
        assert_eq!(d.focused_option_index(), Some(4));
        host.options.truncate(2);
        assert_eq!(d.on_key(&mut host, NavKey::ArrowUp), KeyOutcome::Moved { index: 1 });
        host.options.push(9);
        assert_eq!(d.on_key(&mut host, NavKey::ArrowDown), KeyOutcome::Moved { index: 2 });
        assert_eq!(host.focused.last(), Some(&9));
    }

    #[test]
    fn stale_index_from_last_opening_is_clamped() {
        let mut host = FakeHost::with_options(&[1, 2, 3, 4, 5]);
        let mut d = opened(&mut host);
        for _ in 0..5 {
            d.on_key(&mut host, NavKey::ArrowDown);
        }
        assert!(d.on_document_interaction(&mut host, &[ROOT], InteractionId(2)));
        assert_eq!(d.focused_option_index(), Some(4));

        // Options shrink while closed.
        host.options.truncate(2);
        assert!(d.open(&mut host, InteractionId(3)));
        assert_eq!(d.on_key(&mut host, NavKey::ArrowDown), KeyOutcome::Moved { index: 1 });
        assert_eq!(host.focused.last(), Some(&2));
    }

    #[test]
    fn no_options_means_no_focus_target() {
        let mut host = FakeHost::default();
        let mut d = opened(&mut host);
        assert_eq!(d.on_key(&mut host, NavKey::ArrowDown), KeyOutcome::NoTarget);
        assert_eq!(d.focused_option_index(), None);
        assert!(host.focused.is_empty());
    }

    #[test]
    fn other_keys_and_closed_state_pass_through() {
        let mut host = FakeHost::with_options(&[1, 2]);
        let mut d = attached();
        assert_eq!(d.on_key(&mut host, NavKey::ArrowDown), KeyOutcome::Ignored);
        assert_eq!(d.on_key(&mut host, NavKey::Escape), KeyOutcome::Ignored);
        assert!(host.fired.fired().is_empty());

        d.open(&mut host, InteractionId(1));
        assert_eq!(d.on_key(&mut host, NavKey::Other), KeyOutcome::Ignored);
        assert_eq!(d.focused_option_index(), None);
        assert!(d.is_open());
    }

    #[test]
    fn interactions_inside_never_dismiss() {
        let mut host = FakeHost::default();
        let mut d = opened(&mut host);
        assert!(!d.on_document_interaction(&mut host, &[7, PANEL, 3, ROOT], InteractionId(2)));
        assert!(!d.on_document_interaction(&mut host, &[TRIGGER, 3, ROOT], InteractionId(3)));
        assert!(d.is_open());
        assert_eq!(host.fired.count("closed"), 0);
    }

    #[test]
    fn opening_interaction_cannot_dismiss() {
        let mut host = FakeHost::default();
        let mut d = attached();
        d.activate(&mut host, InteractionId(5));
        // The activating click reaches the document after the disclosure opened.
        assert!(!d.on_document_interaction(&mut host, &[ROOT], InteractionId(5)));
        assert!(d.is_open());
        assert!(d.on_document_interaction(&mut host, &[ROOT], InteractionId(6)));
    }

    #[test]
    fn document_interactions_while_closed_are_ignored() {
        let mut host = FakeHost::default();
        let mut d = attached();
        assert!(!d.on_document_interaction(&mut host, &[ROOT], InteractionId(1)));
        assert!(host.fired.fired().is_empty());
    }

    #[test]
    fn detach_releases_everything_silently() {
        let mut host = FakeHost::with_options(&[1, 2]);
        let mut d = opened(&mut host);
        d.on_key(&mut host, NavKey::ArrowDown);
        d.detach(&mut host);
        assert!(!d.is_open());
        assert!(!d.is_attached());
        assert!(!d.is_repositioning());
        assert_eq!(d.focused_option_index(), None);
        assert!(host.active.is_empty());
        assert!(host.listening.is_none());
        assert_eq!(host.fired.count("closed"), 0);
        // Repeated teardown is harmless.
        d.detach(&mut host);
        assert!(!d.open(&mut host, InteractionId(9)));
    }

    #[test]
    fn detach_while_closed_is_a_no_op() {
        let mut host = FakeHost::default();
        let mut d = attached();
        d.detach(&mut host);
        assert!(host.fired.fired().is_empty());
        assert!(host.active.is_empty());
    }

    #[test]
    fn open_before_attach_is_a_no_op() {
        let mut host = FakeHost::default();
        let mut d: Disclosure<u32, u32> = Disclosure::default();
        assert!(!d.open(&mut host, InteractionId(1)));
        assert!(!d.activate(&mut host, InteractionId(2)));
        assert!(!d.is_open());
        assert!(host.requests.is_empty());
        assert!(host.fired.fired().is_empty());
    }

    #[test]
    fn attach_is_refused_while_open() {
        let mut host = FakeHost::default();
        let mut d = opened(&mut host);
        assert!(!d.attach(5, 6));
        assert_eq!(d.trigger(), Some(TRIGGER));
        assert_eq!(d.panel(), Some(PANEL));
    }

    #[test]
    fn placement_results_apply_in_order() {
        let mut host = FakeHost::default();
        let mut d = opened(&mut host);
        let first = host.requests[0];
        assert!(d.on_layout_change(&mut host));
        let second = host.requests[1];
        assert!(first < second);

        assert!(d.apply_position(second, Ok(positioned(40.0))));
        // The earlier request resolves late and must not win.
        assert!(!d.apply_position(first, Ok(positioned(99.0))));
        assert_eq!(d.positioning().map(|p| p.origin.y), Some(40.0));
        assert_eq!(d.render_state().panel_origin(), Some(Point::new(10.0, 40.0)));
    }

    #[test]
    fn failed_placement_keeps_last_position() {
        let mut host = FakeHost::default();
        let mut d = opened(&mut host);
        assert!(d.apply_position(host.requests[0], Ok(positioned(40.0))));
        d.on_layout_change(&mut host);
        assert!(!d.apply_position(host.requests[1], Err(PlacementError::Unmeasured)));
        assert!(d.is_open());
        assert_eq!(d.positioning().map(|p| p.origin.y), Some(40.0));
    }

    #[test]
    fn results_after_close_or_from_earlier_cycles_are_dropped() {
        let mut host = FakeHost::default();
        let mut d = opened(&mut host);
        let old = host.requests[0];
        d.close(&mut host);
        assert!(!d.apply_position(old, Ok(positioned(1.0))));
        assert!(!d.on_layout_change(&mut host));
        assert_eq!(host.requests.len(), 1);

        d.open(&mut host, InteractionId(2));
        assert!(!d.apply_position(old, Ok(positioned(1.0))));
        let fresh = *host.requests.last().unwrap();
        assert!(d.apply_position(fresh, Ok(positioned(2.0))));
        // Tickets never issued are rejected too.
        assert!(!d.apply_position(PlacementTicket(fresh.get() + 10), Ok(positioned(3.0))));
    }

    #[test]
    fn render_state_mirrors_state() {
        let mut host = FakeHost::default();
        let mut d = attached();
        let closed = d.render_state();
        assert!(!closed.open && !closed.aria_expanded);
        assert_eq!(closed.role, "menu");
        assert_eq!(closed.panel_origin(), None);

        d.open(&mut host, InteractionId(1));
        d.apply_position(host.requests[0], Ok(positioned(20.0)));
        let open = d.render_state();
        assert!(open.open && open.aria_expanded);
        assert_eq!(open.panel_min_width(), Some(100.0));

        // Closing keeps the last position for the next opening.
        d.close(&mut host);
        assert_eq!(d.render_state().panel_origin(), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn custom_notification_names() {
        let config = DisclosureConfig {
            opened: NotificationSpec {
                name: "menu-open",
                detail: "open",
            },
            closed: NotificationSpec {
                name: "menu-close",
                detail: "close",
            },
            ..DisclosureConfig::default()
        };
        let mut host = FakeHost::default();
        let mut d: Disclosure<u32, u32> = Disclosure::new(config);
        d.attach(TRIGGER, PANEL);
        d.activate(&mut host, InteractionId(1));
        d.activate(&mut host, InteractionId(2));
        assert_eq!(host.names(), vec!["menu-open", "menu-close"]);
        assert_eq!(d.config().placement.placement, Placement::BOTTOM_START);
    }

    #[test]
    fn step_helper_agrees_with_controller() {
        let mut host = FakeHost::with_options(&[1, 2, 3]);
        let mut d = opened(&mut host);
        let mut expected = None;
        for key in [NavKey::ArrowDown, NavKey::ArrowDown, NavKey::ArrowUp] {
            expected = crate::step_index(expected, key.step().unwrap_or(NavStep::Next), 3);
            d.on_key(&mut host, key);
            assert_eq!(d.focused_option_index(), expected);
        }
    }
}
