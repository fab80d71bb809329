// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams between the disclosure and the environment hosting it.
//!
//! The controller never touches a document, a layout engine, or a listener table directly.
//! Each collaborator is a small trait; [`DisclosureHost`] is implemented automatically for
//! anything that implements all of them.

use alloc::vec::Vec;

use understory_floating::PlacementOptions;
use understory_notify::Emitter;

use crate::types::InteractionId;

/// Identifies one placement request so its (possibly deferred) result can be matched up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlacementTicket(pub(crate) u64);

impl PlacementTicket {
    /// Raw ticket number; increases with every request from the same disclosure.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Placement engine adapter.
///
/// `request_position` may compute synchronously or defer; either way the host hands the
/// result to [`Disclosure::apply_position`](crate::Disclosure::apply_position) with the same
/// ticket. `observe_layout` starts a continuous subscription that should make the host call
/// [`Disclosure::on_layout_change`](crate::Disclosure::on_layout_change) whenever either
/// element's geometry changes, until `cancel_layout` is called with the returned handle.
pub trait PlacementAdapter<K> {
    /// Handle for an active layout subscription.
    type Subscription;

    /// Ask for `floating` to be placed against `reference`.
    fn request_position(
        &mut self,
        reference: K,
        floating: K,
        options: &PlacementOptions,
        ticket: PlacementTicket,
    );

    /// Start reporting layout changes of `reference` and `floating`.
    fn observe_layout(&mut self, reference: K, floating: K) -> Self::Subscription;

    /// Stop a subscription started by [`PlacementAdapter::observe_layout`].
    fn cancel_layout(&mut self, subscription: Self::Subscription);
}

/// Live view of the options inside a panel.
pub trait OptionSource<K> {
    /// Focusable options currently inside `panel`, in document order.
    ///
    /// Queried on every navigation step and never cached by the controller, so options
    /// added or removed while open are picked up immediately. Returns an empty list when
    /// there are none.
    fn options(&self, panel: K) -> Vec<K>;

    /// Move input focus to `option`.
    fn focus(&mut self, option: K);
}

/// Document-level listener used for outside dismissal.
///
/// While installed, the host routes every pointer interaction that reaches the document
/// (in capture phase) to
/// [`Disclosure::on_document_interaction`](crate::Disclosure::on_document_interaction).
/// A host with many widgets can back this with one shared
/// [`DismissDispatcher`](crate::DismissDispatcher).
pub trait OutsideListener<K> {
    /// Install the listener. Interactions with ids `<= after` must not be delivered.
    fn listen(&mut self, trigger: K, panel: K, after: InteractionId);

    /// Remove the listener.
    fn unlisten(&mut self);
}

/// Everything a [`Disclosure`](crate::Disclosure) needs from its environment.
pub trait DisclosureHost<K>:
    PlacementAdapter<K> + OptionSource<K> + OutsideListener<K> + Emitter<&'static str>
{
}

impl<K, T> DisclosureHost<K> for T where
    T: PlacementAdapter<K> + OptionSource<K> + OutsideListener<K> + Emitter<&'static str> + ?Sized
{
}
