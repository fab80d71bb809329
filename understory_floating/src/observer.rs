// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous repositioning: subscriptions that fire on layout changes.
//!
//! A [`LayoutObserver`] keeps track of which reference/floating pairs want to be
//! repositioned while they are visible. The host feeds it [`LayoutChange`]s as its
//! resize/scroll observers or frame loop report them, and gets back the subscriptions
//! whose placement is now stale. Subscriptions live until [`LayoutObserver::cancel`] is
//! called; nothing expires on its own.
//!
//! ```
//! use understory_floating::{LayoutChange, LayoutObserver, ObserveFlags};
//!
//! let mut observer = LayoutObserver::new();
//! let sub = observer.subscribe(1_u32, 2_u32, ObserveFlags::default());
//!
//! assert_eq!(observer.changed(&LayoutChange::ElementResize(2)).as_slice(), &[sub]);
//! assert!(observer.changed(&LayoutChange::ElementResize(7)).is_empty());
//!
//! assert!(observer.cancel(sub));
//! assert!(!observer.cancel(sub));
//! assert!(observer.is_empty());
//! ```

use core::num::NonZeroU64;

use hashbrown::HashMap;
use smallvec::SmallVec;

bitflags::bitflags! {
    /// Which layout changes a subscription reacts to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObserveFlags: u8 {
        /// Scrolling of any scroll container (or the viewport).
        const ANCESTOR_SCROLL = 0b0000_0001;
        /// Viewport resizes.
        const ANCESTOR_RESIZE = 0b0000_0010;
        /// Size changes of the reference or the floating element.
        const ELEMENT_RESIZE  = 0b0000_0100;
        /// Every animation frame, for references that move without resizing.
        const ANIMATION_FRAME = 0b0000_1000;
    }
}

impl Default for ObserveFlags {
    fn default() -> Self {
        Self::ANCESTOR_SCROLL | Self::ANCESTOR_RESIZE | Self::ELEMENT_RESIZE
    }
}

/// A layout change reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutChange<K> {
    /// Some scroll container scrolled.
    Scroll,
    /// The viewport was resized.
    ViewportResize,
    /// The given element changed size or content.
    ElementResize(K),
    /// A new animation frame started.
    AnimationFrame,
}

/// Handle for an active subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(NonZeroU64);

impl Subscription {
    /// Raw id, unique for the lifetime of the observer that issued it.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

#[derive(Clone, Debug)]
struct Watch<K> {
    reference: K,
    floating: K,
    flags: ObserveFlags,
}

/// Registry of active repositioning subscriptions.
#[derive(Clone, Debug)]
pub struct LayoutObserver<K> {
    watches: HashMap<Subscription, Watch<K>>,
    next: u64,
}

impl<K> Default for LayoutObserver<K> {
    fn default() -> Self {
        Self {
            watches: HashMap::new(),
            next: 1,
        }
    }
}

impl<K: Copy + Eq> LayoutObserver<K> {
    /// Create an empty observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `reference` and `floating` for the changes in `flags`.
    pub fn subscribe(&mut self, reference: K, floating: K, flags: ObserveFlags) -> Subscription {
        let id = NonZeroU64::new(self.next).map_or(Subscription(NonZeroU64::MIN), Subscription);
        self.next = self.next.wrapping_add(1).max(1);
        self.watches.insert(
            id,
            Watch {
                reference,
                floating,
                flags,
            },
        );
        tracing::trace!(subscription = id.get(), active = self.watches.len(), "layout subscribe");
        id
    }

    /// Stop a subscription. Returns `false` if it was not active, so repeated calls are harmless.
    pub fn cancel(&mut self, subscription: Subscription) -> bool {
        let removed = self.watches.remove(&subscription).is_some();
        if removed {
            tracing::trace!(
                subscription = subscription.get(),
                active = self.watches.len(),
                "layout cancel"
            );
        }
        removed
    }

    /// Subscriptions that must recompute placement after `change`, in ascending id order.
    pub fn changed(&self, change: &LayoutChange<K>) -> SmallVec<[Subscription; 4]> {
        let mut hit: SmallVec<[Subscription; 4]> = self
            .watches
            .iter()
            .filter(|(_, w)| match change {
                LayoutChange::Scroll => w.flags.contains(ObserveFlags::ANCESTOR_SCROLL),
                LayoutChange::ViewportResize => w.flags.contains(ObserveFlags::ANCESTOR_RESIZE),
                LayoutChange::ElementResize(node) => {
                    w.flags.contains(ObserveFlags::ELEMENT_RESIZE)
                        && (w.reference == *node || w.floating == *node)
                }
                LayoutChange::AnimationFrame => w.flags.contains(ObserveFlags::ANIMATION_FRAME),
            })
            .map(|(id, _)| *id)
            .collect();
        hit.sort_unstable();
        hit
    }

    /// Whether `subscription` is active.
    pub fn contains(&self, subscription: Subscription) -> bool {
        self.watches.contains_key(&subscription)
    }

    /// Reference and floating elements watched by `subscription`.
    pub fn elements(&self, subscription: Subscription) -> Option<(K, K)> {
        self.watches
            .get(&subscription)
            .map(|w| (w.reference, w.floating))
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    /// Whether no subscription is active.
    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }
}
