// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tabs --heading-base-level=0

//! Understory Tabs: parent/child coordination for tab groups.
//!
//! A tab group owns a [`TabGroup`] registry. Each tab, when attached, walks up its
//! ancestors to find the group ([`find_group`]) and keeps only that group's key; it
//! registers itself on attach and unregisters on detach. The group is the single owner of
//! tab order and selection, so there are no cycles between tabs and their group.
//!
//! Selecting a tab deselects every other one and yields a `tab-selected` notification
//! whose detail is the tab's name.
//!
//! ```
//! use understory_tabs::{TAB_SELECTED, TabGroup, TabInfo, find_group};
//!
//! const GROUP: u32 = 100;
//! let ancestors = [7_u32, 42, GROUP, 1];
//! assert_eq!(find_group(ancestors, |n| *n == GROUP), Some(GROUP));
//!
//! let mut group = TabGroup::new();
//! group.register(1_u32, TabInfo::new("general"));
//! group.register(2_u32, TabInfo::new("advanced"));
//!
//! let note = group.select(2).unwrap();
//! assert_eq!(note.name, TAB_SELECTED);
//! assert_eq!(note.detail, "advanced");
//! assert_eq!(group.selected(), Some(2));
//!
//! // Selecting the selected tab again is quiet.
//! assert!(group.select(2).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use understory_notify::Notification;

/// Name of the notification fired when a tab becomes selected.
pub const TAB_SELECTED: &str = "tab-selected";

/// What the group knows about a registered tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabInfo {
    /// Name matched against the panel the tab controls; also the selection detail.
    pub name: String,
    /// Disabled tabs cannot be selected.
    pub disabled: bool,
}

impl TabInfo {
    /// An enabled tab called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disabled: false,
        }
    }

    /// Same tab, disabled or not.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Registry of the tabs belonging to one group, in registration order.
#[derive(Clone, Debug)]
pub struct TabGroup<K> {
    tabs: Vec<(K, TabInfo)>,
    selected: Option<K>,
}

impl<K> Default for TabGroup<K> {
    fn default() -> Self {
        Self {
            tabs: Vec::new(),
            selected: None,
        }
    }
}

impl<K: Copy + Eq> TabGroup<K> {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tab`. Re-registering an existing tab updates its info in place.
    ///
    /// Returns `true` if the tab was new.
    pub fn register(&mut self, tab: K, info: TabInfo) -> bool {
        if let Some((_, existing)) = self.tabs.iter_mut().find(|(k, _)| *k == tab) {
            *existing = info;
            return false;
        }
        tracing::trace!(name = info.name.as_str(), "tab registered");
        self.tabs.push((tab, info));
        true
    }

    /// Unregister `tab`, clearing the selection if it was selected.
    ///
    /// Returns `false` if it was not registered.
    pub fn unregister(&mut self, tab: K) -> bool {
        let before = self.tabs.len();
        self.tabs.retain(|(k, _)| *k != tab);
        if self.selected == Some(tab) {
            self.selected = None;
        }
        before != self.tabs.len()
    }

    /// Enable or disable `tab`. A selected tab stays selected when disabled.
    pub fn set_disabled(&mut self, tab: K, disabled: bool) -> bool {
        match self.tabs.iter_mut().find(|(k, _)| *k == tab) {
            Some((_, info)) => {
                info.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Select `tab`, deselecting the others.
    ///
    /// Returns the `tab-selected` notification when the selection changed. Unknown,
    /// disabled, and already-selected tabs change nothing and return `None`.
    pub fn select(&mut self, tab: K) -> Option<Notification<String>> {
        if self.selected == Some(tab) {
            return None;
        }
        let (_, info) = self.tabs.iter().find(|(k, _)| *k == tab)?;
        if info.disabled {
            tracing::trace!(name = info.name.as_str(), "disabled tab not selected");
            return None;
        }
        let note = Notification::new(TAB_SELECTED, info.name.clone());
        self.selected = Some(tab);
        tracing::debug!(name = note.detail.as_str(), "tab selected");
        Some(note)
    }

    /// Select the tab registered under `name`.
    pub fn select_by_name(&mut self, name: &str) -> Option<Notification<String>> {
        let tab = self
            .tabs
            .iter()
            .find(|(_, info)| info.name == name)
            .map(|(k, _)| *k)?;
        self.select(tab)
    }

    /// Currently selected tab.
    pub fn selected(&self) -> Option<K> {
        self.selected
    }

    /// Whether `tab` is the selected tab.
    pub fn is_selected(&self, tab: K) -> bool {
        self.selected == Some(tab)
    }

    /// Info for `tab`, if registered.
    pub fn info(&self, tab: K) -> Option<&TabInfo> {
        self.tabs.iter().find(|(k, _)| *k == tab).map(|(_, i)| i)
    }

    /// Registered tabs in registration order.
    pub fn tabs(&self) -> impl Iterator<Item = K> + '_ {
        self.tabs.iter().map(|(k, _)| *k)
    }

    /// Number of registered tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether no tab is registered.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

/// Nearest ancestor for which `is_group` holds, walking `ancestors` from nearest to farthest.
pub fn find_group<K>(
    ancestors: impl IntoIterator<Item = K>,
    is_group: impl Fn(&K) -> bool,
) -> Option<K> {
    ancestors.into_iter().find(|k| is_group(k))
}
