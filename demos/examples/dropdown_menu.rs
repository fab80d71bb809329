// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two dropdown menus and a tab group driven against a tiny in-memory document.
//!
//! This example shows how to combine:
//! - `understory_disclosure` for open/close, outside dismissal, and roving focus,
//! - `understory_floating` for placement and layout-change subscriptions,
//! - `understory_notify` for delivering `opened`/`closed` along the element path,
//! - `understory_tabs` for tab registration and exclusive selection.
//!
//! Run:
//! - `cargo run -p understory_demos --example dropdown_menu`

use std::collections::HashMap;

use kurbo::Rect;
use understory_disclosure::{
    Disclosure, DismissDispatcher, InteractionId, NavKey, OptionSource, OutsideListener,
    PlacementAdapter, PlacementTicket,
};
use understory_floating::{
    LayoutChange, LayoutObserver, ObserveFlags, PlacementOptions, Subscription, compute_position,
};
use understory_notify::{Emitter, EventPath, Notification, Outcome, dispatch};
use understory_tabs::{TabGroup, TabInfo, find_group};

type Menu = Disclosure<u32, Subscription>;

/// Flat stand-in for a DOM: parents, layout boxes, and which elements are menu options.
struct Document {
    viewport: Rect,
    parents: HashMap<u32, u32>,
    rects: HashMap<u32, Rect>,
    /// Every element in document order.
    order: Vec<u32>,
    options: Vec<u32>,
    /// Host element of each widget, for notification paths.
    widget_hosts: Vec<u32>,
    observer: LayoutObserver<u32>,
    subscribers: HashMap<Subscription, usize>,
    dismiss: DismissDispatcher<usize, u32>,
    pending: Vec<(usize, PlacementTicket, u32, u32, PlacementOptions)>,
    focused: Option<u32>,
}

impl Document {
    fn insert(&mut self, id: u32, parent: Option<u32>, rect: Rect) {
        if let Some(p) = parent {
            self.parents.insert(id, p);
        }
        self.rects.insert(id, rect);
        self.order.push(id);
    }

    /// Target-first path from `node` to the root.
    fn path(&self, node: u32) -> Vec<u32> {
        let mut path = vec![node];
        let mut cur = node;
        while let Some(&p) = self.parents.get(&cur) {
            path.push(p);
            cur = p;
        }
        path
    }

    fn is_descendant(&self, node: u32, ancestor: u32) -> bool {
        self.path(node)[1..].contains(&ancestor)
    }

    /// Run the deferred placement computations, as a microtask queue would.
    fn flush_placements(&mut self, menus: &mut [Menu]) {
        for (widget, ticket, reference, floating, options) in std::mem::take(&mut self.pending) {
            let result = compute_position(
                self.rects[&reference],
                self.rects[&floating].size(),
                self.viewport,
                &options,
            );
            if menus[widget].apply_position(ticket, result) {
                let pos = menus[widget].render_state();
                println!(
                    "  menu {widget}: panel at {:?} ({:?}), min width {:?}",
                    pos.panel_origin(),
                    pos.positioning.map(|p| p.placement),
                    pos.panel_min_width(),
                );
            }
        }
    }
}

/// One widget's view of the document; this is what each disclosure talks to.
struct WidgetHost<'a> {
    doc: &'a mut Document,
    widget: usize,
}

impl PlacementAdapter<u32> for WidgetHost<'_> {
    type Subscription = Subscription;

    fn request_position(
        &mut self,
        reference: u32,
        floating: u32,
        options: &PlacementOptions,
        ticket: PlacementTicket,
    ) {
        self.doc
            .pending
            .push((self.widget, ticket, reference, floating, options.clone()));
    }

    fn observe_layout(&mut self, reference: u32, floating: u32) -> Subscription {
        let sub = self
            .doc
            .observer
            .subscribe(reference, floating, ObserveFlags::default());
        self.doc.subscribers.insert(sub, self.widget);
        sub
    }

    fn cancel_layout(&mut self, subscription: Subscription) {
        self.doc.observer.cancel(subscription);
        self.doc.subscribers.remove(&subscription);
    }
}

impl OptionSource<u32> for WidgetHost<'_> {
    fn options(&self, panel: u32) -> Vec<u32> {
        self.doc
            .order
            .iter()
            .copied()
            .filter(|o| self.doc.options.contains(o) && self.doc.is_descendant(*o, panel))
            .collect()
    }

    fn focus(&mut self, option: u32) {
        self.doc.focused = Some(option);
    }
}

impl OutsideListener<u32> for WidgetHost<'_> {
    fn listen(&mut self, trigger: u32, panel: u32, after: InteractionId) {
        self.doc.dismiss.listen(self.widget, trigger, panel, after);
    }

    fn unlisten(&mut self) {
        self.doc.dismiss.unlisten(self.widget);
    }
}

impl Emitter<&'static str> for WidgetHost<'_> {
    fn emit(&mut self, notification: Notification<&'static str>) {
        let path = EventPath::new(self.doc.path(self.doc.widget_hosts[self.widget]));
        let mut reached = Vec::new();
        dispatch(&path, &notification, |node, _| {
            reached.push(*node);
            Outcome::Continue
        });
        println!(
            "  menu {} fired {:?} ({}) -> {:?}",
            self.widget, notification.name, notification.detail, reached
        );
    }
}

/// A pointer click: activation on a trigger, then the document-level capture listener.
fn click(doc: &mut Document, menus: &mut [Menu], target: u32, id: InteractionId) {
    println!("click on {target} ({id:?})");
    for (widget, menu) in menus.iter_mut().enumerate() {
        if menu.trigger() == Some(target) {
            menu.activate(&mut WidgetHost { doc: &mut *doc, widget }, id);
        }
    }
    let path = doc.path(target);
    for widget in doc.dismiss.route(&path, id) {
        let mut host = WidgetHost {
            doc: &mut *doc,
            widget,
        };
        menus[widget].on_document_interaction(&mut host, &path, id);
    }
    doc.flush_placements(menus);
}

fn key(doc: &mut Document, menus: &mut [Menu], widget: usize, key: NavKey) {
    let outcome = menus[widget].on_key(&mut WidgetHost { doc: &mut *doc, widget }, key);
    println!(
        "key {key:?} on menu {widget}: {outcome:?}, prevent default: {}, focus: {:?}",
        outcome.prevents_default(),
        doc.focused
    );
}

fn layout_change(doc: &mut Document, menus: &mut [Menu], change: LayoutChange<u32>) {
    println!("layout change {change:?}");
    for sub in doc.observer.changed(&change) {
        if let Some(&widget) = doc.subscribers.get(&sub) {
            menus[widget].on_layout_change(&mut WidgetHost { doc: &mut *doc, widget });
        }
    }
    doc.flush_placements(menus);
}

fn main() {
    let mut doc = Document {
        viewport: Rect::new(0.0, 0.0, 640.0, 480.0),
        parents: HashMap::new(),
        rects: HashMap::new(),
        order: Vec::new(),
        options: Vec::new(),
        widget_hosts: vec![1, 10],
        observer: LayoutObserver::new(),
        subscribers: HashMap::new(),
        dismiss: DismissDispatcher::new(),
        pending: Vec::new(),
        focused: None,
    };

    // Menu 0 near the top; menu 1 near the bottom so it flips upwards.
    doc.insert(0, None, Rect::new(0.0, 0.0, 640.0, 480.0));
    doc.insert(1, Some(0), Rect::new(20.0, 20.0, 140.0, 52.0));
    doc.insert(2, Some(1), Rect::new(20.0, 20.0, 140.0, 52.0));
    doc.insert(3, Some(1), Rect::new(0.0, 0.0, 90.0, 96.0));
    for (i, id) in [4_u32, 5, 6].into_iter().enumerate() {
        let y = 32.0 * i as f64;
        doc.insert(id, Some(3), Rect::new(0.0, y, 90.0, y + 32.0));
        doc.options.push(id);
    }
    doc.insert(10, Some(0), Rect::new(300.0, 420.0, 420.0, 452.0));
    doc.insert(11, Some(10), Rect::new(300.0, 420.0, 420.0, 452.0));
    doc.insert(12, Some(10), Rect::new(0.0, 0.0, 160.0, 64.0));
    for id in [13_u32, 14] {
        doc.insert(id, Some(12), Rect::new(0.0, 0.0, 160.0, 32.0));
        doc.options.push(id);
    }

    let mut menus: Vec<Menu> = vec![Disclosure::default(), Disclosure::default()];
    menus[0].attach(2, 3);
    menus[1].attach(11, 12);

    let mut next = InteractionId::default();
    let mut fresh = || {
        next = next.next();
        next
    };

    click(&mut doc, &mut menus, 2, fresh());
    key(&mut doc, &mut menus, 0, NavKey::ArrowDown);
    key(&mut doc, &mut menus, 0, NavKey::ArrowDown);
    key(&mut doc, &mut menus, 0, NavKey::from_key("Tab"));

    doc.rects.insert(2, Rect::new(20.0, 60.0, 140.0, 92.0));
    layout_change(&mut doc, &mut menus, LayoutChange::Scroll);

    // Opening menu 1 is an outside click for menu 0.
    click(&mut doc, &mut menus, 11, fresh());
    key(&mut doc, &mut menus, 1, NavKey::ArrowUp);
    key(&mut doc, &mut menus, 1, NavKey::Escape);

    click(&mut doc, &mut menus, 2, fresh());
    println!("detaching menu 0 while open");
    menus[0].detach(&mut WidgetHost {
        doc: &mut doc,
        widget: 0,
    });
    println!(
        "active layout subscriptions: {}, dismiss listeners: {}",
        doc.observer.len(),
        doc.dismiss.len()
    );

    // Tabs register with the nearest tab-group ancestor.
    const TAB_GROUP: u32 = 30;
    let tab_ancestors = [31_u32, TAB_GROUP, 0];
    let owner = find_group(tab_ancestors, |n| *n == TAB_GROUP);
    let mut tabs = TabGroup::new();
    tabs.register(31_u32, TabInfo::new("overview"));
    tabs.register(32_u32, TabInfo::new("details"));
    tabs.register(33_u32, TabInfo::new("archive").with_disabled(true));
    for tab in [32, 33, 32, 31] {
        match tabs.select(tab) {
            Some(note) => println!("tab group {owner:?}: {} -> {}", note.name, note.detail),
            None => println!("tab group {owner:?}: selecting {tab} changed nothing"),
        }
    }
}
