//! In-memory hosts for exercising the synchronizers without a browser.
//!
//! - [`FakeElement`]: shared element state (top offset, parity, transform
//!   writes, style variables).
//! - [`FakeViewport`]: scroll source whose listeners fire on [`FakeViewport::scroll`].
//! - [`ManualFrames`]: frame scheduler ticked by hand.
//! - [`FakeCarousel`]: slides plus change listeners fired on [`FakeCarousel::slide_to`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use scrollfx_core::{
    Carousel, ElementProvider, FrameScheduler, FrameTask, IdAllocator, ListenOptions, Listener,
    ListenerId, Parity, ScrollSource, StyleSource, StyleTarget, TrackedTarget,
};

#[derive(Debug, Default)]
struct ElementState {
    top: Cell<f64>,
    parity: Cell<Parity>,
    rotations: RefCell<Vec<f64>>,
    vars: RefCell<HashMap<String, String>>,
    var_writes: Cell<usize>,
}

/// Cloning shares the underlying state, like two references to one DOM node.
#[derive(Clone, Debug, Default)]
pub struct FakeElement(Rc<ElementState>);

impl FakeElement {
    pub fn at(top: f64) -> Self {
        let el = Self::default();
        el.set_top(top);
        el
    }

    pub fn with_var(name: &str, value: &str) -> Self {
        let el = Self::default();
        el.0.vars.borrow_mut().insert(name.to_string(), value.to_string());
        el
    }

    pub fn set_top(&self, top: f64) {
        self.0.top.set(top);
    }

    pub fn parity(&self) -> Parity {
        self.0.parity.get()
    }

    /// Every rotation written, oldest first.
    pub fn rotations(&self) -> Vec<f64> {
        self.0.rotations.borrow().clone()
    }

    pub fn last_rotation(&self) -> Option<f64> {
        self.0.rotations.borrow().last().copied()
    }

    pub fn var(&self, name: &str) -> Option<String> {
        self.0.vars.borrow().get(name).cloned()
    }

    pub fn var_writes(&self) -> usize {
        self.0.var_writes.get()
    }
}

impl TrackedTarget for FakeElement {
    fn top_offset(&self) -> f64 {
        self.0.top.get()
    }

    fn set_parity(&self, parity: Parity) {
        self.0.parity.set(parity);
    }

    fn set_rotation(&self, degrees: f64) {
        self.0.rotations.borrow_mut().push(degrees);
    }
}

impl StyleSource for FakeElement {
    fn style_var(&self, name: &str) -> String {
        self.var(name).unwrap_or_default()
    }
}

impl StyleTarget for FakeElement {
    fn set_style_var(&self, name: &str, value: &str) {
        self.0.var_writes.set(self.0.var_writes.get() + 1);
        self.0
            .vars
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }
}

/// Element-set provider that counts how often it was queried.
#[derive(Debug, Default)]
pub struct FakeGallery {
    items: Vec<FakeElement>,
    queries: Cell<usize>,
}

impl FakeGallery {
    /// One item per top offset, in document order.
    pub fn with_tops(tops: &[f64]) -> Self {
        Self {
            items: tops.iter().copied().map(FakeElement::at).collect(),
            queries: Cell::new(0),
        }
    }

    pub fn item(&self, index: usize) -> &FakeElement {
        &self.items[index]
    }

    pub fn items(&self) -> &[FakeElement] {
        &self.items
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    pub fn total_rotation_writes(&self) -> usize {
        self.items.iter().map(|el| el.rotations().len()).sum()
    }
}

impl ElementProvider for FakeGallery {
    type Element = FakeElement;

    fn qualifying_elements(&self) -> Vec<FakeElement> {
        self.queries.set(self.queries.get() + 1);
        self.items.clone()
    }
}

/// Listener registry shared by the fake signal sources.
#[derive(Default)]
struct Listeners {
    ids: RefCell<IdAllocator>,
    entries: RefCell<Vec<(ListenerId, Listener)>>,
}

impl Listeners {
    fn add(&self, listener: Listener) -> ListenerId {
        let id = self.ids.borrow_mut().alloc_listener();
        self.entries.borrow_mut().push((id, listener));
        id
    }

    fn remove(&self, id: ListenerId) {
        self.entries.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn fire(&self) {
        // Snapshot first so listeners may (un)subscribe while being called.
        let snapshot: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in snapshot {
            listener();
        }
    }
}

/// Scroll source with a settable viewport height.
#[derive(Default)]
pub struct FakeViewport {
    height: Cell<f64>,
    listeners: Listeners,
    options: RefCell<Vec<ListenOptions>>,
    unsubscribes: Cell<usize>,
}

impl FakeViewport {
    pub fn new(height: f64) -> Rc<Self> {
        let vp = Self::default();
        vp.height.set(height);
        Rc::new(vp)
    }

    pub fn set_height(&self, height: f64) {
        self.height.set(height);
    }

    /// Emit one scroll event to every registered listener.
    pub fn scroll(&self) {
        self.listeners.fire();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Options passed to each `subscribe`, in order.
    pub fn subscribe_options(&self) -> Vec<ListenOptions> {
        self.options.borrow().clone()
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribes.get()
    }
}

impl ScrollSource for FakeViewport {
    fn viewport_height(&self) -> f64 {
        self.height.get()
    }

    fn subscribe(&self, listener: Listener, options: ListenOptions) -> ListenerId {
        self.options.borrow_mut().push(options);
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.unsubscribes.set(self.unsubscribes.get() + 1);
        self.listeners.remove(id);
    }
}

/// Frame scheduler that only runs tasks when the test calls [`ManualFrames::tick`].
#[derive(Default)]
pub struct ManualFrames {
    queue: RefCell<Vec<FrameTask>>,
    requests: Cell<usize>,
    refuse: Cell<usize>,
}

impl ManualFrames {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Run every task queued before this call; returns how many ran.
    pub fn tick(&self) -> usize {
        let tasks = std::mem::take(&mut *self.queue.borrow_mut());
        let n = tasks.len();
        for task in tasks {
            task();
        }
        n
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    /// Refuse the next `n` requests, dropping their tasks.
    pub fn refuse_next(&self, n: usize) {
        self.refuse.set(n);
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, task: FrameTask) -> bool {
        self.requests.set(self.requests.get() + 1);
        if self.refuse.get() > 0 {
            self.refuse.set(self.refuse.get() - 1);
            return false;
        }
        self.queue.borrow_mut().push(task);
        true
    }
}

/// Carousel over a fixed list of slides.
#[derive(Default)]
pub struct FakeCarousel {
    slides: Vec<FakeElement>,
    active: Cell<Option<usize>>,
    listeners: Listeners,
}

impl FakeCarousel {
    /// Slides carry `variable` set to each entry of `tokens`; slide 0 starts active.
    pub fn with_tokens(variable: &str, tokens: &[&str]) -> Rc<Self> {
        let slides: Vec<_> = tokens
            .iter()
            .map(|t| FakeElement::with_var(variable, t))
            .collect();
        let active = if slides.is_empty() { None } else { Some(0) };
        Rc::new(Self {
            slides,
            active: Cell::new(active),
            listeners: Listeners::default(),
        })
    }

    /// Carousel that cannot report an active slide.
    pub fn without_active_slide() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Make `index` active and dispatch one change event.
    pub fn slide_to(&self, index: usize) {
        self.active.set(Some(index));
        self.listeners.fire();
    }

    /// Drop the active slide and dispatch a change event.
    pub fn lose_active_slide(&self) {
        self.active.set(None);
        self.listeners.fire();
    }

    pub fn slide(&self, index: usize) -> &FakeElement {
        &self.slides[index]
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Carousel for FakeCarousel {
    type Slide = FakeElement;

    fn active_slide(&self) -> Option<FakeElement> {
        self.active.get().and_then(|i| self.slides.get(i).cloned())
    }

    fn subscribe_change(&self, listener: Listener) -> ListenerId {
        self.listeners.add(listener)
    }

    fn unsubscribe_change(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}
