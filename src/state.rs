//! View State
//!
//! The fields a frontend renders, held in an observable [`Store`]. Every
//! update notifies subscribers with the new state; frontends mirror it into
//! their own reactive primitives (Leptos signals, terminal output, ...).

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::chat::{ChatMessage, Transcript};

pub const TITLE: &str = "AI Recipe assistant";
pub const NO_IMAGE_SELECTED: &str = "No image selected";
pub const ANALYSE_PROMPT: &str = "Upload a dish image and click Analyse.";

/// Everything the page shows
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub title: String,
    pub selected_image_name: String,
    pub analyse_status: String,
    pub camera_status: String,
    pub preview_url: Option<String>,
    pub camera_supported: bool,
    pub camera_active: bool,
    pub chat_input: String,
    pub uploading: bool,
    pub chat_loading: bool,
    pub transcript: Transcript,
}

impl ViewState {
    pub fn new(camera_supported: bool) -> Self {
        Self {
            title: TITLE.to_string(),
            selected_image_name: NO_IMAGE_SELECTED.to_string(),
            analyse_status: ANALYSE_PROMPT.to_string(),
            camera_status: String::new(),
            preview_url: None,
            camera_supported,
            camera_active: false,
            chat_input: String::new(),
            uploading: false,
            chat_loading: false,
            transcript: Transcript::default(),
        }
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<T> = Rc<dyn Fn(&T)>;

/// Single-threaded observable value.
///
/// Observers run synchronously after each [`Store::update`] and may read the
/// store, but must not update it from inside the callback.
pub struct Store<T> {
    value: RefCell<T>,
    observers: RefCell<Vec<(SubscriptionId, Observer<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register an observer; it is not called for the current value.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Mutate the value, then notify every observer.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value.borrow_mut());
        self.notify();
        result
    }

    /// Read the value without copying it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    fn notify(&self) {
        // Snapshot so observers may subscribe/unsubscribe while being notified
        let observers: Vec<Observer<T>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();

        let value = self.value.borrow();
        for observer in observers {
            observer(&value);
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn snapshot(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_view_state() {
        let state = ViewState::new(true);
        assert_eq!(state.title, "AI Recipe assistant");
        assert_eq!(state.selected_image_name, "No image selected");
        assert_eq!(state.analyse_status, "Upload a dish image and click Analyse.");
        assert!(state.camera_supported);
        assert!(!state.uploading && !state.chat_loading && !state.camera_active);
        assert_eq!(state.transcript.len(), 1);
    }

    #[test]
    fn test_update_notifies_observers_with_new_value() {
        let store = Store::new(0u32);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |v| sink.borrow_mut().push(*v));

        store.update(|v| *v += 1);
        store.update(|v| *v += 2);

        assert_eq!(*seen.borrow(), vec![1, 3]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new(String::new());
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));
        store.update(|s| s.push('a'));

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.update(|s| s.push('b'));

        assert_eq!(calls.get(), 1);
        assert_eq!(store.snapshot(), "ab");
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_observer_can_read_store() {
        let store = Rc::new(Store::new(5i32));
        let observed = Rc::new(Cell::new(0));

        let (reader, out) = (Rc::clone(&store), Rc::clone(&observed));
        store.subscribe(move |_| out.set(reader.with(|v| *v)));
        store.update(|v| *v = 9);

        assert_eq!(observed.get(), 9);
    }
}
