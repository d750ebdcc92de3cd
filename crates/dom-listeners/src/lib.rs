//! DOM Listener Utilities
//!
//! Owned event listeners for wasm frontends.
//! A listener stays attached for as long as its handle lives; dropping the
//! handle detaches the callback from its target.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget};

/// An event listener attached to a DOM target
pub struct EventListener {
    target: EventTarget,
    event_type: String,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Attach `handler` to `target` for events of type `event_type`
    pub fn new<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type: event_type.to_string(),
            callback,
        })
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            &self.event_type,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// A group of listeners detached together
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<EventListener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Number of listeners registered for `event_type`
    pub fn count_of(&self, event_type: &str) -> usize {
        self.listeners.iter().filter(|l| l.event_type() == event_type).count()
    }
}

/// A callback that runs at most once, however many times it is fired
pub struct OnceCallback<F: FnOnce()> {
    inner: Option<F>,
}

impl<F: FnOnce()> OnceCallback<F> {
    pub fn new(callback: F) -> Self {
        Self { inner: Some(callback) }
    }

    /// Run the callback if it has not run yet. Returns whether it ran.
    pub fn fire(&mut self) -> bool {
        match self.inner.take() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

/// Run `on_complete` once the document is fully loaded.
///
/// Runs immediately when the document is already complete and returns
/// `None`. Otherwise returns the `readystatechange` listener, which must be
/// kept alive until the document completes.
pub fn when_document_complete<F>(document: &Document, on_complete: F) -> Result<Option<EventListener>, JsValue>
where
    F: FnOnce() + 'static,
{
    let mut once = OnceCallback::new(on_complete);
    if document.ready_state() == "complete" {
        once.fire();
        return Ok(None);
    }

    let doc = document.clone();
    let listener = EventListener::new(document.as_ref(), "readystatechange", move |_ev: Event| {
        if doc.ready_state() == "complete" {
            once.fire();
        }
    })?;
    Ok(Some(listener))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_once_callback_runs_once() {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let mut once = OnceCallback::new(move || counter.set(counter.get() + 1));

        assert!(once.fire());
        assert!(!once.fire());
        assert!(!once.fire());
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_empty_listener_set() {
        let set = ListenerSet::new();
        assert_eq!(set.count_of("click"), 0);
        assert_eq!(set.count_of("submit"), 0);
    }
}
