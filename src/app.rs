//! Sondages Frontend App
//!
//! Binds the refresh button and the creation form to the poll list
//! controller once the document has fully loaded.

use std::cell::RefCell;
use std::rc::Rc;

use dom_listeners::{when_document_complete, EventListener, ListenerSet};
use leptos::task::spawn_local;
use log::{debug, error, info};
use web_sys::{Document, Event};

use crate::commands::{Endpoints, FetchTransport};
use crate::config::ClientConfig;
use crate::controller::PollListController;
use crate::dom::{element_by_id, DomPage};
use crate::error::{js_message, ClientError, ClientResult};

pub type Controller = PollListController<DomPage, FetchTransport>;

/// Keeps the page bound. Dropping it removes every listener.
pub struct ControllerHandle {
    bound: Rc<RefCell<Option<ListenerSet>>>,
    readiness: Option<EventListener>,
}

impl ControllerHandle {
    /// Leave the page bound for the lifetime of the document
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for ControllerHandle {
    fn drop(&mut self) {
        self.readiness.take();
        if let Some(listeners) = self.bound.borrow_mut().take() {
            info!(
                "removing {} click and {} submit listener(s)",
                listeners.count_of("click"),
                listeners.count_of("submit")
            );
        }
    }
}

/// Bind the page's controls once the document is complete
pub fn start(config: ClientConfig) -> ClientResult<ControllerHandle> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ClientError::Dom("no document".to_string()))?;

    let bound = Rc::new(RefCell::new(None));
    let slot = bound.clone();
    let doc = document.clone();
    let readiness = when_document_complete(&document, move || {
        if slot.borrow().is_some() {
            return;
        }
        match bind(&doc, &config) {
            Ok(listeners) => *slot.borrow_mut() = Some(listeners),
            Err(e) => error!("poll list controls not bound: {}", e),
        }
    })
    .map_err(|e| ClientError::Dom(js_message(&e)))?;

    Ok(ControllerHandle { bound, readiness })
}

fn bind(document: &Document, config: &ClientConfig) -> ClientResult<ListenerSet> {
    let refresh_button = element_by_id(document, &config.refresh_button_id)?;
    let form = element_by_id(document, &config.create_form_id)?;
    let page = DomPage::new(document.clone(), config)?;
    let controller: Rc<Controller> = Rc::new(PollListController::new(
        page,
        FetchTransport,
        Endpoints::from_config(config),
    ));

    let mut listeners = ListenerSet::new();

    let ctl = controller.clone();
    let on_click = EventListener::new(refresh_button.as_ref(), "click", move |_ev: Event| {
        let ctl = ctl.clone();
        spawn_local(async move {
            let _ = ctl.on_refresh().await;
        });
    })
    .map_err(|e| ClientError::Dom(js_message(&e)))?;
    listeners.push(on_click);

    let ctl = controller;
    let on_submit = EventListener::new(form.as_ref(), "submit", move |ev: Event| {
        // the form is sent by fetch, never by the browser
        ev.prevent_default();
        let ctl = ctl.clone();
        spawn_local(async move {
            let _ = ctl.on_create().await;
        });
    })
    .map_err(|e| ClientError::Dom(js_message(&e)))?;
    listeners.push(on_submit);

    debug!(
        "bound {} click and {} submit listener(s)",
        listeners.count_of("click"),
        listeners.count_of("submit")
    );
    info!("poll list controls bound");
    Ok(listeners)
}
