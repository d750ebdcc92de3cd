//! Failure Banner Component
//!
//! Inline message shown above the poll list when a list update fails.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::mount::mount_to;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::{js_message, ClientError, ClientResult};
use crate::sequence::{RequestSequence, SequenceToken};

/// Dismissable alert bound to a message signal. Hidden while the message is `None`.
#[component]
pub fn FailureBanner(message: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="sondages-erreur" role="alert">
                <span class="sondages-erreur-message">{move || message.get().unwrap_or_default()}</span>
                <button
                    type="button"
                    class="sondages-erreur-fermer"
                    title="Fermer"
                    on:click=move |_| message.set(None)
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}

/// Banner text plus the sequence deciding which auto-hide timer may clear it
#[derive(Clone)]
struct BannerMessage {
    text: RwSignal<Option<String>>,
    shown: Rc<RequestSequence>,
}

impl BannerMessage {
    fn new() -> Self {
        Self {
            text: RwSignal::new(None),
            shown: Rc::new(RequestSequence::new()),
        }
    }

    fn show(&self, text: &str) -> SequenceToken {
        let token = self.shown.issue();
        self.text.set(Some(text.to_string()));
        token
    }

    fn clear(&self) {
        self.shown.issue();
        self.text.set(None);
    }

    /// Hide the message shown under `token` unless a later show or clear replaced it
    fn expire(&self, token: SequenceToken) -> bool {
        if !self.shown.is_current(token) {
            return false;
        }
        let _ = self.text.try_set(None);
        true
    }
}

/// A mounted `FailureBanner` and its host element
pub struct FailureIndicator {
    host: HtmlElement,
    /// Host was created here (and is removed on drop)
    owns_host: bool,
    message: BannerMessage,
    dismiss_ms: u32,
}

impl FailureIndicator {
    /// Mount into `#host_id`, creating it right before `anchor` if the page has none
    pub fn mount_before(document: &Document, anchor: &Element, host_id: &str, dismiss_ms: u32) -> ClientResult<Self> {
        let (host, owns_host) = match document.get_element_by_id(host_id) {
            Some(existing) => (existing, false),
            None => {
                let created = document
                    .create_element("div")
                    .map_err(|e| ClientError::Dom(js_message(&e)))?;
                created.set_id(host_id);
                anchor
                    .before_with_node_1(&created)
                    .map_err(|e| ClientError::Dom(js_message(&e)))?;
                (created, true)
            }
        };
        let host: HtmlElement = host
            .dyn_into()
            .map_err(|_| ClientError::Dom(format!("#{} is not an HTML element", host_id)))?;

        let message = BannerMessage::new();
        let text = message.text;
        mount_to(host.clone(), move || view! { <FailureBanner message=text /> }).forget();

        Ok(Self {
            host,
            owns_host,
            message,
            dismiss_ms,
        })
    }

    pub fn show(&self, text: &str) {
        let token = self.message.show(text);

        if self.dismiss_ms > 0 {
            let message = self.message.clone();
            let delay = self.dismiss_ms;
            spawn_local(async move {
                TimeoutFuture::new(delay).await;
                message.expire(token);
            });
        }
    }

    pub fn clear(&self) {
        self.message.clear();
    }
}

impl Drop for FailureIndicator {
    fn drop(&mut self) {
        self.message.clear();
        if self.owns_host {
            self.host.remove();
        } else {
            self.host.set_inner_html("");
        }
    }
}
