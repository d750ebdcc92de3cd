//! DOM Page
//!
//! `PollPage` over the live document: the page indicator, the creation
//! form and the poll list container. Server fragments are parsed in an
//! inert `<template>` and stripped of scripts and inline handlers before
//! they reach the list.

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DocumentFragment, Element, FormData, HtmlFormElement, HtmlTemplateElement};

use crate::components::FailureIndicator;
use crate::config::ClientConfig;
use crate::controller::PollPage;
use crate::error::{js_message, ClientError, ClientResult};
use crate::payload::FormPayload;

pub struct DomPage {
    document: Document,
    list_id: String,
    form_id: String,
    page_indicator_selector: String,
    failure: FailureIndicator,
}

impl DomPage {
    pub fn new(document: Document, config: &ClientConfig) -> ClientResult<Self> {
        let list = element_by_id(&document, &config.list_container_id)?;
        let failure = FailureIndicator::mount_before(
            &document,
            &list,
            &config.failure_indicator_id,
            config.failure_dismiss_ms,
        )?;
        Ok(Self {
            document,
            list_id: config.list_container_id.clone(),
            form_id: config.create_form_id.clone(),
            page_indicator_selector: config.page_indicator_selector.clone(),
            failure,
        })
    }

    fn list(&self) -> ClientResult<Element> {
        element_by_id(&self.document, &self.list_id)
    }
}

impl PollPage for DomPage {
    fn page_label(&self) -> ClientResult<String> {
        let indicator = self
            .document
            .query_selector(&self.page_indicator_selector)
            .map_err(dom_err)?
            .ok_or_else(|| ClientError::MissingElement(self.page_indicator_selector.clone()))?;
        Ok(indicator.text_content().unwrap_or_default())
    }

    fn form_payload(&self) -> ClientResult<FormPayload> {
        let form: HtmlFormElement = element_by_id(&self.document, &self.form_id)?
            .dyn_into()
            .map_err(|_| ClientError::Dom(format!("#{} is not a form", self.form_id)))?;
        let data = FormData::new_with_form(&form).map_err(dom_err)?;
        let entries = js_sys::try_iter(data.as_ref())
            .map_err(dom_err)?
            .ok_or_else(|| ClientError::Dom("form data is not iterable".to_string()))?;

        let mut payload = FormPayload::new();
        for entry in entries {
            let pair: js_sys::Array = entry.map_err(dom_err)?.unchecked_into();
            let name = pair.get(0).as_string().unwrap_or_default();
            match pair.get(1).as_string() {
                Some(value) => payload.insert(name, value),
                None => debug!("skipping non-text form field {}", name),
            }
        }
        Ok(payload)
    }

    fn replace_list(&self, fragment: &str) -> ClientResult<()> {
        let root = parse_fragment(&self.document, fragment)?;
        let list = self.list()?;
        list.replace_children_with_node_0();
        while let Some(child) = root.first_child() {
            list.append_child(&child).map_err(dom_err)?;
        }
        Ok(())
    }

    fn prepend_to_list(&self, fragment: &str) -> ClientResult<()> {
        let root = parse_fragment(&self.document, fragment)?;
        self.list()?.prepend_with_node_1(&root).map_err(dom_err)
    }

    fn show_failure(&self, message: &str) {
        self.failure.show(message);
    }

    fn clear_failure(&self) {
        self.failure.clear();
    }
}

pub fn element_by_id(document: &Document, id: &str) -> ClientResult<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ClientError::MissingElement(format!("#{}", id)))
}

/// First element of a server fragment, with active content removed
pub fn parse_fragment(document: &Document, html: &str) -> ClientResult<Element> {
    let template: HtmlTemplateElement = document
        .create_element("template")
        .map_err(dom_err)?
        .dyn_into()
        .map_err(|_| ClientError::Dom("template element unsupported".to_string()))?;
    template.set_inner_html(html);

    let content = template.content();
    strip_active_content(&content)?;
    content.first_element_child().ok_or(ClientError::EmptyFragment)
}

fn strip_active_content(fragment: &DocumentFragment) -> ClientResult<()> {
    // querySelectorAll lists are static, removing while iterating is fine
    let scripts = fragment.query_selector_all("script").map_err(dom_err)?;
    for i in 0..scripts.length() {
        if let Some(script) = scripts.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            script.remove();
        }
    }

    let elements = fragment.query_selector_all("*").map_err(dom_err)?;
    for i in 0..elements.length() {
        let Some(element) = elements.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        for name in element.get_attribute_names().iter().filter_map(|n| n.as_string()) {
            let value = element.get_attribute(&name).unwrap_or_default();
            if is_active_attribute(&name, &value) {
                let _ = element.remove_attribute(&name);
            }
        }
    }
    Ok(())
}

const URL_ATTRIBUTES: [&str; 5] = ["href", "src", "action", "formaction", "xlink:href"];

/// Event handlers, or a URL attribute pointing at `javascript:`
fn is_active_attribute(name: &str, value: &str) -> bool {
    if is_event_handler_attribute(name) {
        return true;
    }
    URL_ATTRIBUTES.iter().any(|url| name.eq_ignore_ascii_case(url)) && is_script_url(value)
}

/// `onclick`, `ONLOAD`, ...
fn is_event_handler_attribute(name: &str) -> bool {
    name.len() > 2 && name.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

/// Browsers drop whitespace and control characters before reading the scheme
fn is_script_url(value: &str) -> bool {
    let scheme: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take("javascript:".len())
        .collect();
    scheme.eq_ignore_ascii_case("javascript:")
}

fn dom_err(e: JsValue) -> ClientError {
    ClientError::Dom(js_message(&e))
}
