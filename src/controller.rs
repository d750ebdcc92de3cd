//! Poll List Controller
//!
//! Keeps the poll list shown in the page in sync with the poll service:
//! refreshes the current page of polls, creates polls from the form and
//! inserts the created poll at the top of the list.

use log::{debug, error, info};

use crate::commands::{page_index_from_label, Endpoints, HttpReply, HttpRequest, PollTransport};
use crate::error::{ClientError, ClientResult};
use crate::models::{ApiErrorPayload, Poll};
use crate::payload::FormPayload;
use crate::sequence::RequestSequence;

/// The page the controller works on
pub trait PollPage {
    /// Text of the current-page indicator
    fn page_label(&self) -> ClientResult<String>;

    /// Fields of the creation form
    fn form_payload(&self) -> ClientResult<FormPayload>;

    /// Replace the list contents with the children of the fragment's root element
    fn replace_list(&self, fragment: &str) -> ClientResult<()>;

    /// Insert the fragment's root element at the top of the list
    fn prepend_to_list(&self, fragment: &str) -> ClientResult<()>;

    fn show_failure(&self, message: &str);

    fn clear_failure(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The list now shows this page
    Applied { page: u32 },
    /// A newer refresh was issued meanwhile; the response was dropped
    Stale { page: u32 },
}

pub struct PollListController<P, T> {
    page: P,
    transport: T,
    endpoints: Endpoints,
    list_sequence: RequestSequence,
}

impl<P: PollPage, T: PollTransport> PollListController<P, T> {
    pub fn new(page: P, transport: T, endpoints: Endpoints) -> Self {
        Self {
            page,
            transport,
            endpoints,
            list_sequence: RequestSequence::new(),
        }
    }

    /// Reload the page of polls the indicator points at
    pub async fn refresh_list(&self) -> ClientResult<RefreshOutcome> {
        let label = self.page.page_label()?;
        let page = page_index_from_label(&label)?;
        let token = self.list_sequence.issue();
        let url = self.endpoints.fragment_page_url(page);
        debug!("refreshing list from {}", url);

        let reply = self.transport.send(HttpRequest::get(url.as_str())).await;
        if !self.list_sequence.is_current(token) {
            debug!("dropping stale response for page {}", page);
            return Ok(RefreshOutcome::Stale { page });
        }

        let fragment = fragment_body(reply?, &url)?;
        self.page.replace_list(&fragment)?;
        Ok(RefreshOutcome::Applied { page })
    }

    /// Show a freshly created poll without reloading the list
    pub async fn append_created_poll(&self, poll: &Poll) -> ClientResult<()> {
        info!("adding poll #{} to the list", poll.id);
        let url = self.endpoints.fragment_item_url(poll.id);
        let reply = self.transport.send(HttpRequest::get(url.as_str())).await?;
        let fragment = fragment_body(reply, &url)?;
        self.page.prepend_to_list(&fragment)
    }

    /// Send the creation form as JSON, then show the created poll
    pub async fn submit_create_poll(&self) -> ClientResult<Poll> {
        let body = self.page.form_payload()?.to_json()?;
        debug!("sending poll to server: {}", body);

        let request = HttpRequest::post_json(self.endpoints.polls_api_url(), body);
        let reply = self.transport.send(request).await?;
        if !reply.is_success() {
            return Err(ClientError::Rejected {
                status: reply.status,
                payload: ApiErrorPayload::from_body(&reply.body),
            });
        }

        let poll: Poll = serde_json::from_str(&reply.body)?;
        info!("poll #{} created: {:?}", poll.id, poll);
        self.append_created_poll(&poll).await?;
        Ok(poll)
    }

    // ========================
    // Event entry points
    // ========================

    /// Refresh button handler
    pub async fn on_refresh(&self) -> ClientResult<RefreshOutcome> {
        let result = self.refresh_list().await;
        match &result {
            Ok(RefreshOutcome::Applied { .. }) => self.page.clear_failure(),
            Ok(RefreshOutcome::Stale { .. }) => {}
            Err(e) => self.report("list refresh", e),
        }
        result
    }

    /// Creation form handler
    pub async fn on_create(&self) -> ClientResult<Poll> {
        let result = self.submit_create_poll().await;
        match &result {
            Ok(_) => self.page.clear_failure(),
            Err(e) => self.report("poll creation", e),
        }
        result
    }

    fn report(&self, action: &str, err: &ClientError) {
        error!("{} failed: {}", action, err);
        self.page.show_failure(&err.to_string());
    }
}

fn fragment_body(reply: HttpReply, url: &str) -> ClientResult<String> {
    if reply.is_success() {
        Ok(reply.body)
    } else {
        Err(ClientError::Status {
            status: reply.status,
            url: url.to_string(),
        })
    }
}
