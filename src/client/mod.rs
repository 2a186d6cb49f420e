//! The list editor: item state, selection and submission to `/api/webhook`.

mod cookie;
mod http;

pub use cookie::{CookieError, PasswordCookie, PasswordStore};
pub use http::HttpTransport;

use rocket::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::types::{Item, WebhookPayload, default_items};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Server rejected the password")]
    Unauthorized,

    #[error("{0}")]
    Failed(String),
}

/// Sends a payload to the forwarding endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &WebhookPayload) -> Result<(), TransportError>;
}

/// Why a submission did not go through. `Display` is the user-facing notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Select at least one item")]
    NothingSelected,

    #[error("Enter the password")]
    MissingPassword,

    #[error("A submission is already in progress")]
    InFlight,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Failed to send")]
    Failed,
}

#[derive(Debug, Clone)]
pub struct ListEditor {
    items: Vec<Item>,
    input: String,
    password: String,
    submitting: bool,
}

impl Default for ListEditor {
    fn default() -> Self {
        Self::with_items(default_items())
    }
}

impl ListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            input: String::new(),
            password: String::new(),
            submitting: false,
        }
    }

    /// Pre-fills the password from a previous successful submission, if any.
    pub fn restore_password(&mut self, store: &impl PasswordStore) {
        match store.load() {
            Ok(Some(password)) => self.password = password,
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable password cookie: {e}"),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Appends an unselected item named `name.trim()`. Blank names are ignored.
    pub fn add_item(&mut self, name: &str) -> Option<&Item> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.items.push(Item::new(name));
        self.items.last()
    }

    /// Adds the input field's text as an item, clearing the field on success.
    pub fn commit_input(&mut self) -> Option<&Item> {
        let name = std::mem::take(&mut self.input);
        if name.trim().is_empty() {
            self.input = name;
            return None;
        }
        self.add_item(&name)
    }

    pub fn toggle_item(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.is_selected = !item.is_selected;
        }
    }

    /// Toggles the first item called `name`, returning its id.
    pub fn toggle_by_name(&mut self, name: &str) -> Option<String> {
        let id = self.items.iter().find(|item| item.name == name)?.id.clone();
        self.toggle_item(&id);
        Some(id)
    }

    /// Names of the selected items, in list order.
    pub fn selected_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.is_selected)
            .map(|item| item.name.clone())
            .collect()
    }

    /// Checks preconditions and marks a submission as in flight.
    pub fn begin_submit(&mut self) -> Result<WebhookPayload, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }

        let items = self.selected_names();
        if items.is_empty() {
            return Err(SubmitError::NothingSelected);
        }
        if self.password.is_empty() {
            return Err(SubmitError::MissingPassword);
        }

        self.submitting = true;
        Ok(WebhookPayload {
            items,
            password: self.password.clone(),
        })
    }

    /// Applies the outcome of a submission started with [`ListEditor::begin_submit`].
    pub fn finish_submit(
        &mut self,
        outcome: Result<(), TransportError>,
        store: &mut impl PasswordStore,
    ) -> Result<(), SubmitError> {
        self.submitting = false;

        match outcome {
            Ok(()) => {
                if let Err(e) = store.save(&self.password) {
                    warn!("Failed to persist password cookie: {e}");
                }
                for item in &mut self.items {
                    item.is_selected = false;
                }
                Ok(())
            }
            Err(TransportError::Unauthorized) => Err(SubmitError::WrongPassword),
            Err(TransportError::Failed(reason)) => {
                warn!("Error sending webhook: {reason}");
                Err(SubmitError::Failed)
            }
        }
    }

    pub async fn submit(
        &mut self,
        transport: &impl Transport,
        store: &mut impl PasswordStore,
    ) -> Result<(), SubmitError> {
        let payload = self.begin_submit()?;
        let outcome = transport.send(&payload).await;
        self.finish_submit(outcome, store)?;
        info!("Submitted {} item(s)", payload.items.len());
        Ok(())
    }
}
