//! Dashboard page state driven by host commands.
//!
//! The dashboard session receives DOM input events and page commands on the
//! same line-oriented stream. Lines that are not input events parse as a
//! [`ViewCommand`] and are applied to a [`DashboardView`].

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use tokio::time::Instant;

use teamconnect_core::config::NotificationsConfig;
use teamconnect_core::error::AppError;
use teamconnect_core::traits::Clock;

use crate::forms::{MessageForm, SubmitButton};
use crate::notifications::NotificationCenter;
use crate::sidebar::{ClickTarget, MobileSidebar};
use crate::tabs::TabSet;

/// Viewport width assumed until the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// Listing tabs on the dashboard, in display order.
pub const DASHBOARD_TABS: [&str; 3] = ["files", "snippets", "messages"];

/// Forms with a submit button, and the label each button shows.
const FORMS: [(&str, &str); 3] = [
    ("upload", "Upload File"),
    ("code", "Share Code"),
    ("message", "Post Message"),
];

/// A page command from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// `resize <width>`
    Resize(u32),
    /// `click nav|sidebar|outside`
    Click(ClickTarget),
    /// `message-form`
    ToggleMessageForm,
    /// `copy ok|failed`
    CodeCopied(bool),
    /// `submit <form>`
    Submit(String),
    /// `tab <id>`
    SwitchTab(String),
}

impl FromStr for ViewCommand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        let missing = || AppError::validation(format!("'{name}' needs an argument"));
        let command = match name {
            "resize" => {
                let width = arg.ok_or_else(missing)?;
                let width = width
                    .parse()
                    .map_err(|_| AppError::validation(format!("Invalid width '{width}'")))?;
                Self::Resize(width)
            }
            "click" => match arg.ok_or_else(missing)? {
                "nav" => Self::Click(ClickTarget::NavButton),
                "sidebar" => Self::Click(ClickTarget::Sidebar),
                "outside" => Self::Click(ClickTarget::Outside),
                other => {
                    return Err(AppError::validation(format!(
                        "Unknown click target '{other}'"
                    )));
                }
            },
            "message-form" if arg.is_none() => Self::ToggleMessageForm,
            "copy" => match arg.ok_or_else(missing)? {
                "ok" => Self::CodeCopied(true),
                "failed" => Self::CodeCopied(false),
                other => {
                    return Err(AppError::validation(format!(
                        "Unknown copy result '{other}'"
                    )));
                }
            },
            "submit" => Self::Submit(arg.ok_or_else(missing)?.to_string()),
            "tab" => Self::SwitchTab(arg.ok_or_else(missing)?.to_string()),
            "message-form" => {
                return Err(AppError::validation("'message-form' takes no argument"));
            }
            other => {
                return Err(AppError::validation(format!("Unknown command '{other}'")));
            }
        };

        if parts.next().is_some() {
            return Err(AppError::validation(format!(
                "Too many arguments for '{name}'"
            )));
        }
        Ok(command)
    }
}

/// Everything on the dashboard page that is not the listing itself.
#[derive(Debug)]
pub struct DashboardView {
    clock: Arc<dyn Clock>,
    sidebar: MobileSidebar,
    message_form: MessageForm,
    submit_buttons: BTreeMap<&'static str, SubmitButton>,
    tabs: TabSet,
    notifications: NotificationCenter,
}

impl DashboardView {
    /// Page as first rendered: sidebar closed, message form hidden, every
    /// submit button enabled, first tab active.
    pub fn new(clock: Arc<dyn Clock>, notifications: &NotificationsConfig) -> Self {
        let mut tabs = TabSet::new(DASHBOARD_TABS);
        tabs.switch(DASHBOARD_TABS[0]);

        Self {
            notifications: NotificationCenter::from_config(Arc::clone(&clock), notifications),
            clock,
            sidebar: MobileSidebar::new(DEFAULT_VIEWPORT_WIDTH),
            message_form: MessageForm::new(),
            submit_buttons: FORMS
                .iter()
                .map(|(form, label)| (*form, SubmitButton::new(*label)))
                .collect(),
            tabs,
        }
    }

    /// Apply a host command.
    pub fn apply(&mut self, command: ViewCommand) -> Result<(), AppError> {
        match command {
            ViewCommand::Resize(width) => self.sidebar.resize(width),
            ViewCommand::Click(target) => self.sidebar.click(target),
            ViewCommand::ToggleMessageForm => {
                if self.message_form.toggle() {
                    tracing::debug!("Message form opened");
                }
            }
            ViewCommand::CodeCopied(copied) => {
                self.notifications.code_copied(copied);
            }
            ViewCommand::Submit(form) => {
                let button = self
                    .submit_buttons
                    .get_mut(form.as_str())
                    .ok_or_else(|| AppError::validation(format!("Unknown form '{form}'")))?;
                button.submit(self.clock.now());
            }
            ViewCommand::SwitchTab(id) => {
                if !self.tabs.switch(&id) {
                    return Err(AppError::validation(format!("Unknown tab '{id}'")));
                }
            }
        }
        Ok(())
    }

    /// Expire toasts and re-enable submit buttons due at `now`.
    pub fn redraw(&mut self, now: Instant) {
        for toast in self.notifications.prune(now) {
            tracing::debug!("Toast #{} dismissed", toast.id);
        }
        for (form, button) in &mut self.submit_buttons {
            if button.poll(now) {
                tracing::debug!("Submit button of '{}' re-enabled", form);
            }
        }
    }

    /// Sidebar state.
    pub fn sidebar(&self) -> &MobileSidebar {
        &self.sidebar
    }

    /// Message form state.
    pub fn message_form(&self) -> &MessageForm {
        &self.message_form
    }

    /// Submit button of `form`.
    pub fn submit_button(&self, form: &str) -> Option<&SubmitButton> {
        self.submit_buttons.get(form)
    }

    /// Listing tabs.
    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    /// Toasts.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Toasts, for showing new ones.
    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }
}
