use log::{debug, info};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::{Ctx, Task};
use crate::dom::{Document, Element, NodeId};
use crate::scheduler::TimerId;

pub const SENDING_MESSAGE: &str = "Sending message...";
pub const SENT_MESSAGE: &str = "Message sent successfully!";

/// Field names read from the form, in validation order.
pub const FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }

    fn from_class(class: &str) -> Option<Self> {
        match class.strip_prefix("status--")? {
            "info" => Some(StatusKind::Info),
            "success" => Some(StatusKind::Success),
            "error" => Some(StatusKind::Error),
            _ => None,
        }
    }
}

/// Raw form values. Absent fields read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    MissingEmail,
    InvalidEmail,
    MissingSubject,
    MissingMessage,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "Please enter your name.",
            ValidationError::MissingEmail => "Please enter your email.",
            ValidationError::InvalidEmail => "Please enter a valid email address.",
            ValidationError::MissingSubject => "Please enter a subject.",
            ValidationError::MissingMessage => "Please enter your message.",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Browser whitespace: Unicode White_Space plus U+FEFF, minus U+0085.
fn is_form_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn is_blank(value: &str) -> bool {
    value.chars().all(is_form_space)
}

// `\s` widened and narrowed the same way as `is_form_space`.
const EMAIL_PATTERN: &str = r"^[^@\x{FEFF}[\s--\x{85}]]+@[^@\x{FEFF}[\s--\x{85}]]+\.[^@\x{FEFF}[\s--\x{85}]]+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Shape check only: something@something.something with no spaces or extra `@`.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// First failing rule wins: name, email presence, email shape, subject, message.
pub fn validate(msg: &ContactMessage) -> Result<(), ValidationError> {
    if is_blank(&msg.name) {
        return Err(ValidationError::MissingName);
    }
    if is_blank(&msg.email) {
        return Err(ValidationError::MissingEmail);
    }
    if !is_valid_email(&msg.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if is_blank(&msg.subject) {
        return Err(ValidationError::MissingSubject);
    }
    if is_blank(&msg.message) {
        return Err(ValidationError::MissingMessage);
    }
    Ok(())
}

/// Stable states of the form. Validation happens synchronously inside a
/// submit, so it never shows up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    /// "Sending message..." is shown; the timer finishes the mock send.
    Submitting(TimerId),
    /// Success is shown; the timer clears it.
    Submitted(TimerId),
}

/// Contact form with client-side validation and a simulated send.
/// Nothing is delivered anywhere.
#[derive(Debug)]
pub struct ContactFormController {
    form: Option<NodeId>,
    /// Field values as first loaded; a reset goes back to these.
    defaults: Vec<(NodeId, Option<String>)>,
    state: FormState,
}

impl ContactFormController {
    pub fn init(doc: &Document) -> Self {
        let form = doc.get_by_id("contact-form");
        let defaults = form
            .map(|f| {
                doc.find_all(f, is_field)
                    .into_iter()
                    .map(|n| (n, doc.get(n).attr("value").map(|v| v.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        ContactFormController {
            form,
            defaults,
            state: FormState::Idle,
        }
    }

    pub fn form(&self) -> Option<NodeId> {
        self.form
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Submit handler. Returns false when `node` is not the contact form.
    pub fn handle_submit(&mut self, node: NodeId, ctx: &mut Ctx) -> bool {
        let Some(form) = self.form.filter(|&f| f == node) else {
            return false;
        };
        // a resubmit abandons whatever the previous one still had queued
        match self.state {
            FormState::Submitting(t) | FormState::Submitted(t) => {
                ctx.timers.cancel(t);
            }
            FormState::Idle => {}
        }
        self.state = FormState::Idle;

        let msg = read_message(ctx.doc, form);
        self.clear_status(ctx.doc);

        if let Err(e) = validate(&msg) {
            debug!("Contact form rejected: {}", e);
            self.show_status(ctx.doc, e.message(), StatusKind::Error);
            return true;
        }

        self.show_status(ctx.doc, SENDING_MESSAGE, StatusKind::Info);
        let timer = ctx
            .timers
            .schedule(ctx.config.timing.submit_delay_ms, Task::FinishSubmission);
        self.state = FormState::Submitting(timer);
        true
    }

    /// Timer callback: the mock send completed.
    pub fn finish_submission(&mut self, ctx: &mut Ctx) {
        if self.form.is_none() || !matches!(self.state, FormState::Submitting(_)) {
            return;
        }
        self.clear_status(ctx.doc);
        self.show_status(ctx.doc, SENT_MESSAGE, StatusKind::Success);
        self.reset_fields(ctx.doc);
        info!("Contact message accepted (simulated delivery)");
        let timer = ctx
            .timers
            .schedule(ctx.config.timing.success_clear_ms, Task::ClearSubmissionStatus);
        self.state = FormState::Submitted(timer);
    }

    /// Timer callback: drop the success banner.
    pub fn clear_success(&mut self, doc: &mut Document) {
        if matches!(self.state, FormState::Submitted(_)) {
            self.clear_status(doc);
            self.state = FormState::Idle;
        }
    }

    fn clear_status(&self, doc: &mut Document) {
        if let Some(form) = self.form {
            for status in doc.find_all(form, |el| el.has_class("form-status")) {
                doc.remove(status);
            }
        }
    }

    /// Inserted right before the submit button; not shown at all without one.
    fn show_status(&self, doc: &mut Document, text: &str, kind: StatusKind) {
        let Some(form) = self.form else {
            return;
        };
        let submit = |el: &Element| el.tag() == "button" && el.attr("type") == Some("submit");
        let Some(button) = doc.find(form, submit) else {
            return;
        };
        let Some(parent) = doc.get(button).parent() else {
            return;
        };
        let status = doc.create("div");
        doc.add_class(status, "form-status");
        doc.add_class(status, "status");
        doc.add_class(status, &format!("status--{}", kind.as_str()));
        doc.set_text(status, text);
        doc.set_style(status, "margin-bottom", "var(--space-16)");
        doc.insert_before(parent, status, button);
    }

    /// Put every field back to the value it had when the page loaded.
    fn reset_fields(&self, doc: &mut Document) {
        for (field, default) in &self.defaults {
            match default {
                Some(v) => doc.set_attr(*field, "value", v),
                None => doc.remove_attr(*field, "value"),
            }
        }
    }

    /// Status messages currently inside the form.
    pub fn statuses(&self, doc: &Document) -> Vec<(StatusKind, String)> {
        let Some(form) = self.form else {
            return Vec::new();
        };
        doc.find_all(form, |el| el.has_class("form-status"))
            .into_iter()
            .filter_map(|n| {
                let el = doc.get(n);
                let kind = el.classes().iter().find_map(|c| StatusKind::from_class(c))?;
                Some((kind, el.text().unwrap_or("").to_string()))
            })
            .collect()
    }
}

fn is_field(el: &Element) -> bool {
    matches!(el.tag(), "input" | "textarea" | "select")
}

fn field(doc: &Document, form: NodeId, name: &str) -> Option<NodeId> {
    doc.find(form, |el| is_field(el) && el.attr("name") == Some(name))
}

/// Set a form field's value by name. Returns false when no such field exists.
pub fn fill_field(doc: &mut Document, form: NodeId, name: &str, value: &str) -> bool {
    match field(doc, form, name) {
        Some(f) => {
            doc.set_attr(f, "value", value);
            true
        }
        None => false,
    }
}

pub fn read_message(doc: &Document, form: NodeId) -> ContactMessage {
    let get = |name: &str| -> String {
        field(doc, form, name)
            .and_then(|f| doc.get(f).attr("value"))
            .unwrap_or("")
            .to_string()
    };
    ContactMessage {
        name: get(FIELDS[0]),
        email: get(FIELDS[1]),
        subject: get(FIELDS[2]),
        message: get(FIELDS[3]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(name: &str, email: &str, subject: &str, message: &str) -> ContactMessage {
        ContactMessage {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.example.co.uk"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email(" a@b.c"));
        assert!(!is_valid_email("a\u{feff}@b.c"));
        assert!(!is_valid_email("a@b.\u{feff}c"));
        // NEL is not whitespace to a browser
        assert!(is_valid_email("a\u{85}b@c.d"));
    }

    #[test]
    fn first_failure_wins() {
        assert_eq!(validate(&msg("", "", "", "")), Err(ValidationError::MissingName));
        assert_eq!(validate(&msg("  ", "a@b.c", "s", "m")), Err(ValidationError::MissingName));
        assert_eq!(validate(&msg("Ada", " ", "", "")), Err(ValidationError::MissingEmail));
        assert_eq!(validate(&msg("Ada", "ada", "", "")), Err(ValidationError::InvalidEmail));
        assert_eq!(validate(&msg("Ada", "a@b.c", "", "")), Err(ValidationError::MissingSubject));
        assert_eq!(validate(&msg("Ada", "a@b.c", "Hi", "\n")), Err(ValidationError::MissingMessage));
        assert_eq!(validate(&msg("Ada", "a@b.c", "Hi", "Hello")), Ok(()));
        assert_eq!(
            validate(&msg("\u{feff}", "a\u{feff}@b.c", "s", "m")),
            Err(ValidationError::MissingName)
        );
        assert_eq!(validate(&msg("Ada", "\u{feff} ", "", "")), Err(ValidationError::MissingEmail));
        assert_eq!(validate(&msg("Ada", "a\u{feff}@b.c", "s", "m")), Err(ValidationError::InvalidEmail));
        assert_eq!(validate(&msg("Ada", "a@b.c", "\u{85}", "m")), Ok(()));
    }

    #[test]
    fn error_messages_are_fixed() {
        assert_eq!(ValidationError::MissingName.to_string(), "Please enter your name.");
        assert_eq!(ValidationError::InvalidEmail.message(), "Please enter a valid email address.");
    }
}
