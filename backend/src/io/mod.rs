//! Collaborator interfaces the domain consumes: a form-field reader, a
//! blocking yes/no confirmation prompt, and a notification presenter.
//! Terminal implementations back the binary; tests supply scripted ones.

use shared::BookingRequest;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};

/// Maps named form fields to trimmed string values
pub trait FormReader {
    /// Trimmed value of a named field; `None` when the field is absent
    fn field(&self, name: &str) -> Option<String>;
}

/// Blocking yes/no prompt, answered before the calling operation proceeds
pub trait ConfirmationPrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Presents a titled notification to the user
pub trait NotificationPresenter {
    fn notify(&self, title: &str, message: &str);
}

/// FormReader over a map of already-collected answers
#[derive(Debug, Default, Clone)]
pub struct MapFormReader {
    fields: HashMap<String, String>,
}

impl MapFormReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }
}

impl FormReader for MapFormReader {
    fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(|v| v.trim().to_string())
    }
}

/// Assemble a booking request from the form reader's named fields
pub fn read_booking_request(reader: &dyn FormReader) -> BookingRequest {
    let field = |name: &str| reader.field(name).unwrap_or_default();

    BookingRequest {
        name: field("name"),
        email: field("email"),
        phone: field("phone"),
        service: field("service"),
        modality: field("modality"),
        notes: field("notes"),
    }
}

/// Terminal confirmation prompt; accepts `y` or `yes`
pub struct ConsolePrompt;

impl ConfirmationPrompt for ConsolePrompt {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Terminal notification presenter
pub struct ConsoleNotifier;

impl NotificationPresenter for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) {
        println!("\n=== {} ===\n{}\n", title, message);
    }
}
