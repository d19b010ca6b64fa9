// File: installer/src/services/collaborators.rs
use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use tracing::{info, warn};

/// Asks the user a yes/no question.
///
/// Declining and dismissing the question are the same answer: `false`.
/// Implementations may block; the installer calls them off the async
/// worker threads.
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, title: &str, question: &str) -> bool;
}

/// Receives human-readable status text while the installer works.
pub trait StatusSink: Send + Sync {
    fn show_message(&self, message: &str);
}

/// Asks on the terminal and waits for a `y`/`yes` answer.
///
/// Blocks the calling thread until a line is read.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl ConfirmationPrompt for ConsolePrompt {
    fn confirm(&self, title: &str, question: &str) -> bool {
        let mut stdout = io::stdout().lock();
        if writeln!(stdout, "{}\n{} [y/N] ", title, question)
            .and_then(|_| stdout.flush())
            .is_err()
        {
            warn!("Could not write confirmation prompt to stdout");
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                warn!("Could not read confirmation answer: {}", e);
                false
            }
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Answers every question the same way without asking anyone.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmationPrompt for AutoConfirm {
    fn confirm(&self, title: &str, question: &str) -> bool {
        info!(
            "{}: {} -> {}",
            title,
            question.replace('\n', " "),
            if self.0 { "yes" } else { "no" }
        );
        self.0
    }
}

/// Forwards status text to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn show_message(&self, message: &str) {
        info!("{}", message);
    }
}

/// Keeps every status message in arrival order.
#[derive(Debug, Default)]
pub struct RecordingStatusSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl StatusSink for RecordingStatusSink {
    fn show_message(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
