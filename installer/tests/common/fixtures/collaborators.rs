//! Test doubles for the prompt and status collaborators

use installer::services::{ConfirmationPrompt, RecordingStatusSink};
use installer::{Installer, InstallerConfig};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers with a fixed value and remembers every question asked.
pub struct ScriptedPrompt {
    answer: bool,
    questions: Mutex<Vec<(String, String)>>,
}

impl ScriptedPrompt {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            questions: Mutex::new(Vec::new()),
        })
    }

    pub fn questions(&self) -> Vec<(String, String)> {
        self.questions.lock().unwrap().clone()
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn confirm(&self, title: &str, question: &str) -> bool {
        self.questions
            .lock()
            .unwrap()
            .push((title.to_string(), question.to_string()));
        self.answer
    }
}

/// Blocks the calling thread inside `confirm` until released, like a
/// console waiting on stdin, then answers yes.
pub struct BlockingPrompt {
    asked: AtomicBool,
    release: Mutex<Receiver<()>>,
}

impl BlockingPrompt {
    pub fn new() -> (Arc<Self>, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let prompt = Arc::new(Self {
            asked: AtomicBool::new(false),
            release: Mutex::new(rx),
        });
        (prompt, tx)
    }

    pub fn was_asked(&self) -> bool {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmationPrompt for BlockingPrompt {
    fn confirm(&self, _title: &str, _question: &str) -> bool {
        self.asked.store(true, Ordering::SeqCst);
        let _ = self
            .release
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(10));
        true
    }
}

pub struct TestInstaller {
    pub installer: Installer,
    pub prompt: Arc<ScriptedPrompt>,
    pub status: Arc<RecordingStatusSink>,
}

pub fn create_test_installer(source: &Path, target: &Path, answer: bool) -> TestInstaller {
    let prompt = ScriptedPrompt::new(answer);
    let status = Arc::new(RecordingStatusSink::new());
    let config = InstallerConfig::new(source, target);
    let installer = Installer::new(&config, prompt.clone(), status.clone());
    TestInstaller {
        installer,
        prompt,
        status,
    }
}
