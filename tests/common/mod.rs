pub mod fixtures;

use ctxpath::{ContextCommands, Notifier, StaticHost};
use std::sync::{Arc, Mutex};

/// Notifier that keeps every message for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Commands over the fixture context and window, with a recording notifier.
pub fn fixture_commands() -> (ContextCommands<StaticHost>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let host = StaticHost::new(fixtures::app_context(), fixtures::window());
    (ContextCommands::new(host, notifier.clone()), notifier)
}
