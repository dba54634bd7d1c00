/// A local status display able to show a short line of text.
///
/// Each call replaces whatever was shown before.
pub trait StatusDisplay {
    fn show_message(&mut self, text: &str);
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for &mut T {
    fn show_message(&mut self, text: &str) {
        (**self).show_message(text)
    }
}

/// Shown once when the recorder starts.
pub const WELCOME_MESSAGE: &str = "Hello,\nWork Monitoring System!";
/// Shown when the Start button opens a session.
pub const START_MESSAGE: &str = "Start Recording";
/// Shown when the Stop button ends a session.
pub const STOP_MESSAGE: &str = "Stop Recording";
/// Shown when the Info button is pressed.
pub const INFO_MESSAGE: &str = "C pressed";
/// Shown when the recorder continues without its persistent log.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str = "Storage unavailable";
