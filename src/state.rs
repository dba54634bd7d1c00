//! Recording state machine.
//!
//! | Button | From | To        | Display           |
//! |--------|------|-----------|-------------------|
//! | Start  | any  | Recording | "Start Recording" |
//! | Stop   | any  | Idle      | "Stop Recording"  |
//! | Info   | any  | unchanged | "C pressed"       |
//!
//! At most one button is honoured per poll (Start, then Stop, then Info).

use crate::buttons::{Button, ButtonEdges};
use crate::display::{INFO_MESSAGE, START_MESSAGE, STOP_MESSAGE};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
}

/// Result of feeding one poll's button edges to the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Transition {
    pub state: RecordingState,
    /// Status text to show, if a button was pressed.
    pub message: Option<&'static str>,
}

impl RecordingState {
    pub fn is_recording(&self) -> bool {
        *self == RecordingState::Recording
    }

    pub fn on_button(self, button: Button) -> Transition {
        let (state, message) = match button {
            Button::Start => (RecordingState::Recording, START_MESSAGE),
            Button::Stop => (RecordingState::Idle, STOP_MESSAGE),
            Button::Info => (self, INFO_MESSAGE),
        };
        Transition {
            state,
            message: Some(message),
        }
    }

    pub fn on_edges(self, edges: ButtonEdges) -> Transition {
        match edges.first() {
            Some(button) => self.on_button(button),
            None => Transition {
                state: self,
                message: None,
            },
        }
    }
}
