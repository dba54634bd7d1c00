//! Button input: edge-triggered "was pressed" events for the three
//! front-panel buttons.

use embedded_hal::digital::InputPin;

/// The three logical buttons, in the priority order they are honoured.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Button {
    Start,
    Stop,
    Info,
}

/// Buttons that went from released to pressed since the previous poll.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct ButtonEdges {
    pub start: bool,
    pub stop: bool,
    pub info: bool,
}

impl ButtonEdges {
    pub const NONE: Self = Self {
        start: false,
        stop: false,
        info: false,
    };

    pub fn pressed(button: Button) -> Self {
        let mut edges = Self::NONE;
        match button {
            Button::Start => edges.start = true,
            Button::Stop => edges.stop = true,
            Button::Info => edges.info = true,
        }
        edges
    }

    /// The single button honoured this poll: Start, then Stop, then Info.
    pub fn first(&self) -> Option<Button> {
        if self.start {
            Some(Button::Start)
        } else if self.stop {
            Some(Button::Stop)
        } else if self.info {
            Some(Button::Info)
        } else {
            None
        }
    }
}

/// Source of edge-triggered button events, polled once per tick.
pub trait ButtonInput {
    fn poll_edges(&mut self) -> ButtonEdges;
}

impl<T: ButtonInput + ?Sized> ButtonInput for &mut T {
    fn poll_edges(&mut self) -> ButtonEdges {
        (**self).poll_edges()
    }
}

/// Edge detector over three GPIO inputs.
///
/// Each poll samples the pin levels and reports the buttons whose level went
/// from released to pressed since the previous poll. A pin that fails to read
/// is treated as released. Debouncing is left to the hardware or the poll period.
pub struct ButtonPins<A, B, C> {
    start: A,
    stop: B,
    info: C,
    active_low: bool,
    held: [bool; 3],
}

impl<A, B, C> ButtonPins<A, B, C>
where
    A: InputPin,
    B: InputPin,
    C: InputPin,
{
    /// Buttons wired to ground with pull-ups, the usual front-panel wiring.
    pub fn active_low(start: A, stop: B, info: C) -> Self {
        Self::new(start, stop, info, true)
    }

    pub fn active_high(start: A, stop: B, info: C) -> Self {
        Self::new(start, stop, info, false)
    }

    fn new(start: A, stop: B, info: C, active_low: bool) -> Self {
        Self {
            start,
            stop,
            info,
            active_low,
            held: [false; 3],
        }
    }

    pub fn release(self) -> (A, B, C) {
        (self.start, self.stop, self.info)
    }

    fn is_pressed<P: InputPin>(pin: &mut P, active_low: bool) -> bool {
        let level = if active_low { pin.is_low() } else { pin.is_high() };
        level.unwrap_or(false)
    }
}

impl<A, B, C> ButtonInput for ButtonPins<A, B, C>
where
    A: InputPin,
    B: InputPin,
    C: InputPin,
{
    fn poll_edges(&mut self) -> ButtonEdges {
        let now = [
            Self::is_pressed(&mut self.start, self.active_low),
            Self::is_pressed(&mut self.stop, self.active_low),
            Self::is_pressed(&mut self.info, self.active_low),
        ];
        let edge = |i: usize| now[i] && !self.held[i];
        let edges = ButtonEdges {
            start: edge(0),
            stop: edge(1),
            info: edge(2),
        };
        self.held = now;
        edges
    }
}
