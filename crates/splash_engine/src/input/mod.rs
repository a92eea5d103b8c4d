//! Input: platform-neutral events and controller feedback

pub mod haptics;

pub use haptics::{PeripheralError, RumbleDevice};

use std::collections::VecDeque;

/// Input events the frame loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the application
    Quit,

    /// A button was pressed on a joystick / game controller
    ControllerButtonDown {
        /// Instance id of the device
        which: u32,
        /// Button index
        button: u8,
    },

    /// Any event the application ignores
    Other,
}

/// Source of pending input events
pub trait EventSource {
    /// Next pending event, or `None` once the queue is drained for this frame
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Replays scripted events frame by frame
///
/// Each inner batch is delivered during one frame: its events are returned
/// in order, then `None` ends the frame. Once all batches are spent the
/// source keeps reporting [`InputEvent::Quit`], so a scripted run always
/// terminates.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<Option<InputEvent>>,
    polled: usize,
}

impl ScriptedEvents {
    /// Build from per-frame batches
    pub fn from_frames<I, F>(frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = InputEvent>,
    {
        let mut queue = VecDeque::new();
        for frame in frames {
            queue.extend(frame.into_iter().map(Some));
            queue.push_back(None);
        }
        Self { queue, polled: 0 }
    }

    /// Number of events handed out so far
    pub const fn polled(&self) -> usize {
        self.polled
    }
}

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self) -> Option<InputEvent> {
        let event = self.queue.pop_front().unwrap_or(Some(InputEvent::Quit));
        if event.is_some() {
            self.polled += 1;
        }
        event
    }
}
