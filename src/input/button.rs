// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Edge-triggered digital input state machine.
//!
//! One [`ButtonState`] exists per mouse button or keyboard key. Device
//! events drive the `Up <-> Down` transitions and emit the one-shot
//! [`ButtonEvent::Pressed`] / [`ButtonEvent::Released`] edges; the
//! per-frame update appends exactly one level signal ([`ButtonEvent::Down`]
//! or [`ButtonEvent::Up`]) based on the state at that point.
//!
//! Events are a closed enum, so there is no "unknown event name" failure
//! mode: listeners are matched exhaustively at compile time.

/// A semantic button event for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// One-shot edge: the button transitioned Up -> Down.
    Pressed,
    /// One-shot edge: the button transitioned Down -> Up.
    Released,
    /// Level signal: the button is held this tick. Keyboard auto-repeat
    /// adds extra `Down` events at event time.
    Down,
    /// Level signal: the button is up this tick.
    Up,
}

/// The state of a single digital input.
///
/// Every emitted event carries a tick-wide sequence number, so events
/// spread over several buttons can be replayed in device arrival order.
#[derive(Debug, Default)]
pub struct ButtonState {
    is_down: bool,
    /// Events emitted so far this tick, in emission order.
    events: Vec<ButtonEvent>,
    /// Tick-wide sequence number of each emitted event.
    order: Vec<u64>,
}

impl ButtonState {
    pub fn is_down(&self) -> bool {
        self.is_down
    }

    pub fn is_up(&self) -> bool {
        !self.is_down
    }

    /// The events emitted this tick.
    pub fn events(&self) -> &[ButtonEvent] {
        &self.events
    }

    /// The events emitted this tick, paired with their tick-wide
    /// sequence numbers.
    pub fn ordered_events(&self) -> impl Iterator<Item = (u64, ButtonEvent)> + '_ {
        self.order.iter().copied().zip(self.events.iter().copied())
    }

    fn emit(&mut self, event: ButtonEvent, seq: &mut u64) {
        self.events.push(event);
        self.order.push(*seq);
        *seq += 1;
    }

    /// Clear last tick's events. Called at the start of every update.
    pub(crate) fn begin_tick(&mut self) {
        self.events.clear();
        self.order.clear();
    }

    /// Apply a device press. Fires `Pressed` only on the Up -> Down
    /// transition; a press while already down is a no-op.
    pub(crate) fn press(&mut self, seq: &mut u64) {
        if !self.is_down {
            self.is_down = true;
            self.emit(ButtonEvent::Pressed, seq);
        }
    }

    /// Apply a device release. Fires `Released` only on the Down -> Up
    /// transition.
    pub(crate) fn release(&mut self, seq: &mut u64) {
        if self.is_down {
            self.is_down = false;
            self.emit(ButtonEvent::Released, seq);
        }
    }

    /// Emit an event-time `Down` (keyboard key-down events, including
    /// OS auto-repeat, fire this on every occurrence).
    pub(crate) fn event_down(&mut self, seq: &mut u64) {
        self.emit(ButtonEvent::Down, seq);
    }

    /// Emit the once-per-frame level signal for the current state.
    pub(crate) fn level_signal(&mut self, seq: &mut u64) {
        let event = if self.is_down {
            ButtonEvent::Down
        } else {
            ButtonEvent::Up
        };
        self.emit(event, seq);
    }
}
