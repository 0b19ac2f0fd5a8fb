// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Input registry: raw device events in, semantic button events out.
//!
//! The host shell queues [`RawEvent`]s as they arrive; the tick loop
//! drains them (in arrival order) once per frame via [`Input::update`],
//! which also emits the per-frame level signal for every known button.
//! An event for a button or key nobody has looked up yet is dropped --
//! buttons are created lazily on first lookup and live for the process
//! lifetime.

pub mod button;

pub use button::{ButtonEvent, ButtonState};

use crate::geometry::clamp_point;
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};
use std::collections::HashMap;

// ===== Identifiers =====

/// Mouse button identifiers, in the conventional device order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Main,
    Auxiliary,
    Secondary,
    Fourth,
    Fifth,
}

/// Keyboard keys the core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Tab,
    Enter,
    Shift,
    Control,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    LeftArrow,
    UpArrow,
    RightArrow,
    DownArrow,
    Insert,
    Delete,
}

// ===== Raw events =====

/// A device event as delivered by the host shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// Pointer moved; position is in device/global pixels.
    PointerMoved { pos: Point },
    MousePressed { button: MouseButton },
    MouseReleased { button: MouseButton },
    /// Wheel rotation; only the sign is meaningful to the zoom step.
    Wheel { delta: f64 },
    /// Key-down, including OS auto-repeat while held.
    KeyDown { key: Key },
    KeyUp { key: Key },
}

// ===== Registry =====

/// Owns every button and key state plus the shared pointer/wheel state.
#[derive(Debug, Default)]
pub struct Input {
    mouse: HashMap<MouseButton, ButtonState>,
    keys: HashMap<Key, ButtonState>,
    queue: Vec<RawEvent>,
    pointer_global: Point,
    pointer_last_world: Point,
    pointer_movement: Vec2,
    wheel_delta: f64,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw device event for the next tick.
    pub fn push(&mut self, event: RawEvent) {
        self.queue.push(event);
    }

    /// Look up the state for a mouse button, creating it (Up) on first use.
    pub fn mouse_button(&mut self, button: MouseButton) -> &mut ButtonState {
        self.mouse.entry(button).or_default()
    }

    /// Look up the state for a key, creating it (Up) on first use.
    pub fn key(&mut self, key: Key) -> &mut ButtonState {
        self.keys.entry(key).or_default()
    }

    /// This tick's events for a mouse button (empty if never looked up).
    pub fn mouse_events(&self, button: MouseButton) -> &[ButtonEvent] {
        self.mouse.get(&button).map_or(&[], |s| s.events())
    }

    /// This tick's events for a key (empty if never looked up).
    pub fn key_events(&self, key: Key) -> &[ButtonEvent] {
        self.keys.get(&key).map_or(&[], |s| s.events())
    }

    /// This tick's events for a mouse button, with their tick-wide
    /// sequence numbers.
    pub fn mouse_events_ordered(
        &self,
        button: MouseButton,
    ) -> impl Iterator<Item = (u64, ButtonEvent)> + '_ {
        self.mouse
            .get(&button)
            .into_iter()
            .flat_map(ButtonState::ordered_events)
    }

    /// This tick's events for a key, with their tick-wide sequence
    /// numbers.
    pub fn key_events_ordered(&self, key: Key) -> impl Iterator<Item = (u64, ButtonEvent)> + '_ {
        self.keys
            .get(&key)
            .into_iter()
            .flat_map(ButtonState::ordered_events)
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse.get(&button).is_some_and(|s| s.is_down())
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_down())
    }

    /// Drain the queued device events and emit this tick's button
    /// events. Every emitted event is stamped with a tick-wide sequence
    /// number, so consumers can replay events across several buttons in
    /// device arrival order; the level signals come last.
    pub fn update(&mut self, _delta: f64) {
        for state in self.mouse.values_mut() {
            state.begin_tick();
        }
        for state in self.keys.values_mut() {
            state.begin_tick();
        }

        let mut seq = 0;
        for event in std::mem::take(&mut self.queue) {
            self.apply(event, &mut seq);
        }

        for state in self.mouse.values_mut() {
            state.level_signal(&mut seq);
        }
        for state in self.keys.values_mut() {
            state.level_signal(&mut seq);
        }
    }

    fn apply(&mut self, event: RawEvent, seq: &mut u64) {
        match event {
            RawEvent::PointerMoved { pos } => {
                self.pointer_global = pos;
            }
            RawEvent::MousePressed { button } => {
                if let Some(state) = self.mouse.get_mut(&button) {
                    state.press(seq);
                }
            }
            RawEvent::MouseReleased { button } => {
                if let Some(state) = self.mouse.get_mut(&button) {
                    state.release(seq);
                }
            }
            RawEvent::Wheel { delta } => {
                self.wheel_delta = delta;
            }
            RawEvent::KeyDown { key } => {
                if let Some(state) = self.keys.get_mut(&key) {
                    // Pressed only on the real Up -> Down edge; every
                    // key-down event (auto-repeat included) fires Down.
                    if state.is_up() {
                        state.press(seq);
                    }
                    state.event_down(seq);
                }
            }
            RawEvent::KeyUp { key } => {
                if let Some(state) = self.keys.get_mut(&key) {
                    state.release(seq);
                }
            }
        }
    }

    /// Recompute the world-space pointer movement against the baseline
    /// captured by the last [`late_update`](Self::late_update).
    pub fn refresh_movement(&mut self, world_pos: Point) {
        self.pointer_movement = world_pos - self.pointer_last_world;
    }

    /// Post-render bookkeeping: snapshot the movement baseline and clear
    /// the wheel accumulator.
    pub fn late_update(&mut self, world_pos: Point) {
        self.pointer_last_world = world_pos;
        self.wheel_delta = 0.0;
    }

    // ===== Pointer spaces =====

    /// Raw device/global pointer position.
    pub fn pointer_global(&self) -> Point {
        self.pointer_global
    }

    /// Pointer position in world space, clamped into `[0, world_clamp]`.
    pub fn pointer_world(&self, viewport: &Viewport, world_clamp: Size) -> Point {
        let world = viewport.to_world(self.pointer_global);
        clamp_point(
            world,
            Point::ZERO,
            Point::new(world_clamp.width, world_clamp.height),
        )
    }

    /// World-space pointer movement since the last frame.
    pub fn pointer_movement(&self) -> Vec2 {
        self.pointer_movement
    }

    /// Last wheel delta of this tick (zero if the wheel did not move).
    pub fn wheel_delta(&self) -> f64 {
        self.wheel_delta
    }
}
