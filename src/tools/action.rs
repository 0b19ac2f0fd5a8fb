// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Button-to-gesture binding with restart semantics.
//!
//! Each tool owns an [`ActionSet`]: a fixed list of gestures, each bound
//! to one physical button or key. While the set is bound, button edges
//! become [`GestureEvent`]s (Pressed -> Start, Down -> Update,
//! Released -> End). A tool may request a restart of one of its
//! gestures; from then until the next Start, Update and End events for
//! that gesture are swallowed. Start clears the flag and goes through.

use crate::input::{ButtonEvent, Input, Key, MouseButton};

// ===== Vocabulary =====

/// Semantic gesture kinds tools can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Place or drag the primary mark.
    Place,
    /// Finish a multi-step gesture (e.g. close a polyline).
    Finish,
    /// Erase under the pointer.
    Erase,
}

/// Lifecycle phase of a gesture, derived from button edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Start,
    Update,
    End,
}

/// The physical trigger a gesture is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSource {
    Mouse(MouseButton),
    Key(Key),
}

/// A gesture event ready for dispatch to a tool hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub kind: ActionKind,
    pub phase: GesturePhase,
}

// ===== Actions =====

/// One gesture binding plus its restart flag.
#[derive(Debug, Clone, Copy)]
pub struct ToolAction {
    pub kind: ActionKind,
    pub source: ButtonSource,
    requested_restart: bool,
}

impl ToolAction {
    pub fn new(kind: ActionKind, source: ButtonSource) -> Self {
        ToolAction {
            kind,
            source,
            requested_restart: false,
        }
    }
}

/// A tool's gesture bindings and their bound/restart state.
#[derive(Debug, Default)]
pub struct ActionSet {
    actions: Vec<ToolAction>,
    bound: bool,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of a gesture binding.
    pub fn with_action(mut self, kind: ActionKind, source: ButtonSource) -> Self {
        self.actions.push(ToolAction::new(kind, source));
        self
    }

    /// The physical triggers this set listens to, for registration with
    /// the input system.
    pub fn sources(&self) -> impl Iterator<Item = ButtonSource> + '_ {
        self.actions.iter().map(|action| action.source)
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Start routing button events to this set.
    pub fn bind(&mut self) {
        self.bound = true;
    }

    /// Stop routing and clear every pending restart. Idempotent.
    pub fn unbind(&mut self) {
        self.bound = false;
        for action in &mut self.actions {
            action.requested_restart = false;
        }
    }

    /// Swallow further Update/End events for a gesture until its next
    /// Start.
    pub fn request_restart(&mut self, kind: ActionKind) {
        for action in &mut self.actions {
            if action.kind == kind {
                action.requested_restart = true;
            }
        }
    }

    /// Collect this tick's gesture events from the input registry, in
    /// device arrival order across all bound buttons (the tick-wide
    /// sequence numbers decide, so a finish press queued before a place
    /// release also dispatches before it). Restart filtering happens
    /// later, in [`begin_dispatch`](Self::begin_dispatch), so a restart
    /// requested while handling one event of a batch affects the rest
    /// of it.
    pub fn poll(&self, input: &Input) -> Vec<GestureEvent> {
        if !self.bound {
            return Vec::new();
        }
        let mut batch: Vec<(u64, GestureEvent)> = Vec::new();
        for action in &self.actions {
            let events: Vec<(u64, ButtonEvent)> = match action.source {
                ButtonSource::Mouse(button) => input.mouse_events_ordered(button).collect(),
                ButtonSource::Key(key) => input.key_events_ordered(key).collect(),
            };
            for (seq, event) in events {
                let phase = match event {
                    ButtonEvent::Pressed => GesturePhase::Start,
                    ButtonEvent::Down => GesturePhase::Update,
                    ButtonEvent::Released => GesturePhase::End,
                    ButtonEvent::Up => continue,
                };
                batch.push((
                    seq,
                    GestureEvent {
                        kind: action.kind,
                        phase,
                    },
                ));
            }
        }
        batch.sort_by_key(|(seq, _)| *seq);
        batch.into_iter().map(|(_, event)| event).collect()
    }

    /// Gate one polled event through the restart filter. Returns whether
    /// the event should reach the tool hook.
    pub fn begin_dispatch(&mut self, event: GestureEvent) -> bool {
        if !self.bound {
            return false;
        }
        let Some(action) = self
            .actions
            .iter_mut()
            .find(|action| action.kind == event.kind)
        else {
            return false;
        };
        match event.phase {
            GesturePhase::Start => {
                action.requested_restart = false;
                true
            }
            GesturePhase::Update | GesturePhase::End => !action.requested_restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawEvent;

    fn place_set() -> ActionSet {
        ActionSet::new().with_action(ActionKind::Place, ButtonSource::Mouse(MouseButton::Main))
    }

    fn pressed_tick(input: &mut Input) {
        input.push(RawEvent::MousePressed {
            button: MouseButton::Main,
        });
        input.update(1.0);
    }

    #[test]
    fn test_unbound_set_polls_nothing() {
        let mut input = Input::new();
        input.mouse_button(MouseButton::Main);
        let set = place_set();
        pressed_tick(&mut input);
        assert!(set.poll(&input).is_empty());
    }

    #[test]
    fn test_press_maps_to_start_then_update() {
        let mut input = Input::new();
        input.mouse_button(MouseButton::Main);
        let mut set = place_set();
        set.bind();

        pressed_tick(&mut input);
        let batch = set.poll(&input);
        assert_eq!(
            batch,
            vec![
                GestureEvent {
                    kind: ActionKind::Place,
                    phase: GesturePhase::Start
                },
                GestureEvent {
                    kind: ActionKind::Place,
                    phase: GesturePhase::Update
                },
            ]
        );
        assert!(batch.into_iter().all(|ev| set.begin_dispatch(ev)));
    }

    #[test]
    fn test_restart_swallows_update_and_end_until_start() {
        let mut input = Input::new();
        input.mouse_button(MouseButton::Main);
        let mut set = place_set();
        set.bind();
        set.request_restart(ActionKind::Place);

        // Held button: Update swallowed.
        pressed_tick(&mut input);
        // Skip the Start from this press to exercise the flag directly.
        assert!(!set.begin_dispatch(GestureEvent {
            kind: ActionKind::Place,
            phase: GesturePhase::Update
        }));
        assert!(!set.begin_dispatch(GestureEvent {
            kind: ActionKind::Place,
            phase: GesturePhase::End
        }));

        // Start clears the flag and goes through.
        assert!(set.begin_dispatch(GestureEvent {
            kind: ActionKind::Place,
            phase: GesturePhase::Start
        }));
        assert!(set.begin_dispatch(GestureEvent {
            kind: ActionKind::Place,
            phase: GesturePhase::Update
        }));
    }

    #[test]
    fn test_restart_requested_mid_batch_affects_rest_of_batch() {
        let mut input = Input::new();
        input.mouse_button(MouseButton::Main);
        let mut set = place_set();
        set.bind();

        pressed_tick(&mut input);
        let batch = set.poll(&input);
        let mut delivered = Vec::new();
        for event in batch {
            if set.begin_dispatch(event) {
                delivered.push(event.phase);
                // The hook requests a restart while handling Start.
                if event.phase == GesturePhase::Start {
                    set.request_restart(ActionKind::Place);
                }
            }
        }
        // The Update from the same press is swallowed.
        assert_eq!(delivered, vec![GesturePhase::Start]);
    }

    #[test]
    fn test_poll_preserves_cross_button_arrival_order() {
        let mut input = Input::new();
        input.mouse_button(MouseButton::Main);
        input.mouse_button(MouseButton::Secondary);
        let mut set = ActionSet::new()
            .with_action(ActionKind::Place, ButtonSource::Mouse(MouseButton::Main))
            .with_action(
                ActionKind::Finish,
                ButtonSource::Mouse(MouseButton::Secondary),
            );
        set.bind();

        // Hold the place button, then in one tick press finish before
        // releasing place. The finish Start must dispatch before the
        // place End, even though place registered first.
        input.push(RawEvent::MousePressed {
            button: MouseButton::Main,
        });
        input.update(1.0);
        input.push(RawEvent::MousePressed {
            button: MouseButton::Secondary,
        });
        input.push(RawEvent::MouseReleased {
            button: MouseButton::Main,
        });
        input.update(1.0);

        let batch = set.poll(&input);
        assert_eq!(
            &batch[..2],
            &[
                GestureEvent {
                    kind: ActionKind::Finish,
                    phase: GesturePhase::Start
                },
                GestureEvent {
                    kind: ActionKind::Place,
                    phase: GesturePhase::End
                },
            ]
        );
    }

    #[test]
    fn test_unbind_clears_restart_and_is_idempotent() {
        let mut set = place_set();
        set.bind();
        set.request_restart(ActionKind::Place);
        set.unbind();
        set.unbind();
        set.bind();
        assert!(set.begin_dispatch(GestureEvent {
            kind: ActionKind::Place,
            phase: GesturePhase::Update
        }));
    }

    #[test]
    fn test_sources_enumerates_bindings() {
        let set = ActionSet::new()
            .with_action(ActionKind::Place, ButtonSource::Mouse(MouseButton::Main))
            .with_action(ActionKind::Finish, ButtonSource::Mouse(MouseButton::Secondary));
        let sources: Vec<_> = set.sources().collect();
        assert_eq!(
            sources,
            vec![
                ButtonSource::Mouse(MouseButton::Main),
                ButtonSource::Mouse(MouseButton::Secondary),
            ]
        );
    }
}
