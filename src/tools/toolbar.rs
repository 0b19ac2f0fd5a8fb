// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Tool registry and exclusive selection.
//!
//! At most one tool is selected; its action set is the only bound one,
//! so button events never reach a deselected tool. Selecting the
//! already-selected tool is a no-op.

use crate::input::Input;
use crate::tools::{ButtonSource, Frame, ToolBox, ToolCtx, ToolId};
use tracing::{debug, error};

#[derive(Debug, Default)]
pub struct Toolbar {
    tools: Vec<ToolBox>,
    selected: Option<ToolId>,
}

impl Toolbar {
    /// A toolbar holding every known tool, none selected.
    pub fn new() -> Self {
        Toolbar {
            tools: ToolId::all().map(ToolBox::for_id).into(),
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<ToolId> {
        self.selected
    }

    /// Pre-register every button and key the tools listen for, so their
    /// device events are not dropped before first use.
    pub fn register_sources(&self, input: &mut Input) {
        for tool in &self.tools {
            for source in tool.actions().sources() {
                match source {
                    ButtonSource::Mouse(button) => {
                        input.mouse_button(button);
                    }
                    ButtonSource::Key(key) => {
                        input.key(key);
                    }
                }
            }
        }
    }

    fn tool_mut(&mut self, id: ToolId) -> Option<&mut ToolBox> {
        self.tools.iter_mut().find(|tool| tool.id() == id)
    }

    /// Select a tool, unbinding the previous selection. Re-selecting the
    /// current tool does nothing.
    pub fn select(&mut self, id: ToolId) {
        if self.selected == Some(id) {
            return;
        }
        if let Some(previous) = self.selected
            && let Some(tool) = self.tool_mut(previous)
        {
            tool.actions_mut().unbind();
            tool.on_deselected();
        }
        self.selected = Some(id);
        if let Some(tool) = self.tool_mut(id) {
            tool.actions_mut().bind();
            tool.on_selected();
        }
        debug!(tool = id.name(), "tool selected");
    }

    /// Select by toolbar button element id (`"<name>-tool"`). Returns
    /// whether the id resolved to a tool.
    pub fn select_by_element(&mut self, element_id: &str) -> bool {
        match ToolId::from_element_id(element_id) {
            Some(id) => {
                self.select(id);
                true
            }
            None => {
                error!(element_id, "attempt to select an unknown tool");
                false
            }
        }
    }

    /// Route this tick's button events to the selected tool and run its
    /// per-frame update.
    pub fn update(&mut self, delta: f64, ctx: &ToolCtx<'_>) {
        let Some(id) = self.selected else {
            return;
        };
        if let Some(tool) = self.tool_mut(id) {
            tool.process_input(ctx);
            tool.update(delta, ctx);
        }
    }

    /// Render the selected tool.
    pub fn render(&mut self, frame: &mut Frame<'_>, ctx: &ToolCtx<'_>) {
        let Some(id) = self.selected else {
            return;
        };
        if let Some(tool) = self.tool_mut(id) {
            tool.render(frame, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, RawEvent};
    use crate::tools::ActionKind;

    #[test]
    fn test_selection_is_exclusive() {
        let mut toolbar = Toolbar::new();
        toolbar.select(ToolId::Line);
        assert_eq!(toolbar.selected(), Some(ToolId::Line));
        assert!(toolbar.tool_mut(ToolId::Line).unwrap().actions().is_bound());

        toolbar.select(ToolId::Eraser);
        assert!(!toolbar.tool_mut(ToolId::Line).unwrap().actions().is_bound());
        assert!(
            toolbar
                .tool_mut(ToolId::Eraser)
                .unwrap()
                .actions()
                .is_bound()
        );
    }

    #[test]
    fn test_reselect_is_noop_and_keeps_restart() {
        let mut toolbar = Toolbar::new();
        toolbar.select(ToolId::Line);
        toolbar
            .tool_mut(ToolId::Line)
            .unwrap()
            .actions_mut()
            .request_restart(ActionKind::Place);

        // Re-selecting must not unbind/rebind (which clears restarts).
        toolbar.select(ToolId::Line);
        let tool = toolbar.tool_mut(ToolId::Line).unwrap();
        assert!(tool.actions().is_bound());
        assert!(!tool.actions_mut().begin_dispatch(crate::tools::GestureEvent {
            kind: ActionKind::Place,
            phase: crate::tools::GesturePhase::Update,
        }));
    }

    #[test]
    fn test_switching_away_clears_restart() {
        let mut toolbar = Toolbar::new();
        toolbar.select(ToolId::Line);
        toolbar
            .tool_mut(ToolId::Line)
            .unwrap()
            .actions_mut()
            .request_restart(ActionKind::Place);

        toolbar.select(ToolId::Pencil);
        toolbar.select(ToolId::Line);
        let tool = toolbar.tool_mut(ToolId::Line).unwrap();
        assert!(tool.actions_mut().begin_dispatch(crate::tools::GestureEvent {
            kind: ActionKind::Place,
            phase: crate::tools::GesturePhase::Update,
        }));
    }

    #[test]
    fn test_select_by_element_id() {
        let mut toolbar = Toolbar::new();
        assert!(toolbar.select_by_element("eraser-tool"));
        assert_eq!(toolbar.selected(), Some(ToolId::Eraser));
        assert!(!toolbar.select_by_element("mystery-tool"));
        assert_eq!(toolbar.selected(), Some(ToolId::Eraser));
    }

    #[test]
    fn test_register_sources_prevents_event_drop() {
        let toolbar = Toolbar::new();
        let mut input = Input::new();
        toolbar.register_sources(&mut input);
        input.push(RawEvent::MousePressed {
            button: MouseButton::Main,
        });
        input.update(1.0);
        assert!(input.is_mouse_down(MouseButton::Main));
    }
}
