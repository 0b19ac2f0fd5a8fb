// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Tool system for the drawing surface.

use crate::config::Config;
use crate::geometry::Cell;
use crate::grid::Grid;
use crate::input::Input;
use crate::surface::{CommandBuffer, DrawTarget, Surface};
use crate::viewport::Viewport;
use kurbo::Point;

pub mod action;
pub mod eraser;
pub mod line;
pub mod pencil;
pub mod toolbar;

pub use action::{ActionKind, ActionSet, ButtonSource, GestureEvent, GesturePhase, ToolAction};
pub use toolbar::Toolbar;

// ===== Tool Identifier =====

/// Tool identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    /// Freehand per-frame stamping
    Pencil,
    /// Straight segments, chainable into polylines
    Line,
    /// Paint over with the background color
    Eraser,
}

impl ToolId {
    pub fn name(&self) -> &'static str {
        match self {
            ToolId::Pencil => "pencil",
            ToolId::Line => "line",
            ToolId::Eraser => "eraser",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolId> {
        match name {
            "pencil" => Some(ToolId::Pencil),
            "line" => Some(ToolId::Line),
            "eraser" => Some(ToolId::Eraser),
            _ => None,
        }
    }

    /// Resolve a toolbar button element id of the form `"<name>-tool"`.
    pub fn from_element_id(element_id: &str) -> Option<ToolId> {
        element_id.strip_suffix("-tool").and_then(ToolId::from_name)
    }

    pub fn all() -> [ToolId; 3] {
        [ToolId::Pencil, ToolId::Line, ToolId::Eraser]
    }
}

// ===== Target Mode =====

/// Whether tools address individual pixels or whole grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMode {
    #[default]
    Pixel,
    Tile,
}

impl TargetMode {
    pub fn cycled(self) -> TargetMode {
        match self {
            TargetMode::Pixel => TargetMode::Tile,
            TargetMode::Tile => TargetMode::Pixel,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetMode::Pixel => "pixel",
            TargetMode::Tile => "tile",
        }
    }
}

// ===== Contexts =====

/// Per-tick read context handed to tool hooks.
pub struct ToolCtx<'a> {
    pub input: &'a Input,
    pub viewport: &'a Viewport,
    pub grid: &'a Grid,
    pub target_mode: TargetMode,
    pub config: &'a Config,
}

impl ToolCtx<'_> {
    /// Pointer position in world space, clamped to the grid extent.
    pub fn pointer_world(&self) -> Point {
        self.input.pointer_world(self.viewport, self.grid.size())
    }

    /// The grid cell under the pointer.
    pub fn pointer_cell(&self) -> Cell {
        self.grid.cell_at(self.pointer_world())
    }
}

/// Render-phase targets: the transient overlay, the pending-commit
/// buffer, and the persistent surface.
pub struct Frame<'a> {
    pub overlay: &'a mut dyn DrawTarget,
    pub buffer: &'a mut CommandBuffer,
    pub surface: &'a mut dyn Surface,
}

// ===== Tool Trait =====

/// A drawing tool: button-bound gestures plus per-frame hooks.
pub trait Tool {
    /// Get the tool identifier.
    fn id(&self) -> ToolId;

    /// The tool's gesture bindings.
    fn actions(&self) -> &ActionSet;

    fn actions_mut(&mut self) -> &mut ActionSet;

    /// Gesture hook, called exactly once per routed button event.
    fn on_gesture(&mut self, kind: ActionKind, phase: GesturePhase, ctx: &ToolCtx<'_>);

    /// Per-frame update while selected.
    fn update(&mut self, _delta: f64, _ctx: &ToolCtx<'_>) {}

    /// Per-frame render while selected.
    fn render(&mut self, frame: &mut Frame<'_>, ctx: &ToolCtx<'_>);

    /// Called after the tool's actions are bound.
    fn on_selected(&mut self) {}

    /// Called after the tool's actions are unbound.
    fn on_deselected(&mut self) {}

    /// Route this tick's button events through the tool's action set
    /// and invoke the gesture hook once per surviving event. The
    /// restart filter runs at dispatch time, so a restart requested
    /// mid-batch swallows the rest of that batch too.
    fn process_input(&mut self, ctx: &ToolCtx<'_>)
    where
        Self: Sized,
    {
        let batch = self.actions_mut().poll(ctx.input);
        for event in batch {
            if self.actions_mut().begin_dispatch(event) {
                self.on_gesture(event.kind, event.phase, ctx);
            }
        }
    }
}

// ===== ToolBox Enum =====

/// Enum wrapping all tool types.
#[derive(Debug)]
pub enum ToolBox {
    Pencil(pencil::PencilTool),
    Line(line::LineTool),
    Eraser(eraser::EraserTool),
}

impl ToolBox {
    /// Create a tool by ID.
    pub fn for_id(id: ToolId) -> Self {
        match id {
            ToolId::Pencil => ToolBox::Pencil(pencil::PencilTool::default()),
            ToolId::Line => ToolBox::Line(line::LineTool::default()),
            ToolId::Eraser => ToolBox::Eraser(eraser::EraserTool::default()),
        }
    }

    /// Get the tool ID.
    pub fn id(&self) -> ToolId {
        match self {
            ToolBox::Pencil(tool) => tool.id(),
            ToolBox::Line(tool) => tool.id(),
            ToolBox::Eraser(tool) => tool.id(),
        }
    }

    pub fn actions(&self) -> &ActionSet {
        match self {
            ToolBox::Pencil(tool) => tool.actions(),
            ToolBox::Line(tool) => tool.actions(),
            ToolBox::Eraser(tool) => tool.actions(),
        }
    }

    pub fn actions_mut(&mut self) -> &mut ActionSet {
        match self {
            ToolBox::Pencil(tool) => tool.actions_mut(),
            ToolBox::Line(tool) => tool.actions_mut(),
            ToolBox::Eraser(tool) => tool.actions_mut(),
        }
    }

    /// Dispatch a gesture hook.
    pub fn on_gesture(&mut self, kind: ActionKind, phase: GesturePhase, ctx: &ToolCtx<'_>) {
        match self {
            ToolBox::Pencil(tool) => tool.on_gesture(kind, phase, ctx),
            ToolBox::Line(tool) => tool.on_gesture(kind, phase, ctx),
            ToolBox::Eraser(tool) => tool.on_gesture(kind, phase, ctx),
        }
    }

    /// Per-frame update.
    pub fn update(&mut self, delta: f64, ctx: &ToolCtx<'_>) {
        match self {
            ToolBox::Pencil(tool) => tool.update(delta, ctx),
            ToolBox::Line(tool) => tool.update(delta, ctx),
            ToolBox::Eraser(tool) => tool.update(delta, ctx),
        }
    }

    /// Per-frame render.
    pub fn render(&mut self, frame: &mut Frame<'_>, ctx: &ToolCtx<'_>) {
        match self {
            ToolBox::Pencil(tool) => tool.render(frame, ctx),
            ToolBox::Line(tool) => tool.render(frame, ctx),
            ToolBox::Eraser(tool) => tool.render(frame, ctx),
        }
    }

    pub fn on_selected(&mut self) {
        match self {
            ToolBox::Pencil(tool) => tool.on_selected(),
            ToolBox::Line(tool) => tool.on_selected(),
            ToolBox::Eraser(tool) => tool.on_selected(),
        }
    }

    pub fn on_deselected(&mut self) {
        match self {
            ToolBox::Pencil(tool) => tool.on_deselected(),
            ToolBox::Line(tool) => tool.on_deselected(),
            ToolBox::Eraser(tool) => tool.on_deselected(),
        }
    }

    /// Route this tick's button events to the wrapped tool.
    pub fn process_input(&mut self, ctx: &ToolCtx<'_>) {
        match self {
            ToolBox::Pencil(tool) => tool.process_input(ctx),
            ToolBox::Line(tool) => tool.process_input(ctx),
            ToolBox::Eraser(tool) => tool.process_input(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_id_names_roundtrip() {
        for id in ToolId::all() {
            assert_eq!(ToolId::from_name(id.name()), Some(id));
        }
        assert_eq!(ToolId::from_name("lasso"), None);
    }

    #[test]
    fn test_tool_id_from_element() {
        assert_eq!(ToolId::from_element_id("line-tool"), Some(ToolId::Line));
        assert_eq!(ToolId::from_element_id("line"), None);
        assert_eq!(ToolId::from_element_id("knife-tool"), None);
    }

    #[test]
    fn test_target_mode_cycles() {
        assert_eq!(TargetMode::Pixel.cycled(), TargetMode::Tile);
        assert_eq!(TargetMode::Tile.cycled(), TargetMode::Pixel);
        assert_eq!(TargetMode::default(), TargetMode::Pixel);
    }

    #[test]
    fn test_toolbox_for_id() {
        for id in ToolId::all() {
            assert_eq!(ToolBox::for_id(id).id(), id);
        }
    }
}
