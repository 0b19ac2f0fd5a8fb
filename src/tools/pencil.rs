// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Pencil tool: stamp the pointer position every frame while held.

use crate::geometry::floor_point;
use crate::input::MouseButton;
use crate::surface::{DrawTarget, LineStyle};
use crate::tools::{
    ActionKind, ActionSet, ButtonSource, Frame, GesturePhase, TargetMode, Tool, ToolCtx, ToolId,
};
use kurbo::{Rect, Size};

/// Freehand drawing: while the place button is held, every frame commits
/// one pixel (or one cell, in tile mode) under the pointer.
#[derive(Debug)]
pub struct PencilTool {
    actions: ActionSet,
    placing: bool,
}

impl Default for PencilTool {
    fn default() -> Self {
        PencilTool {
            actions: ActionSet::new()
                .with_action(ActionKind::Place, ButtonSource::Mouse(MouseButton::Main)),
            placing: false,
        }
    }
}

impl Tool for PencilTool {
    fn id(&self) -> ToolId {
        ToolId::Pencil
    }

    fn actions(&self) -> &ActionSet {
        &self.actions
    }

    fn actions_mut(&mut self) -> &mut ActionSet {
        &mut self.actions
    }

    fn on_gesture(&mut self, kind: ActionKind, phase: GesturePhase, _ctx: &ToolCtx<'_>) {
        if kind != ActionKind::Place {
            return;
        }
        match phase {
            GesturePhase::Start | GesturePhase::Update => self.placing = true,
            GesturePhase::End => self.placing = false,
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, ctx: &ToolCtx<'_>) {
        if !self.placing {
            return;
        }
        let stroke = ctx.config.colors.stroke;
        let stamp = match ctx.target_mode {
            TargetMode::Pixel => Rect::from_origin_size(
                floor_point(ctx.pointer_world()),
                Size::new(1.0, 1.0),
            ),
            TargetMode::Tile => ctx.grid.cell_rect(ctx.pointer_cell()),
        };
        frame.buffer.line_style(LineStyle::new(stroke));
        frame.buffer.draw_rect(stamp, Some(stroke), None);
        frame.surface.composite(frame.buffer, false);
    }

    fn on_deselected(&mut self) {
        self.placing = false;
    }
}
