// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Eraser tool: paint over with the background color.
//!
//! Erasing is drawing. In pixel mode a square brush, centered on the
//! pointer pixel, commits every frame while held; in tile mode the brush
//! is exactly the cell under the pointer.

use crate::geometry::floor_point;
use crate::input::MouseButton;
use crate::surface::{DrawTarget, LineStyle};
use crate::tools::{
    ActionKind, ActionSet, ButtonSource, Frame, GesturePhase, TargetMode, Tool, ToolCtx, ToolId,
};
use kurbo::{Rect, Size, Vec2};

#[derive(Debug)]
pub struct EraserTool {
    actions: ActionSet,
    erasing: bool,
}

impl Default for EraserTool {
    fn default() -> Self {
        EraserTool {
            actions: ActionSet::new()
                .with_action(ActionKind::Erase, ButtonSource::Mouse(MouseButton::Main)),
            erasing: false,
        }
    }
}

impl Tool for EraserTool {
    fn id(&self) -> ToolId {
        ToolId::Eraser
    }

    fn actions(&self) -> &ActionSet {
        &self.actions
    }

    fn actions_mut(&mut self) -> &mut ActionSet {
        &mut self.actions
    }

    fn on_gesture(&mut self, kind: ActionKind, phase: GesturePhase, _ctx: &ToolCtx<'_>) {
        if kind != ActionKind::Erase {
            return;
        }
        match phase {
            GesturePhase::Start | GesturePhase::Update => self.erasing = true,
            GesturePhase::End => self.erasing = false,
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, ctx: &ToolCtx<'_>) {
        if !self.erasing {
            return;
        }
        let background = ctx.config.colors.background;
        let brush = match ctx.target_mode {
            TargetMode::Pixel => {
                // Odd diameter, so the brush centers on the pointer pixel.
                let diameter = ctx.config.eraser.brush_diameter as f64;
                let half = (diameter - 1.0) / 2.0;
                let origin = floor_point(ctx.pointer_world()) - Vec2::new(half, half);
                Rect::from_origin_size(origin, Size::new(diameter, diameter))
            }
            TargetMode::Tile => ctx.grid.cell_rect(ctx.pointer_cell()),
        };
        frame.buffer.line_style(LineStyle::new(background));
        frame.buffer.draw_rect(brush, Some(background), None);
        frame.surface.composite(frame.buffer, false);
    }

    fn on_deselected(&mut self) {
        self.erasing = false;
    }
}
