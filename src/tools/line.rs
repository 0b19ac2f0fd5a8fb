// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Line tool: straight segments that chain into polylines.
//!
//! The first place click anchors the segment start; while a segment is
//! live its endpoint tracks the pointer and is previewed on the overlay.
//! Each further place click commits the segment and re-anchors at its
//! endpoint. The finish gesture commits the live segment, resets the
//! chain, and restarts the place gesture so the press that triggered it
//! cannot leak a stray anchor.

use crate::input::MouseButton;
use crate::raster::cells_between;
use crate::surface::{DrawTarget, LineStyle};
use crate::tools::{
    ActionKind, ActionSet, ButtonSource, Frame, GesturePhase, TargetMode, Tool, ToolCtx, ToolId,
};
use kurbo::{Line, Point};

#[derive(Debug)]
pub struct LineTool {
    actions: ActionSet,
    is_first_point: bool,
    current: Line,
    lines_to_render: Vec<Line>,
}

impl Default for LineTool {
    fn default() -> Self {
        LineTool {
            actions: ActionSet::new()
                .with_action(ActionKind::Place, ButtonSource::Mouse(MouseButton::Main))
                .with_action(
                    ActionKind::Finish,
                    ButtonSource::Mouse(MouseButton::Secondary),
                ),
            is_first_point: true,
            current: Line::new(Point::ZERO, Point::ZERO),
            lines_to_render: Vec::new(),
        }
    }
}

impl LineTool {
    fn place_end(&mut self, ctx: &ToolCtx<'_>) {
        let pointer = ctx.pointer_world();
        if self.is_first_point {
            self.current = Line::new(pointer, pointer);
            self.is_first_point = false;
            return;
        }
        // Commit and re-chain from the committed endpoint.
        self.lines_to_render.push(self.current);
        self.current = Line::new(self.current.p1, self.current.p1);
    }

    fn finish_start(&mut self) {
        if !self.is_first_point {
            self.lines_to_render.push(self.current);
        }
        self.current = Line::new(Point::ZERO, Point::ZERO);
        self.is_first_point = true;
        self.actions.request_restart(ActionKind::Place);
    }

    /// Emit one segment as draw calls: a line in pixel mode, the run of
    /// rasterized cells in tile mode.
    fn emit_segment(
        target: &mut dyn crate::surface::DrawTarget,
        line: Line,
        ctx: &ToolCtx<'_>,
        style: LineStyle,
    ) {
        match ctx.target_mode {
            TargetMode::Pixel => {
                target.line_style(style);
                target.draw_line(line.p0, line.p1);
            }
            TargetMode::Tile => {
                let start = ctx.grid.cell_at(line.p0);
                let end = ctx.grid.cell_at(line.p1);
                for cell in cells_between(start, end) {
                    target.draw_rect(ctx.grid.cell_rect(cell), Some(style.color), None);
                }
            }
        }
    }
}

impl Tool for LineTool {
    fn id(&self) -> ToolId {
        ToolId::Line
    }

    fn actions(&self) -> &ActionSet {
        &self.actions
    }

    fn actions_mut(&mut self) -> &mut ActionSet {
        &mut self.actions
    }

    fn on_gesture(&mut self, kind: ActionKind, phase: GesturePhase, ctx: &ToolCtx<'_>) {
        match (kind, phase) {
            (ActionKind::Place, GesturePhase::End) => self.place_end(ctx),
            (ActionKind::Finish, GesturePhase::Start) => self.finish_start(),
            _ => {}
        }
    }

    fn update(&mut self, _delta: f64, ctx: &ToolCtx<'_>) {
        if !self.is_first_point {
            self.current.p1 = ctx.pointer_world();
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, ctx: &ToolCtx<'_>) {
        let style = LineStyle::new(ctx.config.colors.stroke);

        // Committed segments go through the buffer onto the surface.
        if !self.lines_to_render.is_empty() {
            frame.buffer.line_style(style);
            for line in self.lines_to_render.drain(..) {
                Self::emit_segment(frame.buffer, line, ctx, style);
            }
            frame.surface.composite(frame.buffer, false);
        }

        // Live segment preview on the overlay.
        if !self.is_first_point {
            Self::emit_segment(frame.overlay, self.current, ctx, style);
        }
    }

    fn on_selected(&mut self) {
        self.is_first_point = true;
        self.current = Line::new(Point::ZERO, Point::ZERO);
    }

    fn on_deselected(&mut self) {
        self.is_first_point = true;
        self.lines_to_render.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::grid::{CellSize, Grid, GridSetup};
    use crate::input::{Input, RawEvent};
    use crate::surface::{CommandBuffer, DrawCommand, RetainedSurface};
    use crate::viewport::Viewport;
    use kurbo::Size;

    struct Rig {
        input: Input,
        viewport: Viewport,
        grid: Grid,
        config: Config,
        tool: LineTool,
    }

    impl Rig {
        fn new() -> Self {
            let mut input = Input::new();
            input.mouse_button(MouseButton::Main);
            input.mouse_button(MouseButton::Secondary);
            let mut viewport = Viewport::with_defaults();
            viewport.set_screen_size(Size::new(800.0, 600.0));
            let grid = Grid::from_setup(&GridSetup {
                columns: 16,
                rows: 16,
                cell_size: CellSize {
                    width: 16.0,
                    height: 16.0,
                },
            })
            .unwrap();
            let mut tool = LineTool::default();
            tool.actions_mut().bind();
            Rig {
                input,
                viewport,
                grid,
                config: Config::default(),
                tool,
            }
        }

        /// One tick: move the pointer, optionally click, run input
        /// routing and the per-frame update.
        fn tick(&mut self, pointer: Point, events: &[RawEvent], mode: TargetMode) {
            self.input.push(RawEvent::PointerMoved { pos: pointer });
            for event in events {
                self.input.push(*event);
            }
            self.input.update(1.0);
            let ctx = ToolCtx {
                input: &self.input,
                viewport: &self.viewport,
                grid: &self.grid,
                target_mode: mode,
                config: &self.config,
            };
            self.tool.process_input(&ctx);
            self.tool.update(1.0, &ctx);
        }

        fn click(&mut self, pointer: Point, mode: TargetMode) {
            self.tick(
                pointer,
                &[RawEvent::MousePressed {
                    button: MouseButton::Main,
                }],
                mode,
            );
            self.tick(
                pointer,
                &[RawEvent::MouseReleased {
                    button: MouseButton::Main,
                }],
                mode,
            );
        }

        fn render(&mut self, mode: TargetMode) -> (CommandBuffer, RetainedSurface) {
            let mut overlay = CommandBuffer::new();
            let mut buffer = CommandBuffer::new();
            let mut surface = RetainedSurface::new();
            let ctx = ToolCtx {
                input: &self.input,
                viewport: &self.viewport,
                grid: &self.grid,
                target_mode: mode,
                config: &self.config,
            };
            let mut frame = Frame {
                overlay: &mut overlay,
                buffer: &mut buffer,
                surface: &mut surface,
            };
            self.tool.render(&mut frame, &ctx);
            (overlay, surface)
        }
    }

    #[test]
    fn test_first_click_anchors_without_committing() {
        let mut rig = Rig::new();
        rig.click(Point::new(10.0, 10.0), TargetMode::Pixel);
        assert!(!rig.tool.is_first_point);
        assert!(rig.tool.lines_to_render.is_empty());

        // The live endpoint follows the pointer.
        rig.tick(Point::new(42.0, 24.0), &[], TargetMode::Pixel);
        assert_eq!(rig.tool.current.p0, Point::new(10.0, 10.0));
        assert_eq!(rig.tool.current.p1, Point::new(42.0, 24.0));

        let (overlay, surface) = rig.render(TargetMode::Pixel);
        assert!(surface.commands().is_empty());
        assert_eq!(overlay.commands().len(), 1);
    }

    #[test]
    fn test_second_click_commits_and_rechains() {
        let mut rig = Rig::new();
        rig.click(Point::new(10.0, 10.0), TargetMode::Pixel);
        rig.click(Point::new(50.0, 10.0), TargetMode::Pixel);

        assert_eq!(rig.tool.lines_to_render.len(), 1);
        assert_eq!(rig.tool.current.p0, Point::new(50.0, 10.0));

        let (_, surface) = rig.render(TargetMode::Pixel);
        assert_eq!(
            surface.commands(),
            &[DrawCommand::Line {
                from: Point::new(10.0, 10.0),
                to: Point::new(50.0, 10.0),
                style: LineStyle::new(rig.config.colors.stroke),
            }]
        );
    }

    #[test]
    fn test_finish_commits_live_segment_and_resets() {
        let mut rig = Rig::new();
        rig.click(Point::new(10.0, 10.0), TargetMode::Pixel);
        rig.tick(Point::new(30.0, 30.0), &[], TargetMode::Pixel);
        rig.tick(
            Point::new(30.0, 30.0),
            &[RawEvent::MousePressed {
                button: MouseButton::Secondary,
            }],
            TargetMode::Pixel,
        );

        assert!(rig.tool.is_first_point);
        assert_eq!(rig.tool.lines_to_render.len(), 1);
    }

    #[test]
    fn test_finish_with_no_live_segment_commits_nothing() {
        let mut rig = Rig::new();
        rig.tick(
            Point::new(30.0, 30.0),
            &[RawEvent::MousePressed {
                button: MouseButton::Secondary,
            }],
            TargetMode::Pixel,
        );
        assert!(rig.tool.lines_to_render.is_empty());
        assert!(rig.tool.is_first_point);
    }

    #[test]
    fn test_restart_swallows_place_release_after_finish() {
        let mut rig = Rig::new();
        rig.click(Point::new(10.0, 10.0), TargetMode::Pixel);

        // Hold the place button, then finish while it is still down.
        rig.tick(
            Point::new(60.0, 60.0),
            &[RawEvent::MousePressed {
                button: MouseButton::Main,
            }],
            TargetMode::Pixel,
        );
        rig.tick(
            Point::new(60.0, 60.0),
            &[RawEvent::MousePressed {
                button: MouseButton::Secondary,
            }],
            TargetMode::Pixel,
        );
        // The place release after the finish is swallowed by the
        // restart: no new anchor, no second commit.
        rig.tick(
            Point::new(60.0, 60.0),
            &[RawEvent::MouseReleased {
                button: MouseButton::Main,
            }],
            TargetMode::Pixel,
        );
        assert!(rig.tool.is_first_point);
        assert_eq!(rig.tool.lines_to_render.len(), 1);
    }

    #[test]
    fn test_finish_before_place_release_in_one_tick_commits_once() {
        let mut rig = Rig::new();
        rig.click(Point::new(10.0, 10.0), TargetMode::Pixel);
        rig.tick(
            Point::new(60.0, 60.0),
            &[RawEvent::MousePressed {
                button: MouseButton::Main,
            }],
            TargetMode::Pixel,
        );

        // Finish press and place release arrive in the same tick, in
        // that device order: the finish dispatches first, and its
        // restart swallows the release. Exactly one segment commits.
        rig.tick(
            Point::new(60.0, 60.0),
            &[
                RawEvent::MousePressed {
                    button: MouseButton::Secondary,
                },
                RawEvent::MouseReleased {
                    button: MouseButton::Main,
                },
            ],
            TargetMode::Pixel,
        );
        assert!(rig.tool.is_first_point);
        assert_eq!(
            rig.tool.lines_to_render,
            vec![Line::new(Point::new(10.0, 10.0), Point::new(60.0, 60.0))]
        );
    }

    #[test]
    fn test_tile_mode_commits_rasterized_cells() {
        let mut rig = Rig::new();
        // Cell (0,0) to cell (5,2) on a 16px grid.
        rig.click(Point::new(8.0, 8.0), TargetMode::Tile);
        rig.click(Point::new(88.0, 40.0), TargetMode::Tile);

        let (_, surface) = rig.render(TargetMode::Tile);
        let rects: Vec<_> = surface
            .commands()
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Rect { rect, .. } => (rect.x0 / 16.0, rect.y0 / 16.0),
                other => panic!("expected rect, got {other:?}"),
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                (0.0, 0.0),
                (1.0, 0.0),
                (2.0, 1.0),
                (3.0, 1.0),
                (4.0, 2.0),
                (5.0, 2.0),
            ]
        );
    }
}
