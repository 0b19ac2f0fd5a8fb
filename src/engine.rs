// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! The interaction core's tick loop.
//!
//! The host shell owns the window, the renderer, and the event sources;
//! the engine owns everything in between. Each frame the host queues
//! raw events and calls [`Engine::tick`] with its overlay target and
//! persistent surface. All draw commands the engine emits are in world
//! coordinates; the host applies the viewport transform when it paints.
//!
//! Tick order is fixed: drain input, refresh pointer movement, pan,
//! tool input/update, wheel zoom, target-mode cycling, status readout,
//! late input bookkeeping, then rendering.

use crate::config::Config;
use crate::geometry::Cell;
use crate::grid::{Grid, GridError, GridSetup};
use crate::input::{ButtonEvent, Input, Key, MouseButton, RawEvent};
use crate::surface::{CommandBuffer, DrawTarget, LineStyle, Surface, draw_grid};
use crate::tools::{Frame, TargetMode, ToolCtx, ToolId, Toolbar};
use crate::viewport::Viewport;
use kurbo::{Point, Size};
use tracing::info;

// ===== Status readout =====

/// Per-frame readout for the host's status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub pointer_world: Point,
    pub pointer_cell: Cell,
    pub zoom_percent: f64,
    pub target_mode: TargetMode,
    pub selected_tool: Option<ToolId>,
}

/// Receives the status readout once per tick.
pub trait StatusSink {
    fn push_status(&mut self, status: &Status);
}

// ===== Engine =====

pub struct Engine {
    input: Input,
    viewport: Viewport,
    toolbar: Toolbar,
    grid: Option<Grid>,
    target_mode: TargetMode,
    config: Config,
    buffer: CommandBuffer,
    status_sink: Option<Box<dyn StatusSink>>,
    /// Surface resize owed to the host, applied at the next tick.
    pending_resize: Option<Size>,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        let toolbar = Toolbar::new();
        let mut input = Input::new();
        toolbar.register_sources(&mut input);
        // The pan button and mode-cycle key are engine-level bindings.
        input.mouse_button(MouseButton::Secondary);
        input.key(Key::Tab);

        Engine {
            input,
            viewport: Viewport::new(config.pan, config.zoom),
            toolbar,
            grid: None,
            target_mode: TargetMode::default(),
            config,
            buffer: CommandBuffer::new(),
            status_sink: None,
            pending_resize: None,
        }
    }

    // ===== Host-facing setup =====

    /// Apply a grid setup message: validates, installs the grid, resets
    /// the view, and schedules a surface resize for the next tick.
    pub fn apply_setup(&mut self, setup: &GridSetup) -> Result<(), GridError> {
        let grid = Grid::from_setup(setup)?;
        info!(
            columns = grid.columns(),
            rows = grid.rows(),
            "grid setup applied"
        );
        self.viewport.set_grid_size(grid.size());
        self.pending_resize = Some(grid.size());
        self.grid = Some(grid);
        Ok(())
    }

    pub fn set_screen_size(&mut self, size: Size) {
        self.viewport.set_screen_size(size);
    }

    /// Queue a raw device event for the next tick.
    pub fn push_event(&mut self, event: RawEvent) {
        self.input.push(event);
    }

    pub fn select_tool(&mut self, id: ToolId) {
        self.toolbar.select(id);
    }

    /// Select by toolbar button element id; returns whether it resolved.
    pub fn select_tool_element(&mut self, element_id: &str) -> bool {
        self.toolbar.select_by_element(element_id)
    }

    pub fn set_status_sink(&mut self, sink: Box<dyn StatusSink>) {
        self.status_sink = Some(sink);
    }

    /// Re-frame the view to the initial framing for the current grid.
    pub fn reset_view(&mut self) {
        self.viewport.reset_view();
    }

    /// Center the grid in the view on both axes.
    pub fn centralize_view(&mut self) {
        self.viewport.centralize_view();
    }

    // ===== Accessors =====

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn target_mode(&self) -> TargetMode {
        self.target_mode
    }

    pub fn selected_tool(&self) -> Option<ToolId> {
        self.toolbar.selected()
    }

    // ===== Tick =====

    /// Run one frame.
    pub fn tick(&mut self, delta: f64, overlay: &mut dyn DrawTarget, surface: &mut dyn Surface) {
        self.input.update(delta);

        // Without a grid there is nothing to draw on; keep draining input
        // so the first tick after setup starts from current state.
        let Some(grid) = self.grid else {
            self.input.late_update(Point::ZERO);
            return;
        };

        if let Some(size) = self.pending_resize.take() {
            surface.resize(size);
        }

        let world = self.input.pointer_world(&self.viewport, grid.size());
        self.input.refresh_movement(world);

        self.handle_pan();

        let ctx = ToolCtx {
            input: &self.input,
            viewport: &self.viewport,
            grid: &grid,
            target_mode: self.target_mode,
            config: &self.config,
        };
        self.toolbar.update(delta, &ctx);

        self.handle_zoom(grid);
        self.handle_target_mode();
        self.push_status(grid);

        // Zoom and pan may have moved the world under the pointer; the
        // movement baseline uses the post-update mapping.
        let world = self.input.pointer_world(&self.viewport, grid.size());
        self.input.late_update(world);

        self.render(grid, overlay, surface);
    }

    /// Pan with the secondary button: anchor on press, step each held
    /// frame, drop the anchor on release.
    fn handle_pan(&mut self) {
        for event in self.input.mouse_events(MouseButton::Secondary) {
            match event {
                ButtonEvent::Pressed => self.viewport.begin_pan(self.input.pointer_global()),
                ButtonEvent::Released => self.viewport.end_pan(),
                ButtonEvent::Down | ButtonEvent::Up => {}
            }
        }
        if self.input.is_mouse_down(MouseButton::Secondary) {
            self.viewport.pan_step(self.input.pointer_global());
        }
    }

    fn handle_zoom(&mut self, grid: Grid) {
        let wheel = self.input.wheel_delta();
        if wheel == 0.0 {
            return;
        }
        let pointer_world = self.input.pointer_world(&self.viewport, grid.size());
        self.viewport.wheel_zoom(wheel, pointer_world);
    }

    fn handle_target_mode(&mut self) {
        if self
            .input
            .key_events(Key::Tab)
            .contains(&ButtonEvent::Pressed)
        {
            self.target_mode = self.target_mode.cycled();
            info!(mode = self.target_mode.label(), "target mode cycled");
        }
    }

    fn push_status(&mut self, grid: Grid) {
        let Some(sink) = self.status_sink.as_mut() else {
            return;
        };
        let pointer_world = self.input.pointer_world(&self.viewport, grid.size());
        let status = Status {
            pointer_world,
            pointer_cell: grid.cell_at(pointer_world),
            zoom_percent: self.viewport.zoom() * 100.0,
            target_mode: self.target_mode,
            selected_tool: self.toolbar.selected(),
        };
        sink.push_status(&status);
    }

    fn render(&mut self, grid: Grid, overlay: &mut dyn DrawTarget, surface: &mut dyn Surface) {
        overlay.clear();
        draw_grid(
            overlay,
            LineStyle::new(self.config.colors.grid_line),
            grid.bounds(),
            grid.cell_size(),
        );

        let ctx = ToolCtx {
            input: &self.input,
            viewport: &self.viewport,
            grid: &grid,
            target_mode: self.target_mode,
            config: &self.config,
        };
        let mut frame = Frame {
            overlay,
            buffer: &mut self.buffer,
            surface,
        };
        self.toolbar.render(&mut frame, &ctx);
    }
}
