// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing interfaces to the external renderer.
//!
//! The core never touches pixels. Tools record [`DrawCommand`]s into a
//! [`CommandBuffer`] (the pending-commit buffer) or an overlay target,
//! and a [`Surface`] implementation owned by the host composites the
//! buffer onto its persistent off-screen store.

use crate::color::Color;
use kurbo::{Point, Rect, Size};

// ===== Styles and commands =====

/// Stroke style for line drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub alpha: f64,
}

impl LineStyle {
    /// A 1px opaque stroke.
    pub fn new(color: Color) -> Self {
        LineStyle {
            color,
            width: 1.0,
            alpha: 1.0,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        style: LineStyle,
    },
    Rect {
        rect: Rect,
        fill: Option<Color>,
        line: Option<LineStyle>,
    },
}

// ===== Targets =====

/// Something draw calls can be issued against: the per-frame overlay or
/// the pending-commit buffer.
pub trait DrawTarget {
    fn clear(&mut self);
    /// Set the stroke style used by subsequent `draw_line` calls.
    fn line_style(&mut self, style: LineStyle);
    fn draw_line(&mut self, from: Point, to: Point);
    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, line: Option<LineStyle>);
}

/// The persistent off-screen store owned by the renderer.
pub trait Surface {
    /// Composite the buffer's commands onto the persistent store, in
    /// recording order, draining the buffer. `clear_first` wipes the
    /// store before compositing.
    fn composite(&mut self, buffer: &mut CommandBuffer, clear_first: bool);

    /// Resize the store. Content inside the overlap of the old and new
    /// extents must be preserved; this is a resize, not a recreate.
    fn resize(&mut self, size: Size);
}

// ===== Command buffer =====

/// An in-memory [`DrawTarget`] recording commands for later compositing.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    style: Option<LineStyle>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands in recording order.
    pub fn drain(&mut self) -> impl Iterator<Item = DrawCommand> + '_ {
        self.commands.drain(..)
    }

    fn current_style(&self) -> LineStyle {
        self.style.unwrap_or(LineStyle::new(Color::BLACK))
    }
}

impl DrawTarget for CommandBuffer {
    fn clear(&mut self) {
        self.commands.clear();
        self.style = None;
    }

    fn line_style(&mut self, style: LineStyle) {
        self.style = Some(style);
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        let style = self.current_style();
        self.commands.push(DrawCommand::Line { from, to, style });
    }

    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, line: Option<LineStyle>) {
        self.commands.push(DrawCommand::Rect { rect, fill, line });
    }
}

// ===== Retained surface =====

/// A [`Surface`] keeping the committed command queue in memory. Suitable
/// for headless use and tests; a GPU-backed host would rasterize into a
/// texture instead.
#[derive(Debug, Default)]
pub struct RetainedSurface {
    commands: Vec<DrawCommand>,
    size: Size,
}

impl RetainedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything composited so far, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl Surface for RetainedSurface {
    fn composite(&mut self, buffer: &mut CommandBuffer, clear_first: bool) {
        if clear_first {
            self.commands.clear();
        }
        self.commands.extend(buffer.drain());
    }

    fn resize(&mut self, size: Size) {
        // Commands are resolution-independent; the retained queue is the
        // preserved content.
        self.size = size;
    }
}

// ===== Grid overlay =====

/// Draw the cell grid for `bounds` at the given cell pitch, with
/// emphasized center lines when the rect extends past the origin.
pub fn draw_grid(target: &mut dyn DrawTarget, style: LineStyle, bounds: Rect, cell_size: Size) {
    target.line_style(style);

    let columns = (bounds.width() / cell_size.width).ceil() as i64;
    let rows = (bounds.height() / cell_size.height).ceil() as i64;

    for column in 0..=columns {
        let x = bounds.x0 + column as f64 * cell_size.width;
        target.draw_line(Point::new(x, bounds.y0), Point::new(x, bounds.y1));
    }
    for row in 0..=rows {
        let y = bounds.y0 + row as f64 * cell_size.height;
        target.draw_line(Point::new(bounds.x0, y), Point::new(bounds.x1, y));
    }

    // Emphasize the mid lines when the view reaches past the grid edge,
    // so the grid center stays readable.
    let emphasis = style.with_width(1.5);
    if bounds.y0 < 0.0 {
        target.line_style(emphasis);
        let x = bounds.x0 + (columns / 2) as f64 * cell_size.width;
        target.draw_line(Point::new(x, bounds.y0), Point::new(x, bounds.y1));
    }
    if bounds.x0 < 0.0 {
        target.line_style(emphasis);
        let y = bounds.y0 + (rows / 2) as f64 * cell_size.height;
        target.draw_line(Point::new(bounds.x0, y), Point::new(bounds.x1, y));
    }
    target.line_style(style);
}
