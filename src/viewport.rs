// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Pan/zoom viewport state and coordinate-space mapping.
//!
//! The view position is stored in view space (world units scaled by the
//! current zoom): `screen = world * zoom - view_pos`, and the inverse
//! `world = (screen + view_pos) / zoom`. The two are exactly invertible
//! for any zoom and view position. Pan clamping also happens in view
//! space, with the overscroll margin kept in unzoomed grid units.

use crate::config::{PanConfig, ZoomConfig};
use kurbo::{Point, Size, Vec2};

/// Pan/zoom state; maps between screen, world, and grid-cell spaces.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// View-space offset subtracted from zoomed world coordinates.
    view_pos: Point,
    zoom: f64,
    screen_size: Size,
    grid_size: Size,
    /// Device position captured when the pan button was pressed.
    pan_anchor: Option<Point>,
    pan: PanConfig,
    zoom_cfg: ZoomConfig,
}

impl Viewport {
    pub fn new(pan: PanConfig, zoom_cfg: ZoomConfig) -> Self {
        Viewport {
            view_pos: Point::ZERO,
            zoom: 1.0,
            screen_size: Size::ZERO,
            grid_size: Size::ZERO,
            pan_anchor: None,
            pan,
            zoom_cfg,
        }
    }

    /// A viewport with default tuning, mainly for tests.
    pub fn with_defaults() -> Self {
        Viewport::new(PanConfig::default(), ZoomConfig::default())
    }

    // ===== Accessors =====

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn view_pos(&self) -> Point {
        self.view_pos
    }

    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    pub fn set_screen_size(&mut self, size: Size) {
        self.screen_size = size;
    }

    /// Install the grid's world-pixel extent and reset the view.
    pub fn set_grid_size(&mut self, size: Size) {
        self.grid_size = size;
        self.reset_view();
    }

    // ===== Coordinate mapping =====

    /// World -> screen. Exact inverse of [`to_world`](Self::to_world).
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom - self.view_pos.x,
            world.y * self.zoom - self.view_pos.y,
        )
    }

    /// Screen -> world. Exact inverse of [`to_screen`](Self::to_screen).
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x + self.view_pos.x) / self.zoom,
            (screen.y + self.view_pos.y) / self.zoom,
        )
    }

    // ===== Pan =====

    /// Record the pan anchor at pan-button press. Displacement is measured
    /// against this point, not frame to frame.
    pub fn begin_pan(&mut self, pointer_global: Point) {
        self.pan_anchor = Some(pointer_global);
    }

    pub fn end_pan(&mut self) {
        self.pan_anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Advance the pan by one frame: the pointer's displacement from the
    /// anchor, normalized by half the screen size, scaled by the max pan
    /// speed and the current zoom.
    pub fn pan_step(&mut self, pointer_global: Point) {
        let Some(anchor) = self.pan_anchor else {
            return;
        };
        let half_w = self.screen_size.width / 2.0;
        let half_h = self.screen_size.height / 2.0;
        if half_w == 0.0 || half_h == 0.0 {
            return;
        }

        let displacement = pointer_global - anchor;
        let speed = self.pan.max_speed * self.zoom;
        let movement = Vec2::new(
            displacement.x / half_w * speed,
            displacement.y / half_h * speed,
        );
        self.view_pos = self.clamp_view_pos(self.view_pos + movement);
    }

    /// Clamp a candidate view position per axis. An axis whose zoomed
    /// content (plus overscroll) fits inside the screen is centered
    /// instead of clamped.
    fn clamp_view_pos(&self, pos: Point) -> Point {
        let x = Self::clamp_axis(
            pos.x,
            self.grid_size.width,
            self.grid_size.width * self.pan.overscroll_x,
            self.screen_size.width,
            self.zoom,
        );
        let y = Self::clamp_axis(
            pos.y,
            self.grid_size.height,
            self.grid_size.height * self.pan.overscroll_y,
            self.screen_size.height,
            self.zoom,
        );
        Point::new(x, y)
    }

    fn clamp_axis(value: f64, grid: f64, extra: f64, screen: f64, zoom: f64) -> f64 {
        let zoomed = grid * zoom;
        if zoomed + 2.0 * extra < screen {
            // Content already fits: force the centered position.
            -(screen - zoomed) / 2.0
        } else {
            value.clamp(-extra, zoomed + extra - screen)
        }
    }

    // ===== Zoom =====

    /// Apply one wheel-driven zoom step, keeping the point under the
    /// cursor visually anchored: the position correction uses the ratio
    /// of new to old zoom and is applied before the zoom commits.
    pub fn wheel_zoom(&mut self, wheel: f64, pointer_world: Point) {
        if wheel == 0.0 {
            return;
        }
        let step = self.zoom_cfg.step * wheel.signum();
        let new_zoom = (self.zoom + step).clamp(self.zoom_cfg.min, self.zoom_cfg.max);
        let ratio = new_zoom / self.zoom;
        self.view_pos += pointer_world.to_vec2() * (ratio - 1.0);
        self.zoom = new_zoom;
    }

    // ===== View reset =====

    /// Center the view on both axes.
    pub fn centralize_view(&mut self) {
        let zoomed_w = self.grid_size.width * self.zoom;
        let zoomed_h = self.grid_size.height * self.zoom;
        self.view_pos = Point::new(
            -(self.screen_size.width - zoomed_w) / 2.0,
            -(self.screen_size.height - zoomed_h) / 2.0,
        );
    }

    /// Reset to the initial framing: per axis, centered when the content
    /// fits, otherwise pinned to the left overscroll margin (x) and the
    /// bottom edge (y).
    pub fn reset_view(&mut self) {
        let extra_x = self.grid_size.width * self.pan.overscroll_x;
        let extra_y = self.grid_size.height * self.pan.overscroll_y;
        let zoomed_w = self.grid_size.width * self.zoom;
        let zoomed_h = self.grid_size.height * self.zoom;

        let x = if zoomed_w + 2.0 * extra_x < self.screen_size.width {
            -(self.screen_size.width - zoomed_w) / 2.0
        } else {
            -extra_x
        };
        let y = if zoomed_h + 2.0 * extra_y < self.screen_size.height {
            -(self.screen_size.height - zoomed_h) / 2.0
        } else {
            zoomed_h + extra_y - self.screen_size.height
        };
        self.view_pos = Point::new(x, y);
    }
}
