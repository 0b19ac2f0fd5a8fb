// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Gridpad: the interaction core of a grid-based drawing surface.
//!
//! The crate is host-agnostic: a shell owns the window and the actual
//! renderer, feeds raw device events in through [`Engine::push_event`],
//! and drives [`Engine::tick`] once per frame with its overlay target
//! and persistent [`Surface`]. Everything in between -- button state
//! machines, tool dispatch, pan/zoom mapping, grid rasterization -- is
//! handled here.

pub mod color;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod raster;
pub mod surface;
pub mod tools;
pub mod viewport;

pub use color::Color;
pub use config::Config;
pub use engine::{Engine, Status, StatusSink};
pub use geometry::Cell;
pub use grid::{Grid, GridSetup};
pub use input::{Input, Key, MouseButton, RawEvent};
pub use surface::{CommandBuffer, DrawCommand, DrawTarget, Surface};
pub use tools::{TargetMode, ToolId, Toolbar};
pub use viewport::Viewport;

/// Initialize the tracing subscriber (can be controlled via RUST_LOG
/// env var).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridpad=info".parse().unwrap()),
        )
        .init();
}
