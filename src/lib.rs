//! facepop slices a captured face image into fixed zones and turns each zone into a
//! filtered, draggable popup window.
//!
//! The public API is stage-oriented:
//!
//! - Build a [`Stage`] from a [`StageConfig`]
//! - Feed it a capture and call [`Stage::reconstruct`]
//! - Drive the logical clock with [`Stage::advance_by`] or [`Stage::run_until_idle`]
//! - Route user input through [`Stage::handle`]
//!
//! Rendering to a real screen and the ambient background effects are left to the host; the
//! crate hands out rasters ([`Popup::render`], [`AmbientBitmap`]) and layout data.
#![forbid(unsafe_code)]

mod config;
mod effects;
mod foundation;
mod layout;
mod popup;
mod schedule;
mod segment;
mod stage;
mod zones;

pub use crate::foundation::core::{Canvas, Millis, Point, Raster, Size, Vec2, Viewport};
pub use crate::foundation::error::{FaceError, FaceResult};
pub use crate::foundation::random::{RandomSource, RngSource, ScriptedSource, shuffle};

pub use crate::config::{StageConfig, TimingConfig};
pub use crate::effects::catalog::{FILTER_CATALOG, FilterKind, FilterName, FilterSpec, filter_for};
pub use crate::effects::pixel::{
    DOT_BLOCK_PX, PixelTransform, THRESHOLD_ZERO_LEVEL, fit_to_container, pixelate_in_place,
    threshold_zero_in_place,
};
pub use crate::effects::style::{StyleOp, apply_style_stack};
pub use crate::layout::engine::{
    DEFAULT_Z_INDEX, DRAGGING_Z_INDEX, LayoutConfig, LayoutEngine, position_preset,
};
pub use crate::popup::controller::{
    AmbientBitmap, AmbientEffect, ControllerState, PopupController,
};
pub use crate::popup::drag::{DragController, DragSurface};
pub use crate::popup::window::{Popup, PopupId, PopupSnapshot};
pub use crate::schedule::queue::{Generation, Scheduled, TaskQueue};
pub use crate::segment::segmenter::{Segment, segment};
pub use crate::stage::{InputEvent, Stage};
pub use crate::zones::table::{Zone, ZoneTable};
