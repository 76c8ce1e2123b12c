//! Per-popup image filters.
//!
//! Style filters are render-time adjustment stacks over premultiplied RGBA8; pixel
//! transforms rewrite the decoded surface once.

pub(crate) mod blur;
pub(crate) mod catalog;
pub(crate) mod composite;
pub(crate) mod pixel;
pub(crate) mod style;
