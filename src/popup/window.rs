use crate::{
    effects::{
        catalog::{FilterKind, FilterName, FilterSpec},
        pixel::fit_to_container,
        style::apply_style_stack,
    },
    foundation::{
        core::{Canvas, Point, Raster, Size, Vec2},
        error::FaceResult,
    },
    layout::engine::DRAGGING_Z_INDEX,
    popup::drag::DragController,
    segment::segmenter::Segment,
};

/// Identifier of a live popup, unique for the controller's lifetime.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PopupId(pub u64);

impl std::fmt::Display for PopupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "popup#{}", self.0)
    }
}

/// Live, draggable window hosting one filtered segment.
#[derive(Clone, Debug)]
pub struct Popup {
    id: PopupId,
    segment: Segment,
    display_index: usize,
    size: Size,
    container: Canvas,
    base_position: Point,
    base_z_index: i32,
    filter: FilterSpec,
    drag: DragController,
    surface: Option<Raster>,
    ambient_effect_active: bool,
}

/// Everything the controller decided for a popup at spawn time.
#[derive(Clone, Debug)]
pub(crate) struct Placement {
    pub(crate) display_index: usize,
    pub(crate) size: Size,
    pub(crate) container: Canvas,
    pub(crate) base_position: Point,
    pub(crate) base_z_index: i32,
    pub(crate) filter: FilterSpec,
}

impl Popup {
    pub(crate) fn new(id: PopupId, segment: Segment, placement: Placement) -> Self {
        Self {
            id,
            segment,
            display_index: placement.display_index,
            size: placement.size,
            container: placement.container,
            base_position: placement.base_position,
            base_z_index: placement.base_z_index,
            filter: placement.filter,
            drag: DragController::new(),
            surface: None,
            ambient_effect_active: false,
        }
    }

    pub fn id(&self) -> PopupId {
        self.id
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn zone_name(&self) -> &str {
        self.segment.zone_name()
    }

    pub fn display_index(&self) -> usize {
        self.display_index
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Pixel size of the decoded surface.
    pub fn container(&self) -> Canvas {
        self.container
    }

    pub fn base_position(&self) -> Point {
        self.base_position
    }

    pub fn drag_offset(&self) -> Vec2 {
        self.drag.offset()
    }

    /// Where the popup is drawn: base position plus drag offset.
    pub fn rendered_position(&self) -> Point {
        self.base_position + self.drag.offset()
    }

    pub fn base_z_index(&self) -> i32 {
        self.base_z_index
    }

    /// Effective stacking value; raised above every zone value while dragged.
    pub fn z_index(&self) -> i32 {
        if self.drag.is_dragging() {
            DRAGGING_Z_INDEX
        } else {
            self.base_z_index
        }
    }

    pub fn filter(&self) -> FilterSpec {
        self.filter
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn ambient_effect_active(&self) -> bool {
        self.ambient_effect_active
    }

    /// True once the decode step has produced a surface.
    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    /// Container-sized pixels after any pixel transform, before style filters.
    pub fn surface(&self) -> Option<&Raster> {
        self.surface.as_ref()
    }

    /// Surface with the style stack composited in; `None` until decoded.
    pub fn render(&self) -> FaceResult<Option<Raster>> {
        let Some(surface) = &self.surface else {
            return Ok(None);
        };
        match self.filter.kind {
            FilterKind::PixelTransform => Ok(Some(surface.clone())),
            FilterKind::Style => apply_style_stack(surface, &self.filter.style_stack()).map(Some),
        }
    }

    pub fn snapshot(&self) -> PopupSnapshot {
        PopupSnapshot {
            id: self.id,
            zone: self.zone_name().to_string(),
            filter: self.filter.name,
            display_index: self.display_index,
            creation_index: self.segment.creation_index,
            width: self.size.width,
            height: self.size.height,
            base_x: self.base_position.x,
            base_y: self.base_position.y,
            offset_x: self.drag.offset().x,
            offset_y: self.drag.offset().y,
            z_index: self.z_index(),
            ready: self.is_ready(),
        }
    }

    pub(crate) fn drag_mut(&mut self) -> &mut DragController {
        &mut self.drag
    }

    pub(crate) fn set_ambient_effect_active(&mut self, active: bool) {
        self.ambient_effect_active = active;
    }

    /// Scale the crop to the container and run the pixel transform, once.
    pub(crate) fn decode_surface(&mut self) {
        if self.surface.is_some() {
            return;
        }
        let mut surface = fit_to_container(&self.segment.pixels, self.container);
        if let Some(transform) = self.filter.pixel_transform() {
            transform.apply(&mut surface);
        }
        self.surface = Some(surface);
    }
}

/// Serializable view of a popup for manifests and debugging.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PopupSnapshot {
    pub id: PopupId,
    pub zone: String,
    pub filter: FilterName,
    pub display_index: usize,
    pub creation_index: usize,
    pub width: f64,
    pub height: f64,
    pub base_x: f64,
    pub base_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub z_index: i32,
    pub ready: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/popup/window.rs"]
mod tests;
