use std::collections::BTreeMap;

use crate::{
    config::{StageConfig, TimingConfig},
    effects::catalog::filter_for,
    foundation::{
        core::{Millis, Point, Raster, Viewport},
        error::FaceResult,
        random::{RandomSource, shuffle},
    },
    layout::engine::LayoutEngine,
    popup::{
        drag::DragSurface,
        window::{Placement, Popup, PopupId},
    },
    schedule::queue::{Generation, TaskQueue},
    segment::segmenter::{Segment, segment},
    zones::table::ZoneTable,
};

/// Phase of the current reconstruction pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerState {
    /// No pass running and no live popups.
    Idle,
    /// Waiting for the segmenting step to fire.
    Segmenting,
    /// Staggered spawns still pending.
    Spawning,
    /// All spawns done; popups on screen.
    Live,
}

/// Full-screen background effect a popup can feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbientEffect {
    /// Tiled, rotating cylinder built from the fully filtered popup image.
    RotatingCylinder,
    /// Floating tile field built from the decoded surface, without style filters.
    ParticleFloat,
}

/// Bitmap handed to the ambient background collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientBitmap {
    pub source: PopupId,
    pub effect: AmbientEffect,
    pub raster: Raster,
}

#[derive(Debug)]
enum PopupTask {
    Segment { source: Raster },
    Spawn { segment: Segment, display_index: usize },
    Decode { popup: PopupId },
}

impl PopupTask {
    fn label(&self) -> &'static str {
        match self {
            PopupTask::Segment { .. } => "segment",
            PopupTask::Spawn { .. } => "spawn",
            PopupTask::Decode { .. } => "decode",
        }
    }
}

/// Owns the live popup set and drives reconstruction passes on a logical clock.
///
/// Nothing outside the controller creates or destroys popups. Deferred work
/// (segmenting, staggered spawns, surface decodes) sits in a generation-tagged queue so a
/// newer pass or a clear discards it deterministically.
pub struct PopupController {
    table: ZoneTable,
    layout: LayoutEngine,
    timing: TimingConfig,
    viewport: Viewport,
    rng: Box<dyn RandomSource>,
    popups: BTreeMap<PopupId, Popup>,
    queue: TaskQueue<PopupTask>,
    generation: Generation,
    state: ControllerState,
    now: Millis,
    next_id: u64,
    active_drag: Option<PopupId>,
}

impl std::fmt::Debug for PopupController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupController")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("now", &self.now)
            .field("popups", &self.popups.len())
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl PopupController {
    pub fn new(
        table: ZoneTable,
        layout: LayoutEngine,
        timing: TimingConfig,
        viewport: Viewport,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            table,
            layout,
            timing,
            viewport,
            rng,
            popups: BTreeMap::new(),
            queue: TaskQueue::new(),
            generation: Generation::default(),
            state: ControllerState::Idle,
            now: Millis::ZERO,
            next_id: 0,
            active_drag: None,
        }
    }

    pub fn from_config(config: &StageConfig, rng: Box<dyn RandomSource>) -> FaceResult<Self> {
        config.validate()?;
        let table = config.zone_table();
        let layout = LayoutEngine::new(table.canvas(), config.layout)?;
        Ok(Self::new(table, layout, config.timing, config.viewport, rng))
    }

    pub fn table(&self) -> &ZoneTable {
        &self.table
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Later spawns are placed against `viewport`; live popups keep their positions.
    pub fn set_viewport(&mut self, viewport: Viewport) -> FaceResult<()> {
        viewport.validate()?;
        self.viewport = viewport;
        Ok(())
    }

    /// Live popups in creation order.
    pub fn popups(&self) -> impl Iterator<Item = &Popup> {
        self.popups.values()
    }

    pub fn get(&self, id: PopupId) -> Option<&Popup> {
        self.popups.get(&id)
    }

    pub fn len(&self) -> usize {
        self.popups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    /// Deferred items still queued, stale ones included until they are pruned.
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    pub fn active_drag(&self) -> Option<PopupId> {
        self.active_drag
    }

    /// Tear down the current pass and schedule a new one from `captured`.
    ///
    /// Without a capture this is a silent no-op returning `false`.
    #[tracing::instrument(skip(self, captured), fields(generation))]
    pub fn reconstruct(&mut self, captured: Option<&Raster>) -> bool {
        let Some(source) = captured else {
            tracing::debug!("reconstruct requested without a capture");
            return false;
        };
        self.clear_all();
        tracing::Span::current().record("generation", self.generation.0);

        let due = self.now.saturating_add(self.timing.segment_delay_ms);
        self.queue.schedule(
            due,
            self.generation,
            PopupTask::Segment {
                source: source.clone(),
            },
        );
        self.state = ControllerState::Segmenting;
        true
    }

    /// Remove one popup. Unknown ids are ignored.
    pub fn close(&mut self, id: PopupId) -> bool {
        let removed = self.popups.remove(&id).is_some();
        if removed {
            if self.active_drag == Some(id) {
                self.active_drag = None;
            }
            tracing::debug!(%id, "popup closed");
            self.refresh_state();
        }
        removed
    }

    /// Remove every popup and cancel pending spawns and decodes.
    pub fn clear_all(&mut self) {
        self.popups.clear();
        self.active_drag = None;
        self.generation = self.generation.next();
        let pruned = self.queue.retain_generation(self.generation);
        if pruned > 0 {
            tracing::debug!(pruned, "dropped superseded deferred work");
        }
        self.state = ControllerState::Idle;
    }

    pub fn advance_by(&mut self, delta_ms: u64) -> usize {
        self.advance_to(self.now.saturating_add(delta_ms))
    }

    /// Run every task due at or before `target`, in order. Returns how many ran.
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, target: Millis) -> usize {
        let target = target.max(self.now);
        let mut ran = 0usize;
        while let Some(item) = self.queue.pop_due(target) {
            self.now = self.now.max(item.due);
            if item.generation != self.generation {
                tracing::debug!(
                    task = item.task.label(),
                    stale = item.generation.0,
                    current = self.generation.0,
                    "dropping stale task"
                );
                continue;
            }
            self.run_task(item.task);
            ran += 1;
        }
        self.now = target;
        self.refresh_state();
        ran
    }

    /// Advance until the queue drains; returns the final clock value.
    pub fn run_until_idle(&mut self) -> Millis {
        while let Some(due) = self.queue.next_due() {
            self.advance_to(due);
        }
        self.now
    }

    /// Begin dragging `id`. Returns `false` for unknown ids.
    pub fn pointer_down(&mut self, id: PopupId, surface: DragSurface, at: Point) -> bool {
        if !self.popups.contains_key(&id) {
            return false;
        }
        // Single pointer: a stray press ends whatever gesture was still open.
        if let Some(prev) = self.active_drag.take()
            && let Some(p) = self.popups.get_mut(&prev)
        {
            p.drag_mut().release();
        }
        let Some(popup) = self.popups.get_mut(&id) else {
            return false;
        };
        popup.drag_mut().press(at);
        self.active_drag = Some(id);
        tracing::trace!(%id, ?surface, "drag start");
        true
    }

    pub fn pointer_move(&mut self, at: Point) -> bool {
        let Some(id) = self.active_drag else {
            return false;
        };
        self.popups
            .get_mut(&id)
            .is_some_and(|p| p.drag_mut().move_to(at))
    }

    pub fn pointer_up(&mut self) -> bool {
        let Some(id) = self.active_drag.take() else {
            return false;
        };
        self.popups
            .get_mut(&id)
            .is_some_and(|p| p.drag_mut().release())
    }

    /// Produce the bitmap for `effect` from popup `id` and mark it as the ambient source.
    ///
    /// Returns `Ok(None)` when the popup is unknown or its surface is not decoded yet.
    pub fn request_ambient(
        &mut self,
        id: PopupId,
        effect: AmbientEffect,
    ) -> FaceResult<Option<AmbientBitmap>> {
        let Some(popup) = self.popups.get(&id) else {
            return Ok(None);
        };
        let raster = match effect {
            AmbientEffect::RotatingCylinder => popup.render()?,
            AmbientEffect::ParticleFloat => popup.surface().cloned(),
        };
        let Some(raster) = raster else {
            tracing::warn!(%id, ?effect, "ambient source has no decoded image yet");
            return Ok(None);
        };
        for p in self.popups.values_mut() {
            p.set_ambient_effect_active(p.id() == id);
        }
        Ok(Some(AmbientBitmap {
            source: id,
            effect,
            raster,
        }))
    }

    pub fn clear_ambient(&mut self) {
        for p in self.popups.values_mut() {
            p.set_ambient_effect_active(false);
        }
    }

    fn run_task(&mut self, task: PopupTask) {
        match task {
            PopupTask::Segment { source } => self.run_segment(&source),
            PopupTask::Spawn {
                segment,
                display_index,
            } => self.spawn(segment, display_index),
            PopupTask::Decode { popup } => match self.popups.get_mut(&popup) {
                Some(p) => p.decode_surface(),
                None => tracing::debug!(id = %popup, "decode for closed popup dropped"),
            },
        }
    }

    fn run_segment(&mut self, source: &Raster) {
        let mut order = segment(source, &self.table);
        shuffle(&mut order, self.rng.as_mut());
        tracing::debug!(
            segments = order.len(),
            display_order = ?order.iter().map(Segment::zone_name).collect::<Vec<_>>(),
            "spawning"
        );
        for (display_index, segment) in order.into_iter().enumerate() {
            let delay = (display_index as u64).saturating_mul(self.timing.spawn_stagger_ms);
            self.queue.schedule(
                self.now.saturating_add(delay),
                self.generation,
                PopupTask::Spawn {
                    segment,
                    display_index,
                },
            );
        }
        self.state = ControllerState::Spawning;
    }

    fn spawn(&mut self, segment: Segment, display_index: usize) {
        let size = self.layout.size_for(&segment);
        let base_position =
            self.layout
                .position_for(&segment, size, self.viewport, self.rng.as_mut());
        let placement = Placement {
            display_index,
            size,
            container: self.layout.container(),
            base_position,
            base_z_index: LayoutEngine::z_index_for(segment.zone_name()),
            filter: filter_for(display_index),
        };

        let id = PopupId(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            %id,
            zone = segment.zone_name(),
            filter = %placement.filter.name,
            display_index,
            "popup spawned"
        );
        self.popups.insert(id, Popup::new(id, segment, placement));
        self.queue
            .schedule(self.now, self.generation, PopupTask::Decode { popup: id });
    }

    fn refresh_state(&mut self) {
        let current = self.generation;
        let segmenting = self
            .queue
            .count_where(|g, t| g == current && matches!(t, PopupTask::Segment { .. }));
        let spawning = self
            .queue
            .count_where(|g, t| g == current && matches!(t, PopupTask::Spawn { .. }));
        self.state = if segmenting > 0 {
            ControllerState::Segmenting
        } else if spawning > 0 {
            ControllerState::Spawning
        } else if !self.popups.is_empty() {
            ControllerState::Live
        } else {
            ControllerState::Idle
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/popup/controller.rs"]
mod tests;
