use image::{DynamicImage, imageops::FilterType};

use crate::{
    config::StageConfig,
    foundation::{
        core::{Canvas, Millis, Point, Raster, Viewport},
        error::{FaceError, FaceResult},
        random::{RandomSource, RngSource},
    },
    popup::{
        controller::{AmbientBitmap, AmbientEffect, PopupController},
        drag::DragSurface,
        window::PopupId,
    },
};

/// User input routed through [`Stage::handle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown {
        popup: PopupId,
        surface: DragSurface,
        at: Point,
    },
    PointerMove {
        at: Point,
    },
    PointerUp,
    /// Close button of one popup.
    Close(PopupId),
    /// Start a reconstruction pass from the current capture.
    Reconstruct,
    /// Drop popups, capture and ambient effect.
    Clear,
    /// Drop popups and pending spawns; the capture survives.
    Escape,
    Ambient {
        popup: PopupId,
        effect: AmbientEffect,
    },
    Resize(Viewport),
}

/// Application context: configuration, the latest capture and the popup controller.
#[derive(Debug)]
pub struct Stage {
    config: StageConfig,
    capture: Option<Raster>,
    controller: PopupController,
}

impl Stage {
    /// Build a stage seeded from `config.seed`, or from OS entropy when absent.
    pub fn new(config: StageConfig) -> FaceResult<Self> {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };
        Self::with_random(config, rng)
    }

    pub fn with_random(config: StageConfig, rng: Box<dyn RandomSource>) -> FaceResult<Self> {
        let controller = PopupController::from_config(&config, rng)?;
        Ok(Self {
            config,
            capture: None,
            controller,
        })
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn controller(&self) -> &PopupController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PopupController {
        &mut self.controller
    }

    pub fn has_capture(&self) -> bool {
        self.capture.is_some()
    }

    pub fn capture_raster(&self) -> Option<&Raster> {
        self.capture.as_ref()
    }

    /// Store `image` as the current capture, scaled to the zone canvas if needed.
    pub fn capture(&mut self, image: DynamicImage) {
        let target = self.controller.table().canvas();
        let rgba = image.into_rgba8();
        let raster = if Canvas::of(&rgba) == target {
            rgba
        } else {
            tracing::debug!(
                from_w = rgba.width(),
                from_h = rgba.height(),
                to_w = target.width,
                to_h = target.height,
                "scaling capture to zone canvas"
            );
            image::imageops::resize(&rgba, target.width, target.height, FilterType::Triangle)
        };
        self.capture = Some(raster);
    }

    /// Decode an encoded still (PNG, JPEG, ...) and store it as the capture.
    ///
    /// On failure the previous capture is kept.
    pub fn capture_encoded(&mut self, bytes: &[u8]) -> FaceResult<()> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| FaceError::decode(format!("capture: {e}")))?;
        self.capture(image);
        Ok(())
    }

    pub fn reconstruct(&mut self) -> bool {
        self.controller.reconstruct(self.capture.as_ref())
    }

    pub fn reset(&mut self) {
        self.controller.clear_ambient();
        self.controller.clear_all();
        self.capture = None;
    }

    /// Route one input event. Only ambient requests produce output.
    pub fn handle(&mut self, event: InputEvent) -> FaceResult<Option<AmbientBitmap>> {
        match event {
            InputEvent::PointerDown { popup, surface, at } => {
                self.controller.pointer_down(popup, surface, at);
            }
            InputEvent::PointerMove { at } => {
                self.controller.pointer_move(at);
            }
            InputEvent::PointerUp => {
                self.controller.pointer_up();
            }
            InputEvent::Close(id) => {
                self.controller.close(id);
            }
            InputEvent::Reconstruct => {
                self.reconstruct();
            }
            InputEvent::Clear => self.reset(),
            InputEvent::Escape => self.controller.clear_all(),
            InputEvent::Ambient { popup, effect } => {
                return self.controller.request_ambient(popup, effect);
            }
            InputEvent::Resize(viewport) => {
                self.controller.set_viewport(viewport)?;
                self.config.viewport = viewport;
            }
        }
        Ok(None)
    }

    pub fn advance_by(&mut self, delta_ms: u64) -> usize {
        self.controller.advance_by(delta_ms)
    }

    pub fn run_until_idle(&mut self) -> Millis {
        self.controller.run_until_idle()
    }
}

#[cfg(test)]
#[path = "../tests/unit/stage.rs"]
mod tests;
