use crate::foundation::error::{FaceError, FaceResult};

pub use kurbo::{Point, Size, Vec2};

/// Straight-alpha RGBA8 raster used for captures, segments and popup surfaces.
pub type Raster = image::RgbaImage;

/// Integer pixel dimensions of a raster or source canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of(raster: &Raster) -> Self {
        let (width, height) = raster.dimensions();
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Round a fractional size to whole pixels, never below 1x1.
    pub fn from_size_rounded(size: Size) -> Self {
        fn px(v: f64) -> u32 {
            if !v.is_finite() {
                return 1;
            }
            (v.round().max(1.0)).min(f64::from(u32::MAX)) as u32
        }
        Self {
            width: px(size.width),
            height: px(size.height),
        }
    }
}

/// Visible screen area popups are laid out in, in CSS-like pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> FaceResult<Self> {
        let v = Self { width, height };
        v.validate()?;
        Ok(v)
    }

    pub fn validate(self) -> FaceResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(FaceError::validation("viewport dimensions must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FaceError::validation("viewport dimensions must be > 0"));
        }
        Ok(())
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Logical timestamp in milliseconds on the controller's clock.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub fn saturating_add(self, delta: u64) -> Self {
        Self(self.0.saturating_add(delta))
    }
}
