/// Tunable render parameters. The scale and shading constants are empirical and
/// kept as named values so output stays comparable between builds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Rays stop after traveling this many cells without hitting a wall.
    pub max_range: f64,
    /// Divisor applied to distance when projecting wall height.
    pub perspective_scale: f64,
    /// Brightness of a wall at distance 0.
    pub brightness_base: f64,
    /// Brightness lost per percent of `max_range` traveled.
    pub brightness_falloff: f64,
}

impl RenderConfig {
    pub const DEFAULT_MAX_RANGE: f64 = 20.0;
    pub const PERSPECTIVE_SCALE: f64 = 2.5;
    pub const BRIGHTNESS_BASE: f64 = 200.0;
    pub const BRIGHTNESS_FALLOFF: f64 = 2.0;

    // ===== output and camera defaults =====
    pub const DEFAULT_WIDTH: usize = 1024;
    pub const DEFAULT_HEIGHT: usize = 768;
    pub const DEFAULT_CAMERA_X: f64 = 10.0;
    pub const DEFAULT_CAMERA_Y: f64 = 7.0;

    pub fn new() -> Self {
        Self {
            max_range: Self::DEFAULT_MAX_RANGE,
            perspective_scale: Self::PERSPECTIVE_SCALE,
            brightness_base: Self::BRIGHTNESS_BASE,
            brightness_falloff: Self::BRIGHTNESS_FALLOFF,
        }
    }

    pub fn with_max_range(mut self, max_range: f64) -> Self {
        self.max_range = max_range;
        self
    }

    pub fn with_perspective_scale(mut self, perspective_scale: f64) -> Self {
        self.perspective_scale = perspective_scale;
        self
    }

    /// Shading becomes `base - falloff * percent_of_range`.
    pub fn with_brightness(mut self, base: f64, falloff: f64) -> Self {
        self.brightness_base = base;
        self.brightness_falloff = falloff;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}
