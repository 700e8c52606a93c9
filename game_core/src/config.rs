use crate::params::Params;

/// Platform class the field is rendered on. Affects object counts and
/// minimum sizes, not behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

/// Accessibility settings snapshot, read-only for the simulation
#[derive(Debug, Clone, Copy)]
pub struct Accessibility {
    pub high_contrast: bool,
    pub color_blind: bool,
    pub screen_reader: bool,
    pub keyboard_nav: bool,
    pub reduced_motion: bool,
    pub large_text: bool,
    pub sound: bool,
}

impl Default for Accessibility {
    fn default() -> Self {
        Self {
            high_contrast: false,
            color_blind: false,
            screen_reader: false,
            keyboard_nav: false,
            reduced_motion: false,
            large_text: false,
            sound: true,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub device: DeviceClass,
    pub access: Accessibility,
    /// Rendered field edge in px; object sizes are px and get converted
    /// to field percentages for hit tests.
    pub field_size_px: f32,
    pub zoom_scale: f32,
    pub found_display_delay: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DeviceClass::default(),
            access: Accessibility::default(),
            field_size_px: Params::FIELD_SIZE_PX,
            zoom_scale: Params::ZOOM_SCALE,
            found_display_delay: Params::FOUND_DISPLAY_DELAY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Half extent of a px-sized object in field percent, for hit tests
    pub fn half_extent_pct(&self, size_px: f32) -> f32 {
        size_px / self.field_size_px * 100.0 / 2.0
    }
}
