use {
    crate::error::{Error, Result},
    clap::ValueEnum,
    image::Rgb,
    static_assertions::const_assert,
    std::path::PathBuf,
};

pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf";
pub const DEFAULT_FONT_SIZE: f32 = 12.0_f32;
pub const DEFAULT_LINE_SPACING: f32 = 1.8_f32;
pub const DEFAULT_SCALE: u32 = 10_u32;

const_assert!(DEFAULT_SCALE >= 1_u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Background {
    #[default]
    Black,
    White,
}

impl Background {
    pub fn rgb(self) -> Rgb<u8> {
        match self {
            Self::Black => Rgb([u8::MIN; 3_usize]),
            Self::White => Rgb([u8::MAX; 3_usize]),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlyphConfig {
    /// Path to a fixed-advance TrueType/OpenType font.
    pub font_path: PathBuf,

    /// The em size in pixels.
    pub font_size: f32,

    /// Multiplier applied to the height of `A` to get the distance between rows.
    pub line_spacing: f32,

    pub background: Background,
}

impl GlyphConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.font_size.is_finite() && self.font_size > 0.0_f32) {
            Err(Error::InvalidConfig("font size must be a positive number"))
        } else if !(self.line_spacing.is_finite() && self.line_spacing > 0.0_f32) {
            Err(Error::InvalidConfig("line spacing must be a positive number"))
        } else {
            Ok(())
        }
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            font_path: DEFAULT_FONT_PATH.into(),
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
            background: Background::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelConfig {
    /// Integer upscaling factor; each cell becomes a `scale`x`scale` block.
    pub scale: u32,
    pub background: Background,
}

impl PixelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0_u32 {
            Err(Error::InvalidConfig("scale must be at least 1"))
        } else {
            Ok(())
        }
    }
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            background: Background::default(),
        }
    }
}
