//! Converts text containing ANSI truecolor sequences (`ESC[38;2;R;G;Bm` followed by a single
//! character) into raster images, either by drawing each character's glyph in its color or by
//! drawing one pixel per character and upscaling with nearest-neighbor.

pub mod cli;
pub mod config;
pub mod error;
pub mod font;
pub mod logging;
pub mod parser;
pub mod reader;
pub mod render;

pub use {
    config::{Background, GlyphConfig, PixelConfig},
    error::{Error, FontError, Result},
    parser::{Cell, Grid},
    render::{convert, ConvertSummary, GlyphRasterizer, PixelRasterizer, Rasterizer},
};
