pub mod glyph;
pub mod pixel;

pub use self::{glyph::GlyphRasterizer, pixel::PixelRasterizer};

use {
    crate::{
        error::{Error, Result},
        parser::Grid,
        reader::read_lines,
    },
    image::{Rgb, RgbImage},
    log::info,
    std::path::Path,
};

/// A strategy for turning a parsed [`Grid`] into an RGB canvas.
pub trait Rasterizer {
    /// Renders `grid`. Fails with [`Error::EmptyInput`] if `grid` has no cells.
    fn render(&self, grid: &Grid) -> Result<RgbImage>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertSummary {
    pub rows: usize,
    pub columns: usize,
    pub width: u32,
    pub height: u32,
}

pub(crate) fn new_canvas(width: u32, height: u32, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, background)
}

/// The largest canvas, in pixels, that will be allocated (384 MiB of RGB).
pub const MAX_CANVAS_PIXELS: u64 = 1_u64 << 27_u32;

/// `cells * cell_pixels` in each dimension, or [`Error::CanvasTooLarge`] if either doesn't fit in
/// a `u32` or the whole canvas exceeds [`MAX_CANVAS_PIXELS`].
pub(crate) fn canvas_size(grid: &Grid, cell_width: u32, cell_height: u32) -> Result<(u32, u32)> {
    let (columns, rows): (usize, usize) = (grid.column_count(), grid.row_count());
    let dimension = |cells: usize, cell_pixels: u32| -> Option<u32> {
        u32::try_from(cells).ok()?.checked_mul(cell_pixels)
    };

    dimension(columns, cell_width)
        .zip(dimension(rows, cell_height))
        .filter(|(width, height)| *width as u64 * *height as u64 <= MAX_CANVAS_PIXELS)
        .ok_or(Error::CanvasTooLarge { columns, rows })
}

pub fn save<P: AsRef<Path>>(canvas: &RgbImage, path: P) -> Result<()> {
    let path: &Path = path.as_ref();

    canvas.save(path).map_err(|source| Error::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `input`, renders it with `rasterizer`, and writes the result to `output`.
pub fn convert<R, I, O>(rasterizer: &R, input: I, output: O) -> Result<ConvertSummary>
where
    R: Rasterizer + ?Sized,
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let lines: Vec<String> = read_lines(&input)?;
    let grid: Grid = Grid::parse(&lines)?;
    let canvas: RgbImage = rasterizer.render(&grid)?;
    let summary: ConvertSummary = ConvertSummary {
        rows: grid.row_count(),
        columns: grid.column_count(),
        width: canvas.width(),
        height: canvas.height(),
    };

    save(&canvas, &output)?;

    info!(
        "rendered {:?} ({}x{} cells) to {:?} ({}x{} pixels)",
        input.as_ref(),
        summary.columns,
        summary.rows,
        output.as_ref(),
        summary.width,
        summary.height
    );

    Ok(summary)
}
