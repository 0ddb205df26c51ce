use {
    super::{canvas_size, new_canvas, Rasterizer},
    crate::{config::PixelConfig, error::Result, parser::Grid},
    image::{
        imageops::{resize, FilterType},
        RgbImage,
    },
    log::debug,
};

/// One pixel per cell in the cell's color, upscaled by an integer factor. Characters are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelRasterizer {
    config: PixelConfig,
}

impl PixelRasterizer {
    pub fn new(config: PixelConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &PixelConfig {
        &self.config
    }

    /// The canvas before upscaling.
    pub fn render_unscaled(&self, grid: &Grid) -> Result<RgbImage> {
        grid.ensure_not_empty()?;

        let (width, height): (u32, u32) = canvas_size(grid, 1_u32, 1_u32)?;
        let mut canvas: RgbImage = new_canvas(width, height, self.config.background.rgb());

        for cell in grid.cells() {
            canvas.put_pixel(cell.pos.x, cell.pos.y, cell.color);
        }

        Ok(canvas)
    }
}

impl Rasterizer for PixelRasterizer {
    fn render(&self, grid: &Grid) -> Result<RgbImage> {
        let canvas: RgbImage = self.render_unscaled(grid)?;
        let scale: u32 = self.config.scale;

        if scale == 1_u32 {
            return Ok(canvas);
        }

        let (width, height): (u32, u32) = canvas_size(grid, scale, scale)?;

        debug!(
            "pixel canvas {}x{} scaled by {scale} to {width}x{height}",
            canvas.width(),
            canvas.height()
        );

        Ok(resize(&canvas, width, height, FilterType::Nearest))
    }
}
