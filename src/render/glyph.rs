use {
    super::{canvas_size, new_canvas, Rasterizer},
    crate::{
        config::GlyphConfig,
        error::Result,
        font::{CellMetrics, MonoFont},
        parser::{Cell, Grid},
    },
    ab_glyph::{Outline, OutlineCurve},
    ab_glyph_rasterizer::{Point, Rasterizer as OutlineRasterizer},
    image::{Pixel, Rgb, RgbImage},
    log::debug,
    std::ops::{Add, Mul},
};

#[derive(Clone, Copy, Debug, Default)]
struct Vector {
    x: f32,
    y: f32,
}

impl Add<Vector> for Point {
    type Output = Self;

    fn add(self, rhs: Vector) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Mul<Vector> for Point {
    type Output = Self;

    fn mul(self, rhs: Vector) -> Self {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
        }
    }
}

/* Coverage is quantized to a byte, and the top two steps count as fully covered: unhinted */
/* outlines rarely reach exactly 1.0, even in the middle of a stroke. */
const FULL_COVERAGE: u8 = u8::MAX - 1_u8;

fn quantize_coverage(alpha: f32) -> f32 {
    let coverage: u8 = (alpha.clamp(0.0_f32, 1.0_f32) * u8::MAX as f32).round() as u8;

    if coverage >= FULL_COVERAGE {
        1.0_f32
    } else {
        coverage as f32 / u8::MAX as f32
    }
}

fn blend_channel(background: u8, foreground: u8, alpha: f32) -> u8 {
    let background: f32 = background as f32;

    (background + (foreground as f32 - background) * alpha).round() as u8
}

struct GlyphParams<'a> {
    rasterizer: &'a mut OutlineRasterizer,
    offset: Vector,
    scale: Vector,
}

impl<'a> GlyphParams<'a> {
    fn draw_curve(&mut self, curve: OutlineCurve) {
        match curve {
            OutlineCurve::Line(p0, p1) => self
                .rasterizer
                .draw_line(self.transform_point(p0), self.transform_point(p1)),
            OutlineCurve::Quad(p0, p1, p2) => self.rasterizer.draw_quad(
                self.transform_point(p0),
                self.transform_point(p1),
                self.transform_point(p2),
            ),
            OutlineCurve::Cubic(p0, p1, p2, p3) => self.rasterizer.draw_cubic(
                self.transform_point(p0),
                self.transform_point(p1),
                self.transform_point(p2),
                self.transform_point(p3),
            ),
        }
    }

    /* Font units are y-up around the baseline; the rasterizer is y-down from its top left. */
    fn transform_point(&self, p: Point) -> Point {
        p * self.scale + self.offset
    }

    fn draw_glyph(
        &mut self,
        canvas: &mut RgbImage,
        cell: &Cell,
        metrics: &CellMetrics,
        outline: Outline,
    ) {
        let pen: Vector = Vector {
            x: (cell.pos.x * metrics.advance) as f32,
            y: (cell.pos.y * metrics.line_height) as f32 + metrics.ascent,
        };
        let (bounds_min, bounds_max): (Point, Point) = (outline.bounds.min, outline.bounds.max);
        let left: f32 = (pen.x + bounds_min.x.min(bounds_max.x) * metrics.scale).floor();
        let right: f32 = (pen.x + bounds_min.x.max(bounds_max.x) * metrics.scale).ceil();
        let top: f32 = (pen.y - bounds_min.y.max(bounds_max.y) * metrics.scale).floor();
        let bottom: f32 = (pen.y - bounds_min.y.min(bounds_max.y) * metrics.scale).ceil();
        let (width, height): (usize, usize) = ((right - left) as usize, (bottom - top) as usize);

        if width == 0_usize || height == 0_usize {
            return;
        }

        self.rasterizer.reset(width, height);
        self.scale = Vector {
            x: metrics.scale,
            y: -metrics.scale,
        };
        self.offset = Vector {
            x: pen.x - left,
            y: pen.y - top,
        };

        for curve in outline.curves {
            self.draw_curve(curve);
        }

        let (left, top): (i64, i64) = (left as i64, top as i64);
        let (canvas_width, canvas_height): (i64, i64) =
            (canvas.width() as i64, canvas.height() as i64);

        self.rasterizer.for_each_pixel_2d(|x, y, alpha| {
            let (canvas_x, canvas_y): (i64, i64) = (left + x as i64, top + y as i64);

            if alpha <= 0.0_f32
                || !(0_i64..canvas_width).contains(&canvas_x)
                || !(0_i64..canvas_height).contains(&canvas_y)
            {
                return;
            }

            let alpha: f32 = quantize_coverage(alpha);

            canvas
                .get_pixel_mut(canvas_x as u32, canvas_y as u32)
                .apply2(&cell.color, |background, foreground| {
                    blend_channel(background, foreground, alpha)
                });
        });
    }
}

/// Draws every cell's character in its color with a fixed-advance font.
pub struct GlyphRasterizer {
    config: GlyphConfig,
    font: MonoFont,
}

impl GlyphRasterizer {
    /// Validates `config` and loads its font.
    pub fn new(config: GlyphConfig) -> Result<Self> {
        config.validate()?;

        let font: MonoFont = MonoFont::load(&config.font_path)?;

        Ok(Self::with_font(config, font))
    }

    /// Uses an already loaded font, ignoring `config.font_path`.
    pub fn with_font(config: GlyphConfig, font: MonoFont) -> Self {
        Self { config, font }
    }

    pub fn config(&self) -> &GlyphConfig {
        &self.config
    }

    pub fn cell_metrics(&self) -> CellMetrics {
        self.font
            .cell_metrics(self.config.font_size, self.config.line_spacing)
    }
}

impl Rasterizer for GlyphRasterizer {
    fn render(&self, grid: &Grid) -> Result<RgbImage> {
        grid.ensure_not_empty()?;

        let metrics: CellMetrics = self.cell_metrics();
        let (width, height): (u32, u32) =
            canvas_size(grid, metrics.advance, metrics.line_height)?;
        let background: Rgb<u8> = self.config.background.rgb();

        debug!("glyph canvas {width}x{height}, cells {metrics:?}");

        let mut canvas: RgbImage = new_canvas(width, height, background);
        let mut outline_rasterizer: OutlineRasterizer = OutlineRasterizer::new(1_usize, 1_usize);
        let mut params: GlyphParams = GlyphParams {
            rasterizer: &mut outline_rasterizer,
            offset: Vector::default(),
            scale: Vector::default(),
        };

        for cell in grid.cells() {
            if let Some(outline) = self.font.outline(cell.character) {
                params.draw_glyph(&mut canvas, cell, &metrics, outline);
            }
        }

        Ok(canvas)
    }
}
