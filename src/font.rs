use {
    crate::error::{Error, FontError, Result},
    ab_glyph::{Font, FontVec, Outline},
    log::debug,
    std::{fs::read, ops::Range, path::Path},
    ttf_parser::{Face, Rect},
};

pub const PRINTABLE_RANGE: Range<char> = '\x20'..'\x7F';

/// The glyph whose advance and bounding box size every cell.
pub const REFERENCE_CHAR: char = 'A';

/// Face metrics, in font units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub hor_advance: u16,
    pub reference_height: i32,
    pub ascender: i16,
}

/// Face metrics, in pixels, at a given size and line spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMetrics {
    /// Pixels per font unit.
    pub scale: f32,
    pub advance: u32,
    pub line_height: u32,
    /// Distance from the top of a row to its baseline.
    pub ascent: f32,
}

pub struct MonoFont {
    font: FontVec,
    metrics: FontMetrics,
}

impl MonoFont {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: &Path = path.as_ref();

        read(path)
            .map_err(FontError::Io)
            .and_then(Self::try_from_data)
            .map_err(|source| Error::FontLoad {
                path: path.to_path_buf(),
                source,
            })
            .map(|mono_font| {
                debug!("loaded font {path:?}: {:?}", mono_font.metrics);

                mono_font
            })
    }

    pub fn try_from_data(data: Vec<u8>) -> std::result::Result<Self, FontError> {
        use FontError as Error;

        let metrics: FontMetrics = {
            let face: Face = Face::parse(&data, 0_u32).map_err(Error::FaceParsing)?;

            let mut hor_advance: Option<u16> = None;

            // `Font::h_advance_unscaled` panics when the advance isn't available, so check through
            // the face instead.
            for code_point in PRINTABLE_RANGE {
                let Some(glyph_id) = face.glyph_index(code_point) else {
                    return Err(Error::MissingGlyph(code_point));
                };

                let Some(actual) = face.glyph_hor_advance(glyph_id) else {
                    return Err(Error::MissingHorAdvance(code_point));
                };

                match hor_advance {
                    Some(expected) if actual != expected => {
                        return Err(Error::UnexpectedHorAdvance {
                            code_point,
                            expected,
                            actual,
                        });
                    }
                    Some(_) => (),
                    None => hor_advance = Some(actual),
                }
            }

            let reference_box: Rect = face
                .glyph_index(REFERENCE_CHAR)
                .and_then(|glyph_id| face.glyph_bounding_box(glyph_id))
                .ok_or(Error::MissingBoundingBox(REFERENCE_CHAR))?;

            FontMetrics {
                units_per_em: face.units_per_em(),
                hor_advance: hor_advance.unwrap_or_default(),
                reference_height: reference_box.y_max as i32 - reference_box.y_min as i32,
                ascender: face.ascender(),
            }
        };

        let font: FontVec = FontVec::try_from_vec(data).map_err(Error::InvalidFont)?;

        Ok(Self { font, metrics })
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    pub fn cell_metrics(&self, font_size: f32, line_spacing: f32) -> CellMetrics {
        let scale: f32 = font_size / self.metrics.units_per_em.max(1_u16) as f32;
        let glyph_height: f32 = (self.metrics.reference_height as f32 * scale).round();

        CellMetrics {
            scale,
            advance: ((self.metrics.hor_advance as f32 * scale).round() as u32).max(1_u32),
            line_height: ((glyph_height * line_spacing).floor() as u32).max(1_u32),
            ascent: (self.metrics.ascender as f32 * scale).round(),
        }
    }

    /// The unscaled outline of `c`, or `None` for glyphs with nothing to draw.
    pub fn outline(&self, c: char) -> Option<Outline> {
        self.font.outline(self.font.glyph_id(c))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use {super::*, lazy_static::lazy_static, std::env::temp_dir, std::fs::write};

    const CANDIDATE_FONT_PATHS: &[&str] = &[
        crate::config::DEFAULT_FONT_PATH,
        "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
        "/usr/local/share/fonts/DejaVuSansMono.ttf",
        "/Library/Fonts/DejaVuSansMono.ttf",
    ];

    lazy_static! {
        /* `None` when no DejaVu Sans Mono is installed; tests that need it return early. */
        pub(crate) static ref TEST_FONT_PATH: Option<&'static str> = CANDIDATE_FONT_PATHS
            .iter()
            .copied()
            .find(|path| Path::new(path).is_file());
    }

    #[test]
    fn missing_font_file() {
        let path = temp_dir().join("ansi_raster_font_does_not_exist.ttf");

        assert!(matches!(
            MonoFont::load(&path),
            Err(Error::FontLoad {
                source: FontError::Io(_),
                ..
            })
        ));
    }

    #[test]
    fn garbage_font_file() {
        let path = temp_dir().join("ansi_raster_font_garbage.ttf");

        write(&path, b"definitely not a font").unwrap();

        assert!(matches!(
            MonoFont::load(&path),
            Err(Error::FontLoad {
                source: FontError::FaceParsing(_),
                ..
            })
        ));
    }

    #[test]
    fn dejavu_metrics() {
        let Some(path) = *TEST_FONT_PATH else {
            eprintln!("no DejaVu Sans Mono found, skipping");

            return;
        };

        let mono_font: MonoFont = MonoFont::load(path).unwrap();
        let metrics: FontMetrics = mono_font.metrics();

        assert_eq!(metrics.units_per_em, 2048_u16);
        assert_eq!(metrics.hor_advance, 1233_u16);

        let cell_metrics: CellMetrics = mono_font.cell_metrics(12.0_f32, 1.8_f32);

        assert_eq!(cell_metrics.advance, 7_u32);
        assert!(cell_metrics.line_height > cell_metrics.ascent as u32);
        assert!(mono_font.outline(REFERENCE_CHAR).is_some());
    }
}
