use {
    ab_glyph::InvalidFont,
    image::ImageError,
    std::{io::Error as IoError, path::PathBuf},
    thiserror::Error,
    ttf_parser::FaceParsingError,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input file {path:?}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("failed to load font {path:?}")]
    FontLoad {
        path: PathBuf,
        #[source]
        source: FontError,
    },

    #[error(
        "no truecolor sequences (\\x1b[38;2;R;G;BmCHAR) found in {lines} line(s) of input"
    )]
    EmptyInput { lines: usize },

    #[error("line {line}, cell {column}: color channel {value} is outside 0..=255")]
    InvalidColorChannel {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("a {columns}x{rows} grid does not fit in an image at this size")]
    CanvasTooLarge { columns: usize, rows: usize },

    #[error("failed to write image {path:?}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("failed to parse font face: {0}")]
    FaceParsing(FaceParsingError),

    #[error("invalid font data: {0}")]
    InvalidFont(InvalidFont),

    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),

    #[error("font has no horizontal advance for {0:?}")]
    MissingHorAdvance(char),

    #[error("font has no bounding box for {0:?}")]
    MissingBoundingBox(char),

    #[error(
        "font is not monospaced: {code_point:?} advances {actual} units instead of {expected}"
    )]
    UnexpectedHorAdvance {
        code_point: char,
        expected: u16,
        actual: u16,
    },
}
