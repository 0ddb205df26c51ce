use {
    crate::{
        config::{
            Background, GlyphConfig, PixelConfig, DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE,
            DEFAULT_LINE_SPACING, DEFAULT_SCALE,
        },
        error::Result,
        logging,
        render::{convert, ConvertSummary, GlyphRasterizer, PixelRasterizer},
    },
    clap::{Args, Parser},
    std::path::PathBuf,
};

#[derive(Debug, Args)]
pub struct IoArgs {
    /// Text file containing `ESC[38;2;R;G;BmCHAR` sequences
    #[arg(short, long)]
    pub input: PathBuf,

    /// Image to write; the format follows the extension
    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(short, long)]
    pub verbose: bool,
}

/// Renders ANSI truecolor art as colored glyphs.
#[derive(Debug, Parser)]
#[command(version)]
pub struct GlyphArgs {
    #[command(flatten)]
    pub io: IoArgs,

    #[arg(short, long, default_value = DEFAULT_FONT_PATH)]
    pub font_path: PathBuf,

    /// Em size in pixels
    #[arg(short = 's', long, default_value_t = DEFAULT_FONT_SIZE)]
    pub font_size: f32,

    /// Row height as a multiple of the height of `A`
    #[arg(long, default_value_t = DEFAULT_LINE_SPACING)]
    pub line_spacing: f32,

    #[arg(short, long, value_enum, default_value_t)]
    pub background: Background,
}

impl From<&GlyphArgs> for GlyphConfig {
    fn from(args: &GlyphArgs) -> Self {
        Self {
            font_path: args.font_path.clone(),
            font_size: args.font_size,
            line_spacing: args.line_spacing,
            background: args.background,
        }
    }
}

/// Renders ANSI truecolor art as one pixel per character, upscaled.
#[derive(Debug, Parser)]
#[command(version)]
pub struct PixelArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Each character becomes a SCALE x SCALE block
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    pub scale: u32,

    #[arg(short, long, value_enum, default_value_t)]
    pub background: Background,
}

impl From<&PixelArgs> for PixelConfig {
    fn from(args: &PixelArgs) -> Self {
        Self {
            scale: args.scale,
            background: args.background,
        }
    }
}

pub fn run_glyphs(args: &GlyphArgs) -> Result<ConvertSummary> {
    logging::init(args.io.verbose);

    let rasterizer: GlyphRasterizer = GlyphRasterizer::new(args.into())?;

    convert(&rasterizer, &args.io.input, &args.io.output)
}

pub fn run_pixels(args: &PixelArgs) -> Result<ConvertSummary> {
    logging::init(args.io.verbose);

    let rasterizer: PixelRasterizer = PixelRasterizer::new(args.into())?;

    convert(&rasterizer, &args.io.input, &args.io.output)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{error::Error, font::tests::TEST_FONT_PATH},
        clap::CommandFactory,
        image::GenericImageView,
        std::{env::temp_dir, ffi::OsStr, fs::write},
    };

    #[test]
    fn verify_commands() {
        GlyphArgs::command().debug_assert();
        PixelArgs::command().debug_assert();
    }

    #[test]
    fn glyph_defaults() {
        let args: GlyphArgs =
            GlyphArgs::try_parse_from(["ansi-glyphs", "-i", "in.txt", "-o", "out.png"]).unwrap();
        let config: GlyphConfig = (&args).into();

        assert_eq!(args.io.input, PathBuf::from("in.txt"));
        assert_eq!(args.io.output, PathBuf::from("out.png"));
        assert!(!args.io.verbose);
        assert_eq!(config, GlyphConfig::default());
    }

    #[test]
    fn pixel_options() {
        let args: PixelArgs = PixelArgs::try_parse_from([
            "ansi-pixels",
            "--input",
            "in.txt",
            "--output",
            "out.bmp",
            "--scale",
            "3",
            "-b",
            "white",
            "-v",
        ])
        .unwrap();
        let config: PixelConfig = (&args).into();

        assert!(args.io.verbose);
        assert_eq!(
            config,
            PixelConfig {
                scale: 3_u32,
                background: Background::White,
            }
        );
    }

    #[test]
    fn input_and_output_required() {
        assert!(PixelArgs::try_parse_from(["ansi-pixels", "-i", "in.txt"]).is_err());
        assert!(GlyphArgs::try_parse_from(["ansi-glyphs", "-o", "out.png"]).is_err());
    }

    #[test]
    fn run_pixels_end_to_end() {
        let input: PathBuf = temp_dir().join("ansi_raster_cli_pixels.txt");
        let output: PathBuf = temp_dir().join("ansi_raster_cli_pixels.png");

        write(
            &input,
            "\x1b[38;2;1;2;3m#\x1b[38;2;4;5;6m#\x1b[38;2;7;8;9m#\n\x1b[38;2;1;2;3m#\n",
        )
        .unwrap();

        let args: PixelArgs = PixelArgs {
            io: IoArgs {
                input,
                output: output.clone(),
                verbose: false,
            },
            scale: 10_u32,
            background: Background::Black,
        };
        let summary: ConvertSummary = run_pixels(&args).unwrap();

        assert_eq!((summary.width, summary.height), (30_u32, 20_u32));
        assert!(output.is_file());
    }

    #[test]
    fn run_glyphs_end_to_end() {
        let Some(font_path) = *TEST_FONT_PATH else {
            eprintln!("no DejaVu Sans Mono found, skipping");

            return;
        };
        let input: PathBuf = temp_dir().join("ansi_raster_cli_glyphs_ok.txt");
        let output: PathBuf = temp_dir().join("ansi_raster_cli_glyphs_ok.png");

        write(&input, "\x1b[38;2;255;0;0mX\n").unwrap();

        let args: GlyphArgs = GlyphArgs::try_parse_from([
            OsStr::new("ansi-glyphs"),
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
            OsStr::new("--font-path"),
            OsStr::new(font_path),
        ])
        .unwrap();
        let summary: ConvertSummary = run_glyphs(&args).unwrap();

        assert_eq!((summary.columns, summary.rows), (1_usize, 1_usize));
        assert!(summary.width > 0_u32 && summary.height > 0_u32);
        assert_eq!(
            image::open(&output).unwrap().dimensions(),
            (summary.width, summary.height)
        );
    }

    #[test]
    fn run_glyphs_missing_font() {
        let input: PathBuf = temp_dir().join("ansi_raster_cli_glyphs.txt");
        let output: PathBuf = temp_dir().join("ansi_raster_cli_glyphs.png");
        let font_path: PathBuf = temp_dir().join("ansi_raster_cli_missing.ttf");

        write(&input, "\x1b[38;2;1;2;3mA\n").unwrap();

        let args: GlyphArgs = GlyphArgs::try_parse_from([
            OsStr::new("ansi-glyphs"),
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
            OsStr::new("--font-path"),
            font_path.as_os_str(),
        ])
        .unwrap();

        assert!(matches!(run_glyphs(&args), Err(Error::FontLoad { .. })));
    }
}
