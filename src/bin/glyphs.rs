use {
    ansi_raster::cli::{run_glyphs, GlyphArgs},
    clap::Parser,
};

fn main() -> anyhow::Result<()> {
    let args: GlyphArgs = GlyphArgs::parse();

    run_glyphs(&args)?;

    println!("Image saved to: {}", args.io.output.display());

    Ok(())
}
