use {
    ansi_raster::cli::{run_pixels, PixelArgs},
    clap::Parser,
};

fn main() -> anyhow::Result<()> {
    let args: PixelArgs = PixelArgs::parse();

    run_pixels(&args)?;

    println!("Image saved to: {}", args.io.output.display());

    Ok(())
}
