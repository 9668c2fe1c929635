//! Dumps every image of a texture archive as numbered PNGs, for eyeballing
//! archive contents outside the game.

use anyhow::{Context, Result as Anyhow};

fn main() -> Anyhow<()> {
    let path = camino::Utf8PathBuf::from(
        std::env::args().nth(1).context("usage: uncmp input.cmp")?
    );
    let cmp = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
    let images = formats::cmp::unpack(&cmp).with_context(|| format!("unpacking {path}"))?;

    let stem = path.file_name().context("input has no file name")?;
    for (i, image) in images.into_iter().enumerate() {
        let name = format!("{stem}.{i:03}.png");
        eprintln!("{name} ({}x{})", image.width(), image.height());
        image.save(&name)?;
    }
    Ok(())
}
