// SPDX-License-Identifier: MPL-2.0

//! Compute the magnitude spectrum of an image and restore it with the inverse DFT.
//!
//! Usage: cargo run --example spectrum -- <input> [output_dir]
//! Set RUST_LOG=spectra2d=debug to follow the pipeline steps.

use std::path::PathBuf;
use std::time::Instant;

use spectra2d::{encode, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spectra2d=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or("usage: spectrum <input> [output_dir]")?;
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    // Open image from disk, in gray levels.
    let img = image::open(&input)?.into_luma8();
    let (width, height) = img.dimensions();
    println!("Loaded {input}: {width}x{height}");

    let session = Session::new().load(img)?;
    println!("Actions: {:?}", session.actions());

    let now = Instant::now();
    let (session, spectrum) = session.transform();
    let (padded_width, padded_height) = session.padded().dimensions();
    println!(
        "Padded to {padded_width}x{padded_height}, DFT and spectrum: {}ms",
        now.elapsed().as_millis()
    );

    let now = Instant::now();
    let (session, restored) = session.antitransform();
    println!("Inverse DFT: {}ms", now.elapsed().as_millis());
    println!("Actions: {:?}", session.actions());

    let format = session.config().format;
    for (name, image) in [("magnitude", &spectrum), ("restored", &restored)] {
        let path = output_dir.join(format!("{name}.{}", format.extension()));
        std::fs::write(&path, encode(image, format)?)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
