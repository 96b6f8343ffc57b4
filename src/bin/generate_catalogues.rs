//! Generate synthetic option catalogues for the wildfire response MCDP.
//! Run: cargo run --bin generate_catalogues
//! Output: wildfire.mcdplib/catalogues/{aircraft,crews,retardant}_catalogue.yaml

use std::fs;
use std::path::Path;

use firebreak::catalogue::{write_catalogues, GenerationConfig, DEFAULT_CATALOGUE_DIR};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = GenerationConfig::default();
    let out_dir = Path::new(DEFAULT_CATALOGUE_DIR);
    fs::create_dir_all(out_dir)?;

    for (path, implementations) in write_catalogues(&config, out_dir)? {
        println!("Wrote {} ({} implementations)", path.display(), implementations);
    }
    Ok(())
}
