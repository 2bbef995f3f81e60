use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use focusfuse::{FocusStackFuser, FusionError, Photo, MIN_STACK_SIZE};
use log::{debug, error, info};

mod image_io;
mod stack_list;

use image_io::{read_photo, save_photo};
use stack_list::{candidate_paths, read_stack_list};

const PATH_HINT: &str = "Please ensure that the file contains valid image paths, one per line. \
The image paths can be either relative or absolute; paths that cannot be read as given are \
also searched for under the stack directory.";

/// Command line arguments structure.
#[derive(Parser, Debug)]
#[command(author, version, about = "Fuse a focus stack of grayscale images into one all-in-focus image.")]
struct Args {
    /// Text file (.txt) listing the images to combine, one path per line
    #[arg()]
    stack_file: PathBuf,

    /// Where to write the fused image (.pgm is written as binary PGM)
    #[arg(long, default_value = "result.pgm")]
    output: PathBuf,

    /// Directory searched for listed images that cannot be read as given
    #[arg(long, default_value = "./stack/")]
    stack_dir: PathBuf,
}

/// A photo together with the file it was read from.
struct LoadedPhoto {
    path: PathBuf,
    photo: Photo,
}

/// Reads the first candidate location of `entry` that decodes.
///
/// # Returns
/// The loaded photo, or the error from the last candidate tried.
fn load_entry(entry: &Path, stack_dir: &Path) -> anyhow::Result<LoadedPhoto> {
    let mut last_error = None;
    for path in candidate_paths(entry, stack_dir) {
        match read_photo(&path) {
            Ok(photo) => return Ok(LoadedPhoto { path, photo }),
            Err(err) => {
                debug!("{err}");
                last_error = Some(err);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| anyhow!("No location to look for '{}'", entry.display())))
}

/// Loads every entry, logging and skipping the ones that cannot be read.
fn load_stack(entries: &[PathBuf], stack_dir: &Path) -> Vec<LoadedPhoto> {
    entries
        .iter()
        .filter_map(|entry| match load_entry(entry, stack_dir) {
            Ok(loaded) => Some(loaded),
            Err(err) => {
                error!("Error loading image '{}': {err}", entry.display());
                None
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let entries = read_stack_list(&args.stack_file)?;
    let loaded = load_stack(&entries, &args.stack_dir);

    match loaded.len() {
        0 => bail!(
            "No valid images were found in the provided stack file '{}'. {PATH_HINT}",
            args.stack_file.display()
        ),
        n if n < MIN_STACK_SIZE => bail!(
            "Not enough valid images were found in the provided stack file '{}', only {n} found, \
             at least {MIN_STACK_SIZE} are required. {PATH_HINT}",
            args.stack_file.display()
        ),
        n => info!("Loaded {n} of {} listed images", entries.len()),
    }

    let (paths, photos): (Vec<PathBuf>, Vec<Photo>) =
        loaded.into_iter().map(|l| (l.path, l.photo)).unzip();

    let fuser = FocusStackFuser::default();
    let fused = match fuser.fuse(&photos) {
        Err(FusionError::DimensionMismatch {
            index,
            expected,
            actual,
        }) => bail!(
            "Image dimensions mismatch. All images must have the same width and height. \
             Image '{}' has dimensions {actual}, expected {expected}",
            paths[index].display()
        ),
        result => result.context("Failed to fuse the focus stack")?,
    };

    save_photo(&fused, &args.output)?;
    info!("Fused image written to {}", args.output.display());
    Ok(())
}
