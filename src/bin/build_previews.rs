//! Offline preview build tool.
//!
//! Walks a resource root with `meshes/`, `materials/`, and `textures/`
//! subdirectories and writes a preview tree next to it:
//!
//! ```text
//! <output>/mesh/*.png       <output>/mesh.json
//! <output>/material/*.png   <output>/material.json
//! <output>/texture/*.png    <output>/texture.json
//! ```
//!
//! Previews whose source file digest is unchanged since the last run are
//! kept as-is.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use vitrine::catalog::index::CatalogIndex;
use vitrine::catalog::ResourceKind;
use vitrine::preview::{FlatThumbnailRenderer, PreviewBuilder, PreviewError};

fn kind_source_dir(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Mesh => "meshes",
        ResourceKind::Material => "materials",
        ResourceKind::Texture => "textures",
    }
}

fn build_kind(
    builder: &mut PreviewBuilder,
    kind: ResourceKind,
    source_root: &Path,
    output_root: &Path,
) -> Result<usize, PreviewError> {
    let source_dir = source_root.join(kind_source_dir(kind));
    if !source_dir.is_dir() {
        log::info!("no {} directory at {}, skipping", kind.label(), source_dir.display());
        return Ok(0);
    }

    let index_path = output_root.join(format!("{}.json", kind.label()));
    let previous = match CatalogIndex::load_from_file(&index_path) {
        Ok(index) => Some(index),
        Err(err) => {
            log::debug!("no previous {} index ({err})", kind.label());
            None
        }
    };

    let index = builder.build(kind, &source_dir, previous.as_ref())?;
    index.save_to_file(&index_path)?;
    log::info!(
        "{}: {} entries -> {}",
        kind.label(),
        index.entries.len(),
        index_path.display()
    );
    Ok(index.entries.len())
}

fn run(source_root: &Path, output_root: &Path) -> Result<(), PreviewError> {
    std::fs::create_dir_all(output_root).map_err(|source| PreviewError::Io {
        path: output_root.to_path_buf(),
        source,
    })?;

    let mut builder =
        PreviewBuilder::new(output_root.to_path_buf(), Box::new(FlatThumbnailRenderer));
    let mut total = 0;
    for kind in ResourceKind::ALL {
        total += build_kind(&mut builder, kind, source_root, output_root)?;
    }
    log::info!("built previews for {total} resources");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args = std::env::args().skip(1);
    let (source_root, output_root) = match (args.next(), args.next()) {
        (Some(source), Some(output)) => (PathBuf::from(source), PathBuf::from(output)),
        _ => {
            eprintln!("usage: build_previews <resource-root> <output-root>");
            return ExitCode::FAILURE;
        }
    };

    match run(&source_root, &output_root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("preview build failed: {err}");
            ExitCode::FAILURE
        }
    }
}
