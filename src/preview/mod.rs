//! Offline preview generation: renders a thumbnail per resource, encodes it
//! to PNG, and records the (resource, thumbnail) pairs in a catalog index
//! for the runtime picker. Editor-side tooling, driven by the
//! `build_previews` binary.

use crate::catalog::index::{CatalogIndex, IndexEntry};
use crate::catalog::ResourceKind;
use image::RgbaImage;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Thumbnail edge length in pixels.
pub const PREVIEW_SIZE: u32 = 256;

const POLL_ATTEMPTS: u32 = 16;
const POLL_INITIAL_BACKOFF: Duration = Duration::from_millis(1);
const POLL_MAX_BACKOFF: Duration = Duration::from_millis(250);

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image error at {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("thumbnail for {path} not ready after {attempts} polls")]
    ThumbnailTimeout { path: PathBuf, attempts: u32 },
    #[error("catalog error: {0}")]
    Catalog(#[from] crate::catalog::index::CatalogError),
}

pub type Result<T> = std::result::Result<T, PreviewError>;

/// Source of thumbnail images. Hosts with an asynchronous preview pipeline
/// return `None` from `poll` until the render completes; the builder polls
/// with bounded backoff instead of spinning.
pub trait ThumbnailRenderer {
    /// Kick off thumbnail generation for a resource file.
    fn request(&mut self, kind: ResourceKind, source: &Path) -> Result<()>;
    /// Fetch the finished thumbnail, or `None` while still rendering.
    fn poll(&mut self, kind: ResourceKind, source: &Path) -> Result<Option<RgbaImage>>;
}

/// Built-in renderer with no host attached: textures are decoded and
/// downscaled directly, meshes and materials get a flat placeholder card
/// colored from the resource name so cards stay tellable apart.
pub struct FlatThumbnailRenderer;

impl ThumbnailRenderer for FlatThumbnailRenderer {
    fn request(&mut self, _kind: ResourceKind, _source: &Path) -> Result<()> {
        Ok(())
    }

    fn poll(&mut self, kind: ResourceKind, source: &Path) -> Result<Option<RgbaImage>> {
        match kind {
            ResourceKind::Texture => {
                let decoded = image::open(source).map_err(|source_err| PreviewError::Image {
                    path: source.to_path_buf(),
                    source: source_err,
                })?;
                Ok(Some(image::imageops::thumbnail(
                    &decoded.to_rgba8(),
                    PREVIEW_SIZE,
                    PREVIEW_SIZE,
                )))
            }
            ResourceKind::Mesh | ResourceKind::Material => {
                Ok(Some(placeholder_card(resource_name(source).as_str())))
            }
        }
    }
}

/// Flat-color card derived from the name digest.
fn placeholder_card(name: &str) -> RgbaImage {
    let digest = Sha256::digest(name.as_bytes());
    let pixel = image::Rgba([digest[0], digest[1], digest[2], 255]);
    RgbaImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, pixel)
}

fn resource_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("resource")
        .to_string()
}

/// Wait for a requested thumbnail with bounded, doubling backoff.
pub fn acquire_thumbnail(
    renderer: &mut dyn ThumbnailRenderer,
    kind: ResourceKind,
    source: &Path,
) -> Result<RgbaImage> {
    renderer.request(kind, source)?;
    let mut backoff = POLL_INITIAL_BACKOFF;
    for attempt in 0..POLL_ATTEMPTS {
        if let Some(image) = renderer.poll(kind, source)? {
            return Ok(image);
        }
        log::trace!(
            "thumbnail for {} not ready (attempt {attempt}), backing off {backoff:?}",
            source.display()
        );
        std::thread::sleep(backoff);
        backoff = (backoff * 2).min(POLL_MAX_BACKOFF);
    }
    Err(PreviewError::ThumbnailTimeout {
        path: source.to_path_buf(),
        attempts: POLL_ATTEMPTS,
    })
}

/// Batch preview builder for one output tree.
pub struct PreviewBuilder {
    output_dir: PathBuf,
    renderer: Box<dyn ThumbnailRenderer>,
}

impl PreviewBuilder {
    pub fn new(output_dir: PathBuf, renderer: Box<dyn ThumbnailRenderer>) -> Self {
        Self {
            output_dir,
            renderer,
        }
    }

    /// Build the preview set and index for one resource kind. Files whose
    /// content digest matches `previous` keep their existing preview;
    /// everything else is re-rendered and re-encoded.
    pub fn build(
        &mut self,
        kind: ResourceKind,
        source_dir: &Path,
        previous: Option<&CatalogIndex>,
    ) -> Result<CatalogIndex> {
        let kind_dir = self.output_dir.join(kind.label());
        std::fs::create_dir_all(&kind_dir).map_err(|source| PreviewError::Io {
            path: kind_dir.clone(),
            source,
        })?;

        let mut index = CatalogIndex::new(kind);
        for source_path in list_source_files(source_dir)? {
            let name = resource_name(&source_path);
            let digest = file_digest(&source_path)?;
            let preview_path = kind_dir.join(format!("{name}.png"));

            let unchanged = previous
                .and_then(|prev| prev.entry(&name))
                .map(|entry| entry.digest == digest && entry.preview.exists())
                .unwrap_or(false);
            if unchanged {
                log::debug!("{} unchanged, keeping preview", source_path.display());
            } else {
                let thumbnail = acquire_thumbnail(self.renderer.as_mut(), kind, &source_path)?;
                thumbnail
                    .save(&preview_path)
                    .map_err(|source| PreviewError::Image {
                        path: preview_path.clone(),
                        source,
                    })?;
                log::info!(
                    "rendered {} preview {}",
                    kind.label(),
                    preview_path.display()
                );
            }

            index.entries.push(IndexEntry {
                name,
                source: source_path,
                preview: preview_path,
                digest,
            });
        }
        Ok(index)
    }
}

/// Hex digest of a file's contents.
pub fn file_digest(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| PreviewError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = Sha256::digest(&bytes);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    Ok(hex)
}

fn list_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| PreviewError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}
