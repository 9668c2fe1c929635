//! The texture manager: turns archive files into renderer texture handles,
//! with per-path caching, per-handle alpha classification and size lookup,
//! and an explicit table of sub-images to be replaced with transparent
//! placeholders.

use {
    camino::{Utf8Path, Utf8PathBuf},
    formats::cmp,
    std::{
        collections::{HashMap, HashSet},
        rc::Rc,
    },
};

/// Opaque renderer texture id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// Stands in where a face references a texture the archive does not
    /// have; manager queries on it report the documented defaults.
    pub const FALLBACK: TextureHandle = TextureHandle(u32::MAX);

    pub fn new(raw: u32) -> TextureHandle { TextureHandle(raw) }
    pub fn raw(self) -> u32 { self.0 }
}

/// Transparency classification of a texture, derived once from its pixels
/// at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    /// Every pixel has alpha 255.
    Opaque,
    /// Alpha is only ever 0 or 255, with at least one 0.
    Cutout,
    /// At least one pixel has alpha strictly between 0 and 255.
    Translucent,
}

/// The entire contract with the rendering backend: pixels in, handle out.
pub trait Uploader {
    fn upload(&mut self, wide: u32, high: u32, pixels: &[u8]) -> TextureHandle;
}

/// Hands out sequential ids without touching a GPU; for tests and headless
/// tools.
#[derive(Default)]
pub struct NullUploader {
    next: u32,
    pub uploads: u32,
}

impl Uploader for NullUploader {
    fn upload(&mut self, _wide: u32, _high: u32, _pixels: &[u8]) -> TextureHandle {
        self.uploads += 1;
        let handle = TextureHandle(self.next);
        self.next += 1;
        handle
    }
}

/// Sub-image 84 of the shipped track texture archives draws over the
/// geometry behind it; the original renderer quietly dropped it. Kept as a
/// named index so the load path can install it explicitly per archive.
pub const KNOWN_BAD_SUB_IMAGE: usize = 84;

// 4x4 fully transparent RGBA, the stand-in for replaced sub-images
const PLACEHOLDER_SIDE: u32 = 4;
const PLACEHOLDER: [u8; (PLACEHOLDER_SIDE * PLACEHOLDER_SIDE * 4) as usize] =
    [0; (PLACEHOLDER_SIDE * PLACEHOLDER_SIDE * 4) as usize];

/// Size reported for handles the manager has never seen.
const DEFAULT_SIZE: (u32, u32) = (256, 256);

pub struct TextureManager<U> {
    uploader: U,
    cache: HashMap<Utf8PathBuf, Rc<[TextureHandle]>>,
    alpha: HashMap<TextureHandle, AlphaMode>,
    sizes: HashMap<TextureHandle, (u32, u32)>,
    replaced: HashMap<Utf8PathBuf, HashSet<usize>>,
}

impl<U: Uploader> TextureManager<U> {
    pub fn new(uploader: U) -> TextureManager<U> {
        TextureManager {
            uploader,
            cache: HashMap::new(),
            alpha: HashMap::new(),
            sizes: HashMap::new(),
            replaced: HashMap::new(),
        }
    }

    /// Marks one sub-image of `archive` for replacement with a fully
    /// transparent placeholder instead of its decoded content. This is a
    /// data patch for individually known-bad sub-images, not a general
    /// mechanism; archives without an entry here are never affected.
    pub fn replace_sub_image(&mut self, archive: &Utf8Path, index: usize) {
        self.replaced.entry(archive.to_owned()).or_default().insert(index);
    }

    /// Uploads one image and classifies it. An empty pixel buffer still
    /// yields a handle, classified opaque with no alpha.
    pub fn create_texture(&mut self, pixels: &[u8], wide: u32, high: u32) -> TextureHandle {
        let mode = classify_alpha(pixels);
        let handle = self.uploader.upload(wide, high, pixels);
        self.alpha.insert(handle, mode);
        self.sizes.insert(handle, (wide, high));
        handle
    }

    /// Loads a texture archive, returning its handles in archive order.
    /// Repeat loads of the same path return the cached handle array; the
    /// archive is never decoded twice. A missing or malformed archive, or
    /// one with no images, degrades to an empty array and is NOT cached,
    /// so a later call sees any repaired file.
    pub fn load_archive(&mut self, path: &Utf8Path) -> Rc<[TextureHandle]> {
        if let Some(handles) = self.cache.get(path) {
            return handles.clone();
        }

        let images = match decode_archive(path) {
            Ok(images) if !images.is_empty() => images,
            Ok(_) => {
                log::warn!("texture archive {path} contains no images");
                return Rc::from(Vec::new());
            }
            Err(e) => {
                log::warn!("failed to load texture archive {path}: {e:#}");
                return Rc::from(Vec::new());
            }
        };

        let replaced = self.replaced.get(path).cloned().unwrap_or_default();
        let handles: Rc<[TextureHandle]> = images.iter().enumerate()
            .map(|(i, image)| {
                if replaced.contains(&i) {
                    log::debug!("{path}: sub-image {i} replaced with transparent placeholder");
                    self.create_texture(&PLACEHOLDER, PLACEHOLDER_SIDE, PLACEHOLDER_SIDE)
                }
                else {
                    self.create_texture(image.as_raw(), image.width(), image.height())
                }
            })
            .collect();

        log::debug!("{path}: {} textures", handles.len());
        self.cache.insert(path.to_owned(), handles.clone());
        handles
    }

    pub fn alpha_mode(&self, handle: TextureHandle) -> AlphaMode {
        self.alpha.get(&handle).copied().unwrap_or(AlphaMode::Opaque)
    }

    pub fn has_alpha(&self, handle: TextureHandle) -> bool {
        self.alpha_mode(handle) != AlphaMode::Opaque
    }

    /// Unknown handles report the legacy default of 256x256.
    pub fn size(&self, handle: TextureHandle) -> (u32, u32) {
        self.sizes.get(&handle).copied().unwrap_or(DEFAULT_SIZE)
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }
}

fn decode_archive(path: &Utf8Path) -> anyhow::Result<Vec<image::RgbaImage>> {
    let bytes = std::fs::read(path)?;
    log::debug!("{path}: {} bytes, hash {:016x}", bytes.len(), util::fnv1a_64(&bytes));
    Ok(cmp::unpack(&bytes)?)
}

fn classify_alpha(pixels: &[u8]) -> AlphaMode {
    let mut any_zero = false;
    for alpha in pixels.chunks_exact(4).map(|px| px[3]) {
        match alpha {
            255 => {}
            0 => any_zero = true,
            _ => return AlphaMode::Translucent,
        }
    }
    if any_zero { AlphaMode::Cutout } else { AlphaMode::Opaque }
}
