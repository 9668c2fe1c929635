//! The runtime track pipeline: texture archives in, section graph and
//! renderable mesh out, plus the per-frame animation of flagged faces.
//!
//! Everything loads synchronously during the level-load phase. The
//! renderer and gameplay code only read the structures built here; the one
//! post-load writer is `Animator::update`, which runs once per frame
//! before the renderer reads primitive colours.

pub mod anim;
pub mod mesh;
pub mod prim;
pub mod road;
pub mod sections;
pub mod tex;

pub use {
    anim::Animator,
    mesh::Mesh,
    sections::{SectionFile, SectionId, TrackSection},
    tex::{AlphaMode, TextureHandle, TextureManager, Uploader},
};

use camino::Utf8Path;

/// One loaded track: its section graph and its renderable mesh. A fresh
/// instance is built per load; sections and meshes are never pooled or
/// shared across loads, so stale cross-links cannot survive a reload.
pub struct Track {
    pub sections: Vec<TrackSection>,
    pub mesh: Mesh,
}

impl Track {
    pub fn new(name: &str) -> Track {
        Track { sections: Vec::new(), mesh: Mesh::new(name) }
    }
}

/// Loads a track directory: texture archive, geometry, section graph,
/// animator registration, in that order. Missing or malformed assets
/// degrade to empty pieces rather than failing the load; a track with no
/// section file still yields its mesh.
pub fn load_track<U: Uploader>(
    dir: &Utf8Path,
    textures: &mut TextureManager<U>,
) -> (Track, Animator) {
    let name = dir.file_name().unwrap_or("track");
    log::info!("loading {dir}");

    let library = dir.join("library.cmp");
    textures.replace_sub_image(&library, tex::KNOWN_BAD_SUB_IMAGE);
    let handles = textures.load_archive(&library);

    let trv = read_asset(&dir.join("track.trv"));
    let trf = read_asset(&dir.join("track.trf"));
    let verts = formats::trv::vertices(&trv);
    let faces = formats::trf::faces(&trf);

    let mut track = Track::new(name);
    track.mesh = road::build_mesh(name, &verts, &faces, &handles);

    SectionFile::load(&dir.join("track.trs")).populate(&mut track);

    let mut animator = Animator::new();
    animator.register(&track.mesh, &faces);

    log::info!("{dir}: {} vertices, {} faces, {} sections",
        verts.len(), faces.len(), track.sections.len());
    (track, animator)
}

fn read_asset(path: &Utf8Path) -> Vec<u8> {
    match std::fs::read(path) {
        Ok(bytes) => {
            log::debug!("{path}: {} bytes, hash {:016x}", bytes.len(), util::fnv1a_64(&bytes));
            bytes
        }
        Err(e) => {
            log::warn!("missing asset {path}: {e}");
            Vec::new()
        }
    }
}
