//! The section graph: decoding the section file and linking records into a
//! navigable topology for gameplay and camera logic.

use {
    crate::Track,
    camino::Utf8Path,
    formats::{Le, trs::{self, RawSection}},
    ultraviolet as uv,
};

/// Fixed-point world units per floating-point unit. All three axes share
/// the one divisor.
pub const WORLD_SCALE: f32 = 1. / 1000.;

/// Index of a section within its owning track's `sections`.
pub type SectionId = usize;

/// One segment of the track centreline. Links are resolved once at load
/// time; `None` means the file stored `-1` or an index outside the file.
/// Immutable after population.
#[derive(Debug, Clone)]
pub struct TrackSection {
    pub centre: uv::Vec3,
    pub first_face: u32,
    pub n_faces: u16,
    /// File flag bits, preserved verbatim; see `formats::trs` for the
    /// known ones.
    pub flags: u16,
    pub next: Option<SectionId>,
    pub prev: Option<SectionId>,
    /// The branch taken at a junction instead of `next`.
    pub junction: Option<SectionId>,
}

/// A decoded section file, before graph resolution.
pub struct SectionFile {
    records: Vec<RawSection>,
}

impl SectionFile {
    /// Reads `path`, decoding every complete record. A missing file yields
    /// an empty list rather than an error, so a track without topology
    /// still loads its mesh for menu previews.
    pub fn load(path: &Utf8Path) -> SectionFile {
        let records = match std::fs::read(path) {
            Ok(bytes) => trs::sections(&bytes),
            Err(e) => {
                log::warn!("no section data at {path}: {e}");
                Vec::new()
            }
        };
        log::debug!("{path}: {} sections", records.len());
        SectionFile { records }
    }

    pub fn from_records(records: Vec<RawSection>) -> SectionFile {
        SectionFile { records }
    }

    /// The records in file order; a record's position here is the index
    /// its neighbours' link fields refer to.
    pub fn records(&self) -> &[RawSection] {
        &self.records
    }

    /// Builds `track.sections` from the decoded records. Two passes: links
    /// may point at records later in the file, so they resolve only once
    /// every section exists.
    pub fn populate(&self, track: &mut Track) {
        let base = track.sections.len();

        for rs in &self.records {
            let centre = uv::Vec3::from(
                rs.centre.map(Le::get).map(|c| c as f32 * WORLD_SCALE),
            );
            track.sections.push(TrackSection {
                centre,
                first_face: rs.first_face.get(),
                n_faces: rs.n_faces.get(),
                flags: rs.flags.get(),
                next: None,
                prev: None,
                junction: None,
            });
        }

        let n = self.records.len();
        for (i, rs) in self.records.iter().enumerate() {
            let section = &mut track.sections[base + i];
            section.next     = resolve(i, "next", rs.next.get(), n).map(|j| base + j);
            section.prev     = resolve(i, "prev", rs.prev.get(), n).map(|j| base + j);
            section.junction = resolve(i, "junction", rs.junction.get(), n).map(|j| base + j);
        }

        audit_links(&track.sections[base..], base);
    }
}

fn resolve(from: usize, field: &str, raw: i32, n: usize) -> Option<usize> {
    if raw == trs::NO_LINK { return None }
    match usize::try_from(raw) {
        Ok(j) if j < n => Some(j),
        _ => {
            log::warn!("section {from}: {field} link {raw} is out of range");
            None
        }
    }
}

/// Well-formed files store next/prev in matched pairs. Asymmetry is
/// reported but the graph is kept as decoded; consumers null-check links
/// anyway, and partial topology beats none during a load.
fn audit_links(sections: &[TrackSection], base: usize) {
    for (i, section) in sections.iter().enumerate() {
        let Some(j) = section.next else { continue };
        let back = sections[j - base].prev;
        if back != Some(base + i) {
            log::warn!(
                "asymmetric section links: {}.next = {j} but {j}.prev = {back:?}",
                base + i,
            );
        }
    }
}
