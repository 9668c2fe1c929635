//! Track section file: fixed 156-byte records describing the centreline
//! topology. There is no header; the record count is the file size divided
//! by the record size. Link fields store `-1` for "no link" and otherwise
//! index other records of the same file.

use {crate::le::Le, bytemuck as bm};

/// The "no link" sentinel used by every link field.
pub const NO_LINK: i32 = -1;

/// Section flag bit: this section starts a junction branch.
pub const SECTION_JUNCTION_START: u16 = 0x10;

#[repr(C)]
#[derive(Clone, Copy, bm::Pod, bm::Zeroable)]
pub struct RawSection {
    pub junction:   Le<i32>,      //    0 ..   4
    pub prev:       Le<i32>,      //    4 ..   8
    pub next:       Le<i32>,      //    8 ..  12
    pub centre:     [Le<i32>; 3], //   12 ..  24
    _pad0:          [u8; 116],    //   24 .. 140
    pub first_face: Le<u32>,      //  140 .. 144
    pub n_faces:    Le<u16>,      //  144 .. 146
    _pad1:          [u8; 4],      //  146 .. 150
    pub flags:      Le<u16>,      //  150 .. 152
    _pad2:          [u8; 4],      //  152 .. 156
}

pub const SECTION_SIZE: usize = std::mem::size_of::<RawSection>();
const _: () = assert!(SECTION_SIZE == 156);

impl RawSection {
    /// Assembles a record in memory; tests and tools want this, the game
    /// only ever decodes.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        junction: i32,
        prev: i32,
        next: i32,
        centre: [i32; 3],
        first_face: u32,
        n_faces: u16,
        flags: u16,
    ) -> RawSection {
        let mut s: RawSection = bm::Zeroable::zeroed();
        s.junction = junction.into();
        s.prev = prev.into();
        s.next = next.into();
        s.centre = centre.map(Le::from);
        s.first_face = first_face.into();
        s.n_faces = n_faces.into();
        s.flags = flags.into();
        s
    }
}

/// Decodes every complete record; a partial trailing record is discarded.
pub fn sections(trs: &[u8]) -> Vec<RawSection> {
    trs.chunks_exact(SECTION_SIZE)
        .map(bm::pod_read_unaligned)
        .collect()
}
