//! Track vertex file: a bare sequence of 16-byte records.

use {crate::le::Le, bytemuck as bm};

#[repr(C)]
#[derive(Debug, Clone, Copy, bm::Pod, bm::Zeroable)]
pub struct RawVertex {
    pub pos: [Le<i32>; 3], //  0 .. 12, fixed-point world coordinates
    _pad:    [u8; 4],      // 12 .. 16
}

pub const VERTEX_SIZE: usize = std::mem::size_of::<RawVertex>();
const _: () = assert!(VERTEX_SIZE == 16);

impl RawVertex {
    pub fn new(pos: [i32; 3]) -> RawVertex {
        RawVertex { pos: pos.map(Le::from), _pad: [0; 4] }
    }

    pub fn xyz(&self) -> [i32; 3] {
        self.pos.map(Le::get)
    }
}

/// Decodes every complete record; trailing bytes short of a record are
/// dropped.
pub fn vertices(trv: &[u8]) -> Vec<RawVertex> {
    trv.chunks_exact(VERTEX_SIZE)
        .map(bm::pod_read_unaligned)
        .collect()
}
