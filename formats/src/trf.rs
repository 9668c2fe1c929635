//! Track face file: 20-byte records tying vertex indices to a texture, a
//! base colour, and the flag bits that drive surface behaviour.

use {crate::le::Le, bytemuck as bm};

/// Face flag bits, preserved verbatim from the files.
pub const FACE_TRACK:  u8 = 0x01;
/// Pickup pad; pulses every frame.
pub const FACE_WEAPON: u8 = 0x02;
/// Mirror the texture across the quad.
pub const FACE_FLIP:   u8 = 0x04;
/// Speed-boost pad; rendered constant blue.
pub const FACE_BOOST:  u8 = 0x20;

#[repr(C)]
#[derive(Debug, Clone, Copy, bm::Pod, bm::Zeroable)]
pub struct RawFace {
    pub verts:  [Le<u16>; 4], //  0 ..  8
    pub normal: [Le<i16>; 3], //  8 .. 14
    pub tex:    u8,           // 14
    pub flags:  u8,           // 15
    pub colour: [u8; 4],      // 16 .. 20
}

pub const FACE_SIZE: usize = std::mem::size_of::<RawFace>();
const _: () = assert!(FACE_SIZE == 20);

impl RawFace {
    pub fn vert_indices(&self) -> [u16; 4] {
        self.verts.map(Le::get)
    }

    pub fn is_weapon(&self) -> bool { self.flags & FACE_WEAPON != 0 }
    pub fn is_boost(&self)  -> bool { self.flags & FACE_BOOST != 0 }

    /// Whether the animation system takes ownership of this face's colour.
    pub fn is_animated(&self) -> bool {
        self.flags & (FACE_WEAPON | FACE_BOOST) != 0
    }
}

pub fn faces(trf: &[u8]) -> Vec<RawFace> {
    trf.chunks_exact(FACE_SIZE)
        .map(bm::pod_read_unaligned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_bytes(tex: u8, flags: u8, colour: [u8; 4]) -> [u8; FACE_SIZE] {
        let mut bs = [0u8; FACE_SIZE];
        bs[0..2].copy_from_slice(&3u16.to_le_bytes());
        bs[2..4].copy_from_slice(&1u16.to_le_bytes());
        bs[4..6].copy_from_slice(&4u16.to_le_bytes());
        bs[6..8].copy_from_slice(&1u16.to_le_bytes());
        bs[14] = tex;
        bs[15] = flags;
        bs[16..20].copy_from_slice(&colour);
        bs
    }

    #[test]
    fn decodes_fields_at_their_offsets() {
        let fs = faces(&face_bytes(7, FACE_WEAPON | FACE_FLIP, [10, 20, 30, 0]));
        assert_eq!(fs.len(), 1);
        assert_eq!(fs[0].vert_indices(), [3, 1, 4, 1]);
        assert_eq!(fs[0].tex, 7);
        assert_eq!(fs[0].colour, [10, 20, 30, 0]);
    }

    #[test]
    fn flag_tests_are_independent() {
        let weapon = faces(&face_bytes(0, FACE_WEAPON, [0; 4]))[0];
        assert!(weapon.is_weapon() && !weapon.is_boost() && weapon.is_animated());

        let boost = faces(&face_bytes(0, FACE_BOOST | FACE_TRACK, [0; 4]))[0];
        assert!(boost.is_boost() && !boost.is_weapon() && boost.is_animated());

        let plain = faces(&face_bytes(0, FACE_TRACK, [0; 4]))[0];
        assert!(!plain.is_animated());
    }
}
