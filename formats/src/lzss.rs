//! The bit-oriented LZSS variant used by the texture archives: a 13-bit
//! window position and a 4-bit run length, MSB-first, with position 0
//! reserved as the end-of-stream marker.

const IDX_BITS: u32 = 13;
const LEN_BITS: u32 = 4;
const WIN_LEN: usize = 1 << IDX_BITS;
const BREAKEVEN: usize = (IDX_BITS as usize + LEN_BITS as usize + 1) / 9;
const EOSTREAM: usize = 0;

#[derive(Debug, thiserror::Error)]
#[error("truncated lzss stream")]
pub struct Truncated;

struct Bits<'a> {
    bs: std::slice::Iter<'a, u8>,
    mask: u8,
    rack: u8,
}

impl<'a> Bits<'a> {
    fn new(bs: &'a [u8]) -> Self {
        Bits { bs: bs.iter(), mask: 0x80, rack: 0 }
    }

    fn take(&mut self, n: u32) -> Result<u32, Truncated> {
        let mut out_mask = 1u32 << (n - 1);
        let mut value = 0u32;
        while out_mask != 0 {
            if self.mask == 0x80 {
                self.rack = *self.bs.next().ok_or(Truncated)?;
            }
            if self.mask & self.rack != 0 { value |= out_mask; }
            out_mask >>= 1;
            self.mask >>= 1;
            if self.mask == 0 { self.mask = 0x80; }
        }
        Ok(value)
    }
}

/// Expands a whole stream. Input that runs out before the end-of-stream
/// marker is an error, not a panic; archives are untrusted data.
pub fn expand(bs: &[u8]) -> Result<Vec<u8>, Truncated> {
    let mut bits = Bits::new(bs);
    let mut window = [0u8; WIN_LEN];
    let mut cur_pos = 1;
    let mut out = Vec::new();

    loop {
        let literal = bits.take(1)? != 0;
        if literal {
            let byte = bits.take(8)? as u8;
            out.push(byte);
            window[cur_pos] = byte;
            cur_pos = (cur_pos + 1) % WIN_LEN;
        }
        else {
            let pos = bits.take(IDX_BITS)? as usize;
            if pos == EOSTREAM { break Ok(out) }
            let len = bits.take(LEN_BITS)? as usize + BREAKEVEN;

            for i in 0 ..= len {
                let byte = window[(pos + i) % WIN_LEN];
                out.push(byte);
                window[cur_pos] = byte;
                cur_pos = (cur_pos + 1) % WIN_LEN;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// MSB-first bit packer, the mirror image of `Bits`.
    pub(crate) fn pack_bits(fields: &[(u32, u32)]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut rack = 0u8;
        let mut mask = 0x80u8;
        for &(value, n) in fields {
            for bit in (0..n).rev() {
                if value >> bit & 1 != 0 { rack |= mask; }
                mask >>= 1;
                if mask == 0 {
                    out.push(rack);
                    rack = 0;
                    mask = 0x80;
                }
            }
        }
        if mask != 0x80 { out.push(rack); }
        out
    }

    /// Encodes `bytes` as an all-literal stream with a proper terminator.
    pub(crate) fn literals(bytes: &[u8]) -> Vec<u8> {
        let mut fields: Vec<(u32, u32)> = bytes.iter()
            .flat_map(|&b| [(1, 1), (b as u32, 8)])
            .collect();
        fields.push((0, 1));
        fields.push((EOSTREAM as u32, IDX_BITS));
        pack_bits(&fields)
    }

    #[test]
    fn expands_literals() {
        let stream = literals(b"ab");
        assert_eq!(stream, [0xb0, 0xd8, 0x80, 0x00]);
        assert_eq!(expand(&stream).unwrap(), b"ab");
    }

    #[test]
    fn expands_window_matches() {
        // 'a', then a copy of window[1..=3]; the copy overlaps its own
        // output, so this expands to "aaaa"
        let stream = pack_bits(&[
            (1, 1), (b'a' as u32, 8),
            (0, 1), (1, IDX_BITS), (0, LEN_BITS),
            (0, 1), (EOSTREAM as u32, IDX_BITS),
        ]);
        assert_eq!(expand(&stream).unwrap(), b"aaaa");
    }

    #[test]
    fn empty_stream_is_just_a_terminator() {
        let stream = pack_bits(&[(0, 1), (EOSTREAM as u32, IDX_BITS)]);
        assert_eq!(expand(&stream).unwrap(), b"");
    }

    #[test]
    fn truncated_input_is_an_error() {
        assert!(expand(&[0xb0]).is_err());
        assert!(expand(&[]).is_err());
    }
}
