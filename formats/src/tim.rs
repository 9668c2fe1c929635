//! Decoder for the legacy console image format the archives contain:
//! 4- or 8-bit CLUT-indexed images, or 16-bit direct colour, all built on
//! 15-bit RGB with a transparency bit.

use {
    anyhow::{Result as Anyhow, anyhow, bail},
    bytemuck::pod_read_unaligned as read,
    image::RgbaImage,
};

pub fn decode(tim: &[u8]) -> Anyhow<RgbaImage> {
    if tim.len() < 8 { bail!("truncated tim") }
    if tim[0] != 0x10 || tim[1] != 0x00 { bail!("not a tim") }
    let pixel_type = tim[4] & 3;
    let got_clut = tim[4] & 8 != 0;
    if got_clut != (pixel_type < 2) { bail!("inconsistent pixel type and clut presence flag") }
    if got_clut { from_indexed(tim, pixel_type) }
    else        { from_direct(tim, pixel_type) }
}

fn from_indexed(tim: &[u8], pixel_type: u8) -> Anyhow<RgbaImage> {
    let bs = &tim[8..];

    debug_assert!(pixel_type < 2);
    let four_bit = pixel_type == 0;

    let (clut, bs) = {
        let clut_len_bs = bs.get(0..4).ok_or(anyhow!("truncated tim"))?;
        let clut_len = read::<u32>(clut_len_bs) as usize;
        if bs.len() < clut_len { bail!("truncated tim") }
        bs.split_at(clut_len)
    };

    let clut = {
        let clut = clut.get(12..).ok_or(anyhow!("truncated tim"))?;
        let pal_n = if four_bit { 16 } else { 256 };
        if clut.len() != pal_n * 2 { bail!("wrong sized clut") }
        clut.chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .map(rgb15_to_rgba8)
            .collect::<Vec<_>>()
    };

    let (header, bs) = grab_block_header(bs)?;
    let pixels_len = (read::<u32>(&header[0..4]) as usize)
        .checked_sub(12)
        .ok_or(anyhow!("bad tim block length"))?;
    let wide = read::<u16>(&header[8..10]) as u32;
    let high = read::<u16>(&header[10..12]) as u32;
    if wide == 0 || high == 0 { bail!("degenerate tim dimensions") }
    let pixels = bs.get(..pixels_len).ok_or(anyhow!("truncated tim"))?;

    // stored width counts 16-bit units: 4 indices each at 4bpp, 2 at 8bpp
    let (wide, pixels) = if four_bit {
        let pixels = pixels.iter().copied()
            .flat_map(|b| [(b & 0xf) as usize, (b >> 4) as usize])
            .flat_map(|i| clut[i])
            .collect();
        (wide * 4, pixels)
    }
    else {
        let pixels = pixels.iter().copied()
            .flat_map(|i| clut[i as usize])
            .collect();
        (wide * 2, pixels)
    };

    RgbaImage::from_vec(wide, high, pixels)
        .ok_or_else(|| anyhow!("inconsistent tim dimensions"))
}

fn from_direct(tim: &[u8], pixel_type: u8) -> Anyhow<RgbaImage> {
    debug_assert!(pixel_type >= 2);
    if pixel_type != 2 { bail!("unsupported direct-colour depth") }

    let (header, bs) = grab_block_header(&tim[8..])?;
    let pixels_len = (read::<u32>(&header[0..4]) as usize)
        .checked_sub(12)
        .ok_or(anyhow!("bad tim block length"))?;
    let wide = read::<u16>(&header[8..10]) as u32;
    let high = read::<u16>(&header[10..12]) as u32;
    let pixels = bs.get(..pixels_len).ok_or(anyhow!("truncated tim"))?;

    let rgba = pixels.chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .flat_map(rgb15_to_rgba8)
        .collect();

    RgbaImage::from_vec(wide, high, rgba)
        .ok_or_else(|| anyhow!("inconsistent tim dimensions"))
}

/// Splits off a 12-byte block header: u32 length, then x/y/w/h as u16.
fn grab_block_header(bs: &[u8]) -> Anyhow<(&[u8], &[u8])> {
    if bs.len() < 12 { bail!("truncated tim") }
    Ok(bs.split_at(12))
}

/// 15-bit colour to RGBA8. The top bit marks the pixel fully transparent;
/// everything else is opaque.
fn rgb15_to_rgba8(bits: u16) -> [u8; 4] {
    if (bits >> 15) & 0x01 != 0 {
        return [0; 4];
    }

    let chan = |i: u16| {
        let y = ((bits >> i) & 0x1f) as f32 / 31.;
        (y * 255.) as u8
    };

    let [r, g, b] = [0, 5, 10].map(chan);
    [r, g, b, 255]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 1x1 direct-colour image of a single 15-bit pixel.
    pub(crate) fn direct_1x1(pixel: u16) -> Vec<u8> {
        let mut tim = vec![0x10, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];
        tim.extend_from_slice(&14u32.to_le_bytes()); // block: 12 header + 2 data
        tim.extend_from_slice(&[0; 4]);              // x, y
        tim.extend_from_slice(&1u16.to_le_bytes());  // wide
        tim.extend_from_slice(&1u16.to_le_bytes());  // high
        tim.extend_from_slice(&pixel.to_le_bytes());
        tim
    }

    /// 2x1 8-bit indexed image: indices 0 and 1 into a 256-entry clut.
    fn indexed_2x1(clut0: u16, clut1: u16) -> Vec<u8> {
        let mut tim = vec![0x10, 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00];

        let clut_len = 12 + 256 * 2;
        tim.extend_from_slice(&(clut_len as u32).to_le_bytes());
        tim.extend_from_slice(&[0; 8]); // clut x, y, w, h: unused here
        tim.extend_from_slice(&clut0.to_le_bytes());
        tim.extend_from_slice(&clut1.to_le_bytes());
        tim.extend_from_slice(&[0; 254 * 2]);

        tim.extend_from_slice(&14u32.to_le_bytes()); // 12 header + 2 indices
        tim.extend_from_slice(&[0; 4]);
        tim.extend_from_slice(&1u16.to_le_bytes()); // 1 halfword = 2 indices
        tim.extend_from_slice(&1u16.to_le_bytes());
        tim.extend_from_slice(&[0, 1]);
        tim
    }

    #[test]
    fn decodes_indexed_pixels_through_the_clut() {
        // entry 0: white, opaque; entry 1: transparency bit set
        let image = decode(&indexed_2x1(0x7fff, 0x8000)).unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn decodes_direct_colour() {
        // bits 10..15 set: pure blue
        let image = decode(&direct_1x1(0x7c00)).unwrap();
        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn rejects_bad_magic() {
        assert!(decode(&[0u8; 32]).is_err());
        assert!(decode(b"\x10\x00").is_err());
    }

    #[test]
    fn rejects_truncated_pixel_data() {
        let mut tim = direct_1x1(0x7c00);
        tim.truncate(tim.len() - 1);
        assert!(decode(&tim).is_err());
    }
}
