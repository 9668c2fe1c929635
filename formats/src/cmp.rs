//! The compressed texture archive container: a `u32` image count, one
//! `u32` byte length per image, then every image concatenated and run
//! through LZSS as a single stream.

use {
    crate::{lzss, tim},
    anyhow::{Result as Anyhow, anyhow, bail},
    image::RgbaImage,
};

pub fn unpack(cmp: &[u8]) -> Anyhow<Vec<RgbaImage>> {
    if cmp.len() < 4 { bail!("archive too short") }
    let n_images = u32::from_le_bytes(cmp[0..4].try_into().unwrap()) as usize;

    let lens_len = n_images.checked_mul(4)
        .filter(|&len| len <= cmp.len() - 4)
        .ok_or_else(|| anyhow!("archive image table overruns file"))?;
    let (lens, data) = cmp[4..].split_at(lens_len);

    let mut images = lzss::expand(data)?;

    lens.chunks_exact(4)
        .map(|len| {
            let len = u32::from_le_bytes(len.try_into().unwrap()) as usize;
            // zero-length entries are real in shipped archives; they stand
            // in for images the track never references
            if len == 0 { return Ok(RgbaImage::from_pixel(1, 1, [0; 4].into())) }
            if len > images.len() { bail!("archive image table overruns data") }
            let rest = images.split_off(len);
            let image = std::mem::replace(&mut images, rest);
            tim::decode(&image)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use {super::*, crate::{lzss::tests::literals, tim::tests::direct_1x1}};

    /// Builds an archive from raw image payloads, compressing them the way
    /// the originals were.
    pub(crate) fn archive(payloads: &[&[u8]]) -> Vec<u8> {
        let mut cmp = (payloads.len() as u32).to_le_bytes().to_vec();
        for payload in payloads {
            cmp.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        }
        let data: Vec<u8> = payloads.concat();
        cmp.extend_from_slice(&literals(&data));
        cmp
    }

    #[test]
    fn unpacks_images_in_archive_order() {
        let blue = direct_1x1(0x7c00);
        let red = direct_1x1(0x001f);
        let images = unpack(&archive(&[&blue, &red])).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(images[1].get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn zero_length_entry_becomes_transparent_placeholder() {
        let blue = direct_1x1(0x7c00);
        let images = unpack(&archive(&[&blue, &[]])).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].dimensions(), (1, 1));
        assert_eq!(images[1].get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn empty_archive_unpacks_to_nothing() {
        let images = unpack(&archive(&[])).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn rejects_malformed_archives() {
        assert!(unpack(&[]).is_err());
        assert!(unpack(&[9, 0, 0, 0]).is_err());          // table overruns file
        assert!(unpack(&[1, 0, 0, 0, 4, 0, 0, 0]).is_err()); // truncated stream
    }
}
