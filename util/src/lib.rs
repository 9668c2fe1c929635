/// 64-bit FNV-1a. Used to fingerprint asset files in load-time logs, so a
/// report of "track renders wrong" can be matched to the exact data it was
/// loaded from.
pub const fn fnv1a_64(bs: &[u8]) -> u64 {
    const H0: u64 = 0xcbf29ce4_84222325;
    const A:  u64 = 0x00000100_000001B3;

    let mut h = H0;
    let mut i = 0;
    while i != bs.len() {
        h ^= bs[i] as u64;
        h = h.wrapping_mul(A);
        i += 1;
    }
    h
}
