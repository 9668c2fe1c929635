use bytemuck::{self as bm, Pod, Zeroable};

/// A little-endian field of a raw on-disk record. The asset files were
/// authored for a little-endian console, so `get` is a no-op there; the
/// wrapper keeps `#[repr(C)]` record structs honest on any host.
#[repr(transparent)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct Le<T>(T) where T: Pod;

impl<T> std::fmt::Debug for Le<T> where T: Pod + std::fmt::Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} (le)", self.get())
    }
}

impl<T> Le<T> where T: Pod {
    pub fn get(mut self) -> T {
        if cfg!(target_endian = "big") {
            bm::bytes_of_mut(&mut self.0).reverse();
        }
        self.0
    }
}

impl<T> From<T> for Le<T> where T: Pod {
    fn from(mut x: T) -> Self {
        if cfg!(target_endian = "big") {
            bm::bytes_of_mut(&mut x).reverse();
        }
        Le(x)
    }
}
