//! Decoders for the binary asset formats of the original game: the
//! compressed texture archives (`.cmp`) holding legacy console images, and
//! the per-track geometry/topology files (`.trv`, `.trf`, `.trs`).
//!
//! Everything here is pure: bytes in, structures out. File I/O, caching,
//! and GPU uploads live in the `track` crate.

pub mod cmp;
pub mod le;
pub mod lzss;
pub mod tim;
pub mod trf;
pub mod trs;
pub mod trv;

pub use le::Le;
