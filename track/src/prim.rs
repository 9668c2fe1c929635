//! The primitive model: one record per renderable polygon. Variant layouts
//! are fixed at construction; the only fields that ever change afterwards
//! are the colours, and only the animation system changes them.

use crate::tex::TextureHandle;

/// An RGBA8 colour, laid out exactly as the renderer consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const WHITE:       Rgba = Rgba([0xff, 0xff, 0xff, 0xff]);

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba([r, g, b, a])
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(rgba: [u8; 4]) -> Self { Rgba(rgba) }
}

/// Flat-shaded textured triangle.
#[derive(Debug, Clone)]
pub struct Ft3 {
    pub verts: [u16; 3],
    pub tex: TextureHandle,
    /// Texture coordinates in the legacy 0..255 byte space.
    pub uvs: [[u8; 2]; 3],
    /// The same coordinates normalized to 0..1, for arbitrary texture sizes.
    pub sts: [[f32; 2]; 3],
    pub colour: Rgba,
}

/// Flat-shaded textured quad.
#[derive(Debug, Clone)]
pub struct Ft4 {
    pub verts: [u16; 4],
    pub tex: TextureHandle,
    pub uvs: [[u8; 2]; 4],
    pub sts: [[f32; 2]; 4],
    pub colour: Rgba,
}

/// Gouraud-shaded untextured quad.
#[derive(Debug, Clone)]
pub struct G4 {
    pub verts: [u16; 4],
    pub colours: [Rgba; 4],
}

/// Gouraud-shaded textured quad.
#[derive(Debug, Clone)]
pub struct Gt4 {
    pub verts: [u16; 4],
    pub tex: TextureHandle,
    pub uvs: [[u8; 2]; 4],
    pub sts: [[f32; 2]; 4],
    pub colours: [Rgba; 4],
}

#[derive(Debug, Clone)]
pub enum Prim {
    Ft3(Ft3),
    Ft4(Ft4),
    G4(G4),
    Gt4(Gt4),
}

impl Prim {
    /// The colour the renderer sees; for Gouraud variants, the first
    /// vertex's.
    pub fn colour(&self) -> Rgba {
        match self {
            Prim::Ft3(p) => p.colour,
            Prim::Ft4(p) => p.colour,
            Prim::G4(p)  => p.colours[0],
            Prim::Gt4(p) => p.colours[0],
        }
    }

    /// Overwrites every colour slot. Animated faces rely on this reaching
    /// all vertex colours of Gouraud variants, not just the first.
    pub fn set_colour(&mut self, colour: Rgba) {
        match self {
            Prim::Ft3(p) => p.colour = colour,
            Prim::Ft4(p) => p.colour = colour,
            Prim::G4(p)  => p.colours = [colour; 4],
            Prim::Gt4(p) => p.colours = [colour; 4],
        }
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        match self {
            Prim::Ft3(p) => Some(p.tex),
            Prim::Ft4(p) => Some(p.tex),
            Prim::G4(_)  => None,
            Prim::Gt4(p) => Some(p.tex),
        }
    }

    pub fn n_verts(&self) -> usize {
        match self {
            Prim::Ft3(_) => 3,
            _ => 4,
        }
    }
}
