//! Per-frame animation of flagged track faces. The animator owns no mesh
//! data; it keeps primitive indices and writes colours through the owning
//! mesh each update.

use {
    crate::{mesh::Mesh, prim::Rgba},
    formats::trf::{self, RawFace},
    std::collections::HashSet,
};

/// Boost pads render as a constant, fully opaque blue.
const BOOST_COLOUR: Rgba = Rgba([0, 0, 255, 255]);

/// Pickup pulse period, seconds. The clock wraps here so a long session
/// never loses float precision.
const PERIOD: f32 = 2.;

struct AnimatedFace {
    flags: u8,
    base: [u8; 4],
    /// The two triangle primitives of the quad this face controls.
    prims: [usize; 2],
}

#[derive(Default)]
pub struct Animator {
    faces: Vec<AnimatedFace>,
    registered: HashSet<String>,
    clock: f32,
}

impl Animator {
    pub fn new() -> Animator {
        Animator::default()
    }

    /// Records which primitives each pickup/boost face controls. The mesh
    /// builder splits every quad face into two adjacent triangles, so face
    /// `i` controls primitives `2i` and `2i+1`. Faces without either flag
    /// are skipped. Registration is at-most-once per mesh: registering a
    /// mesh that was already registered is ignored rather than doubling
    /// the bookkeeping.
    pub fn register(&mut self, mesh: &Mesh, faces: &[RawFace]) {
        if !self.registered.insert(mesh.name.clone()) {
            log::debug!("animated faces of {} already registered", mesh.name);
            return;
        }

        let before = self.faces.len();
        for (i, face) in faces.iter().enumerate() {
            if !face.is_animated() { continue }

            let prims = [2 * i, 2 * i + 1];
            if prims[1] >= mesh.prims.len() {
                log::warn!("animated face {i} has no primitives in mesh {}", mesh.name);
                continue;
            }
            self.faces.push(AnimatedFace { flags: face.flags, base: face.colour, prims });
        }
        log::debug!("{}: {} animated faces", mesh.name, self.faces.len() - before);
    }

    /// Advances the clock and rewrites the colour of every registered
    /// face. Both primitives of a face always receive the same colour.
    /// With nothing registered this is a no-op.
    pub fn update(&mut self, mesh: &mut Mesh, dt: f32) {
        self.clock = (self.clock + dt) % PERIOD;

        for face in &self.faces {
            let colour = if face.flags & trf::FACE_BOOST != 0 {
                BOOST_COLOUR
            }
            else {
                pickup_colour(face.base, self.clock)
            };

            for &p in &face.prims {
                if let Some(prim) = mesh.prims.get_mut(p) {
                    prim.set_colour(colour);
                }
            }
        }
    }
}

/// Periodic pulse between a dimmed and a brightened take on the face's
/// base colour. Alpha is always forced to 255; pads must never fade out,
/// whatever the file stored.
fn pickup_colour(base: [u8; 4], clock: f32) -> Rgba {
    let s = 0.5 + 0.5 * (clock / PERIOD * std::f32::consts::TAU).sin();
    let pulse = |c: u8| (c as f32 * (0.25 + 0.75 * s) + 48. * s).min(255.) as u8;
    let [r, g, b, _] = base;
    Rgba([pulse(r), pulse(g), pulse(b), 255])
}
