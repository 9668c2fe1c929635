use {crate::prim::Prim, ultraviolet as uv};

/// A named, ordered collection of primitives over a shared vertex pool.
/// Built once by a loader; the renderer reads it each frame, and only the
/// animator writes to it afterwards (colours only, through `prims`).
pub struct Mesh {
    pub name: String,
    pub verts: Vec<uv::Vec3>,
    pub prims: Vec<Prim>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Mesh {
        Mesh { name: name.into(), verts: Vec::new(), prims: Vec::new() }
    }
}
