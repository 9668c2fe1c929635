//! Builds the renderable road mesh from the vertex and face files. Every
//! face in the track files is a quad; it becomes two triangle primitives,
//! which keeps the animator's face-to-primitive mapping trivial: face `i`
//! owns primitives `2i` and `2i+1`.

use {
    crate::{
        mesh::Mesh,
        prim::{Ft3, Prim, Rgba},
        sections::WORLD_SCALE,
        tex::TextureHandle,
    },
    formats::{
        trf::{self, RawFace},
        trv::RawVertex,
    },
    ultraviolet as uv,
};

pub fn build_mesh(
    name: &str,
    verts: &[RawVertex],
    faces: &[RawFace],
    textures: &[TextureHandle],
) -> Mesh {
    let mut mesh = Mesh::new(name);

    mesh.verts = verts.iter()
        .map(|v| uv::Vec3::from(v.xyz().map(|c| c as f32 * WORLD_SCALE)))
        .collect();

    mesh.prims = faces.iter()
        .flat_map(|face| {
            let [r, g, b, _] = face.colour;
            let colour = Rgba([r, g, b, 255]);

            let tex = textures.get(face.tex as usize).copied()
                .unwrap_or(TextureHandle::FALLBACK);

            // corner order matches the original rasteriser; FLIP mirrors it
            let corners: [[u8; 2]; 4] = [[255, 0], [0, 0], [0, 255], [255, 255]];
            let order = if face.flags & trf::FACE_FLIP == 0 { [0, 1, 2, 3] }
                        else                                { [1, 0, 3, 2] };
            let uvs = order.map(|i| corners[i]);
            let sts = uvs.map(|[u, v]| [u as f32 / 255., v as f32 / 255.]);

            let vs = face.vert_indices();
            let tri = move |is: [usize; 3]| Prim::Ft3(Ft3 {
                verts: is.map(|i| vs[i]),
                tex,
                uvs: is.map(|i| uvs[i]),
                sts: is.map(|i| sts[i]),
                colour,
            });

            [tri([0, 1, 2]), tri([0, 2, 3])]
        })
        .collect();

    mesh
}
