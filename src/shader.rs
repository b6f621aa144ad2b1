use bytemuck::{Pod, Zeroable};
use glyph_swarm::Particle;
use rand::Rng;

pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// Half extent of the random shard vertices, in world units.
pub const SHARD_RADIUS: f32 = 3.0;
const SHARD_WIDTH_SEGMENTS: u16 = 4;
const SHARD_HEIGHT_SEGMENTS: u16 = 4;

/// One vertex of the shared shard mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ShardVertex {
    pub local: [f32; 3],
}

/// Per-particle instance data.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Instance {
    pub position: [f32; 3],
    pub rotation: [f32; 2],
    pub color: [f32; 3],
}

impl From<&Particle> for Instance {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            rotation: p.rotation.to_array(),
            color: p.color.to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
}

/// Low-poly sphere topology with every vertex thrown to a random spot.
///
/// The first vertex stays at the origin, the rest land in
/// `[-SHARD_RADIUS, SHARD_RADIUS]` on each axis, so each triangle fan reads
/// as a jagged crystal rather than a ball.
pub fn shard_mesh(rng: &mut impl Rng) -> (Vec<ShardVertex>, Vec<u16>) {
    let ws = SHARD_WIDTH_SEGMENTS;
    let hs = SHARD_HEIGHT_SEGMENTS;
    let row = ws + 1;

    let vertex_count = (row * (hs + 1)) as usize;
    let mut vertices = Vec::with_capacity(vertex_count);
    vertices.push(ShardVertex { local: [0.0; 3] });
    while vertices.len() < vertex_count {
        vertices.push(ShardVertex {
            local: [
                rng.gen_range(-SHARD_RADIUS..SHARD_RADIUS),
                rng.gen_range(-SHARD_RADIUS..SHARD_RADIUS),
                rng.gen_range(-SHARD_RADIUS..SHARD_RADIUS),
            ],
        });
    }

    let mut indices = Vec::new();
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            // Pole rows collapse to a single triangle per segment
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    (vertices, indices)
}
