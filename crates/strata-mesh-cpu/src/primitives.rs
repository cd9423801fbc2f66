//! Debug shapes (markers, light gizmos, placeholder bodies). Not part of terrain extraction.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use strata_geom::Vec3;

use crate::{MeshBuild, Vertex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Sphere,
    Cylinder,
    Cube,
    Capsule,
    Quad,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cube,
        PrimitiveKind::Capsule,
        PrimitiveKind::Quad,
    ];
}

pub fn build_primitive(kind: PrimitiveKind) -> MeshBuild {
    match kind {
        PrimitiveKind::Sphere => uv_sphere(0.2, 20, 20),
        PrimitiveKind::Cylinder => pipe(1.0, 3.0, 10),
        PrimitiveKind::Cube => unit_box(),
        PrimitiveKind::Capsule => capsule(0.5, 0.5, 10, 10),
        PrimitiveKind::Quad => quad(),
    }
}

// Connects `rings` consecutive rings of `sectors + 1` vertices, skipping the
// collapsed triangles at the first and last ring pair (the poles).
fn stitch_rings(mb: &mut MeshBuild, rings: usize, sectors: usize) {
    for i in 0..rings.saturating_sub(1) {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;
        for _ in 0..sectors {
            if i != 0 {
                mb.indices
                    .extend_from_slice(&[(k1 + 1) as u16, k2 as u16, k1 as u16]);
            }
            if i != rings - 2 {
                mb.indices
                    .extend_from_slice(&[(k2 + 1) as u16, k2 as u16, (k1 + 1) as u16]);
            }
            k1 += 1;
            k2 += 1;
        }
    }
}

fn push_ring(mb: &mut MeshBuild, radius: f32, stack_angle: f32, z_shift: f32, sectors: usize, t: f32) {
    let xy = radius * stack_angle.cos();
    let z = radius * stack_angle.sin();
    let sector_step = TAU / sectors as f32;
    for j in 0..=sectors {
        let a = j as f32 * sector_step;
        let local = Vec3::new(xy * a.cos(), xy * a.sin(), z);
        let s = j as f32 / sectors as f32;
        mb.push_vertex(Vertex::new(
            Vec3::new(local.x, local.y, local.z + z_shift),
            local / radius,
            [s, t, t],
        ));
    }
}

fn uv_sphere(radius: f32, stacks: usize, sectors: usize) -> MeshBuild {
    let mut mb = MeshBuild::new();
    let stack_step = PI / stacks as f32;
    for i in 0..=stacks {
        let t = i as f32 / stacks as f32;
        push_ring(&mut mb, radius, FRAC_PI_2 - i as f32 * stack_step, 0.0, sectors, t);
    }
    stitch_rings(&mut mb, stacks + 1, sectors);
    mb
}

// Two hemispheres `length` apart along -Z; the equator ring is emitted twice
// so the straight section is stitched like any other ring pair.
fn capsule(radius: f32, length: f32, stacks: usize, sectors: usize) -> MeshBuild {
    let mut mb = MeshBuild::new();
    let stack_step = PI / stacks as f32;
    let half = stacks / 2;
    for i in 0..=half {
        let t = i as f32 / stacks as f32;
        push_ring(&mut mb, radius, FRAC_PI_2 - i as f32 * stack_step, 0.0, sectors, t);
    }
    for i in half..=stacks {
        let t = i as f32 / stacks as f32;
        push_ring(&mut mb, radius, FRAC_PI_2 - i as f32 * stack_step, -length, sectors, t);
    }
    stitch_rings(&mut mb, stacks + 2, sectors);
    mb
}

// Open tube from z = -height to z = 0 with a fan cap at each end.
fn pipe(radius: f32, height: f32, sectors: usize) -> MeshBuild {
    let mut mb = MeshBuild::new();
    let sector_step = TAU / sectors as f32;
    let unit = |j: usize| {
        let a = j as f32 * sector_step;
        (a.cos(), a.sin())
    };

    for i in 0..2 {
        let h = -height + i as f32 * height;
        let t = 1.0 - i as f32;
        for j in 0..=sectors {
            let (ux, uy) = unit(j);
            mb.push_vertex(Vertex::new(
                Vec3::new(ux * radius, uy * radius, h),
                Vec3::new(ux, uy, 0.0),
                [j as f32 / sectors as f32, t, t],
            ));
        }
    }

    let base_center = mb.vertices.len();
    let top_center = base_center + sectors + 1;
    for i in 0..2 {
        let h = -height + i as f32 * height;
        let n = Vec3::new(0.0, 0.0, -1.0 + i as f32 * 2.0);
        mb.push_vertex(Vertex::new(Vec3::new(0.0, 0.0, h), n, [0.5, 0.5, 0.5]));
        for j in 0..sectors {
            let (ux, uy) = unit(j);
            mb.push_vertex(Vertex::new(
                Vec3::new(ux * radius, uy * radius, h),
                n,
                [-ux * 0.5 + 0.5, -uy * 0.5 + 0.5, -uy * 0.5 + 0.5],
            ));
        }
    }

    let ix = |v: usize| v as u16;
    for i in 0..sectors {
        let k1 = i;
        let k2 = i + sectors + 1;
        mb.indices
            .extend_from_slice(&[ix(k1), ix(k1 + 1), ix(k2), ix(k2), ix(k1 + 1), ix(k2 + 1)]);
    }
    for i in 0..sectors {
        let k = base_center + 1 + i;
        let next = if i + 1 < sectors { k + 1 } else { base_center + 1 };
        mb.indices
            .extend_from_slice(&[ix(k), ix(next), ix(base_center)]);
    }
    for i in 0..sectors {
        let k = top_center + 1 + i;
        let next = if i + 1 < sectors { k + 1 } else { top_center + 1 };
        mb.indices
            .extend_from_slice(&[ix(next), ix(k), ix(top_center)]);
    }
    mb
}

fn unit_box() -> MeshBuild {
    const RED: [f32; 3] = [1.0, 0.0, 0.0];
    const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
    const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
    #[rustfmt::skip]
    const FACES: [([[f32; 3]; 4], [f32; 3]); 6] = [
        // +Z
        ([[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]], [0.0, 0.0, 1.0]),
        // -Z
        ([[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]], [0.0, 0.0, -1.0]),
        // -X
        ([[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0]], [-1.0, 0.0, 0.0]),
        // +X
        ([[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]], [1.0, 0.0, 0.0]),
        // +Y
        ([[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]], [0.0, 1.0, 0.0]),
        // -Y
        ([[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0]], [0.0, -1.0, 0.0]),
    ];
    #[rustfmt::skip]
    const INDICES: [u16; 36] = [
        2, 1, 0, 0, 3, 2,
        4, 5, 6, 6, 7, 4,
        8, 9, 10, 10, 11, 8,
        14, 13, 12, 12, 15, 14,
        18, 17, 16, 16, 19, 18,
        20, 21, 22, 22, 23, 20,
    ];

    let mut mb = MeshBuild::new();
    for (corners, normal) in FACES {
        for (corner, color) in corners.into_iter().zip([RED, GREEN, BLUE, WHITE]) {
            mb.push_vertex(Vertex {
                position: corner,
                normal,
                color,
            });
        }
    }
    mb.indices.extend_from_slice(&INDICES);
    mb
}

fn quad() -> MeshBuild {
    let n = [0.0, 0.0, -1.0];
    let mut mb = MeshBuild::new();
    for (position, color) in [
        ([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0]),
        ([0.5, -0.5, 0.0], [0.0, 1.0, 0.0]),
        ([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]),
        ([-0.5, 0.5, 0.0], [1.0, 1.0, 1.0]),
    ] {
        mb.push_vertex(Vertex {
            position,
            normal: n,
            color,
        });
    }
    mb.indices.extend_from_slice(&[2, 1, 0, 0, 3, 2]);
    mb
}
