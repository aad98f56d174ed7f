use std::sync::Arc;

use super::*;

fn light_at(position: Vec3) -> EyeLight {
    EyeLight {
        position,
        ambient: [0.0; 3],
        diffuse: [1.0; 3],
        specular: [1.0; 3],
    }
}

#[test]
fn head_on_lamp_saturates_diffuse_and_specular() {
    // light and eye both straight in front of the surface point
    let pos = Vec3::new(0.0, 0.0, -5.0);
    let c = shade_fragment(Vec3::new(0.0, 0.0, 1.0), pos, &light_at(Vec3::ZERO), 5.0);
    for v in c {
        assert!((v - 2.0).abs() < 1e-9, "{c:?}");
    }
}

#[test]
fn light_behind_surface_leaves_only_ambient() {
    let pos = Vec3::new(0.0, 0.0, -5.0);
    let light = EyeLight {
        ambient: [0.25; 3],
        ..light_at(Vec3::new(0.0, 0.0, -10.0))
    };
    let c = shade_fragment(Vec3::new(0.0, 0.0, 1.0), pos, &light, 128.0);
    assert_eq!(c, [0.25; 3]);
}

#[test]
fn vertex_lighting_adds_global_ambient_and_clamps() {
    let pos = Vec3::new(0.0, 0.0, -5.0);
    let n = Vec3::new(0.0, 0.0, 1.0);
    assert_eq!(light_vertex(n, pos, &light_at(Vec3::ZERO)), [1.0; 3]);

    let behind = light_at(Vec3::new(0.0, 0.0, -10.0));
    let c = light_vertex(n, pos, &behind);
    for v in c {
        assert!((v - 0.2).abs() < 1e-12);
    }
}

#[test]
fn bilinear_hits_texel_centers_exactly() {
    let tex = PreparedImage {
        width: 2,
        height: 1,
        rgba8: Arc::new(vec![0, 0, 0, 255, 255, 255, 255, 255]),
    };
    assert_eq!(sample_bilinear(&tex, 0.25, 0.5), [0.0; 3]);
    assert_eq!(sample_bilinear(&tex, 0.75, 0.5), [1.0; 3]);
    let mid = sample_bilinear(&tex, 0.5, 0.5);
    assert!((mid[0] - 0.5).abs() < 1e-12);
}

#[test]
fn bilinear_wraps_at_the_edges() {
    let tex = PreparedImage {
        width: 2,
        height: 1,
        rgba8: Arc::new(vec![0, 0, 0, 255, 255, 255, 255, 255]),
    };
    // s = 0 sits halfway between the last and first texel under repeat wrapping
    let edge = sample_bilinear(&tex, 0.0, 0.5);
    assert!((edge[0] - 0.5).abs() < 1e-12);
}

#[test]
fn unorm8_rounds_to_nearest() {
    assert_eq!(to_unorm8(0.0), 0);
    assert_eq!(to_unorm8(1.0), 255);
    assert_eq!(to_unorm8(2.0), 255);
    assert_eq!(to_unorm8(-1.0), 0);
    assert_eq!(to_unorm8(0.5), 128);
}
