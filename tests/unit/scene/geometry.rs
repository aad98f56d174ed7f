use super::*;

fn image(width: u32, height: u32) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8: Arc::new(vec![255; (width * height * 4) as usize]),
    }
}

#[test]
fn table_keeps_background_aspect() {
    let q = Quad::table(&image(200, 100));
    assert_eq!(q.vertices[0], Vec3::new(-4.0, -2.0, TABLE_Z));
    assert_eq!(q.vertices[2], Vec3::new(4.0, 2.0, TABLE_Z));
}

#[test]
fn subject_sits_in_front_of_table() {
    let q = Quad::subject(&image(100, 300));
    assert_eq!(q.vertices[1], Vec3::new(-1.0, 3.0, 0.0));
    assert!(q.vertices.iter().all(|v| v.z > TABLE_Z));
}

#[test]
fn triangles_cover_all_corners() {
    let mut seen = [false; 4];
    for tri in Quad::triangles() {
        for i in tri {
            seen[i] = true;
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn unrotated_model_view_pushes_scene_back() {
    let mv = Camera::default().model_view(0.0, 0.0, 0.0);
    let p = mv.transform_point(Vec3::ZERO);
    assert!((p.z + 5.0).abs() < 1e-12);
    assert!(p.x.abs() < 1e-12 && p.y.abs() < 1e-12);
}

#[test]
fn build_orders_table_before_subject_in_both_passes() {
    let params = SceneParams::default();
    let scene = Scene::build(&params, image(4, 4), image(2, 2));

    assert_eq!(scene.shaded.kind, PassKind::Shaded);
    assert_eq!(scene.textured.kind, PassKind::Textured);
    for pass in [&scene.shaded, &scene.textured] {
        assert_eq!(pass.surfaces.len(), 2);
        assert_eq!(pass.surfaces[0].material, Material::TABLE);
        assert_eq!(pass.surfaces[1].material, Material::SUBJECT);
    }
    assert_eq!(
        scene.shaded.light.position,
        Vec4::new(params.lamp_x, params.lamp_y, 1.0, 1.0)
    );
    assert_eq!(scene.textured.light, LightSource::room());
}
