use super::*;

#[test]
fn batch_names_use_subject_stem_and_iteration() {
    let names = batch_output_names(Path::new("photos/cat.jpg"), 3).unwrap();
    assert_eq!(
        names,
        [
            "cat_3_image1.png".to_string(),
            "cat_3_image2.png".to_string(),
            "cat_3_out.png".to_string(),
        ]
    );
}

#[test]
fn batch_names_reject_paths_without_stem() {
    let err = batch_output_names(Path::new(""), 0).unwrap_err();
    assert!(matches!(err, TabletopError::Config(_)));
}

#[test]
fn empty_batches_are_rejected_before_rendering() {
    struct Unreachable;
    impl RenderBackend for Unreachable {
        fn open(&mut self, _canvas: crate::foundation::core::Canvas) -> TabletopResult<()> {
            panic!("open must not be called");
        }
        fn render(
            &mut self,
            _pass: &crate::scene::geometry::ScenePass,
        ) -> TabletopResult<crate::foundation::core::FrameRgb8> {
            panic!("render must not be called");
        }
        fn close(&mut self) {}
    }

    let base = SceneParams::default();
    let no_subjects = BatchPlan {
        subjects: vec![],
        iterations: 2,
        seed: 1,
        base: base.clone(),
    };
    assert!(run_batch(&no_subjects, &mut Unreachable).is_err());

    let no_iterations = BatchPlan {
        subjects: vec![PathBuf::from("a.png")],
        iterations: 0,
        seed: 1,
        base,
    };
    assert!(run_batch(&no_iterations, &mut Unreachable).is_err());
}
