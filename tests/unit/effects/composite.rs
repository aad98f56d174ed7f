use super::*;
use crate::foundation::core::Canvas;

fn uniform(edge: u32, rgb: [u8; 3]) -> FrameRgb8 {
    FrameRgb8::filled(Canvas::square(edge), rgb, ChannelOrder::Rgb)
}

fn pattern(width: u32, height: u32, seed: u8) -> FrameRgb8 {
    let data = (0..width * height * 3)
        .map(|i| (i as u8).wrapping_mul(37).wrapping_add(seed))
        .collect();
    FrameRgb8::new(width, height, data, ChannelOrder::Rgb).unwrap()
}

#[test]
fn grayscale_uses_bt601_by_channel_name() {
    let rgb = FrameRgb8::new(1, 1, vec![200, 100, 50], ChannelOrder::Rgb).unwrap();
    let bgr = FrameRgb8::new(1, 1, vec![50, 100, 200], ChannelOrder::Bgr).unwrap();
    let g_rgb = grayscale(&rgb, LumaWeights::BT601);
    let g_bgr = grayscale(&bgr, LumaWeights::BT601);
    assert!((g_rgb.at(0, 0) - 124.2).abs() < 1e-9);
    assert_eq!(g_rgb, g_bgr);
}

#[test]
fn grayscale_of_white_is_unclamped_255() {
    let g = grayscale(&uniform(2, [255, 255, 255]), LumaWeights::default());
    assert_eq!(g.values, vec![255.0; 4]);
}

#[test]
fn compositing_is_deterministic() {
    let a = pattern(5, 4, 3);
    let b = pattern(5, 4, 91);
    assert_eq!(composite(&a, &b).unwrap(), composite(&a, &b).unwrap());
}

#[test]
fn black_shader_pass_gives_black_output() {
    let a = uniform(3, [0, 0, 0]);
    let b = pattern(3, 3, 17);
    let out = composite(&a, &b).unwrap();
    assert!(out.data.iter().all(|&c| c == 0));
}

#[test]
fn white_shader_pass_scales_texture_and_adds_offset() {
    let a = uniform(1, [255, 255, 255]);
    for (v, expected) in [(0u8, 25u8), (5, 30), (100, 115), (200, 205), (255, 255)] {
        let b = uniform(1, [v, v, v]);
        let out = composite(&a, &b).unwrap();
        assert_eq!(out.data, vec![expected; 3], "texture value {v}");
    }
}

#[test]
fn uniform_gray_100_composites_to_45() {
    let g = uniform(2, [100, 100, 100]);
    let out = composite(&g, &g).unwrap();
    assert_eq!(out.data, vec![45; 12]);
}

#[test]
fn uniform_gray_composites_to_truncated_closed_form() {
    for v in 0..=255u8 {
        let frame = uniform(1, [v, v, v]);
        let out = composite(&frame, &frame).unwrap();
        let g = f64::from(v);
        let expected = (g * g / 255.0 * 0.9 + g * 0.1).trunc() as u8;
        assert_eq!(out.data, vec![expected; 3], "gray {v}");
    }
}

#[test]
fn truncation_differs_from_rounding() {
    // green blends to 161.17..., red and blue to exactly 0.5
    let a = uniform(1, [5, 200, 5]);
    let luma = LumaWeights {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    let b = uniform(1, [0, 200, 0]);
    let trunc = composite_with(
        &a,
        &b,
        &CompositeOpts {
            luma,
            ..CompositeOpts::default()
        },
    )
    .unwrap();
    let round = composite_with(
        &a,
        &b,
        &CompositeOpts {
            luma,
            quantize: Quantize::RoundNearest,
            ..CompositeOpts::default()
        },
    )
    .unwrap();
    assert_eq!(trunc.data, vec![0, 161, 0]);
    assert_eq!(round.data, vec![1, 161, 1]);
}

#[test]
fn quantize_clamps_out_of_range_values() {
    assert_eq!(Quantize::Truncate.apply(255.9), 255);
    assert_eq!(Quantize::Truncate.apply(300.0), 255);
    assert_eq!(Quantize::Truncate.apply(-0.5), 0);
    assert_eq!(Quantize::RoundNearest.apply(254.6), 255);
}

#[test]
fn mismatched_dimensions_are_rejected() {
    let a = pattern(4, 3, 0);
    let b = pattern(3, 4, 0);
    let err = composite(&a, &b).unwrap_err();
    assert!(matches!(
        err,
        TabletopError::Dimension {
            expected: (4, 3),
            actual: (3, 4)
        }
    ));
}

#[test]
fn channel_order_is_normalized_before_blending() {
    // shader pass stored BGR, textured pass stored RGB
    let a = FrameRgb8::new(1, 1, vec![50, 100, 200], ChannelOrder::Bgr).unwrap();
    let b = FrameRgb8::new(1, 1, vec![10, 120, 250], ChannelOrder::Rgb).unwrap();
    let out = composite(&a, &b).unwrap();
    assert_eq!(out.order, ChannelOrder::Rgb);
    assert_eq!(out.data, vec![24, 62, 114]);
}

#[test]
fn buffer_helper_rejects_ragged_inputs() {
    let mut odd = vec![0u8; 4];
    let err =
        composite_rgb8_into(&mut odd, &[0; 4], &[0; 4], &CompositeOpts::default()).unwrap_err();
    assert!(matches!(err, TabletopError::Config(_)));
}

#[test]
fn buffer_helper_reports_length_mismatch_as_dimension_error() {
    let mut dst = vec![0u8; 6];
    let err =
        composite_rgb8_into(&mut dst, &[0; 6], &[0; 3], &CompositeOpts::default()).unwrap_err();
    assert!(matches!(
        err,
        TabletopError::Dimension {
            expected: (2, 1),
            actual: (1, 1)
        }
    ));

    let err =
        composite_rgb8_into(&mut dst, &[0; 9], &[0; 6], &CompositeOpts::default()).unwrap_err();
    assert!(matches!(
        err,
        TabletopError::Dimension {
            expected: (2, 1),
            actual: (3, 1)
        }
    ));
}

#[test]
fn gray_map_matches_the_mask_used_by_blending() {
    let a = pattern(3, 2, 11);
    let b = pattern(3, 2, 200);
    let gray = grayscale(&a, LumaWeights::BT601);
    let out = composite(&a, &b).unwrap();
    let opts = CompositeOpts::default();
    for y in 0..2 {
        for x in 0..3 {
            let expected = blend_px(a.rgb_at(x, y), b.rgb_at(x, y), gray.at(x, y), &opts);
            assert_eq!(out.rgb_at(x, y), expected);
        }
    }
}
