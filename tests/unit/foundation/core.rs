use super::*;

#[test]
fn new_rejects_wrong_length() {
    assert!(FrameRgb8::new(2, 2, vec![0; 11], ChannelOrder::Rgb).is_err());
    assert!(FrameRgb8::new(2, 2, vec![0; 12], ChannelOrder::Rgb).is_ok());
}

#[test]
fn filled_respects_storage_order() {
    let canvas = Canvas {
        width: 2,
        height: 1,
    };
    let rgb = FrameRgb8::filled(canvas, [10, 20, 30], ChannelOrder::Rgb);
    let bgr = FrameRgb8::filled(canvas, [10, 20, 30], ChannelOrder::Bgr);
    assert_eq!(rgb.data, vec![10, 20, 30, 10, 20, 30]);
    assert_eq!(bgr.data, vec![30, 20, 10, 30, 20, 10]);
    assert_eq!(rgb.rgb_at(1, 0), bgr.rgb_at(1, 0));
}

#[test]
fn bgr_normalizes_to_rgb() {
    let frame = FrameRgb8::new(1, 1, vec![1, 2, 3], ChannelOrder::Bgr).unwrap();
    assert_eq!(frame.rgb_bytes().as_ref(), &[3, 2, 1]);

    let rgb = frame.into_rgb();
    assert_eq!(rgb.order, ChannelOrder::Rgb);
    assert_eq!(rgb.data, vec![3, 2, 1]);
}

#[test]
fn rgb_bytes_borrows_when_already_rgb() {
    let frame = FrameRgb8::new(1, 1, vec![1, 2, 3], ChannelOrder::Rgb).unwrap();
    assert!(matches!(frame.rgb_bytes(), Cow::Borrowed(_)));
}

#[test]
fn canvas_len_overflow_is_an_error() {
    let canvas = Canvas {
        width: u32::MAX,
        height: u32::MAX,
    };
    assert!(canvas.rgb8_len().is_err());
    assert_eq!(Canvas::square(4).rgb8_len().unwrap(), 48);
}
