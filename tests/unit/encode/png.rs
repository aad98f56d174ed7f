use super::*;
use crate::foundation::core::ChannelOrder;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "tabletop_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn bgr_frame_is_written_as_rgb() {
    let tmp = temp_dir("png_bgr");
    let path = tmp.join("nested").join("out.png");

    let frame = FrameRgb8::new(1, 1, vec![30, 20, 10], ChannelOrder::Bgr).unwrap();
    write_png(&path, &frame).unwrap();

    let back = image::open(&path).unwrap().to_rgb8();
    assert_eq!(back.dimensions(), (1, 1));
    assert_eq!(back.get_pixel(0, 0).0, [10, 20, 30]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn bare_file_name_needs_no_parent() {
    ensure_parent_dir(Path::new("out.png")).unwrap();
}
