use super::*;

#[test]
fn demultiply_restores_straight_color() {
    let mut px = vec![64, 32, 0, 128, 10, 10, 10, 0, 200, 100, 50, 255];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[10, 10, 10, 0]);
    assert_eq!(&px[8..], &[200, 100, 50, 255]);
}

#[test]
fn simple_svg_rasterizes_to_requested_size() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4" viewBox="0 0 8 4">
        <rect x="0" y="0" width="4" height="4" fill="#ff0000"/></svg>"##;
    let frame = rasterize(svg).unwrap();
    assert_eq!((frame.width, frame.height), (8, 4));
    assert_eq!(&frame.data[..4], &[255, 0, 0, 255]);
    let last = frame.data.len() - 4;
    assert_eq!(&frame.data[last..], &[255, 255, 255, 255]);
}
