use super::*;

fn labeled(label: &str, value: f32) -> LabeledMask {
    LabeledMask {
        label: label.to_string(),
        mask: SegmentationMask::filled(1, 1, value),
    }
}

#[test]
fn mask_length_must_match_dimensions() {
    assert!(SegmentationMask::new(2, 2, vec![0.0; 3]).is_err());
    assert!(SegmentationMask::new(2, 2, vec![0.0; 4]).is_ok());
}

#[test]
fn person_segment_is_preferred() {
    let segments = vec![labeled("wall", 0.1), labeled("person", 0.9)];
    assert_eq!(select_mask(&segments).unwrap().values(), &[0.9]);

    let segments = vec![labeled("wall", 0.1), labeled("sky", 0.9)];
    assert_eq!(select_mask(&segments).unwrap().values(), &[0.1]);

    assert!(matches!(
        select_mask(&[]),
        Err(DrapeError::Segmentation(_))
    ));
}

#[test]
fn threshold_is_strict_and_colors_are_kept() {
    let img = image::RgbaImage::from_pixel(3, 1, image::Rgba([10, 20, 30, 128]));
    let mask = SegmentationMask::new(3, 1, vec![0.15, 0.1500001, 0.9]).unwrap();
    let out = apply_mask(&img, &mask, 0.15).unwrap();

    assert_eq!(out.get_pixel(0, 0).0, [10, 20, 30, 0]);
    assert_eq!(out.get_pixel(1, 0).0, [10, 20, 30, 255]);
    assert_eq!(out.get_pixel(2, 0).0, [10, 20, 30, 255]);
    // Input is untouched.
    assert_eq!(img.get_pixel(2, 0).0[3], 128);
}

#[test]
fn mismatched_mask_is_a_segmentation_error() {
    let img = image::RgbaImage::new(4, 4);
    let mask = SegmentationMask::filled(2, 2, 1.0);
    assert!(matches!(
        apply_mask(&img, &mask, 0.15),
        Err(DrapeError::Segmentation(_))
    ));
}

#[test]
fn long_side_is_limited_with_aspect_kept() {
    assert_eq!(fit_dimensions(800, 600, 1024), (800, 600));
    assert_eq!(fit_dimensions(2048, 1000, 1024), (1024, 500));
    assert_eq!(fit_dimensions(1000, 3000, 1024), (341, 1024));
    assert_eq!(fit_dimensions(2048, 2048, 1024), (1024, 1024));

    let big = image::RgbaImage::new(40, 10);
    assert_eq!(fit_within(big, 20).dimensions(), (20, 5));
}
