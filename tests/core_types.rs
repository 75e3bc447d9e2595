use cvclicker::{
    pointer_target, ClickerError, Frame, FrameView, Match, MatchResult, Point, Region, Template,
    TemplatePlan,
};

#[test]
fn frame_view_rejects_invalid_dimensions() {
    let data = [0u8; 12];

    let err = FrameView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        ClickerError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = FrameView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        ClickerError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn frame_view_rejects_invalid_stride() {
    let data = [0u8; 24];

    let err = FrameView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        ClickerError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn frame_view_rejects_small_buffer() {
    let data = [0u8; 11];

    // Last row needs no padding: (1 * 2 + 2) * 3 bytes.
    let err = FrameView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, ClickerError::BufferTooSmall { needed: 12, got: 11 });
}

#[test]
fn frame_view_roi_keeps_stride_and_pixels() {
    let data: Vec<u8> = (0u8..48).collect();
    let view = FrameView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);
    assert_eq!(view.get(1, 2), Some([27, 28, 29]));
    assert_eq!(view.get(4, 0), None);

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.get(0, 0), Some([15, 16, 17]));
    assert_eq!(roi.row(1), Some(&data[27..33]));

    let copy = roi.to_frame();
    assert_eq!(copy.data(), &[15, 16, 17, 18, 19, 20, 27, 28, 29, 30, 31, 32]);

    let err = view.roi(3, 3, 2, 1).err().unwrap();
    assert!(matches!(err, ClickerError::RoiOutOfBounds { .. }));
}

#[test]
fn frame_conversions_store_bgr() {
    let rgba = [10u8, 20, 30, 255, 40, 50, 60, 0];
    let frame = Frame::from_rgba(&rgba, 2, 1).unwrap();
    assert_eq!(frame.data(), &[30, 20, 10, 60, 50, 40]);

    let err = Frame::new(vec![0; 5], 1, 2).err().unwrap();
    assert_eq!(err, ClickerError::BufferTooSmall { needed: 6, got: 5 });
}

#[test]
fn region_validates_bounds() {
    let region = Region::new(0, 0, 1920, 1080).unwrap();
    assert_eq!(region, Region::default());
    assert_eq!((region.width(), region.height()), (1920, 1080));

    let err = Region::new(10, 0, 10, 5).err().unwrap();
    assert!(err.is_invalid_input());
    assert!(Region::new(0, 8, 4, 2).is_err());

    let shifted = Region::from_origin_size(Point::new(312, 186), 800, 600).unwrap();
    assert_eq!(shifted.origin(), Point::new(312, 186));
    assert_eq!((shifted.right(), shifted.bottom()), (1112, 786));
    assert!(Region::from_origin_size(Point::new(0, 0), 0, 10).is_err());
    assert!(Region::from_origin_size(Point::new(i32::MAX - 1, 0), 10, 10).is_err());
}

#[test]
fn match_center_truncates_half_sizes() {
    let m = Match {
        x: 10,
        y: 20,
        confidence: 0.9,
    };
    assert_eq!(m.top_left(), Point::new(10, 20));
    assert_eq!(m.center(30, 40), Point::new(25, 40));
    assert_eq!(m.center(31, 41), Point::new(25, 40));

    assert_eq!(MatchResult::Found(m).found(), Some(m));
    assert_eq!(MatchResult::NotFound.found(), None);
}

#[test]
fn pointer_target_applies_offset_and_origin() {
    let center = Point::new(25, 40);
    assert_eq!(
        pointer_target(center, Point::new(-65, 40), Point::new(0, 0)),
        Point::new(-40, 80)
    );
    assert_eq!(
        pointer_target(center, Point::new(-65, 40), Point::new(100, 200)),
        Point::new(60, 280)
    );
}

#[test]
fn template_plan_rejects_flat_templates() {
    let flat = Template::new(vec![7u8; 4 * 4 * 3], 4, 4).unwrap();
    let err = TemplatePlan::from_view(flat.view()).err().unwrap();
    assert!(matches!(err, ClickerError::DegenerateTemplate { .. }));
    assert!(err.is_invalid_input());

    let data: Vec<u8> = (0u8..48).collect();
    let tpl = Template::new(data, 4, 4).unwrap();
    let plan = TemplatePlan::from_view(tpl.view()).unwrap();
    assert_eq!(plan.sample_count(), 48);
    assert!((plan.mean() - 23.5).abs() < 1e-4);
    let sum: f32 = plan.t_prime().iter().sum();
    assert!(sum.abs() < 1e-3);
}
