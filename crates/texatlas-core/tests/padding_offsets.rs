use texatlas_core::prelude::*;

#[test]
fn default_padding_offsets_content() {
    let cfg = PackerConfig::builder()
        .default_page_size(32)
        .default_padding(2)
        .build();
    let requests = vec![
        RectRequest::new("a".to_string(), 10, 10),
        RectRequest::new("b".to_string(), 10, 10),
    ];
    let out = pack(requests, &cfg).expect("pack");
    let a = &out.placements[0];
    let b = &out.placements[1];
    assert_eq!((a.x, a.y, a.padding), (2, 2, 2));
    assert_eq!(a.padded_rect(), Rect::new(0, 0, 14, 14));
    // Second slot goes into the 18x14 strip to the right of the first one.
    assert_eq!((b.x, b.y), (16, 2));
    assert_eq!(b.padded_rect(), Rect::new(14, 0, 14, 14));
    assert!(!a.padded_rect().intersects(&b.padded_rect()));
}

#[test]
fn request_padding_overrides_default() {
    let cfg = PackerConfig::builder()
        .default_page_size(64)
        .default_padding(3)
        .build();
    let requests = vec![
        RectRequest::new("own".to_string(), 8, 8).with_padding(0),
        RectRequest::new("dflt".to_string(), 8, 8),
    ];
    let out = pack(requests, &cfg).expect("pack");
    let own = &out.placements[0];
    let dflt = &out.placements[1];
    assert_eq!(own.padding, 0);
    assert_eq!(dflt.padding, 3);
    // "dflt" is taller once padded, so it is placed first.
    assert_eq!((dflt.x, dflt.y), (3, 3));
    assert_eq!(own.padded_rect(), own.rect());
    assert!(!own.rect().intersects(&dflt.padded_rect()));
}

#[test]
fn padded_size_helpers() {
    let req = RectRequest::new("x".to_string(), 5, 7);
    assert_eq!(req.effective_padding(1), 1);
    assert_eq!(req.padded_size(1), Some((7, 9)));
    let req = req.with_padding(4);
    assert_eq!(req.effective_padding(1), 4);
    assert_eq!(req.padded_size(1), Some((13, 15)));
    assert_eq!(
        RectRequest::new("y".to_string(), u32::MAX, 1).padded_size(1),
        None
    );
}

#[test]
fn uv_box_covers_content_only() {
    let cfg = PackerConfig::builder()
        .default_page_size(64)
        .default_padding(1)
        .build();
    let out = pack(vec![RectRequest::new("g".to_string(), 16, 32)], &cfg).expect("pack");
    let p = &out.placements[0];
    let uv = p.uv_box(&out.pages[0]);
    assert_eq!(uv, [1.0 / 64.0, 1.0 / 64.0, 17.0 / 64.0, 33.0 / 64.0]);
}

#[test]
fn hand_built_extremes_saturate() {
    let r = Rect::new(u32::MAX - 2, 5, 10, u32::MAX);
    assert_eq!(r.right_ex(), u32::MAX);
    assert_eq!(r.bottom_ex(), u32::MAX);
    assert!(r.contains(&Rect::new(u32::MAX - 1, 6, 1, 1)));

    let p = Placement {
        id: "edge".to_string(),
        page: 0,
        x: 1,
        y: 0,
        width: u32::MAX - 1,
        height: 4,
        padding: 3,
    };
    assert_eq!(p.padded_rect(), Rect::new(0, 0, u32::MAX, 10));
    let page = PageGeometry {
        index: 0,
        width: 8,
        height: 8,
    };
    assert_eq!(p.uv_box(&page)[2], u32::MAX as f32 / 8.0);
}
