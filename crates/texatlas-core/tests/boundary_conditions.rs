use texatlas_core::prelude::*;

#[test]
fn test_zero_default_page_size() {
    let cfg = PackerConfig {
        default_page_size: 0,
        ..Default::default()
    };
    match cfg.validate() {
        Err(AtlasError::InvalidConfiguration(msg)) => assert!(msg.contains("default_page_size")),
        other => panic!("Expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn test_zero_max_page_size() {
    let cfg = PackerConfig {
        default_page_size: 0,
        max_page_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(AtlasError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_default_larger_than_max() {
    let cfg = PackerConfig::builder()
        .default_page_size(512)
        .max_page_size(256)
        .build();
    match cfg.validate() {
        Err(AtlasError::InvalidConfiguration(msg)) => assert!(msg.contains("exceeds")),
        other => panic!("Expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn test_large_default_padding_only_hits_requests_using_it() {
    let cfg = PackerConfig::builder()
        .default_page_size(64)
        .max_page_size(100)
        .default_padding(50)
        .build();
    assert_eq!(cfg.validate(), Ok(()));

    let own = pack(
        vec![RectRequest::new("a".to_string(), 10, 10).with_padding(0)],
        &cfg,
    )
    .expect("request with its own padding packs");
    assert_eq!(own.placements.len(), 1);
    assert_eq!((own.placements[0].x, own.placements[0].y), (0, 0));

    let dflt = pack(vec![RectRequest::new("b".to_string(), 10, 10)], &cfg);
    assert_eq!(
        dflt,
        Err(AtlasError::OversizedRectangle {
            id: "b".into(),
            width: 110,
            height: 110,
            max: 100,
        })
    );
}

#[test]
fn test_invalid_config_fails_before_requests() {
    let cfg = PackerConfig {
        default_page_size: 0,
        ..Default::default()
    };
    // The zero-sized request would be an error too; config is checked first.
    let result = pack(vec![RectRequest::new("a".to_string(), 0, 0)], &cfg);
    assert!(matches!(result, Err(AtlasError::InvalidConfiguration(_))));
}

#[test]
fn test_rectangle_wider_than_max() {
    let cfg = PackerConfig::builder()
        .default_page_size(64)
        .max_page_size(100)
        .build();
    let result = pack(vec![RectRequest::new("big".to_string(), 101, 10)], &cfg);
    assert_eq!(
        result,
        Err(AtlasError::OversizedRectangle {
            id: "big".into(),
            width: 101,
            height: 10,
            max: 100,
        })
    );
}

#[test]
fn test_rectangle_taller_than_max() {
    let cfg = PackerConfig::builder()
        .default_page_size(64)
        .max_page_size(100)
        .build();
    let result = pack(vec![RectRequest::new(7u32, 10, 150)], &cfg);
    match result {
        Err(AtlasError::OversizedRectangle { id, height, .. }) => {
            assert_eq!(id, "7");
            assert_eq!(height, 150);
        }
        other => panic!("Expected OversizedRectangle, got {other:?}"),
    }
}

#[test]
fn test_padding_pushes_rectangle_over_max() {
    let cfg = PackerConfig::builder()
        .default_page_size(64)
        .max_page_size(100)
        .default_padding(1)
        .build();
    let result = pack(vec![RectRequest::new("p".to_string(), 99, 10)], &cfg);
    assert_eq!(
        result,
        Err(AtlasError::OversizedRectangle {
            id: "p".into(),
            width: 101,
            height: 12,
            max: 100,
        })
    );
}

#[test]
fn test_rectangle_exactly_max_fits_clamped_page() {
    let cfg = PackerConfig::builder()
        .default_page_size(64)
        .max_page_size(100)
        .build();
    let out = pack(vec![RectRequest::new("full".to_string(), 100, 100)], &cfg).expect("pack");
    assert_eq!(out.pages.len(), 1);
    assert_eq!((out.pages[0].width, out.pages[0].height), (100, 100));
    assert_eq!((out.placements[0].x, out.placements[0].y), (0, 0));
}

#[test]
fn test_oversized_request_means_no_partial_result() {
    let cfg = PackerConfig::builder()
        .default_page_size(64)
        .max_page_size(128)
        .build();
    let requests = vec![
        RectRequest::new("ok1".to_string(), 16, 16),
        RectRequest::new("ok2".to_string(), 32, 8),
        RectRequest::new("huge".to_string(), 200, 4),
    ];
    let err = pack(requests, &cfg).unwrap_err();
    assert!(matches!(err, AtlasError::OversizedRectangle { ref id, .. } if id == "huge"));
}

#[test]
fn test_zero_sized_request() {
    let result = pack(
        vec![RectRequest::new("flat".to_string(), 12, 0)],
        &PackerConfig::default(),
    );
    match result {
        Err(AtlasError::InvalidRequest { id, reason }) => {
            assert_eq!(id, "flat");
            assert!(reason.contains("12x0"));
        }
        other => panic!("Expected InvalidRequest, got {other:?}"),
    }
}

#[test]
fn test_duplicate_ids() {
    let requests = vec![
        RectRequest::new("a".to_string(), 4, 4),
        RectRequest::new("b".to_string(), 4, 4),
        RectRequest::new("a".to_string(), 8, 8),
    ];
    let result = pack(requests, &PackerConfig::default());
    assert_eq!(result, Err(AtlasError::DuplicateId { id: "a".into() }));
}

#[test]
fn test_padding_overflow_is_oversized() {
    let cfg = PackerConfig::builder().max_page_size(u32::MAX).build();
    let req = RectRequest::new("wide".to_string(), u32::MAX, 1).with_padding(1);
    let result = pack(vec![req], &cfg);
    assert!(matches!(
        result,
        Err(AtlasError::OversizedRectangle { width: u32::MAX, .. })
    ));
}

#[test]
fn test_error_messages() {
    let err = AtlasError::OversizedRectangle {
        id: "big".into(),
        width: 300,
        height: 20,
        max: 256,
    };
    assert_eq!(
        err.to_string(),
        "Rectangle big (300x20 padded) exceeds the maximum page size 256"
    );
    assert_eq!(
        AtlasError::DuplicateId { id: "x".into() }.to_string(),
        "Duplicate request id: x"
    );
}
