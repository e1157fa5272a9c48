use super::*;

#[test]
fn json_fills_missing_fields_with_defaults() {
    let spec = AnimationSpec::from_json_str(r#"{ "prompt": "tidal glass" }"#).unwrap();
    assert_eq!(spec.prompt, "tidal glass");
    assert_eq!(spec.duration_secs, 6.0);
    assert_eq!(spec.fps, 24);
    assert_eq!((spec.width, spec.height), (512, 512));

    assert_eq!(AnimationSpec::from_json_str("{}").unwrap(), AnimationSpec::default());
}

#[test]
fn json_rejects_unknown_fields_and_bad_types() {
    let err = AnimationSpec::from_json_str(r#"{ "promt": "x" }"#).unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
    let err = AnimationSpec::from_json_str(r#"{ "fps": "fast" }"#).unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
}

#[test]
fn from_path_reads_json_and_reports_missing_files() {
    let dir = std::env::temp_dir().join(format!("promptreel_spec_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("spec.json");
    std::fs::write(&path, r#"{ "prompt": "ember", "fps": 12, "width": 384, "height": 384 }"#)
        .unwrap();

    let spec = AnimationSpec::from_path(&path).unwrap();
    assert_eq!(spec.prompt, "ember");
    assert_eq!(spec.fps, 12);
    assert_eq!(spec.canvas(), Canvas { width: 384, height: 384 });

    let err = AnimationSpec::from_path(dir.join("missing.json")).unwrap_err();
    assert!(matches!(err, ReelError::Other(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn validate_rejects_unusable_parameters() {
    let ok = AnimationSpec::default();
    ok.validate().unwrap();

    for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let spec = AnimationSpec {
            duration_secs: duration,
            ..AnimationSpec::default()
        };
        assert!(matches!(spec.validate(), Err(ReelError::Validation(_))));
    }

    let spec = AnimationSpec {
        fps: 0,
        ..AnimationSpec::default()
    };
    assert!(matches!(spec.validate(), Err(ReelError::Validation(_))));

    let spec = AnimationSpec {
        width: 0,
        ..AnimationSpec::default()
    };
    assert!(matches!(spec.validate(), Err(ReelError::Surface(_))));

    let spec = AnimationSpec {
        height: 70_000,
        ..AnimationSpec::default()
    };
    assert!(matches!(spec.validate(), Err(ReelError::Surface(_))));
}

#[test]
fn advisories_flag_values_outside_recommended_ranges() {
    assert!(AnimationSpec::default().advisories().is_empty());

    let spec = AnimationSpec {
        prompt: "x".to_owned(),
        duration_secs: 20.0,
        fps: 60,
        width: 100,
        height: 50,
    };
    let advisories = spec.advisories();
    assert_eq!(advisories.len(), 4, "{advisories:?}");
    spec.validate().unwrap();
}

#[test]
fn clock_rounds_partial_frames_up() {
    let clock = AnimationSpec::default().clock().unwrap();
    assert_eq!(clock.frame_count(), 144);
    assert_eq!(clock.range().len_frames(), 144);

    let short = AnimationSpec {
        duration_secs: 0.01,
        ..AnimationSpec::default()
    };
    assert_eq!(short.clock().unwrap().frame_count(), 1);

    let odd = AnimationSpec {
        duration_secs: 2.5,
        fps: 12,
        ..AnimationSpec::default()
    };
    assert_eq!(odd.clock().unwrap().frame_count(), 30);
}

#[test]
fn clock_maps_indices_to_seconds() {
    let clock = FrameClock::new(Fps::new(24, 1).unwrap(), 1.0).unwrap();
    assert_eq!(clock.time_at(FrameIndex(0)), 0.0);
    assert!((clock.time_at(FrameIndex(12)) - 0.5).abs() < 1e-12);

    let times: Vec<_> = clock
        .frame_times(FrameRange::new(FrameIndex(22), FrameIndex(24)).unwrap())
        .collect();
    assert_eq!(times.len(), 2);
    assert_eq!(times[0].0, FrameIndex(22));
    assert!((times[1].1 - 23.0 / 24.0).abs() < 1e-12);

    assert!(FrameClock::new(Fps::new(24, 1).unwrap(), 0.0).is_err());
}
