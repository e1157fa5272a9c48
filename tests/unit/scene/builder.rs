use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn normalize_trims_lowercases_and_falls_back() {
    assert_eq!(normalize_prompt("  Neon CITY \n"), "neon city");
    assert_eq!(normalize_prompt(""), DEFAULT_PROMPT);
    assert_eq!(normalize_prompt(" \t\r\n "), DEFAULT_PROMPT);
}

#[test]
fn reference_prompt_produces_known_structure() {
    let bp = build_blueprint("dreamlike neon cityscape");
    assert_eq!(bp.seed(), 127_731_767);
    assert_eq!(bp.layers().len(), 9);
    assert_eq!(bp.sparks().len(), 234);

    let l0 = bp.layers()[0];
    assert!(approx(l0.radius, 0.461_256_885_481_998_34));
    assert!(approx(l0.rotation, 3.100_520_975_429_539_7));
    assert!(approx(l0.speed, 0.321_166_806_994_006_07));
    assert!(approx(l0.variance, 0.727_915_248_973_295_2));

    let s0 = bp.sparks()[0];
    assert!(approx(s0.angle, 1.778_284_606_360_293));
    assert!(approx(s0.distance, 0.764_032_157_743_349_6));
    assert!(approx(s0.size, 1.532_953_165_937_215));
    assert!(approx(s0.drift, 0.755_500_691_477_209_3));
    assert!(approx(s0.hue_shift, -16.197_785_036_638_38));

    assert!(approx(bp.pulse(), 0.537_298_113_200_813_6));
    assert!(approx(bp.distort(), 1.031_681_239_884_347));
}

#[test]
fn default_prompt_blueprint_matches_reference() {
    let bp = build_blueprint("");
    assert_eq!(bp.seed(), 1_828_063_511);
    assert_eq!(bp.layers().len(), 8);
    assert_eq!(bp.sparks().len(), 214);
}

#[test]
fn background_hues_follow_seed() {
    let bp = build_blueprint("dreamlike neon cityscape");
    let seed = bp.seed();
    let [start, end] = bp.background();
    assert!(approx(start.h, f64::from(seed % 360) / 360.0));
    assert!(approx(start.s, 0.68));
    assert!(approx(start.l, 0.12));
    assert!(approx(end.s, 0.80));
    assert!(approx(end.l, 0.22));

    let accent = f64::from((seed >> 8) % 360) / 360.0;
    let expected = (start.h + accent / 3.0).rem_euclid(1.0);
    assert!(approx(end.h, expected));
}

#[test]
fn layer_colors_share_saturation_and_lightness() {
    let bp = build_blueprint("tidal glass");
    for layer in bp.layers() {
        assert!(layer.color.a < 1.0);
        assert!(approx(layer.color.s, LAYER_SATURATION));
        assert!(approx(layer.color.l, LAYER_LIGHTNESS));
    }
}

#[test]
fn control_characters_still_build() {
    let bp = build_blueprint("\u{0}\u{7}bell\u{1b}[31m");
    bp.check_invariants().unwrap();
}
