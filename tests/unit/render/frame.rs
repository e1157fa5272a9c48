use super::*;
use crate::scene::builder::build_blueprint;

fn background_only() -> SceneBlueprint {
    SceneBlueprint {
        seed: 0,
        layers: vec![],
        sparks: vec![],
        background: [
            Hsla::new(0.0, 1.0, 0.5, 1.0),
            Hsla::from_degrees(240.0, 1.0, 0.5, 1.0),
        ],
        pulse: 0.5,
        distort: 1.0,
    }
}

#[test]
fn outline_without_variance_is_a_circle() {
    let layer = LayerSpec {
        color: Hsla::new(0.2, 0.7, 0.55, 0.35),
        radius: 0.5,
        rotation: 0.0,
        speed: 0.5,
        variance: 0.0,
    };
    let center = Point::new(50.0, 50.0);
    let pts = layer_outline(&layer, 0, 3.0, 1.0, 1.0, center, 100.0);
    assert_eq!(pts.len(), LAYER_SEGMENTS);
    for p in &pts {
        assert!((p.distance(center) - 25.0).abs() < 1e-9);
    }
}

#[test]
fn outline_rotates_rigidly_with_layer_time() {
    let layer = LayerSpec {
        color: Hsla::new(0.2, 0.7, 0.55, 0.35),
        radius: 0.5,
        rotation: 0.0,
        speed: 1.0,
        variance: 0.0,
    };
    let center = Point::new(0.0, 0.0);
    let at0 = layer_outline(&layer, 0, 0.0, 1.0, 1.0, center, 100.0);
    let at4 = layer_outline(&layer, 0, 4.0, 1.0, 1.0, center, 100.0);
    // layer_time = 4 => spin = 1 rad.
    let a0 = at0[0].y.atan2(at0[0].x);
    let a4 = at4[0].y.atan2(at4[0].x);
    assert!((a4 - a0 - 1.0).abs() < 1e-9);
}

#[test]
fn distortion_scales_radius_per_vertex() {
    let layer = LayerSpec {
        color: Hsla::new(0.2, 0.7, 0.55, 0.35),
        radius: 0.5,
        rotation: 0.0,
        speed: 0.0,
        variance: 0.5,
    };
    let center = Point::new(0.0, 0.0);
    let pts = layer_outline(&layer, 1, 0.0, 1.0, 1.0, center, 100.0);
    let dists: Vec<f64> = pts.iter().map(|p| p.distance(center)).collect();
    let max = dists.iter().cloned().fold(f64::MIN, f64::max);
    let min = dists.iter().cloned().fold(f64::MAX, f64::min);
    // amplitude = 0.5 * 1.0 * 0.4 = 0.2 around a base radius of 25.
    assert!((max - 30.0).abs() < 0.05);
    assert!((min - 20.0).abs() < 0.05);
}

#[test]
fn background_only_scene_is_the_gradient() {
    let mut s = Surface::new(32, 32).unwrap();
    render_frame(&mut s, 0.0, &background_only());
    let tl = s.pixel(0, 0).unwrap();
    let br = s.pixel(31, 31).unwrap();
    assert!(tl.r > 240 && tl.b < 15);
    assert!(br.b > 240 && br.r < 15);
    assert!(s.data().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn render_overwrites_previous_content() {
    let bp = build_blueprint("overwrite check");
    let mut dirty = Surface::new(48, 48).unwrap();
    dirty.paint_image(0, 0, 1, 1, &[255, 255, 255, 255]);
    dirty.set_blend_mode(BlendMode::Lighter);
    render_frame(&mut dirty, 1.5, &bp);

    let mut clean = Surface::new(48, 48).unwrap();
    render_frame(&mut clean, 1.5, &bp);
    assert_eq!(dirty.data(), clean.data());
}

#[test]
fn render_leaves_source_over_blending() {
    let bp = build_blueprint("blend state");
    let mut s = Surface::new(16, 16).unwrap();
    render_frame(&mut s, 2.0, &bp);
    assert_eq!(s.blend_mode(), BlendMode::SourceOver);
}

#[test]
fn non_finite_time_renders_like_zero() {
    let bp = build_blueprint("nan time");
    let mut a = Surface::new(24, 24).unwrap();
    let mut b = Surface::new(24, 24).unwrap();
    render_frame(&mut a, f64::NAN, &bp);
    render_frame(&mut b, 0.0, &bp);
    assert_eq!(a.data(), b.data());
}

#[test]
fn sparks_brighten_additively() {
    let mut bp = background_only();
    bp.background = [Hsla::new(0.0, 0.0, 0.0, 1.0), Hsla::new(0.0, 0.0, 0.0, 1.0)];
    let spark = SparkSpec {
        angle: 0.0,
        distance: 0.1,
        size: 1.0,
        drift: 0.5,
        hue_shift: 0.0,
    };
    bp.sparks = vec![spark];
    let mut single = Surface::new(64, 64).unwrap();
    render_frame(&mut single, 0.0, &bp);

    // Same spark twice at (nearly) the same spot must be at least as bright.
    bp.sparks = vec![spark, spark];
    let mut double = Surface::new(64, 64).unwrap();
    render_frame(&mut double, 0.0, &bp);

    let sum = |s: &Surface| s.data().iter().map(|&b| u64::from(b)).sum::<u64>();
    assert!(sum(&double) > sum(&single));
}
