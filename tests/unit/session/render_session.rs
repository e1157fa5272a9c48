use super::*;
use crate::encode::sink::InMemorySink;

fn small_spec(prompt: &str) -> AnimationSpec {
    AnimationSpec {
        prompt: prompt.to_owned(),
        duration_secs: 1.0,
        fps: 12,
        width: 48,
        height: 48,
    }
}

#[test]
fn new_rejects_invalid_specs_and_zero_threads() {
    let bad = AnimationSpec {
        fps: 0,
        ..small_spec("x")
    };
    assert!(RenderSession::new(bad, RenderSessionOpts::default()).is_err());

    let opts = RenderSessionOpts {
        parallel: true,
        threads: Some(0),
        ..RenderSessionOpts::default()
    };
    assert!(matches!(
        RenderSession::new(small_spec("x"), opts),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn blueprint_is_keyed_by_normalized_prompt() {
    let mut session = RenderSession::new(
        small_spec("  Dreamlike NEON cityscape "),
        RenderSessionOpts::default(),
    )
    .unwrap();
    assert_eq!(session.prompt_key(), "dreamlike neon cityscape");
    assert_eq!(session.blueprint(), &build_blueprint("dreamlike neon cityscape"));

    assert!(!session.set_prompt("DREAMLIKE neon cityscape"));
    assert_eq!(session.spec().prompt, "DREAMLIKE neon cityscape");
    assert!(session.set_prompt("tidal glass"));
    assert_eq!(session.blueprint(), &build_blueprint("tidal glass"));

    assert!(session.set_prompt("   "));
    assert_eq!(session.blueprint(), &build_blueprint("aurora drift"));
}

#[test]
fn render_frame_matches_render_at_clock_time() {
    let mut session = RenderSession::new(small_spec("ember"), RenderSessionOpts::default()).unwrap();
    let t = session.clock().time_at(FrameIndex(7));
    let by_index = session.render_frame(FrameIndex(7)).unwrap();
    let by_time = session.render_at(t);
    assert_eq!(by_index, by_time);
    assert_eq!((by_index.width, by_index.height), (48, 48));

    assert!(session.render_frame(FrameIndex(12)).is_err());
}

#[test]
fn parallel_range_matches_sequential_range() {
    let mut seq = RenderSession::new(
        small_spec("ember"),
        RenderSessionOpts {
            chunk_size: 5,
            ..RenderSessionOpts::default()
        },
    )
    .unwrap();
    let mut par = RenderSession::new(
        small_spec("ember"),
        RenderSessionOpts {
            parallel: true,
            chunk_size: 5,
            threads: Some(2),
        },
    )
    .unwrap();

    let range = seq.clock().range();
    let mut seq_sink = InMemorySink::new();
    let mut par_sink = InMemorySink::new();
    let seq_stats = seq.render_range(range, &mut seq_sink).unwrap();
    let par_stats = par.render_range(range, &mut par_sink).unwrap();

    assert_eq!(seq_stats, RenderStats { frames_total: 12, frames_rendered: 12 });
    assert_eq!(seq_stats, par_stats);
    assert!(seq_sink.is_finished() && par_sink.is_finished());
    assert_eq!(seq_sink.frames(), par_sink.frames());
    let idx: Vec<u64> = par_sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (0..12).collect::<Vec<_>>());
}

#[test]
fn range_beyond_clip_is_rejected_before_sink_begins() {
    let mut session = RenderSession::new(small_spec("ember"), RenderSessionOpts::default()).unwrap();
    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(10), FrameIndex(13)).unwrap();
    assert!(session.render_range(range, &mut sink).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn set_size_keeps_blueprint_and_resizes_frames() {
    let mut session = RenderSession::new(small_spec("ember"), RenderSessionOpts::default()).unwrap();
    let before = session.blueprint().clone();
    session.set_size(32, 20).unwrap();
    assert_eq!(session.blueprint(), &before);

    let frame = session.render_at(0.5);
    assert_eq!((frame.width, frame.height), (32, 20));
    assert_eq!(frame.data.len(), 32 * 20 * 4);

    assert!(session.set_size(0, 20).is_err());
    assert_eq!((session.spec().width, session.spec().height), (32, 20));
}
