//! End-to-end capture sessions through the public API.

use reenact::config::CAPTURE_WINDOW_SAMPLES;
use reenact::{
    FeedbackCommand, GestureKind, GestureSession, GestureTemplate, MatchOutcome, MatchTier,
    MotionSample, RawMessage, SessionEvent, Vec3,
};

fn as_text(sample: &MotionSample) -> RawMessage {
    let (a, g) = (sample.acceleration, sample.angular_rate);
    RawMessage::Text(format!(
        "ax:{},ay:{},az:{},gx:{},gy:{},gz:{}",
        a.x, a.y, a.z, g.x, g.y, g.z
    ))
}

fn run(session: &mut GestureSession, samples: &[MotionSample]) -> Vec<MatchOutcome> {
    samples
        .iter()
        .filter_map(|s| session.ingest(&as_text(s)))
        .collect()
}

fn cup() -> Vec<MotionSample> {
    GestureTemplate::for_kind(GestureKind::Cup).to_vec()
}

#[test]
fn cup_replay_is_a_perfect_match() {
    let mut session = GestureSession::new();
    assert!(session.on_stage_change("stage4-1-1"));

    let outcomes = run(&mut session, &cup());
    assert_eq!(outcomes.len(), 1);

    let outcome = &outcomes[0];
    assert_eq!(outcome.gesture, GestureKind::Cup);
    assert_eq!(outcome.sample_count, CAPTURE_WINDOW_SAMPLES);
    assert_eq!(outcome.result.percentage, 100.0);
    assert_eq!(outcome.result.tier, MatchTier::PerfectMatch);
    assert_eq!(
        outcome.feedback.iter().map(|s| s.command).collect::<Vec<_>>(),
        vec![FeedbackCommand::Led(3), FeedbackCommand::Motor(2)]
    );
}

#[test]
fn reversed_cup_scores_below_partial_differences() {
    let template = cup();
    let reversed: Vec<MotionSample> = template
        .iter()
        .map(|s| {
            let a = s.acceleration;
            MotionSample::new(Vec3::new(-a.x, -a.y, -a.z), s.angular_rate)
        })
        .collect();
    let shifted: Vec<MotionSample> = template
        .iter()
        .map(|s| {
            let a = s.acceleration;
            MotionSample::new(Vec3::new(a.x + 2.0, a.y - 2.0, a.z), s.angular_rate)
        })
        .collect();

    let mut session = GestureSession::new();
    session.arm(GestureKind::Cup);
    let reversed_score = run(&mut session, &reversed)[0].result;
    session.arm(GestureKind::Cup);
    let shifted_score = run(&mut session, &shifted)[0].result;
    session.arm(GestureKind::Cup);
    let half = run(&mut session, &template[..10].iter().chain(&reversed[10..]).copied().collect::<Vec<_>>())[0].result;

    assert!(reversed_score.percentage < shifted_score.percentage);
    assert!(reversed_score.percentage < half.percentage);
    assert!(half.percentage < 100.0);
    assert!(matches!(
        reversed_score.tier,
        MatchTier::SomeDifference | MatchTier::LargeDifference
    ));
}

#[test]
fn rearming_mid_session_scores_only_the_new_gesture() {
    let mut session = GestureSession::new();
    let knife = GestureTemplate::for_kind(GestureKind::Knife).to_vec();

    session.on_stage_change("stage4-1-1");
    assert!(session.ingest(&as_text(&cup()[0])).is_none());
    session.on_stage_change("stage4-2-1");

    let outcomes = run(&mut session, &knife);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].gesture, GestureKind::Knife);
    assert_eq!(outcomes[0].sample_count, CAPTURE_WINDOW_SAMPLES);
    assert_eq!(outcomes[0].result.tier, MatchTier::PerfectMatch);
}

#[test]
fn early_stop_scores_the_partial_window() {
    let mut session = GestureSession::new();
    session.handle(&SessionEvent::Arm(GestureKind::Phone));

    let phone = GestureTemplate::for_kind(GestureKind::Phone).to_vec();
    assert!(run(&mut session, &phone[..7]).is_empty());

    let outcome = session.handle(&SessionEvent::Stop).expect("stop completes the capture");
    assert!(outcome.stopped_early);
    assert_eq!(outcome.sample_count, 7);
    assert_eq!(outcome.result.percentage, 100.0);
}

#[test]
fn garbage_telemetry_never_breaks_a_session() {
    let mut session = GestureSession::new();
    session.arm(GestureKind::Monitor);

    let junk = [
        RawMessage::from(""),
        RawMessage::from("ax:"),
        RawMessage::from("NaN,NaN"),
        RawMessage::from_line("{\"type\": \"status\", \"payload\": 1}"),
        RawMessage::from_line("null"),
        RawMessage::from_line("[1,2,3]"),
        RawMessage::from_line("{\"type\": \"mpu\"}"),
    ];
    for message in &junk {
        assert!(session.ingest(message).is_none());
    }
    assert!(session.collector().buffered().len() <= 1);

    let monitor = GestureTemplate::for_kind(GestureKind::Monitor).to_vec();
    let remaining = CAPTURE_WINDOW_SAMPLES - session.collector().buffered().len();
    let outcomes = run(&mut session, &monitor[..remaining]);
    assert_eq!(outcomes.len(), 1);
    assert!((0.0..=100.0).contains(&outcomes[0].result.percentage));
}
