use std::io::Cursor;
use std::time::{Duration, Instant};

use joint_angle_collector::body::{AngleJoint, ConfidenceLevel, Frame, Joint, JointId, Skeleton, TrackedBody};
use joint_angle_collector::config::{Config, RecordSchema};
use joint_angle_collector::recorder::Session;
use joint_angle_collector::source::{Capture, FrameSource, JsonLinesSource};
use nalgebra::Point3;

fn squat_skeleton() -> Skeleton {
    let mut skeleton = Skeleton::default();
    let joints = [
        (JointId::ShoulderLeft, (-200.0, -400.0, 2000.0)),
        (JointId::ElbowLeft, (-200.0, -100.0, 2000.0)),
        (JointId::WristLeft, (-200.0, -100.0, 1700.0)),
        (JointId::ShoulderRight, (200.0, -400.0, 2000.0)),
        (JointId::ElbowRight, (200.0, -100.0, 2000.0)),
        (JointId::WristRight, (200.0, 200.0, 2000.0)),
        (JointId::HipLeft, (-100.0, 100.0, 2000.0)),
        (JointId::KneeLeft, (-100.0, 500.0, 2000.0)),
        (JointId::AnkleLeft, (-100.0, 500.0, 1600.0)),
        (JointId::HipRight, (100.0, 100.0, 2000.0)),
        (JointId::KneeRight, (100.0, 500.0, 2000.0)),
        (JointId::AnkleRight, (100.0, 900.0, 2000.0)),
    ];
    for (id, (x, y, z)) in joints {
        skeleton.set(id, Joint::new(Point3::new(x, y, z), ConfidenceLevel::High));
    }
    skeleton
}

fn recording() -> String {
    let body = serde_json::to_string(&TrackedBody::new(7, squat_skeleton())).unwrap();
    [
        format!("{{\"bodies\":[{}]}}", body),
        "null".to_string(),
        "{\"bodies\":[]}".to_string(),
        format!("{{\"bodies\":[{},{}]}}", body, body.replace("\"id\":7", "\"id\":8")),
    ]
    .join("\n")
}

#[test]
fn test_replay_into_extended_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("session.csv");
    let config = Config::parse("[recorder]\nprecision = 2\n").unwrap();
    assert_eq!(config.recorder.schema, RecordSchema::Extended);

    let mut source = JsonLinesSource::new(Cursor::new(recording()));
    let start = Instant::now();
    let mut session = Session::start(&output, &config.recorder, start).unwrap();

    let mut tick = 0u64;
    let mut summaries = Vec::new();
    while let Some(capture) = source.next_capture().unwrap() {
        tick += 1;
        let now = start + Duration::from_millis(tick * 33);
        match capture {
            Capture::Frame(frame) => summaries.push(session.process_frame(&frame, now).unwrap()),
            Capture::Skipped => session.skip_capture().unwrap(),
        }
    }
    session.end().unwrap();

    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[2].processed_frames, 3);
    assert_eq!(summaries[2].body_count, 2);

    let angles = summaries[0].bodies[0].angles;
    let approx = |a: Option<f32>, b: f32| (a.unwrap() - b).abs() < 1e-3;
    assert!(approx(angles.get(AngleJoint::LeftElbow), 90.0));
    assert!(approx(angles.get(AngleJoint::RightElbow), 180.0));
    assert!(approx(angles.get(AngleJoint::LeftKnee), 90.0));
    assert!(approx(angles.get(AngleJoint::RightKnee), 180.0));

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    // ヘッダー + 1体 + 空キャプチャ + 体なし + 2体
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Time,ID,LeftElbowAngle,RightElbowAngle,LeftKneeAngle,RightKneeAngle,Pelvis Pos,"));
    assert!(lines[1].starts_with("0.033,7,90.00,180.00,90.00,180.00,\"<0.00, 0.00, 0.00>, 0.00\","));
    assert_eq!(lines[2], ",".repeat(37));
    assert_eq!(lines[3], format!("0.099{}", ",".repeat(37)));
    assert!(lines[4].starts_with("0.132,7,"));
    assert!(lines[5].starts_with("0.132,8,"));
    assert!(lines[1].contains("\"<-0.10, 0.50, 2.00>, 2.06\""));
}

#[test]
fn test_many_frames_append_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("compact.csv");
    let config = Config::parse("[recorder]\nschema = \"compact\"\ntime_mode = \"delta\"\n").unwrap();

    let start = Instant::now();
    let mut session = Session::start(&output, &config.recorder, start).unwrap();
    for k in 0..20u32 {
        let frame = Frame::new(vec![TrackedBody::new(k, squat_skeleton())]);
        session
            .process_frame(&frame, start + Duration::from_millis(u64::from(k) * 50))
            .unwrap();
    }
    session.end().unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 21);
    assert!(lines[1].starts_with("0.000,0,"));
    for (k, line) in lines[2..].iter().enumerate() {
        assert!(line.starts_with(&format!("0.050,{},", k + 1)), "line {}: {}", k + 2, line);
    }
}
