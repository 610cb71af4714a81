use std::fmt;
use std::time::Duration;

use crate::body::{AngleJoint, JointAngles};

/// 1体分の表示用データ
#[derive(Debug, Clone, PartialEq)]
pub struct BodySummary {
    pub id: u32,
    pub angles: JointAngles,
}

/// `process_frame` の結果。表示側に渡すのはこれだけ
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub body_count: usize,
    pub processed_frames: u64,
    pub elapsed: Duration,
    pub bodies: Vec<BodySummary>,
}

impl fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bodies detected: {}", self.body_count)?;
        writeln!(f, "Frames processed: {}", self.processed_frames)?;
        write!(f, "Time: {:.3} s", self.elapsed.as_secs_f64())?;
        for body in &self.bodies {
            write!(f, "\nBody {}:", body.id)?;
            for angle in AngleJoint::ALL {
                match body.angles.get(angle) {
                    Some(deg) => write!(f, "\n  {}: {:.2}°", angle.label(), deg)?,
                    None => write!(f, "\n  {}: -", angle.label())?,
                }
            }
        }
        Ok(())
    }
}
