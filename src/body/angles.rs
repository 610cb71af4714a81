use crate::geometry::joint_angle;

use super::joint::{JointId, Skeleton};

/// 記録する関節角度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleJoint {
    LeftElbow,
    RightElbow,
    LeftKnee,
    RightKnee,
}

impl AngleJoint {
    pub const COUNT: usize = 4;

    /// CSV の列順
    pub const ALL: [AngleJoint; Self::COUNT] = [
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftKnee,
        Self::RightKnee,
    ];

    /// (端点, 頂点, 端点)
    pub fn triple(self) -> [JointId; 3] {
        match self {
            Self::LeftElbow => [JointId::WristLeft, JointId::ElbowLeft, JointId::ShoulderLeft],
            Self::RightElbow => [JointId::WristRight, JointId::ElbowRight, JointId::ShoulderRight],
            Self::LeftKnee => [JointId::HipLeft, JointId::KneeLeft, JointId::AnkleLeft],
            Self::RightKnee => [JointId::HipRight, JointId::KneeRight, JointId::AnkleRight],
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::LeftElbow => "LeftElbowAngle",
            Self::RightElbow => "RightElbowAngle",
            Self::LeftKnee => "LeftKneeAngle",
            Self::RightKnee => "RightKneeAngle",
        }
    }

    /// 表示用ラベル
    pub fn label(self) -> &'static str {
        match self {
            Self::LeftElbow => "Left elbow angle",
            Self::RightElbow => "Right elbow angle",
            Self::LeftKnee => "Left knee angle",
            Self::RightKnee => "Right knee angle",
        }
    }
}

/// 1体分の関節角度（度）。関節が重なって角度が定まらない場合は `None`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    values: [Option<f32>; AngleJoint::COUNT],
}

impl JointAngles {
    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        let values = AngleJoint::ALL.map(|angle| {
            let [a, vertex, b] = angle.triple();
            joint_angle(
                &skeleton.get(a).position,
                &skeleton.get(vertex).position,
                &skeleton.get(b).position,
            )
        });
        Self { values }
    }

    pub fn get(&self, angle: AngleJoint) -> Option<f32> {
        self.values[angle as usize]
    }

    /// CSV 列順に並んだ角度
    pub fn values(&self) -> &[Option<f32>; AngleJoint::COUNT] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::joint::{ConfidenceLevel, Joint};
    use nalgebra::Point3;

    fn set(skeleton: &mut Skeleton, id: JointId, p: (f32, f32, f32)) {
        skeleton.set(id, Joint::new(Point3::new(p.0, p.1, p.2), ConfidenceLevel::High));
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_left_elbow_right_angle() {
        let mut skeleton = Skeleton::default();
        set(&mut skeleton, JointId::WristLeft, (0.0, 0.0, 0.0));
        set(&mut skeleton, JointId::ElbowLeft, (0.0, 1.0, 0.0));
        set(&mut skeleton, JointId::ShoulderLeft, (1.0, 1.0, 0.0));

        let angles = JointAngles::from_skeleton(&skeleton);
        assert!(approx_eq(angles.get(AngleJoint::LeftElbow).unwrap(), 90.0));
    }

    #[test]
    fn test_knee_bend_and_straight_leg() {
        let mut skeleton = Skeleton::default();
        // 左: 90度に曲げた膝
        set(&mut skeleton, JointId::HipLeft, (0.0, 500.0, 2000.0));
        set(&mut skeleton, JointId::KneeLeft, (0.0, 0.0, 2000.0));
        set(&mut skeleton, JointId::AnkleLeft, (0.0, 0.0, 1600.0));
        // 右: 伸ばした脚
        set(&mut skeleton, JointId::HipRight, (200.0, 900.0, 2000.0));
        set(&mut skeleton, JointId::KneeRight, (200.0, 450.0, 2000.0));
        set(&mut skeleton, JointId::AnkleRight, (200.0, 0.0, 2000.0));

        let angles = JointAngles::from_skeleton(&skeleton);
        assert!(approx_eq(angles.get(AngleJoint::LeftKnee).unwrap(), 90.0));
        assert!(approx_eq(angles.get(AngleJoint::RightKnee).unwrap(), 180.0));
    }

    #[test]
    fn test_default_skeleton_is_degenerate() {
        // 全関節が原点 → 長さ0のベクトル
        let angles = JointAngles::from_skeleton(&Skeleton::default());
        assert!(angles.values().iter().all(Option::is_none));
    }

    #[test]
    fn test_column_order() {
        let columns: Vec<&str> = AngleJoint::ALL.iter().map(|a| a.column()).collect();
        assert_eq!(
            columns,
            ["LeftElbowAngle", "RightElbowAngle", "LeftKneeAngle", "RightKneeAngle"]
        );
    }
}
