use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// ボディトラッキングの 32 関節インデックス
///
/// 並び順はトラッカーの関節列挙と一致させる（CSV の列順もこの順）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum JointId {
    Pelvis = 0,
    SpineNavel = 1,
    SpineChest = 2,
    Neck = 3,
    ClavicleLeft = 4,
    ShoulderLeft = 5,
    ElbowLeft = 6,
    WristLeft = 7,
    HandLeft = 8,
    HandTipLeft = 9,
    ThumbLeft = 10,
    ClavicleRight = 11,
    ShoulderRight = 12,
    ElbowRight = 13,
    WristRight = 14,
    HandRight = 15,
    HandTipRight = 16,
    ThumbRight = 17,
    HipLeft = 18,
    KneeLeft = 19,
    AnkleLeft = 20,
    FootLeft = 21,
    HipRight = 22,
    KneeRight = 23,
    AnkleRight = 24,
    FootRight = 25,
    Head = 26,
    Nose = 27,
    EyeLeft = 28,
    EarLeft = 29,
    EyeRight = 30,
    EarRight = 31,
}

impl JointId {
    pub const COUNT: usize = 32;

    pub const ALL: [JointId; Self::COUNT] = [
        Self::Pelvis,
        Self::SpineNavel,
        Self::SpineChest,
        Self::Neck,
        Self::ClavicleLeft,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::HandTipLeft,
        Self::ThumbLeft,
        Self::ClavicleRight,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HandTipRight,
        Self::ThumbRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
        Self::Head,
        Self::Nose,
        Self::EyeLeft,
        Self::EarLeft,
        Self::EyeRight,
        Self::EarRight,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// CSV ヘッダーに使う名前
    pub fn name(self) -> &'static str {
        match self {
            Self::Pelvis => "Pelvis",
            Self::SpineNavel => "SpineNavel",
            Self::SpineChest => "SpineChest",
            Self::Neck => "Neck",
            Self::ClavicleLeft => "ClavicleLeft",
            Self::ShoulderLeft => "ShoulderLeft",
            Self::ElbowLeft => "ElbowLeft",
            Self::WristLeft => "WristLeft",
            Self::HandLeft => "HandLeft",
            Self::HandTipLeft => "HandTipLeft",
            Self::ThumbLeft => "ThumbLeft",
            Self::ClavicleRight => "ClavicleRight",
            Self::ShoulderRight => "ShoulderRight",
            Self::ElbowRight => "ElbowRight",
            Self::WristRight => "WristRight",
            Self::HandRight => "HandRight",
            Self::HandTipRight => "HandTipRight",
            Self::ThumbRight => "ThumbRight",
            Self::HipLeft => "HipLeft",
            Self::KneeLeft => "KneeLeft",
            Self::AnkleLeft => "AnkleLeft",
            Self::FootLeft => "FootLeft",
            Self::HipRight => "HipRight",
            Self::KneeRight => "KneeRight",
            Self::AnkleRight => "AnkleRight",
            Self::FootRight => "FootRight",
            Self::Head => "Head",
            Self::Nose => "Nose",
            Self::EyeLeft => "EyeLeft",
            Self::EarLeft => "EarLeft",
            Self::EyeRight => "EyeRight",
            Self::EarRight => "EarRight",
        }
    }
}

/// 関節位置の信頼度 (None < Low < Medium < High)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// 範囲外・検出なし
    #[default]
    None,
    /// 遮蔽されて推定された位置
    Low,
    Medium,
    High,
}

/// 単一関節
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    /// 位置（ミリメートル, センサー座標系）
    pub position: Point3<f32>,
    /// 姿勢 (クォータニオン: w, x, y, z)。角度計算には使わない
    #[serde(default = "identity_orientation")]
    pub orientation: [f32; 4],
    #[serde(default)]
    pub confidence: ConfidenceLevel,
}

fn identity_orientation() -> [f32; 4] {
    [1.0, 0.0, 0.0, 0.0]
}

impl Joint {
    pub fn new(position: Point3<f32>, confidence: ConfidenceLevel) -> Self {
        Self {
            position,
            orientation: identity_orientation(),
            confidence,
        }
    }

    /// 信頼度が指定レベル以上か
    pub fn is_at_least(&self, level: ConfidenceLevel) -> bool {
        self.confidence >= level
    }
}

impl Default for Joint {
    fn default() -> Self {
        Self::new(Point3::origin(), ConfidenceLevel::None)
    }
}

/// 32関節からなる骨格
///
/// デシリアライズ時、関節数が 32 でなければエラーになる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    pub joints: [Joint; JointId::COUNT],
}

impl Skeleton {
    pub fn new(joints: [Joint; JointId::COUNT]) -> Self {
        Self { joints }
    }

    pub fn get(&self, id: JointId) -> &Joint {
        &self.joints[id as usize]
    }

    pub fn set(&mut self, id: JointId, joint: Joint) {
        self.joints[id as usize] = joint;
    }

    /// 指定レベル以上の信頼度を持つ関節数
    pub fn count_at_least(&self, level: ConfidenceLevel) -> usize {
        self.joints.iter().filter(|j| j.is_at_least(level)).count()
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            joints: [Joint::default(); JointId::COUNT],
        }
    }
}
