use serde::{Deserialize, Serialize};

use super::joint::Skeleton;

/// トラッカーが付与した ID 付きの骨格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedBody {
    pub id: u32,
    pub skeleton: Skeleton,
}

impl TrackedBody {
    pub fn new(id: u32, skeleton: Skeleton) -> Self {
        Self { id, skeleton }
    }
}

/// 1キャプチャ分のトラッキング結果（0体以上）
///
/// 取得時刻はフレームに含めず、処理側が受け取った時点で決める。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub bodies: Vec<TrackedBody>,
}

impl Frame {
    pub fn new(bodies: Vec<TrackedBody>) -> Self {
        Self { bodies }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
