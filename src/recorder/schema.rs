use std::time::Duration;

use crate::body::{AngleJoint, JointAngles, JointId, Skeleton};
use crate::config::{DegeneratePolicy, RecordSchema, RecorderConfig};
use crate::geometry::{distance_from_origin, mm_to_m};

/// CSV 行の組み立て
///
/// - Time: 秒, 小数点以下3桁（ミリ秒）
/// - 角度・位置: `precision` 桁
/// - 位置列: `<x, y, z>, distance`（メートル）。カンマを含むので書き込み時に引用符で囲まれる
/// - 行末に区切り文字は付けない
#[derive(Debug, Clone)]
pub struct RowFormat {
    schema: RecordSchema,
    precision: usize,
    degenerate: DegeneratePolicy,
}

impl RowFormat {
    pub fn new(schema: RecordSchema, precision: usize, degenerate: DegeneratePolicy) -> Self {
        Self {
            schema,
            precision,
            degenerate,
        }
    }

    pub fn from_config(config: &RecorderConfig) -> Self {
        Self::new(config.schema, config.precision, config.degenerate)
    }

    pub fn column_count(&self) -> usize {
        let base = 2 + AngleJoint::COUNT;
        match self.schema {
            RecordSchema::Compact => base,
            RecordSchema::Extended => base + JointId::COUNT,
        }
    }

    pub fn header(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(self.column_count());
        row.push("Time".to_string());
        row.push("ID".to_string());
        row.extend(AngleJoint::ALL.iter().map(|a| a.column().to_string()));
        if self.schema == RecordSchema::Extended {
            row.extend(JointId::ALL.iter().map(|j| format!("{} Pos", j.name())));
        }
        row
    }

    /// 1体分の行
    pub fn body_row(&self, elapsed: Duration, id: u32, angles: &JointAngles, skeleton: &Skeleton) -> Vec<String> {
        let mut row = Vec::with_capacity(self.column_count());
        row.push(format_seconds(elapsed));
        row.push(id.to_string());
        row.extend(angles.values().iter().map(|a| self.format_angle(*a)));
        if self.schema == RecordSchema::Extended {
            row.extend(skeleton.joints.iter().map(|j| self.format_position(&j.position)));
        }
        row
    }

    /// 体が検出されなかったフレーム: Time のみ
    pub fn empty_frame_row(&self, elapsed: Duration) -> Vec<String> {
        let mut row = vec![String::new(); self.column_count()];
        row[0] = format_seconds(elapsed);
        row
    }

    /// 深度画像のないキャプチャ: 全列空
    pub fn skipped_row(&self) -> Vec<String> {
        vec![String::new(); self.column_count()]
    }

    fn format_angle(&self, angle: Option<f32>) -> String {
        match (angle, self.degenerate) {
            (Some(a), _) => format!("{:.*}", self.precision, a),
            (None, DegeneratePolicy::Empty) => String::new(),
            (None, DegeneratePolicy::Nan) => "NaN".to_string(),
        }
    }

    fn format_position(&self, position_mm: &nalgebra::Point3<f32>) -> String {
        let p = mm_to_m(position_mm);
        let d = distance_from_origin(&p);
        let prec = self.precision;
        format!("<{:.*}, {:.*}, {:.*}>, {:.*}", prec, p.x, prec, p.y, prec, p.z, prec, d)
    }
}

pub fn format_seconds(elapsed: Duration) -> String {
    format!("{:.3}", elapsed.as_millis() as f64 / 1000.0)
}
