use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub recorder: RecorderConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// CSV の列構成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSchema {
    /// Time, ID, 4角度
    Compact,
    /// Compact + 32関節の位置と距離
    #[default]
    Extended,
}

/// Time 列の意味
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    /// セッション開始からの経過時間
    #[default]
    Cumulative,
    /// 前フレームからの経過時間（最初のフレームは0）
    Delta,
}

/// 角度が定まらない場合の出力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// 空欄
    #[default]
    Empty,
    /// "NaN"
    Nan,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecorderConfig {
    /// CSV 出力先（既存ファイルは上書き）
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default)]
    pub schema: RecordSchema,
    #[serde(default)]
    pub time_mode: TimeMode,
    /// 角度・位置の小数点以下桁数
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default)]
    pub degenerate: DegeneratePolicy,
}

fn default_output_path() -> String { "output.csv".to_string() }
fn default_precision() -> usize { 6 }

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            schema: RecordSchema::default(),
            time_mode: TimeMode::default(),
            precision: default_precision(),
            degenerate: DegeneratePolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    /// 骨格記録ファイル (JSON Lines)
    #[serde(default = "default_recording")]
    pub recording: String,
    /// 実行時間の上限（ミリ秒）。未指定なら記録の終わりまで
    #[serde(default)]
    pub run_time_ms: Option<u64>,
    /// 何フレームごとにサマリーをログに出すか
    #[serde(default = "default_summary_interval")]
    pub summary_interval: u64,
    #[serde(default)]
    pub verbose: bool,
}

fn default_recording() -> String { "recording.jsonl".to_string() }
fn default_summary_interval() -> u64 { 30 }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            recording: default_recording(),
            run_time_ms: None,
            summary_interval: default_summary_interval(),
            verbose: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// ファイルがなければデフォルト設定
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
