use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};

use crate::body::{Frame, JointAngles};
use crate::config::RecorderConfig;

use super::clock::SessionClock;
use super::schema::RowFormat;
use super::summary::{BodySummary, FrameSummary};

/// 記録セッション
///
/// ヘッダーは開始時に1度だけ書く。以降は `process_frame` 1回につき
/// 体ごとに1行（体がなければ空行1行）を追記し、フレームごとに flush する。
/// 行を書き換えたり並べ替えたりはしない。
///
/// 書き込みに失敗すると出力を切り離し、以降はファイルに書かずに
/// フレーム数・時刻・角度の集計だけを続ける（再試行はしない）。
pub struct Session<W: Write> {
    writer: Option<csv::Writer<W>>,
    format: RowFormat,
    clock: SessionClock,
    processed_frames: u64,
    ended: bool,
}

impl Session<File> {
    /// 出力ファイルを作成（既存なら切り詰め）してセッションを開始
    pub fn start<P: AsRef<Path>>(output_path: P, config: &RecorderConfig, now: Instant) -> Result<Self> {
        let path = output_path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to open output file {}", path.display()))?;
        Self::from_writer(file, config, now)
            .with_context(|| format!("failed to write header to {}", path.display()))
    }
}

impl<W: Write> Session<W> {
    pub fn from_writer(writer: W, config: &RecorderConfig, now: Instant) -> Result<Self> {
        let format = RowFormat::from_config(config);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(format.header())?;
        writer.flush()?;

        Ok(Self {
            writer: Some(writer),
            ..Self::detached(config, now)
        })
    }

    /// 出力なしのセッション。集計と `FrameSummary` だけを返す
    pub fn detached(config: &RecorderConfig, now: Instant) -> Self {
        Self {
            writer: None,
            format: RowFormat::from_config(config),
            clock: SessionClock::new(config.time_mode, now),
            processed_frames: 0,
            ended: false,
        }
    }

    pub fn processed_frames(&self) -> u64 {
        self.processed_frames
    }

    /// 出力先に書き込んでいるか
    pub fn is_logging(&self) -> bool {
        self.writer.is_some()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// 1フレーム分の角度を計算して追記する
    pub fn process_frame(&mut self, frame: &Frame, now: Instant) -> Result<FrameSummary> {
        let summary = self.summarize(frame, now)?;
        self.record(frame, &summary)?;
        Ok(summary)
    }

    /// フレームを数え、時刻を進めて角度を計算する（書き込みはしない）
    pub fn summarize(&mut self, frame: &Frame, now: Instant) -> Result<FrameSummary> {
        if self.ended {
            bail!("session already ended");
        }

        self.processed_frames += 1;
        let elapsed = self.clock.tick(now);
        let bodies = frame
            .bodies
            .iter()
            .map(|body| BodySummary {
                id: body.id,
                angles: JointAngles::from_skeleton(&body.skeleton),
            })
            .collect();

        Ok(FrameSummary {
            body_count: frame.body_count(),
            processed_frames: self.processed_frames,
            elapsed,
            bodies,
        })
    }

    /// `summarize` の結果を行として書く。出力が切り離されていれば何もしない
    pub fn record(&mut self, frame: &Frame, summary: &FrameSummary) -> Result<()> {
        if self.ended {
            bail!("session already ended");
        }
        if self.writer.is_none() {
            return Ok(());
        }

        let rows: Vec<Vec<String>> = if frame.is_empty() {
            vec![self.format.empty_frame_row(summary.elapsed)]
        } else {
            frame
                .bodies
                .iter()
                .zip(&summary.bodies)
                .map(|(body, s)| self.format.body_row(summary.elapsed, body.id, &s.angles, &body.skeleton))
                .collect()
        };
        self.write_rows(&rows)
    }

    /// 深度画像のないキャプチャ。全列空の行を書き、処理フレーム数には数えない
    pub fn skip_capture(&mut self) -> Result<()> {
        if self.ended {
            bail!("session already ended");
        }
        if self.writer.is_none() {
            return Ok(());
        }
        let row = self.format.skipped_row();
        self.write_rows(&[row])
    }

    /// flush して閉じる。2回目以降は何もしない
    pub fn end(&mut self) -> Result<()> {
        self.ended = true;
        if let Some(mut writer) = self.writer.take() {
            writer.flush().context("failed to flush output")?;
        }
        Ok(())
    }

    /// flush して出力先を返す
    pub fn finish(mut self) -> Result<W> {
        let writer = self.writer.take().context("session has no output")?;
        writer
            .into_inner()
            .map_err(|e| anyhow!("failed to flush output: {}", e.error()))
    }

    /// 失敗したら出力を切り離してエラーを返す
    fn write_rows(&mut self, rows: &[Vec<String>]) -> Result<()> {
        let result = match self.writer.as_mut() {
            Some(writer) => write_and_flush(writer, rows),
            None => return Ok(()),
        };
        if result.is_err() {
            self.writer = None;
        }
        result
    }
}

fn write_and_flush<W: Write>(writer: &mut csv::Writer<W>, rows: &[Vec<String>]) -> Result<()> {
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
