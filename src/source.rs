//! Recorded skeleton stream reader.
//!
//! One JSON document per line: a `Frame` object, or `null` for a capture that
//! arrived without a depth image. Blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::body::Frame;

/// 1キャプチャ分の入力
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    Frame(Frame),
    /// 深度画像なし
    Skipped,
}

/// フレーム供給元
pub trait FrameSource {
    /// 次のキャプチャ。終端なら `None`
    fn next_capture(&mut self) -> Result<Option<Capture>>;
}

pub struct JsonLinesSource<R: BufRead> {
    reader: R,
    line: String,
    line_number: usize,
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open recording {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> FrameSource for JsonLinesSource<R> {
    fn next_capture(&mut self) -> Result<Option<Capture>> {
        loop {
            self.line.clear();
            let n = self.reader.read_line(&mut self.line)?;
            if n == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }

            let frame: Option<Frame> = serde_json::from_str(text)
                .with_context(|| format!("invalid frame at line {}", self.line_number))?;
            return Ok(Some(match frame {
                Some(frame) => Capture::Frame(frame),
                None => Capture::Skipped,
            }));
        }
    }
}
