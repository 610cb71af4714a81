use anyhow::Result;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use joint_angle_collector::config::Config;
use joint_angle_collector::control::{RunState, ViewerEvent, HELP_TEXT};
use joint_angle_collector::log;
use joint_angle_collector::logging::open_log_file;
use joint_angle_collector::recorder::Session;
use joint_angle_collector::source::{Capture, FrameSource, JsonLinesSource};

const CONFIG_PATH: &str = "config.toml";
const LOG_DIR: &str = "logs";

fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_string());
    let config = Config::load_or_default(&config_path)?;
    let (logfile, _) = open_log_file(LOG_DIR, "collector")?;

    log!(logfile, "Joint Angle Collector ({})", env!("GIT_VERSION"));
    log!(logfile,
        "[config] output={}, schema={:?}, time_mode={:?}, precision={}, degenerate={:?}",
        config.recorder.output_path, config.recorder.schema, config.recorder.time_mode,
        config.recorder.precision, config.recorder.degenerate
    );
    log!(logfile, "[config] recording={}, run_time_ms={:?}", config.run.recording, config.run.run_time_ms);

    let mut source = JsonLinesSource::open(&config.run.recording)?;

    // 出力が開けなくても再生と表示は続ける
    let start = Instant::now();
    let mut session = match Session::start(&config.recorder.output_path, &config.recorder, start) {
        Ok(s) => {
            log!(logfile, "[output] opened {}", config.recorder.output_path);
            s
        }
        Err(e) => {
            log!(logfile, "[output] WARNING: {e:#}; continuing without logging");
            Session::detached(&config.recorder, start)
        }
    };

    // Console input: q quit, k layout, b joint frame, h help
    let (tx, mut rx) = mpsc::channel::<ViewerEvent>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if let Some(event) = ViewerEvent::from_key(line.trim()) {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    let run_time = config.run.run_time_ms.map(Duration::from_millis);
    let summary_interval = config.run.summary_interval.max(1);
    let mut state = RunState::new();
    let mut skipped: u64 = 0;

    while state.running {
        if state.drain(&mut rx) {
            log!(logfile, "{}", HELP_TEXT);
        }
        if !state.running {
            break;
        }

        let capture = match source.next_capture()? {
            Some(c) => c,
            None => {
                log!(logfile, "[source] end of recording");
                break;
            }
        };
        let now = Instant::now();

        match capture {
            Capture::Skipped => {
                skipped += 1;
                if config.run.verbose {
                    log!(logfile, "[source] no depth image, skipping frame");
                }
                if let Err(e) = session.skip_capture() {
                    log!(logfile, "[output] WARNING: write failed: {e:#}; logging disabled");
                }
            }
            Capture::Frame(frame) => {
                // 書き込みに失敗しても集計と表示は失わない
                let summary = session.summarize(&frame, now)?;
                if let Err(e) = session.record(&frame, &summary) {
                    log!(logfile, "[output] WARNING: write failed: {e:#}; logging disabled");
                }
                if config.run.verbose || summary.processed_frames % summary_interval == 0 {
                    log!(logfile, "{}", summary);
                }
            }
        }

        state.check_run_time(run_time, session.clock().since_start(now));
    }

    let logging = session.is_logging();
    session.end()?;
    if logging {
        log!(logfile, "[output] closed {}", config.recorder.output_path);
    }
    log!(logfile,
        "Finished body tracking processing ({} frames, {} skipped, layout={:?}, joint_frame={})",
        session.processed_frames(), skipped, state.layout, state.visualize_joint_frame
    );
    Ok(())
}
