use std::sync::mpsc;
use std::time::Duration;

/// 3Dビューのレイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    OnlyMainView,
    AllViews,
}

impl Layout {
    pub fn next(self) -> Self {
        match self {
            Self::OnlyMainView => Self::AllViews,
            Self::AllViews => Self::OnlyMainView,
        }
    }
}

/// ビューア側から届く操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Quit,
    CycleLayout,
    ToggleJointFrame,
    Help,
}

impl ViewerEvent {
    /// キー入力 → 操作 (ESC/q: 終了, k: レイアウト, b: 関節座標系表示, h: ヘルプ)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "q" | "esc" | "\u{1b}" => Some(Self::Quit),
            "k" => Some(Self::CycleLayout),
            "b" => Some(Self::ToggleJointFrame),
            "h" => Some(Self::Help),
            _ => None,
        }
    }
}

/// 操作の供給元
pub trait EventSource {
    fn poll_event(&mut self) -> Option<ViewerEvent>;
}

impl EventSource for mpsc::Receiver<ViewerEvent> {
    fn poll_event(&mut self) -> Option<ViewerEvent> {
        self.try_recv().ok()
    }
}

/// 収集ループの実行状態
#[derive(Debug, Clone)]
pub struct RunState {
    pub running: bool,
    pub layout: Layout,
    pub visualize_joint_frame: bool,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            running: true,
            layout: Layout::default(),
            visualize_joint_frame: false,
        }
    }

    /// 操作を反映する。ヘルプ表示が必要なら true
    pub fn handle(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::Quit => self.running = false,
            ViewerEvent::CycleLayout => self.layout = self.layout.next(),
            ViewerEvent::ToggleJointFrame => self.visualize_joint_frame = !self.visualize_joint_frame,
            ViewerEvent::Help => return true,
        }
        false
    }

    /// 溜まっている操作をすべて反映。ヘルプ要求があれば true
    pub fn drain<S: EventSource>(&mut self, source: &mut S) -> bool {
        let mut help = false;
        while let Some(event) = source.poll_event() {
            help |= self.handle(event);
        }
        help
    }

    /// 実行時間の上限に達したら停止する
    pub fn check_run_time(&mut self, limit: Option<Duration>, elapsed: Duration) {
        if let Some(limit) = limit {
            if elapsed >= limit {
                self.running = false;
            }
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

pub const HELP_TEXT: &str = "\
Key shortcuts
  q / ESC : quit
  h       : help
  b       : toggle joint frame visualization
  k       : cycle 3d window layout";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(ViewerEvent::from_key("q"), Some(ViewerEvent::Quit));
        assert_eq!(ViewerEvent::from_key("k"), Some(ViewerEvent::CycleLayout));
        assert_eq!(ViewerEvent::from_key("b"), Some(ViewerEvent::ToggleJointFrame));
        assert_eq!(ViewerEvent::from_key("h"), Some(ViewerEvent::Help));
        assert_eq!(ViewerEvent::from_key("x"), None);
    }

    #[test]
    fn test_handle_events() {
        let mut state = RunState::new();
        assert!(!state.handle(ViewerEvent::CycleLayout));
        assert_eq!(state.layout, Layout::AllViews);
        state.handle(ViewerEvent::CycleLayout);
        assert_eq!(state.layout, Layout::OnlyMainView);

        state.handle(ViewerEvent::ToggleJointFrame);
        assert!(state.visualize_joint_frame);

        assert!(state.handle(ViewerEvent::Help));
        assert!(state.running);
        state.handle(ViewerEvent::Quit);
        assert!(!state.running);
    }

    #[test]
    fn test_drain_channel() {
        let (tx, mut rx) = mpsc::channel();
        tx.send(ViewerEvent::ToggleJointFrame).unwrap();
        tx.send(ViewerEvent::Help).unwrap();
        tx.send(ViewerEvent::Quit).unwrap();

        let mut state = RunState::new();
        assert!(state.drain(&mut rx));
        assert!(state.visualize_joint_frame);
        assert!(!state.running);
        assert!(!state.drain(&mut rx));
    }

    #[test]
    fn test_run_time_limit() {
        let mut state = RunState::new();
        state.check_run_time(None, Duration::from_secs(3600));
        assert!(state.running);
        state.check_run_time(Some(Duration::from_millis(500)), Duration::from_millis(499));
        assert!(state.running);
        state.check_run_time(Some(Duration::from_millis(500)), Duration::from_millis(500));
        assert!(!state.running);
    }
}
