//! Playback Coordinator - 单飞预览播放
//!
//! 状态机:
//!
//! ```text
//! Idle ──play──▶ Playing(control)
//! Playing ──stop | ended | error──▶ Idle
//! Playing ──play(new)──▶ (stop old) ──▶ Playing(new)
//! ```
//!
//! 失败约定: 打开、启动或播放过程中的任何 [`PlaybackError`] 都不会返回给调用方，
//! 只记录日志，并按自然结束处理（回到 Idle，控件标记为未播放）。
//! UI 调用点因此不需要任何错误处理代码。
//!
//! 所有操作都取 `&mut self`，协调器是唯一持有当前句柄的对象；
//! 在单线程 UI 上下文里这足以保证同一时刻最多一个会话在播放。

use std::rc::Rc;

use crate::application::ports::{
    AudioHandle, AudioPlayerPort, PlaybackControl, PlaybackError, PlaybackEvent,
    PlaybackEventKind, SessionToken,
};

/// 协调器对外可见的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing { session: SessionToken, url: String },
}

/// 正在播放的会话
struct ActiveSession {
    session: SessionToken,
    url: String,
    handle: Box<dyn AudioHandle>,
    control: Rc<dyn PlaybackControl>,
}

/// 预览播放协调器
pub struct PlaybackCoordinator {
    player: Box<dyn AudioPlayerPort>,
    active: Option<ActiveSession>,
    last_session: SessionToken,
}

impl PlaybackCoordinator {
    pub fn new(player: Box<dyn AudioPlayerPort>) -> Self {
        Self {
            player,
            active: None,
            last_session: SessionToken::new(0),
        }
    }

    /// 当前状态
    pub fn state(&self) -> PlaybackState {
        match &self.active {
            None => PlaybackState::Idle,
            Some(active) => PlaybackState::Playing {
                session: active.session,
                url: active.url.clone(),
            },
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// UI 调用点唯一应使用的入口
    pub fn toggle(&mut self, url: &str, control: Rc<dyn PlaybackControl>) {
        if control.is_playing() {
            self.stop();
        } else {
            self.play(url, control);
        }
    }

    /// 开始播放 `url`，先停止已有会话
    pub fn play(&mut self, url: &str, control: Rc<dyn PlaybackControl>) {
        if self.active.is_some() {
            self.stop();
        }

        self.last_session = self.last_session.next();
        let session = self.last_session;

        let mut handle = match self.player.open(url, session) {
            Ok(handle) => handle,
            Err(e) => {
                Self::swallow(session, url, &e);
                control.set_playing(false);
                return;
            }
        };

        control.set_playing(true);

        if let Err(e) = handle.start() {
            Self::swallow(session, url, &e);
            control.set_playing(false);
            return;
        }

        tracing::debug!(session = %session, url = %url, "Preview playback started");

        self.active = Some(ActiveSession {
            session,
            url: url.to_string(),
            handle,
            control,
        });
    }

    /// 停止当前会话：暂停、回到开头、清除控件标记。空闲时无操作。
    pub fn stop(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };

        active.handle.pause();
        active.handle.rewind();
        active.control.set_playing(false);

        tracing::debug!(session = %active.session, url = %active.url, "Preview playback stopped");
    }

    /// 处理句柄回送的结束/出错事件
    ///
    /// 与当前会话不匹配的事件（已被 stop 或被新 play 取代的会话）直接忽略
    pub fn handle_event(&mut self, event: PlaybackEvent) {
        let is_current = self
            .active
            .as_ref()
            .is_some_and(|active| active.session == event.session);

        if !is_current {
            tracing::debug!(session = %event.session, "Ignoring event from stale playback session");
            return;
        }

        let Some(active) = self.active.take() else {
            return;
        };
        active.control.set_playing(false);

        match event.kind {
            PlaybackEventKind::Ended => {
                tracing::debug!(session = %active.session, url = %active.url, "Preview playback ended");
            }
            PlaybackEventKind::Failed(e) => Self::swallow(active.session, &active.url, &e),
        }
    }

    fn swallow(session: SessionToken, url: &str, error: &PlaybackError) {
        tracing::warn!(session = %session, url = %url, error = %error, "Preview playback failed");
    }
}

impl Drop for PlaybackCoordinator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::playback::ControlFlag;
    use proptest::prelude::*;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct HandleLog {
        started: Vec<SessionToken>,
        paused: Vec<SessionToken>,
        rewound: Vec<SessionToken>,
    }

    struct FakeHandle {
        session: SessionToken,
        fail_start: bool,
        log: Rc<RefCell<HandleLog>>,
    }

    impl AudioHandle for FakeHandle {
        fn start(&mut self) -> Result<(), PlaybackError> {
            if self.fail_start {
                return Err(PlaybackError::StartFailed("device busy".to_string()));
            }
            self.log.borrow_mut().started.push(self.session);
            Ok(())
        }

        fn pause(&mut self) {
            self.log.borrow_mut().paused.push(self.session);
        }

        fn rewind(&mut self) {
            self.log.borrow_mut().rewound.push(self.session);
        }
    }

    #[derive(Default)]
    struct FakePlayer {
        log: Rc<RefCell<HandleLog>>,
        broken_urls: Vec<&'static str>,
        unstartable_urls: Vec<&'static str>,
    }

    impl AudioPlayerPort for FakePlayer {
        fn open(
            &self,
            url: &str,
            session: SessionToken,
        ) -> Result<Box<dyn AudioHandle>, PlaybackError> {
            if self.broken_urls.iter().any(|u| *u == url) {
                return Err(PlaybackError::OpenFailed(url.to_string()));
            }
            Ok(Box::new(FakeHandle {
                session,
                fail_start: self.unstartable_urls.iter().any(|u| *u == url),
                log: self.log.clone(),
            }))
        }
    }

    fn coordinator() -> (PlaybackCoordinator, Rc<RefCell<HandleLog>>) {
        let player = FakePlayer::default();
        let log = player.log.clone();
        (PlaybackCoordinator::new(Box::new(player)), log)
    }

    fn controls(n: usize) -> Vec<Rc<ControlFlag>> {
        (0..n).map(|i| Rc::new(ControlFlag::new(format!("button-{}", i)))).collect()
    }

    fn playing_count(controls: &[Rc<ControlFlag>]) -> usize {
        controls.iter().filter(|c| c.is_playing()).count()
    }

    fn current_session(coordinator: &PlaybackCoordinator) -> SessionToken {
        match coordinator.state() {
            PlaybackState::Playing { session, .. } => session,
            PlaybackState::Idle => panic!("expected playing state"),
        }
    }

    #[test]
    fn test_at_most_one_control_playing() {
        let (mut coordinator, _) = coordinator();
        let controls = controls(4);

        let sequence = [0, 1, 1, 2, 3, 0, 0, 2, 1, 3, 3, 3];
        for &i in &sequence {
            coordinator.toggle(&format!("https://cdn/{}.mp3", i), controls[i].clone());
            assert!(playing_count(&controls) <= 1);
        }
    }

    const CONTROLS: usize = 3;

    fn url(i: usize) -> String {
        format!("https://cdn/{}.mp3", i)
    }

    #[derive(Debug, Clone)]
    enum Op {
        Toggle(usize),
        Play(usize),
        Stop,
        /// None: 当前会话；Some(i): 历史会话中的一个（可能已过期）
        Ended(Option<usize>),
        Failed(Option<usize>),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..CONTROLS).prop_map(Op::Toggle),
            (0..CONTROLS).prop_map(Op::Play),
            Just(Op::Stop),
            proptest::option::of(0..16usize).prop_map(Op::Ended),
            proptest::option::of(0..16usize).prop_map(Op::Failed),
        ]
    }

    fn event_session(
        pick: Option<usize>,
        coordinator: &PlaybackCoordinator,
        seen: &[SessionToken],
    ) -> SessionToken {
        match (pick, coordinator.state()) {
            (Some(i), _) if !seen.is_empty() => seen[i % seen.len()],
            (None, PlaybackState::Playing { session, .. }) => session,
            // 从未发出过的会话
            _ => SessionToken::new(0),
        }
    }

    proptest! {
        #[test]
        fn test_single_flight_holds_for_any_sequence(
            ops in proptest::collection::vec(op_strategy(), 1..64)
        ) {
            // 控件 2 的 URL 打不开
            let player = FakePlayer {
                broken_urls: vec!["https://cdn/2.mp3"],
                ..Default::default()
            };
            let mut coordinator = PlaybackCoordinator::new(Box::new(player));
            let controls = controls(CONTROLS);
            let mut seen: Vec<SessionToken> = Vec::new();

            for op in ops {
                match op {
                    Op::Toggle(i) => coordinator.toggle(&url(i), controls[i].clone()),
                    Op::Play(i) => coordinator.play(&url(i), controls[i].clone()),
                    Op::Stop => coordinator.stop(),
                    Op::Ended(pick) => {
                        let session = event_session(pick, &coordinator, &seen);
                        coordinator.handle_event(PlaybackEvent::ended(session));
                    }
                    Op::Failed(pick) => {
                        let session = event_session(pick, &coordinator, &seen);
                        coordinator.handle_event(PlaybackEvent::failed(
                            session,
                            PlaybackError::Interrupted("decoder error".to_string()),
                        ));
                    }
                }

                if let PlaybackState::Playing { session, .. } = coordinator.state() {
                    if !seen.contains(&session) {
                        seen.push(session);
                    }
                }

                let playing = playing_count(&controls);
                prop_assert!(playing <= 1);
                prop_assert_eq!(coordinator.is_idle(), playing == 0);
            }
        }
    }

    #[test]
    fn test_toggle_playing_control_stops_and_goes_idle() {
        let (mut coordinator, log) = coordinator();
        let control = Rc::new(ControlFlag::new("a"));

        coordinator.toggle("https://cdn/a.mp3", control.clone());
        assert!(control.is_playing());
        let session = current_session(&coordinator);

        coordinator.toggle("https://cdn/a.mp3", control.clone());
        assert!(!control.is_playing());
        assert!(coordinator.is_idle());
        assert_eq!(log.borrow().paused, vec![session]);
        assert_eq!(log.borrow().rewound, vec![session]);
    }

    #[test]
    fn test_toggle_other_control_replaces_session() {
        let (mut coordinator, log) = coordinator();
        let controls = controls(2);

        coordinator.toggle("https://cdn/a.mp3", controls[0].clone());
        let first = current_session(&coordinator);
        coordinator.toggle("https://cdn/b.mp3", controls[1].clone());

        assert!(!controls[0].is_playing());
        assert!(controls[1].is_playing());
        assert_eq!(log.borrow().paused, vec![first]);
        assert_eq!(
            coordinator.state(),
            PlaybackState::Playing {
                session: first.next(),
                url: "https://cdn/b.mp3".to_string(),
            }
        );
    }

    #[test]
    fn test_natural_end_returns_to_idle() {
        let (mut coordinator, _) = coordinator();
        let control = Rc::new(ControlFlag::new("a"));

        coordinator.play("https://cdn/a.mp3", control.clone());
        let session = current_session(&coordinator);
        coordinator.handle_event(PlaybackEvent::ended(session));

        assert!(coordinator.is_idle());
        assert!(!control.is_playing());
    }

    #[test]
    fn test_playback_error_is_treated_as_end() {
        let (mut coordinator, _) = coordinator();
        let control = Rc::new(ControlFlag::new("a"));

        coordinator.play("https://cdn/a.mp3", control.clone());
        let session = current_session(&coordinator);
        coordinator.handle_event(PlaybackEvent::failed(
            session,
            PlaybackError::Interrupted("decoder error".to_string()),
        ));

        assert!(coordinator.is_idle());
        assert!(!control.is_playing());
    }

    #[test]
    fn test_stale_event_does_not_clear_newer_session() {
        let (mut coordinator, _) = coordinator();
        let controls = controls(2);

        coordinator.play("https://cdn/a.mp3", controls[0].clone());
        let old = current_session(&coordinator);
        coordinator.play("https://cdn/b.mp3", controls[1].clone());

        coordinator.handle_event(PlaybackEvent::ended(old));

        assert!(controls[1].is_playing());
        assert!(!coordinator.is_idle());
    }

    #[test]
    fn test_open_and_start_failures_are_swallowed() {
        let player = FakePlayer {
            broken_urls: vec!["https://cdn/missing.mp3"],
            unstartable_urls: vec!["https://cdn/busy.mp3"],
            ..Default::default()
        };
        let mut coordinator = PlaybackCoordinator::new(Box::new(player));
        let controls = controls(3);

        coordinator.play("https://cdn/ok.mp3", controls[0].clone());
        coordinator.toggle("https://cdn/missing.mp3", controls[1].clone());
        assert!(coordinator.is_idle());
        assert_eq!(playing_count(&controls), 0);

        coordinator.toggle("https://cdn/busy.mp3", controls[2].clone());
        assert!(coordinator.is_idle());
        assert_eq!(playing_count(&controls), 0);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let (mut coordinator, log) = coordinator();
        coordinator.stop();
        assert!(coordinator.is_idle());
        assert!(log.borrow().paused.is_empty());
    }
}
