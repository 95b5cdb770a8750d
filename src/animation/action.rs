//! 可播放片段
//!
//! 绑定到某个骨骼实例上的片段句柄，保存本地时间、播放状态、权重、循环模式
//! 和正在进行的淡入淡出。时钟推进逻辑由 [`AnimationMixer`](super::AnimationMixer) 统一调度。

use super::clip::AnimationClip;
use serde::{Deserialize, Serialize};

/// 循环模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    /// 到达末尾后从头循环
    Repeat,
    /// 播放一次，停在最后一帧
    Once,
}

/// 播放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// 权重插值（淡入淡出）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl Fade {
    fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration,
        }
    }

    /// 当前插值结果
    pub fn value(&self) -> f32 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// 可播放片段
#[derive(Debug, Clone)]
pub struct PlayableClip {
    clip: AnimationClip,
    /// 本地播放时间 (秒)
    pub time: f32,
    /// 播放速度 (1.0 = 正常速度)
    pub time_scale: f32,
    /// 混合权重
    pub weight: f32,
    /// 循环模式
    pub loop_mode: LoopMode,
    state: PlaybackState,
    fade: Option<Fade>,
}

impl PlayableClip {
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Repeat,
            state: PlaybackState::Stopped,
            fade: None,
        }
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    pub fn name(&self) -> &str {
        &self.clip.name
    }

    pub fn duration(&self) -> f32 {
        self.clip.duration
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn fade(&self) -> Option<&Fade> {
        self.fade.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// 参与混合的权重；未播放时为 0
    pub fn effective_weight(&self) -> f32 {
        match self.state {
            PlaybackState::Stopped => 0.0,
            PlaybackState::Playing | PlaybackState::Paused => self.weight,
        }
    }

    /// 开始播放
    pub fn play(&mut self) -> &mut Self {
        self.state = PlaybackState::Playing;
        self
    }

    /// 暂停播放
    pub fn pause(&mut self) -> &mut Self {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        self
    }

    /// 停止播放并重置时间
    pub fn stop(&mut self) -> &mut Self {
        self.state = PlaybackState::Stopped;
        self.time = 0.0;
        self.fade = None;
        self
    }

    /// 时间归零、取消淡入淡出并恢复满权重
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.weight = 1.0;
        self.fade = None;
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
        self
    }

    /// 在 `duration` 秒内将权重从 0 升到 1
    pub fn fade_in(&mut self, duration: f32) -> &mut Self {
        self.schedule_fade(0.0, 1.0, duration)
    }

    /// 在 `duration` 秒内将权重从当前值降到 0，结束后停止播放
    ///
    /// 从当前权重出发，淡入尚未完成时反向淡出不会产生跳变。
    pub fn fade_out(&mut self, duration: f32) -> &mut Self {
        self.schedule_fade(self.weight, 0.0, duration)
    }

    /// 设置循环模式
    pub fn set_loop(&mut self, loop_mode: LoopMode) -> &mut Self {
        self.loop_mode = loop_mode;
        self
    }

    fn schedule_fade(&mut self, from: f32, to: f32, duration: f32) -> &mut Self {
        if duration.is_finite() && duration > 0.0 {
            self.weight = from;
            self.fade = Some(Fade::new(from, to, duration));
        } else {
            self.fade = None;
            self.finish_fade(to);
        }
        self
    }

    fn finish_fade(&mut self, to: f32) {
        self.weight = to;
        if to <= 0.0 {
            self.state = PlaybackState::Stopped;
            self.time = 0.0;
        }
    }

    /// 推进本地时间和权重插值
    ///
    /// 只有播放中的片段推进时间；停在末尾（或暂停）的片段仍然推进淡入淡出。
    pub(crate) fn advance(&mut self, delta: f32) {
        match self.state {
            PlaybackState::Stopped => return,
            PlaybackState::Playing => self.advance_time(delta),
            PlaybackState::Paused => {}
        }
        self.advance_fade(delta);
    }

    fn advance_time(&mut self, delta: f32) {
        self.time += delta * self.time_scale;
        let duration = self.clip.duration;
        match self.loop_mode {
            LoopMode::Repeat => {
                self.time = if duration > 0.0 {
                    self.time.rem_euclid(duration)
                } else {
                    0.0
                };
            }
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.state = PlaybackState::Paused;
                }
            }
        }
    }

    fn advance_fade(&mut self, delta: f32) {
        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += delta;
            if fade.is_finished() {
                let to = fade.to;
                self.fade = None;
                self.finish_fade(to);
            } else {
                self.weight = fade.value();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_action(duration: f32) -> PlayableClip {
        PlayableClip::new(AnimationClip::new("test", duration))
    }

    #[test]
    fn test_play_pause_resume() {
        let mut action = create_test_action(1.0);
        assert!(!action.is_playing());

        action.play();
        assert!(action.is_playing());

        action.pause();
        assert_eq!(action.state(), PlaybackState::Paused);

        action.reset();
        assert!(action.is_playing());
    }

    #[test]
    fn test_finished_once_clip_still_fades_out() {
        let mut action = create_test_action(0.05);
        action.set_loop(LoopMode::Once).play();
        action.advance(0.1);
        assert_eq!(action.state(), PlaybackState::Paused);
        assert_eq!(action.time, 0.05);

        action.fade_out(0.2);
        action.advance(0.1);
        assert!((action.weight - 0.5).abs() < 1e-5);
        assert_eq!(action.time, 0.05);

        action.advance(0.1);
        assert_eq!(action.weight, 0.0);
        assert_eq!(action.state(), PlaybackState::Stopped);
        assert_eq!(action.effective_weight(), 0.0);
    }

    #[test]
    fn test_repeat_wraps() {
        let mut action = create_test_action(1.0);
        action.play();
        action.advance(0.75);
        action.advance(0.5);

        assert!((action.time - 0.25).abs() < 1e-5);
        assert!(action.is_playing());
    }

    #[test]
    fn test_once_clamps() {
        let mut action = create_test_action(1.0);
        action.set_loop(LoopMode::Once).play();
        action.advance(1.5);

        assert_eq!(action.time, 1.0);
        assert_eq!(action.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_zero_duration_clip() {
        let mut action = create_test_action(0.0);
        action.play();
        action.advance(0.3);
        assert_eq!(action.time, 0.0);
    }

    #[test]
    fn test_fade_in() {
        let mut action = create_test_action(2.0);
        action.reset().fade_in(0.2).play();
        assert_eq!(action.weight, 0.0);

        action.advance(0.1);
        assert!((action.weight - 0.5).abs() < 1e-5);

        action.advance(0.1);
        assert_eq!(action.weight, 1.0);
        assert!(!action.is_fading());
        assert!(action.is_playing());
    }

    #[test]
    fn test_fade_out_stops() {
        let mut action = create_test_action(2.0);
        action.play();
        action.fade_out(0.2);

        action.advance(0.1);
        assert!((action.weight - 0.5).abs() < 1e-5);
        assert!(action.is_playing());
        assert!((action.time - 0.1).abs() < 1e-5);

        action.advance(0.15);
        assert_eq!(action.weight, 0.0);
        assert_eq!(action.state(), PlaybackState::Stopped);
        assert_eq!(action.effective_weight(), 0.0);
    }

    #[test]
    fn test_fade_out_from_partial_weight() {
        let mut action = create_test_action(2.0);
        action.reset().fade_in(0.2).play();
        action.advance(0.05);

        let weight = action.weight;
        action.fade_out(0.2);
        assert_eq!(action.fade().map(|f| f.from), Some(weight));
        assert_eq!(action.weight, weight);
    }

    #[test]
    fn test_zero_duration_fade_is_immediate() {
        let mut action = create_test_action(2.0);
        action.play();
        action.fade_out(0.0);
        assert_eq!(action.weight, 0.0);
        assert!(!action.is_playing());

        action.reset().fade_in(0.0).play();
        assert_eq!(action.weight, 1.0);
        assert!(action.is_playing());
    }
}
