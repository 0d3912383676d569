//! Per-scalar transition engine.
//!
//! Every animated property (radius, stroke width, dash offset, angle) owns one
//! [`ChannelId`]. Observing a new target retargets the channel from its
//! *current* interpolated value, so repeated updates stay visually continuous.
//! The engine is single-threaded and frame-driven: the host implements
//! [`FrameScheduler`] and calls [`TransitionEngine::on_frame`] from its frame
//! callback until every channel has settled.

use std::collections::BTreeSet;

use tracing::trace;

use crate::ease::Ease;

/// Opaque handle to a host-scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(pub u64);

/// Host capability the engine runs on: a millisecond clock plus a one-shot
/// per-frame wakeup, in the shape of a display-refresh callback registry.
///
/// `schedule_frame` requests that the host invoke
/// [`TransitionEngine::on_frame`] once on its next frame. Tokens from frames
/// that already fired are stale; cancelling them must be a no-op.
pub trait FrameScheduler {
    fn now_ms(&self) -> f64;
    fn schedule_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Chart-level animation speed presets.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Fast,
    #[default]
    Default,
    Slow,
}

impl Speed {
    pub fn duration_ms(self) -> f64 {
        match self {
            Self::Fast => 250.0,
            Self::Default => 500.0,
            Self::Slow => 700.0,
        }
    }
}

/// How a channel interpolates toward a new target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionConfig {
    /// Run length in milliseconds. Zero or negative means jump to the target.
    pub duration_ms: f64,
    pub ease: Ease,
}

impl TransitionConfig {
    pub fn new(duration_ms: f64, ease: Ease) -> crate::ArcwiseResult<Self> {
        if !duration_ms.is_finite() {
            return Err(crate::ArcwiseError::validation(
                "transition duration must be finite",
            ));
        }
        Ok(Self {
            duration_ms: duration_ms.max(0.0),
            ease,
        })
    }

    pub fn from_speed(speed: Speed) -> Self {
        Self {
            duration_ms: speed.duration_ms(),
            ease: Ease::InOutCubic,
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::from_speed(Speed::Default)
    }
}

/// One animated scalar property.
#[derive(Clone, Copy, Debug)]
struct Channel {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
    current: f64,
    pending: Option<FrameToken>,
}

impl Channel {
    fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start_ms: 0.0,
            duration_ms: 0.0,
            ease: Ease::Linear,
            current: value,
            pending: None,
        }
    }

    /// Advance to `now_ms`. Returns `true` once the run has finished, with
    /// `current` pinned to `to` exactly (no residual drift).
    fn tick(&mut self, now_ms: f64) -> bool {
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
        };
        if progress >= 1.0 {
            self.current = self.to;
            true
        } else {
            self.current = self.from + (self.to - self.from) * self.ease.apply(progress);
            false
        }
    }
}

/// Handle to a channel owned by a [`TransitionEngine`].
///
/// Ids are minted by [`TransitionEngine::observe`] and are only meaningful for
/// the engine that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(usize);

pub struct TransitionEngine<S: FrameScheduler> {
    scheduler: S,
    channels: Vec<Channel>,
}

impl<S: FrameScheduler> TransitionEngine<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            channels: Vec::new(),
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Observe a target value.
    ///
    /// With `id: None` a channel is created lazily, already settled at
    /// `target` (no frames scheduled). Otherwise the channel is retargeted:
    /// the in-flight run is cancelled synchronously and the new run starts
    /// from the channel's current interpolated value, never from the stale
    /// start point. A repeated identical target is a no-op.
    pub fn observe(
        &mut self,
        id: Option<ChannelId>,
        target: f64,
        config: &TransitionConfig,
    ) -> ChannelId {
        let Some(id) = id else {
            self.channels.push(Channel::settled(target));
            return ChannelId(self.channels.len() - 1);
        };

        let ch = &mut self.channels[id.0];
        if ch.to == target {
            return id;
        }

        // Cancel the superseded run before touching the channel so no two
        // runs ever write the same output.
        if let Some(token) = ch.pending.take() {
            self.scheduler.cancel_frame(token);
        }

        ch.from = ch.current;
        ch.to = target;
        if config.duration_ms <= 0.0 {
            ch.current = target;
            trace!(channel = id.0, target, "jump (zero duration)");
            return id;
        }

        ch.start_ms = self.scheduler.now_ms();
        ch.duration_ms = config.duration_ms;
        ch.ease = config.ease;
        ch.pending = Some(self.scheduler.schedule_frame());
        trace!(channel = id.0, from = ch.from, to = target, "retarget");
        id
    }

    /// Current interpolated output of a channel.
    pub fn value(&self, id: ChannelId) -> f64 {
        self.channels[id.0].current
    }

    /// `true` once the channel output equals its target and no frame is
    /// pending.
    pub fn is_settled(&self, id: ChannelId) -> bool {
        let ch = &self.channels[id.0];
        ch.current == ch.to && ch.pending.is_none()
    }

    /// Host frame callback: advance every in-flight channel to the
    /// scheduler's current time, rescheduling the ones that have not settled.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_frame(&mut self) {
        let now = self.scheduler.now_ms();
        for (idx, ch) in self.channels.iter_mut().enumerate() {
            if ch.pending.take().is_none() {
                continue;
            }
            if ch.tick(now) {
                trace!(channel = idx, value = ch.current, "settled");
            } else {
                ch.pending = Some(self.scheduler.schedule_frame());
            }
        }
    }
}

/// Deterministic [`FrameScheduler`] for headless hosts and tests: the clock
/// only moves when [`ManualScheduler::step`] is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: f64,
    next_token: u64,
    pending: BTreeSet<u64>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock and mark all pending frame requests as fired; the
    /// host would now invoke [`TransitionEngine::on_frame`].
    pub fn step(&mut self, ms: f64) {
        self.now_ms += ms;
        self.pending.clear();
    }

    /// Frame requests that have not fired yet.
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Total frame requests ever made.
    pub fn total_scheduled(&self) -> u64 {
        self.next_token
    }

    pub fn cancelled_frames(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn schedule_frame(&mut self) -> FrameToken {
        self.next_token += 1;
        self.pending.insert(self.next_token);
        FrameToken(self.next_token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending.remove(&token.0) {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TransitionEngine<ManualScheduler> {
        TransitionEngine::new(ManualScheduler::new())
    }

    fn linear(duration_ms: f64) -> TransitionConfig {
        TransitionConfig {
            duration_ms,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn first_observation_settles_without_frames() {
        let mut eng = engine();
        let id = eng.observe(None, 42.0, &linear(500.0));
        assert_eq!(eng.value(id), 42.0);
        assert!(eng.is_settled(id));
        assert_eq!(eng.scheduler().total_scheduled(), 0);
    }

    #[test]
    fn zero_duration_jumps_with_no_frames() {
        let mut eng = engine();
        let id = eng.observe(None, 0.0, &linear(500.0));
        eng.observe(Some(id), 10.0, &linear(0.0));
        assert_eq!(eng.value(id), 10.0);
        assert!(eng.is_settled(id));
        assert_eq!(eng.scheduler().total_scheduled(), 0);
    }

    #[test]
    fn repeated_identical_target_is_a_noop() {
        let mut eng = engine();
        let id = eng.observe(None, 0.0, &linear(100.0));
        eng.observe(Some(id), 5.0, &linear(100.0));
        let scheduled = eng.scheduler().total_scheduled();
        eng.observe(Some(id), 5.0, &linear(100.0));
        assert_eq!(eng.scheduler().total_scheduled(), scheduled);
        assert_eq!(eng.scheduler().cancelled_frames(), 0);
    }

    #[test]
    fn linear_run_interpolates_and_pins_exactly() {
        let mut eng = engine();
        let id = eng.observe(None, 0.0, &linear(100.0));
        eng.observe(Some(id), 100.0, &linear(100.0));

        eng.scheduler_mut().step(50.0);
        eng.on_frame();
        assert!((eng.value(id) - 50.0).abs() < 1e-9);
        assert!(!eng.is_settled(id));

        eng.scheduler_mut().step(75.0);
        eng.on_frame();
        assert_eq!(eng.value(id), 100.0);
        assert!(eng.is_settled(id));
    }

    #[test]
    fn settled_channel_stops_scheduling() {
        let mut eng = engine();
        let id = eng.observe(None, 0.0, &linear(100.0));
        eng.observe(Some(id), 1.0, &linear(100.0));
        eng.scheduler_mut().step(200.0);
        eng.on_frame();
        assert!(eng.is_settled(id));
        assert_eq!(eng.scheduler().pending_frames(), 0);
        let scheduled = eng.scheduler().total_scheduled();
        eng.scheduler_mut().step(16.0);
        eng.on_frame();
        assert_eq!(eng.scheduler().total_scheduled(), scheduled);
    }

    #[test]
    fn retarget_mid_flight_continues_from_current_value() {
        let mut eng = engine();
        let id = eng.observe(None, 0.0, &linear(100.0));
        eng.observe(Some(id), 100.0, &linear(100.0));

        eng.scheduler_mut().step(50.0);
        eng.on_frame();
        assert!((eng.value(id) - 50.0).abs() < 1e-9);

        // Reverse direction: the superseded run is cancelled synchronously
        // and the new run starts at 50, not at 0.
        eng.observe(Some(id), 0.0, &linear(100.0));
        assert_eq!(eng.scheduler().cancelled_frames(), 1);
        assert!((eng.value(id) - 50.0).abs() < 1e-9);

        eng.scheduler_mut().step(50.0);
        eng.on_frame();
        assert!((eng.value(id) - 25.0).abs() < 1e-9);

        eng.scheduler_mut().step(50.0);
        eng.on_frame();
        assert_eq!(eng.value(id), 0.0);
    }

    #[test]
    fn eased_run_ends_exactly_on_target() {
        let mut eng = engine();
        let cfg = TransitionConfig::from_speed(Speed::Fast);
        let id = eng.observe(None, 1.0, &cfg);
        eng.observe(Some(id), 2.5, &cfg);
        for _ in 0..32 {
            eng.scheduler_mut().step(16.0);
            eng.on_frame();
        }
        assert_eq!(eng.value(id), 2.5);
    }

    #[test]
    fn channels_are_independent() {
        let mut eng = engine();
        let a = eng.observe(None, 0.0, &linear(100.0));
        let b = eng.observe(None, 0.0, &linear(100.0));
        eng.observe(Some(a), 10.0, &linear(100.0));
        eng.observe(Some(b), 20.0, &linear(200.0));

        eng.scheduler_mut().step(100.0);
        eng.on_frame();
        assert_eq!(eng.value(a), 10.0);
        assert!((eng.value(b) - 10.0).abs() < 1e-9);
        assert!(eng.is_settled(a));
        assert!(!eng.is_settled(b));
    }

    #[test]
    fn config_rejects_non_finite_duration() {
        assert!(TransitionConfig::new(f64::NAN, Ease::Linear).is_err());
        let cfg = TransitionConfig::new(-5.0, Ease::Linear).unwrap();
        assert_eq!(cfg.duration_ms, 0.0);
    }

    #[test]
    fn speed_presets_match_the_chart_surface() {
        assert_eq!(Speed::Fast.duration_ms(), 250.0);
        assert_eq!(Speed::Default.duration_ms(), 500.0);
        assert_eq!(Speed::Slow.duration_ms(), 700.0);
        assert_eq!(
            TransitionConfig::default().ease,
            Ease::InOutCubic
        );
    }
}
