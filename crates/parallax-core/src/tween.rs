//! Time-based property tweens.
//!
//! Targets own one or more `Vec3` channels. Relative tweens add an eased
//! fraction of their delta on top of a settled base value, so overlapping
//! relative tweens on the same target compose and accumulate. Staggered
//! tweens animate every channel of a target from one absolute value to
//! another, each channel starting `stagger` seconds after the previous one.

use crate::constants::BACK_OVERSHOOT;
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// Cubic ease-in-out.
    Power2InOut,
    /// Overshoots past the end value before settling.
    BackOut { overshoot: f32 },
}

impl Ease {
    pub const BACK_OUT: Ease = Ease::BackOut {
        overshoot: BACK_OVERSHOOT,
    };

    /// Map linear progress to eased progress; input is clamped to \[0, 1\].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Ease::BackOut { overshoot: s } => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
}

impl Timing {
    pub fn new(duration: f32, ease: Ease) -> Self {
        Self {
            duration,
            delay: 0.0,
            ease,
        }
    }
}

/// Animated property owners in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetId {
    /// Extra rotation of the object in the given slot, one channel.
    ObjectRotation(usize),
    /// Per-letter style of a section title, one channel per letter.
    TitleLetters(usize),
}

/// Starts and cancels tweens; the coordinator never polls their progress.
pub trait Animator {
    /// Animate every channel of `target` by `+= delta`.
    fn animate_relative(&mut self, target: TargetId, delta: Vec3, timing: Timing);

    /// Animate `count` channels of `target` from `from` to `to`, channel `i`
    /// starting `i * stagger` seconds after `timing.delay`.
    fn animate_staggered(
        &mut self,
        target: TargetId,
        count: usize,
        from: Vec3,
        to: Vec3,
        timing: Timing,
        stagger: f32,
    );

    /// Stop every tween on `target`, leaving values where they are.
    /// Returns the number of tweens removed; zero is not an error.
    fn cancel(&mut self, target: TargetId) -> usize;

    /// Current value of one channel, `None` if the target was never animated.
    fn value(&self, target: TargetId, channel: usize) -> Option<Vec3>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

#[derive(Clone, Copy, Debug)]
enum Motion {
    Relative { delta: Vec3 },
    Staggered {
        from: Vec3,
        to: Vec3,
        count: usize,
        stagger: f32,
    },
}

#[derive(Clone, Debug)]
struct Tween {
    id: TweenId,
    target: TargetId,
    motion: Motion,
    timing: Timing,
    elapsed: f32,
}

impl Tween {
    fn channel_delay(&self, channel: usize) -> f32 {
        match self.motion {
            Motion::Relative { .. } => self.timing.delay,
            Motion::Staggered { stagger, .. } => self.timing.delay + stagger * channel as f32,
        }
    }

    fn progress(&self, channel: usize) -> f32 {
        let local = self.elapsed - self.channel_delay(channel);
        if local <= 0.0 {
            return self.timing.ease.apply(0.0);
        }
        if self.timing.duration <= 0.0 {
            return self.timing.ease.apply(1.0);
        }
        self.timing.ease.apply(local / self.timing.duration)
    }

    fn total_duration(&self) -> f32 {
        let last = match self.motion {
            Motion::Relative { .. } => 0,
            Motion::Staggered { count, .. } => count.saturating_sub(1),
        };
        self.channel_delay(last) + self.timing.duration.max(0.0)
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }
}

type Channels = SmallVec<[Vec3; 1]>;

/// Tween scheduler advanced once per frame by the host loop.
#[derive(Default)]
pub struct TweenEngine {
    base: FnvHashMap<TargetId, Channels>,
    tweens: Vec<Tween>,
    next_id: u64,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every tween forward by `dt` seconds and retire finished ones.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let base = &mut self.base;
        self.tweens.retain_mut(|tw| {
            tw.elapsed += dt;
            if tw.finished() {
                settle(base, tw);
                false
            } else {
                true
            }
        });
    }

    pub fn is_animating(&self, target: TargetId) -> bool {
        self.tweens.iter().any(|t| t.target == target)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    fn push(&mut self, target: TargetId, motion: Motion, timing: Timing) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push(Tween {
            id,
            target,
            motion,
            timing,
            elapsed: 0.0,
        });
        id
    }
}

/// Fold a tween's current contribution into the settled base values.
fn settle(base: &mut FnvHashMap<TargetId, Channels>, tw: &Tween) {
    let channels = base.entry(tw.target).or_insert_with(|| smallvec![Vec3::ZERO]);
    match tw.motion {
        Motion::Relative { delta } => {
            let p = tw.progress(0);
            for c in channels.iter_mut() {
                *c += delta * p;
            }
        }
        Motion::Staggered {
            from, to, count, ..
        } => {
            if channels.len() < count {
                channels.resize(count, Vec3::ZERO);
            }
            for (i, c) in channels.iter_mut().take(count).enumerate() {
                *c = from.lerp(to, tw.progress(i));
            }
        }
    }
}

impl Animator for TweenEngine {
    fn animate_relative(&mut self, target: TargetId, delta: Vec3, timing: Timing) {
        self.base
            .entry(target)
            .or_insert_with(|| smallvec![Vec3::ZERO]);
        let id = self.push(target, Motion::Relative { delta }, timing);
        log::debug!("[tween] {:?} relative {:?} on {:?}", id, delta, target);
    }

    fn animate_staggered(
        &mut self,
        target: TargetId,
        count: usize,
        from: Vec3,
        to: Vec3,
        timing: Timing,
        stagger: f32,
    ) {
        if count == 0 {
            return;
        }
        let channels = self.base.entry(target).or_default();
        if channels.len() < count {
            channels.resize(count, from);
        }
        let motion = Motion::Staggered {
            from,
            to,
            count,
            stagger: stagger.max(0.0),
        };
        let id = self.push(target, motion, timing);
        log::debug!("[tween] {:?} staggered x{} on {:?}", id, count, target);
    }

    fn cancel(&mut self, target: TargetId) -> usize {
        let before = self.tweens.len();
        let base = &mut self.base;
        self.tweens.retain(|tw| {
            if tw.target == target {
                settle(base, tw);
                false
            } else {
                true
            }
        });
        before - self.tweens.len()
    }

    fn value(&self, target: TargetId, channel: usize) -> Option<Vec3> {
        let base = self.base.get(&target)?;
        let mut v = *base.get(channel)?;
        // The most recently started staggered tween owns the absolute value.
        let absolute = self
            .tweens
            .iter()
            .filter(|t| t.target == target)
            .filter_map(|t| match t.motion {
                Motion::Staggered {
                    from, to, count, ..
                } if channel < count => Some((t.id, from.lerp(to, t.progress(channel)))),
                _ => None,
            })
            .max_by_key(|(id, _)| *id);
        if let Some((_, abs)) = absolute {
            v = abs;
        }
        for t in self.tweens.iter().filter(|t| t.target == target) {
            if let Motion::Relative { delta } = t.motion {
                v += delta * t.progress(0);
            }
        }
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn eases_hit_endpoints() {
        for ease in [Ease::Linear, Ease::Power2InOut, Ease::BACK_OUT] {
            assert!(ease.apply(0.0).abs() < EPS, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < EPS, "{ease:?}");
        }
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BACK_OUT.apply(i as f32 / 100.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.05);
    }

    #[test]
    fn relative_tween_settles_at_delta() {
        let mut e = TweenEngine::new();
        let target = TargetId::ObjectRotation(0);
        e.animate_relative(target, Vec3::new(6.0, 3.0, 1.5), Timing::new(1.0, Ease::Linear));
        e.advance(0.5);
        let mid = e.value(target, 0).unwrap();
        assert!((mid.x - 3.0).abs() < EPS);
        e.advance(0.6);
        assert!(!e.is_animating(target));
        assert_eq!(e.value(target, 0), Some(Vec3::new(6.0, 3.0, 1.5)));
    }

    #[test]
    fn overlapping_relative_tweens_compose() {
        let mut e = TweenEngine::new();
        let target = TargetId::ObjectRotation(1);
        let timing = Timing::new(1.0, Ease::Power2InOut);
        e.animate_relative(target, Vec3::X, timing);
        e.advance(0.3);
        e.animate_relative(target, Vec3::X, timing);
        e.advance(2.0);
        let v = e.value(target, 0).unwrap();
        assert!((v.x - 2.0).abs() < EPS);
    }

    #[test]
    fn staggered_channels_start_in_order() {
        let mut e = TweenEngine::new();
        let target = TargetId::TitleLetters(0);
        e.animate_staggered(target, 3, Vec3::ZERO, Vec3::ONE, Timing::new(0.5, Ease::Linear), 0.1);
        assert_eq!(e.value(target, 2), Some(Vec3::ZERO));
        e.advance(0.15);
        let a = e.value(target, 0).unwrap().x;
        let b = e.value(target, 1).unwrap().x;
        let c = e.value(target, 2).unwrap().x;
        assert!(a > b && b > c);
        assert_eq!(c, 0.0);
        e.advance(1.0);
        assert_eq!(e.active_count(), 0);
        assert_eq!(e.value(target, 2), Some(Vec3::ONE));
        assert_eq!(e.value(target, 3), None);
    }

    #[test]
    fn cancel_is_idempotent_and_freezes_values() {
        let mut e = TweenEngine::new();
        let target = TargetId::ObjectRotation(2);
        assert_eq!(e.cancel(target), 0);
        e.animate_relative(target, Vec3::Y * 2.0, Timing::new(1.0, Ease::Linear));
        e.advance(0.25);
        assert_eq!(e.cancel(target), 1);
        assert_eq!(e.cancel(target), 0);
        let frozen = e.value(target, 0).unwrap();
        e.advance(1.0);
        assert_eq!(e.value(target, 0).unwrap(), frozen);
        assert!((frozen.y - 0.5).abs() < EPS);
    }
}
