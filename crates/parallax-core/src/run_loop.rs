//! Explicit frame loop.
//!
//! The host calls [`RunLoop::tick`] once per display refresh and schedules
//! the next call itself (on the web, via `requestAnimationFrame`). Time comes
//! from a [`Clock`], so tests can drive frames with a [`ManualClock`].

use crate::color::Rgb;
use crate::coordinator::{Coordinator, FrameSnapshot, SectionChange};
use crate::state::{ProjectionUpdate, Viewport};
use crate::tween::TweenEngine;
use instant::Instant;
use std::cell::Cell;
use std::fmt::Debug;
use std::ops::ControlFlow;
use std::rc::Rc;

/// Monotonic seconds since the page loaded.
pub trait Clock {
    fn elapsed(&self) -> f32;
}

pub struct InstantClock {
    start: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock set by hand. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f32) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f32) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f32 {
        self.now.get()
    }
}

/// Draws frame snapshots.
pub trait Presenter {
    type Error: Debug;

    fn present(&mut self, frame: &FrameSnapshot) -> Result<(), Self::Error>;

    fn resize(&mut self, _update: &ProjectionUpdate) {}
}

pub struct RunLoop<C: Clock, P: Presenter> {
    coordinator: Coordinator,
    tweens: TweenEngine,
    clock: C,
    presenter: P,
    frames: u64,
}

impl<C: Clock, P: Presenter> RunLoop<C, P> {
    pub fn new(coordinator: Coordinator, clock: C, presenter: P) -> Self {
        Self {
            coordinator,
            tweens: TweenEngine::new(),
            clock,
            presenter,
            frames: 0,
        }
    }

    /// Fire the startup title animation.
    pub fn start(&mut self) {
        self.coordinator.start(&mut self.tweens);
    }

    /// Run one frame. Never breaks: the loop lives as long as the page.
    pub fn tick(&mut self) -> ControlFlow<()> {
        let elapsed = self.clock.elapsed();
        let dt = self.coordinator.state().delta_to(elapsed);
        self.tweens.advance(dt);
        let snapshot = self.coordinator.frame(elapsed, &self.tweens);
        if let Err(e) = self.presenter.present(&snapshot) {
            log::error!("render error: {:?}", e);
        }
        self.frames += 1;
        ControlFlow::Continue(())
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.coordinator.on_pointer_move(client_x, client_y);
    }

    pub fn on_scroll(&mut self, scroll_y: f32) -> Option<SectionChange> {
        self.coordinator.on_scroll(scroll_y, &mut self.tweens)
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> ProjectionUpdate {
        let update = self.coordinator.on_resize(viewport);
        self.presenter.resize(&update);
        update
    }

    pub fn set_material_color(&mut self, color: Rgb) {
        self.coordinator.set_material_color(color);
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn tweens(&self) -> &TweenEngine {
        &self.tweens
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
