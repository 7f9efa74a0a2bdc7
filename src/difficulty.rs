use log::info;

/// Tick-interval ("speed") progression. Lower speed means faster play.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Difficulty {
    speed: u32,
    min_speed: u32,
    slowest_speed: Option<u32>,
    step: u32,
    growth_cadence: usize,
}

impl Difficulty {
    /// `min_speed` is the fastest allowed interval; `slowest_speed` caps
    /// slow-downs when set.
    #[must_use]
    pub fn new(
        initial_speed: u32,
        min_speed: u32,
        slowest_speed: Option<u32>,
        step: u32,
        growth_cadence: usize,
    ) -> Self {
        Self {
            speed: initial_speed.max(min_speed),
            min_speed,
            slowest_speed,
            step,
            growth_cadence: growth_cadence.max(1),
        }
    }

    /// Frames that must elapse before the next step.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Speeds up on every `growth_cadence`-th segment. Returns true when the
    /// interval changed.
    pub fn on_growth(&mut self, length: usize) -> bool {
        if self.speed == self.min_speed || length % self.growth_cadence != 0 {
            return false;
        }

        self.speed = self.speed.saturating_sub(self.step).max(self.min_speed);
        info!("length {length}: speed up to {}", self.speed);
        true
    }

    /// Slows down by twice the step. Returns true when the interval changed.
    pub fn on_self_collision(&mut self) -> bool {
        let slowed = self.speed.saturating_add(self.step.saturating_mul(2));
        let slowed = match self.slowest_speed {
            Some(ceiling) => slowed.min(ceiling.max(self.speed)),
            None => slowed,
        };

        if slowed == self.speed {
            return false;
        }

        self.speed = slowed;
        info!("self-collision: slow down to {}", self.speed);
        true
    }
}
