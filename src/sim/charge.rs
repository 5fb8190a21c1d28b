// Bow draw: hold duration -> normalized charge -> launch speed.

/// Piecewise draw curve. Fast to 0.7 in the first second, 0.25 more over
/// the next, and the last 0.05 over the third.
pub fn charge_amount(elapsed: f32) -> f32 {
    if elapsed <= 0.0 {
        return 0.0;
    }
    let amount = if elapsed < 1.0 {
        (0.7 * elapsed).min(0.7)
    } else if elapsed < 2.0 {
        0.7 + 0.25 * (elapsed - 1.0)
    } else {
        0.95 + 0.05 * (elapsed - 2.0).min(1.0)
    };
    amount.min(1.0)
}

/// Launch speed for a release at `amount` (3..21 m/s with the default 30 m/s base).
pub fn launch_speed(base_speed: f32, amount: f32) -> f32 {
    base_speed * (0.1 + amount * 0.6)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChargeState {
    pub charging: bool,
    pub start_time: f32,
    pub amount: f32, // 0..1
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeRelease {
    /// Nothing was being drawn.
    Idle,
    /// Released below the minimum draw; no arrow.
    TooShort,
    Fire(f32),
}

impl ChargeState {
    /// Returns false when a draw is already in progress.
    pub fn start(&mut self, now: f32) -> bool {
        if self.charging {
            return false;
        }
        self.charging = true;
        self.start_time = now;
        self.amount = 0.0;
        true
    }

    pub fn update(&mut self, now: f32) {
        if self.charging {
            self.amount = charge_amount(now - self.start_time);
        }
    }

    /// Consumes the draw. The state is idle afterwards whatever the outcome.
    pub fn release(&mut self, min_amount: f32) -> ChargeRelease {
        let outcome = if !self.charging {
            ChargeRelease::Idle
        } else if self.amount < min_amount {
            ChargeRelease::TooShort
        } else {
            ChargeRelease::Fire(self.amount)
        };
        self.cancel();
        outcome
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn gauge_percent(&self) -> f32 {
        self.amount * 100.0
    }
}
