/// Tick source for the orrery.
///
/// The engine itself has no notion of time: it advances once per request.
/// A host that has wall-clock frame deltas instead can feed them through
/// `accumulate`, which turns them into a whole number of fixed ticks.
pub struct AnimationClock {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Ticks handed out so far.
    ticks: u64,
}

impl AnimationClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Grant exactly one tick. Returns its 1-based number.
    pub fn request_tick(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }

    /// Add frame time to the accumulator. Returns the number of fixed ticks due.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if self.dt.is_nan() || self.dt <= 0.0 || !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 ticks per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
