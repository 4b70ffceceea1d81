//! Teacher-forced / autoregressive step boundary

/// Where the window of a forecast step comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepRegime {
    /// Window taken from the seed data
    TeacherForced,
    /// Window contains at least one prior prediction
    Autoregressive,
}

impl StepRegime {
    /// Regime of the window used at `step` for a seed of `seed_len` windows.
    pub fn of(step: usize, seed_len: usize) -> Self {
        if step < seed_len {
            StepRegime::TeacherForced
        } else {
            StepRegime::Autoregressive
        }
    }

    /// Whether the prediction of `step` is fed back into the next window,
    /// i.e. `step > seed_len - 2`.
    pub fn feeds_back(step: usize, seed_len: usize) -> bool {
        step + 2 > seed_len
    }
}
