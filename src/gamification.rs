//! Level and badge labels shown alongside the quiz.
//!
//! Both are derived on demand from the session's canonical counters so they
//! can never drift out of sync with the position or the score.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum_macros::Display)]
pub enum Level {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum_macros::Display)]
pub enum Badge {
    None,
    Learner,
    Expert,
    #[strum(to_string = "Perfect!")]
    Perfect,
}

/// Level for the question at `current_index` (zero based), three questions per tier
pub fn derive_level(current_index: usize) -> Level {
    match current_index + 1 {
        n if n <= 3 => Level::Bronze,
        n if n <= 6 => Level::Silver,
        n if n <= 9 => Level::Gold,
        _ => Level::Platinum,
    }
}

/// Badge for `score` out of `total`, by percentage threshold
pub fn derive_badge(score: usize, total: usize) -> Badge {
    if total == 0 {
        return Badge::None;
    }

    let percent = score as f64 / total as f64 * 100.0;
    if percent >= 100.0 {
        Badge::Perfect
    } else if percent >= 80.0 {
        Badge::Expert
    } else if percent >= 50.0 {
        Badge::Learner
    } else {
        Badge::None
    }
}
