use rand::Rng;
use std::time::{Duration, Instant};
use tracing::debug;

const CONFETTI_PIECES: usize = 120;
const CONFETTI_SYMBOLS: [char; 5] = ['●', '■', '▲', '◆', '*'];
pub const CONFETTI_COLORS: usize = 4;
const DEFAULT_DURATION: Duration = Duration::from_secs(5);
const BANNER: &str = "PERFECT!";

/// One piece of confetti, or one letter of the banner
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    /// rows per second
    pub speed: f64,
    pub symbol: char,
    pub color_index: usize,
    pub is_text: bool,
    pub target_y: f64,
}

impl ConfettiPiece {
    fn falling<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen_range(0.0..width.max(1.0)),
            // start anywhere in the screen-sized band above the top edge
            y: rng.gen_range(-height.max(1.0)..0.0),
            speed: rng.gen_range(2.0..5.0),
            symbol: CONFETTI_SYMBOLS[rng.gen_range(0..CONFETTI_SYMBOLS.len())],
            color_index: rng.gen_range(0..CONFETTI_COLORS),
            is_text: false,
            target_y: 0.0,
        }
    }

    fn letter(symbol: char, x: f64, target_y: f64, color_index: usize) -> Self {
        Self {
            x,
            y: -1.0,
            speed: 6.0,
            symbol,
            color_index,
            is_text: true,
            target_y,
        }
    }

    /// Move one step. Falling pieces that leave the bottom come back at the top.
    fn step<R: Rng>(&mut self, dt: f64, width: f64, height: f64, rng: &mut R) {
        if self.is_text {
            self.y = (self.y + self.speed * dt).min(self.target_y);
            return;
        }

        self.y += self.speed * dt;
        if self.y > height {
            self.y = -1.0;
            self.x = rng.gen_range(0.0..width.max(1.0));
        }
    }
}

/// Confetti shower shown over the summary after a perfect score.
///
/// Purely cosmetic: it owns its own clock and switches itself off after
/// `duration`, independent of anything the user does in the meantime.
#[derive(Debug)]
pub struct CelebrationAnimation {
    pub pieces: Vec<ConfettiPiece>,
    pub started_at: Option<Instant>,
    pub duration: Duration,
    pub is_active: bool,
    pub width: f64,
    pub height: f64,
}

impl CelebrationAnimation {
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            started_at: None,
            duration: DEFAULT_DURATION,
            is_active: false,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::new()
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.width = width as f64;
        self.height = height as f64;
        self.pieces.clear();
        self.started_at = Some(Instant::now());
        self.is_active = true;

        for _ in 0..CONFETTI_PIECES {
            self.pieces
                .push(ConfettiPiece::falling(&mut rng, self.width, self.height));
        }
        self.spell_banner(&mut rng);

        debug!(pieces = self.pieces.len(), "celebration started");
    }

    fn spell_banner<R: Rng>(&mut self, rng: &mut R) {
        let spacing = 2.0;
        let banner_width = (BANNER.chars().count() as f64 - 1.0) * spacing;
        let left = (self.width - banner_width) / 2.0;
        let row = (self.height / 2.0 - 2.0).max(0.0);

        for (i, ch) in BANNER.chars().enumerate() {
            let color = rng.gen_range(0..CONFETTI_COLORS);
            self.pieces.push(ConfettiPiece::letter(
                ch,
                left + i as f64 * spacing,
                row,
                color,
            ));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.started_at = None;
        self.pieces.clear();
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Advance the animation by one tick of `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        if self.elapsed() >= self.duration {
            debug!("celebration finished");
            self.stop();
            return;
        }

        let mut rng = rand::thread_rng();
        let (width, height) = (self.width, self.height);
        for piece in &mut self.pieces {
            piece.step(dt, width, height, &mut rng);
        }
    }
}

impl Default for CelebrationAnimation {
    fn default() -> Self {
        Self::new()
    }
}
