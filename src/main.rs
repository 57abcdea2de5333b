use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use kwiz::{
    app::{App, KeyAction},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, QuizEventSource, Runner, Ticker},
    store::BundledStore,
    ui,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::info;

/// gamified multiple-choice quiz in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Answer multiple-choice questions one at a time, earn levels and badges, keep your streak alive, and review every answer at the end."
)]
pub struct Cli {
    /// bundled question set to play (see --list)
    #[clap(short = 'q', long)]
    quiz: Option<String>,

    /// JSON file of questions to play instead of a bundled set
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// list the bundled question sets and exit
    #[clap(long)]
    list: bool,

    /// show confetti after a perfect score (overrides a saved --no-celebration)
    #[clap(long, conflicts_with = "no_celebration")]
    celebration: bool,

    /// skip the confetti after a perfect score
    #[clap(long)]
    no_celebration: bool,

    /// remember the chosen quiz and celebration setting as defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlay the command line on the saved defaults
    fn settings(&self, saved: &Config) -> Config {
        let questions_file = match (&self.file, &self.quiz) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(_)) => None,
            (None, None) => saved.questions_file.clone(),
        };

        Config {
            quiz: self.quiz.clone().unwrap_or_else(|| saved.quiz.clone()),
            questions_file,
            celebrate: match (self.celebration, self.no_celebration) {
                (true, _) => true,
                (_, true) => false,
                _ => saved.celebrate,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list {
        for name in BundledStore::available() {
            println!("{name}");
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        logging::init(&path);
    }

    let store = FileConfigStore::new();
    let settings = cli.settings(&store.load());
    if cli.save_config {
        store.save(&settings)?;
        info!(path = %store.path().display(), "saved config");
    }

    let source = settings.source();
    let mut app = App::from_load(source.load(), source.label(), settings.celebrate);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: QuizEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            QuizEvent::Tick => {
                // only the confetti animates; everything else redraws on input
                if app.celebration.is_active {
                    app.on_tick(runner.tick_secs());
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            QuizEvent::Resize => {
                let size = terminal.size()?;
                app.set_viewport(size.width, size.height);
                terminal.draw(|f| ui::draw(app, f))?;
            }
            QuizEvent::Key(key) => {
                if app.handle_key(key) == KeyAction::Quit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use kwiz::{app::AppState, runtime::TestEventSource, store::DEFAULT_QUIZ};
    use ratatui::backend::TestBackend;
    use std::{sync::mpsc, time::Duration};

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["kwiz"]);
        assert_eq!(cli.quiz, None);
        assert_eq!(cli.file, None);
        assert!(!cli.list);
        assert!(!cli.celebration);
        assert!(!cli.no_celebration);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["kwiz", "-q", "rust", "--no-celebration"]);
        assert_eq!(cli.quiz.as_deref(), Some("rust"));
        assert!(cli.no_celebration);

        let cli = Cli::parse_from(["kwiz", "--file", "questions.json", "--save-config"]);
        assert_eq!(cli.file, Some(PathBuf::from("questions.json")));
        assert!(cli.save_config);
    }

    #[test]
    fn test_settings_fall_back_to_saved_config() {
        let saved = Config {
            quiz: "rust".into(),
            questions_file: None,
            celebrate: true,
        };
        let settings = Cli::parse_from(["kwiz"]).settings(&saved);
        assert_eq!(settings, saved);
    }

    #[test]
    fn test_settings_cli_wins() {
        let saved = Config {
            quiz: "rust".into(),
            questions_file: Some(PathBuf::from("saved.json")),
            celebrate: true,
        };

        let settings = Cli::parse_from(["kwiz", "-q", DEFAULT_QUIZ]).settings(&saved);
        assert_eq!(settings.quiz, DEFAULT_QUIZ);
        assert_eq!(settings.questions_file, None, "explicit quiz drops saved file");

        let settings = Cli::parse_from(["kwiz", "-f", "other.json", "--no-celebration"])
            .settings(&saved);
        assert_eq!(settings.questions_file, Some(PathBuf::from("other.json")));
        assert!(!settings.celebrate);
    }

    #[test]
    fn test_celebration_flag_overrides_saved_opt_out() {
        let saved = Config {
            celebrate: false,
            ..Config::default()
        };
        assert!(!Cli::parse_from(["kwiz"]).settings(&saved).celebrate);
        assert!(Cli::parse_from(["kwiz", "--celebration"]).settings(&saved).celebrate);
        assert!(
            !Cli::parse_from(["kwiz", "--no-celebration"])
                .settings(&Config::default())
                .celebrate
        );
    }

    #[test]
    fn test_celebration_flags_conflict() {
        let err = Cli::try_parse_from(["kwiz", "--celebration", "--no-celebration"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_start_tui_runs_until_escape() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let source = Config::default().source();
        let mut app = App::from_load(source.load(), source.label(), true);

        let (tx, rx) = mpsc::channel();
        for c in ['a', 's'] {
            tx.send(QuizEvent::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            )))
            .unwrap();
        }
        tx.send(QuizEvent::Resize).unwrap();
        tx.send(QuizEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();

        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );
        start_tui(&mut terminal, &mut app, &runner).unwrap();

        assert_eq!(app.state, AppState::Question);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answers().len(), 1);
    }
}
