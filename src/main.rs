use rand::SeedableRng;
use rand::rngs::StdRng;
use rosco::cli::{CliInterface, parse_cli};
use rosco::session::{GameError, Session, game_loop};
use rosco::timer::SystemClock;
use rosco::tui::TuiInterface;
use rosco::{bank, logging};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    // The full-screen interface owns the terminal, so stay quiet unless asked
    let default_filter = if cli.plain || cli.log_file.is_some() {
        "warn"
    } else {
        "off"
    };
    if let Err(e) = logging::init(default_filter, cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    let pool = match bank::load_pool(cli.bank_path.as_deref()) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{}", GameError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = match Session::new(pool, cli.session_config(), SystemClock, rng) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", GameError::from(e));
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Starting game with {} letters",
        session.state().total_questions()
    );

    let result = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut session, &mut interface)
    } else {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&mut session, &mut interface),
            Err(e) => {
                eprintln!("Failed to initialize terminal: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

