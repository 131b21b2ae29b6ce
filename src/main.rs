mod app;
mod cli;
mod headless;
mod logging;
mod ui;

use std::io;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use cd_base::clock::SystemClock;
use cd_base::config::constants::{ERRORS_DIR, STORE_DIR};
use cd_base::session::{ChannelSession, SessionConfig};

use app::App;
use app::state::State;

fn main() -> io::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Parse CLI args
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match cli::parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, cli::USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let _log_guard = logging::init_logging()?;

    if args.headless {
        return headless::run(&args, io::stdin().lock(), io::stdout().lock()).map_err(io::Error::other);
    }

    let config = args.timings().and_then(SessionConfig::embedded).map_err(io::Error::other)?;
    let source = args.template_source().map_err(io::Error::other)?;

    // Panic hook: restore terminal state and log the panic to disk.
    // Without this, a panic leaves the terminal in raw mode + alternate screen and the error is lost.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(DisableMouseCapture);
        let _ = io::stdout().execute(LeaveAlternateScreen);

        // Write panic info to .channel-dungeons/errors/panic.log
        let error_dir = std::path::Path::new(STORE_DIR).join(ERRORS_DIR);
        let _ = std::fs::create_dir_all(&error_dir);
        let ts = chrono::Local::now().to_rfc3339();
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("[{}] {}\n\n{}\n\n---\n", ts, info, backtrace);
        let log_path = error_dir.join("panic.log");
        let _ = std::fs::OpenOptions::new().create(true).append(true).open(&log_path).and_then(|mut f| {
            use std::io::Write;
            f.write_all(msg.as_bytes())
        });

        default_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    io::stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let size = terminal.size()?;

    let mut session = ChannelSession::new(config, source, Box::new(SystemClock::new()));
    session.start(&args.entry);

    // Create and run app
    let mut app = App::new(State::new(session, size.width, size.height));
    let result = app.run(&mut terminal);

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
