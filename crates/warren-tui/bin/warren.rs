//! Warren, a dungeon crawl in a walled arena
//!
//! Main entry point for the game.

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use warren_core::config::ArenaConfig;
use warren_core::{ARENA_HEIGHT, ARENA_WIDTH, GameRng, GameSession};
use warren_tui::{App, Theme};

/// Polling timeout, which doubles as the frame budget.
const FRAME_BUDGET: Duration = Duration::from_millis(33);

/// Warren - fight the warren and clear its levels
#[derive(Parser, Debug)]
#[command(name = "warren")]
#[command(author, version, about = "Warren - fight the warren and clear its levels", long_about = None)]
struct Args {
    /// RNG seed; identical seeds replay identical runs
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Arena width in tiles
    #[arg(long = "width", default_value_t = ARENA_WIDTH)]
    width: i32,

    /// Arena height in tiles
    #[arg(long = "height", default_value_t = ARENA_HEIGHT)]
    height: i32,

    /// Force light-background colors
    #[arg(long = "light")]
    light: bool,
}

fn main() -> io::Result<()> {
    // Parse command-line arguments before terminal setup
    let args = Args::parse();

    let config = ArenaConfig::new(args.width, args.height);
    let seed = args.seed.unwrap_or_else(|| GameRng::from_entropy().seed());
    let session = match GameSession::new(config, seed) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("warren: {err}");
            std::process::exit(2);
        }
    };

    let theme = if args.light {
        Theme::light()
    } else {
        Theme::detect()
    };
    let mut app = App::new(session, theme);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop: draw, poll for input, then step the simulation by the
    // measured frame time.
    let mut last_frame = Instant::now();
    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(FRAME_BUDGET)? {
            if let Some(action) = app.handle_event(event::read()?) {
                app.act(action);
            }
        }

        let now = Instant::now();
        // A stall (suspend, debugger, resize storm) must not land as one
        // giant timestep.
        let dt = now.duration_since(last_frame).as_secs_f32().min(0.25);
        last_frame = now;
        app.advance(dt);
    }

    // Terminal teardown
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
