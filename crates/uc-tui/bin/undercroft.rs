//! Undercroft dungeon crawler.
//!
//! Main entry point for the terminal front end.

use std::io;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use uc_core::dungeon::GenConfig;
use uc_core::party::PartyLedger;
use uc_core::snapshot::{default_snapshot_path, load_ledger, save_ledger};
use uc_core::{DEFAULT_ROOM_TARGET, DEFAULT_SPECIAL_TARGET, GRID_SIZE, GameRng, MIN_GRID_SIZE};
use uc_tui::icons::{GlyphArt, GraphicsMode};
use uc_tui::theme::Theme;
use uc_tui::App;

/// Undercroft - first-person dungeon crawler
#[derive(Parser, Debug)]
#[command(name = "undercroft")]
#[command(author, version, about = "Undercroft - delve the dungeon!", long_about = None)]
struct Args {
    /// Seed for in-level events (teleports, loot rolls). Level layouts
    /// are always derived from the depth and are not affected.
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Edge length of the square level grid
    #[arg(
        long = "size",
        default_value_t = GRID_SIZE,
        value_parser = clap::value_parser!(i32).range(MIN_GRID_SIZE as i64..=128),
    )]
    size: i32,

    /// Number of rooms the generator aims for per level
    #[arg(long = "rooms", default_value_t = DEFAULT_ROOM_TARGET)]
    rooms: usize,

    /// Number of weighted special-tile rolls per level
    #[arg(long = "specials", default_value_t = DEFAULT_SPECIAL_TARGET)]
    specials: usize,

    /// Start with the whole map revealed
    #[arg(short = 'X', long = "reveal")]
    reveal: bool,

    /// Glyph set: classic, fancy or auto
    #[arg(long = "graphics", default_value = "auto", value_parser = parse_graphics)]
    graphics: GraphicsMode,

    /// Force the light-background color theme
    #[arg(long = "light")]
    light: bool,

    /// Start from a fresh ledger, ignoring any saved one
    #[arg(long = "fresh")]
    fresh: bool,
}

fn parse_graphics(s: &str) -> Result<GraphicsMode, String> {
    GraphicsMode::from_str(s).map_err(|_| format!("unknown graphics mode: {s}"))
}

/// Starting stats for a fresh delve.
const START_HP: i64 = 30;
const START_GOLD: i64 = 0;

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Restore the party ledger from the last run unless asked not to.
    let snapshot_path = default_snapshot_path().ok();
    let mut party = if args.fresh {
        PartyLedger::new_delve(START_HP, START_GOLD)
    } else {
        snapshot_path
            .as_deref()
            .and_then(|path| load_ledger(path).ok())
            .unwrap_or_else(|| PartyLedger::new_delve(START_HP, START_GOLD))
    };

    let config = GenConfig {
        size: args.size,
        room_target: args.rooms,
        special_target: args.specials,
    };
    let events = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    let mut session = uc_core::DungeonSession::new(config, events, &mut party);
    if args.reveal {
        session.visibility.set_reveal_all(true);
    }

    let theme = Theme::detect(args.light);
    let art = GlyphArt::new(args.graphics);
    let mut app = App::new(session, party, theme, art);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let evt = event::read()?;
            if let Some(command) = app.handle_event(evt) {
                app.execute(command);
            }
            if app.should_quit() {
                break;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Persist the ledger for the next run.
    if let Some(path) = snapshot_path {
        if let Err(e) = save_ledger(app.party(), &path) {
            eprintln!("Failed to save ledger: {e}");
        }
    }

    Ok(())
}
