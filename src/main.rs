use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tictactoe::bot::RandomSelector;
use tictactoe::controller::{GameController, GameEvent, GameObserver, Outcome, Status};
use tictactoe::game::{GameError, GameState, Mark, Player, PlayerKind, Position};
use tictactoe::storage::{FileStore, SaveStore};

const SAVE_KEY: &str = "game.json";

#[derive(Parser, Debug)]
#[command(about = "Play tic-tac-toe against a random bot in the terminal")]
struct Args {
    /// Side length of the grid
    #[arg(long, default_value_t = 3)]
    grid_size: usize,
    /// Play as o instead of x (you still move first)
    #[arg(long)]
    play_as_o: bool,
    /// Directory the autosave lives in
    #[arg(long, default_value = ".tictactoe")]
    save_dir: PathBuf,
    /// Ignore and drop any autosave
    #[arg(long)]
    fresh: bool,
}

/// Prints every event as it happens.
struct Announcer;

impl GameObserver for Announcer {
    fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::CellOccupied { position, mark } => println!("{mark} takes {position}"),
            GameEvent::GameEnded(Outcome::Win(mark)) => println!("{mark} wins"),
            GameEvent::GameEnded(Outcome::Draw) => println!("a draw"),
        }
    }
}

fn render(state: &GameState) {
    for row in 0..state.grid_size() {
        for col in 0..state.grid_size() {
            match state.mark_at(Position::new(row, col)) {
                Some(mark) => print!("[{mark}]"),
                None => print!("[ ]"),
            }
        }
        println!();
    }
}

fn parse_position(line: &str) -> Option<Position> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Position::new(row, col))
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::new(&args.save_dir);
    if args.fresh {
        store.delete(SAVE_KEY)?;
    }

    let mut controller =
        match GameController::resume_from(&mut store, SAVE_KEY, RandomSelector::new())? {
            Some(controller) => {
                println!("resuming the saved game");
                controller
            }
            None => {
                let mark = if args.play_as_o { Mark::O } else { Mark::X };
                let state = GameState::new(
                    args.grid_size,
                    Player::new(mark, PlayerKind::Human),
                    Player::new(mark.other(), PlayerKind::Bot),
                )?;
                GameController::new(state, RandomSelector::new())
            }
        };

    let stdin = io::stdin();
    loop {
        render(controller.state());
        let Status::Turn(mark) = controller.status() else {
            break;
        };

        print!("{mark} to move (row col, or q to quit): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim() == "q" {
            controller.save_to(&mut store, SAVE_KEY)?;
            println!("saved");
            return Ok(());
        }
        let Some(position) = parse_position(&line) else {
            println!("enter two numbers, e.g. `0 2`");
            continue;
        };

        match controller.submit(position, &mut Announcer) {
            Ok(_) => controller.save_to(&mut store, SAVE_KEY)?,
            Err(err @ (GameError::OutOfBounds { .. } | GameError::CellIsOccupied { .. })) => {
                println!("{err}")
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
