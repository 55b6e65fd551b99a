#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use anyhow::{anyhow, Context};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use squart::{
    campaign::{FileStore, PersistentCampaign, EXTRA_CITY_ID},
    cli::{coord_to_string, parse_coord, print_board, render_campaign, status_line},
    init_logging, BoardConfig, FairnessPolicy, GameEngine, GameStatus, Orientation,
};

#[derive(Parser)]
#[command(author, version, about = "Domino tiling duel on seeded boards", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone, Debug)]
#[cfg(feature = "std")]
struct BoardArgs {
    #[arg(long, default_value_t = 8)]
    rows: usize,
    #[arg(long, default_value_t = 8)]
    cols: usize,
    #[arg(long, help = "Seed string for reproducible boards (e.g., --seed city-42)")]
    seed: Option<String>,
    #[arg(long, help = "Inactive percentage of the playable area (0-90)")]
    inactive: Option<f64>,
    #[arg(long, help = "Regenerate unseeded boards until both sides have similar move counts")]
    balanced: bool,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Generate a board and print it.
    Generate {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long, help = "Print the board snapshot as JSON")]
        json: bool,
    },
    /// Play a hot-seat game in the terminal.
    Play {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Inspect or advance the story campaign.
    Campaign {
        #[arg(long, default_value = ".squart")]
        store: PathBuf,
        #[command(subcommand)]
        action: CampaignAction,
    },
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum CampaignAction {
    /// Show cities, neighborhoods and their status.
    Status,
    /// Record the result of a mission.
    Complete {
        city: String,
        neighborhood: String,
        #[arg(long, value_enum, default_value_t = WinnerArg::Draw)]
        winner: WinnerArg,
    },
    /// Forget all progress.
    Reset,
    /// Print the board of a mission.
    Board {
        city: String,
        neighborhood: String,
        #[arg(long)]
        seed: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum WinnerArg {
    Horizontal,
    Vertical,
    Draw,
}

#[cfg(feature = "std")]
impl WinnerArg {
    fn orientation(self) -> Option<Orientation> {
        match self {
            WinnerArg::Horizontal => Some(Orientation::Horizontal),
            WinnerArg::Vertical => Some(Orientation::Vertical),
            WinnerArg::Draw => None,
        }
    }
}

#[cfg(feature = "std")]
fn engine_for(args: &BoardArgs) -> anyhow::Result<GameEngine> {
    let config = BoardConfig::builder(args.rows, args.cols)
        .maybe_seed(args.seed.clone())
        .maybe_inactive_percentage(args.inactive)
        .build()?;
    let engine = if args.balanced {
        GameEngine::balanced(&config, &FairnessPolicy::default())?
    } else {
        GameEngine::new(&config)?
    };
    Ok(engine)
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { board, json } => {
            let engine = engine_for(&board)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            } else {
                describe(&engine);
            }
        }
        Commands::Play { board } => {
            let engine = engine_for(&board)?;
            play(engine)?;
        }
        Commands::Campaign { store, action } => {
            let mut campaign = PersistentCampaign::open(FileStore::new(store))?;
            match action {
                CampaignAction::Status => print!("{}", render_campaign(&campaign.campaign().view())),
                CampaignAction::Complete {
                    city,
                    neighborhood,
                    winner,
                } => {
                    campaign.record_result(&city, &neighborhood, winner.orientation())?;
                    print!("{}", render_campaign(&campaign.campaign().view()));
                }
                CampaignAction::Reset => {
                    campaign.reset()?;
                    println!("Campaign progress cleared.");
                }
                CampaignAction::Board {
                    city,
                    neighborhood,
                    seed,
                } => {
                    let mission = campaign
                        .campaign()
                        .mission(&city, &neighborhood)
                        .ok_or_else(|| anyhow!("no mission {}/{}", city, neighborhood))?;
                    if city != EXTRA_CITY_ID {
                        println!("{}: {}", mission.def.name, mission.def.intro);
                    }
                    let engine = GameEngine::new(&mission.def.board_config(seed.as_deref())?)?;
                    describe(&engine);
                }
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn describe(engine: &GameEngine) {
    let board = engine.board();
    let (h, v) = engine.move_counts();
    if let Some(seed) = board.seed() {
        println!("Seed: {}", seed);
    }
    println!(
        "{}x{}, {} playable, {} inactive ({:.1}%), moves H {} / V {}",
        board.rows(),
        board.cols(),
        board.playable_square_count(),
        board.inactive_count(),
        board.actual_inactive_percentage(),
        h,
        v
    );
    print_board(board);
    println!("{}", status_line(board));
}

#[cfg(feature = "std")]
fn play(mut engine: GameEngine) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while engine.status() == GameStatus::Active {
        describe(&engine);
        let Some(player) = engine.current_player() else {
            break;
        };
        print!("{} anchor (e.g. C4, ? for hints, q to quit): ", player);
        io::stdout().flush().context("flushing prompt")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("reading move")?;
        let input = line.trim();
        match input {
            "q" | "quit" => return Ok(()),
            "?" => {
                let hints: Vec<String> = squart::available_moves(engine.board(), player)
                    .into_iter()
                    .map(coord_to_string)
                    .collect();
                println!("Legal anchors: {}", hints.join(" "));
            }
            _ => match parse_coord(input) {
                Some(anchor) => {
                    if engine.play(anchor).is_none() {
                        println!("Cannot place a {} domino at {}.", player, input);
                    }
                }
                None => println!("Could not read '{}'.", input),
            },
        }
    }
    describe(&engine);
    Ok(())
}
