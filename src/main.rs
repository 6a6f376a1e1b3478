//! Gomoku AI Engine CLI
//!
//! Query the engine on a position, watch it play itself, or play against it
//! in the terminal.
//!
//! ```bash
//! gomoku best-move --moves "7,7 7,8 8,8"
//! gomoku --depth 3 --parallel self-play --max-moves 40
//! gomoku --config engine.toml play --color white
//! RUST_LOG=debug gomoku play
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use gomoku::eval::{evaluate_with, scan_patterns, PatternKind};
use gomoku::{
    AIEngine, Board, EngineConfig, GameError, GameOutcome, GameSession, MoveResult, Phase, Pos,
    Stone,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Gomoku engine with fixed-depth alpha-beta search")]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the search depth
    #[arg(short, long, global = true)]
    depth: Option<u8>,

    /// Search root moves in parallel
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay moves (alternating from Black) and print the engine's choice
    BestMove {
        /// Space-separated "row,col" moves
        #[arg(short, long, default_value = "")]
        moves: String,

        /// Side to search for; defaults to the side to move
        #[arg(short, long)]
        side: Option<SideArg>,
    },
    /// Let the engine play both sides
    SelfPlay {
        #[arg(long, default_value_t = 225)]
        max_moves: usize,
    },
    /// Play against the engine on stdin
    Play {
        /// Your color; asked interactively when omitted
        #[arg(long)]
        color: Option<SideArg>,
    },
    /// Print the effective configuration as TOML
    PrintConfig,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SideArg {
    Black,
    White,
}

impl From<SideArg> for Stone {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Black => Stone::Black,
            SideArg::White => Stone::White,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::BestMove { moves, side } => best_move(config, &moves, side),
        Command::SelfPlay { max_moves } => self_play(config, max_moves),
        Command::Play { color } => play(config, color),
        Command::PrintConfig => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = cli.depth {
        config.depth = depth;
    }
    if cli.parallel {
        config.parallel = true;
    }
    config.validate()?;
    Ok(config)
}

fn replay(moves: &str) -> Result<Board> {
    let mut board = Board::new();
    let mut side = Stone::Black;
    for token in moves.split_whitespace() {
        let pos: Pos = token.parse()?;
        board
            .place(pos, side)
            .with_context(|| format!("replaying move {token}"))?;
        side = side.opponent();
    }
    Ok(board)
}

fn print_result(side: Stone, result: &MoveResult) {
    match result.best_move {
        Some(m) => println!("  {side} plays: {m}"),
        None => println!("  {side} has no move"),
    }
    println!("  Score: {}", result.score);
    println!("  Search type: {:?}", result.search_type);
    println!("  Nodes: {}", result.nodes);
    println!("  Time: {}ms", result.time_ms);
}

fn print_patterns(board: &Board, config: &EngineConfig) {
    let counts = scan_patterns(board);
    for (side, side_counts) in [Stone::Black, Stone::White].into_iter().zip(counts) {
        let listed: Vec<String> = PatternKind::ALL
            .iter()
            .filter(|&&k| side_counts.get(k) > 0)
            .map(|&k| format!("{k:?}x{}", side_counts.get(k)))
            .collect();
        println!(
            "  {side}: eval {} [{}]",
            evaluate_with(board, side, &config.weights),
            listed.join(", ")
        );
    }
}

fn best_move(config: EngineConfig, moves: &str, side: Option<SideArg>) -> Result<()> {
    let board = replay(moves)?;
    let side = side.map_or_else(|| board.side_to_move(), Stone::from);

    println!("{board}");
    print_patterns(&board, &config);

    let mut engine = AIEngine::with_config(config)?;
    let result = engine.get_move_with_stats(&board, side);
    print_result(side, &result);
    Ok(())
}

fn self_play(config: EngineConfig, max_moves: usize) -> Result<()> {
    let mut engine = AIEngine::with_config(config)?;
    let mut board = Board::new();
    let mut side = Stone::Black;

    for ply in 1..=max_moves {
        let result = engine.get_move_with_stats(&board, side);
        let Some(pos) = result.best_move else {
            break;
        };
        board.place(pos, side)?;
        println!(
            "{ply:>3}. {side} {pos} score={} {:?} nodes={} {}ms",
            result.score, result.search_type, result.nodes, result.time_ms
        );

        if board.has_five_at(pos) {
            println!("\n{board}\n{side} wins");
            return Ok(());
        }
        if board.is_full() {
            break;
        }
        side = side.opponent();
    }

    println!("\n{board}");
    if board.is_full() {
        println!("Draw");
    } else {
        println!("Stopped after {max_moves} moves");
    }
    Ok(())
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn parse_color(text: &str) -> Option<Stone> {
    match text.to_ascii_lowercase().as_str() {
        "b" | "black" | "x" => Some(Stone::Black),
        "w" | "white" | "o" => Some(Stone::White),
        _ => None,
    }
}

fn play(config: EngineConfig, color: Option<SideArg>) -> Result<()> {
    let mut session = GameSession::new(AIEngine::with_config(config)?);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut preset = color.map(Stone::from);

    loop {
        match session.phase() {
            Phase::AwaitingColorChoice => {
                let color = match preset.take() {
                    Some(color) => color,
                    None => {
                        let Some(answer) = prompt(&mut lines, "Play black or white? ")? else {
                            return Ok(());
                        };
                        match parse_color(&answer) {
                            Some(color) => color,
                            None => continue,
                        }
                    }
                };
                session.choose_color(color)?;
            }
            Phase::HumanTurn => {
                println!("{}", session.board());
                let Some(answer) = prompt(&mut lines, "Your move (row,col), or quit: ")? else {
                    return Ok(());
                };
                if answer.eq_ignore_ascii_case("quit") {
                    return Ok(());
                }
                let played = answer
                    .parse::<Pos>()
                    .and_then(|pos| session.play_human(pos));
                if let Err(e) = played {
                    println!("  {e}");
                }
            }
            Phase::AiTurn => match session.play_ai() {
                Ok(result) => {
                    if let Some(side) = session.ai_color() {
                        print_result(side, &result);
                    }
                }
                Err(GameError::NoLegalMove) => {}
                Err(e) => return Err(e.into()),
            },
            Phase::GameOver(outcome) => {
                println!("{}", session.board());
                match outcome {
                    GameOutcome::HumanWins => println!("You win!"),
                    GameOutcome::AiWins => println!("The engine wins."),
                    GameOutcome::Draw => println!("Draw."),
                }
                if let Some(line) = session.winning_line() {
                    let cells: Vec<String> = line.iter().map(ToString::to_string).collect();
                    println!("  Winning line: {}", cells.join(" "));
                }

                let Some(answer) = prompt(&mut lines, "Play again? [y/N] ")? else {
                    return Ok(());
                };
                if !answer.eq_ignore_ascii_case("y") {
                    return Ok(());
                }
                session.restart();
            }
        }
    }
}
