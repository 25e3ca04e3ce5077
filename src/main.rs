use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use eight_puzzle::{PuzzleState, SearchEngine, SearchError, StepOutcome, StepReport};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Greedy heuristic solver for the 8-puzzle", long_about = None)]
struct Args {
    /// Seed for a reproducible puzzle
    #[clap(short, long)]
    seed: Option<u64>,

    /// Run to completion without prompting
    #[clap(short, long)]
    auto: bool,

    /// Give up after this many steps in --auto mode
    #[clap(short, long)]
    max_steps: Option<usize>,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut engine = match args.seed {
        Some(seed) => SearchEngine::with_seed(seed),
        None => SearchEngine::new(),
    };

    if args.auto {
        println!("Initial puzzle:\n{}", engine.current());
        let result = match args.max_steps {
            Some(limit) => engine.run_bounded(limit),
            None => engine.run_to_completion(),
        };
        print_result(&result, engine.current());
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut message = String::from("New puzzle generated.");

    loop {
        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        render(engine.current(), engine.is_done());
        println!("{}\n", message);
        println!("1) Step  2) Run to completion  3) Reset  4) Quit");
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };

        message = match line?.trim() {
            "1" => describe(&engine.step()),
            "2" => describe(&engine.run_to_completion()),
            "3" => {
                engine.reset();
                String::from("New puzzle generated.")
            }
            "4" | "q" => break,
            other => format!("Unknown command '{}'.", other),
        };
    }

    Ok(())
}

fn render(state: &PuzzleState, done: bool) {
    println!("{}", state);
    let status = if done {
        "SOLVED".green().bold()
    } else {
        "SEARCHING".yellow()
    };
    println!(
        "Depth: {}  Heuristic: {}  Status: {}\n",
        state.depth(),
        state.heuristic(),
        status
    );
}

fn describe(result: &Result<StepReport, SearchError>) -> String {
    match result {
        Ok(report) => {
            let movement = report
                .movement
                .map(|m| format!(" ({})", m))
                .unwrap_or_default();
            match report.outcome {
                StepOutcome::AlreadySolved => String::from("Puzzle is already solved."),
                StepOutcome::Advanced => format!("Moved{}.", movement),
                StepOutcome::Solved if report.steps > 1 => {
                    format!("Solved after {} steps.", report.steps)
                }
                StepOutcome::Solved => format!("Moved{} and solved the puzzle.", movement),
                StepOutcome::Backtracked => format!("No forward move; backtracked{}.", movement),
            }
        }
        Err(e) => format!("{}", e.to_string().red()),
    }
}

fn print_result(result: &Result<StepReport, SearchError>, state: &PuzzleState) {
    println!("{}", describe(result));
    render(state, state.is_goal());
}
