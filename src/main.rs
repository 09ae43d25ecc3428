//! Algoview CLI - Run sorting and searching visualizations in the terminal.

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use algoview::{
    playback::{Role, SearchSession, SortSession, VisualState},
    schema::{PlaybackConfig, SearchAlgorithm, SortAlgorithm},
    trace::{search, sort},
};

const DEFAULT_SIZE: usize = 20;
const DEFAULT_SPEED: u32 = 90;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage(args.first().map(String::as_str).unwrap_or("algoview"));
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "sort" => run_sort(&args[2..]),
        "search" => run_search(&args[2..]),
        "trace" => dump_trace(&args[2..]),
        _ => {
            print_usage(&args[0]);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <command> ...");
    eprintln!();
    eprintln!("Animate classic sorting and searching algorithms step by step.");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  sort <algorithm> [size] [speed]");
    eprintln!("      algorithm: bubble | selection | insertion | merge | quick");
    eprintln!("  search <algorithm> <target> [size] [speed]");
    eprintln!("      algorithm: linear | binary | dfs | bfs");
    eprintln!("  trace sort <algorithm> [size]");
    eprintln!("  trace search <algorithm> <target> [size]");
    eprintln!("      Print the generated event log as JSON instead of animating.");
    eprintln!();
    eprintln!("Defaults: size {DEFAULT_SIZE}, speed {DEFAULT_SPEED} (range 1-100).");
}

/// Random array of `size` values in 5..=104.
fn generate_array(size: usize) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(0..100) + 5).collect()
}

fn run_sort(args: &[String]) -> ExitCode {
    let algorithm: SortAlgorithm = match args[0].parse() {
        Ok(algorithm) => algorithm,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let size: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SIZE);
    let speed: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SPEED);

    let array = generate_array(size);
    println!("Sorting {size} elements with {algorithm} sort");
    println!("Input:  {array:?}");

    let mut session =
        match SortSession::new(array, algorithm, PlaybackConfig::with_speed(speed)) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        };

    let start = Instant::now();
    session.set_running(true, Duration::ZERO);
    println!("Steps:  {}", session.total_steps());
    println!();

    let mut last_step = 0;
    loop {
        let completed = session.poll(start.elapsed());
        if session.current_step() != last_step {
            last_step = session.current_step();
            print_frame(last_step, session.total_steps(), session.visual(), None);
        }
        if completed {
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }

    println!();
    println!("Output: {:?}", session.visual().values());
    println!("Done in {:.2}s", start.elapsed().as_secs_f32());
    ExitCode::SUCCESS
}

fn run_search(args: &[String]) -> ExitCode {
    if args.len() < 2 {
        eprintln!("Error: search needs <algorithm> <target>");
        return ExitCode::FAILURE;
    }
    let algorithm: SearchAlgorithm = match args[0].parse() {
        Ok(algorithm) => algorithm,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let target: u32 = match args[1].parse() {
        Ok(target) => target,
        Err(_) => {
            eprintln!("Error: target must be a non-negative integer");
            return ExitCode::FAILURE;
        }
    };
    let size: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SIZE);
    let speed: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SPEED);

    let array = generate_array(size);
    println!("Searching for {target} among {size} elements with {algorithm} search");
    println!("Input:  {array:?}");

    let mut session =
        match SearchSession::new(array, target, algorithm, PlaybackConfig::with_speed(speed)) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        };

    let start = Instant::now();
    session.set_running(true, Duration::ZERO);
    println!("View:   {:?}", session.view());
    println!("Steps:  {}", session.total_steps());
    println!();

    let mut last_step = 0;
    let outcome = loop {
        let outcome = session.poll(start.elapsed());
        if session.current_step() != last_step {
            last_step = session.current_step();
            print_frame(
                last_step,
                session.total_steps(),
                session.visual(),
                session.description(),
            );
        }
        if let Some(outcome) = outcome {
            break outcome;
        }
        thread::sleep(Duration::from_millis(20));
    };

    println!();
    match outcome.index() {
        Some(index) => println!("Found {target} at position {index}"),
        None => println!("{target} not found"),
    }
    println!("Done in {:.2}s", start.elapsed().as_secs_f32());
    ExitCode::SUCCESS
}

/// Print the generated event log as JSON without animating it.
fn dump_trace(args: &[String]) -> ExitCode {
    if args.is_empty() {
        eprintln!("Error: trace needs sort|search arguments");
        return ExitCode::FAILURE;
    }

    match args[0].as_str() {
        "sort" if args.len() >= 2 => {
            let algorithm: SortAlgorithm = match args[1].parse() {
                Ok(algorithm) => algorithm,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let size = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SIZE);
            let array = generate_array(size);
            let log = sort::trace(&array, algorithm);
            match serde_json::to_string_pretty(&log) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error serializing log: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        "search" if args.len() >= 3 => {
            let algorithm: SearchAlgorithm = match args[1].parse() {
                Ok(algorithm) => algorithm,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let Ok(target) = args[2].parse::<u32>() else {
                eprintln!("Error: target must be a non-negative integer");
                return ExitCode::FAILURE;
            };
            let size = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SIZE);
            let array = generate_array(size);
            let trace = search::trace(&array, target, algorithm);
            match serde_json::to_string_pretty(&trace) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error serializing trace: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Error: trace needs sort <algorithm> or search <algorithm> <target>");
            ExitCode::FAILURE
        }
    }
}

/// One line per applied step: values with role markers plus narration.
///
/// Markers: `>n` current, `*n` compared, `n+` sorted, `[n]` found.
fn print_frame(step: usize, total: usize, visual: &VisualState, description: Option<&str>) {
    let mut line = String::new();
    for element in visual.elements() {
        let cell = match element.role {
            Role::Default => format!("{} ", element.value),
            Role::Current => format!(">{} ", element.value),
            Role::Compared => format!("*{} ", element.value),
            Role::Sorted => format!("{}+ ", element.value),
            Role::Found => format!("[{}] ", element.value),
        };
        line.push_str(&cell);
    }
    match description {
        Some(text) => println!("  {step:>4}/{total}  {line} {text}"),
        None => println!("  {step:>4}/{total}  {line}"),
    }
}
