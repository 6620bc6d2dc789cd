use std::io;
use std::io::Write;
use std::path::Path;

use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal;
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use colony::DEFAULT_MAX_AGE;
use colony::grid::Grid;
use colony::io::SystemClock;
use colony::io::TermDisplay;
use colony::io::TermEvents;
use colony::sim::Outcome;
use colony::sim::Pacing;
use colony::sim::SimConfig;
use colony::sim::Simulation;
use colony::snapshot;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    welcome()?;

    loop {
        let grid = configure()?;
        let pacing = ask_speed()?;

        let outcome = run(grid, pacing)?;

        match outcome {
            Outcome::Stable { generations } => {
                println!("The colony stabilized after {generations} generations.")
            }
            Outcome::Cancelled { generations } => {
                println!("Simulation cancelled after {generations} generations.")
            }
        }

        if !ask_yes_no("Would you like to run another? ")? {
            break;
        }
    }

    Ok(())
}

fn welcome() -> anyhow::Result<()> {
    println!("Welcome to the game of Life, a simulation of the lifecycle of a bacteria colony.");
    println!("Cells live and die by the following rules:");
    println!();
    println!("\tA cell with 1 or fewer neighbors dies of loneliness");
    println!("\tLocations with 2 neighbors remain stable");
    println!("\tLocations with 3 neighbors will spontaneously create life");
    println!("\tLocations with 4 or more neighbors die of overcrowding");
    println!();
    println!("In the animation, new cells are dark and fade to gray as they age.");
    println!();

    prompt("Hit [enter] to continue....   ")?;

    Ok(())
}

/// Pick the starting colony: a snapshot file, or a random seed on empty
/// input. Loading failures re-prompt, they never abort.
fn configure() -> anyhow::Result<Grid> {
    println!("You can start your colony with random cells or read from a prepared file.");

    loop {
        let name = prompt("Enter name of colony file (or RETURN to seed randomly): ")?;

        if name.is_empty() {
            return Ok(snapshot::random(&mut thread_rng(), DEFAULT_MAX_AGE));
        }

        match snapshot::load(Path::new(&name)) {
            Ok(grid) => return Ok(grid),
            Err(err) => println!("{err}. Please select another file."),
        }
    }
}

fn ask_speed() -> anyhow::Result<Pacing> {
    println!("You choose how fast to run the simulation.");
    println!("\t1 = As fast as this chip can go!");
    println!("\t2 = Not too fast, this is a school zone.");
    println!("\t3 = Nice and slow so I can watch everything that happens.");
    println!("\t4 = Require enter key be pressed before advancing to next generation.");

    loop {
        let choice = prompt("Your choice: ")?;

        let Some(pacing) = choice.parse().ok().and_then(Pacing::from_level) else {
            println!("Please enter a number between 1 and 4.");
            continue;
        };

        return Ok(pacing);
    }
}

fn run(grid: Grid, pacing: Pacing) -> anyhow::Result<Outcome> {
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
        cursor::Hide,
        EnableMouseCapture,
    )?;

    let mut display = TermDisplay::new(grid.rows(), grid.cols(), DEFAULT_MAX_AGE);
    let config = SimConfig {
        max_age: DEFAULT_MAX_AGE,
        pacing,
    };

    let mut sim = Simulation::new(grid, config);
    let outcome = sim.run(&mut display, &mut TermEvents, &mut SystemClock);

    execute!(
        stdout,
        DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen,
    )?;
    terminal::disable_raw_mode()?;

    Ok(outcome?)
}

fn ask_yes_no(message: &str) -> anyhow::Result<bool> {
    loop {
        let answer = prompt(message)?;

        if answer.eq_ignore_ascii_case("yes") {
            return Ok(true);
        }

        if answer.eq_ignore_ascii_case("no") {
            return Ok(false);
        }

        println!("Please enter \"yes\" or \"no\".");
    }
}

fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    Ok(line.trim().to_string())
}
