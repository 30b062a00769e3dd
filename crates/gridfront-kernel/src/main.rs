use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use gridfront_kernel::config::{FrontierOrder, SolverConfig};
use gridfront_kernel::render::{render_grid, report};
use gridfront_kernel::test_harness::{run_stress, StressConfig};
use gridfront_kernel::{Grid, Solution, Solver};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("gridfront")
        .version(gridfront_kernel::VERSION)
        .about("Pareto-optimal (health, moves) paths across cost grids")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("solve")
                .about("Solve a grid file and write <FILE>.result")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Grid file, one row per line"),
                )
                .arg(
                    Arg::new("health")
                        .long("health")
                        .value_parser(value_parser!(i32))
                        .help("Starting health (default 200)"),
                )
                .arg(
                    Arg::new("moves")
                        .long("moves")
                        .value_parser(value_parser!(i32))
                        .help("Move budget (default 450)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML solver configuration"),
                )
                .arg(
                    Arg::new("order")
                        .long("order")
                        .value_parser(["fifo", "lifo", "shuffled"])
                        .help("Frontier pop order"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Seed for the shuffled order"),
                )
                .arg(
                    Arg::new("max-pops")
                        .long("max-pops")
                        .value_parser(value_parser!(u64))
                        .help("Stop after this many frontier pops"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the solution as JSON"),
                )
                .arg(
                    Arg::new("no-write")
                        .long("no-write")
                        .action(ArgAction::SetTrue)
                        .help("Do not write <FILE>.result"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a grid file")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("stress")
                .about("Check solver invariants on random grids")
                .arg(
                    Arg::new("seeds")
                        .long("seeds")
                        .default_value("100")
                        .value_parser(value_parser!(u64))
                        .help("Number of random grids"),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .default_value("6")
                        .value_parser(value_parser!(usize))
                        .help("Maximum grid side"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("First seed"),
                )
                .arg(
                    Arg::new("stop-on-violation")
                        .long("stop-on-violation")
                        .action(ArgAction::SetTrue)
                        .help("Stop on first violation"),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn solver_config(args: &ArgMatches) -> anyhow::Result<SolverConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::default(),
    };

    if let Some(&health) = args.get_one::<i32>("health") {
        config = config.with_starting_health(health);
    }
    if let Some(&moves) = args.get_one::<i32>("moves") {
        config = config.with_max_moves(moves);
    }
    if let Some(order) = args.get_one::<String>("order") {
        config = config.with_order(order.parse()?);
    }
    if let Some(&seed) = args.get_one::<u64>("seed") {
        match config.order {
            FrontierOrder::Shuffled { .. } => {
                config = config.with_order(FrontierOrder::Shuffled { seed });
            }
            other => bail!("--seed only applies to the shuffled order (got {other:?})"),
        }
    }
    if let Some(&max_pops) = args.get_one::<u64>("max-pops") {
        config = config.with_max_pops(Some(max_pops));
    }
    Ok(config)
}

fn result_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".result");
    PathBuf::from(name)
}

fn run_solve(args: &ArgMatches) -> anyhow::Result<()> {
    let Some(file) = args.get_one::<PathBuf>("file") else {
        bail!("missing grid file");
    };
    let json = args.get_flag("json");

    let mut grid = Grid::from_file(file)?;
    let solver = Solver::new(solver_config(args)?)?;

    if !json {
        println!("{}", render_grid(&grid));
        println!();
        println!("Solving...");
    }

    let run = solver.solve(&mut grid);
    if !run.converged {
        tracing::warn!(pops = run.pops, "Stopped before fixpoint; fronts may be incomplete");
    }

    let text = if json {
        Solution::from_grid(&grid, &run).to_json_pretty()?
    } else {
        report(&grid)?
    };
    println!("{text}");

    if !args.get_flag("no-write") {
        let out = result_path(file);
        std::fs::write(&out, &text)
            .with_context(|| format!("writing {}", out.display()))?;
        tracing::info!(path = %out.display(), "Report written");
    }

    if !json {
        println!("Done!");
    }
    Ok(())
}

fn run_check(args: &ArgMatches) -> anyhow::Result<()> {
    let Some(file) = args.get_one::<PathBuf>("file") else {
        bail!("missing grid file");
    };
    let grid = Grid::from_file(file)?;
    let start = grid.cell(grid.start());

    println!("{}", render_grid(&grid));
    println!();
    println!("Rows: {}", grid.rows());
    println!("Cols: {}", grid.cols());
    println!("Start: ({}, {})", start.row, start.col);
    println!("Ends: {}", grid.end_cells().count());
    Ok(())
}

fn run_stress_command(args: &ArgMatches) -> anyhow::Result<bool> {
    let grids = args.get_one::<u64>("seeds").copied().unwrap_or(100);
    let max_side = args.get_one::<usize>("size").copied().unwrap_or(6);
    let seed = args.get_one::<u64>("seed").copied().unwrap_or(42);

    println!("Running stress test...");
    println!("Grids: {grids}");
    println!("Max side: {max_side}");
    println!("Seed: {seed}");
    println!();

    let report = run_stress(StressConfig {
        seed,
        grids,
        max_side,
        stop_on_first_violation: args.get_flag("stop-on-violation"),
        ..Default::default()
    });
    println!("{}", report.generate_text());
    Ok(report.passed())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("solve", args)) => run_solve(args),
        Some(("check", args)) => run_check(args),
        Some(("stress", args)) => {
            if !run_stress_command(args)? {
                std::process::exit(1);
            }
            Ok(())
        }
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}
