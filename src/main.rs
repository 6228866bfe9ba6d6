use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{arg, ArgMatches, Command};

use tourkit::io::{parse_instance, render_solution, tsplib};
use tourkit::policy::PolicyKind;
use tourkit::{solve_with_config, StrategyConfig};

fn cli() -> Command {
    Command::new("tourkit")
        .about("Solves Euclidean TSP instances")
        .arg(
            arg!([INSTANCE] "Instance file (reads stdin when omitted)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--budget [SECS] "Time budget in seconds")
                .default_value("120")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--restarts [N] "Independent search starts")
                .default_value("1")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--seed [SEED] "Base seed for stochastic policies")
                .default_value("0")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--policy [POLICY] "Acceptance policy override")
                .value_parser(["descent", "gls", "sa", "tabu"]),
        )
        .arg(arg!(--tsplib "Read the instance as TSPLIB EUC_2D"))
        .arg(
            arg!(--"emit-tsplib" [PATH] "Convert the instance to TSPLIB EUC_2D and exit")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(&cli().get_matches()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let source = matches.get_one::<PathBuf>("INSTANCE");
    let text = match source {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let points = if matches.get_flag("tsplib") {
        tsplib::parse_instance(&text)?
    } else {
        parse_instance(&text)?
    };

    if let Some(out) = matches.get_one::<PathBuf>("emit-tsplib") {
        let name = source
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stdin".to_string());
        let comment = format!("converted from {name}, {} cities", points.len());
        let mut w = BufWriter::new(fs::File::create(out)?);
        tsplib::write_instance(&mut w, &name, &comment, &points)?;
        w.flush()?;
        log::info!("wrote TSPLIB instance to {}", out.display());
        return Ok(());
    }

    let config = StrategyConfig {
        time_budget: Duration::from_secs(*matches.get_one::<u64>("budget").unwrap()),
        restarts: *matches.get_one::<usize>("restarts").unwrap(),
        seed: *matches.get_one::<u64>("seed").unwrap(),
        policy: matches.get_one::<String>("policy").map(|s| match s.as_str() {
            "descent" => PolicyKind::PlainDescent,
            "gls" => PolicyKind::GuidedLocalSearch,
            "sa" => PolicyKind::SimulatedAnnealing,
            "tabu" => PolicyKind::TabuSearch,
            _ => unreachable!("clap validates policy values"),
        }),
        ..StrategyConfig::default()
    };

    let result = solve_with_config(&points, &config)?;
    print!("{}", render_solution(&result));
    Ok(())
}
