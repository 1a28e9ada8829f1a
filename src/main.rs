use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use page_replacement_sim::reference::{
    DEFAULT_LENGTH, ensure_visual_length, format_reference_string, generate_reference_string,
    generate_reference_string_with, parse_reference_string,
};
use page_replacement_sim::simulation::{belady_anomalies, compare, run_policy, simulate_all};
use page_replacement_sim::{Page, PolicyKind, Result, Simulation};

#[derive(Parser)]
#[command(author, version, about = "Compare FIFO, LRU and optimal page replacement")]
struct Cli {
    /// Number of page frames
    #[arg(short, long, default_value_t = 3)]
    frames: usize,

    /// Reference string, either "7 0 1 2" or "7012". Generated when omitted
    #[arg(short, long)]
    reference: Option<String>,

    /// Length of a generated reference string
    #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
    length: usize,

    /// Seed for a reproducible generated reference string
    #[arg(short, long)]
    seed: Option<u64>,

    /// Policy to run
    #[arg(short, long, value_enum, default_value_t = PolicyArg::All)]
    policy: PolicyArg,

    /// Print the frame contents after every reference
    #[arg(short, long)]
    trace: bool,

    /// Look for Belady's anomaly under FIFO with 1 up to MAX frames
    #[arg(long, value_name = "MAX")]
    belady: Option<usize>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Fifo,
    Lru,
    Opt,
    All,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let pages = reference(cli)?;
    ensure_visual_length(&pages)?;

    println!("Reference String: {}\n", format_reference_string(&pages));

    let simulations: Vec<Simulation> = match cli.policy {
        PolicyArg::Fifo => vec![run_policy(PolicyKind::Fifo, &pages, cli.frames)?],
        PolicyArg::Lru => vec![run_policy(PolicyKind::Lru, &pages, cli.frames)?],
        PolicyArg::Opt => vec![run_policy(PolicyKind::Opt, &pages, cli.frames)?],
        PolicyArg::All => simulate_all(&pages, cli.frames)?,
    };

    println!("{}", compare(&simulations));

    if cli.trace {
        for sim in &simulations {
            println!("{}\n{}\n", sim.policy().title(), sim.format_trace());
        }
    }

    if let Some(max_frames) = cli.belady {
        let anomalies = belady_anomalies(&pages, max_frames)?;
        if anomalies.is_empty() {
            println!("No Belady's anomaly for 1..={max_frames} frames");
        } else {
            for frames_count in anomalies {
                println!(
                    "Belady's anomaly: {frames_count} frames fault more often than {}",
                    frames_count - 1
                );
            }
        }
    }

    Ok(())
}

fn reference(cli: &Cli) -> Result<Vec<Page>> {
    match (&cli.reference, cli.seed) {
        (Some(text), _) => parse_reference_string(text),
        (None, Some(seed)) => {
            generate_reference_string_with(&mut StdRng::seed_from_u64(seed), cli.length)
        }
        (None, None) => generate_reference_string(cli.length),
    }
}
