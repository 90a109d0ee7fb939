mod logic;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use logic::{
    BatchReport, CatchPolicy, DoorPolicy, InvariantChecker, LogicTester, Policy, SimulationPlan,
    list_policies, resolve_seed_inputs,
};
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "trickortreat-tester", version = "0.1.0")]
#[command(about = "Plays Trick or Treat sessions headlessly and checks the engine's rules")]
struct Args {
    /// Start clocks in milliseconds (comma-separated; supports `a..b`, `a..=b` and `now`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Player name typed on the intro screen
    #[arg(long, default_value = "")]
    name: String,

    /// Likes typed on the intro screen
    #[arg(long, default_value = "")]
    likes: String,

    /// Door choice policy
    #[arg(long, value_enum, default_value_t = DoorPolicy::Random)]
    door: DoorPolicy,

    /// Ghost chase policy
    #[arg(long, value_enum, default_value_t = CatchPolicy::Random)]
    catch: CatchPolicy,

    /// Leave for the final screen after this many turns
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=8))]
    stop_after: Option<u8>,

    /// List all available policies and exit
    #[arg(long)]
    list_policies: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_policies(&args)? {
        return Ok(());
    }

    announce_banner();

    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let plan = SimulationPlan {
        name: args.name.clone(),
        likes: args.likes.clone(),
        policy: Policy {
            door: args.door,
            catch: args.catch,
            stop_after: args.stop_after,
        },
    };
    log::info!("running {} seed(s) with {}", seeds.len(), plan.policy.label());

    let checker = InvariantChecker::new().context("failed to compile invariant patterns")?;
    let tester = LogicTester::new(checker, args.verbose);
    let report = tester.run_batch(&plan, &seeds);

    write_report(&args, &report)?;

    if !report.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_policies(args: &Args) -> Result<bool> {
    if !args.list_policies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available policies:")?;
    for (flag, description) in list_policies() {
        writeln!(output_target.writer(), "  {flag:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎃 Trick or Treat Session Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn write_report(args: &Args, report: &BatchReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, report)?,
        "markdown" => logic::reports::generate_markdown_report(&mut output_target, report)?,
        "csv" => logic::reports::generate_csv_report(&mut output_target, report)?,
        _ => {
            logic::reports::generate_console_report(&mut output_target, report)?;
            writeln!(&mut output_target)?;
            writeln!(
                &mut output_target,
                "🏁 Total time: {:?}",
                report.total_duration
            )?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
