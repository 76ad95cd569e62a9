use clap::{Args, Parser, Subcommand, ValueEnum};
use loancalc::application::calculator::LoanCalculator;
use loancalc::config::CalculatorConfig;
use loancalc::domain::amortization::{compute_loan, compute_loan_with};
use loancalc::domain::currency::Currency;
use loancalc::domain::loan::{DEFAULT_RATE_PERCENT, DEFAULT_TENOR_MONTHS, LoanInputs};
use loancalc::domain::ports::PaymentJitterBox;
use loancalc::infrastructure::jitter::{DEFAULT_SPREAD_BPS, RandomJitter};
use loancalc::interfaces::console::ConsoleSink;
use loancalc::interfaces::csv::estimate_writer::{SummaryWriter, write_breakdown};
use loancalc::interfaces::csv::scenario_reader::ScenarioReader;
use loancalc::error::LoanError;
use loancalc::interfaces::interactive::run_session;
use loancalc::interfaces::json;
use loancalc::interfaces::text::{render_breakdown, render_summary};
use loancalc::telemetry;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set, e.g. "debug".
    #[arg(long, global = true, env = "LOANCALC_LOG")]
    log_level: Option<String>,

    /// Currency code, reported in JSON output.
    #[arg(long, global = true, env = "LOANCALC_CURRENCY", default_value = "GHS")]
    currency: String,

    /// Symbol printed in front of amounts.
    #[arg(long, global = true, env = "LOANCALC_CURRENCY_SYMBOL", default_value = "GH₵")]
    currency_symbol: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate a single loan.
    Estimate(EstimateArgs),
    /// Estimate every scenario (salary, rate, tenor) in a CSV file.
    Batch {
        /// Input scenarios CSV file
        input: PathBuf,
    },
    /// Adjust salary, rate and tenor line by line on stdin.
    Interactive {
        #[command(flatten)]
        jitter: JitterArgs,
    },
}

#[derive(Args)]
struct EstimateArgs {
    /// Net monthly salary.
    #[arg(long, allow_hyphen_values = true)]
    salary: Decimal,

    /// Annual interest rate in percent.
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_RATE_PERCENT)]
    rate: Decimal,

    /// Loan tenor in months.
    #[arg(long, default_value_t = DEFAULT_TENOR_MONTHS)]
    tenor: u32,

    /// Include the month-by-month breakdown.
    #[arg(long)]
    breakdown: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(flatten)]
    jitter: JitterArgs,
}

#[derive(Args)]
struct JitterArgs {
    /// Randomly perturb each month's payment. Output is not reproducible
    /// unless --seed is given.
    #[arg(long)]
    jitter: bool,

    /// Largest perturbation in basis points.
    #[arg(long, default_value_t = DEFAULT_SPREAD_BPS)]
    jitter_spread_bps: u32,

    /// Seed for the perturbation.
    #[arg(long, requires = "jitter")]
    seed: Option<u64>,
}

impl JitterArgs {
    fn build(&self, config: &CalculatorConfig) -> Option<PaymentJitterBox> {
        if !self.jitter {
            return None;
        }
        warn!("payment jitter enabled, breakdown values are perturbed");
        let jitter = match self.seed {
            Some(seed) => RandomJitter::seeded(config.jitter_spread_bps, seed),
            None => RandomJitter::new(config.jitter_spread_bps),
        };
        Some(Box::new(jitter))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_level.as_deref());

    let config = CalculatorConfig::default()
        .with_currency(Currency::new(cli.currency, cli.currency_symbol));

    match cli.command {
        Command::Estimate(args) => estimate(args, config),
        Command::Batch { input } => batch(input),
        Command::Interactive { jitter } => interactive(jitter, config).await,
    }
}

fn estimate(args: EstimateArgs, config: CalculatorConfig) -> Result<()> {
    let config = config.with_jitter_spread(args.jitter.jitter_spread_bps);
    let inputs = LoanInputs::new(args.salary, args.rate, args.tenor);
    if !inputs.is_computable() {
        debug!(salary = %inputs.monthly_salary, "salary not positive, nothing to estimate");
        return Ok(());
    }

    let estimate = match args.jitter.build(&config) {
        Some(mut jitter) => compute_loan_with(&inputs, &mut *jitter),
        None => compute_loan(&inputs),
    }
    .into_diagnostic()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            writeln!(out, "{}", render_summary(&estimate, &config.currency)).into_diagnostic()?;
            if args.breakdown {
                writeln!(out, "\nPayment Breakdown").into_diagnostic()?;
                write!(out, "{}", render_breakdown(&estimate.breakdown, &config.currency))
                    .into_diagnostic()?;
            }
        }
        OutputFormat::Csv if args.breakdown => {
            write_breakdown(&mut out, &estimate.breakdown).into_diagnostic()?;
        }
        OutputFormat::Csv => {
            let mut writer = SummaryWriter::new(&mut out);
            writer.write(&estimate).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
        }
        OutputFormat::Json => {
            json::write_estimate(&mut out, &estimate, &config.currency).into_diagnostic()?;
        }
    }

    Ok(())
}

fn batch(input: PathBuf) -> Result<()> {
    let reader = ScenarioReader::open(input).into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    for scenario in reader.scenarios() {
        match scenario {
            Ok(inputs) if !inputs.is_computable() => {
                warn!(salary = %inputs.monthly_salary, "skipping scenario without a positive salary");
            }
            Ok(inputs) => match compute_loan(&inputs).and_then(|estimate| writer.write(&estimate)) {
                Ok(()) => {}
                Err(e @ (LoanError::InvalidInput(_) | LoanError::ArithmeticOverflow(_))) => {
                    eprintln!("Error computing scenario: {}", e);
                }
                Err(e) => return Err(e).into_diagnostic(),
            },
            Err(e) => {
                eprintln!("Error reading scenario: {}", e);
            }
        }
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}

async fn interactive(jitter: JitterArgs, config: CalculatorConfig) -> Result<()> {
    let config = config.with_jitter_spread(jitter.jitter_spread_bps);
    let sink = ConsoleSink::new(io::stdout(), config.currency.clone());
    let mut calculator = LoanCalculator::new(config.initial_inputs(), Box::new(sink));
    if let Some(jitter) = jitter.build(&config) {
        calculator = calculator.with_jitter(jitter);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    run_session(stdin, io::stdout(), &mut calculator, &config)
        .await
        .into_diagnostic()?;

    Ok(())
}
