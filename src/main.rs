use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use sigfilter::filter::{FilterCascade, FrequencyResponse, compute_coefficients};
use sigfilter::report::DesignReport;
use sigfilter::wav::{read_wav, write_wav};
use sigfilter::{DesignConfig, FilterMethod, FilterSettings, FilterType, TransformType};

#[derive(Parser, Debug)]
#[command(name = "sigfilter")]
#[command(about = "Design and apply Butterworth IIR filters", long_about = None)]
struct Cli {
    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute and print normal-form coefficients
    Design {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the magnitude response between DC and Nyquist
    Response {
        #[command(flatten)]
        filter: FilterArgs,

        /// Number of frequencies to evaluate
        #[arg(long, default_value = "33")]
        points: usize,

        /// Print magnitudes in dB
        #[arg(long)]
        decibel: bool,
    },
    /// Filter every channel of a WAV file
    Apply {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file (32-bit float)
        output: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Filter specification, either from a TOML file or from flags
///
/// Flags override values loaded from `--config`.
#[derive(Args, Debug)]
struct FilterArgs {
    /// TOML design file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Filter type
    #[arg(short = 't', long = "type", value_enum)]
    filter_type: Option<FilterType>,

    /// Design method
    #[arg(short = 'm', long, value_enum)]
    method: Option<FilterMethod>,

    /// Filter order
    #[arg(short = 'o', long)]
    order: Option<u32>,

    /// Sample rate in Hz
    #[arg(short = 'r', long)]
    sample_rate: Option<f64>,

    /// Lower cutoff frequency in Hz
    #[arg(long)]
    low: Option<f64>,

    /// Upper cutoff frequency in Hz
    #[arg(long)]
    high: Option<f64>,

    /// Chebyshev passband ripple in dB (negative)
    #[arg(long, allow_hyphen_values = true)]
    ripple: Option<f64>,

    /// Number of chained filter stages
    #[arg(long)]
    cascade: Option<u32>,

    /// S-plane to Z-plane mapping
    #[arg(long, value_enum)]
    transform: Option<TransformType>,
}

impl FilterArgs {
    fn to_config(&self) -> anyhow::Result<DesignConfig> {
        let mut config = match &self.config {
            Some(path) => DesignConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => DesignConfig::default(),
        };

        let filter = &mut config.filter;
        if let Some(t) = self.filter_type {
            filter.filter_type = t;
        }
        if let Some(m) = self.method {
            filter.filter_method = m;
        }
        if let Some(o) = self.order {
            filter.filter_order = o;
        }
        if let Some(r) = self.sample_rate {
            filter.sample_rate = r;
        }
        if let Some(low) = self.low {
            filter.low_cut_frequency = low;
        }
        if let Some(high) = self.high {
            filter.high_cut_frequency = high;
        }
        if let Some(ripple) = self.ripple {
            filter.chebyshev_ripple = ripple;
        }
        if let Some(cascade) = self.cascade {
            filter.cascade_length = cascade;
        }
        if let Some(transform) = self.transform {
            config.transform = transform;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Design { filter, format } => {
            let config = filter.to_config()?;
            let settings = design(config.filter, config.transform)?;
            let report = DesignReport::new(&settings, config.transform);
            match format {
                OutputFormat::Text => print!("{}", report.to_text()),
                OutputFormat::Json => println!(
                    "{}",
                    report.to_json().context("Failed to serialize report")?
                ),
            }
        }

        Command::Response {
            filter,
            points,
            decibel,
        } => {
            let config = filter.to_config()?;
            let settings = design(config.filter, config.transform)?;
            let response = FrequencyResponse::sweep(&settings, points);
            for point in &response.points {
                let value = if decibel {
                    point.magnitude_db
                } else {
                    point.magnitude
                };
                println!("{:10.4} {:12.6}", point.frequency, value);
            }
            if let Some(cutoff) = response.cutoff_estimate() {
                log::info!("-3 dB point near {:.2} Hz", cutoff);
            }
        }

        Command::Apply {
            input,
            output,
            filter,
        } => {
            let mut recording = read_wav(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let mut config = filter.to_config()?;
            if filter.sample_rate.is_none() {
                config.filter.sample_rate = recording.sample_rate as f64;
            }
            let settings = design(config.filter, config.transform)?;

            for (index, channel) in recording.channels.iter_mut().enumerate() {
                let mut cascade = FilterCascade::new(&settings);
                cascade.process_buffer(channel);
                if cascade.is_unstable() {
                    log::warn!("Channel {}: filter is unstable", index);
                }
            }

            write_wav(&output, &recording)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Filtered {} channel(s), {} frames -> {}",
                recording.channels.len(),
                recording.num_frames(),
                output.display()
            );
        }
    }

    Ok(())
}

fn design(mut settings: FilterSettings, transform: TransformType) -> anyhow::Result<FilterSettings> {
    settings.validate().context("Invalid filter settings")?;
    compute_coefficients(&mut settings, transform).context("Filter design failed")?;
    Ok(settings)
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose > 0 {
        let level = match verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        builder.filter_level(level);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.init();
}
