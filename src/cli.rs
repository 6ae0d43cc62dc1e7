use std::path::PathBuf;

use clap::Parser;

use crate::color::ColorStrategy;
use crate::config::{Config, DEFAULT_TITLE};
use crate::data::model::{CaseFolding, MergePolicy};
use crate::render::OutputFormat;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "tallychart",
    author,
    version,
    about = "Turn `label: count` tally files into a static Chart.js page",
    long_about = None
)]
pub struct Cli {
    /// Directory containing one `.txt` file per dataset
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Output file [default: charts.html, or js/data.js with --format js]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// What to generate
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Colour assignment for labels
    #[arg(short, long, value_enum, default_value_t = ColorStrategy::GoldenRatio)]
    pub palette: ColorStrategy,

    /// How repeated labels within one file combine
    #[arg(long, value_enum, default_value_t = MergePolicy::Sum)]
    pub merge: MergePolicy,

    /// Label case handling
    #[arg(long, value_enum, default_value_t = CaseFolding::Lowercase)]
    pub case: CaseFolding,

    /// Page title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            data_dir: cli.data_dir,
            output: cli.output,
            format: cli.format,
            palette: cli.palette,
            merge: cli.merge,
            case: cli.case,
            title: cli.title,
        }
    }
}
