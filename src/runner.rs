use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use log::info;

use crate::encodings::LinearEncoding;
use crate::generator::Curriculum;
use crate::generator::GeneratorOptions;
use crate::generator::Outcome;
use crate::generator::ScheduleGenerator;
use crate::render::TimetableRenderer;
use crate::sat::LoweredProblem;

/// Exit code when no schedule satisfies the constraints.
const EXIT_UNSATISFIABLE: u8 = 2;
/// Exit code when the backend did not reach a verdict.
const EXIT_UNKNOWN: u8 = 3;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// The curriculum to generate timetables for, as TOML.
    pub curriculum: PathBuf,

    /// A TOML file with generator options.
    #[arg(short = 'O', long = "options")]
    pub options: Option<PathBuf>,

    /// Overrides the linear sum encoding of the options.
    #[arg(short = 'E', long = "encoding", value_enum)]
    pub encoding: Option<LinearEncoding>,

    #[command(subcommand)]
    pub command: Action,
}

#[derive(Clone, Debug, clap::Subcommand)]
pub enum Action {
    /// Generate a timetable for every group of the curriculum.
    Generate {
        #[arg(short = 'f', long = "format", value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Print the constraints as an SMT-LIB 2 script instead of solving them.
    ExportSmt2,

    /// Print the constraints in the DIMACS CNF format instead of solving them.
    ExportDimacs,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn run() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let curriculum = Curriculum::load_file(&args.curriculum)
        .with_context(|| format!("Failed to load the curriculum {}", args.curriculum.display()))?;

    let mut options = match &args.options {
        Some(path) => GeneratorOptions::load(path)
            .with_context(|| format!("Failed to load the options {}", path.display()))?,
        None => GeneratorOptions::default(),
    };
    if let Some(encoding) = args.encoding {
        options.linear_encoding = encoding;
    }

    let mut generator = ScheduleGenerator::with_options(curriculum, options)?;

    match args.command {
        Action::Generate { format } => generate(&mut generator, format),
        Action::ExportSmt2 => {
            print!("{}", generator.build()?);
            Ok(ExitCode::SUCCESS)
        }
        Action::ExportDimacs => {
            let lowered = LoweredProblem::new(generator.build()?, options.linear_encoding);
            print!("{}", lowered.cnf());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn generate(generator: &mut ScheduleGenerator, format: OutputFormat) -> anyhow::Result<ExitCode> {
    match generator.check()? {
        Outcome::Satisfiable => {
            let schedule = generator.decode()?;
            info!("generated timetables for {} groups", schedule.groups.len());

            match format {
                OutputFormat::Text => print!("{}", TimetableRenderer::default().render(&schedule)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&schedule)?),
            }

            Ok(ExitCode::SUCCESS)
        }
        Outcome::Unsatisfiable => {
            eprintln!("no schedule could be generated for these constraints");
            Ok(ExitCode::from(EXIT_UNSATISFIABLE))
        }
        Outcome::Unknown => {
            eprintln!(
                "generation inconclusive: relax the constraints or allow the solver more time"
            );
            Ok(ExitCode::from(EXIT_UNKNOWN))
        }
    }
}
