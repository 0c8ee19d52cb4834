use clap::{Parser, Subcommand, ValueEnum};
use tripver::{ParseError, Segments, Version};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    LibraryError(#[from] ParseError),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum SegmentArg {
    Major,
    Minor,
    Patch,
}

impl SegmentArg {
    fn to_segments(self) -> Segments {
        match self {
            SegmentArg::Major => Segments::MAJOR,
            SegmentArg::Minor => Segments::MINOR,
            SegmentArg::Patch => Segments::PATCH,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum CompareOp {
    /// Greater than
    Gt,
    /// Greater than or equal to
    Ge,
    /// Less than
    Lt,
    /// Less than or equal to
    Le,
    /// Equal to
    Eq,
    /// Not equal to
    Ne,
}

impl CompareOp {
    fn apply(&self, left: &Version, right: &Version) -> bool {
        match self {
            CompareOp::Gt => left.gt(right),
            CompareOp::Ge => left.ge(right),
            CompareOp::Lt => left.lt(right),
            CompareOp::Le => left.le(right),
            CompareOp::Eq => left.eq(right),
            CompareOp::Ne => left.ne(right),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a version and prints it in canonical `major.minor.patch` form
    Parse {
        /// The version string to parse
        #[arg(allow_hyphen_values = true)]
        version: String,
    },

    /// Adds an increment to some segments of a version and prints the result.
    ///
    /// Lesser segments are not reset. For example, bumping the minor segment of `1.2.3` gives
    /// `1.3.3`.
    Bump {
        /// The version string to bump
        #[arg(allow_hyphen_values = true)]
        version: String,

        /// A segment to bump. Repeat to bump several. Defaults to major.
        #[arg(
            short,
            long = "segment",
            value_name = "SEGMENT",
            value_enum,
            ignore_case = true
        )]
        segments: Vec<SegmentArg>,

        /// The amount to add to each segment. May be negative.
        #[arg(
            short,
            long,
            default_value_t = Version::DEFAULT_INCREMENT,
            allow_negative_numbers = true
        )]
        by: i64,
    },

    /// Compares two versions. Prints `true` and exits 0 if `LEFT OP RIGHT` holds, otherwise prints
    /// `false` and exits 1.
    Compare {
        /// The version on the left of the operator
        #[arg(allow_hyphen_values = true)]
        left: String,

        /// The comparison operator
        #[arg(value_enum)]
        op: CompareOp,

        /// The version on the right of the operator
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
}

type Output = (String, i32);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    log::debug!("{:?}", &cli);

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn do_work(cli: Cli) -> Result<Output, CliError> {
    match cli.command {
        Commands::Parse { version } => Ok((Version::parse(&version)?.to_string(), 0)),
        Commands::Bump {
            version,
            segments,
            by,
        } => {
            let segments = if segments.is_empty() {
                Segments::default()
            } else {
                segments
                    .into_iter()
                    .fold(Segments::empty(), |all, segment| all | segment.to_segments())
            };
            let mut version = Version::parse(&version)?;
            version.bump_by(segments, by);
            Ok((version.to_string(), 0))
        }
        Commands::Compare { left, op, right } => {
            let left = Version::parse(&left)?;
            let right = Version::parse(&right)?;
            Ok(if op.apply(&left, &right) {
                ("true".to_string(), 0)
            } else {
                ("false".to_string(), 1)
            })
        }
    }
}
