//! Application configuration from CLI flags and environment.

use clap::{Parser, Subcommand};

use calcrs_orchestration::Request;

/// Counting arithmetic calculator with a sign-based complex calculation.
#[derive(Parser, Debug)]
#[command(name = "calcrs", version, about, arg_required_else_help = true)]
pub struct AppConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print responses as JSON lines.
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode (only output the value).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show every engine call made while serving the request.
    #[arg(short, long, global = true)]
    pub details: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

/// One request, or a batch script of them.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add two integers.
    Add {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
    /// Subtract b from a.
    Subtract {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
    /// Multiply two integers.
    Multiply {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
    /// Divide a by b (floating point).
    Divide {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
    /// Factorial of n (0 <= n <= 20).
    Factorial {
        #[arg(allow_negative_numbers = true)]
        n: i32,
    },
    /// Check whether n (>= 1) is prime.
    Prime {
        #[arg(allow_negative_numbers = true)]
        n: i32,
    },
    /// Sign-based complex calculation over a and b.
    Complex {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
    /// Print the operation counter.
    Count,
    /// Run a script of requests against one engine.
    Batch {
        /// Script path, or `-` for stdin.
        #[arg(env = "CALCRS_BATCH")]
        script: String,

        /// Run requests in parallel against the shared engine.
        #[arg(long)]
        parallel: bool,

        /// Stop at the first failing request.
        #[arg(long, conflicts_with = "parallel")]
        fail_fast: bool,
    },
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

impl Command {
    /// The single request this command stands for; `None` for `batch`.
    #[must_use]
    pub fn to_request(&self) -> Option<Request> {
        let request = match *self {
            Self::Add { a, b } => Request::Add { a, b },
            Self::Subtract { a, b } => Request::Subtract { a, b },
            Self::Multiply { a, b } => Request::Multiply { a, b },
            Self::Divide { a, b } => Request::Divide { a, b },
            Self::Factorial { n } => Request::Factorial { n },
            Self::Prime { n } => Request::Prime { n },
            Self::Complex { a, b } => Request::Complex { a, b },
            Self::Count => Request::Count,
            Self::Batch { .. } => return None,
        };
        Some(request)
    }
}
