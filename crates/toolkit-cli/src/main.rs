//! `toolkit`: command-line front-end for the ToolKit Pro utilities.
//!
//! # Usage
//!
//! ```bash
//! toolkit age 15 6 1990 --extended
//! toolkit convert --category temperature --from celsius --to fahrenheit 37
//! toolkit emi --principal 100000 --rate 8.5 --years 5
//! echo "Hello world." | toolkit words
//! toolkit json --minify '{"a": 1}'
//! toolkit base64 --decode aGVsbG8=
//! toolkit color '#3b82f6'
//! toolkit password --length 20 --no-symbols
//! toolkit qr wifi --ssid Home --password s3cret
//! toolkit --json tools
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use toolkit_engine::color::Rgb;
use toolkit_engine::qr::{ErrorCorrection, WifiEncryption};
use toolkit_engine::tools::Tool;
use toolkit_engine::units::UnitCategory;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toolkit", version)]
#[command(about = "Everyday utilities: age, units, loans, text, JSON, colors, passwords, QR codes", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true, env = "TOOLKIT_JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Age from a birth date
    Age {
        day: String,
        month: String,
        year: String,

        /// Also show months, weeks, days, hours, minutes and seconds lived
        #[arg(short, long)]
        extended: bool,
    },

    /// Convert a value between units
    Convert {
        #[arg(short, long, default_value = "length")]
        category: UnitCategory,

        /// Source unit (defaults to the category's first unit)
        #[arg(short, long)]
        from: Option<String>,

        /// Target unit (defaults to the category's first unit)
        #[arg(short, long)]
        to: Option<String>,

        /// List the units of the category instead of converting
        #[arg(long, conflicts_with = "value")]
        list: bool,

        #[arg(allow_hyphen_values = true, required_unless_present = "list")]
        value: Option<String>,
    },

    /// Monthly installment of a loan
    Emi {
        #[arg(short, long)]
        principal: f64,

        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: f64,

        /// Tenure in years
        #[arg(short, long)]
        years: f64,

        /// Print the month-by-month amortization schedule
        #[arg(long)]
        schedule: bool,
    },

    /// Count words, sentences and paragraphs (reads stdin without TEXT)
    Words { text: Option<String> },

    /// Format or validate JSON (reads stdin without INPUT)
    Json {
        input: Option<String>,

        #[arg(short, long)]
        minify: bool,

        /// Only check that the input is valid
        #[arg(long, conflicts_with = "minify")]
        check: bool,

        /// Format the built-in example document
        #[arg(long, conflicts_with = "input")]
        example: bool,
    },

    /// Base64 encode or decode text (reads stdin without TEXT)
    Base64 {
        text: Option<String>,

        #[arg(short, long)]
        decode: bool,
    },

    /// Show a color as HEX, RGB and HSL with a shade palette
    Color { color: Option<Rgb> },

    /// Generate random passwords
    Password {
        #[arg(short, long, default_value_t = toolkit_engine::password::DEFAULT_LENGTH)]
        length: usize,

        #[arg(long)]
        no_uppercase: bool,

        #[arg(long)]
        no_lowercase: bool,

        #[arg(long)]
        no_numbers: bool,

        #[arg(long)]
        no_symbols: bool,

        /// How many passwords to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Typing speed test
    Typing {
        /// Passage to type (defaults to a random sample)
        #[arg(long)]
        text: Option<String>,

        /// Score this text instead of prompting
        #[arg(long, requires = "seconds")]
        typed: Option<String>,

        /// Seconds taken for --typed
        #[arg(long)]
        seconds: Option<u64>,
    },

    /// Generate a QR code
    Qr {
        #[command(flatten)]
        style: QrStyle,

        #[command(subcommand)]
        content: QrKind,
    },

    /// Generate HTML meta tags
    Meta {
        /// Start from an empty list instead of the starter tags
        #[arg(long)]
        empty: bool,

        /// Change the content of an existing tag
        #[arg(long, value_name = "NAME=CONTENT", value_parser = parse_pair)]
        set: Vec<(String, String)>,

        /// Append a tag
        #[arg(long, value_name = "NAME=CONTENT", value_parser = parse_pair)]
        add: Vec<(String, String)>,

        /// Wrap the output in a <head> element
        #[arg(long)]
        head: bool,
    },

    /// List the available tools, or describe one by route
    Tools { route: Option<Tool> },
}

#[derive(Args)]
struct QrStyle {
    /// Minimum SVG edge length in pixels
    #[arg(long, default_value_t = 200, global = true)]
    size: u32,

    /// Quiet-zone margin; 0 disables it
    #[arg(long, default_value_t = 2, global = true)]
    margin: u32,

    #[arg(long, default_value = "#000000", global = true)]
    dark: Rgb,

    #[arg(long, default_value = "#ffffff", global = true)]
    light: Rgb,

    /// Error correction level: L, M, Q or H
    #[arg(long = "ec", default_value = "M", global = true)]
    error_correction: ErrorCorrection,

    /// Print SVG instead of terminal blocks
    #[arg(long, global = true)]
    svg: bool,

    /// Write the SVG to this file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Write the SVG to a timestamped file in the current directory
    #[arg(long, global = true, conflicts_with = "output")]
    save: bool,
}

#[derive(Subcommand)]
enum QrKind {
    Url {
        url: String,
    },
    Text {
        text: String,
    },
    Email {
        address: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        body: String,
    },
    Sms {
        phone: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    Wifi {
        #[arg(long)]
        ssid: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "WPA")]
        encryption: WifiEncryption,
    },
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, content)| (name.trim().to_string(), content.to_string()))
        .ok_or_else(|| format!("expected NAME=CONTENT, got '{s}'"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match commands::run(cli.command, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
