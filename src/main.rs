use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

use certtext::element::{Element, ElementStyle, TextContent};
use certtext::test_utils::{InMemoryHost, PassthroughFormatter, SAMPLE_ELEMENT};
use certtext::HostServices;

/// Renders the HTML preview of a certificate text element against the
/// built-in sample course and user.
#[derive(Parser)]
#[command(name = "certtext-preview")]
struct Cli {
    /// File containing the element text with @{field} placeholders
    template: PathBuf,

    /// User id to resolve user fields against (the sample host ships user 1)
    #[arg(long, default_value_t = 1)]
    user: u64,

    /// Log file path
    #[arg(long, default_value = "certtext.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create(&cli.log_file)?,
    )?;
    info!("Starting certificate text preview");

    let template = fs::read_to_string(&cli.template)?;
    let host = InMemoryHost::sample();
    let formatter = PassthroughFormatter;
    let services = HostServices {
        courses: &host,
        users: &host,
        elements: &host,
        formatter: &formatter,
    };

    let element = Element::new(
        SAMPLE_ELEMENT,
        "text",
        ElementStyle::default(),
        TextContent::from_stored(&template),
    );
    let html = element.render_html(&services, cli.user)?;

    if html.is_empty() {
        warn!("preview suppressed: a referenced field is missing or empty");
    }
    println!("{html}");

    info!("Preview rendered ({} bytes)", html.len());
    Ok(())
}
