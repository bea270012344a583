use std::fs::File;
use std::io::{stdout, BufWriter, Write};

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use abundhist::abundance::aggregate;
use abundhist::errors::AbundResult;
use abundhist::histogram::{build_histogram, resolve_range};
use abundhist::load_signatures;
use abundhist::report::{plot_histogram, write_abundances_csv, write_histogram_csv, Reporter};

use crate::cli::{parse_histogram_options, parse_load_options, parse_select_options};

mod cli;

fn output_to<F>(output_fn: F, filename: &str) -> Result<()>
where
    F: Fn(&mut dyn Write) -> AbundResult<()>,
{
    let file = File::create(filename).context(format!("unable to create '{}'", filename))?;
    let mut out = BufWriter::new(file);
    output_fn(&mut out).context(format!("unable to write '{}'", filename))?;
    out.flush()
        .context(format!("unable to write '{}'", filename))?;
    Ok(())
}

fn init_logging() -> Result<()> {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    TermLogger::init(
        LevelFilter::Info,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging()?;
    let reporter = Reporter::new(matches.is_present("quiet"));

    let filenames: Vec<_> = matches
        .values_of("INPUT")
        .ok_or_else(|| anyhow!("Bad INPUT"))?
        .collect();
    let load_params = parse_load_options(&matches)?;
    let select_params = parse_select_options(&matches);
    let hist_options = parse_histogram_options(&matches)?;

    let signatures = load_signatures(&filenames, &load_params)?;
    let total_loaded = signatures.len();
    reporter.notify(&format!(
        "loaded {} total signatures that matched ksize & molecule type",
        total_loaded
    ));

    let signatures = select_params.select(signatures);
    if signatures.len() != total_loaded {
        reporter.notify(&format!(
            "selected {} via name / md5 selectors",
            signatures.len()
        ));
    }
    if signatures.is_empty() && select_params.is_active() {
        reporter.warn("no signatures matched the name / md5 selectors");
    }

    let abundances = aggregate(&signatures);
    let values = abundances.values();
    let range = resolve_range(&values, hist_options.min, hist_options.max)?;
    let histogram = build_histogram(&values, range, hist_options.bins)?;
    reporter.notify(&format!(
        "{} hashes, {} in range {}..={} across {} bins",
        abundances.len(),
        histogram.total(),
        range.min,
        range.max,
        histogram.len(),
    ));

    let out = stdout();
    plot_histogram(&mut out.lock(), &histogram)?;

    if let Some(filename) = matches.value_of("output_file") {
        output_to(|writer| write_histogram_csv(writer, &histogram), filename)?;
    }
    if let Some(filename) = matches.value_of("abundances") {
        output_to(|writer| write_abundances_csv(writer, &abundances), filename)?;
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}
