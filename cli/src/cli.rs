use abundhist::filtering::{LoadParams, SelectParams};
use abundhist::serialization::MoleculeType;
use anyhow::{anyhow, Result};
use clap::{crate_authors, crate_version, App, AppSettings, Arg, ArgGroup, ArgMatches};
use std::str::FromStr;

pub fn build_cli() -> App<'static, 'static> {
    let app = App::new("abundhist")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Plot k-mer abundance histograms from signature files")
        .setting(AppSettings::ArgRequiredElseHelp)
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name("INPUT")
                .help("Signature file(s) to aggregate")
                .multiple(true)
                .required(true),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Suppress non-error output"),
        );
    let app = add_output_options(app);
    let app = add_select_options(app);
    let app = add_histogram_options(app);
    add_load_options(app)
}

fn add_output_options<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("output_file")
            .short("o")
            .long("output")
            .value_name("FILE")
            .help("Output histogram to this file (in CSV format)")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("abundances")
            .long("abundances")
            .value_name("FILE")
            .help("Output hashes and abundances to this file (in CSV format)")
            .takes_value(true),
    )
}

fn add_select_options<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("md5")
            .long("md5")
            .help("Select signatures whose md5 contains this substring")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("name")
            .long("name")
            .help("Select signatures whose name contains this substring")
            .takes_value(true),
    )
}

fn add_histogram_options<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("min")
            .long("min")
            .help("Min value for histogram range (default 1)")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("max")
            .long("max")
            .help("Max value for histogram range (default largest abundance)")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("bins")
            .long("bins")
            .help("Number of bins")
            .default_value("10")
            .takes_value(true),
    )
}

fn add_load_options<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("ksize")
            .short("k")
            .long("ksize")
            .help("Only use signatures with this k-mer size (default any)")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("dna")
            .long("dna")
            .alias("rna")
            .help("Only use DNA signatures"),
    )
    .arg(
        Arg::with_name("protein")
            .long("protein")
            .help("Only use protein signatures"),
    )
    .arg(
        Arg::with_name("dayhoff")
            .long("dayhoff")
            .help("Only use Dayhoff-encoded protein signatures"),
    )
    .arg(
        Arg::with_name("hp")
            .long("hp")
            .help("Only use hydrophobic-polar-encoded protein signatures"),
    )
    .group(ArgGroup::with_name("moltype").args(&["dna", "protein", "dayhoff", "hp"]))
}

pub fn get_int_arg<T: FromStr>(matches: &ArgMatches, key: &str) -> Result<T> {
    let display_key = key.replace('_', "-");
    matches
        .value_of(key)
        .ok_or_else(|| anyhow!("Bad {}", display_key))?
        .parse::<T>()
        .map_err(|_| anyhow!("{} must be an integer", display_key))
}

fn get_opt_int_arg<T: FromStr>(matches: &ArgMatches, key: &str) -> Result<Option<T>> {
    if matches.occurrences_of(key) > 0 {
        Ok(Some(get_int_arg(matches, key)?))
    } else {
        Ok(None)
    }
}

pub fn parse_load_options(matches: &ArgMatches) -> Result<LoadParams> {
    let moltype = if matches.is_present("dna") {
        Some(MoleculeType::Dna)
    } else if matches.is_present("protein") {
        Some(MoleculeType::Protein)
    } else if matches.is_present("dayhoff") {
        Some(MoleculeType::Dayhoff)
    } else if matches.is_present("hp") {
        Some(MoleculeType::Hp)
    } else {
        None
    };

    Ok(LoadParams {
        ksize: get_opt_int_arg(matches, "ksize")?,
        moltype,
    })
}

pub fn parse_select_options(matches: &ArgMatches) -> SelectParams {
    SelectParams {
        name: matches.value_of("name").map(String::from),
        md5: matches.value_of("md5").map(String::from),
    }
}

/// The histogram range overrides and requested bin count.
#[derive(Clone, Debug, PartialEq)]
pub struct HistOptions {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub bins: i64,
}

pub fn parse_histogram_options(matches: &ArgMatches) -> Result<HistOptions> {
    Ok(HistOptions {
        min: get_opt_int_arg(matches, "min")?,
        max: get_opt_int_arg(matches, "max")?,
        bins: get_int_arg(matches, "bins")?,
    })
}
