use std::io::Write;

use log::{info, warn};

use crate::abundance::AbundanceMap;
use crate::errors::AbundResult;
use crate::histogram::Histogram;

/// Width of the longest bar in `plot_histogram`.
pub const BAR_WIDTH: u64 = 40;

/// Routes informational messages; everything here is dropped when `quiet`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reporter {
    pub quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Reporter { quiet }
    }

    pub fn notify(&self, message: &str) {
        if !self.quiet {
            info!("{}", message);
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            warn!("{}", message);
        }
    }
}

/// Draw the histogram as horizontal ASCII bars, one line per bin, labelled
/// with the bin's upper edge and its count.
pub fn plot_histogram(writer: &mut dyn Write, histogram: &Histogram) -> AbundResult<()> {
    let labels: Vec<String> = histogram.bins.iter().map(|b| b.upper_edge.to_string()).collect();
    let counts: Vec<String> = histogram.bins.iter().map(|b| b.count.to_string()).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);
    let count_width = counts.iter().map(String::len).max().unwrap_or(0);
    let max_count = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);

    for ((label, count), bin) in labels.iter().zip(&counts).zip(&histogram.bins) {
        let bar_len = if bin.count == 0 {
            0
        } else {
            // u128 so huge counts can't overflow the scaling
            let scaled = u128::from(bin.count) * u128::from(BAR_WIDTH) / u128::from(max_count);
            std::cmp::max(1, scaled as usize)
        };
        writeln!(
            writer,
            "{:>lw$}  [{:>cw$}]  {}",
            label,
            count,
            "*".repeat(bar_len),
            lw = label_width,
            cw = count_width,
        )?;
    }
    Ok(())
}

/// CSV of the histogram: `count` is the bin's upper edge (an abundance
/// level) and `n_count` the number of hashes that fell in that bin.
pub fn write_histogram_csv(writer: &mut dyn Write, histogram: &Histogram) -> AbundResult<()> {
    writeln!(writer, "count,n_count")?;
    for bin in &histogram.bins {
        writeln!(writer, "{},{}", bin.upper_edge, bin.count)?;
    }
    Ok(())
}

/// CSV of every aggregated hash and its abundance, sorted by hash.
pub fn write_abundances_csv(writer: &mut dyn Write, abundances: &AbundanceMap) -> AbundResult<()> {
    writeln!(writer, "hashval,count")?;
    for (hash, count) in abundances.sorted() {
        writeln!(writer, "{},{}", hash, count)?;
    }
    Ok(())
}
