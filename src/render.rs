use analytics::report::format_percent;
use analytics::{Report, ReportSink};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::io::{self, Write};

const TITLE: &str = "Do Stock Returns Follow a Normal Distribution?";
const BELL_CURVE_NOTE: &str = "Note that a bell curve should be symmetric (skew = 0) without too much weight in the tails (kurtosis = 0).";
const MAX_BAR_WIDTH: usize = 40;

/// Renders a report as plain text: explanation, text histogram and summary table.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_histogram(&mut self, report: &Report) -> io::Result<()> {
        writeln!(self.out, "{}", report.histogram_title())?;
        let max_count = report.histogram.max_count().max(1);
        for bin in &report.histogram.bins {
            let mut width = bin.count * MAX_BAR_WIDTH / max_count;
            if bin.count > 0 && width == 0 {
                width = 1;
            }
            writeln!(
                self.out,
                "{:>9} .. {:>9} | {:<bar$} {}",
                format_percent(bin.lower),
                format_percent(bin.upper),
                "#".repeat(width),
                bin.count,
                bar = MAX_BAR_WIDTH
            )?;
        }
        writeln!(self.out, "(x: {}, y: frequency)", report.histogram_x_label())
    }

    fn write_summary(&mut self, report: &Report) -> io::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["description", "value"]);
        for row in report.summary_rows() {
            table.add_row(vec![row.description.to_string(), row.value]);
        }
        writeln!(self.out, "Data Summary")?;
        writeln!(self.out, "{table}")
    }
}

impl<W: Write> ReportSink for TerminalSink<W> {
    type Error = io::Error;

    fn render(&mut self, report: &Report) -> Result<(), Self::Error> {
        writeln!(self.out, "{TITLE}")?;
        writeln!(self.out)?;
        writeln!(self.out, "Do the returns look like a bell curve?")?;
        writeln!(self.out, "{BELL_CURVE_NOTE}")?;
        for line in report.explanation_lines() {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        self.write_histogram(report)?;
        writeln!(self.out)?;
        self.write_summary(report)?;
        self.out.flush()
    }
}

/// Renders a report as pretty-printed JSON.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    type Error = io::Error;

    fn render(&mut self, report: &Report) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// The message shown instead of a report when the study period is too short.
pub fn write_insufficient_data<W: Write>(
    out: &mut W,
    required: usize,
    actual: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "There are only {actual} data points; at least {required} are needed to complete the analysis."
    )?;
    writeln!(
        out,
        "Please adjust the start date, end date and/or interval and try again."
    )
}
