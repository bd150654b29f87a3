use crate::report::Report;

/// Anything that can present a finished `Report`: a terminal, a file, a web view.
///
/// Sinks only read the report; they never feed anything back into the pipeline.
pub trait ReportSink {
    type Error;

    fn render(&mut self, report: &Report) -> Result<(), Self::Error>;
}
