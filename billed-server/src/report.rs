use std::fmt;

use miette::{
    Diagnostic, GraphicalReportHandler, JSONReportHandler, NarratableReportHandler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Json,
    Graphical,
    Narratable,
}

/// Renders a [`Diagnostic`] with one of the miette report handlers.
pub struct ReportRenderer<'a>(pub ReportType, pub &'a dyn Diagnostic);

impl fmt::Display for ReportRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ReportType::Json => JSONReportHandler::new().render_report(f, self.1),
            ReportType::Graphical => GraphicalReportHandler::new().render_report(f, self.1),
            ReportType::Narratable => NarratableReportHandler::new().render_report(f, self.1),
        }
    }
}
