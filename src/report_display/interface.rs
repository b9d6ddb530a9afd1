use crate::render::ReportLayout;
use std::error::Error;

/// A surface that shows analysis outcomes to the user.
pub trait ReportDisplay: Send + Sync {
    fn show_report(&mut self, layout: &ReportLayout) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Shows the user-facing failure message.
    fn show_error(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
