use crate::render::ReportLayout;
use crate::report_display::interface::ReportDisplay;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Report(ReportLayout),
    Error(String),
}

/// Records everything it is asked to show.
#[derive(Clone, Default)]
pub struct ReportDisplayFake {
    shown: Arc<Mutex<Vec<Shown>>>,
}

impl ReportDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }

    fn push(&self, item: Shown) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.shown
            .lock()
            .map_err(|e| e.to_string())?
            .push(item);
        Ok(())
    }
}

impl ReportDisplay for ReportDisplayFake {
    fn show_report(&mut self, layout: &ReportLayout) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Shown::Report(layout.clone()))
    }

    fn show_error(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Shown::Error(message.to_string()))
    }
}
