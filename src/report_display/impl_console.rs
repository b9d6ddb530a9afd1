use crate::render::{text_bar, ReportLayout};
use crate::report_display::interface::ReportDisplay;
use std::error::Error;
use std::io::Write;

const BAR_WIDTH: usize = 30;

pub struct ReportDisplayConsole<W: Write + Send + Sync> {
    out: W,
    heading: String,
}

impl ReportDisplayConsole<std::io::Stdout> {
    pub fn stdout(heading: &str) -> Self {
        Self::new(std::io::stdout(), heading)
    }
}

impl<W: Write + Send + Sync> ReportDisplayConsole<W> {
    pub fn new(out: W, heading: &str) -> Self {
        Self {
            out,
            heading: heading.to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + Sync> ReportDisplay for ReportDisplayConsole<W> {
    fn show_report(&mut self, layout: &ReportLayout) -> Result<(), Box<dyn Error + Send + Sync>> {
        let headline = &layout.headline;
        writeln!(self.out, "{} {}", headline.glyph, headline.label)?;
        writeln!(self.out, "{}", headline.confidence)?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.heading)?;

        let name_width = layout
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0);

        for row in &layout.rows {
            writeln!(
                self.out,
                "{:<width$} {} {:>6.2}%",
                row.name,
                text_bar(row.fraction, BAR_WIDTH),
                row.score,
                width = name_width
            )?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "{}", layout.elapsed)?;
        self.out.flush()?;
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        Ok(())
    }
}
