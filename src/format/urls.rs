//! Bare URL list output formatter
//!
//! One URL per line, nothing else. Meant for piping into other tools.

use crate::error::Result;
use crate::flickr::SearchReport;
use crate::format::OutputFormatter;

/// URL list formatter
pub struct UrlsFormatter;

impl OutputFormatter for UrlsFormatter {
    fn name(&self) -> &str {
        "urls"
    }

    fn description(&self) -> &str {
        "Bare URLs, one per line"
    }

    fn format(&self, report: &SearchReport) -> Result<String> {
        let mut output = String::new();
        for url in &report.urls {
            output.push_str(url.as_str());
            output.push('\n');
        }
        Ok(output)
    }
}
