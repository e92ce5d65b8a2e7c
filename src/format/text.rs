//! Human-readable text output formatter

use crate::error::Result;
use crate::flickr::SearchReport;
use crate::format::OutputFormatter;

/// Text formatter - outputs a human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &SearchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!(
            "Photo search around ({:.6}, {:.6})\n",
            report.center.lat, report.center.lng
        ));
        output.push_str(&format!("Radius: {}km\n", report.radius_km));
        output.push_str(&format!("Backend: {}\n\n", report.backend));

        if report.urls.is_empty() {
            output.push_str("No photos found\n");
        } else {
            output.push_str(&format!("Photos ({}):\n", report.urls.len()));
            for url in &report.urls {
                output.push_str(&format!("  {}\n", url));
            }
        }

        Ok(output)
    }
}
