//! Generate missing OG images

use crate::og::OgReport;
use crate::Folio;

/// Run the OG generator on its own and print a summary
pub fn run(folio: &Folio) -> OgReport {
    let report = folio.og_images();
    for path in &report.generated {
        println!("Generated: {}", path.display());
    }
    println!(
        "{} generated ({} rasterized), {} skipped, {} without title",
        report.generated.len(),
        report.rasterized,
        report.skipped,
        report.untitled
    );
    report
}
