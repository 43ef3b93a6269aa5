use std::path::Path;

use anyhow::Context;
use env_logger::Env;
use isds_scout::{
    configuration::get_configuration,
    services::{compare_companies, write_markdown, write_pdf, PortalClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let report = &configuration.report;
    let portal = PortalClient::new(&configuration.portal)?;

    log::info!("Fetch list (checking {} pages)...", report.page_depth);
    let rows = compare_companies(&portal, &report.targets, report.page_depth).await;

    let table = write_markdown(&rows, Path::new(&report.markdown_path))?;
    println!("\n=== Comparison Table ===\n{}", table);

    match write_pdf(&rows, Path::new(&report.pdf_path), Path::new(&report.font_path)) {
        Ok(()) => log::info!("PDF saved to {}", report.pdf_path),
        Err(e) => log::error!("Failed to save PDF: {:?}", e),
    }

    Ok(())
}
