//! Report export (CSV and JSON)

use anyhow::Result;
use chrono::Utc;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use tracing::{debug, info};

use crate::report::AttributionReport;

pub fn export_csv(report: &AttributionReport, output_path: &str) -> Result<()> {
    debug!(
        "Exporting {} customer rows to CSV: {}",
        report.customers.len(),
        output_path
    );

    let file = File::create(output_path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record([
        "Customer ID",
        "Customer Name",
        "Main Domain",
        "Bank",
        "Suspended",
        "Device Count",
        "Monthly Revenue",
        "Yearly Revenue",
        "Terminal Serials",
    ])?;

    for row in &report.customers {
        let device_count = row.device_count.to_string();
        let monthly = format!("{:.2}", row.monthly_revenue);
        let yearly = format!("{:.2}", row.yearly_revenue);
        let serials = row.terminal_serials.join(";");
        wtr.write_record([
            row.customer_id.as_str(),
            row.customer_name.as_str(),
            row.main_domain.as_deref().unwrap_or(""),
            row.bank.as_deref().unwrap_or(""),
            if row.suspended { "yes" } else { "no" },
            device_count.as_str(),
            monthly.as_str(),
            yearly.as_str(),
            serials.as_str(),
        ])?;
    }

    wtr.flush()?;
    info!(
        "Exported {} customer rows to CSV: {}",
        report.customers.len(),
        output_path
    );
    Ok(())
}

pub fn export_json(report: &AttributionReport, output_path: &str) -> Result<()> {
    debug!(
        "Exporting {} customer rows to JSON: {}",
        report.customers.len(),
        output_path
    );

    let json_output = JsonExport {
        summary: ExportSummary {
            generated_at: Utc::now().to_rfc3339(),
            customer_count: report.totals.customer_count,
            attributed_device_count: report.totals.attributed_device_count,
            unattributed_terminal_count: report.unattributed_terminals.len(),
            multi_attributed_terminal_count: report.multi_attributed_serials.len(),
            monthly_revenue: report.totals.monthly_revenue,
            yearly_revenue: report.totals.yearly_revenue,
        },
        report,
    };

    let json_string = serde_json::to_string_pretty(&json_output)?;
    let mut file = File::create(output_path)?;
    file.write_all(json_string.as_bytes())?;

    info!(
        "Exported {} customer rows to JSON: {}",
        report.customers.len(),
        output_path
    );
    Ok(())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    summary: ExportSummary,
    report: &'a AttributionReport,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportSummary {
    generated_at: String,
    customer_count: usize,
    attributed_device_count: usize,
    unattributed_terminal_count: usize,
    multi_attributed_terminal_count: usize,
    monthly_revenue: f64,
    yearly_revenue: f64,
}
