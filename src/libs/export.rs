//! Invoice export to CSV, JSON and Excel.
//!
//! Exporters only consume an already computed [`Invoice`]; no totals are
//! recomputed here.
//!
//! ## Formats
//!
//! - **CSV**: `;` separated with a UTF-8 BOM so spreadsheet tools pick up
//!   the accents, header `Date;Heures;Taux;Montant;Catégorie` and a trailing
//!   `Total` row
//! - **JSON**: the invoice as served by `/invoice-preview`, pretty-printed
//! - **Excel**: one worksheet with a bold header row and a total row
//!
//! Default file name: `facture_<from|debut>_<to|fin>.<ext>`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use heures::libs::export::{ExportFormat, Exporter};
//! # fn demo(invoice: &heures::libs::invoice::Invoice) -> anyhow::Result<()> {
//! let exporter = Exporter::for_invoice(ExportFormat::Csv, None, invoice);
//! exporter.export_invoice(invoice)?;
//! # Ok(())
//! # }
//! ```

use crate::libs::entry::WorkEntry;
use crate::libs::invoice::Invoice;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const CSV_HEADER: [&str; 5] = ["Date", "Heures", "Taux", "Montant", "Catégorie"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Semicolon separated values, spreadsheet friendly
    Csv,
    /// Pretty-printed JSON
    Json,
    /// Excel workbook
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: PathBuf) -> Self {
        Self { format, output_path }
    }

    /// Exporter writing to `output_path`, or to `facture_<from>_<to>.<ext>`
    /// in the working directory.
    pub fn for_invoice(format: ExportFormat, output_path: Option<PathBuf>, invoice: &Invoice) -> Self {
        let output_path =
            output_path.unwrap_or_else(|| PathBuf::from(format!("facture_{}.{}", invoice.period().file_label(), format.extension())));
        Self::new(format, output_path)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes the invoice in the configured format and returns the written path.
    pub fn export_invoice(&self, invoice: &Invoice) -> Result<PathBuf> {
        match self.format {
            ExportFormat::Csv => self.invoice_csv(invoice)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(invoice)?;
                File::create(&self.output_path)?.write_all(json.as_bytes())?;
            }
            ExportFormat::Excel => self.invoice_excel(invoice)?,
        }

        tracing::info!(path = %self.output_path.display(), lines = invoice.lines.len(), "invoice exported");
        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(self.output_path.clone())
    }

    fn invoice_csv(&self, invoice: &Invoice) -> Result<()> {
        let mut file = File::create(&self.output_path)?;
        file.write_all(UTF8_BOM)?;

        let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(file);
        wtr.write_record(CSV_HEADER)?;
        for line in &invoice.lines {
            wtr.write_record([
                line.date.clone(),
                format!("{:.2}", line.hours),
                format!("{:.2}", line.rate),
                format!("{:.2}", line.amount),
                line.category.clone(),
            ])?;
        }
        wtr.write_record([
            "Total".to_string(),
            format!("{:.2}", invoice.total_hours),
            String::new(),
            format!("{:.2}", invoice.total_amount),
            String::new(),
        ])?;
        wtr.flush()?;
        Ok(())
    }

    fn invoice_excel(&self, invoice: &Invoice) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Facture")?;

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
        let total_format = Format::new().set_bold();
        let money_format = Format::new().set_num_format("0.00");

        for (col, title) in CSV_HEADER.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        let mut row = 1;
        for line in &invoice.lines {
            worksheet.write_string(row, 0, &line.date)?;
            worksheet.write_number_with_format(row, 1, line.hours, &money_format)?;
            worksheet.write_number_with_format(row, 2, line.rate, &money_format)?;
            worksheet.write_number_with_format(row, 3, line.amount, &money_format)?;
            worksheet.write_string(row, 4, &line.category)?;
            row += 1;
        }

        worksheet.write_string_with_format(row, 0, "Total", &total_format)?;
        worksheet.write_number_with_format(row, 1, invoice.total_hours, &money_format)?;
        worksheet.write_number_with_format(row, 3, invoice.total_amount, &money_format)?;

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }
}

/// Writes entries as a JSON array, the format read back by `entry import`.
pub fn write_entries_json(path: &Path, entries: &[WorkEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    File::create(path)?.write_all(json.as_bytes())?;
    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}
