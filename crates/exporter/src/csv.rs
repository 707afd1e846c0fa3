use crate::error::ExportError;
use analytics::{ReportFilter, commission_for, commission_on, format_money};
use chrono::NaiveDate;
use core_types::{Advisor, Sale};
use rust_decimal::Decimal;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

const TITLE: &str = "Reporte de Ventas por Asesor";
const COLUMNS: &str = "ID Venta,Nombre Venta,Fecha,Monto,Comisión";
const SEPARATOR: &str = "=============================================";

/// A stateless renderer of the sales CSV document.
#[derive(Debug, Default)]
pub struct CsvExporter {}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the document for the advisors and sales `filter` selects.
    ///
    /// Advisors without any matching sale are omitted entirely.
    pub fn export(&self, advisors: &[Advisor], filter: &ReportFilter) -> Result<String, ExportError> {
        let mut out = String::new();
        writeln!(out, "{TITLE}")?;
        writeln!(out)?;

        let mut blocks = 0usize;
        for advisor in advisors.iter().filter(|a| filter.selects_advisor(a)) {
            let sales: Vec<&Sale> = filter.matching_sales(advisor).collect();
            if sales.is_empty() {
                continue;
            }
            self.write_advisor_block(&mut out, advisor, &sales)?;
            blocks += 1;
        }

        tracing::debug!(advisors = blocks, bytes = out.len(), "Rendered CSV export.");
        Ok(out)
    }

    fn write_advisor_block(&self, out: &mut String, advisor: &Advisor, sales: &[&Sale]) -> Result<(), ExportError> {
        // --- Advisor header ---
        writeln!(out, "Asesor: {}", advisor.name)?;
        writeln!(out, "Porcentaje de Comisión: {}%", advisor.commission_rate.normalize())?;
        writeln!(out)?;

        // --- Sale rows ---
        writeln!(out, "{COLUMNS}")?;
        let mut total_sales = Decimal::ZERO;
        for sale in sales {
            total_sales += sale.amount;
            writeln!(
                out,
                "{},{},{},{},{}",
                sale.id,
                quote(&sale.name),
                sale.date,
                format_money(sale.amount),
                format_money(commission_for(sale, advisor.commission_rate)),
            )?;
        }

        // --- Totals and separator ---
        writeln!(out)?;
        writeln!(
            out,
            "Total Ventas,{},{}",
            format_money(total_sales),
            format_money(commission_on(total_sales, advisor.commission_rate)),
        )?;
        writeln!(out)?;
        writeln!(out, "{SEPARATOR}")?;
        writeln!(out)?;
        Ok(())
    }
}

/// Wraps a field in double quotes, doubling any quote inside it.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// The file name an export made on `date` is offered under.
pub fn suggested_filename(date: NaiveDate) -> String {
    format!("reporte_ventas_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes `contents` to `directory/filename`, creating the directory if needed.
pub fn write_document(directory: &Path, filename: &str, contents: &str) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(directory).map_err(|source| ExportError::Io {
        path: directory.to_path_buf(),
        source,
    })?;
    let path = directory.join(filename);
    fs::write(&path, contents).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Export written.");
    Ok(path)
}
