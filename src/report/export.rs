//! Spreadsheet export of a [`Report`].
//!
//! Two sheets: "Scenario Comparison" and "P&L Baseline". The workbook is
//! rendered fully in memory, then written to a temporary file in the
//! destination directory and atomically renamed into place. A failed export
//! leaves nothing at the destination.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use tempfile::NamedTempFile;
use tracing::info;

use super::{build_report, DeltaTone, Report};
use crate::catalog::VariableId;
use crate::config::ExportOptions;
use crate::error::{PnlError, PnlResult};
use crate::scenarios::{compare, GlobalParams, ScenarioInput};

/// Comparison sheet name.
pub const COMPARISON_SHEET: &str = "Scenario Comparison";
/// Baseline sheet name.
pub const BASELINE_SHEET: &str = "P&L Baseline";

const HEADER_BG: u32 = 0x001A_1A2E;
const POSITIVE_BG: u32 = 0x00D5_F5E3;
const NEGATIVE_BG: u32 = 0x00FA_DBD8;
const HIGHLIGHT_BG: u32 = 0x00FE_F9E7;

/// Unix permission bits of a written report.
#[cfg(unix)]
const REPORT_MODE: u32 = 0o644;

/// First data row of both sheets (0-based; title, blank, header above).
pub const FIRST_DATA_ROW: u32 = 3;

struct Palette {
    title: Format,
    header: Format,
    cell: Format,
    number: Format,
}

impl Palette {
    fn new() -> Self {
        let cell = Format::new().set_border(FormatBorder::Thin);
        Self {
            title: Format::new().set_bold().set_font_size(14),
            header: Format::new()
                .set_bold()
                .set_font_size(11)
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(HEADER_BG))
                .set_border(FormatBorder::Thin),
            number: cell.clone().set_num_format("#,##0"),
            cell,
        }
    }

    fn toned(base: &Format, tone: DeltaTone) -> Format {
        let bg = match tone {
            DeltaTone::Positive => POSITIVE_BG,
            DeltaTone::Negative => NEGATIVE_BG,
        };
        base.clone().set_background_color(Color::RGB(bg))
    }

    fn highlighted(base: &Format) -> Format {
        base.clone().set_background_color(Color::RGB(HIGHLIGHT_BG))
    }
}

fn write_header(sheet: &mut Worksheet, row: u32, headers: &[&str], fmt: &Format) -> Result<(), XlsxError> {
    for (col, h) in (0u16..).zip(headers) {
        sheet.write_string_with_format(row, col, *h, fmt)?;
    }
    Ok(())
}

fn comparison_sheet(report: &Report, palette: &Palette) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(COMPARISON_SHEET)?;
    sheet.write_string_with_format(0, 0, "Price Scenario Simulation - Scenario Comparison", &palette.title)?;

    let mut headers = vec!["Scenario"];
    headers.extend(VariableId::ALL.map(VariableId::short_label));
    headers.extend(["EBITDA (억)", "Change (억)", "EBITDA%", "GP%", "Franchise GP%", "OPM%"]);
    write_header(&mut sheet, FIRST_DATA_ROW - 1, &headers, &palette.header)?;

    for (row, r) in (FIRST_DATA_ROW..).zip(&report.comparison) {
        sheet.write_string_with_format(row, 0, r.name.as_str(), &palette.cell)?;
        for (col, value) in (1u16..).zip(r.contributions) {
            sheet.write_number_with_format(row, col, value, &palette.cell)?;
        }
        sheet.write_number_with_format(row, 8, r.ebitda_projected, &palette.cell)?;
        sheet.write_number_with_format(row, 9, r.ebitda_change, &Palette::toned(&palette.cell, r.change_tone))?;
        let pcts = [r.ebitda_pct, r.gp_pct, r.franchise_gp_pct, r.op_margin_pct];
        for (col, value) in (10u16..).zip(pcts) {
            sheet.write_number_with_format(row, col, value, &palette.cell)?;
        }
    }

    for col in 0..14 {
        sheet.set_column_width(col, 15)?;
    }
    Ok(sheet)
}

fn baseline_sheet(report: &Report, palette: &Palette) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(BASELINE_SHEET)?;
    sheet.write_string_with_format(0, 0, "Summary P&L (KRW million)", &palette.title)?;
    write_header(
        &mut sheet,
        FIRST_DATA_ROW - 1,
        &["Line item", "Prior actual", "Planned", "Delta"],
        &palette.header,
    )?;

    for (row, r) in (FIRST_DATA_ROW..).zip(&report.baseline) {
        let mut label = palette.cell.clone();
        if r.bold {
            label = label.set_bold();
        }
        let mut number = palette.number.clone();
        let mut delta = Palette::toned(&palette.number, r.delta_tone);
        if r.highlight {
            label = Palette::highlighted(&label);
            number = Palette::highlighted(&number);
            delta = Palette::highlighted(&delta);
        }

        sheet.write_string_with_format(row, 0, r.label, &label)?;
        sheet.write_number_with_format(row, 1, r.prior, &number)?;
        sheet.write_number_with_format(row, 2, r.planned, &number)?;
        sheet.write_number_with_format(row, 3, r.delta, &delta)?;
    }

    for col in 0..4 {
        sheet.set_column_width(col, 18)?;
    }
    Ok(sheet)
}

/// Render a report as `.xlsx` bytes.
///
/// # Errors
///
/// Returns [`PnlError::ExportFailed`] if the workbook cannot be assembled.
pub fn render_workbook(report: &Report) -> PnlResult<Vec<u8>> {
    let fail = |e: XlsxError| PnlError::export_failed("<memory>", e);
    let palette = Palette::new();

    let mut workbook = Workbook::new();
    workbook.push_worksheet(comparison_sheet(report, &palette).map_err(fail)?);
    workbook.push_worksheet(baseline_sheet(report, &palette).map_err(fail)?);
    workbook.save_to_buffer().map_err(fail)
}

/// Evaluate scenarios and render the comparison workbook.
///
/// # Errors
///
/// Propagates evaluation errors; rendering failures become
/// [`PnlError::ExportFailed`].
pub fn export_report(scenarios: &[ScenarioInput], global_params: &GlobalParams) -> PnlResult<Vec<u8>> {
    let results = compare(scenarios, global_params)?;
    render_workbook(&build_report(&results))
}

/// Artifact file name: `{prefix}_{yyMMdd_HHmm}.xlsx`.
#[must_use]
pub fn report_file_name(prefix: &str, timestamp: NaiveDateTime) -> String {
    format!("{prefix}_{}.xlsx", timestamp.format("%y%m%d_%H%M"))
}

/// Write `bytes` to `path` atomically.
///
/// # Errors
///
/// Returns [`PnlError::ExportFailed`]; the temporary file is removed on
/// every failure path.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> PnlResult<()> {
    let fail = |e: std::io::Error| PnlError::export_failed(path, e);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    // temp files are owner-only; the report is an ordinary document
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(REPORT_MODE))
            .map_err(fail)?;
    }
    tmp.persist(path).map_err(|e| fail(e.error))?;
    Ok(())
}

/// Render `report` and write it under `options.directory`, timestamped now.
///
/// # Errors
///
/// Returns [`PnlError::ExportFailed`] if the directory cannot be created or
/// the artifact cannot be written.
pub fn write_report(report: &Report, options: &ExportOptions) -> PnlResult<PathBuf> {
    write_report_at(report, options, Local::now().naive_local())
}

/// [`write_report`] with an explicit timestamp.
///
/// # Errors
///
/// See [`write_report`].
pub fn write_report_at(
    report: &Report,
    options: &ExportOptions,
    timestamp: NaiveDateTime,
) -> PnlResult<PathBuf> {
    let path = options
        .directory
        .join(report_file_name(&options.file_prefix, timestamp));

    std::fs::create_dir_all(&options.directory)
        .map_err(|e| PnlError::export_failed(&path, e))?;

    let bytes = render_workbook(report).map_err(|e| match e {
        PnlError::ExportFailed { reason, .. } => PnlError::ExportFailed {
            path: path.clone(),
            reason,
        },
        other => other,
    })?;
    write_atomic(&path, &bytes)?;

    info!(
        path = %path.display(),
        scenarios = report.comparison.len(),
        baseline_rows = report.baseline.len(),
        bytes = bytes.len(),
        "report exported"
    );
    Ok(path)
}
