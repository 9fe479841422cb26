//! Forecast sinks for terminal and file output

use clap::ValueEnum;
use forecast_facade::{ForecastError, ForecastSink, ForecastTable, Result};
use serde::Serialize;
use series_facade::Bin;
use std::fmt::Display;
use std::io::Write;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for reading in a terminal
    Table,
    /// One CSV row per bin
    Csv,
    /// One JSON document per entity, one per line
    Json,
}

fn sink_error(error: impl Display) -> ForecastError {
    ForecastError::Sink(error.to_string())
}

/// Human-readable table
pub struct TableSink<W: Write> {
    out: W,
    entity: Option<String>,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, entity: None }
    }

    fn write(&mut self, history: &[Bin], table: &ForecastTable) -> std::io::Result<()> {
        if let Some(entity) = &self.entity {
            writeln!(self.out, "== {} ==", entity)?;
        }
        writeln!(
            self.out,
            "mode: {}  period: {} bins  bin width: {}s  level: {:.0}%",
            table.mode,
            table.period,
            table.bin_width_seconds,
            table.confidence_level * 100.0
        )?;
        writeln!(
            self.out,
            "{:>20} {:>10} {:>12} {:>12} {:>12}",
            "bin_start", "observed", "yhat", "lower", "upper"
        )?;
        for (i, point) in table.points.iter().enumerate() {
            if i == table.history_len {
                writeln!(self.out, "{:-^70}", " forecast ")?;
            }
            let observed = history
                .get(i)
                .map(|b| b.sum.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                self.out,
                "{:>20} {:>10} {:>12.3} {:>12.3} {:>12.3}",
                point.bin_start, observed, point.yhat, point.yhat_lower, point.yhat_upper
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> ForecastSink for TableSink<W> {
    fn emit(&mut self, history: &[Bin], table: &ForecastTable) -> Result<()> {
        self.write(history, table).map_err(sink_error)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    entity: &'a str,
    bin_start: i64,
    observed: Option<u64>,
    yhat: f64,
    yhat_lower: f64,
    yhat_upper: f64,
    future: bool,
}

/// CSV rows, with a single header across all entities
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    entity: Option<String>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            entity: None,
        }
    }
}

impl<W: Write> ForecastSink for CsvSink<W> {
    fn emit(&mut self, history: &[Bin], table: &ForecastTable) -> Result<()> {
        let entity = self.entity.as_deref().unwrap_or("");
        for (i, point) in table.points.iter().enumerate() {
            let row = CsvRow {
                entity,
                bin_start: point.bin_start,
                observed: history.get(i).map(|b| b.sum),
                yhat: point.yhat,
                yhat_lower: point.yhat_lower,
                yhat_upper: point.yhat_upper,
                future: i >= table.history_len,
            };
            self.writer.serialize(row).map_err(sink_error)?;
        }
        self.writer.flush().map_err(sink_error)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    entity: Option<&'a str>,
    history: &'a [Bin],
    forecast: &'a ForecastTable,
}

/// Newline-delimited JSON
pub struct JsonSink<W: Write> {
    out: W,
    entity: Option<String>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, entity: None }
    }
}

impl<W: Write> ForecastSink for JsonSink<W> {
    fn emit(&mut self, history: &[Bin], table: &ForecastTable) -> Result<()> {
        let report = JsonReport {
            entity: self.entity.as_deref(),
            history,
            forecast: table,
        };
        serde_json::to_writer(&mut self.out, &report).map_err(sink_error)?;
        writeln!(self.out).map_err(sink_error)?;
        self.out.flush().map_err(sink_error)
    }
}

/// Sink chosen at runtime
pub enum OutputSink<W: Write> {
    Table(TableSink<W>),
    Csv(CsvSink<W>),
    Json(JsonSink<W>),
}

impl<W: Write> OutputSink<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        match format {
            OutputFormat::Table => OutputSink::Table(TableSink::new(out)),
            OutputFormat::Csv => OutputSink::Csv(CsvSink::new(out)),
            OutputFormat::Json => OutputSink::Json(JsonSink::new(out)),
        }
    }

    /// Label the next tables with an entity
    pub fn set_entity(&mut self, entity: &str) {
        let slot = match self {
            OutputSink::Table(sink) => &mut sink.entity,
            OutputSink::Csv(sink) => &mut sink.entity,
            OutputSink::Json(sink) => &mut sink.entity,
        };
        *slot = Some(entity.to_string());
    }
}

impl<W: Write> ForecastSink for OutputSink<W> {
    fn emit(&mut self, history: &[Bin], table: &ForecastTable) -> Result<()> {
        match self {
            OutputSink::Table(sink) => sink.emit(history, table),
            OutputSink::Csv(sink) => sink.emit(history, table),
            OutputSink::Json(sink) => sink.emit(history, table),
        }
    }
}
