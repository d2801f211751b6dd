use chrono::{DateTime, SecondsFormat, Utc};
use crate::{config::{FilesConfig, SimulationKind}, error::SimResult};
use csv::WriterBuilder;
use quantum::system::System;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Instant};
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub date: String,
    pub simulation: String,
    pub simulation_id: String,
    pub cpu: String,
    pub ram: String,
    pub completion_time: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

impl XY {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<XY>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<XY>) -> Self {
        Self { name: name.into(), points }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub filename: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub system: Option<System>,
    #[serde(default)]
    pub series: Vec<Series>,
}

/// Wall-clock start of a run.
#[derive(Clone, Debug)]
pub struct Stopwatch {
    started: DateTime<Utc>,
    instant: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self { started: Utc::now(), instant: Instant::now() }
    }

    /// `date` of the run, RFC 3339.
    pub fn date(&self) -> String {
        self.started.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// File stem safe on every platform.
    pub fn stamp(&self) -> String {
        self.started.format("%Y-%m-%dT%H-%M-%S%.3fZ").to_string()
    }

    pub fn finish(
        self,
        kind: SimulationKind,
        files: &FilesConfig,
        system: Option<System>,
        series: Vec<Series>,
    ) -> RunResult {
        let elapsed = self.instant.elapsed();
        RunResult {
            filename: self.stamp(),
            metadata: Metadata {
                date: self.date(),
                simulation: kind.title().to_string(),
                simulation_id: kind.id().to_string(),
                cpu: files.results.cpu.clone(),
                ram: files.results.ram.clone(),
                completion_time: format!("{:?}", elapsed),
            },
            system,
            series,
        }
    }
}

/// Two-column `x,y` CSV of one series.
pub fn write_csv(path: &Path, points: &[XY]) -> SimResult<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    for p in points {
        writer.serialize(p)?;
    }
    writer.flush()?;
    Ok(())
}

impl RunResult {
    /// Write `<dir>/<filename>.yaml` and one `<filename>-<k>-<name>.csv` per
    /// series; returns the YAML path.
    pub fn write(&self, dir: &Path) -> SimResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let yaml = dir.join(format!("{}.yaml", self.filename));
        fs::write(&yaml, serde_yaml::to_string(self)?)?;
        for (k, series) in self.series.iter().enumerate() {
            let csv = dir.join(format!("{}-{}-{}.csv", self.filename, k, series.name));
            write_csv(&csv, &series.points)?;
        }
        info!(path = %yaml.display(), series = self.series.len(), "results written");
        Ok(yaml)
    }

    pub fn read(path: &Path) -> SimResult<Self> {
        Ok(serde_yaml::from_str(&fs::read_to_string(path)?)?)
    }
}
