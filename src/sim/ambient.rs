use std::collections::BTreeMap;

use anyhow::{ensure, Context, Result};

/// Floors a time of day in hours to the nearest 15-minute tick.
pub fn quarter_hour_floor(hours: f64) -> f64 {
    (hours * 4.0).floor() / 4.0
}

fn tick(hours: f64) -> i64 {
    (hours * 4.0).floor() as i64
}

/// Exterior ambient temperature, one value per 15-minute tick of the day.
///
/// The solver only samples this series; it never owns or extends the data.
/// Sampling a tick the series does not cover is a fatal error, never an
/// extrapolation.
#[derive(Debug, Clone, Default)]
pub struct AmbientSeries {
    ticks: BTreeMap<i64, f64>,
}

impl AmbientSeries {
    /// Builds a series from (time of day [h], temperature [K]) records.
    ///
    /// Times are floored to their tick; a later record for the same tick
    /// overwrites an earlier one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut ticks = BTreeMap::new();
        for (hours, temperature) in records {
            ticks.insert(tick(hours), temperature);
        }
        Self { ticks }
    }

    /// Parses CSV content with `time,temperature` rows.
    ///
    /// A single leading header line is tolerated. Reading the content from
    /// disk is the caller's job.
    pub fn from_csv(content: &str) -> Result<Self> {
        let mut ticks = BTreeMap::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split(',');
            let time_field = fields.next().unwrap_or("").trim();
            let temp_field = fields.next().unwrap_or("").trim();

            let hours: f64 = match time_field.parse() {
                Ok(v) => v,
                // Header row.
                Err(_) if lineno == 0 => continue,
                Err(_) => anyhow::bail!("invalid time {time_field:?} at line {}", lineno + 1),
            };
            let temperature: f64 = temp_field
                .parse()
                .with_context(|| format!("invalid temperature at line {}", lineno + 1))?;
            ticks.insert(tick(hours), temperature);
        }
        ensure!(!ticks.is_empty(), "ambient series content has no data rows");
        Ok(Self { ticks })
    }

    /// A constant temperature over `[from_hours, to_hours]`.
    pub fn constant(temperature: f64, from_hours: f64, to_hours: f64) -> Self {
        let mut ticks = BTreeMap::new();
        for t in tick(from_hours)..=tick(to_hours) {
            ticks.insert(t, temperature);
        }
        Self { ticks }
    }

    /// A sinusoidal 24-hour day: `mean + amplitude * cos(2*pi*(h - 14)/24)`,
    /// warmest at 14:00. Covers all 96 ticks of one day.
    pub fn synthetic(mean: f64, amplitude: f64) -> Self {
        let mut ticks = BTreeMap::new();
        for t in 0..96 {
            let hours = t as f64 / 4.0;
            let phase = 2.0 * std::f64::consts::PI * (hours - 14.0) / 24.0;
            ticks.insert(t, mean + amplitude * phase.cos());
        }
        Self { ticks }
    }

    /// Temperature at the tick containing `hours`.
    pub fn sample(&self, hours: f64) -> Result<f64> {
        self.ticks.get(&tick(hours)).copied().with_context(|| {
            format!(
                "ambient series has no entry for {:.2} h; \
                 it must cover every 15-minute tick of the simulated range",
                quarter_hour_floor(hours)
            )
        })
    }

    /// Number of covered ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}
