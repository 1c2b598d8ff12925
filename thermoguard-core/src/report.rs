//! Text reports for a console or log
//!
//! Fixed-width layouts, one value per line, so successive dumps line up on
//! a serial monitor. All of them implement [`core::fmt::Display`] and
//! allocate nothing. The multi-line reports end every line, the last one
//! included, so they can be printed back to back; [`StatusLine`] is a single
//! line without terminator.

use core::fmt;

use crate::calibration::CalibrationState;
use crate::callbacks::Measurement;
use crate::controller::Thermostat;
use crate::sensor::SensorSource;
use crate::threshold::ThresholdConfig;
use crate::time::Millis;

/// Values dump of the last sample
#[derive(Debug, Clone, Copy)]
pub struct SensorReport<'a> {
    /// Sample to print
    pub measurement: &'a Measurement,
    /// Calibration in force
    pub calibration: &'a CalibrationState,
}

impl fmt::Display for SensorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = &self.measurement.reading;
        writeln!(f, "    Temperature   {:6.1} °C", reading.temperature_c)?;
        writeln!(f, "    Humidity      {:6.1} %rF", reading.rel_humidity_pct)?;
        writeln!(f, "    Air pressure  {:6.1} hPa", reading.pressure_hpa)?;
        match self.measurement.derived.dew_point_c {
            Some(dp) => writeln!(f, "    Dewpoint      {:6.1} °C", dp)?,
            None => writeln!(f, "    Dewpoint         --- °C")?,
        }
        writeln!(f, "    SeaLevel prs  {:6.1} hPa", self.calibration.sea_level_pressure_hpa())?;
        writeln!(f, "    Altitude      {:6.1} masl", self.calibration.altitude_m())?;
        writeln!(f, "    Standard prs  {:6.1} hPa", self.measurement.derived.local_normal_pressure_hpa)
    }
}

/// Current limits and sampling interval
#[derive(Debug, Clone, Copy)]
pub struct ThresholdReport {
    /// Limits to print
    pub thresholds: ThresholdConfig,
    /// Sampling interval in ms
    pub refresh_interval_ms: Millis,
}

impl fmt::Display for ThresholdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    Lower limit   {:6.1} °C", self.thresholds.low())?;
        writeln!(f, "    Upper limit   {:6.1} °C", self.thresholds.high())?;
        writeln!(f, "    Delta T       {:6.1} °C", self.thresholds.delta())?;
        writeln!(f, "    Refresh interval {:5} ms", self.refresh_interval_ms)
    }
}

/// One-line status printed after every sample
#[derive(Debug, Clone, Copy)]
pub struct StatusLine {
    /// Temperature in °C
    pub temperature_c: f32,
    /// Limits in force
    pub thresholds: ThresholdConfig,
    /// Relay state
    pub heating_on: bool,
}

impl StatusLine {
    /// Status for `measurement` with the given relay state
    pub fn new(measurement: &Measurement, heating_on: bool) -> Self {
        Self {
            temperature_c: measurement.reading.temperature_c,
            thresholds: measurement.thresholds,
            heating_on,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:4.1} [{:4.1} ... {:4.1}] heating is {}",
            self.temperature_c,
            self.thresholds.low(),
            self.thresholds.high(),
            if self.heating_on { "ON" } else { "OFF" }
        )
    }
}

impl<S: SensorSource> Thermostat<S> {
    /// Values dump, `None` before the first sample
    pub fn sensor_report(&self) -> Option<SensorReport<'_>> {
        self.last_measurement().map(|measurement| SensorReport {
            measurement,
            calibration: self.calibration(),
        })
    }

    /// Limits and interval report
    pub fn threshold_report(&self) -> ThresholdReport {
        ThresholdReport {
            thresholds: *self.thresholds(),
            refresh_interval_ms: self.refresh_interval_ms(),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    use crate::metrics::DerivedMetrics;
    use crate::sensor::SensorReading;

    fn measurement(rel_humidity_pct: f32) -> Measurement {
        let thresholds = ThresholdConfig::default();
        let reading = SensorReading::new(20.0, rel_humidity_pct, 958.4);
        Measurement {
            timestamp_ms: 0,
            reading,
            derived: DerivedMetrics::compute(&reading, &CalibrationState::new(453.0)),
            thresholds,
            band: thresholds.classify(20.0),
        }
    }

    #[test]
    fn sensor_report_layout() {
        let m = measurement(40.0);
        let cal = CalibrationState::new(453.0);
        let text = SensorReport { measurement: &m, calibration: &cal }.to_string();

        assert!(text.contains("    Temperature     20.0 °C"));
        assert!(text.contains("    Humidity        40.0 %rF"));
        assert!(text.contains("    Air pressure   958.4 hPa"));
        assert!(text.contains("    Dewpoint         6.0 °C"));
        assert!(text.contains("    SeaLevel prs  1013."));
        assert!(text.contains("    Altitude       453.0 masl"));
        assert!(text.contains("    Standard prs   960.0 hPa"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn missing_dew_point_is_marked() {
        let m = measurement(0.0);
        let cal = CalibrationState::new(453.0);
        let text = SensorReport { measurement: &m, calibration: &cal }.to_string();
        assert!(text.contains("Dewpoint         --- °C"));
    }

    #[test]
    fn threshold_report_layout() {
        let report = ThresholdReport {
            thresholds: ThresholdConfig::default(),
            refresh_interval_ms: 5000,
        };
        assert_eq!(
            report.to_string(),
            "    Lower limit     18.0 °C\n    Upper limit     21.0 °C\n    Delta T          3.0 °C\n    Refresh interval  5000 ms\n"
        );
    }

    #[test]
    fn consecutive_reports_keep_line_boundaries() {
        let m = measurement(40.0);
        let cal = CalibrationState::new(453.0);
        let thresholds = ThresholdReport {
            thresholds: ThresholdConfig::default(),
            refresh_interval_ms: 300,
        };
        let text = format!(
            "{}{}{}",
            SensorReport { measurement: &m, calibration: &cal },
            thresholds,
            SensorReport { measurement: &m, calibration: &cal },
        );

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 18);
        assert!(text.ends_with('\n'));
        assert_eq!(lines[6], "    Standard prs   960.0 hPa");
        assert_eq!(lines[7], "    Temperature     20.0 °C");
        assert_eq!(lines[10], "    Refresh interval   300 ms");
        assert_eq!(lines[11], "    Temperature     20.0 °C");
        assert!(lines.iter().all(|line| line.starts_with("    ")));
    }

    #[test]
    fn status_line() {
        let line = StatusLine::new(&measurement(40.0), true);
        assert_eq!(line.to_string(), "20.0 [18.0 ... 21.0] heating is ON");
    }
}
