//! JSON payloads returned by the switch API.
//!
//! Nested arrays carry `#[serde(default)]` so a missing array decodes as
//! empty; the accessors on [`DeviceInfo`] turn that into an explicit error
//! rather than a silent zero.

use serde::Deserialize;

use crate::error::{CheckError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceInfoResponse {
    #[serde(rename = "deviceInfo")]
    pub device_info: DeviceInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub details: Vec<DeviceInfoDetails>,
    #[serde(default)]
    pub fan: Vec<Fan>,
    #[serde(default)]
    pub sensor: Vec<Sensor>,
    #[serde(default)]
    pub cpu: Vec<UsageEntry>,
    #[serde(default)]
    pub memory: Vec<UsageEntry>,
}

/// Per-unit details; only the uptime is used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceInfoDetails {
    #[serde(rename = "upTime", default)]
    pub uptime: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fan {
    #[serde(default)]
    pub details: Vec<FanDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FanDetail {
    #[serde(rename = "desc", default)]
    pub description: String,
    /// RPM
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sensor {
    #[serde(default)]
    pub details: Vec<SensorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorDetail {
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(rename = "temp", default)]
    pub temperature: Option<f64>,
    #[serde(rename = "maxTemp", default)]
    pub max_temp: f64,
}

/// CPU and memory entries share a shape: `{"unit": 1, "usage": "5.20%"}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageEntry {
    #[serde(default)]
    pub usage: String,
}

impl DeviceInfo {
    pub fn uptime(&self) -> Result<&str> {
        self.details
            .first()
            .map(|d| d.uptime.as_str())
            .ok_or_else(|| CheckError::validation("no device details for this device"))
    }

    pub fn cpu_usage(&self) -> Result<f64> {
        let entry = self
            .cpu
            .first()
            .ok_or_else(|| CheckError::validation("no CPU info for this device"))?;
        parse_percent(&entry.usage)
    }

    pub fn memory_usage(&self) -> Result<f64> {
        let entry = self
            .memory
            .first()
            .ok_or_else(|| CheckError::validation("no Memory info for this device"))?;
        parse_percent(&entry.usage)
    }

    /// Fans of every unit in the stack
    pub fn fans(&self) -> Result<Vec<&FanDetail>> {
        let fans: Vec<&FanDetail> = self.fan.iter().flat_map(|f| f.details.iter()).collect();
        if fans.is_empty() {
            return Err(CheckError::validation("no Fan info for this device"));
        }
        Ok(fans)
    }

    /// Temperature sensors of every unit in the stack
    pub fn sensors(&self) -> Result<Vec<&SensorDetail>> {
        let sensors: Vec<&SensorDetail> =
            self.sensor.iter().flat_map(|s| s.details.iter()).collect();
        if sensors.is_empty() {
            return Err(CheckError::validation("no Temperature info for this device"));
        }
        Ok(sensors)
    }
}

/// Parses the switch's `"32.65%"` notation
pub fn parse_percent(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    let value: f64 = number
        .parse()
        .map_err(|_| CheckError::validation(format!("invalid percentage '{}'", raw)))?;
    if !value.is_finite() {
        return Err(CheckError::validation(format!("invalid percentage '{}'", raw)));
    }
    Ok(value)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortStatisticsResponse {
    #[serde(rename = "portStatistics", default)]
    pub port_statistics: PortStatistics,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortStatistics {
    #[serde(default)]
    pub rows: Vec<PortStatisticRow>,
}

/// Traffic counters of one port. The inbound endpoint fills the `in*`
/// fields, the outbound endpoint the `out*` fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortStatisticRow {
    pub port: u32,
    #[serde(default)]
    pub in_total_pkts: f64,
    #[serde(default)]
    pub in_drop_pkts: f64,
    #[serde(default)]
    pub in_octets: f64,
    #[serde(default)]
    pub out_total_pkts: f64,
    #[serde(default)]
    pub out_drop_pkts: f64,
    #[serde(default)]
    pub out_octets: f64,
}

impl PortStatistics {
    pub fn row(&self, port: u32) -> Option<&PortStatisticRow> {
        self.rows.iter().find(|r| r.port == port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoeStatus {
    #[serde(rename = "poePortConfig", default)]
    pub poe_port_config: Vec<PoePort>,
}

/// Power values are milliwatts; absent readings stay `None`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoePort {
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub current_power: Option<f64>,
    #[serde(default)]
    pub power_limit: Option<f64>,
}
