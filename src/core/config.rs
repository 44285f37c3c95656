use clap::{ArgMatches, ValueEnum};

use super::status::Thresholds;
use crate::error::{CheckError, Result};

pub const DEFAULT_BASE_URL: &str = "http://192.168.0.239";

/// Ports checked when no `--port` is given
pub const DEFAULT_PORTS: [u32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Check groups selected with `--mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Mode {
    /// CPU, memory, temperature and fans
    Basic,
    /// Packet loss per port
    Ports,
    /// Power over Ethernet draw per port
    Poe,
    /// All of the above
    All,
}

impl Mode {
    /// Expands `all`, drops duplicates and orders modes basic, ports, poe
    pub fn resolve(requested: &[Mode]) -> Vec<Mode> {
        let mut modes: Vec<Mode> = if requested.is_empty() {
            vec![Mode::Basic]
        } else if requested.contains(&Mode::All) {
            vec![Mode::Basic, Mode::Ports, Mode::Poe]
        } else {
            requested.to_vec()
        };
        modes.sort();
        modes.dedup();
        modes
    }
}

/// Everything one invocation of the plugin needs
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub modes: Vec<Mode>,
    pub hide_cpu: bool,
    pub hide_mem: bool,
    pub hide_temp: bool,
    pub hide_fans: bool,
    pub no_perfdata: bool,
    pub cpu: Thresholds,
    pub memory: Thresholds,
    pub fan: Thresholds,
    pub temperature: Thresholds,
    pub port_loss: Thresholds,
    pub ports: Vec<u32>,
    /// Ports came from `--port`; unreported ones are then UNKNOWN
    pub explicit_ports: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            password: String::new(),
            modes: vec![Mode::Basic],
            hide_cpu: false,
            hide_mem: false,
            hide_temp: false,
            hide_fans: false,
            no_perfdata: false,
            cpu: Thresholds::new(50.0, 90.0),
            memory: Thresholds::new(50.0, 90.0),
            fan: Thresholds::new(3000.0, 5000.0),
            temperature: Thresholds::new(50.0, 70.0),
            port_loss: Thresholds::new(5.0, 20.0),
            ports: DEFAULT_PORTS.to_vec(),
            explicit_ports: false,
        }
    }
}

impl CheckConfig {
    /// Build from the matches of [`crate::cli::build_cli`] and validate
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let defaults = Self::default();

        let threshold = |warn: &str, crit: &str, fallback: Thresholds| {
            Thresholds::new(
                matches.get_one::<f64>(warn).copied().unwrap_or(fallback.warning),
                matches.get_one::<f64>(crit).copied().unwrap_or(fallback.critical),
            )
        };

        let requested: Vec<Mode> = matches
            .get_many::<Mode>("mode")
            .map(|values| values.copied().collect())
            .unwrap_or_default();

        let explicit_ports = matches.get_many::<u32>("port").is_some();
        let mut ports: Vec<u32> = matches
            .get_many::<u32>("port")
            .map(|values| values.copied().collect())
            .unwrap_or_else(|| defaults.ports.clone());
        let mut seen = Vec::with_capacity(ports.len());
        ports.retain(|p| {
            if seen.contains(p) {
                false
            } else {
                seen.push(*p);
                true
            }
        });

        let config = Self {
            base_url: matches
                .get_one::<String>("base-url")
                .cloned()
                .unwrap_or(defaults.base_url),
            username: matches.get_one::<String>("username").cloned().unwrap_or_default(),
            password: matches.get_one::<String>("password").cloned().unwrap_or_default(),
            modes: Mode::resolve(&requested),
            hide_cpu: matches.get_flag("nocpu"),
            hide_mem: matches.get_flag("nomem"),
            hide_temp: matches.get_flag("notemp"),
            hide_fans: matches.get_flag("nofans"),
            no_perfdata: matches.get_flag("noperfdata"),
            cpu: threshold("cpu-warning", "cpu-critical", defaults.cpu),
            memory: threshold("mem-warning", "mem-critical", defaults.memory),
            fan: threshold("fan-warning", "fan-critical", defaults.fan),
            temperature: threshold("temp-warning", "temp-critical", defaults.temperature),
            port_loss: threshold("stats-warning", "stats-critical", defaults.port_loss),
            ports,
            explicit_ports,
        };

        config.validate()?;
        Ok(config)
    }

    /// Credentials are mandatory; inverted thresholds are only reported
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CheckError::config("a username is required (--username)"));
        }
        if self.password.is_empty() {
            return Err(CheckError::config("a password is required (--password)"));
        }
        if self.base_url.trim().is_empty() {
            return Err(CheckError::config("the base URL must not be empty"));
        }

        for (name, thresholds) in self.thresholds() {
            if !thresholds.warning.is_finite() || !thresholds.critical.is_finite() {
                return Err(CheckError::config(format!(
                    "{} thresholds must be finite numbers",
                    name
                )));
            }
            if thresholds.is_inverted() {
                log::warn!(
                    "{} warning threshold ({}) is above the critical threshold ({}); WARNING can never be raised",
                    name,
                    thresholds.warning,
                    thresholds.critical
                );
            }
        }

        Ok(())
    }

    fn thresholds(&self) -> [(&'static str, &Thresholds); 5] {
        [
            ("CPU", &self.cpu),
            ("Memory", &self.memory),
            ("Fan", &self.fan),
            ("Temperature", &self.temperature),
            ("Port loss", &self.port_loss),
        ]
    }
}
