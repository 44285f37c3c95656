//! Check states and the threshold comparison shared by every metric check.

use std::fmt;

/// Plugin state, declared in folding order.
///
/// `Unknown` sorts above `Critical`: a value that could not be judged is never
/// allowed to hide behind a clean result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Exit code expected by Icinga/Nagios
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Warning/critical pair for one metric family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Thresholds {
    pub fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    pub fn evaluate(&self, value: f64) -> Status {
        evaluate_threshold(value, self.warning, self.critical)
    }

    /// True when warning is above critical, which makes WARNING unreachable
    pub fn is_inverted(&self) -> bool {
        self.warning > self.critical
    }
}

/// Critical wins over warning; both bounds are inclusive.
pub fn evaluate_threshold(value: f64, warn: f64, crit: f64) -> Status {
    if value >= crit {
        Status::Critical
    } else if value >= warn {
        Status::Warning
    } else {
        Status::Ok
    }
}

pub fn worst_of(a: Status, b: Status) -> Status {
    a.max(b)
}

/// Fold any number of states, starting from OK
pub fn worst<I>(states: I) -> Status
where
    I: IntoIterator<Item = Status>,
{
    states.into_iter().fold(Status::Ok, worst_of)
}
