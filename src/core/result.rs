//! Hierarchical check results.
//!
//! A [`PartialResult`] is one node of the tree printed by the plugin. Its
//! state is the worst of the explicit state (if any) and the states of its
//! subchecks, so a parent can never look healthier than a child. The
//! [`Overall`] root folds every attached family into the exit status.

use std::fmt;

use super::status::{worst, worst_of, Status, Thresholds};

/// A single performance data point: `'label'=value[uom];warn;crit;min;max`
#[derive(Debug, Clone, PartialEq)]
pub struct PerfData {
    pub label: String,
    pub value: f64,
    pub uom: Option<&'static str>,
    pub warn: Option<f64>,
    pub crit: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PerfData {
    pub fn new<S: Into<String>>(label: S, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            uom: None,
            warn: None,
            crit: None,
            min: None,
            max: None,
        }
    }

    pub fn uom(mut self, uom: &'static str) -> Self {
        self.uom = Some(uom);
        self
    }

    pub fn thresholds(mut self, thresholds: &Thresholds) -> Self {
        self.warn = Some(thresholds.warning);
        self.crit = Some(thresholds.critical);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    fn quoted_label(&self) -> String {
        if self
            .label
            .chars()
            .any(|c| c.is_whitespace() || c == '=' || c == '\'')
        {
            format!("'{}'", self.label.replace('\'', "''"))
        } else {
            self.label.clone()
        }
    }
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();

        let mut fields = vec![
            format!("{}{}", self.value, self.uom.unwrap_or("")),
            optional(self.warn),
            optional(self.crit),
            optional(self.min),
            optional(self.max),
        ];
        while fields.len() > 1 && fields.last().is_some_and(|s| s.is_empty()) {
            fields.pop();
        }

        write!(f, "{}={}", self.quoted_label(), fields.join(";"))
    }
}

/// One node of the result tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialResult {
    pub output: String,
    state: Option<Status>,
    pub perfdata: Vec<PerfData>,
    pub subchecks: Vec<PartialResult>,
}

impl PartialResult {
    pub fn new<S: Into<String>>(output: S) -> Self {
        Self {
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn with_state<S: Into<String>>(output: S, state: Status) -> Self {
        Self {
            output: output.into(),
            state: Some(state),
            ..Default::default()
        }
    }

    /// Synthetic node for a metric that could not be computed
    pub fn unknown<S: fmt::Display, E: fmt::Display>(label: S, err: E) -> Self {
        Self::with_state(format!("{}: {}", label, err), Status::Unknown)
    }

    pub fn set_state(&mut self, state: Status) {
        self.state = Some(state);
    }

    pub fn add_subcheck(&mut self, sub: PartialResult) {
        self.subchecks.push(sub);
    }

    pub fn add_perfdata(&mut self, perfdata: PerfData) {
        self.perfdata.push(perfdata);
    }

    /// Effective state: explicit state folded with every subcheck.
    /// A node with neither is UNKNOWN.
    pub fn status(&self) -> Status {
        let children = self.subchecks.iter().map(PartialResult::status);
        match self.state {
            Some(state) => worst_of(state, worst(children)),
            None if self.subchecks.is_empty() => Status::Unknown,
            None => worst(children),
        }
    }

    /// Perfdata of this node and all descendants, depth first
    pub fn all_perfdata(&self) -> Vec<&PerfData> {
        let mut out: Vec<&PerfData> = self.perfdata.iter().collect();
        for sub in &self.subchecks {
            out.extend(sub.all_perfdata());
        }
        out
    }
}

/// Root of the result tree
#[derive(Debug, Clone, Default)]
pub struct Overall {
    worst: Status,
    subchecks: Vec<PartialResult>,
}

impl Overall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, partial: PartialResult) {
        self.worst = worst_of(self.worst, partial.status());
        self.subchecks.push(partial);
    }

    pub fn subchecks(&self) -> &[PartialResult] {
        &self.subchecks
    }

    /// Without any attached result there is nothing to vouch for
    pub fn status(&self) -> Status {
        if self.subchecks.is_empty() {
            Status::Unknown
        } else {
            self.worst
        }
    }

    /// `states: critical=1 warning=0 ok=2 unknown=0`, omitting zero counts
    pub fn summary(&self) -> String {
        if self.subchecks.is_empty() {
            return "no checks were performed".to_string();
        }

        let order = [
            Status::Critical,
            Status::Unknown,
            Status::Warning,
            Status::Ok,
        ];
        let counts: Vec<String> = order
            .iter()
            .filter_map(|state| {
                let n = self
                    .subchecks
                    .iter()
                    .filter(|sub| sub.status() == *state)
                    .count();
                (n > 0).then(|| format!("{}={}", state.label().to_lowercase(), n))
            })
            .collect();

        format!("states: {}", counts.join(" "))
    }
}
