//! Plugin output as read by Icinga/Nagios.
//!
//! ```text
//! [CRITICAL] - states: critical=1 ok=1
//! \_ [CRITICAL] Device Info: Uptime - 1 days, 8 hrs
//!     \_ [CRITICAL] CPU Usage: 95.00%
//! \_ [OK] Ports Statistics
//! |CPU=95%;50;90;0;100
//! ```

use crate::core::result::{Overall, PartialResult};
use crate::core::status::Status;

const INDENT: &str = "    ";

pub fn render(overall: &Overall) -> String {
    let mut out = format!("[{}] - {}\n", overall.status(), overall.summary());

    for partial in overall.subchecks() {
        render_partial(partial, 0, &mut out);
    }

    let perfdata: Vec<String> = overall
        .subchecks()
        .iter()
        .flat_map(|p| p.all_perfdata())
        .map(|p| p.to_string())
        .collect();
    if !perfdata.is_empty() {
        out.push('|');
        out.push_str(&perfdata.join(" "));
        out.push('\n');
    }

    out
}

/// Single line used when the run cannot even start
pub fn render_fatal(message: &str) -> String {
    format!("[{}] - {}\n", Status::Unknown, message)
}

fn render_partial(partial: &PartialResult, depth: usize, out: &mut String) {
    // Plugin output must stay one line per node
    let text = partial.output.replace(['\n', '|'], " ");
    out.push_str(&format!(
        "{}\\_ [{}] {}\n",
        INDENT.repeat(depth),
        partial.status(),
        text
    ));

    for sub in &partial.subchecks {
        render_partial(sub, depth + 1, out);
    }
}
