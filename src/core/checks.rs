//! One evaluation routine per metric family.
//!
//! Every routine returns a [`PartialResult`]; items that cannot be judged
//! become UNKNOWN subchecks instead of errors so the rest of the family is
//! still reported.

use std::collections::HashMap;

use super::result::{PartialResult, PerfData};
use super::status::{worst_of, Status, Thresholds};
use crate::netgear::{FanDetail, PoePort, PortStatistics, SensorDetail};
use crate::ui::format_bytes;

pub fn check_cpu(usage: f64, thresholds: &Thresholds, no_perfdata: bool) -> PartialResult {
    usage_check("CPU Usage", "CPU", usage, thresholds, no_perfdata)
}

pub fn check_memory(usage: f64, thresholds: &Thresholds, no_perfdata: bool) -> PartialResult {
    usage_check("RAM Usage", "RAM", usage, thresholds, no_perfdata)
}

fn usage_check(
    title: &str,
    label: &str,
    usage: f64,
    thresholds: &Thresholds,
    no_perfdata: bool,
) -> PartialResult {
    let mut partial =
        PartialResult::with_state(format!("{}: {:.2}%", title, usage), thresholds.evaluate(usage));
    if !no_perfdata {
        partial.add_perfdata(
            PerfData::new(label, usage)
                .uom("%")
                .thresholds(thresholds)
                .min(0.0)
                .max(100.0),
        );
    }
    partial
}

pub fn check_temperature(
    sensors: &[&SensorDetail],
    thresholds: &Thresholds,
    no_perfdata: bool,
) -> PartialResult {
    let mut partial = PartialResult::new("Temperature");
    let mut labels = LabelDeduper::default();

    for sensor in sensors {
        let name = labels.unique(&sensor.description);
        let Some(temp) = sensor.temperature else {
            partial.add_subcheck(PartialResult::unknown(&name, "no temperature reading"));
            continue;
        };

        let mut sub = PartialResult::with_state(
            format!("{}: {:.1}°C (max {:.1}°C)", name, temp, sensor.max_temp),
            thresholds.evaluate(temp),
        );
        if !no_perfdata {
            sub.add_perfdata(PerfData::new(name, temp).thresholds(thresholds));
        }
        partial.add_subcheck(sub);
    }

    partial
}

/// A fan at 0 RPM is stalled and is at least WARNING whatever the thresholds
pub fn fan_status(speed: f64, thresholds: &Thresholds) -> Status {
    let status = thresholds.evaluate(speed);
    if speed <= 0.0 {
        worst_of(status, Status::Warning)
    } else {
        status
    }
}

pub fn check_fans(fans: &[&FanDetail], thresholds: &Thresholds, no_perfdata: bool) -> PartialResult {
    let mut partial = PartialResult::new("Fans");
    let mut labels = LabelDeduper::default();

    for fan in fans {
        let name = labels.unique(&fan.description);
        let Some(speed) = fan.speed else {
            partial.add_subcheck(PartialResult::unknown(&name, "no speed reading"));
            continue;
        };

        let output = if speed <= 0.0 {
            format!("{}: {:.0} RPM (stalled)", name, speed)
        } else {
            format!("{}: {:.0} RPM", name, speed)
        };
        let mut sub = PartialResult::with_state(output, fan_status(speed, thresholds));
        if !no_perfdata {
            sub.add_perfdata(
                PerfData::new(format!("{} speed", name), speed)
                    .thresholds(thresholds)
                    .min(0.0),
            );
        }
        partial.add_subcheck(sub);
    }

    partial
}

/// Dropped share of all packets in percent; 0 when nothing was counted
pub fn loss_percent(dropped: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    dropped / total * 100.0
}

/// Loss per requested port. Inbound and outbound rows are matched by their
/// `port` field; a direction without a row is UNKNOWN for that port.
///
/// A port absent from both directions is UNKNOWN only when it was asked for
/// explicitly (`explicit_ports`); otherwise the switch simply has no such port.
pub fn check_ports(
    inbound: &PortStatistics,
    outbound: &PortStatistics,
    ports_to_check: &[u32],
    explicit_ports: bool,
    thresholds: &Thresholds,
    no_perfdata: bool,
) -> PartialResult {
    let mut partial = PartialResult::new("Ports Statistics");

    for &port in ports_to_check {
        let in_row = inbound.row(port);
        let out_row = outbound.row(port);
        if in_row.is_none() && out_row.is_none() {
            if !explicit_ports {
                log::debug!("Port {} not reported by the switch, skipping", port);
                continue;
            }
            partial.add_subcheck(PartialResult::unknown(
                format!("Port {}", port),
                "no statistics reported",
            ));
            continue;
        }

        let mut port_check = PartialResult::new(format!("Port {}", port));
        port_check.add_subcheck(match in_row {
            Some(row) => direction_check(
                port,
                "IN",
                row.in_drop_pkts,
                row.in_total_pkts,
                row.in_octets,
                thresholds,
                no_perfdata,
            ),
            None => PartialResult::unknown("IN", "no inbound statistics"),
        });
        port_check.add_subcheck(match out_row {
            Some(row) => direction_check(
                port,
                "OUT",
                row.out_drop_pkts,
                row.out_total_pkts,
                row.out_octets,
                thresholds,
                no_perfdata,
            ),
            None => PartialResult::unknown("OUT", "no outbound statistics"),
        });
        partial.add_subcheck(port_check);
    }

    partial
}

fn direction_check(
    port: u32,
    direction: &str,
    dropped: f64,
    total: f64,
    octets: f64,
    thresholds: &Thresholds,
    no_perfdata: bool,
) -> PartialResult {
    let loss = loss_percent(dropped, total);
    let mut sub = PartialResult::with_state(
        format!(
            "{}: {:.2}% loss ({:.0}/{:.0} packets dropped, {})",
            direction,
            loss,
            dropped,
            total,
            format_bytes(octets)
        ),
        thresholds.evaluate(loss),
    );

    if !no_perfdata {
        sub.add_perfdata(
            PerfData::new(format!("port {} {} loss", port, direction), loss)
                .uom("%")
                .thresholds(thresholds)
                .min(0.0)
                .max(100.0),
        );
        sub.add_perfdata(
            PerfData::new(format!("port {} {} octets", port, direction), octets)
                .uom("c")
                .min(0.0),
        );
    }
    sub
}

/// CRITICAL above the configured limit, WARNING exactly at it
pub fn poe_status(current_power: f64, power_limit: f64) -> Status {
    if current_power > power_limit {
        Status::Critical
    } else if current_power == power_limit {
        Status::Warning
    } else {
        Status::Ok
    }
}

pub fn check_poe(ports: &[PoePort], no_perfdata: bool) -> PartialResult {
    if ports.is_empty() {
        return PartialResult::unknown("Power over Ethernet Statistics", "no PoE ports reported");
    }

    let mut partial = PartialResult::new("Power over Ethernet Statistics");
    for port in ports {
        let (Some(current), Some(limit)) = (port.current_power, port.power_limit) else {
            partial.add_subcheck(PartialResult::unknown(
                format!("Port {}", port.port),
                "no power reading",
            ));
            continue;
        };

        let state = if port.enable { "enabled" } else { "disabled" };
        let mut sub = PartialResult::with_state(
            format!(
                "Port {} is {}. Current power: {:.2}/{:.2} W",
                port.port,
                state,
                current / 1000.0,
                limit / 1000.0
            ),
            poe_status(current, limit),
        );
        if !no_perfdata {
            sub.add_perfdata(
                PerfData::new(format!("port {} power", port.port), current)
                    .min(0.0)
                    .max(limit),
            );
        }
        partial.add_subcheck(sub);
    }

    partial
}

/// Items of stacked units share descriptions; perfdata labels must not collide
#[derive(Default)]
struct LabelDeduper {
    seen: HashMap<String, usize>,
}

impl LabelDeduper {
    fn unique(&mut self, label: &str) -> String {
        let count = self.seen.entry(label.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            label.to_string()
        } else {
            format!("{} #{}", label, count)
        }
    }
}
