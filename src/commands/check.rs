//! The check run: login, one fetch-then-evaluate step per mode, logout.

use std::io::Write;

use anyhow::{Context, Result};

use crate::core::checks;
use crate::core::{CheckConfig, Mode, Overall, PartialResult, Status};
use crate::netgear::{Direction, NetgearClient, PortStatistics, Transport};
use crate::ui;

/// Run against the switch over HTTP and print to stdout
pub fn execute(config: &CheckConfig) -> Status {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match NetgearClient::connect(&config.base_url).context("Invalid base URL") {
        Ok(client) => execute_with(client, config, &mut out),
        Err(e) => {
            emit(&mut out, &ui::render_fatal(&format!("{:#}", e)));
            Status::Unknown
        }
    }
}

/// Full run on an already constructed client; returns the exit status
pub fn execute_with<T: Transport, W: Write>(
    mut client: NetgearClient<T>,
    config: &CheckConfig,
    out: &mut W,
) -> Status {
    if let Err(e) = login(&mut client, config) {
        emit(out, &ui::render_fatal(&format!("{:#}", e)));
        return Status::Unknown;
    }

    let overall = run_modes(&client, config);
    emit(out, &ui::render(&overall));

    client.logout();
    overall.status()
}

fn login<T: Transport>(client: &mut NetgearClient<T>, config: &CheckConfig) -> Result<()> {
    client
        .login(&config.username, &config.password)
        .context("Error while trying to login")
}

fn emit<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        log::warn!("Failed to write plugin output: {}", e);
    }
}

/// Evaluate every enabled mode in order and fold them into one result
pub fn run_modes<T: Transport>(client: &NetgearClient<T>, config: &CheckConfig) -> Overall {
    let mut overall = Overall::new();

    for mode in &config.modes {
        log::info!("Running {:?} checks", mode);
        let partial = match mode {
            Mode::Basic => mode_basic(client, config),
            Mode::Ports => mode_ports(client, config),
            Mode::Poe => mode_poe(client, config),
            Mode::All => continue,
        };
        log::debug!("{:?} checks finished with {}", mode, partial.status());
        overall.add(partial);
    }

    overall
}

/// CPU, memory, temperature and fans from `device_info`
pub fn mode_basic<T: Transport>(client: &NetgearClient<T>, config: &CheckConfig) -> PartialResult {
    let info = match client.device_info() {
        Ok(info) => info,
        Err(e) => return PartialResult::unknown("Device Info", e),
    };
    let uptime = match info.uptime() {
        Ok(uptime) => uptime,
        Err(e) => return PartialResult::unknown("Device Info", e),
    };

    let mut partial = PartialResult::with_state(format!("Device Info: Uptime - {}", uptime), Status::Ok);

    if !config.hide_cpu {
        partial.add_subcheck(match info.cpu_usage() {
            Ok(usage) => checks::check_cpu(usage, &config.cpu, config.no_perfdata),
            Err(e) => PartialResult::unknown("CPU check error", e),
        });
    }

    if !config.hide_mem {
        partial.add_subcheck(match info.memory_usage() {
            Ok(usage) => checks::check_memory(usage, &config.memory, config.no_perfdata),
            Err(e) => PartialResult::unknown("Memory check error", e),
        });
    }

    if !config.hide_temp {
        partial.add_subcheck(match info.sensors() {
            Ok(sensors) => {
                checks::check_temperature(&sensors, &config.temperature, config.no_perfdata)
            }
            Err(e) => PartialResult::unknown("Temperature check error", e),
        });
    }

    if !config.hide_fans {
        partial.add_subcheck(match info.fans() {
            Ok(fans) => checks::check_fans(&fans, &config.fan, config.no_perfdata),
            Err(e) => PartialResult::unknown("Fans check error", e),
        });
    }

    partial
}

/// Packet loss of the requested ports
pub fn mode_ports<T: Transport>(client: &NetgearClient<T>, config: &CheckConfig) -> PartialResult {
    let inbound = match client.port_statistics(Direction::Inbound) {
        Ok(stats) => stats,
        Err(e) => return PartialResult::unknown("Ports Statistics", e),
    };
    let outbound = match client.port_statistics(Direction::Outbound) {
        Ok(stats) => stats,
        Err(e) => return PartialResult::unknown("Ports Statistics", e),
    };

    if is_full_page(&inbound) || is_full_page(&outbound) {
        log::warn!("Switch returned a full page of port statistics; ports beyond it may not be reported");
    }

    checks::check_ports(
        &inbound,
        &outbound,
        &config.ports,
        config.explicit_ports,
        &config.port_loss,
        config.no_perfdata,
    )
}

/// The API answers one page of 25 rows; a full page may hide further ports
fn is_full_page(stats: &PortStatistics) -> bool {
    stats.rows.len() >= 25
}

/// Power draw of every PoE port
pub fn mode_poe<T: Transport>(client: &NetgearClient<T>, config: &CheckConfig) -> PartialResult {
    match client.poe_status() {
        Ok(status) => checks::check_poe(&status.poe_port_config, config.no_perfdata),
        Err(e) => PartialResult::unknown("Power over Ethernet Statistics", e),
    }
}
