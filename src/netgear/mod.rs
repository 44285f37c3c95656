//! Client for the Netgear switch management API (`/api/v1`).

mod client;
pub mod transport;
pub mod types;

pub use client::{Direction, NetgearClient};
pub use transport::{ApiRequest, HttpTransport, Transport, REQUEST_TIMEOUT};
pub use types::{
    parse_percent, DeviceInfo, FanDetail, PoePort, PoeStatus, PortStatisticRow, PortStatistics,
    SensorDetail,
};
