use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Installs the global Prometheus recorder and serves it on `[::]:{port}/metrics`.
///
/// Recording through the `metrics` facade is a no-op until this is called, so library
/// code can record unconditionally.
pub fn init_metrics(port: u16) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port))
        .install()
}
