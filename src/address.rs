//! Listen-address construction and the human-facing URL shown at startup.

use std::{
    io,
    net::{IpAddr, SocketAddr},
};

/// Shown when the listener cannot report a TCP address.
pub const UNKNOWN_ADDRESS: &str = "<unknown address>";

/// Builds the `host:port` string the server listens on.
///
/// The wildcard form is `:<port>`, which listens on every interface.
/// Otherwise the server is reachable from the loopback interface only.
pub fn listen_addr(port: u16, all_interfaces: bool) -> String {
    if all_interfaces {
        format!(":{}", port)
    } else {
        format!("127.0.0.1:{}", port)
    }
}

/// Translates a listen address into candidates the OS resolver accepts,
/// in the order they should be tried.
///
/// `:<port>` has no host part. It becomes the dual-stack `[::]:<port>`,
/// falling back to `0.0.0.0:<port>` on hosts without IPv6.
pub fn bind_addrs(listen_addr: &str) -> Vec<String> {
    match listen_addr.strip_prefix(':') {
        Some(port) => vec![format!("[::]:{}", port), format!("0.0.0.0:{}", port)],
        None => vec![listen_addr.to_string()],
    }
}

/// Display URL for the address a listener actually bound to.
pub fn listen_addr_url(addr: io::Result<SocketAddr>) -> String {
    match addr {
        Ok(addr) => endpoint_url(Some(addr.ip()), addr.port()),
        Err(_) => UNKNOWN_ADDRESS.to_string(),
    }
}

/// Loopback addresses render as `localhost`, the unspecified address as the
/// machine's hostname when it can be looked up, anything else verbatim.
pub fn endpoint_url(ip: Option<IpAddr>, port: u16) -> String {
    let Some(ip) = ip.map(|ip| ip.to_canonical()) else {
        return format!("http://:{}", port);
    };

    if ip.is_loopback() {
        return format!("http://localhost:{}", port);
    }

    if ip.is_unspecified() {
        if let Some(host) = local_hostname() {
            return format!("http://{}:{}", host, port);
        }
    }

    format!("http://{}", SocketAddr::new(ip, port))
}

fn local_hostname() -> Option<String> {
    match hostname::get() {
        Ok(name) => name.into_string().ok(),
        Err(err) => {
            tracing::debug!(%err, "hostname lookup failed");
            None
        }
    }
}
