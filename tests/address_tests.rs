use servedir::address::{
    UNKNOWN_ADDRESS, bind_addrs, endpoint_url, listen_addr, listen_addr_url,
};
use std::{
    io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
};

#[test]
fn test_listen_addr() {
    assert_eq!(listen_addr(0, true), ":0");
    assert_eq!(listen_addr(0, false), "127.0.0.1:0");
    assert_eq!(listen_addr(8080, true), ":8080");
    assert_eq!(listen_addr(8080, false), "127.0.0.1:8080");
}

#[test]
fn test_bind_addrs() {
    assert_eq!(bind_addrs(":1"), ["[::]:1", "0.0.0.0:1"]);
    assert_eq!(bind_addrs("127.0.0.1:0"), ["127.0.0.1:0"]);
}

#[test]
fn test_loopback_url() {
    let addr = SocketAddr::from(([127, 0, 0, 1], 80));
    assert_eq!(listen_addr_url(Ok(addr)), "http://localhost:80");

    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 80);
    assert_eq!(listen_addr_url(Ok(addr)), "http://localhost:80");

    let mapped = IpAddr::V6(Ipv4Addr::LOCALHOST.to_ipv6_mapped());
    assert_eq!(endpoint_url(Some(mapped), 80), "http://localhost:80");
}

#[test]
fn test_unspecified_url() {
    let addr = SocketAddr::from(([0, 0, 0, 0], 80));
    let got = listen_addr_url(Ok(addr));
    assert!(got.starts_with("http://"), "{got}");
    assert!(got.ends_with(":80"), "{got}");
}

#[test]
fn test_specific_interface_url() {
    let addr = SocketAddr::from(([192, 168, 1, 10], 8080));
    assert_eq!(listen_addr_url(Ok(addr)), "http://192.168.1.10:8080");

    let ip: IpAddr = "2001:db8::1".parse().unwrap();
    assert_eq!(endpoint_url(Some(ip), 80), "http://[2001:db8::1]:80");
}

#[test]
fn test_degenerate_urls() {
    assert_eq!(endpoint_url(None, 80), "http://:80");

    let err = io::Error::new(io::ErrorKind::Unsupported, "not a TCP socket");
    assert_eq!(listen_addr_url(Err(err)), UNKNOWN_ADDRESS);
}
