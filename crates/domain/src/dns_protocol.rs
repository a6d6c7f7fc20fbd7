use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;

pub const DNS_PORT: u16 = 53;

/// Wire transport a query is sent over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransportProtocol {
    Udp,
    Tcp,
}

impl TransportProtocol {
    /// Lowercase prefix used in measurement keys (`udpA`, `tcpADO`).
    pub fn key_prefix(&self) -> &'static str {
        match self {
            TransportProtocol::Udp => "udp",
            TransportProtocol::Tcp => "tcp",
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            TransportProtocol::Udp => "UDP",
            TransportProtocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.protocol_name())
    }
}

/// An IPv4 recursive nameserver taken from the host configuration.
///
/// The port is 53 unless an override names another one (`10.0.0.1:5353`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nameserver {
    ip: Ipv4Addr,
    port: u16,
}

impl Nameserver {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self { ip, port: DNS_PORT }
    }

    pub fn with_port(ip: Ipv4Addr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ip, self.port))
    }
}

impl From<Ipv4Addr> for Nameserver {
    fn from(ip: Ipv4Addr) -> Self {
        Self::new(ip)
    }
}

impl From<SocketAddrV4> for Nameserver {
    fn from(addr: SocketAddrV4) -> Self {
        Self::with_port(*addr.ip(), addr.port())
    }
}

impl fmt::Display for Nameserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == DNS_PORT {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{}:{}", self.ip, self.port)
        }
    }
}

impl FromStr for Nameserver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(ip) = s.parse::<Ipv4Addr>() {
            return Ok(Self::new(ip));
        }

        s.parse::<SocketAddrV4>()
            .map(Self::from)
            .map_err(|_| format!("Not an IPv4 nameserver address: '{}'", s))
    }
}
