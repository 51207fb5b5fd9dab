//! IP-range classification for outbound requests.
//!
//! Ranges are table driven so each class can be audited against its RFC.
//! IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are classified as their IPv4
//! form.
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// Network class of an address, for SSRF decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass {
    Public,
    Private,
    Loopback,
    Reserved,
    LinkLocal,
    /// Matched an operator-supplied CIDR.
    Blocklisted,
}

impl AddressClass {
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Loopback => "loopback",
            Self::Reserved => "reserved",
            Self::LinkLocal => "link_local",
            Self::Blocklisted => "blocklisted",
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const LOOPBACK: &[&str] = &["127.0.0.0/8", "::1/128"];

const PRIVATE: &[&str] = &[
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    // Carrier-grade NAT
    "100.64.0.0/10",
    // Benchmarking
    "198.18.0.0/15",
    "fc00::/7",
    // Deprecated site-local
    "fec0::/10",
];

const LINK_LOCAL: &[&str] = &["169.254.0.0/16", "fe80::/10"];

const RESERVED: &[&str] = &[
    "0.0.0.0/8",
    "192.0.0.0/24",
    "192.0.2.0/24",
    "198.51.100.0/24",
    "203.0.113.0/24",
    "224.0.0.0/4",
    "240.0.0.0/4",
    "255.255.255.255/32",
    "::/8",
    "64:ff9b::/96",
    "100::/64",
    "2001::/23",
    "2001:db8::/32",
    "ff00::/8",
];

/// Cloud metadata endpoints (AWS, GCP, Azure, ...) live here.
const METADATA_V4: Ipv4Addr = Ipv4Addr::new(169, 254, 0, 0);

#[derive(Debug, Clone)]
pub(crate) struct Cidr {
    network: IpAddr,
    prefix: u8,
}

impl Cidr {
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let (addr, prefix) = text.trim().split_once('/')?;
        let network = addr.parse::<IpAddr>().ok()?;
        let prefix = prefix.parse::<u8>().ok()?;
        match network {
            IpAddr::V4(_) if prefix > 32 => return None,
            IpAddr::V6(_) if prefix > 128 => return None,
            _ => {}
        }
        Some(Self { network, prefix })
    }

    pub(crate) fn contains(&self, ip: IpAddr) -> bool {
        match (ip, self.network) {
            (IpAddr::V4(ip), IpAddr::V4(net)) => {
                prefix_match(&ip.octets(), &net.octets(), self.prefix)
            }
            (IpAddr::V6(ip), IpAddr::V6(net)) => {
                prefix_match(&ip.octets(), &net.octets(), self.prefix)
            }
            _ => false,
        }
    }
}

fn prefix_match(ip: &[u8], net: &[u8], prefix: u8) -> bool {
    if prefix == 0 {
        return true;
    }
    let full = (prefix / 8) as usize;
    let rem = prefix % 8;

    if ip.len() < full || net.len() < full {
        return false;
    }

    if ip[..full] != net[..full] {
        return false;
    }

    if rem == 0 {
        return true;
    }

    let mask = 0xFFu8 << (8 - rem);
    ip[full] & mask == net[full] & mask
}

fn in_table(ip: IpAddr, table: &[&str]) -> bool {
    table
        .iter()
        .filter_map(|entry| Cidr::parse(entry))
        .any(|cidr| cidr.contains(ip))
}

/// Unwrap IPv4-mapped IPv6 so `::ffff:127.0.0.1` is judged as `127.0.0.1`.
fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6
            .to_ipv4_mapped()
            .map_or(IpAddr::V6(v6), IpAddr::V4),
        v4 @ IpAddr::V4(_) => v4,
    }
}

/// Classify an address against the built-in range tables.
#[must_use]
pub fn classify(ip: IpAddr) -> AddressClass {
    let ip = canonical(ip);
    if in_table(ip, LOOPBACK) {
        AddressClass::Loopback
    } else if in_table(ip, LINK_LOCAL) {
        AddressClass::LinkLocal
    } else if in_table(ip, PRIVATE) {
        AddressClass::Private
    } else if in_table(ip, RESERVED) {
        AddressClass::Reserved
    } else {
        AddressClass::Public
    }
}

/// Whether `ip` falls in `169.254.0.0/16`, home of cloud metadata services.
///
/// Overlaps link-local on purpose: this check stays explicit so it survives
/// any future change to the link-local table.
#[must_use]
pub fn is_metadata_endpoint(ip: IpAddr) -> bool {
    match canonical(ip) {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            let [ma, mb, ..] = METADATA_V4.octets();
            a == ma && b == mb
        }
        IpAddr::V6(_) => false,
    }
}

pub(crate) fn is_loopback(ip: IpAddr) -> bool {
    classify(ip) == AddressClass::Loopback
}
