use std::net::{IpAddr, Ipv4Addr};

/// Host advertised when no LAN address can be found
pub const FALLBACK_HOST: &str = "localhost";

/// Best-guess LAN-reachable IPv4 address of this host, as text.
///
/// Enumeration failures are logged and treated as "nothing found".
pub fn advertise_host() -> String {
    let interfaces = match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces,
        Err(e) => {
            tracing::warn!("Failed to enumerate network interfaces: {}", e);
            return FALLBACK_HOST.to_string();
        }
    };

    let candidates = interfaces
        .iter()
        .filter(|iface| !iface.is_loopback())
        .map(|iface| {
            tracing::debug!("Interface {} has address {}", iface.name, iface.ip());
            iface.ip()
        });

    match pick_lan_address(candidates) {
        Some(ip) => ip.to_string(),
        None => FALLBACK_HOST.to_string(),
    }
}

/// Pick the address to advertise out of interface addresses in enumeration
/// order. `192.168.0.0/16` wins over the other private ranges.
pub fn pick_lan_address<I>(addrs: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    let mut other_private = None;
    for addr in addrs {
        let IpAddr::V4(v4) = addr else { continue };
        if v4.is_loopback() || !v4.is_private() {
            continue;
        }
        let [a, b, _, _] = v4.octets();
        if a == 192 && b == 168 {
            return Some(v4);
        }
        other_private.get_or_insert(v4);
    }
    other_private
}
