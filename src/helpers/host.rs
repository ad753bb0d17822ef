// Local host detection

use std::net::IpAddr;

/// True when `host` names the loopback interface.
pub fn is_loopback_host(host: &str) -> bool {
    let host = host.trim().trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<IpAddr>().map(|ip| ip.is_loopback()).unwrap_or(false)
}

/// True when `host` refers to the machine running the sampler: a loopback
/// name or address, or the machine's own host name.
pub fn is_local_host(host: &str, machine_name: Option<&str>) -> bool {
    if is_loopback_host(host) {
        return true;
    }
    machine_name.is_some_and(|name| !name.is_empty() && name.eq_ignore_ascii_case(host.trim()))
}

/// Host name reported by the operating system.
pub fn machine_host_name() -> Option<String> {
    sysinfo::System::host_name()
}
