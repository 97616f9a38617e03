//! Host/port address helpers.

/// Host used when an address names only a port.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Split `host:port` into its parts.
///
/// IPv6 hosts must be bracketed (`[::1]:26257`); the brackets are stripped
/// from the returned host. The host may be empty (`:26257`).
pub fn split_host_port(addr: &str) -> Result<(&str, u16), String> {
    let (host, port) = if let Some(rest) = addr.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| "missing ']' in address".to_string())?;
        let port = after
            .strip_prefix(':')
            .ok_or_else(|| "missing port in address".to_string())?;
        (host, port)
    } else {
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| "missing port in address".to_string())?;
        if host.contains(':') {
            return Err("too many colons in address".to_string());
        }
        (host, port)
    };

    if port.is_empty() {
        return Err("missing port in address".to_string());
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| format!("invalid port {:?}", port))?;
    Ok((host, port))
}

/// Join a host and port, bracketing IPv6 hosts.
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Make sure an address has a host component.
///
/// `:26257` becomes `127.0.0.1:26257`. Addresses that already carry a host,
/// or that cannot be split, are returned unchanged.
pub fn ensure_host(addr: &str) -> String {
    match split_host_port(addr) {
        Ok(("", port)) => join_host_port(LOOPBACK_HOST, port),
        _ => addr.to_string(),
    }
}
