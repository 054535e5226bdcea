use crate::models::{ProxyKind, ProxyNode};
use crate::utils::base64::url_safe_base64_decode;
use crate::utils::url::url_decode;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `method:password@server:port` as found in legacy links
    static ref LEGACY_SS_REGEX: Regex = Regex::new(r"^(.+?):(.+?)@(.+?):(\d+)$").unwrap();
}

/// Parse a Shadowsocks link into a ProxyNode
///
/// Two shapes are accepted:
/// * SIP002: `ss://base64(method:password)@server:port#name`
/// * Legacy: `ss://base64(method:password@server:port)#name`
pub fn explode_ss(ss: &str) -> Option<ProxyNode> {
    let ss_content = ss.strip_prefix("ss://")?;

    // Extract fragment (remark) if present
    let (main, mut ps) = match ss_content.split_once('#') {
        Some((main, fragment)) => (main, url_decode(fragment)),
        None => (ss_content, String::new()),
    };

    let method;
    let password;
    let server;
    let port;

    if let Some((secret, server_part)) = main.split_once('@') {
        // The user info is normally base64, possibly with percent-encoded
        // padding, but some providers send it raw
        let secret = url_decode(secret);
        let decoded = url_safe_base64_decode(&secret);
        let user_info = if decoded.contains(':') { decoded } else { secret };
        let (m, p) = user_info.split_once(':')?;
        if m.is_empty() || p.is_empty() {
            return None;
        }
        method = m.to_string();
        password = p.to_string();

        // Drop any plugin path/query before splitting off the port
        let server_part = server_part
            .split(|c| c == '/' || c == '?')
            .next()
            .unwrap_or(server_part);
        let (host, port_str) = server_part.rsplit_once(':')?;
        server = host.to_string();
        port = port_str.parse::<u16>().ok()?;
    } else {
        let decoded = url_safe_base64_decode(main);
        let caps = LEGACY_SS_REGEX.captures(decoded.trim())?;
        method = caps[1].to_string();
        password = caps[2].to_string();
        server = caps[3].to_string();
        port = caps[4].parse::<u16>().ok()?;
    }

    if ps.is_empty() {
        ps = format!("{}:{}", server, port);
    }

    let mut node = ProxyNode::new(ProxyKind::Shadowsocks, ps, server, port);
    node.cipher = Some(method);
    node.password = Some(password);
    Some(node)
}
