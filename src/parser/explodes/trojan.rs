use crate::models::{ProxyKind, ProxyNode};
use crate::utils::url::url_decode;
use std::collections::HashMap;
use url::Url;

/// Parse a Trojan link into a ProxyNode
///
/// Format: `trojan://password@server:port?sni=..&type=ws&path=..&host=..#name`
///
/// TLS and certificate-verification skipping are always enabled.
pub fn explode_trojan(trojan: &str) -> Option<ProxyNode> {
    if !trojan.starts_with("trojan://") {
        return None;
    }

    let url = Url::parse(trojan).ok()?;

    let host = url.host_str()?.to_string();
    // Trojan has no default port; a link without one is unusable
    let port = url.port()?;

    let mut params = HashMap::new();
    for (key, value) in url.query_pairs() {
        params.insert(key.to_string(), value.to_string());
    }

    let remark = url.fragment().map(url_decode).unwrap_or_default();
    let name = if remark.is_empty() {
        format!("{}:{}", host, port)
    } else {
        remark
    };

    let mut node = ProxyNode::new(ProxyKind::Trojan, name, host, port);
    node.password = Some(url_decode(url.username()));
    node.tls = true;
    node.skip_cert_verify = true;

    if let Some(sni) = params.get("sni").filter(|s| !s.is_empty()) {
        node.sni = Some(sni.clone());
    }

    if params.get("type").map(|s| s == "ws").unwrap_or(false) {
        node.network = Some("ws".to_string());
        node.ws_path = Some(
            params
                .get("path")
                .filter(|p| !p.is_empty())
                .cloned()
                .unwrap_or_else(|| "/".to_string()),
        );
        if let Some(ws_host) = params.get("host").filter(|h| !h.is_empty()) {
            node.set_ws_host(ws_host);
        }
    }

    Some(node)
}
