use crate::constants::country_label;
use crate::generator::yaml::clash_output::{ClashProxy, CommonProxyOptions, WsOpts};
use crate::models::{ProxyKind, ProxyNode, UNKNOWN_COUNTRY};

/// Name a node is listed under in the generated document.
///
/// Nodes placed in a known country get the country label in front of their
/// own name; unlocated and unannotated nodes keep their name as is.
pub fn display_name(node: &ProxyNode) -> String {
    match node.country.as_deref() {
        Some(code) if !code.is_empty() && code != UNKNOWN_COUNTRY => {
            format!("{} | {}", country_label(code), node.name)
        }
        _ => node.name.clone(),
    }
}

fn build_common_proxy_options(node: &ProxyNode, remark: &str) -> CommonProxyOptions {
    CommonProxyOptions::builder(remark.to_string(), node.server.clone(), node.port)
        .udp(node.udp)
        .build()
}

fn build_ws_opts(node: &ProxyNode) -> Option<WsOpts> {
    if node.network.as_deref() != Some("ws") {
        return None;
    }
    Some(WsOpts {
        path: node.ws_path.clone().unwrap_or_else(|| "/".to_string()),
        headers: node.ws_headers.clone(),
    })
}

fn handle_shadowsocks(node: &ProxyNode, remark: &str) -> ClashProxy {
    ClashProxy::Shadowsocks {
        common: build_common_proxy_options(node, remark),
        cipher: node.cipher.clone().unwrap_or_default(),
        password: node.password.clone().unwrap_or_default(),
    }
}

fn handle_vmess(node: &ProxyNode, remark: &str) -> ClashProxy {
    let mut common = build_common_proxy_options(node, remark);
    if node.tls {
        common.tls = Some(true);
        common.sni = node.sni.clone();
        common.skip_cert_verify = Some(node.skip_cert_verify);
    }

    ClashProxy::VMess {
        common,
        uuid: node.uuid.clone().unwrap_or_default(),
        alter_id: node.alter_id,
        cipher: node.cipher.clone().unwrap_or_else(|| "auto".to_string()),
        network: node.network.clone(),
        ws_opts: build_ws_opts(node),
    }
}

fn handle_trojan(node: &ProxyNode, remark: &str) -> ClashProxy {
    // Trojan always runs over TLS, so only the TLS knobs are written
    let mut common = build_common_proxy_options(node, remark);
    common.sni = node.sni.clone();
    common.skip_cert_verify = Some(node.skip_cert_verify);

    let ws_opts = build_ws_opts(node);
    ClashProxy::Trojan {
        common,
        password: node.password.clone().unwrap_or_default(),
        network: ws_opts.as_ref().map(|_| "ws".to_string()),
        ws_opts,
    }
}

/// Convert one node into its Clash proxy entry.
pub fn proxy_to_clash(node: &ProxyNode) -> ClashProxy {
    let remark = display_name(node);
    match node.kind {
        ProxyKind::Shadowsocks => handle_shadowsocks(node, &remark),
        ProxyKind::VMess => handle_vmess(node, &remark),
        ProxyKind::Trojan => handle_trojan(node, &remark),
    }
}
