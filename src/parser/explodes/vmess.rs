use crate::models::{ProxyKind, ProxyNode};
use crate::utils::base64::url_safe_base64_decode;
use serde_json::Value;

/// Reads a JSON field that providers emit either as a string or a number.
fn json_string(json: &Value, key: &str) -> String {
    match &json[key] {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Parse a VMess link into a ProxyNode
///
/// Format: `vmess://base64(json)` where the JSON object carries the v2rayN
/// share fields (`ps`, `add`, `port`, `id`, `aid`, `scy`, `net`, `host`,
/// `path`, `tls`, `sni`).
pub fn explode_vmess(vmess: &str) -> Option<ProxyNode> {
    let encoded = vmess.strip_prefix("vmess://")?;

    let decoded = url_safe_base64_decode(encoded.trim());
    if decoded.is_empty() {
        return None;
    }

    let json: Value = serde_json::from_str(&decoded).ok()?;
    if !json.is_object() {
        return None;
    }

    let add = json_string(&json, "add");
    let port_str = json_string(&json, "port");
    let port = port_str.parse::<u16>().ok()?;
    let remark = json_string(&json, "ps");
    let name = if remark.is_empty() {
        format!("{}:{}", add, port_str)
    } else {
        remark
    };

    let mut node = ProxyNode::new(ProxyKind::VMess, name, add.clone(), port);
    node.uuid = Some(json_string(&json, "id"));
    node.alter_id = json_string(&json, "aid").parse::<u32>().unwrap_or(0);

    let scy = json_string(&json, "scy");
    node.cipher = Some(if scy.is_empty() { "auto".to_string() } else { scy });

    let net = json_string(&json, "net");
    let host = json_string(&json, "host");
    if net == "ws" {
        let path = json_string(&json, "path");
        node.network = Some(net);
        node.ws_path = Some(if path.is_empty() { "/".to_string() } else { path });
        if !host.is_empty() {
            node.set_ws_host(&host);
        }
    } else if !net.is_empty() {
        node.network = Some(net);
    }

    if json_string(&json, "tls") == "tls" {
        let sni = json_string(&json, "sni");
        node.tls = true;
        node.skip_cert_verify = true;
        node.sni = [sni, host, add].into_iter().find(|s| !s.is_empty());
    }

    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::base64_encode;

    fn vmess_link(json: &str) -> String {
        format!("vmess://{}", base64_encode(json))
    }

    #[test]
    fn test_explode_vmess_ws() {
        let link = vmess_link(
            r#"{"v":"2","ps":"HK 01","add":"hk.example.com","port":"443","id":"b831381d-6324-4d53-ad4f-8cda48b30811","aid":"0","net":"ws","host":"example.com","path":"/x"}"#,
        );
        let node = explode_vmess(&link).unwrap();

        assert_eq!(node.kind, ProxyKind::VMess);
        assert_eq!(node.name, "HK 01");
        assert_eq!(node.server, "hk.example.com");
        assert_eq!(node.port, 443);
        assert_eq!(node.uuid.as_deref(), Some("b831381d-6324-4d53-ad4f-8cda48b30811"));
        assert_eq!(node.alter_id, 0);
        assert_eq!(node.cipher.as_deref(), Some("auto"));
        assert_eq!(node.network.as_deref(), Some("ws"));
        assert_eq!(node.ws_path.as_deref(), Some("/x"));
        assert_eq!(
            node.ws_headers.as_ref().and_then(|h| h.get("Host")).map(String::as_str),
            Some("example.com")
        );
        assert!(!node.tls);
    }

    #[test]
    fn test_explode_vmess_numeric_fields_and_tls() {
        let link = vmess_link(
            r#"{"ps":"","add":"1.2.3.4","port":8443,"id":"uuid","aid":64,"scy":"aes-128-gcm","net":"tcp","tls":"tls"}"#,
        );
        let node = explode_vmess(&link).unwrap();

        assert_eq!(node.name, "1.2.3.4:8443");
        assert_eq!(node.port, 8443);
        assert_eq!(node.alter_id, 64);
        assert_eq!(node.cipher.as_deref(), Some("aes-128-gcm"));
        assert_eq!(node.network.as_deref(), Some("tcp"));
        assert!(node.tls);
        assert!(node.skip_cert_verify);
        // Falls back to the server address when neither sni nor host is set
        assert_eq!(node.sni.as_deref(), Some("1.2.3.4"));
    }

    #[test]
    fn test_explode_vmess_sni_precedence() {
        let link = vmess_link(
            r#"{"ps":"a","add":"1.2.3.4","port":"443","id":"u","net":"ws","host":"cdn.example.com","tls":"tls","sni":"sni.example.com"}"#,
        );
        assert_eq!(explode_vmess(&link).unwrap().sni.as_deref(), Some("sni.example.com"));

        let link = vmess_link(
            r#"{"ps":"a","add":"1.2.3.4","port":"443","id":"u","net":"ws","host":"cdn.example.com","tls":"tls"}"#,
        );
        let node = explode_vmess(&link).unwrap();
        assert_eq!(node.sni.as_deref(), Some("cdn.example.com"));
        assert_eq!(node.ws_path.as_deref(), Some("/"));
    }

    #[test]
    fn test_explode_vmess_bad_alter_id_defaults_to_zero() {
        let link = vmess_link(r#"{"ps":"a","add":"h","port":"1","id":"u","aid":"x"}"#);
        assert_eq!(explode_vmess(&link).unwrap().alter_id, 0);
    }

    #[test]
    fn test_explode_vmess_invalid() {
        assert!(explode_vmess("vmess://%%%").is_none());
        assert!(explode_vmess(&vmess_link("not json")).is_none());
        assert!(explode_vmess(&vmess_link(r#"{"add":"h","port":"abc"}"#)).is_none());
        assert!(explode_vmess(&vmess_link("[1,2]")).is_none());
    }
}
