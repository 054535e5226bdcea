pub mod clash_output;

#[cfg(test)]
mod tests {
    use super::clash_output::{ClashProxy, CommonProxyOptions, WsOpts};
    use std::collections::BTreeMap;

    #[test]
    fn test_proxy_serializes_without_nulls() {
        let proxy = ClashProxy::Shadowsocks {
            common: CommonProxyOptions::builder("example-ss".to_string(), "example.com".to_string(), 8388)
                .udp(true)
                .build(),
            cipher: "aes-256-gcm".to_string(),
            password: "password".to_string(),
        };

        let yaml = serde_yaml::to_string(&proxy).unwrap();
        assert!(yaml.starts_with("type: ss\n"));
        assert!(yaml.contains("udp: true"));
        assert!(!yaml.contains("null"));
        assert!(!yaml.contains("sni"));
        assert!(!yaml.contains("skip-cert-verify"));
    }

    #[test]
    fn test_ws_opts_keys() {
        let mut headers = BTreeMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());
        let proxy = ClashProxy::Trojan {
            common: CommonProxyOptions::builder("t".to_string(), "h".to_string(), 443)
                .skip_cert_verify(true)
                .build(),
            password: "p".to_string(),
            network: Some("ws".to_string()),
            ws_opts: Some(WsOpts {
                path: "/ws".to_string(),
                headers: Some(headers),
            }),
        };

        let value: serde_yaml::Value = serde_yaml::to_value(&proxy).unwrap();
        assert_eq!(value["ws-opts"]["path"].as_str(), Some("/ws"));
        assert_eq!(value["ws-opts"]["headers"]["Host"].as_str(), Some("example.com"));
        assert_eq!(value["skip-cert-verify"].as_bool(), Some(true));
    }
}
