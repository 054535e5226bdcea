use crate::models::{ProxyKind, ProxyNode};

impl ProxyKind {
    /// Detects the kind of a link from its scheme prefix.
    pub fn from_link(link: &str) -> Option<ProxyKind> {
        ProxyKind::ALL
            .into_iter()
            .find(|kind| link.starts_with(kind.scheme_prefix()))
    }

    /// Runs the link parser owned by this kind.
    pub fn explode(self, link: &str) -> Option<ProxyNode> {
        match self {
            ProxyKind::Shadowsocks => super::ss::explode_ss(link),
            ProxyKind::VMess => super::vmess::explode_vmess(link),
            ProxyKind::Trojan => super::trojan::explode_trojan(link),
        }
    }
}

/// Explode a proxy link into a ProxyNode
///
/// Detects the scheme and calls the matching parser. Unrecognised schemes
/// and malformed links both yield `None`. The result has not been through
/// [`is_valid_node`] yet.
pub fn explode(link: &str) -> Option<ProxyNode> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    ProxyKind::from_link(link)?.explode(link)
}

/// Acceptance rule applied to every parsed node: a non-empty server, a
/// non-empty name and a non-zero port.
pub fn is_valid_node(node: &ProxyNode) -> bool {
    !node.server.is_empty() && !node.name.is_empty() && node.port > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_link() {
        assert_eq!(ProxyKind::from_link("ss://abc"), Some(ProxyKind::Shadowsocks));
        assert_eq!(ProxyKind::from_link("vmess://abc"), Some(ProxyKind::VMess));
        assert_eq!(ProxyKind::from_link("trojan://abc"), Some(ProxyKind::Trojan));
        assert_eq!(ProxyKind::from_link("ssr://abc"), None);
        assert_eq!(ProxyKind::from_link("vless://abc"), None);
    }

    #[test]
    fn test_explode_dispatch() {
        let node = explode("  ss://YWVzLTI1Ni1nY206cGFzcw==@1.2.3.4:8388#Test  ").unwrap();
        assert_eq!(node.kind, ProxyKind::Shadowsocks);
        assert!(explode("").is_none());
        assert!(explode("hysteria2://x@y:1").is_none());
    }

    #[test]
    fn test_is_valid_node() {
        let node = ProxyNode::new(ProxyKind::Trojan, "n".into(), "h".into(), 443);
        assert!(is_valid_node(&node));

        let mut zero_port = node.clone();
        zero_port.port = 0;
        assert!(!is_valid_node(&zero_port));

        let mut no_server = node.clone();
        no_server.server.clear();
        assert!(!is_valid_node(&no_server));

        let mut no_name = node;
        no_name.name.clear();
        assert!(!is_valid_node(&no_name));
    }
}
