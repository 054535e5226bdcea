use linked_hash_map::LinkedHashMap;

use super::proxy_to_clash::{display_name, proxy_to_clash};
use crate::constants::country_label;
use crate::constants::rules::{
    AUTO_GROUP, AUTO_TEST_INTERVAL, AUTO_TEST_URL, DNS_FALLBACK, DNS_FALLBACK_FILTER_DOMAIN,
    DNS_FALLBACK_FILTER_IPCIDR, DNS_NAMESERVERS, PROXY_GROUP, RULES,
};
use crate::generator::yaml::clash_output::{
    ClashDns, ClashDnsFallbackFilter, ClashProxyGroup, ClashYamlOutput,
};
use crate::models::{ProxyNode, UNKNOWN_COUNTRY};

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_dns() -> ClashDns {
    ClashDns {
        enable: true,
        ipv6: false,
        nameserver: to_strings(DNS_NAMESERVERS),
        fallback: to_strings(DNS_FALLBACK),
        fallback_filter: ClashDnsFallbackFilter {
            geoip: true,
            ipcidr: to_strings(DNS_FALLBACK_FILTER_IPCIDR),
            domain: to_strings(DNS_FALLBACK_FILTER_DOMAIN),
        },
    }
}

/// Builds one select group per country, in order of first appearance.
///
/// Groups are keyed by their label, so codes sharing a label end up in the
/// same group. Nodes without a country go to the unknown bucket.
pub fn country_groups(nodes: &[ProxyNode]) -> Vec<ClashProxyGroup> {
    let mut groups: LinkedHashMap<String, Vec<String>> = LinkedHashMap::new();
    for node in nodes {
        let code = node.country.as_deref().unwrap_or(UNKNOWN_COUNTRY);
        groups
            .entry(country_label(code))
            .or_insert_with(Vec::new)
            .push(display_name(node));
    }

    groups
        .into_iter()
        .map(|(name, proxies)| ClashProxyGroup::Select { name, proxies })
        .collect()
}

/// Assembles the full Clash document for a list of nodes.
///
/// This is pure: no lookups happen here, nodes are expected to carry their
/// country already.
pub fn proxy_to_clash_output(nodes: &[ProxyNode]) -> ClashYamlOutput {
    let proxies: Vec<_> = nodes.iter().map(proxy_to_clash).collect();
    let proxy_names: Vec<String> = proxies.iter().map(|p| p.name().to_string()).collect();

    let per_country = country_groups(nodes);

    let mut select_members = Vec::with_capacity(1 + per_country.len() + proxy_names.len());
    select_members.push(AUTO_GROUP.to_string());
    select_members.extend(per_country.iter().map(|g| g.name().to_string()));
    select_members.extend(proxy_names.iter().cloned());

    let mut proxy_groups = Vec::with_capacity(2 + per_country.len());
    proxy_groups.push(ClashProxyGroup::Select {
        name: PROXY_GROUP.to_string(),
        proxies: select_members,
    });
    proxy_groups.push(ClashProxyGroup::UrlTest {
        name: AUTO_GROUP.to_string(),
        url: AUTO_TEST_URL.to_string(),
        interval: AUTO_TEST_INTERVAL,
        proxies: proxy_names,
    });
    proxy_groups.extend(per_country);

    ClashYamlOutput {
        port: 7890,
        socks_port: 7891,
        allow_lan: false,
        mode: "rule".to_string(),
        log_level: "silent".to_string(),
        external_controller: "127.0.0.1:9090".to_string(),
        secret: String::new(),
        dns: default_dns(),
        proxies,
        proxy_groups,
        rules: to_strings(RULES),
    }
}

/// Generates the Clash configuration text for a list of nodes.
pub fn generate_clash_config(nodes: &[ProxyNode]) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&proxy_to_clash_output(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyKind;
    use serde_yaml::Value;

    fn node(name: &str, server: &str, country: Option<&str>) -> ProxyNode {
        let mut n = ProxyNode::new(ProxyKind::Shadowsocks, name.to_string(), server.to_string(), 8388);
        n.cipher = Some("aes-256-gcm".to_string());
        n.password = Some("pass".to_string());
        n.country = country.map(str::to_string);
        n
    }

    #[test]
    fn test_same_country_single_group() {
        let nodes = vec![node("a", "1.1.1.1", Some("US")), node("b", "2.2.2.2", Some("US"))];
        let output = proxy_to_clash_output(&nodes);

        assert_eq!(output.proxy_groups.len(), 3);
        assert_eq!(output.proxy_groups[0].name(), PROXY_GROUP);
        assert_eq!(output.proxy_groups[1].name(), AUTO_GROUP);
        assert_eq!(output.proxy_groups[2].name(), "🇺🇸 美国");
        assert_eq!(
            output.proxy_groups[2].proxies(),
            &["🇺🇸 美国 | a".to_string(), "🇺🇸 美国 | b".to_string()]
        );
    }

    #[test]
    fn test_aggregate_membership_order() {
        let nodes = vec![
            node("a", "1.1.1.1", Some("JP")),
            node("b", "2.2.2.2", Some("HK")),
            node("c", "3.3.3.3", Some("JP")),
        ];
        let output = proxy_to_clash_output(&nodes);

        assert_eq!(
            output.proxy_groups[0].proxies(),
            &[
                "Auto",
                "🇯🇵 日本",
                "🇭🇰 香港",
                "🇯🇵 日本 | a",
                "🇭🇰 香港 | b",
                "🇯🇵 日本 | c",
            ]
            .map(String::from)
        );
        assert_eq!(
            output.proxy_groups[1].proxies(),
            &["🇯🇵 日本 | a", "🇭🇰 香港 | b", "🇯🇵 日本 | c"].map(String::from)
        );
    }

    #[test]
    fn test_unannotated_nodes_use_unknown_bucket() {
        let nodes = vec![node("a", "1.1.1.1", None), node("b", "2.2.2.2", Some(UNKNOWN_COUNTRY))];
        let groups = country_groups(&nodes);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name(), "🌐 未知");
        assert_eq!(groups[0].proxies(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_shared_label_merges() {
        let nodes = vec![node("a", "1.1.1.1", Some("GB")), node("b", "2.2.2.2", Some("UK"))];
        assert_eq!(country_groups(&nodes).len(), 1);
    }

    #[test]
    fn test_empty_document() {
        let text = generate_clash_config(&[]).unwrap();
        let doc: Value = serde_yaml::from_str(&text).unwrap();

        assert_eq!(doc["proxies"].as_sequence().map(Vec::len), Some(0));
        let groups = doc["proxy-groups"].as_sequence().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1]["proxies"].as_sequence().map(Vec::len), Some(0));
        let rules = doc["rules"].as_sequence().unwrap();
        assert_eq!(rules.len(), RULES.len());
        assert_eq!(rules.last().and_then(Value::as_str), Some("MATCH,Proxy"));
    }

    #[test]
    fn test_top_level_key_order() {
        let text = generate_clash_config(&[node("a", "1.1.1.1", Some("US"))]).unwrap();
        let doc: Value = serde_yaml::from_str(&text).unwrap();
        let keys: Vec<&str> = doc
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();

        assert_eq!(
            keys,
            vec![
                "port",
                "socks-port",
                "allow-lan",
                "mode",
                "log-level",
                "external-controller",
                "secret",
                "dns",
                "proxies",
                "proxy-groups",
                "rules",
            ]
        );
        assert_eq!(doc["dns"]["fallback-filter"]["geoip"].as_bool(), Some(true));
        assert_eq!(doc["proxy-groups"][1]["type"].as_str(), Some("url-test"));
        assert_eq!(doc["proxy-groups"][1]["interval"].as_u64(), Some(300));
        assert!(!text.contains('&'), "document must not contain anchors");
    }
}
