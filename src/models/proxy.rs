//! Proxy model definitions
//!
//! Contains the core data structures for parsed proxy nodes.

use std::collections::BTreeMap;

/// Country code used when no geolocation provider could place a server.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Represents the type of a proxy.
///
/// The set is closed: every variant owns a link parser in
/// `parser::explodes`, and adding a scheme means adding a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    Shadowsocks,
    VMess,
    Trojan,
}

impl ProxyKind {
    /// Every supported kind, in dispatch order.
    pub const ALL: [ProxyKind; 3] = [ProxyKind::Shadowsocks, ProxyKind::VMess, ProxyKind::Trojan];

    /// URI scheme prefix recognised for this kind.
    pub fn scheme_prefix(self) -> &'static str {
        match self {
            ProxyKind::Shadowsocks => "ss://",
            ProxyKind::VMess => "vmess://",
            ProxyKind::Trojan => "trojan://",
        }
    }

    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyKind::Shadowsocks => "SS",
            ProxyKind::VMess => "VMess",
            ProxyKind::Trojan => "Trojan",
        }
    }
}

impl std::fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents one parsed proxy server.
///
/// Nodes are only built by the link parsers; `server` is non-empty and
/// `port` is non-zero for every node that leaves the subscription decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyNode {
    pub kind: ProxyKind,
    /// Display label, from the link fragment or `host:port`.
    pub name: String,
    pub server: String,
    pub port: u16,

    pub cipher: Option<String>,
    pub password: Option<String>,
    pub uuid: Option<String>,
    pub alter_id: u32,

    /// Transport tag such as `ws` or `grpc`.
    pub network: Option<String>,
    pub tls: bool,
    pub sni: Option<String>,
    pub skip_cert_verify: bool,
    pub ws_path: Option<String>,
    pub ws_headers: Option<BTreeMap<String, String>>,

    pub udp: bool,
    /// Two-letter country code or [`UNKNOWN_COUNTRY`]; `None` until the
    /// node has been through geolocation.
    pub country: Option<String>,
}

impl ProxyNode {
    /// Creates a node with no scheme specific options set.
    pub fn new(kind: ProxyKind, name: String, server: String, port: u16) -> Self {
        ProxyNode {
            kind,
            name,
            server,
            port,
            cipher: None,
            password: None,
            uuid: None,
            alter_id: 0,
            network: None,
            tls: false,
            sni: None,
            skip_cert_verify: false,
            ws_path: None,
            ws_headers: None,
            udp: true,
            country: None,
        }
    }

    /// Returns a copy of this node annotated with a country code.
    pub fn with_country(&self, country: impl Into<String>) -> Self {
        ProxyNode {
            country: Some(country.into()),
            ..self.clone()
        }
    }

    /// Sets a websocket `Host` header.
    pub fn set_ws_host(&mut self, host: &str) {
        let mut headers = BTreeMap::new();
        headers.insert("Host".to_string(), host.to_string());
        self.ws_headers = Some(headers);
    }
}
