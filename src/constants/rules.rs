//! Fixed DNS settings and routing rules written into every document.

/// Name of the aggregate selection group every rule routes to.
pub const PROXY_GROUP: &str = "Proxy";

/// Name of the latency-probe group.
pub const AUTO_GROUP: &str = "Auto";

/// Probe target of the latency-probe group.
pub const AUTO_TEST_URL: &str = "http://www.gstatic.com/generate_204";

/// Probe interval of the latency-probe group in seconds.
pub const AUTO_TEST_INTERVAL: u32 = 300;

pub const DNS_NAMESERVERS: &[&str] = &[
    "223.5.5.5",
    "180.76.76.76",
    "119.29.29.29",
    "117.50.11.11",
    "117.50.10.10",
    "114.114.114.114",
    "https://dns.alidns.com/dns-query",
    "https://doh.360.cn/dns-query",
];

pub const DNS_FALLBACK: &[&str] = &[
    "8.8.8.8",
    "tls://dns.rubyfish.cn:853",
    "tls://1.0.0.1:853",
    "tls://dns.google:853",
    "https://dns.rubyfish.cn/dns-query",
    "https://cloudflare-dns.com/dns-query",
    "https://dns.google/dns-query",
];

pub const DNS_FALLBACK_FILTER_IPCIDR: &[&str] = &["240.0.0.0/4", "0.0.0.0/32", "127.0.0.1/32"];

pub const DNS_FALLBACK_FILTER_DOMAIN: &[&str] = &[
    "+.google.com",
    "+.facebook.com",
    "+.youtube.com",
    "+.xn--ngstr-lra8j.com",
    "+.google.cn",
    "+.googleapis.cn",
    "+.gvt1.com",
];

/// Routing rules, first match wins. The last entry is the catch-all.
pub const RULES: &[&str] = &[
    "DOMAIN-SUFFIX,chatgpt.com,Proxy",
    "DOMAIN-SUFFIX,openai.com,Proxy",
    "DOMAIN-SUFFIX,ghcr.io,Proxy",
    "DOMAIN-SUFFIX,googleapis.cn,Proxy",
    "DOMAIN-KEYWORD,googleapis.cn,Proxy",
    "DOMAIN,safebrowsing.urlsec.qq.com,DIRECT",
    "DOMAIN,safebrowsing.googleapis.com,DIRECT",
    "DOMAIN,ocsp.apple.com,Proxy",
    "DOMAIN-SUFFIX,digicert.com,Proxy",
    "DOMAIN-SUFFIX,entrust.net,Proxy",
    "DOMAIN,ocsp.verisign.net,Proxy",
    "DOMAIN-SUFFIX,apps.apple.com,Proxy",
    "DOMAIN,itunes.apple.com,Proxy",
    "DOMAIN-SUFFIX,blobstore.apple.com,Proxy",
    "DOMAIN-SUFFIX,music.apple.com,DIRECT",
    "DOMAIN-SUFFIX,mzstatic.com,DIRECT",
    "DOMAIN-SUFFIX,itunes.apple.com,DIRECT",
    "DOMAIN-SUFFIX,icloud.com,DIRECT",
    "DOMAIN-SUFFIX,icloud-content.com,DIRECT",
    "DOMAIN-SUFFIX,me.com,DIRECT",
    "DOMAIN-SUFFIX,akadns.net,DIRECT",
    "DOMAIN-SUFFIX,aaplimg.com,DIRECT",
    "DOMAIN-SUFFIX,cdn-apple.com,DIRECT",
    "DOMAIN-SUFFIX,apple.com,DIRECT",
    "DOMAIN-SUFFIX,apple-cloudkit.com,DIRECT",
    "DOMAIN,e.crashlytics.com,REJECT",
    "DOMAIN-SUFFIX,cn,DIRECT",
    "DOMAIN-KEYWORD,amazon,Proxy",
    "DOMAIN-KEYWORD,google,Proxy",
    "DOMAIN-KEYWORD,gmail,Proxy",
    "DOMAIN-KEYWORD,youtube,Proxy",
    "DOMAIN-KEYWORD,facebook,Proxy",
    "DOMAIN-SUFFIX,fb.me,Proxy",
    "DOMAIN-SUFFIX,fbcdn.net,Proxy",
    "DOMAIN-KEYWORD,twitter,Proxy",
    "DOMAIN-KEYWORD,instagram,Proxy",
    "DOMAIN-KEYWORD,dropbox,Proxy",
    "DOMAIN-SUFFIX,twimg.com,Proxy",
    "DOMAIN-KEYWORD,blogspot,Proxy",
    "DOMAIN-SUFFIX,youtu.be,Proxy",
    "DOMAIN-KEYWORD,whatsapp,Proxy",
    "DOMAIN-KEYWORD,github,Proxy",
    "DOMAIN-SUFFIX,telegram.org,Proxy",
    "DOMAIN-SUFFIX,t.me,Proxy",
    "IP-CIDR,91.108.4.0/22,Proxy,no-resolve",
    "IP-CIDR,91.108.8.0/22,Proxy,no-resolve",
    "IP-CIDR,91.108.12.0/22,Proxy,no-resolve",
    "IP-CIDR,91.108.16.0/22,Proxy,no-resolve",
    "IP-CIDR,91.108.56.0/22,Proxy,no-resolve",
    "IP-CIDR,149.154.160.0/22,Proxy,no-resolve",
    "IP-CIDR,149.154.164.0/22,Proxy,no-resolve",
    "IP-CIDR,149.154.168.0/22,Proxy,no-resolve",
    "IP-CIDR,149.154.172.0/22,Proxy,no-resolve",
    "DOMAIN-SUFFIX,local,DIRECT",
    "IP-CIDR,127.0.0.0/8,DIRECT",
    "IP-CIDR,172.16.0.0/12,DIRECT",
    "IP-CIDR,192.168.0.0/16,DIRECT",
    "IP-CIDR,10.0.0.0/8,DIRECT",
    "IP-CIDR,17.0.0.0/8,DIRECT",
    "IP-CIDR,100.64.0.0/10,DIRECT",
    "GEOIP,CN,DIRECT",
    "MATCH,Proxy",
];
