//! Public geolocation services queried in order until one answers.
//!
//! Each provider only knows how to build its lookup URL and how to pull a
//! country code out of its own response shape. Issuing the request, the
//! timeout and the fallback order live in [`super::resolver`].

use serde_json::Value;

/// One external IP → country lookup service.
pub trait GeoProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Lookup URL for `host`.
    fn endpoint(&self, host: &str) -> String;

    /// Pulls a two-letter country code out of a response body.
    fn extract_country(&self, body: &str) -> Option<String>;
}

/// Accepts exactly two characters.
fn two_letter(code: &str) -> Option<String> {
    let code = code.trim();
    if code.chars().count() == 2 {
        Some(code.to_string())
    } else {
        None
    }
}

fn json_field(body: &str, field: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get(field)?.as_str().and_then(two_letter)
}

/// <https://country.is>
pub struct CountryIs;

impl GeoProvider for CountryIs {
    fn name(&self) -> &'static str {
        "country.is"
    }

    fn endpoint(&self, host: &str) -> String {
        format!("https://api.country.is/{}", host)
    }

    fn extract_country(&self, body: &str) -> Option<String> {
        json_field(body, "country")
    }
}

/// <https://ipwho.is>
pub struct IpWhoIs;

impl GeoProvider for IpWhoIs {
    fn name(&self) -> &'static str {
        "ipwho.is"
    }

    fn endpoint(&self, host: &str) -> String {
        format!("https://ipwho.is/{}", host)
    }

    fn extract_country(&self, body: &str) -> Option<String> {
        let json: Value = serde_json::from_str(body).ok()?;
        if json.get("success").and_then(Value::as_bool) != Some(true) {
            return None;
        }
        json.get("country_code")?.as_str().and_then(two_letter)
    }
}

/// <http://ip-api.com>
pub struct IpApi;

impl GeoProvider for IpApi {
    fn name(&self) -> &'static str {
        "ip-api.com"
    }

    fn endpoint(&self, host: &str) -> String {
        format!("http://ip-api.com/json/{}?fields=status,countryCode", host)
    }

    fn extract_country(&self, body: &str) -> Option<String> {
        let json: Value = serde_json::from_str(body).ok()?;
        if json.get("status").and_then(Value::as_str) != Some("success") {
            return None;
        }
        json.get("countryCode")?.as_str().and_then(two_letter)
    }
}

/// <https://ipinfo.io>
pub struct IpInfo;

impl GeoProvider for IpInfo {
    fn name(&self) -> &'static str {
        "ipinfo.io"
    }

    fn endpoint(&self, host: &str) -> String {
        format!("https://ipinfo.io/{}/json", host)
    }

    fn extract_country(&self, body: &str) -> Option<String> {
        json_field(body, "country")
    }
}

/// <https://ipapi.co>, which answers with a bare country code.
pub struct IpApiCo;

impl GeoProvider for IpApiCo {
    fn name(&self) -> &'static str {
        "ipapi.co"
    }

    fn endpoint(&self, host: &str) -> String {
        format!("https://ipapi.co/{}/country/", host)
    }

    fn extract_country(&self, body: &str) -> Option<String> {
        let code = body.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase()) {
            Some(code.to_string())
        } else {
            None
        }
    }
}

/// <https://freegeoip.app>
pub struct FreeGeoIp;

impl GeoProvider for FreeGeoIp {
    fn name(&self) -> &'static str {
        "freegeoip.app"
    }

    fn endpoint(&self, host: &str) -> String {
        format!("https://freegeoip.app/json/{}", host)
    }

    fn extract_country(&self, body: &str) -> Option<String> {
        json_field(body, "country_code")
    }
}

/// The provider chain in lookup order.
pub fn default_providers() -> Vec<Box<dyn GeoProvider>> {
    vec![
        Box::new(CountryIs),
        Box::new(IpWhoIs),
        Box::new(IpApi),
        Box::new(IpInfo),
        Box::new(IpApiCo),
        Box::new(FreeGeoIp),
    ]
}
