use crate::models::UNKNOWN_COUNTRY;

/// Flag and localized name for a country code, e.g. `🇯🇵 日本`.
///
/// Codes outside the table render as a globe followed by the raw code.
pub fn country_label(code: &str) -> String {
    let label = match code {
        "US" => "🇺🇸 美国",
        "JP" => "🇯🇵 日本",
        "HK" => "🇭🇰 香港",
        "SG" => "🇸🇬 新加坡",
        "TW" => "🇹🇼 台湾",
        "KR" => "🇰🇷 韩国",
        "GB" | "UK" => "🇬🇧 英国",
        "DE" => "🇩🇪 德国",
        "FR" => "🇫🇷 法国",
        "CA" => "🇨🇦 加拿大",
        "AU" => "🇦🇺 澳大利亚",
        "NL" => "🇳🇱 荷兰",
        "RU" => "🇷🇺 俄罗斯",
        "IN" => "🇮🇳 印度",
        "BR" => "🇧🇷 巴西",
        "CN" => "🇨🇳 中国",
        "IT" => "🇮🇹 意大利",
        "ES" => "🇪🇸 西班牙",
        "PL" => "🇵🇱 波兰",
        "TR" => "🇹🇷 土耳其",
        "TH" => "🇹🇭 泰国",
        "VN" => "🇻🇳 越南",
        "PH" => "🇵🇭 菲律宾",
        "ID" => "🇮🇩 印度尼西亚",
        "MY" => "🇲🇾 马来西亚",
        UNKNOWN_COUNTRY => "🌐 未知",
        other => return format!("🌐 {}", other),
    };
    label.to_string()
}
