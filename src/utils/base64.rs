use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 string to its original form.
///
/// # Arguments
/// * `input` - The Base64 encoded string, padded to a multiple of 4.
///
/// # Returns
/// The decoded string, or an empty string if the input is invalid Base64
/// or does not decode to UTF-8 text.
pub fn base64_decode(input: &str) -> String {
    match general_purpose::STANDARD.decode(input) {
        Ok(decoded) => String::from_utf8(decoded).unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Pads a Base64 string with `=` up to a multiple of 4.
pub fn pad_base64(input: &str) -> String {
    let rem = input.len() % 4;
    if rem == 0 {
        input.to_string()
    } else {
        format!("{}{}", input, "=".repeat(4 - rem))
    }
}

/// Decodes a Base64 string that may use the URL-safe alphabet and may be
/// missing its padding.
///
/// Returns an empty string when the input cannot be decoded.
pub fn url_safe_base64_decode(input: &str) -> String {
    base64_decode(&pad_base64(&url_safe_base64_reverse(input)))
}
