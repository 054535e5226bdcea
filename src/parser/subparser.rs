use crate::models::ProxyNode;
use crate::parser::explodes::{explode, is_valid_node};
use crate::utils::base64::url_safe_base64_decode;
use log::debug;

/// Unwraps a base64 encoded subscription body.
///
/// Only one level of encoding is removed. Returns `None` when the content
/// is not base64 or decodes to nothing, in which case the body is taken to
/// be a plain link list.
pub fn unwrap_subscription(content: &str) -> Option<String> {
    // Some providers wrap the encoded body at a fixed column width
    let compact: String = content.split_whitespace().collect();
    let decoded = url_safe_base64_decode(&compact);
    if decoded.trim().is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// Explode a subscription content into a vector of ProxyNode objects
///
/// Lines with unknown schemes or malformed links are skipped; only nodes
/// passing [`is_valid_node`] are returned, in input order. An empty result
/// is not an error here.
pub fn explode_sub(content: &str) -> Vec<ProxyNode> {
    let content = content.trim();
    if content.is_empty() {
        return Vec::new();
    }

    let text = unwrap_subscription(content).unwrap_or_else(|| content.to_string());

    let mut nodes = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match explode(line) {
            Some(node) if is_valid_node(&node) => nodes.push(node),
            Some(node) => debug!("Dropping invalid {} node '{}'", node.kind, node.name),
            None => debug!("Skipping unrecognised line: {}", line),
        }
    }

    nodes
}
