use crate::node::{NavTree, NodeId};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Joins encoded segments. Never produced by base64 or percent-encoding.
pub const SEGMENT_DELIMITER: char = '.';

/// Encodes one path segment: base64 of the UTF-8 bytes, then percent-escaped.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(&STANDARD.encode(segment.as_bytes())).into_owned()
}

/// Reverses [`encode_segment`].
///
/// Undecodable input is kept verbatim as an opaque name. Such a name will
/// simply fail to match anything during resolution.
pub fn decode_segment(encoded: &str) -> String {
    let unescaped = match urlencoding::decode(encoded) {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => encoded.to_string(),
    };

    match STANDARD.decode(unescaped.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            log::warn!("Undecodable path segment {:?}: {}", encoded, e);
            unescaped
        }
    }
}

pub fn encode_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| encode_segment(segment.as_ref()))
        .collect::<Vec<_>>()
        .join(&SEGMENT_DELIMITER.to_string())
}

/// Decodes a `.`-joined path. An empty string is an empty path.
pub fn decode_path(encoded: &str) -> Vec<String> {
    if encoded.is_empty() {
        return Vec::new();
    }

    encoded.split(SEGMENT_DELIMITER).map(decode_segment).collect()
}

/// The pair of paths a client sends back to identify the active node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePath {
    /// Real names from the root, synthetic groups excluded. Used for lookups.
    pub actual: Vec<String>,

    /// Display names from the root, synthetic groups included. Only used to
    /// restore which branches are open.
    pub virtual_path: Vec<String>,
}

impl ActivePath {
    pub fn new(actual: Vec<String>, virtual_path: Vec<String>) -> Self {
        Self {
            actual,
            virtual_path,
        }
    }

    pub fn decode(a_path: Option<&str>, v_path: Option<&str>) -> Self {
        Self {
            actual: a_path.map(decode_path).unwrap_or_default(),
            virtual_path: v_path.map(decode_path).unwrap_or_default(),
        }
    }

    /// Encoded `(a_path, v_path)` ready for a query string.
    pub fn encode(&self) -> (String, String) {
        (encode_path(&self.actual), encode_path(&self.virtual_path))
    }

    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }
}

impl NavTree {
    /// Real names from the root down to `id`, skipping synthetic groups.
    pub fn actual_path(&self, id: NodeId) -> Vec<String> {
        let mut path: Vec<String> = self
            .parents(id, true, true, false)
            .into_iter()
            .map(|node| self.node(node).real_name.clone())
            .collect();
        path.reverse();
        path
    }

    /// Display names from the root down to `id`, synthetic groups included.
    pub fn virtual_path(&self, id: NodeId) -> Vec<String> {
        let mut path: Vec<String> = self
            .parents(id, true, true, true)
            .into_iter()
            .map(|node| self.node(node).name.clone())
            .collect();
        path.reverse();
        path
    }

    pub fn active_path(&self, id: NodeId) -> ActivePath {
        ActivePath::new(self.actual_path(id), self.virtual_path(id))
    }
}
