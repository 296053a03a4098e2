use serde::{Deserialize, Serialize};

/// Optional per-node attributes carried through every projection: an alias
/// id, a display tag, an opaque data payload and a timeout.
///
/// The EL suffix order is fixed (`id`, `tag`, `data`, `maxWaitSeconds`) so
/// serialized output stays deterministic and diff-friendly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wait_seconds: Option<u32>,
}

impl Properties {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.tag.is_none()
            && self.data.is_none()
            && self.max_wait_seconds.is_none()
    }
}
