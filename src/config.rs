//! Compile request: the full parameter set of one compile, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::{BorderSpec, CornerOverrides};
use crate::sample::SampleSpec;
use crate::{NinePatchError, Result};

pub const DEFAULT_PREFIX: &str = "windowdesign1";

/// Everything a compile needs besides the pixels. Missing JSON fields take the defaults:
/// border 30/31/28/33, corners locked to the border, 1px edge samples and a 3x3 center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileRequest {
    pub prefix: String,
    pub border: BorderSpec,
    pub corners: CornerOverrides,
    pub samples: SampleSpec,
}

impl Default for CompileRequest {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            border: BorderSpec::default(),
            corners: CornerOverrides::default(),
            samples: SampleSpec::default(),
        }
    }
}

impl CompileRequest {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NinePatchError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| NinePatchError::Config(e.to_string()))
    }
}

/// Prefixes are pasted into C identifiers, so only ASCII alphanumerics and `_` are allowed.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(NinePatchError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{CenterSample, EdgeSample};

    #[test]
    fn empty_object_gives_defaults() {
        let req = CompileRequest::from_json_str("{}").unwrap();
        assert_eq!(req, CompileRequest::default());
        assert_eq!(
            req.samples.center,
            CenterSample { offset_x: 0, offset_y: 0, width: 3, height: 3 }
        );
        assert!(req.corners.is_locked());
    }

    #[test]
    fn partial_fields_merge_with_defaults() {
        let req = CompileRequest::from_json_str(
            r#"{
                "prefix": "button",
                "border": { "left": 3, "right": 3, "top": 3, "bottom": 3 },
                "corners": { "top_left": { "width": 5 } },
                "samples": { "top": { "offset": 2 } }
            }"#,
        )
        .unwrap();
        assert_eq!(req.prefix, "button");
        assert_eq!(req.border, BorderSpec::new(3, 3, 3, 3));
        assert_eq!(req.corners.top_left.width, Some(5));
        assert_eq!(req.corners.top_left.height, None);
        assert_eq!(req.samples.top, EdgeSample { offset: 2, length: 1 });
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = CompileRequest::from_json_str("{ \"border\": 4 }").unwrap_err();
        assert!(matches!(err, NinePatchError::Config(_)));
    }

    #[test]
    fn json_round_trip_keeps_request() {
        let mut req = CompileRequest::default();
        req.prefix = "panel_2".into();
        req.samples.left.length = 4;
        let back = CompileRequest::from_json_str(&req.to_json_string().unwrap()).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn prefix_must_be_identifier_safe() {
        assert!(validate_prefix("watercolor_button").is_ok());
        assert!(validate_prefix("").is_err());
        assert!(validate_prefix("my-button").is_err());
        assert!(validate_prefix("a b").is_err());
    }
}
