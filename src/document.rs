//! JSON map documents: region data plus option overrides.
//!
//! ```json
//! {
//!   "data": { "NY": { "value": "$4" }, "AL": { "value": "$1" } },
//!   "options": {
//!     "index": "value",
//!     "colors": { "type": "quantize", "domain": [1, 5], "range": ["#c9e2f5", "#0098db"] },
//!     "tooltip": { "enabled": true, "mode": "toggle", "whitelist": ["value"] }
//!   }
//! }
//! ```

use crate::breakpoint::{Breakpoint, Breakpoints};
use crate::error::Result;
use crate::layout::Layout;
use crate::options::{IndexType, LabelStyle, Labels, OptionsPatch, TooltipMode, TooltipPatch, Whitelist};
use crate::scale::ScaleSpec;
use crate::value::Records;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    #[serde(default)]
    pub data: Records,
    #[serde(default)]
    pub options: OptionsFile,
}

/// `"*"` or a list of column names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhitelistFile {
    Wildcard(Wildcard),
    Columns(Vec<String>),
}

/// The literal string `"*"`. Any other string is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wildcard;

impl Serialize for Wildcard {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str("*")
    }
}

impl<'de> Deserialize<'de> for Wildcard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "*" {
            Ok(Wildcard)
        } else {
            Err(de::Error::invalid_value(de::Unexpected::Str(&s), &"\"*\""))
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipFile {
    pub enabled: Option<bool>,
    pub mode: Option<TooltipMode>,
    pub el: Option<String>,
    pub whitelist: Option<WhitelistFile>,
    pub column1: Option<String>,
    pub column2: Option<String>,
    pub note_index: Option<String>,
    pub offset: Option<[f32; 2]>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsFile {
    pub el: Option<String>,
    pub layout: Option<Layout>,
    pub labels: Option<Labels>,
    pub label_style: Option<LabelStyle>,
    pub index: Option<String>,
    pub index_type: Option<IndexType>,
    pub colors: Option<ScaleSpec>,
    pub class_index: Option<String>,
    pub default_color: Option<String>,
    pub tooltip: Option<TooltipFile>,
    pub breakpoints: Option<Vec<Breakpoint>>,
}

impl From<&TooltipFile> for TooltipPatch {
    fn from(t: &TooltipFile) -> Self {
        TooltipPatch {
            enabled: t.enabled,
            mode: t.mode,
            el: t.el.clone(),
            layout: None,
            direction: None,
            whitelist: t.whitelist.as_ref().map(|w| match w {
                WhitelistFile::Columns(c) => Whitelist::Columns(c.clone()),
                WhitelistFile::Wildcard(_) => Whitelist::All,
            }),
            column1: t.column1.clone(),
            column2: t.column2.clone(),
            note_index: t.note_index.clone().map(Some),
            offset: t.offset,
        }
    }
}

impl MapDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let doc = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), regions = doc.data.len(), "loaded map document");
        Ok(doc)
    }

    /// Options overrides described by the document. The color scale is
    /// built against the document data and the effective index attribute.
    pub fn patch(&self) -> Result<OptionsPatch> {
        let o = &self.options;
        let index = o.index.clone().unwrap_or_else(|| "value".to_string());
        let breakpoints = o.breakpoints.clone().map(Breakpoints::new).transpose()?;
        Ok(OptionsPatch {
            el: o.el.clone(),
            layout: o.layout.clone(),
            labels: o.labels.clone(),
            label_style: o.label_style,
            index: o.index.clone(),
            index_type: o.index_type,
            colors: o.colors.as_ref().map(|spec| spec.build(&self.data, &index)),
            class_index: o.class_index.clone().map(Some),
            default_color: o.default_color.clone(),
            tooltip: o.tooltip.as_ref().map(TooltipPatch::from),
            breakpoints,
        })
    }

    /// Overrides for switching the map to another index attribute,
    /// rebuilding the color scale for that attribute's values.
    pub fn index_patch(&self, index: &str) -> OptionsPatch {
        OptionsPatch {
            index: Some(index.to_string()),
            colors: self.options.colors.as_ref().map(|spec| spec.build(&self.data, index)),
            ..Default::default()
        }
    }

    /// Every attribute name used by any region, in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for key in self.data.values().flat_map(|r| r.keys()) {
            if !out.contains(key) {
                out.push(key.clone());
            }
        }
        out
    }
}
