//! Widget configuration.
//!
//! [`Options`] is the fully resolved configuration. Callers describe changes
//! as an [`OptionsPatch`]; [`Options::merge`] replaces every top-level field
//! the patch sets, except `tooltip`, which is merged field by field.

use crate::breakpoint::Breakpoints;
use crate::layout::Layout;
use crate::scale::ColorScale;
use crate::states::{US_LABELS, US_LAYOUT};
use crate::tooltip::{DirectionFn, TooltipLayout};
use crate::value::Records;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display variants for one region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub full: String,
    pub short: String,
    pub ap: String,
}

pub type Labels = BTreeMap<String, Label>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    Full,
    #[default]
    Short,
    Ap,
}

impl Label {
    pub fn get(&self, style: LabelStyle) -> &str {
        match style {
            LabelStyle::Full => &self.full,
            LabelStyle::Short => &self.short,
            LabelStyle::Ap => &self.ap,
        }
    }
}

/// How the index attribute is interpreted before it reaches the color scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    #[default]
    Numeric,
    String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipMode {
    /// Only the fixed panel shows content.
    Static,
    /// Only the popup next to the hovered box.
    #[default]
    Dynamic,
    /// Popup on wide screens, fixed panel on small ones.
    Toggle,
}

/// Attribute columns listed by the default tooltip.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Whitelist {
    /// Every attribute of the first record, resolved on load.
    #[default]
    All,
    Columns(Vec<String>),
}

impl Whitelist {
    pub fn columns(&self) -> &[String] {
        match self {
            Whitelist::All => &[],
            Whitelist::Columns(c) => c,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TooltipOptions {
    pub enabled: bool,
    pub mode: TooltipMode,
    /// Mount id of the static panel.
    pub el: String,
    /// Custom content builder; `None` uses the attribute table.
    pub layout: Option<TooltipLayout>,
    /// Custom placement rule; `None` keeps the popup on the map.
    pub direction: Option<DirectionFn>,
    pub whitelist: Whitelist,
    pub column1: String,
    pub column2: String,
    pub note_index: Option<String>,
    /// `[vertical, horizontal]` gap in pixels for the cardinal directions.
    pub offset: [f32; 2],
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: TooltipMode::Dynamic,
            el: ".squaire-toolbox".to_string(),
            layout: None,
            direction: None,
            whitelist: Whitelist::All,
            column1: String::new(),
            column2: String::new(),
            note_index: None,
            offset: [6.0, 6.0],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Options {
    /// Mount id of the map.
    pub el: String,
    pub layout: Layout,
    pub labels: Labels,
    pub label_style: LabelStyle,
    /// Attribute that drives the fill color.
    pub index: String,
    pub index_type: IndexType,
    pub colors: ColorScale,
    /// Attribute copied into each box's class.
    pub class_index: Option<String>,
    pub default_color: String,
    pub tooltip: TooltipOptions,
    pub breakpoints: Breakpoints,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            el: "#map-container".to_string(),
            layout: Layout::Triples(
                US_LAYOUT
                    .iter()
                    .map(|&(x, y, id)| (x, y, id.to_string()))
                    .collect(),
            ),
            labels: us_labels(),
            label_style: LabelStyle::Short,
            index: "value".to_string(),
            index_type: IndexType::Numeric,
            colors: ColorScale::default(),
            class_index: None,
            default_color: "#f3f3f3".to_string(),
            tooltip: TooltipOptions::default(),
            breakpoints: Breakpoints::default(),
        }
    }
}

/// Label table for the default US layout.
pub fn us_labels() -> Labels {
    US_LABELS
        .iter()
        .map(|&(id, full, short, ap)| {
            (
                id.to_string(),
                Label {
                    full: full.to_string(),
                    short: short.to_string(),
                    ap: ap.to_string(),
                },
            )
        })
        .collect()
}

/// Overrides for [`TooltipOptions`]. Unset fields keep their current value.
#[derive(Clone, Debug, Default)]
pub struct TooltipPatch {
    pub enabled: Option<bool>,
    pub mode: Option<TooltipMode>,
    pub el: Option<String>,
    pub layout: Option<Option<TooltipLayout>>,
    pub direction: Option<Option<DirectionFn>>,
    pub whitelist: Option<Whitelist>,
    pub column1: Option<String>,
    pub column2: Option<String>,
    pub note_index: Option<Option<String>>,
    pub offset: Option<[f32; 2]>,
}

/// Overrides for [`Options`]. Unset fields keep their current value.
#[derive(Clone, Debug, Default)]
pub struct OptionsPatch {
    pub el: Option<String>,
    pub layout: Option<Layout>,
    pub labels: Option<Labels>,
    pub label_style: Option<LabelStyle>,
    pub index: Option<String>,
    pub index_type: Option<IndexType>,
    pub colors: Option<ColorScale>,
    pub class_index: Option<Option<String>>,
    pub default_color: Option<String>,
    pub tooltip: Option<TooltipPatch>,
    pub breakpoints: Option<Breakpoints>,
}

fn pick<T: Clone>(patch: &Option<T>, current: &T) -> T {
    patch.as_ref().unwrap_or(current).clone()
}

impl TooltipOptions {
    pub fn merge(&self, patch: &TooltipPatch) -> TooltipOptions {
        TooltipOptions {
            enabled: pick(&patch.enabled, &self.enabled),
            mode: pick(&patch.mode, &self.mode),
            el: pick(&patch.el, &self.el),
            layout: pick(&patch.layout, &self.layout),
            direction: pick(&patch.direction, &self.direction),
            whitelist: pick(&patch.whitelist, &self.whitelist),
            column1: pick(&patch.column1, &self.column1),
            column2: pick(&patch.column2, &self.column2),
            note_index: pick(&patch.note_index, &self.note_index),
            offset: pick(&patch.offset, &self.offset),
        }
    }
}

impl Options {
    /// New options with `patch` applied; `self` is left untouched.
    pub fn merge(&self, patch: &OptionsPatch) -> Options {
        Options {
            el: pick(&patch.el, &self.el),
            layout: pick(&patch.layout, &self.layout),
            labels: pick(&patch.labels, &self.labels),
            label_style: pick(&patch.label_style, &self.label_style),
            index: pick(&patch.index, &self.index),
            index_type: pick(&patch.index_type, &self.index_type),
            colors: pick(&patch.colors, &self.colors),
            class_index: pick(&patch.class_index, &self.class_index),
            default_color: pick(&patch.default_color, &self.default_color),
            tooltip: match &patch.tooltip {
                Some(t) => self.tooltip.merge(t),
                None => self.tooltip.clone(),
            },
            breakpoints: pick(&patch.breakpoints, &self.breakpoints),
        }
    }

    /// Replace a `*` whitelist with the first record's attributes, in the
    /// record's own order, leaving out the class and note columns.
    pub fn expand_whitelist(&mut self, records: &Records) {
        if self.tooltip.whitelist != Whitelist::All {
            return;
        }
        let class_index = self.class_index.as_deref();
        let note_index = self.tooltip.note_index.as_deref();
        let columns = records
            .values()
            .next()
            .map(|first| {
                first
                    .keys()
                    .filter(|k| {
                        let k = Some(k.as_str());
                        k != class_index && k != note_index
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        self.tooltip.whitelist = Whitelist::Columns(columns);
    }
}
