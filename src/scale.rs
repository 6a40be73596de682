//! Color scales that map an index value to a fill color.
//!
//! A [`ColorScale`] is the injected strategy the renderer calls for every
//! box that has data. The helpers mirror the scale kinds maps usually need:
//! categorical (ordinal) and binned numeric (quantize).

use crate::value::{Records, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

type ScaleFn = dyn Fn(&Value) -> Option<String> + Send + Sync;

/// Value -> color. `None` means "no color for this value" and the renderer
/// uses the default color instead.
#[derive(Clone)]
pub struct ColorScale(Arc<ScaleFn>);

impl ColorScale {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn constant(color: &str) -> Self {
        let color = color.to_string();
        Self::from_fn(move |_| Some(color.clone()))
    }

    /// Distinct values get range colors in first-seen order, cycling.
    pub fn ordinal(range: Vec<String>) -> Self {
        let seen: Mutex<Vec<String>> = Mutex::new(Vec::new());
        Self::from_fn(move |v| {
            if range.is_empty() {
                return None;
            }
            let key = v.to_string();
            let mut seen = seen.lock().ok()?;
            let idx = match seen.iter().position(|k| *k == key) {
                Some(i) => i,
                None => {
                    seen.push(key);
                    seen.len() - 1
                }
            };
            Some(range[idx % range.len()].clone())
        })
    }

    /// Uniform bins over `[lo, hi]`, one per range color. Values outside
    /// the domain clamp to the first or last color.
    pub fn quantize(domain: (f64, f64), range: Vec<String>) -> Self {
        Self::from_fn(move |v| {
            let x = v.as_f64()?;
            if range.is_empty() || x.is_nan() {
                return None;
            }
            let n = range.len();
            let span = domain.1 - domain.0;
            let t = if span == 0.0 { 0.0 } else { (x - domain.0) / span };
            let i = (t * n as f64).floor().clamp(0.0, (n - 1) as f64) as usize;
            Some(range[i].clone())
        })
    }

    pub fn color(&self, v: &Value) -> Option<String> {
        (self.0)(v)
    }
}

impl fmt::Debug for ColorScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColorScale(..)")
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::ordinal(vec!["#f3f3f3".to_string()])
    }
}

/// Min and max of an attribute across all records, after numeric scrubbing.
pub fn extent(records: &Records, attribute: &str) -> Option<(f64, f64)> {
    records
        .values()
        .filter_map(|r| r.get(attribute))
        .filter_map(|v| v.scrub_numeric().as_f64())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// Serializable description of a color scale, as written in map documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScaleSpec {
    Ordinal {
        range: Vec<String>,
    },
    Quantize {
        #[serde(default)]
        domain: Option<(f64, f64)>,
        range: Vec<String>,
    },
}

impl ScaleSpec {
    /// Build the scale. A quantize scale without an explicit domain takes
    /// the extent of `index` across `records`.
    pub fn build(&self, records: &Records, index: &str) -> ColorScale {
        match self {
            ScaleSpec::Ordinal { range } => ColorScale::ordinal(range.clone()),
            ScaleSpec::Quantize { domain, range } => {
                let domain = domain
                    .or_else(|| extent(records, index))
                    .unwrap_or((0.0, 1.0));
                ColorScale::quantize(domain, range.clone())
            }
        }
    }
}
