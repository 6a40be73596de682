//! Squaire: grid cartograms.
//!
//! Regions (US states by default) are drawn as equal squares on a grid,
//! colored from one attribute of the caller's data, labelled per screen
//! size, with an optional hover tooltip mirrored into a fixed panel.
//!
//! ```no_run
//! use squaire::{OptionsPatch, Records, Squaire};
//!
//! let map = Squaire::new(Records::new(), &OptionsPatch::default(), 940.0)?;
//! std::fs::write("map.svg", squaire::svg::render(&map))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod breakpoint;
pub mod color;
pub mod dimensions;
pub mod document;
pub mod error;
pub mod layout;
pub mod logging;
pub mod options;
pub mod raster;
pub mod render;
pub mod resize;
pub mod scale;
pub mod states;
pub mod svg;
pub mod tooltip;
pub mod value;
pub mod widget;

pub use error::{Result, SquaireError};
pub use layout::{Cell, Layout};
pub use options::{Options, OptionsPatch, TooltipPatch};
pub use scale::ColorScale;
pub use value::{Record, Records, Value};
pub use widget::Squaire;
