//! Hover tooltip and the static panel that mirrors it.
//!
//! The popup is positioned against the hovered box's screen-space bounding
//! box. Each [`Direction`] anchors the popup to one of eight reference
//! points on that box; the four cardinal directions add the configured
//! pixel gap. The static panel (the "toolbox") always receives the same
//! content, even when the popup itself is suppressed.

use crate::dimensions::GridExtent;
use crate::layout::Cell;
use crate::options::Options;
use crate::value::present;
use eframe::egui::emath::TSTransform;
use eframe::egui::{pos2, Pos2, Rect, Vec2};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NW,
    NE,
    SW,
    SE,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::S,
        Direction::E,
        Direction::W,
        Direction::NW,
        Direction::NE,
        Direction::SW,
        Direction::SE,
    ];

    /// CSS class applied to the popup.
    pub fn class(self) -> &'static str {
        match self {
            Direction::N => "n",
            Direction::S => "s",
            Direction::E => "e",
            Direction::W => "w",
            Direction::NW => "nw",
            Direction::NE => "ne",
            Direction::SW => "sw",
            Direction::SE => "se",
        }
    }
}

/// The box under the pointer, as handed to layout and direction callbacks.
#[derive(Clone, Copy, Debug)]
pub struct HoverTarget<'a> {
    pub cell: &'a Cell,
    pub fill: &'a str,
    /// Attribute the fill was computed from.
    pub index: &'a str,
}

/// Structured tooltip body: heading, a two-column table and an optional note.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub header: Option<(String, String)>,
    pub rows: Vec<(String, String)>,
    pub note: Option<String>,
}

type LayoutFnInner = dyn Fn(&HoverTarget<'_>, &Options) -> TooltipContent + Send + Sync;
type DirectionFnInner = dyn Fn(&HoverTarget<'_>, GridExtent) -> Direction + Send + Sync;

/// Builds tooltip content for a hovered box.
#[derive(Clone)]
pub struct TooltipLayout(Arc<LayoutFnInner>);

impl TooltipLayout {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&HoverTarget<'_>, &Options) -> TooltipContent + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn build(&self, target: &HoverTarget<'_>, options: &Options) -> TooltipContent {
        (self.0)(target, options)
    }
}

impl fmt::Debug for TooltipLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TooltipLayout(..)")
    }
}

/// Chooses which side of the hovered box the popup opens on.
#[derive(Clone)]
pub struct DirectionFn(Arc<DirectionFnInner>);

impl DirectionFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&HoverTarget<'_>, GridExtent) -> Direction + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn resolve(&self, target: &HoverTarget<'_>, extent: GridExtent) -> Direction {
        (self.0)(target, extent)
    }
}

impl fmt::Debug for DirectionFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DirectionFn(..)")
    }
}

/// Region name, optional column headers, one row per whitelisted attribute
/// that has a value, and the note attribute if set.
pub fn default_layout(target: &HoverTarget<'_>, options: &Options) -> TooltipContent {
    let tip = &options.tooltip;
    let data = target.cell.data.as_ref();
    let title = options
        .labels
        .get(&target.cell.id)
        .map(|l| l.full.clone())
        .unwrap_or_else(|| target.cell.id.clone());
    let header = (!tip.column1.is_empty() || !tip.column2.is_empty())
        .then(|| (tip.column1.clone(), tip.column2.clone()));
    let rows = tip
        .whitelist
        .columns()
        .iter()
        .filter_map(|col| present(data, col).map(|v| (col.clone(), v.to_string())))
        .collect();
    let note = tip
        .note_index
        .as_deref()
        .and_then(|n| present(data, n))
        .map(|v| v.to_string());
    TooltipContent {
        title,
        header,
        rows,
        note,
    }
}

/// Opens north, except in the two outer columns (east/west) and the top
/// two rows (south), so the popup stays over the map.
pub fn default_direction(target: &HoverTarget<'_>, extent: GridExtent) -> Direction {
    let (x, y) = (target.cell.x as i64, target.cell.y as i64);
    if x < 2 {
        Direction::E
    } else if x > extent.boxes_wide as i64 - 3 {
        Direction::W
    } else if y < 2 {
        Direction::S
    } else {
        Direction::N
    }
}

/// Eight reference points of a box in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenBBox {
    pub n: Pos2,
    pub s: Pos2,
    pub e: Pos2,
    pub w: Pos2,
    pub nw: Pos2,
    pub ne: Pos2,
    pub sw: Pos2,
    pub se: Pos2,
}

impl ScreenBBox {
    /// Transform a map-local rect to screen space and take its corners and
    /// edge midpoints.
    pub fn from_rect(rect: Rect, transform: &TSTransform) -> Self {
        let r = transform.mul_rect(rect);
        Self {
            n: r.center_top(),
            s: r.center_bottom(),
            e: r.right_center(),
            w: r.left_center(),
            nw: r.left_top(),
            ne: r.right_top(),
            sw: r.left_bottom(),
            se: r.right_bottom(),
        }
    }
}

/// The floating popup element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Popup {
    pub content: TooltipContent,
    pub direction: Option<Direction>,
    pub top: f32,
    pub left: f32,
    pub visible: bool,
    pub interactive: bool,
    /// Last rendered size, used to center and offset the popup.
    pub size: Vec2,
}

impl Popup {
    pub fn position(&self) -> Pos2 {
        pos2(self.left, self.top)
    }
}

/// Fixed panel that mirrors the last tooltip content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toolbox {
    pub el: String,
    pub content: Option<TooltipContent>,
    pub visible: bool,
}

impl Toolbox {
    pub fn new(el: &str) -> Self {
        Self {
            el: el.to_string(),
            content: None,
            visible: true,
        }
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}

#[derive(Clone, Debug)]
pub struct Tooltip {
    popup: Option<Popup>,
    pub toolbox: Toolbox,
    /// `[vertical, horizontal]` gap for cardinal directions.
    pub offset: [f32; 2],
}

impl Tooltip {
    pub fn new(toolbox_el: &str, offset: [f32; 2]) -> Self {
        Self {
            popup: Some(Popup::default()),
            toolbox: Toolbox::new(toolbox_el),
            offset,
        }
    }

    /// The popup, recreated if it was destroyed.
    fn popup_mut(&mut self) -> &mut Popup {
        self.popup.get_or_insert_with(Popup::default)
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Show `content` next to `bbox`. With `suppress` set the popup keeps
    /// its previous content and visibility, but is still repositioned; the
    /// toolbox is updated either way.
    pub fn show(
        &mut self,
        content: TooltipContent,
        direction: Direction,
        bbox: &ScreenBBox,
        scroll: Vec2,
        suppress: bool,
    ) {
        let offset = self.offset;
        let popup = self.popup_mut();
        if !suppress {
            popup.content = content.clone();
            popup.visible = true;
            popup.interactive = true;
        }
        let (top, left) = anchor(direction, bbox, popup.size, offset);
        popup.direction = Some(direction);
        popup.top = top + scroll.y;
        popup.left = left + scroll.x;
        self.toolbox.content = Some(content);
    }

    pub fn hide(&mut self) {
        let popup = self.popup_mut();
        popup.visible = false;
        popup.interactive = false;
    }

    /// Drop the popup entirely. The next `show` or `hide` creates a new one.
    pub fn destroy(&mut self) {
        self.popup = None;
    }

    /// Record the popup's rendered size for the next placement.
    pub fn set_measured_size(&mut self, size: Vec2) {
        if let Some(p) = self.popup.as_mut() {
            p.size = size;
        }
    }
}

/// `(top, left)` of a popup of `size` opening in `dir` from `bbox`.
fn anchor(dir: Direction, bbox: &ScreenBBox, size: Vec2, offset: [f32; 2]) -> (f32, f32) {
    let (w, h) = (size.x, size.y);
    match dir {
        Direction::N => (bbox.n.y - h - offset[0], bbox.n.x - w / 2.0),
        Direction::S => (bbox.s.y + offset[0], bbox.s.x - w / 2.0),
        Direction::E => (bbox.e.y - h / 2.0, bbox.e.x + offset[1]),
        Direction::W => (bbox.w.y - h / 2.0, bbox.w.x - w - offset[1]),
        Direction::NW => (bbox.nw.y - h, bbox.nw.x - w),
        Direction::NE => (bbox.ne.y - h, bbox.ne.x),
        Direction::SW => (bbox.sw.y, bbox.sw.x - w),
        Direction::SE => (bbox.se.y, bbox.se.x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OptionsPatch, TooltipPatch, Whitelist};
    use crate::value::{Record, Value};
    use eframe::egui::vec2;

    fn cell(x: u32, y: u32) -> Cell {
        Cell {
            id: "NY".into(),
            x,
            y,
            data: None,
        }
    }

    fn dir_at(x: u32, y: u32) -> Direction {
        let c = cell(x, y);
        let target = HoverTarget {
            cell: &c,
            fill: "#fff",
            index: "value",
        };
        default_direction(&target, GridExtent { boxes_wide: 11, boxes_tall: 8 })
    }

    #[test]
    fn test_direction_near_edges() {
        assert_eq!(dir_at(0, 4), Direction::E);
        assert_eq!(dir_at(10, 4), Direction::W);
        assert_eq!(dir_at(5, 0), Direction::S);
        assert_eq!(dir_at(5, 4), Direction::N);
        assert_eq!(dir_at(0, 0), Direction::E);
        assert_eq!(dir_at(10, 0), Direction::W);
    }

    #[test]
    fn test_bbox_points() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), vec2(40.0, 40.0));
        let t = TSTransform::from_translation(vec2(100.0, 5.0));
        let b = ScreenBBox::from_rect(rect, &t);
        assert_eq!(b.nw, pos2(110.0, 25.0));
        assert_eq!(b.se, pos2(150.0, 65.0));
        assert_eq!(b.n, pos2(130.0, 25.0));
        assert_eq!(b.e, pos2(150.0, 45.0));
    }

    fn placed(dir: Direction) -> Pos2 {
        let rect = Rect::from_min_size(pos2(100.0, 100.0), vec2(50.0, 50.0));
        let bbox = ScreenBBox::from_rect(rect, &TSTransform::IDENTITY);
        let mut tip = Tooltip::new(".toolbox", [6.0, 6.0]);
        tip.set_measured_size(vec2(80.0, 40.0));
        tip.show(TooltipContent::default(), dir, &bbox, Vec2::ZERO, false);
        tip.popup().unwrap().position()
    }

    #[test]
    fn test_anchor_offsets_only_on_cardinals() {
        assert_eq!(placed(Direction::N), pos2(85.0, 54.0));
        assert_eq!(placed(Direction::S), pos2(85.0, 156.0));
        assert_eq!(placed(Direction::E), pos2(156.0, 105.0));
        assert_eq!(placed(Direction::W), pos2(14.0, 105.0));
        assert_eq!(placed(Direction::NW), pos2(20.0, 60.0));
        assert_eq!(placed(Direction::NE), pos2(150.0, 60.0));
        assert_eq!(placed(Direction::SW), pos2(20.0, 150.0));
        assert_eq!(placed(Direction::SE), pos2(150.0, 150.0));
    }

    #[test]
    fn test_scroll_added_to_position() {
        let bbox = ScreenBBox::from_rect(Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0)), &TSTransform::IDENTITY);
        let mut tip = Tooltip::new(".toolbox", [0.0, 0.0]);
        tip.show(TooltipContent::default(), Direction::SE, &bbox, vec2(3.0, 200.0), false);
        assert_eq!(tip.popup().unwrap().position(), pos2(13.0, 210.0));
    }

    #[test]
    fn test_suppressed_show_still_fills_toolbox() {
        let bbox = ScreenBBox::from_rect(Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0)), &TSTransform::IDENTITY);
        let mut tip = Tooltip::new(".toolbox", [6.0, 6.0]);
        let content = TooltipContent {
            title: "New York".into(),
            ..Default::default()
        };
        tip.show(content.clone(), Direction::S, &bbox, Vec2::ZERO, true);
        let popup = tip.popup().unwrap();
        assert!(!popup.visible);
        assert_eq!(popup.content, TooltipContent::default());
        assert_eq!(popup.direction, Some(Direction::S));
        assert_eq!(tip.toolbox.content, Some(content));
    }

    #[test]
    fn test_hide_keeps_content() {
        let bbox = ScreenBBox::from_rect(Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0)), &TSTransform::IDENTITY);
        let mut tip = Tooltip::new(".toolbox", [6.0, 6.0]);
        let content = TooltipContent {
            title: "Ohio".into(),
            ..Default::default()
        };
        tip.show(content.clone(), Direction::N, &bbox, Vec2::ZERO, false);
        tip.hide();
        let popup = tip.popup().unwrap();
        assert!(!popup.visible && !popup.interactive);
        assert_eq!(popup.content, content);
        assert_eq!(tip.toolbox.content, Some(content));
    }

    #[test]
    fn test_destroy_recreates_lazily() {
        let mut tip = Tooltip::new(".toolbox", [6.0, 6.0]);
        tip.destroy();
        assert!(tip.popup().is_none());
        tip.hide();
        assert!(tip.popup().is_some());
    }

    #[test]
    fn test_default_layout_table() {
        let mut record = Record::new();
        record.insert("Population".into(), Value::from("4,833,722"));
        record.insert("State Bird".into(), Value::from(""));
        record.insert("note".into(), Value::from("Estimate"));
        let c = Cell {
            id: "AL".into(),
            x: 6,
            y: 6,
            data: Some(record),
        };
        let options = Options::default().merge(&OptionsPatch {
            tooltip: Some(TooltipPatch {
                whitelist: Some(Whitelist::Columns(vec![
                    "Population".into(),
                    "State Bird".into(),
                    "Missing".into(),
                ])),
                column1: Some("Category".into()),
                column2: Some("Value".into()),
                note_index: Some(Some("note".into())),
                ..Default::default()
            }),
            ..Default::default()
        });
        let target = HoverTarget {
            cell: &c,
            fill: "#fff",
            index: "value",
        };
        let content = default_layout(&target, &options);
        assert_eq!(content.title, "Alabama");
        assert_eq!(content.header, Some(("Category".into(), "Value".into())));
        assert_eq!(content.rows, vec![("Population".to_string(), "4,833,722".to_string())]);
        assert_eq!(content.note.as_deref(), Some("Estimate"));
    }

    #[test]
    fn test_default_layout_without_data() {
        let c = cell(3, 3);
        let target = HoverTarget {
            cell: &c,
            fill: "#f3f3f3",
            index: "value",
        };
        let content = default_layout(&target, &Options::default());
        assert_eq!(content.title, "New York");
        assert!(content.header.is_none());
        assert!(content.rows.is_empty());
        assert!(content.note.is_none());
    }
}
