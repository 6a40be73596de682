use crate::breakpoint::is_small;
use crate::color::{fill_for, overlay_color};
use crate::dimensions::BoxDimensions;
use crate::layout::Cell;
use crate::options::{LabelStyle, Options};
use crate::value::present;
use eframe::egui::{pos2, vec2, Pos2, Rect};

/// One drawn region: a square plus its centered label.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGroup {
    pub id: String,
    pub class: String,
    pub rect: Rect,
    pub fill: String,
    /// Attribute the fill came from.
    pub index: String,
    pub label: String,
    pub label_pos: Pos2,
    pub label_color: &'static str,
    pub active: bool,
}

impl BoxGroup {
    fn empty() -> Self {
        Self {
            id: String::new(),
            class: String::new(),
            rect: Rect::NOTHING,
            fill: String::new(),
            index: String::new(),
            label: String::new(),
            label_pos: Pos2::ZERO,
            label_color: "#fff",
            active: false,
        }
    }
}

/// Counts from the last data join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Retained set of box groups, joined to cells by position.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    groups: Vec<BoxGroup>,
    /// Paint order, back to front.
    z_order: Vec<usize>,
    pub width: f32,
    pub height: f32,
    pub breakpoint: String,
}

/// Label text for the current breakpoint: short on small screens.
pub fn label_text(cell: &Cell, options: &Options, breakpoint: &str) -> String {
    let style = if is_small(breakpoint) {
        LabelStyle::Short
    } else {
        options.label_style
    };
    options
        .labels
        .get(&cell.id)
        .map(|l| l.get(style).to_string())
        .unwrap_or_else(|| cell.id.clone())
}

fn class_for(cell: &Cell, options: &Options) -> String {
    options
        .class_index
        .as_deref()
        .and_then(|c| present(cell.data.as_ref(), c))
        .map(|v| v.to_string())
        .unwrap_or_default()
}

fn box_rect(cell: &Cell, dims: &BoxDimensions) -> Rect {
    Rect::from_min_size(
        pos2(dims.x_scale.apply(cell.x as f32), dims.y_scale.apply(cell.y as f32)),
        vec2(dims.box_width, dims.box_width),
    )
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[BoxGroup] {
        &self.groups
    }

    /// Groups back to front.
    pub fn paint_order(&self) -> impl Iterator<Item = &BoxGroup> {
        self.z_order.iter().filter_map(|&i| self.groups.get(i))
    }

    /// Join `cells` onto the existing groups: create missing groups, drop
    /// surplus ones, then restyle every group from its cell.
    pub fn draw(
        &mut self,
        cells: &[Cell],
        dims: &BoxDimensions,
        options: &Options,
        breakpoint: &str,
    ) -> JoinStats {
        let existing = self.groups.len();
        let stats = JoinStats {
            entered: cells.len().saturating_sub(existing),
            updated: cells.len().min(existing),
            exited: existing.saturating_sub(cells.len()),
        };

        self.groups.truncate(cells.len());
        self.groups.resize_with(cells.len(), BoxGroup::empty);
        self.z_order.retain(|&i| i < cells.len());
        self.z_order.extend(existing..cells.len());

        for (group, cell) in self.groups.iter_mut().zip(cells) {
            group.id = cell.id.clone();
            group.class = class_for(cell, options);
            group.fill = fill_for(cell.data.as_ref(), options);
            group.index = options.index.clone();
        }
        self.resize(cells, dims, options, breakpoint);

        tracing::debug!(
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "joined cells to scene"
        );
        stats
    }

    /// Reposition boxes and refresh labels for new dimensions or breakpoint.
    pub fn resize(&mut self, cells: &[Cell], dims: &BoxDimensions, options: &Options, breakpoint: &str) {
        self.breakpoint = breakpoint.to_string();
        self.width = dims.x_scale.range.1;
        self.height = dims.y_scale.range.1;
        for (group, cell) in self.groups.iter_mut().zip(cells) {
            group.rect = box_rect(cell, dims);
            group.label_pos = group.rect.center();
            group.label = label_text(cell, options, breakpoint);
            group.label_color = overlay_color(&group.fill);
        }
    }

    /// Mark one group active and bring it to the front.
    pub fn activate(&mut self, index: usize) {
        if index >= self.groups.len() {
            return;
        }
        for (i, g) in self.groups.iter_mut().enumerate() {
            g.active = i == index;
        }
        self.z_order.retain(|&i| i != index);
        self.z_order.push(index);
    }

    /// Front-most group under a map-local point.
    pub fn hit_test(&self, pos: Pos2) -> Option<usize> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|&i| self.groups[i].rect.contains(pos))
    }
}
