//! The cartogram widget.
//!
//! Construction merges options over the defaults, places the cells, sizes
//! the grid for the container width, draws the scene and wires the tooltip.
//! [`Squaire::update`] repeats the whole pipeline for new data or options.

use crate::breakpoint::is_small;
use crate::dimensions::{BoxDimensions, GridExtent};
use crate::error::{Result, SquaireError};
use crate::layout::{prepare, unplaced, Cell};
use crate::options::{Options, OptionsPatch, TooltipMode};
use crate::render::Scene;
use crate::resize::ResizeHandler;
use crate::tooltip::{default_direction, default_layout, HoverTarget, ScreenBBox, Tooltip};
use crate::value::Records;
use eframe::egui::emath::TSTransform;
use eframe::egui::Vec2;

pub struct Squaire {
    options: Options,
    records: Records,
    cells: Vec<Cell>,
    extent: GridExtent,
    width: f32,
    height: f32,
    breakpoint: String,
    scene: Scene,
    tooltip: Option<Tooltip>,
    resizer: ResizeHandler,
}

impl Squaire {
    /// Mount a map of `records` into a container `container_width` pixels wide.
    pub fn new(records: Records, patch: &OptionsPatch, container_width: f32) -> Result<Self> {
        if !container_width.is_finite() {
            return Err(SquaireError::InvalidWidth(container_width));
        }
        let mut options = Options::default().merge(patch);
        options.expand_whitelist(&records);
        let cells = prepare_cells(&options, &records)?;
        let extent = GridExtent::from_cells(&cells)?;

        let width = container_width.max(0.0);
        let mut map = Self {
            options,
            records,
            cells,
            extent,
            width,
            height: width * extent.ratio(),
            breakpoint: String::new(),
            scene: Scene::new(),
            tooltip: None,
            resizer: ResizeHandler::default(),
        };
        map.breakpoint = map.options.breakpoints.resolve(width).to_string();
        map.resizer.set_applied(map.width);
        map.sync_tooltip();

        map.draw();
        map.toggle_toolbox();

        tracing::info!(
            el = %map.options.el,
            cells = map.cells.len(),
            width = map.width,
            breakpoint = %map.breakpoint,
            "mounted map"
        );
        Ok(map)
    }

    /// Re-render with new records and/or options. Omitted arguments keep
    /// the current ones.
    pub fn update(&mut self, records: Option<Records>, patch: Option<&OptionsPatch>) -> Result<()> {
        let records = records.unwrap_or_else(|| self.records.clone());
        let mut options = match patch {
            Some(p) => self.options.merge(p),
            None => self.options.clone(),
        };
        options.expand_whitelist(&records);
        let cells = prepare_cells(&options, &records)?;
        let extent = GridExtent::from_cells(&cells)?;

        self.options = options;
        self.records = records;
        self.cells = cells;
        self.extent = extent;
        self.sync_tooltip();

        self.draw();
        if let Some(tip) = self.tooltip.as_mut() {
            tip.toolbox.clear();
        }
        self.resize(self.width);

        tracing::info!(el = %self.options.el, cells = self.cells.len(), "updated map");
        Ok(())
    }

    /// Recompute size, breakpoint, box geometry, labels and toolbox
    /// visibility for a new container width. Non-finite widths are ignored.
    pub fn resize(&mut self, container_width: f32) {
        if !container_width.is_finite() {
            tracing::warn!(width = container_width, "ignoring non-finite container width");
            return;
        }
        self.width = container_width.max(0.0);
        self.height = self.width * self.extent.ratio();
        self.resizer.set_applied(self.width);
        let breakpoint = self.options.breakpoints.resolve(self.width).to_string();
        if breakpoint != self.breakpoint {
            tracing::debug!(from = %self.breakpoint, to = %breakpoint, "breakpoint changed");
        }
        self.breakpoint = breakpoint;

        let dims = self.dimensions();
        self.scene.resize(&self.cells, &dims, &self.options, &self.breakpoint);
        self.toggle_toolbox();
        tracing::debug!(width = self.width, height = self.height, "resized map");
    }

    /// Report the container width as seen by the host; the resize is
    /// applied by [`Squaire::tick`] once the width settles.
    pub fn container_resized(&mut self, width: f32, now: f64) {
        self.resizer.observe(width, now);
    }

    /// Apply a settled resize. Returns true if the map changed.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.resizer.poll(now) {
            Some(width) => {
                self.resize(width);
                true
            }
            None => false,
        }
    }

    /// Seconds until a pending resize is due.
    pub fn pending_resize(&self, now: f64) -> Option<f64> {
        self.resizer.remaining(now)
    }

    /// Pointer entered box `index`. `transform` maps map-local coordinates
    /// to window coordinates; `scroll` is added to the popup position.
    pub fn hover(&mut self, index: usize, transform: &TSTransform, scroll: Vec2) {
        let (Some(cell), Some(group)) = (self.cells.get(index), self.scene.groups().get(index)) else {
            return;
        };
        if let Some(tip) = self.tooltip.as_mut() {
            let target = HoverTarget {
                cell,
                fill: &group.fill,
                index: &group.index,
            };
            let opts = &self.options.tooltip;
            let content = match &opts.layout {
                Some(layout) => layout.build(&target, &self.options),
                None => default_layout(&target, &self.options),
            };
            let direction = match &opts.direction {
                Some(f) => f.resolve(&target, self.extent),
                None => default_direction(&target, self.extent),
            };
            let suppress = opts.mode == TooltipMode::Static
                || (opts.mode == TooltipMode::Toggle && is_small(&self.breakpoint));
            let bbox = ScreenBBox::from_rect(group.rect, transform);
            tip.show(content, direction, &bbox, scroll, suppress);
        }
        self.scene.activate(index);
    }

    /// Pointer left the hovered box.
    pub fn unhover(&mut self) {
        if let Some(tip) = self.tooltip.as_mut() {
            tip.hide();
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn breakpoint(&self) -> &str {
        &self.breakpoint
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn tooltip_mut(&mut self) -> Option<&mut Tooltip> {
        self.tooltip.as_mut()
    }

    fn dimensions(&self) -> BoxDimensions {
        BoxDimensions::new(self.extent, self.width, self.height)
    }

    fn draw(&mut self) {
        let dims = self.dimensions();
        self.scene.draw(&self.cells, &dims, &self.options, &self.breakpoint);
    }

    /// Create or drop the tooltip to match `tooltip.enabled`.
    fn sync_tooltip(&mut self) {
        let opts = &self.options.tooltip;
        if !opts.enabled {
            self.tooltip = None;
            return;
        }
        let tip = self
            .tooltip
            .get_or_insert_with(|| Tooltip::new(&opts.el, opts.offset));
        tip.offset = opts.offset;
        tip.toolbox.el = opts.el.clone();
        tip.toolbox.visible = opts.mode == TooltipMode::Static;
    }

    /// In toggle mode the static panel is shown on small screens only.
    fn toggle_toolbox(&mut self) {
        let small = is_small(&self.breakpoint);
        if let Some(tip) = self.tooltip.as_mut() {
            if self.options.tooltip.mode == TooltipMode::Toggle {
                tip.toolbox.visible = small;
            }
        }
    }
}

fn prepare_cells(options: &Options, records: &Records) -> Result<Vec<Cell>> {
    let cells = prepare(&options.layout, records);
    if let Some(missing) = cells.iter().find(|c| !options.labels.contains_key(&c.id)) {
        return Err(SquaireError::MissingLabel(missing.id.clone()));
    }
    let dropped = unplaced(&cells, records);
    if !dropped.is_empty() {
        tracing::warn!(ids = ?dropped, "records without a layout cell are not drawn");
    }
    Ok(cells)
}
