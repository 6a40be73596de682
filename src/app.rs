use eframe::egui;
use eframe::egui::emath::TSTransform;
use squaire::color::parse_hex;
use squaire::document::MapDocument;
use squaire::tooltip::TooltipContent;
use squaire::{OptionsPatch, Squaire};
use std::path::PathBuf;
use std::time::Duration;

// --- Drawing constants ---
const BOX_GAP_PX: f32 = 1.0;
const MIN_FONT: f32 = 8.0;
const MAX_FONT: f32 = 16.0;
const FALLBACK_FILL: egui::Color32 = egui::Color32::from_gray(200);

// --- Main app ---
pub struct SquaireApp {
    // Document state
    document: MapDocument,
    document_path: Option<PathBuf>,
    /// Overrides applied on top of the document when the map is (re)built.
    extra_patch: OptionsPatch,
    columns: Vec<String>,
    selected_index: String,

    // Map is built lazily once the panel width is known
    map: Option<Squaire>,
    needs_mount: bool,
    error: Option<String>,

    // Interaction
    hovered_idx: Option<usize>,
    /// Window position of the map's top-left corner.
    map_origin: egui::Vec2,
}

impl SquaireApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            document: MapDocument::default(),
            document_path: None,
            extra_patch: OptionsPatch::default(),
            columns: Vec::new(),
            selected_index: String::new(),
            map: None,
            needs_mount: false,
            error: None,
            hovered_idx: None,
            map_origin: egui::Vec2::ZERO,
        }
    }

    /// Show the default US map with no data.
    pub fn show_default(&mut self, patch: &OptionsPatch) {
        self.document = MapDocument::default();
        self.document_path = None;
        self.extra_patch = patch.clone();
        self.columns.clear();
        self.selected_index.clear();
        self.reset_map();
    }

    pub fn open(&mut self, path: PathBuf, index: Option<&str>) {
        match MapDocument::load(&path) {
            Ok(doc) => {
                self.columns = doc.columns();
                self.selected_index = index
                    .map(str::to_string)
                    .or_else(|| doc.options.index.clone())
                    .unwrap_or_else(|| "value".to_string());
                self.extra_patch = match index {
                    Some(i) => doc.index_patch(i),
                    None => OptionsPatch::default(),
                };
                self.document = doc;
                self.document_path = Some(path);
                self.reset_map();
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to open document: {e}");
                self.error = Some(e.to_string());
                self.map = None;
                self.needs_mount = false;
            }
        }
    }

    fn reset_map(&mut self) {
        self.map = None;
        self.error = None;
        self.hovered_idx = None;
        self.needs_mount = true;
    }

    fn mount(&mut self, width: f32) {
        self.needs_mount = false;
        let built = self.document.patch().and_then(|patch| {
            let mut map = Squaire::new(self.document.data.clone(), &patch, width)?;
            map.update(None, Some(&self.extra_patch))?;
            Ok(map)
        });
        match built {
            Ok(map) => self.map = Some(map),
            Err(e) => {
                tracing::error!("failed to build map: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    fn select_index(&mut self, index: String) {
        let patch = self.document.index_patch(&index);
        if let Some(map) = self.map.as_mut() {
            if let Err(e) = map.update(None, Some(&patch)) {
                self.error = Some(e.to_string());
            }
        }
        self.selected_index = index;
        self.extra_patch = patch;
        self.hovered_idx = None;
    }

    fn export_svg(&self) {
        let Some(map) = self.map.as_ref() else { return };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("map.svg")
            .save_file()
        {
            if let Err(e) = std::fs::write(&path, squaire::svg::render(map)) {
                tracing::error!(path = %path.display(), "SVG export failed: {e}");
            }
        }
    }

    fn export_png(&self) {
        let Some(map) = self.map.as_ref() else { return };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("map.png")
            .save_file()
        {
            if let Err(e) = squaire::raster::save(map, &path) {
                tracing::error!(path = %path.display(), "PNG export failed: {e}");
            }
        }
    }
}

impl eframe::App for SquaireApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel ----
        let mut chosen_index: Option<String> = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Squaire");
                ui.separator();

                if ui.button("Open Map...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Map document", &["json"])
                        .pick_file()
                    {
                        self.open(path, None);
                    }
                }
                if ui.button("Default Map").clicked() {
                    self.show_default(&OptionsPatch::default());
                }

                ui.separator();
                if ui.button("Export SVG...").clicked() {
                    self.export_svg();
                }
                if ui.button("Export PNG...").clicked() {
                    self.export_png();
                }

                if !self.columns.is_empty() {
                    ui.separator();
                    egui::ComboBox::from_label("Color by")
                        .selected_text(self.selected_index.as_str())
                        .show_ui(ui, |ui| {
                            for column in &self.columns {
                                if ui
                                    .selectable_label(*column == self.selected_index, column.as_str())
                                    .clicked()
                                {
                                    chosen_index = Some(column.clone());
                                }
                            }
                        });
                }
            });
        });
        if let Some(index) = chosen_index {
            self.select_index(index);
        }

        // ---- Status bar ----
        if let Some(map) = self.map.as_ref() {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(path) = &self.document_path {
                        ui.label(truncate_str(&path.display().to_string(), 48));
                        ui.separator();
                    }
                    ui.label(format!(
                        "{} regions | {:.0} x {:.0} px | {}",
                        map.cells().len(),
                        map.width(),
                        map.height(),
                        map.breakpoint()
                    ));

                    if let Some(idx) = self.hovered_idx {
                        if let (Some(cell), Some(group)) = (map.cells().get(idx), map.scene().groups().get(idx)) {
                            ui.separator();
                            let name = map
                                .options()
                                .labels
                                .get(&cell.id)
                                .map(|l| l.full.as_str())
                                .unwrap_or(&cell.id);
                            let value = squaire::value::present(cell.data.as_ref(), &group.index)
                                .map(|v| v.to_string())
                                .unwrap_or_else(|| "no data".to_string());
                            ui.label(format!("{} - {}: {}", name, group.index, value));
                        }
                    }
                });
            });
        }

        // ---- Static tooltip panel ----
        if let Some(tip) = self.map.as_ref().and_then(|m| m.tooltip()) {
            if tip.toolbox.visible {
                egui::SidePanel::right(egui::Id::new(&tip.toolbox.el))
                    .default_width(220.0)
                    .show(ctx, |ui| match &tip.toolbox.content {
                        Some(content) => content_ui(ui, content),
                        None => {
                            ui.weak("Hover a box for details.");
                        }
                    });
            }
        }

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.error {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    ui.heading("Could not draw the map");
                    ui.label(err.as_str());
                });
                return;
            }

            let rect = ui.available_rect_before_wrap();
            let now = ctx.input(|i| i.time);

            if self.needs_mount {
                self.mount(rect.width());
            }
            let Some(map) = self.map.as_mut() else {
                return;
            };

            // Resize is debounced; keep repainting until the pending one lands
            map.container_resized(rect.width(), now);
            if map.tick(now) {
                self.hovered_idx = None;
            }
            if let Some(remaining) = map.pending_resize(now) {
                ctx.request_repaint_after(Duration::from_secs_f64(remaining));
            }

            let origin = rect.min.to_vec2();
            self.map_origin = origin;
            let painter = ui.painter_at(rect);

            // --- Hit test ---
            let mouse_pos = ctx.input(|i| i.pointer.hover_pos());
            let new_hovered = mouse_pos
                .filter(|p| rect.contains(*p))
                .and_then(|p| map.scene().hit_test(p - origin));
            if new_hovered != self.hovered_idx {
                match new_hovered {
                    Some(i) => map.hover(i, &TSTransform::from_translation(origin), egui::Vec2::ZERO),
                    None => map.unhover(),
                }
                self.hovered_idx = new_hovered;
            }

            // --- Draw boxes back to front ---
            for group in map.scene().paint_order() {
                let draw_rect = group.rect.translate(origin);
                if draw_rect.width() < 1.0 || !draw_rect.intersects(rect) {
                    continue;
                }
                let inner = draw_rect.shrink(BOX_GAP_PX / 2.0);
                if group.active {
                    painter.rect_filled(inner.expand(1.5), 0.0, egui::Color32::from_gray(60));
                }
                let fill = parse_hex(&group.fill).unwrap_or(FALLBACK_FILL);
                painter.rect_filled(inner, 0.0, fill);

                let font_size = (inner.width() * 0.28).clamp(MIN_FONT, MAX_FONT);
                let max_chars = (inner.width() / (font_size * 0.55)) as usize;
                let label = truncate_str(&group.label, max_chars);
                if !label.is_empty() {
                    painter.text(
                        group.label_pos + origin,
                        egui::Align2::CENTER_CENTER,
                        label,
                        egui::FontId::proportional(font_size),
                        parse_hex(group.label_color).unwrap_or(egui::Color32::WHITE),
                    );
                }
            }
        });

        // ---- Floating tooltip ----
        let measured = self.map.as_ref().and_then(|m| m.tooltip()).and_then(|tip| {
            let popup = tip.popup().filter(|p| p.visible)?;
            let response = egui::Area::new(egui::Id::new("squaire-tooltip"))
                .order(egui::Order::Tooltip)
                .fixed_pos(popup.position())
                .interactable(popup.interactive)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| content_ui(ui, &popup.content));
                });
            let size = response.response.rect.size();
            (size != popup.size).then_some(size)
        });
        if let Some(size) = measured {
            if let Some(tip) = self.map.as_mut().and_then(|m| m.tooltip_mut()) {
                tip.set_measured_size(size);
            }
            // placement depends on the size just measured
            if let (Some(i), Some(map)) = (self.hovered_idx, self.map.as_mut()) {
                map.hover(i, &TSTransform::from_translation(self.map_origin), egui::Vec2::ZERO);
            }
            ctx.request_repaint();
        }
    }
}

// ===================== Helpers =====================

fn content_ui(ui: &mut egui::Ui, content: &TooltipContent) {
    ui.strong(content.title.as_str());
    if content.header.is_some() || !content.rows.is_empty() {
        egui::Grid::new("tooltip_table").striped(true).show(ui, |ui| {
            if let Some((c1, c2)) = &content.header {
                ui.strong(c1.as_str());
                ui.strong(c2.as_str());
                ui.end_row();
            }
            for (k, v) in &content.rows {
                ui.label(k.as_str());
                ui.label(v.as_str());
                ui.end_row();
            }
        });
    }
    if let Some(note) = &content.note {
        ui.small(note.as_str());
    }
}

fn truncate_str(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    if max_chars < 4 {
        return String::new();
    }
    let head: String = s.chars().take(max_chars - 3).collect();
    format!("{head}...")
}
