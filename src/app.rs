use egui::{Color32, Key, KeyboardShortcut, Modifiers, Pos2, Rect, Sense, TextureHandle, TextureOptions};

use crate::config::SketchConfig;
use crate::edit::Thickness;
use crate::error::SketchError;
use crate::export;
use crate::sketchpad::{PointerState, Sketchpad};
use crate::surface::{GlyphFont, PixmapSurface};
use crate::tool::{ToolMode, ToolState};

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        shift: true,
        ..Modifiers::COMMAND
    },
    Key::Z,
);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// The desktop front-end: toolbar, sticker palette and the canvas texture
pub struct SketchApp {
    config: SketchConfig,
    font: GlyphFont,
    pad: Sketchpad<PixmapSurface>,
    stickers: Vec<String>,
    custom_sticker: String,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    pointer_inside: bool,
    last_pointer: Option<Pos2>,
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Result<Self, SketchError> {
        let font = match &config.sticker_font {
            Some(path) => GlyphFont::with_primary_file(path)?,
            None => GlyphFont::egui_defaults()?,
        };

        // Only tool preferences are restored; the drawing itself is never persisted
        let mut tools = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolState>(storage, eframe::APP_KEY))
            .unwrap_or_else(|| ToolState::new(config.default_color()));
        if let Some(glyph) = tools.sticker().filter(|glyph| !font.covers(glyph)).map(str::to_owned) {
            log::warn!("Restored sticker {:?} cannot be drawn, falling back to the pencil", glyph);
            tools.select_thickness(Thickness::Thin);
        }

        let stickers = config
            .stickers
            .iter()
            .filter(|glyph| {
                let covered = font.covers(glyph);
                if !covered {
                    log::warn!("Dropping sticker {:?}: no font face can draw it", glyph);
                }
                covered
            })
            .cloned()
            .collect();

        let surface = PixmapSurface::new(config.canvas_size, config.canvas_size, font.clone())?;
        let pad = Sketchpad::new(surface, tools);

        Ok(Self {
            stickers,
            config,
            font,
            pad,
            custom_sticker: String::new(),
            texture: None,
            uploaded_revision: None,
            pointer_inside: false,
            last_pointer: None,
            status: None,
        })
    }

    fn export(&mut self) {
        let size = self.config.export_size;
        let path = self.config.export_path.clone();
        self.status = Some(match export::save_png(&self.pad, size, size, &self.font, &path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Export failed: {err}")
            }
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("clear").clicked() {
                self.pad.clear();
            }
            if ui
                .add_enabled(self.pad.history().can_undo(), egui::Button::new("undo"))
                .clicked()
            {
                self.pad.undo();
            }
            if ui
                .add_enabled(self.pad.history().can_redo(), egui::Button::new("redo"))
                .clicked()
            {
                self.pad.redo();
            }

            ui.separator();

            let thickness = self.pad.tools().thickness();
            if ui
                .selectable_label(thickness == Some(Thickness::Thin), "pencil")
                .clicked()
            {
                self.pad.with_tools(|t| t.select_thickness(Thickness::Thin));
            }
            if ui
                .selectable_label(thickness == Some(Thickness::Thick), "marker")
                .clicked()
            {
                self.pad.with_tools(|t| t.select_thickness(Thickness::Thick));
            }

            ui.separator();

            if ui.button("export").clicked() {
                self.export();
            }
        });

        ui.horizontal(|ui| {
            let mut color = self.pad.tools().color();
            ui.label("Color:");
            if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
                .changed()
            {
                self.pad.with_tools(|t| t.set_color(color));
            }

            let mut opacity = self.pad.tools().opacity();
            ui.label("Opacity:");
            if ui.add(egui::Slider::new(&mut opacity, 1..=100)).changed() {
                self.pad.with_tools(|t| t.set_opacity(opacity));
            }
        });
    }

    fn sticker_palette(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let selected = self.pad.tools().sticker().map(str::to_owned);
            let mut picked = None;
            for glyph in &self.stickers {
                if ui
                    .selectable_label(selected.as_deref() == Some(glyph.as_str()), glyph.as_str())
                    .clicked()
                {
                    picked = Some(glyph.clone());
                }
            }
            if let Some(glyph) = picked {
                self.pad.select_sticker(&glyph);
            }

            ui.separator();
            ui.add(egui::TextEdit::singleline(&mut self.custom_sticker).desired_width(60.0));
            if ui.button("custom sticker").clicked() {
                let glyph = self.custom_sticker.trim().to_owned();
                if self.pad.select_sticker(&glyph) {
                    // The custom slot is the last palette entry
                    self.stickers.pop();
                    self.stickers.push(glyph);
                    self.custom_sticker.clear();
                } else {
                    self.status = Some(format!("No font can draw {glyph:?}"));
                }
            }
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input_mut(|i| {
            // Check the shifted shortcut first so it is not taken for a plain undo
            let redo = i.consume_shortcut(&REDO) || i.consume_shortcut(&REDO_ALT);
            (i.consume_shortcut(&UNDO), redo)
        });
        if undo {
            self.pad.undo();
        }
        if redo {
            self.pad.redo();
        }
    }

    fn handle_canvas_input(&mut self, ui: &egui::Ui, rect: Rect) {
        let (pressed, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
            )
        });
        let inside = pointer.is_some_and(|p| rect.contains(p));

        if let Some(pos) = pointer.filter(|_| inside) {
            let local = (pos - rect.min).to_pos2();
            if pressed {
                self.pad.on_pointer_down(local);
            } else if self.last_pointer != Some(pos) {
                self.pad.on_pointer_move(local);
            }
        }

        if released {
            self.pad.on_pointer_up();
        }
        if self.pointer_inside && !inside {
            self.pad.on_pointer_leave();
        }

        self.pointer_inside = inside;
        self.last_pointer = pointer;
    }

    fn upload_canvas(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let revision = self.pad.revision();
        if self.uploaded_revision != Some(revision) {
            let image = self.pad.surface().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    self.texture = Some(ctx.load_texture("sketch-canvas", image, TextureOptions::LINEAR));
                }
            }
            self.uploaded_revision = Some(revision);
        }

        match &self.texture {
            Some(texture) => texture.id(),
            None => egui::TextureId::default(),
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.pad.tools());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
            self.sticker_palette(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mode = match self.pad.tools().mode() {
                    ToolMode::Stroke(Thickness::Thin) => "pencil".to_owned(),
                    ToolMode::Stroke(Thickness::Thick) => "marker".to_owned(),
                    ToolMode::Sticker { glyph } => format!("sticker {glyph}"),
                };
                ui.label(format!(
                    "{} | {} edits, {} undone{}",
                    mode,
                    self.pad.history().past().len(),
                    self.pad.history().future().len(),
                    if self.pad.pointer_state() == PointerState::Active { " | drawing" } else { "" },
                ));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let side = self.config.canvas_size as f32;
            let (rect, _response) = ui.allocate_exact_size(egui::vec2(side, side), Sense::drag());

            self.handle_canvas_input(ui, rect);
            let texture = self.upload_canvas(ctx);

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, self.config.paper_color());
            painter.image(
                texture,
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        });
    }
}
