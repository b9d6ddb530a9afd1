use crate::app::run_analysis;
use crate::library::logger::interface::Logger;
use crate::render::ReportLayout;
use crate::report::{decode_image, is_supported_upload, AnalysisError, EmotionReportPipeline};
use crate::ui_config::UiConfig;
use image::{imageops, RgbImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Longest side of the on-screen preview. Analysis always sees the full image.
const MAX_PREVIEW_SIDE: usize = 2048;

struct Upload {
    name: String,
    image: Option<RgbImage>,
    texture: Option<egui::TextureHandle>,
    outcome: Result<ReportLayout, AnalysisError>,
}

pub struct Gui {
    ui_config: UiConfig,
    logger: Arc<dyn Logger + Send + Sync>,
    pipeline: EmotionReportPipeline,
    path_input: String,
    notice: Option<String>,
    upload: Option<Upload>,
}

impl Gui {
    pub fn new(
        ui_config: UiConfig,
        logger: Arc<dyn Logger + Send + Sync>,
        pipeline: EmotionReportPipeline,
    ) -> Self {
        Self {
            ui_config,
            logger: logger.with_namespace("gui"),
            pipeline,
            path_input: String::new(),
            notice: None,
            upload: None,
        }
    }

    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.ui_config.window_title())
                .with_inner_size(self.ui_config.window_size)
                .with_drag_and_drop(true),
            ..Default::default()
        };

        let title = self.ui_config.window_title();
        eframe::run_native(
            &title,
            options,
            Box::new(|cc| {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
                Box::new(self)
            }),
        )?;

        Ok(())
    }

    fn accept_path(&mut self, path: &Path) {
        if !is_supported_upload(path) {
            self.notice = Some(self.ui_config.unsupported_upload.clone());
            return;
        }

        match std::fs::read(path) {
            Ok(bytes) => self.accept_bytes(&path.display().to_string(), &bytes),
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("reading {}: {}", path.display(), e));
                self.upload = Some(Upload {
                    name: path.display().to_string(),
                    image: None,
                    texture: None,
                    outcome: Err(AnalysisError::new(e)),
                });
            }
        }
    }

    fn accept_bytes(&mut self, name: &str, bytes: &[u8]) {
        self.notice = None;
        let _ = self
            .logger
            .info(&format!("{} {}", self.ui_config.analyzing_text, name));

        let upload = match decode_image(bytes) {
            Ok(image) => {
                let outcome = run_analysis(&self.pipeline, &self.logger, &image)
                    .map(|report| ReportLayout::from_report(&report));
                Upload {
                    name: name.to_string(),
                    image: Some(image),
                    texture: None,
                    outcome,
                }
            }
            Err(e) => {
                let _ = self.logger.error(&format!("{}: {}", name, e.cause()));
                Upload {
                    name: name.to_string(),
                    image: None,
                    texture: None,
                    outcome: Err(e),
                }
            }
        };

        self.upload = Some(upload);
    }

    fn take_dropped_file(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };

        if let Some(path) = &file.path {
            self.accept_path(path);
        } else if let Some(bytes) = &file.bytes {
            if is_supported_upload(Path::new(&file.name)) {
                self.accept_bytes(&file.name, bytes);
            } else {
                self.notice = Some(self.ui_config.unsupported_upload.clone());
            }
        }
    }

    fn draw_sidebar(&self, ui: &mut egui::Ui) {
        ui.heading(&self.ui_config.sidebar_header);
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            for (field, value) in &self.ui_config.sidebar_info {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(format!("{}:", field)).strong());
                    ui.label(value);
                });
            }
        });

        ui.add_space(8.0);
        for warning in &self.ui_config.sidebar_warnings {
            ui.label(egui::RichText::new(warning).color(self.ui_config.warning_text));
        }
    }

    fn draw_upload_controls(&mut self, ui: &mut egui::Ui) -> Option<PathBuf> {
        let mut requested = None;

        ui.label(&self.ui_config.upload_prompt);
        ui.horizontal(|ui| {
            let field = ui.add(
                egui::TextEdit::singleline(&mut self.path_input)
                    .hint_text("path/to/face.jpg (or drop a file)"),
            );
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Analyze").clicked() || submitted {
                let trimmed = self.path_input.trim();
                if !trimmed.is_empty() {
                    requested = Some(PathBuf::from(trimmed));
                }
            }
        });

        if let Some(notice) = &self.notice {
            ui.label(egui::RichText::new(notice).color(self.ui_config.warning_text));
        }

        requested
    }

    fn draw_upload(&mut self, ui: &mut egui::Ui) {
        let ui_config = &self.ui_config;
        let Some(upload) = &mut self.upload else {
            return;
        };

        if upload.texture.is_none() {
            if let Some(image) = upload.image.take() {
                let max_side = ui
                    .ctx()
                    .input(|i| i.max_texture_side)
                    .min(MAX_PREVIEW_SIDE);
                let preview = preview_image(&image, max_side as u32);
                let size = [preview.width() as usize, preview.height() as usize];
                let color_image = egui::ColorImage::from_rgb(size, preview.as_raw());
                upload.texture = Some(ui.ctx().load_texture(
                    upload.name.clone(),
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }

        if let Some(texture) = &upload.texture {
            let size = texture.size_vec2();
            let scale = if size.x > 0.0 {
                ui.available_width() / size.x
            } else {
                1.0
            };
            ui.add(egui::Image::from_texture(egui::load::SizedTexture::new(
                texture.id(),
                size * scale,
            )));
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(&ui_config.image_caption)
                        .small()
                        .color(ui_config.muted_text),
                );
            });
        }

        match &upload.outcome {
            Ok(layout) => draw_report(ui, ui_config, layout),
            Err(_) => {
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(&ui_config.error_message)
                        .color(egui::Color32::from_rgb(248, 113, 113))
                        .size(16.0),
                );
            }
        }
    }

    fn draw_explainer(&self, ui: &mut egui::Ui) {
        ui.collapsing(&self.ui_config.explainer_title, |ui| {
            for (name, text) in &self.ui_config.explainer_points {
                ui.horizontal_wrapped(|ui| {
                    ui.label("•");
                    ui.label(egui::RichText::new(format!("{}:", name)).strong());
                    ui.label(text);
                });
            }
        });
    }
}

/// Shrinks `image` so neither side exceeds `max_side`, keeping aspect ratio.
pub fn preview_image(image: &RgbImage, max_side: u32) -> RgbImage {
    let max_side = max_side.max(1);
    let longest = image.width().max(image.height());
    if longest <= max_side {
        return image.clone();
    }

    let scale = max_side as f64 / longest as f64;
    let width = ((image.width() as f64 * scale).round() as u32).clamp(1, max_side);
    let height = ((image.height() as f64 * scale).round() as u32).clamp(1, max_side);
    imageops::thumbnail(image, width, height)
}

fn draw_report(ui: &mut egui::Ui, ui_config: &UiConfig, layout: &ReportLayout) {
    ui.add_space(20.0);

    egui::Frame::none()
        .fill(ui_config.card_fill)
        .rounding(15.0)
        .inner_margin(egui::Margin::same(25.0))
        .stroke(egui::Stroke::new(2.0, ui_config.accent))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(layout.headline.glyph).size(100.0));
                ui.label(
                    egui::RichText::new(&layout.headline.label)
                        .size(36.0)
                        .strong()
                        .color(ui_config.accent),
                );
                ui.label(
                    egui::RichText::new(&layout.headline.confidence)
                        .size(18.0)
                        .color(ui_config.muted_text),
                );
            });
        });

    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading(&ui_config.distribution_heading);
        for row in &layout.rows {
            ui.label(egui::RichText::new(&row.name).strong());
            ui.add(
                egui::ProgressBar::new(row.fraction)
                    .fill(ui_config.accent)
                    .text(format!("{:.2}%", row.score)),
            );
        }
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(&layout.elapsed)
                .small()
                .color(ui_config.muted_text),
        );
    });
}

impl eframe::App for Gui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.take_dropped_file(ctx);

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .show(ctx, |ui| self.draw_sidebar(ui));

        let mut requested = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(egui::RichText::new(&self.ui_config.title).size(32.0));
                ui.label(egui::RichText::new(&self.ui_config.subtitle).size(18.0));
                ui.add_space(12.0);

                requested = self.draw_upload_controls(ui);
                ui.add_space(12.0);

                self.draw_upload(ui);

                ui.add_space(16.0);
                self.draw_explainer(ui);
            });
        });

        if let Some(path) = requested {
            self.accept_path(&path);
        }
    }
}
