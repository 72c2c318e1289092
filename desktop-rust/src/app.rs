use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use eframe::egui::{self, Color32, RichText};
use signal_id_common::{build_detector, Detector, DetectorSettings, FileMeta, Session};

use crate::io::{dropped_selection, file_meta_for, load_preview, IMAGE_EXTENSIONS};
use crate::model::{FileSource, PendingDetection, UiMessage};

const ACCENT: Color32 = Color32::from_rgb(12, 135, 232);
const ERROR_RED: Color32 = Color32::from_rgb(220, 38, 38);
const RESULT_GREEN: Color32 = Color32::from_rgb(22, 163, 74);

pub struct DesktopApp {
    session: Session,
    detector: Box<dyn Detector>,
    pending: Option<PendingDetection>,
    preview_texture: Option<(u64, egui::TextureHandle)>,
    preview_failed: Option<u64>,
    preview_tx: Sender<UiMessage>,
    preview_rx: Receiver<UiMessage>,
    status: String,
}

impl DesktopApp {
    pub fn new(settings: DetectorSettings) -> Self {
        let (preview_tx, preview_rx) = mpsc::channel();
        Self {
            session: Session::new(),
            detector: build_detector(&settings),
            pending: None,
            preview_texture: None,
            preview_failed: None,
            preview_tx,
            preview_rx,
            status: String::new(),
        }
    }

    fn pick_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        match file_meta_for(&path) {
            Ok(meta) => self.select(Some((meta, FileSource::Path(path)))),
            Err(err) => self.status = format!("Open failed: {err:#}"),
        }
    }

    fn select(&mut self, selection: Option<(FileMeta, FileSource)>) {
        let (meta, source) = selection.unzip();
        let content_type = meta.as_ref().map(|m| m.content_type.clone()).unwrap_or_default();
        if let (Ok(image_id), Some(source)) = (self.session.submit_file(meta), source) {
            self.request_preview(image_id, source, content_type);
        }
        self.sync_after_change();
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if hovering && !self.session.is_dragging() {
            self.session.drag_enter();
        } else if !hovering && self.session.is_dragging() {
            self.session.drag_leave();
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let selections: Vec<(FileMeta, FileSource)> =
            dropped.iter().filter_map(dropped_selection).collect();
        let first = selections
            .first()
            .map(|(meta, source)| (meta.content_type.clone(), source.clone()));
        let metas = selections.into_iter().map(|(meta, _)| meta).collect();

        if let (Some(Ok(image_id)), Some((content_type, source))) =
            (self.session.drop_files(metas), first)
        {
            self.request_preview(image_id, source, content_type);
        }
        self.sync_after_change();
    }

    fn request_preview(&self, image_id: u64, source: FileSource, content_type: String) {
        let sender = self.preview_tx.clone();
        std::thread::spawn(move || {
            let outcome = load_preview(&source, &content_type).map_err(|err| format!("{err:#}"));
            let _ = sender.send(UiMessage::PreviewLoaded { image_id, outcome });
        });
    }

    fn poll_messages(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.preview_rx.try_recv() {
            let UiMessage::PreviewLoaded { image_id, outcome } = msg;
            match outcome {
                Ok(loaded) => {
                    if !self.session.attach_preview(image_id, loaded.preview) {
                        continue;
                    }
                    match loaded.pixels {
                        Some((size, pixels)) => {
                            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
                            let texture = ctx.load_texture(
                                format!("preview-{image_id}"),
                                color_image,
                                egui::TextureOptions::default(),
                            );
                            self.preview_texture = Some((image_id, texture));
                        }
                        None => self.preview_failed = Some(image_id),
                    }
                }
                Err(err) => {
                    log::warn!("preview load failed: {err}");
                    self.preview_failed = Some(image_id);
                }
            }
        }
        self.sync_after_change();
    }

    fn start_detection(&mut self) {
        match self.session.begin_detection() {
            Ok(ticket) => {
                self.pending = Some(PendingDetection {
                    ticket,
                    deadline: Instant::now() + self.detector.delay(),
                });
            }
            Err(err) => log::debug!("detection not started: {err:?}"),
        }
    }

    fn poll_detection(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.pending else {
            return;
        };
        if !self.session.is_detecting() {
            self.pending = None;
            return;
        }

        let now = Instant::now();
        if now < pending.deadline {
            ctx.request_repaint_after(pending.deadline - now);
            return;
        }

        self.pending = None;
        let outcome = match self.session.image() {
            Some(image) => self.detector.detect(image),
            None => Err("selection was cleared before detection finished".to_string()),
        };
        self.session.complete_detection(pending.ticket, outcome);
    }

    fn reset(&mut self) {
        self.session.reset();
        self.status.clear();
        self.sync_after_change();
    }

    /// 差し替わった画像のテクスチャと判定待ちを破棄する
    fn sync_after_change(&mut self) {
        for preview in self.session.take_released() {
            log::debug!("preview released ({} chars)", preview.src().len());
        }

        let current = self.session.image().map(|image| image.id);
        if self
            .preview_texture
            .as_ref()
            .is_some_and(|(id, _)| Some(*id) != current)
        {
            self.preview_texture = None;
        }
        if self.preview_failed.is_some() && self.preview_failed != current {
            self.preview_failed = None;
        }
        if !self.session.is_detecting() {
            self.pending = None;
        }
    }

    fn render_upload_area(&mut self, ui: &mut egui::Ui) {
        let dragging = self.session.is_dragging();
        let frame = egui::Frame::none()
            .fill(if dragging { Color32::from_rgb(230, 242, 253) } else { Color32::TRANSPARENT })
            .stroke(egui::Stroke::new(2.0, if dragging { ACCENT } else { Color32::from_gray(120) }))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(24.0));

        frame.show(ui, |ui| {
            ui.set_min_width(360.0);
            ui.vertical_centered(|ui| {
                if self.session.image().is_none() {
                    if ui.button(RichText::new("Upload an image").color(ACCENT)).clicked() {
                        self.pick_file();
                    }
                    ui.label("or drag and drop");
                    return;
                }

                let current = self.session.image().map(|image| image.id);
                match &self.preview_texture {
                    Some((id, texture)) if Some(*id) == current => {
                        let sized = egui::load::SizedTexture::from_handle(texture);
                        ui.add(egui::Image::from_texture(sized).max_size(egui::vec2(320.0, 240.0)));
                    }
                    _ if self.preview_failed.is_some() && self.preview_failed == current => {
                        ui.label(RichText::new("Preview unavailable").color(Color32::from_gray(140)));
                    }
                    _ => {
                        ui.spinner();
                    }
                }
                if let Some(image) = self.session.image() {
                    ui.label(RichText::new(&image.file.name).small());
                }
                ui.add_space(8.0);
                if ui.button("Reset").clicked() {
                    self.reset();
                }
            });
        });
    }

    fn render_banners(&self, ui: &mut egui::Ui) {
        if let Some(message) = self.session.error_message() {
            ui.label(RichText::new(message).color(ERROR_RED));
        }
        if let Some(result) = self.session.result() {
            ui.label(RichText::new(result.as_str()).size(20.0).strong().color(RESULT_GREEN));
        }
        if !self.status.is_empty() {
            ui.label(RichText::new(&self.status).color(Color32::from_gray(140)));
        }
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        let label = if self.session.is_detecting() { "Detecting..." } else { "Detect Signal" };
        if ui.add_enabled(self.session.can_detect(), egui::Button::new(label)).clicked() {
            self.start_detection();
        }
        if self.session.result().is_some() && ui.button("Upload Another Image").clicked() {
            self.reset();
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages(ctx);
        self.handle_drag_and_drop(ctx);
        self.poll_detection(ctx);
        if self.session.image().is_some() && self.session.preview().is_none() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading(RichText::new("Traffic Signal Identifier").size(28.0).strong());
                ui.label(
                    RichText::new("Upload a traffic signal image to detect its status.")
                        .color(Color32::from_gray(140)),
                );
                ui.add_space(16.0);
                self.render_upload_area(ui);
                ui.add_space(12.0);
                self.render_banners(ui);
                ui.add_space(12.0);
                self.render_actions(ui);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_id_common::{DetectorVariant, PLACEHOLDER_LABEL};
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    fn stub_app() -> DesktopApp {
        DesktopApp::new(DetectorSettings {
            variant: DetectorVariant::Stub,
            ..DetectorSettings::default()
        })
    }

    fn write_png(dir: &Path) -> PathBuf {
        let path = dir.join("photo.png");
        image::RgbaImage::new(4, 4).save(&path).unwrap();
        path
    }

    fn wait_for_preview(app: &mut DesktopApp, ctx: &egui::Context) {
        for _ in 0..200 {
            app.poll_messages(ctx);
            if app.session.preview().is_some() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("preview never arrived");
    }

    #[test]
    fn test_select_detect_reset() {
        let ctx = egui::Context::default();
        let mut app = stub_app();
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_png(temp_dir.path());

        let meta = file_meta_for(&path).unwrap();
        app.select(Some((meta, FileSource::Path(path.clone()))));
        wait_for_preview(&mut app, &ctx);
        assert!(app.preview_texture.is_some());

        app.start_detection();
        assert!(app.session.is_detecting());
        app.poll_detection(&ctx);
        assert_eq!(app.session.result().map(|r| r.as_str()), Some(PLACEHOLDER_LABEL));

        app.reset();
        assert!(app.session.image().is_none());
        assert!(app.session.result().is_none());
        assert!(app.preview_texture.is_none());
    }

    #[test]
    fn test_detect_without_image() {
        let ctx = egui::Context::default();
        let mut app = stub_app();
        app.start_detection();
        app.poll_detection(&ctx);
        assert_eq!(app.session.error_message().as_deref(), Some("Upload an image first."));
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_non_image_selection_reports_error() {
        let mut app = stub_app();
        let meta = FileMeta::new("doc.pdf", "application/pdf", 3);
        app.select(Some((meta, FileSource::Bytes(std::sync::Arc::from(&b"pdf"[..])))));
        assert_eq!(
            app.session.error_message().as_deref(),
            Some("Invalid file type. Only images allowed.")
        );
        assert!(app.session.image().is_none());
    }

    #[test]
    fn test_random_detection_waits_until_deadline() {
        let ctx = egui::Context::default();
        let mut app = DesktopApp::new(DetectorSettings {
            seed: Some(1),
            ..DetectorSettings::default()
        });
        let meta = FileMeta::new("photo.png", "image/png", 3);
        app.select(Some((meta, FileSource::Bytes(std::sync::Arc::from(&b"png"[..])))));

        app.start_detection();
        app.poll_detection(&ctx);
        assert!(app.session.is_detecting());
        assert!(app.session.result().is_none());

        if let Some(pending) = app.pending.as_mut() {
            pending.deadline = Instant::now();
        }
        app.poll_detection(&ctx);
        assert!(app.session.result().and_then(|r| r.color).is_some());
    }
}
