use std::time::Duration;

use chrono::Local;
use client_core::ClientSettings;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{CandidateFile, PreviewId, SelectionSource, SubmissionId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_classify_failure, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{ClassifierState, Selection};
use crate::media;
use crate::ui::{panels, theme};

const CONTENT_MAX_WIDTH: f32 = 760.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub settings: ClientSettings,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    state: ClassifierState,
    /// GPU texture for the current preview; replaced (and freed) whenever
    /// the preview id changes.
    preview_texture: Option<(PreviewId, egui::TextureHandle)>,

    palette: theme::Palette,
    endpoint_label: String,
    status: String,
}

impl DesktopGuiApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
        ctx: &egui::Context,
    ) -> Self {
        let palette = theme::Palette::clinical_dark();
        ctx.set_visuals(theme::visuals_for_palette(&palette));
        Self {
            cmd_tx,
            ui_rx,
            state: ClassifierState::new(),
            preview_texture: None,
            palette,
            endpoint_label: startup.settings.endpoint_url.to_string(),
            status: "Starting background worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), category = ?err.category(), "{}", err.message());
                    self.status = if err.context() == UiErrorContext::BackendStartup {
                        describe_classify_failure(err.message())
                    } else {
                        err.message().to_string()
                    };
                }
                UiEvent::ClassificationSettled { submission, result } => {
                    let status = match &result {
                        Ok(outcome) => format!(
                            "Analyzed at {} - {}",
                            Local::now().format("%H:%M:%S"),
                            outcome.label
                        ),
                        Err(err) => {
                            tracing::debug!(
                                %submission,
                                category = ?err.category(),
                                retryable = err.is_retryable(),
                                "classification settled with error"
                            );
                            describe_classify_failure(err.message())
                        }
                    };
                    if self.state.settle(submission, result) {
                        self.status = status;
                    }
                }
            }
        }
    }

    fn cancel_submission(&mut self, submission: SubmissionId) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Cancel { submission },
            &mut self.status,
        );
    }

    fn stage(&mut self, candidate: CandidateFile, origin: SelectionSource) {
        let file_name = candidate.file_name.clone();
        match self.state.select(candidate, origin) {
            Selection::Staged { superseded } => {
                if let Some(submission) = superseded {
                    self.cancel_submission(submission);
                }
                self.status = format!("Selected {file_name}");
            }
            Selection::Rejected => {
                self.status = format!("Rejected {file_name}");
            }
        }
    }

    fn report_unreadable(&mut self, origin: SelectionSource, err: &anyhow::Error) {
        let err = UiError::from_message(UiErrorContext::Selection, format!("{err:#}"));
        tracing::warn!(?origin, category = ?err.category(), "{}", err.message());
        self.state.reject_unreadable(origin);
        self.status = err.message().to_string();
    }

    fn open_picker(&mut self) {
        let Some(path) = media::pick_image_file() else {
            return;
        };
        match media::read_picked_file(&path) {
            Ok(candidate) => self.stage(candidate, SelectionSource::Picker),
            Err(err) => self.report_unreadable(SelectionSource::Picker, &err),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };
        match media::candidate_from_dropped(&file) {
            Ok(Some(candidate)) => self.stage(candidate, SelectionSource::Drop),
            Ok(None) => self.state.reject_unreadable(SelectionSource::Drop),
            Err(err) => self.report_unreadable(SelectionSource::Drop, &err),
        }
    }

    fn try_submit(&mut self) {
        let Some(request) = self.state.begin_submission() else {
            return;
        };
        let submission = request.submission;
        self.status = format!("Analyzing {}...", request.image.file_name());
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Classify {
                submission,
                image: request.image,
            },
            &mut self.status,
        );
        if !queued {
            self.state.settle(submission, Err(()));
        }
    }

    fn sync_preview_texture(&mut self, ctx: &egui::Context) {
        let Some(handle) = self.state.preview() else {
            self.preview_texture = None;
            return;
        };
        if matches!(&self.preview_texture, Some((id, _)) if *id == handle.id()) {
            return;
        }
        self.preview_texture = handle.image().map(|image| {
            let color_image =
                egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
            let texture = ctx.load_texture(
                format!("scan-preview:{}", handle.id()),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            (handle.id(), texture)
        });
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        let files_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let palette = self.palette;
        let mut open_picker = false;
        let mut submit = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CONTENT_MAX_WIDTH);
                    ui.add_space(28.0);
                    panels::header(ui, &palette);
                    ui.add_space(28.0);

                    let view = self.state.view();
                    let texture = self.preview_texture.as_ref().map(|(_, texture)| texture);

                    panels::card_frame(&palette).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        if panels::drop_zone(ui, &view.drop_zone, texture, files_hovering, &palette)
                            .clicked()
                        {
                            open_picker = true;
                        }
                        if let Some(message) = view.error {
                            panels::error_row(ui, message, &palette);
                        }
                        submit = panels::submit_button(ui, view.submit, &palette);
                    });

                    if let Some(results) = &view.results {
                        ui.add_space(20.0);
                        panels::results_card(ui, results, &palette);
                    }

                    ui.add_space(16.0);
                    ui.horizontal_wrapped(|ui| {
                        ui.small(egui::RichText::new(&self.status).color(palette.muted_text));
                        ui.small(
                            egui::RichText::new(format!("Endpoint: {}", self.endpoint_label))
                                .color(palette.muted_text),
                        );
                    });
                });
            });
        });

        if open_picker {
            self.open_picker();
        }
        if submit {
            self.try_submit();
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_dropped_files(ctx);
        self.sync_preview_texture(ctx);
        self.show_main(ctx);

        if self.state.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Drop for DesktopGuiApp {
    fn drop(&mut self) {
        if let Some(submission) = self.state.teardown() {
            self.cancel_submission(submission);
        }
        self.preview_texture = None;
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
