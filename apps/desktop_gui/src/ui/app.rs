use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use client_core::{BrowserState, LoadPhase, PAGE_SIZE_OPTIONS};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use shared::{
    domain::{SortKey, StatusFilter},
    error::FetchError,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

/// Status values the upstream is known to use. The filter itself accepts
/// any string; this is just what the dropdown offers.
const STATUS_OPTIONS: [&str; 3] = ["Alive", "Dead", "unknown"];

pub struct ViewerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    settings: Settings,
    state: BrowserState,
    last_generation: u64,
    search_input: String,
    status_line: String,
    portraits: HashMap<String, TextureHandle>,
    pending_portraits: HashSet<String>,
    failed_portraits: HashSet<String>,
}

impl ViewerApp {
    pub fn new(settings: Settings, cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            settings,
            state: BrowserState::new(),
            last_generation: 0,
            search_input: String::new(),
            status_line: String::new(),
            portraits: HashMap::new(),
            pending_portraits: HashSet::new(),
            failed_portraits: HashSet::new(),
        };
        app.request_batch();
        app
    }

    fn request_batch(&mut self) {
        self.last_generation = self.state.begin_load();
        let cmd = BackendCommand::LoadBatch {
            generation: self.last_generation,
            start_page: self.settings.start_page,
            desired_count: self.settings.batch_size,
        };
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status_line);
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status_line = message;
                }
                UiEvent::BatchLoaded {
                    generation,
                    characters,
                } => {
                    let count = characters.len();
                    if self.state.finish_load(generation, Ok(characters)) {
                        self.status_line = format!("Loaded {count} characters");
                    }
                }
                UiEvent::BatchFailed {
                    generation,
                    message,
                } => {
                    if self.state.finish_load(generation, Err(FetchError::new(message))) {
                        self.status_line = "Failed to fetch characters.".to_string();
                    }
                }
                UiEvent::PortraitLoaded { url, image } => {
                    self.pending_portraits.remove(&url);
                    let texture = ctx.load_texture(
                        url.clone(),
                        egui::ColorImage::from_rgba_unmultiplied(
                            [image.width, image.height],
                            &image.rgba,
                        ),
                        egui::TextureOptions::LINEAR,
                    );
                    self.portraits.insert(url, texture);
                }
                UiEvent::PortraitFailed { url, .. } => {
                    self.pending_portraits.remove(&url);
                    self.failed_portraits.insert(url);
                }
                UiEvent::WorkerFailed { message } => {
                    self.state
                        .finish_load(self.last_generation, Err(FetchError::new(message)));
                    self.status_line = "Failed to fetch characters.".to_string();
                }
            }
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search characters by name...")
                    .desired_width(220.0),
            );
            if response.changed() {
                self.state.apply_search(self.search_input.clone());
            }

            ui.separator();

            ui.label("Sort by:");
            let mut sort_choice = self.state.sort_key();
            egui::ComboBox::from_id_salt("sort_key")
                .selected_text(sort_label(sort_choice))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut sort_choice, Some(SortKey::Name), "Name");
                    ui.selectable_value(&mut sort_choice, Some(SortKey::Status), "Status");
                    ui.selectable_value(&mut sort_choice, Some(SortKey::Species), "Species");
                });
            if sort_choice != self.state.sort_key() {
                if let Some(key) = sort_choice {
                    self.state.apply_sort(key);
                }
            }

            ui.label("Status:");
            let mut filter_choice = self.state.status_filter().clone();
            egui::ComboBox::from_id_salt("status_filter")
                .selected_text(status_label(&filter_choice))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut filter_choice, StatusFilter::All, "All");
                    for status in STATUS_OPTIONS {
                        ui.selectable_value(
                            &mut filter_choice,
                            StatusFilter::Only(status.to_string()),
                            status,
                        );
                    }
                });
            if filter_choice != *self.state.status_filter() {
                self.state.apply_status_filter(filter_choice);
            }

            ui.label("Items per page:");
            let mut size_choice = self.state.page_size();
            egui::ComboBox::from_id_salt("page_size")
                .selected_text(size_choice.to_string())
                .show_ui(ui, |ui| {
                    for size in PAGE_SIZE_OPTIONS {
                        ui.selectable_value(&mut size_choice, size, size.to_string());
                    }
                });
            if size_choice != self.state.page_size() {
                self.state.set_page_size(size_choice);
            }

            ui.separator();
            if ui.button("Reload").clicked() {
                self.request_batch();
            }
        });
    }

    fn render_table(&mut self, ui: &mut egui::Ui) {
        let page = self.state.visible_page();
        let selected_id = self.state.selected().map(|c| c.id);

        egui::Grid::new("character_table")
            .striped(true)
            .num_columns(3)
            .min_col_width(140.0)
            .show(ui, |ui| {
                if ui.button("Name").clicked() {
                    self.state.apply_sort(SortKey::Name);
                }
                if ui.button("Status").clicked() {
                    self.state.apply_sort(SortKey::Status);
                }
                if ui.button("Species").clicked() {
                    self.state.apply_sort(SortKey::Species);
                }
                ui.end_row();

                for character in page {
                    let is_selected = selected_id == Some(character.id);
                    if ui.selectable_label(is_selected, &character.name).clicked() {
                        self.state.select(character.clone());
                    }
                    ui.label(&character.status);
                    ui.label(&character.species);
                    ui.end_row();
                }
            });
    }

    fn render_pagination(&mut self, ui: &mut egui::Ui) {
        let total_pages = self.state.total_pages();
        let page_index = self.state.page_index();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(page_index > 1, egui::Button::new("Previous"))
                .clicked()
            {
                self.state.prev_page();
            }

            ui.label(format!("Page {page_index} of {total_pages}"));

            let mut page_choice = page_index;
            egui::ComboBox::from_id_salt("page_select")
                .selected_text(page_choice.to_string())
                .show_ui(ui, |ui| {
                    for page in 1..=total_pages {
                        ui.selectable_value(&mut page_choice, page, page.to_string());
                    }
                });
            if page_choice != page_index {
                self.state.go_to_page(page_choice);
            }

            if ui
                .add_enabled(page_index < total_pages, egui::Button::new("Next"))
                .clicked()
            {
                self.state.next_page();
            }
        });
    }

    fn render_detail(&mut self, ctx: &egui::Context) {
        let Some(selected) = self.state.selected().cloned() else {
            return;
        };

        egui::SidePanel::right("character_detail")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Character Details");
                ui.separator();
                ui.label(format!("Name: {}", selected.name));
                ui.label(format!("Status: {}", selected.status));
                ui.label(format!("Species: {}", selected.species));
                ui.add_space(8.0);

                let url = selected.image.clone();
                if let Some(texture) = self.portraits.get(&url) {
                    ui.add(egui::Image::new(texture).max_width(220.0));
                } else if self.failed_portraits.contains(&url) {
                    ui.label(egui::RichText::new("portrait unavailable").weak());
                } else {
                    if self.pending_portraits.insert(url.clone()) {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::FetchPortrait { url },
                            &mut self.status_line,
                        );
                    }
                    ui.spinner();
                }
            });
    }

    fn render_error(&mut self, ui: &mut egui::Ui, detail: &str) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Failed to fetch characters.")
                    .color(egui::Color32::from_rgb(200, 80, 80))
                    .heading(),
            );
            ui.label(egui::RichText::new(detail).weak());
            ui.add_space(8.0);
            if ui.button("Reload").clicked() {
                self.request_batch();
            }
        });
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);

        let phase = self.state.phase().clone();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_line);
                if let Some(at) = self.state.loaded_at() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "last loaded {}",
                                at.format("%H:%M:%S UTC")
                            ))
                            .weak(),
                        );
                    });
                }
            });
        });

        match phase {
            LoadPhase::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.label("Loading...");
                    });
                });
            }
            LoadPhase::Error(detail) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.render_error(ui, &detail);
                });
            }
            LoadPhase::Idle | LoadPhase::Ready => {
                self.render_detail(ctx);
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Characters");
                    self.render_controls(ui);
                    ui.separator();
                    self.render_table(ui);
                    ui.separator();
                    self.render_pagination(ui);
                });
            }
        }

        if *self.state.phase() == LoadPhase::Loading || !self.pending_portraits.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(150));
        }
    }
}

fn sort_label(key: Option<SortKey>) -> &'static str {
    match key {
        None => "None",
        Some(SortKey::Name) => "Name",
        Some(SortKey::Status) => "Status",
        Some(SortKey::Species) => "Species",
    }
}

fn status_label(filter: &StatusFilter) -> String {
    match filter {
        StatusFilter::All => "All".to_string(),
        StatusFilter::Only(status) => status.clone(),
    }
}
