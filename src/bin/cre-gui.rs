/*!
 * GUI application for cre-rs - sovereign credit ratings explorer
 *
 * A cross-platform desktop application providing an interface for:
 * - Browsing and searching the country catalog
 * - Selecting two countries and comparing their agency ratings
 * - Exporting the comparison as CSV or JSON
 *
 * Platform support: Windows, macOS, Linux
 */

use clap::Parser;
use cre_rs::api::DEFAULT_BASE_URL;
use cre_rs::view::{Comparison, ComparisonView, CountryCard};
use cre_rs::{
    CatalogError, CompareTicket, Client, Controller, Country, CountryComparison, DateLocale,
    Notice, fetch, storage,
};
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::thread;

#[derive(Parser, Debug)]
#[command(name = "cre-gui", version, about = "Credit Ratings Explorer")]
struct Args {
    /// Base URL of the ratings backend.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Locale for rating dates (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("Credit Ratings Explorer - cre-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "Credit Ratings Explorer",
        options,
        Box::new(move |_cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
            let client = Client::new(&args.base_url)?;
            Ok(Box::new(ExplorerApp::new(
                client,
                DateLocale::from_tag(&args.locale),
            )))
        }),
    )
}

/// Results delivered by background workers.
enum Event {
    Catalog(Result<Vec<Country>, CatalogError>),
    Comparison(CompareTicket, Vec<CountryComparison>),
}

/// Main application state
struct ExplorerApp {
    client: Arc<Client>,
    controller: Controller,

    // Background operations
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    workers: Vec<(CompareTicket, thread::JoinHandle<()>)>,
    catalog_loading: bool,

    // UI state
    notice: Option<Notice>,
    queued_notices: Vec<Notice>,
    status_message: String,
}

impl ExplorerApp {
    fn new(client: Client, locale: DateLocale) -> Self {
        let (sender, receiver) = mpsc::channel();
        let mut app = Self {
            client: Arc::new(client),
            controller: Controller::new(locale),
            sender,
            receiver,
            workers: Vec::new(),
            catalog_loading: false,
            notice: None,
            queued_notices: Vec::new(),
            status_message: String::new(),
        };
        app.start_catalog_load();
        app
    }

    fn start_catalog_load(&mut self) {
        self.catalog_loading = true;
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let _ = sender.send(Event::Catalog(client.fetch_countries()));
        });
    }

    fn start_compare(&mut self) {
        let Some(ticket) = self.controller.begin_compare() else {
            return;
        };
        self.status_message.clear();

        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        let worker_ticket = ticket.clone();
        let handle = thread::spawn(move || {
            let results = fetch::fetch_comparison(client.as_ref(), &worker_ticket.countries);
            let _ = sender.send(Event::Comparison(worker_ticket, results));
        });
        self.workers.push((ticket, handle));
    }

    fn check_background_results(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            match event {
                Event::Catalog(result) => {
                    self.catalog_loading = false;
                    self.controller.apply_catalog(result);
                }
                Event::Comparison(ticket, results) => {
                    self.workers
                        .retain(|(t, _)| t.generation != ticket.generation);
                    if self.controller.finish_compare(&ticket, results) {
                        self.status_message =
                            format!("Compared {}", ticket.countries.join(" and "));
                    }
                }
            }
        }

        // A worker that exits cleanly has sent its event, which the next
        // frame picks up. Only a panicked worker never delivers.
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.workers)
            .into_iter()
            .partition(|(_, handle)| handle.is_finished());
        self.workers = running;
        for (ticket, handle) in finished {
            if handle.join().is_err() {
                self.controller.abort_compare(&ticket);
            }
        }
        self.queued_notices.extend(self.controller.take_notices());
        if self.notice.is_none() && !self.queued_notices.is_empty() {
            self.notice = Some(self.queued_notices.remove(0));
        }
    }

    fn export(&mut self) {
        let Some(view) = self.controller.comparison_view() else {
            return;
        };
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(dir)
            .set_file_name("comparison.json")
            .add_filter("JSON", &["json"])
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        let result = if is_csv {
            storage::save_csv(&view, &path)
        } else {
            storage::save_json(&view, &path)
        };
        match result {
            Ok(()) => self.status_message = format!("Saved comparison to {}", path.display()),
            Err(err) => {
                log::error!("Failed to save comparison: {err:#}");
                self.notice = Some(Notice::Error(format!("Failed to save comparison: {err}")));
            }
        }
    }

    fn catalog_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Countries");
        ui.add_space(5.0);

        let mut filter = self.controller.filter().to_string();
        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut filter);
        });
        if filter != self.controller.filter() {
            self.controller.set_filter(filter);
        }
        ui.add_space(5.0);

        if self.catalog_loading {
            ui.spinner();
            return;
        }

        let view = self.controller.catalog_view();
        if let Some(placeholder) = view.placeholder {
            ui.weak(placeholder);
            if ui.button("Reload").clicked() {
                self.start_catalog_load();
            }
            return;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in view.visible() {
                if ui.selectable_label(item.selected, &item.name).clicked() {
                    clicked = Some(item.name.clone());
                }
            }
        });
        if let Some(name) = clicked {
            self.controller.toggle(&name);
        }
    }

    fn selection_bar(&mut self, ui: &mut egui::Ui) {
        let view = self.controller.selection_view();
        let mut removed = None;
        ui.horizontal(|ui| {
            if let Some(placeholder) = view.placeholder {
                ui.weak(placeholder);
            }
            for name in &view.badges {
                ui.group(|ui| {
                    ui.label(name);
                    if ui.small_button("×").clicked() {
                        removed = Some(name.clone());
                    }
                });
            }
            if !view.badges.is_empty() && ui.small_button("Clear").clicked() {
                self.controller.clear_selection();
            }
        });
        if let Some(name) = removed {
            self.controller.toggle(&name);
        }

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            let loading = self.controller.is_loading();
            if view.compare_visible
                && ui
                    .add_enabled(!loading, egui::Button::new("Compare"))
                    .clicked()
            {
                self.start_compare();
            }
            if loading {
                ui.spinner();
                ui.label("Loading ratings...");
            }

            ui.separator();
            let mut locale = self.controller.locale();
            egui::ComboBox::from_label("Date locale")
                .selected_text(locale.tag())
                .show_ui(ui, |ui| {
                    for l in DateLocale::ALL {
                        ui.selectable_value(&mut locale, l, l.tag());
                    }
                });
            if locale != self.controller.locale() {
                self.controller.set_locale(locale);
            }
        });
    }

    fn comparison_section(&mut self, ui: &mut egui::Ui) {
        let Some(view) = self.controller.comparison_view() else {
            return;
        };
        match &view {
            ComparisonView::NoData { message } => {
                ui.colored_label(egui::Color32::from_rgb(200, 140, 0), *message);
            }
            ComparisonView::Ready(cmp) => {
                paint_comparison(ui, cmp);
                ui.add_space(10.0);
                if ui.button("Export...").clicked() {
                    self.export();
                }
            }
        }
    }

    fn notice_window(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notice.clone() else {
            return;
        };
        let (title, color) = match notice {
            Notice::Warning(_) => ("Warning", egui::Color32::from_rgb(200, 140, 0)),
            Notice::Error(_) => ("Error", egui::Color32::RED),
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(color, notice.to_string());
                ui.add_space(5.0);
                if ui.button("OK").clicked() {
                    self.notice = None;
                }
            });
    }
}

fn paint_card(ui: &mut egui::Ui, card: &CountryCard) {
    ui.group(|ui| {
        ui.set_min_width(260.0);
        ui.vertical(|ui| {
            ui.heading(&card.country);
            ui.separator();
            for row in &card.rows {
                ui.label(egui::RichText::new(&row.agency).strong());
                ui.label(egui::RichText::new(&row.rating).size(20.0));
                ui.label(format!("Outlook: {}", row.outlook));
                ui.weak(format!("Updated: {}", row.updated));
                ui.add_space(4.0);
            }
            ui.separator();
            ui.label("Credit Score");
            ui.label(egui::RichText::new(&card.score_label).size(18.0).strong());
            ui.label(&card.summary);
        });
    });
}

fn paint_comparison(ui: &mut egui::Ui, cmp: &Comparison) {
    ui.horizontal_wrapped(|ui| {
        for card in &cmp.cards {
            paint_card(ui, card);
        }
    });
    ui.add_space(10.0);
    ui.group(|ui| {
        ui.label(egui::RichText::new(cmp.analysis_title).strong());
        ui.label(&cmp.analysis.text);
    });
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_background_results();

        // Keep polling while workers are out (for spinner animation and results)
        if self.catalog_loading || self.controller.is_loading() {
            ctx.request_repaint();
        }

        egui::SidePanel::left("catalog")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| self.catalog_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Sovereign Credit Ratings");
                ui.add_space(10.0);
                self.selection_bar(ui);
                ui.add_space(10.0);
                self.comparison_section(ui);

                if !self.status_message.is_empty() {
                    ui.add_space(10.0);
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }
            });
        });

        self.notice_window(ctx);
    }
}
