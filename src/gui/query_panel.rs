//! Query Panel Widget
//! Left side panel with the company name input, suggestions and export
//! actions.

use egui::{Color32, RichText, ScrollArea};

/// Left side panel driving the query.
pub struct QueryPanel {
    pub key_input: String,
    last_submitted: String,
    pub names: Vec<String>,
    pub source: String,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for QueryPanel {
    fn default() -> Self {
        Self {
            key_input: String::new(),
            last_submitted: String::new(),
            names: Vec::new(),
            source: String::new(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl QueryPanel {
    pub fn new(source: String, names: Vec<String>) -> Self {
        Self {
            source,
            names,
            ..Self::default()
        }
    }

    /// Suggestions containing the current input, case-insensitively.
    pub fn matching_names(&self) -> Vec<&str> {
        let needle = self.key_input.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Whether the input should be committed after a focus change.
    ///
    /// Enter always commits; leaving the field commits only an edited key.
    pub fn commits_on(&self, lost_focus: bool, enter_pressed: bool) -> bool {
        lost_focus && (enter_pressed || self.key_input != self.last_submitted)
    }

    /// Record `key` as submitted and build the action for it.
    fn submit(&mut self, key: String) -> QueryPanelAction {
        self.last_submitted = key.clone();
        QueryPanelAction::Submit(key)
    }

    /// Draw the query panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> QueryPanelAction {
        let mut action = QueryPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🗺 Geomapping Visualization")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(6.0);
        ui.label(
            RichText::new("Enter the company name to visualize tier 1 coordinates.")
                .size(12.0)
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&self.source).size(12.0));
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Query Section =====
        ui.label(RichText::new("Enter the company name for tracking:").size(14.0).strong());
        ui.add_space(5.0);

        let response = ui.add(
            egui::TextEdit::singleline(&mut self.key_input)
                .hint_text("Company name")
                .desired_width(f32::INFINITY),
        );
        let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if self.commits_on(response.lost_focus(), enter_pressed) {
            action = self.submit(self.key_input.clone());
        }

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("▶ Visualize").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(button).clicked() {
                action = self.submit(self.key_input.clone());
            }
        });

        ui.add_space(10.0);
        ui.label(RichText::new("Companies").size(12.0).strong());
        let mut picked = None;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    for name in self.matching_names() {
                        if ui.selectable_label(self.key_input == name, name).clicked() {
                            picked = Some(name.to_string());
                        }
                    }
                });
            });
        if let Some(name) = picked {
            self.key_input = name.clone();
            action = self.submit(name);
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let open_button = egui::Button::new(RichText::new("🌐 Open in Browser").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(open_button).clicked() {
                    action = QueryPanelAction::OpenInBrowser;
                }

                ui.add_space(8.0);

                let export_button = egui::Button::new(RichText::new("📄 Export HTML…").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = QueryPanelAction::ExportHtml;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("No data") {
            Color32::from_rgb(243, 156, 18)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by the query panel
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPanelAction {
    None,
    Submit(String),
    OpenInBrowser,
    ExportHtml,
}
