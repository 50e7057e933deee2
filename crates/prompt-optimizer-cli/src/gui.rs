use std::path::Path;
use std::sync::mpsc::{channel, Receiver};

use eframe::egui;
use tokio::runtime::Runtime;

use prompt_optimizer_core::config::Config;
use prompt_optimizer_core::{
    compare, require_credential, CompletionClient, Comparison, OptimizerError, Result,
};

use crate::display::{ORIGINAL_HEADING, SUGGESTED_HEADING};

pub fn run(base_dir: &Path) -> Result<()> {
    let config = Config::load(base_dir)?;
    let client = CompletionClient::new(&config.llm)?;
    let runtime = Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([500.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AI-based Prompt Optimizer",
        options,
        Box::new(|_cc| Ok(Box::new(OptimizerApp::new(config, client, runtime)))),
    )
    .map_err(|e| OptimizerError::Gui(e.to_string()))?;

    Ok(())
}

struct OptimizerApp {
    config: Config,
    client: CompletionClient,
    runtime: Runtime,
    api_key: String,
    prompt: String,
    pending: Option<Receiver<Result<Comparison>>>,
    result: Option<Comparison>,
    status_message: Option<(String, MessageType)>,
}

enum MessageType {
    Error,
    Info,
}

impl OptimizerApp {
    fn new(config: Config, client: CompletionClient, runtime: Runtime) -> Self {
        let api_key = config.llm.credential_from_env().unwrap_or_default();

        Self {
            config,
            client,
            runtime,
            api_key,
            prompt: String::new(),
            pending: None,
            result: None,
            status_message: None,
        }
    }

    fn submit(&mut self, ctx: &egui::Context) {
        if let Err(e) = require_credential(Some(&self.api_key), &self.config.llm.api_key_env) {
            self.status_message = Some((e.to_string(), MessageType::Error));
            return;
        }

        let (tx, rx) = channel();
        let client = self.client.clone();
        let prompt = self.prompt.clone();
        let api_key = self.api_key.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = compare(&client, &prompt, Some(&api_key)).await;
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        self.pending = Some(rx);
        self.result = None;
        self.status_message = Some((
            format!("Asking {}...", self.config.llm.model),
            MessageType::Info,
        ));
    }

    fn poll_pending(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };

        if let Ok(result) = rx.try_recv() {
            self.pending = None;
            match result {
                Ok(comparison) => {
                    self.result = Some(comparison);
                    self.status_message = None;
                }
                Err(e) => {
                    self.status_message = Some((e.to_string(), MessageType::Error));
                }
            }
        }
    }
}

impl eframe::App for OptimizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("AI-based Prompt Optimizer");
            ui.add_space(8.0);
        });

        egui::SidePanel::left("credentials")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label("Enter your OpenAI API key");
                ui.add(egui::TextEdit::singleline(&mut self.api_key).password(true));
                ui.add_space(8.0);
                ui.label(format!("Model: {}", self.config.llm.model));
                ui.label(format!("Endpoint: {}", self.config.llm.endpoint));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label("Enter your business-related query:");
                ui.add(
                    egui::TextEdit::multiline(&mut self.prompt)
                        .desired_rows(6)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let busy = self.pending.is_some();
                    if ui
                        .add_enabled(!busy, egui::Button::new("Optimize Prompt"))
                        .clicked()
                    {
                        self.submit(ctx);
                    }
                    if busy {
                        ui.spinner();
                    }
                });

                let mut clear_status = false;
                if let Some((msg, msg_type)) = &self.status_message {
                    let color = match msg_type {
                        MessageType::Error => egui::Color32::RED,
                        MessageType::Info => egui::Color32::LIGHT_BLUE,
                    };
                    ui.horizontal(|ui| {
                        ui.colored_label(color, msg.clone());
                        if ui.small_button("x").clicked() {
                            clear_status = true;
                        }
                    });
                }
                if clear_status {
                    self.status_message = None;
                }

                if let Some(result) = &self.result {
                    show_comparison(ui, result);
                }
            });
        });
    }
}

fn show_comparison(ui: &mut egui::Ui, result: &Comparison) {
    ui.separator();
    ui.heading("Suggested Optimized Prompt");
    ui.label(&result.augmented);
    ui.label(format!("Prompt type is {}", result.category));

    ui.add_space(8.0);
    ui.heading("Response Comparison");
    let column_width = (ui.available_width() / 2.0 - 16.0).max(100.0);
    egui::Grid::new("responses")
        .num_columns(2)
        .striped(true)
        .min_col_width(column_width)
        .max_col_width(column_width)
        .show(ui, |ui| {
            ui.strong(ORIGINAL_HEADING);
            ui.strong(SUGGESTED_HEADING);
            ui.end_row();

            ui.label(&result.original_response);
            ui.label(&result.optimized_response);
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.heading("Why is this Prompt Better?");
    ui.label(result.rationale);
}
