//! Cursor Trail RS - Main Application
//! Decorative pointer particle trail painted over a demo portfolio page

mod config;
mod demo;
mod filter;
mod trail;

use config::{ThemePalette, ThemeWatcher, TrailConfig};
use demo::DemoPage;
use eframe::egui;
use std::time::Instant;
use trail::TrailEngine;

/// Main application state
struct CursorTrailApp {
    engine: TrailEngine,
    page: DemoPage,
    theme: ThemeWatcher,
    started: Instant,
}

impl CursorTrailApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        Self {
            engine: TrailEngine::new(TrailConfig::default(), &ThemePalette::light()),
            page: DemoPage::new(),
            theme: ThemeWatcher::new(),
            started: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl eframe::App for CursorTrailApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Re-subscribe the palette whenever the theme flag flips after mount.
        if let Some(dark_mode) = self.theme.observe(ctx.style().visuals.dark_mode) {
            self.engine.set_palette(&ThemePalette::for_theme(dark_mode));
            log::debug!("theme changed, dark_mode={dark_mode}");
        }

        // Host page; rebuilds the pointer-target regions for this frame.
        egui::CentralPanel::default().show(ctx, |ui| self.page.show(ui));

        // Pointer-move events append to the particle set, subject to the
        // exclusion filter and the spawn throttle.
        let now = self.now_ms();
        let moves: Vec<egui::Pos2> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::PointerMoved(pos) => Some(*pos),
                    _ => None,
                })
                .collect()
        });

        let mut rng = rand::thread_rng();
        for pos in moves {
            let target = self.page.target_at(pos);
            self.engine.pointer_moved(pos, &target, now, &mut rng);
        }

        // Overlay: foreground layer painter, above all content and never
        // intercepting input. Skip the draw if there is no viewport yet.
        let screen = ctx.screen_rect();
        if screen.width() > 0.0 && screen.height() > 0.0 {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("cursor-trail-overlay"),
            ));
            self.engine.render(&painter);
        }
        self.engine.tick(now);

        // Keep the animation loop running until the window closes.
        ctx.request_repaint();
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("starting cursor trail demo");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("Cursor Trail RS")
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cursor Trail RS",
        options,
        Box::new(|cc| Box::new(CursorTrailApp::new(cc))),
    )
}
