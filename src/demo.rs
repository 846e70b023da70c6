//! Demo page
//! A small portfolio-style layout that stands in for the host page: it
//! provides pointer targets (cards, text, buttons) for the exclusion filter
//! and a theme toggle driving the palette.

use crate::filter::{ElementInfo, ElementKind, PointerTarget};
use egui::{Pos2, Rect, RichText, Ui, Visuals};
use std::cmp::Ordering;

pub struct DemoPage {
    /// Structural descriptions of everything laid out this frame, so the
    /// pointer target can be resolved without inspecting egui internals.
    regions: Vec<(Rect, ElementInfo)>,
}

impl DemoPage {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    fn record(&mut self, rect: Rect, info: ElementInfo) {
        self.regions.push((rect, info));
    }

    /// Resolve the element chain under `pos`: the smallest containing region
    /// is the target, every other containing region is an ancestor. Empty
    /// space resolves to a generic, spawn-eligible target.
    pub fn target_at(&self, pos: Pos2) -> PointerTarget {
        let mut hits: Vec<&(Rect, ElementInfo)> = self
            .regions
            .iter()
            .filter(|(rect, _)| rect.contains(pos))
            .collect();

        if hits.is_empty() {
            return PointerTarget::generic();
        }

        hits.sort_by(|a, b| {
            a.0.area()
                .partial_cmp(&b.0.area())
                .unwrap_or(Ordering::Equal)
        });

        let mut target = PointerTarget::new(hits[0].1.clone());
        for (_, info) in hits.iter().skip(1) {
            target = target.with_ancestor(info.clone());
        }
        target
    }

    pub fn show(&mut self, ui: &mut Ui) {
        self.regions.clear();

        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            let r = ui.heading(RichText::new("Marina Duarte").size(30.0));
            self.record(r.rect, ElementInfo::new(ElementKind::Heading(1)));

            let r = ui.label("Software engineer — distributed systems & visual computing");
            self.record(r.rect, ElementInfo::new(ElementKind::Span));

            ui.add_space(12.0);
            let r = ui.label(
                "Move the cursor over empty space to see the trail. \
                 It stays off cards, text, and anything clickable.",
            );
            self.record(r.rect, ElementInfo::new(ElementKind::Paragraph));
        });

        ui.add_space(32.0);
        ui.horizontal_wrapped(|ui| {
            self.project_card(
                ui,
                "Flowlight",
                "Realtime dataflow visualizer for streaming pipelines.",
            );
            self.project_card(
                ui,
                "Harbormark",
                "Benchmark harness for storage engines under churn.",
            );
            self.project_card(
                ui,
                "Quillwave",
                "Audio-reactive generative art toolkit.",
            );
        });

        ui.add_space(40.0);
        ui.horizontal(|ui| {
            let dark = ui.ctx().style().visuals.dark_mode;
            let label = if dark { "Switch to light" } else { "Switch to dark" };
            let r = ui.button(label);
            self.record(r.rect, ElementInfo::new(ElementKind::Button));
            if r.clicked() {
                let visuals = if dark {
                    Visuals::light()
                } else {
                    Visuals::dark()
                };
                ui.ctx().set_visuals(visuals);
            }

            let r = ui.hyperlink_to("contact", "mailto:marina@example.com");
            self.record(r.rect, ElementInfo::new(ElementKind::Anchor));
        });
    }

    fn project_card(&mut self, ui: &mut Ui, title: &str, blurb: &str) {
        let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(220.0);
            let r = ui.heading(title);
            self.record(r.rect, ElementInfo::new(ElementKind::Heading(3)));
            let r = ui.label(blurb);
            self.record(r.rect, ElementInfo::new(ElementKind::Paragraph));
            let r = ui.button("View");
            self.record(r.rect, ElementInfo::new(ElementKind::Button));
        });
        self.record(
            frame.response.rect,
            ElementInfo::new(ElementKind::Generic).with_class("project-card"),
        );
    }
}

impl Default for DemoPage {
    fn default() -> Self {
        Self::new()
    }
}
