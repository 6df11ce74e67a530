//! Egui control panel for the galaxy parameters.
//!
//! Widgets edit the draft in a [`ParamStore`]. [`ControlPanel::show`] reports
//! when an edit is finished (drag released, focus lost, or a discrete change
//! such as a click or arrow key), which is when the caller should commit.

use crate::params::{GalaxyParams, ParamStore, MAX_BRANCHES, MAX_PARTICLES, SPIN_MAX, SPIN_MIN};

#[derive(Debug, Clone)]
pub struct ControlPanel {
    title: String,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            title: "Galaxy".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Draw the panel. Returns true when an edit finished this frame.
    pub fn show(&self, ctx: &egui::Context, store: &mut ParamStore) -> bool {
        let mut finished = false;

        egui::Window::new(self.title.as_str())
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                let draft = store.draft_mut();
                egui::Grid::new("galaxy_params")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("count");
                        let response = ui.add(
                            egui::DragValue::new(&mut draft.count)
                                .range(1..=MAX_PARTICLES)
                                .speed(100.0),
                        );
                        finished |= edit_finished(&response);
                        ui.end_row();

                        ui.label("branches");
                        let response =
                            ui.add(egui::DragValue::new(&mut draft.branches).range(1..=MAX_BRANCHES));
                        finished |= edit_finished(&response);
                        ui.end_row();

                        ui.label("spin");
                        let response = ui.add(
                            egui::Slider::new(&mut draft.spin, SPIN_MIN..=SPIN_MAX).step_by(0.1),
                        );
                        finished |= edit_finished(&response);
                        ui.end_row();
                    });

                ui.separator();
                if ui.button("Reset to Defaults").clicked() {
                    *store.draft_mut() = GalaxyParams::default();
                    finished = true;
                }
            });

        finished
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the widget behind `response` finished an edit this frame.
fn edit_finished(response: &egui::Response) -> bool {
    finish_event(
        response.changed(),
        response.dragged(),
        response.has_focus(),
        response.drag_stopped(),
        response.lost_focus(),
    )
}

/// A drag commits on release and typing commits on focus loss. A change
/// outside both (a click or a key press on the widget) commits right away.
fn finish_event(
    changed: bool,
    dragging: bool,
    focused: bool,
    drag_stopped: bool,
    lost_focus: bool,
) -> bool {
    drag_stopped || lost_focus || (changed && !dragging && !focused)
}
