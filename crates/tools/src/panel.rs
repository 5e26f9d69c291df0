use lightlab_bindings::{BindError, BindingId, BindingTable, Control, Value};
use lightlab_common::Color;
use lightlab_kernel::SceneRegistry;

/// One control change reported by the panel, not yet applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelEdit {
    pub binding: BindingId,
    /// Raw widget value; the table quantizes it on apply.
    pub raw: Value,
}

/// egui parameter panel: one collapsing section per folder, a slider per
/// numeric control and a color button per color control.
///
/// Drawing only reads the registry. Changes are returned as [`PanelEdit`]s
/// and applied afterwards with [`ParameterPanel::apply`], so the registry is
/// never borrowed mutably while the UI closure runs.
#[derive(Debug)]
pub struct ParameterPanel {
    pub visible: bool,
    last_error: Option<String>,
}

impl Default for ParameterPanel {
    fn default() -> Self {
        Self {
            visible: true,
            last_error: None,
        }
    }
}

impl ParameterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Draw the panel docked to the right of the window.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        table: &BindingTable,
        registry: &SceneRegistry,
    ) -> Vec<PanelEdit> {
        if !self.visible {
            return Vec::new();
        }
        let mut edits = Vec::new();
        egui::SidePanel::right("parameters")
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    edits = self.ui(ui, table, registry);
                });
            });
        edits
    }

    /// Draw every folder into `ui`.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        table: &BindingTable,
        registry: &SceneRegistry,
    ) -> Vec<PanelEdit> {
        let mut edits = Vec::new();
        for folder in table.folders() {
            egui::CollapsingHeader::new(folder)
                .default_open(true)
                .show(ui, |ui| {
                    for (id, binding) in table.in_folder(folder) {
                        let current = match binding.read(registry) {
                            Ok(v) => v,
                            Err(e) => {
                                ui.colored_label(
                                    egui::Color32::LIGHT_RED,
                                    format!("{}: {e}", binding.label),
                                );
                                continue;
                            }
                        };
                        if let Some(raw) = control(ui, &binding.label, &binding.control, current) {
                            edits.push(PanelEdit { binding: id, raw });
                        }
                    }
                });
        }
        if let Some(err) = &self.last_error {
            ui.separator();
            ui.colored_label(egui::Color32::LIGHT_RED, err);
        }
        edits
    }

    /// Apply collected edits in order. Failures are logged and the last one
    /// is kept for display; the remaining edits still apply. A batch that
    /// applies cleanly clears the displayed error.
    pub fn apply(
        &mut self,
        edits: &[PanelEdit],
        table: &BindingTable,
        registry: &mut SceneRegistry,
    ) -> Result<usize, BindError> {
        let mut applied = 0;
        let mut last = None;
        for edit in edits {
            match table.edit(registry, edit.binding, edit.raw) {
                Ok(_) => applied += 1,
                Err(e) => {
                    tracing::error!(binding = %edit.binding, "edit rejected: {e}");
                    self.last_error = Some(e.to_string());
                    last = Some(e);
                }
            }
        }
        match last {
            Some(e) if applied == 0 => Err(e),
            Some(_) => Ok(applied),
            None => {
                if applied > 0 {
                    self.last_error = None;
                }
                Ok(applied)
            }
        }
    }
}

/// One widget. Returns the new raw value when the user changed it.
fn control(ui: &mut egui::Ui, label: &str, control: &Control, current: Value) -> Option<Value> {
    match (control, current) {
        (Control::Slider(range), Value::Scalar(mut v)) => {
            let response = ui.add(
                egui::Slider::new(&mut v, range.min..=range.max)
                    .step_by(range.step as f64)
                    .text(label),
            );
            response.changed().then_some(Value::Scalar(v))
        }
        (Control::Color, Value::Color(hex)) => {
            let mut rgb = Color::from_hex(hex).to_rgb8();
            let changed = ui
                .horizontal(|ui| {
                    let r = ui.color_edit_button_srgb(&mut rgb);
                    ui.label(label);
                    r.changed()
                })
                .inner;
            changed.then(|| Value::Color(Color::from_rgb8(rgb).to_hex()))
        }
        (_, v) => {
            ui.label(format!("{label}: {v}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_bindings::preset::showcase_bindings;
    use lightlab_bindings::Field;
    use lightlab_kernel::preset::{names, showcase};

    fn run_panel(
        panel: &mut ParameterPanel,
        table: &BindingTable,
        registry: &SceneRegistry,
    ) -> Vec<PanelEdit> {
        let ctx = egui::Context::default();
        let mut edits = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            edits = panel.show(ctx, table, registry);
        });
        edits
    }

    #[test]
    fn drawing_without_input_produces_no_edits() {
        let (registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let mut panel = ParameterPanel::new();
        assert!(run_panel(&mut panel, &table, &registry).is_empty());
    }

    #[test]
    fn hidden_panel_draws_nothing() {
        let (registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let mut panel = ParameterPanel::new();
        panel.toggle();
        assert!(!panel.visible);
        assert!(run_panel(&mut panel, &table, &registry).is_empty());
    }

    #[test]
    fn apply_quantizes_and_writes() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let (id, _) = table
            .iter()
            .find(|(_, b)| b.target == names::SPOT && b.field == Field::Distance)
            .unwrap();
        let mut panel = ParameterPanel::new();
        let n = panel
            .apply(
                &[PanelEdit {
                    binding: id,
                    raw: Value::Scalar(7.26),
                }],
                &table,
                &mut registry,
            )
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(table.read(&registry, id).unwrap(), Value::Scalar(7.5));
        assert!(panel.last_error().is_none());
    }

    #[test]
    fn failed_edit_is_reported_and_others_apply() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let (color, _) = table.in_folder("Material").next().unwrap();
        let mut panel = ParameterPanel::new();
        let edits = [
            PanelEdit {
                binding: BindingId(9999),
                raw: Value::Scalar(1.0),
            },
            PanelEdit {
                binding: color,
                raw: Value::Color(0x112233),
            },
        ];
        let n = panel.apply(&edits, &table, &mut registry).unwrap();
        assert_eq!(n, 1);
        assert!(panel.last_error().is_some());
        assert_eq!(
            registry.material(names::MATERIAL).unwrap().color.to_hex(),
            0x112233
        );
    }

    #[test]
    fn all_failed_returns_error() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let mut panel = ParameterPanel::new();
        let err = panel
            .apply(
                &[PanelEdit {
                    binding: BindingId(9999),
                    raw: Value::Scalar(1.0),
                }],
                &table,
                &mut registry,
            )
            .unwrap_err();
        assert_eq!(err, BindError::UnknownBinding(BindingId(9999)));
    }

    #[test]
    fn successful_edit_clears_previous_error() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let (color, _) = table.in_folder("Material").next().unwrap();
        let mut panel = ParameterPanel::new();
        let bad = PanelEdit {
            binding: BindingId(9999),
            raw: Value::Scalar(1.0),
        };
        assert!(panel.apply(&[bad], &table, &mut registry).is_err());
        assert!(panel.last_error().is_some());

        let good = PanelEdit {
            binding: color,
            raw: Value::Color(0x445566),
        };
        assert_eq!(panel.apply(&[good], &table, &mut registry).unwrap(), 1);
        assert!(panel.last_error().is_none());
    }
}
