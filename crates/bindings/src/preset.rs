//! The showcase control panel: one folder per light plus the shared
//! material color.

use crate::field::Field;
use crate::range::Range;
use crate::table::{BindingTable, ControlBinding};
use lightlab_kernel::preset::names;
use std::f32::consts::FRAC_PI_2;

const UNIT: Range = Range::new(0.0, 1.0, 0.01);
const TEN_HALVES: Range = Range::new(0.0, 10.0, 0.5);

pub fn showcase_bindings() -> BindingTable {
    let mut t = BindingTable::new();

    let folder = "Ambient Light";
    t.bind(ControlBinding::slider(folder, names::AMBIENT, Field::Intensity, UNIT));
    t.bind(ControlBinding::color(folder, names::AMBIENT, Field::Color));

    let folder = "Directional Light";
    t.bind(ControlBinding::slider(folder, names::DIRECTIONAL, Field::Intensity, UNIT));
    t.bind(ControlBinding::color(folder, names::DIRECTIONAL, Field::Color));

    let folder = "Hemisphere Light";
    t.bind(ControlBinding::slider(folder, names::HEMISPHERE, Field::Intensity, UNIT));
    t.bind(ControlBinding::color(folder, names::HEMISPHERE, Field::Color));
    t.bind(ControlBinding::color(folder, names::HEMISPHERE, Field::GroundColor));

    let folder = "Point Light";
    t.bind(ControlBinding::slider(folder, names::POINT, Field::Intensity, UNIT));
    t.bind(ControlBinding::slider(folder, names::POINT, Field::Distance, TEN_HALVES));
    // the light starts at y = -0.5, so the floor sits below it
    t.bind(
        ControlBinding::slider(folder, names::POINT, Field::PositionY, Range::new(-1.0, 1.0, 0.01))
            .name("elevation")
            .refresh_helper(),
    );
    t.bind(
        ControlBinding::slider(folder, names::POINT, Field::PositionX, UNIT)
            .name("Right/Left")
            .refresh_helper(),
    );
    t.bind(
        ControlBinding::slider(folder, names::POINT, Field::PositionZ, UNIT)
            .name("Up/Down")
            .refresh_helper(),
    );
    t.bind(ControlBinding::color(folder, names::POINT, Field::Color));

    let folder = "Rect Area Light";
    t.bind(ControlBinding::slider(folder, names::RECT_AREA, Field::Intensity, TEN_HALVES));
    t.bind(
        ControlBinding::slider(folder, names::RECT_AREA, Field::Width, TEN_HALVES)
            .refresh_helper(),
    );
    t.bind(
        ControlBinding::slider(folder, names::RECT_AREA, Field::Height, TEN_HALVES)
            .refresh_helper(),
    );
    t.bind(
        ControlBinding::slider(
            folder,
            names::RECT_AREA,
            Field::PositionY,
            Range::new(-1.0, 2.0, 0.1),
        )
        .name("elevation")
        .refresh_helper(),
    );
    t.bind(
        ControlBinding::slider(
            folder,
            names::RECT_AREA,
            Field::PositionX,
            Range::new(-3.0, 3.0, 0.25),
        )
        .name("Right/Left")
        .refresh_helper(),
    );
    t.bind(
        ControlBinding::slider(
            folder,
            names::RECT_AREA,
            Field::PositionZ,
            Range::new(-5.0, 5.0, 0.25),
        )
        .name("Up/Down")
        .refresh_helper(),
    );
    t.bind(ControlBinding::color(folder, names::RECT_AREA, Field::Color));

    let folder = "Spot Light";
    t.bind(ControlBinding::slider(folder, names::SPOT, Field::Intensity, TEN_HALVES));
    t.bind(
        ControlBinding::slider(folder, names::SPOT, Field::Distance, Range::new(5.0, 20.0, 0.5))
            .refresh_helper(),
    );
    t.bind(
        ControlBinding::slider(folder, names::SPOT, Field::Angle, Range::new(0.0, FRAC_PI_2, 0.0001))
            .refresh_helper(),
    );
    t.bind(ControlBinding::slider(
        folder,
        names::SPOT,
        Field::Penumbra,
        Range::new(0.0, 1.0, 0.0001),
    ));
    t.bind(ControlBinding::slider(
        folder,
        names::SPOT,
        Field::Decay,
        Range::new(0.0, 3.0, 0.001),
    ));
    t.bind(ControlBinding::color(folder, names::SPOT, Field::Color));

    t.bind(ControlBinding::color("Material", names::MATERIAL, Field::Color));

    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;
    use lightlab_kernel::preset::showcase;

    #[test]
    fn showcase_bindings_pass_audit() {
        let (registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let findings = table.audit(&registry);
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn each_field_has_exactly_one_control() {
        let table = showcase_bindings();
        let mut seen = std::collections::HashSet::new();
        for (_, b) in table.iter() {
            assert!(seen.insert((b.target.clone(), b.field)), "{}", b.path());
        }
    }

    #[test]
    fn folders_follow_panel_order() {
        let table = showcase_bindings();
        assert_eq!(
            table.folders(),
            [
                "Ambient Light",
                "Directional Light",
                "Hemisphere Light",
                "Point Light",
                "Rect Area Light",
                "Spot Light",
                "Material",
            ]
        );
    }

    /// Nearest grid point `min + k·step` to the clamped value, never past `max`.
    fn nearest_step(range: Range, raw: f32) -> f64 {
        let (min, max, step) = (range.min as f64, range.max as f64, range.step as f64);
        let c = (raw as f64).clamp(min, max);
        let span = (max - min) / step;
        let last = if (span - span.round()).abs() < 1e-3 {
            span.round()
        } else {
            span.floor()
        };
        let k = ((c - min) / step).round().min(last);
        min + k * step
    }

    #[test]
    fn every_numeric_edit_is_clamped_and_snapped() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let ids: Vec<_> = table.iter().map(|(id, _)| id).collect();
        for id in ids {
            let Some(range) = table.get(id).unwrap().range() else {
                continue;
            };
            for raw in [range.min - 10.0, range.min, 0.333, 1.777, range.max, range.max + 10.0] {
                let applied = table.edit(&mut registry, id, Value::Scalar(raw)).unwrap();
                let Value::Scalar(v) = table.read(&registry, id).unwrap() else {
                    panic!("numeric binding read back a color");
                };
                assert_eq!(applied, Value::Scalar(v));
                assert!(range.contains(v), "{v} outside {range}");
                let expected = nearest_step(range, raw);
                assert!(
                    (v as f64 - expected).abs() < range.step as f64 * 1e-3 + 1e-6,
                    "{raw} -> {v}, expected {expected} in {range}"
                );
            }
        }
    }

    #[test]
    fn on_grid_max_is_reachable_for_every_control() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let ids: Vec<_> = table.iter().map(|(id, _)| id).collect();
        for id in ids {
            let Some(range) = table.get(id).unwrap().range() else {
                continue;
            };
            let span = (range.max as f64 - range.min as f64) / range.step as f64;
            if (span - span.round()).abs() > 1e-3 {
                continue;
            }
            for raw in [range.max, range.max + 10.0] {
                let applied = table.edit(&mut registry, id, Value::Scalar(raw)).unwrap();
                assert_eq!(applied, Value::Scalar(range.max), "{raw} in {range}");
            }
        }
    }

    #[test]
    fn spot_color_edit_reaches_the_light() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let (id, _) = table
            .iter()
            .find(|(_, b)| b.target == names::SPOT && b.field == Field::Color)
            .unwrap();
        table.edit(&mut registry, id, Value::Color(0x78ff00)).unwrap();
        assert_eq!(
            registry.light(names::SPOT).unwrap().color.to_rgb8(),
            [0x78, 0xff, 0x00]
        );
    }

    #[test]
    fn material_color_edit_reaches_the_material() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let (id, _) = table.in_folder("Material").next().unwrap();
        table.edit(&mut registry, id, Value::Color(0x336699)).unwrap();
        assert_eq!(registry.material(names::MATERIAL).unwrap().color.to_hex(), 0x336699);
    }

    #[test]
    fn moving_the_rect_light_moves_its_helper() {
        let (mut registry, _) = showcase().unwrap();
        let table = showcase_bindings();
        let (id, _) = table
            .in_folder("Rect Area Light")
            .find(|(_, b)| b.label == "Right/Left")
            .unwrap();
        let before = registry.helper(names::RECT_AREA).unwrap().clone();
        table.edit(&mut registry, id, Value::Scalar(-2.0)).unwrap();
        assert_ne!(registry.helper(names::RECT_AREA).unwrap(), &before);
    }
}
