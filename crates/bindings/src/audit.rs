//! Static checks over a binding table.
//!
//! A misconfigured range does not fail at edit time: the slider quietly
//! clamps to the wrong value. These checks catch that in tests and in
//! `lightlab-cli audit`.

use crate::field::Value;
use crate::range::Range;
use crate::table::{BindError, BindingTable};
use lightlab_kernel::SceneRegistry;

/// A control whose range excludes the current value of its field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{binding}: range {range} excludes current value {value}")]
pub struct RangeConfigError {
    pub binding: String,
    pub range: Range,
    pub value: f32,
}

/// One problem found by [`BindingTable::audit`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuditFinding {
    #[error(transparent)]
    RangeConfig(#[from] RangeConfigError),
    #[error("{binding}: range {range} leaves the plausible domain [{lo}, {hi}]")]
    Implausible {
        binding: String,
        range: Range,
        lo: f32,
        hi: f32,
    },
    #[error("{binding}: range {range} has inverted or NaN bounds")]
    InvalidRange { binding: String, range: Range },
    #[error("{binding}: {source}")]
    Unbound {
        binding: String,
        #[source]
        source: BindError,
    },
}

impl BindingTable {
    /// Check every binding against the registry's current values.
    pub fn audit(&self, registry: &SceneRegistry) -> Vec<AuditFinding> {
        let mut findings = Vec::new();
        for (_, b) in self.iter() {
            let value = match b.read(registry) {
                Ok(v) => v,
                Err(source) => {
                    findings.push(AuditFinding::Unbound {
                        binding: b.path(),
                        source,
                    });
                    continue;
                }
            };
            let Some(range) = b.range() else {
                continue;
            };
            if !range.is_valid() {
                findings.push(AuditFinding::InvalidRange {
                    binding: b.path(),
                    range,
                });
                continue;
            }
            if let Some((lo, hi)) = b.field.domain() {
                if range.min < lo || range.max > hi {
                    findings.push(AuditFinding::Implausible {
                        binding: b.path(),
                        range,
                        lo,
                        hi,
                    });
                }
            }
            if let Value::Scalar(v) = value {
                if !range.contains(v) {
                    findings.push(
                        RangeConfigError {
                            binding: b.path(),
                            range,
                            value: v,
                        }
                        .into(),
                    );
                }
            }
        }
        for f in &findings {
            tracing::warn!("binding audit: {f}");
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::table::ControlBinding;
    use glam::Vec3;
    use lightlab_common::Color;
    use lightlab_kernel::Light;

    fn scene() -> SceneRegistry {
        let mut r = SceneRegistry::new();
        r.register(
            Light::point("point", Color::from_hex(0xff9000), 0.5, 10.0, 2.0)
                .at(Vec3::new(1.0, -0.5, 1.0)),
        )
        .unwrap();
        r.register(Light::spot("spot", Color::WHITE, 0.5, 10.0, 0.3, 0.25, 1.0))
            .unwrap();
        r
    }

    #[test]
    fn clean_table_has_no_findings() {
        let r = scene();
        let mut t = BindingTable::new();
        t.bind(ControlBinding::slider(
            "Point",
            "point",
            Field::Intensity,
            Range::new(0.0, 1.0, 0.01),
        ));
        t.bind(ControlBinding::color("Point", "point", Field::Color));
        assert!(t.audit(&r).is_empty());
    }

    #[test]
    fn range_excluding_initial_value_is_reported() {
        // the point light starts below the floor of a [0, 1] elevation slider
        let r = scene();
        let mut t = BindingTable::new();
        t.bind(
            ControlBinding::slider("Point", "point", Field::PositionY, Range::new(0.0, 1.0, 0.01))
                .name("elevation"),
        );
        let findings = t.audit(&r);
        assert_eq!(
            findings,
            [AuditFinding::RangeConfig(RangeConfigError {
                binding: "Point/elevation".into(),
                range: Range::new(0.0, 1.0, 0.01),
                value: -0.5,
            })]
        );
    }

    #[test]
    fn implausible_bounds_are_flagged() {
        let r = scene();
        let mut t = BindingTable::new();
        t.bind(ControlBinding::slider(
            "Spot",
            "spot",
            Field::Penumbra,
            Range::new(-2.0, 4.0, 0.0001),
        ));
        t.bind(ControlBinding::slider(
            "Spot",
            "spot",
            Field::Decay,
            Range::new(-2.0, 3.0, 0.001),
        ));
        let findings = t.audit(&r);
        assert_eq!(findings.len(), 2);
        assert!(
            findings
                .iter()
                .all(|f| matches!(f, AuditFinding::Implausible { .. }))
        );
    }

    #[test]
    fn inverted_range_is_flagged_and_edits_stay_in_bounds() {
        let mut r = scene();
        let mut t = BindingTable::new();
        let id = t.bind(ControlBinding::slider(
            "Point",
            "point",
            Field::Intensity,
            Range::new(1.0, 0.0, 0.1),
        ));
        let findings = t.audit(&r);
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0], AuditFinding::InvalidRange { .. }));
        assert_eq!(t.edit(&mut r, id, Value::Scalar(0.5)).unwrap(), Value::Scalar(1.0));
    }

    #[test]
    fn unbound_targets_are_reported() {
        let r = scene();
        let mut t = BindingTable::new();
        t.bind(ControlBinding::color("Ghost", "ghost", Field::Color));
        t.bind(ControlBinding::slider(
            "Point",
            "point",
            Field::Angle,
            Range::new(0.0, 1.0, 0.1),
        ));
        let findings = t.audit(&r);
        assert_eq!(findings.len(), 2);
        assert!(
            findings
                .iter()
                .all(|f| matches!(f, AuditFinding::Unbound { .. }))
        );
    }
}
