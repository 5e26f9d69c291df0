use crate::field::{Field, Value, WriteError};
use crate::range::Range;
use lightlab_kernel::{SceneError, SceneRegistry};
use std::fmt;

/// Index of a binding inside its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub usize);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from binding lookups and edits.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("no binding {0}")]
    UnknownBinding(BindingId),
    #[error("{target:?} has no {field} field")]
    FieldNotApplicable { target: String, field: Field },
    #[error("{field} does not accept {value}")]
    ValueMismatch { field: Field, value: Value },
}

/// The kind of widget a binding is shown as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Slider(Range),
    Color,
}

type ApplyFn = dyn Fn(&mut SceneRegistry, &ControlBinding, Value) -> Result<(), BindError>;

/// What happens when an edit reaches a binding.
pub enum OnApply {
    /// Write the value straight into the field.
    Write,
    /// Write the value, then rebuild the target light's helper.
    WriteAndRefreshHelper,
    /// Replace the write with a caller-supplied mutation.
    Custom(Box<ApplyFn>),
}

impl OnApply {
    pub fn custom(
        apply: impl Fn(&mut SceneRegistry, &ControlBinding, Value) -> Result<(), BindError> + 'static,
    ) -> Self {
        Self::Custom(Box::new(apply))
    }
}

impl fmt::Debug for OnApply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write => f.write_str("Write"),
            Self::WriteAndRefreshHelper => f.write_str("WriteAndRefreshHelper"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One control bound to one field of one named entity.
///
/// The binding holds the entity's name, not the entity; lookups happen on
/// every read and edit.
#[derive(Debug)]
pub struct ControlBinding {
    pub folder: String,
    pub label: String,
    pub target: String,
    pub field: Field,
    pub control: Control,
    on_apply: OnApply,
}

impl ControlBinding {
    pub fn slider(
        folder: impl Into<String>,
        target: impl Into<String>,
        field: Field,
        range: Range,
    ) -> Self {
        Self::new(folder, target, field, Control::Slider(range))
    }

    pub fn color(folder: impl Into<String>, target: impl Into<String>, field: Field) -> Self {
        Self::new(folder, target, field, Control::Color)
    }

    fn new(
        folder: impl Into<String>,
        target: impl Into<String>,
        field: Field,
        control: Control,
    ) -> Self {
        Self {
            folder: folder.into(),
            label: field.label().to_owned(),
            target: target.into(),
            field,
            control,
            on_apply: OnApply::Write,
        }
    }

    /// Override the display label.
    pub fn name(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn on_apply(mut self, on_apply: OnApply) -> Self {
        self.on_apply = on_apply;
        self
    }

    /// Shorthand for [`OnApply::WriteAndRefreshHelper`].
    pub fn refresh_helper(self) -> Self {
        self.on_apply(OnApply::WriteAndRefreshHelper)
    }

    pub fn range(&self) -> Option<Range> {
        match self.control {
            Control::Slider(r) => Some(r),
            Control::Color => None,
        }
    }

    /// `folder/label`, used in logs and diagnostics.
    pub fn path(&self) -> String {
        format!("{}/{}", self.folder, self.label)
    }

    /// What the widget itself does to a raw input before reporting it:
    /// sliders clamp and snap, color pickers keep 8 bits per channel.
    pub fn quantize(&self, raw: Value) -> Value {
        match (self.control, raw) {
            (Control::Slider(range), Value::Scalar(v)) => Value::Scalar(range.quantize(v)),
            (Control::Color, Value::Color(hex)) => Value::Color(hex & 0x00ff_ffff),
            (_, other) => other,
        }
    }

    /// Write `value` into the bound field, without running the hook.
    pub fn write(&self, registry: &mut SceneRegistry, value: Value) -> Result<(), BindError> {
        let entity = registry.get_mut(&self.target)?;
        self.field.write(entity, value).map_err(|e| match e {
            WriteError::NotApplicable => BindError::FieldNotApplicable {
                target: self.target.clone(),
                field: self.field,
            },
            WriteError::ValueMismatch => BindError::ValueMismatch {
                field: self.field,
                value,
            },
        })
    }

    pub fn read(&self, registry: &SceneRegistry) -> Result<Value, BindError> {
        let entity = registry.get(&self.target)?;
        self.field
            .read(entity)
            .ok_or_else(|| BindError::FieldNotApplicable {
                target: self.target.clone(),
                field: self.field,
            })
    }
}

/// Flat, ordered set of control bindings.
#[derive(Debug, Default)]
pub struct BindingTable {
    bindings: Vec<ControlBinding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control. Nothing is validated here; see
    /// [`BindingTable::audit`](crate::audit).
    pub fn bind(&mut self, binding: ControlBinding) -> BindingId {
        let id = BindingId(self.bindings.len());
        self.bindings.push(binding);
        id
    }

    pub fn get(&self, id: BindingId) -> Result<&ControlBinding, BindError> {
        self.bindings
            .get(id.0)
            .ok_or(BindError::UnknownBinding(id))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &ControlBinding)> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, b)| (BindingId(i), b))
    }

    /// Folder names in first-appearance order.
    pub fn folders(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for b in &self.bindings {
            if !out.contains(&b.folder.as_str()) {
                out.push(&b.folder);
            }
        }
        out
    }

    /// Bindings of one folder, in bind order.
    pub fn in_folder<'a>(
        &'a self,
        folder: &'a str,
    ) -> impl Iterator<Item = (BindingId, &'a ControlBinding)> + 'a {
        self.iter().filter(move |(_, b)| b.folder == folder)
    }

    /// Current value of the bound field.
    pub fn read(&self, registry: &SceneRegistry, id: BindingId) -> Result<Value, BindError> {
        self.get(id)?.read(registry)
    }

    /// Apply a value that the control has already clamped and quantized.
    ///
    /// Synchronous, one mutation per call, no range re-validation.
    pub fn apply_edit(
        &self,
        registry: &mut SceneRegistry,
        id: BindingId,
        value: Value,
    ) -> Result<(), BindError> {
        let binding = self.get(id)?;
        match &binding.on_apply {
            OnApply::Write => binding.write(registry, value)?,
            OnApply::WriteAndRefreshHelper => {
                binding.write(registry, value)?;
                registry.refresh_helper(&binding.target)?;
            }
            OnApply::Custom(apply) => apply(registry, binding, value)?,
        }
        tracing::debug!(binding = %binding.path(), target = %binding.target, %value, "applied edit");
        Ok(())
    }

    /// Quantize a raw input the way the bound widget would, then apply it.
    /// Returns the value that was applied.
    pub fn edit(
        &self,
        registry: &mut SceneRegistry,
        id: BindingId,
        raw: Value,
    ) -> Result<Value, BindError> {
        let value = self.get(id)?.quantize(raw);
        self.apply_edit(registry, id, value)?;
        Ok(value)
    }
}
