// Form domain model - Declarative input controls plus their current values
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomKind {
    Text,
    Select,
    Checkbox,
}

impl CustomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomKind::Text => "text",
            CustomKind::Select => "select",
            CustomKind::Checkbox => "checkbox",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomControl {
    pub kind: CustomKind,
    pub name: String,
    pub label: String,
    pub value: String,
    /// (value, label) pairs, only meaningful for selects
    pub options: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormControl {
    Hidden { name: String, value: String },
    Submit { name: String, caption: String },
    Custom(CustomControl),
}

impl FormControl {
    pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormControl::Hidden {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn submit(name: impl Into<String>, caption: impl Into<String>) -> Self {
        FormControl::Submit {
            name: name.into(),
            caption: caption.into(),
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        FormControl::Custom(CustomControl {
            kind: CustomKind::Text,
            name: name.into(),
            label: label.into(),
            value: value.into(),
            options: Vec::new(),
        })
    }

    /// Checked when the value is non-empty
    pub fn checkbox(name: impl Into<String>, label: impl Into<String>, checked: bool) -> Self {
        FormControl::Custom(CustomControl {
            kind: CustomKind::Checkbox,
            name: name.into(),
            label: label.into(),
            value: if checked { "1".to_string() } else { String::new() },
            options: Vec::new(),
        })
    }

    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<(String, String)>,
    ) -> Self {
        let value = options.first().map(|(v, _)| v.clone()).unwrap_or_default();
        FormControl::Custom(CustomControl {
            kind: CustomKind::Select,
            name: name.into(),
            label: label.into(),
            value,
            options,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            FormControl::Hidden { name, .. } | FormControl::Submit { name, .. } => name,
            FormControl::Custom(c) => &c.name,
        }
    }

    /// Submit buttons carry no value
    pub fn value(&self) -> Option<&str> {
        match self {
            FormControl::Hidden { value, .. } => Some(value),
            FormControl::Submit { .. } => None,
            FormControl::Custom(c) => Some(&c.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSpec {
    pub name: String,
    pub ajax: bool,
    pub success_message: Option<String>,
    controls: Vec<FormControl>,
}

impl FormSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ajax: false,
            success_message: None,
            controls: Vec::new(),
        }
    }

    pub fn ajax(mut self) -> Self {
        self.ajax = true;
        self
    }

    /// Appends a control; a control with the same name replaces the earlier one in place
    pub fn append(&mut self, control: FormControl) {
        match self.controls.iter_mut().find(|c| c.name() == control.name()) {
            Some(existing) => *existing = control,
            None => self.controls.push(control),
        }
    }

    pub fn controls(&self) -> &[FormControl] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.name() == name)
    }

    /// Flattened name -> value map of every valued control
    pub fn values(&self) -> BTreeMap<String, String> {
        self.controls
            .iter()
            .filter_map(|c| c.value().map(|v| (c.name().to_string(), v.to_string())))
            .collect()
    }

    /// Values of the user-editable controls only
    pub fn editable_values(&self) -> BTreeMap<String, String> {
        self.controls
            .iter()
            .filter_map(|c| match c {
                FormControl::Custom(custom) => Some((custom.name.clone(), custom.value.clone())),
                _ => None,
            })
            .collect()
    }

    /// Copies submitted values onto matching editable controls. A request that
    /// names none of them is not a submission and leaves the form untouched.
    /// Returns true if the form was a submission.
    pub fn apply(&mut self, submitted: &HashMap<String, String>) -> bool {
        let is_submission = self.controls.iter().any(|c| {
            matches!(c, FormControl::Custom(custom) if submitted.contains_key(&custom.name))
        });
        if !is_submission {
            return false;
        }

        for control in &mut self.controls {
            if let FormControl::Custom(custom) = control {
                match submitted.get(&custom.name) {
                    Some(value) => custom.value = value.clone(),
                    // unchecked boxes are absent from the body
                    None if custom.kind == CustomKind::Checkbox => custom.value.clear(),
                    None => {}
                }
            }
        }
        true
    }
}
