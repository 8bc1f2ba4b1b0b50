//! Declarative form controls.
//!
//! Forms are described as a tree of [`Control`]s. Groups hold leaf
//! controls (sliders and text edits); a [`ControlSet`] validates the tree
//! once at construction so views can rely on unique names and a flat
//! two-level layout. Reading a form back yields [`FormValues`], the raw
//! name/value pairs a submitted form carries.

use std::collections::{BTreeMap, HashSet};

use crate::error::{Error, Result};

/// Kind-specific payload of a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    /// Titled container of leaf controls
    Group(Vec<Control>),
    /// On/off toggle switch
    Slider { checked: bool },
    /// Single-line text input
    Edit { value: String },
}

/// A single form control descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub name: String,
    /// Translation key of the label
    pub title: Option<String>,
    /// Translation key of the help text
    pub hint: Option<String>,
    pub kind: ControlKind,
}

impl Control {
    /// Text edit control, the default control type
    pub fn new(name: impl Into<String>) -> Self {
        Self::edit(name, "")
    }

    pub fn edit(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            hint: None,
            kind: ControlKind::Edit {
                value: value.into(),
            },
        }
    }

    pub fn slider(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            title: None,
            hint: None,
            kind: ControlKind::Slider { checked },
        }
    }

    pub fn group(name: impl Into<String>, controls: Vec<Control>) -> Self {
        Self {
            name: name.into(),
            title: None,
            hint: None,
            kind: ControlKind::Group(controls),
        }
    }

    /// Template partial used to render this control
    pub fn partial(&self) -> &'static str {
        match self.kind {
            ControlKind::Group(_) => "form/GroupControl",
            ControlKind::Slider { .. } => "form/SliderControl",
            ControlKind::Edit { .. } => "form/EditControl",
        }
    }

    /// Child controls of a group (empty for leaves)
    pub fn children(&self) -> &[Control] {
        match &self.kind {
            ControlKind::Group(children) => children,
            _ => &[],
        }
    }

    fn apply_settings(&mut self, settings: &ControlSettings) {
        if settings.auto_title && self.title.is_none() {
            self.title = Some(format!("{}.{}", settings.translate_path, self.name));
        }
        if settings.auto_hint && self.hint.is_none() {
            self.hint = Some(format!("{}.{}Hint", settings.translate_path, self.name));
        }
        if let ControlKind::Group(children) = &mut self.kind {
            for child in children {
                child.apply_settings(settings);
            }
        }
    }
}

/// Shared settings applied to every control of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSettings {
    /// Derive `title` from `translate_path` and the control name
    pub auto_title: bool,
    /// Derive `hint` from `translate_path` and the control name
    pub auto_hint: bool,
    pub translate_path: String,
}

impl ControlSettings {
    pub fn new(translate_path: impl Into<String>) -> Self {
        Self {
            auto_title: true,
            auto_hint: false,
            translate_path: translate_path.into(),
        }
    }
}

/// Validated tree of form controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSet {
    controls: Vec<Control>,
}

impl ControlSet {
    /// Validate and wrap a control tree.
    ///
    /// Names must be non-empty and unique across the tree, groups must not
    /// be empty and must not contain other groups.
    pub fn new(controls: Vec<Control>) -> Result<Self> {
        let mut seen = HashSet::new();
        for control in &controls {
            check_name(control, &mut seen)?;
            if let ControlKind::Group(children) = &control.kind {
                if children.is_empty() {
                    return Err(Error::invalid_controls(format!(
                        "group '{}' has no controls",
                        control.name
                    )));
                }
                for child in children {
                    if matches!(child.kind, ControlKind::Group(_)) {
                        return Err(Error::invalid_controls(format!(
                            "group '{}' is nested in group '{}'",
                            child.name, control.name
                        )));
                    }
                    check_name(child, &mut seen)?;
                }
            }
        }
        Ok(Self { controls })
    }

    /// Apply title/hint settings to every control
    pub fn with_settings(mut self, settings: &ControlSettings) -> Self {
        for control in &mut self.controls {
            control.apply_settings(settings);
        }
        self
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Iterate over leaf controls in document order
    pub fn leaves(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter().flat_map(|control| match &control.kind {
            ControlKind::Group(children) => children.iter().collect::<Vec<_>>(),
            _ => vec![control],
        })
    }

    pub fn find(&self, name: &str) -> Option<&Control> {
        self.controls
            .iter()
            .flat_map(|c| std::iter::once(c).chain(c.children()))
            .find(|c| c.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Control> {
        for control in &mut self.controls {
            if control.name == name {
                return Some(control);
            }
            if let ControlKind::Group(children) = &mut control.kind {
                if let Some(child) = children.iter_mut().find(|c| c.name == name) {
                    return Some(child);
                }
            }
        }
        None
    }

    /// Flip a slider, returning its new state
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        match self.find_mut(name).map(|c| &mut c.kind) {
            Some(ControlKind::Slider { checked }) => {
                *checked = !*checked;
                Ok(*checked)
            }
            Some(_) => Err(Error::invalid_controls(format!(
                "control '{}' is not a slider",
                name
            ))),
            None => Err(Error::invalid_controls(format!(
                "no control named '{}'",
                name
            ))),
        }
    }

    /// Set a text edit's value
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> Result<()> {
        match self.find_mut(name).map(|c| &mut c.kind) {
            Some(ControlKind::Edit { value }) => {
                *value = text.into();
                Ok(())
            }
            Some(_) => Err(Error::invalid_controls(format!(
                "control '{}' is not a text edit",
                name
            ))),
            None => Err(Error::invalid_controls(format!(
                "no control named '{}'",
                name
            ))),
        }
    }

    /// Values a submitted form would carry
    pub fn form_values(&self) -> FormValues {
        let mut values = FormValues::default();
        for control in self.leaves() {
            match &control.kind {
                ControlKind::Slider { checked } => {
                    values.insert(&control.name, checked.to_string());
                }
                ControlKind::Edit { value } => {
                    values.insert(&control.name, value.clone());
                }
                ControlKind::Group(_) => {}
            }
        }
        values
    }
}

fn check_name(control: &Control, seen: &mut HashSet<String>) -> Result<()> {
    if control.name.trim().is_empty() {
        return Err(Error::invalid_controls("control with an empty name"));
    }
    if !seen.insert(control.name.clone()) {
        return Err(Error::invalid_controls(format!(
            "duplicate control name '{}'",
            control.name
        )));
    }
    Ok(())
}

/// Raw name/value pairs read from a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Interpret a field as a boolean (see [`get_bool_value`])
    pub fn get_bool(&self, name: &str) -> bool {
        get_bool_value(self.get(name))
    }
}

/// Interpret a raw form value as a boolean.
///
/// `true`, `on`, `checked` and `1` (case-insensitive) are true; anything
/// else, including a missing field, is false.
pub fn get_bool_value(raw: Option<&str>) -> bool {
    match raw {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "checked" | "1"
        ),
        None => false,
    }
}
