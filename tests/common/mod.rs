#![allow(dead_code)]

use dread_editor::{TypeSchema, Value, WidgetPath, Widgets};
use std::collections::{HashMap, HashSet};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn json(value: serde_json::Value) -> Value {
    Value::from(value)
}

pub const SCHEMA: &str = r#"{
    "Enemy": {"kind": "struct", "fields": {"hp": "int", "pos": "base::math::CVector3D"}},
    "Boss": {"kind": "struct", "parent": "Enemy", "fields": {"name": "base::global::CStrId"}},

    "Base": {"kind": "struct", "fields": {"id": "int"}},
    "Mid": {"kind": "struct", "parent": "Base", "fields": {"speed": "float"}},
    "Leaf": {"kind": "struct", "parent": "Mid", "fields": {"flag": "bool"}},
    "Sibling": {"kind": "struct", "parent": "Base", "fields": {"label": "base::global::CStrId"}},
    "Base*": {"kind": "pointer", "target": "Base"},
    "int*": {"kind": "pointer", "target": "int"},

    "EColor": {"kind": "enum", "values": {"Red": 0, "Green": 1, "Blue": 2}},
    "FColors": {"kind": "flagset", "enum": "EColor"},
    "TTime": {"kind": "typedef", "alias": "float"},

    "CRntVector<int>": {"kind": "vector", "element": "int"},
    "CRntVector<Enemy>": {"kind": "vector", "element": "Enemy"},
    "CRntDictionary<CStrId, float>": {"kind": "dictionary", "key": "base::global::CStrId", "value": "float"},
    "CRntDictionary<int, float>": {"kind": "dictionary", "key": "int", "value": "float"},
    "CRntDictionary<CStrId, Enemy>": {"kind": "dictionary", "key": "base::global::CStrId", "value": "Enemy"},

    "Level": {"kind": "struct", "fields": {
        "fTime": "TTime",
        "bActive": "bool",
        "uCount": "unsigned",
        "sName": "base::global::CStrId",
        "vPos": "base::math::CVector3D",
        "eColor": "EColor",
        "fColors": "FColors",
        "aiNumbers": "CRntVector<int>",
        "enemies": "CRntVector<Enemy>",
        "dctValues": "CRntDictionary<CStrId, float>",
        "dctByIndex": "CRntDictionary<int, float>",
        "dctEnemies": "CRntDictionary<CStrId, Enemy>",
        "pBase": "Base*",
        "pOther": "Base*",
        "pCount": "int*",
        "oMystery": "CUnknownThing",
        "lnkTarget": "CGameLink<CActor>",
        "oActorDefLink": "base::core::CAssetLink",
        "blob": "base::reflection::CTypedValue"
    }}
}"#;

pub fn schema() -> TypeSchema {
    TypeSchema::from_json(SCHEMA).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Text(String),
    Disabled(String),
    Button { label: String, id: String },
    Checkbox { id: String, value: bool },
    Edit { id: String, shown: String },
    Combo { id: String, current: String, options: Vec<String> },
    TreeNode { label: String, id: String, open: bool },
}

/// A [`Widgets`] implementation that records what was drawn and plays back
/// user input scripted by widget id. Each scripted input is consumed the
/// first time its widget is drawn.
#[derive(Default)]
pub struct ScriptedUi {
    clicks: HashSet<String>,
    toggles: HashSet<String>,
    texts: HashMap<String, String>,
    floats: HashMap<String, Vec<f32>>,
    ints: HashMap<String, i64>,
    selections: HashMap<String, String>,
    closed: HashSet<String>,
    depth: usize,
    pub events: Vec<Event>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click(mut self, id: &str) -> Self {
        self.clicks.insert(id.to_string());
        self
    }

    pub fn toggle(mut self, id: &str) -> Self {
        self.toggles.insert(id.to_string());
        self
    }

    pub fn type_text(mut self, id: &str, text: &str) -> Self {
        self.texts.insert(id.to_string(), text.to_string());
        self
    }

    pub fn set_floats(mut self, id: &str, values: &[f32]) -> Self {
        self.floats.insert(id.to_string(), values.to_vec());
        self
    }

    pub fn set_int(mut self, id: &str, value: i64) -> Self {
        self.ints.insert(id.to_string(), value);
        self
    }

    pub fn select(mut self, id: &str, option: &str) -> Self {
        self.selections.insert(id.to_string(), option.to_string());
        self
    }

    pub fn close(mut self, id: &str) -> Self {
        self.closed.insert(id.to_string());
        self
    }

    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.texts().contains(&text)
    }

    pub fn checkbox(&self, id: &str) -> Option<bool> {
        self.events.iter().find_map(|e| match e {
            Event::Checkbox { id: i, value } if i == id => Some(*value),
            _ => None,
        })
    }

    pub fn checkbox_ids(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Checkbox { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// What an editing widget showed before any scripted input was applied.
    pub fn shown(&self, id: &str) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            Event::Edit { id: i, shown } if i == id => Some(shown.as_str()),
            _ => None,
        })
    }

    pub fn tree_node(&self, id: &str) -> Option<bool> {
        self.events.iter().find_map(|e| match e {
            Event::TreeNode { id: i, open, .. } if i == id => Some(*open),
            _ => None,
        })
    }

    pub fn combo(&self, id: &str) -> Option<(&str, &[String])> {
        self.events.iter().find_map(|e| match e {
            Event::Combo {
                id: i,
                current,
                options,
            } if i == id => Some((current.as_str(), options.as_slice())),
            _ => None,
        })
    }

    pub fn has_button(&self, id: &str) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, Event::Button { id: i, .. } if i == id))
    }

    pub fn button_label(&self, id: &str) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            Event::Button { label, id: i } if i == id => Some(label.as_str()),
            _ => None,
        })
    }

    /// Whether every scripted input found its widget.
    pub fn consumed_all(&self) -> bool {
        self.clicks.is_empty()
            && self.toggles.is_empty()
            && self.texts.is_empty()
            && self.floats.is_empty()
            && self.ints.is_empty()
            && self.selections.is_empty()
    }

    pub fn balanced(&self) -> bool {
        self.depth == 0
    }

    fn edit(&mut self, id: &WidgetPath, shown: String) {
        self.events.push(Event::Edit {
            id: id.to_string(),
            shown,
        });
    }

    fn scripted_int<T: TryFrom<i64> + ToString>(&mut self, id: &WidgetPath, value: &mut T) -> bool {
        self.edit(id, value.to_string());
        match self.ints.remove(id.as_str()).map(T::try_from) {
            Some(Ok(new)) => {
                *value = new;
                true
            }
            _ => false,
        }
    }
}

impl Widgets for ScriptedUi {
    fn columns(&mut self, _count: usize, _id: &str) {}

    fn next_column(&mut self) {}

    fn same_line(&mut self) {}

    fn text(&mut self, text: &str) {
        self.events.push(Event::Text(text.to_string()));
    }

    fn text_disabled(&mut self, text: &str) {
        self.events.push(Event::Disabled(text.to_string()));
    }

    fn tooltip_on_hover(&mut self, _text: &str) {}

    fn button(&mut self, label: &str, id: &WidgetPath, enabled: bool) -> bool {
        self.events.push(Event::Button {
            label: label.to_string(),
            id: id.to_string(),
        });
        enabled && self.clicks.remove(id.as_str())
    }

    fn checkbox(&mut self, id: &WidgetPath, value: &mut bool) -> bool {
        self.events.push(Event::Checkbox {
            id: id.to_string(),
            value: *value,
        });
        if self.toggles.remove(id.as_str()) {
            *value = !*value;
            true
        } else {
            false
        }
    }

    fn drag_float(&mut self, id: &WidgetPath, value: &mut f32) -> bool {
        self.edit(id, value.to_string());
        match self.floats.remove(id.as_str()) {
            Some(new) => {
                *value = new[0];
                true
            }
            None => false,
        }
    }

    fn drag_i32(&mut self, id: &WidgetPath, value: &mut i32) -> bool {
        self.scripted_int(id, value)
    }

    fn drag_u32(&mut self, id: &WidgetPath, value: &mut u32) -> bool {
        self.scripted_int(id, value)
    }

    fn drag_u16(&mut self, id: &WidgetPath, value: &mut u16) -> bool {
        self.scripted_int(id, value)
    }

    fn drag_u64(&mut self, id: &WidgetPath, value: &mut u64) -> bool {
        self.scripted_int(id, value)
    }

    fn input_text(&mut self, id: &WidgetPath, value: &mut String) -> bool {
        self.edit(id, value.clone());
        match self.texts.remove(id.as_str()) {
            Some(new) => {
                *value = new;
                true
            }
            None => false,
        }
    }

    fn input_floats(&mut self, id: &WidgetPath, value: &mut [f32]) -> bool {
        self.edit(id, format!("{value:?}"));
        match self.floats.remove(id.as_str()) {
            Some(new) if new.len() == value.len() => {
                value.copy_from_slice(&new);
                true
            }
            _ => false,
        }
    }

    fn combo(&mut self, id: &WidgetPath, current: &str, options: &[String]) -> Option<usize> {
        self.events.push(Event::Combo {
            id: id.to_string(),
            current: current.to_string(),
            options: options.to_vec(),
        });
        let selected = self.selections.remove(id.as_str())?;
        options.iter().position(|option| *option == selected)
    }

    fn tree_node(&mut self, label: &str, id: &WidgetPath, default_open: bool) -> bool {
        let open = default_open && !self.closed.contains(id.as_str());
        self.events.push(Event::TreeNode {
            label: label.to_string(),
            id: id.to_string(),
            open,
        });
        if open {
            self.depth += 1;
        }
        open
    }

    fn tree_pop(&mut self) {
        self.depth = self
            .depth
            .checked_sub(1)
            .expect("tree_pop without an open node");
    }
}
