//! Renders for string values that refer to other game objects.

use crate::{
    render::TypeTreeRender,
    specific::SpecificTypeRender,
    value::Value,
    widgets::{WidgetPath, Widgets},
};
use std::cell::RefCell;

const EMPTY_LINK: &str = "<EMPTY>";

/// The path of an actor inside a level's entity layers, as written in
/// `CGameLink` values: `Root:pScenario:rEntitiesLayer:dctSublayers:<layer>:dctActors:<actor>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorLink {
    pub layer: String,
    pub actor: String,
}

impl ActorLink {
    const PREFIX: [&'static str; 4] = ["Root", "pScenario", "rEntitiesLayer", "dctSublayers"];

    pub fn new(layer: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            actor: actor.into(),
        }
    }

    pub fn parse(link: &str) -> Option<Self> {
        let parts: Vec<&str> = link.split(':').collect();
        match parts.as_slice() {
            [a, b, c, d, layer, "dctActors", actor] if [*a, *b, *c, *d] == Self::PREFIX => {
                Some(Self::new(*layer, *actor))
            }
            _ => None,
        }
    }

    pub fn to_link(&self) -> String {
        format!(
            "{}:{}:dctActors:{}",
            Self::PREFIX.join(":"),
            self.layer,
            self.actor
        )
    }
}

/// Actor references. Links are drawn as buttons; clicked links are queued
/// for the host, which opens the referenced actor.
#[derive(Default)]
pub struct GameLinkRender {
    opened: RefCell<Vec<String>>,
}

impl GameLinkRender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_opened_links(&self) -> Vec<String> {
        self.opened.take()
    }
}

impl SpecificTypeRender for GameLinkRender {
    fn uses_one_column(&self, _type_name: &str) -> bool {
        true
    }

    fn create_default(&self, _type_name: &str) -> Value {
        Value::from(EMPTY_LINK)
    }

    fn render_value(
        &self,
        _tree: &TypeTreeRender,
        ui: &mut dyn Widgets,
        value: &mut Value,
        _type_name: &str,
        path: &WidgetPath,
    ) -> bool {
        match value.as_str() {
            Some(link) if link.starts_with("Root") => {
                if ui.button(link, path, true) {
                    self.opened.borrow_mut().push(link.to_string());
                }
                ui.tooltip_on_hover(link);
            }
            _ => ui.text(&value.to_string()),
        }
        false
    }
}

/// Asset paths. Actor definition links pick from the known definitions,
/// everything else is free text.
pub struct AssetLinkRender {
    actordefs: Vec<String>,
}

impl AssetLinkRender {
    pub fn new(actordefs: Vec<String>) -> Self {
        Self { actordefs }
    }
}

impl SpecificTypeRender for AssetLinkRender {
    fn uses_one_column(&self, _type_name: &str) -> bool {
        true
    }

    fn create_default(&self, _type_name: &str) -> Value {
        Value::from(EMPTY_LINK)
    }

    fn render_value(
        &self,
        _tree: &TypeTreeRender,
        ui: &mut dyn Widgets,
        value: &mut Value,
        _type_name: &str,
        path: &WidgetPath,
    ) -> bool {
        let Value::String(current) = value else {
            ui.text(&value.to_string());
            return false;
        };

        if path.as_str().ends_with(".oActorDefLink") {
            let selected = ui.combo(path, current, &self.actordefs);
            ui.tooltip_on_hover(current);
            match selected {
                Some(i) if self.actordefs[i] != *current => {
                    *current = self.actordefs[i].clone();
                    true
                }
                _ => false,
            }
        } else {
            ui.input_text(path, current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_links_parse_and_format() {
        let link = "Root:pScenario:rEntitiesLayer:dctSublayers:default:dctActors:door_001";
        let parsed = ActorLink::parse(link).unwrap();
        assert_eq!(parsed, ActorLink::new("default", "door_001"));
        assert_eq!(parsed.to_link(), link);
    }

    #[test]
    fn malformed_actor_links_are_rejected() {
        assert_eq!(ActorLink::parse("Root:pScenario:door"), None);
        assert_eq!(
            ActorLink::parse("Root:pScenario:rEntitiesLayer:dctSublayers:default:dctOther:x"),
            None
        );
    }
}
