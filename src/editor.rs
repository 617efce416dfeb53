use crate::{
    render::TypeTreeRender,
    value::Value,
    widgets::{WidgetPath, Widgets},
};
use std::rc::Rc;

/// Edits one parsed asset through the tree renderer.
pub struct GenericEditor {
    name: String,
    root: Value,
    root_type: String,
    tree_render: Rc<TypeTreeRender>,
    has_modifications: bool,
}

impl GenericEditor {
    pub fn new(
        name: impl Into<String>,
        root: Value,
        root_type: impl Into<String>,
        tree_render: Rc<TypeTreeRender>,
    ) -> Self {
        Self {
            name: name.into(),
            root,
            root_type: root_type.into(),
            tree_render,
            has_modifications: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    pub fn is_modified(&self) -> bool {
        self.has_modifications
    }

    /// Draws the asset for this frame, returning whether it was edited.
    pub fn draw(&mut self, ui: &mut dyn Widgets) -> bool {
        ui.columns(2, "asset details");
        let changed = self.tree_render.render_value_of_type(
            ui,
            &mut self.root,
            &self.root_type,
            &WidgetPath::root(self.name.as_str()),
        );
        if changed {
            self.has_modifications = true;
        }
        ui.columns(1, "asset details");
        changed
    }

    /// Hands the edited value to `save`; the editor counts as unmodified
    /// only if that succeeds.
    pub fn save_modifications<E>(
        &mut self,
        save: impl FnOnce(&Value) -> Result<(), E>,
    ) -> Result<(), E> {
        save(&self.root)?;
        self.has_modifications = false;
        tracing::info!(asset = %self.name, "saved modifications");
        Ok(())
    }
}
