use crate::{
    render::TypeTreeRender,
    value::Value,
    widgets::{WidgetPath, Widgets},
};

/// Replaces the schema-driven rendering for one named type.
///
/// Registered renders are consulted before the schema, so they also work for
/// type names the schema does not know about.
pub trait SpecificTypeRender {
    fn uses_one_column(&self, type_name: &str) -> bool;

    fn create_default(&self, type_name: &str) -> Value;

    /// Draws `value` and applies edits to it in place, returning whether it
    /// changed. `tree` is the renderer this render is registered with, for
    /// drawing nested values.
    fn render_value(
        &self,
        tree: &TypeTreeRender,
        ui: &mut dyn Widgets,
        value: &mut Value,
        type_name: &str,
        path: &WidgetPath,
    ) -> bool;

    /// Called once per frame after all editors were drawn.
    fn end_frame(&self) {}
}
