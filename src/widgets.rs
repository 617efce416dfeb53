use std::fmt;

/// Immediate-mode widget calls the renderers draw with.
///
/// Every editing widget gets the current value and a stable id, and reports
/// whether the user changed it during this frame. Layout is the classic
/// two-column arrangement: names on the left, editors on the right.
pub trait Widgets {
    fn columns(&mut self, count: usize, id: &str);
    fn next_column(&mut self);
    fn same_line(&mut self);

    fn text(&mut self, text: &str);
    fn text_disabled(&mut self, text: &str);
    /// Shows `text` as a tooltip when the last item is hovered.
    fn tooltip_on_hover(&mut self, text: &str);

    fn button(&mut self, label: &str, id: &WidgetPath, enabled: bool) -> bool;
    fn checkbox(&mut self, id: &WidgetPath, value: &mut bool) -> bool;
    fn drag_float(&mut self, id: &WidgetPath, value: &mut f32) -> bool;
    fn drag_i32(&mut self, id: &WidgetPath, value: &mut i32) -> bool;
    fn drag_u32(&mut self, id: &WidgetPath, value: &mut u32) -> bool;
    fn drag_u16(&mut self, id: &WidgetPath, value: &mut u16) -> bool;
    fn drag_u64(&mut self, id: &WidgetPath, value: &mut u64) -> bool;
    fn input_text(&mut self, id: &WidgetPath, value: &mut String) -> bool;
    /// Float vector input with 2 to 4 components.
    fn input_floats(&mut self, id: &WidgetPath, value: &mut [f32]) -> bool;

    /// Returns the index of a newly selected option.
    fn combo(&mut self, id: &WidgetPath, current: &str, options: &[String]) -> Option<usize>;

    /// Returns whether the node is open; an open node must be closed with
    /// [`Widgets::tree_pop`].
    fn tree_node(&mut self, label: &str, id: &WidgetPath, default_open: bool) -> bool;
    fn tree_pop(&mut self);
}

/// Structural widget identity, independent of the text a widget displays.
///
/// Paths are built the same way every frame for the same position in the
/// value tree, so widget state stays attached to the right node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidgetPath(String);

impl WidgetPath {
    pub fn root(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{key:?}]", self.0))
    }

    /// Path of the value a pointer refers to.
    pub fn deref(&self) -> Self {
        self.field("Deref")
    }

    /// Path of an auxiliary control attached to this node, such as a
    /// presence toggle or a delete button.
    pub fn control(&self, name: &str) -> Self {
        Self(format!("{}#{name}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
