use crate::widgets::{WidgetPath, Widgets};
use imgui::{Drag, TreeNodeFlags, TreeNodeToken, Ui};

/// [`Widgets`] drawn with imgui-rs.
pub struct ImguiWidgets<'ui> {
    ui: &'ui Ui,
    open_nodes: Vec<TreeNodeToken<'ui>>,
}

impl<'ui> ImguiWidgets<'ui> {
    pub fn new(ui: &'ui Ui) -> Self {
        Self {
            ui,
            open_nodes: Vec::new(),
        }
    }

    pub fn ui(&self) -> &'ui Ui {
        self.ui
    }
}

fn hidden(id: &WidgetPath) -> String {
    format!("##{id}")
}

impl Widgets for ImguiWidgets<'_> {
    fn columns(&mut self, count: usize, id: &str) {
        self.ui.columns(count as i32, id, true);
    }

    fn next_column(&mut self) {
        self.ui.next_column();
    }

    fn same_line(&mut self) {
        self.ui.same_line();
    }

    fn text(&mut self, text: &str) {
        self.ui.text(text);
    }

    fn text_disabled(&mut self, text: &str) {
        self.ui.text_disabled(text);
    }

    fn tooltip_on_hover(&mut self, text: &str) {
        if self.ui.is_item_hovered() {
            self.ui.tooltip_text(text);
        }
    }

    fn button(&mut self, label: &str, id: &WidgetPath, enabled: bool) -> bool {
        let _disabled = self.ui.begin_disabled(!enabled);
        self.ui.button(format!("{label}##{id}"))
    }

    fn checkbox(&mut self, id: &WidgetPath, value: &mut bool) -> bool {
        self.ui.checkbox(hidden(id), value)
    }

    fn drag_float(&mut self, id: &WidgetPath, value: &mut f32) -> bool {
        Drag::new(hidden(id)).build(self.ui, value)
    }

    fn drag_i32(&mut self, id: &WidgetPath, value: &mut i32) -> bool {
        Drag::new(hidden(id)).build(self.ui, value)
    }

    fn drag_u32(&mut self, id: &WidgetPath, value: &mut u32) -> bool {
        Drag::new(hidden(id)).build(self.ui, value)
    }

    fn drag_u16(&mut self, id: &WidgetPath, value: &mut u16) -> bool {
        Drag::new(hidden(id)).build(self.ui, value)
    }

    fn drag_u64(&mut self, id: &WidgetPath, value: &mut u64) -> bool {
        Drag::new(hidden(id)).build(self.ui, value)
    }

    fn input_text(&mut self, id: &WidgetPath, value: &mut String) -> bool {
        self.ui.input_text(hidden(id), value).build()
    }

    fn input_floats(&mut self, id: &WidgetPath, value: &mut [f32]) -> bool {
        let label = hidden(id);
        match value.len() {
            2 => {
                let mut v = [0.0; 2];
                v.copy_from_slice(value);
                let changed = self.ui.input_float2(label, &mut v).build();
                value.copy_from_slice(&v);
                changed
            }
            3 => {
                let mut v = [0.0; 3];
                v.copy_from_slice(value);
                let changed = self.ui.input_float3(label, &mut v).build();
                value.copy_from_slice(&v);
                changed
            }
            4 => {
                let mut v = [0.0; 4];
                v.copy_from_slice(value);
                let changed = self.ui.input_float4(label, &mut v).build();
                value.copy_from_slice(&v);
                changed
            }
            _ => {
                self.ui.text(format!("{value:?}"));
                false
            }
        }
    }

    fn combo(&mut self, id: &WidgetPath, current: &str, options: &[String]) -> Option<usize> {
        let mut selected = None;
        if let Some(_combo) = self.ui.begin_combo(hidden(id), current) {
            for (i, option) in options.iter().enumerate() {
                let is_current = option == current;
                if self
                    .ui
                    .selectable_config(option)
                    .selected(is_current)
                    .build()
                    && !is_current
                {
                    selected = Some(i);
                }
            }
        }
        selected
    }

    fn tree_node(&mut self, label: &str, id: &WidgetPath, default_open: bool) -> bool {
        let flags = if default_open {
            TreeNodeFlags::DEFAULT_OPEN
        } else {
            TreeNodeFlags::empty()
        };
        match self
            .ui
            .tree_node_config(format!("{label}##{id}"))
            .flags(flags)
            .push()
        {
            Some(token) => {
                self.open_nodes.push(token);
                true
            }
            None => false,
        }
    }

    fn tree_pop(&mut self) {
        if let Some(token) = self.open_nodes.pop() {
            token.pop();
        }
    }
}
