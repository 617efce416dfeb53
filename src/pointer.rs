use crate::{
    render::{RenderIssue, TypeTreeRender},
    value::Value,
    widgets::{WidgetPath, Widgets},
};

pub const NONE_OPTION: &str = "None";

impl TypeTreeRender {
    /// `"None"` followed by the target and all of its subtypes, sorted.
    pub fn pointer_options(&self, target: &str) -> Vec<String> {
        let mut options = vec![NONE_OPTION.to_string()];
        options.extend(self.schema().all_children_of(target));
        options
    }

    /// Draws a type selector followed by the pointed-to value. Selecting
    /// another type replaces the value with a default of that type.
    pub(crate) fn render_ptr(
        &self,
        ui: &mut dyn Widgets,
        value: &mut Value,
        target: &str,
        path: &WidgetPath,
    ) -> Result<bool, RenderIssue> {
        let options = self.pointer_options(target);

        let found = if value.is_null() {
            Ok(NONE_OPTION.to_string())
        } else if let Some(tag) = value.type_tag() {
            if options.iter().skip(1).any(|option| option == tag) {
                Ok(tag.to_string())
            } else {
                Err(RenderIssue::ForeignPointerType {
                    target: target.to_string(),
                    found: tag.to_string(),
                })
            }
        } else if options.len() == 2 {
            Ok(options[1].clone())
        } else {
            Err(RenderIssue::AmbiguousPointer {
                target: target.to_string(),
                candidates: options.len() - 1,
            })
        };
        let mut value_type = match found {
            Ok(value_type) => value_type,
            Err(issue) => {
                self.report(ui, path, issue);
                ui.next_column();
                ui.next_column();
                return Ok(false);
            }
        };

        let one_column = self.uses_one_column(target);
        if !one_column {
            ui.text("Type");
            ui.next_column();
        }

        let mut changed = false;
        if let Some(selected) = ui.combo(&path.control("type"), &value_type, &options) {
            if options[selected] != value_type {
                value_type = options[selected].clone();
                *value = if value_type == NONE_OPTION {
                    Value::Null
                } else {
                    self.create_default(&value_type)
                };
                changed = true;
            }
        }
        ui.next_column();

        if one_column {
            if value_type == NONE_OPTION {
                ui.text(NONE_OPTION);
            } else {
                changed |= self.render_value_of_type(ui, value, &value_type, &path.deref());
            }
            ui.next_column();
        } else if value_type != NONE_OPTION {
            changed |= self.render_value_of_type(ui, value, &value_type, &path.deref());
        }

        Ok(changed)
    }
}
