//! Add/delete/edit lists for vectors and string-keyed dictionaries.

use crate::{
    render::{RenderIssue, TypeTreeRender},
    schema::{PrimitiveKind, TypeKind},
    value::Value,
    widgets::{WidgetPath, Widgets},
};

/// How a container kind enumerates, addresses and removes its entries.
trait Entries {
    type Key;

    /// Entry nodes of multi-column elements start expanded.
    const ENTRY_DEFAULT_OPEN: bool;

    fn keys(value: &Value) -> Vec<Self::Key>;
    fn entry_mut<'v>(value: &'v mut Value, key: &Self::Key) -> Option<&'v mut Value>;
    fn label(key: &Self::Key) -> String;
    fn path(parent: &WidgetPath, key: &Self::Key) -> WidgetPath;
    fn remove_all(value: &mut Value, keys: Vec<Self::Key>);
}

struct VectorEntries;

impl Entries for VectorEntries {
    type Key = usize;
    const ENTRY_DEFAULT_OPEN: bool = true;

    fn keys(value: &Value) -> Vec<usize> {
        (0..value.as_array().map_or(0, Vec::len)).collect()
    }

    fn entry_mut<'v>(value: &'v mut Value, key: &usize) -> Option<&'v mut Value> {
        value.as_array_mut()?.get_mut(*key)
    }

    fn label(key: &usize) -> String {
        format!("Item {key}")
    }

    fn path(parent: &WidgetPath, key: &usize) -> WidgetPath {
        parent.index(*key)
    }

    fn remove_all(value: &mut Value, mut keys: Vec<usize>) {
        let Some(items) = value.as_array_mut() else {
            return;
        };
        keys.sort_unstable();
        keys.dedup();
        for index in keys.into_iter().rev() {
            items.remove(index);
        }
    }
}

struct DictEntries;

impl Entries for DictEntries {
    type Key = String;
    const ENTRY_DEFAULT_OPEN: bool = false;

    fn keys(value: &Value) -> Vec<String> {
        value
            .as_object()
            .map(|map| map.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn entry_mut<'v>(value: &'v mut Value, key: &String) -> Option<&'v mut Value> {
        value.as_object_mut()?.get_mut(key)
    }

    fn label(key: &String) -> String {
        key.clone()
    }

    fn path(parent: &WidgetPath, key: &String) -> WidgetPath {
        parent.key(key)
    }

    fn remove_all(value: &mut Value, keys: Vec<String>) {
        if let Some(map) = value.as_object_mut() {
            for key in keys {
                map.remove(&key);
            }
        }
    }
}

impl TypeTreeRender {
    /// Draws every entry with a delete button. Deletions are applied once all
    /// entries were visited, so the walk never sees a shrinking container.
    fn render_entries<E: Entries>(
        &self,
        ui: &mut dyn Widgets,
        value: &mut Value,
        element_type: &str,
        path: &WidgetPath,
    ) -> bool {
        let single_column_element = self.uses_one_column(element_type);
        let mut modified = false;
        let mut to_delete = Vec::new();

        for key in E::keys(value) {
            let element_path = E::path(path, &key);
            let label = E::label(&key);
            let Some(item) = E::entry_mut(value, &key) else {
                continue;
            };

            let delete = ui.button("X", &element_path.control("delete"), true);
            ui.same_line();

            let changed = if single_column_element {
                ui.text(&label);
                ui.next_column();
                let changed = self.render_value_of_type(ui, item, element_type, &element_path);
                ui.next_column();
                changed
            } else {
                let open = ui.tree_node(&label, &element_path, E::ENTRY_DEFAULT_OPEN);
                ui.tooltip_on_hover(element_type);
                ui.next_column();
                ui.next_column();
                let mut changed = false;
                if open {
                    changed = self.render_value_of_type(ui, item, element_type, &element_path);
                    ui.tree_pop();
                }
                changed
            };

            if delete {
                to_delete.push(key);
            }
            modified |= delete || changed;
        }

        if !to_delete.is_empty() {
            E::remove_all(value, to_delete);
        }

        modified
    }

    pub(crate) fn render_vector(
        &self,
        ui: &mut dyn Widgets,
        value: &mut Value,
        element_type: &str,
        path: &WidgetPath,
    ) -> Result<bool, RenderIssue> {
        if value.as_array().is_none() {
            return Err(RenderIssue::UnexpectedValue {
                type_name: format!("vector of {element_type}"),
                found: value.kind_name(),
            });
        }

        let mut modified = self.render_entries::<VectorEntries>(ui, value, element_type, path);

        let add = ui.button("New Item", &path.control("new"), true);
        ui.next_column();
        ui.next_column();

        if add {
            if let Some(items) = value.as_array_mut() {
                items.push(self.create_default(element_type));
                modified = true;
            }
        }

        Ok(modified)
    }

    pub(crate) fn render_dict(
        &self,
        ui: &mut dyn Widgets,
        value: &mut Value,
        key_type: &str,
        element_type: &str,
        path: &WidgetPath,
    ) -> Result<bool, RenderIssue> {
        let string_keys = match self.schema().resolve(key_type) {
            Ok(descriptor) => matches!(
                descriptor.kind,
                TypeKind::Primitive(PrimitiveKind::String)
            ),
            Err(_) => false,
        };
        if !string_keys {
            return Err(RenderIssue::UnsupportedKey(key_type.to_string()));
        }
        if value.as_object().is_none() {
            return Err(RenderIssue::UnexpectedValue {
                type_name: format!("dictionary of {element_type}"),
                found: value.kind_name(),
            });
        }

        let mut modified = self.render_entries::<DictEntries>(ui, value, element_type, path);

        // The key being typed survives across frames until it is used.
        let key_path = path.control("new_key");
        let mut key = self
            .pending_keys
            .borrow()
            .get(&key_path)
            .cloned()
            .unwrap_or_else(|| self.options().new_key_text.clone());
        if ui.input_text(&key_path, &mut key) {
            self.pending_keys
                .borrow_mut()
                .insert(key_path.clone(), key.clone());
        }
        ui.same_line();
        let add = ui.button("New Item", &path.control("new"), !key.is_empty());
        ui.next_column();
        ui.next_column();

        if add && !key.is_empty() {
            if let Some(map) = value.as_object_mut() {
                map.insert(key, self.create_default(element_type));
                modified = true;
            }
        }

        Ok(modified)
    }
}
