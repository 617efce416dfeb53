use crate::{
    error::SchemaError,
    schema::{EnumType, PrimitiveKind, TypeKind, TypeSchema},
    specific::SpecificTypeRender,
    value::Value,
    widgets::{WidgetPath, Widgets},
};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
    sync::Arc,
};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub vector_open_threshold: usize,
    pub new_key_text: String,
    pub log_diagnostics: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            vector_open_threshold: 50,
            new_key_text: "Key".to_string(),
            log_diagnostics: true,
        }
    }
}

/// Drawn in place of the subtree it concerns.
#[derive(Debug, Error)]
pub enum RenderIssue {
    #[error("Unsupported render of type {0}")]
    UnknownType(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Expected a value of type {type_name}, found {found}")]
    UnexpectedValue {
        type_name: String,
        found: &'static str,
    },
    #[error("Pointer to {target} has no type tag and {candidates} possible types")]
    AmbiguousPointer { target: String, candidates: usize },
    #[error("Pointer to {target} holds {found}, which is not {target} or one of its subtypes")]
    ForeignPointerType { target: String, found: String },
    #[error("Dictionary keys of type {0} are not supported")]
    UnsupportedKey(String),
}

pub struct TypeTreeRender {
    schema: Arc<TypeSchema>,
    options: RenderOptions,
    specific_renders: HashMap<String, Rc<dyn SpecificTypeRender>>,
    pub(crate) pending_keys: RefCell<HashMap<WidgetPath, String>>,
    reported: RefCell<HashSet<WidgetPath>>,
}

impl TypeTreeRender {
    pub fn new(schema: Arc<TypeSchema>) -> Self {
        Self::with_options(schema, RenderOptions::default())
    }

    pub fn with_options(schema: Arc<TypeSchema>, options: RenderOptions) -> Self {
        Self {
            schema,
            options,
            specific_renders: HashMap::new(),
            pending_keys: RefCell::new(HashMap::new()),
            reported: RefCell::new(HashSet::new()),
        }
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn register(&mut self, type_name: impl Into<String>, render: Rc<dyn SpecificTypeRender>) {
        self.specific_renders.insert(type_name.into(), render);
    }

    pub(crate) fn specific_render(&self, type_name: &str) -> Option<&Rc<dyn SpecificTypeRender>> {
        self.specific_renders.get(type_name)
    }

    /// Call once per frame.
    pub fn end_frame(&self) {
        for render in self.specific_renders.values() {
            render.end_frame();
        }
    }

    pub fn uses_one_column(&self, type_name: &str) -> bool {
        if let Some(render) = self.specific_render(type_name) {
            return render.uses_one_column(type_name);
        }

        match self.schema.resolve(type_name) {
            Ok(descriptor) => match self.specific_render(&descriptor.name) {
                Some(render) => render.uses_one_column(&descriptor.name),
                None => matches!(
                    descriptor.kind,
                    TypeKind::Primitive(_) | TypeKind::Enum(_)
                ),
            },
            Err(_) => {
                tracing::debug!(type_name, "layout of unknown type defaults to one column");
                true
            }
        }
    }

    fn default_open(&self, type_name: &str, value: &Value) -> bool {
        match self.schema.resolve(type_name).map(|d| &d.kind) {
            Ok(TypeKind::Vector { .. }) => value
                .as_array()
                .map_or(true, |items| items.len() < self.options.vector_open_threshold),
            _ => true,
        }
    }

    pub fn render_value_of_type(
        &self,
        ui: &mut dyn Widgets,
        value: &mut Value,
        type_name: &str,
        path: &WidgetPath,
    ) -> bool {
        if let Some(render) = self.specific_render(type_name) {
            return render.render_value(self, ui, value, type_name, path);
        }

        let Ok(descriptor) = self.schema.get_type(type_name) else {
            self.report(ui, path, RenderIssue::UnknownType(type_name.to_string()));
            return false;
        };

        let result = match &descriptor.kind {
            TypeKind::Primitive(kind) => render_primitive(ui, *kind, value, type_name, path),
            TypeKind::Struct(_) => self.render_struct(ui, value, type_name, path),
            TypeKind::Enum(data) => render_enum(ui, data, value, path),
            TypeKind::Flagset { enum_name } => self.render_flagset(ui, value, enum_name, path),
            TypeKind::Vector { element } => self.render_vector(ui, value, element, path),
            TypeKind::Dictionary { key, value: element } => {
                self.render_dict(ui, value, key, element, path)
            }
            TypeKind::Pointer { target } => self.render_ptr(ui, value, target, path),
            TypeKind::Typedef { .. } => match self.schema.resolve(type_name) {
                Ok(resolved) => Ok(self.render_value_of_type(ui, value, &resolved.name, path)),
                Err(e) => Err(e.into()),
            },
        };

        match result {
            Ok(changed) => changed,
            Err(issue) => {
                self.report(ui, path, issue);
                false
            }
        }
    }

    pub(crate) fn report(&self, ui: &mut dyn Widgets, path: &WidgetPath, issue: RenderIssue) {
        let message = issue.to_string();
        ui.text(&message);
        if self.options.log_diagnostics && self.reported.borrow_mut().insert(path.clone()) {
            tracing::warn!(path = %path, "{message}");
        }
    }

    fn render_struct(
        &self,
        ui: &mut dyn Widgets,
        value: &mut Value,
        type_name: &str,
        path: &WidgetPath,
    ) -> Result<bool, RenderIssue> {
        let fields = self.schema.all_fields(type_name)?;
        let found = value.kind_name();
        let Some(object) = value.as_object_mut() else {
            return Err(RenderIssue::UnexpectedValue {
                type_name: type_name.to_string(),
                found,
            });
        };

        let mut modified = false;

        for field in fields {
            let field_path = path.field(field.name);
            let tooltip = format!(
                "Field of class {} of type {}.",
                field.owner, field.type_name
            );

            let mut present = object.contains_key(field.name);
            if ui.checkbox(&field_path.control("present"), &mut present) {
                modified = true;
                if present {
                    object.insert(field.name, self.create_default(field.type_name));
                } else {
                    object.remove(field.name);
                }
            }
            ui.same_line();

            match object.get_mut(field.name) {
                None => {
                    ui.text(field.name);
                    ui.tooltip_on_hover(&tooltip);
                    ui.next_column();
                    ui.text_disabled("<not defined>");
                    ui.next_column();
                }
                Some(field_value) if field.read_only => {
                    ui.text(field.name);
                    ui.tooltip_on_hover(&tooltip);
                    ui.next_column();
                    ui.text(&field_value.to_string());
                    ui.next_column();
                }
                Some(field_value) if self.uses_one_column(field.type_name) => {
                    ui.text(field.name);
                    ui.tooltip_on_hover(&tooltip);
                    ui.next_column();
                    modified |=
                        self.render_value_of_type(ui, field_value, field.type_name, &field_path);
                    ui.next_column();
                }
                Some(field_value) => {
                    let open = ui.tree_node(
                        field.name,
                        &field_path,
                        self.default_open(field.type_name, field_value),
                    );
                    ui.tooltip_on_hover(&tooltip);
                    ui.next_column();
                    ui.next_column();
                    if open {
                        modified |= self.render_value_of_type(
                            ui,
                            field_value,
                            field.type_name,
                            &field_path,
                        );
                        ui.tree_pop();
                    }
                }
            }
        }

        Ok(modified)
    }

    fn render_flagset(
        &self,
        ui: &mut dyn Widgets,
        value: &mut Value,
        enum_name: &str,
        path: &WidgetPath,
    ) -> Result<bool, RenderIssue> {
        let TypeKind::Enum(data) = &self.schema.resolve(enum_name)?.kind else {
            return Err(RenderIssue::UnknownType(enum_name.to_string()));
        };
        let found = value.kind_name();
        let Some(flags) = value.as_object_mut() else {
            return Err(RenderIssue::UnexpectedValue {
                type_name: format!("flagset of {enum_name}"),
                found,
            });
        };

        let mut modified = false;
        for label in data.labels() {
            let mut on = flags.get(label).and_then(Value::as_bool).unwrap_or(false);
            ui.text(label);
            ui.next_column();
            if ui.checkbox(&path.field(label), &mut on) {
                flags.insert(label, Value::Bool(on));
                modified = true;
            }
            ui.next_column();
        }
        Ok(modified)
    }
}

fn render_enum(
    ui: &mut dyn Widgets,
    data: &EnumType,
    value: &mut Value,
    path: &WidgetPath,
) -> Result<bool, RenderIssue> {
    let current = match value.as_str() {
        Some(label) => label.to_string(),
        None => value.to_string(),
    };
    let labels: Vec<String> = data.labels().map(str::to_string).collect();

    match ui.combo(path, &current, &labels) {
        Some(selected) if labels[selected] != current => {
            *value = Value::String(labels[selected].clone());
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn unexpected(type_name: &str, value: &Value) -> RenderIssue {
    RenderIssue::UnexpectedValue {
        type_name: type_name.to_string(),
        found: value.kind_name(),
    }
}

fn render_primitive(
    ui: &mut dyn Widgets,
    kind: PrimitiveKind,
    value: &mut Value,
    type_name: &str,
    path: &WidgetPath,
) -> Result<bool, RenderIssue> {
    // Integers that don't fit the widget's type are shown as plain text.
    macro_rules! drag_int {
        ($ty:ty, $read:ident, $drag:ident, $wrap:expr) => {{
            let Some(raw) = value.$read() else {
                return Err(unexpected(type_name, value));
            };
            match <$ty>::try_from(raw) {
                Ok(mut v) => {
                    let changed = ui.$drag(path, &mut v);
                    if changed {
                        *value = $wrap(v);
                    }
                    Ok(changed)
                }
                Err(_) => {
                    ui.text(&raw.to_string());
                    Ok(false)
                }
            }
        }};
    }

    match kind {
        PrimitiveKind::Bool => {
            let Some(mut v) = value.as_bool() else {
                return Err(unexpected(type_name, value));
            };
            let changed = ui.checkbox(path, &mut v);
            if changed {
                *value = Value::Bool(v);
            }
            Ok(changed)
        }
        PrimitiveKind::Int => drag_int!(i32, as_i64, drag_i32, |v| Value::Int(i64::from(v))),
        PrimitiveKind::Uint => drag_int!(u32, as_u64, drag_u32, |v| Value::UInt(u64::from(v))),
        PrimitiveKind::Uint16 => drag_int!(u16, as_u64, drag_u16, |v| Value::UInt(u64::from(v))),
        PrimitiveKind::Uint64 => drag_int!(u64, as_u64, drag_u64, Value::UInt),
        PrimitiveKind::Float => {
            let Some(raw) = value.as_f64() else {
                return Err(unexpected(type_name, value));
            };
            let mut v = raw as f32;
            let changed = ui.drag_float(path, &mut v);
            if changed {
                *value = Value::Float(f64::from(v));
            }
            Ok(changed)
        }
        PrimitiveKind::String => match value {
            Value::String(s) => Ok(ui.input_text(path, s)),
            other => Err(unexpected(type_name, other)),
        },
        PrimitiveKind::Bytes => match value {
            Value::Bytes(_) => {
                ui.text(&value.to_string());
                Ok(false)
            }
            other => Err(unexpected(type_name, other)),
        },
        PrimitiveKind::Vector2 | PrimitiveKind::Vector3 | PrimitiveKind::Vector4 => {
            let arity = kind.vector_arity().unwrap_or_default();
            let components: Option<Vec<f32>> = value
                .as_array()
                .filter(|items| items.len() == arity)
                .and_then(|items| items.iter().map(|v| v.as_f64().map(|f| f as f32)).collect());
            let Some(mut components) = components else {
                return Err(unexpected(type_name, value));
            };
            let changed = ui.input_floats(path, &mut components);
            if changed {
                *value = Value::Array(
                    components
                        .into_iter()
                        .map(|c| Value::Float(f64::from(c)))
                        .collect(),
                );
            }
            Ok(changed)
        }
        PrimitiveKind::Property => {
            ui.text(&value.to_string());
            Ok(false)
        }
    }
}
