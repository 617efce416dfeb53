use crate::{
    render::TypeTreeRender,
    schema::{PrimitiveKind, TypeKind},
    value::{Value, ValueMap},
};

/// Placeholder for enum values nobody chose yet. It is not a member of any
/// enum, so the selector shows it until the user picks a real label.
pub const INVALID_ENUM: &str = "Invalid";

pub fn primitive_default(kind: PrimitiveKind) -> Value {
    match kind {
        PrimitiveKind::Bool => Value::Bool(false),
        PrimitiveKind::Int => Value::Int(0),
        PrimitiveKind::Uint | PrimitiveKind::Uint16 | PrimitiveKind::Uint64 => Value::UInt(0),
        PrimitiveKind::Float => Value::Float(0.0),
        PrimitiveKind::String => Value::String(String::new()),
        PrimitiveKind::Bytes => Value::Bytes(Vec::new()),
        PrimitiveKind::Vector2 | PrimitiveKind::Vector3 | PrimitiveKind::Vector4 => {
            let arity = kind.vector_arity().unwrap_or_default();
            Value::Array(vec![Value::Float(0.0); arity])
        }
        PrimitiveKind::Property => Value::UInt(0),
    }
}

impl TypeTreeRender {
    /// A value of `type_name` to start editing from: new fields, new
    /// container entries and freshly selected pointer types all begin here.
    pub fn create_default(&self, type_name: &str) -> Value {
        if let Some(render) = self.specific_render(type_name) {
            return render.create_default(type_name);
        }

        let descriptor = match self.schema().resolve(type_name) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::warn!(type_name, "no default value: {e}");
                return Value::Null;
            }
        };

        if descriptor.name != type_name {
            return self.create_default(&descriptor.name);
        }

        match &descriptor.kind {
            TypeKind::Primitive(kind) => primitive_default(*kind),
            // Fields start absent and are toggled on one by one.
            TypeKind::Struct(_) => Value::tagged(type_name),
            TypeKind::Enum(_) => Value::String(INVALID_ENUM.to_string()),
            TypeKind::Flagset { enum_name } => {
                let flags: ValueMap = match self.schema().resolve(enum_name).map(|d| &d.kind) {
                    Ok(TypeKind::Enum(data)) => {
                        data.labels().map(|label| (label, Value::Bool(false))).collect()
                    }
                    _ => ValueMap::new(),
                };
                Value::Object(flags)
            }
            TypeKind::Vector { .. } => Value::Array(Vec::new()),
            TypeKind::Dictionary { .. } => Value::Object(ValueMap::new()),
            TypeKind::Pointer { .. } => Value::Null,
            TypeKind::Typedef { .. } => Value::Null,
        }
    }
}
