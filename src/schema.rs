use crate::error::SchemaError;
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fmt,
    marker::PhantomData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Bool,
    Int,
    Uint,
    Uint16,
    Uint64,
    Float,
    String,
    Bytes,
    Vector2,
    Vector3,
    Vector4,
    Property,
}

impl PrimitiveKind {
    pub fn vector_arity(&self) -> Option<usize> {
        match self {
            PrimitiveKind::Vector2 => Some(2),
            PrimitiveKind::Vector3 => Some(3),
            PrimitiveKind::Vector4 => Some(4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub parent: Option<String>,
    pub fields: Vec<(String, String)>,
    pub read_only_fields: Vec<String>,
}

impl StructType {
    pub fn is_read_only(&self, field: &str) -> bool {
        self.read_only_fields.iter().any(|f| f == field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub values: Vec<(String, i64)>,
}

impl EnumType {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(label, _)| label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Struct(StructType),
    Enum(EnumType),
    Flagset { enum_name: String },
    Vector { element: String },
    Dictionary { key: String, value: String },
    Pointer { target: String },
    Typedef { alias: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn primitive(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self::new(name, TypeKind::Primitive(kind))
    }

    pub fn structure<'a>(
        name: impl Into<String>,
        parent: Option<&str>,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self::new(
            name,
            TypeKind::Struct(StructType {
                parent: parent.map(str::to_string),
                fields: fields
                    .into_iter()
                    .map(|(f, t)| (f.to_string(), t.to_string()))
                    .collect(),
                read_only_fields: Vec::new(),
            }),
        )
    }

    pub fn enumeration<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (&'a str, i64)>,
    ) -> Self {
        Self::new(
            name,
            TypeKind::Enum(EnumType {
                values: values
                    .into_iter()
                    .map(|(label, v)| (label.to_string(), v))
                    .collect(),
            }),
        )
    }

    pub fn flagset(name: impl Into<String>, enum_name: &str) -> Self {
        Self::new(
            name,
            TypeKind::Flagset {
                enum_name: enum_name.to_string(),
            },
        )
    }

    pub fn vector(name: impl Into<String>, element: &str) -> Self {
        Self::new(
            name,
            TypeKind::Vector {
                element: element.to_string(),
            },
        )
    }

    pub fn dictionary(name: impl Into<String>, key: &str, value: &str) -> Self {
        Self::new(
            name,
            TypeKind::Dictionary {
                key: key.to_string(),
                value: value.to_string(),
            },
        )
    }

    pub fn pointer(name: impl Into<String>, target: &str) -> Self {
        Self::new(
            name,
            TypeKind::Pointer {
                target: target.to_string(),
            },
        )
    }

    pub fn typedef(name: impl Into<String>, alias: &str) -> Self {
        Self::new(
            name,
            TypeKind::Typedef {
                alias: alias.to_string(),
            },
        )
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match &self.kind {
            TypeKind::Struct(s) => Some(s),
            _ => None,
        }
    }
}

/// A field as seen by a struct instance, including inherited ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub type_name: &'a str,
    pub read_only: bool,
}

#[derive(Debug, Default, Clone)]
pub struct TypeSchema {
    types: HashMap<String, TypeDescriptor>,
    children: HashMap<String, BTreeSet<String>>,
}

impl TypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_primitives() -> Self {
        let mut schema = Self::new();
        for (name, kind) in BUILTIN_PRIMITIVES {
            schema.insert(TypeDescriptor::primitive(*name, *kind));
        }
        schema
    }

    /// Type name to `{"kind": ...}` object, on top of the builtin primitives.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: OrderedMap<RawType> = serde_json::from_str(json)?;
        let mut schema = Self::with_builtin_primitives();
        for (name, raw_type) in raw.0 {
            schema.insert(TypeDescriptor::new(name, raw_type.into_kind()));
        }
        schema.validate()?;
        Ok(schema)
    }

    pub fn insert(&mut self, descriptor: TypeDescriptor) {
        if let Some(old_parent) = self
            .types
            .get(&descriptor.name)
            .and_then(|old| old.as_struct())
            .and_then(|s| s.parent.clone())
        {
            if let Some(siblings) = self.children.get_mut(&old_parent) {
                siblings.remove(&descriptor.name);
            }
        }
        if let Some(parent) = descriptor.as_struct().and_then(|s| s.parent.as_ref()) {
            self.children
                .entry(parent.clone())
                .or_default()
                .insert(descriptor.name.clone());
        }
        self.types.insert(descriptor.name.clone(), descriptor);
    }

    pub fn mark_read_only(&mut self, type_name: &str, field: &str) -> Result<(), SchemaError> {
        match self.types.get_mut(type_name).map(|t| &mut t.kind) {
            Some(TypeKind::Struct(s)) => {
                if !s.is_read_only(field) {
                    s.read_only_fields.push(field.to_string());
                }
                Ok(())
            }
            Some(_) => Err(SchemaError::NotAStruct(type_name.to_string())),
            None => Err(SchemaError::UnknownType(type_name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get_type(&self, name: &str) -> Result<&TypeDescriptor, SchemaError> {
        self.types
            .get(name)
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    /// Follows typedefs until a non-alias descriptor is reached.
    pub fn resolve(&self, name: &str) -> Result<&TypeDescriptor, SchemaError> {
        let mut seen = HashSet::new();
        let mut current = self.get_type(name)?;
        while let TypeKind::Typedef { alias } = &current.kind {
            if !seen.insert(current.name.as_str()) {
                return Err(SchemaError::TypedefCycle(name.to_string()));
            }
            current = self.get_type(alias)?;
        }
        Ok(current)
    }

    /// Includes `name` itself.
    pub fn all_children_of(&self, name: &str) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        let mut to_check = vec![name.to_string()];

        while let Some(next) = to_check.pop() {
            if result.contains(&next) {
                continue;
            }
            if let Some(children) = self.children.get(&next) {
                to_check.extend(children.iter().cloned());
            }
            result.insert(next);
        }

        result
    }

    /// Every field of a struct, the root-most ancestor's fields first.
    pub fn all_fields(&self, name: &str) -> Result<Vec<FieldRef<'_>>, SchemaError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(name);

        while let Some(type_name) = current {
            if !seen.insert(type_name) {
                return Err(SchemaError::InheritanceCycle(type_name.to_string()));
            }
            let descriptor = self.resolve(type_name)?;
            let data = descriptor
                .as_struct()
                .ok_or_else(|| SchemaError::NotAStruct(type_name.to_string()))?;
            chain.push((descriptor.name.as_str(), data));
            current = data.parent.as_deref();
        }

        Ok(chain
            .into_iter()
            .rev()
            .flat_map(|(owner, data)| {
                data.fields.iter().map(move |(field, type_name)| FieldRef {
                    owner,
                    name: field,
                    type_name,
                    read_only: data.is_read_only(field),
                })
            })
            .collect())
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for descriptor in self.types.values() {
            let Some(parent) = descriptor.as_struct().and_then(|s| s.parent.as_ref()) else {
                continue;
            };
            if !self.types.contains_key(parent) {
                return Err(SchemaError::UnknownParent {
                    child: descriptor.name.clone(),
                    parent: parent.clone(),
                });
            }
            self.all_fields(&descriptor.name)?;
        }
        Ok(())
    }
}

const BUILTIN_PRIMITIVES: &[(&str, PrimitiveKind)] = &[
    ("bool", PrimitiveKind::Bool),
    ("int", PrimitiveKind::Int),
    ("unsigned", PrimitiveKind::Uint),
    ("unsigned_int", PrimitiveKind::Uint),
    ("unsigned_short", PrimitiveKind::Uint16),
    ("unsigned_long", PrimitiveKind::Uint64),
    ("float", PrimitiveKind::Float),
    ("float32", PrimitiveKind::Float),
    ("base::global::CStrId", PrimitiveKind::String),
    ("base::global::CFilePathStrId", PrimitiveKind::String),
    ("base::global::CRntString", PrimitiveKind::String),
    ("base::global::CName", PrimitiveKind::String),
    ("base::core::CAssetLink", PrimitiveKind::String),
    ("base::reflection::CTypedValue", PrimitiveKind::Bytes),
    ("base::global::CRntFile", PrimitiveKind::Bytes),
    ("base::math::CVector2D", PrimitiveKind::Vector2),
    ("base::math::CVector3D", PrimitiveKind::Vector3),
    ("base::math::CVector4D", PrimitiveKind::Vector4),
];

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawType {
    Primitive {
        primitive: PrimitiveKind,
    },
    Struct {
        #[serde(default)]
        parent: Option<String>,
        #[serde(default)]
        fields: OrderedMap<String>,
        #[serde(default)]
        read_only_fields: Vec<String>,
    },
    Enum {
        values: OrderedMap<i64>,
    },
    Flagset {
        #[serde(rename = "enum")]
        enum_name: String,
    },
    Vector {
        element: String,
    },
    Dictionary {
        key: String,
        value: String,
    },
    Pointer {
        target: String,
    },
    Typedef {
        alias: String,
    },
}

impl RawType {
    fn into_kind(self) -> TypeKind {
        match self {
            RawType::Primitive { primitive } => TypeKind::Primitive(primitive),
            RawType::Struct {
                parent,
                fields,
                read_only_fields,
            } => TypeKind::Struct(StructType {
                parent,
                fields: fields.0,
                read_only_fields,
            }),
            RawType::Enum { values } => TypeKind::Enum(EnumType { values: values.0 }),
            RawType::Flagset { enum_name } => TypeKind::Flagset { enum_name },
            RawType::Vector { element } => TypeKind::Vector { element },
            RawType::Dictionary { key, value } => TypeKind::Dictionary { key, value },
            RawType::Pointer { target } => TypeKind::Pointer { target },
            RawType::Typedef { alias } => TypeKind::Typedef { alias },
        }
    }
}

struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}
