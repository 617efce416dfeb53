use crate::error::MemoryError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

/// A global symbol of the game executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub address: u32,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub offset: u32,
    pub type_name: String,
    pub length: u32,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub array_size: u32,
    pub element_type: String,
    pub element_size: u32,
    pub is_pointer: bool,
    pub is_struct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureType {
    pub name: String,
    pub data_length: u32,
    pub components: Vec<Component>,
}

/// A type exported from the disassembler. Types it could not describe are
/// kept as whatever it wrote for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoryType {
    Pointer { name: String, pointer: String },
    Structure(StructureType),
    Opaque(serde_json::Value),
}

/// Contents of `symbols.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolFile {
    pub main_symbols: Vec<Symbol>,
    pub all_types: BTreeMap<String, MemoryType>,
}

impl SymbolFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let file = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&file)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MemoryError> {
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn get(&self, type_name: &str) -> Result<&MemoryType, MemoryError> {
        self.all_types
            .get(type_name)
            .ok_or_else(|| MemoryError::UnknownType(type_name.to_string()))
    }

    /// Strips pointer types off `type_name`, returning the structure it
    /// ends at and how many pointers were in between.
    pub fn resolve_structure(
        &self,
        type_name: &str,
    ) -> Result<(&StructureType, usize), MemoryError> {
        let mut depth = 0;
        let mut current = self.get(type_name)?;
        loop {
            match current {
                MemoryType::Pointer { pointer, .. } => {
                    depth += 1;
                    if depth > self.all_types.len() {
                        return Err(MemoryError::UnknownType(type_name.to_string()));
                    }
                    current = self.get(pointer)?;
                }
                MemoryType::Structure(structure) => return Ok((structure, depth)),
                MemoryType::Opaque(_) => {
                    return Err(MemoryError::UnknownType(type_name.to_string()))
                }
            }
        }
    }
}
