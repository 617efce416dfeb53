use super::{
    backend::MemoryBackend,
    format_component,
    symbols::{Component, SymbolFile},
};
use crate::{
    error::MemoryError,
    widgets::{WidgetPath, Widgets},
};

/// A structure the user asked to look into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub address: u32,
    pub type_name: String,
    pub name: String,
}

/// Live view of one structure instance in game memory.
pub struct DataTypeWindow {
    title: String,
    address: u32,
    data_length: u32,
    components: Vec<Component>,
}

impl DataTypeWindow {
    /// Opens `type_name` at `address`, dereferencing pointer types until a
    /// structure is reached.
    pub fn open(
        symbols: &SymbolFile,
        backend: &dyn MemoryBackend,
        address: u32,
        type_name: &str,
        name: &str,
    ) -> Result<Self, MemoryError> {
        let (structure, depth) = symbols.resolve_structure(type_name)?;
        let real_address = backend.follow_pointers(address, &vec![0; depth])?;

        Ok(Self {
            title: format!("{name} - {} @ {real_address:#x}", structure.name),
            address: real_address,
            data_length: structure.data_length,
            components: structure.components.clone(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    /// Draws offset, type, name and value of every component, returning the
    /// structure the user clicked on, if any.
    pub fn render(
        &self,
        ui: &mut dyn Widgets,
        backend: &dyn MemoryBackend,
    ) -> Result<Option<OpenRequest>, MemoryError> {
        let memory = backend.read_bytes(self.address, self.data_length as usize)?;
        let root = WidgetPath::root(format!("{:#x}", self.address));
        let mut request = None;

        ui.columns(4, &self.title);
        for component in &self.components {
            ui.text(&format!("{:#x}", component.offset));
            ui.next_column();
            ui.text(&component.type_name);
            ui.next_column();
            ui.text(&component.name);
            ui.next_column();

            for i in 0..component.array_size {
                if i > 0 {
                    ui.next_column();
                    ui.next_column();
                    ui.next_column();
                }

                let Some(offset) = i
                    .checked_mul(component.element_size)
                    .and_then(|o| o.checked_add(component.offset))
                else {
                    ui.text("Out of range");
                    ui.next_column();
                    continue;
                };
                let base = offset as usize;
                let bytes = memory
                    .get(base..base + component.element_size as usize)
                    .unwrap_or_default();

                if component.is_pointer || component.is_struct {
                    let label = if component.is_pointer {
                        format!("Open: 0x{}", hex(bytes))
                    } else {
                        "Open".to_string()
                    };
                    let id = root.field(&component.name).index(i as usize);
                    let address = self.address.checked_add(offset);
                    if ui.button(&label, &id, address.is_some()) {
                        request = address.map(|address| OpenRequest {
                            address,
                            type_name: component.element_type.clone(),
                            name: component.name.clone(),
                        });
                    }
                } else {
                    ui.text(&format_component(&component.type_name, bytes));
                }
                ui.next_column();
            }
        }
        ui.columns(1, &self.title);

        Ok(request)
    }
}

pub(super) fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
