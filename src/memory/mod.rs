//! Live view of a running game's memory, laid out by the structures exported
//! from its disassembly.

mod backend;
mod symbols;
mod window;

pub use backend::*;
pub use symbols::*;
pub use window::*;

use crate::{
    error::MemoryError,
    widgets::{WidgetPath, Widgets},
};
use gemstone::mem::MemValue;
use std::{
    fmt::Write,
    mem::size_of,
    path::Path,
};

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum DataFormat {
    Dec,
    Hex,
}

/// Scalar types the disassembler names, all stored big-endian.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum DataType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl DataType {
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Some(match type_name {
            "char" | "sbyte" => DataType::I8,
            "short" => DataType::I16,
            "int" | "long" => DataType::I32,
            "longlong" => DataType::I64,
            "bool" | "byte" | "uchar" | "undefined1" => DataType::U8,
            "ushort" | "word" | "undefined2" => DataType::U16,
            "uint" | "ulong" | "dword" | "undefined4" => DataType::U32,
            "ulonglong" | "qword" | "undefined8" => DataType::U64,
            "float" => DataType::F32,
            "double" => DataType::F64,
            _ => return None,
        })
    }

    pub fn size(&self) -> usize {
        match self {
            DataType::I8 => size_of::<i8>(),
            DataType::I16 => size_of::<i16>(),
            DataType::I32 => size_of::<i32>(),
            DataType::I64 => size_of::<i64>(),
            DataType::U8 => size_of::<u8>(),
            DataType::U16 => size_of::<u16>(),
            DataType::U32 => size_of::<u32>(),
            DataType::U64 => size_of::<u64>(),
            DataType::F32 => size_of::<f32>(),
            DataType::F64 => size_of::<f64>(),
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DataType::F32 | DataType::F64)
    }

    /// Formats the first `size()` bytes of `data`, or `None` if there are
    /// not enough of them.
    pub fn format(&self, data: &[u8], data_format: DataFormat) -> Option<String> {
        let size = self.size();
        let mut buf = [0u8; 8];
        buf[..size].copy_from_slice(data.get(..size)?);

        let mut out = String::new();
        let width = size * 2;
        // SAFETY: `buf` is 8 bytes long, enough for every type read below.
        let written = unsafe {
            match (self, data_format) {
                (DataType::I8, DataFormat::Dec) => write!(out, "{}", i8::read_be(buf.as_ptr().cast())),
                (DataType::I8, DataFormat::Hex) => write!(out, "0x{:0width$X}", i8::read_be(buf.as_ptr().cast())),
                (DataType::I16, DataFormat::Dec) => write!(out, "{}", i16::read_be(buf.as_ptr().cast())),
                (DataType::I16, DataFormat::Hex) => write!(out, "0x{:0width$X}", i16::read_be(buf.as_ptr().cast())),
                (DataType::I32, DataFormat::Dec) => write!(out, "{}", i32::read_be(buf.as_ptr().cast())),
                (DataType::I32, DataFormat::Hex) => write!(out, "0x{:0width$X}", i32::read_be(buf.as_ptr().cast())),
                (DataType::I64, DataFormat::Dec) => write!(out, "{}", i64::read_be(buf.as_ptr().cast())),
                (DataType::I64, DataFormat::Hex) => write!(out, "0x{:0width$X}", i64::read_be(buf.as_ptr().cast())),
                (DataType::U8, DataFormat::Dec) => write!(out, "{}", u8::read_be(buf.as_ptr().cast())),
                (DataType::U8, DataFormat::Hex) => write!(out, "0x{:0width$X}", u8::read_be(buf.as_ptr().cast())),
                (DataType::U16, DataFormat::Dec) => write!(out, "{}", u16::read_be(buf.as_ptr().cast())),
                (DataType::U16, DataFormat::Hex) => write!(out, "0x{:0width$X}", u16::read_be(buf.as_ptr().cast())),
                (DataType::U32, DataFormat::Dec) => write!(out, "{}", u32::read_be(buf.as_ptr().cast())),
                (DataType::U32, DataFormat::Hex) => write!(out, "0x{:0width$X}", u32::read_be(buf.as_ptr().cast())),
                (DataType::U64, DataFormat::Dec) => write!(out, "{}", u64::read_be(buf.as_ptr().cast())),
                (DataType::U64, DataFormat::Hex) => write!(out, "0x{:0width$X}", u64::read_be(buf.as_ptr().cast())),
                (DataType::F32, DataFormat::Dec) => {
                    write!(out, "{}", f32::from_bits(u32::read_be(buf.as_ptr().cast())))
                }
                (DataType::F32, DataFormat::Hex) => write!(out, "0x{:08X}", u32::read_be(buf.as_ptr().cast())),
                (DataType::F64, DataFormat::Dec) => {
                    write!(out, "{}", f64::from_bits(u64::read_be(buf.as_ptr().cast())))
                }
                (DataType::F64, DataFormat::Hex) => write!(out, "0x{:016X}", u64::read_be(buf.as_ptr().cast())),
            }
        };
        written.ok()?;
        Some(out)
    }
}

/// Text shown for a scalar component: floats in decimal, integers in hex,
/// anything else as its raw bytes.
pub fn format_component(type_name: &str, data: &[u8]) -> String {
    DataType::from_type_name(type_name)
        .and_then(|data_type| {
            let data_format = if data_type.is_float() {
                DataFormat::Dec
            } else {
                DataFormat::Hex
            };
            data_type.format(data, data_format)
        })
        .unwrap_or_else(|| window::hex(data))
}

/// Memory source, exported symbols and the structure windows opened so far.
pub struct MemoryViewer {
    backend: Box<dyn MemoryBackend>,
    symbols: SymbolFile,
    windows: Vec<DataTypeWindow>,
}

impl Default for MemoryViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryViewer {
    pub fn new() -> Self {
        Self {
            backend: Box::new(NullBackend),
            symbols: SymbolFile::default(),
            windows: Vec::new(),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_connected()
    }

    pub fn connect(&mut self, backend: Box<dyn MemoryBackend>) {
        tracing::info!(backend = backend.name(), "connected memory source");
        self.backend = backend;
    }

    pub fn disconnect(&mut self) {
        self.backend = Box::new(NullBackend);
    }

    /// Falls back to no backend once the current one lost its connection.
    pub fn check_connection(&mut self) {
        if !self.backend.is_connected() && self.backend.name() != NullBackend.name() {
            tracing::warn!(backend = self.backend.name(), "memory source disconnected");
            self.disconnect();
        }
    }

    pub fn symbols(&self) -> &SymbolFile {
        &self.symbols
    }

    pub fn set_symbols(&mut self, symbols: SymbolFile) {
        self.symbols = symbols;
    }

    pub fn load_symbols(&mut self, path: impl AsRef<Path>) -> Result<(), MemoryError> {
        self.symbols = SymbolFile::load(path)?;
        Ok(())
    }

    pub fn save_symbols(&self, path: impl AsRef<Path>) -> Result<(), MemoryError> {
        self.symbols.save(path)
    }

    pub fn windows(&self) -> &[DataTypeWindow] {
        &self.windows
    }

    pub fn close_window(&mut self, index: usize) {
        if index < self.windows.len() {
            self.windows.remove(index);
        }
    }

    pub fn open_type_window(
        &mut self,
        address: u32,
        type_name: &str,
        name: &str,
    ) -> Result<(), MemoryError> {
        let window =
            DataTypeWindow::open(&self.symbols, self.backend.as_ref(), address, type_name, name)?;
        self.windows.push(window);
        Ok(())
    }

    fn open_logged(&mut self, address: u32, type_name: &str, name: &str) {
        if let Err(e) = self.open_type_window(address, type_name, name) {
            tracing::warn!(name, type_name, "could not open structure: {e}");
        }
    }

    /// One button per typed global symbol; clicking opens its structure.
    pub fn draw_globals(&mut self, ui: &mut dyn Widgets) {
        let mut clicked = None;
        for symbol in &self.symbols.main_symbols {
            match &symbol.type_name {
                None => ui.text(&format!("{} - No type", symbol.name)),
                Some(type_name) => {
                    let id = WidgetPath::root(format!("{:#x}", symbol.address));
                    if ui.button(&symbol.name, &id, true) {
                        clicked = Some((symbol.address, type_name.clone(), symbol.name.clone()));
                    }
                }
            }
        }
        if let Some((address, type_name, name)) = clicked {
            self.open_logged(address, &type_name, &name);
        }
    }

    pub fn render_window(&mut self, index: usize, ui: &mut dyn Widgets) {
        let Some(window) = self.windows.get(index) else {
            return;
        };
        match window.render(ui, self.backend.as_ref()) {
            Ok(Some(request)) => self.open_logged(request.address, &request.type_name, &request.name),
            Ok(None) => {}
            Err(e) => ui.text(&e.to_string()),
        }
    }

    #[cfg(feature = "imgui-backend")]
    pub fn draw(&mut self, ui: &imgui::Ui) {
        use crate::imgui_backend::ImguiWidgets;
        use imgui::Condition;

        self.check_connection();
        if !self.backend.is_connected() {
            return;
        }

        ui.window("Globals").build(|| {
            self.draw_globals(&mut ImguiWidgets::new(ui));
        });

        let mut closed = Vec::new();
        for index in 0..self.windows.len() {
            let title = self.windows[index].title().to_string();
            let mut open = true;
            ui.window(&title)
                .size([600.0, 400.0], Condition::Once)
                .opened(&mut open)
                .build(|| {
                    self.render_window(index, &mut ImguiWidgets::new(ui));
                });
            if !open {
                closed.push(index);
            }
        }
        for index in closed.into_iter().rev() {
            self.close_window(index);
        }
    }
}
