#![warn(clippy::all)]

pub mod blob;
mod container;
pub mod defaults;
pub mod editor;
pub mod error;
pub mod filter;
pub mod links;
pub mod memory;
pub mod pointer;
pub mod render;
pub mod schema;
pub mod specific;
pub mod value;
pub mod widgets;

#[cfg(feature = "imgui-backend")]
mod imgui_backend;
#[cfg(feature = "imgui-backend")]
pub use imgui_backend::ImguiWidgets;

pub use blob::{BlobCache, BlobCodec, EmbeddedBlobRender};
pub use editor::GenericEditor;
pub use error::{CodecError, MemoryError, SchemaError};
pub use filter::ActorFilter;
pub use links::{ActorLink, AssetLinkRender, GameLinkRender};
pub use render::{RenderIssue, RenderOptions, TypeTreeRender};
pub use schema::{PrimitiveKind, TypeDescriptor, TypeKind, TypeSchema};
pub use specific::SpecificTypeRender;
pub use value::{Value, ValueMap, TYPE_TAG};
pub use widgets::{WidgetPath, Widgets};
