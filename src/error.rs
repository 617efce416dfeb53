use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse type schema: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("type `{child}` declares unknown parent `{parent}`")]
    UnknownParent { child: String, parent: String },
    #[error("inheritance cycle through `{0}`")]
    InheritanceCycle(String),
    #[error("typedef cycle through `{0}`")]
    TypedefCycle(String),
    #[error("type `{0}` is not a struct")]
    NotAStruct(String),
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("no memory source connected")]
    Unavailable,
    #[error("address {0:#010x} is outside of the memory image")]
    InvalidAddress(u64),
    #[error("unknown memory type `{0}`")]
    UnknownType(String),
    #[error("symbol file error: {0}")]
    Symbols(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to decode embedded value: {0}")]
    Decode(String),
    #[error("failed to encode embedded value: {0}")]
    Encode(String),
}
