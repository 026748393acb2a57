#[derive(Debug)]
pub enum Error {
    IO(std::io::Error),
    ConfigDirNotFound,
    TomlSerialize(toml::ser::Error),
    TomlDeserialize(toml::de::Error),
    Json(serde_json::Error),
    Encode(String),
    Decode(String),
    Solver(crate::engine::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::IO(value)
    }
}

impl From<crate::engine::error::Error> for Error {
    fn from(value: crate::engine::error::Error) -> Self {
        Error::Solver(value)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(value: toml::ser::Error) -> Self {
        Error::TomlSerialize(value)
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::TomlDeserialize(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(value: base64::DecodeError) -> Self {
        Error::Decode(format!("invalid Base64: {value}"))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IO(e) => write!(f, "IO error: {e}"),
            Self::ConfigDirNotFound => write!(f, "no configuration directory on this platform"),
            Self::TomlSerialize(e) => write!(f, "TOML serialization error: {e}"),
            Self::TomlDeserialize(e) => write!(f, "TOML deserialization error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Encode(message) => write!(f, "encode error: {message}"),
            Self::Decode(message) => write!(f, "decode error: {message}"),
            Self::Solver(e) => write!(f, "solver error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IO(e) => Some(e),
            Self::ConfigDirNotFound => None,
            Self::TomlSerialize(e) => Some(e),
            Self::TomlDeserialize(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Encode(_) => None,
            Self::Decode(_) => None,
            Self::Solver(e) => Some(e),
        }
    }
}
