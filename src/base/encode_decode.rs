use crate::{
    base::{Bounds, VisitRecord},
    error::Result,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeType {
    #[default]
    Ascii,
    Json,
    Base64,
}

impl EncodeType {
    pub const ALL: [EncodeType; 3] = [EncodeType::Ascii, EncodeType::Json, EncodeType::Base64];

    /// Whether the encoding carries the board size itself.
    pub fn has_bounds(&self) -> bool {
        !matches!(self, EncodeType::Json)
    }
}

impl std::fmt::Display for EncodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeType::Ascii => write!(f, "ASCII"),
            EncodeType::Json => write!(f, "JSON"),
            EncodeType::Base64 => write!(f, "Base64"),
        }
    }
}

/// A decoded visit record, plus the board size when the encoding carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPack {
    pub bounds: Option<Bounds>,
    pub record: VisitRecord,
}

pub fn encode(encode_type: EncodeType, bounds: Bounds, record: &VisitRecord) -> Result<String> {
    match encode_type {
        EncodeType::Ascii => Ok(ascii::encode(bounds, record)),
        EncodeType::Json => json::encode(record),
        EncodeType::Base64 => compact::encode(bounds, record),
    }
}

pub fn decode(encode_type: EncodeType, text: &str) -> Result<ImportPack> {
    match encode_type {
        EncodeType::Ascii => ascii::decode(text),
        EncodeType::Json => json::decode(text),
        EncodeType::Base64 => compact::decode(text),
    }
}

/// Numbered grid, one line per row: move numbers for visited cells and `.` for the rest.
///
/// ```text
///  1  .  .
///  .  .  2
/// ```
pub mod ascii {
    use log::error;

    use super::ImportPack;
    use crate::{
        base::{Bounds, Position, VisitRecord},
        error::{Error, Result},
    };

    pub fn encode(bounds: Bounds, record: &VisitRecord) -> String {
        let cell_width = bounds.area().to_string().len();
        let mut ascii = String::with_capacity((cell_width + 1) * bounds.area());

        for row in 0..bounds.height {
            for col in 0..bounds.width {
                if col > 0 {
                    ascii.push(' ');
                }
                match record.get(Position::new(row, col)) {
                    Some(index) => ascii.push_str(&format!("{index:>cell_width$}")),
                    None => ascii.push_str(&format!("{:>cell_width$}", ".")),
                }
            }
            if row + 1 < bounds.height {
                ascii.push('\n');
            }
        }

        ascii
    }

    pub fn decode(ascii: &str) -> Result<ImportPack> {
        let lines: Vec<&str> = ascii.lines().filter(|line| !line.trim().is_empty()).collect();
        let height = lines.len();
        if height == 0 {
            error!("ASCII input has no lines");
            return Err(Error::Decode("ASCII input has no rows".to_owned()));
        }
        let width = lines[0].split_whitespace().count();

        let mut record = VisitRecord::new();
        for (row, line) in lines.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != width {
                error!("Inconsistent row width in ASCII input");
                return Err(Error::Decode(format!(
                    "row {row} has {} cells, expected {width}",
                    tokens.len()
                )));
            }
            for (col, token) in tokens.into_iter().enumerate() {
                if token == "." {
                    continue;
                }
                let index = token.parse::<usize>().map_err(|_| {
                    error!("Invalid cell in ASCII input: {token}");
                    Error::Decode(format!("invalid cell {token:?} at row {row}, column {col}"))
                })?;
                record.insert(Position::new(row, col), index);
            }
        }

        Ok(ImportPack {
            bounds: Some(Bounds::new(width, height)),
            record,
        })
    }
}

/// The `{"row,col": index}` map.
pub mod json {
    use super::ImportPack;
    use crate::{base::VisitRecord, error::Result};

    pub fn encode(record: &VisitRecord) -> Result<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }

    pub fn decode(json: &str) -> Result<ImportPack> {
        Ok(ImportPack {
            bounds: None,
            record: serde_json::from_str(json)?,
        })
    }
}

/// Compact form: little-endian `u16` width, `u16` height, then one `u16` move number per cell in
/// row-major order (0 for unvisited), all Base64 encoded.
pub mod compact {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use log::error;

    use super::ImportPack;
    use crate::{
        base::{Bounds, VisitRecord},
        error::{Error, Result},
    };

    fn to_u16(value: usize, what: &str) -> Result<u16> {
        u16::try_from(value).map_err(|_| Error::Encode(format!("{what} {value} does not fit the Base64 format")))
    }

    pub fn encode(bounds: Bounds, record: &VisitRecord) -> Result<String> {
        let mut bytes = Vec::with_capacity(4 + 2 * bounds.area());
        bytes.extend_from_slice(&to_u16(bounds.width, "width")?.to_le_bytes());
        bytes.extend_from_slice(&to_u16(bounds.height, "height")?.to_le_bytes());
        for position in bounds.cells() {
            let index = to_u16(record.get(position).unwrap_or(0), "move number")?;
            bytes.extend_from_slice(&index.to_le_bytes());
        }
        Ok(STANDARD.encode(bytes))
    }

    pub fn decode(text: &str) -> Result<ImportPack> {
        let bytes = STANDARD.decode(text.trim())?;
        let words: Vec<u16> = bytes
            .chunks(2)
            .map(|pair| match pair {
                [lo, hi] => Ok(u16::from_le_bytes([*lo, *hi])),
                _ => Err(Error::Decode("Base64 payload has an odd number of bytes".to_owned())),
            })
            .collect::<Result<_>>()?;
        let [width, height, cells @ ..] = words.as_slice() else {
            error!("Base64 payload is missing the board size");
            return Err(Error::Decode("Base64 payload is missing the board size".to_owned()));
        };
        let bounds = Bounds::new(*width as usize, *height as usize);
        if cells.len() != bounds.area() {
            error!("Base64 payload has {} cells for a {bounds} board", cells.len());
            return Err(Error::Decode(format!(
                "Base64 payload has {} cells, a {bounds} board needs {}",
                cells.len(),
                bounds.area()
            )));
        }

        let record = bounds
            .cells()
            .zip(cells)
            .filter(|&(_, &index)| index != 0)
            .map(|(position, &index)| (position, index as usize))
            .collect::<VisitRecord>();
        Ok(ImportPack {
            bounds: Some(bounds),
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine, engine::general_purpose::STANDARD};

    use super::*;
    use crate::{base::Position, error::Error};

    fn sample() -> (Bounds, VisitRecord) {
        let record = VisitRecord::from_path([Position::new(0, 0), Position::new(1, 2), Position::new(2, 0)]);
        (Bounds::new(4, 3), record)
    }

    #[test]
    fn ascii_pads_to_widest_number() {
        let (bounds, record) = sample();
        assert_eq!(ascii::encode(bounds, &record), " 1  .  .  .\n .  .  2  .\n 3  .  .  .");
    }

    #[test]
    fn every_format_decodes_its_own_output() {
        let (bounds, record) = sample();
        for encode_type in EncodeType::ALL {
            let text = encode(encode_type, bounds, &record).unwrap();
            let pack = decode(encode_type, &text).unwrap();
            assert_eq!(pack.record, record, "{encode_type}");
            let expected_bounds = encode_type.has_bounds().then_some(bounds);
            assert_eq!(pack.bounds, expected_bounds, "{encode_type}");
        }
    }

    #[test]
    fn ascii_accepts_loose_whitespace() {
        let pack = ascii::decode("\n1 . .\n.\t. 2\n\n").unwrap();
        assert_eq!(pack.bounds, Some(Bounds::new(3, 2)));
        assert_eq!(pack.record.get(Position::new(1, 2)), Some(2));
    }

    #[test]
    fn malformed_inputs_are_decode_errors() {
        assert!(matches!(ascii::decode(""), Err(Error::Decode(_))));
        assert!(matches!(ascii::decode("1 .\n. . ."), Err(Error::Decode(_))));
        assert!(matches!(ascii::decode("1 x"), Err(Error::Decode(_))));
        assert!(matches!(compact::decode("not base64!"), Err(Error::Decode(_))));
        // Claims a 2x2 board but carries a single cell.
        let short = STANDARD.encode([2u8, 0, 2, 0, 1, 0]);
        assert!(matches!(compact::decode(&short), Err(Error::Decode(_))));
        assert!(matches!(json::decode("{\"a\": 1}"), Err(Error::Json(_))));
    }
}
