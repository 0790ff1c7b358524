//! MySQL data type definitions.

use core::fmt;

use super::quote_string;

/// A declared column type.
///
/// The type name is stored in canonical upper-case spelling with MySQL's
/// synonyms folded (`INTEGER` becomes `INT`, `BOOLEAN` becomes
/// `TINYINT(1)` and so on), so equivalent declarations render identically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataType {
    /// Canonical type name (e.g. `VARCHAR`).
    pub name: String,
    /// Display width, length or precision.
    pub length: Option<u32>,
    /// Scale for fixed and floating point types.
    pub scale: Option<u32>,
    /// Member values of `ENUM` and `SET`.
    pub values: Vec<String>,
    /// `UNSIGNED` attribute.
    pub unsigned: bool,
    /// `ZEROFILL` attribute.
    pub zerofill: bool,
    /// `BINARY` attribute on character types.
    pub binary: bool,
    /// Column character set, lower-cased.
    pub charset: Option<String>,
}

impl DataType {
    /// Creates a type from a name as written, folding synonyms.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let (name, length) = canonical_name(name);
        Self {
            name: name.into_owned(),
            length,
            ..Self::default()
        }
    }

    /// Sets the length.
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Returns true for `ENUM` and `SET`.
    #[must_use]
    pub fn has_values(&self) -> bool {
        matches!(self.name.as_str(), "ENUM" | "SET")
    }
}

/// Folds a MySQL type synonym into its canonical name, with the implied
/// display width where the synonym carries one.
fn canonical_name(name: &str) -> (std::borrow::Cow<'static, str>, Option<u32>) {
    use std::borrow::Cow;

    let upper = name.to_ascii_uppercase();
    let canonical = match upper.as_str() {
        "INTEGER" | "INT4" => "INT",
        "INT1" => "TINYINT",
        "INT2" => "SMALLINT",
        "INT3" | "MIDDLEINT" => "MEDIUMINT",
        "INT8" => "BIGINT",
        "BOOL" | "BOOLEAN" => return (Cow::Borrowed("TINYINT"), Some(1)),
        "DEC" | "NUMERIC" | "FIXED" => "DECIMAL",
        "REAL" | "FLOAT8" => "DOUBLE",
        "FLOAT4" => "FLOAT",
        "CHARACTER" | "NCHAR" => "CHAR",
        "NVARCHAR" => "VARCHAR",
        _ => return (Cow::Owned(upper), None),
    };
    (Cow::Borrowed(canonical), None)
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.has_values() {
            let values: Vec<String> = self.values.iter().map(|v| quote_string(v)).collect();
            write!(f, "({})", values.join(","))?;
        } else {
            match (self.length, self.scale) {
                (Some(length), Some(scale)) => write!(f, "({length},{scale})")?,
                (Some(length), None) => write!(f, "({length})")?,
                _ => {}
            }
        }
        if self.unsigned {
            f.write_str(" UNSIGNED")?;
        }
        if self.zerofill {
            f.write_str(" ZEROFILL")?;
        }
        if self.binary {
            f.write_str(" BINARY")?;
        }
        if let Some(charset) = &self.charset {
            write!(f, " CHARACTER SET {charset}")?;
        }
        Ok(())
    }
}
