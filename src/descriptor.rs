//! Resource descriptors: configuration records describing a resource before it is loaded

use toml::{Table, Value};

use crate::command::{parse_action, ActionCall};
use crate::error::ResourceError;
use crate::geometry::{Align, Color, Point, Size, MAX_COORDINATE};

/// A named resource request, as supplied by configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescriptor {
    /// Unique key within the owning manager
    pub name: String,
    /// Registry tag selecting the loading strategy
    pub type_tag: String,
    /// Type-specific parameters (`filename`, `files`, `rect`, `size`, ...)
    pub fields: Table,
}

impl ResourceDescriptor {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            fields: Table::new(),
        }
    }

    /// Build a descriptor from a TOML table carrying a `type` key
    pub fn from_table(name: impl Into<String>, table: &Table) -> Result<Self, ResourceError> {
        let name = name.into();
        let type_tag = match table.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(_) => {
                return Err(ResourceError::configuration(format!(
                    "resource '{}' has a non-string type",
                    name
                )))
            }
            None => return Err(ResourceError::missing_type(&name)),
        };

        let mut fields = table.clone();
        fields.remove("type");
        Ok(Self {
            name,
            type_tag,
            fields,
        })
    }

    /// Add a field (builder style)
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a string field, failing if present with another type
    pub fn string(&self, key: &str) -> Result<Option<&str>, ResourceError> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(self.wrong_type(key, "a string")),
        }
    }

    /// Get a numeric field (integer or float)
    pub fn number(&self, key: &str) -> Result<Option<f64>, ResourceError> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(v) => as_number(v)
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a number")),
        }
    }

    /// The single-file `filename` field
    pub fn filename(&self) -> Result<Option<&str>, ResourceError> {
        self.string("filename")
    }

    /// The ordered `files = [{ filename = ... }, ...]` list
    pub fn files(&self) -> Result<Option<Vec<&str>>, ResourceError> {
        let Some(value) = self.fields.get("files") else {
            return Ok(None);
        };
        let Value::Array(entries) = value else {
            return Err(self.wrong_type("files", "an array of { filename } tables"));
        };

        entries
            .iter()
            .map(|entry| match entry {
                Value::Table(t) => match t.get("filename") {
                    Some(Value::String(f)) => Ok(f.as_str()),
                    _ => Err(ResourceError::missing_field(
                        &self.type_tag,
                        &self.name,
                        "files[].filename",
                    )),
                },
                Value::String(f) => Ok(f.as_str()),
                _ => Err(self.wrong_type("files", "an array of { filename } tables")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Explicit size override: `size = [w, h]` or `size = { width, height }`
    ///
    /// A bare number is a font point size, not a pixel size, and reads as `None`.
    pub fn size(&self) -> Result<Option<Size>, ResourceError> {
        match self.fields.get("size") {
            None | Some(Value::Integer(_)) | Some(Value::Float(_)) => Ok(None),
            Some(value) => {
                let (w, h) = number_pair(value, "width", "height")
                    .ok_or_else(|| self.wrong_type("size", "[width, height]"))?;
                let (w, h) = self.pixel_pair("size", w, h)?;
                Ok(Some(Size::new(w, h)))
            }
        }
    }

    /// Initial position: `pos = [x, y]` or `pos = { x, y }`
    pub fn position(&self) -> Result<Option<Point>, ResourceError> {
        match self.fields.get("pos") {
            None => Ok(None),
            Some(value) => {
                let (x, y) = number_pair(value, "x", "y")
                    .ok_or_else(|| self.wrong_type("pos", "[x, y]"))?;
                let (x, y) = self.pixel_pair("pos", x, y)?;
                Ok(Some(Point::new(x, y)))
            }
        }
    }

    /// Anchor name from `align`
    pub fn align(&self) -> Result<Option<Align>, ResourceError> {
        self.string("align")?.map(str::parse::<Align>).transpose()
    }

    /// A color field: `[r, g, b]` or `"#rrggbb"`
    pub fn color(&self, key: &str) -> Result<Option<Color>, ResourceError> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(v) => parse_color(v)
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "[r, g, b] or \"#rrggbb\"")),
        }
    }

    /// A color nested in a table field, e.g. `color.active`
    pub fn nested_color(&self, table: &str, key: &str) -> Result<Option<Color>, ResourceError> {
        let Some(Value::Table(t)) = self.fields.get(table) else {
            return Ok(None);
        };
        match t.get(key) {
            None => Ok(None),
            Some(v) => parse_color(v).map(Some).ok_or_else(|| {
                self.wrong_type(&format!("{}.{}", table, key), "[r, g, b] or \"#rrggbb\"")
            }),
        }
    }

    /// A whole-pixel field, `None` when absent
    pub fn pixels(&self, key: &str) -> Result<Option<i32>, ResourceError> {
        match self.number(key)? {
            None => Ok(None),
            Some(value) => to_px(value).map(Some).ok_or_else(|| {
                ResourceError::geometry_out_of_range(&self.type_tag, &self.name, &[key])
            }),
        }
    }

    fn pixel_pair(&self, key: &str, a: f64, b: f64) -> Result<(i32, i32), ResourceError> {
        match (to_px(a), to_px(b)) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(ResourceError::geometry_out_of_range(&self.type_tag, &self.name, &[key])),
        }
    }

    fn wrong_type(&self, key: &str, expected: &str) -> ResourceError {
        ResourceError::configuration(format!(
            "{} '{}': field '{}' must be {}",
            self.type_tag, self.name, key, expected
        ))
    }
}

/// An ordered batch of descriptors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorSet {
    descriptors: Vec<ResourceDescriptor>,
}

impl DescriptorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a table of `name -> { type = ..., ... }`, in table order
    pub fn from_table(table: &Table) -> Result<Self, ResourceError> {
        let mut set = Self::new();
        for (name, value) in table {
            let Value::Table(fields) = value else {
                return Err(ResourceError::configuration(format!(
                    "resource '{}' must be a table",
                    name
                )));
            };
            set.push(ResourceDescriptor::from_table(name.clone(), fields)?);
        }
        Ok(set)
    }

    /// Parse a TOML document whose top-level tables are resources
    pub fn from_toml_str(content: &str) -> Result<Self, ResourceError> {
        let table: Table = content
            .parse()
            .map_err(|e: toml::de::Error| ResourceError::configuration(e.to_string()))?;
        Self::from_table(&table)
    }

    pub fn push(&mut self, descriptor: ResourceDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn with(mut self, descriptor: ResourceDescriptor) -> Self {
        self.push(descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.descriptors.iter()
    }
}

impl FromIterator<ResourceDescriptor> for DescriptorSet {
    fn from_iter<I: IntoIterator<Item = ResourceDescriptor>>(iter: I) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DescriptorSet {
    type Item = ResourceDescriptor;
    type IntoIter = std::vec::IntoIter<ResourceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}

impl<'a> IntoIterator for &'a DescriptorSet {
    type Item = &'a ResourceDescriptor;
    type IntoIter = std::slice::Iter<'a, ResourceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

/// Where a freshly created instance starts out
///
/// Parsed once at load time so that bad values fail the load, not the first
/// instance request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    pub pos: Option<Point>,
    pub size: Option<Size>,
    pub align: Align,
    pub text: Option<String>,
    /// Parsed `action` for buttons; bound to a command table by the caller
    pub action: Option<ActionCall>,
}

impl Placement {
    pub fn from_descriptor(desc: &ResourceDescriptor) -> Result<Self, ResourceError> {
        Ok(Self {
            pos: desc.position()?,
            size: desc.size()?,
            align: desc.align()?.unwrap_or_default(),
            text: desc.string("text")?.map(str::to_string),
            action: match desc.string("action")? {
                Some(action) => parse_action(action)?,
                None => None,
            },
        })
    }
}

/// Read a TOML integer or float as f64
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// A two-number value: `[a, b]` or `{ first_key = a, second_key = b }`
fn number_pair(value: &Value, first_key: &str, second_key: &str) -> Option<(f64, f64)> {
    match value {
        Value::Array(a) if a.len() == 2 => Some((as_number(&a[0])?, as_number(&a[1])?)),
        Value::Table(t) => Some((
            t.get(first_key).and_then(as_number)?,
            t.get(second_key).and_then(as_number)?,
        )),
        _ => None,
    }
}

/// Round to whole pixels; `None` beyond [`MAX_COORDINATE`] or for NaN
pub(crate) fn to_px(value: f64) -> Option<i32> {
    let rounded = value.round();
    (rounded.abs() <= f64::from(MAX_COORDINATE)).then_some(rounded as i32)
}

fn parse_color(value: &Value) -> Option<Color> {
    match value {
        Value::Array(parts) if parts.len() == 3 => {
            let mut rgb = [0u8; 3];
            for (slot, part) in rgb.iter_mut().zip(parts) {
                let Value::Integer(c) = part else {
                    return None;
                };
                *slot = u8::try_from(*c).ok()?;
            }
            Some(Color::new(rgb[0], rgb[1], rgb[2]))
        }
        Value::String(hex) => {
            let hex = hex.strip_prefix('#')?;
            if hex.len() != 6 {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            Some(Color::new(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}
