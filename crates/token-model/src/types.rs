//! Tagged token node variants and wire (de)serialization
//!
//! The wire format marks a token leaf with `$value`/`$type` keys. Instead of
//! re-probing object shapes at every use site, the shape is decided once at
//! parse time and expressed as an explicit sum type: group nodes, single-value
//! tokens, multi-brand tokens, and composite leaves (text styles and other
//! structured `$value` payloads, kept opaque but round-trippable).

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A named group of child nodes, in document order.
pub type TokenGroup = IndexMap<String, TokenNode>;

/// Semantic type tag carried by every token leaf (`$type`).
///
/// Unknown tags are preserved verbatim so that documents using types this
/// editor does not understand still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Color value or color alias
    Color,
    /// Corner radius
    BorderRadius,
    /// Spacing / gap value
    Spacing,
    /// Font family name
    FontFamily,
    /// Font weight
    FontWeight,
    /// Font size
    FontSize,
    /// Line height
    LineHeight,
    /// Letter spacing
    LetterSpacing,
    /// Bare number
    Number,
    /// Composite text style
    Typography,
    /// Free-form string (wire tag `string`)
    Text,
    /// Any tag this editor does not model
    Other(String),
}

impl TokenType {
    /// The wire tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::BorderRadius => "borderRadius",
            TokenType::Spacing => "spacing",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::FontSize => "fontSize",
            TokenType::LineHeight => "lineHeight",
            TokenType::LetterSpacing => "letterSpacing",
            TokenType::Number => "number",
            TokenType::Typography => "typography",
            TokenType::Text => "string",
            TokenType::Other(tag) => tag,
        }
    }

    /// Parse a wire tag. Unknown tags become [`TokenType::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "color" => TokenType::Color,
            "borderRadius" => TokenType::BorderRadius,
            "spacing" => TokenType::Spacing,
            "fontFamily" => TokenType::FontFamily,
            "fontWeight" => TokenType::FontWeight,
            "fontSize" => TokenType::FontSize,
            "lineHeight" => TokenType::LineHeight,
            "letterSpacing" => TokenType::LetterSpacing,
            "number" => TokenType::Number,
            "typography" => TokenType::Typography,
            "string" => TokenType::Text,
            other => TokenType::Other(other.to_string()),
        }
    }

    /// Whether this is the `color` type.
    pub fn is_color(&self) -> bool {
        matches!(self, TokenType::Color)
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TokenType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(TokenType::from_tag(&tag))
    }
}

/// Extra leaf fields preserved through round trips (`$description`,
/// `$extensions`, and anything else alongside `$value`/`$type`).
pub type Extras = IndexMap<String, Value>;

/// A token holding one literal or alias string (`$value: "..."`).
#[derive(Debug, Clone, PartialEq)]
pub struct SingleToken {
    /// The stored value: hex color, length, font name, or `{alias}`
    pub value: String,
    /// Semantic type tag
    pub token_type: TokenType,
    /// Preserved sibling fields
    pub extras: Extras,
}

impl SingleToken {
    /// Create a token with no extra fields.
    pub fn new(value: impl Into<String>, token_type: TokenType) -> Self {
        Self { value: value.into(), token_type, extras: Extras::new() }
    }
}

/// A token holding one value per brand (`$value: { brand: "..." }`).
#[derive(Debug, Clone, PartialEq)]
pub struct MultiToken {
    /// Brand name to stored value, in document order
    pub values: IndexMap<String, String>,
    /// Semantic type tag
    pub token_type: TokenType,
    /// Preserved sibling fields
    pub extras: Extras,
}

impl MultiToken {
    /// Create a token with no extra fields.
    pub fn new(values: IndexMap<String, String>, token_type: TokenType) -> Self {
        Self { values, token_type, extras: Extras::new() }
    }

    /// The stored value for one brand.
    pub fn brand_value(&self, brand: &str) -> Option<&str> {
        self.values.get(brand).map(String::as_str)
    }
}

/// A leaf whose `$value` is neither a string nor a brand map (composite text
/// styles, bare numbers). Kept opaque so exports reproduce it byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeToken {
    /// The raw `$value` payload
    pub value: Value,
    /// Semantic type tag
    pub token_type: TokenType,
    /// Preserved sibling fields
    pub extras: Extras,
}

impl CompositeToken {
    /// Render the payload as a display literal, if it is scalar.
    ///
    /// Numbers are stringified; anything structured yields `None`.
    pub fn as_literal(&self) -> Option<String> {
        match &self.value {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// One node of the token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    /// Named group of children
    Group(TokenGroup),
    /// Single-value token
    Single(SingleToken),
    /// Multi-brand token
    Multi(MultiToken),
    /// Composite leaf (structured `$value`)
    Composite(CompositeToken),
    /// Anything that is not an object at all (tolerated, skipped by editors)
    Raw(Value),
}

impl TokenNode {
    /// An empty group node.
    pub fn empty_group() -> Self {
        TokenNode::Group(TokenGroup::new())
    }

    /// The group children, if this is a group.
    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            TokenNode::Group(children) => Some(children),
            _ => None,
        }
    }

    /// Mutable group children, if this is a group.
    pub fn as_group_mut(&mut self) -> Option<&mut TokenGroup> {
        match self {
            TokenNode::Group(children) => Some(children),
            _ => None,
        }
    }

    /// The single-value token, if this is one.
    pub fn as_single(&self) -> Option<&SingleToken> {
        match self {
            TokenNode::Single(token) => Some(token),
            _ => None,
        }
    }

    /// The multi-brand token, if this is one.
    pub fn as_multi(&self) -> Option<&MultiToken> {
        match self {
            TokenNode::Multi(token) => Some(token),
            _ => None,
        }
    }

    /// Whether this node is a token leaf of any kind.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            TokenNode::Single(_) | TokenNode::Multi(_) | TokenNode::Composite(_)
        )
    }

    /// The display literal stored at this leaf, if it has one.
    ///
    /// Single tokens yield their value; composite leaves yield their scalar
    /// rendering; groups and multi-brand tokens yield `None`.
    pub fn literal(&self) -> Option<String> {
        match self {
            TokenNode::Single(token) => Some(token.value.clone()),
            TokenNode::Composite(token) => token.as_literal(),
            _ => None,
        }
    }

    /// The type tag of this leaf, if it is one.
    pub fn token_type(&self) -> Option<&TokenType> {
        match self {
            TokenNode::Single(token) => Some(&token.token_type),
            TokenNode::Multi(token) => Some(&token.token_type),
            TokenNode::Composite(token) => Some(&token.token_type),
            _ => None,
        }
    }

    /// Build a node from a JSON value, deciding its shape once.
    ///
    /// An object carrying `$value` is a leaf; the `$value` shape selects the
    /// variant. Any other object is a group. Non-objects are kept raw.
    pub fn from_value(value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            other => return TokenNode::Raw(other),
        };

        if !map.contains_key("$value") {
            let mut children = TokenGroup::with_capacity(map.len());
            for (key, child) in map {
                children.insert(key, TokenNode::from_value(child));
            }
            return TokenNode::Group(children);
        }

        let mut token_value = Value::Null;
        let mut token_type = TokenType::Text;
        let mut extras = Extras::new();
        for (key, field) in map {
            match key.as_str() {
                "$value" => token_value = field,
                "$type" => {
                    if let Value::String(tag) = field {
                        token_type = TokenType::from_tag(&tag);
                    }
                }
                _ => {
                    extras.insert(key, field);
                }
            }
        }

        match token_value {
            Value::String(value) => {
                TokenNode::Single(SingleToken { value, token_type, extras })
            }
            Value::Object(entries) if is_brand_map(&entries) => {
                let mut values = IndexMap::with_capacity(entries.len());
                for (brand, entry) in entries {
                    if let Value::String(value) = entry {
                        values.insert(brand, value);
                    }
                }
                TokenNode::Multi(MultiToken { values, token_type, extras })
            }
            other => TokenNode::Composite(CompositeToken { value: other, token_type, extras }),
        }
    }

    /// Convert back to a JSON value in wire shape.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A `$value` object is a brand map when it is non-empty, has no `$`-prefixed
/// keys, and every entry is a string.
fn is_brand_map(entries: &serde_json::Map<String, Value>) -> bool {
    !entries.is_empty()
        && entries
            .iter()
            .all(|(key, value)| !key.starts_with('$') && value.is_string())
}

impl Serialize for TokenNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenNode::Group(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
            TokenNode::Single(token) => {
                serialize_leaf(serializer, &token.value, &token.token_type, &token.extras)
            }
            TokenNode::Multi(token) => {
                serialize_leaf(serializer, &token.values, &token.token_type, &token.extras)
            }
            TokenNode::Composite(token) => {
                serialize_leaf(serializer, &token.value, &token.token_type, &token.extras)
            }
            TokenNode::Raw(value) => value.serialize(serializer),
        }
    }
}

fn serialize_leaf<S: Serializer, V: Serialize>(
    serializer: S,
    value: &V,
    token_type: &TokenType,
    extras: &Extras,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(2 + extras.len()))?;
    map.serialize_entry("$value", value)?;
    map.serialize_entry("$type", token_type)?;
    for (key, field) in extras {
        map.serialize_entry(key, field)?;
    }
    map.end()
}

impl<'de> Deserialize<'de> for TokenNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(TokenNode::from_value(value))
    }
}
