//! Field layout of a serializable value
//!
//! [`Shape::of`] drives a value through serde and keeps only its layout:
//! struct field names in declaration order (fields skipped with
//! `skip_serializing_if` included), plus the layout of nested structs and
//! lists. Validator reports errors under Rust field names, so lookups ignore
//! case, `_` and `-` to line them up with renamed keys.

use serde::Serialize;
use serde::ser;

static LEAF: Shape = Shape::Leaf;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape {
    Leaf,
    Struct(Vec<(String, Shape)>),
    Seq(Vec<Shape>),
}

impl Shape {
    pub(crate) fn of<T>(value: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(ShapeSerializer)
    }

    /// Declaration index of `field`, when this is a struct that has it
    pub(crate) fn position(&self, field: &str) -> Option<usize> {
        let Shape::Struct(fields) = self else {
            return None;
        };
        fields
            .iter()
            .position(|(key, _)| key == field)
            .or_else(|| fields.iter().position(|(key, _)| same_field(key, field)))
    }

    pub(crate) fn field(&self, field: &str) -> &Shape {
        match (self, self.position(field)) {
            (Shape::Struct(fields), Some(index)) => &fields[index].1,
            _ => &LEAF,
        }
    }

    pub(crate) fn item(&self, index: usize) -> &Shape {
        match self {
            Shape::Seq(items) => items.get(index).unwrap_or(&LEAF),
            _ => &LEAF,
        }
    }
}

// `userName` and `user-name` both name the `user_name` field.
fn same_field(key: &str, field: &str) -> bool {
    fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
        name.chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .flat_map(char::to_lowercase)
    }
    folded(key).eq(folded(field))
}

// =============================================================================
// Serializer
// =============================================================================

struct ShapeSerializer;

macro_rules! leaf {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, _: $ty) -> Result<Shape, Self::Error> {
                Ok(Shape::Leaf)
            }
        )*
    };
}

impl ser::Serializer for ShapeSerializer {
    type Ok = Shape;
    type Error = serde_json::Error;
    type SerializeSeq = SeqShape;
    type SerializeTuple = SeqShape;
    type SerializeTupleStruct = SeqShape;
    type SerializeTupleVariant = SeqShape;
    type SerializeMap = StructShape;
    type SerializeStruct = StructShape;
    type SerializeStructVariant = StructShape;

    leaf! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_unit_struct(&'static str),
    }

    fn serialize_none(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Leaf)
    }

    fn serialize_unit(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Leaf)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Shape, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Shape, Self::Error> {
        Ok(Shape::Leaf)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Shape, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<Shape, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqShape, Self::Error> {
        Ok(SeqShape::with_capacity(len.unwrap_or_default()))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqShape, Self::Error> {
        Ok(SeqShape::with_capacity(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqShape, Self::Error> {
        Ok(SeqShape::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<SeqShape, Self::Error> {
        Ok(SeqShape::with_capacity(len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<StructShape, Self::Error> {
        Ok(StructShape::with_capacity(len.unwrap_or_default()))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<StructShape, Self::Error> {
        Ok(StructShape::with_capacity(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<StructShape, Self::Error> {
        Ok(StructShape::with_capacity(len))
    }
}

struct SeqShape {
    items: Vec<Shape>,
}

impl SeqShape {
    fn with_capacity(len: usize) -> Self {
        Self {
            items: Vec::with_capacity(len),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        self.items.push(value.serialize(ShapeSerializer)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqShape {
    type Ok = Shape;
    type Error = serde_json::Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Seq(self.items))
    }
}

impl ser::SerializeTuple for SeqShape {
    type Ok = Shape;
    type Error = serde_json::Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Seq(self.items))
    }
}

impl ser::SerializeTupleStruct for SeqShape {
    type Ok = Shape;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Seq(self.items))
    }
}

impl ser::SerializeTupleVariant for SeqShape {
    type Ok = Shape;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Seq(self.items))
    }
}

struct StructShape {
    fields: Vec<(String, Shape)>,
    pending_key: Option<String>,
}

impl StructShape {
    fn with_capacity(len: usize) -> Self {
        Self {
            fields: Vec::with_capacity(len),
            pending_key: None,
        }
    }

    fn push<T>(&mut self, key: String, value: &T) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        self.fields.push((key, value.serialize(ShapeSerializer)?));
        Ok(())
    }
}

// Map keys come from `#[serde(flatten)]` fields as well as real maps.
impl ser::SerializeMap for StructShape {
    type Ok = Shape;
    type Error = serde_json::Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let key = match serde_json::to_value(key)? {
            serde_json::Value::String(key) => key,
            other => other.to_string(),
        };
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let key = self.pending_key.take().unwrap_or_default();
        self.push(key, value)
    }

    fn end(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Struct(self.fields))
    }
}

impl ser::SerializeStruct for StructShape {
    type Ok = Shape;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(key.to_string(), value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), Self::Error> {
        self.fields.push((key.to_string(), Shape::Leaf));
        Ok(())
    }

    fn end(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Struct(self.fields))
    }
}

impl ser::SerializeStructVariant for StructShape {
    type Ok = Shape;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(key.to_string(), value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), Self::Error> {
        self.fields.push((key.to_string(), Shape::Leaf));
        Ok(())
    }

    fn end(self) -> Result<Shape, Self::Error> {
        Ok(Shape::Struct(self.fields))
    }
}
