// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Declarative validation of the fields of a JSON request body.
//!
//! APIs receive their body as a raw `serde_json::Value` and declare the type of each field they
//! expect via a `FieldValidator`.  The validator checks every field (not just the first invalid
//! one) so that the client gets a complete report in a single round trip.

use crate::rest::{RestError, RestResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message attached to every field that fails validation.
const INVALID_VALUE: &str = "Invalid value";

/// Description of a field that failed validation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldError {
    /// Kind of the failing entity.  Always `field`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Raw value that failed validation, if the field was present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Human-readable explanation of the failure.
    pub msg: String,

    /// Name of the failing field.
    pub path: String,

    /// Part of the request where the field was looked up.  Always `body`.
    pub location: String,
}

impl FieldError {
    /// Creates an error for the field `path` holding the invalid `value`.
    pub fn invalid<P: Into<String>>(path: P, value: Option<&Value>) -> Self {
        Self {
            kind: "field".to_owned(),
            value: value.cloned(),
            msg: INVALID_VALUE.to_owned(),
            path: path.into(),
            location: "body".to_owned(),
        }
    }
}

/// Types that can be extracted from the raw JSON value of a field.
pub trait FieldValue: Sized {
    /// Converts `value` into `Self`, or returns `None` if it does not have the right type.
    fn from_json(value: &Value) -> Option<Self>;
}

impl FieldValue for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

/// Booleans are accepted as JSON booleans or as the strings `true`, `false`, `1` and `0`.
impl FieldValue for bool {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Integers are accepted as JSON integers or as strings holding a decimal integer.
impl FieldValue for i64 {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse::<i64>().ok(),
            _ => None,
        }
    }
}

impl FieldValue for i32 {
    fn from_json(value: &Value) -> Option<Self> {
        i64::from_json(value).and_then(|i| i32::try_from(i).ok())
    }
}

/// Collects the typed fields of a JSON object and the errors found while doing so.
pub struct FieldValidator<'a> {
    /// The request body being validated.
    object: &'a Map<String, Value>,

    /// Errors found so far, in the order in which fields were checked.
    errors: Vec<FieldError>,
}

impl<'a> FieldValidator<'a> {
    /// Prepares to validate the fields of `body`, which must be a JSON object.
    pub fn new(body: &'a Value) -> RestResult<Self> {
        match body.as_object() {
            Some(object) => Ok(Self { object, errors: vec![] }),
            None => Err(RestError::InvalidRequest("Request body must be a JSON object".to_owned())),
        }
    }

    /// Extracts the mandatory field `path`.
    ///
    /// Returns `None` and records an error if the field is missing, null or has the wrong type.
    /// Callers can rely on `finish` failing whenever this returned `None`.
    pub fn required<T: FieldValue>(&mut self, path: &str) -> Option<T> {
        let value = self.object.get(path);
        match value.and_then(T::from_json) {
            Some(field) => Some(field),
            None => {
                self.errors.push(FieldError::invalid(path, value));
                None
            }
        }
    }

    /// Extracts the optional field `path`.
    ///
    /// A missing or null field yields `None` without error.  A present field with the wrong type
    /// yields `None` and records an error.
    pub fn optional<T: FieldValue>(&mut self, path: &str) -> Option<T> {
        match self.object.get(path) {
            None | Some(Value::Null) => None,
            Some(value) => {
                let field = T::from_json(value);
                if field.is_none() {
                    self.errors.push(FieldError::invalid(path, Some(value)));
                }
                field
            }
        }
    }

    /// Finishes validation, failing if any field was invalid.
    pub fn finish(self) -> RestResult<()> {
        if self.errors.is_empty() { Ok(()) } else { Err(RestError::InvalidFields(self.errors)) }
    }
}
