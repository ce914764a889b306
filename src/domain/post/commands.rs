use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::services::response::{FieldErrors, ServiceError};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Validate)]
pub struct CreatePost {
	#[validate(length(min = 1, message = "String must contain at least 1 character(s)"))]
	pub content: String,
}

impl CreatePost {
	pub fn new(content: impl Into<String>) -> Self {
		Self { content: content.into() }
	}
}

/// Shape check for a raw request body. The length constraint is left to `validate`.
impl TryFrom<Value> for CreatePost {
	type Error = ServiceError;
	fn try_from(value: Value) -> Result<Self, Self::Error> {
		let mut fields = match value {
			Value::Object(fields) => fields,
			other => return Err(FieldErrors::single("input", format!("Expected object, received {}", type_name(&other))).into()),
		};
		match fields.remove("content") {
			Some(Value::String(content)) => Ok(Self { content }),
			None | Some(Value::Null) => Err(FieldErrors::single("content", "Required").into()),
			Some(other) => Err(FieldErrors::single("content", format!("Expected string, received {}", type_name(&other))).into()),
		}
	}
}

fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
