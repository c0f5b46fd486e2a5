// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use chrono::{DateTime, Utc};
use ledgerd_core::Metadata;
use prost_types::value::Kind as PKind;
use prost_types::{ListValue, Struct, Timestamp, Value as PValue};
use serde_json::{Map, Number, Value};
use tonic::Status;

pub fn timestamp_to_datetime(ts: &Timestamp) -> Result<DateTime<Utc>, Status> {
	DateTime::from_timestamp(ts.seconds, ts.nanos.max(0) as u32)
		.ok_or_else(|| Status::invalid_argument("malformed timestamp"))
}

pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> Timestamp {
	Timestamp { seconds: dt.timestamp(), nanos: dt.timestamp_subsec_nanos() as i32 }
}

pub fn struct_to_metadata(input: Option<Struct>) -> Metadata {
	let Some(input) = input else {
		return Metadata::empty();
	};
	let mut map = Map::new();
	for (key, value) in input.fields {
		map.insert(key, value_to_json(value));
	}
	Metadata::new(map)
}

pub fn metadata_to_struct(metadata: &Metadata) -> Struct {
	let mut fields = std::collections::BTreeMap::new();
	for (key, value) in metadata.as_map() {
		fields.insert(key.clone(), json_to_value(value));
	}
	Struct { fields: fields.into_iter().collect() }
}

fn value_to_json(value: PValue) -> Value {
	match value.kind {
		None | Some(PKind::NullValue(_)) => Value::Null,
		Some(PKind::NumberValue(n)) => Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null),
		Some(PKind::StringValue(s)) => Value::String(s),
		Some(PKind::BoolValue(b)) => Value::Bool(b),
		Some(PKind::StructValue(s)) => {
			Value::Object(s.fields.into_iter().map(|(k, v)| (k, value_to_json(v))).collect())
		}
		Some(PKind::ListValue(list)) => {
			Value::Array(list.values.into_iter().map(value_to_json).collect())
		}
	}
}

fn json_to_value(value: &Value) -> PValue {
	let kind = match value {
		Value::Null => PKind::NullValue(0),
		Value::Bool(b) => PKind::BoolValue(*b),
		Value::Number(n) => PKind::NumberValue(n.as_f64().unwrap_or(0.0)),
		Value::String(s) => PKind::StringValue(s.clone()),
		Value::Array(items) => {
			PKind::ListValue(ListValue { values: items.iter().map(json_to_value).collect() })
		}
		Value::Object(map) => PKind::StructValue(Struct {
			fields: map.iter().map(|(k, v)| (k.clone(), json_to_value(v))).collect(),
		}),
	};
	PValue { kind: Some(kind) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn timestamp_round_trips() {
		let dt = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z").unwrap().with_timezone(&Utc);
		let ts = datetime_to_timestamp(dt);
		assert_eq!(timestamp_to_datetime(&ts).unwrap(), dt);
	}

	#[test]
	fn struct_round_trips_scalar_fields() {
		let mut map = Map::new();
		map.insert("note".to_string(), Value::String("payroll".to_string()));
		map.insert("retries".to_string(), Value::Number(3.into()));
		let metadata = Metadata::new(map);

		let proto_struct = metadata_to_struct(&metadata);
		let round_tripped = struct_to_metadata(Some(proto_struct));
		assert_eq!(round_tripped.as_map().get("note").unwrap(), "payroll");
	}
}
