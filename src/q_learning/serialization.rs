//! Stored form of the Q-table.
//!
//! The model is a JSON object mapping decimal state indices to value vectors
//! in [`Action::ALL`](crate::types::Action::ALL) order:
//!
//! ```text
//! {"0":[0.0,0.0,0.0,0.0],"1":[-0.5,1.2,0.0,3.1], ...}
//! ```

use std::collections::BTreeMap;

use crate::{
    Error, Result,
    q_learning::q_table::QTable,
    types::{NUM_ACTIONS, STATE_SPACE_SIZE, StateIndex},
};

/// Key under which the model is stored.
pub const MODEL_KEY: &str = "QModel";

/// Serialize every Q-value row of `table`.
pub fn encode_model(table: &QTable) -> Result<String> {
    let model: BTreeMap<String, [f64; NUM_ACTIONS]> = table
        .rows()
        .map(|(state, values)| (state.to_string(), *values))
        .collect();
    Ok(serde_json::to_string(&model)?)
}

/// Parse a stored model into dense rows.
///
/// Indices absent from the object stay zero. Non-numeric or out-of-range
/// keys, and vectors of the wrong length, are rejected.
pub fn decode_model(text: &str) -> Result<Vec<[f64; NUM_ACTIONS]>> {
    let model: BTreeMap<String, Vec<f64>> =
        serde_json::from_str(text).map_err(|e| Error::InvalidModel {
            reason: e.to_string(),
        })?;

    let mut rows = vec![[0.0; NUM_ACTIONS]; STATE_SPACE_SIZE];
    for (key, values) in model {
        let raw: usize = key.parse().map_err(|_| Error::InvalidModel {
            reason: format!("state key '{key}' is not a non-negative integer"),
        })?;
        let state = StateIndex::new(raw).map_err(|e| Error::InvalidModel {
            reason: e.to_string(),
        })?;
        let row: [f64; NUM_ACTIONS] =
            values
                .as_slice()
                .try_into()
                .map_err(|_| Error::InvalidModel {
                    reason: format!(
                        "state {key} has {} values, expected {NUM_ACTIONS}",
                        values.len()
                    ),
                })?;
        rows[state.get()] = row;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Action;

    #[test]
    fn test_encoded_model_has_every_state() {
        let table = QTable::new(40.0, 0.7);
        let text = encode_model(&table).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let object = parsed.as_object().unwrap();
        assert_eq!(object.len(), STATE_SPACE_SIZE);
        assert_eq!(object["431"], serde_json::json!([0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_decode_preserves_values() {
        let mut table = QTable::new(40.0, 0.7);
        let s = StateIndex::new(17).unwrap();
        table.set(s, Action::Right, -3.25);
        table.set(s, Action::Up, 0.125);

        let rows = decode_model(&encode_model(&table).unwrap()).unwrap();
        assert_eq!(rows[17], [0.125, 0.0, 0.0, -3.25]);
    }

    #[test]
    fn test_sparse_model_fills_zeros() {
        let rows = decode_model(r#"{"5":[1.0,2.0,3.0,4.0]}"#).unwrap();
        assert_eq!(rows.len(), STATE_SPACE_SIZE);
        assert_eq!(rows[5], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(rows[6], [0.0; NUM_ACTIONS]);
    }

    #[test]
    fn test_rejects_malformed_models() {
        for text in [
            "not json",
            r#"{"abc":[0,0,0,0]}"#,
            r#"{"432":[0,0,0,0]}"#,
            r#"{"-1":[0,0,0,0]}"#,
            r#"{"3":[0,0,0]}"#,
            r#"[1,2,3]"#,
        ] {
            assert!(
                matches!(decode_model(text), Err(Error::InvalidModel { .. })),
                "expected rejection of {text}"
            );
        }
    }
}
