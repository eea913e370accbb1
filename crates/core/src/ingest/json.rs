//! Reader for record lists serialized as JSON.
//!
//! ```json
//! [{"display_name": "abs", "entries": [{"qualified_name": "abs", "target": "#a", "signature_label": "(int)"}]}]
//! ```

use crate::error::Result;
use quicksearch_api::SymbolRecord;

pub fn parse_records(text: &str) -> Result<Vec<SymbolRecord>> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_json(records: &[SymbolRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
