use serde::{Deserialize, Serialize};

/// A persisted customer record; identity is assigned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub email: String,
}

/// Candidate record as submitted by a caller; no identity yet. Missing JSON
/// fields deserialize to empty strings so the validator reports them as
/// required-field failures rather than the codec rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dni: String,
    #[serde(default)]
    pub email: String,
}
