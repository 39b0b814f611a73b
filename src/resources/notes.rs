//! Notes attached to ResMan records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::connector::{ApiResponse, HttpClient, RequestOptions, ResManConnector, decode, normalize};
use crate::time::Sleeper;

/// A note to attach to a record of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub property_id: String,
    /// Kind of record the note belongs to.
    #[serde(rename = "type")]
    pub note_type: String,
    /// Id of the record the note belongs to.
    pub record_id: String,
    pub note: String,
}

/// Body returned after adding a note.
///
/// The API documents no fixed shape here; known fields are typed and the
/// rest is kept in `extra`. An empty body yields the default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    #[serde(default)]
    pub note_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/Notes` endpoint.
#[derive(Debug)]
pub struct Notes<'a, H, S> {
    connector: &'a ResManConnector<H, S>,
}

impl<'a, H, S> Notes<'a, H, S> {
    #[must_use]
    pub const fn new(connector: &'a ResManConnector<H, S>) -> Self {
        Self { connector }
    }
}

impl<H: HttpClient, S: Sleeper> Notes<'_, H, S> {
    /// Adds a note (POST `/Notes`).
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the API rejects the
    /// note or no response arrives.
    pub async fn add_note(&self, note: &NewNote) -> ApiResponse<NoteResponse> {
        let payload = self
            .connector
            .post("/Notes", note, RequestOptions::new())
            .await?;
        if payload.is_null() {
            return Ok(NoteResponse::default());
        }
        normalize(decode(payload))
    }
}
