//! The inbound signup form and its mapping to the Mailchimp upsert payload.

use serde::Deserialize;
use serde_json::Value;

use crate::mailchimp_client::{ContactUpsertPayload, MergeFields};

/// New members get subscribed, existing members keep their status.
pub const STATUS_IF_NEW: &str = "subscribed";

/// The signup form as the website posts it. Every field is optional at this point,
/// `email` gets checked by the handler.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    // The deployed form sends the misspelled key.
    #[serde(alias = "brouchureDownload")]
    pub brochure_download: Option<String>,
    pub contact_method: Option<String>,
    pub interested_venue: Option<String>,
}

impl SignupRequest {
    /// An empty body, or any JSON value that isn't an object, is the same as `{}`.
    /// Fails on invalid JSON or on fields that aren't strings.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(body)? {
            object @ Value::Object(_) => serde_json::from_value(object),
            _ => Ok(Self::default()),
        }
    }

    /// The email, if present and not empty.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    /// Builds the upsert payload for `email`.
    pub fn upsert_payload<'a>(&'a self, email: &'a str) -> ContactUpsertPayload<'a> {
        let field = |val: &'a Option<String>| val.as_deref().unwrap_or_default();

        ContactUpsertPayload {
            email_address: email,
            status_if_new: STATUS_IF_NEW,
            merge_fields: MergeFields {
                fname: field(&self.first_name),
                lname: field(&self.last_name),
                phone: field(&self.phone),
                mmerge5: field(&self.brochure_download),
                mmerge6: field(&self.contact_method),
                mmerge7: field(&self.interested_venue),
            },
        }
    }
}
