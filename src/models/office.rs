//! Office location model matching the frontend office record shape.

use serde::{Deserialize, Serialize};

/// Contact details attached to an office.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfficeDetail {
    pub fullname: String,
    pub job: String,
    pub email: String,
    pub phone: String,
}

/// A single office location record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfficeRecord {
    /// Opaque identifier, assigned by the store and never changed afterwards
    pub id: String,
    pub title: String,
    pub address: String,
    pub detail: OfficeDetail,
}

impl OfficeRecord {
    /// Build a record with the given id from a request body.
    pub fn from_body(id: String, body: OfficeBody) -> Self {
        Self {
            id,
            title: body.title,
            address: body.address,
            detail: OfficeDetail {
                fullname: body.fullname,
                job: body.job,
                email: body.email,
                phone: body.phone,
            },
        }
    }

    /// Overwrite every field except the id.
    pub fn apply(&mut self, body: OfficeBody) {
        self.title = body.title;
        self.address = body.address;
        self.detail = OfficeDetail {
            fullname: body.fullname,
            job: body.job,
            email: body.email,
            phone: body.phone,
        };
    }

    /// Flatten the record back into the request body shape (used to prefill edits).
    pub fn to_body(&self) -> OfficeBody {
        OfficeBody {
            title: self.title.clone(),
            address: self.address.clone(),
            fullname: self.detail.fullname.clone(),
            job: self.detail.job.clone(),
            email: self.detail.email.clone(),
            phone: self.detail.phone.clone(),
        }
    }
}

/// Request body for creating or updating an office.
///
/// Missing keys deserialize as empty strings so that presence checks
/// report them as validation failures instead of JSON errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfficeBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl OfficeBody {
    /// Names of the fields that are empty or whitespace-only, in display order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("address", &self.address),
            ("fullname", &self.fullname),
            ("job", &self.job),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
