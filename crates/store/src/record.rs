//! Certificate record model.
//!
//! The record is an explicit structure with named optional fields rather than
//! an open-ended map, so partial updates can never silently drop fields the
//! caller did not mention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// A stored quality certificate.
///
/// Two fields carry invariants the registry depends on:
///
/// - `folio` has the shape `"<PREFIX>-<integer>"` and is unique across the
///   collection (enforced by the registry's pre-insert check, not by the
///   store itself).
/// - `item` values are monotonically non-decreasing in insertion order.
///
/// Everything else is descriptive detail owned by the quality department.
///
/// # Example
///
/// ```
/// use certiq_store::{Certificate, RecordId};
///
/// let record = Certificate::builder()
///     .id(RecordId::from(1))
///     .folio("CFC-1")
///     .item(1)
///     .customer("ACME Tooling")
///     .build();
///
/// assert_eq!(record.folio, "CFC-1");
/// assert!(record.status.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(deny_unknown_fields)]
pub struct Certificate {
    /// Storage-assigned insertion id.
    #[builder(into)]
    pub id: RecordId,

    /// Human-readable business identifier, `"<PREFIX>-<integer>"`.
    #[builder(into)]
    pub folio: String,

    /// Sequential item number.
    pub item: u64,

    /// Workflow status of the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub status: Option<String>,

    /// Issue date as recorded by the quality department.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub issued_on: Option<String>,

    /// Internal production-order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub internal_order: Option<String>,

    /// Size of the inspected lot.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub lot_size: Option<String>,

    /// Customer the certificate is issued to.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub customer: Option<String>,

    /// Free-text description of the certified part.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub description: Option<String>,

    /// Part number of the certified part.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub part_number: Option<String>,

    /// Specification or report the inspection was performed against.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub report_spec: Option<String>,

    /// Outcome of the attribute review.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub attribute_review: Option<String>,

    /// Outcome of the dimensional inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub dimensional_result: Option<String>,

    /// Notes accompanying the inspection results.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub result_notes: Option<String>,

    /// Measuring equipment used during inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub measuring_equipment: Option<String>,

    /// External reference (order, drawing, or shipment).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub reference: Option<String>,

    /// Inspector who performed the certification.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub inspector: Option<String>,

    /// Contact email for the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub email: Option<String>,

    /// When the record was inserted.
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new certificate.
///
/// Identical to [`Certificate`] minus the storage-assigned fields (`id`,
/// `created_at`), which the store fills in on insert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(deny_unknown_fields)]
pub struct CertificateDraft {
    /// Human-readable business identifier the client obtained up front.
    #[builder(into)]
    pub folio: String,
    /// Sequential item number the client obtained up front.
    pub item: u64,
    /// Workflow status of the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub status: Option<String>,
    /// Issue date as recorded by the quality department.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub issued_on: Option<String>,
    /// Internal production-order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub internal_order: Option<String>,
    /// Size of the inspected lot.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub lot_size: Option<String>,
    /// Customer the certificate is issued to.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub customer: Option<String>,
    /// Free-text description of the certified part.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub description: Option<String>,
    /// Part number of the certified part.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub part_number: Option<String>,
    /// Specification or report the inspection was performed against.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub report_spec: Option<String>,
    /// Outcome of the attribute review.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub attribute_review: Option<String>,
    /// Outcome of the dimensional inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub dimensional_result: Option<String>,
    /// Notes accompanying the inspection results.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub result_notes: Option<String>,
    /// Measuring equipment used during inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub measuring_equipment: Option<String>,
    /// External reference (order, drawing, or shipment).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub reference: Option<String>,
    /// Inspector who performed the certification.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub inspector: Option<String>,
    /// Contact email for the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub email: Option<String>,
}

impl CertificateDraft {
    /// Promote the draft to a stored record with the given storage-assigned
    /// fields.
    #[must_use]
    pub fn into_record(self, id: RecordId, created_at: DateTime<Utc>) -> Certificate {
        Certificate {
            id,
            folio: self.folio,
            item: self.item,
            status: self.status,
            issued_on: self.issued_on,
            internal_order: self.internal_order,
            lot_size: self.lot_size,
            customer: self.customer,
            description: self.description,
            part_number: self.part_number,
            report_spec: self.report_spec,
            attribute_review: self.attribute_review,
            dimensional_result: self.dimensional_result,
            result_notes: self.result_notes,
            measuring_equipment: self.measuring_equipment,
            reference: self.reference,
            inspector: self.inspector,
            email: self.email,
            created_at,
        }
    }
}

/// Partial update of a certificate's detail fields.
///
/// `Some` overwrites the stored value; `None` leaves it unchanged. The
/// identifier fields (`folio`, `item`) and `status` are deliberately absent —
/// identifiers are immutable after insert and status has its own operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(deny_unknown_fields)]
pub struct CertificateUpdate {
    /// Issue date as recorded by the quality department.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub issued_on: Option<String>,
    /// Internal production-order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub internal_order: Option<String>,
    /// Size of the inspected lot.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub lot_size: Option<String>,
    /// Customer the certificate is issued to.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub customer: Option<String>,
    /// Free-text description of the certified part.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub description: Option<String>,
    /// Part number of the certified part.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub part_number: Option<String>,
    /// Specification or report the inspection was performed against.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub report_spec: Option<String>,
    /// Outcome of the attribute review.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub attribute_review: Option<String>,
    /// Outcome of the dimensional inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub dimensional_result: Option<String>,
    /// Notes accompanying the inspection results.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub result_notes: Option<String>,
    /// Measuring equipment used during inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub measuring_equipment: Option<String>,
    /// External reference (order, drawing, or shipment).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub reference: Option<String>,
    /// Inspector who performed the certification.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub inspector: Option<String>,
    /// Contact email for the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub email: Option<String>,
}

/// Overwrite `$record.$field` for every update field that is `Some`.
macro_rules! apply_some {
    ($update:expr, $record:expr, { $($field:ident),+ $(,)? }) => {
        $(
            if let Some(value) = &$update.$field {
                $record.$field = Some(value.clone());
            }
        )+
    };
}

impl CertificateUpdate {
    /// Apply this update to a stored record.
    ///
    /// Only fields present in the update are touched.
    pub fn apply_to(&self, record: &mut Certificate) {
        apply_some!(self, record, {
            issued_on,
            internal_order,
            lot_size,
            customer,
            description,
            part_number,
            report_spec,
            attribute_review,
            dimensional_result,
            result_notes,
            measuring_equipment,
            reference,
            inspector,
            email,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn record() -> Certificate {
        Certificate::builder()
            .id(RecordId::from(1))
            .folio("CFC-1")
            .item(1)
            .customer("ACME Tooling")
            .inspector("R. Mata")
            .build()
    }

    #[test]
    fn test_builder_minimal() {
        let record = Certificate::builder().id(RecordId::from(5)).folio("CFC-5").item(5).build();

        assert_eq!(record.id, RecordId::from(5));
        assert_eq!(record.folio, "CFC-5");
        assert_eq!(record.item, 5);
        assert!(record.status.is_none());
        assert!(record.customer.is_none());
    }

    #[test]
    fn test_draft_into_record_preserves_fields() {
        let draft = CertificateDraft::builder()
            .folio("CFC-3")
            .item(3)
            .status("released")
            .part_number("PN-1040")
            .build();
        let now = Utc::now();

        let record = draft.into_record(RecordId::from(3), now);

        assert_eq!(record.id, RecordId::from(3));
        assert_eq!(record.folio, "CFC-3");
        assert_eq!(record.item, 3);
        assert_eq!(record.status.as_deref(), Some("released"));
        assert_eq!(record.part_number.as_deref(), Some("PN-1040"));
        assert_eq!(record.created_at, now);
    }

    #[test]
    fn test_update_overwrites_only_present_fields() {
        let mut record = record();
        let update = CertificateUpdate::builder()
            .customer("New Customer SA")
            .description("bracket, rev C")
            .build();

        update.apply_to(&mut record);

        assert_eq!(record.customer.as_deref(), Some("New Customer SA"));
        assert_eq!(record.description.as_deref(), Some("bracket, rev C"));
        // Untouched fields keep their stored values.
        assert_eq!(record.inspector.as_deref(), Some("R. Mata"));
        assert_eq!(record.folio, "CFC-1");
    }

    #[test]
    fn test_empty_update_is_a_no_op() {
        let mut record = record();
        let before = record.clone();

        CertificateUpdate::default().apply_to(&mut record);

        assert_eq!(record, before);
    }

    #[test]
    fn test_serialization_round_trip() {
        let record = record();

        let json = serde_json::to_string(&record).expect("serialize");
        let back: Certificate = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(record, back);
    }

    #[test]
    fn test_none_fields_are_omitted_from_json() {
        let record = record();
        let json = serde_json::to_string(&record).expect("serialize");

        assert!(json.contains("\"customer\":"));
        assert!(!json.contains("\"email\":"), "unset optional fields must not serialize");
        assert!(!json.contains("\"status\":"));
    }

    #[test]
    fn test_deserialize_from_known_json() {
        let json = r#"{
            "id": 9,
            "folio": "CFC-9",
            "item": 9,
            "customer": "ACME Tooling",
            "created_at": "2024-03-01T08:30:00Z"
        }"#;

        let record: Certificate = serde_json::from_str(json).expect("deserialize");

        assert_eq!(record.id, RecordId::from(9));
        assert_eq!(record.folio, "CFC-9");
        assert_eq!(record.customer.as_deref(), Some("ACME Tooling"));
        assert!(record.lot_size.is_none());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let json = r#"{"folio": "CFC-1", "item": 1, "surprise": true}"#;
        let result: Result<CertificateDraft, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
