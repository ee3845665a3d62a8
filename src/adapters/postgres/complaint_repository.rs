//! PostgreSQL implementation of ComplaintMaterializer.
//!
//! Persists finished complaints to the `complaints` table. Transactions are
//! stored as a JSONB array in collection order.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::complaint::{Complaint, ComplaintRecord, ComplaintStatus, Transaction};
use crate::domain::foundation::{ComplaintId, DomainError, ErrorCode, Identity, Timestamp};
use crate::ports::{ComplaintMaterializer, MaterializeError};

/// PostgreSQL complaint repository.
#[derive(Clone)]
pub struct PostgresComplaintRepository {
    pool: PgPool,
}

impl PostgresComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a complaint under a freshly generated id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    pub async fn insert(&self, complaint: &Complaint) -> Result<ComplaintId, DomainError> {
        let id = ComplaintId::new();

        sqlx::query(
            r#"
            INSERT INTO complaints (
                id, phone_number, name, mobile_no, dob, father_name,
                district, pin_code, transactions, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(id.as_uuid())
        .bind(complaint.identity.as_str())
        .bind(&complaint.name)
        .bind(&complaint.mobile_no)
        .bind(&complaint.dob)
        .bind(&complaint.father_name)
        .bind(&complaint.district)
        .bind(&complaint.pin_code)
        .bind(Json(&complaint.transactions))
        .bind(ComplaintStatus::Pending.as_str())
        .bind(complaint.submitted_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert complaint: {}", e),
            )
        })?;

        Ok(id)
    }

    /// Reads a complaint back by id.
    ///
    /// Returns `None` if not found.
    pub async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<ComplaintRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, phone_number, name, mobile_no, dob, father_name,
                   district, pin_code, transactions, status, created_at
            FROM complaints
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch complaint: {}", e),
            )
        })?;

        row.map(row_to_record).transpose()
    }
}

#[async_trait]
impl ComplaintMaterializer for PostgresComplaintRepository {
    async fn materialize(&self, complaint: &Complaint) -> Result<ComplaintId, MaterializeError> {
        Ok(self.insert(complaint).await?)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn row_to_record(row: sqlx::postgres::PgRow) -> Result<ComplaintRecord, DomainError> {
    let Json(transactions): Json<Vec<Transaction>> = column(&row, "transactions")?;

    ComplaintRow {
        id: column(&row, "id")?,
        phone_number: column(&row, "phone_number")?,
        name: column(&row, "name")?,
        mobile_no: column(&row, "mobile_no")?,
        dob: column(&row, "dob")?,
        father_name: column(&row, "father_name")?,
        district: column(&row, "district")?,
        pin_code: column(&row, "pin_code")?,
        transactions,
        status: column(&row, "status")?,
        created_at: column(&row, "created_at")?,
    }
    .into_record()
}

/// Decoded columns of one `complaints` row.
#[derive(Debug, Clone)]
struct ComplaintRow {
    id: uuid::Uuid,
    phone_number: String,
    name: String,
    mobile_no: String,
    dob: String,
    father_name: String,
    district: String,
    pin_code: String,
    transactions: Vec<Transaction>,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl ComplaintRow {
    fn into_record(self) -> Result<ComplaintRecord, DomainError> {
        let id = ComplaintId::from_uuid(self.id);
        let invalid = |column: &str, reason: String| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid {}: {}", column, reason),
            )
            .with_detail("complaint_id", id.to_string())
        };

        let identity =
            Identity::new(self.phone_number).map_err(|e| invalid("phone_number", e.to_string()))?;
        let status = self
            .status
            .parse::<ComplaintStatus>()
            .map_err(|e| invalid("status", e.to_string()))?;

        Ok(ComplaintRecord {
            id,
            status,
            complaint: Complaint {
                identity,
                name: self.name,
                mobile_no: self.mobile_no,
                dob: self.dob,
                father_name: self.father_name,
                district: self.district,
                pin_code: self.pin_code,
                transactions: self.transactions,
                submitted_at: Timestamp::from_datetime(self.created_at),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::complaint::test_support::sample_complaint;

    #[test]
    fn transactions_column_keeps_field_names() {
        let complaint = sample_complaint();
        let json = serde_json::to_value(&complaint.transactions).unwrap();
        assert_eq!(json[0]["account_no"], "123456789012");
        assert_eq!(json[0]["transaction_id"], "TXN1234567890");

        let back: Vec<Transaction> = serde_json::from_value(json).unwrap();
        assert_eq!(back, complaint.transactions);
    }

    fn stored_row() -> ComplaintRow {
        let complaint = sample_complaint();
        ComplaintRow {
            id: uuid::Uuid::new_v4(),
            phone_number: complaint.identity.as_str().to_string(),
            name: complaint.name.clone(),
            mobile_no: complaint.mobile_no.clone(),
            dob: complaint.dob.clone(),
            father_name: complaint.father_name.clone(),
            district: complaint.district.clone(),
            pin_code: complaint.pin_code.clone(),
            transactions: complaint.transactions.clone(),
            status: "Pending".to_string(),
            created_at: *complaint.submitted_at.as_datetime(),
        }
    }

    mod row_mapping {
        use super::*;

        #[test]
        fn stored_row_becomes_record() {
            let row = stored_row();
            let id = row.id;

            let record = row.into_record().unwrap();

            assert_eq!(record.id, ComplaintId::from_uuid(id));
            assert_eq!(record.status, ComplaintStatus::Pending);
            assert_eq!(record.complaint, sample_complaint());
        }

        #[test]
        fn unknown_status_is_database_error_with_id() {
            let mut row = stored_row();
            row.status = "Archived".to_string();
            let id = row.id;

            let err = row.into_record().unwrap_err();

            assert_eq!(err.code, ErrorCode::DatabaseError);
            assert!(err.message.starts_with("Invalid status"));
            assert_eq!(err.details.get("complaint_id"), Some(&id.to_string()));
        }

        #[test]
        fn blank_phone_number_is_rejected() {
            let mut row = stored_row();
            row.phone_number = "  ".to_string();

            let err = row.into_record().unwrap_err();

            assert!(err.message.starts_with("Invalid phone_number"));
        }
    }

    #[test]
    fn stored_status_text_matches_schema_default() {
        assert_eq!(ComplaintStatus::default().as_str(), "Pending");
    }
}
