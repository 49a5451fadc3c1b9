//! QR Codes Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    qr_codes::{
        data::ValidQrCode,
        errors::QrCodesServiceError,
        records::{Destination, QrCodeId, QrCodeRecord},
    },
    sessions::records::ShopDomain,
};

const LIST_QR_CODES_SQL: &str = include_str!("sql/list_qr_codes.sql");
const GET_QR_CODE_SQL: &str = include_str!("sql/get_qr_code.sql");
const CREATE_QR_CODE_SQL: &str = include_str!("sql/create_qr_code.sql");
const UPDATE_QR_CODE_SQL: &str = include_str!("sql/update_qr_code.sql");
const DELETE_QR_CODE_SQL: &str = include_str!("sql/delete_qr_code.sql");
const INCREMENT_QR_CODE_SCANS_SQL: &str = include_str!("sql/increment_qr_code_scans.sql");

/// Shop-scoped storage for QR code records.
#[automock]
#[async_trait]
pub trait QrCodesRepository: Send + Sync {
    /// Records of a shop, newest first.
    async fn list_qr_codes(&self, shop: &ShopDomain) -> Result<Vec<QrCodeRecord>, QrCodesServiceError>;

    async fn get_qr_code(
        &self,
        shop: &ShopDomain,
        id: QrCodeId,
    ) -> Result<QrCodeRecord, QrCodesServiceError>;

    async fn create_qr_code(
        &self,
        shop: &ShopDomain,
        qr_code: &ValidQrCode,
    ) -> Result<QrCodeRecord, QrCodesServiceError>;

    /// Overwrite every editable field of an existing record.
    async fn update_qr_code(
        &self,
        shop: &ShopDomain,
        id: QrCodeId,
        qr_code: &ValidQrCode,
    ) -> Result<QrCodeRecord, QrCodesServiceError>;

    /// Returns the number of rows removed.
    async fn delete_qr_code(&self, shop: &ShopDomain, id: QrCodeId) -> Result<u64, QrCodesServiceError>;

    /// Not shop-scoped: scans arrive from anonymous customers.
    async fn increment_scans(&self, id: QrCodeId) -> Result<QrCodeRecord, QrCodesServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgQrCodesRepository {
    pool: PgPool,
}

impl PgQrCodesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QrCodesRepository for PgQrCodesRepository {
    async fn list_qr_codes(&self, shop: &ShopDomain) -> Result<Vec<QrCodeRecord>, QrCodesServiceError> {
        let records = query_as::<Postgres, QrCodeRecord>(LIST_QR_CODES_SQL)
            .bind(shop.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn get_qr_code(
        &self,
        shop: &ShopDomain,
        id: QrCodeId,
    ) -> Result<QrCodeRecord, QrCodesServiceError> {
        let record = query_as::<Postgres, QrCodeRecord>(GET_QR_CODE_SQL)
            .bind(shop.as_str())
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    async fn create_qr_code(
        &self,
        shop: &ShopDomain,
        qr_code: &ValidQrCode,
    ) -> Result<QrCodeRecord, QrCodesServiceError> {
        let record = query_as::<Postgres, QrCodeRecord>(CREATE_QR_CODE_SQL)
            .bind(shop.as_str())
            .bind(&qr_code.title)
            .bind(&qr_code.product_id)
            .bind(&qr_code.product_variant_id)
            .bind(&qr_code.product_handle)
            .bind(qr_code.destination.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    async fn update_qr_code(
        &self,
        shop: &ShopDomain,
        id: QrCodeId,
        qr_code: &ValidQrCode,
    ) -> Result<QrCodeRecord, QrCodesServiceError> {
        let record = query_as::<Postgres, QrCodeRecord>(UPDATE_QR_CODE_SQL)
            .bind(shop.as_str())
            .bind(id.into_inner())
            .bind(&qr_code.title)
            .bind(&qr_code.product_id)
            .bind(&qr_code.product_variant_id)
            .bind(&qr_code.product_handle)
            .bind(qr_code.destination.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    async fn delete_qr_code(&self, shop: &ShopDomain, id: QrCodeId) -> Result<u64, QrCodesServiceError> {
        let rows_affected = query(DELETE_QR_CODE_SQL)
            .bind(shop.as_str())
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn increment_scans(&self, id: QrCodeId) -> Result<QrCodeRecord, QrCodesServiceError> {
        let record = query_as::<Postgres, QrCodeRecord>(INCREMENT_QR_CODE_SCANS_SQL)
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }
}

impl<'r> FromRow<'r, PgRow> for QrCodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let destination: String = row.try_get("destination")?;

        let destination = destination
            .parse::<Destination>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "destination".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: QrCodeId::new(row.try_get("id")?),
            shop: ShopDomain::new(row.try_get::<String, _>("shop")?),
            title: row.try_get("title")?,
            product_id: row.try_get("product_id")?,
            product_variant_id: row.try_get("product_variant_id")?,
            product_handle: row.try_get("product_handle")?,
            destination,
            scans: row.try_get("scans")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
