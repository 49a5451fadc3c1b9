//! QR codes service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    domain::{
        qr_codes::{
            action::SaveOutcome,
            data::QrCodeInput,
            errors::QrCodesServiceError,
            links::destination_url,
            models::{DraftQrCode, LoadedQrCode, QrCodeDetails},
            records::{QrCodeId, QrCodeRecord},
            repository::{PgQrCodesRepository, QrCodesRepository},
            target::QrCodeTarget,
            validation::validate,
        },
        sessions::records::Session,
    },
    images::QrImageRenderer,
};

#[derive(Clone)]
pub struct QrCodeRecordService {
    repository: Arc<dyn QrCodesRepository>,
    catalog: Arc<dyn Catalog>,
    images: QrImageRenderer,
}

impl Debug for QrCodeRecordService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("QrCodeRecordService")
            .field("images", &self.images)
            .finish_non_exhaustive()
    }
}

impl QrCodeRecordService {
    #[must_use]
    pub fn new(pool: PgPool, catalog: Arc<dyn Catalog>, images: QrImageRenderer) -> Self {
        Self::with_repository(Arc::new(PgQrCodesRepository::new(pool)), catalog, images)
    }

    #[must_use]
    pub fn with_repository(
        repository: Arc<dyn QrCodesRepository>,
        catalog: Arc<dyn Catalog>,
        images: QrImageRenderer,
    ) -> Self {
        Self {
            repository,
            catalog,
            images,
        }
    }

    async fn hydrate(
        &self,
        session: &Session,
        record: QrCodeRecord,
        with_image: bool,
    ) -> Result<QrCodeDetails, QrCodesServiceError> {
        let product = self.catalog.product(session, &record.product_id).await?;

        let destination_url = match destination_url(&record) {
            Ok(url) => Some(url),
            Err(error) => {
                warn!(id = %record.id, %error, "omitting destination url");

                None
            }
        };

        let image = if with_image {
            Some(self.images.render(record.id)?)
        } else {
            None
        };

        let product_title = product.as_ref().and_then(|product| product.title.clone());
        let product_image = product.and_then(|product| product.image);

        Ok(QrCodeDetails {
            product_deleted: product_title.is_none(),
            product_title,
            product_alt: product_image
                .as_ref()
                .and_then(|image| image.alt_text.clone()),
            product_image: product_image.map(|image| image.url),
            destination_url,
            image,
            record,
        })
    }
}

#[async_trait]
impl QrCodesService for QrCodeRecordService {
    async fn load_qr_code(
        &self,
        session: &Session,
        target: QrCodeTarget,
    ) -> Result<LoadedQrCode, QrCodesServiceError> {
        let QrCodeTarget::Existing(id) = target else {
            return Ok(LoadedQrCode::Draft(DraftQrCode::default()));
        };

        let record = self.repository.get_qr_code(&session.shop, id).await?;

        Ok(self.hydrate(session, record, true).await?.into())
    }

    async fn list_qr_codes(&self, session: &Session) -> Result<Vec<QrCodeDetails>, QrCodesServiceError> {
        let records = self.repository.list_qr_codes(&session.shop).await?;

        let mut details = Vec::with_capacity(records.len());

        for record in records {
            details.push(self.hydrate(session, record, false).await?);
        }

        Ok(details)
    }

    async fn save_qr_code(
        &self,
        session: &Session,
        target: QrCodeTarget,
        input: QrCodeInput,
    ) -> Result<SaveOutcome, QrCodesServiceError> {
        let valid = match validate(&input) {
            Ok(valid) => valid,
            Err(errors) => {
                debug!(shop = %session.shop, %target, %errors, "rejected QR code input");

                return Ok(SaveOutcome::Invalid(errors));
            }
        };

        let record = match target {
            QrCodeTarget::Draft => self.repository.create_qr_code(&session.shop, &valid).await?,
            QrCodeTarget::Existing(id) => {
                self.repository
                    .update_qr_code(&session.shop, id, &valid)
                    .await?
            }
        };

        debug!(shop = %session.shop, id = %record.id, "saved QR code");

        Ok(SaveOutcome::Saved(record))
    }

    async fn delete_qr_code(
        &self,
        session: &Session,
        id: QrCodeId,
    ) -> Result<QrCodeId, QrCodesServiceError> {
        let rows_affected = self.repository.delete_qr_code(&session.shop, id).await?;

        if rows_affected == 0 {
            return Err(QrCodesServiceError::NotFound);
        }

        Ok(id)
    }

    async fn record_scan(&self, id: QrCodeId) -> Result<String, QrCodesServiceError> {
        let record = self.repository.increment_scans(id).await?;

        destination_url(&record).map_err(|e| QrCodesServiceError::UnrecognizedVariant(e.0))
    }
}

#[automock]
#[async_trait]
pub trait QrCodesService: Send + Sync {
    /// Loads a draft or a stored record hydrated with catalog metadata.
    async fn load_qr_code(
        &self,
        session: &Session,
        target: QrCodeTarget,
    ) -> Result<LoadedQrCode, QrCodesServiceError>;

    /// Lists the shop's records, newest first, without QR images.
    async fn list_qr_codes(&self, session: &Session) -> Result<Vec<QrCodeDetails>, QrCodesServiceError>;

    /// Validates and then creates (draft) or overwrites (existing) a record.
    async fn save_qr_code(
        &self,
        session: &Session,
        target: QrCodeTarget,
        input: QrCodeInput,
    ) -> Result<SaveOutcome, QrCodesServiceError>;

    /// Deletes a record of the session's shop.
    async fn delete_qr_code(
        &self,
        session: &Session,
        id: QrCodeId,
    ) -> Result<QrCodeId, QrCodesServiceError>;

    /// Counts a scan and returns the URL to send the customer to.
    async fn record_scan(&self, id: QrCodeId) -> Result<String, QrCodesServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        catalog::{MockCatalog, ProductImage, ProductSummary},
        domain::{
            qr_codes::{
                data::ValidQrCode,
                records::Destination,
                repository::MockQrCodesRepository,
                validation::{QrCodeField, TITLE_REQUIRED},
            },
            sessions::records::ShopDomain,
        },
    };

    use super::*;

    const SHOP: &str = "example.myshopify.com";

    fn session() -> Session {
        Session {
            shop: ShopDomain::new(SHOP),
            access_token: "shpat_test".to_string(),
        }
    }

    fn record(id: i64, valid: &ValidQrCode) -> QrCodeRecord {
        QrCodeRecord {
            id: QrCodeId::new(id),
            shop: ShopDomain::new(SHOP),
            title: valid.title.clone(),
            product_id: valid.product_id.clone(),
            product_variant_id: valid.product_variant_id.clone(),
            product_handle: valid.product_handle.clone(),
            destination: valid.destination,
            scans: 0,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn stored(id: i64) -> QrCodeRecord {
        record(
            id,
            &ValidQrCode {
                title: "Sale".to_string(),
                product_id: "gid://shopify/Product/1".to_string(),
                product_variant_id: "gid://shopify/ProductVariant/55".to_string(),
                product_handle: "sale-item".to_string(),
                destination: Destination::Cart,
            },
        )
    }

    fn input(title: &str, product_id: &str, destination: Option<&str>) -> QrCodeInput {
        QrCodeInput {
            title: Some(title.to_string()),
            product_id: Some(product_id.to_string()),
            destination: destination.map(str::to_string),
            ..QrCodeInput::default()
        }
    }

    fn service(repository: MockQrCodesRepository, catalog: MockCatalog) -> QrCodeRecordService {
        QrCodeRecordService::with_repository(
            Arc::new(repository),
            Arc::new(catalog),
            QrImageRenderer::new("https://qr.example.com"),
        )
    }

    fn summary() -> ProductSummary {
        ProductSummary {
            title: Some("Sale item".to_string()),
            handle: Some("sale-item".to_string()),
            image: Some(ProductImage {
                url: "https://cdn.example/sale.png".to_string(),
                alt_text: Some("Sale item photo".to_string()),
            }),
        }
    }

    #[tokio::test]
    async fn load_draft_never_touches_storage_or_catalog() -> TestResult {
        let mut repository = MockQrCodesRepository::new();
        let mut catalog = MockCatalog::new();

        repository.expect_get_qr_code().never();
        catalog.expect_product().never();

        let loaded = service(repository, catalog)
            .load_qr_code(&session(), QrCodeTarget::Draft)
            .await?;

        assert_eq!(loaded, LoadedQrCode::Draft(DraftQrCode::default()));

        Ok(())
    }

    #[tokio::test]
    async fn load_existing_hydrates_product_links_and_image() -> TestResult {
        let mut repository = MockQrCodesRepository::new();
        let mut catalog = MockCatalog::new();

        repository
            .expect_get_qr_code()
            .once()
            .withf(|shop, id| shop.as_str() == SHOP && *id == QrCodeId::new(7))
            .returning(|_, _| Ok(stored(7)));

        catalog
            .expect_product()
            .once()
            .withf(|_, product_id| product_id == "gid://shopify/Product/1")
            .returning(|_, _| Ok(Some(summary())));

        let loaded = service(repository, catalog)
            .load_qr_code(&session(), QrCodeTarget::Existing(QrCodeId::new(7)))
            .await?;

        let details = loaded.details().ok_or("expected existing record")?;

        assert!(!details.product_deleted);
        assert_eq!(details.product_title.as_deref(), Some("Sale item"));
        assert_eq!(
            details.product_image.as_deref(),
            Some("https://cdn.example/sale.png")
        );
        assert_eq!(details.product_alt.as_deref(), Some("Sale item photo"));
        assert_eq!(
            details.destination_url.as_deref(),
            Some("https://example.myshopify.com/cart/55:1")
        );
        assert!(
            details
                .image
                .as_deref()
                .is_some_and(|image| image.starts_with("data:image/svg+xml;base64,"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn load_existing_marks_missing_product_deleted() -> TestResult {
        let mut repository = MockQrCodesRepository::new();
        let mut catalog = MockCatalog::new();

        repository
            .expect_get_qr_code()
            .returning(|_, _| Ok(stored(7)));

        catalog.expect_product().returning(|_, _| Ok(None));

        let loaded = service(repository, catalog)
            .load_qr_code(&session(), QrCodeTarget::Existing(QrCodeId::new(7)))
            .await?;

        let details = loaded.details().ok_or("expected existing record")?;

        assert!(details.product_deleted);
        assert_eq!(details.product_title, None);

        Ok(())
    }

    #[tokio::test]
    async fn load_unknown_id_returns_not_found() {
        let mut repository = MockQrCodesRepository::new();
        let mut catalog = MockCatalog::new();

        repository
            .expect_get_qr_code()
            .returning(|_, _| Err(QrCodesServiceError::NotFound));

        catalog.expect_product().never();

        let result = service(repository, catalog)
            .load_qr_code(&session(), QrCodeTarget::Existing(QrCodeId::new(99)))
            .await;

        assert!(
            matches!(result, Err(QrCodesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn save_invalid_input_never_writes() -> TestResult {
        let mut repository = MockQrCodesRepository::new();

        repository.expect_create_qr_code().never();
        repository.expect_update_qr_code().never();

        let outcome = service(repository, MockCatalog::new())
            .save_qr_code(&session(), QrCodeTarget::Draft, input("", "123", Some("cart")))
            .await?;

        let SaveOutcome::Invalid(errors) = outcome else {
            return Err(format!("expected invalid outcome, got {outcome:?}").into());
        };

        assert_eq!(errors.get(QrCodeField::Title), Some(TITLE_REQUIRED));
        assert_eq!(errors.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn save_draft_creates_with_default_destination() -> TestResult {
        let mut repository = MockQrCodesRepository::new();

        repository.expect_update_qr_code().never();
        repository
            .expect_create_qr_code()
            .once()
            .withf(|shop, valid| {
                shop.as_str() == SHOP
                    && valid.title == "Sale"
                    && valid.product_id == "gid://1"
                    && valid.destination == Destination::Product
            })
            .returning(|_, valid| Ok(record(41, valid)));

        let outcome = service(repository, MockCatalog::new())
            .save_qr_code(&session(), QrCodeTarget::Draft, input("Sale", "gid://1", None))
            .await?;

        let SaveOutcome::Saved(saved) = outcome else {
            return Err(format!("expected saved outcome, got {outcome:?}").into());
        };

        assert_eq!(saved.id, QrCodeId::new(41));
        assert_eq!(saved.title, "Sale");
        assert_eq!(saved.product_id, "gid://1");
        assert_eq!(saved.destination, Destination::Product);

        Ok(())
    }

    #[tokio::test]
    async fn save_existing_overwrites_record() -> TestResult {
        let mut repository = MockQrCodesRepository::new();

        repository.expect_create_qr_code().never();
        repository
            .expect_update_qr_code()
            .once()
            .withf(|_, id, valid| *id == QrCodeId::new(5) && valid.destination == Destination::Cart)
            .returning(|_, id, valid| Ok(record(id.into_inner(), valid)));

        let outcome = service(repository, MockCatalog::new())
            .save_qr_code(
                &session(),
                QrCodeTarget::Existing(QrCodeId::new(5)),
                input("Clearance", "gid://2", Some("cart")),
            )
            .await?;

        assert!(
            matches!(&outcome, SaveOutcome::Saved(record) if record.id == QrCodeId::new(5)),
            "expected saved record 5, got {outcome:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_returns_deleted_id() -> TestResult {
        let mut repository = MockQrCodesRepository::new();

        repository
            .expect_delete_qr_code()
            .once()
            .withf(|shop, id| shop.as_str() == SHOP && *id == QrCodeId::new(3))
            .returning(|_, _| Ok(1));

        let deleted = service(repository, MockCatalog::new())
            .delete_qr_code(&session(), QrCodeId::new(3))
            .await?;

        assert_eq!(deleted, QrCodeId::new(3));

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_returns_not_found() {
        let mut repository = MockQrCodesRepository::new();

        repository.expect_delete_qr_code().returning(|_, _| Ok(0));

        let result = service(repository, MockCatalog::new())
            .delete_qr_code(&session(), QrCodeId::new(3))
            .await;

        assert!(
            matches!(result, Err(QrCodesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_hydrates_each_record_without_images() -> TestResult {
        let mut repository = MockQrCodesRepository::new();
        let mut catalog = MockCatalog::new();

        repository
            .expect_list_qr_codes()
            .returning(|_| Ok(vec![stored(2), stored(1)]));

        catalog
            .expect_product()
            .times(2)
            .returning(|_, _| Ok(Some(summary())));

        let details = service(repository, catalog).list_qr_codes(&session()).await?;

        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|detail| detail.image.is_none()));

        Ok(())
    }

    #[tokio::test]
    async fn record_scan_returns_destination() -> TestResult {
        let mut repository = MockQrCodesRepository::new();

        repository
            .expect_increment_scans()
            .with(eq(QrCodeId::new(7)))
            .returning(|_| Ok(stored(7)));

        let url = service(repository, MockCatalog::new())
            .record_scan(QrCodeId::new(7))
            .await?;

        assert_eq!(url, "https://example.myshopify.com/cart/55:1");

        Ok(())
    }

    #[tokio::test]
    async fn record_scan_rejects_unrecognized_variant() {
        let mut repository = MockQrCodesRepository::new();

        repository.expect_increment_scans().returning(|_| {
            let mut record = stored(7);

            record.product_variant_id = "not-a-gid".to_string();

            Ok(record)
        });

        let result = service(repository, MockCatalog::new())
            .record_scan(QrCodeId::new(7))
            .await;

        assert!(
            matches!(result, Err(QrCodesServiceError::UnrecognizedVariant(_))),
            "expected UnrecognizedVariant, got {result:?}"
        );
    }

    #[test]
    fn debug_shows_renderer_only() {
        let debug = format!("{:?}", service(MockQrCodesRepository::new(), MockCatalog::new()));

        assert!(debug.starts_with("QrCodeRecordService {"), "{debug}");
        assert!(debug.contains("https://qr.example.com"), "{debug}");
        assert!(debug.ends_with(".. }"), "{debug}");
    }
}
