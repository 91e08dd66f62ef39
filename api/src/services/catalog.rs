//! Product CRUD.
//!
//! Every operation except [`CatalogService::list`] takes a [`CurrentUser`],
//! so a caller cannot reach the store without having resolved a token first.

use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::{
    error::AppError,
    models::{
        product::{Pagination, Product, ProductData, ProductId},
        user::CurrentUser,
    },
    store::products,
};

#[derive(Clone)]
pub struct CatalogService {
    db: SqlitePool,
}

impl CatalogService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    #[instrument(name = "catalog::list", skip(self))]
    pub async fn list(&self, page: Pagination) -> Result<Vec<Product>, AppError> {
        page.validate()?;
        Ok(products::list(&self.db, page.skip, page.limit).await?)
    }

    #[instrument(name = "catalog::get", skip(self, user), fields(user = %user.username))]
    pub async fn get(&self, user: &CurrentUser, id: ProductId) -> Result<Product, AppError> {
        products::find(&self.db, id.get())
            .await?
            .ok_or(AppError::NotFound)
    }

    #[instrument(name = "catalog::create", skip(self, user, data), fields(user = %user.username))]
    pub async fn create(&self, user: &CurrentUser, data: ProductData) -> Result<Product, AppError> {
        data.validate()?;
        let product = products::insert(&self.db, &data).await?;
        info!(product_id = product.id, "product created");
        Ok(product)
    }

    /// Full replace. The existence read and the update share a transaction,
    /// which rolls back on drop if either fails.
    #[instrument(name = "catalog::update", skip(self, user, data), fields(user = %user.username))]
    pub async fn update(
        &self,
        user: &CurrentUser,
        id: ProductId,
        data: ProductData,
    ) -> Result<Product, AppError> {
        data.validate()?;

        let mut tx = self.db.begin().await?;
        if products::find(&mut *tx, id.get()).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let product = products::replace(&mut *tx, id.get(), &data)
            .await?
            .ok_or(AppError::NotFound)?;
        tx.commit().await?;

        info!("product updated");
        Ok(product)
    }

    #[instrument(name = "catalog::delete", skip(self, user), fields(user = %user.username))]
    pub async fn delete(&self, user: &CurrentUser, id: ProductId) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;
        if products::find(&mut *tx, id.get()).await?.is_none() {
            return Err(AppError::NotFound);
        }
        products::delete(&mut *tx, id.get()).await?;
        tx.commit().await?;

        info!("product deleted");
        Ok(())
    }
}
