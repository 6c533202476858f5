//! Mistake Category Use Cases
//!
//! Categories are a shared catalogue.

use std::sync::Arc;

use kernel::id::MistakeCategoryId;

use crate::domain::entity::mistake_category::{CATEGORY_NAME_MAX_LENGTH, MistakeCategory};
use crate::domain::repository::MistakeCategoryRepository;
use crate::domain::value_object::text::required_text;
use crate::error::{LearningError, LearningResult};

/// Create category use case
pub struct CreateCategoryUseCase<C>
where
    C: MistakeCategoryRepository,
{
    repo: Arc<C>,
}

impl<C> CreateCategoryUseCase<C>
where
    C: MistakeCategoryRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, name: &str) -> LearningResult<MistakeCategory> {
        let name = required_text("Category name", name, CATEGORY_NAME_MAX_LENGTH)?;

        let category = MistakeCategory::new(name);
        self.repo.create(&category).await?;

        tracing::info!(
            category_id = %category.category_id,
            name = %category.name,
            "Mistake category created"
        );

        Ok(category)
    }
}

/// List categories use case
pub struct ListCategoriesUseCase<C>
where
    C: MistakeCategoryRepository,
{
    repo: Arc<C>,
}

impl<C> ListCategoriesUseCase<C>
where
    C: MistakeCategoryRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> LearningResult<Vec<MistakeCategory>> {
        self.repo.list().await
    }
}

/// Delete category use case
pub struct DeleteCategoryUseCase<C>
where
    C: MistakeCategoryRepository,
{
    repo: Arc<C>,
}

impl<C> DeleteCategoryUseCase<C>
where
    C: MistakeCategoryRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, category_id: &MistakeCategoryId) -> LearningResult<()> {
        if !self.repo.delete(category_id).await? {
            return Err(LearningError::CategoryNotFound);
        }

        tracing::info!(category_id = %category_id, "Mistake category deleted");

        Ok(())
    }
}
