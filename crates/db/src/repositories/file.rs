//! File repository for database operations.
//!
//! Implements file record CRUD operations using SeaORM.

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::files;
use quill_core::file::{
    CreateFileInput, FileError, FileFilter, FileRecord, FileRepository as FileRepoTrait,
};
use quill_shared::types::PageRequest;

/// File repository implementation.
#[derive(Debug, Clone)]
pub struct FileRepository {
    db: DatabaseConnection,
}

impl FileRepository {
    /// Create a new file repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl FileRepoTrait for FileRepository {
    async fn create(&self, input: CreateFileInput) -> Result<FileRecord, FileError> {
        let active_model = files::ActiveModel {
            id: Set(input.id),
            original_name: Set(input.original_name),
            storage_key: Set(input.key),
            content_type: Set(input.content_type),
            size: Set(input.size),
            url: Set(input.url),
            created_at: Set(Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| FileError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, FileError> {
        let model = files::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| FileError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn list(
        &self,
        filter: &FileFilter,
        page: &PageRequest,
    ) -> Result<(Vec<FileRecord>, u64), FileError> {
        let mut query = files::Entity::find();

        if let Some(name) = filter
            .original_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(files::Column::OriginalName)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        if let Some(prefix) = filter
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            query = query.filter(files::Column::ContentType.starts_with(prefix));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| FileError::repository(e.to_string()))?;

        let models = query
            .order_by_desc(files::Column::CreatedAt)
            .order_by_desc(files::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(|e| FileError::repository(e.to_string()))?;

        Ok((models.into_iter().map(to_domain).collect(), total))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, FileError> {
        let result = files::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| FileError::repository(e.to_string()))?;

        debug!(file_id = %id, rows = result.rows_affected, "file row deleted");
        Ok(result.rows_affected > 0)
    }
}

/// Escape LIKE wildcards so the filter matches the text literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Convert database model to domain file record.
fn to_domain(model: files::Model) -> FileRecord {
    FileRecord {
        id: model.id,
        original_name: model.original_name,
        key: model.storage_key,
        content_type: model.content_type,
        size: model.size,
        url: model.url,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
