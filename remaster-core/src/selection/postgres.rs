use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use remaster_model::ItemId;

use super::{ItemIndex, ItemSelection, PerPage, SelectionPage};
use crate::{RemasterError, Result};

/// Postgres-backed item index over the `content_items` table.
#[derive(Clone, Debug)]
pub struct PgItemIndex {
    pool: PgPool,
}

impl PgItemIndex {
    /// Create a new index and verify database health.
    pub async fn new(pool: PgPool) -> Result<Self> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                RemasterError::Query(format!("Item index failed Postgres health check: {e}"))
            })?;
        info!("Item index connected to Postgres");

        Ok(Self { pool })
    }

    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, selection: &ItemSelection) {
        let kind_slugs: Vec<String> = selection
            .kinds
            .iter()
            .map(|kind| kind.as_slug().to_string())
            .collect();

        builder.push(" WHERE status = ");
        builder.push_bind(selection.status.as_str());
        builder.push(" AND kind = ANY(");
        builder.push_bind(kind_slugs);
        builder.push(")");

        if let Some(catalog) = &selection.catalog {
            builder.push(" AND ");
            builder.push_bind(catalog.as_str().to_string());
            builder.push(" = ANY(catalogs)");
        }

        if !selection.only.is_empty() {
            let only_ids: Vec<i64> = selection
                .only
                .iter()
                .map(|id| id.get() as i64)
                .collect();
            builder.push(" AND id = ANY(");
            builder.push_bind(only_ids);
            builder.push(")");
        }
    }
}

#[async_trait]
impl ItemIndex for PgItemIndex {
    async fn select(&self, selection: &ItemSelection) -> Result<SelectionPage> {
        let mut count_builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM content_items");
        Self::push_filters(&mut count_builder, selection);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RemasterError::Query(format!("Selection count failed: {e}")))?;

        let mut page_builder = QueryBuilder::<Postgres>::new("SELECT id FROM content_items");
        Self::push_filters(&mut page_builder, selection);
        page_builder.push(" ORDER BY id");
        if let PerPage::Limit(per_page) = selection.per_page {
            page_builder.push(" LIMIT ");
            page_builder.push_bind(i64::from(per_page));
            page_builder.push(" OFFSET ");
            page_builder.push_bind(selection.offset() as i64);
        }

        let rows: Vec<i64> = page_builder
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RemasterError::Query(format!("Selection query failed: {e}")))?;

        debug!(
            "Selection matched {} rows ({} on this page)",
            total,
            rows.len()
        );

        let ids = rows
            .into_iter()
            .filter(|&id| id > 0)
            .map(|id| ItemId::new(id as u64))
            .collect();

        Ok(SelectionPage {
            ids,
            total_matches: total.max(0) as u64,
        })
    }
}
