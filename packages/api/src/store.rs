use crate::error::{ApiError, Result};
use crate::models::{Document, NewDocument};

/// Insert a validated document and return the stored row.
#[tracing::instrument(skip(executor, new), fields(celex = %new.celex, file = %new.publication_ref_file))]
pub async fn create_document<'e, E>(executor: E, new: NewDocument) -> Result<Document>
where
    E: sqlx::PgExecutor<'e>,
{
    let document = sqlx::query_as::<_, Document>(
        r#"
        INSERT INTO documents (
            document_ref_date, publication_ref_file, publication_ref_language,
            source, celex, content_title, content_preamble, content_articles,
            content_signature, annexes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(new.document_ref_date)
    .bind(&new.publication_ref_file)
    .bind(&new.publication_ref_language)
    .bind(&new.source)
    .bind(&new.celex)
    .bind(&new.content_title)
    .bind(&new.content_preamble)
    .bind(&new.content_articles)
    .bind(&new.content_signature)
    .bind(&new.annexes)
    .fetch_one(executor)
    .await?;

    tracing::info!(id = document.id, celex = %document.celex, "document stored");
    Ok(document)
}

/// Get a document by ID.
pub async fn get_document<'e, E>(executor: E, id: i64) -> Result<Document>
where
    E: sqlx::PgExecutor<'e>,
{
    let document = sqlx::query_as::<_, Document>(r#"SELECT * FROM documents WHERE id = $1"#)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(ApiError::NotFound(id))?;

    Ok(document)
}

/// List documents newest-first, with a `created_at` tiebreak on ID.
pub async fn list_documents<'e, E>(executor: E, limit: i64, offset: i64) -> Result<Vec<Document>>
where
    E: sqlx::PgExecutor<'e>,
{
    let documents = sqlx::query_as::<_, Document>(
        r#"
        SELECT * FROM documents
        ORDER BY created_at DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    Ok(documents)
}

/// Count all stored documents.
pub async fn count_documents<'e, E>(executor: E) -> Result<i64>
where
    E: sqlx::PgExecutor<'e>,
{
    let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM documents"#)
        .fetch_one(executor)
        .await?;

    Ok(count)
}
