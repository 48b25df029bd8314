//! One-off startup tasks

use crate::{
    config::CatalogConfig, db::ClinicStore, models::NewAppointmentOption, Error, Result,
};
use std::path::Path;

/// Load `catalog.seed_path` into an empty appointment catalog.
///
/// Does nothing when no seed file is configured or the catalog already has
/// entries.
pub async fn seed_catalog(store: &dyn ClinicStore, config: &CatalogConfig) -> Result<u64> {
    let Some(path) = config.seed_path.as_deref() else {
        return Ok(0);
    };

    if store.count_appointment_options().await? > 0 {
        tracing::debug!("Appointment catalog already populated, skipping seed");
        return Ok(0);
    }

    let options = read_seed_file(Path::new(path)).await?;
    let inserted = store.seed_appointment_options(options).await?;
    tracing::info!(path = %path, inserted, "Seeded appointment catalog");
    Ok(inserted)
}

async fn read_seed_file(path: &Path) -> Result<Vec<NewAppointmentOption>> {
    let raw = tokio::fs::read(path).await.map_err(|e| {
        Error::Internal(format!("Failed to read seed file {}: {e}", path.display()))
    })?;
    serde_json::from_slice(&raw).map_err(|e| {
        Error::Validation(format!("Invalid seed file {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryClinicStore;

    fn seed_config(path: Option<String>) -> CatalogConfig {
        CatalogConfig {
            default_price: 99.0,
            seed_path: path,
        }
    }

    #[tokio::test]
    async fn no_seed_path_is_a_no_op() {
        let store = InMemoryClinicStore::new();
        assert_eq!(seed_catalog(&store, &seed_config(None)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn seeds_empty_catalog_once() {
        let path = std::env::temp_dir().join(format!("medibook-seed-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(
            &path,
            r#"[
                {"name": "Teeth Orthodontics", "slots": ["08.00 AM - 08.30 AM", "08.30 AM - 09.00 AM"]},
                {"name": "Cosmetic Dentistry", "slots": ["10.05 AM - 10.30 AM"], "price": 120}
            ]"#,
        )
        .await
        .unwrap();

        let store = InMemoryClinicStore::new();
        let config = seed_config(Some(path.display().to_string()));
        assert_eq!(seed_catalog(&store, &config).await.unwrap(), 2);
        assert_eq!(seed_catalog(&store, &config).await.unwrap(), 0);

        let options = store.list_appointment_options().await.unwrap();
        assert_eq!(options[1].price, Some(120.0));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_seed_file_is_a_validation_error() {
        let path = std::env::temp_dir().join(format!("medibook-seed-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = InMemoryClinicStore::new();
        let err = seed_catalog(&store, &seed_config(Some(path.display().to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
