use anyhow::{Context, Result};
use resto_search::{DetailBackend, SearchBackend, SearchOrchestrator, SupabaseClient};
use std::sync::Arc;

use crate::api::dev_backend::dev_backend;
use crate::app::{App, ImageResolver};
use crate::config::RestoConfig;

/// Where search requests go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Supabase,
    Dev,
}

pub fn build_app(mode: Mode, config: &RestoConfig) -> Result<App> {
    let (backend, details, image_resolver): (
        Arc<dyn SearchBackend>,
        Arc<dyn DetailBackend>,
        ImageResolver,
    ) = match mode {
        Mode::Supabase => {
            let client = SupabaseClient::new(&config.api_url, &config.anon_key)
                .with_context(|| {
                    format!(
                        "Invalid Supabase settings. Set api_url and anon_key in {} or SUPABASE_URL / SUPABASE_ANON_KEY",
                        RestoConfig::config_path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|_| "the config file".to_string())
                    )
                })?
                .with_image_bucket(&config.image_bucket);
            tracing::info!(url = %client.base_url(), "using Supabase backend");
            let images = client.clone();
            let resolver: ImageResolver =
                Box::new(move |value: Option<&str>| images.public_image_url(value));
            let details: Arc<dyn DetailBackend> = Arc::new(client.clone());
            let backend: Arc<dyn SearchBackend> = Arc::new(client);
            (backend, details, resolver)
        }
        Mode::Dev => {
            let backend = dev_backend();
            tracing::info!(rows = backend.len(), "using in-memory dev catalog");
            let resolver: ImageResolver = Box::new(|value: Option<&str>| value.map(str::to_string));
            let details: Arc<dyn DetailBackend> = Arc::new(backend.clone());
            let backend: Arc<dyn SearchBackend> = Arc::new(backend);
            (backend, details, resolver)
        }
    };

    let engine =
        SearchOrchestrator::new(backend, config.engine_settings()).with_details(details);
    Ok(App::new(engine, image_resolver))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supabase_mode_needs_credentials() {
        let result = build_app(Mode::Supabase, &RestoConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn supabase_images_resolve_against_bucket() {
        let config = RestoConfig {
            api_url: "https://abcd.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            ..RestoConfig::default()
        };
        let app = build_app(Mode::Supabase, &config).unwrap();
        let row = resto_search::Row {
            image_url: Some("roma/cover.jpg".to_string()),
            ..resto_search::Row::new(7, "Pizzeria Roma")
        };
        assert_eq!(
            app.image_url(&row).as_deref(),
            Some("https://abcd.supabase.co/storage/v1/object/public/restaurants/roma/cover.jpg")
        );
    }

    #[test]
    fn dev_mode_needs_no_config() {
        let app = build_app(Mode::Dev, &RestoConfig::default()).unwrap();
        assert!(app.running);
        assert!(app.engine.rows().is_empty());
    }
}
