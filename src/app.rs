use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every project module
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize and start all modules, serve HTTP until a shutdown signal,
/// then stop the modules again.
pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    let registry = build_registry();
    let ctx = InitCtx { settings };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, settings).await;

    registry
        .stop_modules()
        .await
        .with_context(|| "failed to stop modules")?;

    served
}
