use crate::{AppSettings, RawSettings};
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;

pub fn load_app_settings() -> Result<AppSettings> {
    // .env first, so the environment can overwrite the database url.
    dotenv::from_path(".env").ok();

    let config_file = Path::new("config/settings.yaml")
        .canonicalize()
        .wrap_err("config/settings.yaml not found")?;
    let raw = config::Config::builder()
        .add_source(config::File::from(config_file))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<RawSettings>()?;

    let settings: AppSettings = raw.into();
    fs::create_dir_all(&settings.media.media_root).wrap_err("Cannot create media folder")?;

    Ok(settings)
}
