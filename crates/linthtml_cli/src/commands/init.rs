//! Init command implementation

use std::path::PathBuf;

use linthtml_core::CONFIG_FILE_NAMES;
use miette::{IntoDiagnostic, Result};
use tracing::info;

pub(crate) const DEFAULT_CONFIG: &str = r#"{
  "rules": {
    "attr-no-dup": true,
    "line-end-style": "lf",
    "line-no-trailing-whitespace": true
  },
  "exclude": ["node_modules/**"]
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAMES[0]);

    loop {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);

        // Never write through a symlink planted at the config path.
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.custom_flags(libc::O_NOFOLLOW);
        }

        match options.open(&config_path) {
            Ok(mut file) => {
                use std::io::Write;
                file.write_all(DEFAULT_CONFIG.as_bytes()).into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "{} already exists. Use --force to overwrite.",
                        config_path.display()
                    ));
                }

                match std::fs::remove_file(&config_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}
