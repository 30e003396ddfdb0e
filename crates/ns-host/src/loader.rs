use std::fs;
use std::path::PathBuf;

use ns_core::NyanScriptError;

pub trait SourceLoader {
    fn load(&self, locator: &str) -> Result<String, NyanScriptError>;
}

// Resolves relative locators against the host document's directory, the
// way a browser resolves a relative `src` against the page URL.
#[derive(Debug, Clone)]
pub struct FsSourceLoader {
    base_dir: PathBuf,
}

impl FsSourceLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl SourceLoader for FsSourceLoader {
    fn load(&self, locator: &str) -> Result<String, NyanScriptError> {
        let path = {
            let raw = PathBuf::from(locator);
            if raw.is_absolute() {
                raw
            } else {
                self.base_dir.join(raw)
            }
        };

        if !path.exists() {
            return Err(NyanScriptError::new(
                "HOST_SOURCE_NOT_FOUND",
                format!("Script source does not exist: {}", path.display()),
            ));
        }

        fs::read_to_string(&path).map_err(|error| {
            NyanScriptError::new(
                "HOST_SOURCE_READ",
                format!("Failed to read {}: {}", path.display(), error),
            )
        })
    }
}

#[cfg(test)]
mod loader_tests {
    use std::fs;

    use super::*;

    fn temp_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ns-host-{}-{}", label, std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir should be created");
        dir
    }

    #[test]
    fn loads_relative_to_the_base_dir() {
        let dir = temp_dir("relative");
        fs::write(dir.join("lib.nyan"), "console.outputx(\"lib\")")
            .expect("fixture should be written");

        let loader = FsSourceLoader::new(&dir);
        let body = loader.load("lib.nyan").expect("load should pass");
        assert_eq!(body, "console.outputx(\"lib\")");
    }

    #[test]
    fn missing_source_reports_not_found() {
        let loader = FsSourceLoader::new(temp_dir("missing"));
        let error = loader
            .load("nope.nyan")
            .expect_err("missing file should fail");
        assert_eq!(error.code, "HOST_SOURCE_NOT_FOUND");
    }
}
