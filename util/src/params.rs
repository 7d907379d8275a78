//! Generic parameters functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;
use toml;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot determine the software root directory: {0}")]
    SwRootNotFound(std::io::Error),

    #[error("Cannot load the parmeter file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the parameter file: {0}")]
    DeserialiseError(toml::de::Error)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// The file path is relative to the `params` directory inside the software root (see
/// [`crate::host::get_sw_root`]).
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError> 
where
    P: DeserializeOwned
{
    // Get the params dir
    let mut path = crate::host::get_sw_root()
        .map_err(LoadError::SwRootNotFound)?;
    path.push("params");
    path.push(param_file_path);

    load_from_path(path)
}

/// Load a parameter file from an explicit path on the host.
pub fn load_from_path<P, F>(path: F) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    F: AsRef<Path>
{
    // Load the file into a string
    let params_str = read_to_string(path)
        .map_err(LoadError::FileLoadError)?;

    parse(params_str.as_str())
}

/// Parse a parameter struct from a TOML string.
pub fn parse<P>(params_str: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned
{
    toml::from_str(params_str).map_err(LoadError::DeserialiseError)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestParams {
        radius_m: f64,
        name: String,
    }

    #[test]
    fn test_parse() {
        let params: TestParams = parse("radius_m = 2.5\nname = \"test\"").unwrap();
        assert_eq!(params, TestParams { radius_m: 2.5, name: "test".into() });
    }

    #[test]
    fn test_parse_invalid() {
        let res: Result<TestParams, _> = parse("radius_m = \"two\"");
        assert!(matches!(res, Err(LoadError::DeserialiseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let res: Result<TestParams, _> = load_from_path("this/file/does/not/exist.toml");
        assert!(matches!(res, Err(LoadError::FileLoadError(_))));
    }
}
