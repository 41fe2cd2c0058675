use crate::error::Error;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

const LOG_TARGET: &str = "    export";

/// Persist a finished report and return where it was written.
///
/// Without an `output` path the report goes to a fresh `tb-metrics-*.xlsx` file in the
/// system temporary directory, which is kept after the run. With one, the report is
/// written next to the target and renamed over it once complete.
pub fn write_report(data: &[u8], output: Option<&Utf8Path>) -> Result<Utf8PathBuf, Error> {
    let Some(output) = output else {
        let file = Builder::new().prefix("tb-metrics-").suffix(".xlsx").tempfile().map_err(Error::export)?;
        let file = fill(file, data)?;
        let (_, path) = file.keep().map_err(Error::export)?;

        let path = Utf8PathBuf::from_path_buf(path)
            .map_err(|path| Error::export(format!("temporary file path '{}' is not valid UTF-8", path.display())))?;
        log::info!(target: LOG_TARGET, "Report written to {path}");
        return Ok(path);
    };

    let dir = output
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let file = Builder::new().prefix(".tb-metrics-").suffix(".tmp").tempfile_in(dir).map_err(Error::export)?;
    let file = fill(file, data)?;
    let _ = file.persist(output).map_err(Error::export)?;

    log::info!(target: LOG_TARGET, "Report written to {output}");
    Ok(output.to_path_buf())
}

fn fill(mut file: NamedTempFile, data: &[u8]) -> Result<NamedTempFile, Error> {
    file.write_all(data).map_err(Error::export)?;
    file.flush().map_err(Error::export)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_write_to_temp_file() {
        let path = write_report(b"PK-data", None).unwrap();

        assert!(path.file_name().unwrap().starts_with("tb-metrics-"));
        assert_eq!(path.extension(), Some("xlsx"));
        assert_eq!(fs::read(&path).unwrap(), b"PK-data");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_write_to_explicit_path_replaces_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("report.xlsx")).unwrap();
        fs::write(&output, b"old").unwrap();

        let written = write_report(b"new", Some(&output)).unwrap();

        assert_eq!(written, output);
        assert_eq!(fs::read(&output).unwrap(), b"new");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_write_to_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("missing").join("report.xlsx")).unwrap();

        let err = write_report(b"data", Some(&output)).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
    }
}
