use super::error::CertificateError;
use crate::JobId;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// A complete schedule: the jobs of each batch, batches in run order.
///
/// Nothing is validated on construction or load; that is the checker's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub jobs: Vec<Vec<JobId>>,
}

impl Certificate {
    pub fn new(jobs: Vec<Vec<JobId>>) -> Self {
        Self { jobs }
    }

    pub fn number_of_batches(&self) -> usize {
        self.jobs.len()
    }

    pub fn batches(&self) -> impl Iterator<Item = &[JobId]> {
        self.jobs.iter().map(Vec::as_slice)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CertificateError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CertificateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, CertificateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes the certificate as JSON to `path`, replacing any existing file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), CertificateError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let certificate = Certificate::from_json_str(r#"{"jobs": [[0, 2], [1]]}"#).unwrap();
        assert_eq!(certificate.jobs, vec![vec![0, 2], vec![1]]);
        assert_eq!(certificate.number_of_batches(), 2);
        assert_eq!(certificate.to_json_string().unwrap(), r#"{"jobs":[[0,2],[1]]}"#);
    }

    #[test]
    fn test_write_then_load() {
        let path = std::env::temp_dir().join(format!(
            "batchsched-certificate-{}.json",
            std::process::id()
        ));
        let certificate = Certificate::new(vec![vec![3], vec![0, 1, 2]]);
        certificate.write(&path).unwrap();
        let loaded = Certificate::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, certificate);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Certificate::from_json_str(r#"{"jobs": [[-1]]}"#),
            Err(CertificateError::Json(_))
        ));
        assert!(matches!(
            Certificate::load("/nonexistent/certificate.json"),
            Err(CertificateError::Io(_))
        ));
    }
}
