//! Admin dashboard operations.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use tracing::info;

use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;

use crate::client::ApiClient;
use crate::dto::{PageSizeRequest, check};

/// Tables the bulk purge and populate operations act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkTarget {
    /// All folders.
    Folders,
    /// All files.
    Files,
    /// All file shares.
    SharedFiles,
}

impl BulkTarget {
    /// Path segment used by the backend.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Folders => "folders",
            Self::Files => "files",
            Self::SharedFiles => "sharedfiles",
        }
    }
}

impl fmt::Display for BulkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for BulkTarget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "folders" => Ok(Self::Folders),
            "files" => Ok(Self::Files),
            "sharedfiles" | "shares" => Ok(Self::SharedFiles),
            _ => Err(AppError::validation(format!(
                "Unknown target '{s}'; expected folders, files or shared-files"
            ))),
        }
    }
}

impl ApiClient {
    /// Change the page size the backend uses for every list.
    pub async fn set_page_size(&self, page_size: u64) -> AppResult<()> {
        let body = PageSizeRequest { page_size };
        check(&body)?;
        self.send(self.request(Method::PUT, "users/page-size/")?.json(&body))
            .await?;
        info!(page_size, "Page size updated");
        Ok(())
    }

    /// Delete every row of `target`.
    pub async fn purge(&self, target: BulkTarget) -> AppResult<()> {
        let path = format!("{}/", target.segment());
        self.send(self.request(Method::DELETE, &path)?).await?;
        info!(target = %target, "Purged");
        Ok(())
    }

    /// Fill `target` with generated data.
    pub async fn populate(&self, target: BulkTarget) -> AppResult<()> {
        let path = format!("populate/{}/", target.segment());
        self.send(self.request(Method::POST, &path)?).await?;
        info!(target = %target, "Populated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!("folders".parse::<BulkTarget>().unwrap(), BulkTarget::Folders);
        assert_eq!("Shared-Files".parse::<BulkTarget>().unwrap(), BulkTarget::SharedFiles);
        assert_eq!("shares".parse::<BulkTarget>().unwrap(), BulkTarget::SharedFiles);
        assert!("users".parse::<BulkTarget>().is_err());
    }
}
