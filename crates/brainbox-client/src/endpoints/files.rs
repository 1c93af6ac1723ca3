//! File endpoints.

use reqwest::Method;

use brainbox_core::result::AppResult;
use brainbox_core::types::{Page, PageRequest};
use brainbox_entity::file::File;

use crate::client::ApiClient;
use crate::dto::{CreateFileRequest, UpdateFileRequest, check};

impl ApiClient {
    /// One page of files.
    pub async fn list_files(&self, page: PageRequest) -> AppResult<Page<File>> {
        self.fetch(self.get_with_query("files", &page.to_query())?)
            .await
    }

    /// A single file with its shares.
    pub async fn get_file(&self, id: i64) -> AppResult<File> {
        self.fetch(self.request(Method::GET, &format!("file/{id}/"))?)
            .await
    }

    /// Create a file.
    pub async fn create_file(&self, file: &CreateFileRequest) -> AppResult<File> {
        check(file)?;
        self.fetch(self.request(Method::POST, "files/")?.json(file))
            .await
    }

    /// Change a file's name, content or folder.
    pub async fn update_file(&self, id: i64, changes: &UpdateFileRequest) -> AppResult<File> {
        check(changes)?;
        self.fetch(self.request(Method::PATCH, &format!("file/{id}/"))?.json(changes))
            .await
    }

    /// Delete a file.
    pub async fn delete_file(&self, id: i64) -> AppResult<()> {
        self.send(self.request(Method::DELETE, &format!("file/{id}/"))?)
            .await
    }
}
