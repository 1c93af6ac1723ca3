//! Folder endpoints.

use reqwest::Method;

use brainbox_core::result::AppResult;
use brainbox_core::types::Page;
use brainbox_entity::folder::Folder;

use crate::client::ApiClient;
use crate::dto::{CreateFolderRequest, FolderQuery, UpdateFolderRequest, check};

impl ApiClient {
    /// One page of folders.
    pub async fn list_folders(&self, query: &FolderQuery) -> AppResult<Page<Folder>> {
        self.fetch(self.get_with_query("folders", &query.to_query())?)
            .await
    }

    /// A single folder with its files.
    pub async fn get_folder(&self, id: i64) -> AppResult<Folder> {
        self.fetch(self.request(Method::GET, &format!("folder/{id}/"))?)
            .await
    }

    /// Create a folder.
    pub async fn create_folder(&self, folder: &CreateFolderRequest) -> AppResult<Folder> {
        check(folder)?;
        self.fetch(self.request(Method::POST, "folders/")?.json(folder))
            .await
    }

    /// Rename or move a folder.
    pub async fn update_folder(&self, id: i64, changes: &UpdateFolderRequest) -> AppResult<Folder> {
        check(changes)?;
        self.fetch(self.request(Method::PATCH, &format!("folder/{id}/"))?.json(changes))
            .await
    }

    /// Delete a folder.
    pub async fn delete_folder(&self, id: i64) -> AppResult<()> {
        self.send(self.request(Method::DELETE, &format!("folder/{id}/"))?)
            .await
    }
}
