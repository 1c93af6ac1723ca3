//! Aggregate statistics.

use brainbox_core::result::AppResult;
use brainbox_core::types::{Page, PageRequest};
use brainbox_entity::statistics::{FolderByNumFiles, FolderBySharedUsers, UserByWrittenChars};

use crate::client::ApiClient;

impl ApiClient {
    /// Users ranked by characters written across their files.
    pub async fn users_by_written_chars(
        &self,
        page: PageRequest,
    ) -> AppResult<Page<UserByWrittenChars>> {
        let builder =
            self.get_with_query("statistics/users-by-chars-written", &page.to_query())?;
        self.fetch(builder).await
    }

    /// Folders ranked by number of files.
    pub async fn folders_by_num_files(&self, page: PageRequest) -> AppResult<Page<FolderByNumFiles>> {
        let builder =
            self.get_with_query("statistics/folders-by-num-files", &page.to_query())?;
        self.fetch(builder).await
    }

    /// Folders ranked by the number of users their files are shared with.
    /// This endpoint spells the page size `per_page`.
    pub async fn folders_by_shared_users(
        &self,
        page: PageRequest,
    ) -> AppResult<Page<FolderBySharedUsers>> {
        let builder = self.get_with_query(
            "statistics/folders-by-shared-users",
            &page.to_query_with("per_page"),
        )?;
        self.fetch(builder).await
    }
}
