use crate::domain::model::{Department, DepartmentDraft, Institute, NewInstitute};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Raw-file persistence. Writing the same name twice overwrites the object.
pub trait BlobStore: Send + Sync {
    fn put_object(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Record persistence for institutes and departments. Identifier assignment
/// and referential integrity live behind this boundary.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_institute(&self, new: &NewInstitute) -> Result<Institute>;

    async fn list_institutes(&self) -> Result<Vec<Institute>>;

    async fn list_departments(&self, institute_id: &str) -> Result<Vec<Department>>;

    /// Bulk insert, preserving the order of `drafts`.
    async fn insert_departments(&self, drafts: &[DepartmentDraft]) -> Result<()>;
}
