use crate::core::normalizer;
use crate::domain::model::{Department, Institute, NewInstitute};
use crate::domain::ports::{BlobStore, RecordStore};
use crate::utils::error::Result;

/// The four gateway operations, stateless over two injected collaborators.
pub struct RegistrationService<R: RecordStore, B: BlobStore> {
    records: R,
    blobs: B,
}

impl<R: RecordStore, B: BlobStore> RegistrationService<R, B> {
    pub fn new(records: R, blobs: B) -> Self {
        Self { records, blobs }
    }

    pub async fn create_institute(&self, new: &NewInstitute) -> Result<Institute> {
        let institute = self.records.create_institute(new).await?;
        tracing::info!(id = %institute.id, name = %institute.name, "institute registered");
        Ok(institute)
    }

    pub async fn list_institutes(&self) -> Result<Vec<Institute>> {
        self.records.list_institutes().await
    }

    /// Empty when the institute has no departments; never an error for that.
    pub async fn list_departments(&self, institute_id: &str) -> Result<Vec<Department>> {
        self.records.list_departments(institute_id).await
    }

    /// Store the raw upload verbatim, then normalize and bulk-insert.
    ///
    /// The blob write happens first and is not rolled back if the insert
    /// fails. Returns the number of inserted departments.
    pub async fn ingest_departments(
        &self,
        institute_id: &str,
        data: &[u8],
        original_filename: &str,
    ) -> Result<usize> {
        self.blobs.put_object(original_filename, data).await?;

        let drafts = normalizer::normalize(data, institute_id);
        if drafts.is_empty() {
            tracing::info!(file = original_filename, "upload contained no department rows");
            return Ok(0);
        }

        self.records.insert_departments(&drafts).await?;
        tracing::info!(
            file = original_filename,
            institute_id,
            count = drafts.len(),
            "departments ingested"
        );
        Ok(drafts.len())
    }
}
