use memetrends_core::Report;
use uuid::Uuid;

/// A finished bulk download waiting to be fetched.
#[derive(Debug)]
pub struct StoredArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Everything one dashboard session holds between requests.
///
/// Created empty at startup, its report is replaced by each run and both
/// fields are cleared on reset. At most one archive is pending; a newer
/// bulk download replaces one nobody fetched.
#[derive(Debug, Default)]
pub struct DashboardSession {
    report: Option<Report>,
    pending_archive: Option<(Uuid, StoredArchive)>,
}

impl DashboardSession {
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn replace_report(&mut self, report: Report) {
        self.report = Some(report);
    }

    /// Drops the report and any archive nobody fetched.
    pub fn reset(&mut self) {
        self.report = None;
        self.pending_archive = None;
    }

    pub fn store_archive(&mut self, archive: StoredArchive) -> Uuid {
        let id = Uuid::new_v4();
        if let Some((stale, _)) = self.pending_archive.replace((id, archive)) {
            tracing::info!(archive_id = %stale, "discarding unfetched archive");
        }
        id
    }

    /// Archives are served once.
    pub fn take_archive(&mut self, id: Uuid) -> Option<StoredArchive> {
        match self.pending_archive.take() {
            Some((pending, archive)) if pending == id => Some(archive),
            other => {
                self.pending_archive = other;
                None
            }
        }
    }
}
