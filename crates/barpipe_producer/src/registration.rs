use std::{fs, io, path::PathBuf};

use barpipe_shared_util::{atomic::write_atomic, paths::BarpipePaths, wake, Block, ServiceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProducerError {
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode status blocks")]
    Encode(#[from] serde_json::Error),
}

/// A producer's presence in the spool.
///
/// Registering writes the liveness record with the calling process's pid;
/// re-registering the same service id replaces the previous record. Dropping
/// the registration removes the record (and the block file) best-effort —
/// the aggregator infers liveness, so a crashed producer disappears from the
/// bar without any cleanup.
pub struct Registration {
    paths: BarpipePaths,
    service: ServiceId,
    pid_file: PathBuf,
    block_file: PathBuf,
}

impl Registration {
    pub fn register(paths: &BarpipePaths, service: ServiceId) -> Result<Self, ProducerError> {
        paths.create().map_err(|source| ProducerError::Io { path: paths.spool_dir().to_path_buf(), source })?;

        let pid_file = paths.pid_file_for(&service);
        let block_file = paths.block_file_for(&service);
        write_atomic(&pid_file, std::process::id().to_string())
            .map_err(|source| ProducerError::Io { path: pid_file.clone(), source })?;

        log::info!("registered service {} (pid {})", service, std::process::id());
        Ok(Registration { paths: paths.clone(), service, pid_file, block_file })
    }

    pub fn service(&self) -> &ServiceId {
        &self.service
    }

    /// Atomically replace this service's status records and wake the
    /// aggregator so the bar reflects them right away.
    pub fn publish(&self, blocks: &[Block]) -> Result<(), ProducerError> {
        let payload = serde_json::to_vec(blocks)?;
        write_atomic(&self.block_file, payload)
            .map_err(|source| ProducerError::Io { path: self.block_file.clone(), source })?;
        wake::wake_aggregator(&self.paths);
        Ok(())
    }

    pub fn publish_one(&self, block: &Block) -> Result<(), ProducerError> {
        self.publish(std::slice::from_ref(block))
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.pid_file);
        let _ = fs::remove_file(&self.block_file);
    }
}
