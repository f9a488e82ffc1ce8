use std::{fs, io, path::Path};

use anyhow::Result;
use barpipe_shared_util::{parse_block_file, Block, ServiceId};

use crate::liveness;

/// What a live service shows before it has published anything.
pub const PLACEHOLDER_TEXT: &str = "running";

/// Build one aggregated frame from the spool directory.
///
/// This is a pure function of the directory contents: every live service
/// contributes its blocks (or a single placeholder if it has not written any
/// yet) in ascending service-id order. A block file that exists but cannot be
/// read or parsed contributes nothing for this frame; the error is assumed to
/// be a transient mid-write state that the next poll resolves.
pub fn build_frame(spool_dir: &Path) -> Result<Vec<Block>> {
    let live = liveness::scan(spool_dir)?;

    let mut frame = Vec::new();
    for service in live.keys() {
        frame.extend(service_blocks(spool_dir, service));
    }
    Ok(frame)
}

fn service_blocks(spool_dir: &Path, service: &ServiceId) -> Vec<Block> {
    let path = spool_dir.join(format!("{}.block", service));
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // Registered but nothing published yet.
            return vec![normalize(service, 0, Block::default())];
        }
        Err(err) => {
            log::debug!("skipping unreadable block file {}: {}", path.display(), err);
            return Vec::new();
        }
    };
    match parse_block_file(&raw) {
        Ok(blocks) => blocks.into_iter().enumerate().map(|(i, block)| normalize(service, i, block)).collect(),
        Err(err) => {
            log::debug!("skipping malformed block file {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

/// Fill in the defaults the bar host expects on every record.
fn normalize(service: &ServiceId, index: usize, mut block: Block) -> Block {
    block.name.get_or_insert_with(|| service.to_string());
    block.instance.get_or_insert_with(|| format!("{}-{}", service, index));
    block.full_text.get_or_insert_with(|| PLACEHOLDER_TEXT.to_string());
    block
}
