//! Driver: retrieve a chunked item by manifest ID and write it to a file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use digest::Digest;
use md5::Md5;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

use seam_io::to_hex;
use seam_manifest::{ManifestError, deserialize_manifest};
use seam_store::DataSource;
use seam_types::naming;

use crate::error::StitchError;
use crate::stitcher::Stitcher;

/// Fetch the manifest named `manifest_id` from `space_id`, reassemble the
/// source content it describes, and write it into `dest_dir`.
///
/// The output file is named after the manifest's declared source content
/// ID (final path segment). The reassembled bytes are checked against the
/// header's whole-object checksum when one is recorded; a mismatch fails
/// with [`StitchError::ChecksumMismatch`] after the file has been written,
/// leaving it in place for inspection.
pub async fn retrieve_to_dir(
    source: Arc<dyn DataSource>,
    space_id: &str,
    manifest_id: &str,
    dest_dir: &Path,
) -> Result<PathBuf, StitchError> {
    if !naming::is_manifest_id(manifest_id) {
        debug!(manifest_id, "retrieving manifest without the standard suffix");
    }

    let mut manifest_stream = source.get_content(space_id, manifest_id).await?;
    let mut document = String::new();
    manifest_stream.read_to_string(&mut document).await?;
    let manifest = deserialize_manifest(&document)?;

    // The source content ID is non-empty, but may still end in a
    // separator and leave no final segment to name the file after.
    let file_name = manifest
        .header
        .source_content_id
        .rsplit('/')
        .next()
        .unwrap_or_default();
    if file_name.is_empty() {
        return Err(StitchError::Manifest(ManifestError::Malformed(format!(
            "source content ID {:?} has no file name segment",
            manifest.header.source_content_id
        ))));
    }
    let dest_path = dest_dir.join(file_name);

    let mut stitcher = Stitcher::from_manifest(Arc::clone(&source), space_id, &manifest);
    let mut file = tokio::fs::File::create(&dest_path).await?;
    let mut checksum = Md5::new();
    let mut buf = vec![0u8; 64 * 1024];
    let mut written = 0u64;

    loop {
        let n = stitcher.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        checksum.update(&buf[..n]);
        file.write_all(&buf[..n]).await?;
        written += n as u64;
    }
    file.flush().await?;

    let actual = to_hex(checksum.finalize());
    let expected = &manifest.header.source_checksum;
    if !expected.is_empty() && expected != &actual {
        return Err(StitchError::ChecksumMismatch {
            expected: expected.clone(),
            actual,
        });
    }

    info!(
        space_id,
        manifest_id,
        path = %dest_path.display(),
        bytes = written,
        "content reassembled"
    );
    Ok(dest_path)
}
