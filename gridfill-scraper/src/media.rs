use std::path::PathBuf;

use gridfill_core::{Identity, Title};

use crate::error::ScrapeError;
use crate::transport::HttpTransport;

/// Download the selected image's bytes.
pub async fn download_image<T: HttpTransport>(
    transport: &T,
    url: &str,
) -> Result<Vec<u8>, ScrapeError> {
    let resp = transport.get(url, &[]).await?;
    if !resp.is_success() {
        return Err(ScrapeError::Status {
            context: format!("Image download {}", url),
            status: resp.status,
        });
    }
    Ok(resp.body)
}

/// Write artwork bytes verbatim to the title's custom art path.
///
/// Creates the grid directory if needed and overwrites any existing file.
pub async fn write_custom_art(
    identity: &Identity,
    title: &Title,
    bytes: &[u8],
) -> Result<PathBuf, ScrapeError> {
    tokio::fs::create_dir_all(identity.grid_dir()).await?;
    let path = identity.custom_art_path(title);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
