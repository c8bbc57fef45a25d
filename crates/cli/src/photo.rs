//! Photo attachments, stored inline as `data:` URLs.

use std::path::Path;

use anyhow::{Context, Result, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Read an image file and encode it as `data:<mime>;base64,<payload>`.
///
/// The MIME type is guessed from the extension; anything that is not an image
/// is rejected.
pub fn data_url(path: &Path) -> Result<String> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        bail!("{} is not an image ({})", path.display(), mime.essence_str());
    }

    let bytes = std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "photo encoded");
    Ok(format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(&bytes)))
}

/// Short description of a stored photo for listings.
pub fn describe(photo: &str) -> String {
    let mime = photo
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(';'))
        .map(|(mime, _)| mime);
    match mime {
        Some(mime) => format!("{mime}, {} bytes encoded", photo.len()),
        None => format!("{} bytes encoded", photo.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_images_with_guessed_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let url = data_url(&path).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
        assert!(describe(&url).starts_with("image/png"));
    }

    #[test]
    fn rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = data_url(&path).unwrap_err();
        assert!(err.to_string().contains("not an image"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(data_url(&dir.path().join("gone.jpg")).is_err());
    }
}
