use shelf_models::ContentRecord;

/// Shown wherever a record has no artwork
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/500";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W185,
    W500,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// `<base>/<size><path>`, or the placeholder when there is no path
pub fn image_url(base: &str, size: ImageSize, path: Option<&str>) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            size.as_str(),
            path.trim_start_matches('/')
        ),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Poster artwork, falling back to the backdrop
pub fn poster_url(base: &str, size: ImageSize, record: &ContentRecord) -> String {
    let path = record
        .poster_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .or(record.backdrop_path.as_deref());
    image_url(base, size, path)
}

pub fn backdrop_url(base: &str, size: ImageSize, record: &ContentRecord) -> String {
    image_url(base, size, record.backdrop_path.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p";

    #[test]
    fn test_image_url_template() {
        assert_eq!(
            image_url(BASE, ImageSize::W500, Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            image_url("https://cdn.example/", ImageSize::Original, Some("x.png")),
            "https://cdn.example/original/x.png"
        );
    }

    #[test]
    fn test_missing_path_uses_placeholder() {
        assert_eq!(image_url(BASE, ImageSize::W185, None), PLACEHOLDER_IMAGE);
        assert_eq!(image_url(BASE, ImageSize::W185, Some("")), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_poster_falls_back_to_backdrop() {
        let record = ContentRecord {
            id: 1,
            backdrop_path: Some("/back.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(poster_url(BASE, ImageSize::W500, &record), "https://image.tmdb.org/t/p/w500/back.jpg");
        assert_eq!(backdrop_url(BASE, ImageSize::Original, &ContentRecord::default()), PLACEHOLDER_IMAGE);
    }
}
