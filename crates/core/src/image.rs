//! URLs for the CMS image service.

/// Hosts whose assets can be transformed by appending an `/m/` segment.
const IMAGE_SERVICE_HOSTS: &[&str] = &["a.storyblok.com", "a-us.storyblok.com", "a2.storyblok.com"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOptions {
    /// 0 keeps the aspect ratio for that dimension
    pub width: u32,
    pub height: u32,
    pub quality: Option<u8>,
    pub format: Option<ImageFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Webp,
    Avif,
    Jpeg,
    Png,
}

impl ImageFormat {
    fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Webp => "webp",
            ImageFormat::Avif => "avif",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }
}

/// Build a transformed image URL.
///
/// Sources the image service cannot transform (SVGs, other hosts) are
/// returned unchanged.
pub fn build_image_url(src: &str, options: &ImageOptions) -> String {
    if !is_transformable(src) {
        return src.to_string();
    }

    let mut url = format!("{}/m/", src.trim_end_matches('/'));
    if options.width > 0 || options.height > 0 {
        url.push_str(&format!("{}x{}/", options.width, options.height));
    }

    let mut filters = Vec::new();
    if let Some(quality) = options.quality {
        filters.push(format!("quality({})", quality.min(100)));
    }
    if let Some(format) = options.format {
        filters.push(format!("format({})", format.as_str()));
    }
    if !filters.is_empty() {
        url.push_str("filters:");
        url.push_str(&filters.join(":"));
    }
    url
}

/// Build a `srcset` value with one candidate per width. Heights scale with
/// the width when `options.height` is set, keeping the requested ratio.
pub fn build_srcset(src: &str, widths: &[u32], options: &ImageOptions) -> String {
    if !is_transformable(src) {
        return String::new();
    }
    widths
        .iter()
        .map(|&width| {
            let height = if options.width > 0 && options.height > 0 {
                (u64::from(width) * u64::from(options.height) / u64::from(options.width)) as u32
            } else {
                0
            };
            let candidate = ImageOptions {
                width,
                height,
                ..options.clone()
            };
            format!("{} {}w", build_image_url(src, &candidate), width)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_transformable(src: &str) -> bool {
    let Some(rest) = src
        .strip_prefix("https://")
        .or_else(|| src.strip_prefix("http://"))
        .or_else(|| src.strip_prefix("//"))
    else {
        return false;
    };
    let host = rest.split('/').next().unwrap_or_default();
    IMAGE_SERVICE_HOSTS.contains(&host) && !src.to_ascii_lowercase().ends_with(".svg")
}
