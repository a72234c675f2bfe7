/// Remote files are served from Google Drive; downloads and previews share
/// the same id with a different `export` mode.
pub const DRIVE_DOWNLOAD_URL: &str = "https://drive.google.com/uc?export=download&id=";
pub const DRIVE_VIEW_URL: &str = "https://drive.google.com/uc?export=view&id=";

/// Cover images live next to the page, not on the remote host.
pub const COVER_DIR: &str = "covers/";

#[derive(Clone, Debug)]
pub struct LinkResolver {
    download_base: String,
    view_base: String,
    cover_dir: String,
}

impl Default for LinkResolver {
    fn default() -> Self {
        Self {
            download_base: DRIVE_DOWNLOAD_URL.to_string(),
            view_base: DRIVE_VIEW_URL.to_string(),
            cover_dir: COVER_DIR.to_string(),
        }
    }
}

impl LinkResolver {
    pub fn new(download_base: Option<String>, cover_dir: Option<String>) -> Self {
        let mut resolver = Self::default();
        if let Some(base) = download_base {
            resolver.download_base = base;
        }
        if let Some(dir) = cover_dir {
            resolver.cover_dir = ensure_trailing_slash(dir);
        }
        resolver
    }

    pub fn download_url(&self, file_id: &str) -> String {
        format!("{}{}", self.download_base, file_id)
    }

    pub fn view_url(&self, file_id: &str) -> String {
        format!("{}{}", self.view_base, file_id)
    }

    pub fn cover_path(&self, filename: &str) -> String {
        format!("{}{}", self.cover_dir, filename)
    }
}

fn ensure_trailing_slash(mut dir: String) -> String {
    if !dir.ends_with('/') {
        dir.push('/');
    }
    dir
}
