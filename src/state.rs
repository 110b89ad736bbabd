use std::path::PathBuf;

use crate::service::LinkService;

#[derive(Clone)]
pub struct AppState {
    pub links: LinkService,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(links: LinkService, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            links,
            public_dir: public_dir.into(),
        }
    }
}
