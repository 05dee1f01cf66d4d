//! Local preview URLs for picked files

use std::fmt;
use std::rc::Rc;

/// Creates and revokes `blob:` URLs for picked files
pub trait ObjectUrlFactory<F> {
    fn create(&self, file: &F) -> Option<String>;
    fn revoke(&self, url: &str);
}

/// A preview URL that is revoked when dropped
///
/// The staging controller owns at most one of these. Replacing, clearing or
/// dropping the controller releases the previous URL exactly once.
pub struct ObjectUrl {
    url: String,
    release: Rc<dyn Fn(&str)>,
}

impl ObjectUrl {
    pub fn acquire<F: 'static>(factory: &Rc<dyn ObjectUrlFactory<F>>, file: &F) -> Option<Self> {
        let url = factory.create(file)?;
        let factory = Rc::clone(factory);
        Some(Self {
            url,
            release: Rc::new(move |url: &str| factory.revoke(url)),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectUrl").field(&self.url).finish()
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        (self.release)(&self.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form_engine::testing::{CountingUrls, TestFile};

    #[test]
    fn test_url_revoked_once_on_drop() {
        let urls = Rc::new(CountingUrls::default());
        let factory: Rc<dyn ObjectUrlFactory<TestFile>> = urls.clone();

        let url = ObjectUrl::acquire(&factory, &TestFile::png("photo.png")).unwrap();
        assert!(url.as_str().starts_with("blob:photo.png"));
        assert_eq!(urls.live(), 1);

        drop(url);
        assert_eq!(urls.live(), 0);
        assert_eq!(urls.revoked.borrow().len(), 1);
    }
}
