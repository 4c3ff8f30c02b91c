//! Core traits for Etalase.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where the site's
//! content lives so repositories and servers do not depend on a concrete
//! configuration format.

use std::path::PathBuf;

use crate::Result;

/// Trait for site configuration.
///
/// Anything that can tell Etalase where its content directories are
/// implements this trait: the CLI's TOML-backed config, test fixtures,
/// or an embedding application.
///
/// Implementors are cloned into the server and shared between request
/// handlers, hence `Send + Sync + Clone + 'static`.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use etalase_core::traits::ConfigProvider;
/// use etalase_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "garment-site"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_root(&self) -> Result<PathBuf> {
///         Ok(self.root.join("content"))
///     }
/// }
///
/// let config = SiteConfig { root: PathBuf::from("/srv/site") };
/// assert_eq!(
///     config.content_path("products").unwrap(),
///     PathBuf::from("/srv/site/content/products")
/// );
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and log output.
    fn project_name(&self) -> &str;

    /// Site directory that relative paths resolve against.
    fn base_path(&self) -> Result<PathBuf>;

    /// Root directory holding one subdirectory per content type.
    fn content_root(&self) -> Result<PathBuf>;

    /// Directory for a specific content type (`products`, `articles`, ...).
    ///
    /// The default maps `content_type` to a direct child of
    /// [`content_root`](Self::content_root).
    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        Ok(self.content_root()?.join(content_type))
    }
}
