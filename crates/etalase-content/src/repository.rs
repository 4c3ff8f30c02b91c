//! Directory-backed content repository.
//!
//! The content root holds one directory per content type; each directory
//! holds one frontmatter document per file, named `<slug>.<extension>`.
//!
//! ```text
//! content/
//! ├── products/
//! │   ├── kaos-polos.md
//! │   └── topi-rimba.md
//! ├── articles/
//! └── settings/
//!     └── site.md
//! ```
//!
//! Reads are fail-fast: one malformed document fails the whole
//! [`load_all`](ContentRepository::load_all) call with [`Error::Parse`]
//! naming the file. A missing directory is an empty collection.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use etalase_core::util::files::{self, FileInfo};
use etalase_core::util::paths::is_safe_segment;
use etalase_core::{ConfigProvider, Error, Result};

use crate::cache::{DocumentCache, Fingerprint};
use crate::content_type::ContentType;
use crate::document::ContentDocument;
use crate::frontmatter::{FrontmatterParser, Metadata, YamlFrontmatter};
use crate::normalize::normalize_metadata;
use crate::records::{Product, Record, SiteSettings, Variant};

/// Default document extension.
pub const DEFAULT_EXTENSION: &str = "md";

/// Reads and writes content documents under a root directory.
#[derive(Debug)]
pub struct ContentRepository<P: FrontmatterParser = YamlFrontmatter> {
    root: PathBuf,
    extension: String,
    parser: P,
    cache: Option<Arc<DocumentCache>>,
}

impl ContentRepository<YamlFrontmatter> {
    /// Repository over `root` using YAML frontmatter and `.md` files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            parser: YamlFrontmatter,
            cache: None,
        }
    }

    /// Repository rooted at the configured content root.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(config.content_root()?))
    }
}

impl<P: FrontmatterParser> ContentRepository<P> {
    /// Swap the frontmatter parser.
    pub fn with_parser<Q: FrontmatterParser>(self, parser: Q) -> ContentRepository<Q> {
        ContentRepository {
            root: self.root,
            extension: self.extension,
            parser,
            cache: self.cache,
        }
    }

    /// Change the document file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Enable the document cache. A zero TTL disables it.
    pub fn with_cache(mut self, ttl: Duration) -> Self {
        self.cache = (!ttl.is_zero()).then(|| Arc::new(DocumentCache::new(ttl)));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn cache(&self) -> Option<&DocumentCache> {
        self.cache.as_deref()
    }

    /// Directory holding `content_type`'s documents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] when the name could escape the root.
    pub fn type_dir(&self, content_type: &str) -> Result<PathBuf> {
        if !is_safe_segment(content_type) {
            return Err(Error::invalid_data(format!(
                "invalid content type '{content_type}'"
            )));
        }
        Ok(self.root.join(content_type))
    }

    fn document_path(&self, content_type: &str, slug: &str) -> Result<PathBuf> {
        if !is_safe_segment(slug) {
            return Err(Error::invalid_data(format!("invalid slug '{slug}'")));
        }
        Ok(self
            .type_dir(content_type)?
            .join(format!("{slug}.{}", self.extension)))
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Every document of `content_type`, in file-name order.
    ///
    /// # Errors
    ///
    /// - [`Error::Parse`] if any document is malformed
    /// - [`Error::InvalidData`] for an unsafe content type name
    pub async fn load_all(&self, content_type: impl AsRef<str>) -> Result<Vec<ContentDocument>> {
        let name = content_type.as_ref();
        let dir = self.type_dir(name)?;
        let files = files::list_files(&dir, &self.extension).await?;

        let Some(cache) = &self.cache else {
            return self.parse_files(name, &files).await;
        };

        let fingerprint = Fingerprint::of(&files);
        if let Some(documents) = cache.get(name, &fingerprint).await {
            log::debug!("cache hit for '{name}' ({} documents)", documents.len());
            return Ok(documents.as_ref().clone());
        }

        let documents = self.parse_files(name, &files).await?;
        // Only known, existing directories are cached.
        if name.parse::<ContentType>().is_ok() && files::exists(&dir).await {
            cache.insert(name, fingerprint, documents.clone()).await;
        }
        Ok(documents)
    }

    async fn parse_files(&self, name: &str, files: &[FileInfo]) -> Result<Vec<ContentDocument>> {
        let known = name.parse::<ContentType>().ok();
        let mut documents = Vec::with_capacity(files.len());

        for file in files {
            let mut document = self.read_raw(&file.path, &file.file_name, &file.stem).await?;
            normalize_metadata(&mut document.metadata, known);
            documents.push(document);
        }

        log::debug!("loaded {} '{name}' documents", documents.len());
        Ok(documents)
    }

    /// Read and parse one file without normalizing its metadata.
    async fn read_raw(&self, path: &Path, file_name: &str, slug: &str) -> Result<ContentDocument> {
        let raw = files::read_file(path).await?;
        let parsed = self.parser.parse(&raw).map_err(|e| {
            let message = match e {
                Error::InvalidData(msg) => msg,
                other => other.to_string(),
            };
            Error::parse(file_name, message)
        })?;
        Ok(ContentDocument::from_parsed(slug, parsed))
    }

    /// The document named `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no document has that slug.
    pub async fn load_by_slug(
        &self,
        content_type: impl AsRef<str>,
        slug: &str,
    ) -> Result<ContentDocument> {
        let name = content_type.as_ref();
        self.load_all(name)
            .await?
            .into_iter()
            .find(|doc| doc.slug == slug)
            .ok_or_else(|| Error::not_found(format!("{name}/{slug}")))
    }

    /// Up to `limit` documents whose `field` equals `value`, excluding
    /// `exclude_slug`, in directory order.
    pub async fn load_related(
        &self,
        content_type: impl AsRef<str>,
        exclude_slug: &str,
        field: &str,
        value: &str,
        limit: usize,
    ) -> Result<Vec<ContentDocument>> {
        Ok(self
            .load_all(content_type)
            .await?
            .into_iter()
            .filter(|doc| doc.slug != exclude_slug && doc.field_matches(field, value))
            .take(limit)
            .collect())
    }

    /// Every record of type `R`.
    pub async fn load_records<R: Record>(&self) -> Result<Vec<R>> {
        Ok(self
            .load_all(R::CONTENT_TYPE)
            .await?
            .iter()
            .map(R::from_document)
            .collect())
    }

    /// The record of type `R` named `slug`.
    pub async fn load_record<R: Record>(&self, slug: &str) -> Result<R> {
        let document = self.load_by_slug(R::CONTENT_TYPE, slug).await?;
        Ok(R::from_document(&document))
    }

    /// Site settings.
    ///
    /// All documents under `settings/` are merged in file-name order, later
    /// keys overriding earlier ones. An empty or missing directory yields
    /// [`SiteSettings::default`].
    pub async fn load_settings(&self) -> Result<SiteSettings> {
        let documents = self.load_all(ContentType::Settings).await?;
        let Some(first) = documents.first() else {
            return Ok(SiteSettings::default());
        };

        let mut merged = ContentDocument {
            slug: first.slug.clone(),
            metadata: Metadata::new(),
            body: String::new(),
        };
        for document in documents {
            merged.metadata.extend(document.metadata);
        }
        Ok(SiteSettings::from_document(&merged))
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Serialize `document` and atomically replace its file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the file cannot be replaced.
    pub async fn save_document(
        &self,
        content_type: impl AsRef<str>,
        document: &ContentDocument,
    ) -> Result<PathBuf> {
        let name = content_type.as_ref();
        let path = self.document_path(name, &document.slug)?;
        let raw = self.parser.stringify(&document.to_parsed())?;

        files::write_atomic(&path, &raw).await?;
        log::info!("wrote {}", path.display());

        if let Some(cache) = &self.cache {
            cache.invalidate(name).await;
        }
        Ok(path)
    }

    /// Replace a product's `variants` and persist it.
    ///
    /// The file is re-read as authored, so every other field keeps its
    /// original form (currency strings, wrapper lists, unknown keys).
    /// Returns the updated product.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no product has that slug
    /// - [`Error::Parse`] if the existing file is malformed
    /// - [`Error::Write`] if the file cannot be replaced
    pub async fn update_variants(&self, slug: &str, variants: &[Variant]) -> Result<Product> {
        let content_type = ContentType::Products;
        let path = self.document_path(content_type.as_str(), slug)?;
        if !files::exists(&path).await {
            return Err(Error::not_found(format!("{content_type}/{slug}")));
        }

        let file_name = format!("{slug}.{}", self.extension);
        let mut document = self.read_raw(&path, &file_name, slug).await?;
        let value = serde_json::to_value(variants)
            .map_err(|e| Error::serialization(e.to_string()))?;
        document.metadata.insert("variants".to_string(), value);

        self.save_document(content_type, &document).await?;
        log::info!("updated {} variants for product '{slug}'", variants.len());

        normalize_metadata(&mut document.metadata, Some(content_type));
        Ok(Product::from_document(&document))
    }

    /// Names of the content type directories present under the root.
    pub async fn content_types(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for content_type in ContentType::ALL {
            if files::exists(&self.root.join(content_type.as_str())).await {
                names.push(content_type.as_str().to_string());
            }
        }
        Ok(names)
    }
}
