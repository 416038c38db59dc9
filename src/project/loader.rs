//! Search-path based assembly resolution.
//!
//! This module provides the [`SearchPathResolver`], a builder-configured resolver that probes
//! an ordered list of directories for `<name>.dll` / `<name>.exe` and reads the identity of the
//! first match through an [`IdentityReader`]. Probing is bounded: only the configured
//! directories are tried, never their subdirectories.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use typeident::{
//!     metadata::identity::AssemblyIdentity,
//!     project::{AssemblyResolver, SearchPathResolver},
//!     Result,
//! };
//!
//! fn read_identity(path: &Path) -> Result<AssemblyIdentity> {
//!     // hand the file to a metadata reader and build the identity from its Assembly row
//!     # unimplemented!()
//! }
//!
//! let resolver = SearchPathResolver::new(read_identity)
//!     .with_search_path("/usr/lib/mono/4.5")?
//!     .strict_versions(true);
//!
//! let mscorlib = resolver.resolve(&AssemblyIdentity::named("mscorlib"))?;
//! # Ok::<(), typeident::Error>(())
//! ```

use std::{
    io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    metadata::identity::AssemblyIdentity, project::AssemblyResolver, Error, Result,
};

/// Reads the identity an assembly file declares for itself.
///
/// This is the seam to a metadata reader: given a candidate file, return the identity from
/// its `Assembly` table. Any `Fn(&Path) -> Result<AssemblyIdentity>` closure implements it.
pub trait IdentityReader: Send + Sync {
    /// Read the identity of the assembly stored at `path`
    ///
    /// # Errors
    /// Returns an error if the file is not a readable assembly.
    fn read_identity(&self, path: &Path) -> Result<AssemblyIdentity>;
}

impl<F> IdentityReader for F
where
    F: Fn(&Path) -> Result<AssemblyIdentity> + Send + Sync,
{
    fn read_identity(&self, path: &Path) -> Result<AssemblyIdentity> {
        self(path)
    }
}

/// Resolver probing a fixed, ordered set of directories.
///
/// # Probing Order
///
/// For every search path in insertion order, every extension in configured order
/// (`dll`, then `exe` by default) is tried as `<dir>/<name>.<ext>`. The first existing file
/// whose identity matches the reference wins. Files whose identity cannot be read are logged
/// and skipped.
///
/// # Matching
///
/// The identity read from a candidate must carry the referenced simple name
/// (ASCII case-insensitive). With [`strict_versions`](Self::strict_versions) enabled it must
/// also [`satisfy`](AssemblyIdentity::satisfies) the reference's culture, version and token;
/// candidates failing either check are skipped.
pub struct SearchPathResolver {
    /// Search paths for assembly discovery
    search_paths: Vec<PathBuf>,
    /// File extensions probed for each search path
    extensions: Vec<String>,
    /// Whether candidates must satisfy the referenced version
    strict_versions: bool,
    /// Reader producing the identity of a candidate file
    reader: Box<dyn IdentityReader>,
}

impl SearchPathResolver {
    /// Create a new resolver with no search paths
    ///
    /// ## Arguments
    /// * 'reader' - Reads the identity of a candidate file
    #[must_use]
    pub fn new(reader: impl IdentityReader + 'static) -> Self {
        Self {
            search_paths: Vec::new(),
            extensions: vec!["dll".to_string(), "exe".to_string()],
            strict_versions: false,
            reader: Box::new(reader),
        }
    }

    /// Add a search path.
    ///
    /// # Arguments
    /// * `path` - Directory to probe; probed after all previously added paths
    ///
    /// # Errors
    /// Returns an error if the path does not exist or is not a directory.
    pub fn with_search_path<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(Error::FileError(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "Search path does not exist or is not a directory: {}",
                    path.display()
                ),
            )));
        }
        self.search_paths.push(path.to_path_buf());
        Ok(self)
    }

    /// Replace the probed file extensions (without leading dot)
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable strict version matching
    #[must_use]
    pub fn strict_versions(mut self, strict: bool) -> Self {
        self.strict_versions = strict;
        self
    }

    /// The configured search paths, in probing order
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Candidate file paths for `name`, in probing order
    ///
    /// Empty when `name` is not a plain file stem: names containing a path separator or
    /// `..`, and absolute names, never leave the configured directories.
    #[must_use]
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        if !is_plain_name(name) {
            return Vec::new();
        }

        let mut paths = Vec::with_capacity(self.search_paths.len() * self.extensions.len());
        for search_path in &self.search_paths {
            for extension in &self.extensions {
                paths.push(search_path.join(format!("{name}.{extension}")));
            }
        }
        paths
    }
}

impl AssemblyResolver for SearchPathResolver {
    fn resolve(&self, reference: &AssemblyIdentity) -> Result<AssemblyIdentity> {
        if !is_plain_name(&reference.name) {
            warn!("refusing to probe for assembly name '{}'", reference.name);
            return Err(Error::UnresolvedAssembly(reference.name.clone()));
        }

        for candidate in self.candidates(&reference.name) {
            if !candidate.is_file() {
                continue;
            }

            let identity = match self.reader.read_identity(&candidate) {
                Ok(identity) => identity,
                Err(e) => {
                    warn!("failed to read identity of {}: {}", candidate.display(), e);
                    continue;
                }
            };

            if !identity.name.eq_ignore_ascii_case(&reference.name) {
                debug!(
                    "{} declares '{}', expected '{}'",
                    candidate.display(),
                    identity.name,
                    reference.name
                );
                continue;
            }

            if self.strict_versions && !identity.satisfies(reference) {
                debug!(
                    "{} is '{}', which does not satisfy '{}'",
                    candidate.display(),
                    identity,
                    reference
                );
                continue;
            }

            debug!("resolved '{}' to {}", reference.name, candidate.display());
            return Ok(identity);
        }

        Err(Error::UnresolvedAssembly(reference.name.clone()))
    }
}

/// Check that `name` names a file directly inside a search path
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\'])
        && !name.contains("..")
        && !Path::new(name).is_absolute()
}
